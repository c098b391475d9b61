//! Bar chart: one bar per category on a numeric y axis.

use crate::axis::{AxisChoice, AxisIndex, AxisPatch};
use crate::color::Rgba;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::figure::{Edge, EdgeSet, Figure, SpinePatch, TickPatch};
use crate::geometry::Rect;

/// Fraction of each category bin left empty on either side of a bar.
const BAR_INSET: f64 = 0.1;
/// Target number of major intervals on the value axis.
const VALUE_TICKS: f64 = 5.0;

/// Round `raw` up to 1, 2 or 5 times a power of ten.
fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let factor = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

/// Decimal places needed to print multiples of `step`.
fn decimal_places(step: f64) -> usize {
    (-step.log10().floor()).max(0.0) as usize
}

/// Builder for a bar chart [`Figure`].
#[derive(Debug, Clone)]
pub struct BarChart {
    id: String,
    dataset: Dataset,
    width: f64,
    height: f64,
    x0: f64,
    y0: f64,
    color: Rgba,
}

impl BarChart {
    /// A 600 x 600 steel blue bar chart.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            dataset: Dataset::new(),
            width: 600.0,
            height: 600.0,
            x0: 0.0,
            y0: 0.0,
            color: Rgba::rgb(70, 130, 180),
        }
    }

    /// Set the data; one bar per entry.
    #[must_use]
    pub fn dataset(mut self, dataset: Dataset) -> Self {
        self.dataset = dataset;
        self
    }

    /// Set the region size.
    #[must_use]
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the region origin.
    #[must_use]
    pub fn origin(mut self, x0: f64, y0: f64) -> Self {
        self.x0 = x0;
        self.y0 = y0;
        self
    }

    /// Set the bar color.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Build the figure.
    ///
    /// The x axis holds one unit-wide bin per category with the labels
    /// centred underneath. The y axis starts at zero and ends on a round
    /// value at or above the largest bar. Negative values draw nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] for an empty dataset and region errors
    /// for a bad size.
    pub fn build(self) -> Result<Figure> {
        let max = self.dataset.max_value().ok_or(Error::EmptyData)?;
        let top = if max.is_finite() && max > 0.0 { max } else { 1.0 };
        let step = nice_step(top / VALUE_TICKS);
        let y_max = (top / step).ceil() * step;
        let bins = self.dataset.len() as f64;
        let labels = self.dataset.labels().to_vec();
        let color = self.color;

        let mut figure = Figure::builder(self.id)
            .dataset(self.dataset)
            .size(self.width, self.height)
            .origin(self.x0, self.y0)
            .axis(AxisIndex::X, AxisPatch::range(0.0, bins).ticks(1.0, 1.0))
            .axis(AxisIndex::Y, AxisPatch::range(0.0, y_max).ticks(step, step / 2.0))
            .color(color)
            .build()?;
        figure.set_spine(&SpinePatch::edges([Edge::Bottom, Edge::Left].into_iter().collect::<EdgeSet>()));
        figure.set_ticks(
            AxisIndex::Y,
            &TickPatch {
                marks: Some(true),
                labels: Some(true),
                decimal_places: Some(decimal_places(step)),
                ..TickPatch::default()
            },
        );
        figure.set_labels(AxisIndex::X, labels);
        figure.set_draw_callback(move |fig, surface| {
            let mapper = fig.mapper();
            for (i, value) in fig.dataset().values().iter().enumerate() {
                if *value <= 0.0 {
                    continue;
                }
                let left = i as f64 + BAR_INSET;
                let right = i as f64 + 1.0 - BAR_INSET;
                let top_left = mapper.data_to_pixel(left, *value, AxisChoice::Primary);
                let bottom_right = mapper.data_to_pixel(right, 0.0, AxisChoice::Primary);
                surface.fill_rect(Rect::from_corners(top_left, bottom_right), color);
            }
        });
        Ok(figure)
    }
}

/// Bar chart of `dataset` filling a `width x height` region at the origin.
///
/// # Errors
///
/// See [`BarChart::build`].
pub fn bar_chart(id: impl Into<String>, dataset: Dataset, width: f64, height: f64) -> Result<Figure> {
    BarChart::new(id).dataset(dataset).size(width, height).build()
}
