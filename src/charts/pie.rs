//! Pie chart: one hoverable wedge per dataset entry plus a legend.

use crate::color::{categorical_palette, Rgba};
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::figure::{Figure, LegendPatch, PieFragment};

/// Builder for a pie chart [`Figure`].
#[derive(Debug, Clone)]
pub struct PieChart {
    id: String,
    dataset: Dataset,
    width: f64,
    height: f64,
    x0: f64,
    y0: f64,
    colors: Vec<Rgba>,
    legend: bool,
}

impl PieChart {
    /// A 600 x 600 pie chart with a legend and palette colors.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            dataset: Dataset::new(),
            width: 600.0,
            height: 600.0,
            x0: 0.0,
            y0: 0.0,
            colors: Vec::new(),
            legend: true,
        }
    }

    /// Set the data; one wedge per entry.
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

    /// Wedge colors, cycled when shorter than the dataset.
    #[must_use]
    pub fn colors(mut self, colors: Vec<Rgba>) -> Self {
        self.colors = colors;
        self
    }

    /// Show or hide the legend.
    #[must_use]
    pub fn legend(mut self, visible: bool) -> Self {
        self.legend = visible;
        self
    }

    /// Build the figure.
    ///
    /// Negative values count as zero. The wedges start at 3 o'clock and run
    /// clockwise; the last one always closes at 360 degrees.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when the dataset is empty or its positive
    /// total is zero or not finite, and region errors for a bad size.
    pub fn build(self) -> Result<Figure> {
        let total: f64 = self.dataset.values().iter().map(|v| v.max(0.0)).sum();
        if self.dataset.is_empty() || !total.is_finite() || total <= 0.0 {
            return Err(Error::EmptyData);
        }
        let colors = if self.colors.is_empty() {
            categorical_palette(self.dataset.len())
        } else {
            self.colors
        };
        let fragments = wedges(&self.dataset, total, &colors);

        let mut figure = Figure::builder(self.id)
            .dataset(self.dataset)
            .size(self.width, self.height)
            .origin(self.x0, self.y0)
            .legend(LegendPatch::visible(self.legend))
            .build()?;
        let plot = figure.mapper().region().plot_area();
        let center = plot.center();
        let radius = plot.width.min(plot.height) / 2.0;
        for (start, end, label, value, color) in fragments {
            figure.add_element(PieFragment::new(center, radius, start, end, label, value, color));
        }
        figure.set_draw_callback(|fig, surface| fig.draw_elements(surface));
        Ok(figure)
    }
}

/// `(start, end, label, value, color)` per entry, in degrees.
fn wedges(dataset: &Dataset, total: f64, colors: &[Rgba]) -> Vec<(f64, f64, String, f64, Rgba)> {
    let last = dataset.len().saturating_sub(1);
    let mut start = 0.0;
    dataset
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let end = if i == last { 360.0 } else { start + value.max(0.0) / total * 360.0 };
            let wedge = (start, end, label.to_string(), value, colors[i % colors.len()]);
            start = end;
            wedge
        })
        .collect()
}

/// Pie chart of `dataset` filling a `width x height` region at the origin.
///
/// # Errors
///
/// See [`PieChart::build`].
pub fn pie_chart(id: impl Into<String>, dataset: Dataset, width: f64, height: f64) -> Result<Figure> {
    PieChart::new(id).dataset(dataset).size(width, height).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::surface::RecordingSurface;

    fn fruit() -> Dataset {
        Dataset::new().with("apples", 1.0).with("pears", 1.0).with("plums", 2.0)
    }

    #[test]
    fn test_wedges_cover_full_circle() {
        let figure = pie_chart("pie", fruit(), 300.0, 300.0).unwrap();
        let elements = figure.elements();
        assert_eq!(elements.len(), 3);
        // Right of centre is 0 degrees, inside the first wedge.
        assert!(elements[0].contains(Point::new(200.0, 150.0)));
        // Straight up is 270 degrees, inside the last wedge.
        assert!(elements[2].contains(Point::new(150.0, 100.0)));
        assert!(!elements[1].contains(Point::new(150.0, 100.0)));
    }

    #[test]
    fn test_empty_or_zero_rejected() {
        assert!(matches!(pie_chart("p", Dataset::new(), 300.0, 300.0), Err(Error::EmptyData)));
        let zeros = Dataset::new().with("a", 0.0).with("b", -1.0);
        assert!(matches!(pie_chart("p", zeros, 300.0, 300.0), Err(Error::EmptyData)));
    }

    #[test]
    fn test_hover_updates_legend_text() {
        let mut figure = pie_chart("pie", fruit(), 300.0, 300.0).unwrap();
        let mut surface = RecordingSurface::new(300.0, 300.0);
        figure.draw(&mut surface, Some(Point::new(150.0, 100.0))).unwrap();
        let texts: Vec<_> = surface.texts().collect();
        assert!(texts.contains(&"plums: 2"));
        assert!(texts.contains(&"apples"));
        // Three wedges filled by the callback.
        assert_eq!(surface.filled_paths().count(), 3);
    }

    #[test]
    fn test_custom_colors_cycle() {
        let figure = PieChart::new("pie")
            .dataset(fruit())
            .size(300.0, 300.0)
            .colors(vec![Rgba::RED, Rgba::BLUE])
            .legend(false)
            .build()
            .unwrap();
        let colors: Vec<_> = figure.elements().iter().map(|e| e.color()).collect();
        assert_eq!(colors, vec![Rgba::RED, Rgba::BLUE, Rgba::RED]);
        assert!(!figure.legend().visible);
    }
}
