//! Figures: a coordinate-mapped region with decorations, series, interactive
//! elements and a redraw loop.
//!
//! A [`Figure`] owns its [`CoordinateMapper`] and every decoration setting.
//! `draw_*` methods render a decoration immediately and remember it, so the
//! next [`Figure::draw`] repeats it. Each redraw runs, in order:
//!
//! 1. clear the figure bound (padded by one pixel),
//! 2. spine, tick marks, tick labels, category labels, grid,
//! 3. the custom draw callback,
//! 4. crosshair and readouts when the pointer is inside the bound,
//! 5. pointer notification of every interactive element,
//! 6. the legend, when enabled.
//!
//! # Example
//!
//! ```
//! use canvasplot::axis::{AxisChoice, AxisIndex, AxisPatch};
//! use canvasplot::figure::{EdgeSet, Figure};
//! use canvasplot::geometry::Point;
//! use canvasplot::surface::RecordingSurface;
//!
//! let mut figure = Figure::builder("sales")
//!     .size(300.0, 300.0)
//!     .axis(AxisIndex::X, AxisPatch::range(0.0, 100.0))
//!     .callback(|fig, surface| {
//!         let points = [Point::new(0.0, 0.0), Point::new(100.0, 200.0)];
//!         fig.line(surface, &points, AxisChoice::Primary);
//!     })
//!     .build()
//!     .unwrap();
//!
//! let mut surface = RecordingSurface::new(300.0, 300.0);
//! figure.draw_spine(&mut surface, EdgeSet::ALL).unwrap();
//! figure.draw(&mut surface, Some(Point::new(150.0, 150.0))).unwrap();
//! assert_eq!(surface.stroked_paths().count(), 1);
//! ```

mod decoration;
mod element;
mod series;
mod settings;

pub use decoration::{
    category_labels, crosshair, draw_labels, grid_segments, spine_segments, stroke_segments,
    tick_labels, tick_segments, Label, Segment, CURSOR_MARGIN, LABEL_OFFSET, MAJOR_TICK_LENGTH,
    MINOR_TICK_LENGTH, X_READOUT_OFFSET, Y2_READOUT_OFFSET, Y_READOUT_OFFSET,
};
pub use element::{pixel_angle, InteractiveElement, PieFragment, IDLE_OPACITY};
pub use series::{bezier_path, line_path, quadratic_path, trace, BezierParams};
pub use settings::{
    CursorPatch, CursorSettings, Edge, EdgeSet, FigureConfig, GridPatch, GridSettings,
    LegendPatch, LegendSettings, SpinePatch, SpineSettings, TickPatch, TickSettings,
    GRID_OPACITY,
};

use std::fmt;

use crate::axis::{AxisChoice, AxisIndex, AxisPatch};
use crate::color::Rgba;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::mapper::CoordinateMapper;
use crate::region::{Region, DEFAULT_GAP};
use crate::surface::{DrawingSurface, FontStyle, StrokeStyle, TextPlacement, TEXT_GAP};

/// Custom drawing hook run on every redraw, after decorations.
pub type DrawCallback = Box<dyn FnMut(&mut Figure, &mut dyn DrawingSurface)>;

/// A plot region with its axes, decorations and interactive elements.
pub struct Figure {
    id: String,
    mapper: CoordinateMapper,
    dataset: Dataset,
    spine: SpineSettings,
    ticks: [TickSettings; 3],
    cursor: CursorSettings,
    grid: GridSettings,
    legend: LegendSettings,
    categories: [Vec<String>; 3],
    font: FontStyle,
    brush: StrokeStyle,
    elements: Vec<Box<dyn InteractiveElement>>,
    callback: Option<DrawCallback>,
    pointer: Option<Point>,
}

impl fmt::Debug for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Figure")
            .field("id", &self.id)
            .field("mapper", &self.mapper)
            .field("dataset", &self.dataset)
            .field("elements", &self.elements.len())
            .field("has_callback", &self.callback.is_some())
            .finish_non_exhaustive()
    }
}

impl Figure {
    /// Create a figure over `region` with default axes and no decorations.
    ///
    /// # Errors
    ///
    /// Propagates [`CoordinateMapper::new`] errors.
    pub fn new(id: impl Into<String>, dataset: Dataset, region: Region) -> Result<Self> {
        Ok(Self {
            id: id.into(),
            mapper: CoordinateMapper::new(region)?,
            dataset,
            spine: SpineSettings::default(),
            ticks: [TickSettings::default(); 3],
            cursor: CursorSettings::default(),
            grid: GridSettings::default(),
            legend: LegendSettings::default(),
            categories: [Vec::new(), Vec::new(), Vec::new()],
            font: FontStyle::default(),
            brush: StrokeStyle::default(),
            elements: Vec::new(),
            callback: None,
            pointer: None,
        })
    }

    /// Start building a figure.
    #[must_use]
    pub fn builder(id: impl Into<String>) -> FigureBuilder {
        FigureBuilder::new(id)
    }

    /// Create a figure from a declarative configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidRegion`] for a bad size or gap, or an
    /// axis error from the initial reload.
    pub fn from_config(id: impl Into<String>, dataset: Dataset, config: &FigureConfig) -> Result<Self> {
        let region = Region::new(config.x0, config.y0, config.width, config.height, config.gap)?;
        let mut figure = Self::new(id, dataset, region)?;
        for (index, patch) in config.axes.iter().enumerate() {
            figure.set_axis(index, patch);
        }
        figure.spine.apply(&config.spine);
        for (index, patch) in config.ticks.iter().enumerate() {
            match AxisIndex::from_index(index) {
                Some(axis) => figure.set_ticks(axis, patch),
                None => tracing::warn!(index, "ignoring tick settings for unknown axis index"),
            }
        }
        figure.cursor.apply(&config.cursor);
        figure.grid.apply(&config.grid);
        figure.legend.apply(&config.legend);
        figure.mapper.reload()?;
        Ok(figure)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Identifier unique within a canvas.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The coordinate mapper.
    #[must_use]
    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// The figure's data.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Pointer passed to the current or most recent redraw.
    #[must_use]
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Registered interactive elements, in notification order.
    #[must_use]
    pub fn elements(&self) -> &[Box<dyn InteractiveElement>] {
        &self.elements
    }

    /// Stored spine settings.
    #[must_use]
    pub fn spine(&self) -> &SpineSettings {
        &self.spine
    }

    /// Stored tick settings of one axis.
    #[must_use]
    pub fn ticks(&self, axis: AxisIndex) -> &TickSettings {
        &self.ticks[axis.index()]
    }

    /// Stored cursor settings.
    #[must_use]
    pub fn cursor(&self) -> &CursorSettings {
        &self.cursor
    }

    /// Stored grid settings.
    #[must_use]
    pub fn grid(&self) -> &GridSettings {
        &self.grid
    }

    /// Stored legend settings.
    #[must_use]
    pub fn legend(&self) -> &LegendSettings {
        &self.legend
    }

    /// Category labels of one axis.
    #[must_use]
    pub fn labels(&self, axis: AxisIndex) -> &[String] {
        &self.categories[axis.index()]
    }

    /// Stroke used by the series methods.
    #[must_use]
    pub fn brush(&self) -> &StrokeStyle {
        &self.brush
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Partially update an axis (0 = x, 1 = y, 2 = secondary y).
    ///
    /// Unknown indices are logged and ignored. Returns whether the patch was
    /// applied; it takes effect on the next reload or redraw.
    pub fn set_axis(&mut self, axis: usize, patch: &AxisPatch) -> bool {
        self.mapper.set_axis_bounds(axis, patch)
    }

    /// Recompute the axis ratios now.
    ///
    /// # Errors
    ///
    /// See [`CoordinateMapper::reload`].
    pub fn reload(&mut self) -> Result<()> {
        self.mapper.reload()
    }

    /// Resize the region, keeping its origin.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidRegion`] if no plot area would remain.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        self.mapper.resize(width, height)
    }

    /// Move the region origin.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidRegion`] for non-finite coordinates.
    pub fn move_to(&mut self, x0: f64, y0: f64) -> Result<()> {
        self.mapper.move_to(x0, y0)
    }

    /// Merge a spine patch.
    pub fn set_spine(&mut self, patch: &SpinePatch) {
        self.spine.apply(patch);
    }

    /// Merge a tick patch for one axis.
    pub fn set_ticks(&mut self, axis: AxisIndex, patch: &TickPatch) {
        self.ticks[axis.index()].apply(patch);
    }

    /// Merge a cursor patch.
    pub fn set_cursor(&mut self, patch: &CursorPatch) {
        self.cursor.apply(patch);
    }

    /// Merge a grid patch.
    pub fn set_grid(&mut self, patch: &GridPatch) {
        self.grid.apply(patch);
    }

    /// Replace the category labels of one axis. An empty list removes them.
    pub fn set_labels(&mut self, axis: AxisIndex, labels: Vec<String>) {
        self.categories[axis.index()] = labels;
    }

    /// Merge a legend patch.
    pub fn set_legend(&mut self, patch: &LegendPatch) {
        self.legend.apply(patch);
    }

    /// Font of tick and category labels.
    pub fn set_font(&mut self, font: FontStyle) {
        self.font = font;
    }

    /// Stroke used by the series methods.
    pub fn set_brush(&mut self, brush: StrokeStyle) {
        self.brush = brush;
    }

    /// Replace the custom draw callback.
    pub fn set_draw_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&mut Figure, &mut dyn DrawingSurface) + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    /// Remove the custom draw callback.
    pub fn clear_draw_callback(&mut self) {
        self.callback = None;
    }

    /// Register an interactive element.
    pub fn add_element<E: InteractiveElement + 'static>(&mut self, element: E) {
        self.elements.push(Box::new(element));
        tracing::debug!(figure = %self.id, count = self.elements.len(), "element added");
    }

    /// Remove every interactive element.
    pub fn clear_elements(&mut self) {
        self.elements.clear();
    }

    // ========================================================================
    // Decorations
    // ========================================================================

    /// Draw the selected border lines and remember them for redraws.
    ///
    /// # Errors
    ///
    /// Returns an axis error if a pending edit cannot be applied.
    pub fn draw_spine(&mut self, surface: &mut dyn DrawingSurface, edges: EdgeSet) -> Result<()> {
        self.mapper.ensure_fresh()?;
        self.spine.edges = edges;
        self.render_spine(surface);
        Ok(())
    }

    /// Draw major and minor tick marks on `axis` and remember them.
    ///
    /// # Errors
    ///
    /// Returns an axis error if a pending edit cannot be applied.
    pub fn draw_tick_marks(
        &mut self,
        surface: &mut dyn DrawingSurface,
        axis: AxisIndex,
        outward: bool,
    ) -> Result<()> {
        self.mapper.ensure_fresh()?;
        let settings = &mut self.ticks[axis.index()];
        settings.marks = true;
        settings.outward = outward;
        self.render_tick_marks(surface, axis);
        Ok(())
    }

    /// Draw numeric labels at the major ticks of `axis` and remember them.
    ///
    /// # Errors
    ///
    /// Returns an axis error if a pending edit cannot be applied.
    pub fn draw_tick_mark_labels(
        &mut self,
        surface: &mut dyn DrawingSurface,
        axis: AxisIndex,
        decimal_places: usize,
    ) -> Result<()> {
        self.mapper.ensure_fresh()?;
        let settings = &mut self.ticks[axis.index()];
        settings.labels = true;
        settings.decimal_places = decimal_places;
        self.render_tick_labels(surface, axis);
        Ok(())
    }

    /// Draw category names centred in the major-tick bins of `axis` and
    /// remember them. An empty list does nothing.
    ///
    /// # Errors
    ///
    /// Returns an axis error if a pending edit cannot be applied.
    pub fn draw_category_labels(
        &mut self,
        surface: &mut dyn DrawingSurface,
        axis: AxisIndex,
        labels: Vec<String>,
    ) -> Result<()> {
        if labels.is_empty() {
            return Ok(());
        }
        self.mapper.ensure_fresh()?;
        self.categories[axis.index()] = labels;
        self.render_category_labels(surface, axis);
        Ok(())
    }

    /// Draw faint lines at the major ticks of the enabled axes and remember
    /// the selection.
    ///
    /// # Errors
    ///
    /// Returns an axis error if a pending edit cannot be applied.
    pub fn draw_grid(
        &mut self,
        surface: &mut dyn DrawingSurface,
        show_x: bool,
        show_y: bool,
        show_y2: bool,
    ) -> Result<()> {
        self.mapper.ensure_fresh()?;
        self.grid.apply(&GridPatch::show(show_x, show_y, show_y2));
        self.render_grid(surface);
        Ok(())
    }

    fn tick_stroke(&self) -> StrokeStyle {
        self.spine.stroke
    }

    fn render_spine(&self, surface: &mut dyn DrawingSurface) {
        let segments = spine_segments(&self.mapper, self.spine.edges);
        stroke_segments(surface, &segments, &self.spine.stroke);
    }

    fn render_tick_marks(&self, surface: &mut dyn DrawingSurface, axis: AxisIndex) {
        let segments = tick_segments(&self.mapper, axis, self.ticks[axis.index()].outward);
        stroke_segments(surface, &segments, &self.tick_stroke());
    }

    fn render_tick_labels(&self, surface: &mut dyn DrawingSurface, axis: AxisIndex) {
        let labels = tick_labels(&self.mapper, axis, self.ticks[axis.index()].decimal_places);
        draw_labels(surface, &labels, &self.font);
    }

    fn render_category_labels(&self, surface: &mut dyn DrawingSurface, axis: AxisIndex) {
        let labels = category_labels(&self.mapper, axis, &self.categories[axis.index()]);
        draw_labels(surface, &labels, &self.font);
    }

    fn render_grid(&self, surface: &mut dyn DrawingSurface) {
        for axis in AxisIndex::ALL {
            if self.grid.shows(axis) {
                stroke_segments(surface, &grid_segments(&self.mapper, axis), &self.grid.stroke);
            }
        }
    }

    fn render_decorations(&self, surface: &mut dyn DrawingSurface) {
        self.render_spine(surface);
        for axis in AxisIndex::ALL {
            let ticks = &self.ticks[axis.index()];
            if ticks.marks {
                self.render_tick_marks(surface, axis);
            }
            if ticks.labels {
                self.render_tick_labels(surface, axis);
            }
            if !self.categories[axis.index()].is_empty() {
                self.render_category_labels(surface, axis);
            }
        }
        self.render_grid(surface);
    }

    fn render_cursor(&self, surface: &mut dyn DrawingSurface, pointer: Point) {
        let (lines, labels) = crosshair(&self.mapper, pointer, &self.cursor);
        stroke_segments(surface, &lines, &StrokeStyle::new(self.cursor.color, 1.0));
        let font = FontStyle { color: self.cursor.color, ..self.font.clone() };
        draw_labels(surface, &labels, &font);
    }

    /// Top-left corner of the legend box.
    fn legend_origin(&self, surface: &dyn DrawingSurface) -> Point {
        let text_width = self
            .elements
            .iter()
            .map(|e| surface.measure_text_width(e.display_text(), &self.legend.font))
            .fold(0.0_f64, f64::max);
        let width = self.legend.swatch + TEXT_GAP + text_width;
        self.legend.origin.unwrap_or_else(|| {
            let plot = self.mapper.region().plot_area();
            Point::new(plot.right() - width, plot.top())
        })
    }

    fn render_legend(&self, surface: &mut dyn DrawingSurface) {
        if self.elements.is_empty() {
            return;
        }
        let origin = self.legend_origin(surface);
        let swatch = self.legend.swatch;
        for (i, element) in self.elements.iter().enumerate() {
            let y = origin.y + i as f64 * self.legend.line_height;
            surface.fill_rect(Rect::new(origin.x, y, swatch, swatch), element.color());
            surface.draw_text(
                element.display_text(),
                Point::new(origin.x + swatch, y),
                TextPlacement::Below,
                &self.legend.font,
            );
        }
    }

    // ========================================================================
    // Redraw loop
    // ========================================================================

    /// Redraw the whole figure for a pointer position in surface pixels.
    ///
    /// # Errors
    ///
    /// Returns an axis error if pending edits cannot be applied; nothing is
    /// drawn in that case.
    pub fn draw(&mut self, surface: &mut dyn DrawingSurface, pointer: Option<Point>) -> Result<()> {
        self.mapper.ensure_fresh()?;
        self.pointer = pointer;
        let bound = self.mapper.region().bound();
        surface.clear_region(bound.inflate(1.0));
        self.render_decorations(surface);

        // The callback borrows the figure mutably, so it is taken out for
        // the call. A replacement installed by the callback wins.
        if let Some(mut callback) = self.callback.take() {
            callback(&mut *self, &mut *surface);
            if self.callback.is_none() {
                self.callback = Some(callback);
            }
        }

        let inside = pointer.filter(|p| bound.contains(*p));
        if let Some(p) = inside {
            self.render_cursor(surface, p);
        }
        for element in &mut self.elements {
            element.on_pointer(pointer);
        }
        if self.legend.visible {
            self.render_legend(surface);
        }
        tracing::trace!(
            figure = %self.id,
            elements = self.elements.len(),
            cursor = inside.is_some(),
            "figure redrawn"
        );
        Ok(())
    }

    /// Draw every element, highlighting the ones under the pointer.
    pub fn draw_elements(&self, surface: &mut dyn DrawingSurface) {
        for element in &self.elements {
            let hovered = self.pointer.is_some_and(|p| element.contains(p));
            element.draw(surface, hovered);
        }
    }

    // ========================================================================
    // Series
    // ========================================================================

    /// Straight segments through data points.
    pub fn line(&self, surface: &mut dyn DrawingSurface, points: &[Point], choice: AxisChoice) {
        series::line(surface, &self.mapper, points, choice, &self.brush);
    }

    /// Square markers of side `marker_size` at data points.
    pub fn plot(
        &self,
        surface: &mut dyn DrawingSurface,
        points: &[Point],
        choice: AxisChoice,
        marker_size: f64,
    ) {
        series::plot(surface, &self.mapper, points, choice, marker_size, &self.brush);
    }

    /// Quadratic-smoothed curve through data points.
    pub fn curve(&self, surface: &mut dyn DrawingSurface, points: &[Point], choice: AxisChoice) {
        series::curve(surface, &self.mapper, points, choice, &self.brush);
    }

    /// Cubic Bezier curve through data points.
    pub fn bezier_curve(
        &self,
        surface: &mut dyn DrawingSurface,
        points: &[Point],
        choice: AxisChoice,
        params: BezierParams,
    ) {
        series::bezier_curve(surface, &self.mapper, points, choice, params, &self.brush);
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`Figure`].
#[must_use]
pub struct FigureBuilder {
    id: String,
    dataset: Dataset,
    width: f64,
    height: f64,
    x0: f64,
    y0: f64,
    gap: f64,
    axes: [AxisPatch; 3],
    legend: LegendPatch,
    font: FontStyle,
    brush: StrokeStyle,
    callback: Option<DrawCallback>,
}

impl fmt::Debug for FigureBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FigureBuilder")
            .field("id", &self.id)
            .field("size", &(self.width, self.height))
            .field("origin", &(self.x0, self.y0))
            .field("gap", &self.gap)
            .finish_non_exhaustive()
    }
}

impl FigureBuilder {
    /// 600 x 600 at the origin with the default gap.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            dataset: Dataset::new(),
            width: 600.0,
            height: 600.0,
            x0: 0.0,
            y0: 0.0,
            gap: DEFAULT_GAP,
            axes: [AxisPatch::default(); 3],
            legend: LegendPatch::default(),
            font: FontStyle::default(),
            brush: StrokeStyle::default(),
            callback: None,
        }
    }

    /// Figure data.
    pub fn dataset(mut self, dataset: Dataset) -> Self {
        self.dataset = dataset;
        self
    }

    /// Full region size.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Region width.
    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Region height.
    pub fn height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    /// Region top-left corner on the surface.
    pub fn origin(mut self, x0: f64, y0: f64) -> Self {
        self.x0 = x0;
        self.y0 = y0;
        self
    }

    /// Decoration inset.
    pub fn gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Patch one axis.
    pub fn axis(mut self, axis: AxisIndex, patch: AxisPatch) -> Self {
        self.axes[axis.index()] = patch;
        self
    }

    /// Legend settings.
    pub fn legend(mut self, patch: LegendPatch) -> Self {
        self.legend = patch;
        self
    }

    /// Label font.
    pub fn font(mut self, font: FontStyle) -> Self {
        self.font = font;
        self
    }

    /// Series stroke.
    pub fn brush(mut self, brush: StrokeStyle) -> Self {
        self.brush = brush;
        self
    }

    /// Series color, keeping the brush width.
    pub fn color(mut self, color: Rgba) -> Self {
        self.brush.color = color;
        self
    }

    /// Custom draw callback.
    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut Figure, &mut dyn DrawingSurface) + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Build the figure and compute its axis ratios.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidRegion`] for a bad size or gap, or an
    /// axis error from the initial reload.
    pub fn build(self) -> Result<Figure> {
        let region = Region::new(self.x0, self.y0, self.width, self.height, self.gap)?;
        let mut figure = Figure::new(self.id, self.dataset, region)?;
        for (axis, patch) in AxisIndex::ALL.into_iter().zip(self.axes) {
            figure.mapper.set_axis(axis, &patch);
        }
        figure.mapper.reload()?;
        figure.legend.apply(&self.legend);
        figure.font = self.font;
        figure.brush = self.brush;
        figure.callback = self.callback;
        Ok(figure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::surface::{DrawCommand, RecordingSurface};
    use std::cell::Cell;
    use std::rc::Rc;

    fn figure() -> Figure {
        Figure::builder("f")
            .size(300.0, 300.0)
            .axis(AxisIndex::X, AxisPatch::range(0.0, 100.0).ticks(100.0, 10.0))
            .axis(AxisIndex::Y, AxisPatch::range(0.0, 10.0).ticks(5.0, 1.0))
            .build()
            .unwrap()
    }

    fn surface() -> RecordingSurface {
        RecordingSurface::new(300.0, 300.0)
    }

    #[test]
    fn test_builder_applies_axes() {
        let f = figure();
        assert_eq!(f.mapper().axis(AxisIndex::X).max(), 100.0);
        assert!(!f.mapper().is_stale());
        let p = f.mapper().data_to_pixel(50.0, 0.0, AxisChoice::Primary);
        assert_eq!(p, Point::new(150.0, 270.0));
    }

    #[test]
    fn test_builder_rejects_degenerate_axis() {
        let err = Figure::builder("bad")
            .axis(AxisIndex::Y, AxisPatch::range(3.0, 3.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::DegenerateAxis { axis: AxisIndex::Y, .. }));
    }

    #[test]
    fn test_draw_clears_padded_bound_first() {
        let mut f = figure();
        let mut s = surface();
        f.draw(&mut s, None).unwrap();
        assert_eq!(s.commands()[0], DrawCommand::Clear { bound: Rect::new(-1.0, -1.0, 302.0, 302.0) });
    }

    #[test]
    fn test_decorations_are_remembered() {
        let mut f = figure();
        let mut s = surface();
        f.draw_spine(&mut s, EdgeSet::ALL).unwrap();
        f.draw_tick_marks(&mut s, AxisIndex::X, true).unwrap();
        f.draw_tick_mark_labels(&mut s, AxisIndex::Y, 0).unwrap();
        let first_pass = s.take_commands();

        f.draw(&mut s, None).unwrap();
        let redraw = s.take_commands();
        assert!(matches!(redraw[0], DrawCommand::Clear { .. }));
        assert_eq!(&redraw[1..], &first_pass[..]);
    }

    #[test]
    fn test_empty_category_labels_noop() {
        let mut f = figure();
        let mut s = surface();
        f.draw_category_labels(&mut s, AxisIndex::X, Vec::new()).unwrap();
        assert!(s.commands().is_empty());
        assert!(f.labels(AxisIndex::X).is_empty());
    }

    #[test]
    fn test_cursor_only_inside_bound() {
        let mut f = figure();
        f.set_cursor(&CursorPatch::new().readout(AxisIndex::X, true));
        let mut s = surface();
        f.draw(&mut s, Some(Point::new(400.0, 150.0))).unwrap();
        assert_eq!(s.lines().count(), 0);

        f.draw(&mut s, Some(Point::new(150.0, 150.0))).unwrap();
        assert_eq!(s.lines().count(), 2);
        assert_eq!(s.texts().collect::<Vec<_>>(), vec!["50.00"]);
    }

    #[test]
    fn test_callback_runs_each_draw_with_figure() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let mut f = figure();
        f.set_draw_callback(move |fig, surface| {
            seen.set(seen.get() + 1);
            fig.line(surface, &[Point::new(0.0, 0.0), Point::new(100.0, 10.0)], AxisChoice::Primary);
        });
        let mut s = surface();
        f.draw(&mut s, None).unwrap();
        f.draw(&mut s, None).unwrap();
        assert_eq!(calls.get(), 2);
        assert_eq!(s.stroked_paths().count(), 2);
    }

    #[test]
    fn test_callback_can_replace_itself() {
        let mut f = figure();
        f.set_draw_callback(|fig, _| {
            fig.set_draw_callback(|fig, surface| fig.plot(surface, &[Point::ORIGIN], AxisChoice::Primary, 3.0));
        });
        let mut s = surface();
        f.draw(&mut s, None).unwrap();
        assert_eq!(s.filled_rects().count(), 0);
        f.draw(&mut s, None).unwrap();
        assert_eq!(s.filled_rects().count(), 1);
    }

    #[test]
    fn test_elements_notified_and_legend_drawn() {
        let mut f = figure();
        f.add_element(PieFragment::new(Point::new(150.0, 150.0), 50.0, 0.0, 180.0, "a", 2.0, Rgba::RED));
        f.add_element(PieFragment::new(Point::new(150.0, 150.0), 50.0, 180.0, 360.0, "b", 3.0, Rgba::BLUE));
        f.set_legend(&LegendPatch::visible(true));
        let mut s = surface();
        f.draw(&mut s, Some(Point::new(150.0, 170.0))).unwrap();
        assert_eq!(f.elements()[0].display_text(), "a: 2");
        assert_eq!(f.elements()[1].display_text(), "b");
        let texts: Vec<_> = s.texts().collect();
        assert_eq!(texts, vec!["a: 2", "b"]);
        let swatches: Vec<_> = s.filled_rects().map(|(_, c)| c).collect();
        assert_eq!(swatches, vec![Rgba::RED, Rgba::BLUE]);
    }

    #[test]
    fn test_legend_explicit_origin() {
        let mut f = figure();
        f.add_element(PieFragment::new(Point::ORIGIN, 1.0, 0.0, 360.0, "x", 1.0, Rgba::GREEN));
        f.set_legend(&LegendPatch::visible(true).origin(Point::new(5.0, 6.0)));
        let mut s = surface();
        f.draw(&mut s, None).unwrap();
        let (rect, _) = s.filled_rects().next().unwrap();
        assert_eq!(rect, Rect::new(5.0, 6.0, 10.0, 10.0));
    }

    #[test]
    fn test_stale_degenerate_axis_fails_draw() {
        let mut f = figure();
        assert!(f.set_axis(0, &AxisPatch::range(5.0, 1.0)));
        let mut s = surface();
        assert!(f.draw(&mut s, None).is_err());
        assert!(s.commands().is_empty());
    }

    #[test]
    fn test_unknown_axis_index_ignored() {
        let mut f = figure();
        assert!(!f.set_axis(7, &AxisPatch::range(0.0, 1.0)));
        assert!(!f.mapper().is_stale());
    }

    #[test]
    fn test_resize_applies_on_draw() {
        let mut f = figure();
        f.resize(540.0, 300.0).unwrap();
        let mut s = surface();
        f.draw(&mut s, None).unwrap();
        let p = f.mapper().data_to_pixel(100.0, 0.0, AxisChoice::Primary);
        assert!((p.x - 510.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_config() {
        let config = FigureConfig {
            width: 300.0,
            height: 300.0,
            axes: vec![AxisPatch::range(0.0, 100.0)],
            spine: SpinePatch::edges(EdgeSet::ALL),
            ticks: vec![TickPatch { marks: Some(true), ..TickPatch::default() }],
            ..FigureConfig::default()
        };
        let f = Figure::from_config("cfg", Dataset::new(), &config).unwrap();
        assert_eq!(f.spine().edges, EdgeSet::ALL);
        assert!(f.ticks(AxisIndex::X).marks);
        assert!(!f.ticks(AxisIndex::Y).marks);
        assert_eq!(f.mapper().axis(AxisIndex::X).max(), 100.0);
    }
}
