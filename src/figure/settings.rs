//! Decoration settings owned by a figure, with partial-update patches.
//!
//! Every `*Patch` carries `Option` fields; `apply` merges the present ones
//! and leaves the rest untouched.

use crate::axis::{AxisIndex, AxisPatch};
use crate::color::Rgba;
use crate::geometry::Point;
use crate::region::DEFAULT_GAP;
use crate::surface::{FontStyle, StrokeStyle};

/// Opacity of grid lines.
pub const GRID_OPACITY: f64 = 0.2;

// ============================================================================
// Spine
// ============================================================================

/// One border of the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Edge {
    /// Bottom border, along the x axis.
    Bottom,
    /// Left border, along the primary y axis.
    Left,
    /// Right border, along the secondary y axis.
    Right,
    /// Top border.
    Top,
}

impl Edge {
    /// All edges in drawing order.
    pub const ALL: [Self; 4] = [Self::Bottom, Self::Left, Self::Right, Self::Top];
}

/// A set of plot-area edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
#[allow(clippy::struct_excessive_bools)]
pub struct EdgeSet {
    /// Bottom edge enabled.
    pub bottom: bool,
    /// Left edge enabled.
    pub left: bool,
    /// Right edge enabled.
    pub right: bool,
    /// Top edge enabled.
    pub top: bool,
}

impl EdgeSet {
    /// No edges.
    pub const NONE: Self = Self { bottom: false, left: false, right: false, top: false };
    /// All four edges.
    pub const ALL: Self = Self { bottom: true, left: true, right: true, top: true };

    /// Copy with `edge` enabled.
    #[must_use]
    pub fn with(mut self, edge: Edge) -> Self {
        match edge {
            Edge::Bottom => self.bottom = true,
            Edge::Left => self.left = true,
            Edge::Right => self.right = true,
            Edge::Top => self.top = true,
        }
        self
    }

    /// Whether `edge` is enabled.
    #[must_use]
    pub const fn contains(self, edge: Edge) -> bool {
        match edge {
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
            Edge::Right => self.right,
            Edge::Top => self.top,
        }
    }

    /// Whether no edge is enabled.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        !(self.bottom || self.left || self.right || self.top)
    }

    /// Enabled edges in drawing order.
    pub fn iter(self) -> impl Iterator<Item = Edge> {
        Edge::ALL.into_iter().filter(move |edge| self.contains(*edge))
    }
}

impl FromIterator<Edge> for EdgeSet {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

/// Border lines around the plot area.
#[derive(Debug, Clone, PartialEq)]
pub struct SpineSettings {
    /// Edges drawn on every redraw.
    pub edges: EdgeSet,
    /// Line style.
    pub stroke: StrokeStyle,
}

impl Default for SpineSettings {
    fn default() -> Self {
        Self { edges: EdgeSet::NONE, stroke: StrokeStyle::new(Rgba::BLACK, 1.0) }
    }
}

/// Partial update for [`SpineSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SpinePatch {
    /// Edges to draw.
    pub edges: Option<EdgeSet>,
    /// Line color.
    pub color: Option<Rgba>,
    /// Line width.
    pub width: Option<f64>,
}

impl SpinePatch {
    /// Patch that only sets the edges.
    #[must_use]
    pub fn edges(edges: EdgeSet) -> Self {
        Self { edges: Some(edges), ..Self::default() }
    }

    /// Set the line color.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the line width.
    #[must_use]
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }
}

impl SpineSettings {
    /// Merge a patch.
    pub fn apply(&mut self, patch: &SpinePatch) {
        if let Some(edges) = patch.edges {
            self.edges = edges;
        }
        if let Some(color) = patch.color {
            self.stroke.color = color;
        }
        if let Some(width) = patch.width {
            self.stroke.width = width;
        }
    }
}

// ============================================================================
// Tick marks
// ============================================================================

/// Tick marks and tick labels of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSettings {
    /// Draw tick marks.
    pub marks: bool,
    /// Marks point away from the plot area.
    pub outward: bool,
    /// Draw numeric labels at major ticks.
    pub labels: bool,
    /// Decimal places of the labels.
    pub decimal_places: usize,
}

impl Default for TickSettings {
    fn default() -> Self {
        Self { marks: false, outward: true, labels: false, decimal_places: 0 }
    }
}

/// Partial update for [`TickSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct TickPatch {
    /// Draw tick marks.
    pub marks: Option<bool>,
    /// Marks point away from the plot area.
    pub outward: Option<bool>,
    /// Draw numeric labels.
    pub labels: Option<bool>,
    /// Decimal places of the labels.
    pub decimal_places: Option<usize>,
}

impl TickSettings {
    /// Merge a patch.
    pub fn apply(&mut self, patch: &TickPatch) {
        if let Some(marks) = patch.marks {
            self.marks = marks;
        }
        if let Some(outward) = patch.outward {
            self.outward = outward;
        }
        if let Some(labels) = patch.labels {
            self.labels = labels;
        }
        if let Some(places) = patch.decimal_places {
            self.decimal_places = places;
        }
    }
}

// ============================================================================
// Cursor
// ============================================================================

/// Crosshair and coordinate readouts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorSettings {
    /// Readout enabled per axis, indexed by [`AxisIndex::index`].
    pub readouts: [bool; 3],
    /// Line and text color.
    pub color: Rgba,
    /// Decimal places of the readouts.
    pub decimal_places: usize,
}

impl Default for CursorSettings {
    fn default() -> Self {
        Self { readouts: [false; 3], color: Rgba::GRAY, decimal_places: 2 }
    }
}

impl CursorSettings {
    /// Whether the readout for `axis` is enabled.
    #[must_use]
    pub fn readout(&self, axis: AxisIndex) -> bool {
        self.readouts[axis.index()]
    }

    /// Merge a patch.
    pub fn apply(&mut self, patch: &CursorPatch) {
        for (slot, value) in self.readouts.iter_mut().zip(patch.readouts) {
            if let Some(enabled) = value {
                *slot = enabled;
            }
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(places) = patch.decimal_places {
            self.decimal_places = places;
        }
    }
}

/// Partial update for [`CursorSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct CursorPatch {
    /// Per-axis readout toggles; `None` keeps the current value.
    pub readouts: [Option<bool>; 3],
    /// Line and text color.
    pub color: Option<Rgba>,
    /// Decimal places of the readouts.
    pub decimal_places: Option<usize>,
}

impl CursorPatch {
    /// Empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the readout of one axis.
    #[must_use]
    pub fn readout(mut self, axis: AxisIndex, enabled: bool) -> Self {
        self.readouts[axis.index()] = Some(enabled);
        self
    }

    /// Set the color.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the decimal places.
    #[must_use]
    pub fn decimal_places(mut self, places: usize) -> Self {
        self.decimal_places = Some(places);
        self
    }
}

// ============================================================================
// Grid
// ============================================================================

/// Background grid at major ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSettings {
    /// Grid enabled per axis, indexed by [`AxisIndex::index`].
    pub show: [bool; 3],
    /// Line style, normally faint.
    pub stroke: StrokeStyle,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            show: [false; 3],
            stroke: StrokeStyle::new(Rgba::BLACK.with_opacity(GRID_OPACITY), 1.0),
        }
    }
}

/// Partial update for [`GridSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct GridPatch {
    /// Per-axis toggles; `None` keeps the current value.
    pub show: [Option<bool>; 3],
    /// Line color.
    pub color: Option<Rgba>,
}

impl GridPatch {
    /// Patch all three toggles.
    #[must_use]
    pub fn show(x: bool, y: bool, y2: bool) -> Self {
        Self { show: [Some(x), Some(y), Some(y2)], color: None }
    }
}

impl GridSettings {
    /// Whether the grid for `axis` is enabled.
    #[must_use]
    pub fn shows(&self, axis: AxisIndex) -> bool {
        self.show[axis.index()]
    }

    /// Merge a patch.
    pub fn apply(&mut self, patch: &GridPatch) {
        for (slot, value) in self.show.iter_mut().zip(patch.show) {
            if let Some(enabled) = value {
                *slot = enabled;
            }
        }
        if let Some(color) = patch.color {
            self.stroke.color = color;
        }
    }
}

// ============================================================================
// Legend
// ============================================================================

/// Legend box listing interactive elements.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendSettings {
    /// Draw the legend.
    pub visible: bool,
    /// Top-left corner in surface pixels; `None` places the box at the
    /// top-right of the plot area.
    pub origin: Option<Point>,
    /// Side of the color swatch.
    pub swatch: f64,
    /// Vertical distance between entries.
    pub line_height: f64,
    /// Entry font.
    pub font: FontStyle,
}

impl Default for LegendSettings {
    fn default() -> Self {
        Self { visible: false, origin: None, swatch: 10.0, line_height: 15.0, font: FontStyle::default() }
    }
}

/// Partial update for [`LegendSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct LegendPatch {
    /// Draw the legend.
    pub visible: Option<bool>,
    /// Top-left corner in surface pixels.
    pub origin: Option<Point>,
    /// Swatch side.
    pub swatch: Option<f64>,
    /// Entry spacing.
    pub line_height: Option<f64>,
    /// Font size.
    pub font_size: Option<f64>,
}

impl LegendPatch {
    /// Patch that only toggles visibility.
    #[must_use]
    pub fn visible(visible: bool) -> Self {
        Self { visible: Some(visible), ..Self::default() }
    }

    /// Set the top-left corner.
    #[must_use]
    pub fn origin(mut self, origin: Point) -> Self {
        self.origin = Some(origin);
        self
    }
}

impl LegendSettings {
    /// Merge a patch.
    pub fn apply(&mut self, patch: &LegendPatch) {
        if let Some(visible) = patch.visible {
            self.visible = visible;
        }
        if let Some(origin) = patch.origin {
            self.origin = Some(origin);
        }
        if let Some(swatch) = patch.swatch {
            self.swatch = swatch;
        }
        if let Some(line_height) = patch.line_height {
            self.line_height = line_height;
        }
        if let Some(size) = patch.font_size {
            self.font.size = size;
        }
    }
}

// ============================================================================
// Whole-figure configuration
// ============================================================================

/// Declarative figure configuration, loadable from JSON with the `serde`
/// feature.
///
/// ```
/// # #[cfg(feature = "serde")] {
/// use canvasplot::figure::FigureConfig;
///
/// let config = FigureConfig::from_json(
///     r#"{ "width": 300, "height": 200, "axes": [{ "min": 0, "max": 10 }] }"#,
/// ).unwrap();
/// assert_eq!(config.width, 300.0);
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct FigureConfig {
    /// Full region width.
    pub width: f64,
    /// Full region height.
    pub height: f64,
    /// Region left edge on the surface.
    pub x0: f64,
    /// Region top edge on the surface.
    pub y0: f64,
    /// Decoration inset.
    pub gap: f64,
    /// Axis patches in index order (x, y, secondary y); missing entries keep
    /// the defaults.
    pub axes: Vec<AxisPatch>,
    /// Spine patch.
    pub spine: SpinePatch,
    /// Tick patches in axis index order.
    pub ticks: Vec<TickPatch>,
    /// Cursor patch.
    pub cursor: CursorPatch,
    /// Grid patch.
    pub grid: GridPatch,
    /// Legend patch.
    pub legend: LegendPatch,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            x0: 0.0,
            y0: 0.0,
            gap: DEFAULT_GAP,
            axes: Vec::new(),
            spine: SpinePatch::default(),
            ticks: Vec::new(),
            cursor: CursorPatch::default(),
            grid: GridPatch::default(),
            legend: LegendPatch::default(),
        }
    }
}

#[cfg(feature = "serde")]
impl FigureConfig {
    /// Parse from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] for malformed JSON or unknown keys.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|err| crate::Error::Config(err.to_string()))
    }
}
