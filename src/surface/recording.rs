//! A surface that records calls instead of drawing.

use crate::color::Rgba;
use crate::geometry::{Point, Rect};

use super::{DrawingSurface, FontStyle, Path, PathSegment, StrokeStyle};

/// Average glyph advance as a fraction of the font size.
const GLYPH_ADVANCE: f64 = 0.6;

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// `draw_line`.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke used.
        stroke: StrokeStyle,
    },
    /// `fill_text`, with the resolved baseline origin.
    Text {
        /// Text content.
        text: String,
        /// Baseline origin.
        origin: Point,
        /// Font used.
        font: FontStyle,
    },
    /// `fill_rect`.
    FillRect {
        /// Filled rectangle.
        rect: Rect,
        /// Fill color.
        color: Rgba,
    },
    /// `clear_region`.
    Clear {
        /// Cleared rectangle.
        bound: Rect,
    },
    /// `stroke` of the current path.
    StrokePath {
        /// Path at the time of the call.
        path: Path,
        /// Stroke used.
        stroke: StrokeStyle,
    },
    /// `fill` of the current path.
    FillPath {
        /// Path at the time of the call.
        path: Path,
        /// Fill color.
        color: Rgba,
    },
}

/// In-memory surface that logs every call.
///
/// Text is measured as `chars * 0.6 * font size`, which keeps layout
/// deterministic without a font rasterizer.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    pixel_ratio: f64,
    commands: Vec<DrawCommand>,
    path: Path,
}

impl RecordingSurface {
    /// Create a surface of the given CSS size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, pixel_ratio: 1.0, commands: Vec::new(), path: Path::new() }
    }

    /// Builder-style device pixel ratio.
    #[must_use]
    pub fn with_pixel_ratio(mut self, ratio: f64) -> Self {
        self.pixel_ratio = ratio;
        self
    }

    /// Surface width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Surface height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// All commands recorded so far.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Remove and return the recorded commands.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Recorded straight lines as `(from, to)`.
    pub fn lines(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Line { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
    }

    /// Recorded text strings in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Recorded clear rectangles.
    pub fn clears(&self) -> impl Iterator<Item = Rect> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Clear { bound } => Some(*bound),
            _ => None,
        })
    }

    /// Recorded filled rectangles.
    pub fn filled_rects(&self) -> impl Iterator<Item = (Rect, Rgba)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::FillRect { rect, color } => Some((*rect, *color)),
            _ => None,
        })
    }

    /// Paths passed to `stroke`.
    pub fn stroked_paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::StrokePath { path, .. } => Some(path),
            _ => None,
        })
    }

    /// Paths passed to `fill`.
    pub fn filled_paths(&self) -> impl Iterator<Item = (&Path, Rgba)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::FillPath { path, color } => Some((path, *color)),
            _ => None,
        })
    }
}

impl DrawingSurface for RecordingSurface {
    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &StrokeStyle) {
        self.commands.push(DrawCommand::Line { from, to, stroke: *stroke });
    }

    fn fill_text(&mut self, text: &str, origin: Point, font: &FontStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            font: font.clone(),
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn measure_text_width(&self, text: &str, font: &FontStyle) -> f64 {
        text.chars().count() as f64 * font.size * GLYPH_ADVANCE
    }

    fn clear_region(&mut self, bound: Rect) {
        self.commands.push(DrawCommand::Clear { bound });
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, to: Point) {
        self.path.push(PathSegment::MoveTo(to));
    }

    fn line_to(&mut self, to: Point) {
        self.path.push(PathSegment::LineTo(to));
    }

    fn quadratic_curve_to(&mut self, control: Point, to: Point) {
        self.path.push(PathSegment::QuadTo { control, to });
    }

    fn bezier_curve_to(&mut self, c1: Point, c2: Point, to: Point) {
        self.path.push(PathSegment::CubicTo { c1, c2, to });
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        self.path.push(PathSegment::Arc { center, radius, start: start_angle, end: end_angle });
    }

    fn close_path(&mut self) {
        self.path.push(PathSegment::Close);
    }

    fn stroke(&mut self, stroke: &StrokeStyle) {
        self.commands.push(DrawCommand::StrokePath { path: self.path.clone(), stroke: *stroke });
    }

    fn fill(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::FillPath { path: self.path.clone(), color });
    }
}
