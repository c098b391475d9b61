//! Drawing surfaces: the primitive 2D operations figures render through.
//!
//! A [`DrawingSurface`] is modelled on the browser's 2D canvas context:
//! immediate-mode lines, text and rectangles, plus a current path that is
//! built with `move_to`/`line_to`/curves/arcs and then stroked or filled.
//! Coordinates are CSS pixels; [`DrawingSurface::pixel_ratio`] reports how
//! many device pixels back each one.
//!
//! Implementations:
//!
//! - [`RecordingSurface`]: keeps a log of every call, for headless use and
//!   tests.
//! - [`SvgSurface`]: builds an SVG document.
//! - [`RasterSurface`]: rasterizes into a [`crate::framebuffer::Framebuffer`]
//!   and encodes PNG.
//! - `WebCanvas` (feature `wasm`): forwards to `CanvasRenderingContext2d`.

mod path;
mod raster;
mod recording;
mod svg;
#[cfg(feature = "wasm")]
mod web;

pub use path::{Path, PathSegment};
pub use raster::RasterSurface;
pub use recording::{DrawCommand, RecordingSurface};
pub use svg::{SvgElement, SvgSurface};
#[cfg(feature = "wasm")]
pub use web::{install_pointer_listener, PointerListener, WebCanvas};

use crate::color::Rgba;
use crate::geometry::{Point, Rect};

/// Space kept between a text anchor and the glyphs, in pixels.
pub const TEXT_GAP: f64 = 2.0;

/// Line color and width.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrokeStyle {
    /// Line color.
    pub color: Rgba,
    /// Line width in pixels.
    pub width: f64,
}

impl StrokeStyle {
    /// Create a stroke style.
    #[must_use]
    pub const fn new(color: Rgba, width: f64) -> Self {
        Self { color, width }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(Rgba::BLACK, 1.0)
    }
}

/// Font used for text primitives.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontStyle {
    /// Font size in pixels.
    pub size: f64,
    /// Font family name.
    pub family: String,
    /// Text color.
    pub color: Rgba,
}

impl FontStyle {
    /// Default font at a given size.
    #[must_use]
    pub fn sized(size: f64) -> Self {
        Self { size, ..Self::default() }
    }

    /// Builder-style color.
    #[must_use]
    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// CSS shorthand, e.g. `10px Arial`.
    #[must_use]
    pub fn css(&self) -> String {
        format!("{}px {}", self.size, self.family)
    }
}

impl Default for FontStyle {
    fn default() -> Self {
        Self { size: 10.0, family: "Arial".to_string(), color: Rgba::BLACK }
    }
}

/// Where text sits relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextPlacement {
    /// Left-aligned, hanging below the anchor.
    #[default]
    Below,
    /// Centered on the anchor horizontally, hanging below it.
    BelowCentered,
    /// Right-aligned so the text ends at the anchor, baseline just above it.
    LeftOf,
    /// Left-aligned starting at the anchor, baseline just above it.
    RightOf,
}

/// Primitive 2D drawing operations.
///
/// Surfaces are shared by every figure on a canvas; each figure only clears
/// and draws inside its own bound.
pub trait DrawingSurface {
    /// Device pixels per CSS pixel.
    fn pixel_ratio(&self) -> f64 {
        1.0
    }

    /// Stroke a single straight line.
    fn draw_line(&mut self, from: Point, to: Point, stroke: &StrokeStyle);

    /// Draw text with its baseline starting at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, font: &FontStyle);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Width `text` would occupy in `font`, in pixels.
    fn measure_text_width(&self, text: &str, font: &FontStyle) -> f64;

    /// Erase a rectangle.
    fn clear_region(&mut self, bound: Rect);

    /// Discard the current path and start a new one.
    fn begin_path(&mut self);

    /// Start a subpath.
    fn move_to(&mut self, to: Point);

    /// Straight segment to `to`.
    fn line_to(&mut self, to: Point);

    /// Quadratic Bezier to `to`.
    fn quadratic_curve_to(&mut self, control: Point, to: Point);

    /// Cubic Bezier to `to`.
    fn bezier_curve_to(&mut self, c1: Point, c2: Point, to: Point);

    /// Clockwise arc; angles in radians from the +x axis (y down).
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64);

    /// Close the current subpath.
    fn close_path(&mut self);

    /// Stroke the current path.
    fn stroke(&mut self, stroke: &StrokeStyle);

    /// Fill the current path.
    fn fill(&mut self, color: Rgba);

    /// Baseline origin for `text` placed at `at`.
    fn text_origin(
        &self,
        text: &str,
        at: Point,
        placement: TextPlacement,
        font: &FontStyle,
    ) -> Point {
        match placement {
            TextPlacement::Below => Point::new(at.x + TEXT_GAP, at.y + font.size),
            TextPlacement::BelowCentered => {
                let width = self.measure_text_width(text, font);
                Point::new(at.x - width / 2.0, at.y + font.size)
            }
            TextPlacement::LeftOf => {
                let width = self.measure_text_width(text, font);
                Point::new(at.x - width, at.y - TEXT_GAP)
            }
            TextPlacement::RightOf => Point::new(at.x, at.y - TEXT_GAP),
        }
    }

    /// Draw text positioned relative to an anchor.
    fn draw_text(&mut self, text: &str, at: Point, placement: TextPlacement, font: &FontStyle) {
        let origin = self.text_origin(text, at, placement, font);
        self.fill_text(text, origin, font);
    }
}
