//! SVG drawing surface.
//!
//! Every primitive becomes one SVG element. Clearing a region drops every
//! element whose extent overlaps it, the way clearing a canvas rectangle
//! erases whatever was painted there, so a figure can redraw its own area
//! without disturbing its neighbours.

use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::{Point, Rect};

use super::{DrawingSurface, FontStyle, Path, PathSegment, StrokeStyle};

/// Glyph advance used to estimate text width.
const GLYPH_ADVANCE: f64 = 0.6;

/// One element of the document.
///
/// Field names match the SVG attributes they render to.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Filled rectangle.
    Rect { x: f64, y: f64, width: f64, height: f64, fill: Rgba },
    /// Straight line.
    Line { x1: f64, y1: f64, x2: f64, y2: f64, stroke: Rgba, stroke_width: f64 },
    /// Path, either stroked or filled. `bounds` is the extent of the geometry.
    Path { d: String, bounds: Rect, fill: Option<Rgba>, stroke: Option<StrokeStyle> },
    /// Text with its baseline origin.
    Text { x: f64, y: f64, text: String, font_size: f64, font_family: String, fill: Rgba },
}

impl SvgElement {
    /// Area the element covers, used by [`DrawingSurface::clear_region`].
    ///
    /// Text extent is estimated from the glyph advance, above the baseline.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Rect { x, y, width, height, .. } => Rect::new(*x, *y, *width, *height),
            Self::Line { x1, y1, x2, y2, .. } => {
                Rect::from_corners(Point::new(x1.min(*x2), y1.min(*y2)), Point::new(x1.max(*x2), y1.max(*y2)))
            }
            Self::Path { bounds, .. } => *bounds,
            Self::Text { x, y, text, font_size, .. } => Rect::new(
                *x,
                y - font_size,
                text.chars().count() as f64 * font_size * GLYPH_ADVANCE,
                *font_size,
            ),
        }
    }

    fn render(&self) -> String {
        match self {
            Self::Rect { x, y, width, height, fill } => format!(
                r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}"/>"#,
                fill.to_css()
            ),
            Self::Line { x1, y1, x2, y2, stroke, stroke_width } => format!(
                r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{stroke_width}"/>"#,
                stroke.to_css()
            ),
            Self::Path { d, fill, stroke, .. } => {
                let fill_attr = fill.map_or_else(|| "none".to_string(), Rgba::to_css);
                let stroke_attr = stroke
                    .map(|s| {
                        format!(r#" stroke="{}" stroke-width="{}""#, s.color.to_css(), s.width)
                    })
                    .unwrap_or_default();
                format!(r#"<path d="{d}" fill="{fill_attr}"{stroke_attr}/>"#)
            }
            Self::Text { x, y, text, font_size, font_family, fill } => format!(
                r#"<text x="{x}" y="{y}" font-size="{font_size}" font-family="{}" fill="{}">{}</text>"#,
                escape_xml(font_family),
                fill.to_css(),
                escape_xml(text)
            ),
        }
    }
}

/// Surface that accumulates SVG elements.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    background: Option<Rgba>,
    elements: Vec<SvgElement>,
    path: Path,
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl SvgSurface {
    /// Create a surface with a white background.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, background: Some(Rgba::WHITE), elements: Vec::new(), path: Path::new() }
    }

    /// Set background color (`None` for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Elements in paint order.
    #[must_use]
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    /// Render the document.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(256 + self.elements.len() * 96);
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        if let Some(bg) = self.background {
            let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{}"/>"#, bg.to_css());
        }
        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element.render());
        }
        svg.push_str("</svg>\n");
        svg
    }

    /// Write the document to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }

    fn path_bounds(&self) -> Rect {
        self.path.bounds().unwrap_or_default()
    }
}

/// Escape XML special characters.
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl DrawingSurface for SvgSurface {
    fn draw_line(&mut self, from: Point, to: Point, stroke: &StrokeStyle) {
        self.elements.push(SvgElement::Line {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
            stroke: stroke.color,
            stroke_width: stroke.width,
        });
    }

    fn fill_text(&mut self, text: &str, origin: Point, font: &FontStyle) {
        self.elements.push(SvgElement::Text {
            x: origin.x,
            y: origin.y,
            text: text.to_string(),
            font_size: font.size,
            font_family: font.family.clone(),
            fill: font.color,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.elements.push(SvgElement::Rect {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            fill: color,
        });
    }

    fn measure_text_width(&self, text: &str, font: &FontStyle) -> f64 {
        text.chars().count() as f64 * font.size * GLYPH_ADVANCE
    }

    fn clear_region(&mut self, bound: Rect) {
        self.elements.retain(|element| !bound.intersects(&element.bounds()));
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
        if self.path.is_empty() {
            return;
        }
        self.elements.push(SvgElement::Path {
            d: self.path.to_svg_data(),
            bounds: self.path_bounds(),
            fill: None,
            stroke: Some(*stroke),
        });
    }

    fn fill(&mut self, color: Rgba) {
        if self.path.is_empty() {
            return;
        }
        self.elements.push(SvgElement::Path {
            d: self.path.to_svg_data(),
            bounds: self.path_bounds(),
            fill: Some(color),
            stroke: None,
        });
    }
}
