//! Raster drawing surface backed by a [`Framebuffer`].

use std::path::Path as FsPath;

use crate::color::Rgba;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::render::{draw_glyphs, fill_polygons, glyph_advance, stroke_polyline};

use super::{DrawingSurface, FontStyle, Path, PathSegment, StrokeStyle};

/// Samples per curve or arc when flattening paths.
const CURVE_STEPS: usize = 24;

/// Surface that rasterizes into an RGBA framebuffer.
///
/// Drawing coordinates are CSS pixels; the framebuffer holds
/// `css size * pixel_ratio` device pixels.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    framebuffer: Framebuffer,
    pixel_ratio: f64,
    background: Rgba,
    path: Path,
}

impl RasterSurface {
    /// Create a surface with a white background at pixel ratio 1.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_pixel_ratio(width, height, 1.0)
    }

    /// Create a surface whose backing store is scaled by `pixel_ratio`.
    ///
    /// # Errors
    ///
    /// Returns an error if the scaled dimensions are zero.
    pub fn with_pixel_ratio(width: u32, height: u32, pixel_ratio: f64) -> Result<Self> {
        let ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        let device_w = (f64::from(width) * ratio).round() as u32;
        let device_h = (f64::from(height) * ratio).round() as u32;
        let mut framebuffer = Framebuffer::new(device_w, device_h)?;
        framebuffer.clear(Rgba::WHITE);
        Ok(Self { framebuffer, pixel_ratio: ratio, background: Rgba::WHITE, path: Path::new() })
    }

    /// Color used by `clear_region`.
    #[must_use]
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = color;
        self.framebuffer.clear(color);
        self
    }

    /// The backing framebuffer.
    #[must_use]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Color at a CSS pixel, `None` outside the surface.
    #[must_use]
    pub fn pixel_at(&self, x: f64, y: f64) -> Option<Rgba> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let device = self.to_device(Point::new(x, y));
        self.framebuffer.get_pixel(device.x as u32, device.y as u32)
    }

    /// Encode as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        self.framebuffer.to_png_bytes()
    }

    /// Write a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_png<P: AsRef<FsPath>>(&self, path: P) -> Result<()> {
        self.framebuffer.write_png(path)
    }

    fn to_device(&self, p: Point) -> Point {
        Point::new(p.x * self.pixel_ratio, p.y * self.pixel_ratio)
    }

    fn device_polylines(&self) -> Vec<Vec<Point>> {
        self.path
            .flatten(CURVE_STEPS)
            .into_iter()
            .map(|line| line.into_iter().map(|p| self.to_device(p)).collect())
            .collect()
    }

    fn device_rect(&self, rect: Rect) -> Vec<Point> {
        let tl = self.to_device(Point::new(rect.left(), rect.top()));
        let br = self.to_device(Point::new(rect.right(), rect.bottom()));
        vec![tl, Point::new(br.x, tl.y), br, Point::new(tl.x, br.y)]
    }
}

impl DrawingSurface for RasterSurface {
    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &StrokeStyle) {
        let points = [self.to_device(from), self.to_device(to)];
        stroke_polyline(&mut self.framebuffer, &points, stroke.width * self.pixel_ratio, stroke.color);
    }

    fn fill_text(&mut self, text: &str, origin: Point, font: &FontStyle) {
        let origin = self.to_device(origin);
        draw_glyphs(&mut self.framebuffer, text, origin, font.size * self.pixel_ratio, font.color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let corners = self.device_rect(rect);
        fill_polygons(&mut self.framebuffer, &[corners], color);
    }

    fn measure_text_width(&self, text: &str, font: &FontStyle) -> f64 {
        text.chars().count() as f64 * glyph_advance(font.size)
    }

    fn clear_region(&mut self, bound: Rect) {
        let tl = self.to_device(Point::new(bound.left(), bound.top()));
        let br = self.to_device(Point::new(bound.right(), bound.bottom()));
        let x = tl.x.floor().max(0.0) as u32;
        let y = tl.y.floor().max(0.0) as u32;
        let w = (br.x.ceil() - f64::from(x)).max(0.0) as u32;
        let h = (br.y.ceil() - f64::from(y)).max(0.0) as u32;
        self.framebuffer.fill_rect(x, y, w, h, self.background);
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
        let width = stroke.width * self.pixel_ratio;
        for line in self.device_polylines() {
            stroke_polyline(&mut self.framebuffer, &line, width, stroke.color);
        }
    }

    fn fill(&mut self, color: Rgba) {
        let rings = self.device_polylines();
        fill_polygons(&mut self.framebuffer, &rings, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    #[test]
    fn test_pixel_ratio_scales_backing_store() {
        let surface = RasterSurface::with_pixel_ratio(100, 50, 2.0).unwrap();
        assert_eq!(surface.framebuffer().width(), 200);
        assert_eq!(surface.framebuffer().height(), 100);
        assert_eq!(surface.pixel_ratio(), 2.0);
    }

    #[test]
    fn test_invalid_ratio_falls_back_to_one() {
        let surface = RasterSurface::with_pixel_ratio(10, 10, f64::NAN).unwrap();
        assert_eq!(surface.framebuffer().width(), 10);
    }

    #[test]
    fn test_fill_rect_and_clear_region() {
        let mut surface = RasterSurface::new(50, 50).unwrap();
        surface.fill_rect(Rect::new(0.0, 0.0, 50.0, 50.0), Rgba::RED);
        surface.clear_region(Rect::new(10.0, 10.0, 10.0, 10.0));
        assert_eq!(surface.pixel_at(15.0, 15.0), Some(Rgba::WHITE));
        assert_eq!(surface.pixel_at(30.0, 30.0), Some(Rgba::RED));
    }

    #[test]
    fn test_filled_circle_path() {
        let mut surface = RasterSurface::new(60, 60).unwrap();
        surface.begin_path();
        surface.arc(Point::new(30.0, 30.0), 20.0, 0.0, TAU);
        surface.close_path();
        surface.fill(Rgba::BLUE);
        assert_eq!(surface.pixel_at(30.0, 30.0), Some(Rgba::BLUE));
        assert_eq!(surface.pixel_at(2.0, 2.0), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_line_scaled() {
        let mut surface = RasterSurface::with_pixel_ratio(20, 20, 2.0).unwrap();
        surface.draw_line(Point::new(0.0, 10.0), Point::new(20.0, 10.0), &StrokeStyle::new(Rgba::BLACK, 1.0));
        // Two device pixels wide at ratio 2.
        assert_ne!(surface.framebuffer().get_pixel(20, 20), Some(Rgba::WHITE));
    }

    #[test]
    fn test_png_output() {
        let surface = RasterSurface::new(8, 8).unwrap();
        let bytes = surface.to_png_bytes().unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
