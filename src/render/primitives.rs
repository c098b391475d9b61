//! Line and polygon rasterization.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::Point;

/// Strokes at or below this width use the anti-aliased hairline.
const HAIRLINE_WIDTH: f64 = 1.5;

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw an anti-aliased line using Wu's algorithm.
///
/// Wu's algorithm plots two pixels at each step along the major axis,
/// weighting each by its distance from the ideal line.
pub fn draw_line_aa(fb: &mut Framebuffer, from: Point, to: Point, color: Rgba) {
    let (mut x0, mut y0, mut x1, mut y1) = (from.x, from.y, to.x, to.y);
    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let gradient = if dx.abs() < f64::EPSILON { 1.0 } else { (y1 - y0) / dx };
    let mut put = |major: i64, minor: i64, intensity: f64| {
        if steep {
            plot(fb, minor, major, color, intensity);
        } else {
            plot(fb, major, minor, color, intensity);
        }
    };

    // First endpoint
    let xend = x0.round();
    let yend = y0 + gradient * (xend - x0);
    let xgap = rfpart(x0 + 0.5);
    let xpxl1 = xend as i64;
    put(xpxl1, yend.floor() as i64, rfpart(yend) * xgap);
    put(xpxl1, yend.floor() as i64 + 1, fpart(yend) * xgap);
    let mut intery = yend + gradient;

    // Second endpoint
    let xend = x1.round();
    let yend = y1 + gradient * (xend - x1);
    let xgap = fpart(x1 + 0.5);
    let xpxl2 = xend as i64;
    put(xpxl2, yend.floor() as i64, rfpart(yend) * xgap);
    put(xpxl2, yend.floor() as i64 + 1, fpart(yend) * xgap);

    for x in (xpxl1 + 1)..xpxl2 {
        let ipart = intery.floor() as i64;
        put(x, ipart, rfpart(intery));
        put(x, ipart + 1, fpart(intery));
        intery += gradient;
    }
}

#[inline]
fn plot(fb: &mut Framebuffer, x: i64, y: i64, color: Rgba, intensity: f64) {
    if x < 0 || y < 0 || x >= i64::from(fb.width()) || y >= i64::from(fb.height()) {
        return;
    }
    let alpha = (f64::from(color.a) * intensity.clamp(0.0, 1.0)).round() as u8;
    fb.blend_pixel(x as u32, y as u32, color.with_alpha(alpha));
}

#[inline]
fn fpart(x: f64) -> f64 {
    x - x.floor()
}

#[inline]
fn rfpart(x: f64) -> f64 {
    1.0 - fpart(x)
}

/// Stroke a polyline. Hairlines are anti-aliased; wider strokes are
/// rasterized as one quad per segment.
pub fn stroke_polyline(fb: &mut Framebuffer, points: &[Point], width: f64, color: Rgba) {
    if width <= HAIRLINE_WIDTH {
        for pair in points.windows(2) {
            draw_line_aa(fb, pair[0], pair[1], color);
        }
        return;
    }

    let half = width / 2.0;
    let quads: Vec<Vec<Point>> = points
        .windows(2)
        .filter_map(|pair| {
            let (a, b) = (pair[0], pair[1]);
            let length = a.distance(b);
            if length < f64::EPSILON {
                return None;
            }
            let nx = -(b.y - a.y) / length * half;
            let ny = (b.x - a.x) / length * half;
            Some(vec![a.offset(nx, ny), b.offset(nx, ny), b.offset(-nx, -ny), a.offset(-nx, -ny)])
        })
        .collect();
    for quad in &quads {
        fill_polygons(fb, std::slice::from_ref(quad), color);
    }
}

// ============================================================================
// Polygon Fill
// ============================================================================

/// Fill polygons with the even-odd rule, sampling pixel centers.
///
/// All rings are filled together, so a ring inside another cuts a hole.
pub fn fill_polygons(fb: &mut Framebuffer, rings: &[Vec<Point>], color: Rgba) {
    let edges: Vec<(Point, Point)> = rings
        .iter()
        .flat_map(|ring| {
            ring.iter()
                .zip(ring.iter().cycle().skip(1))
                .take(ring.len())
                .map(|(a, b)| (*a, *b))
        })
        .filter(|(a, b)| (a.y - b.y).abs() > f64::EPSILON)
        .collect();
    if edges.is_empty() {
        return;
    }

    let (min_y, max_y) = edges.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |acc, (a, b)| {
        (acc.0.min(a.y).min(b.y), acc.1.max(a.y).max(b.y))
    });
    let first_row = min_y.floor().max(0.0) as i64;
    let last_row = max_y.ceil().min(f64::from(fb.height())) as i64;

    let mut crossings: Vec<f64> = Vec::new();
    for row in first_row..last_row {
        let sample_y = row as f64 + 0.5;
        crossings.clear();
        for (a, b) in &edges {
            let (top, bottom) = if a.y < b.y { (a, b) } else { (b, a) };
            if sample_y >= top.y && sample_y < bottom.y {
                let t = (sample_y - top.y) / (bottom.y - top.y);
                crossings.push(top.x + t * (bottom.x - top.x));
            }
        }
        crossings.sort_by(f64::total_cmp);
        for span in crossings.chunks_exact(2) {
            let start = (span[0] - 0.5).ceil() as i64;
            let end = (span[1] - 0.5).ceil() as i64;
            fb.blend_span(start, end, row, color);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn white(width: u32, height: u32) -> Framebuffer {
        let mut fb = Framebuffer::new(width, height).expect("framebuffer creation should succeed");
        fb.clear(Rgba::WHITE);
        fb
    }

    #[test]
    fn test_aa_horizontal_line_hits_row() {
        let mut fb = white(100, 100);
        draw_line_aa(&mut fb, Point::new(10.0, 50.0), Point::new(90.0, 50.0), Rgba::BLACK);
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(50, 20), Some(Rgba::WHITE));
    }

    #[test]
    fn test_aa_line_out_of_bounds_is_clipped() {
        let mut fb = white(50, 50);
        draw_line_aa(&mut fb, Point::new(-20.0, -20.0), Point::new(80.0, 80.0), Rgba::BLACK);
        assert_ne!(fb.get_pixel(25, 25), Some(Rgba::WHITE));
    }

    #[test]
    fn test_fill_square() {
        let mut fb = white(40, 40);
        let square = vec![
            Point::new(10.0, 10.0),
            Point::new(30.0, 10.0),
            Point::new(30.0, 30.0),
            Point::new(10.0, 30.0),
        ];
        fill_polygons(&mut fb, &[square], Rgba::RED);
        assert_eq!(fb.get_pixel(10, 10), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(29, 29), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(30, 30), Some(Rgba::WHITE));
        assert_eq!(fb.get_pixel(5, 20), Some(Rgba::WHITE));
    }

    #[test]
    fn test_fill_even_odd_hole() {
        let mut fb = white(40, 40);
        let outer = vec![
            Point::new(0.0, 0.0),
            Point::new(40.0, 0.0),
            Point::new(40.0, 40.0),
            Point::new(0.0, 40.0),
        ];
        let inner = vec![
            Point::new(10.0, 10.0),
            Point::new(30.0, 10.0),
            Point::new(30.0, 30.0),
            Point::new(10.0, 30.0),
        ];
        fill_polygons(&mut fb, &[outer, inner], Rgba::BLUE);
        assert_eq!(fb.get_pixel(2, 2), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(20, 20), Some(Rgba::WHITE));
    }

    #[test]
    fn test_wide_stroke_covers_width() {
        let mut fb = white(40, 40);
        stroke_polyline(
            &mut fb,
            &[Point::new(5.0, 20.0), Point::new(35.0, 20.0)],
            6.0,
            Rgba::GREEN,
        );
        assert_eq!(fb.get_pixel(20, 18), Some(Rgba::GREEN));
        assert_eq!(fb.get_pixel(20, 21), Some(Rgba::GREEN));
        assert_eq!(fb.get_pixel(20, 25), Some(Rgba::WHITE));
    }

    #[test]
    fn test_degenerate_polygon_is_ignored() {
        let mut fb = white(10, 10);
        fill_polygons(&mut fb, &[vec![Point::new(1.0, 1.0), Point::new(8.0, 1.0)]], Rgba::RED);
        assert_eq!(fb.get_pixel(4, 1), Some(Rgba::WHITE));
    }
}
