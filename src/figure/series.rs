//! Series renderers: polyline, square markers, quadratic and cubic curves.
//!
//! Points arrive in data space and are mapped through a
//! [`CoordinateMapper`] before any geometry is built. Path construction is
//! split from drawing so the control-point math can be checked without a
//! surface.

use crate::axis::AxisChoice;
use crate::geometry::{Point, Rect};
use crate::mapper::CoordinateMapper;
use crate::surface::{DrawingSurface, Path, PathSegment, StrokeStyle};

/// Shape parameters of [`bezier_path`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BezierParams {
    /// Fraction of the distance to the neighbour used for control offsets.
    pub smoothing: f64,
    /// Scale applied to the vertical component of the offset.
    pub tension: f64,
}

impl Default for BezierParams {
    fn default() -> Self {
        Self { smoothing: 0.3, tension: 0.6 }
    }
}

fn map_all(mapper: &CoordinateMapper, points: &[Point], choice: AxisChoice) -> Vec<Point> {
    points.iter().map(|p| mapper.map(*p, choice)).collect()
}

/// Straight segments through `pixels`. Empty for fewer than two points.
#[must_use]
pub fn line_path(pixels: &[Point]) -> Path {
    let mut path = Path::new();
    if let [first, rest @ ..] = pixels {
        if rest.is_empty() {
            return path;
        }
        path.push(PathSegment::MoveTo(*first));
        for p in rest {
            path.push(PathSegment::LineTo(*p));
        }
    }
    path
}

/// Quadratic smoothing through `pixels`.
///
/// Each interior point is a control point whose segment ends halfway to the
/// next point; the final segment ends on the last point. Two points give a
/// straight line, fewer give an empty path.
#[must_use]
pub fn quadratic_path(pixels: &[Point]) -> Path {
    let n = pixels.len();
    if n < 3 {
        return line_path(pixels);
    }
    let mut path = Path::new();
    path.push(PathSegment::MoveTo(pixels[0]));
    for i in 1..n - 2 {
        path.push(PathSegment::QuadTo {
            control: pixels[i],
            to: pixels[i].midpoint(pixels[i + 1]),
        });
    }
    path.push(PathSegment::QuadTo { control: pixels[n - 2], to: pixels[n - 1] });
    path
}

/// Outgoing control offset at `cur`, derived from the slope between its
/// neighbours.
fn control_offset(pre: Point, cur: Point, next: Point, params: BezierParams) -> (f64, f64) {
    let run = next.x - pre.x;
    if run == 0.0 {
        // Vertical neighbours: no finite slope, offset along y only.
        return (0.0, (next.y - cur.y) * -params.smoothing);
    }
    let gradient = (next.y - pre.y) / run;
    let dx = (next.x - cur.x) * -params.smoothing;
    (dx, dx * gradient * params.tension)
}

/// Cubic Bezier through `pixels`.
///
/// The first point has no incoming offset and the last no outgoing one, so
/// two points yield a straight cubic with controls on the endpoints. Fewer
/// than two points give an empty path.
#[must_use]
pub fn bezier_path(pixels: &[Point], params: BezierParams) -> Path {
    let mut path = Path::new();
    if pixels.len() < 2 {
        return path;
    }
    path.push(PathSegment::MoveTo(pixels[0]));
    let (mut dx1, mut dy1) = (0.0, 0.0);
    for i in 1..pixels.len() {
        let pre = pixels[i - 1];
        let cur = pixels[i];
        let (dx2, dy2) = match pixels.get(i + 1) {
            Some(next) => control_offset(pre, cur, *next, params),
            None => (0.0, 0.0),
        };
        path.push(PathSegment::CubicTo {
            c1: pre.offset(-dx1, -dy1),
            c2: cur.offset(dx2, dy2),
            to: cur,
        });
        dx1 = dx2;
        dy1 = dy2;
    }
    path
}

/// Replay a path onto a surface as its current path.
pub fn trace(surface: &mut dyn DrawingSurface, path: &Path) {
    surface.begin_path();
    for segment in path.segments() {
        match *segment {
            PathSegment::MoveTo(p) => surface.move_to(p),
            PathSegment::LineTo(p) => surface.line_to(p),
            PathSegment::QuadTo { control, to } => surface.quadratic_curve_to(control, to),
            PathSegment::CubicTo { c1, c2, to } => surface.bezier_curve_to(c1, c2, to),
            PathSegment::Arc { center, radius, start, end } => surface.arc(center, radius, start, end),
            PathSegment::Close => surface.close_path(),
        }
    }
}

fn stroke_path(surface: &mut dyn DrawingSurface, path: &Path, stroke: &StrokeStyle) {
    if path.is_empty() {
        return;
    }
    trace(surface, path);
    surface.stroke(stroke);
}

/// Straight segments through data points.
pub fn line(
    surface: &mut dyn DrawingSurface,
    mapper: &CoordinateMapper,
    points: &[Point],
    choice: AxisChoice,
    stroke: &StrokeStyle,
) {
    stroke_path(surface, &line_path(&map_all(mapper, points, choice)), stroke);
}

/// A filled square marker per data point, top-left corner on the point.
pub fn plot(
    surface: &mut dyn DrawingSurface,
    mapper: &CoordinateMapper,
    points: &[Point],
    choice: AxisChoice,
    marker_size: f64,
    stroke: &StrokeStyle,
) {
    for p in points {
        let at = mapper.map(*p, choice);
        surface.fill_rect(Rect::new(at.x, at.y, marker_size, marker_size), stroke.color);
    }
}

/// Quadratic-smoothed curve through data points.
pub fn curve(
    surface: &mut dyn DrawingSurface,
    mapper: &CoordinateMapper,
    points: &[Point],
    choice: AxisChoice,
    stroke: &StrokeStyle,
) {
    stroke_path(surface, &quadratic_path(&map_all(mapper, points, choice)), stroke);
}

/// Cubic Bezier curve through data points.
pub fn bezier_curve(
    surface: &mut dyn DrawingSurface,
    mapper: &CoordinateMapper,
    points: &[Point],
    choice: AxisChoice,
    params: BezierParams,
    stroke: &StrokeStyle,
) {
    stroke_path(surface, &bezier_path(&map_all(mapper, points, choice), params), stroke);
}
