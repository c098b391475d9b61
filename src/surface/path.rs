//! Retained path geometry for surfaces without a native path API.

use std::f64::consts::{PI, TAU};
use std::fmt::Write as _;

use crate::geometry::{Point, Rect};

/// Curve samples used when measuring a path's extent.
const BOUNDS_STEPS: usize = 16;

/// One path-building operation, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Start a new subpath.
    MoveTo(Point),
    /// Straight segment.
    LineTo(Point),
    /// Quadratic Bezier.
    QuadTo {
        /// Control point.
        control: Point,
        /// End point.
        to: Point,
    },
    /// Cubic Bezier.
    CubicTo {
        /// First control point.
        c1: Point,
        /// Second control point.
        c2: Point,
        /// End point.
        to: Point,
    },
    /// Clockwise circular arc, angles in radians from the +x axis.
    Arc {
        /// Circle center.
        center: Point,
        /// Circle radius.
        radius: f64,
        /// Start angle.
        start: f64,
        /// End angle.
        end: f64,
    },
    /// Close the current subpath.
    Close,
}

/// A sequence of [`PathSegment`]s.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// Empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment.
    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// Drop all segments.
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Segments in order.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Whether the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Flatten into polylines, one per subpath. Curves are sampled with
    /// `steps` points each; closed subpaths repeat their first point.
    #[must_use]
    pub fn flatten(&self, steps: usize) -> Vec<Vec<Point>> {
        let steps = steps.max(1);
        let mut polylines: Vec<Vec<Point>> = Vec::new();
        let mut current: Vec<Point> = Vec::new();

        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(p) => {
                    if current.len() > 1 {
                        polylines.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(p);
                }
                PathSegment::LineTo(p) => current.push(p),
                PathSegment::QuadTo { control, to } => {
                    let from = current.last().copied().unwrap_or(control);
                    current.extend((1..=steps).map(|i| {
                        let t = i as f64 / steps as f64;
                        let a = from.lerp(control, t);
                        let b = control.lerp(to, t);
                        a.lerp(b, t)
                    }));
                }
                PathSegment::CubicTo { c1, c2, to } => {
                    let from = current.last().copied().unwrap_or(c1);
                    current.extend((1..=steps).map(|i| {
                        let t = i as f64 / steps as f64;
                        let u = 1.0 - t;
                        Point::new(
                            u * u * u * from.x
                                + 3.0 * u * u * t * c1.x
                                + 3.0 * u * t * t * c2.x
                                + t * t * t * to.x,
                            u * u * u * from.y
                                + 3.0 * u * u * t * c1.y
                                + 3.0 * u * t * t * c2.y
                                + t * t * t * to.y,
                        )
                    }));
                }
                PathSegment::Arc { center, radius, start, end } => {
                    let sweep = arc_sweep(start, end);
                    current.extend((0..=steps).map(|i| {
                        let angle = start + sweep * i as f64 / steps as f64;
                        Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
                    }));
                }
                PathSegment::Close => {
                    if let Some(&first) = current.first() {
                        current.push(first);
                        polylines.push(std::mem::take(&mut current));
                        current.push(first);
                    }
                }
            }
        }
        if current.len() > 1 {
            polylines.push(current);
        }
        polylines
    }

    /// Extent of the path, curves included, or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        let starts = self.segments.iter().filter_map(|segment| match *segment {
            PathSegment::MoveTo(p) => Some(p),
            _ => None,
        });
        Rect::bounding(self.flatten(BOUNDS_STEPS).into_iter().flatten().chain(starts))
    }

    /// SVG path data (`d` attribute).
    #[must_use]
    pub fn to_svg_data(&self) -> String {
        let mut d = String::new();
        let mut has_point = false;
        for segment in &self.segments {
            // Writing to a String cannot fail.
            let _ = match *segment {
                PathSegment::MoveTo(p) => {
                    has_point = true;
                    write!(d, "M{} {} ", p.x, p.y)
                }
                PathSegment::LineTo(p) => write!(d, "L{} {} ", p.x, p.y),
                PathSegment::QuadTo { control, to } => {
                    write!(d, "Q{} {} {} {} ", control.x, control.y, to.x, to.y)
                }
                PathSegment::CubicTo { c1, c2, to } => write!(
                    d,
                    "C{} {} {} {} {} {} ",
                    c1.x, c1.y, c2.x, c2.y, to.x, to.y
                ),
                PathSegment::Arc { center, radius, start, end } => {
                    let at = |a: f64| {
                        Point::new(center.x + radius * a.cos(), center.y + radius * a.sin())
                    };
                    let from = at(start);
                    let joiner = if has_point { 'L' } else { 'M' };
                    has_point = true;
                    let _ = write!(d, "{joiner}{} {} ", from.x, from.y);
                    let sweep = arc_sweep(start, end);
                    if sweep >= TAU - 1e-9 {
                        // SVG cannot express a full circle as one arc.
                        let half = at(start + PI);
                        let _ = write!(d, "A{radius} {radius} 0 0 1 {} {} ", half.x, half.y);
                        write!(d, "A{radius} {radius} 0 0 1 {} {} ", from.x, from.y)
                    } else {
                        let to = at(start + sweep);
                        let large = u8::from(sweep > PI);
                        write!(d, "A{radius} {radius} 0 {large} 1 {} {} ", to.x, to.y)
                    }
                }
                PathSegment::Close => write!(d, "Z "),
            };
        }
        d.trim_end().to_string()
    }
}

/// Clockwise sweep from `start` to `end`, in `0..=TAU`.
fn arc_sweep(start: f64, end: f64) -> f64 {
    let raw = end - start;
    if raw >= TAU {
        TAU
    } else {
        raw.rem_euclid(TAU)
    }
}
