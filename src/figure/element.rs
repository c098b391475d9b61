//! Pointer-aware elements registered on a figure.

use std::f64::consts::PI;

use crate::color::Rgba;
use crate::geometry::Point;
use crate::surface::DrawingSurface;

/// Opacity applied to a wedge while the pointer is outside it.
pub const IDLE_OPACITY: f64 = 0.8;

/// Something a figure notifies after every redraw.
///
/// Elements are notified in registration order and also feed the legend.
pub trait InteractiveElement {
    /// Pointer position in surface pixels, or `None` when the pointer is
    /// outside the figure.
    fn on_pointer(&mut self, pointer: Option<Point>);

    /// Text shown in the legend.
    fn display_text(&self) -> &str;

    /// Legend swatch color.
    fn color(&self) -> Rgba;

    /// Hit test in surface pixels.
    fn contains(&self, point: Point) -> bool;

    /// Draw the element, highlighted when `hovered`.
    fn draw(&self, surface: &mut dyn DrawingSurface, hovered: bool);
}

/// Angle of `point` around `center`, in degrees within `[0, 360)`.
///
/// Pixel y grows downward, so angles increase clockwise on screen, the same
/// direction canvas arcs sweep.
#[must_use]
pub fn pixel_angle(center: Point, point: Point) -> f64 {
    let degrees = (point.y - center.y).atan2(point.x - center.x).to_degrees();
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// One wedge of a pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PieFragment {
    center: Point,
    radius: f64,
    start_deg: f64,
    end_deg: f64,
    label: String,
    value: f64,
    color: Rgba,
    display_text: String,
}

impl PieFragment {
    /// Wedge sweeping clockwise from `start_deg` to `end_deg`.
    #[must_use]
    pub fn new(
        center: Point,
        radius: f64,
        start_deg: f64,
        end_deg: f64,
        label: impl Into<String>,
        value: f64,
        color: Rgba,
    ) -> Self {
        let label = label.into();
        Self {
            center,
            radius,
            start_deg,
            end_deg,
            display_text: label.clone(),
            label,
            value,
            color,
        }
    }

    /// Centre in surface pixels.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Radius in pixels.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// `(start, end)` in degrees.
    #[must_use]
    pub fn angles(&self) -> (f64, f64) {
        (self.start_deg, self.end_deg)
    }

    /// Category label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Data value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Whether `(px, py)` lies inside the wedge: within the radius and at an
    /// angle in `[start, end)`.
    #[must_use]
    pub fn is_inside(&self, px: f64, py: f64) -> bool {
        let point = Point::new(px, py);
        if self.center.distance(point) > self.radius {
            return false;
        }
        let angle = pixel_angle(self.center, point);
        angle >= self.start_deg && angle < self.end_deg
    }
}

impl InteractiveElement for PieFragment {
    fn on_pointer(&mut self, pointer: Option<Point>) {
        self.display_text = match pointer {
            Some(p) if self.is_inside(p.x, p.y) => format!("{}: {}", self.label, self.value),
            _ => self.label.clone(),
        };
    }

    fn display_text(&self) -> &str {
        &self.display_text
    }

    fn color(&self) -> Rgba {
        self.color
    }

    fn contains(&self, point: Point) -> bool {
        self.is_inside(point.x, point.y)
    }

    fn draw(&self, surface: &mut dyn DrawingSurface, hovered: bool) {
        let color = if hovered { self.color } else { self.color.with_opacity(IDLE_OPACITY) };
        surface.begin_path();
        surface.move_to(self.center);
        surface.arc(
            self.center,
            self.radius,
            self.start_deg * PI / 180.0,
            self.end_deg * PI / 180.0,
        );
        surface.close_path();
        surface.fill(color);
    }
}
