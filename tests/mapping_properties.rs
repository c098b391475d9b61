//! Property tests for the coordinate mapper, tick layout and pie hit testing.
//!
//! Run: cargo test --test mapping_properties

#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use canvasplot::axis::{AxisChoice, AxisIndex, AxisPatch};
use canvasplot::color::Rgba;
use canvasplot::figure::{bezier_path, BezierParams, InteractiveElement, PieFragment};
use canvasplot::geometry::Point;
use canvasplot::mapper::CoordinateMapper;
use canvasplot::region::Region;
use canvasplot::surface::PathSegment;
use proptest::prelude::*;

fn mapper(width: f64, height: f64, x: (f64, f64), y: (f64, f64), y2: (f64, f64)) -> CoordinateMapper {
    let region = Region::new(0.0, 0.0, width, height, 30.0).unwrap();
    let mut mapper = CoordinateMapper::new(region).unwrap();
    mapper.set_axis(AxisIndex::X, &AxisPatch::range(x.0, x.1));
    mapper.set_axis(AxisIndex::Y, &AxisPatch::range(y.0, y.1));
    mapper.set_axis(AxisIndex::Y2, &AxisPatch::range(y2.0, y2.1));
    mapper.reload().unwrap();
    mapper
}

/// `(min, max)` with a span of at least 1.
fn range() -> impl Strategy<Value = (f64, f64)> {
    (-1000.0f64..1000.0, 1.0f64..1000.0).prop_map(|(min, span)| (min, min + span))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_pixel_round_trip(
        width in 100.0f64..1000.0,
        height in 100.0f64..1000.0,
        x in range(),
        y in range(),
        y2 in range(),
        px in 0.0f64..1000.0,
        py in 0.0f64..1000.0,
        secondary in any::<bool>(),
    ) {
        let m = mapper(width, height, x, y, y2);
        let choice = if secondary { AxisChoice::Secondary } else { AxisChoice::Primary };
        let data = m.pixel_to_data(px, py, choice);
        let back = m.data_to_pixel(data.x, data.y, choice);
        prop_assert!((back.x - px).abs() < 1e-6);
        prop_assert!((back.y - py).abs() < 1e-6);
    }

    #[test]
    fn prop_range_corners_hit_plot_corners(
        width in 100.0f64..1000.0,
        height in 100.0f64..1000.0,
        x in range(),
        y in range(),
    ) {
        let m = mapper(width, height, x, y, (0.0, 1.0));
        let plot = m.region().plot_area();
        let bottom_left = m.data_to_pixel(x.0, y.0, AxisChoice::Primary);
        let top_right = m.data_to_pixel(x.1, y.1, AxisChoice::Primary);
        prop_assert!((bottom_left.x - plot.left()).abs() < 1e-6);
        prop_assert!((bottom_left.y - plot.bottom()).abs() < 1e-6);
        prop_assert!((top_right.x - plot.right()).abs() < 1e-6);
        prop_assert!((top_right.y - plot.top()).abs() < 1e-6);
    }

    #[test]
    fn prop_resize_scales_ratio(width in 100.0f64..1000.0, factor in 0.5f64..4.0) {
        let mut m = mapper(width, 300.0, (0.0, 100.0), (0.0, 10.0), (0.0, 1.0));
        let before = m.axis(AxisIndex::X).ratio();
        let old_plot = m.region().plot_width();
        let new_width = 60.0 + old_plot * factor;
        m.resize(new_width, 300.0).unwrap();
        m.reload().unwrap();
        let after = m.axis(AxisIndex::X).ratio();
        prop_assert!((after / before - factor).abs() < 1e-9);
    }

    #[test]
    fn prop_tick_count(span in 1.0f64..1000.0, major in 0.5f64..100.0) {
        let m = {
            let region = Region::new(0.0, 0.0, 300.0, 300.0, 30.0).unwrap();
            let mut m = CoordinateMapper::new(region).unwrap();
            m.set_axis(AxisIndex::X, &AxisPatch::range(0.0, span).ticks(major, major));
            m.reload().unwrap();
            m
        };
        let intervals = span / major;
        // Near exact multiples the float quotient may land on either side.
        prop_assume!((intervals - intervals.round()).abs() > 1e-6);
        let count = m.axis(AxisIndex::X).major_ticks().count();
        prop_assert_eq!(count, intervals.floor() as usize + 1);
        prop_assert!(m.axis(AxisIndex::X).major_ticks().all(|t| t.value <= span + 1e-6));
    }

    #[test]
    fn prop_pie_mid_angle(
        start in 0.0f64..350.0,
        sweep in 1.0f64..10.0,
        radius in 10.0f64..200.0,
    ) {
        let center = Point::new(250.0, 250.0);
        let end = start + sweep;
        let fragment = PieFragment::new(center, radius, start, end, "w", 1.0, Rgba::RED);
        let mid = (start + end) / 2.0;
        let (sin, cos) = mid.to_radians().sin_cos();
        let inside = Point::new(center.x + 0.5 * radius * cos, center.y + 0.5 * radius * sin);
        let outside = Point::new(center.x + 1.1 * radius * cos, center.y + 1.1 * radius * sin);
        prop_assert!(fragment.contains(inside));
        prop_assert!(!fragment.contains(outside));
    }
}

#[test]
fn bottom_centre_of_plot_area() {
    let m = mapper(300.0, 300.0, (0.0, 100.0), (0.0, 240.0), (0.0, 240.0));
    let p = m.data_to_pixel(50.0, 0.0, AxisChoice::Primary);
    assert_relative_eq!(p.x, 150.0);
    assert_relative_eq!(p.y, 270.0);
}

#[test]
fn hundred_unit_axis_tick_counts() {
    let region = Region::new(0.0, 0.0, 300.0, 300.0, 30.0).unwrap();
    let mut m = CoordinateMapper::new(region).unwrap();
    m.set_axis_bounds(0, &AxisPatch::range(0.0, 100.0).ticks(100.0, 10.0));
    m.reload().unwrap();
    assert_eq!(m.axis(AxisIndex::X).major_ticks().count(), 2);
    assert_eq!(m.axis(AxisIndex::X).minor_ticks().count(), 11);
}

#[test]
fn exact_multiple_tick_counts() {
    for (span, major, expected) in [(1.0, 0.1, 11), (0.3, 0.1, 4), (100.0, 25.0, 5)] {
        let region = Region::new(0.0, 0.0, 300.0, 300.0, 30.0).unwrap();
        let mut m = CoordinateMapper::new(region).unwrap();
        m.set_axis(AxisIndex::X, &AxisPatch::range(0.0, span).ticks(major, major));
        m.reload().unwrap();
        assert_eq!(m.axis(AxisIndex::X).major_ticks().count(), expected, "span {span} / {major}");
    }
}

#[test]
fn two_point_bezier_is_straight() {
    let a = Point::new(10.0, 40.0);
    let b = Point::new(90.0, 5.0);
    let path = bezier_path(&[a, b], BezierParams::default());
    assert_eq!(path.segments()[1], PathSegment::CubicTo { c1: a, c2: b, to: b });
}
