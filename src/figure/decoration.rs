//! Decoration layout: spines, tick marks, labels, grid and cursor.
//!
//! Layout functions are pure: they read the mapper and return line segments
//! or positioned labels in surface pixels. [`stroke_segments`] and
//! [`draw_labels`] hand the results to a surface. Nothing here touches axis
//! state.

use crate::axis::{AxisChoice, AxisIndex, Tick};
use crate::geometry::Point;
use crate::mapper::CoordinateMapper;
use crate::surface::{DrawingSurface, FontStyle, StrokeStyle, TextPlacement};

use super::settings::{CursorSettings, Edge, EdgeSet};

/// Length of a major tick mark.
pub const MAJOR_TICK_LENGTH: f64 = 10.0;
/// Length of a minor tick mark.
pub const MINOR_TICK_LENGTH: f64 = 5.0;
/// Distance between the plot area and tick or category labels.
pub const LABEL_OFFSET: f64 = 8.0;
/// Crosshair inset from the figure bound.
pub const CURSOR_MARGIN: f64 = 15.0;
/// Distance below the plot area of the x readout.
pub const X_READOUT_OFFSET: f64 = 20.0;
/// Distance left of the plot area of the primary y readout.
pub const Y_READOUT_OFFSET: f64 = 30.0;
/// Distance right of the plot area of the secondary y readout.
pub const Y2_READOUT_OFFSET: f64 = 20.0;

/// A straight line in surface pixels.
pub type Segment = (Point, Point);

/// Text positioned relative to an anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Text content.
    pub text: String,
    /// Anchor in surface pixels.
    pub anchor: Point,
    /// Placement relative to the anchor.
    pub placement: TextPlacement,
}

/// Pixel distance along `axis` of a data offset from the axis minimum.
fn pixel_offset(mapper: &CoordinateMapper, axis: AxisIndex, offset: f64) -> f64 {
    offset * mapper.axis(axis).ratio()
}

/// Point on the axis line at `offset` pixels from its origin, pushed
/// `across` pixels away from the plot area.
fn axis_point(mapper: &CoordinateMapper, axis: AxisIndex, along: f64, across: f64) -> Point {
    let width = mapper.region().plot_width();
    match axis {
        AxisIndex::X => mapper.plot_offset(along, -across),
        AxisIndex::Y => mapper.plot_offset(-across, along),
        AxisIndex::Y2 => mapper.plot_offset(width + across, along),
    }
}

/// Border segments for the enabled edges.
#[must_use]
pub fn spine_segments(mapper: &CoordinateMapper, edges: EdgeSet) -> Vec<Segment> {
    let plot = mapper.region().plot_area();
    let bottom_left = Point::new(plot.left(), plot.bottom());
    let bottom_right = Point::new(plot.right(), plot.bottom());
    let top_left = Point::new(plot.left(), plot.top());
    let top_right = Point::new(plot.right(), plot.top());
    edges
        .iter()
        .map(|edge| match edge {
            Edge::Bottom => (bottom_left, bottom_right),
            Edge::Left => (top_left, bottom_left),
            Edge::Right => (bottom_right, top_right),
            Edge::Top => (top_right, top_left),
        })
        .collect()
}

fn marks<'a>(
    mapper: &'a CoordinateMapper,
    axis: AxisIndex,
    ticks: impl Iterator<Item = Tick> + 'a,
    length: f64,
) -> impl Iterator<Item = Segment> + 'a {
    ticks.map(move |tick| {
        let along = pixel_offset(mapper, axis, tick.offset);
        (axis_point(mapper, axis, along, 0.0), axis_point(mapper, axis, along, length))
    })
}

/// Major then minor tick marks of `axis`. Inward marks point into the plot
/// area.
#[must_use]
pub fn tick_segments(mapper: &CoordinateMapper, axis: AxisIndex, outward: bool) -> Vec<Segment> {
    let direction = if outward { 1.0 } else { -1.0 };
    let scale = mapper.axis(axis);
    marks(mapper, axis, scale.major_ticks(), MAJOR_TICK_LENGTH * direction)
        .chain(marks(mapper, axis, scale.minor_ticks(), MINOR_TICK_LENGTH * direction))
        .collect()
}

fn label_placement(axis: AxisIndex) -> TextPlacement {
    match axis {
        AxisIndex::X => TextPlacement::Below,
        AxisIndex::Y => TextPlacement::LeftOf,
        AxisIndex::Y2 => TextPlacement::RightOf,
    }
}

/// Numeric labels `min + i * tick_major` at each major tick.
#[must_use]
pub fn tick_labels(mapper: &CoordinateMapper, axis: AxisIndex, decimal_places: usize) -> Vec<Label> {
    let scale = mapper.axis(axis);
    scale.major_ticks()
        .map(|tick| Label {
            text: format!("{:.*}", decimal_places, tick.value),
            anchor: axis_point(mapper, axis, pixel_offset(mapper, axis, tick.offset), LABEL_OFFSET),
            placement: label_placement(axis),
        })
        .collect()
}

/// Category names centred in consecutive `tick_major`-wide bins.
///
/// Labels whose bin centre falls beyond the axis maximum are dropped.
#[must_use]
pub fn category_labels(mapper: &CoordinateMapper, axis: AxisIndex, labels: &[String]) -> Vec<Label> {
    let scale = mapper.axis(axis);
    let placement = match axis {
        AxisIndex::X => TextPlacement::BelowCentered,
        other => label_placement(other),
    };
    labels
        .iter()
        .enumerate()
        .map(|(i, text)| (text, (i as f64 + 0.5) * scale.tick_major()))
        .take_while(|(_, centre)| *centre <= scale.span())
        .map(|(text, centre)| Label {
            text: text.clone(),
            anchor: axis_point(mapper, axis, pixel_offset(mapper, axis, centre), LABEL_OFFSET),
            placement,
        })
        .collect()
}

/// Grid lines at each major tick of `axis`, spanning the plot area.
#[must_use]
pub fn grid_segments(mapper: &CoordinateMapper, axis: AxisIndex) -> Vec<Segment> {
    let width = mapper.region().plot_width();
    let height = mapper.region().plot_height();
    mapper
        .axis(axis)
        .major_ticks()
        .map(|tick| {
            let along = pixel_offset(mapper, axis, tick.offset);
            match axis {
                AxisIndex::X => (mapper.plot_offset(along, 0.0), mapper.plot_offset(along, height)),
                AxisIndex::Y | AxisIndex::Y2 => {
                    (mapper.plot_offset(0.0, along), mapper.plot_offset(width, along))
                }
            }
        })
        .collect()
}

/// Crosshair lines and readouts for a pointer inside the figure bound.
///
/// Each line is only drawn when the pointer lies within the plot area along
/// that direction; readouts follow their line.
#[must_use]
pub fn crosshair(
    mapper: &CoordinateMapper,
    pointer: Point,
    cursor: &CursorSettings,
) -> (Vec<Segment>, Vec<Label>) {
    let bound = mapper.region().bound();
    let (x_visible, y_visible) = mapper.is_visible(pointer);
    let mut lines = Vec::with_capacity(2);
    let mut labels = Vec::new();
    let format = |value: f64| format!("{:.*}", cursor.decimal_places, value);

    if x_visible {
        lines.push((
            Point::new(pointer.x, bound.top() + CURSOR_MARGIN),
            Point::new(pointer.x, bound.bottom() - CURSOR_MARGIN),
        ));
        if cursor.readout(AxisIndex::X) {
            let value = mapper.pixel_to_data(pointer.x, pointer.y, AxisChoice::Primary).x;
            labels.push(Label {
                text: format(value),
                anchor: Point::new(pointer.x, mapper.plot_offset(0.0, -X_READOUT_OFFSET).y),
                placement: TextPlacement::Below,
            });
        }
    }
    if y_visible {
        lines.push((
            Point::new(bound.left() + CURSOR_MARGIN, pointer.y),
            Point::new(bound.right() - CURSOR_MARGIN, pointer.y),
        ));
        if cursor.readout(AxisIndex::Y) {
            let value = mapper.pixel_to_data(pointer.x, pointer.y, AxisChoice::Primary).y;
            labels.push(Label {
                text: format(value),
                anchor: Point::new(mapper.plot_offset(-Y_READOUT_OFFSET, 0.0).x, pointer.y),
                placement: TextPlacement::Below,
            });
        }
        if cursor.readout(AxisIndex::Y2) {
            let value = mapper.pixel_to_data(pointer.x, pointer.y, AxisChoice::Secondary).y;
            let width = mapper.region().plot_width();
            labels.push(Label {
                text: format(value),
                anchor: Point::new(mapper.plot_offset(width + Y2_READOUT_OFFSET, 0.0).x, pointer.y),
                placement: TextPlacement::Below,
            });
        }
    }
    (lines, labels)
}

/// Stroke every segment.
pub fn stroke_segments(surface: &mut dyn DrawingSurface, segments: &[Segment], stroke: &StrokeStyle) {
    for (from, to) in segments {
        surface.draw_line(*from, *to, stroke);
    }
}

/// Draw every label.
pub fn draw_labels(surface: &mut dyn DrawingSurface, labels: &[Label], font: &FontStyle) {
    for label in labels {
        surface.draw_text(&label.text, label.anchor, label.placement, font);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisPatch;
    use crate::region::Region;

    fn mapper() -> CoordinateMapper {
        let region = Region::new(0.0, 0.0, 300.0, 300.0, 30.0).unwrap();
        let mut mapper = CoordinateMapper::new(region).unwrap();
        mapper.set_axis(AxisIndex::X, &AxisPatch::range(0.0, 100.0).ticks(100.0, 10.0));
        mapper.set_axis(AxisIndex::Y, &AxisPatch::range(0.0, 10.0).ticks(5.0, 1.0));
        mapper.reload().unwrap();
        mapper
    }

    #[test]
    fn test_spine_bottom_edge() {
        let segments = spine_segments(&mapper(), EdgeSet::NONE.with(Edge::Bottom));
        assert_eq!(segments, vec![(Point::new(30.0, 270.0), Point::new(270.0, 270.0))]);
    }

    #[test]
    fn test_tick_counts() {
        let segments = tick_segments(&mapper(), AxisIndex::X, true);
        // 2 major + 11 minor.
        assert_eq!(segments.len(), 13);
        assert_eq!(segments[0], (Point::new(30.0, 270.0), Point::new(30.0, 280.0)));
        assert_eq!(segments[1], (Point::new(270.0, 270.0), Point::new(270.0, 280.0)));
        assert_eq!(segments[2].1, Point::new(30.0, 275.0));
    }

    #[test]
    fn test_inward_ticks_on_y() {
        let segments = tick_segments(&mapper(), AxisIndex::Y, false);
        assert_eq!(segments[0], (Point::new(30.0, 270.0), Point::new(40.0, 270.0)));
    }

    #[test]
    fn test_secondary_ticks_on_right() {
        let segments = tick_segments(&mapper(), AxisIndex::Y2, true);
        assert!(segments.iter().all(|(from, _)| from.x == 270.0));
        assert!(segments.iter().all(|(_, to)| to.x > 270.0));
    }

    #[test]
    fn test_tick_labels_text_and_placement() {
        let labels = tick_labels(&mapper(), AxisIndex::Y, 1);
        let texts: Vec<_> = labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["0.0", "5.0", "10.0"]);
        assert_eq!(labels[0].anchor, Point::new(22.0, 270.0));
        assert_eq!(labels[0].placement, TextPlacement::LeftOf);
    }

    #[test]
    fn test_category_labels_centered_in_bins() {
        let mut m = mapper();
        m.set_axis(AxisIndex::X, &AxisPatch::new().tick_major(25.0));
        m.reload().unwrap();
        let names: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|s| (*s).to_string()).collect();
        let labels = category_labels(&m, AxisIndex::X, &names);
        assert_eq!(labels.len(), 4);
        assert_eq!(labels[0].anchor, Point::new(60.0, 278.0));
        assert_eq!(labels[0].placement, TextPlacement::BelowCentered);
        assert!(category_labels(&m, AxisIndex::X, &[]).is_empty());
    }

    #[test]
    fn test_grid_spans_plot_area() {
        let segments = grid_segments(&mapper(), AxisIndex::Y);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1], (Point::new(30.0, 150.0), Point::new(270.0, 150.0)));
    }

    #[test]
    fn test_crosshair_inside_plot() {
        let cursor = CursorSettings { readouts: [true, true, false], ..CursorSettings::default() };
        let (lines, labels) = crosshair(&mapper(), Point::new(150.0, 150.0), &cursor);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], (Point::new(150.0, 15.0), Point::new(150.0, 285.0)));
        let texts: Vec<_> = labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["50.00", "5.00"]);
        assert_eq!(labels[0].anchor, Point::new(150.0, 290.0));
        assert_eq!(labels[1].anchor, Point::new(0.0, 150.0));
    }

    #[test]
    fn test_crosshair_in_gap_draws_one_line() {
        let (lines, labels) = crosshair(&mapper(), Point::new(10.0, 150.0), &CursorSettings::default());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0.y, 150.0);
        assert!(labels.is_empty());
    }
}
