//! Data-space ↔ pixel-space transform for a figure.
//!
//! The mapper owns a [`Region`] and three [`Axis`] values (x, primary y,
//! secondary y). Pixel y grows downward while data y grows upward, so the
//! vertical mapping is inverted:
//!
//! ```text
//! px = left + ratio_x * (x - min_x)
//! py = top + height - ratio_y * (y - min_y)
//! ```
//!
//! Axis and region edits are deferred: they mark the mapper stale and the
//! ratios only change on [`CoordinateMapper::reload`]. Mapping calls made in
//! between still see the previous ratios.
//!
//! # Example
//!
//! ```
//! use canvasplot::axis::{AxisChoice, AxisPatch};
//! use canvasplot::mapper::CoordinateMapper;
//! use canvasplot::region::Region;
//!
//! let region = Region::new(0.0, 0.0, 300.0, 300.0, 30.0).unwrap();
//! let mut mapper = CoordinateMapper::new(region).unwrap();
//! mapper.set_axis_bounds(0, &AxisPatch::range(0.0, 100.0));
//! mapper.reload().unwrap();
//!
//! let p = mapper.data_to_pixel(50.0, 0.0, AxisChoice::Primary);
//! assert_eq!((p.x, p.y), (150.0, 270.0));
//! ```

use crate::axis::{Axis, AxisChoice, AxisIndex, AxisPatch};
use crate::error::Result;
use crate::geometry::Point;
use crate::region::Region;

/// Converts between data coordinates and surface pixels within a region.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateMapper {
    region: Region,
    axes: [Axis; 3],
    stale: bool,
}

impl CoordinateMapper {
    /// Create a mapper whose axes span the plot area one data unit per pixel.
    ///
    /// # Errors
    ///
    /// Never fails for a valid region; the signature matches
    /// [`CoordinateMapper::with_axes`].
    pub fn new(region: Region) -> Result<Self> {
        let axes = [
            Axis::new(0.0, region.plot_width()),
            Axis::new(0.0, region.plot_height()),
            Axis::new(0.0, region.plot_height()),
        ];
        Self::with_axes(region, axes)
    }

    /// Create a mapper with explicit axes and reload it.
    ///
    /// # Errors
    ///
    /// Returns the first axis configuration error found by
    /// [`CoordinateMapper::reload`].
    pub fn with_axes(region: Region, axes: [Axis; 3]) -> Result<Self> {
        let mut mapper = Self { region, axes, stale: true };
        mapper.reload()?;
        Ok(mapper)
    }

    /// The region being mapped onto.
    #[must_use]
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// One axis.
    #[must_use]
    pub fn axis(&self, axis: AxisIndex) -> &Axis {
        &self.axes[axis.index()]
    }

    /// All three axes in index order.
    #[must_use]
    pub fn axes(&self) -> &[Axis; 3] {
        &self.axes
    }

    /// Whether an edit has happened since the last successful reload.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Partially update the axis at `axis` (0 = x, 1 = y, 2 = secondary y).
    ///
    /// An index outside `0..=2` is a caller error: it is logged and ignored.
    /// Returns whether the patch was applied. The change is not visible to
    /// mapping calls until [`CoordinateMapper::reload`].
    pub fn set_axis_bounds(&mut self, axis: usize, patch: &AxisPatch) -> bool {
        let Some(index) = AxisIndex::from_index(axis) else {
            tracing::warn!(axis, "ignoring update for unknown axis index");
            return false;
        };
        self.set_axis(index, patch);
        true
    }

    /// Partially update one axis. Takes effect on the next reload.
    pub fn set_axis(&mut self, axis: AxisIndex, patch: &AxisPatch) {
        if patch.is_empty() {
            return;
        }
        self.axes[axis.index()].apply(patch);
        self.stale = true;
    }

    /// Recompute the pixel ratio of every axis from the current plot size.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DegenerateAxis`] or
    /// [`crate::Error::InvalidTick`] for the first bad axis. No ratio changes
    /// when any axis is rejected.
    pub fn reload(&mut self) -> Result<()> {
        let mut ratios = [0.0; 3];
        for axis in AxisIndex::ALL {
            let span = self.pixel_span(axis);
            ratios[axis.index()] = self.axes[axis.index()].ratio_for(axis, span).map_err(|err| {
                tracing::warn!(%err, "axis reload rejected");
                err
            })?;
        }
        for (axis, ratio) in self.axes.iter_mut().zip(ratios) {
            axis.set_ratio(ratio);
        }
        self.stale = false;
        tracing::debug!(
            x = ratios[0],
            y = ratios[1],
            y2 = ratios[2],
            "reloaded axis ratios"
        );
        Ok(())
    }

    /// Reload only if an edit is pending.
    ///
    /// # Errors
    ///
    /// See [`CoordinateMapper::reload`].
    pub fn ensure_fresh(&mut self) -> Result<()> {
        if self.stale {
            self.reload()?;
        }
        Ok(())
    }

    /// Change the region size. Takes effect on the next reload.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidRegion`] and leaves the region
    /// unchanged if the new size leaves no plot area.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        self.region = self.region.resized(width, height)?;
        self.stale = true;
        Ok(())
    }

    /// Move the region origin.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidRegion`] for non-finite coordinates.
    pub fn move_to(&mut self, x0: f64, y0: f64) -> Result<()> {
        self.region = self.region.moved(x0, y0)?;
        self.stale = true;
        Ok(())
    }

    /// Change the decoration gap. Takes effect on the next reload.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidRegion`] if the gap leaves no plot area.
    pub fn set_gap(&mut self, gap: f64) -> Result<()> {
        self.region = self.region.with_gap(gap)?;
        self.stale = true;
        Ok(())
    }

    fn pixel_span(&self, axis: AxisIndex) -> f64 {
        if axis.is_vertical() {
            self.region.plot_height()
        } else {
            self.region.plot_width()
        }
    }

    /// Map a data point to surface pixels.
    #[must_use]
    pub fn data_to_pixel(&self, x: f64, y: f64, choice: AxisChoice) -> Point {
        let plot = self.region.plot_area();
        let x_axis = self.axis(AxisIndex::X);
        let y_axis = self.axis(choice.y_axis());
        Point::new(
            plot.left() + x_axis.ratio() * (x - x_axis.min()),
            plot.bottom() - y_axis.ratio() * (y - y_axis.min()),
        )
    }

    /// Map a data point to surface pixels.
    #[must_use]
    pub fn map(&self, point: Point, choice: AxisChoice) -> Point {
        self.data_to_pixel(point.x, point.y, choice)
    }

    /// Map surface pixels back to data coordinates.
    #[must_use]
    pub fn pixel_to_data(&self, px: f64, py: f64, choice: AxisChoice) -> Point {
        let plot = self.region.plot_area();
        let x_axis = self.axis(AxisIndex::X);
        let y_axis = self.axis(choice.y_axis());
        Point::new(
            x_axis.min() + (px - plot.left()) / x_axis.ratio(),
            y_axis.min() + (plot.bottom() - py) / y_axis.ratio(),
        )
    }

    /// Pixel position of an offset measured from the plot area's bottom-left
    /// corner, with `dy` growing upward. No data mapping is involved.
    #[must_use]
    pub fn plot_offset(&self, dx: f64, dy: f64) -> Point {
        let plot = self.region.plot_area();
        Point::new(plot.left() + dx, plot.bottom() - dy)
    }

    /// Whether a data point lies within the x range and the chosen y range.
    #[must_use]
    pub fn is_inside(&self, x: f64, y: f64, choice: AxisChoice) -> bool {
        let x_axis = self.axis(AxisIndex::X);
        let y_axis = self.axis(choice.y_axis());
        (x_axis.min()..=x_axis.max()).contains(&x) && (y_axis.min()..=y_axis.max()).contains(&y)
    }

    /// Per-axis test of whether a pixel lies within the plot area.
    #[must_use]
    pub fn is_visible(&self, point: Point) -> (bool, bool) {
        self.region.visible_axes(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use approx::assert_relative_eq;

    fn mapper_300() -> CoordinateMapper {
        let region = Region::new(0.0, 0.0, 300.0, 300.0, 30.0).unwrap();
        let mut mapper = CoordinateMapper::new(region).unwrap();
        mapper.set_axis_bounds(0, &AxisPatch::range(0.0, 100.0).ticks(100.0, 10.0));
        mapper.reload().unwrap();
        mapper
    }

    #[test]
    fn test_default_axes_are_pixel_identity() {
        let region = Region::new(0.0, 0.0, 300.0, 200.0, 30.0).unwrap();
        let mapper = CoordinateMapper::new(region).unwrap();
        for axis in AxisIndex::ALL {
            assert_relative_eq!(mapper.axis(axis).ratio(), 1.0);
        }
        assert_eq!(mapper.axis(AxisIndex::Y).max(), 140.0);
    }

    #[test]
    fn test_bottom_center_scenario() {
        let mapper = mapper_300();
        let p = mapper.data_to_pixel(50.0, 0.0, AxisChoice::Primary);
        assert_relative_eq!(p.x, 150.0);
        assert_relative_eq!(p.y, 270.0);
    }

    #[test]
    fn test_corners() {
        let mut mapper = mapper_300();
        mapper.set_axis(AxisIndex::Y, &AxisPatch::range(-5.0, 5.0));
        mapper.reload().unwrap();

        let bl = mapper.data_to_pixel(0.0, -5.0, AxisChoice::Primary);
        assert_relative_eq!(bl.x, 30.0);
        assert_relative_eq!(bl.y, 270.0);

        let tr = mapper.data_to_pixel(100.0, 5.0, AxisChoice::Primary);
        assert_relative_eq!(tr.x, 270.0);
        assert_relative_eq!(tr.y, 30.0);
    }

    #[test]
    fn test_secondary_axis_independent() {
        let mut mapper = mapper_300();
        mapper.set_axis(AxisIndex::Y2, &AxisPatch::range(0.0, 1.0));
        mapper.reload().unwrap();
        let primary = mapper.data_to_pixel(0.0, 1.0, AxisChoice::Primary);
        let secondary = mapper.data_to_pixel(0.0, 1.0, AxisChoice::Secondary);
        assert_relative_eq!(primary.y, 269.0);
        assert_relative_eq!(secondary.y, 30.0);
    }

    #[test]
    fn test_round_trip() {
        let mut mapper = mapper_300();
        mapper.set_axis(AxisIndex::Y2, &AxisPatch::range(-3.0, 7.5));
        mapper.reload().unwrap();
        for choice in [AxisChoice::Primary, AxisChoice::Secondary] {
            let data = mapper.pixel_to_data(123.0, 77.0, choice);
            let back = mapper.data_to_pixel(data.x, data.y, choice);
            assert_relative_eq!(back.x, 123.0, epsilon = 1e-9);
            assert_relative_eq!(back.y, 77.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_origin_offset_applies() {
        let region = Region::new(100.0, 50.0, 300.0, 300.0, 30.0).unwrap();
        let mapper = CoordinateMapper::new(region).unwrap();
        let p = mapper.data_to_pixel(0.0, 0.0, AxisChoice::Primary);
        assert_eq!(p, Point::new(130.0, 320.0));
    }

    #[test]
    fn test_edit_is_deferred_until_reload() {
        let mut mapper = mapper_300();
        let before = mapper.data_to_pixel(50.0, 0.0, AxisChoice::Primary);
        mapper.set_axis(AxisIndex::X, &AxisPatch::new().max(200.0));
        assert!(mapper.is_stale());
        // Ratio is stale but min is shared, so only the ratio change shows later.
        assert_eq!(mapper.data_to_pixel(50.0, 0.0, AxisChoice::Primary), before);
        mapper.reload().unwrap();
        assert!(!mapper.is_stale());
        assert_relative_eq!(mapper.data_to_pixel(50.0, 0.0, AxisChoice::Primary).x, 90.0);
    }

    #[test]
    fn test_resize_then_reload_scales_ratio() {
        let mut mapper = mapper_300();
        let old = mapper.axis(AxisIndex::X).ratio();
        mapper.resize(540.0, 300.0).unwrap();
        assert!(mapper.is_stale());
        assert_relative_eq!(mapper.axis(AxisIndex::X).ratio(), old);
        mapper.reload().unwrap();
        assert_relative_eq!(mapper.axis(AxisIndex::X).ratio(), old * 480.0 / 240.0);
    }

    #[test]
    fn test_unknown_axis_index_is_noop() {
        let mut mapper = mapper_300();
        let before = mapper.clone();
        assert!(!mapper.set_axis_bounds(3, &AxisPatch::range(0.0, 1.0)));
        assert_eq!(mapper, before);
    }

    #[test]
    fn test_degenerate_reload_keeps_old_ratios() {
        let mut mapper = mapper_300();
        let before = *mapper.axes();
        mapper.set_axis(AxisIndex::Y, &AxisPatch::range(1.0, 1.0));
        let err = mapper.reload().unwrap_err();
        assert!(matches!(err, Error::DegenerateAxis { axis: AxisIndex::Y, .. }));
        assert!(mapper.is_stale());
        for (a, b) in mapper.axes().iter().zip(before.iter()) {
            assert_eq!(a.ratio(), b.ratio());
        }
    }

    #[test]
    fn test_reload_rejects_excessive_tick_count() {
        let mut mapper = mapper_300();
        mapper.set_axis(AxisIndex::Y, &AxisPatch::range(0.0, 1e20).ticks(1e20, 1.0));
        let err = mapper.reload().unwrap_err();
        assert!(matches!(err, Error::InvalidTick { axis: AxisIndex::Y, .. }));
        assert!(mapper.is_stale());
    }

    #[test]
    fn test_plot_offset_and_visibility() {
        let mapper = mapper_300();
        assert_eq!(mapper.plot_offset(0.0, -10.0), Point::new(30.0, 280.0));
        assert_eq!(mapper.is_visible(Point::new(31.0, 5.0)), (true, false));
    }

    #[test]
    fn test_is_inside_data_range() {
        let mapper = mapper_300();
        assert!(mapper.is_inside(100.0, 0.0, AxisChoice::Primary));
        assert!(!mapper.is_inside(100.1, 0.0, AxisChoice::Primary));
        assert!(!mapper.is_inside(50.0, -1.0, AxisChoice::Secondary));
    }
}
