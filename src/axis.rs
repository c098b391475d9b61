//! Axis definitions: data range, tick spacing and the pixel ratio derived
//! from them.
//!
//! An [`Axis`] is a one-dimensional mapping from a data range onto a pixel
//! span. The `ratio` is not kept in sync automatically: edits go through
//! [`Axis::apply`] and take effect once [`Axis::recompute_ratio`] runs, so
//! several axes can be edited in a batch before one reload.

use std::fmt;

use crate::error::{Error, Result};

/// Default major tick spacing for a fresh axis.
pub const DEFAULT_TICK_MAJOR: f64 = 100.0;
/// Default minor tick spacing for a fresh axis.
pub const DEFAULT_TICK_MINOR: f64 = 10.0;
/// Most tick intervals an axis may hold at either spacing.
pub const MAX_TICKS: usize = 10_000;

/// Identifies one of the three axes a figure owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AxisIndex {
    /// Horizontal axis along the bottom edge.
    X = 0,
    /// Primary vertical axis along the left edge.
    Y = 1,
    /// Secondary vertical axis along the right edge.
    Y2 = 2,
}

impl AxisIndex {
    /// All axes in index order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Y2];

    /// Look up an axis by its numeric index (0 = x, 1 = y, 2 = secondary y).
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::X),
            1 => Some(Self::Y),
            2 => Some(Self::Y2),
            _ => None,
        }
    }

    /// Numeric index of this axis.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether this axis runs vertically.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        !matches!(self, Self::X)
    }
}

impl fmt::Display for AxisIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "primary y",
            Self::Y2 => "secondary y",
        })
    }
}

/// Which vertical axis a mapping call uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisChoice {
    /// Map y through the primary (left) axis.
    #[default]
    Primary,
    /// Map y through the secondary (right) axis.
    Secondary,
}

impl AxisChoice {
    /// The vertical axis selected by this choice.
    #[must_use]
    pub const fn y_axis(self) -> AxisIndex {
        match self {
            Self::Primary => AxisIndex::Y,
            Self::Secondary => AxisIndex::Y2,
        }
    }
}

/// Partial update for an [`Axis`]. Absent fields keep their current value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct AxisPatch {
    /// New lower bound.
    pub min: Option<f64>,
    /// New upper bound.
    pub max: Option<f64>,
    /// New major tick spacing.
    pub tick_major: Option<f64>,
    /// New minor tick spacing.
    pub tick_minor: Option<f64>,
}

impl AxisPatch {
    /// Empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch both bounds.
    #[must_use]
    pub fn range(min: f64, max: f64) -> Self {
        Self { min: Some(min), max: Some(max), ..Self::default() }
    }

    /// Set the lower bound.
    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the upper bound.
    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set both tick spacings.
    #[must_use]
    pub fn ticks(mut self, major: f64, minor: f64) -> Self {
        self.tick_major = Some(major);
        self.tick_minor = Some(minor);
        self
    }

    /// Set the major tick spacing.
    #[must_use]
    pub fn tick_major(mut self, spacing: f64) -> Self {
        self.tick_major = Some(spacing);
        self
    }

    /// Set the minor tick spacing.
    #[must_use]
    pub fn tick_minor(mut self, spacing: f64) -> Self {
        self.tick_minor = Some(spacing);
        self
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
            && self.max.is_none()
            && self.tick_major.is_none()
            && self.tick_minor.is_none()
    }
}

/// A data range with tick spacing and its pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    min: f64,
    max: f64,
    tick_major: f64,
    tick_minor: f64,
    ratio: f64,
}

impl Axis {
    /// Create an axis over `min..max` with default tick spacing.
    ///
    /// The ratio starts at zero; it is only meaningful after
    /// [`Axis::recompute_ratio`].
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max, tick_major: DEFAULT_TICK_MAJOR, tick_minor: DEFAULT_TICK_MINOR, ratio: 0.0 }
    }

    /// Builder-style tick spacing.
    #[must_use]
    pub fn with_ticks(mut self, major: f64, minor: f64) -> Self {
        self.tick_major = major;
        self.tick_minor = minor;
        self
    }

    /// Lower bound.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Major tick spacing in data units.
    #[must_use]
    pub fn tick_major(&self) -> f64 {
        self.tick_major
    }

    /// Minor tick spacing in data units.
    #[must_use]
    pub fn tick_minor(&self) -> f64 {
        self.tick_minor
    }

    /// Pixels per data unit as of the last reload.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// `max - min`.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Merge a patch; only fields present in the patch change.
    pub fn apply(&mut self, patch: &AxisPatch) {
        if let Some(min) = patch.min {
            self.min = min;
        }
        if let Some(max) = patch.max {
            self.max = max;
        }
        if let Some(major) = patch.tick_major {
            self.tick_major = major;
        }
        if let Some(minor) = patch.tick_minor {
            self.tick_minor = minor;
        }
    }

    /// Check the range and tick spacing, returning the ratio for `pixel_span`
    /// without storing it.
    ///
    /// # Errors
    ///
    /// [`Error::DegenerateAxis`] when `max <= min` or a bound is not finite,
    /// [`Error::InvalidTick`] when a tick spacing is not a positive finite
    /// number or would put more than [`MAX_TICKS`] intervals on the axis.
    pub fn ratio_for(&self, axis: AxisIndex, pixel_span: f64) -> Result<f64> {
        let span = self.span();
        if !span.is_finite() || span <= 0.0 {
            return Err(Error::DegenerateAxis { axis, min: self.min, max: self.max });
        }
        for spacing in [self.tick_major, self.tick_minor] {
            if !spacing.is_finite() || spacing <= 0.0 || span / spacing > MAX_TICKS as f64 {
                return Err(Error::InvalidTick { axis, spacing });
            }
        }
        Ok(pixel_span / span)
    }

    /// Recompute and store the ratio for `pixel_span`.
    ///
    /// # Errors
    ///
    /// See [`Axis::ratio_for`]. The stored ratio is untouched on error.
    pub fn recompute_ratio(&mut self, axis: AxisIndex, pixel_span: f64) -> Result<()> {
        self.ratio = self.ratio_for(axis, pixel_span)?;
        Ok(())
    }

    pub(crate) fn set_ratio(&mut self, ratio: f64) {
        self.ratio = ratio;
    }

    /// Number of major intervals, `span / tick_major`. May be fractional.
    #[must_use]
    pub fn major_intervals(&self) -> f64 {
        self.span() / self.tick_major
    }

    /// Number of minor intervals, `span / tick_minor`. May be fractional.
    #[must_use]
    pub fn minor_intervals(&self) -> f64 {
        self.span() / self.tick_minor
    }

    /// Major tick marks from `min` upward.
    #[must_use]
    pub fn major_ticks(&self) -> Ticks {
        Ticks::new(self.min, self.tick_major, self.major_intervals())
    }

    /// Minor tick marks from `min` upward.
    #[must_use]
    pub fn minor_ticks(&self) -> Ticks {
        Ticks::new(self.min, self.tick_minor, self.minor_intervals())
    }
}

/// One tick mark position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Ordinal of the tick, 0 at `min`.
    pub index: usize,
    /// Data value at the tick, `min + index * spacing`.
    pub value: f64,
    /// Distance from `min` in data units.
    pub offset: f64,
}

/// Iterator over evenly spaced ticks.
///
/// Yields `floor(intervals) + 1` ticks, at most `MAX_TICKS + 1`; a range
/// that is not a multiple of the spacing simply stops short of `max`.
/// Non-finite or negative interval counts yield nothing.
#[derive(Debug, Clone)]
pub struct Ticks {
    start: f64,
    spacing: f64,
    next: usize,
    count: usize,
}

impl Ticks {
    fn new(start: f64, spacing: f64, intervals: f64) -> Self {
        let count = if intervals.is_finite() && intervals >= 0.0 {
            // Absorb float error such as 0.3 / 0.1 = 2.9999999999999996.
            (intervals + 1e-9).floor().min(MAX_TICKS as f64) as usize + 1
        } else {
            0
        };
        Self { start, spacing, next: 0, count }
    }
}

impl Iterator for Ticks {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        if self.next >= self.count {
            return None;
        }
        let index = self.next;
        self.next += 1;
        let offset = index as f64 * self.spacing;
        Some(Tick { index, value: self.start + offset, offset })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Ticks {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_index_lookup() {
        assert_eq!(AxisIndex::from_index(0), Some(AxisIndex::X));
        assert_eq!(AxisIndex::from_index(2), Some(AxisIndex::Y2));
        assert_eq!(AxisIndex::from_index(3), None);
        assert_eq!(AxisIndex::Y.index(), 1);
    }

    #[test]
    fn test_choice_selects_axis() {
        assert_eq!(AxisChoice::Primary.y_axis(), AxisIndex::Y);
        assert_eq!(AxisChoice::Secondary.y_axis(), AxisIndex::Y2);
    }

    #[test]
    fn test_patch_merges_only_present_fields() {
        let mut axis = Axis::new(0.0, 100.0).with_ticks(20.0, 5.0);
        axis.apply(&AxisPatch::new().max(50.0));
        assert_eq!(axis.min(), 0.0);
        assert_eq!(axis.max(), 50.0);
        assert_eq!(axis.tick_major(), 20.0);
        assert_eq!(axis.tick_minor(), 5.0);

        axis.apply(&AxisPatch::new());
        assert_eq!(axis.max(), 50.0);
    }

    #[test]
    fn test_ratio() {
        let mut axis = Axis::new(0.0, 100.0);
        axis.recompute_ratio(AxisIndex::X, 240.0).unwrap();
        assert!((axis.ratio() - 2.4).abs() < 1e-12);
    }

    #[test]
    fn test_zero_range_rejected() {
        let mut axis = Axis::new(5.0, 5.0);
        let err = axis.recompute_ratio(AxisIndex::Y, 100.0).unwrap_err();
        assert!(matches!(err, Error::DegenerateAxis { axis: AxisIndex::Y, .. }));
        assert_eq!(axis.ratio(), 0.0);
    }

    #[test]
    fn test_inverted_and_nan_ranges_rejected() {
        assert!(Axis::new(10.0, 0.0).ratio_for(AxisIndex::X, 100.0).is_err());
        assert!(Axis::new(f64::NAN, 1.0).ratio_for(AxisIndex::X, 100.0).is_err());
        assert!(Axis::new(0.0, f64::INFINITY).ratio_for(AxisIndex::X, 100.0).is_err());
    }

    #[test]
    fn test_bad_tick_rejected() {
        let axis = Axis::new(0.0, 10.0).with_ticks(0.0, 1.0);
        assert!(matches!(
            axis.ratio_for(AxisIndex::X, 10.0),
            Err(Error::InvalidTick { spacing, .. }) if spacing == 0.0
        ));
        let axis = Axis::new(0.0, 10.0).with_ticks(1.0, -1.0);
        assert!(axis.ratio_for(AxisIndex::X, 10.0).is_err());
    }

    #[test]
    fn test_tick_counts() {
        let axis = Axis::new(0.0, 100.0).with_ticks(100.0, 10.0);
        let major: Vec<f64> = axis.major_ticks().map(|t| t.value).collect();
        assert_eq!(major, vec![0.0, 100.0]);
        let minor: Vec<f64> = axis.minor_ticks().map(|t| t.value).collect();
        assert_eq!(minor.len(), 11);
        assert_eq!(minor[10], 100.0);
    }

    #[test]
    fn test_fractional_final_interval_not_snapped() {
        let axis = Axis::new(0.0, 250.0).with_ticks(100.0, 10.0);
        let major: Vec<f64> = axis.major_ticks().map(|t| t.value).collect();
        assert_eq!(major, vec![0.0, 100.0, 200.0]);
    }

    #[test]
    fn test_ticks_start_at_min() {
        let axis = Axis::new(-1.0, 1.0).with_ticks(0.5, 0.1);
        let major: Vec<f64> = axis.major_ticks().map(|t| t.value).collect();
        assert_eq!(major, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(axis.minor_ticks().len(), 21);
    }

    #[test]
    fn test_tick_count_capped() {
        let axis = Axis::new(0.0, 1e20).with_ticks(1e20, 1.0);
        assert_eq!(axis.minor_ticks().len(), MAX_TICKS + 1);
        assert_eq!(axis.major_ticks().len(), 2);
        assert!(matches!(
            axis.ratio_for(AxisIndex::X, 100.0),
            Err(Error::InvalidTick { spacing, .. }) if spacing == 1.0
        ));

        let at_limit = Axis::new(0.0, MAX_TICKS as f64).with_ticks(1.0, 1.0);
        assert!(at_limit.ratio_for(AxisIndex::X, 100.0).is_ok());
        assert_eq!(at_limit.minor_ticks().len(), MAX_TICKS + 1);
    }

    #[test]
    fn test_degenerate_ticks_yield_nothing() {
        let axis = Axis::new(0.0, 10.0).with_ticks(0.0, 1.0);
        assert_eq!(axis.major_ticks().count(), 0);
        let axis = Axis::new(10.0, 0.0);
        assert_eq!(axis.major_ticks().count(), 0);
    }
}
