//! The pixel rectangle a figure occupies on its surface.

use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};

/// Inset reserved around the plot area for decoration, in pixels.
pub const DEFAULT_GAP: f64 = 30.0;

/// A figure's pixel rectangle plus the inset kept for axis decoration.
///
/// The full rectangle is the figure's *bound*; the bound shrunk by `gap` on
/// every side is the *plot area*.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RegionFields"))]
pub struct Region {
    x0: f64,
    y0: f64,
    width: f64,
    height: f64,
    gap: f64,
}

/// Unvalidated wire form of [`Region`]; deserialization goes through
/// [`Region::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct RegionFields {
    x0: f64,
    y0: f64,
    width: f64,
    height: f64,
    #[serde(default = "default_gap")]
    gap: f64,
}

#[cfg(feature = "serde")]
fn default_gap() -> f64 {
    DEFAULT_GAP
}

#[cfg(feature = "serde")]
impl TryFrom<RegionFields> for Region {
    type Error = Error;

    fn try_from(fields: RegionFields) -> Result<Self> {
        Self::new(fields.x0, fields.y0, fields.width, fields.height, fields.gap)
    }
}

impl Region {
    /// Create a region.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegion`] if the plot area would be empty or a
    /// value is not finite.
    pub fn new(x0: f64, y0: f64, width: f64, height: f64, gap: f64) -> Result<Self> {
        let region = Self { x0, y0, width, height, gap };
        region.validate()?;
        Ok(region)
    }

    /// Region at the surface origin with the default gap.
    ///
    /// # Errors
    ///
    /// See [`Region::new`].
    pub fn sized(width: f64, height: f64) -> Result<Self> {
        Self::new(0.0, 0.0, width, height, DEFAULT_GAP)
    }

    fn validate(&self) -> Result<()> {
        let finite = [self.x0, self.y0, self.width, self.height, self.gap]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.gap < 0.0 || self.plot_width() <= 0.0 || self.plot_height() <= 0.0 {
            return Err(Error::InvalidRegion {
                width: self.width,
                height: self.height,
                gap: self.gap,
            });
        }
        Ok(())
    }

    /// Left edge of the bound.
    #[must_use]
    pub fn x0(&self) -> f64 {
        self.x0
    }

    /// Top edge of the bound.
    #[must_use]
    pub fn y0(&self) -> f64 {
        self.y0
    }

    /// Full width including the gap.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Full height including the gap.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Decoration inset.
    #[must_use]
    pub fn gap(&self) -> f64 {
        self.gap
    }

    /// Plot area width.
    #[must_use]
    pub fn plot_width(&self) -> f64 {
        self.width - 2.0 * self.gap
    }

    /// Plot area height.
    #[must_use]
    pub fn plot_height(&self) -> f64 {
        self.height - 2.0 * self.gap
    }

    /// The full pixel bound.
    #[must_use]
    pub fn bound(&self) -> Rect {
        Rect::new(self.x0, self.y0, self.width, self.height)
    }

    /// The bound shrunk by the gap on every side.
    #[must_use]
    pub fn plot_area(&self) -> Rect {
        Rect::new(self.x0 + self.gap, self.y0 + self.gap, self.plot_width(), self.plot_height())
    }

    /// Whether `point` falls within the plot area horizontally and vertically,
    /// reported per axis.
    #[must_use]
    pub fn visible_axes(&self, point: Point) -> (bool, bool) {
        let plot = self.plot_area();
        (
            point.x >= plot.left() && point.x <= plot.right(),
            point.y >= plot.top() && point.y <= plot.bottom(),
        )
    }

    /// Copy with a new size.
    ///
    /// # Errors
    ///
    /// See [`Region::new`].
    pub fn resized(&self, width: f64, height: f64) -> Result<Self> {
        Self::new(self.x0, self.y0, width, height, self.gap)
    }

    /// Copy with a new origin.
    ///
    /// # Errors
    ///
    /// See [`Region::new`].
    pub fn moved(&self, x0: f64, y0: f64) -> Result<Self> {
        Self::new(x0, y0, self.width, self.height, self.gap)
    }

    /// Copy with a new gap.
    ///
    /// # Errors
    ///
    /// See [`Region::new`].
    pub fn with_gap(&self, gap: f64) -> Result<Self> {
        Self::new(self.x0, self.y0, self.width, self.height, gap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_area() {
        let region = Region::new(10.0, 20.0, 300.0, 200.0, 30.0).unwrap();
        assert_eq!(region.plot_area(), Rect::new(40.0, 50.0, 240.0, 140.0));
        assert_eq!(region.bound(), Rect::new(10.0, 20.0, 300.0, 200.0));
    }

    #[test]
    fn test_gap_swallowing_region_rejected() {
        assert!(matches!(
            Region::new(0.0, 0.0, 60.0, 300.0, 30.0),
            Err(Error::InvalidRegion { .. })
        ));
        assert!(Region::new(0.0, 0.0, 100.0, 100.0, -1.0).is_err());
        assert!(Region::new(f64::NAN, 0.0, 100.0, 100.0, 0.0).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates() {
        let region: Region =
            serde_json::from_str(r#"{ "x0": 0, "y0": 0, "width": 300, "height": 200 }"#).unwrap();
        assert_eq!(region.gap(), DEFAULT_GAP);
        assert_eq!(region.plot_width(), 240.0);

        let bad = r#"{ "x0": 0, "y0": 0, "width": 40, "height": 200, "gap": 30 }"#;
        assert!(serde_json::from_str::<Region>(bad).is_err());
    }

    #[test]
    fn test_visible_axes() {
        let region = Region::sized(300.0, 300.0).unwrap();
        assert_eq!(region.visible_axes(Point::new(150.0, 150.0)), (true, true));
        assert_eq!(region.visible_axes(Point::new(10.0, 150.0)), (false, true));
        assert_eq!(region.visible_axes(Point::new(150.0, 290.0)), (true, false));
    }

    #[test]
    fn test_resized_keeps_origin_and_gap() {
        let region = Region::new(5.0, 5.0, 100.0, 100.0, 10.0).unwrap();
        let bigger = region.resized(200.0, 120.0).unwrap();
        assert_eq!(bigger.x0(), 5.0);
        assert_eq!(bigger.gap(), 10.0);
        assert_eq!(bigger.plot_width(), 180.0);
    }
}
