// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use thiserror::Error;

/// Error returned when constructing a [`Tolerance`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeomError {
    /// Radius must be finite and strictly positive.
    #[error("invalid tolerance radius: {0} px")]
    InvalidRadius(f64),
    /// View scale must be finite and strictly positive.
    #[error("invalid view scale: {0} deg/px")]
    InvalidScale(f64),
}

/// Screen-space tolerance: a pixel radius evaluated at the current view scale.
///
/// Every "same point" decision in the editor is expressed in pixels; the
/// geographic epsilon is derived as `radius_px * degrees_per_px`, so the same
/// radius means the same visual distance at any zoom.
///
/// Invariant: both factors are finite and `> 0`, so [`Tolerance::epsilon`] is
/// never zero.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tolerance {
    radius_px: f64,
    degrees_per_px: f64,
}

impl Tolerance {
    /// Scale used before any view reports its own (10 px ≈ 0.0001°).
    pub const DEFAULT_DEGREES_PER_PX: f64 = 1.0e-5;

    /// Creates a tolerance of `radius_px` at `degrees_per_px`.
    pub fn screen(radius_px: f64, degrees_per_px: f64) -> Result<Self, GeomError> {
        if !radius_px.is_finite() || radius_px <= 0.0 {
            return Err(GeomError::InvalidRadius(radius_px));
        }
        if !degrees_per_px.is_finite() || degrees_per_px <= 0.0 {
            return Err(GeomError::InvalidScale(degrees_per_px));
        }
        Ok(Self {
            radius_px,
            degrees_per_px,
        })
    }

    /// Creates a tolerance of `radius_px` at [`Self::DEFAULT_DEGREES_PER_PX`].
    pub fn from_px(radius_px: f64) -> Result<Self, GeomError> {
        Self::screen(radius_px, Self::DEFAULT_DEGREES_PER_PX)
    }

    /// Same radius re-evaluated at a new view scale.
    pub fn at_scale(self, degrees_per_px: f64) -> Result<Self, GeomError> {
        Self::screen(self.radius_px, degrees_per_px)
    }

    /// Same scale with a different pixel radius.
    pub fn with_radius(self, radius_px: f64) -> Result<Self, GeomError> {
        Self::screen(radius_px, self.degrees_per_px)
    }

    /// Pixel radius.
    #[must_use]
    pub fn radius_px(&self) -> f64 {
        self.radius_px
    }

    /// View scale in degrees per pixel.
    #[must_use]
    pub fn degrees_per_px(&self) -> f64 {
        self.degrees_per_px
    }

    /// Geographic epsilon in degrees.
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.radius_px * self.degrees_per_px
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            radius_px: 10.0,
            degrees_per_px: Self::DEFAULT_DEGREES_PER_PX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_nan_are_rejected() {
        assert_eq!(Tolerance::from_px(0.0), Err(GeomError::InvalidRadius(0.0)));
        assert!(Tolerance::from_px(f64::NAN).is_err());
        assert_eq!(
            Tolerance::screen(10.0, -1.0),
            Err(GeomError::InvalidScale(-1.0))
        );
    }

    #[test]
    fn default_matches_geo_epsilon() {
        let t = Tolerance::default();
        assert!((t.epsilon() - 1.0e-4).abs() < 1e-15);
    }

    #[test]
    fn rescaling_keeps_pixel_radius() {
        let t = Tolerance::from_px(15.0).and_then(|t| t.at_scale(2.0e-5));
        let t = t.unwrap();
        assert_eq!(t.radius_px(), 15.0);
        assert!((t.epsilon() - 3.0e-4).abs() < 1e-15);
    }
}
