// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;

/// Geographic coordinate `(x, y)` = `(longitude, latitude)` in degrees.
///
/// The wire format orders coordinates as `[x, y]`, so `x` is always the
/// longitude.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point {
    /// Longitude in degrees.
    pub x: f64,
    /// Latitude in degrees.
    pub y: f64,
}

/// Translation between two points, in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Delta {
    /// Longitude offset.
    pub dx: f64,
    /// Latitude offset.
    pub dy: f64,
}

impl Point {
    /// Creates a point from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in degrees.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Returns this point moved by `delta`.
    #[must_use]
    pub fn translated(self, delta: Delta) -> Self {
        Self::new(self.x + delta.dx, self.y + delta.dy)
    }

    /// Delta that carries `self` onto `to`.
    #[must_use]
    pub fn delta_to(self, to: Self) -> Delta {
        Delta::new(to.x - self.x, to.y - self.y)
    }

    /// Midpoint of the segment `self`–`other`.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Returns `true` when both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Coordinates as `[x, y]`.
    #[must_use]
    pub const fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Distance from `self` to the closed segment `a`–`b`.
    #[must_use]
    pub fn distance_to_segment(self, a: Self, b: Self) -> f64 {
        let ab = a.delta_to(b);
        let len2 = ab.dx * ab.dx + ab.dy * ab.dy;
        if len2 == 0.0 {
            return self.distance(a);
        }
        let ap = a.delta_to(self);
        let t = ((ap.dx * ab.dx + ap.dy * ab.dy) / len2).clamp(0.0, 1.0);
        self.distance(Self::new(a.x + t * ab.dx, a.y + t * ab.dy))
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        p.to_array()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl Delta {
    /// Creates a delta.
    #[must_use]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// `true` when the delta moves nothing.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}
