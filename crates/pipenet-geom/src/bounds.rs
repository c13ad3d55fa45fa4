// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::point::Point;

/// Axis-aligned geographic bounds (west/south .. east/north).
///
/// Invariants:
/// - `min` components are less than or equal to `max` components.
/// - Containment is inclusive on the edges.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoBounds {
    min: Point,
    max: Point,
}

impl GeoBounds {
    /// Builds bounds from two opposite corners in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// South-west corner.
    #[must_use]
    pub fn min(&self) -> Point {
        self.min
    }

    /// North-east corner.
    #[must_use]
    pub fn max(&self) -> Point {
        self.max
    }

    /// Returns `true` if `p` lies inside (edges included).
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Inflates the bounds by a uniform margin `m` in all directions.
    #[must_use]
    pub fn inflate(&self, m: f64) -> Self {
        Self::from_corners(
            Point::new(self.min.x - m, self.min.y - m),
            Point::new(self.max.x + m, self.max.y + m),
        )
    }

    /// Minimal bounds containing every point, or `None` for an empty input.
    #[must_use]
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut it = points.into_iter();
        let first = it.next()?;
        Some(it.fold(Self::from_corners(first, first), |acc, p| Self {
            min: Point::new(acc.min.x.min(p.x), acc.min.y.min(p.y)),
            max: Point::new(acc.max.x.max(p.x), acc.max.y.max(p.y)),
        }))
    }
}
