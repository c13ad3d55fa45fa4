// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::point::Point;
use crate::tolerance::Tolerance;

/// Anything with a single geographic anchor.
pub trait Positioned {
    /// Anchor coordinate used for coincidence checks.
    fn position(&self) -> Point;
}

impl Positioned for Point {
    fn position(&self) -> Point {
        *self
    }
}

impl<T: Positioned + ?Sized> Positioned for &T {
    fn position(&self) -> Point {
        (**self).position()
    }
}

impl<K> Positioned for (K, Point) {
    fn position(&self) -> Point {
        self.1
    }
}

/// Returns `true` when `a` and `b` are closer than the tolerance (strict).
#[must_use]
pub fn is_same(a: Point, b: Point, tolerance: Tolerance) -> bool {
    a.distance(b) < tolerance.epsilon()
}

/// First candidate (in enumeration order) within tolerance of `point`.
///
/// Ties are not resolved by distance: a closer candidate later in the
/// sequence never beats an earlier match.
pub fn find_nearest<T, I>(point: Point, candidates: I, tolerance: Tolerance) -> Option<T>
where
    I: IntoIterator<Item = T>,
    T: Positioned,
{
    candidates
        .into_iter()
        .find(|c| is_same(point, c.position(), tolerance))
}
