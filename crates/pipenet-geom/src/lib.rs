// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Geometry primitives for pipenet.

This crate provides:
- Geographic points and translation deltas (`Point`, `Delta`).
- Axis-aligned geographic bounds (`GeoBounds`) used for the visible map extent.
- Screen-space tolerance (`Tolerance`) converted to degrees through the view scale.
- Coincidence matching (`is_same`, `find_nearest`) and a grid spatial index.

Design notes:
- Exact float equality is never used to decide connectivity; everything goes
  through a strictly positive tolerance.
- First-match semantics: ties resolve by enumeration order, not by distance,
  so answers are deterministic and reproducible.
"]

/// Axis-aligned geographic bounds.
pub mod bounds;
/// Grid spatial index keyed by rounded coordinates.
pub mod index;
/// Coincidence predicates over points and candidate sets.
pub mod matcher;
/// Points and deltas in geographic degrees.
pub mod point;
/// Screen-space tolerance policy.
pub mod tolerance;

pub use bounds::GeoBounds;
pub use index::SpatialIndex;
pub use matcher::{find_nearest, is_same, Positioned};
pub use point::{Delta, Point};
pub use tolerance::{GeomError, Tolerance};
