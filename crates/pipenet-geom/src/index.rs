// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use std::collections::{BTreeMap, BTreeSet};

use crate::matcher::is_same;
use crate::point::Point;
use crate::tolerance::Tolerance;

type Cell = (i64, i64);

/// Uniform grid over geographic coordinates with tolerance-bucketed lookup.
///
/// Keys are ordered; every query answer is sorted by key, so the "first"
/// match equals what a linear scan over the keys in ascending order would
/// return. Callers pick a key ordering that encodes their enumeration order.
///
/// The cell size tracks the tolerance epsilon, which keeps a lookup to the
/// 3×3 neighbourhood of the query cell when the query uses the same
/// tolerance. Larger query tolerances widen the scanned window accordingly.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialIndex<K: Ord> {
    cell: f64,
    points: BTreeMap<K, Point>,
    cells: BTreeMap<Cell, BTreeSet<K>>,
}

impl<K: Ord + Copy> SpatialIndex<K> {
    /// Empty index with cells sized to `tolerance.epsilon()`.
    #[must_use]
    pub fn new(tolerance: Tolerance) -> Self {
        Self {
            cell: tolerance.epsilon(),
            points: BTreeMap::new(),
            cells: BTreeMap::new(),
        }
    }

    /// Number of indexed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Current position recorded for `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<Point> {
        self.points.get(key).copied()
    }

    /// All entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (K, Point)> + '_ {
        self.points.iter().map(|(k, p)| (*k, *p))
    }

    /// Inserts or moves `key` to `p`.
    pub fn upsert(&mut self, key: K, p: Point) {
        if let Some(old) = self.points.insert(key, p) {
            self.detach(key, old);
        }
        let cell = self.cell_of(p);
        self.cells.entry(cell).or_default().insert(key);
    }

    /// Removes `key`; returns its last position.
    pub fn remove(&mut self, key: &K) -> Option<Point> {
        let old = self.points.remove(key)?;
        self.detach(*key, old);
        Some(old)
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.points.clear();
        self.cells.clear();
    }

    /// Rebuckets all entries for a new tolerance (zoom change).
    pub fn retune(&mut self, tolerance: Tolerance) {
        if tolerance.epsilon() == self.cell {
            return;
        }
        self.cell = tolerance.epsilon();
        self.cells.clear();
        let entries: Vec<(K, Point)> = self.iter().collect();
        for (k, p) in entries {
            let cell = self.cell_of(p);
            self.cells.entry(cell).or_default().insert(k);
        }
    }

    /// Every entry within tolerance of `p`, sorted by key.
    #[must_use]
    pub fn query(&self, p: Point, tolerance: Tolerance) -> Vec<(K, Point)> {
        let eps = tolerance.epsilon();
        let (x0, y0) = self.cell_of(Point::new(p.x - eps, p.y - eps));
        let (x1, y1) = self.cell_of(Point::new(p.x + eps, p.y + eps));
        let mut out = Vec::new();
        for cx in x0..=x1 {
            for (_, keys) in self.cells.range((cx, y0)..=(cx, y1)) {
                for k in keys {
                    if let Some(q) = self.points.get(k) {
                        if is_same(p, *q, tolerance) {
                            out.push((*k, *q));
                        }
                    }
                }
            }
        }
        out.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// Lowest-keyed entry within tolerance of `p`.
    #[must_use]
    pub fn first(&self, p: Point, tolerance: Tolerance) -> Option<(K, Point)> {
        self.query(p, tolerance).into_iter().next()
    }

    fn detach(&mut self, key: K, at: Point) {
        let cell = self.cell_of(at);
        if let Some(keys) = self.cells.get_mut(&cell) {
            keys.remove(&key);
            if keys.is_empty() {
                self.cells.remove(&cell);
            }
        }
    }

    fn cell_of(&self, p: Point) -> Cell {
        ((p.x / self.cell).floor() as i64, (p.y / self.cell).floor() as i64)
    }
}
