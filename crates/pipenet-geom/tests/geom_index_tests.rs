// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Integration tests for the grid index against the linear first-match rule.

use pipenet_geom::{find_nearest, Point, SpatialIndex, Tolerance};
use proptest::prelude::*;

fn clustered_point() -> impl Strategy<Value = Point> {
    // Tight cluster so many points land within a tolerance of each other.
    (-20_i32..20, -20_i32..20).prop_map(|(x, y)| {
        Point::new(37.0 + f64::from(x) * 2.5e-5, 55.0 + f64::from(y) * 2.5e-5)
    })
}

proptest! {
    #[test]
    fn index_first_equals_linear_scan(
        points in prop::collection::vec(clustered_point(), 1..64),
        probe in clustered_point(),
    ) {
        let tol = Tolerance::default();
        let mut idx = SpatialIndex::new(tol);
        for (i, p) in points.iter().enumerate() {
            idx.upsert(i, *p);
        }
        let linear = find_nearest(probe, points.iter().copied().enumerate(), tol);
        prop_assert_eq!(idx.first(probe, tol), linear);
    }

    #[test]
    fn wider_query_tolerance_is_served(
        points in prop::collection::vec(clustered_point(), 1..32),
        probe in clustered_point(),
    ) {
        let tol = Tolerance::default();
        let wide = tol.with_radius(35.0).unwrap();
        let mut idx = SpatialIndex::new(tol);
        for (i, p) in points.iter().enumerate() {
            idx.upsert(i, *p);
        }
        let linear: Vec<_> = points
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, p)| p.distance(probe) < wide.epsilon())
            .collect();
        prop_assert_eq!(idx.query(probe, wide), linear);
    }
}

#[test]
fn snap_within_radius_and_not_at_twice_radius() {
    let snap = Tolerance::from_px(15.0).unwrap();
    let vertex = Point::new(37.61, 55.75);
    let mut idx = SpatialIndex::new(snap);
    idx.upsert(0_u8, vertex);

    let near = Point::new(vertex.x + snap.epsilon() * 0.6, vertex.y);
    let far = Point::new(vertex.x + snap.epsilon() * 2.0, vertex.y);
    assert_eq!(idx.first(near, snap), Some((0, vertex)));
    assert_eq!(idx.first(far, snap), None);
    assert_eq!(find_nearest(far, [vertex], snap), None);
}
