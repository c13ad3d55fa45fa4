// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Coincidence-driven topology edits.

use pipenet_core::{ChangeKind, EditError, NetworkModel, NodeKind, ObjectKey};
use pipenet_geom::{Delta, Point, Tolerance};
use proptest::prelude::*;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn moving_a_well_drags_the_pipe_end() {
    let mut m = NetworkModel::default();
    let w1 = m.add_node(NodeKind::Well, p(0.0, 0.0)).key;
    let ids = m.add_pipe(&[p(0.0, 0.0), p(1.0, 1.0)], 110.0, "Труба #0").unwrap();
    m.clear_created();

    m.move_node(w1, p(5.0, 5.0));

    let seg = m.segment(ids[0]).unwrap();
    assert_eq!(seg.vertices[0], p(5.0, 5.0));
    assert_eq!(seg.vertices[1], p(1.0, 1.0));
    assert_eq!(m.node(w1).unwrap().position, p(5.0, 5.0));
    let updated: Vec<ObjectKey> = m.updated().into_iter().map(|e| e.key).collect();
    assert_eq!(updated, vec![ObjectKey::Node(w1), ObjectKey::Segment(ids[0])]);
}

#[test]
fn move_node_leaves_other_nodes_at_the_spot() {
    let mut m = NetworkModel::default();
    let a = m.add_node(NodeKind::Well, p(0.0, 0.0)).key;
    let b = m.add_node(NodeKind::Pump, p(0.0, 0.0)).key;
    m.move_node(a, p(1.0, 0.0));
    assert_eq!(m.node(b).unwrap().position, p(0.0, 0.0));
}

#[test]
fn add_pipe_of_four_vertices_shares_interior_vertices() {
    let mut m = NetworkModel::default();
    let v = [p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(3.0, 0.0)];
    let ids = m.add_pipe(&v, 63.0, "Труба #0").unwrap();
    assert_eq!(ids.len(), 3);
    for id in &ids {
        let s = m.segment(*id).unwrap();
        assert_eq!(s.vertices.len(), 2);
        assert_eq!(s.diameter, 63.0);
    }
    assert_eq!(m.vertices_at(v[1]).len(), 2);
    assert_eq!(m.vertices_at(v[2]).len(), 2);
    assert_eq!(m.vertices_at(v[0]).len(), 1);
}

#[test]
fn snap_within_tolerance_and_not_beyond() {
    let mut m = NetworkModel::default();
    m.add_pipe(&[p(37.0, 55.0), p(37.1, 55.0)], 50.0, "a").unwrap();
    let tol = Tolerance::default();
    let eps = tol.epsilon();
    assert_eq!(m.snap(p(37.0 + eps * 0.5, 55.0), tol), Some(p(37.0, 55.0)));
    assert_eq!(m.snap(p(37.0 + eps * 2.0, 55.0), tol), None);
}

#[test]
fn vertex_move_rewrites_every_coincident_vertex() {
    let mut m = NetworkModel::default();
    let joint = p(1.0, 1.0);
    m.add_pipe(&[p(0.0, 0.0), joint, p(2.0, 0.0)], 50.0, "a").unwrap();
    m.add_pipe(&[joint, p(1.0, 2.0)], 50.0, "b").unwrap();
    m.clear_created();
    let touched = m.move_vertex(joint, p(1.5, 1.5));
    assert_eq!(touched, vec![0, 1, 2]);
    assert!(m.vertices_at(joint).is_empty());
    assert_eq!(m.vertices_at(p(1.5, 1.5)).len(), 3);
    assert_eq!(m.changes().count(ChangeKind::Updated), 3);
}

#[test]
fn segment_run_carries_nodes_and_neighbours_once() {
    let mut m = NetworkModel::default();
    let pump = m.add_node(NodeKind::Pump, p(1.0, 0.0)).key;
    m.add_pipe(&[p(0.0, 0.0), p(1.0, 0.0)], 50.0, "a").unwrap();
    m.add_pipe(&[p(1.0, 0.0), p(2.0, 0.0)], 50.0, "b").unwrap();

    m.move_segment_run(0, 0, 1, Delta::new(0.0, 1.0)).unwrap();

    assert_eq!(m.segment(0).unwrap().vertices, vec![p(0.0, 1.0), p(1.0, 1.0)]);
    assert_eq!(m.segment(1).unwrap().vertices, vec![p(1.0, 1.0), p(2.0, 0.0)]);
    assert_eq!(m.node(pump).unwrap().position, p(1.0, 1.0));
}

#[test]
fn bad_segment_range_is_rejected_without_mutation() {
    let mut m = NetworkModel::default();
    m.add_pipe(&[p(0.0, 0.0), p(1.0, 0.0)], 50.0, "a").unwrap();
    let before = m.clone();
    let err = m.move_segment_run(0, 1, 2, Delta::new(1.0, 1.0));
    assert_eq!(
        err,
        Err(EditError::InvalidSegmentIndices {
            segment: 0,
            from: 1,
            to: 2,
            len: 2
        })
    );
    assert!(m.move_segment_run(0, 1, 0, Delta::new(1.0, 1.0)).is_err());
    assert_eq!(m, before);
}

#[test]
fn lookup_misses_are_silent() {
    let mut m = NetworkModel::default();
    let before = m.clone();
    m.move_node(pipenet_core::NodeKey::new(NodeKind::Tower, 7), p(1.0, 1.0));
    assert!(m.move_vertex(p(0.0, 0.0), p(1.0, 1.0)).is_empty());
    assert_eq!(m.move_segment_run(9, 0, 1, Delta::new(1.0, 0.0)), Ok(()));
    assert!(m.delete_segment(9).is_none());
    m.set_visible(ObjectKey::Segment(9), false);
    assert_eq!(m.set_diameter(9, 20.0), Ok(()));
    assert_eq!(m, before);
}

fn grid_point() -> impl Strategy<Value = Point> {
    (0_i32..6, 0_i32..6).prop_map(|(x, y)| p(f64::from(x), f64::from(y)))
}

proptest! {
    #[test]
    fn move_node_moves_exactly_the_coincident_vertices(
        pipes in prop::collection::vec(prop::collection::vec(grid_point(), 2..5), 1..6),
        anchor in grid_point(),
        dest in grid_point(),
    ) {
        let mut m = NetworkModel::default();
        for (i, v) in pipes.iter().enumerate() {
            m.add_pipe(v, 50.0, &format!("p{i}")).unwrap();
        }
        let key = m.add_node(NodeKind::Well, anchor).key;
        let before: Vec<_> = m.segments().cloned().collect();
        let tol = m.tolerance();

        m.move_node(key, dest);

        for old in &before {
            let new = m.segment(old.id).unwrap();
            for (a, b) in old.vertices.iter().zip(&new.vertices) {
                if pipenet_geom::is_same(*a, anchor, tol) {
                    prop_assert_eq!(*b, dest);
                } else {
                    prop_assert_eq!(*b, *a);
                }
            }
        }
    }
}
