// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Derived views over segments: named polylines and junctions.

use std::collections::{BTreeMap, BTreeSet};

use pipenet_geom::{is_same, Point};

use crate::ident::{PointRef, SegmentId};
use crate::model::NetworkModel;
use crate::record::Segment;

/// Segments sharing a name, chained end to start.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    /// Shared `Имя`.
    pub name: String,
    /// Member segments in chain order.
    pub segments: Vec<SegmentId>,
    /// Chained vertices; joints appear once.
    pub vertices: Vec<Point>,
}

/// A point where three or more segment vertices coincide.
#[derive(Debug, Clone, PartialEq)]
pub struct Junction {
    /// Position of the first vertex found there.
    pub at: Point,
    /// Coincident vertices.
    pub members: Vec<(SegmentId, usize)>,
}

impl Junction {
    /// Number of coincident vertices.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.members.len()
    }
}

/// Reassembles drawn lines from their segments.
///
/// Segments are grouped by name and chained in id order: a chain grows at its
/// tail with the first remaining segment whose start coincides with the tail,
/// and at its head with one whose end coincides with the head. Segments that
/// do not connect start new chains of the same name.
#[must_use]
pub fn polylines(model: &NetworkModel) -> Vec<Polyline> {
    let tol = model.tolerance();
    let mut groups: BTreeMap<String, Vec<SegmentId>> = BTreeMap::new();
    for s in model.segments() {
        groups.entry(s.name().into_owned()).or_default().push(s.id);
    }

    let mut out = Vec::new();
    for (name, ids) in groups {
        let mut remaining: Vec<&Segment> =
            ids.iter().filter_map(|id| model.segment(*id)).collect();
        while !remaining.is_empty() {
            let first = remaining.remove(0);
            let mut segments = vec![first.id];
            let mut vertices = first.vertices.clone();
            loop {
                let tail = vertices.last().copied();
                let head = vertices.first().copied();
                let next = remaining.iter().position(|s| match (s.start(), tail) {
                    (Some(a), Some(b)) => is_same(a, b, tol),
                    _ => false,
                });
                if let Some(i) = next {
                    let s = remaining.remove(i);
                    segments.push(s.id);
                    vertices.extend(s.vertices.iter().skip(1).copied());
                    continue;
                }
                let prev = remaining.iter().position(|s| match (s.end(), head) {
                    (Some(a), Some(b)) => is_same(a, b, tol),
                    _ => false,
                });
                if let Some(i) = prev {
                    let s = remaining.remove(i);
                    segments.insert(0, s.id);
                    let mut joined: Vec<Point> =
                        s.vertices[..s.vertices.len().saturating_sub(1)].to_vec();
                    joined.extend(vertices);
                    vertices = joined;
                    continue;
                }
                break;
            }
            out.push(Polyline {
                name: name.clone(),
                segments,
                vertices,
            });
        }
    }
    out
}

/// Every point where at least three segment vertices coincide, in
/// enumeration order of the first member.
#[must_use]
pub fn junctions(model: &NetworkModel) -> Vec<Junction> {
    let tol = model.tolerance();
    let mut visited: BTreeSet<(SegmentId, usize)> = BTreeSet::new();
    let mut out = Vec::new();
    for s in model.segments() {
        for (index, p) in s.vertices.iter().enumerate() {
            if visited.contains(&(s.id, index)) {
                continue;
            }
            let members: Vec<(SegmentId, usize)> = model
                .index
                .query(*p, tol)
                .into_iter()
                .filter_map(|(r, _)| match r {
                    PointRef::Vertex { segment, index } => Some((segment, index)),
                    PointRef::Node(_) => None,
                })
                .filter(|m| !visited.contains(m))
                .collect();
            visited.extend(members.iter().copied());
            if members.len() >= 3 {
                out.push(Junction { at: *p, members });
            }
        }
    }
    out
}
