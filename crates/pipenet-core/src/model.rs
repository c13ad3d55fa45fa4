// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The network model: nodes, segments, coincidence index and change tracker.
//!
//! Connectivity is implicit. Two objects are connected when a node anchor or
//! segment vertex lies within the model tolerance of another; every topology
//! operation rediscovers those relations through the spatial index at the
//! time it runs. Nothing stores a link, so nothing can dangle.

use std::collections::{BTreeMap, BTreeSet};

use pipenet_geom::{Delta, GeoBounds, GeomError, Point, SpatialIndex, Tolerance};
use pipenet_proto::{ObjectType, Properties, PROP_DIAMETER, PROP_NAME};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::changes::{ChangeKind, ChangeTracker, Pending, Revision};
use crate::error::EditError;
use crate::ident::{NodeId, NodeKey, NodeKind, ObjectKey, PointRef, SegmentId};
use crate::record::{default_pipe_name, Node, Segment};

/// Copy of an object's state taken when a change set is composed.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    /// Node state.
    Node(Node),
    /// Segment state.
    Segment(Segment),
}

/// One pending object, as handed to the sync layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEntry {
    /// Set the object is in.
    pub kind: ChangeKind,
    /// Object identity.
    pub key: ObjectKey,
    /// Revision at composition time.
    pub revision: Revision,
    /// Current state; `None` for tombstones.
    pub data: Option<Snapshot>,
}

impl ChangeEntry {
    /// Wire tag.
    #[must_use]
    pub fn object_type(&self) -> ObjectType {
        self.key.object_type()
    }

    /// Acknowledgement handle for this entry.
    #[must_use]
    pub fn pending(&self) -> Pending {
        Pending {
            key: self.key,
            revision: self.revision,
        }
    }
}

/// What lies under a pointer, in priority order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    /// A node anchor.
    Node(NodeKey),
    /// A segment vertex (all coincident vertices share this position).
    Vertex(Point),
    /// The interior of one segment edge.
    SegmentBody {
        /// Segment hit.
        segment: SegmentId,
        /// Edge start vertex index.
        from: usize,
        /// Edge end vertex index.
        to: usize,
    },
}

/// Point-objects and pipe segments with implicit coincidence topology.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkModel {
    pub(crate) nodes: BTreeMap<NodeKey, Node>,
    pub(crate) segments: BTreeMap<SegmentId, Segment>,
    pub(crate) next_node: BTreeMap<NodeKind, NodeId>,
    pub(crate) next_segment: SegmentId,
    pub(crate) index: SpatialIndex<PointRef>,
    tolerance: Tolerance,
    pub(crate) changes: ChangeTracker,
}

impl Default for NetworkModel {
    fn default() -> Self {
        Self::new(Tolerance::default())
    }
}

impl NetworkModel {
    /// Empty model matching coincidence at `tolerance`.
    #[must_use]
    pub fn new(tolerance: Tolerance) -> Self {
        Self {
            nodes: BTreeMap::new(),
            segments: BTreeMap::new(),
            next_node: BTreeMap::new(),
            next_segment: 0,
            index: SpatialIndex::new(tolerance),
            tolerance,
            changes: ChangeTracker::new(),
        }
    }

    /// Coincidence tolerance.
    #[must_use]
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Replaces the coincidence tolerance and rebuckets the index.
    pub fn set_tolerance(&mut self, tolerance: Tolerance) {
        self.tolerance = tolerance;
        self.index.retune(tolerance);
    }

    /// Re-evaluates the pixel tolerance at a new view scale.
    pub fn set_view_scale(&mut self, degrees_per_px: f64) -> Result<(), GeomError> {
        let t = self.tolerance.at_scale(degrees_per_px)?;
        self.set_tolerance(t);
        Ok(())
    }

    // ── lookups ────────────────────────────────────────────────────────────

    /// Node by key.
    #[must_use]
    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(&key)
    }

    /// Segment by id.
    #[must_use]
    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(&id)
    }

    /// All nodes in enumeration order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// Nodes of one kind.
    pub fn nodes_of(&self, kind: NodeKind) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values().filter(move |n| n.key.kind == kind)
    }

    /// All segments in id order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.values()
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// `true` when the model holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.segments.is_empty()
    }

    /// Id the next created segment will get.
    #[must_use]
    pub fn next_segment_id(&self) -> SegmentId {
        self.next_segment
    }

    /// Id the next created node of `kind` will get.
    #[must_use]
    pub fn next_node_id(&self, kind: NodeKind) -> NodeId {
        self.next_node.get(&kind).copied().unwrap_or(0)
    }

    /// Name the next drawn pipe gets when none is supplied.
    #[must_use]
    pub fn default_pipe_name(&self) -> String {
        default_pipe_name(self.next_segment)
    }

    /// Extent of every indexed coordinate.
    #[must_use]
    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::from_points(self.index.iter().map(|(_, p)| p))
    }

    /// First indexed coordinate within `tolerance` of `p`, nodes before
    /// vertices.
    #[must_use]
    pub fn nearest_ref(&self, p: Point, tolerance: Tolerance) -> Option<(PointRef, Point)> {
        self.index.first(p, tolerance)
    }

    /// Position `p` snaps to under `tolerance`, if any.
    #[must_use]
    pub fn snap(&self, p: Point, tolerance: Tolerance) -> Option<Point> {
        self.nearest_ref(p, tolerance).map(|(_, q)| q)
    }

    /// Every segment vertex coincident with `p`.
    #[must_use]
    pub fn vertices_at(&self, p: Point) -> Vec<(SegmentId, usize)> {
        self.index
            .query(p, self.tolerance)
            .into_iter()
            .filter_map(|(r, _)| match r {
                PointRef::Vertex { segment, index } => Some((segment, index)),
                PointRef::Node(_) => None,
            })
            .collect()
    }

    /// Visible object under `p`: node, then vertex, then segment body.
    #[must_use]
    pub fn hit_test(&self, p: Point) -> Option<Hit> {
        let eps = self.tolerance.epsilon();
        let visible = |r: &PointRef| match r {
            PointRef::Node(k) => self.nodes.get(k).is_some_and(|n| n.visible),
            PointRef::Vertex { segment, .. } => {
                self.segments.get(segment).is_some_and(|s| s.visible)
            }
        };
        let hits = self.index.query(p, self.tolerance);
        if let Some((r, q)) = hits.into_iter().find(|(r, _)| visible(r)) {
            return Some(match r {
                PointRef::Node(k) => Hit::Node(k),
                PointRef::Vertex { .. } => Hit::Vertex(q),
            });
        }
        self.segments
            .values()
            .filter(|s| s.visible)
            .find_map(|s| {
                s.edges()
                    .position(|(a, b)| p.distance_to_segment(a, b) < eps)
                    .map(|from| Hit::SegmentBody {
                        segment: s.id,
                        from,
                        to: from + 1,
                    })
            })
    }

    // ── creation ───────────────────────────────────────────────────────────

    fn allocate_node(&mut self, kind: NodeKind) -> NodeKey {
        let slot = self.next_node.entry(kind).or_insert(0);
        let id = *slot;
        *slot += 1;
        NodeKey::new(kind, id)
    }

    /// Creates a node at `position`.
    pub fn add_node(&mut self, kind: NodeKind, position: Point) -> &Node {
        self.add_node_with(kind, position, Properties::new())
    }

    /// Creates a node carrying an initial property bag.
    pub fn add_node_with(
        &mut self,
        kind: NodeKind,
        position: Point,
        properties: Properties,
    ) -> &Node {
        let key = self.allocate_node(kind);
        self.index.upsert(PointRef::Node(key), position);
        self.changes.record_created(ObjectKey::Node(key));
        debug!(%key, %position, "node created");
        self.nodes.entry(key).or_insert(Node {
            key,
            position,
            visible: true,
            properties,
        })
    }

    /// Splits a drawn polyline into two-vertex segments sharing `name` and
    /// `diameter`. Fewer than two vertices create nothing.
    pub fn add_pipe(
        &mut self,
        vertices: &[Point],
        diameter: f64,
        name: &str,
    ) -> Result<Vec<SegmentId>, EditError> {
        check_diameter(diameter)?;
        let mut ids = Vec::with_capacity(vertices.len().saturating_sub(1));
        for w in vertices.windows(2) {
            let id = self.next_segment;
            self.next_segment += 1;
            let mut properties = Properties::new();
            properties.insert(PROP_NAME.to_owned(), Value::from(name));
            properties.insert(PROP_DIAMETER.to_owned(), Value::from(diameter));
            self.insert_segment(Segment {
                id,
                vertices: vec![w[0], w[1]],
                diameter,
                visible: true,
                properties,
            });
            self.changes.record_created(ObjectKey::Segment(id));
            ids.push(id);
        }
        debug!(name, segments = ids.len(), "pipe created");
        Ok(ids)
    }

    pub(crate) fn insert_segment(&mut self, segment: Segment) {
        for (index, p) in segment.vertices.iter().enumerate() {
            self.index.upsert(
                PointRef::Vertex {
                    segment: segment.id,
                    index,
                },
                *p,
            );
        }
        self.segments.insert(segment.id, segment);
    }

    pub(crate) fn insert_node(&mut self, node: Node) {
        self.index.upsert(PointRef::Node(node.key), node.position);
        self.nodes.insert(node.key, node);
    }

    // ── movement ───────────────────────────────────────────────────────────

    // Writes `p` into the referenced coordinate; returns the owning object.
    fn place(&mut self, r: PointRef, p: Point) -> Option<ObjectKey> {
        let owner = match r {
            PointRef::Node(k) => {
                self.nodes.get_mut(&k)?.position = p;
                ObjectKey::Node(k)
            }
            PointRef::Vertex { segment, index } => {
                let v = self.segments.get_mut(&segment)?.vertices.get_mut(index)?;
                *v = p;
                ObjectKey::Segment(segment)
            }
        };
        self.index.upsert(r, p);
        Some(owner)
    }

    fn touch_all(&mut self, touched: BTreeSet<ObjectKey>) {
        for k in touched {
            self.changes.record_updated(k);
        }
    }

    /// Moves a node; every segment vertex coincident with its old position
    /// follows. Other nodes at that position stay put.
    pub fn move_node(&mut self, key: NodeKey, to: Point) {
        let Some(from) = self.nodes.get(&key).map(|n| n.position) else {
            return;
        };
        if from == to {
            return;
        }
        let riders: Vec<PointRef> = self
            .index
            .query(from, self.tolerance)
            .into_iter()
            .map(|(r, _)| r)
            .filter(|r| matches!(r, PointRef::Vertex { .. }))
            .collect();
        let mut touched = BTreeSet::new();
        touched.extend(self.place(PointRef::Node(key), to));
        for r in riders {
            touched.extend(self.place(r, to));
        }
        debug!(%key, %from, %to, followers = touched.len() - 1, "node moved");
        self.touch_all(touched);
    }

    /// Moves every segment vertex coincident with `from` to `to`; returns the
    /// segments touched. Nodes are not moved.
    pub fn move_vertex(&mut self, from: Point, to: Point) -> Vec<SegmentId> {
        if from == to {
            return Vec::new();
        }
        let hits: Vec<PointRef> = self
            .index
            .query(from, self.tolerance)
            .into_iter()
            .map(|(r, _)| r)
            .filter(|r| matches!(r, PointRef::Vertex { .. }))
            .collect();
        let mut touched = BTreeSet::new();
        for r in hits {
            touched.extend(self.place(r, to));
        }
        let ids = touched
            .iter()
            .filter_map(|k| match k {
                ObjectKey::Segment(id) => Some(*id),
                ObjectKey::Node(_) => None,
            })
            .collect();
        debug!(%from, %to, segments = touched.len(), "vertex moved");
        self.touch_all(touched);
        ids
    }

    /// Translates vertices `from..=to` of segment `id` by `delta`, together
    /// with every node and foreign vertex coincident with them. Each affected
    /// coordinate moves exactly once.
    #[instrument(level = "debug", skip(self))]
    pub fn move_segment_run(
        &mut self,
        id: SegmentId,
        from: usize,
        to: usize,
        delta: Delta,
    ) -> Result<(), EditError> {
        let Some(seg) = self.segments.get(&id) else {
            return Ok(());
        };
        let len = seg.vertices.len();
        if from > to || to >= len {
            let err = EditError::InvalidSegmentIndices {
                segment: id,
                from,
                to,
                len,
            };
            warn!(%err, "segment move rejected");
            return Err(err);
        }
        if delta.is_zero() {
            return Ok(());
        }
        let run: Vec<Point> = seg.vertices[from..=to].to_vec();
        let mut affected: BTreeMap<PointRef, Point> = BTreeMap::new();
        for (offset, p) in run.into_iter().enumerate() {
            affected.insert(
                PointRef::Vertex {
                    segment: id,
                    index: from + offset,
                },
                p,
            );
            for (r, q) in self.index.query(p, self.tolerance) {
                affected.entry(r).or_insert(q);
            }
        }
        let mut touched = BTreeSet::new();
        for (r, p) in affected {
            touched.extend(self.place(r, p.translated(delta)));
        }
        self.touch_all(touched);
        Ok(())
    }

    // ── removal ────────────────────────────────────────────────────────────

    /// Removes a node. Coincident segments are left in place.
    pub fn delete_node(&mut self, key: NodeKey) -> Option<Node> {
        let node = self.nodes.remove(&key)?;
        self.index.remove(&PointRef::Node(key));
        self.changes.record_deleted(ObjectKey::Node(key));
        debug!(%key, "node deleted");
        Some(node)
    }

    /// Removes a segment. Coincident objects are left in place.
    pub fn delete_segment(&mut self, id: SegmentId) -> Option<Segment> {
        let segment = self.segments.remove(&id)?;
        for index in 0..segment.vertices.len() {
            self.index.remove(&PointRef::Vertex { segment: id, index });
        }
        self.changes.record_deleted(ObjectKey::Segment(id));
        debug!(segment = id, "segment deleted");
        Some(segment)
    }

    /// Removes any object; `false` when it did not exist.
    pub fn delete(&mut self, key: ObjectKey) -> bool {
        match key {
            ObjectKey::Node(k) => self.delete_node(k).is_some(),
            ObjectKey::Segment(id) => self.delete_segment(id).is_some(),
        }
    }

    // ── attributes ─────────────────────────────────────────────────────────

    /// Shows or hides one object. View state only; never recorded.
    pub fn set_visible(&mut self, key: ObjectKey, visible: bool) {
        match key {
            ObjectKey::Node(k) => {
                if let Some(n) = self.nodes.get_mut(&k) {
                    n.visible = visible;
                }
            }
            ObjectKey::Segment(id) => {
                if let Some(s) = self.segments.get_mut(&id) {
                    s.visible = visible;
                }
            }
        }
    }

    /// Shows or hides every object of a type.
    pub fn set_group_visible(&mut self, ty: ObjectType, visible: bool) {
        match NodeKind::from_object_type(ty) {
            Some(kind) => self
                .nodes
                .values_mut()
                .filter(|n| n.key.kind == kind)
                .for_each(|n| n.visible = visible),
            None => self.segments.values_mut().for_each(|s| s.visible = visible),
        }
    }

    /// Changes a segment's diameter.
    pub fn set_diameter(&mut self, id: SegmentId, diameter: f64) -> Result<(), EditError> {
        check_diameter(diameter)?;
        let Some(seg) = self.segments.get_mut(&id) else {
            return Ok(());
        };
        seg.diameter = diameter;
        seg.properties
            .insert(PROP_DIAMETER.to_owned(), Value::from(diameter));
        self.changes.record_updated(ObjectKey::Segment(id));
        Ok(())
    }

    /// Merges `properties` into an object's bag; `false` when the object
    /// does not exist. A numeric `Диаметр` also updates a segment's diameter.
    pub fn set_properties(&mut self, key: ObjectKey, properties: Properties) -> bool {
        let bag = match key {
            ObjectKey::Node(k) => self.nodes.get_mut(&k).map(|n| &mut n.properties),
            ObjectKey::Segment(id) => self.segments.get_mut(&id).map(|s| {
                if let Some(d) = properties.get(PROP_DIAMETER).and_then(Value::as_f64) {
                    if check_diameter(d).is_ok() {
                        s.diameter = d;
                    }
                }
                &mut s.properties
            }),
        };
        let Some(bag) = bag else {
            return false;
        };
        bag.extend(properties);
        self.changes.record_updated(key);
        true
    }

    /// Splits segment `id` at interior vertex `at`; the tail becomes a new
    /// segment with the same name, diameter and properties. Returns the new
    /// id, or `None` when the segment does not exist.
    pub fn split_segment(
        &mut self,
        id: SegmentId,
        at: usize,
    ) -> Result<Option<SegmentId>, EditError> {
        let Some(seg) = self.segments.get_mut(&id) else {
            return Ok(None);
        };
        let len = seg.vertices.len();
        if at == 0 || at + 1 >= len {
            return Err(EditError::InvalidSplit {
                segment: id,
                at,
                len,
            });
        }
        let tail = seg.vertices.split_off(at + 1);
        let joint = seg.vertices[at];
        let mut vertices = Vec::with_capacity(tail.len() + 1);
        vertices.push(joint);
        vertices.extend(tail);
        let new_segment = Segment {
            id: self.next_segment,
            vertices,
            diameter: seg.diameter,
            visible: seg.visible,
            properties: seg.properties.clone(),
        };
        let new_id = new_segment.id;
        self.next_segment += 1;
        for index in at + 1..len {
            self.index.remove(&PointRef::Vertex { segment: id, index });
        }
        self.insert_segment(new_segment);
        self.changes.record_updated(ObjectKey::Segment(id));
        self.changes.record_created(ObjectKey::Segment(new_id));
        debug!(segment = id, at, new_segment = new_id, "segment split");
        Ok(Some(new_id))
    }

    // ── change sets ────────────────────────────────────────────────────────

    /// Underlying tracker.
    #[must_use]
    pub fn changes(&self) -> &ChangeTracker {
        &self.changes
    }

    /// `true` when anything awaits sync.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Copy of an object's current state.
    #[must_use]
    pub fn snapshot(&self, key: ObjectKey) -> Option<Snapshot> {
        match key {
            ObjectKey::Node(k) => self.nodes.get(&k).cloned().map(Snapshot::Node),
            ObjectKey::Segment(id) => self.segments.get(&id).cloned().map(Snapshot::Segment),
        }
    }

    fn entries(&self, kind: ChangeKind) -> Vec<ChangeEntry> {
        self.changes
            .pending(kind)
            .into_iter()
            .map(|p| ChangeEntry {
                kind,
                key: p.key,
                revision: p.revision,
                data: match kind {
                    ChangeKind::Deleted => None,
                    ChangeKind::Created | ChangeKind::Updated => self.snapshot(p.key),
                },
            })
            .collect()
    }

    /// Objects that exist locally only, with snapshots.
    #[must_use]
    pub fn created(&self) -> Vec<ChangeEntry> {
        self.entries(ChangeKind::Created)
    }

    /// Backend objects modified locally, with snapshots.
    #[must_use]
    pub fn updated(&self) -> Vec<ChangeEntry> {
        self.entries(ChangeKind::Updated)
    }

    /// Backend objects removed locally.
    #[must_use]
    pub fn deleted(&self) -> Vec<ChangeEntry> {
        self.entries(ChangeKind::Deleted)
    }

    /// Empties the created set.
    pub fn clear_created(&mut self) {
        self.changes.clear(ChangeKind::Created);
    }

    /// Empties the updated set.
    pub fn clear_updated(&mut self) {
        self.changes.clear(ChangeKind::Updated);
    }

    /// Empties the deleted set.
    pub fn clear_deleted(&mut self) {
        self.changes.clear(ChangeKind::Deleted);
    }

    /// Clears the entries of an accepted batch; see
    /// [`ChangeTracker::acknowledge`].
    pub fn acknowledge(&mut self, kind: ChangeKind, sent: &[Pending]) {
        self.changes.acknowledge(kind, sent);
    }
}

fn check_diameter(d: f64) -> Result<(), EditError> {
    if d.is_finite() && d >= 0.0 {
        Ok(())
    } else {
        Err(EditError::InvalidDiameter(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn pipe_of_three_vertices_is_two_segments() {
        let mut m = NetworkModel::default();
        let ids = m
            .add_pipe(&[p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)], 110.0, "Труба #0")
            .unwrap();
        assert_eq!(ids, vec![0, 1]);
        let s1 = m.segment(1).unwrap();
        assert_eq!(s1.vertices, vec![p(1.0, 0.0), p(1.0, 1.0)]);
        assert_eq!(s1.name(), "Труба #0");
        assert_eq!(m.created().len(), 2);
    }

    #[test]
    fn single_vertex_pipe_is_noop() {
        let mut m = NetworkModel::default();
        assert!(m.add_pipe(&[p(0.0, 0.0)], 50.0, "x").unwrap().is_empty());
        assert!(m.is_empty());
        assert!(!m.has_changes());
    }

    #[test]
    fn negative_diameter_rejected() {
        let mut m = NetworkModel::default();
        let err = m.add_pipe(&[p(0.0, 0.0), p(1.0, 1.0)], -1.0, "x");
        assert_eq!(err, Err(EditError::InvalidDiameter(-1.0)));
        assert!(m.is_empty());
    }

    #[test]
    fn hit_test_prefers_node_then_vertex_then_body() {
        let mut m = NetworkModel::default();
        m.add_pipe(&[p(0.0, 0.0), p(0.01, 0.0)], 50.0, "a").unwrap();
        let key = m.add_node(NodeKind::Pump, p(0.0, 0.0)).key;
        assert_eq!(m.hit_test(p(0.0, 0.0)), Some(Hit::Node(key)));
        assert_eq!(m.hit_test(p(0.01, 0.0)), Some(Hit::Vertex(p(0.01, 0.0))));
        assert_eq!(
            m.hit_test(p(0.005, 0.00001)),
            Some(Hit::SegmentBody {
                segment: 0,
                from: 0,
                to: 1
            })
        );
        assert_eq!(m.hit_test(p(0.005, 0.01)), None);
    }

    #[test]
    fn hidden_objects_are_not_hit() {
        let mut m = NetworkModel::default();
        let key = m.add_node(NodeKind::Well, p(0.0, 0.0)).key;
        m.set_group_visible(ObjectType::Well, false);
        assert_eq!(m.hit_test(p(0.0, 0.0)), None);
        m.set_visible(ObjectKey::Node(key), true);
        assert_eq!(m.hit_test(p(0.0, 0.0)), Some(Hit::Node(key)));
        assert_eq!(m.created().len(), 1);
        assert!(m.updated().is_empty());
    }

    #[test]
    fn split_keeps_joint_and_name() {
        let mut m = NetworkModel::default();
        let seg = Segment {
            id: 4,
            vertices: vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)],
            diameter: 32.0,
            visible: true,
            properties: Properties::new(),
        };
        m.insert_segment(seg);
        m.next_segment = 5;
        let new_id = m.split_segment(4, 1).unwrap().unwrap();
        assert_eq!(new_id, 5);
        assert_eq!(m.segment(4).unwrap().vertices, vec![p(0.0, 0.0), p(1.0, 0.0)]);
        assert_eq!(m.segment(5).unwrap().vertices, vec![p(1.0, 0.0), p(2.0, 0.0)]);
        assert_eq!(m.vertices_at(p(1.0, 0.0)), vec![(4, 1), (5, 0)]);
        assert!(m.vertices_at(p(2.0, 0.0)) == vec![(5, 1)]);
        assert_eq!(m.changes().kind_of(&ObjectKey::Segment(4)), Some(ChangeKind::Updated));
        assert_eq!(m.changes().kind_of(&ObjectKey::Segment(5)), Some(ChangeKind::Created));
        assert!(matches!(
            m.split_segment(4, 0),
            Err(EditError::InvalidSplit { .. })
        ));
    }

    #[test]
    fn view_scale_changes_coincidence_reach() {
        let mut m = NetworkModel::default();
        m.add_node(NodeKind::Well, p(0.0, 0.0));
        m.add_pipe(&[p(0.0005, 0.0), p(1.0, 0.0)], 50.0, "a").unwrap();
        assert!(m.vertices_at(p(0.0, 0.0)).is_empty());
        m.set_view_scale(1.0e-4).unwrap();
        assert_eq!(m.vertices_at(p(0.0, 0.0)), vec![(0, 0)]);
        assert!(m.set_view_scale(0.0).is_err());
    }
}
