// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Conversion between the model and wire feature collections.
//!
//! Hydration builds a model from a loaded scheme without recording changes.
//! Export turns change entries into the request collections the backend
//! expects: nodes as `Point` features, segments as one `LineString` per
//! vertex pair, deletions as geometry-less tombstones.

use std::collections::{BTreeMap, BTreeSet};

use pipenet_geom::{Point, Tolerance};
use pipenet_proto::{
    Feature, FeatureCollection, Geometry, ObjectId, ObjectType, Properties, SchemeId,
    PROP_DIAMETER, PROP_DIAMETER_LEGACY,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::CodecError;
use crate::ident::{NodeKey, NodeKind};
use crate::model::{ChangeEntry, NetworkModel, Snapshot};
use crate::record::{Node, Segment};

/// Outcome counts of a hydration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HydrateReport {
    /// Nodes loaded.
    pub nodes: usize,
    /// Segments loaded.
    pub segments: usize,
    /// Features ignored (bad geometry, unknown type, duplicate id).
    pub skipped: usize,
}

#[derive(Deserialize)]
struct RawCollection {
    #[serde(default)]
    features: Vec<Value>,
}

/// Parses a scheme document, skipping features that do not decode.
pub fn hydrate_json(
    json: &str,
    tolerance: Tolerance,
) -> Result<(NetworkModel, HydrateReport), CodecError> {
    let raw: RawCollection = serde_json::from_str(json)?;
    let mut undecodable = 0;
    let features: Vec<Feature> = raw
        .features
        .into_iter()
        .filter_map(|v| match serde_json::from_value::<Feature>(v) {
            Ok(f) => Some(f),
            Err(err) => {
                warn!(%err, "skipping undecodable feature");
                undecodable += 1;
                None
            }
        })
        .collect();
    let (model, mut report) = hydrate(&features, tolerance);
    report.skipped += undecodable;
    Ok((model, report))
}

enum Loaded {
    Node {
        kind: NodeKind,
        id: Option<ObjectId>,
        at: Point,
        properties: Properties,
    },
    Segment {
        id: Option<ObjectId>,
        vertices: Vec<Point>,
        properties: Properties,
    },
}

fn classify(f: &Feature) -> Option<Loaded> {
    let properties = f.properties.clone();
    match (NodeKind::from_object_type(f.name_object_type), &f.geometry) {
        (Some(kind), Some(Geometry::Point { coordinates })) => {
            let at = Point::from(*coordinates);
            at.is_finite().then_some(Loaded::Node {
                kind,
                id: f.id,
                at,
                properties,
            })
        }
        (None, Some(Geometry::LineString { coordinates })) => {
            let vertices: Vec<Point> = coordinates.iter().copied().map(Point::from).collect();
            (vertices.len() >= 2 && vertices.iter().all(|p| p.is_finite())).then_some(
                Loaded::Segment {
                    id: f.id,
                    vertices,
                    properties,
                },
            )
        }
        _ => None,
    }
}

/// Diameter carried by a loaded property bag; 0 when absent or unreadable.
#[must_use]
pub fn diameter_of(properties: &Properties) -> f64 {
    let read = |v: &Value| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    properties
        .get(PROP_DIAMETER)
        .and_then(read)
        .or_else(|| properties.get(PROP_DIAMETER_LEGACY).and_then(read))
        .filter(|d| d.is_finite() && *d >= 0.0)
        .unwrap_or(0.0)
}

/// Builds a model from loaded features. Records no changes; id counters
/// continue after the highest loaded id of each type.
#[must_use]
pub fn hydrate(features: &[Feature], tolerance: Tolerance) -> (NetworkModel, HydrateReport) {
    let mut report = HydrateReport::default();
    let mut loaded = Vec::with_capacity(features.len());
    for f in features {
        match classify(f) {
            Some(l) => loaded.push(l),
            None => {
                warn!(
                    id = ?f.id,
                    object_type = %f.name_object_type,
                    "skipping feature with unsupported geometry"
                );
                report.skipped += 1;
            }
        }
    }

    let mut next_node: BTreeMap<NodeKind, u64> = BTreeMap::new();
    let mut next_segment = 0;
    for l in &loaded {
        match l {
            Loaded::Node {
                kind, id: Some(id), ..
            } => {
                let slot = next_node.entry(*kind).or_insert(0);
                *slot = (*slot).max(id.saturating_add(1));
            }
            Loaded::Segment { id: Some(id), .. } => {
                next_segment = next_segment.max(id.saturating_add(1));
            }
            Loaded::Node { .. } | Loaded::Segment { .. } => {}
        }
    }

    let mut model = NetworkModel::new(tolerance);
    model.next_node = next_node;
    model.next_segment = next_segment;
    for l in loaded {
        match l {
            Loaded::Node {
                kind,
                id,
                at,
                properties,
            } => {
                let id = id.unwrap_or_else(|| {
                    let slot = model.next_node.entry(kind).or_insert(0);
                    let id = *slot;
                    *slot = slot.saturating_add(1);
                    id
                });
                let key = NodeKey::new(kind, id);
                if model.nodes.contains_key(&key) {
                    warn!(%key, "skipping duplicate node id");
                    report.skipped += 1;
                    continue;
                }
                model.insert_node(Node {
                    key,
                    position: at,
                    visible: true,
                    properties,
                });
                report.nodes += 1;
            }
            Loaded::Segment {
                id,
                vertices,
                properties,
            } => {
                let id = id.unwrap_or_else(|| {
                    let id = model.next_segment;
                    model.next_segment = id.saturating_add(1);
                    id
                });
                if model.segments.contains_key(&id) {
                    warn!(segment = id, "skipping duplicate segment id");
                    report.skipped += 1;
                    continue;
                }
                model.insert_segment(Segment {
                    id,
                    vertices,
                    diameter: diameter_of(&properties),
                    visible: true,
                    properties,
                });
                report.segments += 1;
            }
        }
    }
    debug!(?report, "scheme hydrated");
    (model, report)
}

/// Canonical dedupe key of one vertex pair.
#[must_use]
pub fn edge_key(from: Point, to: Point) -> String {
    format!("{from}-{to}")
}

/// Point feature for a node.
#[must_use]
pub fn node_feature(node: &Node) -> Feature {
    Feature::point(
        node.key.id,
        node.key.kind.object_type(),
        node.position.to_array(),
        node.properties.clone(),
    )
}

/// One `LineString` feature per distinct vertex pair of `segment`. A pair
/// repeated within the segment is emitted once; pairs shared with other
/// segments are not deduplicated.
#[must_use]
pub fn segment_features(segment: &Segment) -> Vec<Feature> {
    let mut seen = BTreeSet::new();
    segment
        .edges()
        .filter(|(a, b)| seen.insert(edge_key(*a, *b)))
        .map(|(a, b)| {
            Feature::line(
                segment.id,
                ObjectType::Pipe,
                vec![a.to_array(), b.to_array()],
                segment.properties.clone(),
            )
        })
        .collect()
}

/// Request collection for created or updated entries. Entries without a
/// snapshot contribute nothing.
#[must_use]
pub fn to_collection(entries: &[ChangeEntry], id_scheme: Option<SchemeId>) -> FeatureCollection {
    let mut fc = FeatureCollection::new(id_scheme);
    for e in entries {
        match &e.data {
            Some(Snapshot::Node(n)) => fc.features.push(node_feature(n)),
            Some(Snapshot::Segment(s)) => fc.features.extend(segment_features(s)),
            None => {}
        }
    }
    fc
}

/// Delete request collection.
#[must_use]
pub fn to_tombstones(entries: &[ChangeEntry], id_scheme: Option<SchemeId>) -> FeatureCollection {
    let mut fc = FeatureCollection::new(id_scheme);
    fc.features.extend(
        entries
            .iter()
            .map(|e| Feature::tombstone(e.key.id(), e.object_type())),
    );
    fc
}
