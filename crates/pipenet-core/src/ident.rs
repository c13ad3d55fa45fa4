// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Identity types: node kinds, object keys and point references.

use core::fmt;
use pipenet_proto::ObjectType;
use serde::{Deserialize, Serialize};

/// Per-kind node identifier (monotonic counter per kind).
pub type NodeId = u64;
/// Pipe segment identifier.
pub type SegmentId = u64;

/// Point-object classification.
///
/// Declaration order is the enumeration order used for first-match snapping.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Well.
    Well,
    /// Consumer (`user` in older tool names).
    #[serde(alias = "user")]
    Consumer,
    /// Spring capture.
    Capture,
    /// Pump.
    Pump,
    /// Counter-reservoir.
    Reservoir,
    /// Water tower.
    Tower,
}

impl NodeKind {
    /// Every kind in enumeration order.
    pub const ALL: [Self; 6] = [
        Self::Well,
        Self::Consumer,
        Self::Capture,
        Self::Pump,
        Self::Reservoir,
        Self::Tower,
    ];

    /// Wire tag for this kind.
    #[must_use]
    pub const fn object_type(self) -> ObjectType {
        match self {
            Self::Well => ObjectType::Well,
            Self::Consumer => ObjectType::Consumer,
            Self::Capture => ObjectType::Capture,
            Self::Pump => ObjectType::Pump,
            Self::Reservoir => ObjectType::Reservoir,
            Self::Tower => ObjectType::Tower,
        }
    }

    /// Node kind for a wire tag; `None` for pipes.
    #[must_use]
    pub const fn from_object_type(ty: ObjectType) -> Option<Self> {
        match ty {
            ObjectType::Well => Some(Self::Well),
            ObjectType::Consumer => Some(Self::Consumer),
            ObjectType::Capture => Some(Self::Capture),
            ObjectType::Pump => Some(Self::Pump),
            ObjectType::Reservoir => Some(Self::Reservoir),
            ObjectType::Tower => Some(Self::Tower),
            ObjectType::Pipe => None,
        }
    }
}

/// Identity of a point-object: `(kind, id)`.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct NodeKey {
    /// Node kind.
    pub kind: NodeKind,
    /// Per-kind id.
    pub id: NodeId,
}

impl NodeKey {
    /// Builds a key.
    #[must_use]
    pub const fn new(kind: NodeKind, id: NodeId) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind.object_type(), self.id)
    }
}

/// Identity of any synced object: `(type, id)`.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKey {
    /// Point-object.
    Node(NodeKey),
    /// Pipe segment.
    Segment(SegmentId),
}

impl ObjectKey {
    /// Wire tag.
    #[must_use]
    pub const fn object_type(self) -> ObjectType {
        match self {
            Self::Node(k) => k.kind.object_type(),
            Self::Segment(_) => ObjectType::Pipe,
        }
    }

    /// Numeric id within its type.
    #[must_use]
    pub const fn id(self) -> u64 {
        match self {
            Self::Node(k) => k.id,
            Self::Segment(id) => id,
        }
    }
}

impl From<NodeKey> for ObjectKey {
    fn from(k: NodeKey) -> Self {
        Self::Node(k)
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(k) => k.fmt(f),
            Self::Segment(id) => write!(f, "{}#{id}", ObjectType::Pipe),
        }
    }
}

/// A single indexed coordinate: a node anchor or one segment vertex.
///
/// Ordering (nodes by kind then id, then vertices by segment then index) is
/// the enumeration order for every first-match lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PointRef {
    /// Node anchor.
    Node(NodeKey),
    /// Segment vertex.
    Vertex {
        /// Owning segment.
        segment: SegmentId,
        /// Vertex index within the segment.
        index: usize,
    },
}
