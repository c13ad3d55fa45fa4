// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Node and segment records held by the network model.

use std::borrow::Cow;

use pipenet_geom::Point;
use pipenet_proto::{Properties, PROP_NAME};

use crate::ident::{NodeKey, SegmentId};

/// A point-object (well, consumer, pump, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Identity.
    pub key: NodeKey,
    /// Anchor coordinate.
    pub position: Point,
    /// View flag; never synced.
    pub visible: bool,
    /// Open property bag.
    pub properties: Properties,
}

/// The smallest persisted pipe unit.
///
/// Locally drawn segments always have two vertices; loaded schemes may carry
/// longer vertex lists.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Identity.
    pub id: SegmentId,
    /// Ordered vertices (at least two).
    pub vertices: Vec<Point>,
    /// Pipe diameter.
    pub diameter: f64,
    /// View flag; never synced.
    pub visible: bool,
    /// Open property bag (`Имя`, `Диаметр`, ...).
    pub properties: Properties,
}

impl Segment {
    /// Pipe name shared by the segments of one drawn line.
    pub fn name(&self) -> Cow<'_, str> {
        match self.properties.get(PROP_NAME).and_then(serde_json::Value::as_str) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(default_pipe_name(self.id)),
        }
    }

    /// First vertex.
    pub fn start(&self) -> Option<Point> {
        self.vertices.first().copied()
    }

    /// Last vertex.
    pub fn end(&self) -> Option<Point> {
        self.vertices.last().copied()
    }

    /// Consecutive vertex pairs, one per drawn edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.vertices.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Name given to a pipe when the operator does not supply one.
#[must_use]
pub fn default_pipe_name(first_segment: SegmentId) -> String {
    format!("Труба #{first_segment}")
}
