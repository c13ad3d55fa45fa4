// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Pipenet core: the utility network model.

This crate provides:
- Identities (`NodeKind`, `NodeKey`, `ObjectKey`, `PointRef`).
- Records (`Node`, `Segment`) and the owned `NetworkModel` that edits them.
- A change tracker keeping the created/updated/deleted sets disjoint.
- Hydration from and export to the backend feature format.
- Derived views: named polylines and junctions.

Design notes:
- Connectivity is coincidence. No object stores a link to another; topology
  operations query the spatial index at the moment they run.
- The model is a plain value (`Clone + PartialEq`): callers snapshot it to
  cancel an interaction and compare it to prove an abort left it untouched.
"]

/// Pending-change bookkeeping.
pub mod changes;
/// Feature-collection hydration and export.
pub mod codec;
mod error;
/// Identity types.
pub mod ident;
/// The network model.
pub mod model;
/// Polyline reassembly and junction detection.
pub mod polyline;
/// Node and segment records.
pub mod record;

pub use changes::{ChangeKind, ChangeTracker, Pending, Revision};
pub use codec::{hydrate, hydrate_json, HydrateReport};
pub use error::{CodecError, EditError};
pub use ident::{NodeId, NodeKey, NodeKind, ObjectKey, PointRef, SegmentId};
pub use model::{ChangeEntry, Hit, NetworkModel, Snapshot};
pub use polyline::{junctions, polylines, Junction, Polyline};
pub use record::{default_pipe_name, Node, Segment};
