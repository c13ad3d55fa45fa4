// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Turning change sets into request bodies.

use std::fmt;

use pipenet_core::codec::{to_collection, to_tombstones};
use pipenet_core::{ChangeEntry, ChangeKind, NetworkModel, Pending};
use pipenet_proto::{Envelope, FeatureCollection, SchemeId};
use serde::{Deserialize, Serialize};

/// Backend endpoint a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// `delete_objects`.
    Delete,
    /// `update_objects`.
    Update,
    /// `create_objects`.
    Create,
}

impl RequestKind {
    /// All kinds, in the order a save issues them.
    pub const ALL: [Self; 3] = [Self::Delete, Self::Update, Self::Create];

    /// Change set this request drains.
    pub const fn change_kind(self) -> ChangeKind {
        match self {
            Self::Delete => ChangeKind::Deleted,
            Self::Update => ChangeKind::Updated,
            Self::Create => ChangeKind::Created,
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Delete => "delete_objects",
            Self::Update => "update_objects",
            Self::Create => "create_objects",
        })
    }
}

/// One request body plus the entries it acknowledges on success.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRequest {
    /// Endpoint.
    pub kind: RequestKind,
    /// Body to send.
    pub body: Envelope<FeatureCollection>,
    /// Entries captured when the body was built.
    pub acks: Vec<Pending>,
}

/// Requests for one save. A set with nothing pending yields no request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavePlan {
    /// Tombstones for deleted objects (carries `id_scheme`).
    pub delete: Option<PlannedRequest>,
    /// Snapshots of updated objects (no `id_scheme`).
    pub update: Option<PlannedRequest>,
    /// Snapshots of created objects (carries `id_scheme`).
    pub create: Option<PlannedRequest>,
}

impl SavePlan {
    /// Snapshot the model's pending changes into request bodies.
    pub fn prepare(model: &NetworkModel, id_scheme: SchemeId) -> Self {
        let deleted = model.deleted();
        let updated = model.updated();
        let created = model.created();
        Self {
            delete: planned(
                RequestKind::Delete,
                to_tombstones(&deleted, Some(id_scheme)),
                deleted.iter().map(ChangeEntry::pending).collect(),
            ),
            update: planned(
                RequestKind::Update,
                to_collection(&updated, None),
                updated.iter().map(ChangeEntry::pending).collect(),
            ),
            create: planned(
                RequestKind::Create,
                to_collection(&created, Some(id_scheme)),
                created.iter().map(ChangeEntry::pending).collect(),
            ),
        }
    }

    /// Request for one endpoint, if planned.
    pub fn get(&self, kind: RequestKind) -> Option<&PlannedRequest> {
        match kind {
            RequestKind::Delete => self.delete.as_ref(),
            RequestKind::Update => self.update.as_ref(),
            RequestKind::Create => self.create.as_ref(),
        }
    }

    /// Planned requests in issue order.
    pub fn requests(&self) -> impl Iterator<Item = &PlannedRequest> {
        RequestKind::ALL.into_iter().filter_map(|k| self.get(k))
    }

    /// `true` when a save would send nothing.
    pub fn is_empty(&self) -> bool {
        self.delete.is_none() && self.update.is_none() && self.create.is_none()
    }
}

fn planned(kind: RequestKind, fc: FeatureCollection, acks: Vec<Pending>) -> Option<PlannedRequest> {
    if acks.is_empty() {
        return None;
    }
    Some(PlannedRequest {
        kind,
        body: Envelope::new(fc),
        acks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipenet_core::NodeKind;
    use pipenet_geom::{Point, Tolerance};

    #[test]
    fn empty_model_plans_nothing() {
        let model = NetworkModel::default();
        let plan = SavePlan::prepare(&model, 1);
        assert!(plan.is_empty());
        assert_eq!(plan.requests().count(), 0);
    }

    #[test]
    fn create_and_update_bodies_differ_in_scheme_binding() {
        let mut model = NetworkModel::new(Tolerance::default());
        let well = model.add_node(NodeKind::Well, Point::new(0.0, 0.0)).key;
        let sent = model.changes().pending(ChangeKind::Created);
        model.acknowledge(ChangeKind::Created, &sent);
        model.move_node(well, Point::new(1.0, 1.0));
        model.add_node(NodeKind::Pump, Point::new(2.0, 2.0));

        let plan = SavePlan::prepare(&model, 5);
        assert!(plan.delete.is_none());
        let update = plan.update.as_ref().unwrap();
        let create = plan.create.as_ref().unwrap();
        assert_eq!(update.body.data.id_scheme, None);
        assert_eq!(create.body.data.id_scheme, Some(5));
        assert_eq!(update.acks.len(), 1);
        assert_eq!(create.acks.len(), 1);
        let kinds: Vec<_> = plan.requests().map(|r| r.kind).collect();
        assert_eq!(kinds, [RequestKind::Update, RequestKind::Create]);
    }
}
