// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pending-change bookkeeping between the local model and the backend.
//!
//! One map holds every dirty object, so an object is in at most one of the
//! created/updated/deleted sets at any time. Each record stamps a fresh
//! revision; acknowledging a sent batch only clears entries whose revision
//! still matches what was sent, so edits made while a request is in flight
//! survive the response.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::ident::ObjectKey;

/// Monotonic stamp assigned on every record.
pub type Revision = u64;

/// Which pending set an object is in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Exists locally only.
    Created,
    /// Known to the backend, modified locally.
    Updated,
    /// Known to the backend, removed locally.
    Deleted,
}

/// A pending object together with the revision it had when observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pending {
    /// Object identity.
    pub key: ObjectKey,
    /// Revision at observation time.
    pub revision: Revision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    kind: ChangeKind,
    revision: Revision,
}

/// Tracks which objects differ from the last acknowledged backend state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeTracker {
    entries: BTreeMap<ObjectKey, Entry>,
    // Created objects deleted locally before any acknowledgement.
    dropped: BTreeSet<ObjectKey>,
    next_revision: Revision,
}

impl ChangeTracker {
    /// Empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn stamp(&mut self) -> Revision {
        self.next_revision += 1;
        self.next_revision
    }

    /// Records a locally created object.
    pub fn record_created(&mut self, key: ObjectKey) {
        let revision = self.stamp();
        self.dropped.remove(&key);
        self.entries.insert(
            key,
            Entry {
                kind: ChangeKind::Created,
                revision,
            },
        );
    }

    /// Records a modification. Created objects stay created; deleted objects
    /// are not resurrected.
    pub fn record_updated(&mut self, key: ObjectKey) {
        let revision = self.stamp();
        match self.entries.get_mut(&key) {
            Some(e) if e.kind == ChangeKind::Deleted => {}
            Some(e) => e.revision = revision,
            None => {
                self.entries.insert(
                    key,
                    Entry {
                        kind: ChangeKind::Updated,
                        revision,
                    },
                );
            }
        }
    }

    /// Records a deletion. An object the backend never saw is forgotten
    /// outright; anything else becomes a tombstone, superseding an update.
    pub fn record_deleted(&mut self, key: ObjectKey) {
        let revision = self.stamp();
        match self.entries.get(&key).map(|e| e.kind) {
            Some(ChangeKind::Created) => {
                self.entries.remove(&key);
                self.dropped.insert(key);
            }
            Some(ChangeKind::Deleted) => {}
            Some(ChangeKind::Updated) | None => {
                self.entries.insert(
                    key,
                    Entry {
                        kind: ChangeKind::Deleted,
                        revision,
                    },
                );
            }
        }
    }

    /// Pending set `key` belongs to, if any.
    #[must_use]
    pub fn kind_of(&self, key: &ObjectKey) -> Option<ChangeKind> {
        self.entries.get(key).map(|e| e.kind)
    }

    /// Objects in `kind`'s set, in key order.
    #[must_use]
    pub fn pending(&self, kind: ChangeKind) -> Vec<Pending> {
        self.entries
            .iter()
            .filter(|(_, e)| e.kind == kind)
            .map(|(key, e)| Pending {
                key: *key,
                revision: e.revision,
            })
            .collect()
    }

    /// Number of objects in `kind`'s set.
    #[must_use]
    pub fn count(&self, kind: ChangeKind) -> usize {
        self.entries.values().filter(|e| e.kind == kind).count()
    }

    /// Total number of dirty objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing awaits sync.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unconditionally empties `kind`'s set.
    pub fn clear(&mut self, kind: ChangeKind) {
        self.entries.retain(|_, e| e.kind != kind);
        if kind == ChangeKind::Created {
            self.dropped.clear();
        }
    }

    /// Clears the entries of a batch the backend accepted.
    ///
    /// Entries recorded again after `sent` was observed stay dirty. A created
    /// object touched during the request is known to the backend now, so it
    /// moves to the updated set; one deleted during the request gets a
    /// tombstone.
    pub fn acknowledge(&mut self, kind: ChangeKind, sent: &[Pending]) {
        for p in sent {
            let current = self.entries.get(&p.key).copied();
            match current {
                Some(e) if e.kind == kind && e.revision == p.revision => {
                    self.entries.remove(&p.key);
                }
                Some(e) if kind == ChangeKind::Created && e.kind == ChangeKind::Created => {
                    self.entries.insert(
                        p.key,
                        Entry {
                            kind: ChangeKind::Updated,
                            revision: e.revision,
                        },
                    );
                }
                None if kind == ChangeKind::Created && self.dropped.remove(&p.key) => {
                    let revision = self.stamp();
                    self.entries.insert(
                        p.key,
                        Entry {
                            kind: ChangeKind::Deleted,
                            revision,
                        },
                    );
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident::{NodeKey, NodeKind};

    fn well(id: u64) -> ObjectKey {
        ObjectKey::Node(NodeKey::new(NodeKind::Well, id))
    }

    #[test]
    fn update_of_created_stays_created() {
        let mut t = ChangeTracker::new();
        t.record_created(well(0));
        t.record_updated(well(0));
        assert_eq!(t.kind_of(&well(0)), Some(ChangeKind::Created));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn delete_of_created_leaves_no_trace() {
        let mut t = ChangeTracker::new();
        t.record_created(well(0));
        t.record_updated(well(0));
        t.record_deleted(well(0));
        assert!(t.is_empty());
    }

    #[test]
    fn delete_supersedes_update_and_update_does_not_resurrect() {
        let mut t = ChangeTracker::new();
        t.record_updated(ObjectKey::Segment(3));
        t.record_deleted(ObjectKey::Segment(3));
        t.record_updated(ObjectKey::Segment(3));
        assert_eq!(t.kind_of(&ObjectKey::Segment(3)), Some(ChangeKind::Deleted));
        assert_eq!(t.count(ChangeKind::Updated), 0);
    }

    #[test]
    fn ack_keeps_entries_touched_in_flight() {
        let mut t = ChangeTracker::new();
        t.record_updated(well(1));
        t.record_updated(well(2));
        let sent = t.pending(ChangeKind::Updated);
        t.record_updated(well(2));
        t.acknowledge(ChangeKind::Updated, &sent);
        assert_eq!(t.kind_of(&well(1)), None);
        assert_eq!(t.kind_of(&well(2)), Some(ChangeKind::Updated));
    }

    #[test]
    fn created_touched_in_flight_becomes_update() {
        let mut t = ChangeTracker::new();
        t.record_created(well(0));
        let sent = t.pending(ChangeKind::Created);
        t.record_updated(well(0));
        t.acknowledge(ChangeKind::Created, &sent);
        assert_eq!(t.kind_of(&well(0)), Some(ChangeKind::Updated));
    }

    #[test]
    fn created_deleted_in_flight_gets_tombstone() {
        let mut t = ChangeTracker::new();
        t.record_created(well(0));
        let sent = t.pending(ChangeKind::Created);
        t.record_deleted(well(0));
        assert!(t.is_empty());
        t.acknowledge(ChangeKind::Created, &sent);
        assert_eq!(t.kind_of(&well(0)), Some(ChangeKind::Deleted));
    }

    #[test]
    fn never_sent_drop_does_not_tombstone() {
        let mut t = ChangeTracker::new();
        t.record_created(well(0));
        t.record_deleted(well(0));
        t.record_created(well(1));
        let sent = t.pending(ChangeKind::Created);
        t.acknowledge(ChangeKind::Created, &sent);
        assert!(t.is_empty());
    }
}
