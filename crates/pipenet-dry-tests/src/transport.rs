// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Recording scheme transport with per-endpoint failure switches.

use pipenet_proto::{Envelope, FeatureCollection, SchemeId};
use pipenet_sync::{RequestKind, SchemeTransport, SentRequest, TransportError};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// [`SchemeTransport`] fake.
///
/// Records every body it receives (failed ones included), counts calls per
/// endpoint, and fails the endpoints switched off with
/// [`RecordingTransport::fail`]. Clones share state.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    scheme: Option<FeatureCollection>,
    sent: Vec<SentRequest>,
    loads: usize,
    failing: BTreeSet<RequestKind>,
    fail_load: bool,
}

impl RecordingTransport {
    /// Transport with no scheme to load and no failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport that serves `scheme` on load.
    pub fn serving(scheme: FeatureCollection) -> Self {
        let t = Self::new();
        t.lock().scheme = Some(scheme);
        t
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Switch failure on or off for one endpoint.
    pub fn fail(&self, kind: RequestKind, fail: bool) {
        let mut inner = self.lock();
        if fail {
            inner.failing.insert(kind);
        } else {
            inner.failing.remove(&kind);
        }
    }

    /// Switch load failure on or off.
    pub fn fail_load(&self, fail: bool) {
        self.lock().fail_load = fail;
    }

    /// Every body received, in arrival order.
    pub fn sent(&self) -> Vec<SentRequest> {
        self.lock().sent.clone()
    }

    /// Bodies received by one endpoint.
    pub fn sent_to(&self, kind: RequestKind) -> Vec<Envelope<FeatureCollection>> {
        self.lock()
            .sent
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| r.body.clone())
            .collect()
    }

    /// Calls made to one endpoint.
    pub fn calls(&self, kind: RequestKind) -> usize {
        self.lock().sent.iter().filter(|r| r.kind == kind).count()
    }

    /// Total mutating calls.
    pub fn total_calls(&self) -> usize {
        self.lock().sent.len()
    }

    /// `load_scheme` calls made.
    pub fn load_count(&self) -> usize {
        self.lock().loads
    }

    fn receive(&self, kind: RequestKind, body: &Envelope<FeatureCollection>) -> Result<(), TransportError> {
        let mut inner = self.lock();
        inner.sent.push(SentRequest {
            kind,
            body: body.clone(),
        });
        if inner.failing.contains(&kind) {
            return Err(TransportError::Status {
                status: 500,
                message: format!("simulated {kind} failure"),
            });
        }
        Ok(())
    }
}

impl SchemeTransport for RecordingTransport {
    async fn load_scheme(&self, id_scheme: SchemeId) -> Result<FeatureCollection, TransportError> {
        let mut inner = self.lock();
        inner.loads += 1;
        if inner.fail_load {
            return Err(TransportError::Unreachable("simulated load failure".into()));
        }
        match &inner.scheme {
            Some(fc) if fc.id_scheme.is_none() || fc.id_scheme == Some(id_scheme) => Ok(fc.clone()),
            _ => Err(TransportError::Status {
                status: 404,
                message: format!("scheme {id_scheme} not found"),
            }),
        }
    }

    async fn delete_objects(&self, body: &Envelope<FeatureCollection>) -> Result<(), TransportError> {
        self.receive(RequestKind::Delete, body)
    }

    async fn update_objects(&self, body: &Envelope<FeatureCollection>) -> Result<(), TransportError> {
        self.receive(RequestKind::Update, body)
    }

    async fn create_objects(&self, body: &Envelope<FeatureCollection>) -> Result<(), TransportError> {
        self.receive(RequestKind::Create, body)
    }
}
