// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Transport port to the scheme backend.

use std::future::Future;
use std::sync::{Arc, Mutex};

use pipenet_proto::{Envelope, FeatureCollection, SchemeId};
use thiserror::Error;

use crate::plan::RequestKind;

/// Failure talking to the backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Backend could not be reached.
    #[error("backend unreachable: {0}")]
    Unreachable(String),
    /// Backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Status {
        /// HTTP-like status code.
        status: u16,
        /// Response text.
        message: String,
    },
    /// Response body did not decode.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Async port to the scheme store. Every call is idempotent.
pub trait SchemeTransport: Send + Sync {
    /// Fetch every feature of a scheme.
    fn load_scheme(
        &self,
        id_scheme: SchemeId,
    ) -> impl Future<Output = Result<FeatureCollection, TransportError>> + Send;

    /// Remove objects. Body features are tombstones.
    fn delete_objects(
        &self,
        body: &Envelope<FeatureCollection>,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Overwrite existing objects.
    fn update_objects(
        &self,
        body: &Envelope<FeatureCollection>,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Insert new objects.
    fn create_objects(
        &self,
        body: &Envelope<FeatureCollection>,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// A request body captured by [`DryRunTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct SentRequest {
    /// Which endpoint it was sent to.
    pub kind: RequestKind,
    /// Exact body.
    pub body: Envelope<FeatureCollection>,
}

/// Transport that accepts every request and keeps the bodies.
///
/// Loads answer with the collection given at construction. Clones share the
/// captured log.
#[derive(Debug, Clone, Default)]
pub struct DryRunTransport {
    scheme: FeatureCollection,
    sent: Arc<Mutex<Vec<SentRequest>>>,
}

impl DryRunTransport {
    /// Transport whose loads return `scheme`.
    pub fn new(scheme: FeatureCollection) -> Self {
        Self {
            scheme,
            sent: Arc::default(),
        }
    }

    /// Bodies captured so far, in send order.
    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Forget captured bodies.
    pub fn clear(&self) {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn record(&self, kind: RequestKind, body: &Envelope<FeatureCollection>) {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SentRequest {
                kind,
                body: body.clone(),
            });
    }
}

impl SchemeTransport for DryRunTransport {
    async fn load_scheme(&self, id_scheme: SchemeId) -> Result<FeatureCollection, TransportError> {
        let mut fc = self.scheme.clone();
        fc.id_scheme = Some(id_scheme);
        Ok(fc)
    }

    async fn delete_objects(&self, body: &Envelope<FeatureCollection>) -> Result<(), TransportError> {
        self.record(RequestKind::Delete, body);
        Ok(())
    }

    async fn update_objects(&self, body: &Envelope<FeatureCollection>) -> Result<(), TransportError> {
        self.record(RequestKind::Update, body);
        Ok(())
    }

    async fn create_objects(&self, body: &Envelope<FeatureCollection>) -> Result<(), TransportError> {
        self.record(RequestKind::Create, body);
        Ok(())
    }
}
