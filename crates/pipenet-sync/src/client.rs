// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Sync client: loads schemes and pushes pending changes.

use std::time::Instant;

use pipenet_app_core::toast::{ToastKind, ToastService};
use pipenet_core::{codec, HydrateReport, NetworkModel};
use pipenet_geom::Tolerance;
use pipenet_proto::SchemeId;
use tracing::{debug, info, instrument, warn};

use crate::plan::{PlannedRequest, RequestKind, SavePlan};
use crate::transport::{SchemeTransport, TransportError};

/// What happened to one request of a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Nothing was pending; no request sent.
    Skipped,
    /// Sent and accepted.
    Sent {
        /// Features in the body.
        features: usize,
    },
    /// Sent and rejected; the set stays pending.
    Failed(TransportError),
}

impl RequestOutcome {
    /// `true` for [`RequestOutcome::Failed`].
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Per-endpoint outcome of [`SyncClient::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    /// `delete_objects`.
    pub delete: RequestOutcome,
    /// `update_objects`.
    pub update: RequestOutcome,
    /// `create_objects`.
    pub create: RequestOutcome,
}

impl SaveReport {
    /// Outcome for one endpoint.
    pub fn outcome(&self, kind: RequestKind) -> &RequestOutcome {
        match kind {
            RequestKind::Delete => &self.delete,
            RequestKind::Update => &self.update,
            RequestKind::Create => &self.create,
        }
    }

    /// `true` when no request failed.
    pub fn is_ok(&self) -> bool {
        RequestKind::ALL.iter().all(|k| !self.outcome(*k).is_failed())
    }

    /// `true` when every request was skipped.
    pub fn is_noop(&self) -> bool {
        RequestKind::ALL
            .iter()
            .all(|k| *self.outcome(*k) == RequestOutcome::Skipped)
    }
}

/// Reconciles one scheme with the backend through a [`SchemeTransport`].
#[derive(Debug)]
pub struct SyncClient<T> {
    transport: T,
    scheme_id: SchemeId,
    toasts: ToastService,
}

impl<T> SyncClient<T>
where
    T: SchemeTransport,
{
    /// Client bound to `scheme_id`.
    pub fn new(transport: T, scheme_id: SchemeId) -> Self {
        Self {
            transport,
            scheme_id,
            toasts: ToastService::default(),
        }
    }

    /// Scheme saves are bound to.
    pub fn scheme_id(&self) -> SchemeId {
        self.scheme_id
    }

    /// Underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Toasts raised by loads and saves.
    pub fn toasts(&self) -> &ToastService {
        &self.toasts
    }

    /// Mutable toasts (for expiring or dismissing).
    pub fn toasts_mut(&mut self) -> &mut ToastService {
        &mut self.toasts
    }

    /// Fetch a scheme and hydrate a model from it. On success the client is
    /// rebound to `scheme_id`.
    #[instrument(skip(self, tolerance))]
    pub async fn load(
        &mut self,
        scheme_id: SchemeId,
        tolerance: Tolerance,
    ) -> Result<(NetworkModel, HydrateReport), TransportError> {
        match self.transport.load_scheme(scheme_id).await {
            Ok(fc) => {
                let (model, report) = codec::hydrate(&fc.features, tolerance);
                info!(
                    nodes = report.nodes,
                    segments = report.segments,
                    skipped = report.skipped,
                    "scheme loaded"
                );
                if report.skipped > 0 {
                    self.toasts.notify(
                        ToastKind::Warn,
                        "Часть объектов схемы пропущена",
                        Some(format!("{} features skipped", report.skipped)),
                        Instant::now(),
                    );
                }
                self.scheme_id = scheme_id;
                Ok((model, report))
            }
            Err(err) => {
                warn!(%err, "scheme load failed");
                self.toasts.notify(
                    ToastKind::Error,
                    "Не удалось загрузить схему",
                    Some(err.to_string()),
                    Instant::now(),
                );
                Err(err)
            }
        }
    }

    /// Push every pending change.
    ///
    /// The three requests run concurrently. Each success acknowledges the
    /// entries its body was built from; entries edited while the request was
    /// in flight stay pending. A failure leaves its set untouched.
    #[instrument(skip_all, fields(scheme = self.scheme_id))]
    pub async fn save(&mut self, model: &mut NetworkModel) -> SaveReport {
        let plan = SavePlan::prepare(model, self.scheme_id);
        if plan.is_empty() {
            debug!("nothing to save");
            return SaveReport {
                delete: RequestOutcome::Skipped,
                update: RequestOutcome::Skipped,
                create: RequestOutcome::Skipped,
            };
        }

        let (delete, update, create) = tokio::join!(
            send(&self.transport, plan.delete.as_ref()),
            send(&self.transport, plan.update.as_ref()),
            send(&self.transport, plan.create.as_ref()),
        );
        let report = SaveReport {
            delete,
            update,
            create,
        };

        for req in plan.requests() {
            match report.outcome(req.kind) {
                RequestOutcome::Sent { .. } => model.acknowledge(req.kind.change_kind(), &req.acks),
                RequestOutcome::Failed(err) => {
                    warn!(request = %req.kind, %err, pending = req.acks.len(), "sync request failed");
                }
                RequestOutcome::Skipped => {}
            }
        }

        let now = Instant::now();
        if report.is_ok() {
            info!("changes saved");
            self.toasts
                .notify(ToastKind::Info, "Изменения сохранены", None, now);
        } else {
            let failed: Vec<String> = RequestKind::ALL
                .iter()
                .filter(|k| report.outcome(**k).is_failed())
                .map(ToString::to_string)
                .collect();
            self.toasts.notify(
                ToastKind::Error,
                "Не удалось сохранить изменения",
                Some(failed.join(", ")),
                now,
            );
        }
        report
    }
}

async fn send<T>(transport: &T, req: Option<&PlannedRequest>) -> RequestOutcome
where
    T: SchemeTransport,
{
    let Some(req) = req else {
        return RequestOutcome::Skipped;
    };
    let result = match req.kind {
        RequestKind::Delete => transport.delete_objects(&req.body).await,
        RequestKind::Update => transport.update_objects(&req.body).await,
        RequestKind::Create => transport.create_objects(&req.body).await,
    };
    match result {
        Ok(()) => {
            debug!(request = %req.kind, features = req.body.data.len(), "request accepted");
            RequestOutcome::Sent {
                features: req.body.data.len(),
            }
        }
        Err(err) => RequestOutcome::Failed(err),
    }
}
