// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scheme sync: the transport port, save planning, and the client that
//! reconciles a [`NetworkModel`](pipenet_core::NetworkModel) with the backend.
//!
//! A save issues up to three independent requests (delete, update, create).
//! Each one acknowledges only its own change set, so a partial failure leaves
//! exactly the failed set pending for the next attempt.

mod client;
mod plan;
mod transport;

pub use client::{RequestOutcome, SaveReport, SyncClient};
pub use plan::{PlannedRequest, RequestKind, SavePlan};
pub use transport::{DryRunTransport, SchemeTransport, SentRequest, TransportError};
