// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for pipenet crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`scheme`] - Backend-shaped feature collection builder and fixture loading
//! - [`transport`] - Recording scheme transport with per-endpoint failure switches

pub mod config;
pub mod scheme;
pub mod transport;

pub use config::InMemoryConfigStore;
pub use scheme::{read_scheme, SchemeBuilder};
pub use transport::RecordingTransport;
