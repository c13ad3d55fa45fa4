// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for pipenet front ends (config, prefs, toasts).
//! Keeps UI and CLI adapters thin and framework-agnostic.

pub mod config;
pub mod config_port;
pub mod prefs;
pub mod toast;

pub use config::{ConfigError, ConfigService, ConfigStore};
pub use config_port::ConfigPort;
pub use prefs::{EditorPrefs, PrefsError};
pub use toast::{Toast, ToastId, ToastKind, ToastRender, ToastScope, ToastService};
