// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config service and storage port.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::config_port::ConfigPort;
use crate::prefs::EditorPrefs;

/// Storage port for raw config blobs (keyed by logical name).
pub trait ConfigStore {
    /// Load a raw config blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Persist a raw config blob.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key not present in store.
    #[error("not found")]
    NotFound,
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// Serializes config values as JSON and delegates storage to a [`ConfigStore`].
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Key editor preferences are stored under.
    pub const PREFS_KEY: &'static str = "editor_prefs";

    /// Create a new service using the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the inner store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the service and return the inner store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Load and deserialize a config value for `key`. `Ok(None)` if missing or empty.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        match self.store.load_raw(key) {
            Ok(bytes) if bytes.is_empty() => Ok(None),
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Serialize and persist a config value for `key`.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), ConfigError>
    where
        T: Serialize,
    {
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)
    }

    /// Stored editor preferences, or the defaults when none are stored.
    pub fn editor_prefs(&self) -> Result<EditorPrefs, ConfigError> {
        Ok(self.load(Self::PREFS_KEY)?.unwrap_or_default())
    }
}

impl<S> ConfigPort for ConfigService<S>
where
    S: ConfigStore,
{
    fn load_prefs(&self) -> Option<EditorPrefs> {
        self.load(Self::PREFS_KEY).ok().flatten()
    }

    fn save_prefs(&self, prefs: &EditorPrefs) -> Result<(), ConfigError> {
        self.save(Self::PREFS_KEY, prefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MapStore(RefCell<HashMap<String, Vec<u8>>>);

    impl ConfigStore for MapStore {
        fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
            self.0.borrow().get(key).cloned().ok_or(ConfigError::NotFound)
        }

        fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
            self.0.borrow_mut().insert(key.to_owned(), data.to_vec());
            Ok(())
        }
    }

    #[test]
    fn missing_and_empty_blobs_load_as_none() {
        let svc = ConfigService::new(MapStore::default());
        assert!(svc.load::<EditorPrefs>("absent").unwrap().is_none());
        svc.store().save_raw("blank", b"").unwrap();
        assert!(svc.load::<EditorPrefs>("blank").unwrap().is_none());
    }

    #[test]
    fn editor_prefs_fall_back_to_defaults() {
        let svc = ConfigService::new(MapStore::default());
        assert_eq!(svc.editor_prefs().unwrap(), EditorPrefs::default());
    }

    #[test]
    fn garbage_blob_is_a_serde_error_but_port_hides_it() {
        let svc = ConfigService::new(MapStore::default());
        svc.store()
            .save_raw(ConfigService::<MapStore>::PREFS_KEY, b"{not json")
            .unwrap();
        assert!(matches!(svc.editor_prefs(), Err(ConfigError::Serde(_))));
        assert!(svc.load_prefs().is_none());
    }

    #[test]
    fn port_round_trips_prefs() {
        let svc = ConfigService::new(MapStore::default());
        let prefs = EditorPrefs {
            scheme_id: Some(42),
            snap_radius_px: 20.0,
            ..EditorPrefs::default()
        };
        svc.save_prefs(&prefs).unwrap();
        assert_eq!(svc.load_prefs(), Some(prefs));
    }
}
