// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory config store fake for testing without filesystem I/O.

use pipenet_app_core::config::{ConfigError, ConfigStore};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory [`ConfigStore`] with call counters and failure switches.
///
/// Clones share state, so a test can keep one handle while a
/// [`ConfigService`](pipenet_app_core::ConfigService) owns another.
///
/// # Example
///
/// ```
/// use pipenet_dry_tests::InMemoryConfigStore;
/// use pipenet_app_core::{ConfigPort, ConfigService, EditorPrefs};
///
/// let store = InMemoryConfigStore::new();
/// let service = ConfigService::new(store.clone());
///
/// service.save_prefs(&EditorPrefs::default()).unwrap();
/// assert_eq!(store.save_count(), 1);
/// assert!(store.contains_key("editor_prefs"));
/// ```
#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    data: BTreeMap<String, Vec<u8>>,
    load_count: usize,
    save_count: usize,
    fail_on_load: bool,
    fail_on_save: bool,
}

impl InMemoryConfigStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `raw` under `key`.
    pub fn with_blob(key: &str, raw: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        store.lock().data.insert(key.to_owned(), raw.into());
        store
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Make every load fail with [`ConfigError::Other`].
    pub fn set_fail_on_load(&self, fail: bool) {
        self.lock().fail_on_load = fail;
    }

    /// Make every save fail with [`ConfigError::Other`].
    pub fn set_fail_on_save(&self, fail: bool) {
        self.lock().fail_on_save = fail;
    }

    /// `load_raw` calls attempted, including failed ones.
    pub fn load_count(&self) -> usize {
        self.lock().load_count
    }

    /// `save_raw` calls attempted, including failed ones.
    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }

    /// Stored blob for `key` as text, if any.
    pub fn text(&self, key: &str) -> Option<String> {
        self.lock()
            .data
            .get(key)
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    /// Whether `key` is stored.
    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().data.contains_key(key)
    }

    /// Stored keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.lock().data.keys().cloned().collect()
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        let mut inner = self.lock();
        inner.load_count += 1;
        if inner.fail_on_load {
            return Err(ConfigError::Other("simulated load failure".into()));
        }
        inner.data.get(key).cloned().ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let mut inner = self.lock();
        inner.save_count += 1;
        if inner.fail_on_save {
            return Err(ConfigError::Other("simulated save failure".into()));
        }
        inner.data.insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}
