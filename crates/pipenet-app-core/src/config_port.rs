// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config port held by editor front ends (map view, CLI).

use crate::config::ConfigError;
use crate::prefs::EditorPrefs;

/// Load/save seam for editor preferences.
pub trait ConfigPort {
    /// Load editor preferences (None if missing or unreadable).
    fn load_prefs(&self) -> Option<EditorPrefs>;
    /// Persist editor preferences.
    fn save_prefs(&self, prefs: &EditorPrefs) -> Result<(), ConfigError>;
}
