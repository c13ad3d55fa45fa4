// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted editor preferences (interaction radii, scale, last scheme).

use pipenet_edit::EditConfig;
use pipenet_proto::SchemeId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected preference edit.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrefsError {
    /// Key is not a preference.
    #[error("unknown preference key: {0}")]
    UnknownKey(String),
    /// Value does not parse or is out of range for the key.
    #[error("invalid value for {key}: {value}")]
    InvalidValue {
        /// Preference key.
        key: String,
        /// Offending value.
        value: String,
    },
}

/// Saved preferences for the editor surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPrefs {
    /// Screen radius under which two points are the same point.
    pub coincidence_radius_px: f64,
    /// Screen radius a click snaps to an existing object within.
    pub snap_radius_px: f64,
    /// Screen radius around the last draft vertex that finishes a pipe.
    pub finish_radius_px: f64,
    /// Map scale used until the view reports one.
    pub degrees_per_px: f64,
    /// Scheme opened last.
    pub scheme_id: Option<SchemeId>,
    /// Prefix of generated pipe names.
    pub default_pipe_name_prefix: String,
}

impl Default for EditorPrefs {
    fn default() -> Self {
        let edit = EditConfig::default();
        Self {
            coincidence_radius_px: edit.coincidence_px,
            snap_radius_px: edit.snap_px,
            finish_radius_px: edit.finish_px,
            degrees_per_px: edit.degrees_per_px,
            scheme_id: None,
            default_pipe_name_prefix: edit.pipe_name_prefix,
        }
    }
}

impl EditorPrefs {
    /// Keys accepted by [`EditorPrefs::set`], in display order.
    pub const KEYS: [&'static str; 6] = [
        "coincidence_radius_px",
        "snap_radius_px",
        "finish_radius_px",
        "degrees_per_px",
        "scheme_id",
        "default_pipe_name_prefix",
    ];

    /// Session configuration derived from these preferences.
    pub fn edit_config(&self) -> EditConfig {
        EditConfig {
            coincidence_px: self.coincidence_radius_px,
            snap_px: self.snap_radius_px,
            finish_px: self.finish_radius_px,
            degrees_per_px: self.degrees_per_px,
            pipe_name_prefix: self.default_pipe_name_prefix.clone(),
        }
    }

    /// Update one preference from its textual form.
    ///
    /// Radii and scale must be finite and positive. `scheme_id` accepts an
    /// integer or `none`. The prefix must not be blank.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        let invalid = || PrefsError::InvalidValue {
            key: key.to_owned(),
            value: value.to_owned(),
        };
        let positive = || {
            value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v > 0.0)
                .ok_or_else(invalid)
        };
        match key {
            "coincidence_radius_px" => self.coincidence_radius_px = positive()?,
            "snap_radius_px" => self.snap_radius_px = positive()?,
            "finish_radius_px" => self.finish_radius_px = positive()?,
            "degrees_per_px" => self.degrees_per_px = positive()?,
            "scheme_id" => {
                let v = value.trim();
                self.scheme_id = if v.eq_ignore_ascii_case("none") || v.is_empty() {
                    None
                } else {
                    Some(v.parse().map_err(|_| invalid())?)
                };
            }
            "default_pipe_name_prefix" => {
                let v = value.trim();
                if v.is_empty() {
                    return Err(invalid());
                }
                v.clone_into(&mut self.default_pipe_name_prefix);
            }
            _ => return Err(PrefsError::UnknownKey(key.to_owned())),
        }
        Ok(())
    }

    /// Current value of every preference as `(key, text)`, in [`Self::KEYS`] order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let scheme = self
            .scheme_id
            .map_or_else(|| "none".to_owned(), |id| id.to_string());
        vec![
            (Self::KEYS[0], self.coincidence_radius_px.to_string()),
            (Self::KEYS[1], self.snap_radius_px.to_string()),
            (Self::KEYS[2], self.finish_radius_px.to_string()),
            (Self::KEYS[3], self.degrees_per_px.to_string()),
            (Self::KEYS[4], scheme),
            (Self::KEYS[5], self.default_pipe_name_prefix.clone()),
        ]
    }
}
