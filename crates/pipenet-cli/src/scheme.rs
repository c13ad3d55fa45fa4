// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Reading scheme files.

use std::path::Path;

use anyhow::{Context, Result};
use pipenet_app_core::EditorPrefs;
use pipenet_core::{hydrate_json, HydrateReport, NetworkModel};
use pipenet_geom::Tolerance;
use pipenet_proto::SchemeId;
use serde::Deserialize;

#[derive(Deserialize)]
struct Header {
    #[serde(default)]
    id_scheme: Option<SchemeId>,
}

/// A hydrated scheme file.
pub(crate) struct LoadedScheme {
    pub(crate) model: NetworkModel,
    pub(crate) report: HydrateReport,
    pub(crate) id_scheme: Option<SchemeId>,
}

/// Coincidence tolerance the prefs describe.
pub(crate) fn tolerance(prefs: &EditorPrefs) -> Result<Tolerance> {
    Tolerance::screen(prefs.coincidence_radius_px, prefs.degrees_per_px)
        .context("invalid coincidence radius or scale in prefs")
}

/// Read and hydrate a scheme load response.
pub(crate) fn load(path: &Path, prefs: &EditorPrefs) -> Result<LoadedScheme> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read scheme {}", path.display()))?;
    let header: Header = serde_json::from_str(&text)
        .with_context(|| format!("parse scheme {}", path.display()))?;
    let (model, report) = hydrate_json(&text, tolerance(prefs)?)
        .with_context(|| format!("hydrate scheme {}", path.display()))?;
    Ok(LoadedScheme {
        model,
        report,
        id_scheme: header.id_scheme,
    })
}
