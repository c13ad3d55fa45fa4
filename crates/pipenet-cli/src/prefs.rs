// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `pipenet prefs`: show and edit stored editor preferences.

use std::io::Write;

use anyhow::{anyhow, Context, Result};
use comfy_table::Table;
use pipenet_app_core::{ConfigPort, ConfigService, ConfigStore, EditorPrefs};

/// Applies `key=value` assignments and returns the resulting prefs. Nothing is
/// applied unless every assignment is valid.
fn apply(mut prefs: EditorPrefs, assignments: &[String]) -> Result<EditorPrefs> {
    for a in assignments {
        let (key, value) = a
            .split_once('=')
            .ok_or_else(|| anyhow!("expected key=value, got {a:?}"))?;
        prefs.set(key.trim(), value)?;
    }
    Ok(prefs)
}

pub(crate) fn run<S>(svc: &ConfigService<S>, set: &[String], out: &mut dyn Write) -> Result<()>
where
    S: ConfigStore,
{
    let mut prefs = svc.editor_prefs().context("load editor prefs")?;
    if !set.is_empty() {
        prefs = apply(prefs, set)?;
        svc.save_prefs(&prefs).context("save editor prefs")?;
    }
    let mut table = Table::new();
    table.set_header(vec!["preference", "value"]);
    for (key, value) in prefs.entries() {
        table.add_row(vec![key.to_owned(), value]);
    }
    writeln!(out, "{table}")?;
    Ok(())
}
