// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `pipenet`: inspect schemes, replay scripted edits, manage editor prefs.

mod inspect;
mod prefs;
mod replay;
mod scheme;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pipenet_app_core::{ConfigService, EditorPrefs};
use pipenet_config_fs::FsConfigStore;
use pipenet_proto::SchemeId;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pipenet", author, version, about = "Pipenet scheme tools")]
struct Cli {
    /// Config directory (defaults to the platform config dir)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize a scheme file: object counts, junctions, polylines
    Inspect {
        /// Scheme load response (FeatureCollection JSON)
        scheme: PathBuf,
        /// Emit JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Apply scripted edits to a scheme and print the save request bodies
    Replay {
        /// Scheme load response (FeatureCollection JSON)
        scheme: PathBuf,
        /// JSON array of edit steps
        ops: PathBuf,
        /// Scheme id for create/delete bodies (defaults to the file's `id_scheme`)
        #[arg(long)]
        scheme_id: Option<SchemeId>,
    },
    /// Show editor preferences, optionally changing some first
    Prefs {
        /// `key=value` assignment (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },
}

fn config(dir: Option<PathBuf>) -> Result<ConfigService<FsConfigStore>> {
    let store = match dir {
        Some(dir) => FsConfigStore::at(&dir)
            .with_context(|| format!("open config dir {}", dir.display()))?,
        None => FsConfigStore::new().context("open platform config dir")?,
    };
    Ok(ConfigService::new(store))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(io::stderr)
        .init();

    let svc = config(cli.config_dir)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Inspect { scheme, json } => {
            let prefs: EditorPrefs = svc.editor_prefs()?;
            inspect::run(&scheme, &prefs, json, &mut out)?;
        }
        Command::Replay {
            scheme,
            ops,
            scheme_id,
        } => {
            let prefs = svc.editor_prefs()?;
            let bodies = replay::run(&scheme, &ops, scheme_id, &prefs).await?;
            replay::write(&bodies, &mut out)?;
        }
        Command::Prefs { set } => prefs::run(&svc, &set, &mut out)?,
    }
    out.flush()?;
    Ok(())
}
