// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `pipenet inspect`: scheme summary.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use comfy_table::Table;
use pipenet_app_core::EditorPrefs;
use pipenet_core::{junctions, polylines, NetworkModel, NodeKind};
use pipenet_proto::{ObjectType, SchemeId};
use serde::Serialize;

use crate::scheme;

#[derive(Debug, Serialize, PartialEq)]
struct Summary {
    id_scheme: Option<SchemeId>,
    counts: Vec<TypeCount>,
    skipped: usize,
    junctions: Vec<JunctionRow>,
    polylines: Vec<PolylineRow>,
}

#[derive(Debug, Serialize, PartialEq)]
struct TypeCount {
    object_type: ObjectType,
    count: usize,
}

#[derive(Debug, Serialize, PartialEq)]
struct JunctionRow {
    at: [f64; 2],
    degree: usize,
}

#[derive(Debug, Serialize, PartialEq)]
struct PolylineRow {
    name: String,
    segments: usize,
    vertices: usize,
    length_deg: f64,
}

fn summarize(model: &NetworkModel, id_scheme: Option<SchemeId>, skipped: usize) -> Summary {
    let mut counts: Vec<TypeCount> = NodeKind::ALL
        .iter()
        .map(|k| TypeCount {
            object_type: k.object_type(),
            count: model.nodes_of(*k).count(),
        })
        .collect();
    counts.push(TypeCount {
        object_type: ObjectType::Pipe,
        count: model.segment_count(),
    });
    counts.sort_by_key(|c| c.object_type);

    Summary {
        id_scheme,
        counts,
        skipped,
        junctions: junctions(model)
            .iter()
            .map(|j| JunctionRow {
                at: j.at.to_array(),
                degree: j.degree(),
            })
            .collect(),
        polylines: polylines(model)
            .into_iter()
            .map(|p| PolylineRow {
                length_deg: p.vertices.windows(2).map(|w| w[0].distance(w[1])).sum(),
                segments: p.segments.len(),
                vertices: p.vertices.len(),
                name: p.name,
            })
            .collect(),
    }
}

fn render(summary: &Summary, out: &mut dyn Write) -> Result<()> {
    let scheme = summary
        .id_scheme
        .map_or_else(|| "-".to_owned(), |id| id.to_string());
    writeln!(out, "scheme {scheme}, {} features skipped", summary.skipped)?;

    let mut counts = Table::new();
    counts.set_header(vec!["object type", "count"]);
    for c in &summary.counts {
        counts.add_row(vec![c.object_type.to_string(), c.count.to_string()]);
    }
    writeln!(out, "{counts}")?;

    if !summary.junctions.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["junction", "degree"]);
        for j in &summary.junctions {
            table.add_row(vec![format!("{},{}", j.at[0], j.at[1]), j.degree.to_string()]);
        }
        writeln!(out, "{table}")?;
    }

    if !summary.polylines.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["polyline", "segments", "vertices", "length (deg)"]);
        for p in &summary.polylines {
            table.add_row(vec![
                p.name.clone(),
                p.segments.to_string(),
                p.vertices.to_string(),
                format!("{:.6}", p.length_deg),
            ]);
        }
        writeln!(out, "{table}")?;
    }
    Ok(())
}

pub(crate) fn run(path: &Path, prefs: &EditorPrefs, json: bool, out: &mut dyn Write) -> Result<()> {
    let loaded = scheme::load(path, prefs)?;
    let summary = summarize(&loaded.model, loaded.id_scheme, loaded.report.skipped);
    if json {
        serde_json::to_writer_pretty(&mut *out, &summary)?;
        writeln!(out)?;
    } else {
        render(&summary, out)?;
    }
    Ok(())
}
