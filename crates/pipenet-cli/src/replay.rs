// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `pipenet replay`: scripted edits against a scheme, dry-run save.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use pipenet_app_core::EditorPrefs;
use pipenet_core::NodeKind;
use pipenet_edit::{EditEvent, EditSession, Tool, Viewport};
use pipenet_geom::{GeoBounds, Point};
use pipenet_proto::{Envelope, FeatureCollection, SchemeId};
use pipenet_sync::{DryRunTransport, RequestKind, SyncClient};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::scheme;

/// One scripted step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub(crate) enum Step {
    SelectTool { tool: Tool },
    Click { at: [f64; 2] },
    PointerDown { at: [f64; 2] },
    PointerMove { at: [f64; 2] },
    PointerUp { at: [f64; 2] },
    CaptureLost,
    Escape,
    Anchor { kind: NodeKind },
    DismissAnchor,
    Diameter { value: f64 },
    CancelDiameter,
    View {
        min: [f64; 2],
        max: [f64; 2],
        degrees_per_px: f64,
    },
}

fn pt([x, y]: [f64; 2]) -> Point {
    Point::new(x, y)
}

impl From<Step> for EditEvent {
    fn from(step: Step) -> Self {
        match step {
            Step::SelectTool { tool } => Self::SelectTool(tool),
            Step::Click { at } => Self::Click(pt(at)),
            Step::PointerDown { at } => Self::PointerDown(pt(at)),
            Step::PointerMove { at } => Self::PointerMove(pt(at)),
            Step::PointerUp { at } => Self::PointerUp(pt(at)),
            Step::CaptureLost => Self::PointerCaptureLost,
            Step::Escape => Self::KeyEscape,
            Step::Anchor { kind } => Self::AnchorChosen(kind),
            Step::DismissAnchor => Self::AnchorMenuDismissed,
            Step::Diameter { value } => Self::DiameterConfirmed(value),
            Step::CancelDiameter => Self::DiameterCancelled,
            Step::View {
                min,
                max,
                degrees_per_px,
            } => Self::ViewChanged(Viewport {
                bounds: GeoBounds::from_corners(pt(min), pt(max)),
                degrees_per_px,
            }),
        }
    }
}

/// Bodies a save would send, in issue order.
#[derive(Debug, Default, Serialize, PartialEq)]
pub(crate) struct RequestBodies {
    delete_objects: Option<Envelope<FeatureCollection>>,
    update_objects: Option<Envelope<FeatureCollection>>,
    create_objects: Option<Envelope<FeatureCollection>>,
}

/// Replays `steps` on a copy of the scheme and collects the save bodies.
pub(crate) async fn replay(
    loaded: scheme::LoadedScheme,
    steps: Vec<Step>,
    scheme_id: SchemeId,
    prefs: &EditorPrefs,
) -> Result<RequestBodies> {
    let mut session = EditSession::new(loaded.model, &prefs.edit_config())
        .context("invalid editor radii in prefs")?;
    let count = steps.len();
    for step in steps {
        session.handle(step.into());
    }
    info!(steps = count, state = ?session.state(), "replay finished");

    let mut model = session.into_model();
    let mut client = SyncClient::new(DryRunTransport::default(), scheme_id);
    client.save(&mut model).await;

    let mut bodies = RequestBodies::default();
    for sent in client.transport().sent() {
        let slot = match sent.kind {
            RequestKind::Delete => &mut bodies.delete_objects,
            RequestKind::Update => &mut bodies.update_objects,
            RequestKind::Create => &mut bodies.create_objects,
        };
        *slot = Some(sent.body);
    }
    Ok(bodies)
}

pub(crate) async fn run(
    scheme_path: &Path,
    ops_path: &Path,
    scheme_id: Option<SchemeId>,
    prefs: &EditorPrefs,
) -> Result<RequestBodies> {
    let loaded = scheme::load(scheme_path, prefs)?;
    let text = std::fs::read_to_string(ops_path)
        .with_context(|| format!("read ops {}", ops_path.display()))?;
    let steps: Vec<Step> = serde_json::from_str(&text)
        .with_context(|| format!("parse ops {}", ops_path.display()))?;
    let scheme_id = scheme_id
        .or(loaded.id_scheme)
        .or(prefs.scheme_id)
        .context("no scheme id: pass --scheme-id or set id_scheme in the scheme file")?;
    replay(loaded, steps, scheme_id, prefs).await
}

pub(crate) fn write(bodies: &RequestBodies, out: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, bodies)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipenet_core::hydrate;
    use pipenet_dry_tests::SchemeBuilder;
    use pipenet_geom::Tolerance;
    use pipenet_proto::{Geometry, ObjectType};

    fn loaded() -> scheme::LoadedScheme {
        let fc = SchemeBuilder::new(8)
            .node(NodeKind::Well, 1, [0.0, 0.0])
            .node(NodeKind::Consumer, 1, [0.05, 0.0])
            .build();
        let (model, report) = hydrate(&fc.features, Tolerance::default());
        scheme::LoadedScheme {
            model,
            report,
            id_scheme: fc.id_scheme,
        }
    }

    fn steps(json: &str) -> Vec<Step> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn steps_parse_from_tagged_json() {
        let s = steps(
            r#"[{"op":"select_tool","tool":{"add_node":"pump"}},
                {"op":"click","at":[1,2]},
                {"op":"escape"},
                {"op":"view","min":[0,0],"max":[1,1],"degrees_per_px":0.00002}]"#,
        );
        assert_eq!(s[0], Step::SelectTool { tool: Tool::AddNode(NodeKind::Pump) });
        assert_eq!(
            EditEvent::from(s[1].clone()),
            EditEvent::Click(Point::new(1.0, 2.0))
        );
        assert_eq!(EditEvent::from(s[2].clone()), EditEvent::KeyEscape);
    }

    #[tokio::test]
    async fn pipe_between_existing_objects_is_created_only() {
        let ops = steps(
            r#"[{"op":"select_tool","tool":"pipe"},
                {"op":"click","at":[0.0,0.0]},
                {"op":"click","at":[0.02,0.0]},
                {"op":"click","at":[0.05,0.0]},
                {"op":"click","at":[0.05,0.0]},
                {"op":"diameter","value":110}]"#,
        );
        let bodies = replay(loaded(), ops, 8, &EditorPrefs::default())
            .await
            .unwrap();
        assert!(bodies.delete_objects.is_none());
        assert!(bodies.update_objects.is_none());
        let create = bodies.create_objects.unwrap().data;
        assert_eq!(create.id_scheme, Some(8));
        assert_eq!(create.features.len(), 2);
        assert!(create
            .features
            .iter()
            .all(|f| f.name_object_type == ObjectType::Pipe));
        assert_eq!(
            create.features[0].geometry,
            Some(Geometry::LineString {
                coordinates: vec![[0.0, 0.0], [0.02, 0.0]]
            })
        );
    }

    #[tokio::test]
    async fn abandoned_draft_sends_nothing() {
        let ops = steps(
            r#"[{"op":"select_tool","tool":"pipe"},
                {"op":"click","at":[0.0,0.0]},
                {"op":"click","at":[0.02,0.0]},
                {"op":"escape"}]"#,
        );
        let bodies = replay(loaded(), ops, 8, &EditorPrefs::default())
            .await
            .unwrap();
        assert_eq!(bodies, RequestBodies::default());
    }
}
