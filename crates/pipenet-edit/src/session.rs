// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The edit session: owns the model and folds events into state transitions.

use pipenet_core::{Hit, NetworkModel, NodeKind};
use pipenet_geom::{is_same, GeomError, Point, Tolerance};
use tracing::{debug, info, warn};

use crate::event::{Cursor, DragTarget, EditEffect, EditEvent, PipeEnd, Tool, Viewport};
use crate::state::{Drag, DraftStage, EditState, PipeDraft};

/// Pixel radii and naming used by a session.
#[derive(Debug, Clone, PartialEq)]
pub struct EditConfig {
    /// Radius under which two points are the same point.
    pub coincidence_px: f64,
    /// Radius a click snaps to an existing object within.
    pub snap_px: f64,
    /// Radius around the last draft vertex that finishes a pipe.
    pub finish_px: f64,
    /// Scale assumed until the view reports one.
    pub degrees_per_px: f64,
    /// Prefix of generated pipe names (`"<prefix> #<id>"`).
    pub pipe_name_prefix: String,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            coincidence_px: 10.0,
            snap_px: 15.0,
            finish_px: 10.0,
            degrees_per_px: Tolerance::DEFAULT_DEGREES_PER_PX,
            pipe_name_prefix: "Труба".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Reach {
    coincidence: Tolerance,
    snap: Tolerance,
    finish: Tolerance,
}

impl Reach {
    fn new(cfg: &EditConfig) -> Result<Self, GeomError> {
        Ok(Self {
            coincidence: Tolerance::screen(cfg.coincidence_px, cfg.degrees_per_px)?,
            snap: Tolerance::screen(cfg.snap_px, cfg.degrees_per_px)?,
            finish: Tolerance::screen(cfg.finish_px, cfg.degrees_per_px)?,
        })
    }

    fn at_scale(self, degrees_per_px: f64) -> Result<Self, GeomError> {
        Ok(Self {
            coincidence: self.coincidence.at_scale(degrees_per_px)?,
            snap: self.snap.at_scale(degrees_per_px)?,
            finish: self.finish.at_scale(degrees_per_px)?,
        })
    }
}

type Step = (EditState, Vec<EditEffect>);

/// One operator's editing session over a network model.
///
/// Every input goes through [`EditSession::handle`], which returns the view
/// effects to perform. Aborting a pipe draw or a drag leaves the model equal
/// to what it was when the interaction began.
#[derive(Debug, Clone)]
pub struct EditSession {
    model: NetworkModel,
    state: EditState,
    reach: Reach,
    viewport: Option<Viewport>,
    pipe_name_prefix: String,
}

impl EditSession {
    /// Starts a session; the model adopts the configured coincidence radius.
    pub fn new(mut model: NetworkModel, config: &EditConfig) -> Result<Self, GeomError> {
        let reach = Reach::new(config)?;
        model.set_tolerance(reach.coincidence);
        Ok(Self {
            model,
            state: EditState::Idle,
            reach,
            viewport: None,
            pipe_name_prefix: config.pipe_name_prefix.clone(),
        })
    }

    /// The edited model.
    #[must_use]
    pub fn model(&self) -> &NetworkModel {
        &self.model
    }

    /// Mutable access for collaborators such as the sync client.
    pub fn model_mut(&mut self) -> &mut NetworkModel {
        &mut self.model
    }

    /// Ends the session.
    #[must_use]
    pub fn into_model(self) -> NetworkModel {
        self.model
    }

    /// Current interaction state.
    #[must_use]
    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// Last reported viewport.
    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Snap radius at the current scale.
    #[must_use]
    pub fn snap_tolerance(&self) -> Tolerance {
        self.reach.snap
    }

    /// Applies one input event.
    pub fn handle(&mut self, event: EditEvent) -> Vec<EditEffect> {
        let state = std::mem::take(&mut self.state);
        let (next, fx) = match event {
            EditEvent::ViewChanged(vp) => self.view_changed(state, vp),
            EditEvent::SelectTool(tool) => self.select_tool(state, tool),
            ev => match state {
                EditState::Idle => (EditState::Idle, Vec::new()),
                EditState::ToolSelected(tool) => self.armed(tool, ev),
                EditState::DrawingPipe(draft) => self.drawing(draft, ev),
                EditState::Dragging(drag) => self.dragging(drag, ev),
            },
        };
        self.state = next;
        fx
    }

    fn view_changed(&mut self, state: EditState, vp: Viewport) -> Step {
        match self.reach.at_scale(vp.degrees_per_px) {
            Ok(reach) => {
                self.reach = reach;
                self.model.set_tolerance(reach.coincidence);
                self.viewport = Some(vp);
            }
            Err(err) => warn!(%err, "ignoring viewport with invalid scale"),
        }
        (state, Vec::new())
    }

    /// Rolls the model back to a drag snapshot. The tolerance follows the
    /// current view, not the snapshot.
    fn restore(&mut self, snapshot: NetworkModel) {
        self.model = snapshot;
        self.model.set_tolerance(self.reach.coincidence);
    }

    fn select_tool(&mut self, state: EditState, tool: Tool) -> Step {
        let active = state.tool();
        let mut fx = Vec::new();
        match state {
            EditState::DrawingPipe(_) => {
                fx.extend([EditEffect::CloseDialogs, EditEffect::ClearPreview]);
            }
            EditState::Dragging(drag) => {
                self.restore(*drag.snapshot);
                fx.push(EditEffect::ClearHighlight);
            }
            EditState::Idle | EditState::ToolSelected(_) => {}
        }
        if active == Some(tool) {
            debug!(?tool, "tool released");
            fx.extend([
                EditEffect::SetCursor(Cursor::Default),
                EditEffect::MapPanning(true),
                EditEffect::Redraw,
            ]);
            return (EditState::Idle, fx);
        }
        debug!(?tool, "tool selected");
        match tool {
            Tool::Edit => fx.extend([
                EditEffect::MapPanning(true),
                EditEffect::SetCursor(Cursor::Pointer),
            ]),
            Tool::Pipe | Tool::AddNode(_) => fx.extend([
                EditEffect::MapPanning(false),
                EditEffect::SetCursor(Cursor::Crosshair),
            ]),
        }
        fx.push(EditEffect::Redraw);
        (EditState::ToolSelected(tool), fx)
    }

    fn armed(&mut self, tool: Tool, ev: EditEvent) -> Step {
        match (tool, ev) {
            (Tool::AddNode(kind), EditEvent::Click(p)) => {
                self.model.add_node(kind, p);
                (EditState::ToolSelected(tool), vec![EditEffect::Redraw])
            }
            (Tool::Pipe, EditEvent::Click(p)) => self.begin_pipe(p),
            (Tool::Edit, EditEvent::PointerDown(p)) => self.begin_drag(p),
            _ => (EditState::ToolSelected(tool), Vec::new()),
        }
    }

    // ── pipe drawing ───────────────────────────────────────────────────────

    fn begin_pipe(&mut self, p: Point) -> Step {
        match self.model.snap(p, self.reach.snap) {
            Some(at) => (
                EditState::DrawingPipe(PipeDraft::starting_at(at, DraftStage::Drawing)),
                vec![EditEffect::Redraw],
            ),
            None => (
                EditState::DrawingPipe(PipeDraft::starting_at(
                    p,
                    DraftStage::ChoosingStartAnchor,
                )),
                vec![EditEffect::OpenAnchorMenu {
                    at: p,
                    end: PipeEnd::Start,
                }],
            ),
        }
    }

    fn drawing(&mut self, mut draft: PipeDraft, ev: EditEvent) -> Step {
        match (draft.stage, ev) {
            (_, EditEvent::KeyEscape) => {
                debug!(vertices = draft.vertices.len(), "pipe draft discarded");
                (
                    EditState::ToolSelected(Tool::Pipe),
                    vec![
                        EditEffect::CloseDialogs,
                        EditEffect::ClearPreview,
                        EditEffect::Redraw,
                    ],
                )
            }
            (DraftStage::ChoosingStartAnchor, EditEvent::AnchorChosen(kind)) => {
                draft.start_anchor = Some(kind);
                draft.stage = DraftStage::Drawing;
                (
                    EditState::DrawingPipe(draft),
                    vec![EditEffect::CloseDialogs, EditEffect::Redraw],
                )
            }
            (DraftStage::ChoosingStartAnchor, EditEvent::AnchorMenuDismissed) => (
                EditState::ToolSelected(Tool::Pipe),
                vec![EditEffect::CloseDialogs],
            ),
            (DraftStage::Drawing, EditEvent::Click(p)) => self.draft_click(draft, p),
            (DraftStage::Drawing, EditEvent::PointerMove(p)) => {
                let fx = draft
                    .last()
                    .map(|from| EditEffect::PreviewSegment {
                        from,
                        to: self.model.snap(p, self.reach.snap).unwrap_or(p),
                    })
                    .into_iter()
                    .collect();
                (EditState::DrawingPipe(draft), fx)
            }
            (DraftStage::AwaitingDiameter, EditEvent::DiameterConfirmed(d)) => {
                self.diameter_confirmed(draft, d)
            }
            (DraftStage::AwaitingDiameter, EditEvent::DiameterCancelled) => {
                draft.stage = DraftStage::Drawing;
                (EditState::DrawingPipe(draft), vec![EditEffect::CloseDialogs])
            }
            (DraftStage::ChoosingEndAnchor, EditEvent::AnchorChosen(kind)) => {
                self.commit(draft, Some(kind))
            }
            (DraftStage::ChoosingEndAnchor, EditEvent::AnchorMenuDismissed) => {
                draft.stage = DraftStage::Drawing;
                draft.diameter = None;
                (EditState::DrawingPipe(draft), vec![EditEffect::CloseDialogs])
            }
            _ => (EditState::DrawingPipe(draft), Vec::new()),
        }
    }

    fn draft_click(&mut self, mut draft: PipeDraft, p: Point) -> Step {
        let Some(last) = draft.last() else {
            return (EditState::ToolSelected(Tool::Pipe), Vec::new());
        };
        if is_same(p, last, self.reach.finish) {
            // A repeat click on the start vertex is not a finish.
            if draft.vertices.len() < 2 {
                return (EditState::DrawingPipe(draft), Vec::new());
            }
            draft.stage = DraftStage::AwaitingDiameter;
            return (
                EditState::DrawingPipe(draft),
                vec![EditEffect::ClearPreview, EditEffect::PromptDiameter],
            );
        }
        let at = self.model.snap(p, self.reach.snap).unwrap_or(p);
        draft.vertices.push(at);
        (EditState::DrawingPipe(draft), vec![EditEffect::Redraw])
    }

    fn diameter_confirmed(&mut self, mut draft: PipeDraft, d: f64) -> Step {
        if !d.is_finite() || d <= 0.0 {
            warn!(diameter = d, "rejecting pipe diameter");
            return (EditState::DrawingPipe(draft), vec![EditEffect::PromptDiameter]);
        }
        draft.diameter = Some(d);
        let Some(end) = draft.last() else {
            return (EditState::ToolSelected(Tool::Pipe), Vec::new());
        };
        let on_start_anchor = draft.start_anchor.is_some()
            && draft
                .vertices
                .first()
                .is_some_and(|s| is_same(*s, end, self.reach.snap));
        if on_start_anchor || self.model.snap(end, self.reach.snap).is_some() {
            return self.commit(draft, None);
        }
        draft.stage = DraftStage::ChoosingEndAnchor;
        (
            EditState::DrawingPipe(draft),
            vec![
                EditEffect::CloseDialogs,
                EditEffect::OpenAnchorMenu {
                    at: end,
                    end: PipeEnd::End,
                },
            ],
        )
    }

    fn commit(&mut self, draft: PipeDraft, end_anchor: Option<NodeKind>) -> Step {
        let done = vec![
            EditEffect::CloseDialogs,
            EditEffect::ClearPreview,
            EditEffect::Redraw,
        ];
        let (Some(diameter), Some(first), Some(last)) =
            (draft.diameter, draft.vertices.first().copied(), draft.last())
        else {
            return (EditState::ToolSelected(Tool::Pipe), done);
        };
        let name = format!("{} #{}", self.pipe_name_prefix, self.model.next_segment_id());
        match self.model.add_pipe(&draft.vertices, diameter, &name) {
            Ok(ids) => {
                if let Some(kind) = draft.start_anchor {
                    self.model.add_node(kind, first);
                }
                if let Some(kind) = end_anchor {
                    self.model.add_node(kind, last);
                }
                info!(name = %name, segments = ids.len(), diameter, "pipe committed");
            }
            Err(err) => warn!(%err, "pipe rejected"),
        }
        (EditState::ToolSelected(Tool::Pipe), done)
    }

    // ── dragging ───────────────────────────────────────────────────────────

    fn begin_drag(&mut self, p: Point) -> Step {
        let Some(hit) = self.model.hit_test(p) else {
            return (EditState::ToolSelected(Tool::Edit), Vec::new());
        };
        let (target, last) = match hit {
            Hit::Node(key) => (DragTarget::Node(key), p),
            Hit::Vertex(at) => (DragTarget::Vertex(at), at),
            Hit::SegmentBody { segment, from, to } => {
                (DragTarget::SegmentRun { segment, from, to }, p)
            }
        };
        debug!(?target, "drag started");
        let drag = Drag {
            target,
            last,
            snapshot: Box::new(self.model.clone()),
        };
        (
            EditState::Dragging(drag),
            vec![
                EditEffect::MapPanning(false),
                EditEffect::SetCursor(Cursor::Grabbing),
                EditEffect::Highlight(target),
            ],
        )
    }

    fn dragging(&mut self, mut drag: Drag, ev: EditEvent) -> Step {
        let finished = vec![
            EditEffect::ClearHighlight,
            EditEffect::SetCursor(Cursor::Pointer),
            EditEffect::MapPanning(true),
            EditEffect::Redraw,
        ];
        match ev {
            EditEvent::PointerMove(p) => {
                if self.viewport.is_some_and(|vp| !vp.bounds.contains(p)) {
                    return (EditState::Dragging(drag), Vec::new());
                }
                match drag.target {
                    DragTarget::Node(key) => self.model.move_node(key, p),
                    DragTarget::Vertex(at) => {
                        self.model.move_vertex(at, p);
                        drag.target = DragTarget::Vertex(p);
                    }
                    DragTarget::SegmentRun { segment, from, to } => {
                        let delta = drag.last.delta_to(p);
                        if let Err(err) = self.model.move_segment_run(segment, from, to, delta) {
                            debug!(%err, "segment drag step dropped");
                        }
                    }
                }
                drag.last = p;
                (EditState::Dragging(drag), vec![EditEffect::Redraw])
            }
            EditEvent::PointerUp(_) => {
                debug!(target = ?drag.target, "drag finished");
                (EditState::ToolSelected(Tool::Edit), finished)
            }
            EditEvent::PointerCaptureLost | EditEvent::KeyEscape => {
                debug!(target = ?drag.target, "drag cancelled");
                self.restore(*drag.snapshot);
                (EditState::ToolSelected(Tool::Edit), finished)
            }
            _ => (EditState::Dragging(drag), Vec::new()),
        }
    }
}
