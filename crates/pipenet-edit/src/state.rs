// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Interaction states. Exactly one interaction is active at a time.

use pipenet_core::{NetworkModel, NodeKind};
use pipenet_geom::Point;

use crate::event::{DragTarget, Tool};

/// Where a pipe draft is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftStage {
    /// Start point placed on empty map; waiting for its anchor kind.
    ChoosingStartAnchor,
    /// Collecting vertices.
    Drawing,
    /// Finished by a click on the last vertex; waiting for the diameter.
    AwaitingDiameter,
    /// Diameter known, end is dangling; waiting for its anchor kind.
    ChoosingEndAnchor,
}

/// An uncommitted pipe. Nothing in it touches the model until commit.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeDraft {
    /// Vertices placed so far (snapped where applicable).
    pub vertices: Vec<Point>,
    /// Node to create under the first vertex at commit.
    pub start_anchor: Option<NodeKind>,
    /// Diameter accepted from the prompt.
    pub diameter: Option<f64>,
    /// Lifecycle stage.
    pub stage: DraftStage,
}

impl PipeDraft {
    pub(crate) fn starting_at(p: Point, stage: DraftStage) -> Self {
        Self {
            vertices: vec![p],
            start_anchor: None,
            diameter: None,
            stage,
        }
    }

    /// Last placed vertex.
    #[must_use]
    pub fn last(&self) -> Option<Point> {
        self.vertices.last().copied()
    }
}

/// A drag in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct Drag {
    /// What is being dragged.
    pub target: DragTarget,
    /// Pointer position of the last applied move.
    pub last: Point,
    pub(crate) snapshot: Box<NetworkModel>,
}

/// Editor interaction state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditState {
    /// No tool; the map pans freely.
    #[default]
    Idle,
    /// A tool is armed and no interaction is running.
    ToolSelected(Tool),
    /// A pipe is being drawn.
    DrawingPipe(PipeDraft),
    /// An object is being dragged with the edit tool.
    Dragging(Drag),
}

impl EditState {
    /// Tool governing this state, if any.
    #[must_use]
    pub fn tool(&self) -> Option<Tool> {
        match self {
            Self::Idle => None,
            Self::ToolSelected(t) => Some(*t),
            Self::DrawingPipe(_) => Some(Tool::Pipe),
            Self::Dragging(_) => Some(Tool::Edit),
        }
    }
}
