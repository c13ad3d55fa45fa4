// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Input events fed to the session and effects it asks the view to perform.

use pipenet_core::{NodeKey, NodeKind, SegmentId};
use pipenet_geom::{GeoBounds, Point};
use serde::{Deserialize, Serialize};

/// Editing tool picked from the toolbar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Place a point-object of the given kind per click.
    AddNode(NodeKind),
    /// Draw a pipe polyline.
    Pipe,
    /// Drag existing objects.
    Edit,
}

/// Visible map extent and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Visible extent; drag moves outside it are ignored.
    pub bounds: GeoBounds,
    /// Current scale.
    pub degrees_per_px: f64,
}

/// Which end of a drawn pipe an anchor menu is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeEnd {
    /// First vertex.
    Start,
    /// Last vertex.
    End,
}

/// Object grabbed by a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragTarget {
    /// A node; coincident vertices follow it.
    Node(NodeKey),
    /// Every vertex coincident with the given position.
    Vertex(Point),
    /// A vertex run of one segment, grabbed by its body.
    SegmentRun {
        /// Segment grabbed.
        segment: SegmentId,
        /// First vertex of the run.
        from: usize,
        /// Last vertex of the run.
        to: usize,
    },
}

/// Operator input, already translated to map coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum EditEvent {
    /// Toolbar selection.
    SelectTool(Tool),
    /// Primary click on the map.
    Click(Point),
    /// Pointer pressed on the map.
    PointerDown(Point),
    /// Pointer moved.
    PointerMove(Point),
    /// Pointer released.
    PointerUp(Point),
    /// The view lost pointer capture mid-interaction.
    PointerCaptureLost,
    /// Escape key.
    KeyEscape,
    /// Anchor kind picked in the anchor menu.
    AnchorChosen(NodeKind),
    /// Anchor menu closed without a choice.
    AnchorMenuDismissed,
    /// Diameter entered in the prompt.
    DiameterConfirmed(f64),
    /// Diameter prompt closed without a value.
    DiameterCancelled,
    /// Map panned or zoomed.
    ViewChanged(Viewport),
}

/// Pointer cursor shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Platform default.
    Default,
    /// Placement crosshair.
    Crosshair,
    /// Hover over draggable content.
    Pointer,
    /// Drag in progress.
    Grabbing,
}

/// Requests to the view layer. The session never renders.
#[derive(Debug, Clone, PartialEq)]
pub enum EditEffect {
    /// Show the "choose object type" menu for one pipe end.
    OpenAnchorMenu {
        /// Where the anchor will be created.
        at: Point,
        /// End being anchored.
        end: PipeEnd,
    },
    /// Ask for the pipe diameter.
    PromptDiameter,
    /// Close any open menu or prompt.
    CloseDialogs,
    /// Change the pointer cursor.
    SetCursor(Cursor),
    /// Enable or disable map panning.
    MapPanning(bool),
    /// Draw the rubber-band segment from the last vertex.
    PreviewSegment {
        /// Last committed draft vertex.
        from: Point,
        /// Pointer position, snapped when near an object.
        to: Point,
    },
    /// Remove the rubber-band segment.
    ClearPreview,
    /// Highlight a drag target.
    Highlight(DragTarget),
    /// Remove drag highlighting.
    ClearHighlight,
    /// The model changed; repaint.
    Redraw,
}
