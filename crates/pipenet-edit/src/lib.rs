// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pipenet editing state machine.
//!
//! A view feeds pointer, keyboard and dialog input to an [`EditSession`] as
//! [`EditEvent`]s and performs the returned [`EditEffect`]s (cursor changes,
//! menus, prompts, redraws). The session owns the network model and is the
//! only thing that mutates it while editing.

mod event;
mod session;
mod state;

pub use event::{Cursor, DragTarget, EditEffect, EditEvent, PipeEnd, Tool, Viewport};
pub use session::{EditConfig, EditSession};
pub use state::{DraftStage, Drag, EditState, PipeDraft};
