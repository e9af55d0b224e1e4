//! Annotation popup placement
//!
//! Pure placement arithmetic for the popup shown after a selection. The popup
//! is anchored just below the selection rectangle and clamped so it stays
//! inside the viewport. Which popup (if any) is open is derived from the
//! interaction state, never tracked as a separate flag.

use crate::interaction::InteractionState;
use textmark_core::SelectionRect;

/// Popup width
const POPUP_WIDTH: f32 = 250.0;

/// Height of the action popup (highlight / take-note buttons)
const ACTIONS_HEIGHT: f32 = 48.0;

/// Height of the note editor popup (text entry plus commit button)
const NOTE_EDITOR_HEIGHT: f32 = 140.0;

/// Height of the delete confirmation popup (single button)
const DELETE_CONFIRM_HEIGHT: f32 = 40.0;

/// Gap between the selection rectangle and the popup
const ANCHOR_GAP: f32 = 6.0;

/// Margin kept between the popup and the viewport edges
const PADDING: f32 = 8.0;

/// Which popup the current interaction state calls for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupKind {
    /// Highlight / take-note action buttons
    Actions,

    /// Note text entry
    NoteEditor,

    /// Delete confirmation for an existing marker
    DeleteConfirm,
}

impl PopupKind {
    /// Get the popup height for this kind
    pub fn height(&self) -> f32 {
        match self {
            PopupKind::Actions => ACTIONS_HEIGHT,
            PopupKind::NoteEditor => NOTE_EDITOR_HEIGHT,
            PopupKind::DeleteConfirm => DELETE_CONFIRM_HEIGHT,
        }
    }
}

/// Resolved popup rectangle in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupPlacement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PopupPlacement {
    /// Check if a point is within the popup bounds
    ///
    /// The event layer uses this to tell inside-clicks apart from the
    /// outside-clicks that dismiss the popup.
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Derive which popup the current state shows, if any
pub fn popup_for_state(state: &InteractionState) -> Option<PopupKind> {
    match state {
        InteractionState::Idle => None,
        InteractionState::SelectionPending { .. } => Some(PopupKind::Actions),
        InteractionState::NotePending { .. } => Some(PopupKind::NoteEditor),
        InteractionState::DeleteConfirmPending { .. } => Some(PopupKind::DeleteConfirm),
    }
}

/// Place a popup below its selection anchor, clamped to the viewport
pub fn place_popup(
    kind: PopupKind,
    anchor: &SelectionRect,
    viewport_width: f32,
    viewport_height: f32,
) -> PopupPlacement {
    let height = kind.height();

    let x = anchor.x.min(viewport_width - POPUP_WIDTH - PADDING).max(PADDING);
    let y = (anchor.y + anchor.height + ANCHOR_GAP)
        .min(viewport_height - height - PADDING)
        .max(PADDING);

    PopupPlacement { x, y, width: POPUP_WIDTH, height }
}
