//! UI interaction state machine
//!
//! One explicit state per stage of the annotate gesture, driven by explicit
//! events. Popup visibility and content are projections of the current state
//! (see `note_popup`), never stored separately.

use textmark_core::{
    AnnotationError, AnnotationId, AnnotationKind, AnnotationModel, SelectionHandle,
    SelectionRect, SourceDocument,
};

/// Where the annotate gesture currently stands
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionState {
    /// No gesture in flight
    Idle,

    /// A selection is finished and the action popup is offered
    SelectionPending { handle: SelectionHandle },

    /// The note editor is open for a finished selection
    NotePending { handle: SelectionHandle, draft: String },

    /// The selection hit an existing marker; deletion is offered
    DeleteConfirmPending { id: AnnotationId, anchor: Option<SelectionRect> },
}

/// Discrete input events from the rendering layer
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    /// The user finished selecting text (pointer up)
    SelectionFinished { start: usize, end: usize, anchor: Option<SelectionRect> },

    /// Commit the pending selection as a plain highlight
    HighlightCommitted,

    /// Open the note editor for the pending selection
    NoteOpened,

    /// The note draft text changed
    NoteDraftChanged { text: String },

    /// Commit the pending selection with the drafted note
    NoteCommitted,

    /// Toggle an annotation's marker (notes panel click)
    ToggleRequested { id: AnnotationId },

    /// Delete an annotation directly (notes panel delete action)
    DeleteRequested { id: AnnotationId },

    /// Confirm the deletion offered by `DeleteConfirmPending`
    DeleteConfirmed,

    /// Click outside the popup, or any other cancel gesture
    Dismissed,
}

/// An annotation model plus the in-flight gesture state
#[derive(Debug, Clone)]
pub struct AnnotationSession {
    model: AnnotationModel,
    state: InteractionState,
}

impl AnnotationSession {
    /// Start a session over the given source text
    pub fn new(source: SourceDocument) -> Self {
        Self { model: AnnotationModel::new(source), state: InteractionState::Idle }
    }

    /// Get the annotation model
    pub fn model(&self) -> &AnnotationModel {
        &self.model
    }

    /// Get the current interaction state
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Apply one input event
    ///
    /// Events that do not apply to the current state are ignored. A failing
    /// model operation returns its error and leaves both the state machine
    /// and the model exactly as they were, so the UI can surface the error
    /// inline and let the user retry or dismiss.
    pub fn apply_event(&mut self, event: InteractionEvent) -> Result<(), AnnotationError> {
        match event {
            InteractionEvent::SelectionFinished { start, end, anchor } => {
                let handle = match self.model.select_range(start, end) {
                    Ok(handle) => handle,
                    // Collapsed selections dismiss whatever was open.
                    Err(AnnotationError::EmptySelection) => {
                        self.state = InteractionState::Idle;
                        return Ok(());
                    }
                    Err(err) => return Err(err),
                };

                let active_hit = self
                    .model
                    .find_overlapping(handle.span())
                    .filter(|annotation| annotation.is_active())
                    .map(|annotation| annotation.id());

                self.state = match active_hit {
                    Some(id) => InteractionState::DeleteConfirmPending { id, anchor },
                    None => {
                        let handle = match anchor {
                            Some(rect) => handle.with_anchor(rect),
                            None => handle,
                        };
                        InteractionState::SelectionPending { handle }
                    }
                };

                Ok(())
            }
            InteractionEvent::HighlightCommitted => {
                let InteractionState::SelectionPending { handle } = &self.state else {
                    return Ok(());
                };

                self.model.create_annotation(handle, AnnotationKind::Highlight)?;
                self.state = InteractionState::Idle;
                Ok(())
            }
            InteractionEvent::NoteOpened => {
                if let InteractionState::SelectionPending { handle } = &self.state {
                    self.state = InteractionState::NotePending {
                        handle: handle.clone(),
                        draft: String::new(),
                    };
                }
                Ok(())
            }
            InteractionEvent::NoteDraftChanged { text } => {
                if let InteractionState::NotePending { draft, .. } = &mut self.state {
                    *draft = text;
                }
                Ok(())
            }
            InteractionEvent::NoteCommitted => {
                let InteractionState::NotePending { handle, draft } = &self.state else {
                    return Ok(());
                };

                self.model
                    .create_annotation(handle, AnnotationKind::Note { body: draft.clone() })?;
                self.state = InteractionState::Idle;
                Ok(())
            }
            InteractionEvent::ToggleRequested { id } => {
                self.model.toggle_annotation(id)?;
                Ok(())
            }
            InteractionEvent::DeleteRequested { id } => {
                self.model.delete_annotation(id)?;
                if matches!(
                    self.state,
                    InteractionState::DeleteConfirmPending { id: pending, .. } if pending == id
                ) {
                    self.state = InteractionState::Idle;
                }
                Ok(())
            }
            InteractionEvent::DeleteConfirmed => {
                let InteractionState::DeleteConfirmPending { id, .. } = self.state else {
                    return Ok(());
                };

                self.model.delete_annotation(id)?;
                self.state = InteractionState::Idle;
                Ok(())
            }
            InteractionEvent::Dismissed => {
                self.state = InteractionState::Idle;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textmark_core::SpanRange;

    fn session() -> AnnotationSession {
        AnnotationSession::new(SourceDocument::new("The cat sat on the mat."))
    }

    fn select(session: &mut AnnotationSession, start: usize, end: usize) {
        session
            .apply_event(InteractionEvent::SelectionFinished { start, end, anchor: None })
            .expect("selection event expected to apply");
    }

    #[test]
    fn selection_then_highlight_commit_creates_annotation_and_idles() {
        let mut session = session();

        select(&mut session, 4, 7);
        assert!(matches!(session.state(), InteractionState::SelectionPending { .. }));

        session.apply_event(InteractionEvent::HighlightCommitted).expect("commit expected");
        assert_eq!(*session.state(), InteractionState::Idle);
        assert_eq!(session.model().len(), 1);

        let annotation = session.model().annotations().next().expect("annotation expected");
        assert_eq!(annotation.text(), "cat");
        assert!(annotation.is_active());
    }

    #[test]
    fn note_flow_carries_draft_into_the_annotation() {
        let mut session = session();

        select(&mut session, 0, 3);
        session.apply_event(InteractionEvent::NoteOpened).expect("event expected");
        session
            .apply_event(InteractionEvent::NoteDraftChanged { text: "intro word".to_owned() })
            .expect("event expected");
        session.apply_event(InteractionEvent::NoteCommitted).expect("commit expected");

        assert_eq!(*session.state(), InteractionState::Idle);
        let note = session.model().notes().next().expect("note expected");
        assert_eq!(note.note_body(), Some("intro word"));
        assert_eq!(note.text(), "The");
    }

    #[test]
    fn empty_note_commit_fails_and_keeps_the_editor_open() {
        let mut session = session();

        select(&mut session, 0, 3);
        session.apply_event(InteractionEvent::NoteOpened).expect("event expected");

        let err = session.apply_event(InteractionEvent::NoteCommitted).expect_err("error expected");
        assert_eq!(err, AnnotationError::EmptyNote);
        assert!(matches!(session.state(), InteractionState::NotePending { .. }));
        assert!(session.model().is_empty());

        // The user can fix the draft and commit without reselecting.
        session
            .apply_event(InteractionEvent::NoteDraftChanged { text: "fixed".to_owned() })
            .expect("event expected");
        session.apply_event(InteractionEvent::NoteCommitted).expect("commit expected");
        assert_eq!(session.model().len(), 1);
    }

    #[test]
    fn empty_selection_dismisses_pending_popup() {
        let mut session = session();

        select(&mut session, 4, 7);
        assert!(matches!(session.state(), InteractionState::SelectionPending { .. }));

        select(&mut session, 9, 9);
        assert_eq!(*session.state(), InteractionState::Idle);
    }

    #[test]
    fn selecting_marked_text_offers_deletion_and_confirm_deletes() {
        let mut session = session();

        select(&mut session, 4, 7);
        session.apply_event(InteractionEvent::HighlightCommitted).expect("commit expected");
        let id = session.model().annotations().next().expect("annotation expected").id();

        select(&mut session, 5, 6);
        assert_eq!(*session.state(), InteractionState::DeleteConfirmPending { id, anchor: None });

        session.apply_event(InteractionEvent::DeleteConfirmed).expect("delete expected");
        assert_eq!(*session.state(), InteractionState::Idle);
        assert!(session.model().is_empty());
    }

    #[test]
    fn delete_confirmation_keeps_the_selection_anchor() {
        let mut session = session();

        select(&mut session, 4, 7);
        session.apply_event(InteractionEvent::HighlightCommitted).expect("commit expected");
        let id = session.model().annotations().next().expect("annotation expected").id();

        let rect = SelectionRect::new(200.0, 64.0, 30.0, 16.0);
        session
            .apply_event(InteractionEvent::SelectionFinished {
                start: 4,
                end: 7,
                anchor: Some(rect),
            })
            .expect("event expected");

        assert_eq!(
            *session.state(),
            InteractionState::DeleteConfirmPending { id, anchor: Some(rect) },
        );
    }

    #[test]
    fn selecting_over_inactive_marker_offers_creation_then_conflicts() {
        let mut session = session();

        select(&mut session, 4, 7);
        session.apply_event(InteractionEvent::HighlightCommitted).expect("commit expected");
        let id = session.model().annotations().next().expect("annotation expected").id();
        session.apply_event(InteractionEvent::ToggleRequested { id }).expect("toggle expected");

        // Toggled-off markers are invisible, so the selection offers creation.
        select(&mut session, 4, 7);
        assert!(matches!(session.state(), InteractionState::SelectionPending { .. }));

        let err = session
            .apply_event(InteractionEvent::HighlightCommitted)
            .expect_err("error expected");
        assert!(matches!(err, AnnotationError::OverlapConflict { .. }));
        assert!(matches!(session.state(), InteractionState::SelectionPending { .. }));
        assert_eq!(session.model().len(), 1);
    }

    #[test]
    fn dismiss_reaches_idle_from_every_state() {
        let mut session = session();

        select(&mut session, 4, 7);
        session.apply_event(InteractionEvent::Dismissed).expect("event expected");
        assert_eq!(*session.state(), InteractionState::Idle);

        select(&mut session, 4, 7);
        session.apply_event(InteractionEvent::NoteOpened).expect("event expected");
        session.apply_event(InteractionEvent::Dismissed).expect("event expected");
        assert_eq!(*session.state(), InteractionState::Idle);
        assert!(session.model().is_empty());

        session.apply_event(InteractionEvent::Dismissed).expect("event expected");
        assert_eq!(*session.state(), InteractionState::Idle);
    }

    #[test]
    fn panel_toggle_and_delete_work_from_idle() {
        let mut session = session();

        select(&mut session, 4, 7);
        session.apply_event(InteractionEvent::HighlightCommitted).expect("commit expected");
        let id = session.model().annotations().next().expect("annotation expected").id();

        session.apply_event(InteractionEvent::ToggleRequested { id }).expect("toggle expected");
        assert!(!session.model().get(id).expect("annotation expected").is_active());

        session.apply_event(InteractionEvent::DeleteRequested { id }).expect("delete expected");
        assert!(session.model().is_empty());
        assert_eq!(*session.state(), InteractionState::Idle);
    }

    #[test]
    fn stale_panel_actions_surface_not_found_without_state_change() {
        let mut session = session();
        let stale = AnnotationId::new_v4();

        select(&mut session, 4, 7);
        let err = session
            .apply_event(InteractionEvent::ToggleRequested { id: stale })
            .expect_err("error expected");
        assert_eq!(err, AnnotationError::NotFound(stale));
        assert!(matches!(session.state(), InteractionState::SelectionPending { .. }));

        let err = session
            .apply_event(InteractionEvent::DeleteRequested { id: stale })
            .expect_err("error expected");
        assert_eq!(err, AnnotationError::NotFound(stale));
    }

    #[test]
    fn commit_events_outside_their_state_are_ignored() {
        let mut session = session();

        session.apply_event(InteractionEvent::HighlightCommitted).expect("event expected");
        session.apply_event(InteractionEvent::NoteCommitted).expect("event expected");
        session.apply_event(InteractionEvent::DeleteConfirmed).expect("event expected");
        session
            .apply_event(InteractionEvent::NoteDraftChanged { text: "x".to_owned() })
            .expect("event expected");

        assert_eq!(*session.state(), InteractionState::Idle);
        assert!(session.model().is_empty());
    }

    #[test]
    fn selection_anchor_is_kept_on_the_pending_handle() {
        let mut session = session();

        session
            .apply_event(InteractionEvent::SelectionFinished {
                start: 4,
                end: 7,
                anchor: Some(SelectionRect::new(120.0, 48.0, 30.0, 16.0)),
            })
            .expect("event expected");

        let InteractionState::SelectionPending { handle } = session.state() else {
            panic!("selection pending expected");
        };
        assert_eq!(handle.span(), SpanRange::new(4, 7));
        let anchor = handle.anchor().expect("anchor expected");
        assert_eq!(anchor.x, 120.0);
    }
}
