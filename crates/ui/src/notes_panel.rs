//! Side-panel note list projection
//!
//! The panel shows one row per note annotation, in the order the notes were
//! taken. Rows are plain data; the rendering layer wires its click handlers
//! to `ToggleRequested` and `DeleteRequested` events.

use textmark_core::{AnnotationId, AnnotationModel};

/// One row of the notes panel
#[derive(Debug, Clone, PartialEq)]
pub struct NoteEntry {
    /// Annotation this row controls
    pub id: AnnotationId,

    /// The note body as the user typed it
    pub body: String,

    /// The annotated text the note refers to
    pub excerpt: String,

    /// Whether the note's marker is currently applied
    pub active: bool,

    /// Creation timestamp (Unix seconds)
    pub created_at: i64,
}

/// Project the model's note annotations into panel rows
pub fn note_entries(model: &AnnotationModel) -> Vec<NoteEntry> {
    model
        .notes()
        .map(|annotation| NoteEntry {
            id: annotation.id(),
            body: annotation.note_body().unwrap_or_default().to_owned(),
            excerpt: annotation.text().to_owned(),
            active: annotation.is_active(),
            created_at: annotation.created_at(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use textmark_core::{AnnotationKind, SourceDocument};

    #[test]
    fn panel_lists_notes_in_creation_order_and_skips_highlights() {
        let mut model = AnnotationModel::new(SourceDocument::new("The cat sat on the mat."));

        let handle = model.select_range(8, 11).expect("selection expected");
        model
            .create_annotation(&handle, AnnotationKind::Note { body: "verb".to_owned() })
            .expect("create expected");

        let handle = model.select_range(4, 7).expect("selection expected");
        model.create_annotation(&handle, AnnotationKind::Highlight).expect("create expected");

        let handle = model.select_range(0, 3).expect("selection expected");
        model
            .create_annotation(&handle, AnnotationKind::Note { body: "intro".to_owned() })
            .expect("create expected");

        let entries = note_entries(&model);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].body, "verb");
        assert_eq!(entries[0].excerpt, "sat");
        assert_eq!(entries[1].body, "intro");
        assert!(entries[0].active && entries[1].active);
    }

    #[test]
    fn panel_reflects_toggled_state() {
        let mut model = AnnotationModel::new(SourceDocument::new("The cat sat."));

        let handle = model.select_range(4, 7).expect("selection expected");
        let id = model
            .create_annotation(&handle, AnnotationKind::Note { body: "noted".to_owned() })
            .expect("create expected");
        model.toggle_annotation(id).expect("toggle expected");

        let entries = note_entries(&model);
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].active);
        assert_eq!(entries[0].id, id);
    }

    #[test]
    fn empty_model_yields_empty_panel() {
        let model = AnnotationModel::new(SourceDocument::new("The cat sat."));
        assert!(note_entries(&model).is_empty());
    }
}
