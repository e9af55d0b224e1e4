//! Annotation model operations
//!
//! The single owner of annotation state for one source document. Every
//! operation is synchronous and either fully succeeds or fails with no side
//! effect; the rendering layer re-projects the overlay after each committed
//! call.

use crate::annotation::{
    Annotation, AnnotationCollection, AnnotationError, AnnotationId, AnnotationKind, SpanRange,
};
use crate::document::SourceDocument;
use crate::selection::SelectionHandle;

/// Annotation state over one immutable source document
#[derive(Debug, Clone)]
pub struct AnnotationModel {
    source: SourceDocument,
    annotations: AnnotationCollection,
}

impl AnnotationModel {
    /// Create an empty model over the given source text
    pub fn new(source: SourceDocument) -> Self {
        Self { source, annotations: AnnotationCollection::new() }
    }

    /// Get the source document
    pub fn source(&self) -> &SourceDocument {
        &self.source
    }

    /// Validate a selection range against the source text
    ///
    /// Convenience forwarding of `SourceDocument::select_range`.
    pub fn select_range(
        &self,
        start: usize,
        end: usize,
    ) -> Result<SelectionHandle, AnnotationError> {
        self.source.select_range(start, end)
    }

    /// Create an annotation for a selection, active immediately
    ///
    /// A note with an empty or whitespace-only body fails with `EmptyNote`.
    /// A handle whose span no longer matches the source fails with
    /// `InvalidRange`. A span overlapping any existing annotation fails with
    /// `OverlapConflict`; overlaps are rejected outright rather than nested,
    /// and the check covers inactive annotations too so a later toggle can
    /// never produce two markers over the same byte.
    pub fn create_annotation(
        &mut self,
        handle: &SelectionHandle,
        kind: AnnotationKind,
    ) -> Result<AnnotationId, AnnotationError> {
        let span = handle.span();

        if self.source.slice(span) != Some(handle.text()) {
            return Err(AnnotationError::InvalidRange {
                start: span.start,
                end: span.end,
                len: self.source.len(),
            });
        }

        if let AnnotationKind::Note { body } = &kind {
            if body.trim().is_empty() {
                return Err(AnnotationError::EmptyNote);
            }
        }

        if let Some(existing) = self.annotations.find_overlapping(span) {
            return Err(AnnotationError::OverlapConflict {
                requested: span,
                existing: existing.span(),
            });
        }

        let annotation = Annotation::new(span, handle.text().to_owned(), kind);
        let id = annotation.id();
        self.annotations.insert(annotation);

        Ok(id)
    }

    /// Flip an annotation's marker state in place
    ///
    /// Span, kind, and timestamps are untouched. Fails with `NotFound` for
    /// unknown ids.
    pub fn toggle_annotation(&mut self, id: AnnotationId) -> Result<&Annotation, AnnotationError> {
        let annotation =
            self.annotations.get_mut(id).ok_or(AnnotationError::NotFound(id))?;
        annotation.toggle();

        Ok(&*annotation)
    }

    /// Remove an annotation, returning the removed record
    ///
    /// The covered text renders verbatim again because the source was never
    /// rewritten. Deleting an unknown id fails with `NotFound` and leaves the
    /// collection unchanged, so callers can detect stale references.
    pub fn delete_annotation(&mut self, id: AnnotationId) -> Result<Annotation, AnnotationError> {
        self.annotations.remove(id).ok_or(AnnotationError::NotFound(id))
    }

    /// Look up the active annotation whose covered text equals `text`
    ///
    /// Compatibility shim for callers that only know the rendered text.
    /// Ambiguous when the source repeats the same substring: the earliest
    /// active match wins. Prefer `get` by id.
    pub fn find_annotation_by_span(&self, text: &str) -> Option<&Annotation> {
        self.annotations.find_active_by_text(text)
    }

    /// Find the annotation (active or not) overlapping a span, if any
    pub fn find_overlapping(&self, span: SpanRange) -> Option<&Annotation> {
        self.annotations.find_overlapping(span)
    }

    /// Get an annotation by ID
    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.get(id)
    }

    /// Iterate all annotations in creation order
    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter()
    }

    /// Iterate note annotations in creation order
    pub fn notes(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter().filter(|annotation| annotation.kind().is_note())
    }

    /// Get count of annotations
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Check if the model has no annotations
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}
