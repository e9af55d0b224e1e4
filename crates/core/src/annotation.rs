//! Annotation data model
//!
//! Provides annotation records with stable identity over immutable source
//! text. A span is a half-open byte range; the marker a user sees is derived
//! from annotation state at render time and never written into the text.

use std::collections::HashMap;

/// Unique identifier for an annotation
///
/// Stable for the annotation's lifetime. Generated using UUID v4 for
/// guaranteed uniqueness.
pub type AnnotationId = uuid::Uuid;

/// Half-open byte range `[start, end)` into the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SpanRange {
    pub start: usize,
    pub end: usize,
}

impl SpanRange {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span covers no bytes
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Check if this span shares at least one byte with another
    pub fn overlaps(&self, other: &SpanRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// What the user committed for a span
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AnnotationKind {
    /// Plain highlight marker
    Highlight,

    /// Highlight plus user-authored note text
    Note {
        /// The note body as the user typed it
        body: String,
    },
}

impl AnnotationKind {
    /// Check if this is a note annotation
    pub fn is_note(&self) -> bool {
        matches!(self, AnnotationKind::Note { .. })
    }
}

/// Errors surfaced by annotation operations
///
/// All of these are recoverable and local; the UI shows them inline or
/// treats the triggering gesture as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnnotationError {
    #[error("selection covers no text")]
    EmptySelection,
    #[error("note body is empty")]
    EmptyNote,
    #[error("annotation not found: {0}")]
    NotFound(AnnotationId),
    #[error("span [{}, {}) overlaps annotation at [{}, {})", .requested.start, .requested.end, .existing.start, .existing.end)]
    OverlapConflict { requested: SpanRange, existing: SpanRange },
    #[error("invalid range [{start}, {end}) for source of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },
}

/// A single annotation over the source text
///
/// The covered substring is cached at creation so the notes panel and the
/// text-lookup shim never have to re-slice the source.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Annotation {
    /// Stable unique identifier
    id: AnnotationId,

    /// Byte range covered within the source text
    span: SpanRange,

    /// The substring the span covered at creation
    text: String,

    /// Highlight or note
    kind: AnnotationKind,

    /// Whether the visual marker is currently applied
    active: bool,

    /// Creation timestamp (Unix timestamp in seconds)
    created_at: i64,
}

impl Annotation {
    /// Create a new annotation with generated ID, active by default
    pub(crate) fn new(span: SpanRange, text: String, kind: AnnotationKind) -> Self {
        let created_at = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;

        Self { id: AnnotationId::new_v4(), span, text, kind, active: true, created_at }
    }

    /// Get the annotation ID
    pub fn id(&self) -> AnnotationId {
        self.id
    }

    /// Get the covered span
    pub fn span(&self) -> SpanRange {
        self.span
    }

    /// Get the covered substring
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the annotation kind
    pub fn kind(&self) -> &AnnotationKind {
        &self.kind
    }

    /// Get the note body, if this is a note annotation
    pub fn note_body(&self) -> Option<&str> {
        match &self.kind {
            AnnotationKind::Note { body } => Some(body),
            AnnotationKind::Highlight => None,
        }
    }

    /// Check if the visual marker is currently applied
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Get the creation timestamp (Unix seconds)
    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub(crate) fn toggle(&mut self) {
        self.active = !self.active;
    }
}

/// Id-indexed annotation storage
///
/// The id map is the primary index; insertion order is kept alongside it so
/// the notes panel and text lookup stay deterministic.
#[derive(Debug, Clone, Default)]
pub struct AnnotationCollection {
    annotations: HashMap<AnnotationId, Annotation>,
    order: Vec<AnnotationId>,
}

impl AnnotationCollection {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an annotation to the collection
    pub fn insert(&mut self, annotation: Annotation) {
        let id = annotation.id();
        if self.annotations.insert(id, annotation).is_none() {
            self.order.push(id);
        }
    }

    /// Remove an annotation by ID
    pub fn remove(&mut self, id: AnnotationId) -> Option<Annotation> {
        let annotation = self.annotations.remove(&id)?;
        self.order.retain(|existing| *existing != id);
        Some(annotation)
    }

    /// Get an annotation by ID
    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.get(&id)
    }

    /// Get a mutable reference to an annotation by ID
    pub fn get_mut(&mut self, id: AnnotationId) -> Option<&mut Annotation> {
        self.annotations.get_mut(&id)
    }

    /// Iterate annotations in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.order.iter().filter_map(|id| self.annotations.get(id))
    }

    /// Get count of annotations
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Find the first annotation (creation order) whose span overlaps the
    /// given span, regardless of active state
    pub fn find_overlapping(&self, span: SpanRange) -> Option<&Annotation> {
        self.iter().find(|annotation| annotation.span().overlaps(&span))
    }

    /// Find the first active annotation (creation order) whose covered text
    /// equals the given text
    ///
    /// Ambiguous when the source repeats the same substring; identity lookup
    /// by ID is the primary index.
    pub fn find_active_by_text(&self, text: &str) -> Option<&Annotation> {
        self.iter().find(|annotation| annotation.is_active() && annotation.text() == text)
    }
}
