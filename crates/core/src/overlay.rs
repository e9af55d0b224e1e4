//! Overlay derivation
//!
//! The rendering layer never edits text. On each render it asks the model for
//! a fresh partition of the source into plain and marked runs and projects
//! that onto the display. Deleting an annotation needs no cleanup pass: the
//! next projection simply no longer contains its marker.

use crate::annotation::{AnnotationId, AnnotationKind, SpanRange};
use crate::model::AnnotationModel;

/// Marker tint for a marked overlay segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerTint {
    /// Plain highlight
    Highlight,

    /// Highlight carrying a note
    Note,
}

impl MarkerTint {
    /// Get the color for this tint (RGBA, normalized 0-1)
    pub fn color(&self) -> (f32, f32, f32, f32) {
        match self {
            MarkerTint::Highlight => (1.0, 1.0, 0.0, 0.3), // Yellow, semi-transparent
            MarkerTint::Note => (1.0, 0.65, 0.0, 0.5),     // Orange, more opaque
        }
    }

    fn for_kind(kind: &AnnotationKind) -> Self {
        match kind {
            AnnotationKind::Highlight => MarkerTint::Highlight,
            AnnotationKind::Note { .. } => MarkerTint::Note,
        }
    }
}

/// One run of the source text, plain or covered by a single active marker
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySegment {
    /// Byte range within the source text
    pub span: SpanRange,

    /// The run's text
    pub text: String,

    /// Marker for the run, `None` for plain text
    pub marker: Option<(AnnotationId, MarkerTint)>,
}

/// Partition the source text into overlay segments
///
/// Active annotations become marked runs; everything else is emitted as plain
/// runs. Segments are ordered by offset and cover the source exactly once, so
/// concatenating their text reproduces the source verbatim. Inactive
/// annotations produce no marker.
pub fn overlay_segments(model: &AnnotationModel) -> Vec<OverlaySegment> {
    let source = model.source();

    let mut active: Vec<_> = model
        .annotations()
        .filter(|annotation| annotation.is_active())
        .collect();
    active.sort_by_key(|annotation| annotation.span().start);

    let mut segments = Vec::new();
    let mut cursor = 0;

    for annotation in active {
        let span = annotation.span();
        if span.start > cursor {
            push_plain(&mut segments, source.text(), cursor, span.start);
        }

        segments.push(OverlaySegment {
            span,
            text: annotation.text().to_owned(),
            marker: Some((annotation.id(), MarkerTint::for_kind(annotation.kind()))),
        });
        cursor = span.end;
    }

    if cursor < source.len() {
        push_plain(&mut segments, source.text(), cursor, source.len());
    }

    segments
}

fn push_plain(segments: &mut Vec<OverlaySegment>, text: &str, start: usize, end: usize) {
    segments.push(OverlaySegment {
        span: SpanRange::new(start, end),
        text: text[start..end].to_owned(),
        marker: None,
    });
}
