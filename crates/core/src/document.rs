//! Immutable source text and offset addressing
//!
//! The displayed text never changes for the lifetime of a model. Annotation
//! spans are byte ranges into this text; markers are derived at render time
//! and never written into it.

use crate::annotation::{AnnotationError, SpanRange};
use crate::selection::SelectionHandle;

/// A paragraph of the source text, as the rendering layer displays it
///
/// The span covers the paragraph's bytes within the source, newline excluded,
/// so overlay segments can be mapped onto individual paragraphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// Byte range of the paragraph within the source text
    pub span: SpanRange,

    /// The paragraph text
    pub text: String,
}

/// The immutable text a model annotates
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SourceDocument {
    text: String,
}

impl SourceDocument {
    /// Create a document from its display text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Get the full source text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the source text in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the source text is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Validate a half-open byte range `[start, end)` and capture the covered
    /// substring as a selection handle.
    ///
    /// Fails with `EmptySelection` when `start == end`, and with
    /// `InvalidRange` when the range is out of bounds, inverted, or not
    /// aligned to `char` boundaries.
    pub fn select_range(
        &self,
        start: usize,
        end: usize,
    ) -> Result<SelectionHandle, AnnotationError> {
        if start == end {
            return Err(AnnotationError::EmptySelection);
        }

        let span = SpanRange::new(start, end);
        let text = self
            .slice(span)
            .ok_or(AnnotationError::InvalidRange { start, end, len: self.text.len() })?;

        Ok(SelectionHandle::new(span, text.to_owned()))
    }

    /// Get the substring covered by a span, if the span is valid for this text
    ///
    /// Returns `None` for inverted or out-of-bounds ranges and for offsets
    /// that fall inside a multi-byte `char`.
    pub fn slice(&self, span: SpanRange) -> Option<&str> {
        if span.start > span.end || span.end > self.text.len() {
            return None;
        }

        if !self.text.is_char_boundary(span.start) || !self.text.is_char_boundary(span.end) {
            return None;
        }

        Some(&self.text[span.start..span.end])
    }

    /// Split the source into display paragraphs (one per newline-separated line)
    pub fn paragraphs(&self) -> Vec<Paragraph> {
        let mut paragraphs = Vec::new();
        let mut cursor = 0;

        for line in self.text.split('\n') {
            paragraphs.push(Paragraph {
                span: SpanRange::new(cursor, cursor + line.len()),
                text: line.to_owned(),
            });
            cursor += line.len() + 1;
        }

        paragraphs
    }
}
