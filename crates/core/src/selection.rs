//! Selection handles and selection geometry
//!
//! A finished selection is captured as a handle: the validated span, the
//! covered substring, and optionally the screen-space rectangle the UI layer
//! measured for it. The rectangle only anchors the popup; it plays no role in
//! annotation logic.

use crate::annotation::SpanRange;

/// Screen-space rectangle of a finished selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    /// X coordinate of the top-left corner (pixels)
    pub x: f32,

    /// Y coordinate of the top-left corner (pixels)
    pub y: f32,

    /// Width in pixels
    pub width: f32,

    /// Height in pixels
    pub height: f32,
}

impl SelectionRect {
    /// Create a new selection rectangle
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Check if this rectangle contains a point
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// A validated selection over the source text
///
/// Handles are only produced by `SourceDocument::select_range`, so the span
/// is known to be non-empty and char-boundary aligned at creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionHandle {
    span: SpanRange,
    text: String,
    anchor: Option<SelectionRect>,
}

impl SelectionHandle {
    pub(crate) fn new(span: SpanRange, text: String) -> Self {
        Self { span, text, anchor: None }
    }

    /// Attach the screen-space rectangle the UI measured for this selection
    pub fn with_anchor(mut self, anchor: SelectionRect) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Get the selected span
    pub fn span(&self) -> SpanRange {
        self.span
    }

    /// Get the selected text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the screen-space anchor rectangle, if the UI attached one
    pub fn anchor(&self) -> Option<SelectionRect> {
        self.anchor
    }
}
