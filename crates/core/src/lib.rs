//! Textmark Core Library
//!
//! Annotation model for selectable text: immutable source text, span-addressed
//! annotations, and the overlay projection the rendering layer draws from.

pub mod annotation;
pub mod document;
pub mod model;
pub mod overlay;
pub mod selection;

pub use annotation::{
    Annotation, AnnotationCollection, AnnotationError, AnnotationId, AnnotationKind, SpanRange,
};
pub use document::{Paragraph, SourceDocument};
pub use model::AnnotationModel;
pub use overlay::{overlay_segments, MarkerTint, OverlaySegment};
pub use selection::{SelectionHandle, SelectionRect};
