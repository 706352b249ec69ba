//! Span-based text editing

use crate::text::Span;
use thiserror::Error;

/// Errors that can occur while validating or applying edits
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Overlapping edits detected at offset {0}")]
    OverlappingEdits(usize),

    #[error("Edit span {start}..{end} out of bounds for source length {len}")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },

    #[error("Edit offset {0} is not on a character boundary")]
    NotCharBoundary(usize),

    #[error("Buffer is read-only")]
    ReadOnly,
}

/// Represents a single text edit operation
///
/// An insertion is an edit over an empty span, a deletion is an edit with an
/// empty replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// The source span to replace
    pub span: Span,
    /// The replacement text
    pub replacement: String,
    /// Human-readable description of the edit
    pub message: String,
}

impl Edit {
    /// Create a new edit
    pub fn new(span: Span, replacement: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
            message: message.into(),
        }
    }

    /// Insert `text` at `offset`
    pub fn insert(offset: usize, text: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Span::empty(offset), text, message)
    }

    /// Replace `span` with `text`
    pub fn replace(span: Span, text: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(span, text, message)
    }

    /// Remove the text covered by `span`
    pub fn delete(span: Span, message: impl Into<String>) -> Self {
        Self::new(span, String::new(), message)
    }

    /// Get the byte offset where this edit starts
    pub fn start_offset(&self) -> usize {
        self.span.start
    }

    /// Get the byte offset where this edit ends
    pub fn end_offset(&self) -> usize {
        self.span.end
    }

    pub fn is_insert(&self) -> bool {
        self.span.is_empty()
    }

    /// Whether this edit and `other` touch the same text.
    ///
    /// Two insertions at the same offset conflict; an insertion at the boundary
    /// of a replaced span does not.
    pub fn overlaps(&self, other: &Edit) -> bool {
        if self.is_insert() && other.is_insert() {
            return self.span.start == other.span.start;
        }
        if self.is_insert() {
            return other.span.start < self.span.start && self.span.start < other.span.end;
        }
        if other.is_insert() {
            return self.span.start < other.span.start && other.span.start < self.span.end;
        }
        self.span.start < other.span.end && other.span.start < self.span.end
    }
}

/// Check a batch against `source` without applying it
pub fn validate_edits(source: &str, edits: &[Edit]) -> Result<(), EditError> {
    let source_len = source.len();

    for (i, edit) in edits.iter().enumerate() {
        let start = edit.start_offset();
        let end = edit.end_offset();

        if start > end || end > source_len {
            return Err(EditError::SpanOutOfBounds {
                start,
                end,
                len: source_len,
            });
        }
        if !source.is_char_boundary(start) {
            return Err(EditError::NotCharBoundary(start));
        }
        if !source.is_char_boundary(end) {
            return Err(EditError::NotCharBoundary(end));
        }

        if let Some(other) = edits[..i].iter().find(|other| other.overlaps(edit)) {
            return Err(EditError::OverlappingEdits(other.start_offset().max(start)));
        }
    }

    Ok(())
}

/// Apply a batch of edits to source text
///
/// The batch is validated as a whole first: if any edit is out of bounds or
/// overlaps another, nothing is applied. Edits are then applied from the end
/// of the text towards the start so earlier offsets stay valid.
///
/// # Arguments
/// * `source` - The original text
/// * `edits` - Slice of edits to apply, offsets relative to `source`
///
/// # Returns
/// * `Ok(String)` - The modified text
/// * `Err(EditError)` - If edits overlap or are out of bounds
pub fn apply_edits(source: &str, edits: &[Edit]) -> Result<String, EditError> {
    if edits.is_empty() {
        return Ok(source.to_string());
    }

    validate_edits(source, edits)?;

    let mut sorted_edits: Vec<&Edit> = edits.iter().collect();
    // At a shared start the replacement goes first so the insert lands in front of it
    sorted_edits.sort_by(|a, b| {
        b.start_offset()
            .cmp(&a.start_offset())
            .then(a.is_insert().cmp(&b.is_insert()))
    });

    let mut result = source.to_string();
    for edit in sorted_edits {
        result.replace_range(edit.start_offset()..edit.end_offset(), &edit.replacement);
    }

    Ok(result)
}
