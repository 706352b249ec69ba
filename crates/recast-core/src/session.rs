//! Editable buffers and all-or-nothing edit transactions

use crate::edit::{apply_edits, validate_edits, Edit, EditError};
use crate::logging;
use crate::text::{SelectSpan, Selection, Span};

/// An editable document the refactorings write into
pub trait EditSession {
    /// Current text of the buffer
    fn text(&self) -> &str;

    fn selection(&self) -> Selection;

    fn is_read_only(&self) -> bool;

    /// Apply a whole batch atomically, returning the new buffer version.
    ///
    /// On error the buffer is left untouched.
    fn commit(&mut self, edits: &[Edit]) -> Result<u64, EditError>;

    /// Select a span of the current text and place the caret
    fn select(&mut self, span: SelectSpan);
}

/// A pending batch of edits against one session
///
/// Nothing reaches the buffer until [`Transaction::commit`]; dropping the
/// transaction discards every pending edit.
pub struct Transaction<'s, S: EditSession + ?Sized> {
    session: &'s mut S,
    pending: Vec<Edit>,
}

impl<'s, S: EditSession + ?Sized> Transaction<'s, S> {
    /// Open a transaction, failing if the buffer cannot be written
    pub fn begin(session: &'s mut S) -> Result<Self, EditError> {
        if session.is_read_only() {
            return Err(EditError::ReadOnly);
        }
        Ok(Self {
            session,
            pending: Vec::new(),
        })
    }

    /// Queue an edit; it is rejected if it does not fit the current text or
    /// overlaps an edit already queued
    pub fn push(&mut self, edit: Edit) -> Result<(), EditError> {
        self.pending.push(edit);
        if let Err(e) = validate_edits(self.session.text(), &self.pending) {
            self.pending.pop();
            return Err(e);
        }
        Ok(())
    }

    pub fn insert(&mut self, offset: usize, text: impl Into<String>) -> Result<(), EditError> {
        self.push(Edit::insert(offset, text, "insert"))
    }

    pub fn replace(&mut self, span: Span, text: impl Into<String>) -> Result<(), EditError> {
        self.push(Edit::replace(span, text, "replace"))
    }

    pub fn pending(&self) -> &[Edit] {
        &self.pending
    }

    /// Apply every queued edit at once
    pub fn commit(self) -> Result<u64, EditError> {
        let version = self.session.commit(&self.pending)?;
        logging::log_commit(version, &self.pending);
        Ok(version)
    }
}

/// In-memory [`EditSession`] holding a text, a selection and a version counter
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
    version: u64,
    read_only: bool,
    selection: Selection,
    caret: usize,
}

impl TextBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Incremented once per committed batch
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
        self.caret = selection.end;
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// The currently selected text
    pub fn selected_text(&self) -> &str {
        &self.text[self.selection.start..self.selection.end]
    }
}

impl EditSession for TextBuffer {
    fn text(&self) -> &str {
        &self.text
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn commit(&mut self, edits: &[Edit]) -> Result<u64, EditError> {
        if self.read_only {
            return Err(EditError::ReadOnly);
        }
        self.text = apply_edits(&self.text, edits)?;
        self.version += 1;
        Ok(self.version)
    }

    fn select(&mut self, span: SelectSpan) {
        let end = (span.start + span.length).min(self.text.len());
        let start = span.start.min(end);
        self.selection = Selection::stream(start, end);
        self.caret = span.caret_offset().min(self.text.len());
    }
}
