//! recast-core: Core abstractions for editor refactorings
//!
//! This crate provides:
//! - `Edit`: A span-based text modification
//! - `apply_edits()`: Function to apply a non-overlapping edit batch
//! - `TextSnapshot`: Line queries over an immutable text
//! - `SyntaxContext`: Trait for the parsed view of a document
//! - `EditSession`: Trait for an editable buffer, plus `Transaction` and `TextBuffer`
//! - `EditorOptions`: Configuration loaded from `.recast.toml`

pub mod config;
mod edit;
pub mod logging;
pub mod session;
pub mod syntax;
pub mod text;

pub use config::{ConfigError, EditorOptions, LineEnding, WrapOptions};
pub use edit::{apply_edits, validate_edits, Edit, EditError};
pub use session::{EditSession, TextBuffer, Transaction};
pub use syntax::{NodeId, NodeKind, SyntaxContext, Token, TokenKind, Trivia, TriviaKind};
pub use text::{CaretPosition, Line, SelectSpan, Selection, SelectionMode, Span, TextSnapshot};
