//! Refactoring: Surround whole lines with a pair of delimiter lines
//!
//! Example:
//! ```text
//! // Before (lines 2-3 selected)
//! void M() {
//!     Log();
//!     Run();
//! }
//!
//! // After, with "RegionName" selected
//! void M() {
//!     #region RegionName
//!     Log();
//!     Run();
//!     #endregion
//! }
//! ```
//!
//! Requirements:
//! - Non-empty stream selection
//! - Selection starts inside the first line's indentation
//! - Selection ends at the end of a line, before or after its line break
//! - Neither end of the selection cuts through a token, comment or directive

use recast_core::{CaretPosition, Edit, SelectSpan, SelectionMode, SyntaxContext, TriviaKind};

use crate::context::RefactoringContext;
use crate::registry::{IconId, RefactorPlan, Refactoring};

pub struct WrapInTextRefactoring {
    name: &'static str,
    title: &'static str,
    /// Leading delimiter line, without indentation or line break
    start: String,
    /// Trailing delimiter line, without indentation or line break
    end: String,
    /// Placeholder within `start` selected after wrapping
    select_start: usize,
    select_length: usize,
}

impl WrapInTextRefactoring {
    /// `#region <name>` / `#endregion`, selecting the region name
    pub fn region(name: &str) -> Self {
        Self::new("wrap_in_region", "Surround with #region", "#region ", name, "#endregion")
    }

    /// `#if <condition>` / `#endif`, selecting the condition
    pub fn conditional(condition: &str) -> Self {
        Self::new("wrap_in_if", "Surround with #if", "#if ", condition, "#endif")
    }

    fn new(
        name: &'static str,
        title: &'static str,
        directive: &str,
        placeholder: &str,
        end: &str,
    ) -> Self {
        Self {
            name,
            title,
            start: format!("{}{}", directive, placeholder),
            end: end.to_string(),
            select_start: directive.len(),
            select_length: placeholder.len(),
        }
    }

    pub fn start_delimiter(&self) -> &str {
        &self.start
    }

    pub fn end_delimiter(&self) -> &str {
        &self.end
    }
}

/// Whitespace, a line break, or the gap between two tokens
fn is_line_boundary(syntax: &dyn SyntaxContext, offset: usize) -> bool {
    matches!(
        syntax.trivia_at(offset),
        TriviaKind::None | TriviaKind::Whitespace | TriviaKind::EndOfLine
    ) && !syntax.splits_token(offset)
}

impl Refactoring for WrapInTextRefactoring {
    fn name(&self) -> &'static str {
        self.name
    }

    fn title(&self) -> &'static str {
        self.title
    }

    fn icon(&self) -> IconId {
        IconId::SurroundWith
    }

    fn accept(&self, ctx: &RefactoringContext<'_>) -> bool {
        let selection = ctx.selection;
        if selection.is_empty() || selection.mode != SelectionMode::Stream {
            return false;
        }

        let snapshot = ctx.snapshot();
        let first = snapshot.line_from_position(selection.start);
        let column = selection.start - first.start;
        if column > snapshot.leading_whitespace(first).len() {
            return false;
        }

        let last = snapshot.line_from_position(selection.end - 1);
        if selection.end != last.end && selection.end != last.end_including_line_break {
            return false;
        }

        is_line_boundary(ctx.syntax, selection.start) && is_line_boundary(ctx.syntax, selection.end)
    }

    fn plan(&self, ctx: &RefactoringContext<'_>) -> Option<RefactorPlan> {
        if !self.accept(ctx) {
            return None;
        }
        let selection = ctx.selection;

        let snapshot = ctx.snapshot();
        let first = snapshot.line_from_position(selection.start);
        let last = snapshot.line_from_position(selection.end - 1);
        let indent = snapshot.leading_whitespace(first);
        let newline = snapshot
            .line_break_text(first)
            .unwrap_or_else(|| ctx.options.line_ending.as_str());

        let leading = format!("{}{}{}", indent, self.start, newline);
        let trailing = match snapshot.line_break_text(last) {
            Some(_) => format!("{}{}{}", indent, self.end, newline),
            // Last line of the file: start a new line instead of ending one
            None => format!("{}{}{}", newline, indent, self.end),
        };

        Some(RefactorPlan {
            edits: vec![
                Edit::insert(first.start, leading, format!("Insert {}", self.start)),
                Edit::insert(
                    last.end_including_line_break,
                    trailing,
                    format!("Insert {}", self.end),
                ),
            ],
            selection: SelectSpan::new(
                first.start + indent.len() + self.select_start,
                self.select_length,
                CaretPosition::End,
            ),
        })
    }
}
