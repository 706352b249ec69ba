//! Everything a refactoring may look at when deciding and planning

use recast_core::{EditorOptions, NodeId, Selection, SyntaxContext, TextSnapshot};

/// The editor state a refactoring is evaluated against
#[derive(Clone, Copy)]
pub struct RefactoringContext<'a> {
    pub syntax: &'a dyn SyntaxContext,
    pub options: &'a EditorOptions,
    pub selection: Selection,
    pub caret: usize,
}

impl<'a> RefactoringContext<'a> {
    pub fn new(
        syntax: &'a dyn SyntaxContext,
        options: &'a EditorOptions,
        selection: Selection,
        caret: usize,
    ) -> Self {
        Self {
            syntax,
            options,
            selection,
            caret,
        }
    }

    /// A context with nothing selected and the caret at `caret`
    pub fn at_caret(
        syntax: &'a dyn SyntaxContext,
        options: &'a EditorOptions,
        caret: usize,
    ) -> Self {
        Self::new(syntax, options, Selection::caret(caret), caret)
    }

    /// A context selecting `selection`, caret at its end
    pub fn with_selection(
        syntax: &'a dyn SyntaxContext,
        options: &'a EditorOptions,
        selection: Selection,
    ) -> Self {
        Self::new(syntax, options, selection, selection.end)
    }

    /// The innermost syntax node at the caret
    pub fn node(&self) -> Option<NodeId> {
        self.syntax.node_at(self.caret)
    }

    pub fn snapshot(&self) -> TextSnapshot<'a> {
        let syntax: &'a dyn SyntaxContext = self.syntax;
        TextSnapshot::new(syntax.text())
    }
}
