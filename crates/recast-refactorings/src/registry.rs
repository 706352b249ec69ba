//! Refactoring trait and registry

use recast_core::{
    apply_edits, logging, Edit, EditError, EditSession, EditorOptions, SelectSpan, Transaction,
};

use crate::change_accessibility::{Accessibility, ChangeAccessibilityRefactoring};
use crate::context::RefactoringContext;
use crate::seal_class::SealClassRefactoring;
use crate::wrap_in_text::WrapInTextRefactoring;

/// Icon shown next to a refactoring in the editor's menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconId {
    SurroundWith,
    SealedClass,
    PublicSymbols,
    ProtectedSymbols,
    InternalSymbols,
    PrivateSymbols,
}

/// The edits a refactoring will make and where the selection goes afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefactorPlan {
    /// Non-overlapping edits, offsets relative to the text the plan was made from
    pub edits: Vec<Edit>,
    /// Selection to establish after the edits, offsets relative to the edited text
    pub selection: SelectSpan,
}

impl RefactorPlan {
    /// The text that committing this plan against `source` would produce
    pub fn preview(&self, source: &str) -> Result<String, EditError> {
        apply_edits(source, &self.edits)
    }

    /// Apply the plan in one transaction, then select the planned span.
    ///
    /// If the session refuses any edit, nothing is applied and the selection
    /// is left alone.
    pub fn commit(&self, session: &mut dyn EditSession) -> Result<u64, EditError> {
        let mut tx = Transaction::begin(&mut *session)?;
        for edit in &self.edits {
            tx.push(edit.clone())?;
        }
        let version = tx.commit()?;
        session.select(self.selection);
        Ok(version)
    }
}

/// A refactoring the editor can offer at a position
pub trait Refactoring: Send + Sync {
    /// The unique identifier for this refactoring (e.g., "seal_class")
    fn name(&self) -> &'static str;

    /// Menu title
    fn title(&self) -> &'static str;

    fn icon(&self) -> IconId;

    /// Whether the refactoring is legal in this context. Never mutates anything.
    fn accept(&self, ctx: &RefactoringContext<'_>) -> bool;

    /// Compute the edits for an accepted context; `None` when the context
    /// does not have the expected shape
    fn plan(&self, ctx: &RefactoringContext<'_>) -> Option<RefactorPlan>;

    /// Plan and commit against `session`.
    ///
    /// Returns `Ok(false)` when there was nothing to do and `Err` when the
    /// session rejected the edits; in both cases the buffer is unchanged.
    fn refactor(
        &self,
        ctx: &RefactoringContext<'_>,
        session: &mut dyn EditSession,
    ) -> Result<bool, EditError> {
        let Some(plan) = self.plan(ctx) else {
            logging::log_no_plan(self.name());
            return Ok(false);
        };
        logging::log_plan(self.name(), &plan.edits);

        match plan.commit(session) {
            Ok(_) => Ok(true),
            Err(e) => {
                logging::log_rejected(self.name(), &e);
                Err(e)
            }
        }
    }
}

/// Registry of all available refactorings
///
/// Built once and then only read; pass it by reference to whatever
/// dispatches editor commands.
pub struct RefactoringRegistry {
    refactorings: Vec<Box<dyn Refactoring>>,
}

impl RefactoringRegistry {
    /// Create a registry with all built-in refactorings
    pub fn new(options: &EditorOptions) -> Self {
        let mut registry = Self {
            refactorings: Vec::new(),
        };

        registry.register(Box::new(WrapInTextRefactoring::region(&options.wrap.region_name)));
        registry.register(Box::new(WrapInTextRefactoring::conditional(
            &options.wrap.if_condition,
        )));
        registry.register(Box::new(SealClassRefactoring));
        for target in Accessibility::ALL {
            registry.register(Box::new(ChangeAccessibilityRefactoring::new(target)));
        }

        registry
    }

    fn register(&mut self, refactoring: Box<dyn Refactoring>) {
        self.refactorings.push(refactoring);
    }

    /// All refactorings in registration order
    pub fn all(&self) -> impl Iterator<Item = &dyn Refactoring> {
        self.refactorings.iter().map(|r| r.as_ref())
    }

    /// Get all refactoring names
    pub fn names(&self) -> Vec<&'static str> {
        self.refactorings.iter().map(|r| r.name()).collect()
    }

    /// Look up a refactoring by name
    pub fn get(&self, name: &str) -> Option<&dyn Refactoring> {
        self.all().find(|r| r.name() == name)
    }

    /// Refactorings whose predicate accepts `ctx`, in registration order
    pub fn applicable(&self, ctx: &RefactoringContext<'_>) -> Vec<&dyn Refactoring> {
        self.all()
            .filter(|r| {
                let accepted = r.accept(ctx);
                logging::log_accept(r.name(), ctx.caret, accepted);
                accepted
            })
            .collect()
    }
}

impl Default for RefactoringRegistry {
    fn default() -> Self {
        Self::new(&EditorOptions::default())
    }
}
