//! recast-refactorings: Editor refactoring implementations
//!
//! Available refactorings:
//! - wrap_in_region: Surround whole selected lines with `#region`/`#endregion`
//! - wrap_in_if: Surround whole selected lines with `#if DEBUG`/`#endif`
//! - seal_class: Add `sealed` to a class that is not abstract, static or sealed
//! - make_public, make_protected, make_internal, make_private: Rewrite the
//!   accessibility modifier of a declaration
//!
//! # Example
//!
//! ```ignore
//! use recast_refactorings::{RefactoringContext, RefactoringRegistry};
//!
//! let registry = RefactoringRegistry::new(&options);
//! let ctx = RefactoringContext::new(&tree, &options, selection, caret);
//! for refactoring in registry.applicable(&ctx) {
//!     println!("{}", refactoring.title());
//! }
//! ```

pub mod change_accessibility;
mod context;
pub mod gate;
mod registry;
pub mod seal_class;
pub mod wrap_in_text;

pub use change_accessibility::{Accessibility, ChangeAccessibilityRefactoring};
pub use context::RefactoringContext;
pub use gate::{GateGuard, UiGate};
pub use registry::{IconId, RefactorPlan, Refactoring, RefactoringRegistry};
pub use seal_class::SealClassRefactoring;
pub use wrap_in_text::WrapInTextRefactoring;
