//! Refactoring: Add `sealed` to a class
//!
//! Example:
//! ```text
//! // Before
//! public class Parser { }
//!
//! // After, with "sealed" selected
//! public sealed class Parser { }
//! ```
//!
//! Abstract, static and already sealed classes are left alone. The keyword
//! goes in front of `partial` when the class is partial.

use recast_core::{CaretPosition, Edit, NodeKind, SelectSpan, SyntaxContext, TokenKind};

use crate::context::RefactoringContext;
use crate::registry::{IconId, RefactorPlan, Refactoring};

const SEALED: &str = "sealed";

pub struct SealClassRefactoring;

fn can_be_sealed(syntax: &dyn SyntaxContext, node: recast_core::NodeId) -> bool {
    !syntax.modifiers(node).iter().any(|m| {
        matches!(
            m.kind,
            TokenKind::Sealed | TokenKind::Abstract | TokenKind::Static
        )
    })
}

impl Refactoring for SealClassRefactoring {
    fn name(&self) -> &'static str {
        "seal_class"
    }

    fn title(&self) -> &'static str {
        "Seal class"
    }

    fn icon(&self) -> IconId {
        IconId::SealedClass
    }

    fn accept(&self, ctx: &RefactoringContext<'_>) -> bool {
        ctx.node().is_some_and(|node| {
            ctx.syntax.kind(node) == NodeKind::Class && can_be_sealed(ctx.syntax, node)
        })
    }

    fn plan(&self, ctx: &RefactoringContext<'_>) -> Option<RefactorPlan> {
        let node = ctx.node()?;
        if ctx.syntax.kind(node) != NodeKind::Class || !can_be_sealed(ctx.syntax, node) {
            return None;
        }
        let keyword = ctx.syntax.keyword(node)?;
        // `partial` has to stay directly in front of the keyword
        let offset = match ctx.syntax.modifiers(node).last() {
            Some(last) if last.kind == TokenKind::Partial => last.span.start,
            _ => keyword.span.start,
        };

        Some(RefactorPlan {
            edits: vec![Edit::insert(offset, format!("{} ", SEALED), "Seal class")],
            selection: SelectSpan::new(offset, SEALED.len(), CaretPosition::End),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recast_core::EditorOptions;
    use recast_syntax::parse;

    fn check(source: &str, caret_at: &str) -> Option<String> {
        let tree = parse(source);
        let options = EditorOptions::default();
        let ctx = RefactoringContext::at_caret(&tree, &options, source.find(caret_at).unwrap());
        if !SealClassRefactoring.accept(&ctx) {
            return None;
        }
        let plan = SealClassRefactoring.plan(&ctx).unwrap();
        let result = plan.preview(source).unwrap();
        let selected = plan.selection.span();
        assert_eq!(&result[selected.start..selected.end], "sealed");
        Some(result)
    }

    #[test]
    fn test_seals_plain_class() {
        assert_eq!(check("class C { }", "C").unwrap(), "sealed class C { }");
        assert_eq!(
            check("public partial class C { }", "class").unwrap(),
            "public sealed partial class C { }"
        );
    }

    #[test]
    fn test_attributes_do_not_move_insertion() {
        assert_eq!(
            check("[Serializable]\ninternal class C { }", "C {").unwrap(),
            "[Serializable]\ninternal sealed class C { }"
        );
    }

    #[test]
    fn test_skip_abstract_static_sealed() {
        assert!(check("public abstract class C { }", "C").is_none());
        assert!(check("static class C { }", "C").is_none());
        assert!(check("sealed class C { }", "C").is_none());
    }

    #[test]
    fn test_plan_skips_class_that_cannot_be_sealed() {
        let source = "abstract class C { }";
        let tree = parse(source);
        let options = EditorOptions::default();
        let ctx = RefactoringContext::at_caret(&tree, &options, source.find('C').unwrap());
        assert!(SealClassRefactoring.plan(&ctx).is_none());
    }

    #[test]
    fn test_skip_non_class() {
        assert!(check("struct S { }", "S").is_none());
        assert!(check("interface I { }", "I").is_none());
        assert!(check("class C { void M() { } }", "M").is_none());
    }
}
