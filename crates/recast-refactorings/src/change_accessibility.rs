//! Refactoring: Change the accessibility modifier of a declaration
//!
//! Example:
//! ```text
//! // Before
//! class Cache {
//!     private int _size;
//! }
//!
//! // After "Make internal", with "internal" selected
//! class Cache {
//!     internal int _size;
//! }
//! ```
//!
//! Applies to types, methods, constructors, destructors, operators, fields,
//! events, properties and indexers. A caret on a field's variable name works
//! on the whole field. Declarations that already have the target keyword,
//! overrides and enum members are skipped, and:
//! - protected needs an unsealed declaration inside an unsealed class
//! - private types must be nested in another type
//!
//! Modifier lists carrying several accessibility keywords are repaired: the
//! first one is rewritten and the rest are removed.

use recast_core::{
    logging, CaretPosition, Edit, NodeId, NodeKind, SelectSpan, Span, SyntaxContext, Token,
    TokenKind, TriviaKind,
};

use crate::context::RefactoringContext;
use crate::registry::{IconId, RefactorPlan, Refactoring};

/// Target accessibility of a [`ChangeAccessibilityRefactoring`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessibility {
    Public,
    Protected,
    Internal,
    Private,
}

impl Accessibility {
    pub const ALL: [Accessibility; 4] = [
        Accessibility::Public,
        Accessibility::Protected,
        Accessibility::Internal,
        Accessibility::Private,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Accessibility::Public => "public",
            Accessibility::Protected => "protected",
            Accessibility::Internal => "internal",
            Accessibility::Private => "private",
        }
    }

    pub fn token_kind(self) -> TokenKind {
        match self {
            Accessibility::Public => TokenKind::Public,
            Accessibility::Protected => TokenKind::Protected,
            Accessibility::Internal => TokenKind::Internal,
            Accessibility::Private => TokenKind::Private,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Accessibility::Public => "make_public",
            Accessibility::Protected => "make_protected",
            Accessibility::Internal => "make_internal",
            Accessibility::Private => "make_private",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Accessibility::Public => "Make public",
            Accessibility::Protected => "Make protected",
            Accessibility::Internal => "Make internal",
            Accessibility::Private => "Make private",
        }
    }

    fn icon(self) -> IconId {
        match self {
            Accessibility::Public => IconId::PublicSymbols,
            Accessibility::Protected => IconId::ProtectedSymbols,
            Accessibility::Internal => IconId::InternalSymbols,
            Accessibility::Private => IconId::PrivateSymbols,
        }
    }
}

pub struct ChangeAccessibilityRefactoring {
    target: Accessibility,
}

impl ChangeAccessibilityRefactoring {
    pub fn new(target: Accessibility) -> Self {
        Self { target }
    }

    pub fn target(&self) -> Accessibility {
        self.target
    }

    fn can_change(&self, syntax: &dyn SyntaxContext, declaration: NodeId) -> bool {
        let kind = syntax.kind(declaration);
        if kind == NodeKind::EnumMember
            || syntax.has_modifier(declaration, self.target.token_kind())
            || syntax.has_modifier(declaration, TokenKind::Override)
        {
            return false;
        }

        match self.target {
            Accessibility::Public | Accessibility::Internal => true,
            Accessibility::Protected => {
                !syntax.has_modifier(declaration, TokenKind::Sealed)
                    && syntax.parent(declaration).is_some_and(|parent| {
                        syntax.kind(parent) == NodeKind::Class
                            && !syntax.has_modifier(parent, TokenKind::Sealed)
                    })
            }
            Accessibility::Private => {
                if kind.is_type_declaration() && kind != NodeKind::Interface {
                    syntax
                        .parent(declaration)
                        .is_some_and(|parent| syntax.kind(parent).is_type_declaration())
                } else {
                    true
                }
            }
        }
    }
}

/// Declarations that carry a modifier list
fn has_modifier_list(kind: NodeKind) -> bool {
    kind.is_type_declaration()
        || kind.is_method_like()
        || kind.is_field_like()
        || kind.is_property_like()
}

/// The declaration the caret refers to; a variable declarator stands for its
/// field
fn resolve_declaration(ctx: &RefactoringContext<'_>) -> Option<NodeId> {
    let mut node = ctx.node()?;
    if ctx.syntax.kind(node) == NodeKind::VariableDeclarator {
        node = ctx.syntax.parent(node)?;
        node = ctx.syntax.parent(node)?;
    }
    let kind = ctx.syntax.kind(node);
    (has_modifier_list(kind) || kind == NodeKind::EnumMember).then_some(node)
}

/// Progress of the modifier list rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RewriteState {
    /// No accessibility keyword seen yet
    Searching,
    /// The first accessibility keyword, starting at the given offset, has
    /// been rewritten; any further ones are removed
    Replaced(usize),
}

/// Span removed for a redundant accessibility keyword: the keyword plus the
/// whitespace run directly after it
fn deletion_span(token: &Token) -> Span {
    match token.trailing.first() {
        Some(trivia) if trivia.kind == TriviaKind::Whitespace => {
            Span::new(token.span.start, trivia.span.end)
        }
        _ => token.span,
    }
}

impl Refactoring for ChangeAccessibilityRefactoring {
    fn name(&self) -> &'static str {
        self.target.name()
    }

    fn title(&self) -> &'static str {
        self.target.title()
    }

    fn icon(&self) -> IconId {
        self.target.icon()
    }

    fn accept(&self, ctx: &RefactoringContext<'_>) -> bool {
        resolve_declaration(ctx).is_some_and(|declaration| self.can_change(ctx.syntax, declaration))
    }

    fn plan(&self, ctx: &RefactoringContext<'_>) -> Option<RefactorPlan> {
        let declaration = resolve_declaration(ctx)?;
        if !self.can_change(ctx.syntax, declaration) {
            return None;
        }
        let keyword = self.target.keyword();
        let source = ctx.syntax.text();

        let mut edits = Vec::new();
        let mut state = RewriteState::Searching;
        for token in ctx.syntax.modifiers(declaration) {
            if !token.kind.is_accessibility() {
                continue;
            }
            state = match state {
                RewriteState::Searching => {
                    edits.push(Edit::replace(
                        token.span,
                        keyword,
                        format!("Replace '{}' with '{}'", token.text(source), keyword),
                    ));
                    RewriteState::Replaced(token.span.start)
                }
                RewriteState::Replaced(at) => {
                    logging::log_duplicate_accessibility(token.text(source), token.span.start);
                    edits.push(Edit::delete(
                        deletion_span(token),
                        format!("Remove duplicate '{}'", token.text(source)),
                    ));
                    RewriteState::Replaced(at)
                }
            };
        }

        let selection = match state {
            // Removals all follow the rewritten keyword, so its offset holds
            RewriteState::Replaced(at) => SelectSpan::new(at, keyword.len(), CaretPosition::Start),
            RewriteState::Searching => {
                let offset = ctx.syntax.first_token(declaration)?.span.start;
                edits.push(Edit::insert(
                    offset,
                    format!("{} ", keyword),
                    format!("Insert '{}'", keyword),
                ));
                SelectSpan::new(offset, keyword.len(), CaretPosition::End)
            }
        };

        Some(RefactorPlan { edits, selection })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recast_core::EditorOptions;
    use recast_syntax::parse;

    fn refactoring(target: Accessibility) -> ChangeAccessibilityRefactoring {
        ChangeAccessibilityRefactoring::new(target)
    }

    fn accepts(target: Accessibility, source: &str, caret_at: &str) -> bool {
        let tree = parse(source);
        let options = EditorOptions::default();
        let ctx = RefactoringContext::at_caret(&tree, &options, source.find(caret_at).unwrap());
        refactoring(target).accept(&ctx)
    }

    /// Run the refactoring and return the new text and the selected text
    fn rewrite(target: Accessibility, source: &str, caret_at: &str) -> (String, String) {
        let tree = parse(source);
        let options = EditorOptions::default();
        let ctx = RefactoringContext::at_caret(&tree, &options, source.find(caret_at).unwrap());
        let refactoring = refactoring(target);
        assert!(refactoring.accept(&ctx), "expected {:?} to be accepted", target);
        let plan = refactoring.plan(&ctx).unwrap();
        let result = plan.preview(source).unwrap();
        let span = plan.selection.span();
        let selected = result[span.start..span.end].to_string();
        (result, selected)
    }

    #[test]
    fn test_replace_single_keyword() {
        let (result, selected) = rewrite(Accessibility::Public, "private void M(){}", "M");
        assert_eq!(result, "public void M(){}");
        assert_eq!(selected, "public");

        let tree = parse(result.as_str());
        let method = tree.find(NodeKind::Method, "M").unwrap();
        assert_eq!(tree.modifiers(method).len(), 1);
    }

    #[test]
    fn test_duplicate_keywords_collapse_to_one() {
        let (result, selected) = rewrite(Accessibility::Internal, "public public void M(){}", "M");
        assert_eq!(result, "internal void M(){}");
        assert_eq!(selected, "internal");
    }

    #[test]
    fn test_mixed_duplicates_keep_other_modifiers() {
        let (result, _) = rewrite(
            Accessibility::Private,
            "class C { public static internal void M(){} }",
            "M(",
        );
        assert_eq!(result, "class C { private static void M(){} }");
    }

    #[test]
    fn test_duplicate_without_following_whitespace() {
        let (result, _) = rewrite(Accessibility::Public, "protected/**/internal void M(){}", "M");
        assert_eq!(result, "public/**/void M(){}");
    }

    #[test]
    fn test_insert_when_missing() {
        let (result, selected) = rewrite(Accessibility::Private, "void M(){}", "M");
        assert_eq!(result, "private void M(){}");
        assert_eq!(selected, "private");

        let (result, _) = rewrite(Accessibility::Public, "class C { static int x; }", "x;");
        assert_eq!(result, "class C { public static int x; }");
    }

    #[test]
    fn test_insert_after_attributes() {
        let source = "class C {\n    [Obsolete]\n    void M() { }\n}";
        let (result, _) = rewrite(Accessibility::Protected, source, "M()");
        assert_eq!(result, "class C {\n    [Obsolete]\n    protected void M() { }\n}");
    }

    #[test]
    fn test_variable_declarator_resolves_to_field() {
        let source = "class C { private int a, b; }";
        let (result, _) = rewrite(Accessibility::Internal, source, "b;");
        assert_eq!(result, "class C { internal int a, b; }");
    }

    #[test]
    fn test_skip_existing_override_and_enum_member() {
        assert!(!accepts(Accessibility::Public, "class C { public void M(){} }", "M("));
        assert!(!accepts(
            Accessibility::Internal,
            "class C { public override string ToString() => \"\"; }",
            "ToString"
        ));
        assert!(!accepts(Accessibility::Public, "enum E { A, B }", "B"));
    }

    #[test]
    fn test_plan_refuses_rejected_declarations() {
        let options = EditorOptions::default();
        for (target, source, caret_at) in [
            (Accessibility::Private, "class C { }", "C"),
            (Accessibility::Public, "enum E { A, B }", "B"),
            (Accessibility::Protected, "sealed class C { void M(){} }", "M("),
            (Accessibility::Internal, "class C { internal int x; }", "x;"),
        ] {
            let tree = parse(source);
            let ctx = RefactoringContext::at_caret(&tree, &options, source.find(caret_at).unwrap());
            assert!(refactoring(target).plan(&ctx).is_none(), "{:?} on {}", target, source);
        }
    }

    #[test]
    fn test_skip_nodes_without_modifier_list() {
        assert!(!accepts(Accessibility::Public, "namespace N { }", "N"));
        assert!(!accepts(Accessibility::Public, "delegate void D();", "D"));
    }

    #[test]
    fn test_protected_rules() {
        assert!(accepts(Accessibility::Protected, "class C { private void M(){} }", "M("));
        assert!(!accepts(Accessibility::Protected, "sealed class C { private void M(){} }", "M("));
        assert!(!accepts(Accessibility::Protected, "struct S { private void M(){} }", "M("));
        assert!(!accepts(Accessibility::Protected, "public class C { }", "C"));
        assert!(!accepts(
            Accessibility::Protected,
            "class O { private sealed class C { } }",
            "C {"
        ));
        assert!(accepts(Accessibility::Protected, "class O { private class C { } }", "C {"));
    }

    #[test]
    fn test_private_rules() {
        assert!(!accepts(Accessibility::Private, "public class C { }", "C"));
        assert!(accepts(Accessibility::Private, "class O { public class C { } }", "C {"));
        assert!(accepts(Accessibility::Private, "public interface I { }", "I"));
        assert!(accepts(Accessibility::Private, "class C { public int X { get; } }", "X"));
        assert!(accepts(Accessibility::Private, "void M(){}", "M"));
    }

    #[test]
    fn test_public_and_internal_on_types() {
        assert!(accepts(Accessibility::Public, "internal struct S { }", "S"));
        assert!(accepts(Accessibility::Internal, "public enum E { A }", "E"));
    }
}
