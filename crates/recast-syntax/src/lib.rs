//! recast-syntax: In-memory syntax provider for recast
//!
//! Builds a [`SyntaxTree`] implementing [`recast_core::SyntaxContext`] from
//! C# source text. The tree stops at declarations: namespaces, types, enum
//! members, methods, constructors, destructors, operators, fields (down to
//! their variable declarators), properties, indexers and events. Statement
//! and expression structure is not modelled.
//!
//! # Example
//!
//! ```
//! use recast_core::{NodeKind, SyntaxContext};
//!
//! let tree = recast_syntax::parse("class C { private int x; }");
//! let field = tree.find(NodeKind::VariableDeclarator, "x").unwrap();
//! assert_eq!(tree.kind(tree.parent(tree.parent(field).unwrap()).unwrap()), NodeKind::Field);
//! ```

mod lexer;
mod parser;
mod tree;

pub use lexer::tokenize;
pub use tree::SyntaxTree;

/// Parse `text` into a declaration tree. Parsing never fails; unrecognised
/// tokens are skipped.
pub fn parse(text: impl Into<String>) -> SyntaxTree {
    let text = text.into();
    let tokens = tokenize(&text);
    let nodes = parser::Parser::new(&text, &tokens).parse();
    SyntaxTree::new(text, tokens, nodes)
}
