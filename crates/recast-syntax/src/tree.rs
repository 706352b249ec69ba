//! Immutable declaration tree over a token stream

use std::ops::Range;

use recast_core::{NodeId, NodeKind, Span, SyntaxContext, Token, TriviaKind};

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub kind: NodeKind,
    pub span: Span,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Token indices of the modifier list
    pub modifiers: Range<usize>,
    pub keyword: Option<usize>,
    /// First token after attribute lists
    pub first_token: Option<usize>,
    pub name: Option<usize>,
}

impl NodeData {
    pub fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            span: Span::default(),
            parent,
            children: Vec::new(),
            modifiers: 0..0,
            keyword: None,
            first_token: None,
            name: None,
        }
    }
}

/// A parsed document
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    text: String,
    tokens: Vec<Token>,
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    pub(crate) fn new(text: String, tokens: Vec<Token>, nodes: Vec<NodeData>) -> Self {
        Self {
            text,
            tokens,
            nodes,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.index()].children
    }

    /// The declared name of the node, if it has one
    pub fn name(&self, node: NodeId) -> Option<&str> {
        let index = self.nodes[node.index()].name?;
        Some(self.tokens[index].text(&self.text))
    }

    /// All nodes in document order, root first
    pub fn descendants(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![self.root()];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(self.children(node).iter().rev().copied());
            Some(node)
        })
    }

    /// First node of `kind` named `name`
    pub fn find(&self, kind: NodeKind, name: &str) -> Option<NodeId> {
        self.descendants()
            .find(|n| self.nodes[n.index()].kind == kind && self.name(*n) == Some(name))
    }

    fn child_at(&self, node: NodeId, offset: usize) -> Option<NodeId> {
        let children = self.children(node);
        children
            .iter()
            .find(|c| self.nodes[c.index()].span.contains(offset))
            .or_else(|| children.iter().find(|c| self.nodes[c.index()].span.end == offset))
            .copied()
    }
}

impl SyntaxContext for SyntaxTree {
    fn text(&self) -> &str {
        &self.text
    }

    fn node_at(&self, offset: usize) -> Option<NodeId> {
        if offset > self.text.len() {
            return None;
        }
        let mut node = self.root();
        while let Some(child) = self.child_at(node, offset) {
            node = child;
        }
        Some(node)
    }

    fn kind(&self, node: NodeId) -> NodeKind {
        self.nodes[node.index()].kind
    }

    fn span(&self, node: NodeId) -> Span {
        self.nodes[node.index()].span
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].parent
    }

    fn modifiers(&self, node: NodeId) -> &[Token] {
        &self.tokens[self.nodes[node.index()].modifiers.clone()]
    }

    fn keyword(&self, node: NodeId) -> Option<&Token> {
        self.nodes[node.index()].keyword.map(|i| &self.tokens[i])
    }

    fn first_token(&self, node: NodeId) -> Option<&Token> {
        self.nodes[node.index()].first_token.map(|i| &self.tokens[i])
    }

    fn trivia_at(&self, offset: usize) -> TriviaKind {
        // Tokens are ordered and their full spans tile the text
        let index = self.tokens.partition_point(|t| t.full_span().end <= offset);
        let Some(token) = self.tokens.get(index) else {
            return TriviaKind::None;
        };
        token
            .leading
            .iter()
            .chain(token.trailing.iter())
            .find(|t| t.span.contains(offset))
            .map_or(TriviaKind::None, |t| t.kind)
    }

    fn splits_token(&self, offset: usize) -> bool {
        let index = self.tokens.partition_point(|t| t.span.end <= offset);
        self.tokens
            .get(index)
            .is_some_and(|t| t.span.strictly_contains(offset))
    }
}
