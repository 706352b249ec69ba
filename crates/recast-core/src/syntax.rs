//! The parsed view of a document that refactorings query
//!
//! The syntax provider owns the tree; refactorings only navigate it through
//! [`SyntaxContext`] using [`NodeId`] handles.

use crate::text::Span;

/// Handle to a node of a syntax tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Kind of a syntax node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    CompilationUnit,
    Namespace,
    Class,
    Struct,
    Interface,
    Record,
    Enum,
    Delegate,
    Method,
    Constructor,
    Destructor,
    Operator,
    Field,
    EventField,
    Property,
    Indexer,
    Event,
    VariableDeclaration,
    VariableDeclarator,
    EnumMember,
}

impl NodeKind {
    /// Class, struct, interface, record or enum
    pub fn is_type_declaration(self) -> bool {
        matches!(
            self,
            NodeKind::Class
                | NodeKind::Struct
                | NodeKind::Interface
                | NodeKind::Record
                | NodeKind::Enum
        )
    }

    pub fn is_method_like(self) -> bool {
        matches!(
            self,
            NodeKind::Method | NodeKind::Constructor | NodeKind::Destructor | NodeKind::Operator
        )
    }

    pub fn is_field_like(self) -> bool {
        matches!(self, NodeKind::Field | NodeKind::EventField)
    }

    pub fn is_property_like(self) -> bool {
        matches!(self, NodeKind::Property | NodeKind::Indexer | NodeKind::Event)
    }
}

/// Kind of a lexical token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Modifiers
    Public,
    Protected,
    Internal,
    Private,
    Sealed,
    Abstract,
    Static,
    Override,
    Virtual,
    Readonly,
    Const,
    Extern,
    Unsafe,
    New,
    Partial,
    Async,
    Volatile,
    Required,

    // Declaration keywords
    Class,
    Struct,
    Interface,
    Enum,
    Record,
    Delegate,
    Namespace,
    Event,
    Operator,
    Implicit,
    Explicit,
    This,
    Using,

    Identifier,
    NumericLiteral,
    StringLiteral,
    CharLiteral,

    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    LessThan,
    GreaterThan,
    Semicolon,
    Comma,
    Dot,
    Equals,
    Tilde,
    Arrow,
    Punctuation,

    EndOfFile,
}

impl TokenKind {
    /// Look up the keyword kind for `text`, if it is one of the recognised keywords
    pub fn from_keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "public" => TokenKind::Public,
            "protected" => TokenKind::Protected,
            "internal" => TokenKind::Internal,
            "private" => TokenKind::Private,
            "sealed" => TokenKind::Sealed,
            "abstract" => TokenKind::Abstract,
            "static" => TokenKind::Static,
            "override" => TokenKind::Override,
            "virtual" => TokenKind::Virtual,
            "readonly" => TokenKind::Readonly,
            "const" => TokenKind::Const,
            "extern" => TokenKind::Extern,
            "unsafe" => TokenKind::Unsafe,
            "new" => TokenKind::New,
            "partial" => TokenKind::Partial,
            "async" => TokenKind::Async,
            "volatile" => TokenKind::Volatile,
            "required" => TokenKind::Required,
            "class" => TokenKind::Class,
            "struct" => TokenKind::Struct,
            "interface" => TokenKind::Interface,
            "enum" => TokenKind::Enum,
            "record" => TokenKind::Record,
            "delegate" => TokenKind::Delegate,
            "namespace" => TokenKind::Namespace,
            "event" => TokenKind::Event,
            "operator" => TokenKind::Operator,
            "implicit" => TokenKind::Implicit,
            "explicit" => TokenKind::Explicit,
            "this" => TokenKind::This,
            "using" => TokenKind::Using,
            _ => return None,
        };
        Some(kind)
    }

    /// Keywords that may appear in a declaration's modifier list
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            TokenKind::Public
                | TokenKind::Protected
                | TokenKind::Internal
                | TokenKind::Private
                | TokenKind::Sealed
                | TokenKind::Abstract
                | TokenKind::Static
                | TokenKind::Override
                | TokenKind::Virtual
                | TokenKind::Readonly
                | TokenKind::Const
                | TokenKind::Extern
                | TokenKind::Unsafe
                | TokenKind::New
                | TokenKind::Partial
                | TokenKind::Async
                | TokenKind::Volatile
                | TokenKind::Required
        )
    }

    pub fn is_accessibility(self) -> bool {
        matches!(
            self,
            TokenKind::Public | TokenKind::Protected | TokenKind::Internal | TokenKind::Private
        )
    }
}

/// Classification of trivia at a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriviaKind {
    /// No trivia covers the position
    None,
    Whitespace,
    EndOfLine,
    /// Comments, preprocessor directives and disabled text
    Other,
}

/// Non-semantic text attached to a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub span: Span,
}

/// A lexical token with its attached trivia
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub leading: Vec<Trivia>,
    pub trailing: Vec<Trivia>,
}

impl Token {
    /// The span including leading and trailing trivia
    pub fn full_span(&self) -> Span {
        let start = self.leading.first().map_or(self.span.start, |t| t.span.start);
        let end = self.trailing.last().map_or(self.span.end, |t| t.span.end);
        Span::new(start, end)
    }

    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.start..self.span.end]
    }
}

/// Read-only queries over a parsed document
///
/// Implemented by the syntax provider. Offsets are byte offsets into
/// [`SyntaxContext::text`].
pub trait SyntaxContext {
    /// The source text the tree was built from
    fn text(&self) -> &str;

    /// The innermost node whose span contains `offset`
    fn node_at(&self, offset: usize) -> Option<NodeId>;

    fn kind(&self, node: NodeId) -> NodeKind;

    /// The node's span, attributes included
    fn span(&self, node: NodeId) -> Span;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// The node's modifier tokens in source order; empty when it has none
    fn modifiers(&self, node: NodeId) -> &[Token];

    /// The primary keyword of a type declaration (`class`, `struct`, ...)
    fn keyword(&self, node: NodeId) -> Option<&Token>;

    /// The first token of the declaration after any attribute lists
    fn first_token(&self, node: NodeId) -> Option<&Token>;

    /// The kind of trivia whose span contains `offset`, [`TriviaKind::None`]
    /// if the offset is not covered by trivia
    fn trivia_at(&self, offset: usize) -> TriviaKind;

    /// Whether `offset` falls strictly inside a token
    fn splits_token(&self, offset: usize) -> bool;

    /// Whether the node's modifier list contains a token of `kind`
    fn has_modifier(&self, node: NodeId, kind: TokenKind) -> bool {
        self.modifiers(node).iter().any(|m| m.kind == kind)
    }
}
