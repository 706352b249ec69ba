//! Declaration-level parser
//!
//! Recognises namespaces, type declarations and their members. Member bodies,
//! initializers, base lists and constraints are skipped as balanced token runs.

use recast_core::{NodeId, NodeKind, Span, Token, TokenKind};

use crate::tree::NodeData;

pub(crate) struct Parser<'t> {
    text: &'t str,
    tokens: &'t [Token],
    pos: usize,
    nodes: Vec<NodeData>,
}

/// Tokens shared by every declaration header
#[derive(Debug, Clone)]
struct Header {
    parent: NodeId,
    /// First token, attributes included
    start: usize,
    /// First token after attributes
    first: usize,
    /// End of the modifier list
    modifiers_end: usize,
}

impl<'t> Parser<'t> {
    pub fn new(text: &'t str, tokens: &'t [Token]) -> Self {
        Self {
            text,
            tokens,
            pos: 0,
            nodes: Vec::new(),
        }
    }

    pub fn parse(mut self) -> Vec<NodeData> {
        let mut root = NodeData::new(NodeKind::CompilationUnit, None);
        root.span = Span::new(0, self.text.len());
        self.nodes.push(root);
        self.parse_members(NodeId::new(0), false);
        self.nodes
    }

    fn kind(&self) -> TokenKind {
        self.nth(0)
    }

    fn nth(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(TokenKind::EndOfFile, |t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    fn at_text(&self, text: &str) -> bool {
        self.tokens
            .get(self.pos)
            .is_some_and(|t| t.text(self.text) == text)
    }

    fn at_end(&self) -> bool {
        self.at(TokenKind::EndOfFile)
    }

    fn bump(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn add_node(&mut self, kind: NodeKind, header: &Header) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        let mut data = NodeData::new(kind, Some(header.parent));
        data.modifiers = header.first..header.modifiers_end;
        data.first_token = Some(header.first);
        self.nodes.push(data);
        self.nodes[header.parent.index()].children.push(id);
        id
    }

    /// Close `node`, spanning from token `start` to the last consumed token
    fn finish(&mut self, node: NodeId, start: usize) {
        let begin = self.tokens[start].span.start;
        let end = if self.pos > start {
            self.tokens[self.pos - 1].span.end
        } else {
            begin
        };
        self.nodes[node.index()].span = Span::new(begin, end.max(begin));
    }

    fn parse_members(&mut self, parent: NodeId, in_braces: bool) {
        while !self.at_end() {
            if in_braces && self.at(TokenKind::CloseBrace) {
                break;
            }
            let before = self.pos;
            self.parse_member(parent);
            if self.pos == before {
                self.bump();
            }
        }
    }

    fn parse_member(&mut self, parent: NodeId) {
        if self.at(TokenKind::Using) {
            self.skip_to_semicolon();
            return;
        }

        let start = self.pos;
        self.skip_attributes();
        let first = self.pos;
        while self.kind().is_modifier() {
            self.bump();
        }
        let header = Header {
            parent,
            start,
            first,
            modifiers_end: self.pos,
        };

        match self.kind() {
            TokenKind::Namespace => self.parse_namespace(header),
            TokenKind::Class | TokenKind::Struct | TokenKind::Interface | TokenKind::Record => {
                self.parse_type(header)
            }
            TokenKind::Enum => self.parse_enum(header),
            TokenKind::Delegate => {
                let node = self.add_node(NodeKind::Delegate, &header);
                self.nodes[node.index()].keyword = Some(self.pos);
                self.skip_to_semicolon();
                self.finish(node, header.start);
            }
            TokenKind::Event => self.parse_event(header),
            TokenKind::Tilde => {
                let node = self.add_node(NodeKind::Destructor, &header);
                self.bump();
                if self.at(TokenKind::Identifier) {
                    self.nodes[node.index()].name = Some(self.pos);
                    self.bump();
                }
                self.parse_method_rest();
                self.finish(node, header.start);
            }
            TokenKind::Identifier
            | TokenKind::OpenParen
            | TokenKind::Implicit
            | TokenKind::Explicit => self.parse_typed_member(header),
            _ => {}
        }
    }

    fn parse_namespace(&mut self, header: Header) {
        let node = self.add_node(NodeKind::Namespace, &header);
        self.nodes[node.index()].keyword = Some(self.pos);
        self.bump();
        if self.at(TokenKind::Identifier) {
            self.nodes[node.index()].name = Some(self.pos);
        }
        while !matches!(
            self.kind(),
            TokenKind::OpenBrace | TokenKind::Semicolon | TokenKind::EndOfFile
        ) {
            self.bump();
        }
        if self.eat(TokenKind::OpenBrace) {
            self.parse_members(node, true);
            self.eat(TokenKind::CloseBrace);
        } else if self.eat(TokenKind::Semicolon) {
            // File-scoped namespace owns the rest of the file
            self.parse_members(node, false);
        }
        self.finish(node, header.start);
    }

    fn parse_type(&mut self, header: Header) {
        let kind = match self.kind() {
            TokenKind::Class => NodeKind::Class,
            TokenKind::Struct => NodeKind::Struct,
            TokenKind::Interface => NodeKind::Interface,
            _ => NodeKind::Record,
        };
        let node = self.add_node(kind, &header);
        self.nodes[node.index()].keyword = Some(self.pos);
        self.bump();
        if kind == NodeKind::Record && matches!(self.kind(), TokenKind::Class | TokenKind::Struct) {
            self.bump();
        }
        if self.at(TokenKind::Identifier) {
            self.nodes[node.index()].name = Some(self.pos);
            self.bump();
        }
        self.skip_type_header();

        if self.eat(TokenKind::OpenBrace) {
            self.parse_members(node, true);
            self.eat(TokenKind::CloseBrace);
            self.eat(TokenKind::Semicolon);
        } else {
            self.eat(TokenKind::Semicolon);
        }
        self.finish(node, header.start);
    }

    fn parse_enum(&mut self, header: Header) {
        let node = self.add_node(NodeKind::Enum, &header);
        self.nodes[node.index()].keyword = Some(self.pos);
        self.bump();
        if self.at(TokenKind::Identifier) {
            self.nodes[node.index()].name = Some(self.pos);
            self.bump();
        }
        self.skip_type_header();

        if self.eat(TokenKind::OpenBrace) {
            loop {
                match self.kind() {
                    TokenKind::CloseBrace => {
                        self.bump();
                        break;
                    }
                    TokenKind::EndOfFile => break,
                    TokenKind::Comma => self.bump(),
                    _ => self.parse_enum_member(node),
                }
            }
            self.eat(TokenKind::Semicolon);
        } else {
            self.eat(TokenKind::Semicolon);
        }
        self.finish(node, header.start);
    }

    fn parse_enum_member(&mut self, parent: NodeId) {
        let start = self.pos;
        self.skip_attributes();
        if !self.at(TokenKind::Identifier) {
            self.bump();
            return;
        }
        let header = Header {
            parent,
            start,
            first: self.pos,
            modifiers_end: self.pos,
        };
        let node = self.add_node(NodeKind::EnumMember, &header);
        self.nodes[node.index()].name = Some(self.pos);
        self.bump();
        self.skip_until(&[TokenKind::Comma, TokenKind::CloseBrace]);
        self.finish(node, header.start);
    }

    fn parse_event(&mut self, header: Header) {
        self.bump();
        let type_start = self.pos;
        self.skip_type();

        // `event Handler Name { add; remove; }` is property-like
        let mut lookahead = 0;
        while matches!(self.nth(lookahead), TokenKind::Identifier | TokenKind::Dot) {
            lookahead += 1;
        }
        if self.nth(lookahead) == TokenKind::OpenBrace {
            let node = self.add_node(NodeKind::Event, &header);
            self.nodes[node.index()].name = Some(self.pos);
            self.skip_qualified_name();
            self.parse_accessor_body();
            self.finish(node, header.start);
        } else {
            self.parse_field(NodeKind::EventField, header, type_start);
        }
    }

    fn parse_typed_member(&mut self, header: Header) {
        let type_start = self.pos;

        if self.at(TokenKind::Identifier) && self.nth(1) == TokenKind::OpenParen {
            let node = self.add_node(NodeKind::Constructor, &header);
            self.nodes[node.index()].name = Some(self.pos);
            self.bump();
            self.parse_method_rest();
            self.finish(node, header.start);
            return;
        }

        if matches!(self.kind(), TokenKind::Implicit | TokenKind::Explicit) {
            self.parse_operator(header);
            return;
        }

        self.skip_type();
        if self.pos == type_start {
            return;
        }

        match self.kind() {
            TokenKind::Operator => self.parse_operator(header),
            TokenKind::This => self.parse_indexer(header),
            TokenKind::Identifier => {
                let name = self.pos;
                let is_indexer = self.skip_qualified_name();
                if is_indexer {
                    self.parse_indexer(header);
                    return;
                }
                match self.kind() {
                    TokenKind::OpenParen | TokenKind::LessThan => {
                        let node = self.add_node(NodeKind::Method, &header);
                        self.nodes[node.index()].name = Some(self.last_name_token(name));
                        self.parse_method_rest();
                        self.finish(node, header.start);
                    }
                    TokenKind::OpenBrace | TokenKind::Arrow => {
                        let node = self.add_node(NodeKind::Property, &header);
                        self.nodes[node.index()].name = Some(self.last_name_token(name));
                        self.parse_accessor_body();
                        self.finish(node, header.start);
                    }
                    _ => {
                        self.pos = name;
                        self.parse_field(NodeKind::Field, header, type_start);
                    }
                }
            }
            _ => {}
        }
    }

    fn parse_operator(&mut self, header: Header) {
        let node = self.add_node(NodeKind::Operator, &header);
        while !matches!(
            self.kind(),
            TokenKind::OpenParen
                | TokenKind::OpenBrace
                | TokenKind::Semicolon
                | TokenKind::EndOfFile
        ) {
            self.bump();
        }
        self.parse_method_rest();
        self.finish(node, header.start);
    }

    fn parse_indexer(&mut self, header: Header) {
        let node = self.add_node(NodeKind::Indexer, &header);
        self.nodes[node.index()].name = Some(self.pos);
        self.bump();
        if self.at(TokenKind::OpenBracket) {
            self.skip_balanced();
        }
        self.parse_accessor_body();
        self.finish(node, header.start);
    }

    fn parse_field(&mut self, kind: NodeKind, header: Header, type_start: usize) {
        let field = self.add_node(kind, &header);
        let declaration_header = Header {
            parent: field,
            start: type_start,
            first: type_start,
            modifiers_end: type_start,
        };
        let declaration = self.add_node(NodeKind::VariableDeclaration, &declaration_header);

        while self.at(TokenKind::Identifier) {
            let declarator_header = Header {
                parent: declaration,
                start: self.pos,
                first: self.pos,
                modifiers_end: self.pos,
            };
            let declarator = self.add_node(NodeKind::VariableDeclarator, &declarator_header);
            self.nodes[declarator.index()].name = Some(self.pos);
            self.bump();
            self.skip_until(&[TokenKind::Comma, TokenKind::Semicolon, TokenKind::CloseBrace]);
            self.finish(declarator, declarator_header.start);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.finish(declaration, type_start);
        self.eat(TokenKind::Semicolon);
        self.finish(field, header.start);
    }

    /// Parameters, constraints and body of a method-like member
    fn parse_method_rest(&mut self) {
        if self.at(TokenKind::LessThan) {
            self.skip_angles();
        }
        loop {
            match self.kind() {
                TokenKind::OpenBrace => {
                    self.skip_balanced();
                    return;
                }
                TokenKind::Arrow => {
                    self.skip_to_semicolon();
                    return;
                }
                TokenKind::Semicolon => {
                    self.bump();
                    return;
                }
                TokenKind::CloseBrace | TokenKind::EndOfFile => return,
                TokenKind::OpenParen | TokenKind::OpenBracket => self.skip_balanced(),
                _ => self.bump(),
            }
        }
    }

    /// Accessor list or expression body, plus an optional initializer
    fn parse_accessor_body(&mut self) {
        if self.at(TokenKind::Arrow) {
            self.skip_to_semicolon();
            return;
        }
        if self.at(TokenKind::OpenBrace) {
            self.skip_balanced();
        }
        if self.at(TokenKind::Equals) {
            self.skip_to_semicolon();
        }
    }

    /// Skip base list, parameter list and constraints up to the body
    fn skip_type_header(&mut self) {
        loop {
            match self.kind() {
                TokenKind::OpenBrace
                | TokenKind::Semicolon
                | TokenKind::CloseBrace
                | TokenKind::EndOfFile => return,
                TokenKind::OpenParen | TokenKind::OpenBracket => self.skip_balanced(),
                _ => self.bump(),
            }
        }
    }

    fn skip_attributes(&mut self) {
        while self.at(TokenKind::OpenBracket) {
            self.skip_balanced();
        }
    }

    /// Skip a type reference: qualified name, type arguments, tuple, array
    /// ranks, nullable and pointer markers
    fn skip_type(&mut self) {
        if self.at(TokenKind::OpenParen) {
            self.skip_balanced();
        } else if self.at(TokenKind::Identifier) {
            self.bump();
            loop {
                if self.at(TokenKind::Dot) && self.nth(1) == TokenKind::Identifier {
                    self.bump();
                    self.bump();
                } else if self.at(TokenKind::LessThan) {
                    self.skip_angles();
                } else {
                    break;
                }
            }
        } else {
            return;
        }
        loop {
            if self.at(TokenKind::OpenBracket) {
                self.skip_balanced();
            } else if self.at_text("?") || self.at_text("*") {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// Skip `Name`, `IFoo.Name` or `IFoo.this`; returns true if it ended in `this`
    fn skip_qualified_name(&mut self) -> bool {
        self.bump();
        while self.at(TokenKind::Dot) {
            match self.nth(1) {
                TokenKind::Identifier => {
                    self.bump();
                    self.bump();
                }
                TokenKind::This => {
                    self.bump();
                    return true;
                }
                _ => break,
            }
        }
        false
    }

    /// The last identifier of a qualified member name starting at `start`
    fn last_name_token(&self, start: usize) -> usize {
        (start..self.pos)
            .rev()
            .find(|i| self.tokens[*i].kind == TokenKind::Identifier)
            .unwrap_or(start)
    }

    /// Skip a bracketed run starting at an opening `(`, `[` or `{`
    fn skip_balanced(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.kind() {
                TokenKind::OpenParen | TokenKind::OpenBracket | TokenKind::OpenBrace => depth += 1,
                TokenKind::CloseParen | TokenKind::CloseBracket | TokenKind::CloseBrace => {
                    depth = depth.saturating_sub(1);
                }
                TokenKind::EndOfFile => return,
                _ => {}
            }
            self.bump();
            if depth == 0 {
                return;
            }
        }
    }

    /// Skip a type argument list starting at `<`
    fn skip_angles(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.kind() {
                TokenKind::LessThan => depth += 1,
                TokenKind::GreaterThan => depth = depth.saturating_sub(1),
                TokenKind::OpenParen | TokenKind::OpenBracket => {
                    self.skip_balanced();
                    continue;
                }
                TokenKind::Semicolon | TokenKind::OpenBrace | TokenKind::EndOfFile => return,
                _ => {}
            }
            self.bump();
            if depth == 0 {
                return;
            }
        }
    }

    /// Skip to one of `stops` outside any brackets, without consuming it
    fn skip_until(&mut self, stops: &[TokenKind]) {
        loop {
            let kind = self.kind();
            if kind == TokenKind::EndOfFile || stops.contains(&kind) {
                return;
            }
            match kind {
                TokenKind::OpenParen | TokenKind::OpenBracket | TokenKind::OpenBrace => {
                    self.skip_balanced()
                }
                TokenKind::CloseParen | TokenKind::CloseBracket | TokenKind::CloseBrace => return,
                TokenKind::LessThan => self.skip_angles(),
                _ => self.bump(),
            }
        }
    }

    /// Skip past the next `;` outside any brackets
    fn skip_to_semicolon(&mut self) {
        self.skip_until(&[TokenKind::Semicolon]);
        self.eat(TokenKind::Semicolon);
    }
}
