//! Tokenizer producing tokens with attached trivia
//!
//! Trivia attachment follows the usual editor convention: a token owns the
//! trivia after it up to and including the first line break as trailing
//! trivia, and everything else before the next token is that token's
//! leading trivia. Preprocessor directive lines are trivia.

use recast_core::{Span, Token, TokenKind, Trivia, TriviaKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    Trivia(TriviaKind),
    Token(TokenKind),
}

/// Split `text` into tokens; the last token is always [`TokenKind::EndOfFile`]
pub fn tokenize(text: &str) -> Vec<Token> {
    let pieces = Scanner::new(text).scan();

    let mut tokens: Vec<Token> = Vec::new();
    let mut leading: Vec<Trivia> = Vec::new();
    let mut in_trailing = false;

    for (piece, span) in pieces {
        match piece {
            Piece::Token(kind) => {
                tokens.push(Token {
                    kind,
                    span,
                    leading: std::mem::take(&mut leading),
                    trailing: Vec::new(),
                });
                in_trailing = true;
            }
            Piece::Trivia(kind) => {
                let trivia = Trivia { kind, span };
                match tokens.last_mut() {
                    Some(token) if in_trailing => {
                        token.trailing.push(trivia);
                        if kind == TriviaKind::EndOfLine {
                            in_trailing = false;
                        }
                    }
                    _ => leading.push(trivia),
                }
            }
        }
    }

    tokens.push(Token {
        kind: TokenKind::EndOfFile,
        span: Span::empty(text.len()),
        leading,
        trailing: Vec::new(),
    });
    tokens
}

struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    /// Only whitespace seen since the last line break
    at_line_start: bool,
    pieces: Vec<(Piece, Span)>,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            at_line_start: true,
            pieces: Vec::new(),
        }
    }

    fn scan(mut self) -> Vec<(Piece, Span)> {
        while let Some(c) = self.peek() {
            let start = self.pos;
            let piece = match c {
                '\r' | '\n' => {
                    self.eat_line_break();
                    self.push(Piece::Trivia(TriviaKind::EndOfLine), start);
                    self.at_line_start = true;
                    continue;
                }
                c if c.is_whitespace() => {
                    self.eat_while(|c| c.is_whitespace() && c != '\r' && c != '\n');
                    self.push(Piece::Trivia(TriviaKind::Whitespace), start);
                    continue;
                }
                '#' if self.at_line_start => {
                    self.eat_to_line_end();
                    Piece::Trivia(TriviaKind::Other)
                }
                '/' if self.rest().starts_with("//") => {
                    self.eat_to_line_end();
                    Piece::Trivia(TriviaKind::Other)
                }
                '/' if self.rest().starts_with("/*") => {
                    self.pos += 2;
                    match self.rest().find("*/") {
                        Some(end) => self.pos += end + 2,
                        None => self.pos = self.text.len(),
                    }
                    Piece::Trivia(TriviaKind::Other)
                }
                '"' => {
                    self.eat_string(0);
                    Piece::Token(TokenKind::StringLiteral)
                }
                '$' | '@' if self.string_prefix_len() > 0 => {
                    let prefix = self.string_prefix_len();
                    self.eat_string(prefix);
                    Piece::Token(TokenKind::StringLiteral)
                }
                '\'' => {
                    self.eat_char_literal();
                    Piece::Token(TokenKind::CharLiteral)
                }
                c if c.is_ascii_digit() => {
                    self.eat_while(|c| c.is_alphanumeric() || c == '_' || c == '.');
                    Piece::Token(TokenKind::NumericLiteral)
                }
                c if is_identifier_start(c) || c == '@' => {
                    self.bump();
                    self.eat_while(is_identifier_part);
                    let word = &self.text[start..self.pos];
                    Piece::Token(TokenKind::from_keyword(word).unwrap_or(TokenKind::Identifier))
                }
                '=' if self.rest().starts_with("=>") => {
                    self.pos += 2;
                    Piece::Token(TokenKind::Arrow)
                }
                _ => {
                    self.bump();
                    Piece::Token(punctuation_kind(c))
                }
            };
            self.push(piece, start);
            self.at_line_start = false;
        }
        self.pieces
    }

    fn push(&mut self, piece: Piece, start: usize) {
        self.pieces.push((piece, Span::new(start, self.pos)));
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn eat_line_break(&mut self) {
        if self.rest().starts_with("\r\n") {
            self.pos += 2;
        } else {
            self.pos += 1;
        }
    }

    fn eat_to_line_end(&mut self) {
        self.eat_while(|c| c != '\r' && c != '\n');
    }

    /// Length of a `$`, `@`, `$@` or `@$` prefix directly followed by a quote
    fn string_prefix_len(&self) -> usize {
        let rest = self.rest().as_bytes();
        let prefix = rest.iter().take_while(|b| **b == b'$' || **b == b'@').count();
        if prefix <= 2 && rest.get(prefix) == Some(&b'"') {
            prefix
        } else {
            0
        }
    }

    /// Consume a string literal whose opening quote follows `prefix` bytes
    fn eat_string(&mut self, prefix: usize) {
        let verbatim = self.text[self.pos..self.pos + prefix].contains('@');
        self.pos += prefix;

        let quotes = self.rest().bytes().take_while(|b| *b == b'"').count();
        if quotes >= 3 {
            // Raw string literal: ends at the same number of quotes
            let fence = &self.rest()[..quotes];
            self.pos += quotes;
            match self.rest().find(fence) {
                Some(end) => self.pos += end + quotes,
                None => self.pos = self.text.len(),
            }
            return;
        }

        self.bump();
        while let Some(c) = self.bump() {
            match c {
                '"' if verbatim && self.peek() == Some('"') => {
                    self.bump();
                }
                '"' => return,
                '\\' if !verbatim => {
                    if matches!(self.peek(), Some(c) if c != '\r' && c != '\n') {
                        self.bump();
                    }
                }
                '\r' | '\n' if !verbatim => {
                    // Unterminated regular string stops at the line break
                    self.pos -= 1;
                    return;
                }
                _ => {}
            }
        }
    }

    fn eat_char_literal(&mut self) {
        self.bump();
        while let Some(c) = self.peek() {
            match c {
                '\'' => {
                    self.bump();
                    return;
                }
                '\r' | '\n' => return,
                '\\' => {
                    self.bump();
                    if matches!(self.peek(), Some(c) if c != '\r' && c != '\n') {
                        self.bump();
                    }
                }
                _ => {
                    self.bump();
                }
            }
        }
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn punctuation_kind(c: char) -> TokenKind {
    match c {
        '{' => TokenKind::OpenBrace,
        '}' => TokenKind::CloseBrace,
        '(' => TokenKind::OpenParen,
        ')' => TokenKind::CloseParen,
        '[' => TokenKind::OpenBracket,
        ']' => TokenKind::CloseBracket,
        '<' => TokenKind::LessThan,
        '>' => TokenKind::GreaterThan,
        ';' => TokenKind::Semicolon,
        ',' => TokenKind::Comma,
        '.' => TokenKind::Dot,
        '=' => TokenKind::Equals,
        '~' => TokenKind::Tilde,
        _ => TokenKind::Punctuation,
    }
}
