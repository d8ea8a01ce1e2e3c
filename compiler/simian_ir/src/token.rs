//! Token types produced by the lexer.

use std::fmt;
use std::ops::Index;

use crate::Span;

/// Terminal categories of the language.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    Illegal,
    Eof,

    // Identifiers and literals
    Ident,
    Int,
    String,

    // Operators
    Assign,
    Plus,
    Minus,
    Bang,
    Star,
    Slash,
    Lt,
    Gt,
    Eq,
    NotEq,

    // Delimiters
    Comma,
    Semicolon,
    Colon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Keywords
    Let,
    Return,
    Fn,
    Macro,
    True,
    False,
    If,
    Else,
}

impl TokenKind {
    /// Name used in parse error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
            TokenKind::Ident => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::String => "STRING",
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Bang => "!",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Eq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Let => "LET",
            TokenKind::Return => "RETURN",
            TokenKind::Fn => "FUNCTION",
            TokenKind::Macro => "MACRO",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
        }
    }

    /// Keyword for an identifier-shaped word, if it is reserved.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "let" => TokenKind::Let,
            "return" => TokenKind::Return,
            "fn" => TokenKind::Fn,
            "macro" => TokenKind::Macro,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A token: its kind, the text it was read from and where.
///
/// For string tokens `literal` holds the decoded contents without quotes.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, literal: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            literal: literal.into(),
            span,
        }
    }

    /// Token for a node that has no source text of its own.
    pub fn synthetic(kind: TokenKind, literal: impl Into<String>) -> Self {
        Token::new(kind, literal, Span::DUMMY)
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) @ {}", self.kind, self.literal, self.span)
    }
}

/// Complete lexer output, always terminated by a single `Eof` token.
///
/// The parser walks it by index, so the same list can be parsed any number
/// of times.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl FromIterator<Token> for TokenList {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        TokenList {
            tokens: iter.into_iter().collect(),
        }
    }
}
