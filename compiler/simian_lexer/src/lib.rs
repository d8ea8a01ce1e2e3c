//! Lexer for Simian source text, built on `logos`.
//!
//! [`Lexer`] hands out one [`Token`] per call to [`Lexer::next_token`] and
//! keeps returning `Eof` once the input is exhausted. [`lex`] collects a
//! whole source into a [`TokenList`] terminated by exactly one `Eof`.
//!
//! Lexing never fails: text that matches no rule becomes an `Illegal`
//! token and the parser reports it.

use logos::Logos;
use simian_ir::{Span, Token, TokenKind, TokenList};

/// Raw token produced by logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")]
enum RawToken {
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Word,
    #[regex(r"[0-9]+")]
    Int,
    #[regex(r#""([^"\\]|\\.)*""#)]
    String,
    #[regex(r#""([^"\\]|\\.)*"#)]
    UnterminatedString,

    #[token("==")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("=")]
    Assign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("!")]
    Bang,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,

    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
}

/// Streaming lexer over a source string.
pub struct Lexer<'src> {
    raw: logos::Lexer<'src, RawToken>,
    source: &'src str,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            raw: RawToken::lexer(source),
            source,
            finished: false,
        }
    }

    /// Read the next token. Returns `Eof` forever once the input is consumed.
    pub fn next_token(&mut self) -> Token {
        let Some(result) = self.raw.next() else {
            let end = self.source.len();
            return Token::new(TokenKind::Eof, "", Span::from_range(end..end));
        };
        let span = Span::from_range(self.raw.span());
        let slice = self.raw.slice();

        match result {
            Ok(raw) => convert(raw, slice, span),
            Err(()) => {
                tracing::trace!(%span, text = slice, "illegal token");
                Token::new(TokenKind::Illegal, slice, span)
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields every token up to and including the first `Eof`.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.is(TokenKind::Eof);
        Some(token)
    }
}

/// Lex a complete source.
pub fn lex(source: &str) -> TokenList {
    let tokens: TokenList = Lexer::new(source).collect();
    tracing::debug!(count = tokens.len(), "lexed source");
    tokens
}

fn convert(raw: RawToken, slice: &str, span: Span) -> Token {
    let kind = match raw {
        RawToken::Word => TokenKind::keyword(slice).unwrap_or(TokenKind::Ident),
        RawToken::Int => TokenKind::Int,
        RawToken::String => {
            let contents = &slice[1..slice.len() - 1];
            return Token::new(TokenKind::String, unescape_string(contents), span);
        }
        RawToken::UnterminatedString => TokenKind::Illegal,
        RawToken::Eq => TokenKind::Eq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Assign => TokenKind::Assign,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
    };
    Token::new(kind, slice, span)
}

/// Decode `\n`, `\t`, `\r`, `\\` and `\"`. Unknown escapes are kept verbatim.
fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}
