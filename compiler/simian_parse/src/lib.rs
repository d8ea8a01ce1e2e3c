//! Simian Parser - Pratt parser producing the syntax tree.
//!
//! The parser reads a [`TokenList`] once, front to back, and builds a
//! [`Program`]. It never stops at the first error: each failed statement
//! records a [`ParseError`] and parsing resumes, so one pass reports as many
//! problems as possible. The program returned next to errors is partial and
//! should not be evaluated.
//!
//! Expressions use precedence climbing; see [`Precedence`] for the binding
//! strengths.

mod cursor;
mod error;
mod grammar;

use simian_ir::{Program, TokenKind, TokenList};

use crate::cursor::Cursor;
pub use crate::error::ParseError;
pub use crate::grammar::Precedence;

/// Result of parsing a token list.
#[derive(Clone, Debug, Default)]
pub struct ParseOutput {
    /// Every statement that parsed successfully, in source order.
    pub program: Program,
    /// Errors in the order they were found.
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parser state: a cursor plus the errors collected so far.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            errors: Vec::new(),
        }
    }

    /// Parse statements until end of input.
    pub fn parse_program(mut self) -> ParseOutput {
        let mut statements = Vec::new();

        while !self.cursor.at_eof() {
            let start = self.cursor.position();
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(error) => self.recover(error, start),
            }
        }

        ParseOutput {
            program: Program::new(statements),
            errors: self.errors,
        }
    }

    /// Record `error` and pick the token the next statement starts at.
    ///
    /// Parsing resumes at the offending token so it can surface its own
    /// error, but a statement never starts twice at the same position. A
    /// `;` left behind by the failed statement is skipped.
    fn recover(&mut self, error: ParseError, start: usize) {
        tracing::debug!(%error, "statement failed to parse");
        self.errors.push(error);
        if self.cursor.position() == start {
            self.cursor.advance();
        }
        self.cursor.eat(TokenKind::Semicolon);
    }
}

/// Parse a token list.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &TokenList) -> ParseOutput {
    Parser::new(tokens).parse_program()
}

/// Lex and parse a source string.
pub fn parse_source(source: &str) -> ParseOutput {
    parse(&simian_lexer::lex(source))
}
