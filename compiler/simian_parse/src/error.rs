//! Parse error types.

use simian_ir::{Span, TokenKind};

/// A syntax error found while parsing.
///
/// Errors never stop the parser; they are collected in
/// [`ParseOutput::errors`](crate::ParseOutput) alongside the partial program.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A specific token was required but another was found.
    #[error("expected next token to be {expected}, got {found} instead")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        span: Span,
    },

    /// The token cannot start an expression.
    #[error("no prefix parse function for {kind} found")]
    NoPrefixRule { kind: TokenKind, span: Span },

    /// An integer literal that does not fit in an `i64`.
    #[error("could not parse {literal} as integer")]
    MalformedInteger { literal: String, span: Span },

    /// Input the lexer could not classify, including unterminated strings.
    #[error("illegal token {text:?}")]
    IllegalToken { text: String, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::NoPrefixRule { span, .. }
            | ParseError::MalformedInteger { span, .. }
            | ParseError::IllegalToken { span, .. } => *span,
        }
    }
}
