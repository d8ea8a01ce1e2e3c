//! Token cursor.

use simian_ir::{Span, Token, TokenKind, TokenList};

use crate::ParseError;

/// Position in a [`TokenList`].
///
/// Reading past the end yields an `Eof` token, so a list without its
/// terminator still parses.
pub(crate) struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
    eof: Token,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(tokens: &'a TokenList) -> Self {
        let end = tokens
            .as_slice()
            .last()
            .map_or(Span::DUMMY, |last| Span::new(last.span.end, last.span.end));
        Cursor {
            tokens,
            pos: 0,
            eof: Token::new(TokenKind::Eof, "", end),
        }
    }

    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    #[inline]
    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub(crate) fn at_eof(&self) -> bool {
        self.at(TokenKind::Eof)
    }

    /// Move past the current token and return it.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tracing::trace!(kind = ?token.kind, pos = self.pos, "advance");
        token
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or report what was found instead.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.at(kind) {
            return Ok(self.advance());
        }
        let found = self.current();
        Err(ParseError::UnexpectedToken {
            expected: kind,
            found: found.kind,
            span: found.span,
        })
    }
}
