//! Statement grammar and the precedence table.

mod expr;

use simian_ir::{Block, Identifier, Stmt, StmtKind, TokenKind};

use crate::{ParseError, Parser};

/// Binding strength of infix positions, weakest first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    /// `==` `!=`
    Equals,
    /// `<` `>`
    LessGreater,
    /// `+` `-`
    Sum,
    /// `*` `/`
    Product,
    /// `-x` `!x`
    Prefix,
    /// `f(x)`
    Call,
    /// `xs[i]`
    Index,
}

impl Precedence {
    /// Precedence of `kind` in infix position; `Lowest` if it is not an infix token.
    pub fn of(kind: TokenKind) -> Precedence {
        match kind {
            TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
            TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Star | TokenKind::Slash => Precedence::Product,
            TokenKind::LParen => Precedence::Call,
            TokenKind::LBracket => Precedence::Index,
            _ => Precedence::Lowest,
        }
    }
}

impl Parser<'_> {
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Let => self.parse_let(),
            TokenKind::Return => self.parse_return(),
            _ => self.parse_expression_statement(),
        }
    }

    /// `let <ident> = <expr> ;?`
    fn parse_let(&mut self) -> Result<Stmt, ParseError> {
        let token = self.cursor.advance();
        let name = self.parse_identifier()?;
        self.cursor.expect(TokenKind::Assign)?;
        let value = self.parse_expression(Precedence::Lowest)?;
        self.cursor.eat(TokenKind::Semicolon);
        Ok(Stmt::new(token, StmtKind::Let { name, value }))
    }

    /// `return <expr>? ;?`
    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        let token = self.cursor.advance();
        let value = match self.cursor.current_kind() {
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof => None,
            _ => Some(self.parse_expression(Precedence::Lowest)?),
        };
        self.cursor.eat(TokenKind::Semicolon);
        Ok(Stmt::new(token, StmtKind::Return(value)))
    }

    fn parse_expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let token = self.cursor.current().clone();
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.cursor.eat(TokenKind::Semicolon);
        Ok(Stmt::new(token, StmtKind::Expression(expr)))
    }

    /// `{ <stmt>* }`
    ///
    /// Errors inside the block are recorded and parsing continues with the
    /// next statement. A block left open at end of input is accepted.
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let token = self.cursor.expect(TokenKind::LBrace)?;
        let mut statements = Vec::new();

        while !self.cursor.at(TokenKind::RBrace) && !self.cursor.at_eof() {
            let start = self.cursor.position();
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(error) => self.recover(error, start),
            }
        }
        self.cursor.eat(TokenKind::RBrace);

        Ok(Block::new(token, statements))
    }

    pub(crate) fn parse_identifier(&mut self) -> Result<Identifier, ParseError> {
        self.cursor.expect(TokenKind::Ident).map(Identifier::new)
    }
}
