//! Expression grammar.
//!
//! `parse_expression` runs the prefix rule for the current token and then
//! folds infix rules into the left operand while the next operator binds
//! tighter than the caller's precedence. All binary operators are left
//! associative.

use simian_ir::{Expr, ExprKind, FunctionLiteral, Identifier, InfixOp, PrefixOp, TokenKind};
use simian_stack::ensure_sufficient_stack;

use super::Precedence;
use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_expression(&mut self, precedence: Precedence) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| {
            let mut left = self.parse_prefix()?;
            while !self.cursor.at(TokenKind::Semicolon)
                && precedence < Precedence::of(self.cursor.current_kind())
            {
                left = self.parse_infix(left)?;
            }
            Ok(left)
        })
    }

    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.current().clone();
        match token.kind {
            TokenKind::Ident => {
                self.cursor.advance();
                let name = token.literal.clone();
                Ok(Expr::new(token, ExprKind::Ident(name)))
            }
            TokenKind::Int => {
                self.cursor.advance();
                let value = token
                    .literal
                    .parse::<i64>()
                    .map_err(|_| ParseError::MalformedInteger {
                        literal: token.literal.clone(),
                        span: token.span,
                    })?;
                Ok(Expr::new(token, ExprKind::Int(value)))
            }
            TokenKind::String => {
                self.cursor.advance();
                let text = token.literal.clone();
                Ok(Expr::new(token, ExprKind::Str(text)))
            }
            TokenKind::True | TokenKind::False => {
                self.cursor.advance();
                let value = token.is(TokenKind::True);
                Ok(Expr::new(token, ExprKind::Bool(value)))
            }
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_operator(),
            TokenKind::LParen => self.parse_grouped(),
            TokenKind::If => self.parse_if(),
            TokenKind::Fn => {
                let token = self.cursor.advance();
                let literal = self.parse_function_parts()?;
                Ok(Expr::new(token, ExprKind::Function(literal)))
            }
            TokenKind::Macro => {
                let token = self.cursor.advance();
                let literal = self.parse_function_parts()?;
                Ok(Expr::new(token, ExprKind::Macro(literal)))
            }
            TokenKind::LBracket => {
                let token = self.cursor.current().clone();
                let elements = self.parse_expression_list(TokenKind::RBracket)?;
                Ok(Expr::new(token, ExprKind::Array(elements)))
            }
            TokenKind::LBrace => self.parse_hash(),
            TokenKind::Illegal => {
                self.cursor.advance();
                Err(ParseError::IllegalToken {
                    text: token.literal,
                    span: token.span,
                })
            }
            kind => Err(ParseError::NoPrefixRule {
                kind,
                span: token.span,
            }),
        }
    }

    fn parse_infix(&mut self, left: Expr) -> Result<Expr, ParseError> {
        let kind = self.cursor.current_kind();
        match kind {
            TokenKind::LParen => {
                let token = self.cursor.current().clone();
                let arguments = self.parse_expression_list(TokenKind::RParen)?;
                Ok(Expr::new(
                    token,
                    ExprKind::Call {
                        function: Box::new(left),
                        arguments,
                    },
                ))
            }
            TokenKind::LBracket => {
                let token = self.cursor.advance();
                let index = self.parse_expression(Precedence::Lowest)?;
                self.cursor.expect(TokenKind::RBracket)?;
                Ok(Expr::new(
                    token,
                    ExprKind::Index {
                        left: Box::new(left),
                        index: Box::new(index),
                    },
                ))
            }
            _ => match InfixOp::from_token(kind) {
                Some(op) => {
                    let precedence = Precedence::of(kind);
                    let token = self.cursor.advance();
                    let right = self.parse_expression(precedence)?;
                    Ok(Expr::new(
                        token,
                        ExprKind::Infix {
                            left: Box::new(left),
                            op,
                            right: Box::new(right),
                        },
                    ))
                }
                // Precedence::of only ranks infix tokens above Lowest.
                None => Ok(left),
            },
        }
    }

    fn parse_prefix_operator(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.advance();
        let Some(op) = PrefixOp::from_token(token.kind) else {
            return Err(ParseError::NoPrefixRule {
                kind: token.kind,
                span: token.span,
            });
        };
        let right = self.parse_expression(Precedence::Prefix)?;
        Ok(Expr::new(
            token,
            ExprKind::Prefix {
                op,
                right: Box::new(right),
            },
        ))
    }

    /// `( <expr> )`; the parentheses leave no node behind.
    fn parse_grouped(&mut self) -> Result<Expr, ParseError> {
        self.cursor.advance();
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.cursor.expect(TokenKind::RParen)?;
        Ok(expr)
    }

    /// `if ( <cond> ) { ... } else { ... }`
    fn parse_if(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.advance();
        self.cursor.expect(TokenKind::LParen)?;
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.cursor.expect(TokenKind::RParen)?;
        let consequence = self.parse_block()?;
        let alternative = if self.cursor.eat(TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(Expr::new(
            token,
            ExprKind::If {
                condition: Box::new(condition),
                consequence,
                alternative,
            },
        ))
    }

    /// `( <params> ) { ... }` after `fn` or `macro`.
    fn parse_function_parts(&mut self) -> Result<FunctionLiteral, ParseError> {
        let parameters = self.parse_parameters()?;
        let body = self.parse_block()?;
        Ok(FunctionLiteral::new(parameters, body))
    }

    fn parse_parameters(&mut self) -> Result<Vec<Identifier>, ParseError> {
        self.cursor.expect(TokenKind::LParen)?;
        let mut parameters = Vec::new();
        if self.cursor.eat(TokenKind::RParen) {
            return Ok(parameters);
        }

        parameters.push(self.parse_identifier()?);
        while self.cursor.eat(TokenKind::Comma) {
            parameters.push(self.parse_identifier()?);
        }
        self.cursor.expect(TokenKind::RParen)?;
        Ok(parameters)
    }

    /// Comma separated expressions between the current opening token and `end`.
    fn parse_expression_list(&mut self, end: TokenKind) -> Result<Vec<Expr>, ParseError> {
        self.cursor.advance();
        let mut list = Vec::new();
        if self.cursor.eat(end) {
            return Ok(list);
        }

        list.push(self.parse_expression(Precedence::Lowest)?);
        while self.cursor.eat(TokenKind::Comma) {
            list.push(self.parse_expression(Precedence::Lowest)?);
        }
        self.cursor.expect(end)?;
        Ok(list)
    }

    /// `{ <key> : <value> , ... }`; a trailing comma is allowed.
    fn parse_hash(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.advance();
        let mut pairs = Vec::new();

        while !self.cursor.at(TokenKind::RBrace) {
            let key = self.parse_expression(Precedence::Lowest)?;
            self.cursor.expect(TokenKind::Colon)?;
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));

            if !self.cursor.at(TokenKind::RBrace) {
                self.cursor.expect(TokenKind::Comma)?;
            }
        }
        self.cursor.expect(TokenKind::RBrace)?;

        Ok(Expr::new(token, ExprKind::Hash(pairs)))
    }
}
