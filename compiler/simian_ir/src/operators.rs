//! Prefix and infix operators.

use std::fmt;

use crate::TokenKind;

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PrefixOp {
    /// `-x`
    Neg,
    /// `!x`
    Not,
}

impl PrefixOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Minus => Some(PrefixOp::Neg),
            TokenKind::Bang => Some(PrefixOp::Not),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            PrefixOp::Neg => "-",
            PrefixOp::Not => "!",
        }
    }
}

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Gt,
    Eq,
    NotEq,
}

impl InfixOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Plus => InfixOp::Add,
            TokenKind::Minus => InfixOp::Sub,
            TokenKind::Star => InfixOp::Mul,
            TokenKind::Slash => InfixOp::Div,
            TokenKind::Lt => InfixOp::Lt,
            TokenKind::Gt => InfixOp::Gt,
            TokenKind::Eq => InfixOp::Eq,
            TokenKind::NotEq => InfixOp::NotEq,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            InfixOp::Add => "+",
            InfixOp::Sub => "-",
            InfixOp::Mul => "*",
            InfixOp::Div => "/",
            InfixOp::Lt => "<",
            InfixOp::Gt => ">",
            InfixOp::Eq => "==",
            InfixOp::NotEq => "!=",
        }
    }

    /// Returns true for `+ - * /`.
    pub fn is_arithmetic(self) -> bool {
        matches!(self, InfixOp::Add | InfixOp::Sub | InfixOp::Mul | InfixOp::Div)
    }

    /// Returns true for `== !=`.
    pub fn is_equality(self) -> bool {
        matches!(self, InfixOp::Eq | InfixOp::NotEq)
    }
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
