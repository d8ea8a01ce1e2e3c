//! Simian IR - shared syntax types.
//!
//! This crate holds everything the lexer, parser, macro expander and
//! evaluator agree on:
//! - [`Span`] for source locations
//! - [`Token`], [`TokenKind`] and [`TokenList`] for lexer output
//! - the syntax tree in [`ast`] together with its canonical rendering
//! - [`PrefixOp`] and [`InfixOp`]
//! - the post-order rewrite traversal in [`visitor`]
//!
//! The canonical rendering produced by the `Display` impls of the tree is
//! part of the language's observable behaviour: macro expansion tests and
//! the REPL compare against it.

pub mod ast;
mod operators;
mod span;
mod token;
pub mod visitor;

pub use ast::{Block, Expr, ExprKind, FunctionLiteral, Identifier, Program, Stmt, StmtKind};
pub use operators::{InfixOp, PrefixOp};
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
