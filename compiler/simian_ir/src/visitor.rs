//! Post-order rewriting of expressions.
//!
//! [`modify_program`] visits every expression reachable from a program,
//! rewrites its children first and then hands the node itself to the
//! rewriter, replacing it with whatever the rewriter returns. Macro
//! expansion and `quote`/`unquote` resolution are both built on this.
//!
//! The rewriter may fail; the first error stops the traversal. Nodes that
//! were already handed to the rewriter keep their rewritten form and the
//! node that failed is left as an inert placeholder, so a tree is only
//! meaningful after a successful traversal.

use std::rc::Rc;

use simian_stack::ensure_sufficient_stack;

use crate::ast::{Block, Expr, ExprKind, Program, Stmt, StmtKind};
use crate::{Token, TokenKind};

/// Rewrite every expression in `program` in place.
pub fn modify_program<E, F>(program: &mut Program, rewrite: &mut F) -> Result<(), E>
where
    F: FnMut(Expr) -> Result<Expr, E>,
{
    program
        .statements
        .iter_mut()
        .try_for_each(|stmt| modify_stmt(stmt, rewrite))
}

pub fn modify_block<E, F>(block: &mut Block, rewrite: &mut F) -> Result<(), E>
where
    F: FnMut(Expr) -> Result<Expr, E>,
{
    block
        .statements
        .iter_mut()
        .try_for_each(|stmt| modify_stmt(stmt, rewrite))
}

pub fn modify_stmt<E, F>(stmt: &mut Stmt, rewrite: &mut F) -> Result<(), E>
where
    F: FnMut(Expr) -> Result<Expr, E>,
{
    match &mut stmt.kind {
        StmtKind::Let { value, .. } | StmtKind::Return(Some(value)) | StmtKind::Expression(value) => {
            modify_expr(value, rewrite)
        }
        StmtKind::Return(None) => Ok(()),
        StmtKind::Block(block) => modify_block(block, rewrite),
    }
}

/// Rewrite `expr` and everything below it, children first.
pub fn modify_expr<E, F>(expr: &mut Expr, rewrite: &mut F) -> Result<(), E>
where
    F: FnMut(Expr) -> Result<Expr, E>,
{
    ensure_sufficient_stack(|| {
        match &mut expr.kind {
            ExprKind::Ident(_) | ExprKind::Int(_) | ExprKind::Str(_) | ExprKind::Bool(_) => {}
            ExprKind::Prefix { right, .. } => modify_expr(right, rewrite)?,
            ExprKind::Infix { left, right, .. } => {
                modify_expr(left, rewrite)?;
                modify_expr(right, rewrite)?;
            }
            ExprKind::If {
                condition,
                consequence,
                alternative,
            } => {
                modify_expr(condition, rewrite)?;
                modify_block(consequence, rewrite)?;
                if let Some(alternative) = alternative {
                    modify_block(alternative, rewrite)?;
                }
            }
            ExprKind::Function(literal) | ExprKind::Macro(literal) => {
                modify_block(Rc::make_mut(&mut literal.body), rewrite)?;
            }
            ExprKind::Call {
                function,
                arguments,
            } => {
                modify_expr(function, rewrite)?;
                for argument in arguments {
                    modify_expr(argument, rewrite)?;
                }
            }
            ExprKind::Array(elements) => {
                for element in elements {
                    modify_expr(element, rewrite)?;
                }
            }
            ExprKind::Index { left, index } => {
                modify_expr(left, rewrite)?;
                modify_expr(index, rewrite)?;
            }
            ExprKind::Hash(pairs) => {
                for (key, value) in pairs {
                    modify_expr(key, rewrite)?;
                    modify_expr(value, rewrite)?;
                }
            }
        }

        let node = std::mem::replace(expr, placeholder());
        *expr = rewrite(node)?;
        Ok(())
    })
}

/// Owned variant of [`modify_expr`].
pub fn rewrite_expr<E, F>(mut expr: Expr, rewrite: &mut F) -> Result<Expr, E>
where
    F: FnMut(Expr) -> Result<Expr, E>,
{
    modify_expr(&mut expr, rewrite)?;
    Ok(expr)
}

fn placeholder() -> Expr {
    Expr::new(Token::synthetic(TokenKind::Illegal, ""), ExprKind::Bool(false))
}
