//! `quote` and `unquote`.
//!
//! `quote(expr)` yields the expression itself as a [`Value::Quote`] instead
//! of its value. Before wrapping, every `unquote(inner)` call inside the
//! quoted expression is evaluated and replaced by the syntax for the
//! resulting value, so macro bodies can splice computed pieces into the code
//! they return.

use std::rc::Rc;

use simian_ir::visitor::rewrite_expr;
use simian_ir::{Expr, ExprKind, Token, TokenKind};

use crate::errors::cannot_unquote;
use crate::interpreter::{Flow, Interpreter, Unwind};
use crate::{Environment, EvalError, Value};

impl Interpreter {
    pub(crate) fn eval_quote(&self, arguments: &[Expr], env: &Environment) -> Flow {
        let [quoted] = arguments else {
            return Err(EvalError::QuoteArity(arguments.len()).into());
        };
        let node = rewrite_expr(quoted.clone(), &mut |expr: Expr| {
            self.resolve_unquote(expr, env)
        })?;
        Ok(Value::Quote(Rc::new(node)))
    }

    fn resolve_unquote(&self, expr: Expr, env: &Environment) -> Result<Expr, Unwind> {
        match unquote_argument(&expr) {
            Some(inner) => {
                let value = self.eval_expr(inner, env)?;
                Ok(value_to_expr(&value, &expr.token)?)
            }
            None => Ok(expr),
        }
    }
}

/// The argument of an `unquote(...)` call with exactly one argument.
fn unquote_argument(expr: &Expr) -> Option<&Expr> {
    match &expr.kind {
        ExprKind::Call {
            function,
            arguments,
        } if function.as_ident() == Some("unquote") => match arguments.as_slice() {
            [inner] => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

/// Syntax that evaluates back to `value`.
///
/// Integers, booleans and strings become literals, arrays and hashes become
/// literals of their converted contents and a quote contributes the
/// expression it wraps. Everything else has no literal form.
pub fn value_to_expr(value: &Value, origin: &Token) -> Result<Expr, EvalError> {
    let synthetic = |kind: TokenKind, literal: String| Token::new(kind, literal, origin.span);

    let expr = match value {
        Value::Integer(n) => Expr::new(synthetic(TokenKind::Int, n.to_string()), ExprKind::Int(*n)),
        Value::Boolean(b) => {
            let kind = if *b { TokenKind::True } else { TokenKind::False };
            Expr::new(synthetic(kind, b.to_string()), ExprKind::Bool(*b))
        }
        Value::String(s) => Expr::new(
            synthetic(TokenKind::String, s.to_string()),
            ExprKind::Str(s.to_string()),
        ),
        Value::Array(elements) => {
            let elements = elements
                .iter()
                .map(|element| value_to_expr(element, origin))
                .collect::<Result<Vec<_>, _>>()?;
            Expr::new(
                synthetic(TokenKind::LBracket, "[".to_string()),
                ExprKind::Array(elements),
            )
        }
        Value::Hash(hash) => {
            let pairs = hash
                .pairs()
                .map(|pair| Ok((value_to_expr(&pair.key, origin)?, value_to_expr(&pair.value, origin)?)))
                .collect::<Result<Vec<_>, EvalError>>()?;
            Expr::new(synthetic(TokenKind::LBrace, "{".to_string()), ExprKind::Hash(pairs))
        }
        Value::Quote(node) => Expr::clone(node),
        Value::Null
        | Value::ReturnValue(_)
        | Value::Error(_)
        | Value::Function(_)
        | Value::Builtin(_)
        | Value::Macro(_) => return Err(cannot_unquote(value)),
    };
    Ok(expr)
}
