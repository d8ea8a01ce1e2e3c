//! Expression evaluation.

use std::rc::Rc;

use simian_ir::{Expr, ExprKind};
use simian_stack::ensure_sufficient_stack;

use super::{Flow, Interpreter};
use crate::errors::{index_not_supported, unusable_as_hash_key};
use crate::operators::evaluate_infix;
use crate::unary_operators::evaluate_prefix;
use crate::value::{FunctionValue, HashPair, HashValue};
use crate::{Environment, EvalError, Value};

impl Interpreter {
    pub(crate) fn eval_expr(&self, expr: &Expr, env: &Environment) -> Flow {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr, env))
    }

    fn eval_expr_inner(&self, expr: &Expr, env: &Environment) -> Flow {
        match &expr.kind {
            ExprKind::Int(n) => Ok(Value::Integer(*n)),
            ExprKind::Bool(b) => Ok(Value::Boolean(*b)),
            ExprKind::Str(s) => Ok(Value::string(s.as_str())),
            ExprKind::Ident(name) => self.resolve(name, env),
            ExprKind::Prefix { op, right } => {
                let operand = self.eval_expr(right, env)?;
                Ok(evaluate_prefix(*op, &operand)?)
            }
            ExprKind::Infix { left, op, right } => {
                let left = self.eval_expr(left, env)?;
                let right = self.eval_expr(right, env)?;
                Ok(evaluate_infix(*op, &left, &right)?)
            }
            ExprKind::If {
                condition,
                consequence,
                alternative,
            } => {
                if self.eval_expr(condition, env)?.is_truthy() {
                    self.eval_block(consequence, env)
                } else if let Some(alternative) = alternative {
                    self.eval_block(alternative, env)
                } else {
                    Ok(Value::Null)
                }
            }
            ExprKind::Function(literal) => Ok(Value::Function(Rc::new(FunctionValue {
                parameters: Rc::clone(&literal.parameters),
                body: Rc::clone(&literal.body),
                env: env.clone(),
            }))),
            ExprKind::Macro(_) => Err(EvalError::MisplacedMacro.into()),
            ExprKind::Call {
                function,
                arguments,
            } => {
                if function.as_ident() == Some("quote") {
                    return self.eval_quote(arguments, env);
                }
                let callee = self.eval_expr(function, env)?;
                let arguments = self.eval_arguments(arguments, env)?;
                self.apply(&callee, arguments)
            }
            ExprKind::Array(elements) => {
                let elements = self.eval_arguments(elements, env)?;
                Ok(Value::array(elements))
            }
            ExprKind::Index { left, index } => {
                let collection = self.eval_expr(left, env)?;
                let index = self.eval_expr(index, env)?;
                Ok(eval_index(&collection, &index)?)
            }
            ExprKind::Hash(pairs) => self.eval_hash(pairs, env),
        }
    }

    /// Environment chain first, then builtins.
    fn resolve(&self, name: &str, env: &Environment) -> Flow {
        if let Some(value) = env.get(name) {
            return Ok(value);
        }
        if let Some(builtin) = self.builtins.get(name) {
            return Ok(Value::Builtin(builtin));
        }
        Err(EvalError::UnknownIdentifier(name.to_string()).into())
    }

    /// Left to right, stopping at the first error.
    pub(crate) fn eval_arguments(&self, exprs: &[Expr], env: &Environment) -> Flow<Vec<Value>> {
        exprs.iter().map(|expr| self.eval_expr(expr, env)).collect()
    }

    fn eval_hash(&self, pairs: &[(Expr, Expr)], env: &Environment) -> Flow {
        let mut hash = HashValue::new();
        for (key_expr, value_expr) in pairs {
            let key = self.eval_expr(key_expr, env)?;
            let Some(hash_key) = key.hash_key() else {
                return Err(unusable_as_hash_key(&key).into());
            };
            let value = self.eval_expr(value_expr, env)?;
            hash.insert(hash_key, HashPair { key, value });
        }
        Ok(Value::Hash(Rc::new(hash)))
    }
}

/// Arrays take integer indices, with `null` outside the bounds. Hashes take
/// any hashable key, with `null` for a missing key.
fn eval_index(collection: &Value, index: &Value) -> Result<Value, EvalError> {
    match (collection, index) {
        (Value::Array(elements), Value::Integer(i)) => Ok(usize::try_from(*i)
            .ok()
            .and_then(|i| elements.get(i))
            .cloned()
            .unwrap_or(Value::Null)),
        (Value::Hash(hash), key) => {
            let hash_key = key.hash_key().ok_or_else(|| unusable_as_hash_key(key))?;
            Ok(hash
                .get(&hash_key)
                .map_or(Value::Null, |pair| pair.value.clone()))
        }
        (other, _) => Err(index_not_supported(other)),
    }
}
