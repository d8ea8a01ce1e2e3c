//! Macro definition and expansion.
//!
//! Macros run once over a whole program before it is evaluated:
//!
//! 1. [`define_macros`] binds every top-level `let name = macro(...) {...}`
//!    as a [`Value::Macro`] and removes those statements from the program.
//! 2. [`Interpreter::expand_macros`] rewrites the program bottom-up. Each
//!    call whose callee names a macro is replaced by the expression the
//!    macro body returns. Arguments are handed to the body unevaluated,
//!    wrapped as quotes.
//!
//! A macro body that fails or does not produce a quote aborts expansion
//! with a [`MacroError`]; the program must not be evaluated afterwards.

use std::rc::Rc;

use simian_ir::visitor::modify_program;
use simian_ir::{Expr, ExprKind, Program};

use crate::interpreter::Unwind;
use crate::value::FunctionValue;
use crate::{Environment, EvalError, Interpreter, Value};

/// Failure of a macro call during expansion.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MacroError {
    /// The body evaluated to something other than a quote.
    #[error("macro `{name}` must return a quoted expression, got {found}")]
    NotQuote { name: String, found: &'static str },

    /// The body raised a runtime error, including a failed `unquote`.
    #[error("macro `{name}` failed: {error}")]
    Evaluation {
        name: String,
        #[source]
        error: EvalError,
    },

    #[error("macro `{name}` expects {expected} arguments, got {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
}

/// Bind and remove every top-level macro definition.
///
/// Each macro captures `env` as it is when the definition is reached, so a
/// macro can see earlier macros but not later ones.
#[tracing::instrument(level = "debug", skip_all)]
pub fn define_macros(program: &mut Program, env: &Environment) {
    let mut definitions = Vec::new();

    for (index, stmt) in program.statements.iter().enumerate() {
        let Some((name, literal)) = stmt.as_macro_definition() else {
            continue;
        };
        tracing::debug!(name = %name, params = literal.parameters.len(), "defining macro");
        env.set(
            name.name.clone(),
            Value::Macro(Rc::new(FunctionValue {
                parameters: Rc::clone(&literal.parameters),
                body: Rc::clone(&literal.body),
                env: env.clone(),
            })),
        );
        definitions.push(index);
    }

    for index in definitions.into_iter().rev() {
        program.statements.remove(index);
    }
}

/// Expand macro calls in `program` using a default interpreter.
pub fn expand_macros(program: &mut Program, env: &Environment) -> Result<(), MacroError> {
    Interpreter::new().expand_macros(program, env)
}

impl Interpreter {
    /// Replace every macro call in `program` with the code the macro returns.
    ///
    /// Nested calls expand innermost first. Calls whose callee is not bound
    /// to a macro in `env` are left alone.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn expand_macros(&self, program: &mut Program, env: &Environment) -> Result<(), MacroError> {
        modify_program(program, &mut |expr: Expr| self.expand_call(expr, env))
    }

    fn expand_call(&self, expr: Expr, env: &Environment) -> Result<Expr, MacroError> {
        let Some((name, mac)) = macro_call(&expr, env) else {
            return Ok(expr);
        };
        let ExprKind::Call { arguments, .. } = &expr.kind else {
            return Ok(expr);
        };
        if arguments.len() != mac.parameters.len() {
            return Err(MacroError::ArityMismatch {
                name,
                expected: mac.parameters.len(),
                found: arguments.len(),
            });
        }

        let scope = Environment::enclosed(&mac.env);
        for (param, argument) in mac.parameters.iter().zip(arguments) {
            scope.set(param.name.clone(), Value::Quote(Rc::new(argument.clone())));
        }
        tracing::debug!(name = %name, "expanding macro call");

        let result = match self.eval_block(&mac.body, &scope) {
            Ok(value) | Err(Unwind::Return(value)) => value,
            Err(Unwind::Error(error)) => return Err(MacroError::Evaluation { name, error }),
        };
        match result {
            Value::Quote(node) => Ok(Rc::unwrap_or_clone(node)),
            other => Err(MacroError::NotQuote {
                name,
                found: other.type_name(),
            }),
        }
    }
}

/// Name and macro value if `expr` calls an identifier bound to a macro.
fn macro_call(expr: &Expr, env: &Environment) -> Option<(String, Rc<FunctionValue>)> {
    let ExprKind::Call { function, .. } = &expr.kind else {
        return None;
    };
    let name = function.as_ident()?;
    match env.get(name)? {
        Value::Macro(mac) => Some((name.to_string(), mac)),
        _ => None,
    }
}
