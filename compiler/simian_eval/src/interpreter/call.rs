//! Function application.

use super::{Flow, Interpreter, Unwind};
use crate::errors::{not_a_function, wrong_argument_count};
use crate::{Environment, Value};

impl Interpreter {
    /// Call a closure or builtin with already evaluated arguments.
    pub(crate) fn apply(&self, callee: &Value, arguments: Vec<Value>) -> Flow {
        match callee {
            Value::Function(function) => {
                let expected = function.parameters.len();
                if arguments.len() != expected {
                    return Err(wrong_argument_count(expected, arguments.len()).into());
                }

                let scope = Environment::enclosed(&function.env);
                for (param, argument) in function.parameters.iter().zip(arguments) {
                    scope.set(param.name.clone(), argument);
                }
                tracing::trace!(arity = expected, "calling closure");

                match self.eval_block(&function.body, &scope) {
                    Err(Unwind::Return(value)) => Ok(value),
                    other => other,
                }
            }
            Value::Builtin(builtin) => {
                tracing::trace!(name = builtin.name, "calling builtin");
                Ok((builtin.func)(&arguments, &self.print)?)
            }
            other => Err(not_a_function(other).into()),
        }
    }
}
