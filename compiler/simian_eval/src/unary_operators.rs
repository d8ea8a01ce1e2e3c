//! Prefix operator evaluation.

use simian_ir::PrefixOp;

use crate::errors::unknown_prefix_operator;
use crate::{EvalError, Value};

/// `!` negates truthiness of any value; `-` requires an integer.
pub(crate) fn evaluate_prefix(op: PrefixOp, operand: &Value) -> Result<Value, EvalError> {
    match (op, operand) {
        (PrefixOp::Not, value) => Ok(Value::Boolean(!value.is_truthy())),
        (PrefixOp::Neg, Value::Integer(n)) => Ok(Value::Integer(n.wrapping_neg())),
        (PrefixOp::Neg, other) => Err(unknown_prefix_operator(op, other)),
    }
}
