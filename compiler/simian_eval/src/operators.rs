//! Infix operator evaluation.
//!
//! Both operands must have the same kind. Integers support arithmetic,
//! comparison and equality; strings support `+` and equality; every other
//! kind supports only equality. Arithmetic wraps on overflow.

use std::rc::Rc;

use simian_ir::InfixOp;

use crate::errors::{type_mismatch, unknown_infix_operator};
use crate::{EvalError, Value};

pub(crate) fn evaluate_infix(op: InfixOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => integer_infix(op, *l, *r),
        (Value::String(l), Value::String(r)) => string_infix(op, l, r, left, right),
        _ if std::mem::discriminant(left) != std::mem::discriminant(right) => {
            Err(type_mismatch(left, op, right))
        }
        _ if op.is_equality() => {
            let equal = same_value(left, right);
            Ok(Value::Boolean(if op == InfixOp::Eq { equal } else { !equal }))
        }
        _ => Err(unknown_infix_operator(left, op, right)),
    }
}

fn integer_infix(op: InfixOp, l: i64, r: i64) -> Result<Value, EvalError> {
    let value = match op {
        InfixOp::Add => Value::Integer(l.wrapping_add(r)),
        InfixOp::Sub => Value::Integer(l.wrapping_sub(r)),
        InfixOp::Mul => Value::Integer(l.wrapping_mul(r)),
        InfixOp::Div => {
            if r == 0 {
                return Err(EvalError::DivisionByZero);
            }
            Value::Integer(l.wrapping_div(r))
        }
        InfixOp::Lt => Value::Boolean(l < r),
        InfixOp::Gt => Value::Boolean(l > r),
        InfixOp::Eq => Value::Boolean(l == r),
        InfixOp::NotEq => Value::Boolean(l != r),
    };
    Ok(value)
}

fn string_infix(
    op: InfixOp,
    l: &str,
    r: &str,
    left: &Value,
    right: &Value,
) -> Result<Value, EvalError> {
    match op {
        InfixOp::Add => {
            let mut joined = String::with_capacity(l.len().saturating_add(r.len()));
            joined.push_str(l);
            joined.push_str(r);
            Ok(Value::string(joined))
        }
        InfixOp::Eq => Ok(Value::Boolean(l == r)),
        InfixOp::NotEq => Ok(Value::Boolean(l != r)),
        _ => Err(unknown_infix_operator(left, op, right)),
    }
}

/// Equality for operands of the same non-integer, non-string kind.
///
/// Booleans and null compare by value; compound values compare by identity.
fn same_value(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Boolean(l), Value::Boolean(r)) => l == r,
        (Value::Null, Value::Null) => true,
        (Value::Array(l), Value::Array(r)) => Rc::ptr_eq(l, r),
        (Value::Hash(l), Value::Hash(r)) => Rc::ptr_eq(l, r),
        (Value::Function(l), Value::Function(r)) | (Value::Macro(l), Value::Macro(r)) => {
            Rc::ptr_eq(l, r)
        }
        (Value::Quote(l), Value::Quote(r)) => Rc::ptr_eq(l, r),
        (Value::Builtin(l), Value::Builtin(r)) => l.name == r.name,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(op: InfixOp, left: &Value, right: &Value) -> Result<Value, String> {
        evaluate_infix(op, left, right).map_err(|e| e.to_string())
    }

    #[test]
    fn integer_arithmetic() {
        let (a, b) = (Value::Integer(7), Value::Integer(2));
        assert_eq!(eval(InfixOp::Add, &a, &b), Ok(Value::Integer(9)));
        assert_eq!(eval(InfixOp::Sub, &a, &b), Ok(Value::Integer(5)));
        assert_eq!(eval(InfixOp::Mul, &a, &b), Ok(Value::Integer(14)));
        assert_eq!(eval(InfixOp::Div, &a, &b), Ok(Value::Integer(3)));
        assert_eq!(eval(InfixOp::Lt, &a, &b), Ok(Value::FALSE));
        assert_eq!(eval(InfixOp::Gt, &a, &b), Ok(Value::TRUE));
    }

    #[test]
    fn overflow_wraps() {
        assert_eq!(
            eval(InfixOp::Add, &Value::Integer(i64::MAX), &Value::Integer(1)),
            Ok(Value::Integer(i64::MIN))
        );
        assert_eq!(
            eval(InfixOp::Div, &Value::Integer(i64::MIN), &Value::Integer(-1)),
            Ok(Value::Integer(i64::MIN))
        );
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(
            eval(InfixOp::Div, &Value::Integer(1), &Value::Integer(0)),
            Err("division by zero".to_string())
        );
    }

    #[test]
    fn strings() {
        let (a, b) = (Value::string("Hello"), Value::string(" World!"));
        assert_eq!(eval(InfixOp::Add, &a, &b), Ok(Value::string("Hello World!")));
        assert_eq!(eval(InfixOp::Eq, &a, &Value::string("Hello")), Ok(Value::TRUE));
        assert_eq!(eval(InfixOp::NotEq, &a, &b), Ok(Value::TRUE));
        assert_eq!(
            eval(InfixOp::Sub, &a, &b),
            Err("unknown operator: STRING - STRING".to_string())
        );
    }

    #[test]
    fn mismatched_kinds() {
        assert_eq!(
            eval(InfixOp::Add, &Value::Integer(5), &Value::TRUE),
            Err("type mismatch: INTEGER + BOOLEAN".to_string())
        );
        assert_eq!(
            eval(InfixOp::Eq, &Value::Integer(1), &Value::TRUE),
            Err("type mismatch: INTEGER == BOOLEAN".to_string())
        );
    }

    #[test]
    fn booleans_support_only_equality() {
        assert_eq!(eval(InfixOp::Eq, &Value::TRUE, &Value::TRUE), Ok(Value::TRUE));
        assert_eq!(eval(InfixOp::NotEq, &Value::TRUE, &Value::FALSE), Ok(Value::TRUE));
        assert_eq!(eval(InfixOp::Eq, &Value::Null, &Value::Null), Ok(Value::TRUE));
        assert_eq!(
            eval(InfixOp::Add, &Value::TRUE, &Value::FALSE),
            Err("unknown operator: BOOLEAN + BOOLEAN".to_string())
        );
    }

    #[test]
    fn compound_values_compare_by_identity() {
        let array = Value::array(vec![Value::Integer(1)]);
        let copy = Value::array(vec![Value::Integer(1)]);
        assert_eq!(eval(InfixOp::Eq, &array, &array.clone()), Ok(Value::TRUE));
        assert_eq!(eval(InfixOp::Eq, &array, &copy), Ok(Value::FALSE));
    }
}
