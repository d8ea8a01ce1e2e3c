//! Runtime errors.
//!
//! Every user-facing failure of the evaluator is an [`EvalError`]. Errors
//! travel up the evaluation as values and surface as [`Value::Error`]; they
//! cannot be caught by the program.
//!
//! The constructor functions below take operands as values so call sites do
//! not repeat the type name lookup.

use simian_ir::{InfixOp, PrefixOp};

use crate::Value;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("identifier not found: {0}")]
    UnknownIdentifier(String),

    #[error("type mismatch: {left} {op} {right}")]
    TypeMismatch {
        left: &'static str,
        op: InfixOp,
        right: &'static str,
    },

    #[error("unknown operator: {op}{operand}")]
    UnknownPrefixOperator { op: PrefixOp, operand: &'static str },

    #[error("unknown operator: {left} {op} {right}")]
    UnknownInfixOperator {
        left: &'static str,
        op: InfixOp,
        right: &'static str,
    },

    #[error("not a function: {0}")]
    NotAFunction(&'static str),

    #[error("wrong number of arguments: expected {expected}, got {found}")]
    WrongArgumentCount { expected: usize, found: usize },

    #[error("argument to `{builtin}` must be {expected}, got {found}")]
    WrongArgumentType {
        builtin: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("unusable as hash key: {0}")]
    UnusableAsHashKey(&'static str),

    #[error("index operator not supported: {0}")]
    IndexNotSupported(&'static str),

    #[error("division by zero")]
    DivisionByZero,

    #[error("cannot unquote {0}")]
    CannotUnquote(&'static str),

    #[error("quote takes exactly one argument, got {0}")]
    QuoteArity(usize),

    #[error("macro literals are only allowed as the value of a top-level let")]
    MisplacedMacro,
}

pub fn type_mismatch(left: &Value, op: InfixOp, right: &Value) -> EvalError {
    EvalError::TypeMismatch {
        left: left.type_name(),
        op,
        right: right.type_name(),
    }
}

pub fn unknown_infix_operator(left: &Value, op: InfixOp, right: &Value) -> EvalError {
    EvalError::UnknownInfixOperator {
        left: left.type_name(),
        op,
        right: right.type_name(),
    }
}

pub fn unknown_prefix_operator(op: PrefixOp, operand: &Value) -> EvalError {
    EvalError::UnknownPrefixOperator {
        op,
        operand: operand.type_name(),
    }
}

pub fn not_a_function(callee: &Value) -> EvalError {
    EvalError::NotAFunction(callee.type_name())
}

pub fn unusable_as_hash_key(key: &Value) -> EvalError {
    EvalError::UnusableAsHashKey(key.type_name())
}

pub fn index_not_supported(collection: &Value) -> EvalError {
    EvalError::IndexNotSupported(collection.type_name())
}

pub fn wrong_argument_count(expected: usize, found: usize) -> EvalError {
    EvalError::WrongArgumentCount { expected, found }
}

pub fn wrong_argument_type(builtin: &'static str, expected: &'static str, found: &Value) -> EvalError {
    EvalError::WrongArgumentType {
        builtin,
        expected,
        found: found.type_name(),
    }
}

pub fn cannot_unquote(value: &Value) -> EvalError {
    EvalError::CannotUnquote(value.type_name())
}
