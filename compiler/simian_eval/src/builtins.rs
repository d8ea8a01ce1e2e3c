//! Host procedures available to every program.
//!
//! Builtins are resolved after the environment chain misses, so a program
//! can shadow any of them with its own `let`.

use rustc_hash::FxHashMap;

use crate::errors::{wrong_argument_count, wrong_argument_type};
use crate::print_handler::PrintHandler;
use crate::value::{Builtin, BuiltinFn};
use crate::{EvalError, Value};

/// Name to procedure table consulted by identifier resolution.
#[derive(Clone)]
pub struct Builtins {
    table: FxHashMap<&'static str, Builtin>,
}

impl Builtins {
    /// A table with no procedures.
    pub fn empty() -> Self {
        Builtins {
            table: FxHashMap::default(),
        }
    }

    /// `len`, `first`, `last`, `rest`, `push` and `puts`.
    pub fn standard() -> Self {
        let mut builtins = Builtins::empty();
        builtins.register("len", builtin_len);
        builtins.register("first", builtin_first);
        builtins.register("last", builtin_last);
        builtins.register("rest", builtin_rest);
        builtins.register("push", builtin_push);
        builtins.register("puts", builtin_puts);
        builtins
    }

    /// Add or replace a procedure.
    pub fn register(&mut self, name: &'static str, func: BuiltinFn) {
        self.table.insert(name, Builtin { name, func });
    }

    pub fn get(&self, name: &str) -> Option<Builtin> {
        self.table.get(name).copied()
    }
}

impl Default for Builtins {
    fn default() -> Self {
        Builtins::standard()
    }
}

fn expect_arity(args: &[Value], expected: usize) -> Result<(), EvalError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(wrong_argument_count(expected, args.len()))
    }
}

fn length(len: usize) -> Value {
    Value::Integer(i64::try_from(len).unwrap_or(i64::MAX))
}

fn builtin_len(args: &[Value], _: &PrintHandler) -> Result<Value, EvalError> {
    expect_arity(args, 1)?;
    match &args[0] {
        Value::String(s) => Ok(length(s.len())),
        Value::Array(elements) => Ok(length(elements.len())),
        other => Err(wrong_argument_type("len", "STRING or ARRAY", other)),
    }
}

fn array_argument<'a>(name: &'static str, value: &'a Value) -> Result<&'a [Value], EvalError> {
    match value {
        Value::Array(elements) => Ok(&elements[..]),
        other => Err(wrong_argument_type(name, "ARRAY", other)),
    }
}

fn builtin_first(args: &[Value], _: &PrintHandler) -> Result<Value, EvalError> {
    expect_arity(args, 1)?;
    let elements = array_argument("first", &args[0])?;
    Ok(elements.first().cloned().unwrap_or(Value::Null))
}

fn builtin_last(args: &[Value], _: &PrintHandler) -> Result<Value, EvalError> {
    expect_arity(args, 1)?;
    let elements = array_argument("last", &args[0])?;
    Ok(elements.last().cloned().unwrap_or(Value::Null))
}

fn builtin_rest(args: &[Value], _: &PrintHandler) -> Result<Value, EvalError> {
    expect_arity(args, 1)?;
    let elements = array_argument("rest", &args[0])?;
    match elements.split_first() {
        Some((_, rest)) => Ok(Value::array(rest.to_vec())),
        None => Ok(Value::Null),
    }
}

fn builtin_push(args: &[Value], _: &PrintHandler) -> Result<Value, EvalError> {
    expect_arity(args, 2)?;
    let elements = array_argument("push", &args[0])?;
    let mut pushed = Vec::with_capacity(elements.len().saturating_add(1));
    pushed.extend_from_slice(elements);
    pushed.push(args[1].clone());
    Ok(Value::array(pushed))
}

fn builtin_puts(args: &[Value], print: &PrintHandler) -> Result<Value, EvalError> {
    for arg in args {
        print.println(&arg.to_string());
    }
    Ok(Value::Null)
}
