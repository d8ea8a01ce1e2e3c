#![deny(clippy::arithmetic_side_effects)]
//! Simian Eval - tree-walking evaluator for Simian programs.
//!
//! # Pipeline
//!
//! A parsed [`Program`](simian_ir::Program) goes through
//! [`define_macros`], then [`Interpreter::expand_macros`], then
//! [`Interpreter::eval_program`]. Expansion must finish before evaluation
//! starts.
//!
//! # Architecture
//!
//! - [`Value`]: runtime values, including closures and quotes
//! - [`Environment`]: shared, chained scopes
//! - [`Interpreter`]: evaluation, builtins and the `puts` output sink
//! - `operators` / `unary_operators`: operator semantics
//! - `quote` / `macros`: the macro system
//!
//! Runtime failures are values ([`Value::Error`]); only a broken macro
//! ([`MacroError`]) stops the pipeline outright.

mod builtins;
mod environment;
pub mod errors;
mod interpreter;
mod macros;
mod operators;
mod print_handler;
mod quote;
mod unary_operators;
mod value;

pub use builtins::Builtins;
pub use environment::Environment;
pub use errors::EvalError;
pub use interpreter::{Interpreter, Node};
pub use macros::{define_macros, expand_macros, MacroError};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandler, SharedPrintHandler,
};
pub use quote::value_to_expr;
pub use value::{Builtin, BuiltinFn, FunctionValue, HashKey, HashKind, HashPair, HashValue, Value};
