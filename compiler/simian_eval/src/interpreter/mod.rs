//! Tree-walking interpreter.
//!
//! Internally every evaluation step returns `Result<Value, Unwind>`: `return`
//! and runtime errors both leave nested blocks by unwinding through `?`, and
//! only a function call boundary stops a `return`. The public entry points
//! fold an unwind back into the value model, producing
//! [`Value::ReturnValue`] or [`Value::Error`].

mod call;
mod expr;

use simian_ir::{Block, Expr, Program, Stmt, StmtKind};

use crate::builtins::Builtins;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::{Environment, EvalError, Value};

/// Why evaluation left the normal path.
#[derive(Debug)]
pub(crate) enum Unwind {
    /// A `return` statement, caught by the nearest function call.
    Return(Value),
    /// A runtime error, never caught.
    Error(EvalError),
}

impl From<EvalError> for Unwind {
    fn from(error: EvalError) -> Self {
        Unwind::Error(error)
    }
}

pub(crate) type Flow<T = Value> = Result<T, Unwind>;

/// Any node the interpreter can evaluate directly.
#[derive(Copy, Clone, Debug)]
pub enum Node<'a> {
    Program(&'a Program),
    Stmt(&'a Stmt),
    Block(&'a Block),
    Expr(&'a Expr),
}

impl<'a> From<&'a Program> for Node<'a> {
    fn from(program: &'a Program) -> Self {
        Node::Program(program)
    }
}

impl<'a> From<&'a Stmt> for Node<'a> {
    fn from(stmt: &'a Stmt) -> Self {
        Node::Stmt(stmt)
    }
}

impl<'a> From<&'a Block> for Node<'a> {
    fn from(block: &'a Block) -> Self {
        Node::Block(block)
    }
}

impl<'a> From<&'a Expr> for Node<'a> {
    fn from(expr: &'a Expr) -> Self {
        Node::Expr(expr)
    }
}

/// Evaluator state that outlives a single program: the builtin table and
/// the output sink for `puts`.
pub struct Interpreter {
    builtins: Builtins,
    print: SharedPrintHandler,
}

impl Interpreter {
    /// Standard builtins, printing to stdout.
    pub fn new() -> Self {
        Interpreter::with_print_handler(stdout_handler())
    }

    pub fn with_print_handler(print: SharedPrintHandler) -> Self {
        Interpreter {
            builtins: Builtins::standard(),
            print,
        }
    }

    #[must_use]
    pub fn with_builtins(mut self, builtins: Builtins) -> Self {
        self.builtins = builtins;
        self
    }

    /// Evaluate a whole program; a top-level `return` ends it with its value.
    ///
    /// The result is the value of the last statement, or the error that
    /// stopped the program. An empty program evaluates to `null`.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.len()))]
    pub fn eval_program(&self, program: &Program, env: &Environment) -> Value {
        let mut result = Value::Null;
        for stmt in &program.statements {
            match self.eval_stmt(stmt, env) {
                Ok(value) => result = value,
                Err(Unwind::Return(value)) => return value,
                Err(Unwind::Error(error)) => {
                    tracing::debug!(%error, "program stopped");
                    return Value::Error(error);
                }
            }
        }
        result
    }

    /// Evaluate any node.
    ///
    /// Programs behave as in [`eval_program`](Self::eval_program). For other
    /// nodes a `return` surfaces as [`Value::ReturnValue`] so callers can
    /// tell it apart from a plain value.
    pub fn eval<'a>(&self, node: impl Into<Node<'a>>, env: &Environment) -> Value {
        let flow = match node.into() {
            Node::Program(program) => return self.eval_program(program, env),
            Node::Stmt(stmt) => self.eval_stmt(stmt, env),
            Node::Block(block) => self.eval_block(block, env),
            Node::Expr(expr) => self.eval_expr(expr, env),
        };
        match flow {
            Ok(value) => value,
            Err(Unwind::Return(value)) => Value::ReturnValue(Box::new(value)),
            Err(Unwind::Error(error)) => Value::Error(error),
        }
    }

    pub(crate) fn eval_stmt(&self, stmt: &Stmt, env: &Environment) -> Flow {
        match &stmt.kind {
            StmtKind::Let { name, value } => {
                let value = self.eval_expr(value, env)?;
                env.set(name.name.clone(), value);
                Ok(Value::Null)
            }
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr, env)?,
                    None => Value::Null,
                };
                Err(Unwind::Return(value))
            }
            StmtKind::Expression(expr) => self.eval_expr(expr, env),
            StmtKind::Block(block) => self.eval_block(block, env),
        }
    }

    /// Statements in order; the block's value is that of the last one.
    ///
    /// Blocks run in the environment they are given: `if` bodies bind into
    /// the enclosing scope, function bodies into the call's scope.
    pub(crate) fn eval_block(&self, block: &Block, env: &Environment) -> Flow {
        let mut result = Value::Null;
        for stmt in &block.statements {
            result = self.eval_stmt(stmt, env)?;
        }
        Ok(result)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

#[cfg(test)]
mod tests;
