//! Canonical rendering of the syntax tree.
//!
//! The forms are fixed: operators are fully parenthesized, blocks render
//! their statements back to back with no braces, and string literals render
//! as their raw contents.

use std::fmt::{self, Display, Formatter, Write};

use super::{Block, Expr, ExprKind, Identifier, Program, Stmt, StmtKind};

fn write_separated<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.statements.iter().try_for_each(|stmt| write!(f, "{stmt}"))
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.statements.iter().try_for_each(|stmt| write!(f, "{stmt}"))
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StmtKind::Let { name, value } => write!(f, "let {name} = {value};"),
            StmtKind::Return(Some(value)) => write!(f, "return {value};"),
            StmtKind::Return(None) => f.write_str("return ;"),
            StmtKind::Expression(expr) => write!(f, "{expr}"),
            StmtKind::Block(block) => write!(f, "{block}"),
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Ident(name) | ExprKind::Str(name) => f.write_str(name),
            ExprKind::Int(value) => write!(f, "{value}"),
            ExprKind::Bool(value) => write!(f, "{value}"),
            ExprKind::Prefix { op, right } => write!(f, "({op}{right})"),
            ExprKind::Infix { left, op, right } => write!(f, "({left} {op} {right})"),
            ExprKind::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if{condition} {consequence}")?;
                if let Some(alternative) = alternative {
                    write!(f, "else {alternative}")?;
                }
                Ok(())
            }
            ExprKind::Function(literal) => {
                f.write_str("fn(")?;
                write_separated(f, &literal.parameters[..])?;
                write!(f, ") {}", literal.body)
            }
            ExprKind::Macro(literal) => {
                f.write_str("macro(")?;
                write_separated(f, &literal.parameters[..])?;
                write!(f, "){}", literal.body)
            }
            ExprKind::Call {
                function,
                arguments,
            } => {
                write!(f, "{function}(")?;
                write_separated(f, arguments)?;
                f.write_char(')')
            }
            ExprKind::Array(elements) => {
                f.write_char('[')?;
                write_separated(f, elements)?;
                f.write_char(']')
            }
            ExprKind::Index { left, index } => write!(f, "({left}[{index}])"),
            ExprKind::Hash(pairs) => {
                f.write_char('{')?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}:{value}")?;
                }
                f.write_char('}')
            }
        }
    }
}
