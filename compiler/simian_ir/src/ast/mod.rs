//! Syntax tree.
//!
//! Statements and expressions are closed enums ([`StmtKind`], [`ExprKind`])
//! wrapped in a node struct that keeps the token which introduced the node.
//! Function and macro literals keep their parameters and body behind `Rc`
//! so closures and macro values can share them with the tree without
//! copying.
//!
//! Every node renders to a canonical string through `Display`; see
//! `display.rs` for the exact forms.

use std::rc::Rc;

use crate::{InfixOp, PrefixOp, Span, Token};

mod display;


/// A parsed source file: its top-level statements in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Program { statements }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// A statement and the token it starts with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stmt {
    pub token: Token,
    pub kind: StmtKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StmtKind {
    /// `let name = value;`
    Let { name: Identifier, value: Expr },
    /// `return value;` or a bare `return;`
    Return(Option<Expr>),
    /// An expression evaluated for its value.
    Expression(Expr),
    /// `{ ... }` in statement position.
    Block(Block),
}

impl Stmt {
    pub fn new(token: Token, kind: StmtKind) -> Self {
        Stmt { token, kind }
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.token.span
    }

    /// The macro literal bound by this statement, if it is `let name = macro(...) {...}`.
    pub fn as_macro_definition(&self) -> Option<(&Identifier, &FunctionLiteral)> {
        match &self.kind {
            StmtKind::Let {
                name,
                value:
                    Expr {
                        kind: ExprKind::Macro(literal),
                        ..
                    },
            } => Some((name, literal)),
            _ => None,
        }
    }
}

/// Braced statement sequence used by `if`, `fn` and `macro`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// The opening `{`.
    pub token: Token,
    pub statements: Vec<Stmt>,
}

impl Block {
    pub fn new(token: Token, statements: Vec<Stmt>) -> Self {
        Block { token, statements }
    }
}

/// A name in binding position: a `let` target or a parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub token: Token,
    pub name: String,
}

impl Identifier {
    pub fn new(token: Token) -> Self {
        let name = token.literal.clone();
        Identifier { token, name }
    }
}

/// An expression and the token that introduced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    pub token: Token,
    pub kind: ExprKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    Ident(String),
    Int(i64),
    Str(String),
    Bool(bool),
    Prefix {
        op: PrefixOp,
        right: Box<Expr>,
    },
    Infix {
        left: Box<Expr>,
        op: InfixOp,
        right: Box<Expr>,
    },
    If {
        condition: Box<Expr>,
        consequence: Block,
        alternative: Option<Block>,
    },
    Function(FunctionLiteral),
    Call {
        function: Box<Expr>,
        arguments: Vec<Expr>,
    },
    Array(Vec<Expr>),
    Index {
        left: Box<Expr>,
        index: Box<Expr>,
    },
    /// Key/value pairs in source order.
    Hash(Vec<(Expr, Expr)>),
    /// Only legal as the value of a top-level `let`; removed before evaluation.
    Macro(FunctionLiteral),
}

/// Parameters and body shared by `fn` and `macro` literals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionLiteral {
    pub parameters: Rc<[Identifier]>,
    pub body: Rc<Block>,
}

impl FunctionLiteral {
    pub fn new(parameters: Vec<Identifier>, body: Block) -> Self {
        FunctionLiteral {
            parameters: parameters.into(),
            body: Rc::new(body),
        }
    }
}

impl Expr {
    pub fn new(token: Token, kind: ExprKind) -> Self {
        Expr { token, kind }
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.token.span
    }

    /// The identifier name, if this expression is a bare identifier.
    pub fn as_ident(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Ident(name) => Some(name),
            _ => None,
        }
    }
}
