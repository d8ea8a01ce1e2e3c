//! Runtime values.
//!
//! [`Value`] is a closed enum; compound values share their payload through
//! `Rc`, so cloning a value is always cheap. Values are immutable once
//! built: `push` and `rest` return new arrays.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use simian_ir::{Block, Expr, Identifier};

use crate::environment::Environment;
use crate::errors::EvalError;
use crate::print_handler::PrintHandler;

/// Host procedure behind a [`Builtin`].
pub type BuiltinFn = fn(&[Value], &PrintHandler) -> Result<Value, EvalError>;

/// A named host procedure.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

/// Parameters, body and defining environment of a closure or macro.
pub struct FunctionValue {
    pub parameters: Rc<[Identifier]>,
    pub body: Rc<Block>,
    pub env: Environment,
}

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Null,
    /// Carries a `return` value out of nested blocks. Only visible through
    /// [`Interpreter::eval`](crate::Interpreter::eval) on a statement or block.
    ReturnValue(Box<Value>),
    /// A runtime error that stopped evaluation.
    Error(EvalError),
    /// A closure.
    Function(Rc<FunctionValue>),
    String(Rc<str>),
    Builtin(Builtin),
    Array(Rc<[Value]>),
    Hash(Rc<HashValue>),
    /// An unevaluated expression produced by `quote`.
    Quote(Rc<Expr>),
    /// A macro bound by a top-level `let`; only exists during expansion.
    Macro(Rc<FunctionValue>),
}

impl Value {
    pub const TRUE: Value = Value::Boolean(true);
    pub const FALSE: Value = Value::Boolean(false);

    pub fn string(s: impl Into<Rc<str>>) -> Value {
        Value::String(s.into())
    }

    pub fn array(elements: impl Into<Rc<[Value]>>) -> Value {
        Value::Array(elements.into())
    }

    /// Upper-case kind name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::Null => "NULL",
            Value::ReturnValue(_) => "RETURN_VALUE",
            Value::Error(_) => "ERROR",
            Value::Function(_) => "FUNCTION",
            Value::String(_) => "STRING",
            Value::Builtin(_) => "BUILTIN",
            Value::Array(_) => "ARRAY",
            Value::Hash(_) => "HASH",
            Value::Quote(_) => "QUOTE",
            Value::Macro(_) => "MACRO",
        }
    }

    /// Only `false` and `null` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false) | Value::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Key for use in a hash, or `None` if the kind is not hashable.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Value::Integer(n) => Some(HashKey {
                kind: HashKind::Integer,
                hash: u64::from_ne_bytes(n.to_ne_bytes()),
            }),
            Value::Boolean(b) => Some(HashKey {
                kind: HashKind::Boolean,
                hash: u64::from(*b),
            }),
            Value::String(s) => Some(HashKey {
                kind: HashKind::String,
                hash: fnv1a(s.as_bytes()),
            }),
            _ => None,
        }
    }
}

/// Kinds that can be used as hash keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HashKind {
    Integer,
    Boolean,
    String,
}

/// Hash key: the value's kind plus a 64-bit hash of its contents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub kind: HashKind,
    pub hash: u64,
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a.
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Original key and its value.
#[derive(Clone)]
pub struct HashPair {
    pub key: Value,
    pub value: Value,
}

/// Hash contents, iterated in the order keys were first inserted.
#[derive(Clone, Default)]
pub struct HashValue {
    pairs: Vec<HashPair>,
    index: FxHashMap<HashKey, usize>,
}

impl HashValue {
    pub fn new() -> Self {
        HashValue::default()
    }

    /// Insert a pair; an existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: HashKey, pair: HashPair) {
        match self.index.get(&key) {
            Some(&slot) => self.pairs[slot] = pair,
            None => {
                self.index.insert(key, self.pairs.len());
                self.pairs.push(pair);
            }
        }
    }

    pub fn get(&self, key: &HashKey) -> Option<&HashPair> {
        self.index.get(key).map(|&slot| &self.pairs[slot])
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = &HashPair> {
        self.pairs.iter()
    }
}

fn write_parameters(f: &mut fmt::Formatter<'_>, parameters: &[Identifier]) -> fmt::Result {
    for (i, param) in parameters.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{param}")?;
    }
    Ok(())
}

/// Inspection form shown by the REPL and `puts`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Null => f.write_str("null"),
            Value::ReturnValue(inner) => write!(f, "{inner}"),
            Value::Error(error) => write!(f, "ERROR: {error}"),
            Value::Function(function) => {
                f.write_str("fn(")?;
                write_parameters(f, &function.parameters)?;
                write!(f, ") {{\n{}\n}}", function.body)
            }
            Value::String(s) => f.write_str(s),
            Value::Builtin(_) => f.write_str("builtin function"),
            Value::Array(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("]")
            }
            Value::Hash(hash) => {
                f.write_str("{")?;
                for (i, pair) in hash.pairs().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", pair.key, pair.value)?;
                }
                f.write_str("}")
            }
            Value::Quote(node) => write!(f, "QUOTE({node})"),
            Value::Macro(mac) => {
                f.write_str("macro(")?;
                write_parameters(f, &mac.parameters)?;
                write!(f, ") {{\n{}\n}}", mac.body)
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "Integer({n})"),
            Value::Boolean(b) => write!(f, "Boolean({b})"),
            Value::Null => f.write_str("Null"),
            Value::ReturnValue(inner) => write!(f, "ReturnValue({inner:?})"),
            Value::Error(error) => write!(f, "Error({error:?})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Builtin(builtin) => write!(f, "Builtin({})", builtin.name),
            Value::Array(elements) => f.debug_list().entries(elements.iter()).finish(),
            Value::Hash(hash) => f
                .debug_map()
                .entries(hash.pairs().map(|pair| (&pair.key, &pair.value)))
                .finish(),
            Value::Function(_) | Value::Quote(_) | Value::Macro(_) => {
                write!(f, "{}({self})", self.type_name())
            }
        }
    }
}

/// Structural for scalars, strings, arrays and hashes; identity for
/// closures, macros and quotes; name for builtins.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::ReturnValue(a), Value::ReturnValue(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Hash(a), Value::Hash(b)) => {
                a.len() == b.len()
                    && a.pairs().all(|pair| {
                        pair.key
                            .hash_key()
                            .and_then(|key| b.get(&key))
                            .is_some_and(|other| other.value == pair.value)
                    })
            }
            (Value::Function(a), Value::Function(b)) | (Value::Macro(a), Value::Macro(b)) => {
                Rc::ptr_eq(a, b)
            }
            (Value::Quote(a), Value::Quote(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}
