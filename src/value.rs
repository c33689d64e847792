//! value.rs
//! The dynamic values that flow through wrapped methods.

use crate::validation::ContractError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub type BlockFn = dyn Fn(&[Value]) -> Result<Value, ContractError> + Send + Sync;

/// A trailing callback passed to a method, optionally named for diagnostics.
///
/// Two blocks compare equal only when they share the same callable.
#[derive(Clone)]
pub struct Block {
    name: Option<String>,
    body: Arc<BlockFn>,
}

impl Block {
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, ContractError> + Send + Sync + 'static,
    {
        Self { name: None, body: Arc::new(body) }
    }

    pub fn named<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, ContractError> + Send + Sync + 'static,
    {
        Self { name: Some(name.into()), body: Arc::new(body) }
    }

    pub fn name(&self) -> Option<&str> { self.name.as_deref() }

    pub fn call(&self, args: &[Value]) -> Result<Value, ContractError> {
        (self.body)(args)
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block").field("name", &self.name).finish_non_exhaustive()
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "#<Block {}>", name),
            None => f.write_str("#<Block>"),
        }
    }
}

/// The runtime shape of a value, used by type-match contracts.
///
/// `Num` is never produced by [`Value::kind`]; it is the contract-side union of
/// `Int` and `Float`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Nil,
    Bool,
    Int,
    Float,
    Num,
    Str,
    Sym,
    List,
    Map,
    Block,
}

impl Kind {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Nil => "Nil",
            Kind::Bool => "Bool",
            Kind::Int => "Int",
            Kind::Float => "Float",
            Kind::Num => "Num",
            Kind::Str => "Str",
            Kind::Sym => "Sym",
            Kind::List => "List",
            Kind::Map => "Map",
            Kind::Block => "Block",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dynamically typed argument or return value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Sym(String),
    List(Vec<Value>),
    /// Insertion-ordered key/value pairs.
    Map(Vec<(Value, Value)>),
    Block(Block),
}

impl Value {
    pub fn str(s: impl Into<String>) -> Self { Value::Str(s.into()) }
    pub fn sym(s: impl Into<String>) -> Self { Value::Sym(s.into()) }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::Nil,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::Sym(_) => Kind::Sym,
            Value::List(_) => Kind::List,
            Value::Map(_) => Kind::Map,
            Value::Block(_) => Kind::Block,
        }
    }

    /// Only `Nil` and `false` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) | Value::Sym(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}
impl From<i64> for Value {
    fn from(i: i64) -> Self { Value::Int(i) }
}
impl From<i32> for Value {
    fn from(i: i32) -> Self { Value::Int(i64::from(i)) }
}
impl From<f64> for Value {
    fn from(x: f64) -> Self { Value::Float(x) }
}
impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::Str(s.to_string()) }
}
impl From<String> for Value {
    fn from(s: String) -> Self { Value::Str(s) }
}
impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self { Value::List(items) }
}
impl From<Block> for Value {
    fn from(b: Block) -> Self { Value::Block(b) }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Sym(s) => write!(f, ":{}", s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 { f.write_str(", ")?; }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 { f.write_str(", ")?; }
                    write!(f, "{} => {}", k, v)?;
                }
                f.write_str("}")
            }
            Value::Block(b) => write!(f, "{}", b),
        }
    }
}
