//! Contract specifiers: the values that describe what an argument or return
//! value must look like.

use crate::value::{Kind, Value};
use std::fmt;
use std::sync::Arc;

pub type PredicateFn = dyn Fn(&Value) -> bool + Send + Sync;

/// A named, user-supplied check.
///
/// The name is what diagnostics print as the expected contract.
#[derive(Clone)]
pub struct Predicate {
    name: String,
    check: Arc<PredicateFn>,
}

impl Predicate {
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self { name: name.into(), check: Arc::new(check) }
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn test(&self, value: &Value) -> bool {
        (self.check)(value)
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.check, &other.check)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.name).finish()
    }
}

/// Describes the acceptable values for one argument or for a return value.
#[derive(Debug, Clone, PartialEq)]
pub enum Contract {
    /// Wildcard; accepts anything, including `nil`.
    Any,
    /// Type match against the value's [`Kind`].
    Kind(Kind),
    /// Literal equality (integers and floats compare numerically).
    Exact(Value),
    Predicate(Predicate),
}

impl Contract {
    pub const ANY: Contract = Contract::Any;
    pub const NUM: Contract = Contract::Kind(Kind::Num);
    pub const INT: Contract = Contract::Kind(Kind::Int);
    pub const FLOAT: Contract = Contract::Kind(Kind::Float);
    pub const STR: Contract = Contract::Kind(Kind::Str);
    pub const SYM: Contract = Contract::Kind(Kind::Sym);
    pub const BOOL: Contract = Contract::Kind(Kind::Bool);
    pub const NIL: Contract = Contract::Kind(Kind::Nil);
    pub const LIST: Contract = Contract::Kind(Kind::List);
    pub const MAP: Contract = Contract::Kind(Kind::Map);
    pub const BLOCK: Contract = Contract::Kind(Kind::Block);

    pub fn exact(value: impl Into<Value>) -> Self {
        Contract::Exact(value.into())
    }

    pub fn predicate<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Contract::Predicate(Predicate::new(name, check))
    }
}

impl From<Kind> for Contract {
    fn from(kind: Kind) -> Self { Contract::Kind(kind) }
}

impl From<Predicate> for Contract {
    fn from(p: Predicate) -> Self { Contract::Predicate(p) }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contract::Any => f.write_str("Any"),
            Contract::Kind(kind) => write!(f, "{}", kind),
            Contract::Exact(value) => write!(f, "{}", value),
            Contract::Predicate(p) => f.write_str(p.name()),
        }
    }
}
