use crate::class::Method;
use crate::validation::Contract;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a method lives on instances or on the class itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MethodLevel {
    Instance,
    Type,
}

/// Identifies a method within one class. An instance method and a type-level
/// method may share a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodKey {
    pub level: MethodLevel,
    pub name: String,
}

impl MethodKey {
    pub fn new(level: MethodLevel, name: impl Into<String>) -> Self {
        Self { level, name: name.into() }
    }
    pub fn instance(name: impl Into<String>) -> Self { Self::new(MethodLevel::Instance, name) }
    pub fn of_type(name: impl Into<String>) -> Self { Self::new(MethodLevel::Type, name) }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            MethodLevel::Instance => write!(f, "#{}", self.name),
            MethodLevel::Type => write!(f, ".{}", self.name),
        }
    }
}

/// Contract metadata for one wrapped method.
///
/// `original` is the implementation as authored, before the wrapper replaced it.
/// It takes its receiver as a parameter, so it can be invoked on any instance
/// (or the class) the wrapper is called on.
#[derive(Clone)]
pub struct DecoratorRecord {
    pub owner: String,
    pub keyword: String,
    pub arg_contracts: Vec<Contract>,
    pub return_contract: Contract,
    pub original: Method,
}

impl fmt::Debug for DecoratorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoratorRecord")
            .field("owner", &self.owner)
            .field("keyword", &self.keyword)
            .field("arg_contracts", &self.arg_contracts)
            .field("return_contract", &self.return_contract)
            .finish_non_exhaustive()
    }
}
