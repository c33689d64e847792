//! The keyword registry: maps DSL names such as `contract` to the staging
//! entry point that records a declaration in a class body.

use super::pending::{DeclArg, Declaration, PendingSlot};
use crate::validation::ContractError;
use std::collections::HashMap;
use tracing::debug;

/// A registered declaration keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    name: String,
    type_name: String,
}

impl Keyword {
    /// The DSL name the keyword is invoked under.
    pub fn name(&self) -> &str { &self.name }
    /// The contract-specifier type the keyword was derived from.
    pub fn type_name(&self) -> &str { &self.type_name }

    /// Forwards the raw arguments to the slot, tagged with this keyword.
    /// The contract list is not inspected here.
    pub fn stage(&self, slot: &mut PendingSlot, args: Vec<DeclArg>) {
        slot.push(Declaration::new(self.name.clone(), args));
    }
}

/// Derives the DSL name for a contract-specifier type: the type name with its
/// first character lowercased.
///
/// Returns `None` when the result would not be a valid identifier (it must
/// start with an ASCII letter or `_` and contain only `[0-9A-Za-z_]`).
pub fn keyword_name(type_name: &str) -> Option<String> {
    let mut chars = type_name.chars();
    let first = chars.next()?;
    let name: String = first.to_lowercase().chain(chars).collect();

    let starts_ok = name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_');
    let charset_ok = name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if starts_ok && charset_ok { Some(name) } else { None }
}

/// The table of declaration keywords, built once at startup and shared by
/// every class body.
#[derive(Debug, Clone, Default)]
pub struct KeywordRegistry {
    keywords: HashMap<String, Keyword>,
}

impl KeywordRegistry {
    pub fn new() -> Self { Self::default() }

    /// A registry holding the `contract` keyword.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("Contract");
        registry
    }

    /// Registers the keyword for `type_name`.
    ///
    /// Names that fail the identifier check are skipped without error and
    /// `None` is returned. Re-registering a name replaces the previous entry.
    pub fn register(&mut self, type_name: &str) -> Option<&Keyword> {
        let Some(name) = keyword_name(type_name) else {
            debug!(type_name, "skipping keyword registration: not a valid identifier");
            return None;
        };
        let keyword = Keyword { name: name.clone(), type_name: type_name.to_string() };
        self.keywords.insert(name.clone(), keyword);
        self.keywords.get(&name)
    }

    pub fn get(&self, name: &str) -> Option<&Keyword> { self.keywords.get(name) }
    pub fn contains(&self, name: &str) -> bool { self.keywords.contains_key(name) }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.keywords.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Invokes keyword `name`, staging `args` in `slot`.
    pub fn stage(&self, name: &str, slot: &mut PendingSlot, args: Vec<DeclArg>) -> Result<(), ContractError> {
        let keyword = self.get(name).ok_or_else(|| ContractError::UndefinedKeyword(name.to_string()))?;
        keyword.stage(slot, args);
        Ok(())
    }
}
