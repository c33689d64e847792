use super::types::*;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Decorator records of one class, keyed by method.
#[derive(Debug, Clone, Default)]
pub struct DecoratorRegistry {
    records: HashMap<MethodKey, Arc<DecoratorRecord>>,
}

impl DecoratorRegistry {
    pub fn new() -> Self { Self::default() }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn get(&self, key: &MethodKey) -> Option<&Arc<DecoratorRecord>> {
        self.records.get(key)
    }

    /// Stores `record` under `key`, returning the record it replaced.
    pub fn set(&mut self, key: MethodKey, record: DecoratorRecord) -> Option<Arc<DecoratorRecord>> {
        self.records.insert(key, Arc::new(record))
    }

    pub fn records(&self) -> &HashMap<MethodKey, Arc<DecoratorRecord>> { &self.records }

    pub fn keys(&self) -> Vec<&MethodKey> {
        let mut keys: Vec<&MethodKey> = self.records.keys().collect();
        keys.sort();
        keys
    }
}

/// The handle through which a class, its builder and every wrapper installed on
/// it reach the class's registry.
///
/// Cloning the handle shares the registry; a fresh handle is a fresh registry.
/// Locks are held only for the lookup itself, never across a method call.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry(Arc<RwLock<DecoratorRegistry>>);

impl SharedRegistry {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, key: &MethodKey) -> Option<Arc<DecoratorRecord>> {
        self.0.read().get(key).cloned()
    }

    pub fn set(&self, key: MethodKey, record: DecoratorRecord) -> Option<Arc<DecoratorRecord>> {
        self.0.write().set(key, record)
    }

    pub fn len(&self) -> usize { self.0.read().len() }
    pub fn is_empty(&self) -> bool { self.0.read().is_empty() }

    /// A point-in-time copy of every record.
    pub fn snapshot(&self) -> HashMap<MethodKey, Arc<DecoratorRecord>> {
        self.0.read().records().clone()
    }

    /// True when both handles point at the same registry.
    pub fn same_as(&self, other: &SharedRegistry) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::method;
    use crate::validation::Contract;
    use crate::value::Value;

    fn record(owner: &str) -> DecoratorRecord {
        DecoratorRecord {
            owner: owner.into(),
            keyword: "contract".into(),
            arg_contracts: vec![Contract::NUM],
            return_contract: Contract::NUM,
            original: method(|_, _, _| Ok(Value::Nil)),
        }
    }

    #[test]
    fn test_set_overwrites_and_returns_previous() {
        let mut registry = DecoratorRegistry::new();
        assert!(registry.set(MethodKey::instance("add"), record("A")).is_none());
        let previous = registry.set(MethodKey::instance("add"), record("B"));
        assert_eq!(previous.map(|r| r.owner.clone()), Some("A".to_string()));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&MethodKey::instance("add")).map(|r| r.owner.as_str()), Some("B"));
    }

    #[test]
    fn test_instance_and_type_keys_do_not_collide() {
        let mut registry = DecoratorRegistry::new();
        registry.set(MethodKey::instance("build"), record("I"));
        registry.set(MethodKey::of_type("build"), record("T"));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.keys(), vec![&MethodKey::instance("build"), &MethodKey::of_type("build")]);
    }

    #[test]
    fn test_shared_handles() {
        let a = SharedRegistry::new();
        let alias = a.clone();
        let other = SharedRegistry::new();
        alias.set(MethodKey::of_type("make"), record("A"));

        assert!(a.same_as(&alias));
        assert!(!a.same_as(&other));
        assert_eq!(a.len(), 1);
        assert!(other.is_empty());
        assert!(a.get(&MethodKey::of_type("make")).is_some());
        assert!(a.snapshot().contains_key(&MethodKey::of_type("make")));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(MethodKey::instance("add").to_string(), "#add");
        assert_eq!(MethodKey::of_type("add").to_string(), ".add");
    }
}
