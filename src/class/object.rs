//! Finished classes, their instances, and the receiver handed to every method.

use crate::store::{DecoratorRecord, MethodKey, MethodLevel, SharedRegistry};
use crate::validation::ContractError;
use crate::value::{Block, Value};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

pub type MethodBody =
    dyn Fn(Receiver<'_>, &[Value], Option<&Block>) -> Result<Value, ContractError> + Send + Sync;

/// An unbound method: the receiver is supplied at call time, so the same
/// implementation can run against any instance of the class (or the class
/// itself, for type-level methods).
pub type Method = Arc<MethodBody>;

/// Wraps a closure as a [`Method`].
pub fn method<F>(body: F) -> Method
where
    F: Fn(Receiver<'_>, &[Value], Option<&Block>) -> Result<Value, ContractError> + Send + Sync + 'static,
{
    Arc::new(body)
}

/// What a method was invoked on.
#[derive(Clone, Copy)]
pub enum Receiver<'a> {
    Instance(&'a Instance),
    Class(&'a Class),
}

impl<'a> Receiver<'a> {
    /// The class that dispatched the call (the instance's class for instance
    /// methods).
    pub fn class(&self) -> &'a Class {
        match *self {
            Receiver::Instance(instance) => instance.class().as_ref(),
            Receiver::Class(class) => class,
        }
    }

    pub fn instance(&self) -> Option<&'a Instance> {
        match *self {
            Receiver::Instance(instance) => Some(instance),
            Receiver::Class(_) => None,
        }
    }

    /// Calls another method on the same receiver.
    pub fn call(&self, name: &str, args: &[Value], block: Option<&Block>) -> Result<Value, ContractError> {
        match *self {
            Receiver::Instance(instance) => instance.call(name, args, block),
            Receiver::Class(class) => class.call_type(name, args, block),
        }
    }
}

impl fmt::Debug for Receiver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Receiver::Instance(i) => f.debug_tuple("Instance").field(&i.class().name()).finish(),
            Receiver::Class(c) => f.debug_tuple("Class").field(&c.name()).finish(),
        }
    }
}

/// A finished class: method tables, an optional superclass, and the class's
/// own decorator registry.
pub struct Class {
    pub(super) name: String,
    pub(super) superclass: Option<Arc<Class>>,
    pub(super) instance_methods: HashMap<String, Method>,
    pub(super) type_methods: HashMap<String, Method>,
    pub(super) decorators: SharedRegistry,
}

impl Class {
    pub fn name(&self) -> &str { &self.name }
    pub fn superclass(&self) -> Option<&Arc<Class>> { self.superclass.as_ref() }

    pub fn new_instance(self: &Arc<Self>) -> Instance {
        Instance { class: Arc::clone(self), fields: Mutex::new(BTreeMap::new()) }
    }

    /// Resolves a method through the superclass chain.
    pub fn method(&self, level: MethodLevel, name: &str) -> Option<Method> {
        let own = match level {
            MethodLevel::Instance => self.instance_methods.get(name),
            MethodLevel::Type => self.type_methods.get(name),
        };
        match own {
            Some(m) => Some(Arc::clone(m)),
            None => self.superclass.as_ref()?.method(level, name),
        }
    }

    pub fn instance_method(&self, name: &str) -> Option<Method> { self.method(MethodLevel::Instance, name) }
    pub fn type_method(&self, name: &str) -> Option<Method> { self.method(MethodLevel::Type, name) }
    pub fn responds_to(&self, name: &str) -> bool { self.instance_method(name).is_some() }

    /// Names of the methods defined directly on this class, sorted.
    pub fn method_names(&self, level: MethodLevel) -> Vec<&str> {
        let table = match level {
            MethodLevel::Instance => &self.instance_methods,
            MethodLevel::Type => &self.type_methods,
        };
        let mut names: Vec<&str> = table.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Invokes a type-level method with the class as receiver.
    pub fn call_type(&self, name: &str, args: &[Value], block: Option<&Block>) -> Result<Value, ContractError> {
        let m = self.type_method(name).ok_or_else(|| self.undefined(name))?;
        m(Receiver::Class(self), args, block)
    }

    // --- Decorator record accessors ---

    pub fn decorators(&self) -> &SharedRegistry { &self.decorators }

    pub fn decorator_records(&self) -> HashMap<MethodKey, Arc<DecoratorRecord>> {
        self.decorators.snapshot()
    }

    pub fn decorator_record(&self, key: &MethodKey) -> Option<Arc<DecoratorRecord>> {
        self.decorators.get(key)
    }

    pub fn set_decorator_record(&self, key: MethodKey, record: DecoratorRecord) -> Option<Arc<DecoratorRecord>> {
        self.decorators.set(key, record)
    }

    fn undefined(&self, name: &str) -> ContractError {
        ContractError::UndefinedMethod { class: self.name.clone(), method: name.to_string() }
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("superclass", &self.superclass.as_ref().map(|s| s.name()))
            .field("instance_methods", &self.method_names(MethodLevel::Instance))
            .field("type_methods", &self.method_names(MethodLevel::Type))
            .field("decorated", &self.decorators.len())
            .finish()
    }
}

/// An instance of a [`Class`] with a small bag of named fields.
pub struct Instance {
    class: Arc<Class>,
    fields: Mutex<BTreeMap<String, Value>>,
}

impl Instance {
    pub fn class(&self) -> &Arc<Class> { &self.class }

    pub fn get(&self, field: &str) -> Option<Value> {
        self.fields.lock().get(field).cloned()
    }

    pub fn set(&self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.lock().insert(field.into(), value)
    }

    /// Invokes an instance method with this instance as receiver.
    pub fn call(&self, name: &str, args: &[Value], block: Option<&Block>) -> Result<Value, ContractError> {
        let m = self.class.instance_method(name).ok_or_else(|| self.class.undefined(name))?;
        m(Receiver::Instance(self), args, block)
    }

    /// The decorator records of this instance's class.
    pub fn decorator_records(&self) -> HashMap<MethodKey, Arc<DecoratorRecord>> {
        self.class.decorator_records()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class.name())
            .field("fields", &*self.fields.lock())
            .finish()
    }
}
