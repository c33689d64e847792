//! The class body: stage contract declarations, define methods, finish the class.

use super::interception;
use super::object::{Class, Method, Receiver};
use crate::config::ContractConfig;
use crate::declaration::{DeclArg, Declaration, KeywordRegistry, PendingSlot};
use crate::store::{MethodLevel, SharedRegistry};
use crate::validation::{ContractError, StandardValidators, ValidatorFactory};
use crate::value::{Block, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Builds one class.
///
/// Declarations and definitions must happen in source order: a declaration
/// applies to the next method defined on the builder, instance or type level.
pub struct ClassBuilder {
    pub(super) name: String,
    pub(super) superclass: Option<Arc<Class>>,
    pub(super) instance_methods: HashMap<String, Method>,
    pub(super) type_methods: HashMap<String, Method>,
    pub(super) pending: PendingSlot,
    /// Created on the first interception.
    pub(super) decorators: Option<SharedRegistry>,
    pub(super) keywords: Arc<KeywordRegistry>,
    pub(super) validators: Arc<dyn ValidatorFactory>,
    pub(super) config: ContractConfig,
}

impl ClassBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            superclass: None,
            instance_methods: HashMap::new(),
            type_methods: HashMap::new(),
            pending: PendingSlot::new(),
            decorators: None,
            keywords: Arc::new(KeywordRegistry::standard()),
            validators: Arc::new(StandardValidators),
            config: ContractConfig::default(),
        }
    }

    /// A builder whose class inherits `parent`'s methods. The new class gets its
    /// own decorator registry.
    pub fn subclass_of(name: impl Into<String>, parent: &Arc<Class>) -> Self {
        let mut builder = Self::new(name);
        builder.superclass = Some(Arc::clone(parent));
        builder
    }

    pub fn with_keywords(mut self, keywords: Arc<KeywordRegistry>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_validators(mut self, validators: Arc<dyn ValidatorFactory>) -> Self {
        self.validators = validators;
        self
    }

    pub fn with_config(mut self, config: ContractConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn pending_declarations(&self) -> &[Declaration] { self.pending.staged() }

    /// Invokes declaration keyword `keyword`, staging `args` for the next method.
    pub fn declare(&mut self, keyword: &str, args: Vec<DeclArg>) -> Result<&mut Self, ContractError> {
        self.keywords.stage(keyword, &mut self.pending, args)?;
        Ok(self)
    }

    /// Shorthand for the `contract` keyword.
    pub fn contract(&mut self, args: Vec<DeclArg>) -> Result<&mut Self, ContractError> {
        self.declare("contract", args)
    }

    /// Defines an instance method.
    pub fn define<F>(&mut self, name: &str, body: F) -> Result<&mut Self, ContractError>
    where
        F: Fn(Receiver<'_>, &[Value], Option<&Block>) -> Result<Value, ContractError> + Send + Sync + 'static,
    {
        self.define_method(MethodLevel::Instance, name, Arc::new(body))
    }

    /// Defines a type-level method, invoked on the class itself.
    pub fn define_type<F>(&mut self, name: &str, body: F) -> Result<&mut Self, ContractError>
    where
        F: Fn(Receiver<'_>, &[Value], Option<&Block>) -> Result<Value, ContractError> + Send + Sync + 'static,
    {
        self.define_method(MethodLevel::Type, name, Arc::new(body))
    }

    /// Installs `body` under `name` and fires the interception engine for it.
    pub fn define_method(&mut self, level: MethodLevel, name: &str, body: Method) -> Result<&mut Self, ContractError> {
        self.methods_mut(level).insert(name.to_string(), body);
        interception::method_added(self, level, name)?;
        Ok(self)
    }

    /// Finishes the class. Declarations still pending are dropped.
    pub fn build(self) -> Arc<Class> {
        Arc::new(Class {
            name: self.name,
            superclass: self.superclass,
            instance_methods: self.instance_methods,
            type_methods: self.type_methods,
            decorators: self.decorators.unwrap_or_default(),
        })
    }

    pub(super) fn methods_mut(&mut self, level: MethodLevel) -> &mut HashMap<String, Method> {
        match level {
            MethodLevel::Instance => &mut self.instance_methods,
            MethodLevel::Type => &mut self.type_methods,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::returns;
    use crate::validation::Contract;

    #[test]
    fn test_undecorated_methods_are_left_as_authored() {
        let mut b = ClassBuilder::new("Plain");
        b.define("echo", |_, args, _| Ok(args.first().cloned().unwrap_or(Value::Nil))).unwrap();
        let class = b.build();

        assert!(class.decorator_records().is_empty());
        let obj = class.new_instance();
        // No contract, so anything goes.
        assert_eq!(obj.call("echo", &[Value::from("x")], None).unwrap(), Value::from("x"));
    }

    #[test]
    fn test_declare_stages_until_next_definition() {
        let mut b = ClassBuilder::new("Staging");
        b.contract(vec![Contract::NUM.into(), returns(Contract::NUM)]).unwrap();
        assert_eq!(b.pending_declarations().len(), 1);
        b.define("id", |_, args, _| Ok(args[0].clone())).unwrap();
        assert!(b.pending_declarations().is_empty());
    }

    #[test]
    fn test_unknown_keyword_is_undefined() {
        let mut b = ClassBuilder::new("K");
        let err = b.declare("9lives", vec![returns(Contract::ANY)]).err();
        assert_eq!(err, Some(ContractError::UndefinedKeyword("9lives".into())));
        assert!(b.pending_declarations().is_empty());
    }

    #[test]
    fn test_custom_keyword_registry() {
        let mut keywords = KeywordRegistry::standard();
        keywords.register("Typed");
        keywords.register("2Fast");
        let mut b = ClassBuilder::new("K").with_keywords(Arc::new(keywords));

        b.declare("typed", vec![Contract::STR.into(), returns(Contract::STR)]).unwrap();
        b.define("shout", |_, args, _| {
            Ok(Value::from(args[0].as_str().unwrap_or_default().to_uppercase()))
        })
        .unwrap();
        assert!(b.declare("2fast", vec![returns(Contract::ANY)]).is_err());

        let class = b.build();
        let record = class.decorator_record(&crate::store::MethodKey::instance("shout")).unwrap();
        assert_eq!(record.keyword, "typed");
        assert_eq!(class.new_instance().call("shout", &[Value::from("hi")], None).unwrap(), Value::from("HI"));
    }

    #[test]
    fn test_malformed_declaration_leaves_body_unvalidated() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let mut b = ClassBuilder::new("Broken");
        b.contract(vec![Contract::NUM.into(), Contract::NUM.into()]).unwrap();
        let defined = b.define("add", move |_, args, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Value::from(args.len() as i64))
        });
        assert!(defined.is_err());

        // No wrapper was installed: arguments the declaration would reject reach the body.
        let obj = b.build().new_instance();
        let result = obj.call("add", &[Value::from("a"), Value::from("b")], None);
        assert_eq!(result, Ok(Value::from(2)));
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_pending_declarations_are_dropped_at_build() {
        let mut b = ClassBuilder::new("Dangling");
        b.contract(vec![returns(Contract::ANY)]).unwrap();
        let class = b.build();
        assert!(class.decorator_records().is_empty());
    }
}
