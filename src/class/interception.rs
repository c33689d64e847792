//! The method interception engine.
//!
//! Runs after every method definition on a [`ClassBuilder`]. When a declaration
//! is pending it captures the method as authored, records its contracts in the
//! class's decorator registry and installs a wrapper under the same name:
//!
//! 1. resolve the decorator record from the registry,
//! 2. validate the positional values (plus the block, if one was given),
//! 3. delegate to the captured original with the real receiver,
//! 4. optionally validate the returned value.

use super::builder::ClassBuilder;
use super::object::{method, Method};
use crate::store::{DecoratorRecord, MethodKey, MethodLevel, SharedRegistry};
use crate::validation::{Contract, ContractError, Validator, ValidatorFactory};
use crate::value::Value;
use parking_lot::Mutex;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Human-readable rendering of a wrapper, logged before installation.
struct WrapperPlan<'a> {
    class: &'a str,
    key: &'a MethodKey,
    arg_contracts: &'a [Contract],
    return_contract: &'a Contract,
}

impl fmt::Display for WrapperPlan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}(", self.class, self.key)?;
        for (i, c) in self.arg_contracts.iter().enumerate() {
            if i > 0 { f.write_str(", ")?; }
            write!(f, "{}", c)?;
        }
        write!(f, ") => {}", self.return_contract)
    }
}

/// Validators built from one specific decorator record.
struct CompiledRecord {
    record: Arc<DecoratorRecord>,
    args: Vec<Validator>,
    returns: Option<Validator>,
}

impl CompiledRecord {
    fn new(record: Arc<DecoratorRecord>, factory: &dyn ValidatorFactory, enforce_return: bool) -> Self {
        let args = record
            .arg_contracts
            .iter()
            .enumerate()
            .map(|(position, contract)| factory.make_validator(contract, position))
            .collect();
        let returns = enforce_return
            .then(|| factory.make_validator(&record.return_contract, record.arg_contracts.len()));
        Self { record, args, returns }
    }
}

/// Everything a wrapper needs besides the record itself.
struct WrapperContext {
    owner: String,
    key: MethodKey,
    registry: SharedRegistry,
    factory: Arc<dyn ValidatorFactory>,
    enforce_return: bool,
}

/// Consumes the pending declaration (if any) for the method just defined as
/// `name` at `level`, and swaps the method for a validating wrapper.
pub(super) fn method_added(body: &mut ClassBuilder, level: MethodLevel, name: &str) -> Result<(), ContractError> {
    // The slot is emptied before anything else so the wrapper installation
    // below can never pick the same declaration up again.
    let Some(declaration) = body.pending.take_first() else {
        return Ok(());
    };
    trace!(class = %body.name, method = name, keyword = %declaration.keyword, "consuming declaration");

    let keyword = declaration.keyword.clone();
    let (arg_contracts, return_contract) = declaration.split(name)?;

    // Past this point the name is rebound; the captured handle is the only way
    // left to reach the authored body.
    let Some(original) = body.methods_mut(level).get(name).cloned() else {
        return Err(ContractError::UndefinedMethod { class: body.name.clone(), method: name.to_string() });
    };

    let key = MethodKey::new(level, name);
    if body.config.emit_wrapper_diagnostics {
        let plan = WrapperPlan {
            class: &body.name,
            key: &key,
            arg_contracts: &arg_contracts,
            return_contract: &return_contract,
        };
        debug!(wrapper = %plan, "installing contract wrapper");
    }

    let registry = body.decorators.get_or_insert_with(SharedRegistry::new).clone();
    registry.set(
        key.clone(),
        DecoratorRecord {
            owner: body.name.clone(),
            keyword,
            arg_contracts,
            return_contract,
            original,
        },
    );

    let wrapper = wrap(WrapperContext {
        owner: body.name.clone(),
        key,
        registry,
        factory: Arc::clone(&body.validators),
        enforce_return: body.config.enforce_return_contract,
    });
    body.methods_mut(level).insert(name.to_string(), wrapper);
    Ok(())
}

/// The generic wrapper shared by every contracted method, whatever its arity.
///
/// Contracts and the original body always come from the record resolved on
/// the current call. Validators are rebuilt only when that record changes.
fn wrap(ctx: WrapperContext) -> Method {
    let seeded = ctx
        .registry
        .get(&ctx.key)
        .map(|record| Arc::new(CompiledRecord::new(record, ctx.factory.as_ref(), ctx.enforce_return)));
    let compiled: Mutex<Option<Arc<CompiledRecord>>> = Mutex::new(seeded);

    method(move |receiver, args, block| {
        let record = ctx.registry.get(&ctx.key).ok_or_else(|| ContractError::MissingDecoratorRecord {
            class: ctx.owner.clone(),
            method: ctx.key.name.clone(),
        })?;
        let current = {
            let mut cached = compiled.lock();
            match cached.as_ref() {
                Some(c) if Arc::ptr_eq(&c.record, &record) => Arc::clone(c),
                _ => {
                    trace!(class = %ctx.owner, method = %ctx.key, "recompiling contracts from replaced record");
                    let fresh = Arc::new(CompiledRecord::new(record, ctx.factory.as_ref(), ctx.enforce_return));
                    *cached = Some(Arc::clone(&fresh));
                    fresh
                }
            }
        };

        // A block counts as one more positional value for validation only.
        let block_value = block.map(|b| Value::Block(b.clone()));
        let values: SmallVec<[&Value; 8]> = args.iter().chain(block_value.as_ref()).collect();
        let nil = Value::Nil;
        for (position, validator) in current.args.iter().enumerate() {
            let value = values.get(position).copied().unwrap_or(&nil);
            validator(&ctx.key.name, value)?;
        }

        let result = (current.record.original)(receiver, args, block)?;

        if let Some(check) = &current.returns {
            check(&ctx.key.name, &result).map_err(ContractError::into_return_violation)?;
        }
        Ok(result)
    })
}
