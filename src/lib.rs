//! Design-by-contract for dynamically dispatched methods.
//!
//! A contract is staged on a [`ClassBuilder`] immediately before the method it
//! guards is defined. Defining the method captures the authored body, records
//! the contracts in the class's decorator registry, and installs a wrapper that
//! validates every call's arguments (and, by default, its return value) before
//! delegating to the original.

pub mod class;
pub mod config;
pub mod declaration;
pub mod store;
pub mod validation;
pub mod value;

pub use class::{method, Class, ClassBuilder, Instance, Method, Receiver};
pub use config::ContractConfig;
pub use declaration::{returns, DeclArg, Declaration, KeywordRegistry};
pub use store::{DecoratorRecord, MethodKey, MethodLevel};
pub use validation::{Contract, ContractError, Predicate, StandardValidators, Validator, ValidatorFactory};
pub use value::{Block, Kind, Value};
