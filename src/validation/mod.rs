//! Contract specifiers, the validator factory and the error type.
//!
//! The factory is the only seam between the interception engine and the actual
//! checking strategies; everything in `rules` sits behind it.

pub use self::contract::{Contract, Predicate};
pub use self::error::ContractError;
pub use self::validator::{StandardValidators, Validator, ValidatorFactory};

// --- MODULE DECLARATIONS ---
pub mod contract;
mod error;
mod validator;
mod rules {
    pub mod kind;
    pub mod literal;
    pub mod predicate;
}
