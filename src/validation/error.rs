//! Defines the error types raised while declaring and calling contracted methods.
use super::contract::Contract;
use crate::value::Value;
use thiserror::Error;

/// Every failure the contract layer can surface.
///
/// Definition-time errors (`MalformedDeclaration`, `UndefinedKeyword`) abort the
/// class being built. Call-time errors propagate to whoever invoked the method;
/// nothing in the wrapper catches them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContractError {
    #[error("It looks like your contract for '{method}' doesn't have a return value. A contract should be written as `Contract arg1, arg2 => return_value`.")]
    MalformedDeclaration { method: String },

    #[error("Contract violation for argument {position} of '{method}': expected {expected}, actual {actual}")]
    ContractViolation { method: String, position: usize, expected: Contract, actual: Value },

    #[error("Contract violation for return value of '{method}': expected {expected}, actual {actual}")]
    ReturnViolation { method: String, expected: Contract, actual: Value },

    #[error("undefined method '{0}' for contract declarations")]
    UndefinedKeyword(String),

    #[error("undefined method '{method}' for {class}")]
    UndefinedMethod { class: String, method: String },

    #[error("no decorator record for '{method}' in {class}")]
    MissingDecoratorRecord { class: String, method: String },

    #[error("{0}")]
    Raised(String),

    #[error("invalid contract configuration: {0}")]
    Config(String),
}

impl ContractError {
    pub fn raised(msg: impl Into<String>) -> Self {
        ContractError::Raised(msg.into())
    }

    /// Re-labels an argument violation produced by a validator as a return-value
    /// violation. Other variants pass through untouched.
    pub fn into_return_violation(self) -> Self {
        match self {
            ContractError::ContractViolation { method, expected, actual, .. } => {
                ContractError::ReturnViolation { method, expected, actual }
            }
            other => other,
        }
    }

    pub fn is_violation(&self) -> bool {
        matches!(self, ContractError::ContractViolation { .. } | ContractError::ReturnViolation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Kind;

    #[test]
    fn test_violation_message_names_position_and_values() {
        let err = ContractError::ContractViolation {
            method: "add".into(),
            position: 1,
            expected: Contract::Kind(Kind::Num),
            actual: Value::from("x"),
        };
        assert_eq!(
            err.to_string(),
            "Contract violation for argument 1 of 'add': expected Num, actual \"x\""
        );
    }

    #[test]
    fn test_malformed_message_mentions_return_clause() {
        let err = ContractError::MalformedDeclaration { method: "add".into() };
        let msg = err.to_string();
        assert!(msg.contains("'add'"));
        assert!(msg.contains("doesn't have a return value"));
    }

    #[test]
    fn test_into_return_violation() {
        let err = ContractError::ContractViolation {
            method: "f".into(),
            position: 2,
            expected: Contract::Any,
            actual: Value::Nil,
        }
        .into_return_violation();
        assert_eq!(
            err,
            ContractError::ReturnViolation { method: "f".into(), expected: Contract::Any, actual: Value::Nil }
        );
        assert!(err.is_violation());
        assert_eq!(ContractError::raised("boom").into_return_violation(), ContractError::raised("boom"));
    }
}
