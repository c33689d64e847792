//! The validator factory: turns a contract specifier into a callable check.
use super::contract::Contract;
use super::error::ContractError;
use super::rules::{kind, literal, predicate};
use crate::value::Value;

/// A check for one positional value. Invoked with the name of the method being
/// called (for diagnostics) and the value to validate.
pub type Validator = Box<dyn Fn(&str, &Value) -> Result<(), ContractError> + Send + Sync>;

/// Produces validators for the contracts of a declaration.
///
/// The interception engine only talks to this trait; how a contract is checked
/// is entirely up to the implementation.
pub trait ValidatorFactory: Send + Sync {
    /// Builds the validator for `contract`, the `position`-th (0-based) element
    /// of a declaration.
    fn make_validator(&self, contract: &Contract, position: usize) -> Validator;
}

/// The built-in strategies: wildcard, type match, literal equality and custom
/// predicates.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardValidators;

impl StandardValidators {
    pub fn accepts(contract: &Contract, value: &Value) -> bool {
        match contract {
            Contract::Any => true,
            Contract::Kind(k) => kind::matches(*k, value),
            Contract::Exact(expected) => literal::matches(expected, value),
            Contract::Predicate(p) => predicate::matches(p, value),
        }
    }
}

impl ValidatorFactory for StandardValidators {
    fn make_validator(&self, contract: &Contract, position: usize) -> Validator {
        let contract = contract.clone();
        Box::new(move |method, value| {
            if Self::accepts(&contract, value) {
                Ok(())
            } else {
                Err(ContractError::ContractViolation {
                    method: method.to_string(),
                    position,
                    expected: contract.clone(),
                    actual: value.clone(),
                })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Contract::ANY, Value::Nil, true)]
    #[case(Contract::NUM, Value::from(7), true)]
    #[case(Contract::NUM, Value::from("7"), false)]
    #[case(Contract::exact("on"), Value::from("on"), true)]
    #[case(Contract::exact("on"), Value::from("off"), false)]
    #[case(Contract::predicate("Positive", |v| v.as_f64().is_some_and(|x| x > 0.0)), Value::from(2.5), true)]
    #[case(Contract::predicate("Positive", |v| v.as_f64().is_some_and(|x| x > 0.0)), Value::from(-1), false)]
    fn test_standard_strategies(#[case] contract: Contract, #[case] value: Value, #[case] ok: bool) {
        let validator = StandardValidators.make_validator(&contract, 0);
        assert_eq!(validator("m", &value).is_ok(), ok);
    }

    #[test]
    fn test_violation_carries_method_position_contract_and_value() {
        let validator = StandardValidators.make_validator(&Contract::NUM, 1);
        let err = validator("add", &Value::from("x")).unwrap_err();
        assert_eq!(
            err,
            ContractError::ContractViolation {
                method: "add".into(),
                position: 1,
                expected: Contract::NUM,
                actual: Value::from("x"),
            }
        );
    }
}
