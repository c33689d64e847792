//! Custom predicate rule.

use crate::validation::contract::Predicate;
use crate::value::Value;

pub(crate) fn matches(predicate: &Predicate, value: &Value) -> bool {
    predicate.test(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_is_consulted() {
        let even = Predicate::new("Even", |v| v.as_int().is_some_and(|i| i % 2 == 0));
        assert!(matches(&even, &Value::from(4)));
        assert!(!matches(&even, &Value::from(3)));
        assert!(!matches(&even, &Value::from("4")));
    }
}
