//! Literal-equality rule.

use crate::value::Value;

/// Structural equality, except that integers and floats compare by numeric value
/// (`1` satisfies a literal `1.0`).
pub(crate) fn matches(expected: &Value, value: &Value) -> bool {
    match (expected, value) {
        (Value::Int(i), Value::Float(f)) | (Value::Float(f), Value::Int(i)) => int_equals_float(*i, *f),
        _ => expected == value,
    }
}

/// Exact comparison; no rounding of either side.
fn int_equals_float(i: i64, f: f64) -> bool {
    // `i64::MIN as f64` is exactly -2^63 and `i64::MAX as f64` rounds up to 2^63.
    f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 && f as i64 == i
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_literal_equality() {
        assert!(matches(&Value::from("on"), &Value::from("on")));
        assert!(!matches(&Value::from("on"), &Value::from("off")));
        assert!(!matches(&Value::from("on"), &Value::sym("on")));
    }

    #[rstest]
    #[case(1, 1.0, true)]
    #[case(2, 2.5, false)]
    #[case(-7, -7.0, true)]
    #[case(9_007_199_254_740_992, 9_007_199_254_740_992.0, true)]
    #[case(9_007_199_254_740_993, 9_007_199_254_740_992.0, false)]
    #[case(i64::MIN, -9_223_372_036_854_775_808.0, true)]
    #[case(i64::MAX, 9_223_372_036_854_775_808.0, false)]
    #[case(0, f64::NAN, false)]
    #[case(0, f64::INFINITY, false)]
    fn test_numeric_literals_cross_kinds(#[case] int: i64, #[case] float: f64, #[case] equal: bool) {
        assert_eq!(matches(&Value::from(int), &Value::from(float)), equal);
        assert_eq!(matches(&Value::from(float), &Value::from(int)), equal);
    }
}
