//! Type-match rule: does the value's runtime kind satisfy the declared kind?

use crate::value::{Kind, Value};

/// `Num` is the only kind that accepts more than one runtime kind.
pub(crate) fn matches(expected: Kind, value: &Value) -> bool {
    match expected {
        Kind::Num => matches!(value, Value::Int(_) | Value::Float(_)),
        other => value.kind() == other,
    }
}
