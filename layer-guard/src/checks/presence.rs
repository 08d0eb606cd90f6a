//! Null and emptiness checks.

use super::Check;
use serde_json::Value;

/// Returns true for `null`, whitespace-only strings and empty arrays or
/// objects. Numbers and booleans are never empty.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// The value must not be `null`.
pub fn not_null() -> Check {
    Check::new("notNull", "'{PropertyName}' must not be null.", |v| !v.is_null())
}

/// The value must be `null`.
pub fn null() -> Check {
    Check::new("null", "'{PropertyName}' must be null.", Value::is_null)
}

/// The value must not be empty (see [`is_empty_value`]).
pub fn not_empty() -> Check {
    Check::new("notEmpty", "'{PropertyName}' must not be empty.", |v| {
        !is_empty_value(v)
    })
}

/// The value must be empty (see [`is_empty_value`]).
pub fn empty() -> Check {
    Check::new("empty", "'{PropertyName}' must be empty.", is_empty_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_null() {
        assert!(not_null().test(&json!("")));
        assert!(not_null().test(&json!(0)));
        assert!(!not_null().test(&json!(null)));
        assert!(null().test(&json!(null)));
        assert!(!null().test(&json!("x")));
    }

    #[test]
    fn test_not_empty() {
        let check = not_empty();
        assert!(!check.test(&json!(null)));
        assert!(!check.test(&json!("")));
        assert!(!check.test(&json!("   ")));
        assert!(!check.test(&json!([])));
        assert!(!check.test(&json!({})));
        assert!(check.test(&json!("a")));
        assert!(check.test(&json!(0)));
        assert!(check.test(&json!(false)));
        assert!(check.test(&json!([1])));
    }

    #[test]
    fn test_empty() {
        assert!(empty().test(&json!("")));
        assert!(!empty().test(&json!("x")));
    }
}
