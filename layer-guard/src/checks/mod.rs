//! Built-in checks.
//!
//! A [`Check`] is a named, reusable predicate over a single value together
//! with the default message used when it fails. Both compilation paths share
//! these constructors: the fluent [`RuleBuilder`](crate::core::RuleBuilder)
//! calls them directly and the JSON
//! [`ValidatorTypeRegistry`](crate::json::ValidatorTypeRegistry) calls them
//! from its factories after reading the rule's `params`.
//!
//! ## Available Checks
//!
//! | Module | Checks |
//! |---|---|
//! | [`presence`] | `not_null`, `null`, `not_empty`, `empty` |
//! | [`length`] | `max_length`, `min_length`, `length` |
//! | [`format`] | `email`, `phone`, `matches` |
//! | [`comparison`] | `equal`, `not_equal`, `greater_than`, `greater_than_or_equal`, `less_than`, `less_than_or_equal`, `inclusive_between` |
//!
//! Apart from the presence checks, every check passes on JSON `null`; pair
//! it with `not_null`/`not_empty` to require a value.

use serde_json::{Number, Value};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

pub mod comparison;
pub mod format;
pub mod length;
pub mod presence;

pub use comparison::{
    equal, greater_than, greater_than_or_equal, inclusive_between, less_than, less_than_or_equal,
    not_equal,
};
pub use format::{email, matches, phone};
pub use length::{length, max_length, min_length};
pub use presence::{empty, not_empty, not_null, null};

/// A predicate over one value. Returns true when the value is valid.
pub type CheckPredicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A named predicate plus its default failure message.
#[derive(Clone)]
pub struct Check {
    name: String,
    default_message: String,
    predicate: CheckPredicate,
}

impl Check {
    /// Creates a check from a predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use layer_guard::checks::Check;
    /// use serde_json::json;
    ///
    /// let even = Check::new("even", "'{PropertyName}' must be even.", |v| {
    ///     v.as_i64().map_or(true, |n| n % 2 == 0)
    /// });
    /// assert!(even.test(&json!(4)));
    /// assert!(!even.test(&json!(3)));
    /// ```
    pub fn new<F>(name: impl Into<String>, default_message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            default_message: default_message.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Returns the check name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the message template used when no message is configured.
    pub fn default_message(&self) -> &str {
        &self.default_message
    }

    /// Runs the predicate.
    pub fn test(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }

    /// Returns a shared handle to the predicate.
    pub fn predicate(&self) -> CheckPredicate {
        Arc::clone(&self.predicate)
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check")
            .field("name", &self.name)
            .field("default_message", &self.default_message)
            .finish_non_exhaustive()
    }
}

/// Converts a value to the string form used by equality checks, patterns
/// and message placeholders. `null` becomes the empty string and strings are
/// taken verbatim (no quotes).
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Orders two values: numerically when both sides are numbers (or numeric
/// strings facing a number), lexically when both are strings. Anything else
/// is incomparable.
///
/// Integers are compared exactly; floating point is used only when either
/// side is not an integer.
pub fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::String(a), Value::Number(b)) => compare_numbers(&parse_number(a)?, b),
        (Value::Number(a), Value::String(b)) => compare_numbers(a, &parse_number(b)?),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn compare_numbers(a: &Number, b: &Number) -> Option<Ordering> {
    match (integer(a), integer(b)) {
        (Some(a), Some(b)) => Some(a.cmp(&b)),
        _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
    }
}

fn integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

fn parse_number(s: &str) -> Option<Number> {
    let s = s.trim();
    if let Ok(n) = s.parse::<i64>() {
        return Some(Number::from(n));
    }
    if let Ok(n) = s.parse::<u64>() {
        return Some(Number::from(n));
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(&json!(null)), "");
        assert_eq!(value_to_string(&json!("abc")), "abc");
        assert_eq!(value_to_string(&json!(5)), "5");
        assert_eq!(value_to_string(&json!(true)), "true");
    }

    #[test]
    fn test_compare_values() {
        assert_eq!(compare_values(&json!(1), &json!(2.5)), Some(Ordering::Less));
        assert_eq!(compare_values(&json!("b"), &json!("a")), Some(Ordering::Greater));
        assert_eq!(compare_values(&json!("10"), &json!(9)), Some(Ordering::Greater));
        assert_eq!(compare_values(&json!(3), &json!("3")), Some(Ordering::Equal));
        assert_eq!(compare_values(&json!("abc"), &json!(3)), None);
        assert_eq!(compare_values(&json!([1]), &json!(1)), None);
    }

    #[test]
    fn test_compare_values_exact_integers() {
        let below = json!(9_007_199_254_740_992_u64);
        let above = json!(9_007_199_254_740_993_u64);
        assert_eq!(compare_values(&above, &below), Some(Ordering::Greater));
        assert_eq!(compare_values(&json!(u64::MAX), &json!(-1)), Some(Ordering::Greater));
        assert_eq!(
            compare_values(&json!("9007199254740993"), &below),
            Some(Ordering::Greater)
        );
        assert_eq!(compare_values(&json!(2), &json!(2.5)), Some(Ordering::Less));

        assert!(greater_than(9_007_199_254_740_992_u64).test(&above));
        assert!(!less_than_or_equal(9_007_199_254_740_992_u64).test(&above));
        let between = inclusive_between(0, 9_007_199_254_740_992_u64).unwrap();
        assert!(!between.test(&above));
    }

    #[test]
    fn test_check_debug_hides_predicate() {
        let check = not_empty();
        let debug = format!("{check:?}");
        assert!(debug.contains("notEmpty"));
    }
}
