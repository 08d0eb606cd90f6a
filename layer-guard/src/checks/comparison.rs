//! Equality, ordering and range checks.
//!
//! Equality compares the string forms of both operands (see
//! [`value_to_string`]), so the number `5` equals the string `"5"`. The
//! same rule makes `5` and `5.0` different, since their string forms differ.
//! Ordering uses [`compare_values`]; a value that cannot be ordered against
//! the operand fails the check.

use super::{compare_values, value_to_string, Check};
use crate::error::{GuardError, Result};
use serde_json::Value;
use std::cmp::Ordering;

/// The value's string form must equal `expected`'s.
pub fn equal(expected: impl Into<Value>) -> Check {
    let expected = value_to_string(&expected.into());
    Check::new(
        "equal",
        format!("'{{PropertyName}}' must be equal to '{expected}'."),
        move |v| value_to_string(v) == expected,
    )
}

/// The value's string form must differ from `unexpected`'s.
pub fn not_equal(unexpected: impl Into<Value>) -> Check {
    let unexpected = value_to_string(&unexpected.into());
    Check::new(
        "notEqual",
        format!("'{{PropertyName}}' must not be equal to '{unexpected}'."),
        move |v| value_to_string(v) != unexpected,
    )
}

fn ordering_check<F>(name: &str, phrase: &str, operand: Value, accept: F) -> Check
where
    F: Fn(Ordering) -> bool + Send + Sync + 'static,
{
    let message = format!(
        "'{{PropertyName}}' must be {phrase} '{}'.",
        value_to_string(&operand)
    );
    Check::new(name, message, move |v| {
        v.is_null() || compare_values(v, &operand).map_or(false, &accept)
    })
}

/// The value must be greater than `operand`.
pub fn greater_than(operand: impl Into<Value>) -> Check {
    ordering_check("greaterThan", "greater than", operand.into(), |o| {
        o == Ordering::Greater
    })
}

/// The value must be greater than or equal to `operand`.
pub fn greater_than_or_equal(operand: impl Into<Value>) -> Check {
    ordering_check(
        "greaterThanOrEqual",
        "greater than or equal to",
        operand.into(),
        |o| o != Ordering::Less,
    )
}

/// The value must be less than `operand`.
pub fn less_than(operand: impl Into<Value>) -> Check {
    ordering_check("lessThan", "less than", operand.into(), |o| {
        o == Ordering::Less
    })
}

/// The value must be less than or equal to `operand`.
pub fn less_than_or_equal(operand: impl Into<Value>) -> Check {
    ordering_check(
        "lessThanOrEqual",
        "less than or equal to",
        operand.into(),
        |o| o != Ordering::Greater,
    )
}

/// The value must lie within `from..=to`.
pub fn inclusive_between(from: impl Into<Value>, to: impl Into<Value>) -> Result<Check> {
    let (from, to) = (from.into(), to.into());
    match compare_values(&from, &to) {
        Some(Ordering::Greater) => {
            return Err(GuardError::invalid_parameter(
                "inclusiveBetween",
                format!("'from' ({from}) must not exceed 'to' ({to})"),
            ))
        }
        None => {
            return Err(GuardError::invalid_parameter(
                "inclusiveBetween",
                format!("bounds {from} and {to} are not comparable"),
            ))
        }
        _ => {}
    }

    let message = format!(
        "'{{PropertyName}}' must be between {} and {}.",
        value_to_string(&from),
        value_to_string(&to)
    );
    Ok(Check::new("inclusiveBetween", message, move |v| {
        if v.is_null() {
            return true;
        }
        matches!(
            (compare_values(v, &from), compare_values(v, &to)),
            (Some(Ordering::Greater | Ordering::Equal), Some(Ordering::Less | Ordering::Equal))
        )
    }))
}
