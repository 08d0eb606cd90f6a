//! Length checks for strings and arrays.

use super::Check;
use crate::error::{GuardError, Result};
use serde_json::Value;

/// Character count of a string or element count of an array. Other values
/// have no length and pass every length check.
pub fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// At most `max` characters.
pub fn max_length(max: usize) -> Check {
    Check::new(
        "maxLength",
        format!("The length of '{{PropertyName}}' must be {max} characters or fewer."),
        move |v| length_of(v).map_or(true, |len| len <= max),
    )
}

/// At least `min` characters.
pub fn min_length(min: usize) -> Check {
    Check::new(
        "minLength",
        format!("The length of '{{PropertyName}}' must be at least {min} characters."),
        move |v| length_of(v).map_or(true, |len| len >= min),
    )
}

/// Between `min` and `max` characters, inclusive.
pub fn length(min: usize, max: usize) -> Result<Check> {
    if min > max {
        return Err(GuardError::invalid_parameter(
            "length",
            format!("min ({min}) must not exceed max ({max})"),
        ));
    }
    Ok(Check::new(
        "length",
        format!("'{{PropertyName}}' must be between {min} and {max} characters."),
        move |v| length_of(v).map_or(true, |len| (min..=max).contains(&len)),
    ))
}
