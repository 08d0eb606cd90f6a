//! Email, phone and pattern checks.

use super::{value_to_string, Check};
use crate::error::Result;
use crate::security::PatternSecurity;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

// E.164 shape after separators are stripped.
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^\+?[1-9]\d{6,14}$").expect("phone pattern is valid")
});

/// Returns true if `value` looks like an email address.
pub fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Returns true if `value` looks like a phone number. Spaces, dashes, dots
/// and parentheses are ignored.
pub fn is_phone(value: &str) -> bool {
    let digits: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect();
    PHONE_REGEX.is_match(&digits)
}

/// The value must be an email address. `null` passes, `""` does not.
pub fn email() -> Check {
    Check::new(
        "email",
        "'{PropertyName}' is not a valid email address.",
        |v| v.is_null() || is_email(&value_to_string(v)),
    )
}

/// The value must be a phone number. `null` passes, `""` does not.
pub fn phone() -> Check {
    Check::new(
        "phone",
        "'{PropertyName}' is not a valid phone number.",
        |v| v.is_null() || is_phone(&value_to_string(v)),
    )
}

/// The value must contain a match for `pattern`.
///
/// The pattern is validated and compiled up front, so a bad pattern is a
/// configuration error rather than a failing value.
pub fn matches(pattern: &str) -> Result<Check> {
    let regex = PatternSecurity::compile(pattern)?;
    Ok(Check::new(
        "matches",
        "'{PropertyName}' is not in the correct format.",
        move |v: &Value| v.is_null() || regex.is_match(&value_to_string(v)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GuardError;
    use serde_json::json;

    #[test]
    fn test_email() {
        let check = email();
        assert!(check.test(&json!("jane@example.com")));
        assert!(check.test(&json!(null)));
        assert!(!check.test(&json!("")));
        assert!(!check.test(&json!("jane")));
        assert!(!check.test(&json!("@example.com")));
    }

    #[test]
    fn test_phone() {
        let check = phone();
        assert!(check.test(&json!("+1 (555) 123-4567")));
        assert!(!check.test(&json!("0049 30 1234567")));
        assert!(check.test(&json!("5551234567")));
        assert!(!check.test(&json!("")));
        assert!(!check.test(&json!("12")));
        assert!(!check.test(&json!("call me")));
        assert!(check.test(&json!(null)));
    }

    #[test]
    fn test_matches() {
        let check = matches(r"^[A-Z]{2}\d{4}$").unwrap();
        assert!(check.test(&json!("AB1234")));
        assert!(!check.test(&json!("ab1234")));
        assert!(check.test(&json!(null)));

        let numeric = matches(r"^\d+$").unwrap();
        assert!(numeric.test(&json!(42)));
    }

    #[test]
    fn test_matches_bad_pattern() {
        assert!(matches!(
            matches("(unclosed"),
            Err(GuardError::InvalidPattern { .. })
        ));
    }
}
