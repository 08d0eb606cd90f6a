//! Validation result types.

use super::Severity;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    /// The property the failing rule is bound to
    pub property_name: String,
    /// Rendered failure message
    pub error_message: String,
    /// Optional machine-readable code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Severity resolved for the active layer
    pub severity: Severity,
    /// The value that failed the check
    pub attempted_value: Value,
}

impl ValidationFailure {
    /// Creates a new failure.
    pub fn new(
        property_name: impl Into<String>,
        error_message: impl Into<String>,
        severity: Severity,
        attempted_value: Value,
    ) -> Self {
        Self {
            property_name: property_name.into(),
            error_message: error_message.into(),
            error_code: None,
            severity,
            attempted_value,
        }
    }

    /// Sets the error code.
    pub fn with_error_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error_message)
    }
}

/// The ordered failures produced by one evaluation.
///
/// A result is a value: combining results builds a new one and never touches
/// the inputs. Every query walks the failure list on each call, so nothing
/// can go stale.
///
/// # Examples
///
/// ```rust
/// use layer_guard::core::{Severity, ValidationFailure, ValidationResult};
/// use serde_json::json;
///
/// let api = ValidationResult::new(vec![ValidationFailure::new(
///     "Email",
///     "Email is required.",
///     Severity::Forbidden,
///     json!(""),
/// )]);
/// let entity = ValidationResult::new(vec![ValidationFailure::new(
///     "Phone",
///     "Phone looks wrong.",
///     Severity::NotRecommended,
///     json!("12"),
/// )]);
///
/// let combined = ValidationResult::combine([api, entity]);
/// assert!(!combined.is_valid());
/// assert!(combined.has_forbidden());
/// assert_eq!(combined.by_severity(Severity::NotRecommended).len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationFailure>,
}

impl ValidationResult {
    /// Wraps a list of failures.
    pub fn new(errors: Vec<ValidationFailure>) -> Self {
        Self { errors }
    }

    /// Creates a result without failures.
    pub fn valid() -> Self {
        Self::default()
    }

    /// Returns true if there are no failures.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the failures in evaluation order.
    pub fn errors(&self) -> &[ValidationFailure] {
        &self.errors
    }

    /// Consumes the result and returns its failures.
    pub fn into_errors(self) -> Vec<ValidationFailure> {
        self.errors
    }

    /// Returns true if any failure has the given severity.
    pub fn has_severity(&self, severity: Severity) -> bool {
        self.errors.iter().any(|e| e.severity == severity)
    }

    /// Returns true if any failure is forbidden.
    pub fn has_forbidden(&self) -> bool {
        self.has_severity(Severity::Forbidden)
    }

    /// Returns true if any failure is at the caller's own risk.
    pub fn has_at_own_risk(&self) -> bool {
        self.has_severity(Severity::AtOwnRisk)
    }

    /// Returns true if any failure is not recommended.
    pub fn has_not_recommended(&self) -> bool {
        self.has_severity(Severity::NotRecommended)
    }

    /// Gets all failures of a specific severity.
    pub fn by_severity(&self, severity: Severity) -> Vec<&ValidationFailure> {
        self.errors
            .iter()
            .filter(|e| e.severity == severity)
            .collect()
    }

    /// Gets all failures for a property, matched case-insensitively.
    pub fn errors_for(&self, property: &str) -> Vec<&ValidationFailure> {
        self.errors
            .iter()
            .filter(|e| e.property_name.eq_ignore_ascii_case(property))
            .collect()
    }

    /// Groups failure messages by property name.
    pub fn to_map(&self) -> HashMap<String, Vec<String>> {
        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for error in &self.errors {
            map.entry(error.property_name.clone())
                .or_default()
                .push(error.error_message.clone());
        }
        map
    }

    /// Concatenates results in argument order, keeping each result's
    /// internal order. Duplicates are kept.
    pub fn combine<I>(results: I) -> Self
    where
        I: IntoIterator<Item = ValidationResult>,
    {
        Self {
            errors: results.into_iter().flat_map(|r| r.errors).collect(),
        }
    }

    /// Returns a new result holding this result's failures followed by
    /// `other`'s.
    pub fn merge(&self, other: &ValidationResult) -> Self {
        let mut errors = Vec::with_capacity(self.errors.len() + other.errors.len());
        errors.extend(self.errors.iter().cloned());
        errors.extend(other.errors.iter().cloned());
        Self { errors }
    }

    /// Keeps only the failures for one property.
    pub(crate) fn retain_property(self, property: &str) -> Self {
        Self {
            errors: self
                .errors
                .into_iter()
                .filter(|e| e.property_name.eq_ignore_ascii_case(property))
                .collect(),
        }
    }

    /// Formats the result as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl From<Vec<ValidationFailure>> for ValidationResult {
    fn from(errors: Vec<ValidationFailure>) -> Self {
        Self::new(errors)
    }
}
