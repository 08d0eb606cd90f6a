//! Compiled check entries and severity resolution.

use super::{Severity, ValidationContext, ValidationFailure};
use crate::checks::{value_to_string, Check};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Reads the value under test from its owner.
pub type PropertyAccessor<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;

/// A predicate with access to the owner, the value and the active context.
pub type Predicate<T> = Arc<dyn Fn(&T, &Value, &ValidationContext) -> bool + Send + Sync>;

/// A gate over the owner; entries captured under a closed gate are skipped.
pub type Condition<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// One compiled rule step.
///
/// Entries are produced identically by the fluent builder and the JSON
/// compiler, so evaluation never needs to know which path built them.
pub struct CheckEntry<T> {
    name: String,
    predicate: Predicate<T>,
    message: String,
    error_code: Option<String>,
    severity: Severity,
    layer_severities: HashMap<String, Severity>,
    condition: Option<Condition<T>>,
}

impl<T: 'static> CheckEntry<T> {
    /// Creates an entry from a raw predicate with default severity.
    pub fn new(name: impl Into<String>, message: impl Into<String>, predicate: Predicate<T>) -> Self {
        Self {
            name: name.into(),
            predicate,
            message: message.into(),
            error_code: None,
            severity: Severity::default(),
            layer_severities: HashMap::new(),
            condition: None,
        }
    }

    /// Creates an entry from a value-only [`Check`], keeping its default
    /// message.
    pub fn from_check(check: &Check) -> Self {
        let predicate = check.predicate();
        Self::new(
            check.name(),
            check.default_message(),
            Arc::new(move |_: &T, value: &Value, _: &ValidationContext| predicate(value)),
        )
    }

    /// Returns the check name (`notEmpty`, `email`, ...).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the message template.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the error code, if any.
    pub fn error_code(&self) -> Option<&str> {
        self.error_code.as_deref()
    }

    /// Returns the severity used when no layer override applies.
    pub fn default_severity(&self) -> Severity {
        self.severity
    }

    /// Returns the per-layer severity overrides.
    pub fn layer_severities(&self) -> &HashMap<String, Severity> {
        &self.layer_severities
    }

    pub(crate) fn set_message(&mut self, message: String) {
        self.message = message;
    }

    pub(crate) fn set_error_code(&mut self, code: String) {
        self.error_code = Some(code);
    }

    pub(crate) fn set_severity(&mut self, severity: Severity) {
        self.severity = severity;
    }

    pub(crate) fn set_layer_severity(&mut self, layer: String, severity: Severity) {
        self.layer_severities.insert(layer, severity);
    }

    pub(crate) fn set_condition(&mut self, condition: Option<Condition<T>>) {
        self.condition = condition;
    }

    /// Resolves the effective severity for a layer.
    ///
    /// A mapping for `layer` wins; otherwise, including when no layer is
    /// active, the default severity applies.
    ///
    /// ```rust
    /// use layer_guard::checks;
    /// use layer_guard::core::{CheckEntry, Severity};
    ///
    /// let entry = CheckEntry::<String>::from_check(&checks::phone());
    /// assert_eq!(entry.resolve_severity(Some("entity")), Severity::Forbidden);
    /// assert_eq!(entry.resolve_severity(None), Severity::Forbidden);
    /// ```
    pub fn resolve_severity(&self, layer: Option<&str>) -> Severity {
        layer
            .and_then(|layer| self.layer_severities.get(layer))
            .copied()
            .unwrap_or(self.severity)
    }

    /// Returns false when the entry's gate is closed for `owner`.
    pub(crate) fn is_active(&self, owner: &T) -> bool {
        self.condition.as_ref().map_or(true, |gate| gate(owner))
    }

    pub(crate) fn passes(&self, owner: &T, value: &Value, ctx: &ValidationContext) -> bool {
        (self.predicate)(owner, value, ctx)
    }

    /// Builds the failure emitted when this entry rejects `value`.
    pub(crate) fn failure(
        &self,
        property_name: &str,
        value: &Value,
        layer: Option<&str>,
    ) -> ValidationFailure {
        ValidationFailure {
            property_name: property_name.to_string(),
            error_message: render_message(&self.message, property_name, value),
            error_code: self.error_code.clone(),
            severity: self.resolve_severity(layer),
            attempted_value: value.clone(),
        }
    }
}

impl<T> fmt::Debug for CheckEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckEntry")
            .field("name", &self.name)
            .field("message", &self.message)
            .field("error_code", &self.error_code)
            .field("severity", &self.severity)
            .field("layer_severities", &self.layer_severities)
            .field("conditional", &self.condition.is_some())
            .finish()
    }
}

/// Substitutes `{PropertyName}` and `{PropertyValue}` in a message template.
pub fn render_message(template: &str, property_name: &str, value: &Value) -> String {
    if !template.contains('{') {
        return template.to_string();
    }
    template
        .replace("{PropertyName}", property_name)
        .replace("{PropertyValue}", &value_to_string(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks;
    use serde_json::json;

    #[test]
    fn test_layer_override_wins() {
        let mut entry = CheckEntry::<()>::from_check(&checks::phone());
        entry.set_severity(Severity::AtOwnRisk);
        entry.set_layer_severity("entity".to_string(), Severity::NotRecommended);

        assert_eq!(entry.resolve_severity(Some("entity")), Severity::NotRecommended);
        assert_eq!(entry.resolve_severity(Some("api")), Severity::AtOwnRisk);
        assert_eq!(entry.resolve_severity(None), Severity::AtOwnRisk);
    }

    #[test]
    fn test_default_severity_is_forbidden() {
        let entry = CheckEntry::<()>::from_check(&checks::not_empty());
        assert_eq!(entry.default_severity(), Severity::Forbidden);
    }

    #[test]
    fn test_failure_renders_message() {
        let mut entry = CheckEntry::<()>::from_check(&checks::max_length(2));
        entry.set_error_code("TOO_LONG".to_string());
        let failure = entry.failure("Code", &json!("abc"), None);

        assert_eq!(
            failure.error_message,
            "The length of 'Code' must be 2 characters or fewer."
        );
        assert_eq!(failure.error_code.as_deref(), Some("TOO_LONG"));
        assert_eq!(failure.attempted_value, json!("abc"));
        assert_eq!(failure.severity, Severity::Forbidden);
    }

    #[test]
    fn test_render_message_placeholders() {
        assert_eq!(
            render_message("{PropertyName} '{PropertyValue}' is taken.", "User", &json!("bob")),
            "User 'bob' is taken."
        );
        assert_eq!(render_message("plain", "User", &json!(1)), "plain");
    }

    #[test]
    fn test_gate() {
        let mut entry = CheckEntry::<bool>::from_check(&checks::not_null());
        assert!(entry.is_active(&false));
        entry.set_condition(Some(Arc::new(|flag: &bool| *flag)));
        assert!(entry.is_active(&true));
        assert!(!entry.is_active(&false));
    }
}
