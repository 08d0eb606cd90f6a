//! Validators for standalone values.
//!
//! A [`ValueValidator`] validates a bare value instead of a property of an
//! instance. The value is its own owner, so gates and `must_with` predicates
//! receive the value itself.

use super::rule::RuleBuilder;
use super::validator::{downcast, ErasedValidator, InstanceValidator, Validator, ValidatorBuilder};
use super::{CascadeMode, TypeLayers, ValidationContext, ValidationResult, ValidatorConfig};
use crate::error::Result;
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Property name used in failures of value rules declared without a name.
pub const DEFAULT_VALUE_NAME: &str = "Value";

/// Ordered rules for a standalone value of type `V`.
///
/// # Examples
///
/// ```rust
/// use layer_guard::core::{Severity, ValueValidator};
///
/// # fn main() -> layer_guard::error::Result<()> {
/// let validator = ValueValidator::<String>::builder()
///     .rule(|r| r.not_empty().max_length(5).with_severity(Severity::NotRecommended))
///     .build()?;
///
/// let result = validator.validate(&"too long".to_string());
/// assert_eq!(result.errors().len(), 1);
/// assert_eq!(result.errors()[0].property_name, "Value");
/// assert!(!result.has_forbidden());
/// # Ok(())
/// # }
/// ```
pub struct ValueValidator<V> {
    inner: Validator<V>,
}

impl<V> ValueValidator<V>
where
    V: Clone + Into<Value> + 'static,
{
    /// Creates a new builder.
    pub fn builder() -> ValueValidatorBuilder<V> {
        ValueValidatorBuilder::new()
    }

    /// Validates `value` with an empty context.
    pub fn validate(&self, value: &V) -> ValidationResult {
        self.inner.validate(value)
    }

    /// Validates `value` under `ctx`.
    pub fn validate_with(&self, value: &V, ctx: &ValidationContext) -> ValidationResult {
        self.inner.validate_with(value, ctx)
    }

    /// Validates only the rules declared under `name`.
    pub fn validate_property(&self, value: &V, name: &str) -> ValidationResult {
        self.inner.validate_property(value, name)
    }

    /// Validates only the rules declared under `name`, under `ctx`.
    pub fn validate_property_with(
        &self,
        value: &V,
        name: &str,
        ctx: &ValidationContext,
    ) -> ValidationResult {
        self.inner.validate_property_with(value, name, ctx)
    }

    /// Returns the underlying validator.
    pub fn as_validator(&self) -> &Validator<V> {
        &self.inner
    }
}

impl<V> InstanceValidator<V> for ValueValidator<V>
where
    V: Clone + Into<Value> + 'static,
{
    fn validate_with(&self, value: &V, ctx: &ValidationContext) -> ValidationResult {
        self.inner.validate_with(value, ctx)
    }

    fn validate_property_with(
        &self,
        value: &V,
        name: &str,
        ctx: &ValidationContext,
    ) -> ValidationResult {
        self.inner.validate_property_with(value, name, ctx)
    }
}

impl<V> ErasedValidator for ValueValidator<V>
where
    V: Clone + Into<Value> + 'static,
{
    fn target_type(&self) -> &'static str {
        self.inner.type_name()
    }

    fn validate_any(
        &self,
        instance: &dyn Any,
        ctx: &ValidationContext,
    ) -> Result<ValidationResult> {
        Ok(self.validate_with(downcast::<V>(instance)?, ctx))
    }

    fn validate_property_any(
        &self,
        instance: &dyn Any,
        name: &str,
        ctx: &ValidationContext,
    ) -> Result<ValidationResult> {
        Ok(self.validate_property_with(downcast::<V>(instance)?, name, ctx))
    }
}

impl<V> fmt::Debug for ValueValidator<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueValidator")
            .field("inner", &self.inner)
            .finish()
    }
}

/// Builder for [`ValueValidator`].
pub struct ValueValidatorBuilder<V> {
    inner: ValidatorBuilder<V>,
}

impl<V> ValueValidatorBuilder<V>
where
    V: Clone + Into<Value> + 'static,
{
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self {
            inner: ValidatorBuilder::new(),
        }
    }

    /// Declares a rule on the value, reported as `"Value"`.
    pub fn rule<F>(self, configure: F) -> Self
    where
        F: FnOnce(RuleBuilder<V>) -> RuleBuilder<V>,
    {
        self.rule_named(DEFAULT_VALUE_NAME, configure)
    }

    /// Declares a rule on the value, reported under `name`.
    pub fn rule_named<F>(self, name: impl Into<String>, configure: F) -> Self
    where
        F: FnOnce(RuleBuilder<V>) -> RuleBuilder<V>,
    {
        let rule = configure(RuleBuilder::new(
            name,
            Arc::new(|value: &V| -> Value { value.clone().into() }),
        ));
        Self {
            inner: self.inner.rule(rule),
        }
    }

    /// Replaces the configuration.
    pub fn config(self, config: ValidatorConfig) -> Self {
        Self {
            inner: self.inner.config(config),
        }
    }

    /// Sets the validator-level cascade mode.
    pub fn cascade(self, mode: CascadeMode) -> Self {
        Self {
            inner: self.inner.cascade(mode),
        }
    }

    /// Sets the cascade mode of rules that do not set their own.
    pub fn rule_cascade(self, mode: CascadeMode) -> Self {
        Self {
            inner: self.inner.rule_cascade(mode),
        }
    }

    /// Fixes the layer used when a call does not supply one.
    pub fn layer(self, layer: impl Into<String>) -> Self {
        Self {
            inner: self.inner.layer(layer),
        }
    }

    /// Resolves the default layer of `V` from a registry.
    pub fn type_layers(self, layers: &TypeLayers) -> Self {
        Self {
            inner: self.inner.type_layers(layers),
        }
    }

    /// Builds the validator.
    pub fn build(self) -> Result<ValueValidator<V>> {
        Ok(ValueValidator {
            inner: self.inner.build()?,
        })
    }
}

impl<V> Default for ValueValidatorBuilder<V>
where
    V: Clone + Into<Value> + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for ValueValidatorBuilder<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueValidatorBuilder")
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;
    use crate::error::GuardError;
    use serde_json::json;

    #[test]
    fn test_value_is_its_own_owner() {
        let validator = ValueValidator::<i64>::builder()
            .rule(|r| {
                r.when(|v: &i64| *v >= 0)
                    .less_than(100)
                    .must_with(|owner: &i64, value| value == &json!(*owner))
            })
            .build()
            .unwrap();

        assert!(validator.validate(&-500).is_valid());
        let result = validator.validate(&150);
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].attempted_value, json!(150));
    }

    #[test]
    fn test_named_rules_are_scoped() {
        let validator = ValueValidator::<String>::builder()
            .rule_named("Format", |r| r.email_address())
            .rule_named("Size", |r| r.max_length(3))
            .build()
            .unwrap();

        let value = "someone".to_string();
        assert_eq!(validator.validate(&value).errors().len(), 2);

        let scoped = validator.validate_property(&value, "size");
        assert_eq!(scoped.errors().len(), 1);
        assert_eq!(scoped.errors()[0].property_name, "Size");
    }

    #[test]
    fn test_layer_applies_to_values() {
        let validator = ValueValidator::<String>::builder()
            .layer("dto")
            .rule(|r| {
                r.not_empty()
                    .with_severity(Severity::AtOwnRisk)
                    .with_layer_severity("dto", Severity::NotRecommended)
            })
            .build()
            .unwrap();

        let result = validator.validate(&String::new());
        assert_eq!(result.errors()[0].severity, Severity::NotRecommended);
    }

    #[test]
    fn test_erased_value_validator() {
        let validator = ValueValidator::<String>::builder()
            .rule(|r| r.not_empty())
            .build()
            .unwrap();
        let erased: &dyn ErasedValidator = &validator;

        assert!(erased.target_type().ends_with("String"));
        let err = erased
            .validate_any(&42_i32, &ValidationContext::new())
            .unwrap_err();
        assert!(matches!(err, GuardError::TypeMismatch { .. }));

        let result = erased
            .validate_property_any(&"x".to_string(), "value", &ValidationContext::new())
            .unwrap();
        assert!(result.is_valid());
    }
}
