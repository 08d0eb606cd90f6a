//! Validators for typed instances.
//!
//! A [`Validator`] owns the ordered rules for one type. It is immutable once
//! built and can be shared across threads and reused for any number of
//! concurrent evaluations.

use super::entry::PropertyAccessor;
use super::rule::{Rule, RuleBuilder};
use super::{
    CascadeMode, TypeLayers, ValidationContext, ValidationFailure, ValidationResult,
    ValidatorConfig,
};
use crate::error::{GuardError, Result};
use crate::logging::LogConfig;
use crate::perf_debug;
use serde_json::Value;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

/// The contract every validator of `T` fulfils.
///
/// Implementors only have to provide [`validate_with`](Self::validate_with).
/// The default [`validate_property_with`](Self::validate_property_with) runs
/// the full validation and keeps the failures of the requested property;
/// [`Validator`] overrides it so that other rules never execute.
pub trait InstanceValidator<T>: Send + Sync {
    /// Validates `instance` under `ctx`.
    fn validate_with(&self, instance: &T, ctx: &ValidationContext) -> ValidationResult;

    /// Validates `instance` with an empty context.
    fn validate(&self, instance: &T) -> ValidationResult {
        self.validate_with(instance, &ValidationContext::default())
    }

    /// Validates only the rules bound to `property` (case-insensitive).
    fn validate_property_with(
        &self,
        instance: &T,
        property: &str,
        ctx: &ValidationContext,
    ) -> ValidationResult {
        self.validate_with(instance, ctx).retain_property(property)
    }
}

/// Non-generic entry point for callers that hold an untyped instance.
///
/// ```rust
/// use layer_guard::core::{ErasedValidator, ValidationContext, ValueValidator};
/// use layer_guard::error::GuardError;
///
/// # fn main() -> layer_guard::error::Result<()> {
/// let names = ValueValidator::<String>::builder().rule(|r| r.not_empty()).build()?;
/// let erased: &dyn ErasedValidator = &names;
///
/// let err = erased.validate_any(&42_i32, &ValidationContext::new()).unwrap_err();
/// assert!(matches!(err, GuardError::TypeMismatch { .. }));
///
/// let result = erased.validate_any(&String::new(), &ValidationContext::new())?;
/// assert!(!result.is_valid());
/// # Ok(())
/// # }
/// ```
pub trait ErasedValidator: Send + Sync {
    /// Name of the type this validator is bound to.
    fn target_type(&self) -> &'static str;

    /// Validates an untyped instance, failing with
    /// [`GuardError::TypeMismatch`] if it is not of the bound type.
    fn validate_any(&self, instance: &dyn Any, ctx: &ValidationContext)
        -> Result<ValidationResult>;

    /// Property-scoped form of [`validate_any`](Self::validate_any).
    fn validate_property_any(
        &self,
        instance: &dyn Any,
        property: &str,
        ctx: &ValidationContext,
    ) -> Result<ValidationResult>;
}

pub(crate) fn downcast<'a, T: 'static>(instance: &'a dyn Any) -> Result<&'a T> {
    instance
        .downcast_ref::<T>()
        .ok_or_else(|| GuardError::type_mismatch(type_name::<T>(), "a value of another type"))
}

/// Ordered rules for one type.
///
/// # Examples
///
/// ```rust
/// use layer_guard::core::{Severity, ValidationContext, Validator};
///
/// struct Customer {
///     email: String,
///     phone: String,
/// }
///
/// # fn main() -> layer_guard::error::Result<()> {
/// let validator = Validator::<Customer>::builder()
///     .rule_for("Email", |c: &Customer| c.email.clone(), |r| {
///         r.not_empty().with_message("Email is required.").email_address()
///     })
///     .rule_for("Phone", |c: &Customer| c.phone.clone(), |r| {
///         r.phone()
///             .with_severity(Severity::AtOwnRisk)
///             .with_layer_severity("entity", Severity::NotRecommended)
///     })
///     .build()?;
///
/// let customer = Customer { email: String::new(), phone: String::new() };
///
/// let result = validator.validate(&customer);
/// assert_eq!(result.errors().len(), 3);
/// assert!(result.has_forbidden());
///
/// let phone = validator.validate_property_with(&customer, "phone", &ValidationContext::for_layer("entity"));
/// assert_eq!(phone.errors().len(), 1);
/// assert_eq!(phone.errors()[0].severity, Severity::NotRecommended);
/// # Ok(())
/// # }
/// ```
pub struct Validator<T> {
    type_name: &'static str,
    rules: Vec<Rule<T>>,
    cascade: CascadeMode,
    layer: Option<String>,
    log: LogConfig,
}

impl<T: 'static> Validator<T> {
    /// Creates a new builder.
    pub fn builder() -> ValidatorBuilder<T> {
        ValidatorBuilder::new()
    }

    /// Returns the name of the bound type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the rules in registration order.
    pub fn rules(&self) -> &[Rule<T>] {
        &self.rules
    }

    /// Returns the validator-level cascade mode.
    pub fn cascade_mode(&self) -> CascadeMode {
        self.cascade
    }

    /// Returns the layer used when a call does not supply one.
    pub fn layer(&self) -> Option<&str> {
        self.layer.as_deref()
    }

    /// Validates `instance` with an empty context.
    pub fn validate(&self, instance: &T) -> ValidationResult {
        self.validate_with(instance, &ValidationContext::default())
    }

    /// Validates `instance` under `ctx`.
    #[instrument(skip_all, fields(validator.type_name = self.type_name, validator.rules = self.rules.len()))]
    pub fn validate_with(&self, instance: &T, ctx: &ValidationContext) -> ValidationResult {
        self.run(instance, ctx, None)
    }

    /// Validates only the rules bound to `property`, with an empty context.
    pub fn validate_property(&self, instance: &T, property: &str) -> ValidationResult {
        self.validate_property_with(instance, property, &ValidationContext::default())
    }

    /// Validates only the rules bound to `property` (case-insensitive).
    /// Other rules are not executed.
    #[instrument(skip_all, fields(validator.type_name = self.type_name, property = property))]
    pub fn validate_property_with(
        &self,
        instance: &T,
        property: &str,
        ctx: &ValidationContext,
    ) -> ValidationResult {
        self.run(instance, ctx, Some(property))
    }

    fn run(&self, instance: &T, ctx: &ValidationContext, only: Option<&str>) -> ValidationResult {
        let layer = ctx.layer().or(self.layer.as_deref());
        let mut failures: Vec<ValidationFailure> = Vec::new();

        for rule in &self.rules {
            if only.is_some_and(|property| !rule.matches_property(property)) {
                continue;
            }

            rule.evaluate_into(instance, ctx, layer, &self.log, &mut failures);

            if self.cascade.stops_on_failure() && !failures.is_empty() {
                perf_debug!(
                    self.log,
                    validator.type_name = self.type_name,
                    rule.property = rule.property_name(),
                    "Validator cascade stopped after failing rule"
                );
                break;
            }
        }

        debug!(
            validator.type_name = self.type_name,
            layer = layer.unwrap_or("<none>"),
            failures = failures.len(),
            "Validation completed"
        );
        ValidationResult::new(failures)
    }
}

impl<T: 'static> InstanceValidator<T> for Validator<T> {
    fn validate_with(&self, instance: &T, ctx: &ValidationContext) -> ValidationResult {
        Validator::validate_with(self, instance, ctx)
    }

    fn validate_property_with(
        &self,
        instance: &T,
        property: &str,
        ctx: &ValidationContext,
    ) -> ValidationResult {
        Validator::validate_property_with(self, instance, property, ctx)
    }
}

impl<T: 'static> ErasedValidator for Validator<T> {
    fn target_type(&self) -> &'static str {
        self.type_name
    }

    fn validate_any(
        &self,
        instance: &dyn Any,
        ctx: &ValidationContext,
    ) -> Result<ValidationResult> {
        Ok(self.validate_with(downcast::<T>(instance)?, ctx))
    }

    fn validate_property_any(
        &self,
        instance: &dyn Any,
        property: &str,
        ctx: &ValidationContext,
    ) -> Result<ValidationResult> {
        Ok(self.validate_property_with(downcast::<T>(instance)?, property, ctx))
    }
}

impl<T> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("type_name", &self.type_name)
            .field("rules", &self.rules)
            .field("cascade", &self.cascade)
            .field("layer", &self.layer)
            .finish()
    }
}

/// Builder for constructing [`Validator`] instances.
///
/// Rules are kept in declaration order. Configuration problems in any rule
/// are reported by [`ValidatorBuilder::build`].
pub struct ValidatorBuilder<T> {
    rules: Vec<RuleBuilder<T>>,
    config: ValidatorConfig,
    layer: Option<String>,
    type_layer: Option<String>,
}

impl<T: 'static> ValidatorBuilder<T> {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            config: ValidatorConfig::default(),
            layer: None,
            type_layer: None,
        }
    }

    /// Replaces the configuration.
    pub fn config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the validator-level cascade mode.
    pub fn cascade(mut self, mode: CascadeMode) -> Self {
        self.config.cascade_mode = mode;
        self
    }

    /// Sets the cascade mode of rules that do not set their own.
    pub fn rule_cascade(mut self, mode: CascadeMode) -> Self {
        self.config.rule_cascade_mode = mode;
        self
    }

    /// Fixes the layer used when a call does not supply one.
    pub fn layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = Some(layer.into());
        self
    }

    /// Resolves the default layer of `T` from a registry. An explicit
    /// [`layer`](Self::layer) takes precedence.
    pub fn type_layers(mut self, layers: &TypeLayers) -> Self {
        self.type_layer = layers.resolve::<T>().map(str::to_string);
        self
    }

    /// Declares a rule for the property read by `accessor`.
    pub fn rule_for<V, A, F>(self, property: impl Into<String>, accessor: A, configure: F) -> Self
    where
        V: Into<Value>,
        A: Fn(&T) -> V + Send + Sync + 'static,
        F: FnOnce(RuleBuilder<T>) -> RuleBuilder<T>,
    {
        let accessor: PropertyAccessor<T> = Arc::new(move |owner: &T| -> Value { accessor(owner).into() });
        self.rule(configure(RuleBuilder::new(property, accessor)))
    }

    /// Adds an already configured rule builder.
    pub fn rule(mut self, rule: RuleBuilder<T>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Builds the validator, failing on the first misconfigured rule.
    pub fn build(self) -> Result<Validator<T>> {
        let default_cascade = self.config.rule_cascade_mode;
        let rules = self
            .rules
            .into_iter()
            .map(|rule| rule.finish(default_cascade))
            .collect::<Result<Vec<_>>>()?;

        let validator = Validator {
            type_name: type_name::<T>(),
            rules,
            cascade: self.config.cascade_mode,
            layer: self.layer.or(self.type_layer),
            log: self.config.log,
        };

        debug!(
            validator.type_name = validator.type_name,
            validator.rules = validator.rules.len(),
            validator.layer = validator.layer.as_deref().unwrap_or("<none>"),
            "Validator built"
        );
        Ok(validator)
    }
}

impl<T: 'static> Default for ValidatorBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ValidatorBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorBuilder")
            .field("rules", &self.rules)
            .field("config", &self.config)
            .field("layer", &self.layer)
            .field("type_layer", &self.type_layer)
            .finish()
    }
}
