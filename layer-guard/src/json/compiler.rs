//! Compiles rule-set documents into validators.
//!
//! Every definition becomes a check on a [`RuleBuilder`], exactly as if it
//! had been written with the fluent API, so both paths share one evaluation
//! code path. All configuration problems are reported here, before a
//! validator exists.

use super::document::{RuleDefinition, RuleSetDocument};
use super::reflect::Reflect;
use super::registry::ValidatorTypeRegistry;
use crate::core::{RuleBuilder, Severity, TypeLayers, Validator, ValidatorConfig};
use crate::error::{GuardError, Result};
use serde_json::Map;
use tracing::{debug, info, instrument, warn};

/// Compiles documents against one registry and configuration.
///
/// # Examples
///
/// ```rust
/// use layer_guard::core::{Severity, ValidationContext};
/// use layer_guard::json::{Property, Reflect, RuleSetCompiler};
///
/// struct Customer {
///     phone: String,
/// }
///
/// impl Reflect for Customer {
///     fn type_name() -> &'static str {
///         "Customer"
///     }
///
///     fn properties() -> Vec<Property<Self>> {
///         vec![Property::new("Phone", |c: &Customer| c.phone.clone())]
///     }
/// }
///
/// # fn main() -> layer_guard::error::Result<()> {
/// let validator = RuleSetCompiler::new().compile_str::<Customer>(r#"{
///     "type": "Customer",
///     "properties": {
///         "phone": { "rules": [{
///             "validator": "phone",
///             "message": "'{PropertyName}' looks wrong.",
///             "severity": "atOwnRisk",
///             "layers": { "entity": "notRecommended" }
///         }] }
///     }
/// }"#)?;
///
/// let customer = Customer { phone: String::new() };
/// let entity = validator.validate_with(&customer, &ValidationContext::for_layer("entity"));
/// assert_eq!(entity.errors()[0].severity, Severity::NotRecommended);
/// assert_eq!(entity.errors()[0].error_message, "'Phone' looks wrong.");
/// assert_eq!(validator.validate(&customer).errors()[0].severity, Severity::AtOwnRisk);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleSetCompiler {
    registry: ValidatorTypeRegistry,
    config: ValidatorConfig,
    layers: Option<TypeLayers>,
}

impl RuleSetCompiler {
    /// Creates a compiler with the built-in registry and default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `registry` to resolve validator names.
    pub fn with_registry(mut self, registry: ValidatorTypeRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Uses `config` for compiled validators.
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolves the default layer of compiled types from `layers`.
    pub fn with_type_layers(mut self, layers: TypeLayers) -> Self {
        self.layers = Some(layers);
        self
    }

    /// Returns the registry.
    pub fn registry(&self) -> &ValidatorTypeRegistry {
        &self.registry
    }

    /// Returns the registry for registering custom checks.
    pub fn registry_mut(&mut self) -> &mut ValidatorTypeRegistry {
        &mut self.registry
    }

    /// Parses and compiles a JSON document.
    pub fn compile_str<T: Reflect>(&self, json: &str) -> Result<Validator<T>> {
        let document = RuleSetDocument::from_json_str(json)?;
        self.compile(&document)
    }

    /// Compiles `document` into a validator for `T`.
    #[instrument(skip_all, fields(rules.target = T::type_name(), rules.document = %document.type_name))]
    pub fn compile<T: Reflect>(&self, document: &RuleSetDocument) -> Result<Validator<T>> {
        if !document.type_name.eq_ignore_ascii_case(T::type_name()) {
            warn!(
                rules.document = %document.type_name,
                rules.target = T::type_name(),
                "Rule set document type does not match target type"
            );
        }

        let mut builder = Validator::<T>::builder().config(self.config.clone());
        if let Some(layers) = &self.layers {
            builder = builder.type_layers(layers);
        }

        let mut rule_count = 0;
        for (name, property_rules) in document.properties.iter() {
            let property = T::property(name)
                .ok_or_else(|| GuardError::property_not_found(T::type_name(), name))?;

            let mut rule = RuleBuilder::new(property.name(), property.accessor());
            for definition in &property_rules.rules {
                rule = self.apply(rule, property.name(), definition)?;
                rule_count += 1;
            }

            debug!(
                property = property.name(),
                rules = property_rules.rules.len(),
                "Compiled property rules"
            );
            builder = builder.rule(rule);
        }

        let validator = builder.build()?;
        info!(
            rules.target = T::type_name(),
            properties = document.properties.len(),
            rules = rule_count,
            "Compiled rule set"
        );
        Ok(validator)
    }

    fn apply<T: Reflect>(
        &self,
        rule: RuleBuilder<T>,
        property: &str,
        definition: &RuleDefinition,
    ) -> Result<RuleBuilder<T>> {
        let factory = self
            .registry
            .get(&definition.validator)
            .ok_or_else(|| GuardError::UnknownValidatorType {
                property: property.to_string(),
                name: definition.validator.clone(),
            })?;

        let empty = Map::new();
        let check = factory(definition.params.as_ref().unwrap_or(&empty))?;

        let mut rule = rule.check(check).with_message(definition.message.as_str());

        if let Some(severity) = &definition.severity {
            rule = rule.with_severity(severity.parse::<Severity>()?);
        }
        if let Some(code) = &definition.error_code {
            rule = rule.with_error_code(code.as_str());
        }
        if let Some(layers) = &definition.layers {
            for (layer, severity) in layers {
                if layer.trim().is_empty() {
                    return Err(GuardError::MissingArgument(format!(
                        "layer name in rule '{}' on property '{property}'",
                        definition.validator
                    )));
                }
                rule = rule.with_layer_severity(layer.as_str(), severity.parse::<Severity>()?);
            }
        }

        Ok(rule)
    }
}

/// Compiles `document` with a registry and configuration.
pub fn compile<T: Reflect>(
    document: &RuleSetDocument,
    registry: &ValidatorTypeRegistry,
    config: &ValidatorConfig,
) -> Result<Validator<T>> {
    RuleSetCompiler::new()
        .with_registry(registry.clone())
        .with_config(config.clone())
        .compile(document)
}
