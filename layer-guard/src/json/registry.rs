//! Name to check-factory registry used by the JSON compiler.
//!
//! Names are matched case-insensitively. Each registry is an ordinary value,
//! so tests and applications can hold isolated registries side by side.
//! Aliases point at a canonical name and follow later registrations under it.

use crate::checks::{self, Check};
use crate::error::{GuardError, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Builds a [`Check`] from a rule definition's `params`.
pub type CheckFactory = Arc<dyn Fn(&Map<String, Value>) -> Result<Check> + Send + Sync>;

/// Registry of named check factories.
///
/// # Examples
///
/// ```rust
/// use layer_guard::checks::Check;
/// use layer_guard::json::ValidatorTypeRegistry;
/// use serde_json::{json, Map};
///
/// let mut registry = ValidatorTypeRegistry::new();
/// registry.register("uppercase", |_params| {
///     Ok(Check::new("uppercase", "'{PropertyName}' must be upper case.", |v| {
///         v.as_str().map_or(true, |s| s.chars().all(|c| !c.is_lowercase()))
///     }))
/// });
///
/// assert!(registry.contains("UpperCase"));
/// let check = registry.create("UPPERCASE", &Map::new()).unwrap();
/// assert!(!check.test(&json!("abc")));
/// ```
#[derive(Clone)]
pub struct ValidatorTypeRegistry {
    factories: HashMap<String, CheckFactory>,
    aliases: HashMap<String, String>,
}

impl ValidatorTypeRegistry {
    /// Creates a registry holding the built-in checks.
    pub fn new() -> Self {
        Self::with_builtins()
    }

    /// Creates a registry with no checks at all.
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Creates a registry holding the built-in checks and their aliases.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();

        registry.register("notNull", |_| Ok(checks::not_null()));
        registry.register("null", |_| Ok(checks::null()));
        registry.register("notEmpty", |_| Ok(checks::not_empty()));
        registry.register("empty", |_| Ok(checks::empty()));

        registry.register("maxLength", |p| Ok(checks::max_length(usize_param("maxLength", p, "max")?)));
        registry.register("minLength", |p| Ok(checks::min_length(usize_param("minLength", p, "min")?)));
        registry.register("length", |p| {
            checks::length(usize_param("length", p, "min")?, usize_param("length", p, "max")?)
        });

        registry.register("email", |_| Ok(checks::email()));
        registry.register("phone", |_| Ok(checks::phone()));
        registry.register("matches", |p| checks::matches(&string_param("matches", p, "pattern")?));

        registry.register("equal", |p| Ok(checks::equal(value_param("equal", p, "value")?)));
        registry.register("notEqual", |p| Ok(checks::not_equal(value_param("notEqual", p, "value")?)));
        registry.register("greaterThan", |p| {
            Ok(checks::greater_than(value_param("greaterThan", p, "value")?))
        });
        registry.register("greaterThanOrEqual", |p| {
            Ok(checks::greater_than_or_equal(value_param("greaterThanOrEqual", p, "value")?))
        });
        registry.register("lessThan", |p| Ok(checks::less_than(value_param("lessThan", p, "value")?)));
        registry.register("lessThanOrEqual", |p| {
            Ok(checks::less_than_or_equal(value_param("lessThanOrEqual", p, "value")?))
        });
        registry.register("inclusiveBetween", |p| {
            checks::inclusive_between(
                value_param("inclusiveBetween", p, "from")?,
                value_param("inclusiveBetween", p, "to")?,
            )
        });

        registry.alias("emailAddress", "email");
        registry.alias("pattern", "matches");
        registry.alias("regex", "matches");
        registry.alias("maximumLength", "maxLength");
        registry.alias("minimumLength", "minLength");

        registry
    }

    /// Registers a factory under `name`, replacing any earlier registration.
    ///
    /// Aliases of `name` resolve to the new factory. Registering under an
    /// alias detaches it from its target.
    pub fn register<F>(&mut self, name: &str, factory: F) -> &mut Self
    where
        F: Fn(&Map<String, Value>) -> Result<Check> + Send + Sync + 'static,
    {
        let key = name.to_ascii_lowercase();
        let detached = self.aliases.remove(&key).is_some();
        if self.factories.insert(key, Arc::new(factory)).is_some() || detached {
            debug!(validator = name, "Replaced registered validator type");
        }
        self
    }

    fn alias(&mut self, alias: &str, target: &str) {
        self.aliases
            .insert(alias.to_ascii_lowercase(), target.to_ascii_lowercase());
    }

    fn resolve(&self, name: &str) -> String {
        let key = name.to_ascii_lowercase();
        match self.aliases.get(&key) {
            Some(target) => target.clone(),
            None => key,
        }
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(&self.resolve(name))
    }

    /// Returns the factory registered under `name`.
    pub fn get(&self, name: &str) -> Option<CheckFactory> {
        self.factories.get(&self.resolve(name)).cloned()
    }

    /// Builds the check registered under `name`.
    ///
    /// An unregistered name is reported as
    /// [`GuardError::UnknownValidatorType`] with an empty property.
    pub fn create(&self, name: &str, params: &Map<String, Value>) -> Result<Check> {
        let factory = self.get(name).ok_or_else(|| GuardError::UnknownValidatorType {
            property: String::new(),
            name: name.to_string(),
        })?;
        factory(params)
    }

    /// Registered names, lower-cased and sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self
            .factories
            .keys()
            .chain(self.aliases.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }

    /// Number of registered names, aliases included.
    pub fn len(&self) -> usize {
        self.factories.len() + self.aliases.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for ValidatorTypeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for ValidatorTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorTypeRegistry")
            .field("names", &self.names())
            .finish()
    }
}

fn required<'a>(validator: &str, params: &'a Map<String, Value>, name: &str) -> Result<&'a Value> {
    params
        .get(name)
        .filter(|v| !v.is_null())
        .ok_or_else(|| GuardError::invalid_parameter(validator, format!("missing parameter '{name}'")))
}

/// Reads a non-null parameter as-is.
pub fn value_param(validator: &str, params: &Map<String, Value>, name: &str) -> Result<Value> {
    required(validator, params, name).cloned()
}

/// Reads a non-negative integer parameter. Integral strings are accepted.
pub fn usize_param(validator: &str, params: &Map<String, Value>, name: &str) -> Result<usize> {
    let value = required(validator, params, name)?;
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| {
            GuardError::invalid_parameter(
                validator,
                format!("parameter '{name}' must be a non-negative integer, got {value}"),
            )
        })
}

/// Reads a string parameter.
pub fn string_param(validator: &str, params: &Map<String, Value>, name: &str) -> Result<String> {
    match required(validator, params, name)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(GuardError::invalid_parameter(
            validator,
            format!("parameter '{name}' must be a string, got {other}"),
        )),
    }
}
