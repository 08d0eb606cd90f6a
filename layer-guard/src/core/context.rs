//! Validation context for passing runtime information to checks.
//!
//! A context carries the active deployment layer and an open bag of
//! caller-supplied items through one evaluation. It is built per call and is
//! never mutated while a validator runs.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Runtime context for one validation call.
///
/// # Examples
///
/// ```rust
/// use layer_guard::core::ValidationContext;
/// use serde_json::json;
///
/// let ctx = ValidationContext::for_layer("entity").with_item("tenant", json!("acme"));
/// assert_eq!(ctx.layer(), Some("entity"));
/// assert_eq!(ctx.item("tenant"), Some(&json!("acme")));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationContext {
    layer: Option<Arc<str>>,
    items: HashMap<String, Value>,
}

impl ValidationContext {
    /// Creates an empty context with no layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context for the given layer.
    pub fn for_layer(layer: impl Into<Arc<str>>) -> Self {
        Self {
            layer: Some(layer.into()),
            items: HashMap::new(),
        }
    }

    /// Sets the layer, replacing any previous one.
    pub fn with_layer(mut self, layer: impl Into<Arc<str>>) -> Self {
        self.layer = Some(layer.into());
        self
    }

    /// Adds a custom item.
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }

    /// Returns the explicitly requested layer, if any.
    pub fn layer(&self) -> Option<&str> {
        self.layer.as_deref()
    }

    /// Returns a custom item by key.
    pub fn item(&self, key: &str) -> Option<&Value> {
        self.items.get(key)
    }

    /// Returns all custom items.
    pub fn items(&self) -> &HashMap<String, Value> {
        &self.items
    }
}
