//! Name-based property lookup for the JSON compiler.

use crate::core::PropertyAccessor;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A named, readable property of `T`.
pub struct Property<T> {
    name: &'static str,
    accessor: PropertyAccessor<T>,
}

impl<T> Property<T> {
    /// Creates a property from a getter.
    pub fn new<V, F>(name: &'static str, getter: F) -> Self
    where
        V: Into<Value>,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        Self {
            name,
            accessor: Arc::new(move |owner: &T| -> Value { getter(owner).into() }),
        }
    }

    /// Returns the declared name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns a shared handle to the getter.
    pub fn accessor(&self) -> PropertyAccessor<T> {
        Arc::clone(&self.accessor)
    }
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            accessor: Arc::clone(&self.accessor),
        }
    }
}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property").field("name", &self.name).finish()
    }
}

/// Types whose properties can be bound by name.
///
/// # Examples
///
/// ```rust
/// use layer_guard::json::{Property, Reflect};
///
/// struct Customer {
///     email: String,
///     age: u32,
/// }
///
/// impl Reflect for Customer {
///     fn type_name() -> &'static str {
///         "Customer"
///     }
///
///     fn properties() -> Vec<Property<Self>> {
///         vec![
///             Property::new("Email", |c: &Customer| c.email.clone()),
///             Property::new("Age", |c: &Customer| c.age),
///         ]
///     }
/// }
///
/// assert!(Customer::property("email").is_some());
/// assert!(Customer::property("phone").is_none());
/// ```
pub trait Reflect: Sized + 'static {
    /// Name used in error messages and matched against the document's `type`.
    fn type_name() -> &'static str;

    /// Every property that rules may be bound to.
    fn properties() -> Vec<Property<Self>>;

    /// Looks up a property by case-insensitive name.
    fn property(name: &str) -> Option<Property<Self>> {
        Self::properties()
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }
}
