//! Type-level default layers.
//!
//! A type can declare the layer it belongs to (`"api"`, `"dto"`,
//! `"entity"`, ...). Types without a declaration inherit the layer of their
//! registered base type. Validators resolve the layer once, when they are
//! built, and use it whenever a call does not name a layer explicitly.

use std::any::{type_name, TypeId};
use std::collections::{HashMap, HashSet};

/// Registry of declared layers and base-type links.
///
/// # Examples
///
/// ```rust
/// use layer_guard::core::TypeLayers;
///
/// struct Entity;
/// struct Customer;
/// struct Order;
///
/// let layers = TypeLayers::new()
///     .declare::<Entity>("entity")
///     .inherits::<Customer, Entity>()
///     .declare::<Order>("api")
///     .inherits::<Order, Entity>();
///
/// assert_eq!(layers.resolve::<Customer>(), Some("entity"));
/// // a declaration on the type itself wins over its base
/// assert_eq!(layers.resolve::<Order>(), Some("api"));
/// assert_eq!(layers.resolve::<String>(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeLayers {
    layers: HashMap<TypeId, String>,
    bases: HashMap<TypeId, TypeId>,
    names: HashMap<TypeId, &'static str>,
}

impl TypeLayers {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the layer of `T`.
    pub fn declare<T: 'static>(mut self, layer: impl Into<String>) -> Self {
        self.remember::<T>();
        self.layers.insert(TypeId::of::<T>(), layer.into());
        self
    }

    /// Registers `Base` as the base type of `Child`.
    pub fn inherits<Child: 'static, Base: 'static>(mut self) -> Self {
        self.remember::<Child>();
        self.remember::<Base>();
        self.bases.insert(TypeId::of::<Child>(), TypeId::of::<Base>());
        self
    }

    /// Resolves the layer of `T`, walking base types until a declaration is
    /// found.
    pub fn resolve<T: 'static>(&self) -> Option<&str> {
        self.resolve_id(TypeId::of::<T>())
    }

    /// Resolves the layer for a type id.
    pub fn resolve_id(&self, id: TypeId) -> Option<&str> {
        let mut visited = HashSet::new();
        let mut current = id;

        loop {
            if let Some(layer) = self.layers.get(&current) {
                return Some(layer.as_str());
            }
            if !visited.insert(current) {
                tracing::warn!(
                    type_name = self.names.get(&current).copied().unwrap_or("<unknown>"),
                    "Cycle in type layer inheritance"
                );
                return None;
            }
            current = *self.bases.get(&current)?;
        }
    }

    fn remember<T: 'static>(&mut self) {
        self.names.insert(TypeId::of::<T>(), type_name::<T>());
    }
}
