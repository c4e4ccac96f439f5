//! Mapped objects
//!
//! A [`LazyObject`] owns one [`Store`] and exposes typed access over it. User
//! types wrap a `LazyObject` and implement [`LazyMapping`], usually through
//! the [`lazy_mapping!`](crate::lazy_mapping) macro.

mod engine;
mod mapping;

pub use mapping::LazyMapping;

use tracing::debug;

use crate::core::store::Store;
use crate::error::{LazyMappingError, LazyResult};
use crate::options::MappingOptions;

/// Typed, lazily converting view over an owned store
///
/// Every getter takes `&mut self`: the first typed read of a field converts it
/// and writes the converted value back, so later reads are plain lookups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LazyObject {
    store: Store,
    options: MappingOptions,
}

impl LazyObject {
    /// Wrap `store`, optionally dropping top-level null markers
    pub fn new(store: Store, prune_null_values: bool) -> Self {
        Self::with_options(store, &MappingOptions::pruning(prune_null_values))
    }

    /// Wrap `store` using explicit construction options
    pub fn with_options(mut store: Store, options: &MappingOptions) -> Self {
        if options.prune_null_values {
            let pruned = store.prune_null_values(&options.null_string, options.prune_nested);
            if pruned > 0 {
                debug!(count = pruned, nested = options.prune_nested, "pruned null values");
            }
        }
        Self {
            store,
            options: options.clone(),
        }
    }

    /// Build from a decoded JSON object, pruning null markers
    pub fn from_json(json: serde_json::Value) -> LazyResult<Self> {
        Store::try_from(json).map(|store| Self::new(store, true))
    }

    /// Build from JSON text, pruning null markers
    pub fn from_json_str(text: &str) -> LazyResult<Self> {
        let json: serde_json::Value = serde_json::from_str(text)
            .map_err(|err| LazyMappingError::custom(format!("Invalid JSON payload: {err}")))?;
        Self::from_json(json)
    }

    /// Build one object per store
    pub fn from_array<I>(stores: I, prune_null_values: bool) -> Vec<Self>
    where
        I: IntoIterator<Item = Store>,
    {
        stores
            .into_iter()
            .map(|store| Self::new(store, prune_null_values))
            .collect()
    }

    /// The backing store, with every conversion made so far
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn into_store(self) -> Store {
        self.store
    }

    /// Options this object was built with
    pub fn options(&self) -> &MappingOptions {
        &self.options
    }

    /// Options for objects mapped from nested stores
    ///
    /// Children always prune, using this object's null marker and depth.
    pub(crate) fn child_options(&self) -> MappingOptions {
        MappingOptions {
            prune_null_values: true,
            ..self.options.clone()
        }
    }
}

impl From<Store> for LazyObject {
    fn from(store: Store) -> Self {
        Self::new(store, true)
    }
}
