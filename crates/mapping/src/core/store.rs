//! Insertion-ordered keyed store
//!
//! [`Store`] is the mutable backing map of a lazy object. Nested stores are
//! held behind `Arc`, so cloning a store is shallow and writes through a key
//! path detach only the stores along that path.

use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::{IntoIter, Iter};
use tracing::warn;

use crate::core::path::KeyPath;
use crate::core::value::Value;
use crate::error::LazyMappingError;

/// Keyed store of dynamic values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    entries: IndexMap<String, Value>,
}

impl Store {
    // ==================== Construction ====================

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    // ==================== Direct keys ====================

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or replace a direct key, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove a direct key, keeping the order of the remaining keys
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.entries.iter()
    }

    // ==================== Key paths ====================

    /// Resolve a key path one segment at a time
    ///
    /// Returns `None` when a segment is missing or an intermediate value is
    /// not a store. An empty path resolves to nothing.
    pub fn resolve(&self, path: &KeyPath) -> Option<&Value> {
        let (first, rest) = path.segments().split_first()?;
        let mut current = self.entries.get(first.as_str())?;
        for segment in rest {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Mutable counterpart of [`resolve`](Self::resolve)
    ///
    /// Shared nested stores along the path are detached first. A path that
    /// does not resolve leaves the store untouched.
    pub fn resolve_mut(&mut self, path: &KeyPath) -> Option<&mut Value> {
        self.resolve(path)?;

        let (first, rest) = path.segments().split_first()?;
        let mut current = self.entries.get_mut(first.as_str())?;
        for segment in rest {
            current = match current {
                Value::Object(nested) => Arc::make_mut(nested).entries.get_mut(segment.as_str())?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Write `value` at a key path, creating intermediate stores as needed
    ///
    /// An intermediate that exists but is not a store is replaced by an empty
    /// store. Writing to an empty path is a no-op.
    pub fn assign(&mut self, path: &KeyPath, value: Value) {
        let Some((parents, last)) = path.split_last() else {
            return;
        };

        let mut current = self;
        for segment in parents {
            let slot = current
                .entries
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Arc::default()));
            current = vivify(slot, path, segment);
        }
        current.entries.insert(last.to_owned(), value);
    }

    /// Remove the value at a key path, returning it
    pub fn remove_path(&mut self, path: &KeyPath) -> Option<Value> {
        let (parents, last) = path.split_last()?;
        self.resolve(path)?;

        let mut current = self;
        for segment in parents {
            current = match current.entries.get_mut(segment.as_str())? {
                Value::Object(nested) => Arc::make_mut(nested),
                _ => return None,
            };
        }
        current.entries.shift_remove(last)
    }

    // ==================== Null pruning ====================

    /// Drop null markers: `Null` and the `null_string` sentinel
    ///
    /// Only direct keys are examined unless `nested` is set, in which case
    /// nested stores (including stores inside arrays) are pruned too.
    /// Returns the number of removed entries.
    pub fn prune_null_values(&mut self, null_string: &str, nested: bool) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, value| !is_null_marker(value, null_string));
        let mut removed = before - self.entries.len();

        if nested {
            for value in self.entries.values_mut() {
                removed += prune_nested(value, null_string);
            }
        }
        removed
    }
}

fn vivify<'a>(slot: &'a mut Value, path: &KeyPath, segment: &str) -> &'a mut Store {
    if !slot.is_object() {
        warn!(
            key_path = %path,
            segment,
            found = slot.kind_name(),
            "replacing non-object intermediate value"
        );
        *slot = Value::Object(Arc::default());
    }
    match slot {
        Value::Object(nested) => Arc::make_mut(nested),
        _ => unreachable!("intermediate slot holds an object after vivification"),
    }
}

fn is_null_marker(value: &Value, null_string: &str) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text == null_string,
        _ => false,
    }
}

fn prune_nested(value: &mut Value, null_string: &str) -> usize {
    match value {
        Value::Object(store) => Arc::make_mut(store).prune_null_values(null_string, true),
        Value::Array(items) => items
            .iter_mut()
            .map(|item| prune_nested(item, null_string))
            .sum(),
        _ => 0,
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<serde_json::Map<String, serde_json::Value>> for Store {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        map.into_iter()
            .map(|(key, value)| (key, Value::from(value)))
            .collect()
    }
}

impl TryFrom<serde_json::Value> for Store {
    type Error = LazyMappingError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match json {
            serde_json::Value::Object(map) => Ok(Self::from(map)),
            other => Err(LazyMappingError::custom(format!(
                "Expected a JSON object at the top level, found {}",
                Value::from(other).kind_name()
            ))),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Store {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Store {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries.extend(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
    }
}

impl IntoIterator for Store {
    type Item = (String, Value);
    type IntoIter = IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Store {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
