//! Get/set engine
//!
//! Reads resolve a key path, return the stored value when it already has the
//! requested type, and otherwise convert it and write the result back in
//! place of the raw value.

use tracing::{debug, trace};

use super::{LazyMapping, LazyObject};
use crate::convert::LazyConvertible;
use crate::core::path::KeyPath;
use crate::core::value::{Converted, MappedArray, StoreValue, Value};
use crate::error::{LazyMappingError, LazyResult};

const OBJECT_ARRAY: &str = "Array<Object>";

impl LazyObject {
    fn resolve(&self, path: &KeyPath) -> LazyResult<&Value> {
        self.store
            .resolve(path)
            .ok_or_else(|| LazyMappingError::key_path_not_found(path.as_str()))
    }

    // ==================== Reads ====================

    /// Value at `key_path` as `T`, using only value-preserving casts
    ///
    /// Fails with `KeyPathNotFound` when nothing is stored there and with
    /// `Conversion` when the stored value cannot be cast to `T`.
    pub fn value<T: StoreValue>(&mut self, key_path: &str) -> LazyResult<T> {
        let path = KeyPath::parse(key_path);
        let raw = self.resolve(&path)?;

        if let Some(hit) = T::from_exact(raw) {
            trace!(key_path, target = T::TYPE_NAME, "cache hit");
            return Ok(hit);
        }

        let Some(cast) = T::cast(raw) else {
            return Err(LazyMappingError::conversion(key_path, raw.clone(), T::TYPE_NAME));
        };

        debug!(key_path, target = T::TYPE_NAME, "cast value cached");
        self.store.assign(&path, cast.clone().into_value());
        Ok(cast)
    }

    /// Value at `key_path` as `T`, converting with `convert` on a miss
    ///
    /// Converter errors are returned unchanged and leave the stored value
    /// untouched.
    pub fn converted<T, F>(&mut self, key_path: &str, convert: F) -> LazyResult<T>
    where
        T: StoreValue,
        F: FnOnce(Option<&Value>) -> LazyResult<T>,
    {
        let path = KeyPath::parse(key_path);
        let raw = self.resolve(&path)?;

        if let Some(hit) = T::from_exact(raw) {
            trace!(key_path, target = T::TYPE_NAME, "cache hit");
            return Ok(hit);
        }

        let converted = convert(Some(raw))?;
        debug!(key_path, target = T::TYPE_NAME, "converted value cached");
        self.store.assign(&path, converted.clone().into_value());
        Ok(converted)
    }

    /// Value at `key_path` converted with the registered conversion for `T`
    pub fn get<T: LazyConvertible>(&mut self, key_path: &str) -> LazyResult<T> {
        self.converted(key_path, T::convert)
    }

    /// Sequence of nested stores at `key_path`, mapped to `T`
    ///
    /// The first read builds one `T` per nested store (null markers pruned
    /// with this object's options) and replaces the raw sequence with the
    /// mapped one. Returned items are snapshots: conversions made through
    /// them are not written back. Use [`with_objects`](Self::with_objects)
    /// to convert in place.
    pub fn objects<T: LazyMapping>(&mut self, key_path: &str) -> LazyResult<Vec<T>> {
        let path = KeyPath::parse(key_path);
        match self.cached_objects::<T>(&path, key_path)? {
            Some(mapped) => Ok(mapped.to_vec()),
            None => Err(LazyMappingError::key_path_not_found(key_path)),
        }
    }

    /// Run `f` over the mapped objects at `key_path`, keeping their changes
    ///
    /// Conversions and writes made by `f` land in the cached objects, so
    /// later reads through [`objects`](Self::objects) see them.
    pub fn with_objects<T, R, F>(&mut self, key_path: &str, f: F) -> LazyResult<R>
    where
        T: LazyMapping,
        F: FnOnce(&mut [T]) -> R,
    {
        let path = KeyPath::parse(key_path);
        self.cached_objects::<T>(&path, key_path)?;

        let Some(Value::Converted(Converted::Objects(mapped))) = self.store.resolve_mut(&path) else {
            return Err(LazyMappingError::key_path_not_found(key_path));
        };

        let mut items: Vec<T> = mapped.take_items().into_iter().map(T::from_object).collect();
        let result = f(&mut items);
        mapped.restore_items(items.into_iter().map(LazyMapping::into_object).collect());
        trace!(key_path, target = mapped.type_name(), "mapped objects updated");
        Ok(result)
    }

    /// Mapped array at `key_path`, built and cached for `T` on a miss
    fn cached_objects<T: LazyMapping>(
        &mut self,
        path: &KeyPath,
        key_path: &str,
    ) -> LazyResult<Option<&MappedArray>> {
        let raw = self.resolve(path)?;

        let objects: Option<Vec<LazyObject>> = match raw {
            Value::Converted(Converted::Objects(mapped)) if mapped.holds::<T>() => {
                trace!(key_path, target = mapped.type_name(), "cache hit");
                None
            }
            // Built for another mapped type: keep the backing objects, retag.
            Value::Converted(Converted::Objects(mapped)) => Some(mapped.items().to_vec()),
            _ => {
                let stores = raw
                    .as_array()
                    .and_then(|items| items.iter().map(Value::as_object).collect::<Option<Vec<_>>>())
                    .ok_or_else(|| LazyMappingError::conversion(key_path, raw.clone(), OBJECT_ARRAY))?;
                let options = self.child_options();
                Some(
                    stores
                        .into_iter()
                        .map(|store| LazyObject::with_options(store.clone(), &options))
                        .collect(),
                )
            }
        };

        if let Some(objects) = objects {
            let mapped = MappedArray::new::<T>(objects);
            debug!(
                key_path,
                target = mapped.type_name(),
                count = mapped.len(),
                "mapped object array cached"
            );
            self.store.assign(path, Value::Converted(Converted::Objects(mapped)));
        }
        Ok(self.mapped_at(path))
    }

    fn mapped_at(&self, path: &KeyPath) -> Option<&MappedArray> {
        match self.store.resolve(path)? {
            Value::Converted(Converted::Objects(mapped)) => Some(mapped),
            _ => None,
        }
    }

    // ==================== Writes ====================

    /// Write `value` at `key_path`, or remove the key when `value` is `None`
    pub fn set<T: StoreValue>(&mut self, key_path: &str, value: Option<T>) {
        let path = KeyPath::parse(key_path);
        match value {
            Some(value) => self.store.assign(&path, value.into_value()),
            None => {
                self.store.remove_path(&path);
            }
        }
    }

    /// Write mapped objects at `key_path`
    pub fn set_objects<T: LazyMapping>(&mut self, key_path: &str, objects: Vec<T>) {
        let items = objects.into_iter().map(LazyMapping::into_object).collect();
        let mapped = MappedArray::new::<T>(items);
        self.store
            .assign(&KeyPath::parse(key_path), Value::Converted(Converted::Objects(mapped)));
    }

    /// Remove the value at `key_path`, returning it
    pub fn remove(&mut self, key_path: &str) -> Option<Value> {
        self.store.remove_path(&KeyPath::parse(key_path))
    }

    // ==================== Introspection ====================

    /// Stored representation at `key_path`, without converting
    pub fn raw(&self, key_path: &str) -> Option<&Value> {
        self.store.resolve(&KeyPath::parse(key_path))
    }

    pub fn contains(&self, key_path: &str) -> bool {
        self.raw(key_path).is_some()
    }
}
