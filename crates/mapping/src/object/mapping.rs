//! User-declared mapped types

use super::LazyObject;
use crate::convert::LazyConvertible;
use crate::core::store::Store;
use crate::core::value::{StoreValue, Value};
use crate::error::LazyResult;
use crate::options::MappingOptions;

/// A type whose fields are read lazily from a wrapped [`LazyObject`]
///
/// Only the three accessors are required; everything else delegates to the
/// wrapped object.
///
/// ```
/// use lazy_mapping::prelude::*;
///
/// lazy_mapping! {
///     /// A user record
///     pub struct User;
/// }
///
/// impl User {
///     pub fn id(&mut self) -> LazyResult<u64> {
///         self.get("id")
///     }
/// }
///
/// let mut user = User::from_json(serde_json::json!({"id": "42"})).unwrap();
/// assert_eq!(user.id().unwrap(), 42);
/// ```
pub trait LazyMapping: Sized + 'static {
    fn from_object(object: LazyObject) -> Self;

    fn object(&self) -> &LazyObject;

    fn object_mut(&mut self) -> &mut LazyObject;

    fn into_object(self) -> LazyObject;

    // ==================== Construction ====================

    fn new(store: Store, prune_null_values: bool) -> Self {
        Self::from_object(LazyObject::new(store, prune_null_values))
    }

    fn with_options(store: Store, options: &MappingOptions) -> Self {
        Self::from_object(LazyObject::with_options(store, options))
    }

    fn from_json(json: serde_json::Value) -> LazyResult<Self> {
        LazyObject::from_json(json).map(Self::from_object)
    }

    fn from_json_str(text: &str) -> LazyResult<Self> {
        LazyObject::from_json_str(text).map(Self::from_object)
    }

    fn from_array<I>(stores: I, prune_null_values: bool) -> Vec<Self>
    where
        I: IntoIterator<Item = Store>,
    {
        LazyObject::from_array(stores, prune_null_values)
            .into_iter()
            .map(Self::from_object)
            .collect()
    }

    // ==================== Field access ====================

    fn value<T: StoreValue>(&mut self, key_path: &str) -> LazyResult<T> {
        self.object_mut().value(key_path)
    }

    fn converted<T, F>(&mut self, key_path: &str, convert: F) -> LazyResult<T>
    where
        T: StoreValue,
        F: FnOnce(Option<&Value>) -> LazyResult<T>,
    {
        self.object_mut().converted(key_path, convert)
    }

    fn get<T: LazyConvertible>(&mut self, key_path: &str) -> LazyResult<T> {
        self.object_mut().get(key_path)
    }

    fn objects<T: LazyMapping>(&mut self, key_path: &str) -> LazyResult<Vec<T>> {
        self.object_mut().objects(key_path)
    }

    fn with_objects<T, R, F>(&mut self, key_path: &str, f: F) -> LazyResult<R>
    where
        T: LazyMapping,
        F: FnOnce(&mut [T]) -> R,
    {
        self.object_mut().with_objects(key_path, f)
    }

    fn set<T: StoreValue>(&mut self, key_path: &str, value: Option<T>) {
        self.object_mut().set(key_path, value);
    }

    fn set_objects<T: LazyMapping>(&mut self, key_path: &str, objects: Vec<T>) {
        self.object_mut().set_objects(key_path, objects);
    }

    fn remove(&mut self, key_path: &str) -> Option<Value> {
        self.object_mut().remove(key_path)
    }

    fn raw(&self, key_path: &str) -> Option<&Value> {
        self.object().raw(key_path)
    }

    fn contains(&self, key_path: &str) -> bool {
        self.object().contains(key_path)
    }

    fn store(&self) -> &Store {
        self.object().store()
    }
}

impl LazyMapping for LazyObject {
    fn from_object(object: LazyObject) -> Self {
        object
    }

    fn object(&self) -> &LazyObject {
        self
    }

    fn object_mut(&mut self) -> &mut LazyObject {
        self
    }

    fn into_object(self) -> LazyObject {
        self
    }
}

/// Declare a newtype over [`LazyObject`] implementing [`LazyMapping`]
///
/// ```
/// use lazy_mapping::lazy_mapping;
///
/// lazy_mapping! {
///     #[derive(Default)]
///     pub struct Item;
/// }
/// ```
#[macro_export]
macro_rules! lazy_mapping {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name($crate::LazyObject);

        impl $crate::LazyMapping for $name {
            fn from_object(object: $crate::LazyObject) -> Self {
                Self(object)
            }

            fn object(&self) -> &$crate::LazyObject {
                &self.0
            }

            fn object_mut(&mut self) -> &mut $crate::LazyObject {
                &mut self.0
            }

            fn into_object(self) -> $crate::LazyObject {
                self.0
            }
        }
    };
}
