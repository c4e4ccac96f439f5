//! Lazy, memoizing typed access over dynamic keyed values
//!
//! A [`LazyObject`] wraps a [`Store`] decoded from an untyped payload. Typed
//! getters resolve a dotted key path, convert the raw value the first time it
//! is read, and write the converted value back so every later read is a plain
//! lookup.
//!
//! ```
//! use lazy_mapping::prelude::*;
//! use url::Url;
//!
//! let mut object = LazyObject::from_json(json!({
//!     "id": "42",
//!     "links": {"home": "https://example.com"},
//!     "deleted_at": null,
//! }))
//! .unwrap();
//!
//! assert_eq!(object.get::<u64>("id").unwrap(), 42);
//! assert_eq!(object.get::<Url>("links.home").unwrap().host_str(), Some("example.com"));
//! assert!(!object.contains("deleted_at"));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod convert;
pub mod core;
pub mod date;
pub mod error;
pub mod object;
pub mod options;

// Re-export core types
pub use crate::core::{Converted, KeyPath, MappedArray, Store, StoreValue, Value};
pub use convert::LazyConvertible;
pub use date::{Date, DateFormat, DateFormattable, DateStrategy};
pub use error::{LazyMappingError, LazyResult, LazyResultExt};
pub use object::{LazyMapping, LazyObject};
pub use options::MappingOptions;

// Re-export serde_json::json! macro for convenience
pub use serde_json::json;

/// Prelude for common imports
pub mod prelude {
    pub use crate::date::{AnyDateFormat, Epoch, Iso8601, Rfc850, Rfc1123, Rfc3339};
    pub use crate::lazy_mapping;
    pub use crate::{
        Date, DateFormat, DateFormattable, DateStrategy, LazyConvertible, LazyMapping,
        LazyMappingError, LazyObject, LazyResult, LazyResultExt, MappingOptions, Store,
        StoreValue, Value,
    };

    pub use serde_json::json;
}
