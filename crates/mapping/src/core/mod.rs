//! Core building blocks of the mapping layer
//!
//! ### [`path`] - Key paths
//!
//! Dot-separated addresses into nested stores.
//!
//! ### [`value`] - The Value enum
//!
//! The dynamic [`Value`] held at every key. Raw values come straight from the
//! input payload; converted values are written back by the engine after the
//! first typed read.
//!
//! ### [`store`] - Keyed store
//!
//! The insertion-ordered [`Store`] with key-path resolution, auto-vivifying
//! writes and null pruning.
pub mod display;
pub mod path;
pub mod store;
pub mod value;

pub use path::KeyPath;
pub use store::Store;
pub use value::{Converted, MappedArray, Numeric, StoreValue, Value};
