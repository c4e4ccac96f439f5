//! Construction options for mapped objects
//!
//! Options can be built in code or deserialized from configuration:
//!
//! ```
//! use lazy_mapping::MappingOptions;
//!
//! let options = MappingOptions::default();
//! assert!(options.prune_null_values);
//! assert_eq!(options.null_string, "<null>");
//!
//! let preserve = MappingOptions::preserve();
//! assert!(!preserve.prune_null_values);
//! ```

use serde::Deserialize;

/// String sentinel treated as null during pruning
pub const NULL_STRING: &str = "<null>";

/// How a mapped object treats its input store on construction
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MappingOptions {
    /// Drop null markers from the input store
    pub prune_null_values: bool,

    /// String value treated as a null marker
    pub null_string: String,

    /// Also prune nested stores, including stores inside arrays
    pub prune_nested: bool,
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self {
            prune_null_values: true,
            null_string: NULL_STRING.to_owned(),
            prune_nested: false,
        }
    }
}

impl MappingOptions {
    /// Keep every input entry, null markers included
    pub fn preserve() -> Self {
        Self {
            prune_null_values: false,
            ..Self::default()
        }
    }

    /// Prune null markers at every depth
    pub fn deep() -> Self {
        Self {
            prune_nested: true,
            ..Self::default()
        }
    }

    /// Options for the plain `prune` flag accepted by constructors
    pub fn pruning(prune_null_values: bool) -> Self {
        if prune_null_values {
            Self::default()
        } else {
            Self::preserve()
        }
    }

    #[must_use]
    pub fn with_null_string(mut self, null_string: impl Into<String>) -> Self {
        self.null_string = null_string.into();
        self
    }
}
