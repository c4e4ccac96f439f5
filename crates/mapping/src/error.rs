//! Lazy mapping error types
//!
//! Every engine operation and every converter reports failure through
//! [`LazyMappingError`]. The set of variants is closed: callers can match on
//! it exhaustively to decide whether a failure is fatal or just means "field
//! absent".

use thiserror::Error;

use crate::core::value::Value;

// ============================================================================
// MAIN ERROR TYPE
// ============================================================================

/// Failure raised while resolving, converting or caching a field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LazyMappingError {
    /// No value exists at the requested key path
    #[error("No value found for key path '{key_path}'")]
    KeyPathNotFound { key_path: String },

    /// A value exists but cannot be cast to the requested type
    #[error("Cannot convert {value} at key path '{}' to {target}", .key_path.as_deref().unwrap_or("<none>"))]
    Conversion {
        key_path: Option<String>,
        value: Value,
        target: &'static str,
    },

    /// A converter received an input of a kind it does not accept
    #[error("Unexpected input {}: expected {expected}", display_input(.value.as_ref()))]
    UnexpectedType {
        value: Option<Value>,
        expected: &'static str,
    },

    /// A date string or number could not be parsed by the selected format
    #[error("Date conversion failed: {message}")]
    DateConversion { message: String },

    /// Converter-specific validation failure
    #[error("{message}")]
    Custom { message: String },
}

fn display_input(value: Option<&Value>) -> String {
    value.map_or_else(|| "<no value>".to_string(), ToString::to_string)
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl LazyMappingError {
    /// Create a key path not found error
    pub fn key_path_not_found(key_path: impl Into<String>) -> Self {
        Self::KeyPathNotFound {
            key_path: key_path.into(),
        }
    }

    /// Create a conversion error for a value found at `key_path`
    pub fn conversion(key_path: impl Into<String>, value: Value, target: &'static str) -> Self {
        Self::Conversion {
            key_path: Some(key_path.into()),
            value,
            target,
        }
    }

    /// Create an unexpected type error
    pub fn unexpected_type(value: Option<&Value>, expected: &'static str) -> Self {
        Self::UnexpectedType {
            value: value.cloned(),
            expected,
        }
    }

    /// Create a date conversion error
    pub fn date_conversion(message: impl Into<String>) -> Self {
        Self::DateConversion {
            message: message.into(),
        }
    }

    /// Create a custom error
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom {
            message: message.into(),
        }
    }
}

// ============================================================================
// ERROR CLASSIFICATION
// ============================================================================

impl LazyMappingError {
    /// Get error code for monitoring
    pub fn code(&self) -> &'static str {
        match self {
            Self::KeyPathNotFound { .. } => "LAZY_KEY_PATH_NOT_FOUND",
            Self::Conversion { .. } => "LAZY_CONVERSION_ERROR",
            Self::UnexpectedType { .. } => "LAZY_UNEXPECTED_TYPE",
            Self::DateConversion { .. } => "LAZY_DATE_CONVERSION_ERROR",
            Self::Custom { .. } => "LAZY_CUSTOM_ERROR",
        }
    }

    /// True when the field is simply absent rather than malformed
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::KeyPathNotFound { .. })
    }
}

// ============================================================================
// RESULT TYPE
// ============================================================================

/// Result type alias for lazy mapping operations
pub type LazyResult<T> = Result<T, LazyMappingError>;

/// Extension trait for treating a missing field as an absent value
pub trait LazyResultExt<T> {
    /// Map `KeyPathNotFound` to `Ok(None)`, keeping every other failure.
    fn optional(self) -> LazyResult<Option<T>>;
}

impl<T> LazyResultExt<T> for LazyResult<T> {
    fn optional(self) -> LazyResult<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_missing() => Ok(None),
            Err(err) => Err(err),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
