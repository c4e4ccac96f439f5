//! Boolean converters

use tracing::debug;

use super::LazyConvertible;
use crate::core::value::{Numeric, Value};
use crate::error::{LazyMappingError, LazyResult};

const EXPECTED_BOOL: &str = "Bool, Number or String";

/// Case-insensitive boolean literal
fn parse_literal(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Non-string inputs shared by both boolean converters
fn non_text(value: Option<&Value>) -> LazyResult<bool> {
    match value {
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(other) => other
            .numeric()
            .map(Numeric::is_truthy)
            .ok_or_else(|| LazyMappingError::unexpected_type(value, EXPECTED_BOOL)),
        None => Err(LazyMappingError::unexpected_type(None, EXPECTED_BOOL)),
    }
}

/// Permissive: unrecognized strings read as `false`
impl LazyConvertible for bool {
    fn convert(value: Option<&Value>) -> LazyResult<Self> {
        match value {
            Some(Value::String(text)) => Ok(parse_literal(text).unwrap_or_else(|| {
                debug!(input = %text, "unrecognized boolean string, reading as false");
                false
            })),
            _ => non_text(value),
        }
    }
}

/// Boolean conversion that rejects unrecognized strings
///
/// Plugs into [`LazyObject::converted`](crate::LazyObject::converted):
///
/// ```
/// use lazy_mapping::{LazyObject, convert::strict_bool};
///
/// let mut object = LazyObject::from_json(serde_json::json!({"flag": "maybe"})).unwrap();
/// assert!(object.converted("flag", strict_bool).is_err());
/// ```
pub fn strict_bool(value: Option<&Value>) -> LazyResult<bool> {
    match value {
        Some(Value::String(text)) => parse_literal(text)
            .ok_or_else(|| LazyMappingError::unexpected_type(value, "boolean literal")),
        _ => non_text(value),
    }
}
