//! Text-backed converters

use url::Url;

use super::LazyConvertible;
use crate::core::value::Value;
use crate::error::{LazyMappingError, LazyResult};

impl LazyConvertible for String {
    fn convert(value: Option<&Value>) -> LazyResult<Self> {
        match value {
            Some(Value::String(text)) => Ok(text.clone()),
            _ => Err(LazyMappingError::unexpected_type(value, "String")),
        }
    }
}

impl LazyConvertible for Url {
    fn convert(value: Option<&Value>) -> LazyResult<Self> {
        let Some(Value::String(text)) = value else {
            return Err(LazyMappingError::unexpected_type(value, "String"));
        };
        Url::parse(text).map_err(|err| {
            LazyMappingError::custom(format!(
                "'{text}' is not a valid input for Url instantiation ({err})"
            ))
        })
    }
}
