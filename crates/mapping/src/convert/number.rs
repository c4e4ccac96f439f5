//! Numeric converters

use serde_json::Number;

use super::LazyConvertible;
use crate::core::value::{Numeric, StoreValue, Value};
use crate::error::{LazyMappingError, LazyResult};

const EXPECTED_NUMERIC: &str = "Number, Bool or numeric String";

/// Numeric view of a converter input
///
/// Strings are parsed, booleans count as `0`/`1`.
fn numeric_input(value: Option<&Value>, target: &str) -> LazyResult<Numeric> {
    match value {
        Some(Value::String(text)) => Numeric::parse(text).ok_or_else(|| {
            LazyMappingError::custom(format!(
                "'{text}' is not a valid input for {target} instantiation"
            ))
        }),
        Some(Value::Bool(flag)) => Ok(Numeric::Int(i64::from(*flag))),
        Some(other) => other
            .numeric()
            .ok_or_else(|| LazyMappingError::unexpected_type(value, EXPECTED_NUMERIC)),
        None => Err(LazyMappingError::unexpected_type(None, EXPECTED_NUMERIC)),
    }
}

macro_rules! integer_converters {
    ($($ty:ty),* $(,)?) => {$(
        impl LazyConvertible for $ty {
            fn convert(value: Option<&Value>) -> LazyResult<Self> {
                let numeric = numeric_input(value, Self::TYPE_NAME)?;
                numeric.truncated_integer().ok_or_else(|| {
                    LazyMappingError::custom(format!(
                        "{numeric} is out of range for {}",
                        Self::TYPE_NAME
                    ))
                })
            }
        }
    )*};
}

integer_converters!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl LazyConvertible for f64 {
    fn convert(value: Option<&Value>) -> LazyResult<Self> {
        numeric_input(value, Self::TYPE_NAME).map(Numeric::as_f64)
    }
}

impl LazyConvertible for f32 {
    fn convert(value: Option<&Value>) -> LazyResult<Self> {
        let numeric = numeric_input(value, Self::TYPE_NAME)?;
        let narrow = numeric.as_f64() as f32;
        if narrow.is_finite() {
            Ok(narrow)
        } else {
            Err(LazyMappingError::custom(format!(
                "{numeric} is out of range for f32"
            )))
        }
    }
}

/// Generic numeric box, parsed from text only
impl LazyConvertible for Number {
    fn convert(value: Option<&Value>) -> LazyResult<Self> {
        if let Some(Value::String(text)) = value {
            return Numeric::parse(text)
                .and_then(Numeric::to_number)
                .ok_or_else(|| {
                    LazyMappingError::custom(format!(
                        "'{text}' is not a valid input for Number instantiation"
                    ))
                });
        }
        // Fields already read as a concrete numeric type.
        value
            .and_then(Value::numeric)
            .and_then(Numeric::to_number)
            .ok_or_else(|| LazyMappingError::unexpected_type(value, "Number or numeric String"))
    }
}
