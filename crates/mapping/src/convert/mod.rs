//! Conversion registry
//!
//! Each target type registers exactly one conversion by implementing
//! [`LazyConvertible`]. The engine calls it only when the stored value is not
//! already of the target type, and caches whatever it returns.
//!
//! Converters are stateless: they see the raw input (or `None` when there is
//! none) and report
//!
//! - [`UnexpectedType`](crate::LazyMappingError::UnexpectedType) when the input
//!   kind is not accepted,
//! - [`Custom`](crate::LazyMappingError::Custom) when the kind is accepted but
//!   the value is invalid.

mod boolean;
mod number;
mod text;

pub use boolean::strict_bool;

use crate::core::value::{StoreValue, Value};
use crate::error::LazyResult;

/// A type with a registered conversion from a raw stored value
pub trait LazyConvertible: StoreValue {
    /// Convert a raw input into `Self`
    fn convert(value: Option<&Value>) -> LazyResult<Self>;
}
