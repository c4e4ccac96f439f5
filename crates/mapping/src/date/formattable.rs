//! Date capability for mapped types

use tracing::{debug, trace};

use super::{Date, DateStrategy};
use crate::core::value::{Converted, Value};
use crate::error::{LazyMappingError, LazyResult};
use crate::object::LazyMapping;

/// A mapped type bound to one date strategy
///
/// `convert_to_date` and `convert_epoch_to_date` default to the bound
/// strategy and may be overridden per type; [`date`](Self::date) always goes
/// through them.
pub trait DateFormattable: LazyMapping {
    /// Strategy used for every date field of this type
    type Format: DateStrategy;

    fn convert_to_date(&self, date_string: &str) -> LazyResult<Date> {
        <Self::Format as DateStrategy>::convert_to_date(date_string)
    }

    fn convert_epoch_to_date(&self, epoch: f64) -> LazyResult<Date> {
        <Self::Format as DateStrategy>::convert_epoch_to_date(epoch)
    }

    /// Date at `key_path`, converted once and cached
    ///
    /// Numbers go to the epoch entry point and strings to the string entry
    /// point. Any other input fails with `UnexpectedType`.
    fn date(&mut self, key_path: &str) -> LazyResult<Date> {
        let raw: Value = self.object_mut().value(key_path)?;

        let date = match &raw {
            Value::Converted(Converted::Date(date)) => {
                trace!(key_path, target = "Date", "cache hit");
                return Ok(*date);
            }
            Value::String(text) => self.convert_to_date(text)?,
            other => match other.numeric() {
                Some(epoch) => self.convert_epoch_to_date(epoch.as_f64())?,
                None => {
                    return Err(LazyMappingError::unexpected_type(
                        Some(other),
                        "date String or epoch Number",
                    ));
                }
            },
        };

        let format = <Self::Format as DateStrategy>::NAME;
        debug!(key_path, format, "date converted");
        self.object_mut().set(key_path, Some(date));
        Ok(date)
    }
}
