//! Date strategies
//!
//! A strategy is a zero-sized capability type. The base contract fails for
//! both entry points, so a strategy only accepts the inputs it overrides.

use chrono::DateTime;

use super::{Date, DateFormat};
use crate::error::{LazyMappingError, LazyResult};

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Conversion of raw date inputs for one date capability
pub trait DateStrategy {
    /// Human-readable name
    const NAME: &'static str;

    /// Convert a date string
    fn convert_to_date(date_string: &str) -> LazyResult<Date> {
        let _ = date_string;
        Err(LazyMappingError::custom(
            "Must use one of the specialized date strategies (e.g. Iso8601)",
        ))
    }

    /// Convert seconds since the Unix epoch
    fn convert_epoch_to_date(epoch: f64) -> LazyResult<Date> {
        let _ = epoch;
        Err(LazyMappingError::custom(
            "Must use the specialized Epoch date strategy",
        ))
    }
}

/// Base capability: accepts nothing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnyDateFormat;

impl DateStrategy for AnyDateFormat {
    const NAME: &'static str = "Any";
}

macro_rules! calendar_strategies {
    ($($(#[$meta:meta])* $name:ident => $format:ident),* $(,)?) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl DateStrategy for $name {
            const NAME: &'static str = DateFormat::$format.name();

            fn convert_to_date(date_string: &str) -> LazyResult<Date> {
                DateFormat::$format.parse(date_string)
            }
        }
    )*};
}

calendar_strategies! {
    /// `2016-04-24T14:42:42.424Z`
    Iso8601 => Iso8601,
    /// `2016-04-24T14:42:42Z`
    Rfc3339 => Rfc3339,
    /// `Sun, 24 Apr 2016 14:42:42 GMT`
    Rfc1123 => Rfc1123,
    /// `Sunday, 24-Apr-16 14:42:42 UTC`
    Rfc850 => Rfc850,
}

/// Seconds since the Unix epoch, as a number or a numeric string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Epoch;

impl DateStrategy for Epoch {
    const NAME: &'static str = "Epoch";

    fn convert_to_date(date_string: &str) -> LazyResult<Date> {
        let epoch = date_string.parse::<f64>().map_err(|_| {
            LazyMappingError::date_conversion(format!(
                "Could not convert '{date_string}' into a Double"
            ))
        })?;
        Self::convert_epoch_to_date(epoch)
    }

    fn convert_epoch_to_date(epoch: f64) -> LazyResult<Date> {
        date_from_epoch(epoch)
    }
}

/// Date at `epoch` seconds, rounded to the microsecond
pub fn date_from_epoch(epoch: f64) -> LazyResult<Date> {
    let out_of_range = || {
        LazyMappingError::date_conversion(format!(
            "Epoch {epoch} is outside the representable date range"
        ))
    };

    let micros = (epoch * MICROS_PER_SECOND).round();
    if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
        return Err(out_of_range());
    }

    let micros = micros as i64;
    let seconds = micros.div_euclid(1_000_000);
    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
    DateTime::from_timestamp(seconds, nanos).ok_or_else(out_of_range)
}
