//! Date conversion
//!
//! Dates are never converted by the generic registry: a mapped type opts into
//! exactly one [`DateStrategy`] through [`DateFormattable`], and
//! [`DateFormattable::date`] routes strings and numbers to that strategy.
//!
//! ```
//! use lazy_mapping::prelude::*;
//!
//! lazy_mapping! {
//!     pub struct Event;
//! }
//!
//! impl DateFormattable for Event {
//!     type Format = Rfc3339;
//! }
//!
//! let mut event = Event::from_json(serde_json::json!({"at": "2016-04-24T14:42:42Z"})).unwrap();
//! let at = event.date("at").unwrap();
//! assert_eq!(at.to_rfc3339(), "2016-04-24T14:42:42+00:00");
//! ```

mod format;
mod formattable;
mod strategy;

pub use format::DateFormat;
pub use formattable::DateFormattable;
pub use strategy::{AnyDateFormat, DateStrategy, Epoch, Iso8601, Rfc850, Rfc1123, Rfc3339, date_from_epoch};

/// Instant in UTC
pub type Date = chrono::DateTime<chrono::Utc>;
