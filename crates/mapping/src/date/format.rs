//! Fixed calendar date formats
//!
//! Every format parses English month and weekday names in UTC, independent of
//! the host locale. Formats that carry a zone accept either a UTC zone name
//! (`UTC`, `GMT`, `UT`, `Z`) or a numeric `+hhmm` offset.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};

use super::Date;
use crate::error::{LazyMappingError, LazyResult};

/// Zone names read as UTC
const UTC_ZONES: [&str; 4] = ["UTC", "GMT", "UT", "Z"];

/// Calendar string format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// `2016-04-24T14:42:42.424Z`, exactly three fraction digits
    Iso8601,
    /// `2016-04-24T14:42:42Z`
    Rfc3339,
    /// `Sun, 24 Apr 2016 14:42:42 GMT`
    Rfc1123,
    /// `Sunday, 24-Apr-16 14:42:42 UTC`
    Rfc850,
}

impl DateFormat {
    pub const ALL: [Self; 4] = [Self::Iso8601, Self::Rfc3339, Self::Rfc1123, Self::Rfc850];

    /// Display name of the format
    pub const fn name(self) -> &'static str {
        match self {
            Self::Iso8601 => "ISO 8601",
            Self::Rfc3339 => "RFC 3339",
            Self::Rfc1123 => "RFC 1123",
            Self::Rfc850 => "RFC 850",
        }
    }

    /// chrono pattern for the part of the string before any zone
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::Iso8601 => "%Y-%m-%dT%H:%M:%S.%3fZ",
            Self::Rfc3339 => "%Y-%m-%dT%H:%M:%SZ",
            Self::Rfc1123 => "%a, %d %b %Y %H:%M:%S",
            Self::Rfc850 => "%A, %d-%b-%y %H:%M:%S",
        }
    }

    /// chrono pattern with a numeric offset, for formats that carry a zone
    const fn offset_pattern(self) -> Option<&'static str> {
        match self {
            Self::Iso8601 | Self::Rfc3339 => None,
            Self::Rfc1123 => Some("%a, %d %b %Y %H:%M:%S %z"),
            Self::Rfc850 => Some("%A, %d-%b-%y %H:%M:%S %z"),
        }
    }

    /// Parse `input` strictly in this format
    pub fn parse(self, input: &str) -> LazyResult<Date> {
        let parsed = match self.offset_pattern() {
            None => NaiveDateTime::parse_from_str(input, self.pattern())
                .ok()
                .map(|naive| naive.and_utc()),
            Some(offset_pattern) => parse_zoned(input, self.pattern(), offset_pattern),
        };

        parsed.ok_or_else(|| {
            LazyMappingError::date_conversion(format!(
                "Date string ('{input}') could not be formatted using format specification {}",
                self.name()
            ))
        })
    }
}

fn parse_zoned(input: &str, pattern: &str, offset_pattern: &str) -> Option<Date> {
    if let Ok(date) = DateTime::parse_from_str(input, offset_pattern) {
        return Some(date.with_timezone(&Utc));
    }

    let (stamp, zone) = input.rsplit_once(' ')?;
    if !UTC_ZONES.iter().any(|name| name.eq_ignore_ascii_case(zone)) {
        return None;
    }
    NaiveDateTime::parse_from_str(stamp, pattern)
        .ok()
        .map(|naive| naive.and_utc())
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
