//! Date capabilities

use chrono::{Datelike, Timelike};
use lazy_mapping::prelude::*;
use lazy_mapping::{Converted, date::DateFormat};
use pretty_assertions::assert_eq;

use super::common::init_tracing;

lazy_mapping! {
    struct IsoEvent;
}

impl DateFormattable for IsoEvent {
    type Format = Iso8601;
}

lazy_mapping! {
    struct EpochEvent;
}

impl DateFormattable for EpochEvent {
    type Format = Epoch;
}

lazy_mapping! {
    struct Rfc3339Event;
}

impl DateFormattable for Rfc3339Event {
    type Format = Rfc3339;
}

lazy_mapping! {
    struct Rfc1123Event;
}

impl DateFormattable for Rfc1123Event {
    type Format = Rfc1123;
}

lazy_mapping! {
    struct Rfc850Event;
}

impl DateFormattable for Rfc850Event {
    type Format = Rfc850;
}

lazy_mapping! {
    struct UnformattedEvent;
}

impl DateFormattable for UnformattedEvent {
    type Format = AnyDateFormat;
}

fn event<T: LazyMapping>(at: serde_json::Value) -> T {
    init_tracing();
    T::from_json(json!({ "at": at })).unwrap()
}

fn assert_reference_date(date: Date) {
    assert_eq!(
        (date.year(), date.month(), date.day()),
        (2016, 4, 24)
    );
    assert_eq!(
        (date.hour(), date.minute(), date.second()),
        (14, 42, 42)
    );
}

#[test]
fn test_iso8601_components() {
    let mut event: IsoEvent = event(json!("2016-04-24T14:42:42.424Z"));
    let date = event.date("at").unwrap();
    assert_reference_date(date);
    assert_eq!(date.timestamp_subsec_millis(), 424);
}

#[test]
fn test_date_is_cached() {
    let mut event: IsoEvent = event(json!("2016-04-24T14:42:42.424Z"));
    let first = event.date("at").unwrap();
    assert_eq!(event.raw("at"), Some(&Value::Converted(Converted::Date(first))));
    assert_eq!(event.date("at"), Ok(first));
}

#[test]
fn test_calendar_formats() {
    let mut rfc3339: Rfc3339Event = event(json!("2016-04-24T14:42:42Z"));
    assert_reference_date(rfc3339.date("at").unwrap());

    let mut rfc1123: Rfc1123Event = event(json!("Sun, 24 Apr 2016 14:42:42 GMT"));
    assert_reference_date(rfc1123.date("at").unwrap());

    let mut rfc850: Rfc850Event = event(json!("Sunday, 24-Apr-16 14:42:42 UTC"));
    assert_reference_date(rfc850.date("at").unwrap());
}

#[test]
fn test_epoch_number_and_string_agree() {
    let mut from_number: EpochEvent = event(json!(1_461_508_962.424));
    let mut from_string: EpochEvent = event(json!("1461508962.424"));

    let a = from_number.date("at").unwrap();
    let b = from_string.date("at").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.timestamp_subsec_millis(), 424);
}

#[test]
fn test_epoch_rejects_non_numeric_string() {
    let mut event: EpochEvent = event(json!("this is not a double"));
    let err = event.date("at").unwrap_err();
    assert_eq!(err.code(), "LAZY_DATE_CONVERSION_ERROR");
    assert_eq!(
        err.to_string(),
        "Date conversion failed: Could not convert 'this is not a double' into a Double"
    );
}

#[test]
fn test_calendar_format_rejects_epoch_string() {
    let mut event: IsoEvent = event(json!("1461508962.424"));
    let err = event.date("at").unwrap_err();
    assert_eq!(err.code(), "LAZY_DATE_CONVERSION_ERROR");
    assert!(err.to_string().contains(DateFormat::Iso8601.name()));
}

#[test]
fn test_calendar_format_rejects_epoch_number() {
    let mut event: Rfc3339Event = event(json!(1_461_508_962));
    assert_eq!(event.date("at").unwrap_err().code(), "LAZY_CUSTOM_ERROR");
}

#[test]
fn test_base_capability_rejects_everything() {
    let mut text: UnformattedEvent = event(json!("2016-04-24T14:42:42Z"));
    assert_eq!(text.date("at").unwrap_err().code(), "LAZY_CUSTOM_ERROR");

    let mut number: UnformattedEvent = event(json!(1_461_508_962));
    assert_eq!(number.date("at").unwrap_err().code(), "LAZY_CUSTOM_ERROR");
}

#[test]
fn test_date_rejects_other_kinds() {
    let mut event: IsoEvent = event(json!([1, 2, 3]));
    assert_eq!(event.date("at").unwrap_err().code(), "LAZY_UNEXPECTED_TYPE");

    let mut missing: IsoEvent = IsoEvent::from_json(json!({})).unwrap();
    assert!(missing.date("at").unwrap_err().is_missing());
}

#[test]
fn test_failed_date_leaves_raw_value() {
    let mut event: IsoEvent = event(json!("not a date"));
    assert!(event.date("at").is_err());
    assert_eq!(event.raw("at"), Some(&Value::from("not a date")));
}
