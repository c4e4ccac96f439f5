//! Registered conversions through the engine

use lazy_mapping::convert::strict_bool;
use lazy_mapping::{Converted, Value};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Number, json};
use url::Url;

use super::common::object;

#[rstest]
#[case(json!(1), true)]
#[case(json!(true), true)]
#[case(json!("1"), true)]
#[case(json!("true"), true)]
#[case(json!("yes"), true)]
#[case(json!(0), false)]
#[case(json!(false), false)]
#[case(json!("0"), false)]
#[case(json!("false"), false)]
#[case(json!("no"), false)]
#[case(json!("banana"), false)]
fn test_boolean_truthiness(#[case] input: serde_json::Value, #[case] expected: bool) {
    let mut object = object(json!({ "flag": input }));
    assert_eq!(object.get::<bool>("flag"), Ok(expected));
    assert_eq!(object.raw("flag"), Some(&Value::Bool(expected)));
}

#[test]
fn test_strict_boolean_fails_on_unknown_string() {
    let mut object = object(json!({"flag": "banana", "other": "yes"}));
    let err = object.converted("flag", strict_bool).unwrap_err();
    assert_eq!(err.code(), "LAZY_UNEXPECTED_TYPE");
    assert_eq!(object.converted("other", strict_bool), Ok(true));
}

#[test]
fn test_number_from_string_is_stored_as_number() {
    let mut object = object(json!({"answer": "42"}));
    let number = object.get::<Number>("answer").unwrap();
    assert_eq!(number.as_i64(), Some(42));
    assert_eq!(object.raw("answer"), Some(&Value::Number(Number::from(42))));
}

#[test]
fn test_number_after_integer_read() {
    let mut object = object(json!({"n": "42", "f": 1.5}));
    assert_eq!(object.get::<i64>("n"), Ok(42));
    assert_eq!(object.get::<Number>("n"), Ok(Number::from(42)));

    assert_eq!(object.get::<f32>("f"), Ok(1.5));
    assert_eq!(object.get::<Number>("f").unwrap().as_f64(), Some(1.5));
}

#[test]
fn test_number_rejects_non_numeric_values() {
    let mut object = object(json!({"answer": {"nested": true}, "text": "this is not a number"}));
    assert_eq!(object.get::<Number>("answer").unwrap_err().code(), "LAZY_UNEXPECTED_TYPE");
    assert_eq!(object.get::<Number>("text").unwrap_err().code(), "LAZY_CUSTOM_ERROR");
}

#[rstest]
#[case("i64", Converted::I64(42))]
#[case("u64", Converted::U64(42))]
#[case("i8", Converted::I8(42))]
#[case("usize", Converted::Usize(42))]
fn test_integer_conversions_cache_typed_variant(#[case] target: &str, #[case] expected: Converted) {
    let mut object = object(json!({"answer": "42"}));
    match target {
        "i64" => assert_eq!(object.get::<i64>("answer"), Ok(42)),
        "u64" => assert_eq!(object.get::<u64>("answer"), Ok(42)),
        "i8" => assert_eq!(object.get::<i8>("answer"), Ok(42)),
        _ => assert_eq!(object.get::<usize>("answer"), Ok(42)),
    }
    assert_eq!(object.raw("answer"), Some(&Value::Converted(expected)));
}

#[test]
fn test_url_conversion_is_cached() {
    let mut object = object(json!({"link": "https://www.google.com/search?q=lazy"}));
    let url = object.get::<Url>("link").unwrap();
    assert_eq!(url.host_str(), Some("www.google.com"));
    assert_eq!(object.raw("link"), Some(&Value::Converted(Converted::Url(url))));
}

#[test]
fn test_url_failures() {
    let mut object = object(json!({"number": 42, "broken": "::not a url::"}));
    assert_eq!(object.get::<Url>("number").unwrap_err().code(), "LAZY_UNEXPECTED_TYPE");
    assert_eq!(object.get::<Url>("broken").unwrap_err().code(), "LAZY_CUSTOM_ERROR");
}

#[test]
fn test_custom_converter() {
    let mut object = object(json!({"csv": "a,b,c"}));
    let parts: Vec<String> = object
        .converted("csv", |raw| {
            let text = raw.and_then(Value::as_str).unwrap_or_default();
            Ok(text.split(',').map(str::to_owned).collect())
        })
        .unwrap();
    assert_eq!(parts, ["a", "b", "c"]);

    // Second read is an exact hit on the cached array.
    let again: Vec<String> = object
        .converted("csv", |_| panic!("converter must not run on a cached value"))
        .unwrap();
    assert_eq!(again, parts);
}
