//! Generic reads: exact hits, value-preserving casts, write-back

use lazy_mapping::{Converted, LazyMappingError, Value};
use pretty_assertions::assert_eq;
use serde_json::{Number, json};

use super::common::object;

#[test]
fn test_integer_is_cached_after_first_read() {
    let mut object = object(json!({"answer": 42}));

    let first = object.value::<i64>("answer").unwrap();
    assert_eq!(object.raw("answer"), Some(&Value::Converted(Converted::I64(42))));

    let second = object.value::<i64>("answer").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_float_from_integer_literal() {
    let mut object = object(json!({"ratio": 3}));
    assert_eq!(object.value::<f64>("ratio"), Ok(3.0));
    assert_eq!(object.raw("ratio"), Some(&Value::Converted(Converted::F64(3.0))));
}

#[test]
fn test_float_narrowing() {
    let mut object = object(json!({"ratio": 42.42}));
    assert_eq!(object.value::<f32>("ratio"), Ok(42.42_f32));
}

#[test]
fn test_integer_width_is_checked() {
    let mut object = object(json!({"big": 300, "negative": -1}));
    assert_eq!(object.value::<u8>("big").unwrap_err().code(), "LAZY_CONVERSION_ERROR");
    assert_eq!(object.value::<u32>("negative").unwrap_err().code(), "LAZY_CONVERSION_ERROR");
    assert_eq!(object.value::<u16>("big"), Ok(300));
}

#[test]
fn test_bool_reads() {
    let mut object = object(json!({"flag": true, "bit": 1}));
    assert_eq!(object.value::<bool>("flag"), Ok(true));
    assert_eq!(object.value::<bool>("bit"), Ok(true));
    assert_eq!(object.raw("bit"), Some(&Value::Bool(true)));
}

#[test]
fn test_string_read() {
    let mut object = object(json!({"greeting": "hai"}));
    assert_eq!(object.value::<String>("greeting"), Ok("hai".to_string()));
}

#[test]
fn test_string_over_number_fails() {
    let mut object = object(json!({"answer": 42}));
    let err = object.value::<String>("answer").unwrap_err();
    assert_eq!(
        err,
        LazyMappingError::conversion("answer", Value::from(json!(42)), "String")
    );
}

#[test]
fn test_array_of_integers_caches_elements() {
    let mut object = object(json!({"answers": [42, 42, 42]}));
    assert_eq!(object.value::<Vec<i64>>("answers"), Ok(vec![42, 42, 42]));

    let cached = object.raw("answers").and_then(Value::as_array).unwrap();
    assert!(
        cached
            .iter()
            .all(|item| *item == Value::Converted(Converted::I64(42)))
    );
}

#[test]
fn test_generic_number_read() {
    let mut object = object(json!({"answer": 42}));
    assert_eq!(object.value::<Number>("answer"), Ok(Number::from(42)));
}

#[test]
fn test_dynamic_value_read() {
    let mut object = object(json!({"nested": {"a": 1}}));
    let value = object.value::<Value>("nested").unwrap();
    assert!(value.is_object());
}

#[test]
fn test_three_level_read() {
    let mut object = object(json!({
        "answers_to_life": {"look_deep": {"look_deeper": 42}}
    }));
    assert_eq!(object.value::<i32>("answers_to_life.look_deep.look_deeper"), Ok(42));
}
