//! Arrays of nested objects

use lazy_mapping::prelude::*;
use lazy_mapping::Converted;
use pretty_assertions::assert_eq;

use super::common::object;

lazy_mapping! {
    pub struct Answer;
}

impl Answer {
    fn number(&mut self) -> LazyResult<i64> {
        self.get("number")
    }
}

fn answers() -> LazyObject {
    object(json!({
        "answers": [
            {"number": 42, "note": "<null>"},
            {"number": "24"}
        ]
    }))
}

#[test]
fn test_array_of_objects() {
    let mut parent = answers();
    let mut items: Vec<Answer> = parent.objects("answers").unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].number(), Ok(42));
    assert_eq!(items[1].number(), Ok(24));
}

#[test]
fn test_nested_objects_are_pruned() {
    let mut parent = answers();
    let items: Vec<Answer> = parent.objects("answers").unwrap();
    assert!(!items[0].contains("note"));
}

#[test]
fn test_second_read_is_cached() {
    let mut parent = answers();
    let first: Vec<Answer> = parent.objects("answers").unwrap();

    let cached = parent.raw("answers").and_then(Value::as_converted);
    assert!(matches!(
        cached,
        Some(Converted::Objects(mapped)) if mapped.holds::<Answer>() && mapped.len() == 2
    ));

    let second: Vec<Answer> = parent.objects("answers").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_objects_are_snapshots() {
    let mut parent = answers();
    let mut items: Vec<Answer> = parent.objects("answers").unwrap();
    items[0].set("number", Some(0_i64));

    let mut again: Vec<Answer> = parent.objects("answers").unwrap();
    assert_eq!(again[0].number(), Ok(42));
}

#[test]
fn test_conversions_through_with_objects_are_cached() {
    let mut parent = answers();
    let number = parent.with_objects::<Answer, _, _>("answers", |items| items[1].number());
    assert_eq!(number, Ok(Ok(24)));

    let again: Vec<Answer> = parent.objects("answers").unwrap();
    assert_eq!(
        again[1].raw("number"),
        Some(&Value::Converted(Converted::I64(24)))
    );
}

#[test]
fn test_writes_through_with_objects_are_kept() {
    let mut parent = answers();
    parent
        .with_objects::<Answer, _, _>("answers", |items| items[0].set("number", Some(0_i64)))
        .unwrap();

    let mut again: Vec<Answer> = parent.objects("answers").unwrap();
    assert_eq!(again[0].number(), Ok(0));
}

#[test]
fn test_children_use_parent_null_marker() {
    let store = Store::try_from(json!({"answers": [{"number": 1, "note": "N/A"}]})).unwrap();
    let options = MappingOptions::default().with_null_string("N/A");
    let mut parent = LazyObject::with_options(store, &options);

    let items: Vec<Answer> = parent.objects("answers").unwrap();
    assert!(!items[0].contains("note"));
    assert!(items[0].contains("number"));
}

#[test]
fn test_objects_from_non_array() {
    let mut parent = object(json!({"answers": "nope", "mixed": [{"a": 1}, 2]}));
    assert_eq!(
        parent.objects::<Answer>("answers").unwrap_err().code(),
        "LAZY_CONVERSION_ERROR"
    );
    assert_eq!(
        parent.objects::<Answer>("mixed").unwrap_err().code(),
        "LAZY_CONVERSION_ERROR"
    );
}

#[test]
fn test_set_objects_round_trip() {
    let mut parent = object(json!({}));
    let child = Answer::from_json(json!({"number": 7})).unwrap();
    parent.set_objects("answers", vec![child]);

    let mut items: Vec<Answer> = parent.objects("answers").unwrap();
    assert_eq!(items[0].number(), Ok(7));
    assert!(matches!(
        parent.raw("answers"),
        Some(Value::Converted(Converted::Objects(_)))
    ));
}
