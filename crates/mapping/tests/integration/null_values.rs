//! Null pruning on construction

use lazy_mapping::{LazyObject, MappingOptions, Store};
use pretty_assertions::assert_eq;
use serde_json::json;

use super::common::init_tracing;

fn payload() -> Store {
    init_tracing();
    Store::try_from(json!({
        "null_value": null,
        "null_string": "<null>",
        "kept": "value",
        "nested": {"inner": null}
    }))
    .unwrap()
}

#[test]
fn test_pruning_removes_null_markers() {
    let object = LazyObject::new(payload(), true);
    assert!(!object.contains("null_value"));
    assert!(!object.contains("null_string"));
    assert!(object.contains("kept"));
}

#[test]
fn test_pruning_is_top_level_only() {
    let object = LazyObject::new(payload(), true);
    assert!(object.contains("nested.inner"));
}

#[test]
fn test_no_pruning() {
    let object = LazyObject::new(payload(), false);
    assert_eq!(object.store().len(), 4);
    assert!(object.contains("null_value"));
}

#[test]
fn test_deep_pruning() {
    let object = LazyObject::with_options(payload(), &MappingOptions::deep());
    assert!(!object.contains("nested.inner"));
    assert!(object.contains("nested"));
}

#[test]
fn test_custom_null_string() {
    let store = Store::try_from(json!({"a": "N/A", "b": "<null>"})).unwrap();
    let options = MappingOptions::default().with_null_string("N/A");
    let object = LazyObject::with_options(store, &options);
    assert!(!object.contains("a"));
    assert!(object.contains("b"));
}

#[test]
fn test_options_from_config() {
    let options: MappingOptions =
        serde_json::from_value(json!({"prune_null_values": false})).unwrap();
    let object = LazyObject::with_options(payload(), &options);
    assert_eq!(object.store().len(), 4);
}
