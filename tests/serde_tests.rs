#![cfg(feature = "serde")]

//! Integration tests for serde support in homoset.
//!
//! Sets serialize as a sequence of their live members in insertion order.

use homoset::prelude::*;
use rstest::rstest;

#[rstest]
fn test_set_serializes_live_members_in_order() {
    let set = GuardedSet::from_values(&0, [3, 1, 4, 5]).unwrap();
    set.remove(&4);
    assert_eq!(serde_json::to_string(&set).unwrap(), "[3,1,5]");
}

#[rstest]
fn test_set_json_roundtrip() {
    let set = UnguardedSet::from_values(&String::new(), ["b", "a", "c"].map(String::from))
        .unwrap();
    let json = serde_json::to_string(&set).unwrap();
    let restored: UnguardedSet<String> = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.to_vec(), set.to_vec());
    assert_eq!(restored.mode(), Mode::Unguarded);
}

#[rstest]
fn test_set_deserializes_duplicates_once() {
    let set: GuardedSet<i32> = serde_json::from_str("[2, 2, 1, 2]").unwrap();
    assert_eq!(set.to_vec(), vec![2, 1]);
}

#[rstest]
fn test_empty_sequence_is_rejected() {
    let result: Result<GuardedSet<i32>, _> = serde_json::from_str("[]");
    assert!(result.is_err());
}

#[rstest]
fn test_value_set_roundtrip() {
    let set = GuardedSet::from_values(
        &Value::Int64(0),
        [Value::Int64(10), Value::Int64(-1)],
    )
    .unwrap();
    let json = serde_json::to_string(&set).unwrap();
    let restored: GuardedSet<Value> = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.to_vec(), vec![Value::Int64(10), Value::Int64(-1)]);
    assert_eq!(restored.element_type(), set.element_type());
}

#[rstest]
fn test_mixed_value_kinds_are_rejected() {
    let json = serde_json::to_string(&[Value::Int64(1), Value::from("one")]).unwrap();
    let error = serde_json::from_str::<GuardedSet<Value>>(&json).unwrap_err();
    assert!(error.to_string().contains("mixed element types"));
}

#[rstest]
fn test_unequatable_value_kind_is_rejected() {
    let json = serde_json::to_string(&[Value::Float64(1.5)]).unwrap();
    let error = serde_json::from_str::<GuardedSet<Value>>(&json).unwrap_err();
    assert!(error.to_string().contains("cannot be compared for equality"));
}

#[rstest]
fn test_value_list_is_transparent() {
    let list: ValueList = vec![Value::Int32(1), Value::Nil].into();
    let json = serde_json::to_string(&list).unwrap();
    assert!(json.starts_with('['));

    let restored: ValueList = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, list);
}
