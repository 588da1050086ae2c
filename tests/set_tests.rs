//! Integration tests for `Set` construction, mutation and snapshots.

use homoset::prelude::*;
use rstest::rstest;

fn numbers(values: &[i64]) -> GuardedSet<i64> {
    GuardedSet::from_values(&0, values.iter().copied()).unwrap()
}

// =============================================================================
// Construction
// =============================================================================

#[rstest]
fn test_new_creates_empty_set() {
    let set: GuardedSet<i64> = GuardedSet::new(&42).unwrap();
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
    assert!(!set.contains(&42));
    assert_eq!(set.mode(), Mode::Guarded);
}

#[rstest]
#[case::float32(Value::Float32(0.0), "f32")]
#[case::float64(Value::Float64(0.0), "f64")]
#[case::list(Value::List(vec![Value::Int64(1)]), "list")]
#[case::nil(Value::Nil, "nil")]
fn test_new_rejects_types_without_equality(#[case] sample: Value, #[case] type_name: &str) {
    let error = GuardedSet::new(&sample).unwrap_err();
    assert!(matches!(error, ConstructionError::NotEquatable { .. }));
    assert_eq!(error.type_name(), type_name);
}

#[rstest]
fn test_new_rejects_identity_types() {
    let error = UnguardedSet::new(&Value::shared("handle")).unwrap_err();
    assert_eq!(
        error,
        ConstructionError::IdentityTypeNotAllowed {
            type_name: "shared"
        }
    );
    assert_eq!(
        error.to_string(),
        "type shared is an identity type and cannot be a set element"
    );
}

#[rstest]
fn test_new_checks_the_contents_of_wrapped_samples() {
    let shared = GuardedSet::new(&Some(Value::shared(1_i64)));
    assert_eq!(
        shared.unwrap_err(),
        ConstructionError::IdentityTypeNotAllowed {
            type_name: "shared"
        }
    );

    let float = GuardedSet::new(&Some(Value::Float64(1.0)));
    assert!(matches!(float, Err(ConstructionError::NotEquatable { .. })));

    let absent = GuardedSet::new(&None::<Value>);
    assert!(matches!(absent, Err(ConstructionError::NotEquatable { .. })));
}

#[rstest]
#[case::float_first((Value::Float64(1.0), Value::Int64(0)))]
#[case::float_last((Value::Int64(0), Value::Float32(1.0)))]
#[case::list((Value::List(Vec::new()), Value::Int64(0)))]
fn test_new_rejects_tuples_with_unequatable_components(#[case] sample: (Value, Value)) {
    let result = GuardedSet::new(&sample);
    assert!(matches!(result, Err(ConstructionError::NotEquatable { .. })));
}

#[rstest]
fn test_new_rejects_tuples_with_identity_components() {
    let result = UnguardedSet::new(&(1_u8, Value::shared(1_i64), 'a'));
    assert!(matches!(
        result,
        Err(ConstructionError::IdentityTypeNotAllowed { .. })
    ));
}

#[rstest]
fn test_optional_value_set_is_homogeneous_per_kind() {
    let set = GuardedSet::new(&Some(Value::Int64(0))).unwrap();
    set.add(Some(Value::Int64(1)));
    set.add(Some(Value::from("x")));
    set.add(Some(Value::Float64(f64::NAN)));
    set.add_all([Some(Value::Int64(2)), None, Some(Value::Nil)]);
    set.add_all([Some(Value::Int64(3)), Some(Value::Int32(3))]);

    assert_eq!(set.to_vec(), vec![Some(Value::Int64(1)), Some(Value::Int64(2))]);
    assert!(!set.contains(&Some(Value::from("x"))));
    assert!(!set.contains(&None));
}

#[rstest]
fn test_tuple_value_set_is_homogeneous_per_component_kind() {
    let set = GuardedSet::new(&(Value::from(""), Value::Int64(0))).unwrap();
    set.add((Value::from("a"), Value::Int64(1)));
    set.add((Value::Int64(1), Value::from("a")));
    set.add((Value::from("b"), Value::Int32(2)));

    assert_eq!(set.to_vec(), vec![(Value::from("a"), Value::Int64(1))]);
}

#[rstest]
fn test_sample_is_not_inserted() {
    let set = UnguardedSet::new(&String::from("sample")).unwrap();
    assert!(!set.contains(&String::from("sample")));
}

// =============================================================================
// Insertion
// =============================================================================

#[rstest]
fn test_scenario_add_remove_readd() {
    let set = numbers(&[1, 2, 3]);

    set.add(2);
    assert_eq!(set.len(), 3);

    set.remove(&2);
    assert_eq!(set.to_vec(), vec![1, 3]);

    set.add(2);
    assert_eq!(set.to_vec(), vec![1, 3, 2]);
}

#[rstest]
fn test_add_is_idempotent() {
    let set = numbers(&[5]);
    let before = set.to_vec();
    set.add(5).add(5);
    assert_eq!(set.to_vec(), before);
}

#[rstest]
fn test_add_chains_fluently() {
    let set = numbers(&[]);
    assert_eq!(set.add(3).add(1).add(2).to_vec(), vec![3, 1, 2]);
}

#[rstest]
fn test_add_skips_absent_values() {
    let set = GuardedSet::new(&Some(0_u8)).unwrap();
    set.add_all([Some(1), None, Some(2), None]);
    assert_eq!(set.to_vec(), vec![Some(1), Some(2)]);
    assert!(!set.contains(&None));
}

#[rstest]
fn test_add_flattens_batches() {
    let set = GuardedSet::new(&Value::from("")).unwrap();
    set.add(Value::List(vec![
        Value::from("a"),
        Value::Nil,
        Value::from("b"),
        Value::from("a"),
    ]));
    assert_eq!(set.to_vec(), vec![Value::from("a"), Value::from("b")]);
}

#[rstest]
fn test_add_with_mismatched_item_is_a_no_op() {
    let set = GuardedSet::new(&Value::Int64(0)).unwrap();
    set.add(Value::Int64(1));

    set.add(Value::Int32(2));
    set.add(Value::List(vec![Value::Int64(3), Value::from("4")]));
    set.add_all([Value::Int64(5), Value::Bool(true)]);

    assert_eq!(set.to_vec(), vec![Value::Int64(1)]);
}

#[rstest]
fn test_contains_rejects_other_kinds() {
    let set = UnguardedSet::from_values(&Value::Int32(0), [Value::Int32(7)]).unwrap();
    assert!(set.contains(&Value::Int32(7)));
    assert!(!set.contains(&Value::Int64(7)));
    assert!(!set.contains(&Value::from("7")));
}

// =============================================================================
// Removal
// =============================================================================

#[rstest]
fn test_remove_missing_value_is_a_no_op() {
    let set = numbers(&[1, 2]);
    set.remove(&9);
    assert_eq!(set.to_vec(), vec![1, 2]);
}

#[rstest]
fn test_remove_with_mismatched_item_is_a_no_op() {
    let set = GuardedSet::from_values(&Value::Int64(0), [Value::Int64(1), Value::Int64(2)])
        .unwrap();
    set.remove_all(&[Value::Int64(1), Value::Int32(2)]);
    set.remove(&Value::List(vec![Value::Int64(2), Value::from("x")]));
    assert_eq!(set.len(), 2);
}

#[rstest]
fn test_remove_flattens_batches() {
    let set = GuardedSet::from_values(
        &Value::Int64(0),
        (1..=4).map(Value::Int64),
    )
    .unwrap();
    set.remove(&Value::List(vec![Value::Int64(1), Value::Nil, Value::Int64(3)]));
    assert_eq!(set.to_value_list().as_int64s(), vec![2, 4]);
}

#[rstest]
fn test_remove_across_compaction_keeps_order() {
    let total = 3 * COMPACTION_THRESHOLD;
    let values: Vec<i64> = (0..i64::try_from(total).unwrap()).collect();
    let set = numbers(&values);

    let evens: Vec<i64> = values.iter().copied().filter(|value| value % 2 == 0).collect();
    for value in &evens {
        set.remove(value);
    }

    let odds: Vec<i64> = values.iter().copied().filter(|value| value % 2 == 1).collect();
    assert_eq!(set.len(), odds.len());
    assert_eq!(set.to_vec(), odds);

    set.add(0);
    assert_eq!(set.to_vec().last(), Some(&0));
}

// =============================================================================
// Snapshots, clones and reset
// =============================================================================

#[rstest]
fn test_to_vec_is_a_snapshot() {
    let set = numbers(&[1, 2]);
    let snapshot = set.to_vec();
    set.add(3);
    assert_eq!(snapshot, vec![1, 2]);
}

#[rstest]
fn test_clone_is_independent() {
    let set = numbers(&[1, 2, 3]);
    let copy = set.clone();

    copy.add(4);
    set.remove(&1);

    assert_eq!(set.to_vec(), vec![2, 3]);
    assert_eq!(copy.to_vec(), vec![1, 2, 3, 4]);
}

#[rstest]
fn test_clone_as_switches_mode() {
    let set = numbers(&[1, 2]);
    let local = set.to_unguarded();
    assert_eq!(local.mode(), Mode::Unguarded);
    assert_eq!(local.to_vec(), vec![1, 2]);
    assert_eq!(local.to_guarded().mode(), Mode::Guarded);
    assert!(set == local);
}

#[rstest]
fn test_clear_then_reuse() {
    let set = numbers(&[1, 2]);
    set.clear().add(7);
    assert_eq!(set.to_vec(), vec![7]);
}

#[rstest]
fn test_reset_forces_guarded_mode() {
    let set = UnguardedSet::from_values(&'a', ['b', 'c']).unwrap();
    let element_type = set.element_type();
    let reset = set.reset();
    assert!(reset.is_empty());
    assert_eq!(reset.mode(), Mode::Guarded);
    assert_eq!(reset.element_type(), element_type);
}

#[rstest]
fn test_into_vec_returns_live_members() {
    let set = numbers(&[4, 5, 6]);
    set.remove(&5);
    assert_eq!(set.into_vec(), vec![4, 6]);
}
