//! Map Function Tests
//!
//! Tests for: element_at (maps), map_from_arrays, map_from_entries,
//! map_entries, map_keys, map_values

use crate::common::*;
use pretty_assertions::assert_eq;
use scalarfn_eval::{FunctionConfig, FunctionError, MapKeyDedupPolicy, Operand};
use scalarfn_types::{DataType, ScalarValue, StructField, StructValue};

fn entry_fields() -> Vec<StructField> {
    vec![
        StructField::new("k", DataType::Long, false),
        StructField::new("v", DataType::String, true),
    ]
}

fn entries(pairs: &[(Option<i64>, Option<&str>)]) -> ScalarValue {
    ScalarValue::array(
        DataType::Struct(entry_fields()),
        pairs
            .iter()
            .map(|&(k, v)| {
                ScalarValue::Struct(StructValue::new(
                    entry_fields(),
                    vec![ScalarValue::from(k), ScalarValue::from(v)],
                ))
            })
            .collect(),
    )
}

// ============================================================================
// element_at
// ============================================================================

#[test]
fn test_element_at_map() {
    let map = string_long_map(&[("a", Some(1)), ("b", None)]);
    assert_eq!(eval("element_at", vec![map.clone(), string("a")]), long(1));
    assert_eq!(eval("element_at", vec![map.clone(), string("b")]), ScalarValue::Null);
    assert_eq!(eval("element_at", vec![map, string("z")]), ScalarValue::Null);
}

#[test]
fn test_element_at_missing_key_under_ansi() {
    let ansi = FunctionConfig::default().with_ansi(true);
    let map = string_long_map(&[("a", Some(1))]);
    let err = try_eval_with(ansi, "element_at", vec![map, string("z")]).unwrap_err();
    assert_eq!(err.to_string(), "Key z does not exist in element_at");
}

#[test]
fn test_element_at_key_type_mismatch() {
    let map = string_long_map(&[("a", Some(1))]);
    let err = try_eval("element_at", vec![map, long(1)]).unwrap_err();
    assert!(matches!(
        err,
        FunctionError::UnexpectedInputType { position: 2, .. }
    ));
}

#[test]
fn test_element_at_untyped_null_container() {
    let err = try_eval("element_at", vec![ScalarValue::Null, long(1)]).unwrap_err();
    assert!(matches!(err, FunctionError::UntypedNull { position: 1, .. }));
}

// ============================================================================
// map_from_arrays
// ============================================================================

#[test]
fn test_map_from_arrays() {
    let map = eval(
        "map_from_arrays",
        vec![longs(&[1, 2]), strings(&["one", "two"])],
    );
    assert_eq!(map.to_string(), "{1 -> one, 2 -> two}");
}

#[test]
fn test_map_from_arrays_last_key_wins() {
    let map = eval(
        "map_from_arrays",
        vec![longs(&[1, 2, 1]), strings(&["a", "b", "c"])],
    );
    // The repeated key keeps its first position
    assert_eq!(map.to_string(), "{1 -> c, 2 -> b}");
}

#[test]
fn test_map_from_arrays_duplicate_key_exception() {
    let strict = FunctionConfig::default().with_map_key_dedup_policy(MapKeyDedupPolicy::Exception);
    let err = try_eval_with(
        strict,
        "map_from_arrays",
        vec![longs(&[1, 1]), strings(&["a", "b"])],
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Duplicate map key 1 was found in map_from_arrays");
    assert!(err.is_evaluation());
}

#[test]
fn test_map_from_arrays_row_errors() {
    let err = try_eval(
        "map_from_arrays",
        vec![nullable_longs(&[Some(1), None]), strings(&["a", "b"])],
    )
    .unwrap_err();
    assert!(matches!(err, FunctionError::NullMapKey { .. }));

    let err = try_eval("map_from_arrays", vec![longs(&[1, 2]), strings(&["a"])]).unwrap_err();
    assert!(matches!(
        err,
        FunctionError::LengthMismatch {
            keys: 2,
            values: 1,
            ..
        }
    ));
}

#[test]
fn test_map_from_arrays_rejects_map_keys() {
    let map_keys = DataType::array(DataType::map(DataType::Long, DataType::Long, false), false);
    let err = resolve_err(
        "map_from_arrays",
        &[
            Operand::column(map_keys, false),
            Operand::column(long_array_type(), false),
        ],
    );
    assert!(matches!(err, FunctionError::UnorderableType { .. }));
}

// ============================================================================
// map_from_entries
// ============================================================================

#[test]
fn test_map_from_entries() {
    let map = eval(
        "map_from_entries",
        vec![entries(&[(Some(1), Some("a")), (Some(2), None)])],
    );
    assert_eq!(map.to_string(), "{1 -> a, 2 -> NULL}");
}

#[test]
fn test_map_from_entries_null_entry_gives_null() {
    let array = ScalarValue::array(
        DataType::Struct(entry_fields()),
        vec![
            ScalarValue::Struct(StructValue::new(
                entry_fields(),
                vec![long(1), string("a")],
            )),
            ScalarValue::Null,
        ],
    );
    assert_eq!(eval("map_from_entries", vec![array]), ScalarValue::Null);
}

#[test]
fn test_map_from_entries_null_key() {
    let err = try_eval(
        "map_from_entries",
        vec![entries(&[(None, Some("a"))])],
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Cannot use null as map key in map_from_entries");
}

#[test]
fn test_map_from_entries_requires_pairs() {
    let err = try_eval("map_from_entries", vec![longs(&[1])]).unwrap_err();
    assert!(matches!(
        err,
        FunctionError::UnexpectedInputType { position: 1, .. }
    ));
}

// ============================================================================
// map_entries / map_keys / map_values
// ============================================================================

#[test]
fn test_map_accessors_follow_entry_order() {
    let map = string_long_map(&[("b", Some(2)), ("a", None)]);
    assert_eq!(eval("map_keys", vec![map.clone()]), strings(&["b", "a"]));
    assert_eq!(
        eval("map_values", vec![map.clone()]),
        nullable_longs(&[Some(2), None])
    );
    assert_eq!(
        eval("map_entries", vec![map]).to_string(),
        "[{key: b, value: 2}, {key: a, value: NULL}]"
    );
}

#[test]
fn test_map_entries_result_type() {
    let bound = engine()
        .resolve(
            "map_entries",
            &[Operand::column(
                DataType::map(DataType::String, DataType::Long, true),
                false,
            )],
        )
        .unwrap();
    assert_eq!(
        bound.return_type(),
        &DataType::array(
            DataType::Struct(vec![
                StructField::new("key", DataType::String, false),
                StructField::new("value", DataType::Long, true),
            ]),
            false
        )
    );
    assert!(!bound.nullable());
}

#[test]
fn test_map_functions_propagate_null() {
    let operands = [Operand::typed_null(DataType::map(
        DataType::String,
        DataType::Long,
        false,
    ))];
    for name in ["map_keys", "map_values", "map_entries"] {
        assert_eq!(
            eval_row(name, &operands, vec![ScalarValue::Null]).unwrap(),
            ScalarValue::Null
        );
    }
}
