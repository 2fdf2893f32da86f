//! Collection Function Tests
//!
//! Tests for: size, array_distinct, array_remove, array_position,
//! array_contains, element_at, slice, array_repeat, flatten, arrays_zip,
//! concat, reverse, sort_array, array_sort, array_min, array_max,
//! arrays_overlap, array_union, array_intersect, array_except, array_join,
//! array_compact

use crate::common::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use scalarfn_eval::{FunctionConfig, FunctionError, Operand};
use scalarfn_types::{DataType, ScalarValue};

// ============================================================================
// size
// ============================================================================

#[test]
fn test_size_of_array_and_map() {
    assert_eq!(eval("size", vec![longs(&[1, 2, 3])]), long(3));
    assert_eq!(eval("cardinality", vec![longs(&[])]), long(0));
    assert_eq!(
        eval("size", vec![string_long_map(&[("a", Some(1)), ("b", None)])]),
        long(2)
    );
}

#[test]
fn test_size_of_null_follows_config() {
    assert_eq!(eval("size", vec![ScalarValue::Null]), long(-1));

    let modern = FunctionConfig::default().with_legacy_size_of_null(false);
    assert_eq!(
        try_eval_with(modern, "size", vec![ScalarValue::Null]).unwrap(),
        ScalarValue::Null
    );

    let ansi = FunctionConfig::default().with_ansi(true);
    assert_eq!(
        try_eval_with(ansi, "size", vec![ScalarValue::Null]).unwrap(),
        ScalarValue::Null
    );
}

// ============================================================================
// array_distinct / array_remove / array_position / array_contains
// ============================================================================

#[test]
fn test_array_distinct_keeps_first_occurrence() {
    assert_eq!(
        eval(
            "array_distinct",
            vec![nullable_longs(&[Some(3), Some(1), None, Some(3), None, Some(1)])]
        ),
        nullable_longs(&[Some(3), Some(1), None])
    );
}

#[test]
fn test_array_distinct_treats_nan_as_equal() {
    let doubles = ScalarValue::array(
        DataType::Double,
        vec![
            ScalarValue::Double(f64::NAN),
            ScalarValue::Double(-0.0),
            ScalarValue::Double(f64::NAN),
            ScalarValue::Double(0.0),
        ],
    );
    let result = eval("array_distinct", vec![doubles]);
    assert_eq!(result.as_array().map(|a| a.len()), Some(2));
}

#[test]
fn test_array_remove() {
    assert_eq!(
        eval(
            "array_remove",
            vec![nullable_longs(&[Some(1), Some(2), None, Some(2)]), long(2)]
        ),
        nullable_longs(&[Some(1), None])
    );
}

#[test]
fn test_array_remove_null_value() {
    let operands = [
        Operand::column(long_array_type(), false),
        Operand::typed_null(DataType::Long),
    ];
    assert_eq!(
        eval_row(
            "array_remove",
            &operands,
            vec![longs(&[1, 2]), ScalarValue::Null]
        )
        .unwrap(),
        ScalarValue::Null
    );
}

#[rstest]
#[case(&[Some(3), Some(2), Some(3)], 3, 1)]
#[case(&[Some(3), Some(2), Some(3)], 2, 2)]
#[case(&[None, Some(2)], 2, 2)]
#[case(&[Some(1)], 5, 0)]
#[case(&[], 5, 0)]
fn test_array_position(#[case] values: &[Option<i64>], #[case] needle: i64, #[case] expected: i64) {
    assert_eq!(
        eval("array_position", vec![nullable_longs(values), long(needle)]),
        long(expected)
    );
}

#[rstest]
#[case(&[Some(1), Some(2)], 2, ScalarValue::Boolean(true))]
#[case(&[Some(1), Some(2)], 3, ScalarValue::Boolean(false))]
#[case(&[Some(1), None], 1, ScalarValue::Boolean(true))]
#[case(&[Some(1), None], 3, ScalarValue::Null)]
#[case(&[], 3, ScalarValue::Boolean(false))]
fn test_array_contains(
    #[case] values: &[Option<i64>],
    #[case] needle: i64,
    #[case] expected: ScalarValue,
) {
    assert_eq!(
        eval("array_contains", vec![nullable_longs(values), long(needle)]),
        expected
    );
}

#[test]
fn test_array_contains_untyped_null_is_rejected() {
    let err = try_eval("array_contains", vec![longs(&[1]), ScalarValue::Null]).unwrap_err();
    assert!(matches!(err, FunctionError::UntypedNull { position: 2, .. }));
    assert!(err.is_resolution());
}

#[test]
fn test_array_contains_type_mismatch() {
    let err = try_eval("array_contains", vec![longs(&[1]), string("1")]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Argument 2 of array_contains requires bigint, but found string"
    );
}

// ============================================================================
// element_at
// ============================================================================

#[rstest]
#[case(1, long(10))]
#[case(3, long(30))]
#[case(-1, long(30))]
#[case(-3, long(10))]
#[case(4, ScalarValue::Null)]
#[case(-4, ScalarValue::Null)]
fn test_element_at_array(#[case] index: i64, #[case] expected: ScalarValue) {
    assert_eq!(
        eval("element_at", vec![longs(&[10, 20, 30]), long(index)]),
        expected
    );
}

#[test]
fn test_element_at_zero_is_evaluation_error() {
    // Resolution succeeds; the index is only checked per row
    let bound = engine()
        .resolve(
            "element_at",
            &[
                Operand::column(long_array_type(), false),
                Operand::column(DataType::Long, false),
            ],
        )
        .unwrap();
    let err = bound.evaluate(&[longs(&[1, 2]), long(0)]).unwrap_err();
    assert!(err.is_evaluation());
    assert_eq!(
        err.to_string(),
        "Invalid index 0 in element_at: SQL array indices start at 1"
    );
}

#[test]
fn test_element_at_out_of_bounds_under_ansi() {
    let ansi = FunctionConfig::default().with_ansi(true);
    let err = try_eval_with(ansi, "element_at", vec![longs(&[1, 2]), long(3)]).unwrap_err();
    assert!(matches!(
        err,
        FunctionError::IndexOutOfBounds {
            index: 3,
            length: 2,
            ..
        }
    ));
}

// ============================================================================
// slice / array_repeat
// ============================================================================

#[rstest]
#[case(2, 2, &[2, 3])]
#[case(-2, 2, &[3, 4])]
#[case(1, 10, &[1, 2, 3, 4])]
#[case(5, 1, &[])]
#[case(-5, 1, &[])]
#[case(2, 0, &[])]
fn test_slice(#[case] start: i64, #[case] length: i64, #[case] expected: &[i64]) {
    assert_eq!(
        eval("slice", vec![longs(&[1, 2, 3, 4]), long(start), long(length)]),
        longs(expected)
    );
}

#[test]
fn test_slice_errors() {
    let err = try_eval("slice", vec![longs(&[1]), long(0), long(1)]).unwrap_err();
    assert!(matches!(err, FunctionError::ZeroIndex { .. }));

    let err = try_eval("slice", vec![longs(&[1]), long(1), long(-1)]).unwrap_err();
    assert!(matches!(err, FunctionError::NegativeLength { length: -1, .. }));
}

#[test]
fn test_array_repeat() {
    assert_eq!(
        eval("array_repeat", vec![string("ab"), long(3)]),
        strings(&["ab", "ab", "ab"])
    );
    assert_eq!(eval("array_repeat", vec![long(1), long(-2)]), longs(&[]));

    let repeated_null = eval("array_repeat", vec![ScalarValue::Null, long(2)]);
    assert_eq!(
        repeated_null.as_array().map(|a| a.elements.clone()),
        Some(vec![ScalarValue::Null, ScalarValue::Null])
    );
}

#[test]
fn test_array_repeat_limit() {
    let small = FunctionConfig::default().with_max_array_length(10);
    let err = try_eval_with(small, "array_repeat", vec![long(1), long(11)]).unwrap_err();
    assert!(matches!(err, FunctionError::ArraySizeExceeded { size: 11, .. }));
}

// ============================================================================
// flatten / arrays_zip / concat / reverse
// ============================================================================

#[test]
fn test_flatten() {
    let nested = ScalarValue::array(
        DataType::array(DataType::Long, false),
        vec![longs(&[1, 2, 3]), longs(&[4, 5]), longs(&[6])],
    );
    assert_eq!(eval("flatten", vec![nested]), longs(&[1, 2, 3, 4, 5, 6]));

    let with_empty = ScalarValue::array(
        DataType::array(DataType::Long, false),
        vec![longs(&[1]), longs(&[])],
    );
    assert_eq!(eval("flatten", vec![with_empty]), longs(&[1]));

    let with_null = ScalarValue::array(
        DataType::array(DataType::Long, false),
        vec![longs(&[1]), ScalarValue::Null],
    );
    assert_eq!(eval("flatten", vec![with_null]), ScalarValue::Null);
}

#[test]
fn test_flatten_requires_nested_array() {
    let err = try_eval("flatten", vec![longs(&[1])]).unwrap_err();
    assert!(matches!(err, FunctionError::UnexpectedInputType { .. }));
}

#[test]
fn test_arrays_zip_pads_shorter_inputs() {
    let zipped = eval("arrays_zip", vec![longs(&[1, 2]), strings(&["a"])]);
    let rows: Vec<String> = zipped
        .as_array()
        .map(|a| a.iter().map(ToString::to_string).collect())
        .unwrap_or_default();
    assert_eq!(rows, vec!["{0: 1, 1: a}", "{0: 2, 1: NULL}"]);
}

#[test]
fn test_arrays_zip_equal_lengths() {
    let zipped = eval(
        "arrays_zip",
        vec![longs(&[9001, 9002, 9003]), longs(&[4, 5, 6])],
    );
    assert_eq!(
        zipped.to_string(),
        "[{0: 9001, 1: 4}, {0: 9002, 1: 5}, {0: 9003, 1: 6}]"
    );
}

#[test]
fn test_concat() {
    assert_eq!(
        eval("concat", vec![string("Spark"), string("SQL")]),
        string("SparkSQL")
    );
    assert_eq!(eval("concat", vec![]), string(""));
    assert_eq!(
        eval("concat", vec![longs(&[1, 2]), longs(&[3])]),
        longs(&[1, 2, 3])
    );
    assert_eq!(
        eval(
            "concat",
            vec![
                ScalarValue::Binary(vec![1]),
                ScalarValue::Binary(vec![2, 3])
            ]
        ),
        ScalarValue::Binary(vec![1, 2, 3])
    );
    assert_eq!(
        eval("concat", vec![string("a"), ScalarValue::Null]),
        ScalarValue::Null
    );
}

#[test]
fn test_concat_rejects_mixed_kinds() {
    let err = try_eval("concat", vec![string("a"), longs(&[1])]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Input to concat should all be the same type, but found [string, array<bigint>]; argument 2 does not match"
    );
}

#[test]
fn test_reverse() {
    assert_eq!(eval("reverse", vec![string("Spark SQL")]), string("LQS krapS"));
    assert_eq!(eval("reverse", vec![string("héllo")]), string("olléh"));
    assert_eq!(
        eval("reverse", vec![nullable_longs(&[Some(2), None, Some(4)])]),
        nullable_longs(&[Some(4), None, Some(2)])
    );
    assert_eq!(eval("reverse", vec![ScalarValue::Null]), ScalarValue::Null);
}

// ============================================================================
// sort_array / array_sort / array_min / array_max
// ============================================================================

#[test]
fn test_sort_array_null_placement() {
    let input = nullable_longs(&[Some(3), None, Some(1), Some(2)]);
    assert_eq!(
        eval("sort_array", vec![input.clone()]),
        nullable_longs(&[None, Some(1), Some(2), Some(3)])
    );
    assert_eq!(
        eval("sort_array", vec![input.clone(), ScalarValue::Boolean(false)]),
        nullable_longs(&[Some(3), Some(2), Some(1), None])
    );
    assert_eq!(
        eval("array_sort", vec![input]),
        nullable_longs(&[Some(1), Some(2), Some(3), None])
    );
}

#[test]
fn test_sort_array_doubles() {
    let input = ScalarValue::array(
        DataType::Double,
        vec![
            ScalarValue::Double(f64::NAN),
            ScalarValue::Double(1.5),
            ScalarValue::Double(f64::NEG_INFINITY),
        ],
    );
    let sorted = eval("sort_array", vec![input]);
    let values: Vec<String> = sorted
        .as_array()
        .map(|a| a.iter().map(ToString::to_string).collect())
        .unwrap_or_default();
    assert_eq!(values, vec!["-inf", "1.5", "NaN"]);
}

#[test]
fn test_sort_array_direction_must_be_constant() {
    let err = resolve_err(
        "sort_array",
        &[
            Operand::column(long_array_type(), false),
            Operand::column(DataType::Boolean, false),
        ],
    );
    assert!(matches!(
        err,
        FunctionError::NonFoldableArgument { position: 2, .. }
    ));
}

#[test]
fn test_array_sort_rejects_maps() {
    let maps = DataType::array(DataType::map(DataType::String, DataType::Long, false), false);
    let err = resolve_err("array_sort", &[Operand::column(maps, false)]);
    assert_eq!(
        err.to_string(),
        "array_sort does not support ordering on type map<string,bigint>"
    );
}

#[test]
fn test_array_min_max() {
    let input = nullable_longs(&[Some(4), None, Some(-2), Some(9)]);
    assert_eq!(eval("array_min", vec![input.clone()]), long(-2));
    assert_eq!(eval("array_max", vec![input]), long(9));
    assert_eq!(eval("array_max", vec![longs(&[])]), ScalarValue::Null);
    assert_eq!(
        eval("array_min", vec![nullable_longs(&[None, None])]),
        ScalarValue::Null
    );
    assert_eq!(
        eval("array_max", vec![strings(&["b", "ab", "c"])]),
        string("c")
    );
}

// ============================================================================
// arrays_overlap and set operations
// ============================================================================

#[rstest]
#[case(&[Some(1), Some(2)], &[Some(2), Some(3)], ScalarValue::Boolean(true))]
#[case(&[Some(1), Some(2)], &[Some(3)], ScalarValue::Boolean(false))]
#[case(&[Some(1), None], &[Some(3)], ScalarValue::Null)]
#[case(&[None], &[], ScalarValue::Boolean(false))]
#[case(&[Some(1), None], &[Some(1)], ScalarValue::Boolean(true))]
fn test_arrays_overlap(
    #[case] left: &[Option<i64>],
    #[case] right: &[Option<i64>],
    #[case] expected: ScalarValue,
) {
    assert_eq!(
        eval(
            "arrays_overlap",
            vec![nullable_longs(left), nullable_longs(right)]
        ),
        expected
    );
}

#[test]
fn test_set_operations() {
    let left = nullable_longs(&[Some(1), Some(2), Some(2), None]);
    let right = nullable_longs(&[Some(3), Some(2), None, Some(3)]);

    assert_eq!(
        eval("array_union", vec![left.clone(), right.clone()]),
        nullable_longs(&[Some(1), Some(2), None, Some(3)])
    );
    assert_eq!(
        eval("array_intersect", vec![left.clone(), right.clone()]),
        nullable_longs(&[Some(2), None])
    );
    assert_eq!(
        eval("array_except", vec![left, right]),
        nullable_longs(&[Some(1)])
    );
}

#[test]
fn test_empty_untyped_array_meets_any_element_type() {
    let empty = || ScalarValue::array(DataType::Null, vec![]);
    assert_eq!(
        eval("arrays_overlap", vec![empty(), longs(&[1])]),
        ScalarValue::Boolean(false)
    );
    assert_eq!(
        eval("array_union", vec![empty(), longs(&[1])]),
        longs(&[1])
    );
    assert_eq!(
        eval("array_contains", vec![empty(), long(1)]),
        ScalarValue::Boolean(false)
    );
    assert_eq!(eval("array_position", vec![empty(), long(1)]), long(0));
}

#[test]
fn test_set_operation_type_mismatch() {
    let err = try_eval("array_union", vec![longs(&[1]), strings(&["a"])]).unwrap_err();
    assert!(matches!(
        err,
        FunctionError::IncompatibleInputTypes { position: 2, .. }
    ));
}

// ============================================================================
// array_join / array_compact
// ============================================================================

#[test]
fn test_array_join() {
    let words = nullable_strings(&[Some("hello"), None, Some("world")]);
    assert_eq!(
        eval("array_join", vec![words.clone(), string(" ")]),
        string("hello world")
    );
    assert_eq!(
        eval("array_join", vec![words, string(","), string("?")]),
        string("hello,?,world")
    );
    assert_eq!(
        eval("array_join", vec![strings(&[]), string(",")]),
        string("")
    );
}

#[test]
fn test_array_join_requires_strings() {
    let err = try_eval("array_join", vec![longs(&[1]), string(",")]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Argument 1 of array_join requires array<string>, but found array<bigint>"
    );
}

#[test]
fn test_array_compact() {
    let compacted = eval(
        "array_compact",
        vec![nullable_longs(&[None, Some(1), None, Some(2)])],
    );
    assert_eq!(compacted, longs(&[1, 2]));
    assert_eq!(
        compacted.as_array().map(|a| a.contains_null),
        Some(false)
    );
}
