//! Property Tests
//!
//! Algebraic laws that must hold for every input, checked over generated
//! arrays with nulls, duplicates and special doubles.

use crate::common::*;
use proptest::prelude::*;
use scalarfn_types::{DataType, ScalarValue};

fn arb_long() -> impl Strategy<Value = ScalarValue> {
    prop_oneof![
        4 => (-5i64..5).prop_map(ScalarValue::Long),
        1 => Just(ScalarValue::Null),
    ]
}

fn arb_double() -> impl Strategy<Value = ScalarValue> {
    prop_oneof![
        4 => (-5i32..5).prop_map(|d| ScalarValue::Double(f64::from(d) / 2.0)),
        1 => Just(ScalarValue::Double(f64::NAN)),
        1 => Just(ScalarValue::Double(-0.0)),
        1 => Just(ScalarValue::Null),
    ]
}

fn arb_long_array() -> impl Strategy<Value = ScalarValue> {
    prop::collection::vec(arb_long(), 0..12)
        .prop_map(|elements| ScalarValue::array(DataType::Long, elements))
}

fn arb_array() -> impl Strategy<Value = ScalarValue> {
    prop_oneof![
        arb_long_array(),
        prop::collection::vec(arb_double(), 0..12)
            .prop_map(|elements| ScalarValue::array(DataType::Double, elements)),
    ]
}

fn len_of(array: &ScalarValue) -> i64 {
    array.as_array().map_or(0, |a| a.len() as i64)
}

proptest! {
    #[test]
    fn distinct_is_idempotent(array in arb_array()) {
        let once = eval("array_distinct", vec![array]);
        let twice = eval("array_distinct", vec![once.clone()]);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn distinct_never_grows(array in arb_array()) {
        let distinct = eval("array_distinct", vec![array.clone()]);
        prop_assert!(len_of(&distinct) <= len_of(&array));
    }

    #[test]
    fn reverse_is_self_inverse(array in arb_array()) {
        let back = eval("reverse", vec![eval("reverse", vec![array.clone()])]);
        prop_assert_eq!(back, array);
    }

    #[test]
    fn reverse_string_is_self_inverse(text in "\\PC{0,16}") {
        let back = eval("reverse", vec![eval("reverse", vec![string(&text)])]);
        prop_assert_eq!(back, string(&text));
    }

    #[test]
    fn descending_sort_reverses_ascending(array in arb_array()) {
        let ascending = eval("sort_array", vec![array.clone(), ScalarValue::Boolean(true)]);
        let descending = eval("sort_array", vec![array, ScalarValue::Boolean(false)]);
        prop_assert_eq!(descending, eval("reverse", vec![ascending]));
    }

    #[test]
    fn sort_is_idempotent(array in arb_array()) {
        let sorted = eval("array_sort", vec![array]);
        prop_assert_eq!(eval("array_sort", vec![sorted.clone()]), sorted);
    }

    #[test]
    fn full_slice_is_identity(array in arb_long_array()) {
        let length = len_of(&array);
        let sliced = eval("slice", vec![array.clone(), long(1), long(length)]);
        prop_assert_eq!(sliced, array);
    }

    #[test]
    fn concat_with_null_is_null(left in "[a-z]{0,8}") {
        prop_assert_eq!(
            eval("concat", vec![string(&left), ScalarValue::Null]),
            ScalarValue::Null
        );
    }

    #[test]
    fn union_with_self_is_distinct(array in arb_array()) {
        prop_assert_eq!(
            eval("array_union", vec![array.clone(), array.clone()]),
            eval("array_distinct", vec![array])
        );
    }

    #[test]
    fn compact_leaves_no_nulls(array in arb_array()) {
        let compacted = eval("array_compact", vec![array]);
        prop_assert!(compacted.as_array().is_some_and(|a| !a.has_null()));
    }

    #[test]
    fn pmod_takes_sign_of_divisor(a in any::<i64>(), b in any::<i64>().prop_filter("non-zero", |b| *b != 0)) {
        let result = eval("pmod", vec![long(a), long(b)]);
        let r = result.as_long().unwrap_or_default();
        prop_assert!(r == 0 || (r < 0) == (b < 0));
        prop_assert!(r.unsigned_abs() < b.unsigned_abs());
    }

    #[test]
    fn hash_is_deterministic(array in arb_long_array(), text in "[a-z]{0,8}") {
        let args = vec![array, string(&text)];
        prop_assert_eq!(eval("hash", args.clone()), eval("hash", args));
    }
}
