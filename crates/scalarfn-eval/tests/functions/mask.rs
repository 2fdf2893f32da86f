//! Masking Function Tests
//!
//! Tests for: mask, mask_first_n, mask_last_n, mask_show_first_n,
//! mask_show_last_n, mask_hash

use crate::common::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use scalarfn_eval::{FunctionError, Operand};
use scalarfn_types::{DataType, ScalarValue};

const INPUT: &str = "abcd-EFGH-8765-4321";

#[rstest]
#[case("mask", "xxxx-XXXX-nnnn-nnnn")]
#[case("mask_first_n", "xxxx-EFGH-8765-4321")]
#[case("mask_last_n", "abcd-EFGH-8765-nnnn")]
#[case("mask_show_first_n", "abcd-XXXX-nnnn-nnnn")]
#[case("mask_show_last_n", "xxxx-XXXX-nnnn-4321")]
fn test_mask_defaults(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(eval(name, vec![string(INPUT)]), string(expected));
}

#[rstest]
#[case("mask_first_n", 6, "xxxx-XFGH-8765-4321")]
#[case("mask_last_n", 6, "abcd-EFGH-876n-nnnn")]
#[case("mask_show_first_n", 6, "abcd-EXXX-nnnn-nnnn")]
#[case("mask_show_last_n", 6, "xxxx-XXXX-nnn5-4321")]
#[case("mask_first_n", 100, "xxxx-XXXX-nnnn-nnnn")]
#[case("mask_first_n", -3, INPUT)]
#[case("mask_show_first_n", 0, "xxxx-XXXX-nnnn-nnnn")]
fn test_mask_counts(#[case] name: &str, #[case] n: i64, #[case] expected: &str) {
    assert_eq!(eval(name, vec![string(INPUT), long(n)]), string(expected));
}

#[test]
fn test_mask_mixed_case_input() {
    assert_eq!(eval("mask", vec![string("TestString-123")]), string("XxxxXxxxxx-nnn"));
    assert_eq!(
        eval(
            "mask",
            vec![string("TestString-123"), string("U"), string("l"), string("#")]
        ),
        string("UlllUlllll-###")
    );
    assert_eq!(
        eval("mask_first_n", vec![string("TestString-123"), long(4)]),
        string("XxxxString-123")
    );
    assert_eq!(
        eval("mask_last_n", vec![string("TestString-123"), long(4)]),
        string("TestString-nnn")
    );
}

#[test]
fn test_mask_null_count_means_default() {
    assert_eq!(
        eval("mask_first_n", vec![string(INPUT), ScalarValue::Null]),
        string("xxxx-EFGH-8765-4321")
    );
}

#[test]
fn test_mask_custom_characters() {
    assert_eq!(
        eval("mask", vec![string(INPUT), string("Q"), string("q"), string("#")]),
        string("qqqq-QQQQ-####-####")
    );
    // Only the first character of a replacement counts
    assert_eq!(
        eval("mask", vec![string("Ab1"), string("UPPER")]),
        string("Uxn")
    );
    assert_eq!(
        eval(
            "mask_last_n",
            vec![string(INPUT), long(4), string("U"), string("l"), string("*")]
        ),
        string("abcd-EFGH-8765-****")
    );
}

#[test]
fn test_mask_null_or_empty_replacement_keeps_default() {
    assert_eq!(
        eval("mask", vec![string("aB3"), ScalarValue::Null, string("")]),
        string("xXn")
    );
}

#[test]
fn test_mask_leaves_other_characters() {
    assert_eq!(eval("mask", vec![string("ÄÖ ü_9")]), string("ÄÖ ü_n"));
    assert_eq!(eval("mask", vec![string("")]), string(""));
    assert_eq!(eval("mask", vec![ScalarValue::Null]), ScalarValue::Null);
}

#[test]
fn test_mask_replacements_must_be_constant() {
    let err = resolve_err(
        "mask_show_last_n",
        &[
            Operand::column(DataType::String, true),
            Operand::literal(long(2)),
            Operand::column(DataType::String, true),
        ],
    );
    assert_eq!(
        err.to_string(),
        "Argument 3 (upper) of mask_show_last_n must be a constant"
    );
}

#[test]
fn test_mask_count_may_vary_per_row() {
    let operands = [
        Operand::column(DataType::String, true),
        Operand::column(DataType::Long, true),
    ];
    let bound = engine().resolve("mask_first_n", &operands).unwrap();
    assert_eq!(
        bound.evaluate(&[string("abcdef"), long(2)]).unwrap(),
        string("xxcdef")
    );
    assert_eq!(
        bound.evaluate(&[string("abcdef"), long(5)]).unwrap(),
        string("xxxxxf")
    );
}

#[test]
fn test_mask_rejects_non_string_input() {
    let err = try_eval("mask", vec![long(1234)]).unwrap_err();
    assert!(matches!(
        err,
        FunctionError::UnexpectedInputType { position: 1, .. }
    ));
}

#[test]
fn test_mask_hash() {
    assert_eq!(
        eval("mask_hash", vec![string(INPUT)]),
        string("60c713f5ec6912229d2060df1c322776")
    );
    assert_eq!(eval("mask_hash", vec![ScalarValue::Null]), ScalarValue::Null);
}
