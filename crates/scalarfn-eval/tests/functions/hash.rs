//! Hash Function Tests
//!
//! Tests for: md5, sha1, sha2, crc32, hash

use crate::common::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use scalarfn_eval::{FunctionError, Operand};
use scalarfn_types::{DataType, ScalarValue};

#[rstest]
#[case("md5", string("8cde774d6f7333752ed72cacddb05126"))]
#[case("sha1", string("85f5955f4b27a9a4c2aab6ffe5d7189fc298b92c"))]
#[case("sha", string("85f5955f4b27a9a4c2aab6ffe5d7189fc298b92c"))]
#[case("crc32", long(1_557_323_817))]
fn test_digests(#[case] name: &str, #[case] expected: ScalarValue) {
    assert_eq!(eval(name, vec![string("Spark")]), expected);
    assert_eq!(eval(name, vec![ScalarValue::Null]), ScalarValue::Null);
}

#[test]
fn test_binary_input() {
    assert_eq!(
        eval("md5", vec![ScalarValue::Binary(b"Spark".to_vec())]),
        string("8cde774d6f7333752ed72cacddb05126")
    );
}

#[rstest]
#[case(224, "dbeab94971678d36af2195851c0f7485775a2a7c60073d62fc04549c")]
#[case(256, "529bc3b07127ecb7e53a4dcf1991d9152c24537d919178022b2c42657f79a26b")]
fn test_sha2(#[case] bits: i64, #[case] expected: &str) {
    assert_eq!(eval("sha2", vec![string("Spark"), long(bits)]), string(expected));
}

#[test]
fn test_sha2_constant_bit_length_checked_at_resolution() {
    let err = try_eval("sha2", vec![string("Spark"), long(100)]).unwrap_err();
    assert!(err.is_resolution());
    assert!(matches!(err, FunctionError::InvalidParameter { .. }));
}

#[test]
fn test_sha2_row_bit_length_checked_per_row() {
    let operands = [
        Operand::column(DataType::String, false),
        Operand::column(DataType::Long, true),
    ];
    let bound = engine().resolve("sha2", &operands).unwrap();

    let digest = bound.evaluate(&[string("Spark"), long(512)]).unwrap();
    assert_eq!(digest.as_string().map(str::len), Some(128));

    let err = bound.evaluate(&[string("Spark"), long(100)]).unwrap_err();
    assert!(err.is_evaluation());

    assert_eq!(
        bound.evaluate(&[string("Spark"), ScalarValue::Null]).unwrap(),
        ScalarValue::Null
    );
}

#[test]
fn test_digest_rejects_numbers() {
    let err = try_eval("md5", vec![long(1)]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Argument 1 of md5 requires string or binary, but found bigint"
    );
}

#[rstest]
#[case(vec![string("Spark")], 228_093_765)]
#[case(vec![long(2)], -797_927_272)]
#[case(vec![ScalarValue::Boolean(true)], -559_580_957)]
#[case(vec![ScalarValue::Double(1.5)], 1_290_763_749)]
#[case(vec![string("Spark"), longs(&[123]), long(2)], 871_453_132)]
#[case(vec![long(2), string("Spark")], 1_847_377_847)]
fn test_hash(#[case] args: Vec<ScalarValue>, #[case] expected: i64) {
    assert_eq!(eval("hash", args), long(expected));
}

#[test]
fn test_hash_never_null() {
    let bound = engine()
        .resolve("hash", &[Operand::column(DataType::String, true)])
        .unwrap();
    assert!(!bound.nullable());
    assert_eq!(bound.evaluate(&[ScalarValue::Null]).unwrap(), long(42));
}

#[test]
fn test_hash_normalizes_negative_zero() {
    assert_eq!(
        eval("hash", vec![ScalarValue::Double(-0.0)]),
        eval("hash", vec![ScalarValue::Double(0.0)])
    );
}

#[test]
fn test_hash_rejects_maps() {
    let err = try_eval("hash", vec![long(1), string_long_map(&[("a", Some(1))])]).unwrap_err();
    assert!(matches!(
        err,
        FunctionError::UnexpectedInputType { position: 2, .. }
    ));
}
