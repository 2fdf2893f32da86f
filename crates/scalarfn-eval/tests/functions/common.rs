//! Shared test helpers
//!
//! Builders for array and map values plus shortcuts for resolving and
//! evaluating a call in one step.

#![allow(dead_code)]

use scalarfn_eval::{FnResult, FunctionConfig, FunctionEngine, FunctionError, Operand};
use scalarfn_types::{DataType, MapValue, ScalarValue};

// ============================================================================
// Evaluation
// ============================================================================

pub fn engine() -> FunctionEngine {
    FunctionEngine::new()
}

/// Evaluate a call whose arguments are all literals
pub fn try_eval(name: &str, args: Vec<ScalarValue>) -> FnResult<ScalarValue> {
    engine().evaluate_literals(name, args)
}

/// Evaluate a call whose arguments are all literals, panicking on error
pub fn eval(name: &str, args: Vec<ScalarValue>) -> ScalarValue {
    try_eval(name, args).unwrap_or_else(|err| panic!("{} failed: {}", name, err))
}

/// Evaluate a call with literal arguments under a custom configuration
pub fn try_eval_with(
    config: FunctionConfig,
    name: &str,
    args: Vec<ScalarValue>,
) -> FnResult<ScalarValue> {
    FunctionEngine::with_config(config).evaluate_literals(name, args)
}

/// Resolve against explicit operands, then evaluate one row
pub fn eval_row(name: &str, operands: &[Operand], row: Vec<ScalarValue>) -> FnResult<ScalarValue> {
    engine().resolve(name, operands)?.evaluate(&row)
}

/// Resolution error for the given operands
pub fn resolve_err(name: &str, operands: &[Operand]) -> FunctionError {
    match engine().resolve(name, operands) {
        Ok(bound) => panic!("{} resolved to {}", name, bound.return_type()),
        Err(err) => {
            assert!(err.is_resolution(), "{} is not a resolution error", err);
            err
        }
    }
}

// ============================================================================
// Values
// ============================================================================

pub fn longs(values: &[i64]) -> ScalarValue {
    ScalarValue::array(
        DataType::Long,
        values.iter().map(|&v| ScalarValue::Long(v)).collect(),
    )
}

pub fn nullable_longs(values: &[Option<i64>]) -> ScalarValue {
    ScalarValue::array(
        DataType::Long,
        values.iter().map(|&v| ScalarValue::from(v)).collect(),
    )
}

pub fn strings(values: &[&str]) -> ScalarValue {
    ScalarValue::array(
        DataType::String,
        values.iter().map(|&v| ScalarValue::string(v)).collect(),
    )
}

pub fn nullable_strings(values: &[Option<&str>]) -> ScalarValue {
    ScalarValue::array(
        DataType::String,
        values.iter().map(|&v| ScalarValue::from(v)).collect(),
    )
}

pub fn long_array_type() -> DataType {
    DataType::array(DataType::Long, true)
}

/// Map from string keys to bigint values
pub fn string_long_map(entries: &[(&str, Option<i64>)]) -> ScalarValue {
    ScalarValue::Map(MapValue::new(
        DataType::String,
        DataType::Long,
        false,
        entries
            .iter()
            .map(|&(k, v)| (ScalarValue::string(k), ScalarValue::from(v)))
            .collect(),
    ))
}

pub fn long(value: i64) -> ScalarValue {
    ScalarValue::Long(value)
}

pub fn string(value: &str) -> ScalarValue {
    ScalarValue::string(value)
}
