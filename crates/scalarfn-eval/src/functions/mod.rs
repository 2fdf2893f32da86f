//! Evaluation routines for the built-in functions
//!
//! Each routine takes already-typed values and is usable without the
//! resolver. Wrong value kinds are reported as internal errors: after
//! resolution they cannot occur.

pub mod collection;
pub mod conditional;
pub mod hash;
pub mod map;
pub mod mask;
pub mod math;

use crate::error::{FnResult, FunctionError};
use scalarfn_types::{ArrayValue, MapValue, ScalarValue};

fn mismatch(function: &str, expected: &str, found: &ScalarValue) -> FunctionError {
    FunctionError::internal(
        function,
        format!("expected {}, got {}", expected, found.data_type()),
    )
}

/// Array argument, None for null
pub(crate) fn array_arg<'a>(
    function: &str,
    value: &'a ScalarValue,
) -> FnResult<Option<&'a ArrayValue>> {
    match value {
        ScalarValue::Null => Ok(None),
        ScalarValue::Array(array) => Ok(Some(array)),
        other => Err(mismatch(function, "array", other)),
    }
}

/// Map argument, None for null
pub(crate) fn map_arg<'a>(function: &str, value: &'a ScalarValue) -> FnResult<Option<&'a MapValue>> {
    match value {
        ScalarValue::Null => Ok(None),
        ScalarValue::Map(map) => Ok(Some(map)),
        other => Err(mismatch(function, "map", other)),
    }
}

/// Integer argument, None for null
pub(crate) fn long_arg(function: &str, value: &ScalarValue) -> FnResult<Option<i64>> {
    match value {
        ScalarValue::Null => Ok(None),
        ScalarValue::Long(n) => Ok(Some(*n)),
        other => Err(mismatch(function, "bigint", other)),
    }
}

/// String argument, None for null
pub(crate) fn string_arg<'a>(function: &str, value: &'a ScalarValue) -> FnResult<Option<&'a str>> {
    match value {
        ScalarValue::Null => Ok(None),
        ScalarValue::String(s) => Ok(Some(s)),
        other => Err(mismatch(function, "string", other)),
    }
}
