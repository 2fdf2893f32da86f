//! Variadic helpers: coalesce, least, greatest, struct and named_struct

use crate::error::{FnResult, FunctionError};
use crate::ordering::{compare_values, NullOrdering};
use scalarfn_types::{ScalarValue, StructField, StructValue};
use std::cmp::Ordering;

/// First non-null argument, or null
pub fn coalesce(args: &[ScalarValue]) -> ScalarValue {
    args.iter()
        .find(|value| !value.is_null())
        .cloned()
        .unwrap_or(ScalarValue::Null)
}

/// Smallest non-null argument, or null if all are null
pub fn least(args: &[ScalarValue]) -> ScalarValue {
    pick(args, Ordering::Less)
}

/// Largest non-null argument, or null if all are null
pub fn greatest(args: &[ScalarValue]) -> ScalarValue {
    pick(args, Ordering::Greater)
}

fn pick(args: &[ScalarValue], wanted: Ordering) -> ScalarValue {
    let mut best: Option<&ScalarValue> = None;
    for value in args.iter().filter(|value| !value.is_null()) {
        match best {
            Some(current) if compare_values(value, current, NullOrdering::NullsLast) != wanted => {}
            _ => best = Some(value),
        }
    }
    best.cloned().unwrap_or(ScalarValue::Null)
}

/// Field names used by `struct`: col1, col2, ...
pub fn default_field_name(position: usize) -> String {
    format!("col{}", position + 1)
}

/// Struct with the given fields holding `values` in order
pub fn make_struct(fields: &[StructField], values: &[ScalarValue]) -> FnResult<ScalarValue> {
    if fields.len() != values.len() {
        return Err(FunctionError::internal(
            "struct",
            format!("{} fields but {} values", fields.len(), values.len()),
        ));
    }
    Ok(ScalarValue::Struct(StructValue::new(
        fields.to_vec(),
        values.to_vec(),
    )))
}
