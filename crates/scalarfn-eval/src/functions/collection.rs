//! Collection functions over arrays
//!
//! Implements: size, array_distinct, array_remove, array_position,
//! array_contains, element_at (arrays), slice, array_repeat, flatten,
//! arrays_zip, concat, reverse, sort_array, array_sort, array_min, array_max,
//! arrays_overlap, array_union, array_intersect, array_except, array_join and
//! array_compact.

use super::{array_arg, long_arg, mismatch, string_arg};
use crate::config::FunctionConfig;
use crate::error::{FnResult, FunctionError};
use crate::ordering::{
    compare_values, contains_value, dedup_values, sort_values, values_equal, NullOrdering,
};
use scalarfn_types::{ArrayValue, DataType, ScalarValue, StructField, StructValue};
use std::cmp::Ordering;

/// Number of elements of an array or entries of a map.
///
/// Null gives -1 under the legacy setting with ANSI mode off, otherwise null.
pub fn size(value: &ScalarValue, config: &FunctionConfig) -> FnResult<ScalarValue> {
    match value {
        ScalarValue::Null if config.legacy_size_of_null && !config.ansi_enabled => {
            Ok(ScalarValue::Long(-1))
        }
        ScalarValue::Null => Ok(ScalarValue::Null),
        ScalarValue::Array(array) => Ok(ScalarValue::Long(array.len() as i64)),
        ScalarValue::Map(map) => Ok(ScalarValue::Long(map.len() as i64)),
        other => Err(mismatch("size", "array or map", other)),
    }
}

/// Remove duplicates, keeping the first occurrence of each value
pub fn array_distinct(array: &ScalarValue) -> FnResult<ScalarValue> {
    let Some(array) = array_arg("array_distinct", array)? else {
        return Ok(ScalarValue::Null);
    };
    Ok(rebuild(array, dedup_values(array.iter())))
}

/// Remove every element equal to `element`; null elements are kept
pub fn array_remove(array: &ScalarValue, element: &ScalarValue) -> FnResult<ScalarValue> {
    let Some(array) = array_arg("array_remove", array)? else {
        return Ok(ScalarValue::Null);
    };
    if element.is_null() {
        return Ok(ScalarValue::Null);
    }
    let kept = array
        .iter()
        .filter(|value| !values_equal(value, element))
        .cloned()
        .collect();
    Ok(rebuild(array, kept))
}

/// 1-based position of the first element equal to `element`, 0 if absent
pub fn array_position(array: &ScalarValue, element: &ScalarValue) -> FnResult<ScalarValue> {
    let Some(array) = array_arg("array_position", array)? else {
        return Ok(ScalarValue::Null);
    };
    if element.is_null() {
        return Ok(ScalarValue::Null);
    }
    let position = array
        .iter()
        .position(|value| !value.is_null() && values_equal(value, element))
        .map_or(0, |idx| idx as i64 + 1);
    Ok(ScalarValue::Long(position))
}

/// Whether the array holds `value`.
///
/// Unknown (null) when nothing matches but the array holds a null.
pub fn array_contains(array: &ScalarValue, value: &ScalarValue) -> FnResult<ScalarValue> {
    let Some(array) = array_arg("array_contains", array)? else {
        return Ok(ScalarValue::Null);
    };
    if value.is_null() {
        return Ok(ScalarValue::Null);
    }
    if array
        .iter()
        .any(|element| !element.is_null() && values_equal(element, value))
    {
        Ok(ScalarValue::Boolean(true))
    } else if array.has_null() {
        Ok(ScalarValue::Null)
    } else {
        Ok(ScalarValue::Boolean(false))
    }
}

/// Element at a 1-based index; negative indices count from the end.
///
/// Index 0 is an error. An index beyond the array gives null, or an error
/// under ANSI mode.
pub fn element_at(array: &ScalarValue, index: &ScalarValue, ansi: bool) -> FnResult<ScalarValue> {
    const FUNCTION: &str = "element_at";
    let Some(array) = array_arg(FUNCTION, array)? else {
        return Ok(ScalarValue::Null);
    };
    let Some(index) = long_arg(FUNCTION, index)? else {
        return Ok(ScalarValue::Null);
    };
    if index == 0 {
        return Err(FunctionError::ZeroIndex {
            function: FUNCTION.to_string(),
            index,
        });
    }

    let len = array.len();
    let magnitude = usize::try_from(index.unsigned_abs()).unwrap_or(usize::MAX);
    if magnitude > len {
        if ansi {
            return Err(FunctionError::IndexOutOfBounds {
                function: FUNCTION.to_string(),
                index,
                length: len,
            });
        }
        return Ok(ScalarValue::Null);
    }

    let position = if index > 0 { magnitude - 1 } else { len - magnitude };
    Ok(array.get(position).cloned().unwrap_or(ScalarValue::Null))
}

/// Up to `length` elements from a 1-based `start`; negative starts count
/// from the end. An out-of-range start gives an empty array.
pub fn slice(
    array: &ScalarValue,
    start: &ScalarValue,
    length: &ScalarValue,
) -> FnResult<ScalarValue> {
    const FUNCTION: &str = "slice";
    let Some(array) = array_arg(FUNCTION, array)? else {
        return Ok(ScalarValue::Null);
    };
    let (Some(start), Some(length)) = (long_arg(FUNCTION, start)?, long_arg(FUNCTION, length)?)
    else {
        return Ok(ScalarValue::Null);
    };

    if start == 0 {
        return Err(FunctionError::ZeroIndex {
            function: FUNCTION.to_string(),
            index: start,
        });
    }
    if length < 0 {
        return Err(FunctionError::NegativeLength {
            function: FUNCTION.to_string(),
            length,
        });
    }

    let len = array.len() as i64;
    let from = if start > 0 { start - 1 } else { len + start };
    if from < 0 || from >= len {
        return Ok(rebuild(array, Vec::new()));
    }
    let to = from.saturating_add(length).min(len);
    let elements = array.elements[from as usize..to as usize].to_vec();
    Ok(rebuild(array, elements))
}

/// Array holding `count` copies of `element`; a count of zero or less gives
/// an empty array
pub fn array_repeat(
    element: &ScalarValue,
    count: &ScalarValue,
    element_type: &DataType,
    max_length: usize,
) -> FnResult<ScalarValue> {
    const FUNCTION: &str = "array_repeat";
    let Some(count) = long_arg(FUNCTION, count)? else {
        return Ok(ScalarValue::Null);
    };
    let count = count.max(0);
    let size = usize::try_from(count).unwrap_or(usize::MAX);
    if size > max_length {
        return Err(FunctionError::ArraySizeExceeded {
            function: FUNCTION.to_string(),
            size: count,
            limit: max_length,
        });
    }
    Ok(ScalarValue::Array(ArrayValue::new(
        element_type.clone(),
        element.is_null(),
        vec![element.clone(); size],
    )))
}

/// Concatenate the inner arrays in order; any null inner array gives null
pub fn flatten(array: &ScalarValue) -> FnResult<ScalarValue> {
    const FUNCTION: &str = "flatten";
    let Some(outer) = array_arg(FUNCTION, array)? else {
        return Ok(ScalarValue::Null);
    };
    let Some((inner_type, inner_contains_null)) = outer.element_type.array_element() else {
        return Err(FunctionError::internal(
            FUNCTION,
            format!("expected array of arrays, got {}", outer.data_type()),
        ));
    };

    let mut elements = Vec::new();
    for inner in outer.iter() {
        let Some(inner) = array_arg(FUNCTION, inner)? else {
            return Ok(ScalarValue::Null);
        };
        elements.extend(inner.iter().cloned());
    }
    Ok(ScalarValue::Array(ArrayValue::new(
        inner_type.clone(),
        inner_contains_null,
        elements,
    )))
}

/// Struct fields produced by `arrays_zip`: one nullable field per input,
/// named by its 0-based position
pub fn zip_fields(element_types: &[DataType]) -> Vec<StructField> {
    element_types
        .iter()
        .enumerate()
        .map(|(idx, data_type)| StructField::new(idx.to_string(), data_type.clone(), true))
        .collect()
}

/// Zip arrays into an array of structs; shorter inputs are padded with nulls
pub fn arrays_zip(arrays: &[ScalarValue], fields: &[StructField]) -> FnResult<ScalarValue> {
    const FUNCTION: &str = "arrays_zip";
    if arrays.len() != fields.len() {
        return Err(FunctionError::internal(
            FUNCTION,
            format!("{} arrays but {} fields", arrays.len(), fields.len()),
        ));
    }

    let mut inputs = Vec::with_capacity(arrays.len());
    for array in arrays {
        let Some(array) = array_arg(FUNCTION, array)? else {
            return Ok(ScalarValue::Null);
        };
        inputs.push(array);
    }

    let rows = inputs.iter().map(|array| array.len()).max().unwrap_or(0);
    let elements = (0..rows)
        .map(|row| {
            let values = inputs
                .iter()
                .map(|array| array.get(row).cloned().unwrap_or(ScalarValue::Null))
                .collect();
            ScalarValue::Struct(StructValue::new(fields.to_vec(), values))
        })
        .collect();
    Ok(ScalarValue::Array(ArrayValue::new(
        DataType::Struct(fields.to_vec()),
        false,
        elements,
    )))
}

/// Concatenate strings; any null gives null
pub fn concat_strings(args: &[ScalarValue]) -> FnResult<ScalarValue> {
    let mut out = String::new();
    for arg in args {
        let Some(s) = string_arg("concat", arg)? else {
            return Ok(ScalarValue::Null);
        };
        out.push_str(s);
    }
    Ok(ScalarValue::String(out))
}

/// Concatenate binaries; any null gives null
pub fn concat_binary(args: &[ScalarValue]) -> FnResult<ScalarValue> {
    let mut out = Vec::new();
    for arg in args {
        match arg {
            ScalarValue::Null => return Ok(ScalarValue::Null),
            ScalarValue::Binary(bytes) => out.extend_from_slice(bytes),
            other => return Err(mismatch("concat", "binary", other)),
        }
    }
    Ok(ScalarValue::Binary(out))
}

/// Concatenate arrays; any null gives null
pub fn concat_arrays(args: &[ScalarValue], element_type: &DataType) -> FnResult<ScalarValue> {
    let mut elements = Vec::new();
    let mut contains_null = false;
    for arg in args {
        let Some(array) = array_arg("concat", arg)? else {
            return Ok(ScalarValue::Null);
        };
        contains_null |= array.contains_null;
        elements.extend(array.iter().cloned());
    }
    Ok(ScalarValue::Array(ArrayValue::new(
        element_type.clone(),
        contains_null,
        elements,
    )))
}

/// Reverse an array or the characters of a string
pub fn reverse(value: &ScalarValue) -> FnResult<ScalarValue> {
    match value {
        ScalarValue::Null => Ok(ScalarValue::Null),
        ScalarValue::String(s) => Ok(ScalarValue::String(s.chars().rev().collect())),
        ScalarValue::Array(array) => Ok(rebuild(array, array.iter().rev().cloned().collect())),
        other => Err(mismatch("reverse", "string or array", other)),
    }
}

/// Sort ascending with nulls first, or descending with nulls last.
///
/// The descending result is the exact reverse of the ascending one.
pub fn sort_array(array: &ScalarValue, ascending: bool) -> FnResult<ScalarValue> {
    let Some(array) = array_arg("sort_array", array)? else {
        return Ok(ScalarValue::Null);
    };
    let mut elements = array.elements.clone();
    sort_values(&mut elements, NullOrdering::NullsFirst);
    if !ascending {
        elements.reverse();
    }
    Ok(rebuild(array, elements))
}

/// Sort ascending with nulls last
pub fn array_sort(array: &ScalarValue) -> FnResult<ScalarValue> {
    let Some(array) = array_arg("array_sort", array)? else {
        return Ok(ScalarValue::Null);
    };
    let mut elements = array.elements.clone();
    sort_values(&mut elements, NullOrdering::NullsLast);
    Ok(rebuild(array, elements))
}

/// Smallest non-null element; null for a null, empty or all-null array
pub fn array_min(array: &ScalarValue) -> FnResult<ScalarValue> {
    extreme("array_min", array, Ordering::Less)
}

/// Largest non-null element; null for a null, empty or all-null array
pub fn array_max(array: &ScalarValue) -> FnResult<ScalarValue> {
    extreme("array_max", array, Ordering::Greater)
}

fn extreme(function: &str, array: &ScalarValue, wanted: Ordering) -> FnResult<ScalarValue> {
    let Some(array) = array_arg(function, array)? else {
        return Ok(ScalarValue::Null);
    };
    let mut best: Option<&ScalarValue> = None;
    for value in array.iter().filter(|value| !value.is_null()) {
        match best {
            Some(current) if compare_values(value, current, NullOrdering::NullsLast) != wanted => {}
            _ => best = Some(value),
        }
    }
    Ok(best.cloned().unwrap_or(ScalarValue::Null))
}

/// Whether the arrays share a non-null element.
///
/// With no shared element the answer is unknown (null) when both arrays are
/// non-empty and either holds a null, and false otherwise.
pub fn arrays_overlap(left: &ScalarValue, right: &ScalarValue) -> FnResult<ScalarValue> {
    const FUNCTION: &str = "arrays_overlap";
    let (Some(left), Some(right)) = (array_arg(FUNCTION, left)?, array_arg(FUNCTION, right)?)
    else {
        return Ok(ScalarValue::Null);
    };

    let right_values: Vec<&ScalarValue> = right.iter().filter(|v| !v.is_null()).collect();
    let shared = left
        .iter()
        .filter(|v| !v.is_null())
        .any(|value| right_values.iter().any(|other| values_equal(value, other)));
    if shared {
        return Ok(ScalarValue::Boolean(true));
    }
    if !left.is_empty() && !right.is_empty() && (left.has_null() || right.has_null()) {
        return Ok(ScalarValue::Null);
    }
    Ok(ScalarValue::Boolean(false))
}

/// Which set operation to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOperation {
    Union,
    Intersect,
    Except,
}

impl SetOperation {
    fn name(self) -> &'static str {
        match self {
            Self::Union => "array_union",
            Self::Intersect => "array_intersect",
            Self::Except => "array_except",
        }
    }
}

/// Distinct elements of `left` combined with `right`; nulls take part as
/// ordinary values
pub fn set_operation(
    operation: SetOperation,
    left: &ScalarValue,
    right: &ScalarValue,
) -> FnResult<ScalarValue> {
    let function = operation.name();
    let (Some(left), Some(right)) = (array_arg(function, left)?, array_arg(function, right)?)
    else {
        return Ok(ScalarValue::Null);
    };

    let (elements, contains_null) = match operation {
        SetOperation::Union => (
            dedup_values(left.iter().chain(right.iter())),
            left.contains_null || right.contains_null,
        ),
        SetOperation::Intersect => (
            dedup_values(left.iter().filter(|v| contains_value(right.iter(), v))),
            left.contains_null && right.contains_null,
        ),
        SetOperation::Except => (
            dedup_values(left.iter().filter(|v| !contains_value(right.iter(), v))),
            left.contains_null,
        ),
    };
    Ok(ScalarValue::Array(ArrayValue::new(
        left.element_type.clone(),
        contains_null,
        elements,
    )))
}

/// Distinct elements of both arrays, `left` first
pub fn array_union(left: &ScalarValue, right: &ScalarValue) -> FnResult<ScalarValue> {
    set_operation(SetOperation::Union, left, right)
}

/// Distinct elements of `left` that also occur in `right`
pub fn array_intersect(left: &ScalarValue, right: &ScalarValue) -> FnResult<ScalarValue> {
    set_operation(SetOperation::Intersect, left, right)
}

/// Distinct elements of `left` that do not occur in `right`
pub fn array_except(left: &ScalarValue, right: &ScalarValue) -> FnResult<ScalarValue> {
    set_operation(SetOperation::Except, left, right)
}

/// Join string elements with a delimiter.
///
/// Null elements are skipped unless a replacement is given.
pub fn array_join(
    array: &ScalarValue,
    delimiter: &ScalarValue,
    null_replacement: Option<&ScalarValue>,
) -> FnResult<ScalarValue> {
    const FUNCTION: &str = "array_join";
    let (Some(array), Some(delimiter)) =
        (array_arg(FUNCTION, array)?, string_arg(FUNCTION, delimiter)?)
    else {
        return Ok(ScalarValue::Null);
    };
    let replacement = match null_replacement {
        None => None,
        Some(value) => match string_arg(FUNCTION, value)? {
            Some(s) => Some(s),
            None => return Ok(ScalarValue::Null),
        },
    };

    let mut parts: Vec<&str> = Vec::with_capacity(array.len());
    for element in array.iter() {
        match string_arg(FUNCTION, element)? {
            Some(s) => parts.push(s),
            None => {
                if let Some(r) = replacement {
                    parts.push(r);
                }
            }
        }
    }
    Ok(ScalarValue::String(parts.join(delimiter)))
}

/// Remove null elements
pub fn array_compact(array: &ScalarValue) -> FnResult<ScalarValue> {
    let Some(array) = array_arg("array_compact", array)? else {
        return Ok(ScalarValue::Null);
    };
    let elements = array.iter().filter(|v| !v.is_null()).cloned().collect();
    Ok(ScalarValue::Array(ArrayValue::new(
        array.element_type.clone(),
        false,
        elements,
    )))
}

/// New array with the same type as `array` holding `elements`
fn rebuild(array: &ArrayValue, elements: Vec<ScalarValue>) -> ScalarValue {
    ScalarValue::Array(ArrayValue::new(
        array.element_type.clone(),
        array.contains_null,
        elements,
    ))
}
