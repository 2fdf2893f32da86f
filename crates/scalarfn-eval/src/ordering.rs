//! Total order and structural equality over nested values
//!
//! Every collection function that sorts, deduplicates or searches goes
//! through [`compare_values`] or [`values_equal`]; neither is duplicated per
//! concrete type.

use scalarfn_types::ScalarValue;
use std::cmp::Ordering;

/// Where nulls sort relative to non-null values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullOrdering {
    /// Null sorts before every non-null value
    NullsFirst,
    /// Null sorts after every non-null value
    NullsLast,
}

/// Compare two doubles under a total order.
///
/// NaN equals NaN and sorts above every other value; `-0.0` equals `0.0`.
pub fn compare_doubles(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        // Neither side is NaN, so partial_cmp is total here
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Compare two values under a total order.
///
/// The null policy applies at every nesting level. Arrays compare
/// lexicographically with a strict prefix first; structs compare field by
/// field. Maps have no meaningful order and are rejected at resolution; they
/// fall back to entry-wise comparison here so the function stays total.
pub fn compare_values(left: &ScalarValue, right: &ScalarValue, nulls: NullOrdering) -> Ordering {
    match (left, right) {
        (ScalarValue::Null, ScalarValue::Null) => Ordering::Equal,
        (ScalarValue::Null, _) => match nulls {
            NullOrdering::NullsFirst => Ordering::Less,
            NullOrdering::NullsLast => Ordering::Greater,
        },
        (_, ScalarValue::Null) => match nulls {
            NullOrdering::NullsFirst => Ordering::Greater,
            NullOrdering::NullsLast => Ordering::Less,
        },

        (ScalarValue::Boolean(a), ScalarValue::Boolean(b)) => a.cmp(b),
        (ScalarValue::Long(a), ScalarValue::Long(b)) => a.cmp(b),
        (ScalarValue::Double(a), ScalarValue::Double(b)) => compare_doubles(*a, *b),
        (ScalarValue::Long(a), ScalarValue::Double(b)) => compare_doubles(*a as f64, *b),
        (ScalarValue::Double(a), ScalarValue::Long(b)) => compare_doubles(*a, *b as f64),

        // Byte-wise, which for UTF-8 matches code point order
        (ScalarValue::String(a), ScalarValue::String(b)) => a.as_bytes().cmp(b.as_bytes()),
        (ScalarValue::Binary(a), ScalarValue::Binary(b)) => a.cmp(b),

        (ScalarValue::Array(a), ScalarValue::Array(b)) => {
            compare_sequences(a.iter(), b.iter(), nulls)
        }
        (ScalarValue::Struct(a), ScalarValue::Struct(b)) => {
            compare_sequences(a.values.iter(), b.values.iter(), nulls)
        }
        (ScalarValue::Map(a), ScalarValue::Map(b)) => {
            for ((ka, va), (kb, vb)) in a.entries.iter().zip(b.entries.iter()) {
                let ord = compare_values(ka, kb, nulls).then_with(|| compare_values(va, vb, nulls));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            a.len().cmp(&b.len())
        }

        // Mismatched kinds never reach here after resolution; order by kind
        (a, b) => type_rank(a).cmp(&type_rank(b)),
    }
}

fn compare_sequences<'a>(
    left: impl Iterator<Item = &'a ScalarValue>,
    right: impl Iterator<Item = &'a ScalarValue>,
    nulls: NullOrdering,
) -> Ordering {
    let mut left = left;
    let mut right = right;
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(a), Some(b)) => {
                let ord = compare_values(a, b, nulls);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn type_rank(value: &ScalarValue) -> u8 {
    match value {
        ScalarValue::Null => 0,
        ScalarValue::Boolean(_) => 1,
        ScalarValue::Long(_) | ScalarValue::Double(_) => 2,
        ScalarValue::String(_) => 3,
        ScalarValue::Binary(_) => 4,
        ScalarValue::Array(_) => 5,
        ScalarValue::Map(_) => 6,
        ScalarValue::Struct(_) => 7,
    }
}

/// Structural equality.
///
/// Null equals null, which is what deduplication needs; callers that want
/// three-valued logic check for nulls first. Two maps are equal when they
/// hold the same keys mapped to equal values, in any order.
pub fn values_equal(left: &ScalarValue, right: &ScalarValue) -> bool {
    match (left, right) {
        (ScalarValue::Null, ScalarValue::Null) => true,
        (ScalarValue::Null, _) | (_, ScalarValue::Null) => false,
        (ScalarValue::Array(a), ScalarValue::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| values_equal(x, y))
        }
        (ScalarValue::Struct(a), ScalarValue::Struct(b)) => {
            a.len() == b.len()
                && a.values
                    .iter()
                    .zip(b.values.iter())
                    .all(|(x, y)| values_equal(x, y))
        }
        (ScalarValue::Map(a), ScalarValue::Map(b)) => {
            a.len() == b.len()
                && a.entries.iter().all(|(key, value)| {
                    b.entries
                        .iter()
                        .find(|(other, _)| values_equal(key, other))
                        .is_some_and(|(_, other)| values_equal(value, other))
                })
        }
        (a, b) => compare_values(a, b, NullOrdering::NullsFirst) == Ordering::Equal,
    }
}

/// Check whether `values` holds an element equal to `needle`
pub fn contains_value<'a>(
    values: impl IntoIterator<Item = &'a ScalarValue>,
    needle: &ScalarValue,
) -> bool {
    values.into_iter().any(|v| values_equal(v, needle))
}

/// Keep the first representative of each equivalence class, in order.
///
/// At most one null survives.
pub fn dedup_values<'a>(values: impl IntoIterator<Item = &'a ScalarValue>) -> Vec<ScalarValue> {
    let mut result: Vec<ScalarValue> = Vec::new();
    for value in values {
        if !contains_value(&result, value) {
            result.push(value.clone());
        }
    }
    result
}

/// Sort values in place with a stable sort
pub fn sort_values(values: &mut [ScalarValue], nulls: NullOrdering) {
    values.sort_by(|a, b| compare_values(a, b, nulls));
}
