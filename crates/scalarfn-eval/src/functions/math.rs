//! Positive modulo

use super::mismatch;
use crate::error::FnResult;
use scalarfn_types::ScalarValue;

/// Integer modulo whose result takes the sign of `b`; None when `b` is 0
pub fn pmod_long(a: i64, b: i64) -> Option<i64> {
    if b == 0 {
        return None;
    }
    let r = a.wrapping_rem(b);
    if r != 0 && (r < 0) != (b < 0) {
        Some(r.wrapping_add(b))
    } else {
        Some(r)
    }
}

/// Floating modulo whose result takes the sign of `b`; None when `b` is 0
pub fn pmod_double(a: f64, b: f64) -> Option<f64> {
    if b == 0.0 {
        return None;
    }
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        // r + b can round to exactly b
        Some((r + b) % b)
    } else {
        Some(r)
    }
}

/// `pmod` over values: two longs give a long, a double on either side
/// promotes both. Null operands and a zero divisor give null.
pub fn pmod(a: &ScalarValue, b: &ScalarValue) -> FnResult<ScalarValue> {
    let result = match (a, b) {
        (ScalarValue::Null, _) | (_, ScalarValue::Null) => None,
        (ScalarValue::Long(a), ScalarValue::Long(b)) => pmod_long(*a, *b).map(ScalarValue::Long),
        (a, b) => {
            let (Some(x), Some(y)) = (a.as_double(), b.as_double()) else {
                let offending = if a.as_double().is_none() { a } else { b };
                return Err(mismatch("pmod", "numeric", offending));
            };
            pmod_double(x, y).map(ScalarValue::Double)
        }
    };
    Ok(result.unwrap_or(ScalarValue::Null))
}
