//! Masking functions for redacting text
//!
//! Implements: mask, mask_first_n, mask_last_n, mask_show_first_n,
//! mask_show_last_n and mask_hash.
//!
//! Characters are classified as upper-case, lower-case, digit or other using
//! ASCII rules only; other characters are never replaced. Positions count
//! Unicode scalar values, not bytes.

use super::{long_arg, mismatch, string_arg};
use crate::error::FnResult;
use crate::functions::hash::md5_hex;
use scalarfn_types::ScalarValue;

/// Default number of characters affected by the counted variants
pub const DEFAULT_MASK_COUNT: i64 = 4;

/// Character class driving substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Upper,
    Lower,
    Digit,
    Other,
}

impl CharClass {
    /// Classify a character
    pub fn of(c: char) -> Self {
        if c.is_ascii_uppercase() {
            Self::Upper
        } else if c.is_ascii_lowercase() {
            Self::Lower
        } else if c.is_ascii_digit() {
            Self::Digit
        } else {
            Self::Other
        }
    }
}

/// Replacement characters per class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaskChars {
    pub upper: char,
    pub lower: char,
    pub digit: char,
}

impl Default for MaskChars {
    fn default() -> Self {
        Self {
            upper: 'X',
            lower: 'x',
            digit: 'n',
        }
    }
}

impl MaskChars {
    /// Build from optional replacement arguments.
    ///
    /// A missing, null or empty argument keeps the default; a longer string
    /// contributes its first character.
    pub fn from_arguments(
        function: &str,
        upper: Option<&ScalarValue>,
        lower: Option<&ScalarValue>,
        digit: Option<&ScalarValue>,
    ) -> FnResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            upper: replacement(function, upper)?.unwrap_or(defaults.upper),
            lower: replacement(function, lower)?.unwrap_or(defaults.lower),
            digit: replacement(function, digit)?.unwrap_or(defaults.digit),
        })
    }

    /// Replacement for a single character
    pub fn substitute(&self, c: char) -> char {
        match CharClass::of(c) {
            CharClass::Upper => self.upper,
            CharClass::Lower => self.lower,
            CharClass::Digit => self.digit,
            CharClass::Other => c,
        }
    }
}

fn replacement(function: &str, value: Option<&ScalarValue>) -> FnResult<Option<char>> {
    match value {
        None => Ok(None),
        Some(value) => Ok(string_arg(function, value)?.and_then(|s| s.chars().next())),
    }
}

/// Which part of the string is masked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskRegion {
    /// Every character
    All,
    /// The first n characters
    FirstN,
    /// The last n characters
    LastN,
    /// All but the first n characters
    ShowFirstN,
    /// All but the last n characters
    ShowLastN,
}

impl MaskRegion {
    /// Function name for this region
    pub fn function_name(self) -> &'static str {
        match self {
            Self::All => "mask",
            Self::FirstN => "mask_first_n",
            Self::LastN => "mask_last_n",
            Self::ShowFirstN => "mask_show_first_n",
            Self::ShowLastN => "mask_show_last_n",
        }
    }

    /// Character range `[start, end)` masked in a string of `len` characters
    fn bounds(self, len: usize, n: usize) -> (usize, usize) {
        match self {
            Self::All => (0, len),
            Self::FirstN => (0, n.min(len)),
            Self::LastN => (len.saturating_sub(n), len),
            Self::ShowFirstN => (n.min(len), len),
            Self::ShowLastN => (0, len.saturating_sub(n)),
        }
    }
}

/// Mask the characters of `input` that fall in `region`
pub fn mask_str(input: &str, region: MaskRegion, n: usize, chars: &MaskChars) -> String {
    let len = input.chars().count();
    let (start, end) = region.bounds(len, n);
    input
        .chars()
        .enumerate()
        .map(|(idx, c)| {
            if idx >= start && idx < end {
                chars.substitute(c)
            } else {
                c
            }
        })
        .collect()
}

/// Mask a string value.
///
/// `count` is ignored for [`MaskRegion::All`]; for the other regions a
/// missing or null count means 4 and a negative count means 0.
pub fn mask(
    value: &ScalarValue,
    region: MaskRegion,
    count: Option<&ScalarValue>,
    chars: &MaskChars,
) -> FnResult<ScalarValue> {
    let function = region.function_name();
    let Some(input) = string_arg(function, value)? else {
        return Ok(ScalarValue::Null);
    };
    let count = match count {
        None => DEFAULT_MASK_COUNT,
        Some(count) => long_arg(function, count)?.unwrap_or(DEFAULT_MASK_COUNT),
    };
    let n = usize::try_from(count.max(0)).unwrap_or(usize::MAX);
    Ok(ScalarValue::String(mask_str(input, region, n, chars)))
}

/// Lower-case hex MD5 digest of a string's UTF-8 bytes
pub fn mask_hash(value: &ScalarValue) -> FnResult<ScalarValue> {
    match value {
        ScalarValue::Null => Ok(ScalarValue::Null),
        ScalarValue::String(s) => Ok(ScalarValue::String(md5_hex(s.as_bytes()))),
        other => Err(mismatch("mask_hash", "string", other)),
    }
}
