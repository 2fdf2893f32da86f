//! Hash function implementations
//!
//! Implements: md5, sha1, sha2, crc32 and hash. Strings are hashed as their
//! UTF-8 bytes; binaries as-is. These are fingerprints, not a security
//! primitive.

use super::mismatch;
use crate::error::{FnResult, FunctionError};
use md5::{Digest, Md5};
use scalarfn_types::ScalarValue;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};

/// Bit lengths accepted by `sha2`
pub const SHA2_BIT_LENGTHS: [i64; 4] = [224, 256, 384, 512];

/// Seed of the `hash` function
pub const HASH_SEED: i32 = 42;

fn hex_digest<D: Digest>(bytes: &[u8]) -> String {
    let mut hasher = D::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Lower-case hex MD5 digest
pub fn md5_hex(bytes: &[u8]) -> String {
    hex_digest::<Md5>(bytes)
}

/// Lower-case hex SHA-2 digest, or None for an unsupported bit length
pub fn sha2_hex(bytes: &[u8], bit_length: i64) -> Option<String> {
    match bit_length {
        224 => Some(hex_digest::<Sha224>(bytes)),
        256 => Some(hex_digest::<Sha256>(bytes)),
        384 => Some(hex_digest::<Sha384>(bytes)),
        512 => Some(hex_digest::<Sha512>(bytes)),
        _ => None,
    }
}

/// Bytes of a string or binary, None for null
fn digest_input<'a>(function: &str, value: &'a ScalarValue) -> FnResult<Option<&'a [u8]>> {
    match value {
        ScalarValue::Null => Ok(None),
        ScalarValue::String(s) => Ok(Some(s.as_bytes())),
        ScalarValue::Binary(b) => Ok(Some(b)),
        other => Err(mismatch(function, "string or binary", other)),
    }
}

/// 32 hex characters of MD5
pub fn md5(value: &ScalarValue) -> FnResult<ScalarValue> {
    Ok(digest_input("md5", value)?
        .map(|bytes| ScalarValue::String(md5_hex(bytes)))
        .unwrap_or(ScalarValue::Null))
}

/// 40 hex characters of SHA-1
pub fn sha1(value: &ScalarValue) -> FnResult<ScalarValue> {
    Ok(digest_input("sha1", value)?
        .map(|bytes| ScalarValue::String(hex_digest::<Sha1>(bytes)))
        .unwrap_or(ScalarValue::Null))
}

/// `bit_length / 4` hex characters of SHA-2.
///
/// An unsupported bit length reaching evaluation is a row error; constant
/// bit lengths are checked at resolution.
pub fn sha2(value: &ScalarValue, bit_length: &ScalarValue) -> FnResult<ScalarValue> {
    const FUNCTION: &str = "sha2";
    let Some(bytes) = digest_input(FUNCTION, value)? else {
        return Ok(ScalarValue::Null);
    };
    let bits = match bit_length {
        ScalarValue::Null => return Ok(ScalarValue::Null),
        ScalarValue::Long(bits) => *bits,
        other => return Err(mismatch(FUNCTION, "bigint", other)),
    };
    sha2_hex(bytes, bits)
        .map(ScalarValue::String)
        .ok_or_else(|| FunctionError::InvalidArgumentValue {
            function: FUNCTION.to_string(),
            parameter: "bitLength".to_string(),
            value: bits.to_string(),
        })
}

/// CRC-32 checksum as a non-negative bigint
pub fn crc32(value: &ScalarValue) -> FnResult<ScalarValue> {
    Ok(digest_input("crc32", value)?
        .map(|bytes| ScalarValue::Long(i64::from(crc32fast::hash(bytes))))
        .unwrap_or(ScalarValue::Null))
}

/// 32-bit Murmur3 hash of all arguments, folded left to right from seed 42.
///
/// Null arguments leave the running hash unchanged, so the result is never
/// null.
pub fn hash(args: &[ScalarValue]) -> FnResult<ScalarValue> {
    let mut seed = HASH_SEED;
    for arg in args {
        seed = hash_value(arg, seed)?;
    }
    Ok(ScalarValue::Long(i64::from(seed)))
}

/// Hash one value with the given seed
pub fn hash_value(value: &ScalarValue, seed: i32) -> FnResult<i32> {
    Ok(match value {
        ScalarValue::Null => seed,
        ScalarValue::Boolean(b) => murmur3::hash_int(i32::from(*b), seed),
        ScalarValue::Long(l) => murmur3::hash_long(*l, seed),
        ScalarValue::Double(d) => {
            // -0.0 and 0.0 must collide, as must every NaN
            let normalized = if *d == 0.0 {
                0.0
            } else if d.is_nan() {
                f64::NAN
            } else {
                *d
            };
            murmur3::hash_long(normalized.to_bits() as i64, seed)
        }
        ScalarValue::String(s) => murmur3::hash_bytes(s.as_bytes(), seed),
        ScalarValue::Binary(b) => murmur3::hash_bytes(b, seed),
        ScalarValue::Array(array) => {
            let mut h = seed;
            for element in array.iter() {
                h = hash_value(element, h)?;
            }
            h
        }
        ScalarValue::Struct(record) => {
            let mut h = seed;
            for element in &record.values {
                h = hash_value(element, h)?;
            }
            h
        }
        ScalarValue::Map(_) => {
            return Err(FunctionError::internal(
                "hash",
                "maps have no stable iteration order to hash",
            ));
        }
    })
}

/// Murmur3 x86 32-bit, in the variant used by JVM query engines: trailing
/// bytes are mixed one at a time as sign-extended ints.
mod murmur3 {
    const C1: u32 = 0xcc9e_2d51;
    const C2: u32 = 0x1b87_3593;

    fn mix_k1(k1: u32) -> u32 {
        k1.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
    }

    fn mix_h1(h1: u32, k1: u32) -> u32 {
        (h1 ^ k1)
            .rotate_left(13)
            .wrapping_mul(5)
            .wrapping_add(0xe654_6b64)
    }

    fn fmix(mut h1: u32, length: u32) -> i32 {
        h1 ^= length;
        h1 ^= h1 >> 16;
        h1 = h1.wrapping_mul(0x85eb_ca6b);
        h1 ^= h1 >> 13;
        h1 = h1.wrapping_mul(0xc2b2_ae35);
        h1 ^= h1 >> 16;
        h1 as i32
    }

    pub(super) fn hash_int(input: i32, seed: i32) -> i32 {
        let h1 = mix_h1(seed as u32, mix_k1(input as u32));
        fmix(h1, 4)
    }

    pub(super) fn hash_long(input: i64, seed: i32) -> i32 {
        let low = input as u32;
        let high = ((input as u64) >> 32) as u32;
        let h1 = mix_h1(seed as u32, mix_k1(low));
        let h1 = mix_h1(h1, mix_k1(high));
        fmix(h1, 8)
    }

    pub(super) fn hash_bytes(bytes: &[u8], seed: i32) -> i32 {
        let mut h1 = seed as u32;
        let mut chunks = bytes.chunks_exact(4);
        for chunk in &mut chunks {
            let word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            h1 = mix_h1(h1, mix_k1(word));
        }
        for &byte in chunks.remainder() {
            let half_word = i32::from(byte as i8) as u32;
            h1 = mix_h1(h1, mix_k1(half_word));
        }
        fmix(h1, bytes.len() as u32)
    }
}
