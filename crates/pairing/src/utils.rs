use crate::constants::{FP_LENGTH, MODULUS_REPR};
use crate::{PairingError, Result};
use blst::{blst_bendian_from_fp, blst_fp, blst_fp_from_bendian, BLST_ERROR};
use core::cmp::Ordering;
use num_bigint::BigUint;

/// Checks if the input is a valid big-endian representation of a field element.
fn is_valid_be(input: &[u8; FP_LENGTH]) -> bool {
    for (i, modul) in input.iter().zip(MODULUS_REPR.iter()) {
        match i.cmp(modul) {
            Ordering::Greater => return false,
            Ordering::Less => return true,
            Ordering::Equal => continue,
        }
    }
    // false if matching the modulus
    false
}

/// Checks whether or not the input represents a canonical field element, returning the field
/// element if successful.
pub(crate) fn fp_from_bendian(input: &[u8; FP_LENGTH], entity: &'static str) -> Result<blst_fp> {
    if !is_valid_be(input) {
        return Err(PairingError::NonCanonical(entity));
    }
    let mut fp = blst_fp::default();
    // SAFETY: input has fixed length, and fp is a blst value.
    unsafe { blst_fp_from_bendian(&mut fp, input.as_ptr()) };
    Ok(fp)
}

/// Encodes a single finite field element as 48 big-endian bytes.
pub(crate) fn fp_to_bendian(input: &blst_fp) -> [u8; FP_LENGTH] {
    let mut out = [0u8; FP_LENGTH];
    // SAFETY: out has fixed length, input is a blst value.
    unsafe { blst_bendian_from_fp(out.as_mut_ptr(), input) };
    out
}

/// Maps a blst decompression failure onto the error taxonomy.
pub(crate) fn point_error(err: BLST_ERROR, entity: &'static str) -> PairingError {
    match err {
        BLST_ERROR::BLST_POINT_NOT_ON_CURVE => PairingError::NotOnCurve(entity),
        BLST_ERROR::BLST_POINT_NOT_IN_GROUP => PairingError::NotInSubgroup(entity),
        _ => PairingError::BadEncoding(entity),
    }
}

/// Parses an unsigned integer literal, decimal or `0x` prefixed hexadecimal.
pub(crate) fn parse_uint(token: &str) -> Option<BigUint> {
    let (digits, radix) = match token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (token, 10),
    };
    // parse_bytes alone also accepts `_` separators and a leading `+`
    let valid = match radix {
        16 => digits.bytes().all(|b| b.is_ascii_hexdigit()),
        _ => digits.bytes().all(|b| b.is_ascii_digit()),
    };
    if digits.is_empty() || !valid {
        return None;
    }
    BigUint::parse_bytes(digits.as_bytes(), radix)
}

/// Left pads the big-endian bytes of `value` to `N` bytes, `None` if it does not fit.
pub(crate) fn biguint_to_bendian<const N: usize>(value: &BigUint) -> Option<[u8; N]> {
    let bytes = value.to_bytes_be();
    if bytes.len() > N {
        return None;
    }
    let mut out = [0u8; N];
    out[N - bytes.len()..].copy_from_slice(&bytes);
    Some(out)
}

/// Parses one base field coordinate of a string encoded point.
pub(crate) fn fp_from_str(token: &str, entity: &'static str) -> Result<blst_fp> {
    let value = parse_uint(token).ok_or(PairingError::InvalidString(entity))?;
    let bytes =
        biguint_to_bendian::<FP_LENGTH>(&value).ok_or(PairingError::NonCanonical(entity))?;
    fp_from_bendian(&bytes, entity)
}

/// Decimal representation of a base field element.
pub(crate) fn fp_to_decimal(input: &blst_fp) -> String {
    BigUint::from_bytes_be(&fp_to_bendian(input)).to_str_radix(10)
}
