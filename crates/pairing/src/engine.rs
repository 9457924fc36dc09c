// This module contains a safe wrapper around the blst library.
//
// Every FFI call of the crate goes through here. The typed layer (`Fr`, `G1`,
// `G2`, `GT`) only ever sees plain blst values.

use crate::constants::SCALAR_BITS;
use blst::{
    blst_bendian_from_scalar, blst_expand_message_xmd, blst_final_exp, blst_fp12,
    blst_fp12_in_group, blst_fp12_inverse, blst_fp12_is_equal, blst_fp12_is_one, blst_fp12_mul,
    blst_fp12_one, blst_fp12_sqr, blst_fr, blst_fr_add, blst_fr_from_scalar, blst_fr_from_uint64,
    blst_fr_inverse, blst_fr_mul, blst_fr_sqr, blst_fr_sub, blst_hash_to_g1, blst_hash_to_g2,
    blst_miller_loop, blst_p1, blst_p1_add_or_double, blst_p1_affine, blst_p1_affine_in_g1,
    blst_p1_affine_is_inf, blst_p1_affine_on_curve, blst_p1_cneg, blst_p1_compress,
    blst_p1_from_affine, blst_p1_generator, blst_p1_is_equal, blst_p1_is_inf, blst_p1_mult,
    blst_p1_to_affine, blst_p1_uncompress, blst_p2, blst_p2_add_or_double, blst_p2_affine,
    blst_p2_affine_in_g2, blst_p2_affine_is_inf, blst_p2_affine_on_curve, blst_p2_cneg,
    blst_p2_compress, blst_p2_from_affine, blst_p2_generator, blst_p2_is_equal, blst_p2_is_inf,
    blst_p2_mult, blst_p2_to_affine, blst_p2_uncompress, blst_scalar, blst_scalar_fr_check,
    blst_scalar_from_be_bytes, blst_scalar_from_bendian, blst_scalar_from_fr, BLST_ERROR,
    MultiPoint,
};
use core::ptr;

// --- Fr ---------------------------------------------------------------------

pub(crate) fn fr_add(a: &blst_fr, b: &blst_fr) -> blst_fr {
    let mut out = blst_fr::default();
    // SAFETY: all inputs are valid blst types
    unsafe { blst_fr_add(&mut out, a, b) };
    out
}

pub(crate) fn fr_sub(a: &blst_fr, b: &blst_fr) -> blst_fr {
    let mut out = blst_fr::default();
    // SAFETY: all inputs are valid blst types
    unsafe { blst_fr_sub(&mut out, a, b) };
    out
}

pub(crate) fn fr_mul(a: &blst_fr, b: &blst_fr) -> blst_fr {
    let mut out = blst_fr::default();
    // SAFETY: all inputs are valid blst types
    unsafe { blst_fr_mul(&mut out, a, b) };
    out
}

pub(crate) fn fr_sqr(a: &blst_fr) -> blst_fr {
    let mut out = blst_fr::default();
    // SAFETY: both inputs are valid blst types
    unsafe { blst_fr_sqr(&mut out, a) };
    out
}

pub(crate) fn fr_neg(a: &blst_fr) -> blst_fr {
    fr_sub(&blst_fr::default(), a)
}

/// Inverse of a nonzero field element. The caller rules out zero.
pub(crate) fn fr_inverse(a: &blst_fr) -> blst_fr {
    let mut out = blst_fr::default();
    // SAFETY: both inputs are valid blst types
    unsafe { blst_fr_inverse(&mut out, a) };
    out
}

pub(crate) fn fr_from_u64(v: u64) -> blst_fr {
    let limbs = [v, 0, 0, 0];
    let mut out = blst_fr::default();
    // SAFETY: blst_fr_from_uint64 reads exactly 4 limbs from the buffer.
    unsafe { blst_fr_from_uint64(&mut out, limbs.as_ptr()) };
    out
}

pub(crate) fn fr_to_scalar(a: &blst_fr) -> blst_scalar {
    let mut out = blst_scalar::default();
    // SAFETY: both inputs are valid blst types
    unsafe { blst_scalar_from_fr(&mut out, a) };
    out
}

/// Decodes a 32 byte big-endian integer, returning `None` unless it is below `r`.
pub(crate) fn fr_from_bendian(input: &[u8; 32]) -> Option<blst_fr> {
    let mut scalar = blst_scalar::default();
    // SAFETY: input has fixed length, scalar is a blst value.
    unsafe { blst_scalar_from_bendian(&mut scalar, input.as_ptr()) };
    // SAFETY: scalar is a blst value.
    if unsafe { !blst_scalar_fr_check(&scalar) } {
        return None;
    }
    let mut out = blst_fr::default();
    // SAFETY: scalar is canonical, both inputs are valid blst types.
    unsafe { blst_fr_from_scalar(&mut out, &scalar) };
    Some(out)
}

/// Reduces an arbitrary-length big-endian integer modulo `r`.
pub(crate) fn fr_from_wide_bendian(input: &[u8]) -> blst_fr {
    let mut scalar = blst_scalar::default();
    // SAFETY: pointer and length describe the same slice. The return value only
    // reports whether the reduced scalar is nonzero.
    unsafe { blst_scalar_from_be_bytes(&mut scalar, input.as_ptr(), input.len()) };
    let mut out = blst_fr::default();
    // SAFETY: scalar was reduced above, both inputs are valid blst types.
    unsafe { blst_fr_from_scalar(&mut out, &scalar) };
    out
}

pub(crate) fn fr_to_bendian(a: &blst_fr) -> [u8; 32] {
    let scalar = fr_to_scalar(a);
    let mut out = [0u8; 32];
    // SAFETY: out has fixed length 32, scalar is a blst value.
    unsafe { blst_bendian_from_scalar(out.as_mut_ptr(), &scalar) };
    out
}

/// RFC 9380 `expand_message_xmd` with SHA-256.
pub(crate) fn expand_message_xmd<const N: usize>(dst: &[u8], msg: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    // SAFETY: every pointer/length pair describes a live slice.
    unsafe {
        blst_expand_message_xmd(
            out.as_mut_ptr(),
            N,
            msg.as_ptr(),
            msg.len(),
            dst.as_ptr(),
            dst.len(),
        )
    };
    out
}

// --- G1 ---------------------------------------------------------------------

pub(crate) fn p1_generator() -> blst_p1 {
    // SAFETY: blst_p1_generator returns a pointer to a static constant.
    unsafe { *blst_p1_generator() }
}

pub(crate) fn p1_to_affine(p: &blst_p1) -> blst_p1_affine {
    let mut p_affine = blst_p1_affine::default();
    // SAFETY: both inputs are valid blst types
    unsafe { blst_p1_to_affine(&mut p_affine, p) };
    p_affine
}

pub(crate) fn p1_from_affine(p_affine: &blst_p1_affine) -> blst_p1 {
    let mut p = blst_p1::default();
    // SAFETY: both inputs are valid blst types
    unsafe { blst_p1_from_affine(&mut p, p_affine) };
    p
}

pub(crate) fn p1_add(a: &blst_p1, b: &blst_p1) -> blst_p1 {
    let mut result = blst_p1::default();
    // SAFETY: all inputs are valid blst types
    unsafe { blst_p1_add_or_double(&mut result, a, b) };
    result
}

pub(crate) fn p1_neg(p: &blst_p1) -> blst_p1 {
    let mut out = *p;
    // SAFETY: out is a valid blst type, negated in place.
    unsafe { blst_p1_cneg(&mut out, true) };
    out
}

pub(crate) fn p1_mult(p: &blst_p1, scalar: &blst_scalar) -> blst_p1 {
    let mut out = blst_p1::default();
    // SAFETY: scalar.b holds 32 bytes, only the low SCALAR_BITS are read.
    unsafe { blst_p1_mult(&mut out, p, scalar.b.as_ptr(), SCALAR_BITS) };
    out
}

pub(crate) fn p1_is_equal(a: &blst_p1, b: &blst_p1) -> bool {
    // SAFETY: both inputs are valid blst types
    unsafe { blst_p1_is_equal(a, b) }
}

pub(crate) fn p1_is_inf(p: &blst_p1) -> bool {
    // SAFETY: argument is a valid blst type
    unsafe { blst_p1_is_inf(p) }
}

pub(crate) fn p1_affine_is_inf(p: &blst_p1_affine) -> bool {
    // SAFETY: argument is a valid blst type
    unsafe { blst_p1_affine_is_inf(p) }
}

pub(crate) fn p1_affine_on_curve(p: &blst_p1_affine) -> bool {
    // SAFETY: argument is a valid blst type
    unsafe { blst_p1_affine_on_curve(p) }
}

pub(crate) fn p1_affine_in_g1(p: &blst_p1_affine) -> bool {
    // SAFETY: argument is a valid blst type
    unsafe { blst_p1_affine_in_g1(p) }
}

pub(crate) fn p1_compress(p: &blst_p1) -> [u8; 48] {
    let mut out = [0u8; 48];
    // SAFETY: blst_p1_compress writes exactly 48 bytes to a valid buffer.
    unsafe { blst_p1_compress(out.as_mut_ptr(), p) };
    out
}

/// Decompresses a point. The result is on the curve but not yet subgroup checked.
pub(crate) fn p1_uncompress(input: &[u8; 48]) -> Result<blst_p1_affine, BLST_ERROR> {
    let mut out = blst_p1_affine::default();
    // SAFETY: input has fixed length 48, out is a blst value.
    match unsafe { blst_p1_uncompress(&mut out, input.as_ptr()) } {
        BLST_ERROR::BLST_SUCCESS => Ok(out),
        err => Err(err),
    }
}

pub(crate) fn hash_to_g1(dst: &[u8], msg: &[u8]) -> blst_p1 {
    let mut out = blst_p1::default();
    // SAFETY: every pointer/length pair describes a live slice. Aug is null/0 (unused).
    unsafe {
        blst_hash_to_g1(
            &mut out,
            msg.as_ptr(),
            msg.len(),
            dst.as_ptr(),
            dst.len(),
            ptr::null(),
            0,
        )
    };
    out
}

/// Performs multi-scalar multiplication (MSM) for G1 points using Pippenger's algorithm.
///
/// blst does not handle the point at infinity here, so callers filter identity points
/// and zero scalars out beforehand and must not pass an empty slice.
pub(crate) fn p1_msm(points: &[blst_p1_affine], scalars: &[blst_scalar]) -> blst_p1 {
    debug_assert_eq!(points.len(), scalars.len());
    debug_assert!(!points.is_empty());

    let scalars: Vec<u8> = scalars.iter().flat_map(|s| s.b).collect();
    points.mult(&scalars, SCALAR_BITS)
}

// --- G2 ---------------------------------------------------------------------

pub(crate) fn p2_generator() -> blst_p2 {
    // SAFETY: blst_p2_generator returns a pointer to a static constant.
    unsafe { *blst_p2_generator() }
}

pub(crate) fn p2_to_affine(p: &blst_p2) -> blst_p2_affine {
    let mut p_affine = blst_p2_affine::default();
    // SAFETY: both inputs are valid blst types
    unsafe { blst_p2_to_affine(&mut p_affine, p) };
    p_affine
}

pub(crate) fn p2_from_affine(p_affine: &blst_p2_affine) -> blst_p2 {
    let mut p = blst_p2::default();
    // SAFETY: both inputs are valid blst types
    unsafe { blst_p2_from_affine(&mut p, p_affine) };
    p
}

pub(crate) fn p2_add(a: &blst_p2, b: &blst_p2) -> blst_p2 {
    let mut result = blst_p2::default();
    // SAFETY: all inputs are valid blst types
    unsafe { blst_p2_add_or_double(&mut result, a, b) };
    result
}

pub(crate) fn p2_neg(p: &blst_p2) -> blst_p2 {
    let mut out = *p;
    // SAFETY: out is a valid blst type, negated in place.
    unsafe { blst_p2_cneg(&mut out, true) };
    out
}

pub(crate) fn p2_mult(p: &blst_p2, scalar: &blst_scalar) -> blst_p2 {
    let mut out = blst_p2::default();
    // SAFETY: scalar.b holds 32 bytes, only the low SCALAR_BITS are read.
    unsafe { blst_p2_mult(&mut out, p, scalar.b.as_ptr(), SCALAR_BITS) };
    out
}

pub(crate) fn p2_is_equal(a: &blst_p2, b: &blst_p2) -> bool {
    // SAFETY: both inputs are valid blst types
    unsafe { blst_p2_is_equal(a, b) }
}

pub(crate) fn p2_is_inf(p: &blst_p2) -> bool {
    // SAFETY: argument is a valid blst type
    unsafe { blst_p2_is_inf(p) }
}

pub(crate) fn p2_affine_is_inf(p: &blst_p2_affine) -> bool {
    // SAFETY: argument is a valid blst type
    unsafe { blst_p2_affine_is_inf(p) }
}

pub(crate) fn p2_affine_on_curve(p: &blst_p2_affine) -> bool {
    // SAFETY: argument is a valid blst type
    unsafe { blst_p2_affine_on_curve(p) }
}

pub(crate) fn p2_affine_in_g2(p: &blst_p2_affine) -> bool {
    // SAFETY: argument is a valid blst type
    unsafe { blst_p2_affine_in_g2(p) }
}

pub(crate) fn p2_compress(p: &blst_p2) -> [u8; 96] {
    let mut out = [0u8; 96];
    // SAFETY: blst_p2_compress writes exactly 96 bytes to a valid buffer.
    unsafe { blst_p2_compress(out.as_mut_ptr(), p) };
    out
}

/// Decompresses a point. The result is on the curve but not yet subgroup checked.
pub(crate) fn p2_uncompress(input: &[u8; 96]) -> Result<blst_p2_affine, BLST_ERROR> {
    let mut out = blst_p2_affine::default();
    // SAFETY: input has fixed length 96, out is a blst value.
    match unsafe { blst_p2_uncompress(&mut out, input.as_ptr()) } {
        BLST_ERROR::BLST_SUCCESS => Ok(out),
        err => Err(err),
    }
}

pub(crate) fn hash_to_g2(dst: &[u8], msg: &[u8]) -> blst_p2 {
    let mut out = blst_p2::default();
    // SAFETY: every pointer/length pair describes a live slice. Aug is null/0 (unused).
    unsafe {
        blst_hash_to_g2(
            &mut out,
            msg.as_ptr(),
            msg.len(),
            dst.as_ptr(),
            dst.len(),
            ptr::null(),
            0,
        )
    };
    out
}

/// Performs multi-scalar multiplication (MSM) for G2 points
///
/// Same preconditions as [`p1_msm`].
pub(crate) fn p2_msm(points: &[blst_p2_affine], scalars: &[blst_scalar]) -> blst_p2 {
    debug_assert_eq!(points.len(), scalars.len());
    debug_assert!(!points.is_empty());

    let scalars: Vec<u8> = scalars.iter().flat_map(|s| s.b).collect();
    points.mult(&scalars, SCALAR_BITS)
}

// --- Fp12 / pairing ---------------------------------------------------------

pub(crate) fn fp12_one() -> blst_fp12 {
    // SAFETY: blst_fp12_one returns a pointer to a static constant.
    unsafe { *blst_fp12_one() }
}

/// multiply_fp12 multiplies two fp12 elements
pub(crate) fn fp12_mul(a: &blst_fp12, b: &blst_fp12) -> blst_fp12 {
    let mut result = blst_fp12::default();
    // SAFETY: All arguments are valid blst types
    unsafe { blst_fp12_mul(&mut result, a, b) }
    result
}

pub(crate) fn fp12_sqr(a: &blst_fp12) -> blst_fp12 {
    let mut result = blst_fp12::default();
    // SAFETY: All arguments are valid blst types
    unsafe { blst_fp12_sqr(&mut result, a) }
    result
}

/// Inverse of a nonzero fp12 element. The caller rules out zero.
pub(crate) fn fp12_inverse(a: &blst_fp12) -> blst_fp12 {
    let mut result = blst_fp12::default();
    // SAFETY: All arguments are valid blst types
    unsafe { blst_fp12_inverse(&mut result, a) }
    result
}

pub(crate) fn fp12_is_equal(a: &blst_fp12, b: &blst_fp12) -> bool {
    // SAFETY: both inputs are valid blst types
    unsafe { blst_fp12_is_equal(a, b) }
}

/// is_fp12_one checks if an fp12 element equals
/// multiplicative identity element, one
pub(crate) fn fp12_is_one(f: &blst_fp12) -> bool {
    // SAFETY: argument is a valid blst type
    unsafe { blst_fp12_is_one(f) }
}

/// Checks membership in the order-`r` subgroup of the cyclotomic group.
pub(crate) fn fp12_in_group(f: &blst_fp12) -> bool {
    // SAFETY: argument is a valid blst type
    unsafe { blst_fp12_in_group(f) }
}

/// Computes a single miller loop for a given G1, G2 pair
pub(crate) fn miller_loop(g1: &blst_p1_affine, g2: &blst_p2_affine) -> blst_fp12 {
    let mut result = blst_fp12::default();
    // SAFETY: All arguments are valid blst types
    unsafe { blst_miller_loop(&mut result, g2, g1) }
    result
}

/// final_exp computes the final exponentiation on an fp12 element
pub(crate) fn final_exp(f: &blst_fp12) -> blst_fp12 {
    let mut result = blst_fp12::default();
    // SAFETY: All arguments are valid blst types
    unsafe { blst_final_exp(&mut result, f) }
    result
}
