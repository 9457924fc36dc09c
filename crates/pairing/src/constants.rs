//! BLS12-381 constants: encoding lengths, moduli, hash-to-curve domain
//! separation tags and the process-wide generators and group order.
use crate::{G1, G2};
use num_bigint::BigUint;
use once_cell::sync::Lazy;

/// Number of bits of the group order `r`, i.e. of a scalar.
pub const SCALAR_BITS: usize = 255;
/// Finite field element length.
pub const FP_LENGTH: usize = 48;
/// Scalar field element length.
pub const FR_LENGTH: usize = 32;
/// Compressed G1 point length.
pub const G1_LENGTH: usize = FP_LENGTH;
/// Compressed G2 point length.
pub const G2_LENGTH: usize = 2 * FP_LENGTH;
/// Target group element length, twelve base field coefficients.
pub const GT_LENGTH: usize = 12 * FP_LENGTH;

// Big-endian non-Montgomery form.
pub(crate) const MODULUS_REPR: [u8; FP_LENGTH] = [
    0x1a, 0x01, 0x11, 0xea, 0x39, 0x7f, 0xe6, 0x9a, 0x4b, 0x1b, 0xa7, 0xb6, 0x43, 0x4b, 0xac, 0xd7,
    0x64, 0x77, 0x4b, 0x84, 0xf3, 0x85, 0x12, 0xbf, 0x67, 0x30, 0xd2, 0xa0, 0xf6, 0xb0, 0xf6, 0x24,
    0x1e, 0xab, 0xff, 0xfe, 0xb1, 0x53, 0xff, 0xff, 0xb9, 0xfe, 0xff, 0xff, 0xff, 0xff, 0xaa, 0xab,
];

/// The group order `r`, big-endian.
pub(crate) const FR_MODULUS_REPR: [u8; FR_LENGTH] = [
    0x73, 0xed, 0xa7, 0x53, 0x29, 0x9d, 0x7d, 0x48, 0x33, 0x39, 0xd8, 0x08, 0x09, 0xa1, 0xd8, 0x05,
    0x53, 0xbd, 0xa4, 0x02, 0xff, 0xfe, 0x5b, 0xfe, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x01,
];

/// Domain separation tag of [`G1::hash`], the RFC 9380 random-oracle suite for G1.
pub const G1_HASH_DST: &[u8] = b"BLS12381G1_XMD:SHA-256_SSWU_RO_";

/// Domain separation tag of [`G2::hash`], the RFC 9380 random-oracle suite for G2.
pub const G2_HASH_DST: &[u8] = b"BLS12381G2_XMD:SHA-256_SSWU_RO_";

/// Domain separation tag of [`Fr::hash`](crate::Fr::hash).
pub const FR_HASH_DST: &[u8] = b"BLS12381FR_XMD:SHA-256_RO_";

static GROUP_ORDER: Lazy<BigUint> = Lazy::new(|| BigUint::from_bytes_be(&FR_MODULUS_REPR));
static G1_GENERATOR: Lazy<G1> = Lazy::new(G1::generator);
static G2_GENERATOR: Lazy<G2> = Lazy::new(G2::generator);

/// The order `r` shared by `Fr`, `G1`, `G2` and `GT`.
pub fn r() -> &'static BigUint {
    &GROUP_ORDER
}

/// The canonical generator of G1.
pub fn g1() -> G1 {
    *G1_GENERATOR
}

/// The canonical generator of G2.
pub fn g2() -> G2 {
    *G2_GENERATOR
}
