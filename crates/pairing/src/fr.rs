//! The BLS12-381 scalar field `Fr`.
use crate::{
    constants::{FR_HASH_DST, FR_LENGTH},
    engine,
    utils::parse_uint,
    PairingError, Result,
};
use blst::blst_fr;
use core::{
    fmt,
    hash::{Hash, Hasher},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
    str::FromStr,
};
use num_bigint::BigUint;
use rand::{rngs::OsRng, CryptoRng, RngCore, TryRngCore};

/// `(r - 1) / 2`, little-endian limbs. Euler's criterion exponent.
const R_MINUS_ONE_HALF: [u64; 4] = [
    0x7fff_ffff_8000_0000,
    0xa9de_d201_7fff_2dff,
    0x199c_ec04_04d0_ec02,
    0x39f6_d3a9_94ce_bea4,
];

/// Odd part `t` of `r - 1 = 2^S * t`.
const TRACE: [u64; 4] = [
    0xfffe_5bfe_ffff_ffff,
    0x09a1_d805_53bd_a402,
    0x299d_7d48_3339_d808,
    0x0000_0000_73ed_a753,
];

/// `(t + 1) / 2`.
const TRACE_PLUS_ONE_HALF: [u64; 4] = [
    0x7fff_2dff_8000_0000,
    0x04d0_ec02_a9de_d201,
    0x94ce_bea4_199c_ec04,
    0x0000_0000_39f6_d3a9,
];

/// Two-adicity of `r - 1`.
const TWO_ADICITY: u32 = 32;

/// Multiplicative generator of `Fr*`, a quadratic non-residue.
const NON_RESIDUE: u64 = 7;

/// Bytes of entropy drawn per random scalar, wide enough that the reduction bias is negligible.
const RANDOM_BYTES: usize = 64;

/// An element of the BLS12-381 scalar field `F_r`.
///
/// All arithmetic is performed modulo the prime
/// `r = 0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001`,
/// the order of G1, G2 and GT.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct Fr(blst_fr);

impl Fr {
    /// The additive identity.
    pub fn zero() -> Self {
        Self(blst_fr::default())
    }

    /// The multiplicative identity.
    pub fn one() -> Self {
        Self::from(1u64)
    }

    /// Draws a uniformly random element from the operating system's secure entropy source.
    pub fn random() -> Result<Self> {
        let mut ikm = [0u8; RANDOM_BYTES];
        OsRng.try_fill_bytes(&mut ikm).map_err(|err| {
            tracing::error!(%err, "entropy source failed");
            PairingError::Entropy(err.to_string())
        })?;
        Ok(Self(engine::fr_from_wide_bendian(&ikm)))
    }

    /// Draws a uniformly random element from the provided RNG.
    pub fn random_with<R: CryptoRng + RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut ikm = [0u8; RANDOM_BYTES];
        rng.fill_bytes(&mut ikm);
        Self(engine::fr_from_wide_bendian(&ikm))
    }

    /// Maps arbitrary bytes to a scalar with RFC 9380 hash-to-field under [`FR_HASH_DST`].
    pub fn hash(msg: &[u8]) -> Self {
        Self::hash_with_dst(FR_HASH_DST, msg)
    }

    /// Maps arbitrary bytes to a scalar with RFC 9380 hash-to-field under a custom tag.
    ///
    /// 48 uniform bytes are expanded and reduced, `L = ceil((255 + 128) / 8)`.
    pub fn hash_with_dst(dst: &[u8], msg: &[u8]) -> Self {
        let uniform = engine::expand_message_xmd::<48>(dst, msg);
        Self(engine::fr_from_wide_bendian(&uniform))
    }

    /// Returns `true` if this is the additive identity.
    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Returns `true` if this is the multiplicative identity.
    pub fn is_one(&self) -> bool {
        *self == Self::one()
    }

    /// Multiplicative inverse, failing on zero.
    pub fn inverse(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(PairingError::DivisionByZero("Fr"));
        }
        Ok(Self(engine::fr_inverse(&self.0)))
    }

    /// Field division `self * rhs^-1`, failing if `rhs` is zero.
    pub fn try_div(&self, rhs: &Self) -> Result<Self> {
        Ok(*self * rhs.inverse()?)
    }

    /// Field squaring.
    pub fn sqr(&self) -> Self {
        Self(engine::fr_sqr(&self.0))
    }

    /// Raises `self` to the canonical integer value of `exp`. Not constant time.
    pub fn pow(&self, exp: &Fr) -> Self {
        let mut limbs = [0u64; 4];
        for (i, byte) in exp.serialize().iter().rev().enumerate() {
            limbs[i / 8] |= u64::from(*byte) << (8 * (i % 8));
        }
        self.pow_limbs(&limbs)
    }

    /// Square-and-multiply over little-endian 64-bit limbs.
    fn pow_limbs(&self, exp: &[u64; 4]) -> Self {
        let mut acc = Self::one();
        for limb in exp.iter().rev() {
            for bit in (0..64).rev() {
                acc = acc.sqr();
                if (limb >> bit) & 1 == 1 {
                    acc *= *self;
                }
            }
        }
        acc
    }

    /// Square root via Tonelli-Shanks.
    ///
    /// Returns `None` if `self` is a quadratic non-residue. Otherwise returns one of the
    /// two roots; only `root.sqr() == self` is guaranteed.
    pub fn sqrt(&self) -> Option<Self> {
        if self.is_zero() {
            return Some(Self::zero());
        }
        // Euler's criterion
        if !self.pow_limbs(&R_MINUS_ONE_HALF).is_one() {
            return None;
        }

        let mut m = TWO_ADICITY;
        let mut c = Self::from(NON_RESIDUE).pow_limbs(&TRACE);
        let mut x = self.pow_limbs(&TRACE_PLUS_ONE_HALF);
        let mut b = self.pow_limbs(&TRACE);

        while !b.is_one() {
            // least i with b^(2^i) == 1, always below m for a residue
            let mut i = 1;
            let mut b2i = b.sqr();
            while !b2i.is_one() {
                b2i = b2i.sqr();
                i += 1;
            }
            let mut t = c;
            for _ in 0..m - i - 1 {
                t = t.sqr();
            }
            x *= t;
            c = t.sqr();
            b *= c;
            m = i;
        }
        Some(x)
    }

    /// Canonical 32 byte big-endian encoding.
    pub fn serialize(&self) -> [u8; FR_LENGTH] {
        engine::fr_to_bendian(&self.0)
    }

    /// Decodes the canonical encoding produced by [`Fr::serialize`].
    ///
    /// Fails if the input is not 32 bytes or encodes an integer `>= r`.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; FR_LENGTH] = bytes.try_into().map_err(|_| {
            tracing::debug!(len = bytes.len(), "rejecting Fr encoding of wrong length");
            PairingError::invalid_length("Fr", FR_LENGTH, bytes.len())
        })?;
        engine::fr_from_bendian(bytes).map(Self).ok_or_else(|| {
            tracing::debug!("rejecting non-canonical Fr encoding");
            PairingError::NonCanonical("Fr")
        })
    }

    /// The canonical integer in `[0, r)`.
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.serialize())
    }

    /// Reduces an arbitrary integer modulo `r`.
    pub fn from_biguint(value: &BigUint) -> Self {
        Self(engine::fr_from_wide_bendian(&value.to_bytes_be()))
    }

    pub(crate) fn to_scalar(self) -> blst::blst_scalar {
        engine::fr_to_scalar(&self.0)
    }
}

impl From<u64> for Fr {
    fn from(value: u64) -> Self {
        Self(engine::fr_from_u64(value))
    }
}

impl From<i64> for Fr {
    fn from(value: i64) -> Self {
        let magnitude = Self::from(value.unsigned_abs());
        if value < 0 {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl From<u32> for Fr {
    fn from(value: u32) -> Self {
        Self::from(u64::from(value))
    }
}

impl From<i32> for Fr {
    fn from(value: i32) -> Self {
        Self::from(i64::from(value))
    }
}

/// Parses a decimal or `0x` hexadecimal integer with an optional leading `-`,
/// reduced modulo `r`.
impl FromStr for Fr {
    type Err = PairingError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let value = parse_uint(digits).ok_or_else(|| {
            tracing::debug!(input = s, "rejecting Fr literal");
            PairingError::InvalidString("Fr")
        })?;
        let fr = Self::from_biguint(&value);
        Ok(if negative { -fr } else { fr })
    }
}

impl Add for Fr {
    type Output = Fr;

    fn add(self, rhs: Fr) -> Fr {
        Self(engine::fr_add(&self.0, &rhs.0))
    }
}

impl Sub for Fr {
    type Output = Fr;

    fn sub(self, rhs: Fr) -> Fr {
        Self(engine::fr_sub(&self.0, &rhs.0))
    }
}

impl Mul for Fr {
    type Output = Fr;

    fn mul(self, rhs: Fr) -> Fr {
        Self(engine::fr_mul(&self.0, &rhs.0))
    }
}

impl Neg for Fr {
    type Output = Fr;

    fn neg(self) -> Fr {
        Self(engine::fr_neg(&self.0))
    }
}

impl AddAssign for Fr {
    fn add_assign(&mut self, rhs: Fr) {
        *self = *self + rhs;
    }
}

impl SubAssign for Fr {
    fn sub_assign(&mut self, rhs: Fr) {
        *self = *self - rhs;
    }
}

impl MulAssign for Fr {
    fn mul_assign(&mut self, rhs: Fr) {
        *self = *self * rhs;
    }
}

impl core::iter::Sum for Fr {
    fn sum<I: Iterator<Item = Fr>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl core::iter::Product for Fr {
    fn product<I: Iterator<Item = Fr>>(iter: I) -> Self {
        iter.fold(Self::one(), Mul::mul)
    }
}

impl Hash for Fr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(&self.serialize());
    }
}

impl fmt::Display for Fr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_biguint())
    }
}

impl fmt::Debug for Fr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fr({self})")
    }
}
