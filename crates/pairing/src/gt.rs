//! The target group `GT`, the order `r` subgroup of `Fp12*`.
use crate::{
    constants::{FP_LENGTH, GT_LENGTH},
    engine,
    utils::{fp_from_bendian, fp_from_str, fp_to_bendian, fp_to_decimal},
    Fr, PairingError, Result,
};
use blst::{blst_fp, blst_fp12, blst_fp6};
use core::{
    fmt,
    hash::{Hash, Hasher},
    ops::{Mul, MulAssign},
    str::FromStr,
};

/// Number of base field coefficients of an `Fp12` element.
const COEFFICIENTS: usize = GT_LENGTH / FP_LENGTH;

/// All coefficients zero. `blst_fp12::default()` is one, not zero.
fn fp12_zero() -> blst_fp12 {
    blst_fp12 {
        fp6: [blst_fp6::default(); 2],
    }
}

/// An element of the pairing target group.
///
/// `GT` is written multiplicatively. Besides the group members there is one
/// extra value, [`GT::zero`], used as a seed for accumulators. It multiplies
/// and serializes like any other value but has no inverse.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct GT(pub(crate) blst_fp12);

impl GT {
    /// The group identity.
    pub fn one() -> Self {
        Self(engine::fp12_one())
    }

    /// The all-zero sentinel. Not a member of the group.
    pub fn zero() -> Self {
        Self(fp12_zero())
    }

    /// [`GT::one`] if `one` is set, otherwise [`GT::zero`].
    pub fn new(one: bool) -> Self {
        if one {
            Self::one()
        } else {
            Self::zero()
        }
    }

    /// Returns `true` for the group identity.
    pub fn is_one(&self) -> bool {
        engine::fp12_is_one(&self.0)
    }

    /// Returns `true` for the zero sentinel.
    pub fn is_zero(&self) -> bool {
        engine::fp12_is_equal(&self.0, &fp12_zero())
    }

    /// Multiplicative inverse. Fails on the zero sentinel.
    pub fn inverse(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(PairingError::DivisionByZero("GT"));
        }
        Ok(Self(engine::fp12_inverse(&self.0)))
    }

    /// `self * rhs^-1`, failing if `rhs` is the zero sentinel.
    pub fn try_div(&self, rhs: &Self) -> Result<Self> {
        Ok(*self * rhs.inverse()?)
    }

    /// Raises `self` to the canonical integer value of `exp`.
    ///
    /// Plain square-and-multiply over the 255 bit exponent, not constant time.
    pub fn pow(&self, exp: &Fr) -> Self {
        let mut acc = engine::fp12_one();
        for byte in exp.serialize() {
            for bit in (0..8).rev() {
                acc = engine::fp12_sqr(&acc);
                if (byte >> bit) & 1 == 1 {
                    acc = engine::fp12_mul(&acc, &self.0);
                }
            }
        }
        Self(acc)
    }

    /// Twelve 48 byte big-endian base field coefficients, `c0.c0.c0` first and `c1.c2.c1` last.
    pub fn serialize(&self) -> [u8; GT_LENGTH] {
        let mut out = [0u8; GT_LENGTH];
        for (chunk, fp) in out.chunks_exact_mut(FP_LENGTH).zip(coefficients(&self.0)) {
            chunk.copy_from_slice(&fp_to_bendian(fp));
        }
        out
    }

    /// Decodes the encoding produced by [`GT::serialize`].
    ///
    /// Every coefficient must be reduced and the element must lie in the order `r`
    /// subgroup. The zero sentinel encoding is accepted.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != GT_LENGTH {
            tracing::debug!(len = bytes.len(), "rejecting GT encoding of wrong length");
            return Err(PairingError::invalid_length("GT", GT_LENGTH, bytes.len()));
        }
        let mut coeffs = [blst_fp::default(); COEFFICIENTS];
        for (fp, chunk) in coeffs.iter_mut().zip(bytes.chunks_exact(FP_LENGTH)) {
            // chunks_exact yields FP_LENGTH sized slices
            let chunk: &[u8; FP_LENGTH] = chunk
                .try_into()
                .map_err(|_| PairingError::invalid_length("GT", GT_LENGTH, bytes.len()))?;
            *fp = fp_from_bendian(chunk, "GT")?;
        }
        Self::from_coefficients(&coeffs)
    }

    fn from_coefficients(coeffs: &[blst_fp; COEFFICIENTS]) -> Result<Self> {
        let mut fp12 = fp12_zero();
        for (dst, src) in coefficients_mut(&mut fp12).zip(coeffs) {
            *dst = *src;
        }
        let gt = Self(fp12);
        if !gt.is_zero() && !engine::fp12_in_group(&gt.0) {
            tracing::debug!("rejecting Fp12 element outside GT");
            return Err(PairingError::NotInSubgroup("GT"));
        }
        Ok(gt)
    }
}

fn coefficients(f: &blst_fp12) -> impl Iterator<Item = &blst_fp> {
    f.fp6
        .iter()
        .flat_map(|fp6| fp6.fp2.iter())
        .flat_map(|fp2| fp2.fp.iter())
}

fn coefficients_mut(f: &mut blst_fp12) -> impl Iterator<Item = &mut blst_fp> {
    f.fp6
        .iter_mut()
        .flat_map(|fp6| fp6.fp2.iter_mut())
        .flat_map(|fp2| fp2.fp.iter_mut())
}

impl Default for GT {
    fn default() -> Self {
        Self::one()
    }
}

/// Parses twelve whitespace separated coefficients in decimal or `0x` hex.
impl FromStr for GT {
    type Err = PairingError;

    fn from_str(s: &str) -> Result<Self> {
        let mut coeffs = [blst_fp::default(); COEFFICIENTS];
        let mut tokens = s.split_whitespace();
        for fp in coeffs.iter_mut() {
            let token = tokens.next().ok_or(PairingError::InvalidString("GT"))?;
            *fp = fp_from_str(token, "GT")?;
        }
        if tokens.next().is_some() {
            tracing::debug!("rejecting GT literal with trailing coefficients");
            return Err(PairingError::InvalidString("GT"));
        }
        Self::from_coefficients(&coeffs)
    }
}

impl fmt::Display for GT {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fp) in coefficients(&self.0).enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&fp_to_decimal(fp))?;
        }
        Ok(())
    }
}

impl fmt::Debug for GT {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GT({self})")
    }
}

impl PartialEq for GT {
    fn eq(&self, other: &Self) -> bool {
        engine::fp12_is_equal(&self.0, &other.0)
    }
}

impl Eq for GT {}

impl Hash for GT {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(&self.serialize());
    }
}

impl Mul for GT {
    type Output = GT;

    fn mul(self, rhs: GT) -> GT {
        Self(engine::fp12_mul(&self.0, &rhs.0))
    }
}

impl MulAssign for GT {
    fn mul_assign(&mut self, rhs: GT) {
        *self = *self * rhs;
    }
}

impl core::iter::Product for GT {
    fn product<I: Iterator<Item = GT>>(iter: I) -> Self {
        iter.fold(Self::one(), Mul::mul)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{g1, g2, pairing};
    use rand::{rngs::StdRng, SeedableRng};
    use rstest::rstest;

    fn base() -> GT {
        pairing(&g1(), &g2())
    }

    #[test]
    fn constructors() {
        assert!(GT::one().is_one());
        assert!(GT::new(true).is_one());
        assert!(GT::zero().is_zero());
        assert!(GT::new(false).is_zero());
        assert!(GT::default().is_one());
        assert!(!GT::one().is_zero());
        assert!(!GT::zero().is_one());
    }

    #[test]
    fn one_and_zero_are_distinct() {
        let e = base();
        assert_ne!(GT::one(), GT::zero());
        assert!(!GT::new(false).is_one());
        assert_eq!(GT::one().inverse(), Ok(GT::one()));
        assert_eq!(e.try_div(&GT::one()), Ok(e));
        assert!((GT::zero() * e).is_zero());
        assert!(GT::zero().serialize().iter().all(|&b| b == 0));
        assert!(GT::deserialize(&[0u8; GT_LENGTH]).unwrap().is_zero());
    }

    #[test]
    fn inverse_and_division() {
        let e = base();
        assert!((e * e.inverse().unwrap()).is_one());
        assert_eq!((e * e).try_div(&e).unwrap(), e);
        assert_eq!(GT::zero().inverse(), Err(PairingError::DivisionByZero("GT")));
        assert_eq!(e.try_div(&GT::zero()), Err(PairingError::DivisionByZero("GT")));
    }

    #[test]
    fn pow_is_a_homomorphism() {
        let mut rng = StdRng::seed_from_u64(7);
        let e = base();
        for _ in 0..3 {
            let a = Fr::random_with(&mut rng);
            let b = Fr::random_with(&mut rng);
            assert_eq!(e.pow(&a) * e.pow(&b), e.pow(&(a + b)));
            assert_eq!(e.pow(&a).pow(&b), e.pow(&(a * b)));
        }
        assert!(e.pow(&Fr::zero()).is_one());
        assert_eq!(e.pow(&Fr::one()), e);
        assert_eq!(e.pow(&Fr::from(3u64)), e * e * e);
        // e has order r
        assert_eq!(e.pow(&-Fr::one()), e.inverse().unwrap());
    }

    #[test]
    fn zero_sentinel_absorbs() {
        let mut acc = GT::zero();
        acc *= base();
        assert!(acc.is_zero());
    }

    #[test]
    fn byte_round_trip() {
        let e = base();
        let bytes = e.serialize();
        assert_eq!(bytes.len(), GT_LENGTH);
        assert_eq!(GT::deserialize(&bytes).unwrap(), e);

        assert!(GT::deserialize(&GT::zero().serialize()).unwrap().is_zero());
        assert!(GT::deserialize(&GT::one().serialize()).unwrap().is_one());
    }

    #[test]
    fn one_encodes_as_unit_first_coefficient() {
        let bytes = GT::one().serialize();
        assert_eq!(bytes[FP_LENGTH - 1], 1);
        assert!(bytes[..FP_LENGTH - 1].iter().all(|&b| b == 0));
        assert!(bytes[FP_LENGTH..].iter().all(|&b| b == 0));
        assert_eq!(GT::one().to_string(), "1 0 0 0 0 0 0 0 0 0 0 0");
    }

    #[test]
    fn string_round_trip() {
        let e = base().pow(&Fr::from(5u64));
        assert_eq!(e.to_string().parse::<GT>().unwrap(), e);
        assert!("0 0 0 0 0 0 0 0 0 0 0 0".parse::<GT>().unwrap().is_zero());
        assert!("0x1 0 0 0 0 0 0 0 0 0 0 0".parse::<GT>().unwrap().is_one());
    }

    #[rstest]
    #[case::short(575)]
    #[case::long(577)]
    #[case::g2_sized(96)]
    fn rejects_wrong_length(#[case] len: usize) {
        assert_eq!(
            GT::deserialize(&vec![0u8; len]),
            Err(PairingError::invalid_length("GT", GT_LENGTH, len))
        );
    }

    #[test]
    fn rejects_non_canonical_coefficient() {
        let mut bytes = GT::one().serialize();
        bytes[FP_LENGTH..2 * FP_LENGTH].copy_from_slice(&crate::constants::MODULUS_REPR);
        assert_eq!(GT::deserialize(&bytes), Err(PairingError::NonCanonical("GT")));
    }

    #[test]
    fn rejects_elements_outside_subgroup() {
        let mut bytes = [0u8; GT_LENGTH];
        bytes[FP_LENGTH - 1] = 2;
        assert_eq!(GT::deserialize(&bytes), Err(PairingError::NotInSubgroup("GT")));
        assert_eq!(
            "2 0 0 0 0 0 0 0 0 0 0 0".parse::<GT>(),
            Err(PairingError::NotInSubgroup("GT"))
        );
    }

    #[rstest]
    #[case::too_few("1 0 0")]
    #[case::too_many("1 0 0 0 0 0 0 0 0 0 0 0 0")]
    #[case::bad_token("1 0 0 0 0 0 0 0 0 0 0 q")]
    fn rejects_bad_strings(#[case] input: &str) {
        assert_eq!(input.parse::<GT>(), Err(PairingError::InvalidString("GT")));
    }
}
