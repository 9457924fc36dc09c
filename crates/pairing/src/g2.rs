//! The order `r` subgroup of the sextic twist `E'(Fp2)`.
use crate::{
    constants::{G2_HASH_DST, G2_LENGTH},
    engine,
    utils::{fp_from_str, fp_to_decimal, point_error},
    Fr, PairingError, Result,
};
use blst::{blst_fp2, blst_p2, blst_p2_affine};
use core::{
    fmt,
    hash::{Hash, Hasher},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

/// A point of the prime order subgroup of the BLS12-381 twist over `Fp2`.
///
/// Stored in Jacobian coordinates, so equality is decided by the curve engine
/// rather than by comparing buffers.
#[derive(Clone, Copy, Default)]
#[repr(transparent)]
pub struct G2(pub(crate) blst_p2);

impl G2 {
    /// The point at infinity.
    pub fn identity() -> Self {
        Self::default()
    }

    /// The canonical generator, also available as [`g2()`](crate::g2).
    pub fn generator() -> Self {
        Self(engine::p2_generator())
    }

    /// Hashes `msg` onto the curve with the RFC 9380 `BLS12381G2_XMD:SHA-256_SSWU_RO_` suite.
    pub fn hash(msg: &[u8]) -> Self {
        Self::hash_with_dst(G2_HASH_DST, msg)
    }

    /// Hashes `msg` onto the curve under a caller supplied domain separation tag.
    pub fn hash_with_dst(dst: &[u8], msg: &[u8]) -> Self {
        Self(engine::hash_to_g2(dst, msg))
    }

    /// Returns `true` for the point at infinity.
    pub fn is_zero(&self) -> bool {
        engine::p2_is_inf(&self.0)
    }

    /// Computes `sum(point_i * scalar_i)` with Pippenger's algorithm.
    ///
    /// The empty sum is the identity.
    pub fn msm(terms: &[(G2, Fr)]) -> Self {
        let (points, scalars): (Vec<_>, Vec<_>) = terms
            .iter()
            .filter(|(point, scalar)| !point.is_zero() && !scalar.is_zero())
            .map(|(point, scalar)| (point.to_affine(), scalar.to_scalar()))
            .unzip();
        match points.len() {
            0 => Self::identity(),
            1 => Self(engine::p2_mult(&engine::p2_from_affine(&points[0]), &scalars[0])),
            _ => Self(engine::p2_msm(&points, &scalars)),
        }
    }

    /// 96 byte ZCash compressed encoding.
    pub fn serialize(&self) -> [u8; G2_LENGTH] {
        engine::p2_compress(&self.0)
    }

    /// Decodes a compressed point, checking the flag bits, the coordinate, the curve
    /// equation and subgroup membership.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; G2_LENGTH] = bytes.try_into().map_err(|_| {
            tracing::debug!(len = bytes.len(), "rejecting G2 encoding of wrong length");
            PairingError::invalid_length("G2", G2_LENGTH, bytes.len())
        })?;
        let affine = engine::p2_uncompress(bytes).map_err(|err| {
            tracing::debug!(?err, "rejecting G2 encoding");
            point_error(err, "G2")
        })?;
        Self::from_affine(affine)
    }

    /// Subgroup checks a point already known to be on the curve.
    fn from_affine(affine: blst_p2_affine) -> Result<Self> {
        if engine::p2_affine_is_inf(&affine) {
            return Ok(Self::identity());
        }
        if !engine::p2_affine_in_g2(&affine) {
            tracing::debug!("rejecting G2 point outside the prime order subgroup");
            return Err(PairingError::NotInSubgroup("G2"));
        }
        Ok(Self(engine::p2_from_affine(&affine)))
    }

    pub(crate) fn to_affine(self) -> blst_p2_affine {
        engine::p2_to_affine(&self.0)
    }
}

/// Parses `"0"` for the identity or `"1 x.c0 x.c1 y.c0 y.c1"` with decimal or `0x` hex
/// coordinates.
impl FromStr for G2 {
    type Err = PairingError;

    fn from_str(s: &str) -> Result<Self> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        match tokens.as_slice() {
            ["0"] => Ok(Self::identity()),
            ["1", x0, x1, y0, y1] => {
                let affine = blst_p2_affine {
                    x: blst_fp2 {
                        fp: [fp_from_str(x0, "G2")?, fp_from_str(x1, "G2")?],
                    },
                    y: blst_fp2 {
                        fp: [fp_from_str(y0, "G2")?, fp_from_str(y1, "G2")?],
                    },
                };
                // blst treats the all-zero affine point as infinity and on the curve
                if engine::p2_affine_is_inf(&affine) || !engine::p2_affine_on_curve(&affine) {
                    tracing::debug!(input = s, "rejecting G2 point off the curve");
                    return Err(PairingError::NotOnCurve("G2"));
                }
                Self::from_affine(affine)
            }
            _ => {
                tracing::debug!(input = s, "rejecting G2 literal");
                Err(PairingError::InvalidString("G2"))
            }
        }
    }
}

impl fmt::Display for G2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let affine = self.to_affine();
        write!(
            f,
            "1 {} {} {} {}",
            fp_to_decimal(&affine.x.fp[0]),
            fp_to_decimal(&affine.x.fp[1]),
            fp_to_decimal(&affine.y.fp[0]),
            fp_to_decimal(&affine.y.fp[1])
        )
    }
}

impl fmt::Debug for G2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G2({self})")
    }
}

impl PartialEq for G2 {
    fn eq(&self, other: &Self) -> bool {
        engine::p2_is_equal(&self.0, &other.0)
    }
}

impl Eq for G2 {}

impl Hash for G2 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(&self.serialize());
    }
}

impl Add for G2 {
    type Output = G2;

    fn add(self, rhs: G2) -> G2 {
        Self(engine::p2_add(&self.0, &rhs.0))
    }
}

impl Sub for G2 {
    type Output = G2;

    fn sub(self, rhs: G2) -> G2 {
        self + (-rhs)
    }
}

impl Neg for G2 {
    type Output = G2;

    fn neg(self) -> G2 {
        Self(engine::p2_neg(&self.0))
    }
}

impl Mul<Fr> for G2 {
    type Output = G2;

    fn mul(self, rhs: Fr) -> G2 {
        Self(engine::p2_mult(&self.0, &rhs.to_scalar()))
    }
}

impl AddAssign for G2 {
    fn add_assign(&mut self, rhs: G2) {
        *self = *self + rhs;
    }
}

impl SubAssign for G2 {
    fn sub_assign(&mut self, rhs: G2) {
        *self = *self - rhs;
    }
}

impl MulAssign<Fr> for G2 {
    fn mul_assign(&mut self, rhs: Fr) {
        *self = *self * rhs;
    }
}

impl core::iter::Sum for G2 {
    fn sum<I: Iterator<Item = G2>>(iter: I) -> Self {
        iter.fold(Self::identity(), Add::add)
    }
}
