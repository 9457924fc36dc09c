//! The order `r` subgroup of `E(Fp)`.
use crate::{
    constants::{G1_HASH_DST, G1_LENGTH},
    engine,
    utils::{fp_from_str, fp_to_decimal, point_error},
    Fr, PairingError, Result,
};
use blst::{blst_p1, blst_p1_affine};
use core::{
    fmt,
    hash::{Hash, Hasher},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

/// A point of the prime order subgroup of the BLS12-381 curve over `Fp`.
///
/// Stored in Jacobian coordinates, so equality is decided by the curve engine
/// rather than by comparing buffers.
#[derive(Clone, Copy, Default)]
#[repr(transparent)]
pub struct G1(pub(crate) blst_p1);

impl G1 {
    /// The point at infinity.
    pub fn identity() -> Self {
        Self::default()
    }

    /// The canonical generator, also available as [`g1()`](crate::g1).
    pub fn generator() -> Self {
        Self(engine::p1_generator())
    }

    /// Hashes `msg` onto the curve with the RFC 9380 `BLS12381G1_XMD:SHA-256_SSWU_RO_` suite.
    pub fn hash(msg: &[u8]) -> Self {
        Self::hash_with_dst(G1_HASH_DST, msg)
    }

    /// Hashes `msg` onto the curve under a caller supplied domain separation tag.
    pub fn hash_with_dst(dst: &[u8], msg: &[u8]) -> Self {
        Self(engine::hash_to_g1(dst, msg))
    }

    /// Returns `true` for the point at infinity.
    pub fn is_zero(&self) -> bool {
        engine::p1_is_inf(&self.0)
    }

    /// Computes `sum(point_i * scalar_i)` with Pippenger's algorithm.
    ///
    /// The empty sum is the identity.
    pub fn msm(terms: &[(G1, Fr)]) -> Self {
        let (points, scalars): (Vec<_>, Vec<_>) = terms
            .iter()
            .filter(|(point, scalar)| !point.is_zero() && !scalar.is_zero())
            .map(|(point, scalar)| (point.to_affine(), scalar.to_scalar()))
            .unzip();
        match points.len() {
            0 => Self::identity(),
            1 => Self(engine::p1_mult(&engine::p1_from_affine(&points[0]), &scalars[0])),
            _ => Self(engine::p1_msm(&points, &scalars)),
        }
    }

    /// 48 byte ZCash compressed encoding.
    pub fn serialize(&self) -> [u8; G1_LENGTH] {
        engine::p1_compress(&self.0)
    }

    /// Decodes a compressed point, checking the flag bits, the coordinate, the curve
    /// equation and subgroup membership.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; G1_LENGTH] = bytes.try_into().map_err(|_| {
            tracing::debug!(len = bytes.len(), "rejecting G1 encoding of wrong length");
            PairingError::invalid_length("G1", G1_LENGTH, bytes.len())
        })?;
        let affine = engine::p1_uncompress(bytes).map_err(|err| {
            tracing::debug!(?err, "rejecting G1 encoding");
            point_error(err, "G1")
        })?;
        Self::from_affine(affine)
    }

    /// Subgroup checks a point already known to be on the curve.
    fn from_affine(affine: blst_p1_affine) -> Result<Self> {
        if engine::p1_affine_is_inf(&affine) {
            return Ok(Self::identity());
        }
        if !engine::p1_affine_in_g1(&affine) {
            tracing::debug!("rejecting G1 point outside the prime order subgroup");
            return Err(PairingError::NotInSubgroup("G1"));
        }
        Ok(Self(engine::p1_from_affine(&affine)))
    }

    pub(crate) fn to_affine(self) -> blst_p1_affine {
        engine::p1_to_affine(&self.0)
    }
}

/// Parses `"0"` for the identity or `"1 x y"` with decimal or `0x` hex coordinates.
impl FromStr for G1 {
    type Err = PairingError;

    fn from_str(s: &str) -> Result<Self> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        match tokens.as_slice() {
            ["0"] => Ok(Self::identity()),
            ["1", x, y] => {
                let affine = blst_p1_affine {
                    x: fp_from_str(x, "G1")?,
                    y: fp_from_str(y, "G1")?,
                };
                // blst treats the all-zero affine point as infinity and on the curve
                if engine::p1_affine_is_inf(&affine) || !engine::p1_affine_on_curve(&affine) {
                    tracing::debug!(input = s, "rejecting G1 point off the curve");
                    return Err(PairingError::NotOnCurve("G1"));
                }
                Self::from_affine(affine)
            }
            _ => {
                tracing::debug!(input = s, "rejecting G1 literal");
                Err(PairingError::InvalidString("G1"))
            }
        }
    }
}

impl fmt::Display for G1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let affine = self.to_affine();
        write!(
            f,
            "1 {} {}",
            fp_to_decimal(&affine.x),
            fp_to_decimal(&affine.y)
        )
    }
}

impl fmt::Debug for G1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G1({self})")
    }
}

impl PartialEq for G1 {
    fn eq(&self, other: &Self) -> bool {
        engine::p1_is_equal(&self.0, &other.0)
    }
}

impl Eq for G1 {}

impl Hash for G1 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(&self.serialize());
    }
}

impl Add for G1 {
    type Output = G1;

    fn add(self, rhs: G1) -> G1 {
        Self(engine::p1_add(&self.0, &rhs.0))
    }
}

impl Sub for G1 {
    type Output = G1;

    fn sub(self, rhs: G1) -> G1 {
        self + (-rhs)
    }
}

impl Neg for G1 {
    type Output = G1;

    fn neg(self) -> G1 {
        Self(engine::p1_neg(&self.0))
    }
}

impl Mul<Fr> for G1 {
    type Output = G1;

    fn mul(self, rhs: Fr) -> G1 {
        Self(engine::p1_mult(&self.0, &rhs.to_scalar()))
    }
}

impl AddAssign for G1 {
    fn add_assign(&mut self, rhs: G1) {
        *self = *self + rhs;
    }
}

impl SubAssign for G1 {
    fn sub_assign(&mut self, rhs: G1) {
        *self = *self - rhs;
    }
}

impl MulAssign<Fr> for G1 {
    fn mul_assign(&mut self, rhs: Fr) {
        *self = *self * rhs;
    }
}

impl core::iter::Sum for G1 {
    fn sum<I: Iterator<Item = G1>>(iter: I) -> Self {
        iter.fold(Self::identity(), Add::add)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::MODULUS_REPR;
    use hex_literal::hex;
    use rand::{rngs::StdRng, SeedableRng};
    use rstest::rstest;

    const GENERATOR_COMPRESSED: [u8; G1_LENGTH] = hex!("97f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb");

    const GENERATOR_STR: &str = "1 0x17f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb 0x08b3f481e3aaa0f1a09e30ed741d8ae4fcf5e095d5d00af600db18cb2c04b3edd03cc744a2888ae40caa232946c5e7e1";

    #[test]
    fn generator_encoding() {
        assert_eq!(G1::generator().serialize(), GENERATOR_COMPRESSED);
        assert_eq!(G1::deserialize(&GENERATOR_COMPRESSED).unwrap(), G1::generator());
        assert_eq!(GENERATOR_STR.parse::<G1>().unwrap(), G1::generator());
    }

    #[test]
    fn identity_behaviour() {
        let g = G1::generator();
        let zero = G1::identity();
        assert!(zero.is_zero());
        assert!(G1::default().is_zero());
        assert_eq!(g + zero, g);
        assert!((g - g).is_zero());
        assert!((g * Fr::zero()).is_zero());
        assert_eq!(zero.to_string(), "0");
        assert!("0".parse::<G1>().unwrap().is_zero());

        let encoded = zero.serialize();
        assert_eq!(encoded[0], 0xc0);
        assert!(G1::deserialize(&encoded).unwrap().is_zero());
    }

    #[test]
    fn scalar_multiplication_distributes() {
        let mut rng = StdRng::seed_from_u64(1);
        let g = G1::generator();
        for _ in 0..4 {
            let a = Fr::random_with(&mut rng);
            let b = Fr::random_with(&mut rng);
            assert_eq!(g * a + g * b, g * (a + b));
            assert_eq!((g * a) * b, g * (a * b));
            assert_eq!(-(g * a), g * (-a));
        }
        assert_eq!(g + g, g * Fr::from(2u64));
    }

    #[test]
    fn round_trips() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..4 {
            let p = G1::generator() * Fr::random_with(&mut rng);
            assert_eq!(G1::deserialize(&p.serialize()).unwrap(), p);
            assert_eq!(p.to_string().parse::<G1>().unwrap(), p);
        }
    }

    #[test]
    fn msm_matches_naive_sum() {
        let mut rng = StdRng::seed_from_u64(3);
        let terms: Vec<(G1, Fr)> = (0..8)
            .map(|_| {
                (
                    G1::hash(&Fr::random_with(&mut rng).serialize()),
                    Fr::random_with(&mut rng),
                )
            })
            .collect();
        let naive: G1 = terms.iter().map(|(p, s)| *p * *s).sum();
        assert_eq!(G1::msm(&terms), naive);
        assert_eq!(G1::msm(&terms[..1]), terms[0].0 * terms[0].1);
    }

    #[test]
    fn msm_skips_degenerate_terms() {
        let g = G1::generator();
        assert!(G1::msm(&[]).is_zero());
        assert!(G1::msm(&[(G1::identity(), Fr::one()), (g, Fr::zero())]).is_zero());
        assert_eq!(
            G1::msm(&[(G1::identity(), Fr::one()), (g, Fr::from(3u64))]),
            g * Fr::from(3u64)
        );
    }

    #[test]
    fn hash_to_curve() {
        let p = G1::hash(b"message");
        assert_eq!(p, G1::hash(b"message"));
        assert_ne!(p, G1::hash(b"other message"));
        assert_ne!(p, G1::hash_with_dst(b"CUSTOM_DST", b"message"));
        assert!(!p.is_zero());
        // hashed points are in the subgroup
        assert_eq!(G1::deserialize(&p.serialize()).unwrap(), p);
    }

    #[rstest]
    #[case::short(47)]
    #[case::long(49)]
    #[case::uncompressed(96)]
    fn rejects_wrong_length(#[case] len: usize) {
        assert_eq!(
            G1::deserialize(&vec![0x80; len]),
            Err(PairingError::invalid_length("G1", G1_LENGTH, len))
        );
    }

    #[test]
    fn rejects_malformed_encodings() {
        // compression flag missing
        let mut bytes = GENERATOR_COMPRESSED;
        bytes[0] &= 0x7f;
        assert_eq!(G1::deserialize(&bytes), Err(PairingError::BadEncoding("G1")));

        // infinity flag with a payload
        let mut bytes = [0u8; G1_LENGTH];
        bytes[0] = 0xc0;
        bytes[G1_LENGTH - 1] = 1;
        assert_eq!(G1::deserialize(&bytes), Err(PairingError::BadEncoding("G1")));

        // x equal to the field modulus
        let mut bytes = MODULUS_REPR;
        bytes[0] |= 0x80;
        assert_eq!(G1::deserialize(&bytes), Err(PairingError::BadEncoding("G1")));
    }

    #[test]
    fn rejects_points_outside_subgroup() {
        // x = 0 gives a point of order 3
        let mut bytes = [0u8; G1_LENGTH];
        bytes[0] = 0x80;
        assert_eq!(G1::deserialize(&bytes), Err(PairingError::NotInSubgroup("G1")));
        assert_eq!("1 0 2".parse::<G1>(), Err(PairingError::NotInSubgroup("G1")));
    }

    #[rstest]
    #[case::empty("")]
    #[case::wrong_tag("2 1 2")]
    #[case::missing_coordinate("1 5")]
    #[case::trailing("0 0")]
    #[case::garbage("1 x y")]
    fn rejects_bad_strings(#[case] input: &str) {
        assert_eq!(input.parse::<G1>(), Err(PairingError::InvalidString("G1")));
    }

    #[test]
    fn rejects_off_curve_string() {
        assert_eq!("1 1 1".parse::<G1>(), Err(PairingError::NotOnCurve("G1")));
        // (0, 0) is not a spelling of the identity
        assert_eq!("1 0 0".parse::<G1>(), Err(PairingError::NotOnCurve("G1")));
        assert_eq!("1 0x0 0".parse::<G1>(), Err(PairingError::NotOnCurve("G1")));
    }

    #[test]
    fn equality_ignores_representation() {
        let g = G1::generator();
        // doubling and adding produce different Jacobian buffers
        let a = g + g + g;
        let b = g * Fr::from(3u64);
        assert_eq!(a, b);
        let set: std::collections::HashSet<G1> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }
}
