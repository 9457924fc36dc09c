use thiserror::Error;

/// Result type of every fallible operation in this crate.
pub type Result<T, E = PairingError> = core::result::Result<T, E>;

/// Errors returned by constructors, decoders and partial operations.
///
/// The `&'static str` payload names the entity (`"Fr"`, `"G1"`, `"G2"`, `"GT"`)
/// the failing operation was working on.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum PairingError {
    /// Byte input of the wrong size.
    #[error("{entity}: input should be {expected} bytes, was {actual}")]
    InvalidLength {
        /// Entity being decoded.
        entity: &'static str,
        /// Required length.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },
    /// Integer not reduced modulo the field characteristic.
    #[error("{0}: non-canonical field value")]
    NonCanonical(&'static str),
    /// Malformed compressed point (flag bits, infinity with nonzero payload).
    #[error("{0}: bad point encoding")]
    BadEncoding(&'static str),
    /// Coordinates do not satisfy the curve equation.
    #[error("{0}: element not on curve")]
    NotOnCurve(&'static str),
    /// Valid curve or field element outside the order `r` subgroup.
    #[error("{0}: element not in the prime order subgroup")]
    NotInSubgroup(&'static str),
    /// Text that is not a valid string encoding.
    #[error("{0}: malformed string encoding")]
    InvalidString(&'static str),
    /// Division or inversion by zero.
    #[error("{0}: division by zero")]
    DivisionByZero(&'static str),
    /// The operating system entropy source failed.
    #[error("entropy source failure: {0}")]
    Entropy(String),
}

impl PairingError {
    /// Returns `true` for malformed or out-of-range input to a decoder.
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            Self::InvalidLength { .. }
                | Self::NonCanonical(_)
                | Self::BadEncoding(_)
                | Self::NotOnCurve(_)
                | Self::NotInSubgroup(_)
                | Self::InvalidString(_)
        )
    }

    /// Returns `true` for mathematically undefined operations.
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::DivisionByZero(_))
    }

    /// Returns `true` if the entropy source failed.
    pub fn is_entropy(&self) -> bool {
        matches!(self, Self::Entropy(_))
    }

    pub(crate) fn invalid_length(entity: &'static str, expected: usize, actual: usize) -> Self {
        Self::InvalidLength {
            entity,
            expected,
            actual,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn classification() {
        assert!(PairingError::invalid_length("Fr", 32, 31).is_format());
        assert!(PairingError::NotInSubgroup("G2").is_format());
        assert!(!PairingError::NotInSubgroup("G2").is_domain());
        assert!(PairingError::DivisionByZero("GT").is_domain());
        assert!(PairingError::Entropy("unavailable".into()).is_entropy());
    }

    #[test]
    fn display() {
        assert_eq!(
            PairingError::invalid_length("G1", 48, 47).to_string(),
            "G1: input should be 48 bytes, was 47"
        );
        assert_eq!(
            PairingError::DivisionByZero("Fr").to_string(),
            "Fr: division by zero"
        );
    }
}
