//! serde support. Human readable formats carry the canonical string, binary formats the
//! canonical bytes. Both paths validate exactly like `FromStr` and `deserialize`.
use crate::{Fr, G1, G2, GT};
use core::{fmt, marker::PhantomData, str::FromStr};
use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

struct CanonicalVisitor<T>(PhantomData<T>);

/// Types with a canonical string and byte form.
trait Canonical: FromStr<Err = crate::PairingError> + fmt::Display + Sized {
    const NAME: &'static str;

    fn to_bytes(&self) -> Vec<u8>;

    fn from_bytes(bytes: &[u8]) -> crate::Result<Self>;
}

impl<'de, T: Canonical> Visitor<'de> for CanonicalVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a canonical {} encoding", T::NAME)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<T, E> {
        T::from_bytes(v).map_err(E::custom)
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<T, A::Error> {
        let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or_default());
        while let Some(byte) = seq.next_element::<u8>()? {
            bytes.push(byte);
        }
        self.visit_bytes(&bytes)
    }
}

macro_rules! impl_serde {
    ($($ty:ident),+) => {$(
        impl Canonical for $ty {
            const NAME: &'static str = stringify!($ty);

            fn to_bytes(&self) -> Vec<u8> {
                self.serialize().to_vec()
            }

            fn from_bytes(bytes: &[u8]) -> crate::Result<Self> {
                $ty::deserialize(bytes)
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                if serializer.is_human_readable() {
                    serializer.collect_str(self)
                } else {
                    serializer.serialize_bytes(&Canonical::to_bytes(self))
                }
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                if deserializer.is_human_readable() {
                    deserializer.deserialize_str(CanonicalVisitor(PhantomData))
                } else {
                    deserializer.deserialize_bytes(CanonicalVisitor(PhantomData))
                }
            }
        }
    )+};
}

impl_serde!(Fr, G1, G2, GT);

#[cfg(test)]
mod test {
    use crate::{g1, g2, pairing, Fr, G1, G2, GT};

    #[test]
    fn json_uses_strings() {
        assert_eq!(serde_json::to_string(&Fr::from(42u64)).unwrap(), "\"42\"");
        assert_eq!(serde_json::to_string(&G1::default()).unwrap(), "\"0\"");
    }

    #[test]
    fn json_round_trip() {
        let fr = Fr::hash(b"serde");
        let p = g1() * fr;
        let q = g2() * fr;
        let e = pairing(&p, &g2());

        let json = serde_json::to_string(&(fr, p, q, e)).unwrap();
        let back: (Fr, G1, G2, GT) = serde_json::from_str(&json).unwrap();
        assert_eq!(back, (fr, p, q, e));
    }

    #[test]
    fn json_rejects_invalid_values() {
        assert!(serde_json::from_str::<G1>("\"1 1 1\"").is_err());
        assert!(serde_json::from_str::<Fr>("\"not a number\"").is_err());
        assert!(serde_json::from_str::<GT>("\"1 0 0\"").is_err());
    }
}
