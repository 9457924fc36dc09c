//! # bls12-pairing
//!
//! Type-safe algebra over the BLS12-381 pairing-friendly curve.
//!
//! - [`Fr`]: the scalar field, integers modulo the group order [`r()`].
//! - [`G1`], [`G2`]: the order `r` subgroups of the curve and of its twist, written additively.
//! - [`GT`]: the target group, written multiplicatively.
//! - [`pairing`]: the bilinear map `e: G1 x G2 -> GT`.
//!
//! Only algebraically meaningful operations exist. Points are multiplied by scalars on the
//! right, values of different groups never mix, and the pairing arguments cannot be swapped:
//!
//! ```
//! use bls12_pairing::{g1, g2, pairing, Fr};
//!
//! let a = Fr::from(6u64);
//! let b = Fr::from(7u64);
//! let lhs = pairing(&(g1() * a), &(g2() * b));
//! let rhs = pairing(&g1(), &g2()).pow(&(a * b));
//! assert_eq!(lhs, rhs);
//! ```
//!
//! ```compile_fail
//! use bls12_pairing::{g1, g2};
//!
//! let _ = g1() + g2();
//! ```
//!
//! ```compile_fail
//! use bls12_pairing::{g1, Fr};
//!
//! let _ = Fr::from(2u64) * g1();
//! ```
//!
//! ```compile_fail
//! use bls12_pairing::{g1, g2, pairing};
//!
//! let _ = pairing(&g2(), &g1());
//! ```
//!
//! Every value has a canonical byte encoding (`serialize` / `deserialize`) and a canonical
//! string encoding (`Display` / `FromStr`). Decoding validates field canonicity, curve
//! equation and subgroup membership and reports failures as [`PairingError`].
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod constants;
mod engine;
mod error;
mod fr;
mod g1;
mod g2;
mod gt;
mod pairing;
#[cfg(feature = "serde")]
mod serde_impl;
mod utils;

pub use constants::{g1, g2, r};
pub use error::{PairingError, Result};
pub use fr::Fr;
pub use g1::G1;
pub use g2::G2;
pub use gt::GT;
pub use pairing::{multi_pairing, pairing, pairing_check};
