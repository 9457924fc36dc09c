//! The optimal ate pairing `e: G1 x G2 -> GT`.
use crate::{engine, G1, G2, GT};
use tracing::instrument;

/// Computes `e(p, q)`.
///
/// Returns [`GT::one`] if either argument is the identity.
#[instrument(level = "trace", skip_all)]
pub fn pairing(p: &G1, q: &G2) -> GT {
    if p.is_zero() || q.is_zero() {
        return GT::one();
    }
    let ml = engine::miller_loop(&p.to_affine(), &q.to_affine());
    GT(engine::final_exp(&ml))
}

/// Computes `prod e(p_i, q_i)` with one final exponentiation for the whole product.
///
/// Pairs containing an identity contribute one and are skipped. The empty product is one.
#[instrument(level = "trace", skip_all, fields(pairs = pairs.len()))]
pub fn multi_pairing(pairs: &[(G1, G2)]) -> GT {
    let mut live = pairs
        .iter()
        .filter(|(p, q)| !p.is_zero() && !q.is_zero());

    // Compute the miller loop for the first pair
    let Some((first_g1, first_g2)) = live.next() else {
        return GT::one();
    };
    let mut acc = engine::miller_loop(&first_g1.to_affine(), &first_g2.to_affine());

    // For the remaining pairs, compute miller loop and multiply with the accumulated result
    for (p, q) in live {
        let ml = engine::miller_loop(&p.to_affine(), &q.to_affine());
        acc = engine::fp12_mul(&acc, &ml);
    }

    GT(engine::final_exp(&acc))
}

/// Returns `true` if `prod e(p_i, q_i)` is the identity of `GT`.
pub fn pairing_check(pairs: &[(G1, G2)]) -> bool {
    multi_pairing(pairs).is_one()
}
