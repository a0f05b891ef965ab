//! Sampling of secret scalars (private keys and per-signature nonces).
//!
//! Scalars are always drawn fresh from the caller's cryptographically secure
//! RNG and are never derived from previous state.

use num::{BigUint, One, Zero};
use rand_core::{CryptoRng, RngCore};

use crate::errors::{DomainError, Result};

/// Returns a scalar drawn uniformly from `[1, n-1]`.
///
/// Candidates of the same bit length as `n` are sampled and rejected until
/// one lands in range, so every value is equally likely. Fails with
/// `InvalidOrder` if `n < 2`.
pub fn random_nonzero_scalar<R>(rng: &mut R, n: &BigUint) -> Result<BigUint>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if n <= &BigUint::one() {
        return Err(DomainError::InvalidOrder.into());
    }
    let bits = n.bits();
    let len = ((bits + 7) / 8) as usize;
    // clear the excess high bits of the leading byte
    let mask = 0xff_u8 >> (len as u64 * 8 - bits);
    let mut buf = vec![0_u8; len];
    loop {
        rng.fill_bytes(&mut buf);
        buf[0] &= mask;
        let k = BigUint::from_bytes_be(&buf);
        if !k.is_zero() && &k < n {
            return Ok(k);
        }
    }
}

/// Returns `true` if `1 <= k < n`
pub fn is_valid_scalar(k: &BigUint, n: &BigUint) -> bool {
    !k.is_zero() && k < n
}
