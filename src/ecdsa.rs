//! ECDSA-shaped signatures over arbitrary domain parameters.
//!
//! Signing hashes the message to a scalar `h = HASH(m) mod N`, draws a fresh
//! nonce `k` from `[1, N-1]`, and outputs `(r, s)` with `r = (kG).x mod N` and
//! `s = k^-1 (h + r d) mod N`. Verification recomputes
//! `P = (h/s) G + (r/s) Q` and accepts iff `P.x mod N = r`.
//!
//! ```
//! use prime_ecc::domain::DomainParams;
//! use prime_ecc::ecdh::KeyPair;
//! use prime_ecc::ecdsa::verify;
//! use rand_core::OsRng;
//!
//! let params = DomainParams::secp256k1().unwrap();
//! let kp = KeyPair::generate(&params, &mut OsRng).unwrap();
//!
//! let sig = kp.sign(b"some message", &params, &mut OsRng).unwrap();
//! assert!(verify(b"some message", &sig, kp.public_key(), &params));
//! assert!(!verify(b"another message", &sig, kp.public_key(), &params));
//! ```
//!
//! A nonce is never reused or derived from earlier state: reusing `k` for two
//! messages reveals the private key.

use log::debug;
use num::{BigUint, Zero};
use rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::arithmetic::mod_inverse;
use crate::domain::DomainParams;
use crate::errors::{DomainError, Result};
use crate::point::AffinePoint;
use crate::scalar::{is_valid_scalar, random_nonzero_scalar};

/// A signature `(r, s)`. Valid signatures have both components in `[1, N-1]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    /// Wraps the components of an existing signature. The range check happens
    /// during verification.
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Self { r: r, s: s }
    }

    pub fn r(&self) -> &BigUint {
        &self.r
    }

    pub fn s(&self) -> &BigUint {
        &self.s
    }
}

/// Interprets `D(message)` as a big-endian integer and reduces it mod `n`
pub fn hash_to_scalar<D: Digest>(message: &[u8], n: &BigUint) -> BigUint {
    BigUint::from_bytes_be(&D::digest(message)) % n
}

/// Signs `message` under `private_key`, hashing with SHA-256
pub fn sign<R>(
    message: &[u8],
    private_key: &BigUint,
    params: &DomainParams,
    rng: &mut R,
) -> Result<Signature>
where
    R: RngCore + CryptoRng + ?Sized,
{
    sign_digest::<Sha256, R>(message, private_key, params, rng)
}

/// Signs `message` under `private_key`, hashing with `D`.
///
/// # Errors
///
/// `InvalidScalar` if the private key is outside `[1, N-1]`; `IdentityNonce`,
/// `ZeroR` or `ZeroS` if the drawn nonce produces a degenerate signature.
/// Degenerate outcomes are not retried here; callers may sign again, which
/// draws a new nonce.
pub fn sign_digest<D, R>(
    message: &[u8],
    private_key: &BigUint,
    params: &DomainParams,
    rng: &mut R,
) -> Result<Signature>
where
    D: Digest,
    R: RngCore + CryptoRng + ?Sized,
{
    if !is_valid_scalar(private_key, params.order()) {
        return Err(DomainError::InvalidScalar.into());
    }
    let h = hash_to_scalar::<D>(message, params.order());
    let k = random_nonzero_scalar(rng, params.order())?;
    sign_with_nonce(&h, &k, private_key, params)
}

/// Core signing equation for a prehashed message `h` and nonce `k`
pub(crate) fn sign_with_nonce(
    h: &BigUint,
    k: &BigUint,
    private_key: &BigUint,
    params: &DomainParams,
) -> Result<Signature> {
    let n = params.order();
    let big_r = params.base_mul(k)?;
    let r = match big_r.x() {
        Some(x) => x % n,
        None => {
            debug!("signing aborted: nonce point is the point at infinity");
            return Err(DomainError::IdentityNonce.into());
        }
    };
    if r.is_zero() {
        debug!("signing aborted: r = 0");
        return Err(DomainError::ZeroR.into());
    }

    let k_inv = mod_inverse(k, n)?;
    let s = (k_inv * ((h + &r * private_key) % n)) % n;
    if s.is_zero() {
        debug!("signing aborted: s = 0");
        return Err(DomainError::ZeroS.into());
    }
    Ok(Signature { r: r, s: s })
}

/// Verifies `signature` on `message` against `public_key`, hashing with
/// SHA-256
pub fn verify(
    message: &[u8],
    signature: &Signature,
    public_key: &AffinePoint,
    params: &DomainParams,
) -> bool {
    verify_digest::<Sha256>(message, signature, public_key, params)
}

/// Verifies `signature` on `message` against `public_key`, hashing with `D`.
///
/// Returns `false` for out-of-range components, for a public key on a
/// different curve, and for any signature that does not satisfy the
/// verification equation.
pub fn verify_digest<D: Digest>(
    message: &[u8],
    signature: &Signature,
    public_key: &AffinePoint,
    params: &DomainParams,
) -> bool {
    let h = hash_to_scalar::<D>(message, params.order());
    verify_prehashed(&h, signature, public_key, params)
}

pub(crate) fn verify_prehashed(
    h: &BigUint,
    signature: &Signature,
    public_key: &AffinePoint,
    params: &DomainParams,
) -> bool {
    let n = params.order();
    if !is_valid_scalar(&signature.r, n) || !is_valid_scalar(&signature.s, n) {
        debug!("signature rejected: component outside [1, N-1]");
        return false;
    }
    match recover_x(h, signature, public_key, params) {
        Ok(Some(x)) => {
            let len = n.to_bytes_be().len();
            let x = get_filled_buffer(&(x % n).to_bytes_be(), len);
            let r = get_filled_buffer(&signature.r.to_bytes_be(), len);
            x.as_slice().ct_eq(r.as_slice()).into()
        }
        Ok(None) => {
            debug!("signature rejected: u1*G + u2*Q is the point at infinity");
            false
        }
        Err(e) => {
            debug!("signature rejected: {}", e);
            false
        }
    }
}

/// Returns the x-coordinate of `u1*G + u2*Q`
fn recover_x(
    h: &BigUint,
    signature: &Signature,
    public_key: &AffinePoint,
    params: &DomainParams,
) -> Result<Option<BigUint>> {
    let n = params.order();
    let w = mod_inverse(&signature.s, n)?;
    let u1 = (h * &w) % n;
    let u2 = (&signature.r * &w) % n;
    let p = params
        .base_mul(&u1)?
        .add(&public_key.mul_unsigned(&u2)?)?;
    Ok(p.x().cloned())
}

/// returns a new vector that is filled with 0's up to `fill_len` length
fn get_filled_buffer(unfilled: &[u8], fill_len: usize) -> Vec<u8> {
    let mut wrapper = vec![0; fill_len];
    wrapper[fill_len - unfilled.len()..].copy_from_slice(unfilled);
    wrapper
}
