//! Elliptic Curve Diffie-Hellman key agreement.
//!
//! Two parties holding key pairs `(a, A = aG)` and `(b, B = bG)` over the same
//! domain parameters each compute `abG`, one as `a*B` and the other as `b*A`.
//!
//! ```
//! use prime_ecc::domain::DomainParams;
//! use prime_ecc::ecdh::{compute_shared_secret, generate_keypair};
//! use rand_core::OsRng;
//!
//! let params = DomainParams::secp256k1().unwrap();
//!
//! // Alice
//! let alice = generate_keypair(&params, &mut OsRng).unwrap();
//! // Bob
//! let bob = generate_keypair(&params, &mut OsRng).unwrap();
//!
//! let alice_shared = compute_shared_secret(alice.private_key(), bob.public_key()).unwrap();
//! let bob_shared = compute_shared_secret(bob.private_key(), alice.public_key()).unwrap();
//! assert_eq!(alice_shared, bob_shared);
//! ```

use core::fmt;

use num::BigUint;
use rand_core::{CryptoRng, RngCore};

use crate::domain::DomainParams;
use crate::ecdsa::{self, Signature};
use crate::errors::{DomainError, Result};
use crate::point::AffinePoint;
use crate::scalar::{is_valid_scalar, random_nonzero_scalar};

/// A private scalar `d` in `[1, N-1]` and the public point `Q = d*G`.
///
/// The `Debug` impl does not print the private key.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    private_key: BigUint,
    public_key: AffinePoint,
}

impl KeyPair {
    /// Generates a fresh key pair, see [`generate_keypair`]
    pub fn generate<R>(params: &DomainParams, rng: &mut R) -> Result<Self>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        generate_keypair(params, rng)
    }

    /// Rebuilds the key pair for an existing private key. Fails with
    /// `InvalidScalar` unless `1 <= private_key < N`.
    pub fn from_private_key(params: &DomainParams, private_key: BigUint) -> Result<Self> {
        if !is_valid_scalar(&private_key, params.order()) {
            return Err(DomainError::InvalidScalar.into());
        }
        let public_key = params.base_mul(&private_key)?;
        Ok(Self {
            private_key: private_key,
            public_key: public_key,
        })
    }

    pub fn private_key(&self) -> &BigUint {
        &self.private_key
    }

    pub fn public_key(&self) -> &AffinePoint {
        &self.public_key
    }

    /// Derives the secret shared with the owner of `other_public_key`
    pub fn diffie_hellman(&self, other_public_key: &AffinePoint) -> Result<SharedSecret> {
        compute_shared_secret(&self.private_key, other_public_key)
    }

    /// Signs `message` with this key pair's private key, see [`ecdsa::sign`]
    pub fn sign<R>(&self, message: &[u8], params: &DomainParams, rng: &mut R) -> Result<Signature>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        ecdsa::sign(message, &self.private_key, params, rng)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .finish()
    }
}

/// The shared point `d*Q` resulting from key agreement
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharedSecret(AffinePoint);

impl SharedSecret {
    pub fn as_point(&self) -> &AffinePoint {
        &self.0
    }

    /// Big-endian bytes of the x-coordinate, the conventional ECDH output.
    /// `None` if the shared point is the point at infinity.
    pub fn x_bytes(&self) -> Option<Vec<u8>> {
        self.0.x().map(BigUint::to_bytes_be)
    }
}

/// Draws a private key uniformly from `[1, N-1]` using `rng` and returns it
/// together with the public key `private_key * G`.
pub fn generate_keypair<R>(params: &DomainParams, rng: &mut R) -> Result<KeyPair>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let private_key = random_nonzero_scalar(rng, params.order())?;
    let public_key = params.base_mul(&private_key)?;
    Ok(KeyPair {
        private_key: private_key,
        public_key: public_key,
    })
}

/// Computes `private_key * other_public_key`
pub fn compute_shared_secret(
    private_key: &BigUint,
    other_public_key: &AffinePoint,
) -> Result<SharedSecret> {
    Ok(SharedSecret(other_public_key.mul_unsigned(private_key)?))
}
