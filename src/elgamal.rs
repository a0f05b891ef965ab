//! ElGamal-style encryption of scalar messages.
//!
//! A message `m` is encoded as the point `M = m*G`. Encryption under the public
//! key `Q` draws a fresh ephemeral `k` and outputs `(C1, C2) = (kG, M + kQ)`;
//! decryption with the private key `d` recovers `M = C2 - d*C1`. Recovering
//! `m` from `M` is a discrete logarithm and is left to the caller.
//!
//! ```
//! use prime_ecc::domain::DomainParams;
//! use prime_ecc::ecdh::KeyPair;
//! use prime_ecc::elgamal::{decrypt, encode_message, encrypt};
//! use num::BigUint;
//! use rand_core::OsRng;
//!
//! let params = DomainParams::secp256k1().unwrap();
//! let kp = KeyPair::generate(&params, &mut OsRng).unwrap();
//! let m = BigUint::from(42_u32);
//!
//! let ct = encrypt(&m, kp.public_key(), &params, &mut OsRng).unwrap();
//! let decrypted = decrypt(&ct, kp.private_key()).unwrap();
//! assert_eq!(decrypted, encode_message(&m, &params).unwrap());
//! ```

use num::BigUint;
use rand_core::{CryptoRng, RngCore};

use crate::domain::DomainParams;
use crate::errors::Result;
use crate::point::AffinePoint;
use crate::scalar::random_nonzero_scalar;

/// An ElGamal ciphertext `(C1, C2)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    c1: AffinePoint,
    c2: AffinePoint,
}

impl Ciphertext {
    /// The ephemeral point `kG`
    pub fn c1(&self) -> &AffinePoint {
        &self.c1
    }

    /// The masked message `M + kQ`
    pub fn c2(&self) -> &AffinePoint {
        &self.c2
    }
}

/// Returns `m*G`
pub fn encode_message(message: &BigUint, params: &DomainParams) -> Result<AffinePoint> {
    params.base_mul(message)
}

/// Encrypts the message scalar under `public_key`. The ephemeral scalar is
/// drawn from `rng` for every call.
pub fn encrypt<R>(
    message: &BigUint,
    public_key: &AffinePoint,
    params: &DomainParams,
    rng: &mut R,
) -> Result<Ciphertext>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let k = random_nonzero_scalar(rng, params.order())?;
    let c1 = params.base_mul(&k)?;
    let mask = public_key.mul_unsigned(&k)?;
    let c2 = encode_message(message, params)?.add(&mask)?;
    Ok(Ciphertext { c1: c1, c2: c2 })
}

/// Decrypts `ciphertext` with `private_key`, returning the message point
/// `m*G`
pub fn decrypt(ciphertext: &Ciphertext, private_key: &BigUint) -> Result<AffinePoint> {
    let shared = ciphertext.c1.mul_unsigned(private_key)?;
    ciphertext.c2.sub(&shared)
}
