//! Collection of errors raised by curve arithmetic and the protocols built on
//! top of it.
//!
//! Every failure is one of two kinds: a [`DomainError`], where the inputs fall
//! outside the domain of the requested operation, or [`Error::NotFound`],
//! where a bounded search ran to completion without success.

use num::BigUint;
use thiserror::Error as ThisError;

/// Result type used throughout the crate
pub type Result<T> = core::result::Result<T, Error>;

/// Top-level error type
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum Error {
    /// The inputs are outside the domain of the operation
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
    /// Every candidate x-coordinate below `modulus` was tried without finding
    /// a point on the curve
    #[error("no point found on curve over field of size {modulus}")]
    NotFound { modulus: BigUint },
}

/// Domain failures. None of these are retried internally.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum DomainError {
    /// `4a^3 + 27b^2 = 0 (mod p)`
    #[error("curve is singular (discriminant is zero)")]
    SingularCurve,
    /// The field modulus cannot define an odd prime field
    #[error("field modulus {0} is not an odd prime candidate")]
    InvalidModulus(BigUint),
    /// Operands of a group operation live on different curves
    #[error("points belong to different curves")]
    CurveMismatch,
    #[error("modular inverse of {value} mod {modulus} does not exist")]
    NoInverse { value: BigUint, modulus: BigUint },
    #[error("point ({x}, {y}) is not on the curve")]
    NotOnCurve { x: BigUint, y: BigUint },
    /// Tonelli-Shanks hit its iteration cap, which only happens when the
    /// modulus is not prime
    #[error("square root did not converge after {iterations} iterations")]
    SqrtNoConvergence { iterations: usize },
    #[error("generator must not be the point at infinity")]
    IdentityGenerator,
    #[error("group order must be at least 2")]
    InvalidOrder,
    /// A scalar (usually a private key) outside `[1, N-1]`
    #[error("scalar is outside [1, N-1]")]
    InvalidScalar,
    /// `k*G` was the point at infinity while signing
    #[error("ephemeral point is the point at infinity")]
    IdentityNonce,
    #[error("signature component r is zero")]
    ZeroR,
    #[error("signature component s is zero")]
    ZeroS,
}

/// Shorthand for the error returned when `value` has no inverse mod `modulus`
pub(crate) fn no_inverse(value: &BigUint, modulus: &BigUint) -> Error {
    DomainError::NoInverse {
        value: value.clone(),
        modulus: modulus.clone(),
    }
    .into()
}
