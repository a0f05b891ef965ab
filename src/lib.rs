//! Elliptic curve arithmetic over prime fields, and the protocols built on it.
//!
//! Curves are short-Weierstrass, `y^2 = x^3 + ax + b (mod p)`, with arbitrary
//! parameters supplied at runtime. Field elements and scalars are
//! `num::BigUint` values.
//!
//! - [`arithmetic`]: modular inverse and Tonelli-Shanks square roots
//! - [`curve`] and [`point`]: curves and the group law
//! - [`domain`]: a curve with a fixed generator and group order
//! - [`ecdh`]: key generation and Diffie-Hellman key agreement
//! - [`ecdsa`]: hash-then-sign signatures
//! - [`elgamal`]: ElGamal-style encryption of scalar messages
//! - [`generator`]: brute-force search for a point on a small curve
//!
//! # Warning
//!
//! Nothing in this crate runs in constant time. It is suitable for study and
//! testing, not for protecting secrets against side-channel attacks.

#![deny(unused_qualifications)]

pub mod arithmetic;
pub mod curve;
pub mod domain;
pub mod ecdh;
pub mod ecdsa;
pub mod elgamal;
pub mod errors;
pub mod generator;
pub mod point;
pub mod scalar;

pub use crate::curve::Curve;
pub use crate::domain::DomainParams;
pub use crate::errors::{DomainError, Error, Result};
pub use crate::point::{AffinePoint, Coordinates};
