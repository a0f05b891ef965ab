//! Locates a point on an arbitrary curve by probing x-coordinates.
//!
//! The scan costs `O(p)` field operations in the worst case and is only
//! practical for small demonstration primes. Deployments should use a
//! standardised curve with a published generator such as
//! [`DomainParams::secp256k1`](crate::domain::DomainParams::secp256k1).

use log::debug;
use num::{BigUint, Zero};

use crate::arithmetic::mod_sqrt;
use crate::curve::Curve;
use crate::errors::{Error, Result};
use crate::point::AffinePoint;

/// Returns the first point `(x, y)` found by scanning `x = 0, 1, ..., p-1`
/// for an `x^3 + ax + b` that is a quadratic residue.
///
/// The order of the returned point is not checked. Fails with `NotFound` if
/// no `x` in the field yields a residue.
pub fn find_generator(curve: &Curve) -> Result<AffinePoint> {
    let p = curve.p();
    let mut x = BigUint::zero();
    while &x < p {
        let y_squared = curve.rhs(&x);
        if let Some(y) = mod_sqrt(&y_squared, p)? {
            debug!("found point ({}, {}) on {}", x, y, curve);
            return Ok(AffinePoint::from_affine(curve, x, y));
        }
        x += 1_u32;
    }
    debug!("no point found on {}", curve);
    Err(Error::NotFound { modulus: p.clone() })
}
