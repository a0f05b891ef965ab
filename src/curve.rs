//! The curve module defines short-Weierstrass curves of the form
//! `y^2 = x^3 + ax + b` over a prime field `GF(p)`.
//!
//! ```
//! use prime_ecc::curve::Curve;
//!
//! let curve = Curve::new(2, 3, 97).unwrap();
//! let p = curve.point(3, 6).unwrap();
//! assert!(curve.is_on_curve(&p));
//!
//! // 4a^3 + 27b^2 = 0
//! assert!(Curve::new(0, 0, 97).is_err());
//! ```

use core::fmt;

use num::{BigInt, BigUint, Integer, Signed, Zero};

use crate::arithmetic::{mod_inverse, mod_neg, mod_sub, reduce_signed};
use crate::errors::{DomainError, Result};
use crate::point::AffinePoint;

/// A non-singular curve `y^2 = x^3 + ax + b (mod p)`. The coefficients are
/// stored reduced into `[0, p)`. Curves are immutable once built and compare
/// structurally.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Curve {
    a: BigUint,
    b: BigUint,
    p: BigUint,
}

impl Curve {
    /// Builds the curve `y^2 = x^3 + ax + b` over `GF(p)`. Coefficients may be
    /// negative and are reduced mod `p`.
    ///
    /// Fails with `InvalidModulus` if `p` is not an odd integer greater than
    /// 2 and with `SingularCurve` if `4a^3 + 27b^2 = 0 (mod p)`. Primality of
    /// `p` is not checked.
    pub fn new<A, B, P>(a: A, b: B, p: P) -> Result<Self>
    where
        A: Into<BigInt>,
        B: Into<BigInt>,
        P: Into<BigInt>,
    {
        let p: BigInt = p.into();
        let modulus = p.magnitude().clone();
        if p.is_negative() || modulus < BigUint::from(3_u32) || modulus.is_even() {
            return Err(DomainError::InvalidModulus(modulus).into());
        }
        let curve = Self {
            a: reduce_signed(&a.into(), &modulus),
            b: reduce_signed(&b.into(), &modulus),
            p: modulus,
        };
        if curve.discriminant().is_zero() {
            return Err(DomainError::SingularCurve.into());
        }
        Ok(curve)
    }

    /// Coefficient `a`
    pub fn a(&self) -> &BigUint {
        &self.a
    }

    /// Coefficient `b`
    pub fn b(&self) -> &BigUint {
        &self.b
    }

    /// The field modulus `p`
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Returns `(4a^3 + 27b^2) mod p`
    pub fn discriminant(&self) -> BigUint {
        let a3 = self.a.modpow(&BigUint::from(3_u32), &self.p);
        let b2 = self.mul(&self.b, &self.b);
        (BigUint::from(4_u32) * a3 + BigUint::from(27_u32) * b2) % &self.p
    }

    /// Returns `true` if `point` belongs to this curve and satisfies its
    /// equation. The point at infinity is on every curve.
    pub fn is_on_curve(&self, point: &AffinePoint) -> bool {
        if point.curve() != self {
            return false;
        }
        match (point.x(), point.y()) {
            (Some(x), Some(y)) => self.contains(x, y),
            _ => true,
        }
    }

    /// Returns `true` if `y^2 = x^3 + ax + b (mod p)`
    pub fn contains(&self, x: &BigUint, y: &BigUint) -> bool {
        let y = y % &self.p;
        self.mul(&y, &y) == self.rhs(x)
    }

    /// Evaluates the right hand side of the curve equation, `x^3 + ax + b`
    pub fn rhs(&self, x: &BigUint) -> BigUint {
        let x = x % &self.p;
        let xx = self.mul(&x, &x);
        let xxx = self.mul(&xx, &x);
        let ax = self.mul(&self.a, &x);
        (xxx + ax + &self.b) % &self.p
    }

    /// Returns the point at infinity on this curve
    pub fn identity(&self) -> AffinePoint {
        AffinePoint::identity(self)
    }

    /// Returns the point `(x, y)`, failing with `NotOnCurve` if it does not
    /// satisfy the curve equation
    pub fn point<X, Y>(&self, x: X, y: Y) -> Result<AffinePoint>
    where
        X: Into<BigInt>,
        Y: Into<BigInt>,
    {
        AffinePoint::new(self, x, y)
    }

    pub(crate) fn reduce(&self, v: &BigInt) -> BigUint {
        reduce_signed(v, &self.p)
    }

    pub(crate) fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.p
    }

    pub(crate) fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        mod_sub(a, b, &self.p)
    }

    pub(crate) fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.p
    }

    pub(crate) fn neg(&self, a: &BigUint) -> BigUint {
        mod_neg(a, &self.p)
    }

    pub(crate) fn inv(&self, a: &BigUint) -> Result<BigUint> {
        mod_inverse(a, &self.p)
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y^2 = x^3 + {}x + {} mod {}", self.a, self.b, self.p)
    }
}
