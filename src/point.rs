//! The point module provides the group law on a short-Weierstrass curve.
//!
//! Points are values: an [`AffinePoint`] owns a copy of the [`Curve`] it lives
//! on and is either the point at infinity or a pair of affine coordinates.
//! Equality is structural (same coordinates and same curve).
//!
//! # Examples
//!
//! ```
//! use prime_ecc::curve::Curve;
//! use num::BigInt;
//!
//! let curve = Curve::new(2, 3, 97).unwrap();
//! let p = curve.point(3, 6).unwrap();
//!
//! // doubling via addition and via scalar multiplication agree
//! let p2 = p.add(&p).unwrap();
//! assert_eq!(p.scalar_mul(&BigInt::from(2)).unwrap(), p2);
//!
//! // (3, 6) has order 5
//! assert!(p.scalar_mul(&BigInt::from(5)).unwrap().is_identity());
//!
//! // P + (-P) = O
//! assert!(p.add(&p.negate()).unwrap().is_identity());
//! ```
//!
//! # Warning
//!
//! Scalar multiplication is the textbook double-and-add algorithm. It
//! branches on every bit of the scalar and runs on `BigUint` arithmetic, so
//! its timing leaks the scalar. It cannot be considered constant-time.

use core::fmt;

use num::{BigInt, BigUint, Integer, Signed, Zero};

use crate::curve::Curve;
use crate::errors::{DomainError, Result};

/// The shape of a point: the group identity or an affine pair
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Coordinates {
    /// The point at infinity
    Identity,
    /// Coordinates in `[0, p)`
    Affine { x: BigUint, y: BigUint },
}

/// The `AffinePoint` struct is a point on a [`Curve`] in affine coordinates,
/// with the point at infinity represented explicitly rather than by sentinel
/// coordinates.
///
/// Every non-identity `AffinePoint` satisfies the equation of its curve: the
/// public constructors check it and the group operations preserve it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AffinePoint {
    coords: Coordinates,
    curve: Curve,
}

impl AffinePoint {
    /// Returns the point at infinity on `curve`
    pub fn identity(curve: &Curve) -> Self {
        Self {
            coords: Coordinates::Identity,
            curve: curve.clone(),
        }
    }

    /// Returns the point `(x, y)` on `curve`. The coordinates are reduced mod
    /// `p` first. Fails with `NotOnCurve` if the reduced pair does not satisfy
    /// the curve equation.
    pub fn new<X, Y>(curve: &Curve, x: X, y: Y) -> Result<Self>
    where
        X: Into<BigInt>,
        Y: Into<BigInt>,
    {
        let x = curve.reduce(&x.into());
        let y = curve.reduce(&y.into());
        if !curve.contains(&x, &y) {
            return Err(DomainError::NotOnCurve { x: x, y: y }.into());
        }
        Ok(Self::from_affine(curve, x, y))
    }

    /// Builds an affine point without checking the curve equation. Callers
    /// guarantee `x, y` are reduced and on the curve.
    pub(crate) fn from_affine(curve: &Curve, x: BigUint, y: BigUint) -> Self {
        Self {
            coords: Coordinates::Affine { x: x, y: y },
            curve: curve.clone(),
        }
    }

    /// Returns `true` for the point at infinity
    pub fn is_identity(&self) -> bool {
        self.coords == Coordinates::Identity
    }

    /// The x-coordinate, `None` for the point at infinity
    pub fn x(&self) -> Option<&BigUint> {
        match &self.coords {
            Coordinates::Affine { x, .. } => Some(x),
            Coordinates::Identity => None,
        }
    }

    /// The y-coordinate, `None` for the point at infinity
    pub fn y(&self) -> Option<&BigUint> {
        match &self.coords {
            Coordinates::Affine { y, .. } => Some(y),
            Coordinates::Identity => None,
        }
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coords
    }

    /// The curve that this point belongs to
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Returns `true` if the point satisfies the equation of the curve that it
    /// belongs to, returning `false` otherwise
    pub fn is_valid(&self) -> bool {
        self.curve.is_on_curve(self)
    }

    /// Performs elliptic curve point addition on `self` and `other` and
    /// returns the result as a new point.
    ///
    /// Fails with `CurveMismatch` if the points are on different curves, and
    /// with `NoInverse` if a slope denominator is not invertible (which only
    /// happens when the modulus is not prime).
    pub fn add(&self, other: &Self) -> Result<Self> {
        if self.curve != other.curve {
            return Err(DomainError::CurveMismatch.into());
        }
        let (x1, y1, x2, y2) = match (&self.coords, &other.coords) {
            (Coordinates::Identity, _) => return Ok(other.clone()),
            (_, Coordinates::Identity) => return Ok(self.clone()),
            (Coordinates::Affine { x: x1, y: y1 }, Coordinates::Affine { x: x2, y: y2 }) => {
                (x1, y1, x2, y2)
            }
        };
        let curve = &self.curve;

        // vertical line: Q = -P, which also covers doubling a point with y = 0
        if x1 == x2 && curve.add(y1, y2).is_zero() {
            return Ok(Self::identity(curve));
        }

        let slope = if x1 == x2 && y1 == y2 {
            // tangent: (3x^2 + a) / 2y
            let xx = curve.mul(x1, x1);
            let num = curve.add(&curve.mul(&BigUint::from(3_u32), &xx), curve.a());
            let den = curve.add(y1, y1);
            curve.mul(&num, &curve.inv(&den)?)
        } else {
            // chord: (y2 - y1) / (x2 - x1)
            let num = curve.sub(y2, y1);
            let den = curve.sub(x2, x1);
            curve.mul(&num, &curve.inv(&den)?)
        };

        let x3 = curve.sub(&curve.sub(&curve.mul(&slope, &slope), x1), x2);
        let y3 = curve.sub(&curve.mul(&slope, &curve.sub(x1, &x3)), y1);
        Ok(Self::from_affine(curve, x3, y3))
    }

    /// Returns `self + self`
    pub fn double(&self) -> Result<Self> {
        self.add(self)
    }

    /// Returns `-self`; `(x, y)` maps to `(x, -y mod p)` and the point at
    /// infinity to itself
    pub fn negate(&self) -> Self {
        match &self.coords {
            Coordinates::Identity => self.clone(),
            Coordinates::Affine { x, y } => {
                Self::from_affine(&self.curve, x.clone(), self.curve.neg(y))
            }
        }
    }

    /// Returns `self - other`
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.add(&other.negate())
    }

    /// Performs `k*P` for a signed scalar `k`. A negative `k` multiplies `-P`
    /// by `|k|`.
    pub fn scalar_mul(&self, k: &BigInt) -> Result<Self> {
        if k.is_negative() {
            self.negate().mul_unsigned(k.magnitude())
        } else {
            self.mul_unsigned(k.magnitude())
        }
    }

    /// Performs `k*P` by double-and-add over the bits of `k`, least
    /// significant first. The branch on each bit is not constant-time.
    pub fn mul_unsigned(&self, k: &BigUint) -> Result<Self> {
        let mut acc = Self::identity(&self.curve);
        if k.is_zero() || self.is_identity() {
            return Ok(acc);
        }
        let mut addend = self.clone();
        let mut k = k.clone();
        while !k.is_zero() {
            if k.is_odd() {
                acc = acc.add(&addend)?;
            }
            addend = addend.double()?;
            k >>= 1_u32;
        }
        Ok(acc)
    }
}

impl fmt::Display for AffinePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.coords {
            Coordinates::Identity => write!(f, "O"),
            Coordinates::Affine { x, y } => write!(f, "({}, {})", x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use proptest::prelude::*;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    fn fixture_curve() -> Curve {
        Curve::new(2, 3, 97).unwrap()
    }

    // y^2 = x^3 + x + 8 over GF(10009) has prime order 10099
    fn small_curve() -> (Curve, AffinePoint) {
        let curve = Curve::new(1, 8, 10009).unwrap();
        let g = curve.point(0, 8838).unwrap();
        (curve, g)
    }

    const SMALL_ORDER: u64 = 10099;

    #[test]
    fn construction() {
        let curve = fixture_curve();
        let p = AffinePoint::new(&curve, 3, 6).unwrap();
        assert_eq!(p.x(), Some(&big(3)));
        assert_eq!(p.y(), Some(&big(6)));
        assert!(p.is_valid());
        assert!(!p.is_identity());
        assert_eq!(p.to_string(), "(3, 6)");

        // coordinates are reduced
        assert_eq!(AffinePoint::new(&curve, 100, -91).unwrap(), p);

        let inf = AffinePoint::identity(&curve);
        assert!(inf.is_identity());
        assert!(inf.is_valid());
        assert_eq!(inf.x(), None);
        assert_eq!(inf.to_string(), "O");
    }

    #[test]
    fn construction_off_curve() {
        let curve = fixture_curve();
        assert_eq!(
            AffinePoint::new(&curve, 1, 1).unwrap_err(),
            Error::Domain(DomainError::NotOnCurve { x: big(1), y: big(1) })
        );
    }

    #[test]
    fn identity_absorbs() {
        let curve = fixture_curve();
        let p = curve.point(3, 6).unwrap();
        let inf = curve.identity();
        assert_eq!(p.add(&inf).unwrap(), p);
        assert_eq!(inf.add(&p).unwrap(), p);
        assert_eq!(inf.add(&inf).unwrap(), inf);
    }

    #[test]
    fn inverse_pair() {
        let curve = fixture_curve();
        let p = curve.point(3, 6).unwrap();
        let minus_p = p.negate();
        assert_eq!(minus_p, curve.point(3, 91).unwrap());
        assert!(p.add(&minus_p).unwrap().is_identity());
        assert!(p.sub(&p).unwrap().is_identity());
        assert_eq!(curve.identity().negate(), curve.identity());
    }

    #[test]
    fn fixture_multiples() {
        let curve = fixture_curve();
        let p = curve.point(3, 6).unwrap();
        let two_p = curve.point(80, 10).unwrap();
        let three_p = curve.point(80, 87).unwrap();

        assert_eq!(p.add(&p).unwrap(), two_p);
        assert_eq!(p.double().unwrap(), two_p);
        assert_eq!(p.scalar_mul(&BigInt::from(2)).unwrap(), two_p);
        assert_eq!(p.scalar_mul(&BigInt::from(3)).unwrap(), three_p);
        assert_eq!(two_p.add(&p).unwrap(), three_p);
        // (3, 6) has order 5
        assert!(p.scalar_mul(&BigInt::from(5)).unwrap().is_identity());
        assert_eq!(p.scalar_mul(&BigInt::from(6)).unwrap(), p);
    }

    #[test]
    fn doubling_two_torsion_point() {
        // x^3 + 2x + 3 = 0 has no root mod 97, use y^2 = x^3 - x instead
        let curve = Curve::new(-1, 0, 97).unwrap();
        let p = curve.point(1, 0).unwrap();
        assert!(p.double().unwrap().is_identity());
    }

    #[test]
    fn scalar_mul_edge_cases() {
        let curve = fixture_curve();
        let p = curve.point(3, 6).unwrap();
        assert!(p.scalar_mul(&BigInt::zero()).unwrap().is_identity());
        assert!(curve
            .identity()
            .scalar_mul(&BigInt::from(12345))
            .unwrap()
            .is_identity());
        assert_eq!(p.scalar_mul(&BigInt::from(1)).unwrap(), p);
        assert_eq!(p.scalar_mul(&BigInt::from(-1)).unwrap(), p.negate());
        assert_eq!(
            p.scalar_mul(&BigInt::from(-2)).unwrap(),
            p.double().unwrap().negate()
        );
    }

    #[test]
    fn curve_mismatch() {
        let p = fixture_curve().point(3, 6).unwrap();
        let (_, g) = small_curve();
        assert_eq!(
            p.add(&g).unwrap_err(),
            Error::Domain(DomainError::CurveMismatch)
        );
        // identity on another curve is still a different curve
        assert_eq!(
            p.add(&AffinePoint::identity(g.curve())).unwrap_err(),
            Error::Domain(DomainError::CurveMismatch)
        );
    }

    #[test]
    fn small_curve_vectors() {
        let (curve, g) = small_curve();
        for vector in SMALL_CURVE_MULT_VECTORS.iter() {
            let k = BigInt::from(vector[0]);
            let expected = curve.point(vector[1], vector[2]).unwrap();
            assert_eq!(g.scalar_mul(&k).unwrap(), expected, "k = {}", vector[0]);
        }
        // (N-1)G = -G, NG = O
        assert_eq!(
            g.scalar_mul(&BigInt::from(SMALL_ORDER - 1)).unwrap(),
            g.negate()
        );
        assert!(g.scalar_mul(&BigInt::from(SMALL_ORDER)).unwrap().is_identity());
    }

    #[test]
    fn secp256k1_vectors() {
        let curve = Curve::new(
            0,
            7,
            BigInt::parse_bytes(SECP256K1_P.as_bytes(), 16).unwrap(),
        )
        .unwrap();
        let gen = curve
            .point(
                BigInt::parse_bytes(SECP256K1_MULT_VECTORS[0][1].as_bytes(), 16).unwrap(),
                BigInt::parse_bytes(SECP256K1_MULT_VECTORS[0][2].as_bytes(), 16).unwrap(),
            )
            .unwrap();
        for vector in SECP256K1_MULT_VECTORS.iter() {
            let k = BigInt::parse_bytes(vector[0].as_bytes(), 16).unwrap();
            let res = gen.scalar_mul(&k).unwrap();
            assert!(res.is_valid());

            // hex encode padding 0's (to_str_radix doesn't do this)
            let x_hex = hex::encode(res.x().unwrap().to_bytes_be());
            let y_hex = hex::encode(res.y().unwrap().to_bytes_be());
            assert_eq!(x_hex, vector[1], "x hex coordinate check for scalar: {}", vector[0]);
            assert_eq!(y_hex, vector[2], "y hex coordinate check for scalar: {}", vector[0]);
        }
    }

    #[test]
    fn associativity_on_fixture_curve() {
        // exhaustive over the subgroup generated by (3, 6)
        let curve = fixture_curve();
        let p = curve.point(3, 6).unwrap();
        let multiples: Vec<AffinePoint> = (0..5)
            .map(|k| p.scalar_mul(&BigInt::from(k)).unwrap())
            .collect();
        let q = curve.point(0, 87).unwrap();
        for a in multiples.iter() {
            for b in multiples.iter() {
                let left = a.add(b).unwrap().add(&q).unwrap();
                let right = a.add(&b.add(&q).unwrap()).unwrap();
                assert_eq!(left, right, "a = {}, b = {}", a, b);
            }
        }
    }

    proptest! {
        #[test]
        fn identity_and_inverse(k in 0u64..SMALL_ORDER) {
            let (curve, g) = small_curve();
            let p = g.mul_unsigned(&big(k)).unwrap();
            prop_assert!(p.is_valid());
            prop_assert_eq!(p.add(&curve.identity()).unwrap(), p.clone());
            prop_assert_eq!(curve.identity().add(&p).unwrap(), p.clone());
            prop_assert!(p.add(&p.negate()).unwrap().is_identity());
        }

        #[test]
        fn commutativity(a in 0u64..SMALL_ORDER, b in 0u64..SMALL_ORDER) {
            let (_, g) = small_curve();
            let p = g.mul_unsigned(&big(a)).unwrap();
            let q = g.mul_unsigned(&big(b)).unwrap();
            prop_assert_eq!(p.add(&q).unwrap(), q.add(&p).unwrap());
        }

        #[test]
        fn associativity(a in 0u64..SMALL_ORDER, b in 0u64..SMALL_ORDER, c in 0u64..SMALL_ORDER) {
            let (_, g) = small_curve();
            let p = g.mul_unsigned(&big(a)).unwrap();
            let q = g.mul_unsigned(&big(b)).unwrap();
            let r = g.mul_unsigned(&big(c)).unwrap();
            let left = p.add(&q).unwrap().add(&r).unwrap();
            let right = p.add(&q.add(&r).unwrap()).unwrap();
            prop_assert_eq!(left, right);
        }

        #[test]
        fn scalar_mul_distributes(m in 0u64..50_000, n in 0u64..50_000) {
            let (_, g) = small_curve();
            let sum = g.mul_unsigned(&big(m + n)).unwrap();
            let parts = g
                .mul_unsigned(&big(m))
                .unwrap()
                .add(&g.mul_unsigned(&big(n)).unwrap())
                .unwrap();
            prop_assert_eq!(sum, parts);
        }

        #[test]
        fn negative_scalars(k in 1i64..20_000) {
            let (_, g) = small_curve();
            let neg = g.scalar_mul(&BigInt::from(-k)).unwrap();
            let pos = g.scalar_mul(&BigInt::from(k)).unwrap();
            prop_assert_eq!(neg, pos.negate());
        }
    }

    const SMALL_CURVE_MULT_VECTORS: [[u64; 3]; 4] = [
        [1, 0, 8838],
        [2, 7194, 8465],
        [7, 3505, 3080],
        [10098, 0, 1171],
    ];

    const SECP256K1_P: &str = "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f";

    const SECP256K1_MULT_VECTORS: [[&str; 3]; 3] = [
        ["1", "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798", "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"],
        ["2", "c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5", "1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a"],
        ["3", "f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9", "388f7b0f632de8140fe337e62a37f3566500a99934c2231b6cb9fd7584b8e672"],
    ];
}
