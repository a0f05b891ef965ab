//! Domain parameters: a curve, a fixed generator `G` and the order `N` of the
//! group generated by `G`.
//!
//! Parameters may come from a standard (see [`DomainParams::secp256k1`]), be
//! supplied by the caller, or be assembled around a generator found with
//! [`find_generator`](crate::generator::find_generator).

use num::{BigInt, BigUint, One};

use crate::curve::Curve;
use crate::errors::{DomainError, Result};
use crate::point::AffinePoint;

/// The `DomainParams` struct bundles everything the protocols need: the curve,
/// the generator and the group order that scalars are reduced by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainParams {
    generator: AffinePoint,
    order: BigUint,
}

impl DomainParams {
    /// Returns domain parameters for the generator `generator` of order
    /// `order`.
    ///
    /// Fails with `IdentityGenerator` for the point at infinity and with
    /// `InvalidOrder` if `order < 2`. The order itself is trusted, not
    /// verified.
    pub fn new(generator: AffinePoint, order: BigUint) -> Result<Self> {
        if generator.is_identity() {
            return Err(DomainError::IdentityGenerator.into());
        }
        if order <= BigUint::one() {
            return Err(DomainError::InvalidOrder.into());
        }
        Ok(Self {
            generator: generator,
            order: order,
        })
    }

    /// Returns domain parameters that use the field modulus `p` in place of
    /// the group order, for curves whose order is not tracked.
    pub fn with_modulus_order(generator: AffinePoint) -> Result<Self> {
        let order = generator.curve().p().clone();
        Self::new(generator, order)
    }

    /// secp256k1 as specified in [SEC 2](https://www.secg.org/sec2-v2.pdf)
    /// Section 2.4.1
    pub fn secp256k1() -> Result<Self> {
        let curve = Curve::new(0, 7, parse_hex(SECP256K1_P)?)?;
        let generator = curve.point(parse_hex(SECP256K1_GX)?, parse_hex(SECP256K1_GY)?)?;
        let (_, order) = parse_hex(SECP256K1_N)?.into_parts();
        Self::new(generator, order)
    }

    /// The curve that the generator lives on
    pub fn curve(&self) -> &Curve {
        self.generator.curve()
    }

    /// The fixed generator `G`
    pub fn generator(&self) -> &AffinePoint {
        &self.generator
    }

    /// The group order `N`
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// Performs `k*G`
    pub fn base_mul(&self, k: &BigUint) -> Result<AffinePoint> {
        self.generator.mul_unsigned(k)
    }
}

const SECP256K1_P: &str = "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f";
const SECP256K1_GX: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
const SECP256K1_GY: &str = "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";
const SECP256K1_N: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";

fn parse_hex(s: &str) -> Result<BigInt> {
    BigInt::parse_bytes(s.as_bytes(), 16)
        .ok_or_else(|| DomainError::InvalidModulus(BigUint::default()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    #[test]
    fn secp256k1_params() {
        let params = DomainParams::secp256k1().unwrap();
        assert!(params.generator().is_valid());
        assert_eq!(params.curve().a(), &BigUint::from(0_u32));
        assert_eq!(params.curve().b(), &BigUint::from(7_u32));
        assert_eq!(
            hex::encode(params.order().to_bytes_be()),
            SECP256K1_N
        );
        assert_eq!(
            hex::encode(params.generator().x().unwrap().to_bytes_be()),
            SECP256K1_GX
        );
    }

    #[test]
    fn secp256k1_order_annihilates_generator() {
        let params = DomainParams::secp256k1().unwrap();
        assert!(params.base_mul(params.order()).unwrap().is_identity());
    }

    #[test]
    fn external_params() {
        let curve = Curve::new(1, 8, 10009).unwrap();
        let g = curve.point(0, 8838).unwrap();
        let params = DomainParams::new(g.clone(), BigUint::from(10099_u32)).unwrap();
        assert_eq!(params.curve(), &curve);
        assert_eq!(params.generator(), &g);
        assert_eq!(params.base_mul(&BigUint::from(2_u32)).unwrap(), curve.point(7194, 8465).unwrap());
    }

    #[test]
    fn modulus_order() {
        let curve = Curve::new(2, 3, 97).unwrap();
        let params = DomainParams::with_modulus_order(curve.point(3, 6).unwrap()).unwrap();
        assert_eq!(params.order(), &BigUint::from(97_u32));
    }

    #[test]
    fn rejects_degenerate_params() {
        let curve = Curve::new(2, 3, 97).unwrap();
        assert_eq!(
            DomainParams::new(curve.identity(), BigUint::from(5_u32)).unwrap_err(),
            Error::Domain(DomainError::IdentityGenerator)
        );
        assert_eq!(
            DomainParams::new(curve.point(3, 6).unwrap(), BigUint::one()).unwrap_err(),
            Error::Domain(DomainError::InvalidOrder)
        );
    }
}
