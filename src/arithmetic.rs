//! Modular arithmetic over a prime modulus: inversion via the extended
//! Euclidean algorithm and square roots via Tonelli-Shanks.
//!
//! None of these routines run in constant time.

use log::trace;
use num::Integer;
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

use crate::errors::{no_inverse, DomainError, Result};

/// Computes `x` such that `(a * x) mod m = 1`.
///
/// Fails with `DomainError::NoInverse` when `gcd(a, m) != 1` (or `m < 2`).
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    if m <= &BigUint::one() {
        return Err(no_inverse(a, m));
    }
    let modulus = BigInt::from(m.clone());

    // (a, b) -> (b mod a, a), carrying the Bezout coefficient of `a`
    let (mut old_r, mut r) = (BigInt::from(a % m), modulus.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    while !r.is_zero() {
        let q = &old_r / &r;
        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }

    if !old_r.is_one() {
        return Err(no_inverse(a, m));
    }
    Ok(reduce_signed(&old_s, m))
}

/// Returns a square root of `n` modulo the prime `p`, or `None` if `n` is not
/// a quadratic residue.
///
/// Zero is rejected by Euler's criterion and also yields `None`. The result
/// is one of the two roots, `p - y` being the other.
///
/// # Errors
///
/// `InvalidModulus` if `p < 3`. `SqrtNoConvergence` if the Tonelli-Shanks
/// loop exceeds its iteration cap, which can only happen for a composite `p`.
pub fn mod_sqrt(n: &BigUint, p: &BigUint) -> Result<Option<BigUint>> {
    if p < &BigUint::from(3_u32) {
        return Err(DomainError::InvalidModulus(p.clone()).into());
    }
    let n = n % p;
    if !is_quadratic_residue(&n, p) {
        return Ok(None);
    }

    // p = 3 (mod 4): y = n^((p+1)/4)
    let three = BigUint::from(3_u32);
    if p % BigUint::from(4_u32) == three {
        let exp = (p + 1_u32) >> 2;
        return Ok(Some(sqrt(&n, &exp, p)));
    }

    // p - 1 = q * 2^s with q odd
    let p_minus_one = p - 1_u32;
    let s = p_minus_one.trailing_zeros().unwrap_or(0);
    let q = &p_minus_one >> s;
    let z = find_non_residue(p)?;

    let mut m = s;
    let mut c = z.modpow(&q, p);
    let mut t = n.modpow(&q, p);
    let mut r = n.modpow(&((&q + 1_u32) >> 1), p);

    // `m` strictly decreases on every pass when `p` is prime
    let cap = s as usize + 1;
    for iteration in 0..cap {
        if t.is_zero() {
            return Ok(Some(BigUint::zero()));
        }
        if t.is_one() {
            return Ok(Some(r));
        }

        // least i in [1, m) with t^(2^i) = 1
        let mut i = 1_u64;
        let mut temp = (&t * &t) % p;
        while !temp.is_one() && i < m {
            temp = (&temp * &temp) % p;
            i += 1;
        }
        if !temp.is_one() || i >= m {
            return Err(DomainError::SqrtNoConvergence {
                iterations: iteration + 1,
            }
            .into());
        }
        trace!("tonelli-shanks pass {}: m = {}, i = {}", iteration, m, i);

        // b = c^(2^(m-i-1))
        let mut b = c;
        for _ in 0..(m - i - 1) {
            b = (&b * &b) % p;
        }
        m = i;
        c = (&b * &b) % p;
        t = (&t * &c) % p;
        r = (&r * &b) % p;
    }
    Err(DomainError::SqrtNoConvergence { iterations: cap }.into())
}

/// Euler's criterion: `n^((p-1)/2) = 1 (mod p)`
pub fn is_quadratic_residue(n: &BigUint, p: &BigUint) -> bool {
    let exp = (p - 1_u32) >> 1;
    n.modpow(&exp, p).is_one()
}

/// Performs a square root operation in the underlying field using the input
/// exponent
fn sqrt(input: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    input.modpow(exp, modulus)
}

/// Linear scan from 2 for the first `z` with `z^((p-1)/2) = -1 (mod p)`
fn find_non_residue(p: &BigUint) -> Result<BigUint> {
    let minus_one = p - 1_u32;
    let exp = &minus_one >> 1;
    let mut z = BigUint::from(2_u32);
    while &z < p {
        if z.modpow(&exp, p) == minus_one {
            trace!("quadratic non-residue mod {}: {}", p, z);
            return Ok(z);
        }
        z += 1_u32;
    }
    Err(DomainError::InvalidModulus(p.clone()).into())
}

/// Returns `a - b mod m` for `a, b` already reduced mod `m`
pub(crate) fn mod_sub(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    if a >= b {
        a - b
    } else {
        m - (b - a)
    }
}

/// Returns `-a mod m` for `a` already reduced mod `m`
pub(crate) fn mod_neg(a: &BigUint, m: &BigUint) -> BigUint {
    if a.is_zero() {
        BigUint::zero()
    } else {
        m - a
    }
}

/// Reduces a signed integer into `[0, m)`
pub(crate) fn reduce_signed(v: &BigInt, m: &BigUint) -> BigUint {
    let (_, magnitude) = v.mod_floor(&BigInt::from(m.clone())).into_parts();
    magnitude
}
