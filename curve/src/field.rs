//! Modular arithmetic over arbitrary-precision integers.
//!
//! All helpers take already-reduced operands unless stated otherwise and
//! return values in `[0, p)`.

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Finds the unique `0 <= x < p` such that `m * x == n (mod p)`.
///
/// `m` must be invertible modulo `p`. For a prime `p` this only excludes
/// multiples of `p`; in that case the returned value is meaningless.
pub fn div_mod(n: &BigUint, m: &BigUint, p: &BigUint) -> BigUint {
    let m = BigInt::from_biguint(Sign::Plus, m % p);
    let modulus = BigInt::from_biguint(Sign::Plus, p.clone());
    let egcd = m.extended_gcd(&modulus);

    let inverse = egcd.x.mod_floor(&modulus);
    let n = BigInt::from_biguint(Sign::Plus, n.clone());
    let (_, magnitude) = (n * inverse).mod_floor(&modulus).into_parts();
    magnitude
}

/// `(a - b) mod p` for operands already below `p`.
#[inline]
pub(crate) fn sub_mod(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    if a >= b {
        a - b
    } else {
        p - (b - a)
    }
}

/// `-a mod p`.
#[inline]
pub fn neg_mod(a: &BigUint, p: &BigUint) -> BigUint {
    let a = a % p;
    if a.is_zero() {
        a
    } else {
        p - a
    }
}

/// Legendre symbol test: `true` when `n` is zero or a quadratic residue mod `p`.
pub fn is_quadratic_residue(n: &BigUint, p: &BigUint) -> bool {
    let n = n % p;
    if n.is_zero() {
        return true;
    }
    let exponent = (p - 1u32) >> 1;
    n.modpow(&exponent, p).is_one()
}

/// Square root modulo an odd prime `p` using Tonelli-Shanks.
///
/// `non_residue` must be a quadratic non-residue mod `p` (the field generator
/// works). Returns `None` when `n` has no square root.
pub fn mod_sqrt(n: &BigUint, p: &BigUint, non_residue: &BigUint) -> Option<BigUint> {
    let n = n % p;
    if n.is_zero() {
        return Some(n);
    }
    if !is_quadratic_residue(&n, p) {
        return None;
    }

    // p - 1 = q * 2^s with q odd
    let p_minus_one = p - 1u32;
    let s = p_minus_one.trailing_zeros().unwrap_or(0);
    let q = &p_minus_one >> s;

    let mut m = s;
    let mut c = non_residue.modpow(&q, p);
    let mut t = n.modpow(&q, p);
    let mut r = n.modpow(&((&q + 1u32) >> 1), p);

    while !t.is_one() {
        let mut i = 0u64;
        let mut t2i = t.clone();
        while !t2i.is_one() {
            t2i = &t2i * &t2i % p;
            i += 1;
            if i == m {
                return None;
            }
        }

        let mut b = c.clone();
        for _ in 0..(m - i - 1) {
            b = &b * &b % p;
        }
        m = i;
        c = &b * &b % p;
        t = t * &c % p;
        r = r * b % p;
    }

    Some(r)
}
