use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::Rng;

use crate::params::StarkCurve;

/// Helper trait for sampling random scalars.
pub trait RandomScalar {
    /// Uniform scalar in `(0, bound)` by rejection sampling.
    ///
    /// # Panics
    ///
    /// Panics if `bound <= 1`, since `(0, bound)` is then empty.
    fn random_below<R: Rng + ?Sized>(&self, rng: &mut R, bound: &BigUint) -> BigUint;

    /// Uniform scalar in `(0, n)`, suitable as a private key.
    fn random_scalar<R: Rng + ?Sized>(&self, rng: &mut R) -> BigUint;
}

impl RandomScalar for StarkCurve {
    fn random_below<R: Rng + ?Sized>(&self, rng: &mut R, bound: &BigUint) -> BigUint {
        assert!(
            *bound > BigUint::one(),
            "random_below needs a bound above 1"
        );
        let bits = bound.bits();
        let mut buf = vec![0u8; bits.div_ceil(8) as usize];
        let excess = buf.len() as u64 * 8 - bits;

        loop {
            rng.fill(&mut buf[..]);
            buf[0] &= 0xff >> excess;
            let candidate = BigUint::from_bytes_be(&buf);
            if !candidate.is_zero() && candidate < *bound {
                return candidate;
            }
        }
    }

    #[inline]
    fn random_scalar<R: Rng + ?Sized>(&self, rng: &mut R) -> BigUint {
        self.random_below(rng, &self.n)
    }
}
