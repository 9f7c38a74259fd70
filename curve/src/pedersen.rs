//! Pedersen hash over the constant point table.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::CurveError;
use crate::params::{StarkCurve, BIT_SIZE};

impl StarkCurve {
    /// Pedersen hash of an ordered sequence of field elements.
    ///
    /// Starting from the shift point, bit `j` of input `i` adds the constant
    /// point at index `2 + i * 252 + j`. The hash is the final x-coordinate.
    pub fn pedersen_hash(&self, elems: &[BigUint]) -> Result<BigUint, CurveError> {
        let table = self.constant_points();
        let required = 2 + elems.len() * BIT_SIZE;
        if table.len() < required {
            return Err(CurveError::UninitializedParameters {
                required,
                available: table.len(),
            });
        }

        let mut point = self.shift_point.clone();
        for (i, elem) in elems.iter().enumerate() {
            if *elem >= self.p {
                return Err(CurveError::InvalidElement(elem.clone()));
            }

            let offset = 2 + i * BIT_SIZE;
            for (j, constant) in table[offset..offset + BIT_SIZE].iter().enumerate() {
                if constant.x == point.x {
                    return Err(CurveError::PointCollision(point.x));
                }
                if elem.bit(j as u64) {
                    point = self.add(&point, constant)?;
                }
            }
        }

        Ok(point.x)
    }

    /// Left fold of the two-input Pedersen hash, starting from zero.
    pub fn hash_elements(&self, elems: &[BigUint]) -> Result<BigUint, CurveError> {
        elems.iter().try_fold(BigUint::zero(), |acc, elem| {
            self.pedersen_hash(&[acc, elem.clone()])
        })
    }

    /// Hash-on-elements: [`Self::hash_elements`] over `elems` followed by their count.
    pub fn compute_hash_on_elements(&self, elems: &[BigUint]) -> Result<BigUint, CurveError> {
        let mut with_len = Vec::with_capacity(elems.len() + 1);
        with_len.extend_from_slice(elems);
        with_len.push(BigUint::from(elems.len()));
        self.hash_elements(&with_len)
    }
}
