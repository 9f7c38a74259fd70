//! Scalar multiplication that follows the signature AIR step by step.
//!
//! The verifier circuit runs exactly [`AIR_ROUNDS`] rounds, one per scalar
//! bit starting from the least significant, accumulating into a running
//! point that starts at a caller-chosen shift point. This routine performs
//! the same rounds and fails if and only if the circuit would fail. It is
//! deliberately separate from [`StarkCurve::ec_mult`].

use num_bigint::BigUint;
use num_traits::Zero;

use crate::affine::Affine;
use crate::error::CurveError;
use crate::params::{StarkCurve, AIR_ROUNDS};

impl StarkCurve {
    /// Computes `m * point + shift_point` in exactly 251 rounds.
    ///
    /// Fails with [`CurveError::InvalidRange`] unless `0 < m < 2^251`, and with
    /// [`CurveError::PointCollision`] when the running sum and the doubled
    /// point share an x-coordinate at the start of any round.
    pub fn mimic_ec_mult_air(
        &self,
        m: &BigUint,
        point: &Affine,
        shift_point: &Affine,
    ) -> Result<Affine, CurveError> {
        if m.is_zero() || *m >= self.max {
            return Err(CurveError::InvalidRange("air scalar"));
        }

        let mut m = m.clone();
        let mut partial_sum = shift_point.clone();
        let mut point = point.clone();

        for _ in 0..AIR_ROUNDS {
            if partial_sum.x == point.x {
                return Err(CurveError::PointCollision(point.x));
            }
            if m.bit(0) {
                partial_sum = self.add(&partial_sum, &point)?;
            }
            point = self.double(&point)?;
            m >>= 1u32;
        }

        if !m.is_zero() {
            return Err(CurveError::InvalidRange("air scalar"));
        }

        Ok(partial_sum)
    }
}
