// E(GF(p)) : y^2 = x^3 + x + beta
// p = 2^251 + 17*2^192 + 1
// beta = 0x6f21413efbe40de150e596d72f7a8c5609ad26c15c915c1f4cdfcb99cee9e89
// Curve prime order: 0x800000000000010ffffffffffffffffb781126dcae7b2321e66a241adc64d2f
// Curve cofactor: 1

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::error::CurveError;
use crate::field::{div_mod, mod_sqrt, neg_mod, sub_mod};
use crate::params::StarkCurve;

/// Affine point on the Stark curve.
///
/// There is no point at infinity: every operation that would produce it
/// returns an error instead.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Affine {
    /// The x-coordinate, reduced mod p
    pub x: BigUint,
    /// The y-coordinate, reduced mod p
    pub y: BigUint,
}

impl Affine {
    /// Create a new affine point.
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Affine { x, y }
    }

    /// Mirror the point over the x-axis.
    pub fn negate(&self, p: &BigUint) -> Self {
        Affine::new(self.x.clone(), neg_mod(&self.y, p))
    }
}

impl StarkCurve {
    /// Check if `(x, y)` satisfies `y^2 = x^3 + alpha*x + beta (mod p)`.
    pub fn is_on_curve(&self, x: &BigUint, y: &BigUint) -> bool {
        let lhs = y * y % &self.p;
        lhs == self.curve_rhs(x)
    }

    fn curve_rhs(&self, x: &BigUint) -> BigUint {
        let x3 = x * x % &self.p * x;
        (x3 + &self.alpha * x + &self.beta) % &self.p
    }

    /// Chord addition of two points with distinct x-coordinates.
    ///
    /// Returns [`CurveError::PointCollision`] if `x1 == x2`, which covers both
    /// the doubling and the inverse-point cases.
    pub fn add(&self, p1: &Affine, p2: &Affine) -> Result<Affine, CurveError> {
        let p = &self.p;
        let (x1, y1) = (&p1.x % p, &p1.y % p);
        let (x2, y2) = (&p2.x % p, &p2.y % p);

        if x1 == x2 {
            return Err(CurveError::PointCollision(x1));
        }

        // m = (y1 - y2) / (x1 - x2)
        let m = div_mod(&sub_mod(&y1, &y2, p), &sub_mod(&x1, &x2, p), p);

        // x = m^2 - x1 - x2
        let m2 = &m * &m % p;
        let x = sub_mod(&sub_mod(&m2, &x1, p), &x2, p);

        // y = m * (x1 - x) - y1
        let y = sub_mod(&(&m * sub_mod(&x1, &x, p) % p), &y1, p);

        Ok(Affine::new(x, y))
    }

    /// Tangent doubling: `2 * P`.
    pub fn double(&self, point: &Affine) -> Result<Affine, CurveError> {
        let p = &self.p;
        let (x1, y1) = (&point.x % p, &point.y % p);

        if y1.is_zero() {
            return Err(CurveError::PointAtInfinity);
        }

        // m = (3x^2 + alpha) / 2y
        let numerator = (&x1 * &x1 * 3u32 + &self.alpha) % p;
        let denominator = (&y1 + &y1) % p;
        let m = div_mod(&numerator, &denominator, p);

        // x = m^2 - 2x
        let m2 = &m * &m % p;
        let x = sub_mod(&m2, &((&x1 + &x1) % p), p);

        // y = m * (x1 - x) - y1
        let y = sub_mod(&(&m * sub_mod(&x1, &x, p) % p), &y1, p);

        Ok(Affine::new(x, y))
    }

    /// Multiplies `point` by `m` with left-to-right double-and-add.
    ///
    /// Assumes `0 < m < order(point)`; the running sum never meets the
    /// identity in that range. Larger scalars may hit a collision.
    pub fn ec_mult(&self, m: &BigUint, point: &Affine) -> Result<Affine, CurveError> {
        if m.is_zero() {
            return Err(CurveError::InvalidRange("scalar"));
        }

        let mut acc = point.clone();
        for bit in (0..m.bits() - 1).rev() {
            acc = self.double(&acc)?;
            if m.bit(bit) {
                acc = self.add(&acc, point)?;
            }
        }

        Ok(acc)
    }

    /// Multiplies `point` by the big-endian scalar `k`.
    pub fn scalar_mult(&self, point: &Affine, k: &[u8]) -> Result<Affine, CurveError> {
        self.ec_mult(&BigUint::from_bytes_be(k), point)
    }

    /// Multiplies the base point `G` (the shift point) by the big-endian scalar `k`.
    pub fn scalar_base_mult(&self, k: &[u8]) -> Result<Affine, CurveError> {
        self.scalar_mult(&self.shift_point, k)
    }

    /// Modular inverse of `x` modulo the curve order.
    pub fn inv_mod_curve_size(&self, x: &BigUint) -> BigUint {
        div_mod(&BigUint::from(1u32), x, &self.n)
    }

    /// Returns one of the two y-coordinates for `x`; the other is `p - y`.
    pub fn get_y_coordinate(&self, x: &BigUint) -> Result<BigUint, CurveError> {
        let rhs = self.curve_rhs(&(x % &self.p));
        mod_sqrt(&rhs, &self.p, &self.field_gen).ok_or(CurveError::NotOnCurve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(value: &str) -> BigUint {
        BigUint::parse_bytes(value.as_bytes(), 16).unwrap()
    }

    #[test]
    fn test_generators_on_curve() {
        let curve = StarkCurve::get();
        for point in [&curve.shift_point, &curve.ec_gen, &curve.minus_shift_point] {
            assert!(curve.is_on_curve(&point.x, &point.y));
        }
    }

    #[test]
    fn test_off_curve_point() {
        let curve = StarkCurve::get();
        let y = &curve.ec_gen.y + 1u32;
        assert!(!curve.is_on_curve(&curve.ec_gen.x, &y));
    }

    #[test]
    fn test_point_doubling() {
        let curve = StarkCurve::get();
        let g2 = curve.double(&curve.ec_gen).unwrap();

        assert_eq!(
            g2,
            Affine::new(
                hex("759ca09377679ecd535a81e83039658bf40959283187c654c5416f439403cf5"),
                hex("6f524a3400e7708d5c01a28598ad272e7455aa88778b19f93b562d7a9646c41"),
            )
        );
        assert!(curve.is_on_curve(&g2.x, &g2.y));
    }

    #[test]
    fn test_point_addition() {
        let curve = StarkCurve::get();
        let g2 = curve.double(&curve.ec_gen).unwrap();
        let g3 = curve.add(&g2, &curve.ec_gen).unwrap();

        assert_eq!(
            g3,
            Affine::new(
                hex("411494b501a98abd8262b0da1351e17899a0c4ef23dd2f96fec5ba847310b20"),
                hex("7e1b3ebac08924d2c26f409549191fcf94f3bf6f301ed3553e22dfb802f0686"),
            )
        );
        assert_eq!(curve.add(&curve.ec_gen, &g2).unwrap(), g3);
    }

    #[test]
    fn test_addition_collision() {
        let curve = StarkCurve::get();
        let g = &curve.ec_gen;

        assert_eq!(
            curve.add(g, g),
            Err(CurveError::PointCollision(g.x.clone()))
        );
        assert!(matches!(
            curve.add(g, &g.negate(&curve.p)),
            Err(CurveError::PointCollision(_))
        ));
    }

    #[test]
    fn test_double_zero_y() {
        let curve = StarkCurve::get();
        let point = Affine::new(BigUint::from(5u32), BigUint::zero());
        assert_eq!(curve.double(&point), Err(CurveError::PointAtInfinity));
    }

    #[test]
    fn test_ec_mult_small_scalars() {
        let curve = StarkCurve::get();
        let g = &curve.ec_gen;

        assert_eq!(curve.ec_mult(&BigUint::from(1u32), g).unwrap(), *g);
        assert_eq!(
            curve.ec_mult(&BigUint::from(2u32), g).unwrap(),
            curve.double(g).unwrap()
        );

        let g2 = curve.double(g).unwrap();
        let g4 = curve.double(&g2).unwrap();
        let g5 = curve.add(&g4, g).unwrap();
        assert_eq!(curve.ec_mult(&BigUint::from(5u32), g).unwrap(), g5);
    }

    #[test]
    fn test_ec_mult_distributes() {
        let curve = StarkCurve::get();
        let g = &curve.ec_gen;
        let a = BigUint::from(123_456u32);
        let b = BigUint::from(654_321u32);

        let left = curve.ec_mult(&(&a + &b), g).unwrap();
        let right = curve
            .add(
                &curve.ec_mult(&a, g).unwrap(),
                &curve.ec_mult(&b, g).unwrap(),
            )
            .unwrap();
        assert_eq!(left, right);
    }

    #[test]
    fn test_ec_mult_by_order_minus_one_negates() {
        let curve = StarkCurve::get();
        let g = &curve.ec_gen;
        let m = &curve.n - 1u32;

        assert_eq!(curve.ec_mult(&m, g).unwrap(), g.negate(&curve.p));
    }

    #[test]
    fn test_ec_mult_zero_is_rejected() {
        let curve = StarkCurve::get();
        assert_eq!(
            curve.ec_mult(&BigUint::zero(), &curve.ec_gen),
            Err(CurveError::InvalidRange("scalar"))
        );
    }

    #[test]
    fn test_scalar_mult_bytes() {
        let curve = StarkCurve::get();
        let expected = curve.ec_mult(&BigUint::from(0x0102u32), &curve.ec_gen).unwrap();
        assert_eq!(
            curve.scalar_mult(&curve.ec_gen, &[0x01, 0x02]).unwrap(),
            expected
        );

        let base = curve.ec_mult(&BigUint::from(7u32), &curve.shift_point).unwrap();
        assert_eq!(curve.scalar_base_mult(&[7]).unwrap(), base);
    }

    #[test]
    fn test_inv_mod_curve_size() {
        let curve = StarkCurve::get();
        let x = hex("10d405427040655f118bc8b897e2f2f8147858bbcb0e3d6bc6dfbc6d0205e8");
        let inv = curve.inv_mod_curve_size(&x);
        assert_eq!(&x * &inv % &curve.n, BigUint::from(1u32));
    }

    #[test]
    fn test_get_y_coordinate_gives_both_roots() {
        let curve = StarkCurve::get();
        let x = &curve.ec_gen.x;
        let y = curve.get_y_coordinate(x).unwrap();

        assert!(curve.is_on_curve(x, &y));
        assert!(curve.is_on_curve(x, &neg_mod(&y, &curve.p)));
        assert!(y == curve.ec_gen.y || y == neg_mod(&curve.ec_gen.y, &curve.p));
    }

    #[test]
    fn test_get_y_coordinate_without_root() {
        let curve = StarkCurve::get();
        // Half of all x-coordinates have no point; scan for the first one.
        let x = (0u32..64)
            .map(BigUint::from)
            .find(|x| curve.get_y_coordinate(x).is_err())
            .unwrap();
        assert_eq!(curve.get_y_coordinate(&x), Err(CurveError::NotOnCurve));
    }
}
