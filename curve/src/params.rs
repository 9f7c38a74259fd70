//! Stark curve parameters loaded from the embedded payload.
//!
//! The curve is `y^2 = x^3 + alpha*x + beta` over the prime field of
//! `p = 2^251 + 17*2^192 + 1`. The payload also carries the constant point
//! table: entry 0 is the shift point, entry 1 the signing generator and the
//! remainder are the Pedersen points, 252 per hashed input.

use std::sync::OnceLock;

use num_bigint::BigUint;
use num_traits::One;
use serde::Deserialize;

use crate::affine::Affine;
use crate::error::ParamsError;
use crate::field::neg_mod;

/// Number of bits of a field element processed per Pedersen input.
pub const BIT_SIZE: usize = 252;

/// Number of rounds of the AIR scalar multiplication.
pub const AIR_ROUNDS: usize = 251;

const PAYLOAD: &str = include_str!("../params/stark_curve.json");

static STARK_CURVE: OnceLock<StarkCurve> = OnceLock::new();

#[derive(Deserialize)]
struct CurvePayload {
    #[serde(rename = "FIELD_PRIME")]
    field_prime: String,
    #[serde(rename = "FIELD_GEN")]
    field_gen: u64,
    #[serde(rename = "EC_ORDER")]
    ec_order: String,
    #[serde(rename = "ALPHA")]
    alpha: u64,
    #[serde(rename = "BETA")]
    beta: String,
    #[serde(rename = "CONSTANT_POINTS")]
    constant_points: Vec<[String; 2]>,
}

/// Immutable curve configuration shared by every curve operation.
#[derive(Clone, Debug)]
pub struct StarkCurve {
    /// Field prime.
    pub p: BigUint,
    /// Order of the generator points.
    pub n: BigUint,
    /// Curve coefficient `alpha`.
    pub alpha: BigUint,
    /// Curve coefficient `beta`.
    pub beta: BigUint,
    /// Multiplicative generator of the field; a quadratic non-residue.
    pub field_gen: BigUint,
    /// Upper bound (exclusive) for message hashes, `r` and `w`: `2^251`.
    pub max: BigUint,
    /// Shift point, also the base point `G` of Pedersen and the AIR multiplication.
    pub shift_point: Affine,
    /// Negated shift point.
    pub minus_shift_point: Affine,
    /// Generator used for keys and signatures.
    pub ec_gen: Affine,
    constant_points: Vec<Affine>,
}

impl StarkCurve {
    /// Returns the process-wide curve, parsing the embedded payload on first use.
    ///
    /// # Panics
    ///
    /// Panics if the compiled-in payload is malformed. This cannot be caused by
    /// caller input.
    pub fn get() -> &'static StarkCurve {
        STARK_CURVE.get_or_init(|| match Self::from_payload(PAYLOAD) {
            Ok(curve) => curve,
            Err(err) => panic!("embedded stark curve parameters are unusable: {err}"),
        })
    }

    /// Builds a curve from a JSON payload in the embedded format.
    pub fn from_payload(payload: &str) -> Result<Self, ParamsError> {
        let raw: CurvePayload = serde_json::from_str(payload)?;

        let p = parse_integer("FIELD_PRIME", &raw.field_prime)?;
        let n = parse_integer("EC_ORDER", &raw.ec_order)?;
        let beta = parse_integer("BETA", &raw.beta)?;
        let alpha = BigUint::from(raw.alpha);

        let constant_points = raw
            .constant_points
            .iter()
            .map(|[x, y]| {
                Ok(Affine::new(
                    parse_integer("CONSTANT_POINTS", x)?,
                    parse_integer("CONSTANT_POINTS", y)?,
                ))
            })
            .collect::<Result<Vec<_>, ParamsError>>()?;

        if constant_points.len() < 2 {
            return Err(ParamsError::MissingConstantPoints);
        }

        let curve = StarkCurve {
            minus_shift_point: Affine::new(
                constant_points[0].x.clone(),
                neg_mod(&constant_points[0].y, &p),
            ),
            shift_point: constant_points[0].clone(),
            ec_gen: constant_points[1].clone(),
            max: BigUint::one() << (AIR_ROUNDS as u32),
            field_gen: BigUint::from(raw.field_gen),
            p,
            n,
            alpha,
            beta,
            constant_points,
        };

        if let Some(index) = curve
            .constant_points
            .iter()
            .position(|point| !curve.is_on_curve(&point.x, &point.y))
        {
            return Err(ParamsError::PointNotOnCurve { index });
        }

        tracing::debug!(
            constant_points = curve.constant_points.len(),
            "loaded stark curve parameters"
        );

        Ok(curve)
    }

    /// The full constant point table, indexed as described in the module docs.
    #[inline]
    pub fn constant_points(&self) -> &[Affine] {
        &self.constant_points
    }

    /// Number of field elements a single Pedersen invocation can absorb.
    pub fn max_pedersen_inputs(&self) -> usize {
        self.constant_points.len().saturating_sub(2) / BIT_SIZE
    }
}

fn parse_integer(field: &'static str, value: &str) -> Result<BigUint, ParamsError> {
    let parsed = match value.strip_prefix("0x") {
        Some(hex) => BigUint::parse_bytes(hex.as_bytes(), 16),
        None => BigUint::parse_bytes(value.as_bytes(), 10),
    };
    parsed.ok_or_else(|| ParamsError::InvalidInteger {
        field,
        value: value.to_owned(),
    })
}
