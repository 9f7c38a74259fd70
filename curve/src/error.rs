//! Error types for curve arithmetic and parameter loading.

use num_bigint::BigUint;
use thiserror::Error;

/// Errors returned by point arithmetic, the AIR multiplication and Pedersen hashing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// A scalar, hash or signature component is outside its required interval.
    #[error("{0} is out of range")]
    InvalidRange(&'static str),
    /// A Pedersen input is not a field element.
    #[error("invalid input element {0:#x}")]
    InvalidElement(BigUint),
    /// Two points share an x-coordinate where the chord formula needs them distinct.
    #[error("points collide on x-coordinate {0:#x}")]
    PointCollision(BigUint),
    /// The computation reached the point at infinity, which has no affine form.
    #[error("result is the point at infinity")]
    PointAtInfinity,
    /// The constant point table is too short for the requested hash.
    #[error("constant point table has {available} entries, {required} required")]
    UninitializedParameters { required: usize, available: usize },
    /// A point fails the curve equation.
    #[error("point is not on the curve")]
    NotOnCurve,
}

/// Errors raised while parsing the curve parameter payload.
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("malformed curve parameter payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} is not a valid integer: {value:?}")]
    InvalidInteger { field: &'static str, value: String },
    #[error("payload must carry at least the shift point and the signing generator")]
    MissingConstantPoints,
    #[error("constant point {index} is not on the curve")]
    PointNotOnCurve { index: usize },
}
