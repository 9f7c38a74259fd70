//! Error types for Stark ECDSA signing.

use stark_curve::CurveError;
use thiserror::Error;

/// Errors that can occur while creating keys or signatures.
///
/// Verification never fails with an error: an invalid signature is reported
/// as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EcdsaError {
    /// The message hash is not in `(0, 2^251)`.
    #[error("invalid bit length: message hash must be in (0, 2^251)")]
    InvalidMessageHash,
    /// The private key is not in `(0, n)`.
    #[error("private key must be in (0, n)")]
    InvalidPrivateKey,
    /// The signature bytes have the wrong length or encode an out-of-range component.
    #[error("malformed signature encoding")]
    InvalidEncoding,
    #[error(transparent)]
    Curve(#[from] CurveError),
}
