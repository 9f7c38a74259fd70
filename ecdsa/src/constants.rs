//! Constants used by the Stark ECDSA implementation.

use stark_curve::BIT_SIZE;

/// Size of a serialized verifying key in bytes.
///
/// A verifying key is an affine point serialized as two 32-byte big-endian
/// coordinates.
pub const PK_SIZE: usize = 64;

/// Size of a serialized secret signing key in bytes.
pub const SK_SIZE: usize = 32;

/// Size of a serialized signature in bytes.
///
/// A signature consists of:
/// - `r` (32 bytes, big-endian)
/// - `s` (32 bytes, big-endian)
/// Total: 64 bytes
pub const SIG_SIZE: usize = 64;

/// Length in octets of the integers fed to nonce derivation, `ceil(252 / 8)`.
pub(crate) const ROLEN: usize = (BIT_SIZE + 7) >> 3;

/// Output size of HMAC-SHA256.
pub(crate) const HOLEN: usize = 32;
