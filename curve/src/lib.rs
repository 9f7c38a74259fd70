//! Elliptic curve arithmetic over the Stark curve.
//!
//! This crate provides modular arithmetic over the Stark prime field, affine
//! point operations, the fixed-round scalar multiplication used by signature
//! verification, and the Pedersen hash. All operations are methods on
//! [`StarkCurve`], an immutable configuration parsed once from the embedded
//! parameter payload and obtained through [`StarkCurve::get`].

mod affine;
mod air;
mod error;
mod field;
mod params;
mod pedersen;
mod random;

pub use affine::Affine;
pub use error::{CurveError, ParamsError};
pub use field::{div_mod, is_quadratic_residue, mod_sqrt, neg_mod};
pub use params::{StarkCurve, AIR_ROUNDS, BIT_SIZE};
pub use random::RandomScalar;
