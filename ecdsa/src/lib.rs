//! ECDSA over the Stark curve, as verified by the StarkNet signature AIR.
//!
//! This library implements:
//! - Deterministic nonce derivation (RFC 6979 with HMAC-SHA256)
//! - Signing of message hashes in `(0, 2^251)`
//! - Verification that replays the fixed-round AIR scalar multiplication
//!
//! # Example
//!
//! ```
//! use num_bigint::BigUint;
//! use stark_ecdsa::SigningKey;
//!
//! let signing_key = SigningKey::from_secret(BigUint::from(2u32)).expect("valid key");
//! let verifying_key = signing_key.verifying_key();
//!
//! let msg_hash = BigUint::from(1u32);
//! let signature = signing_key.sign(&msg_hash).expect("signing failed");
//! assert!(verifying_key.verify(&msg_hash, &signature));
//! ```
//!
//! The free functions [`sign`] and [`verify`] operate on raw integers for
//! callers that hold keys in their own representation.

mod constants;
mod errors;
mod keys;
mod rfc6979;
mod signatures;


pub use constants::{PK_SIZE, SIG_SIZE, SK_SIZE};
pub use errors::EcdsaError;
pub use keys::{SigningKey, VerifyingKey};
pub use rfc6979::generate_k;
pub use signatures::{Signature, sign, verify};
