//! Signing and verifying keys for Stark ECDSA.

use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;
use rand::Rng;
use serde::{Deserialize, Serialize};
use stark_curve::{Affine, RandomScalar, StarkCurve};

use crate::constants::{PK_SIZE, SK_SIZE};
use crate::errors::EcdsaError;
use crate::signatures::{self, Signature};

/// A secret signing key: a scalar in `(0, n)`.
///
/// # Example
///
/// ```
/// use stark_ecdsa::SigningKey;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let signing_key = SigningKey::random(&mut rng);
/// let verifying_key = signing_key.verifying_key();
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BigUint", into = "BigUint")]
pub struct SigningKey {
    secret: BigUint,
}

/// A public verifying key: the point `d * EcGen`.
///
/// Deserialization goes through [`VerifyingKey::from_affine`], so a decoded
/// key is always on the curve.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Affine", into = "Affine")]
pub struct VerifyingKey {
    point: Affine,
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey").finish_non_exhaustive()
    }
}

impl SigningKey {
    /// Generates a random signing key using the provided random number generator.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            secret: StarkCurve::get().random_scalar(rng),
        }
    }

    /// Wraps an existing secret scalar, which must lie in `(0, n)`.
    pub fn from_secret(secret: BigUint) -> Result<Self, EcdsaError> {
        if secret.is_zero() || secret >= StarkCurve::get().n {
            return Err(EcdsaError::InvalidPrivateKey);
        }
        Ok(Self { secret })
    }

    /// Parses a 32-byte big-endian secret.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EcdsaError> {
        if bytes.len() != SK_SIZE {
            return Err(EcdsaError::InvalidEncoding);
        }
        Self::from_secret(BigUint::from_bytes_be(bytes))
    }

    pub fn secret(&self) -> &BigUint {
        &self.secret
    }

    /// Derives the public verifying key `d * EcGen`.
    pub fn verifying_key(&self) -> VerifyingKey {
        let curve = StarkCurve::get();
        // d < n is never a multiple of the order of EcGen, so the ladder
        // cannot reach the identity.
        let point = curve
            .ec_mult(&self.secret, &curve.ec_gen)
            .unwrap_or_else(|err| unreachable!("d * EcGen failed for d in (0, n): {err}"));
        VerifyingKey { point }
    }

    /// Signs a message hash with a deterministic nonce.
    pub fn sign(&self, msg_hash: &BigUint) -> Result<Signature, EcdsaError> {
        signatures::sign(msg_hash, &self.secret, None)
    }

    /// Signs a message hash, mixing `seed` into the nonce derivation.
    pub fn sign_with_seed(
        &self,
        msg_hash: &BigUint,
        seed: &BigUint,
    ) -> Result<Signature, EcdsaError> {
        signatures::sign(msg_hash, &self.secret, Some(seed))
    }
}

impl VerifyingKey {
    /// Wraps a curve point, rejecting points that are not on the curve.
    pub fn from_affine(point: Affine) -> Result<Self, EcdsaError> {
        if !StarkCurve::get().is_on_curve(&point.x, &point.y) {
            return Err(stark_curve::CurveError::NotOnCurve.into());
        }
        Ok(Self { point })
    }

    /// Recovers a key from its x-coordinate alone.
    ///
    /// Either root of the curve equation may be returned; [`Self::verify`]
    /// accepts signatures made under both.
    pub fn from_x(x: &BigUint) -> Result<Self, EcdsaError> {
        let curve = StarkCurve::get();
        let x = x % &curve.p;
        let y = curve.get_y_coordinate(&x)?;
        Ok(Self {
            point: Affine::new(x, y),
        })
    }

    /// Parses `x || y`, each a 32-byte big-endian coordinate.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EcdsaError> {
        if bytes.len() != PK_SIZE {
            return Err(EcdsaError::InvalidEncoding);
        }
        Self::from_affine(Affine::new(
            BigUint::from_bytes_be(&bytes[..32]),
            BigUint::from_bytes_be(&bytes[32..]),
        ))
    }

    pub fn point(&self) -> &Affine {
        &self.point
    }

    pub fn x(&self) -> &BigUint {
        &self.point.x
    }

    pub fn y(&self) -> &BigUint {
        &self.point.y
    }

    /// Verifies a signature on a message hash with this key.
    pub fn verify(&self, msg_hash: &BigUint, sig: &Signature) -> bool {
        signatures::verify(msg_hash, &sig.r, &sig.s, &self.point.x, &self.point.y)
    }
}

impl From<&SigningKey> for VerifyingKey {
    fn from(sk: &SigningKey) -> Self {
        sk.verifying_key()
    }
}

impl TryFrom<BigUint> for SigningKey {
    type Error = EcdsaError;

    fn try_from(secret: BigUint) -> Result<Self, Self::Error> {
        Self::from_secret(secret)
    }
}

impl From<SigningKey> for BigUint {
    fn from(sk: SigningKey) -> Self {
        sk.secret
    }
}

impl TryFrom<Affine> for VerifyingKey {
    type Error = EcdsaError;

    fn try_from(point: Affine) -> Result<Self, Self::Error> {
        Self::from_affine(point)
    }
}

impl From<VerifyingKey> for Affine {
    fn from(pk: VerifyingKey) -> Self {
        pk.point
    }
}
