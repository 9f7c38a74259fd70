//! Signature type, signing and verification for the Stark ECDSA variant.

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use stark_curve::{Affine, CurveError, StarkCurve, div_mod};
use tracing::{debug, trace};

use crate::constants::SIG_SIZE;
use crate::errors::EcdsaError;
use crate::rfc6979::generate_k;

/// A Stark ECDSA signature.
///
/// The signature is a pair `(r, s)` where:
/// - `r` is the x-coordinate of `k * EcGen`, in `(0, 2^251)`
/// - `s` is the inverse modulo `n` of `w = k / (r * d + z)`, in `(0, n)`
///
/// A verifier recomputes `w = s^-1` and requires it to lie in `(0, 2^251)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    pub r: BigUint,
    pub s: BigUint,
}

impl Signature {
    /// Encodes the signature as `r || s`, each a 32-byte big-endian integer.
    pub fn to_bytes(&self) -> [u8; SIG_SIZE] {
        let mut out = [0u8; SIG_SIZE];
        write_be32(&self.r, &mut out[..32]);
        write_be32(&self.s, &mut out[32..]);
        out
    }

    /// Decodes a signature produced by [`Signature::to_bytes`].
    ///
    /// Only the encoding is checked here; the value ranges are checked by
    /// [`verify`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EcdsaError> {
        if bytes.len() != SIG_SIZE {
            return Err(EcdsaError::InvalidEncoding);
        }
        Ok(Self {
            r: BigUint::from_bytes_be(&bytes[..32]),
            s: BigUint::from_bytes_be(&bytes[32..]),
        })
    }
}

fn write_be32(value: &BigUint, out: &mut [u8]) {
    let bytes = value.to_bytes_be();
    let len = out.len();
    let start = len.saturating_sub(bytes.len());
    out[start..].copy_from_slice(&bytes[bytes.len().saturating_sub(len)..]);
}

/// Signs `msg_hash` with `priv_key`.
///
/// The nonce is derived deterministically from the hash, the key and the
/// optional `seed`. When a nonce is rejected the seed is bumped (`None`
/// becomes 1) and a fresh nonce is derived, so repeated calls with the same
/// inputs always return the same signature.
///
/// # Errors
///
/// - [`EcdsaError::InvalidMessageHash`] unless `0 < msg_hash < 2^251`
/// - [`EcdsaError::InvalidPrivateKey`] unless `0 < priv_key < n`
pub fn sign(
    msg_hash: &BigUint,
    priv_key: &BigUint,
    seed: Option<&BigUint>,
) -> Result<Signature, EcdsaError> {
    let curve = StarkCurve::get();

    if msg_hash.is_zero() || *msg_hash >= curve.max {
        return Err(EcdsaError::InvalidMessageHash);
    }
    if priv_key.is_zero() || *priv_key >= curve.n {
        return Err(EcdsaError::InvalidPrivateKey);
    }

    let mut seed = seed.cloned();
    loop {
        let k = generate_k(msg_hash, priv_key, seed.as_ref());
        seed = Some(seed.map_or_else(|| BigUint::from(1u32), |s| s + 1u32));

        let r = curve.ec_mult(&k, &curve.ec_gen)?.x;
        if r.is_zero() || r >= curve.max {
            trace!("nonce rejected: r out of range");
            continue;
        }

        let agg = &r * priv_key + msg_hash;
        if (&agg % &curve.n).is_zero() {
            trace!("nonce rejected: r * d + z vanishes mod n");
            continue;
        }

        let w = div_mod(&k, &agg, &curve.n);
        if w.is_zero() || w >= curve.max {
            trace!("nonce rejected: w out of range");
            continue;
        }

        let s = curve.inv_mod_curve_size(&w);
        debug!("signed message hash, r = {r:#x}");
        return Ok(Signature { r, s });
    }
}

/// Verifies the signature `(r, s)` on `msg_hash` against the public key
/// `(pub_x, pub_y)`.
///
/// Every scalar multiplication runs through
/// [`StarkCurve::mimic_ec_mult_air`], so a signature is accepted here exactly
/// when the on-chain verifier would accept it. If the check fails for the
/// given key it is repeated once with the key negated. Any range or
/// arithmetic failure yields `false`.
pub fn verify(
    msg_hash: &BigUint,
    r: &BigUint,
    s: &BigUint,
    pub_x: &BigUint,
    pub_y: &BigUint,
) -> bool {
    let curve = StarkCurve::get();

    if s.is_zero() || *s >= curve.n {
        return false;
    }
    if r.is_zero() || *r >= curve.max {
        return false;
    }

    let w = curve.inv_mod_curve_size(s);
    if w.is_zero() || w >= curve.max {
        return false;
    }
    if msg_hash.is_zero() || *msg_hash >= curve.max {
        return false;
    }
    if !curve.is_on_curve(pub_x, pub_y) {
        trace!("public key is not on the curve");
        return false;
    }

    let public = Affine::new(pub_x % &curve.p, pub_y % &curve.p);
    match recover_r(curve, msg_hash, r, &w, &public) {
        Ok(x) if x == *r => return true,
        Ok(_) => {}
        Err(err) => {
            trace!(%err, "verification failed");
            return false;
        }
    }

    trace!("retrying verification with the negated public key");
    let negated = public.negate(&curve.p);
    matches!(recover_r(curve, msg_hash, r, &w, &negated), Ok(x) if x == *r)
}

/// Computes the x-coordinate of `w * (z * EcGen + r * Q)` the way the AIR does.
fn recover_r(
    curve: &StarkCurve,
    msg_hash: &BigUint,
    r: &BigUint,
    w: &BigUint,
    public: &Affine,
) -> Result<BigUint, CurveError> {
    let zg = curve.mimic_ec_mult_air(msg_hash, &curve.ec_gen, &curve.minus_shift_point)?;
    let rq = curve.mimic_ec_mult_air(r, public, &curve.shift_point)?;
    let sum = curve.add(&zg, &rq)?;
    let wb = curve.mimic_ec_mult_air(w, &sum, &curve.shift_point)?;
    Ok(curve.add(&wb, &curve.minus_shift_point)?.x)
}
