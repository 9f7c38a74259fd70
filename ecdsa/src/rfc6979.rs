//! Deterministic nonce generation following RFC 6979 with HMAC-SHA256,
//! adjusted to the 252-bit Stark curve order.

use hmac::{Hmac, Mac};
use num_bigint::BigUint;
use num_traits::Zero;
use sha2::Sha256;
use stark_curve::{BIT_SIZE, StarkCurve};

use crate::constants::{HOLEN, ROLEN};

type HmacSha256 = Hmac<Sha256>;

/// Derives the signing nonce `k` from the message hash, the private key and
/// an optional seed.
///
/// Message hashes whose bit length is at least 248 with at most 4 bits in the
/// top byte are shifted left by 4 bits first, so that truncation to 252 bits
/// keeps all of their bits. A seed of zero is treated as no seed.
pub fn generate_k(msg_hash: &BigUint, priv_key: &BigUint, seed: Option<&BigUint>) -> BigUint {
    let curve = StarkCurve::get();

    let mut msg_hash = msg_hash.clone();
    let bits = msg_hash.bits();
    if bits % 8 <= 4 && bits >= 248 {
        msg_hash *= 16u32;
    }

    let mut material = int_to_octets(priv_key, ROLEN);
    material.extend(bits_to_octets(&msg_hash, &curve.n, BIT_SIZE, ROLEN));
    if let Some(seed) = seed.filter(|seed| !seed.is_zero()) {
        material.extend(be_bytes(seed));
    }

    let mut v = [0x01u8; HOLEN];
    let mut k = [0x00u8; HOLEN];

    k = mac(&k, &[&v, &[0x00], &material]);
    v = mac(&k, &[&v]);
    k = mac(&k, &[&v, &[0x01], &material]);
    v = mac(&k, &[&v]);

    loop {
        let mut t = Vec::with_capacity(HOLEN);
        while t.len() < BIT_SIZE / 8 {
            v = mac(&k, &[&v]);
            t.extend_from_slice(&v);
        }

        let secret = bits_to_int(&BigUint::from_bytes_be(&t), BIT_SIZE);
        if !secret.is_zero() && secret < curve.n {
            return secret;
        }

        k = mac(&k, &[&v, &[0x00]]);
        v = mac(&k, &[&v]);
    }
}

fn mac(key: &[u8], parts: &[&[u8]]) -> [u8; HOLEN] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    for part in parts {
        mac.update(part);
    }
    let mut out = [0u8; HOLEN];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/// Minimal big-endian encoding; zero encodes as no bytes.
fn be_bytes(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.to_bytes_be()
    }
}

/// Keeps the leftmost `qlen` bits, measuring the input in whole octets.
fn bits_to_int(value: &BigUint, qlen: usize) -> BigUint {
    let blen = be_bytes(value).len() * 8;
    if blen > qlen {
        value >> (blen - qlen)
    } else {
        value.clone()
    }
}

/// Big-endian encoding left-padded or truncated to exactly `rolen` octets.
fn int_to_octets(value: &BigUint, rolen: usize) -> Vec<u8> {
    let bytes = be_bytes(value);
    if bytes.len() >= rolen {
        return bytes[bytes.len() - rolen..].to_vec();
    }

    let mut out = vec![0u8; rolen - bytes.len()];
    out.extend_from_slice(&bytes);
    out
}

fn bits_to_octets(value: &BigUint, q: &BigUint, qlen: usize, rolen: usize) -> Vec<u8> {
    let z1 = bits_to_int(value, qlen);
    if z1 < *q {
        int_to_octets(&z1, rolen)
    } else {
        int_to_octets(&(z1 - q), rolen)
    }
}
