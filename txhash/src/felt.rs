use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use stark_curve::StarkCurve;

use crate::error::FeltError;

/// Big-endian bytes of the field prime `2^251 + 17 * 2^192 + 1`.
const MODULUS: [u8; 32] = [
    0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x11, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
];

/// A StarkNet field element.
///
/// Stored as 32 big-endian bytes and always strictly below the field prime.
/// This is the value type of every transaction, address and class hash input.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Felt([u8; 32]);

macro_rules! const_expect {
    ($e:expr, $why:expr) => {{
        match $e {
            Ok(x) => x,
            Err(_) => panic!(concat!("Expectation failed: ", $why)),
        }
    }};
}

pub(crate) use const_expect;

impl Felt {
    pub const ZERO: Felt = Felt([0u8; 32]);
    pub const ONE: Felt = Felt::from_u64(1);

    pub fn is_zero(&self) -> bool {
        *self == Felt::ZERO
    }

    /// Returns the big-endian representation of this [Felt].
    pub const fn to_be_bytes(self) -> [u8; 32] {
        self.0
    }

    pub const fn as_be_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Creates a [Felt] from big-endian bytes.
    ///
    /// Returns [FeltError::Overflow] if the value is not below the field prime.
    pub const fn from_be_bytes(bytes: [u8; 32]) -> Result<Self, FeltError> {
        let mut index = 0;
        while index < 32 {
            if bytes[index] < MODULUS[index] {
                return Ok(Felt(bytes));
            }
            if bytes[index] > MODULUS[index] {
                return Err(FeltError::Overflow);
            }
            index += 1;
        }
        // equal to the modulus
        Err(FeltError::Overflow)
    }

    /// Extends [Felt::from_be_bytes] to slices of up to 32 bytes.
    pub const fn from_be_slice(bytes: &[u8]) -> Result<Self, FeltError> {
        if bytes.len() > 32 {
            return Err(FeltError::Overflow);
        }

        let mut buf = [0u8; 32];
        let mut index = 0;
        while index < bytes.len() {
            buf[32 - bytes.len() + index] = bytes[index];
            index += 1;
        }

        Felt::from_be_bytes(buf)
    }

    pub const fn from_u64(value: u64) -> Self {
        const_expect!(
            Self::from_be_slice(&value.to_be_bytes()),
            "64 bits is less than 251 bits"
        )
    }

    /// Encodes an ASCII string of at most 31 characters as a felt, reading
    /// its bytes as a big-endian integer.
    ///
    /// This is how transaction prefixes (`"invoke"`) and chain ids
    /// (`"SN_MAIN"`) are represented.
    pub const fn from_short_string(value: &str) -> Result<Self, FeltError> {
        let bytes = value.as_bytes();
        if bytes.len() > 31 {
            return Err(FeltError::StringTooLong(bytes.len()));
        }

        let mut index = 0;
        while index < bytes.len() {
            if !bytes[index].is_ascii() {
                return Err(FeltError::NonAscii);
            }
            index += 1;
        }

        Felt::from_be_slice(bytes)
    }

    /// Interprets arbitrary bytes as a big-endian integer reduced modulo the
    /// field prime.
    ///
    /// Used for string fields of contract classes, which may be far longer
    /// than a short string.
    pub fn from_bytes_reduced(bytes: &[u8]) -> Self {
        let reduced = BigUint::from_bytes_be(bytes) % &StarkCurve::get().p;
        let raw = reduced.to_bytes_be();
        let mut buf = [0u8; 32];
        buf[32 - raw.len()..].copy_from_slice(&raw);
        Felt(buf)
    }

    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }

    /// Parses a hex string into a [Felt].
    ///
    /// Supports both upper and lower case digits and an optional `0x`
    /// prefix. Leading zeros may be omitted.
    pub fn from_hex_str(hex_str: &str) -> Result<Self, FeltError> {
        let digits = hex_str
            .strip_prefix("0x")
            .or_else(|| hex_str.strip_prefix("0X"))
            .unwrap_or(hex_str);
        if digits.len() > 64 {
            return Err(FeltError::InvalidLength {
                max: 64,
                actual: digits.len(),
            });
        }

        let mut padded = [b'0'; 64];
        padded[64 - digits.len()..].copy_from_slice(digits.as_bytes());

        let mut buf = [0u8; 32];
        hex::decode_to_slice(padded, &mut buf).map_err(|err| match err {
            hex::FromHexError::InvalidHexCharacter { c, .. } => {
                FeltError::InvalidNibble(u8::try_from(c).unwrap_or(b'?'))
            }
            _ => FeltError::InvalidLength {
                max: 64,
                actual: digits.len(),
            },
        })?;

        Felt::from_be_bytes(buf)
    }

    /// A "0x" prefixed hex string without leading zeros.
    pub fn to_hex_str(&self) -> String {
        let full = hex::encode(self.0);
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_owned()
        } else {
            format!("0x{trimmed}")
        }
    }
}

impl fmt::Debug for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Felt({self})")
    }
}

impl fmt::Display for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_str())
    }
}

/// All 64 digits, zero padded.
impl fmt::LowerHex for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{b:02x}"))
    }
}

impl fmt::UpperHex for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{b:02X}"))
    }
}

impl FromStr for Felt {
    type Err = FeltError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Felt::from_hex_str(s)
    }
}

impl From<u64> for Felt {
    fn from(value: u64) -> Self {
        Felt::from_u64(value)
    }
}

impl From<Felt> for BigUint {
    fn from(felt: Felt) -> Self {
        felt.to_biguint()
    }
}

impl TryFrom<&BigUint> for Felt {
    type Error = FeltError;

    fn try_from(value: &BigUint) -> Result<Self, Self::Error> {
        Felt::from_be_slice(&value.to_bytes_be())
    }
}

impl TryFrom<BigUint> for Felt {
    type Error = FeltError;

    fn try_from(value: BigUint) -> Result<Self, Self::Error> {
        Felt::try_from(&value)
    }
}

impl Serialize for Felt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_str())
    }
}

impl<'de> Deserialize<'de> for Felt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Felt::from_hex_str(&s).map_err(D::Error::custom)
    }
}
