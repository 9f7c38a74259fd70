use stark_curve::CurveError;
use thiserror::Error;

/// Errors produced when building or parsing a [`crate::Felt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FeltError {
    #[error("value is not below the field prime")]
    Overflow,
    #[error("invalid nibble found: 0x{0:x}")]
    InvalidNibble(u8),
    #[error("more than {max} digits found: {actual}")]
    InvalidLength { max: usize, actual: usize },
    #[error("short string is {0} bytes, at most 31 fit in a felt")]
    StringTooLong(usize),
    #[error("short string contains non-ASCII characters")]
    NonAscii,
}

/// Errors produced while computing transaction, address or class hashes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxHashError {
    #[error("not all parameters set: missing {0}")]
    MissingField(&'static str),
    #[error("unsupported transaction type")]
    UnsupportedTransactionType,
    #[error("unsupported transaction version {0}")]
    UnsupportedVersion(String),
    #[error(transparent)]
    Felt(#[from] FeltError),
    #[error(transparent)]
    Curve(#[from] CurveError),
}
