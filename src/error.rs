//! Crate-wide error type.
//!
//! Everything falls into one of four kinds: size validation, block sizing,
//! key-file parsing, and plain I/O. The core never retries; errors surface
//! to the caller as-is.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Possible cipher errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Requested RSA key size is not a multiple of 64 bits.
    #[error("key size should be a multiple of 64 bits (got {0})")]
    KeySize(u64),

    /// A codec block exceeded the modulus byte width.
    #[error("block of {len} bytes exceeds the {limit} byte limit for this key")]
    BlockSize { len: usize, limit: usize },

    /// A key file did not parse as `<hex>-<hex>` with non-zero components.
    #[error("malformed key file: {0}")]
    KeyParse(&'static str),

    /// Underlying I/O failure, propagated verbatim.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
