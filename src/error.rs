//! Error types for safe-hashes

use alloy::primitives::U256;
use thiserror::Error;

/// Result type alias for safe-hashes operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while recomputing Safe hashes
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The Safe version is missing or older than the first supported release.
    ///
    /// Callers should read this as "no Safe deployed here" rather than a usage error.
    #[error("Unsupported Safe version: {0:?}")]
    UnsupportedVersion(String),

    /// The version string is not a dot-separated list of integers
    #[error("Invalid Safe version: {0:?}")]
    InvalidVersion(String),

    /// Address is not a `0x`-prefixed 40 hex digit string
    #[error("Invalid address: {0:?}")]
    InvalidAddress(String),

    /// A numeric field could not be parsed as a non-negative integer
    #[error("Invalid value for {field}: {value:?}")]
    InvalidInteger { field: &'static str, value: String },

    /// A byte field could not be parsed as hex
    #[error("Invalid hex for {field}: {value:?}")]
    InvalidHex { field: &'static str, value: String },

    /// Operation other than Call (0) or DelegateCall (1)
    #[error("Invalid operation: {0}")]
    InvalidOperation(u8),

    /// Nested Safe address and nonce must be supplied together
    #[error("Missing nested Safe parameter: {0}")]
    MissingNestedParameter(&'static str),

    /// The data source returned no transaction for the nonce
    #[error("No transaction found for nonce {nonce}")]
    NoTransaction { nonce: U256 },

    /// Explicit candidate index does not exist
    #[error("Transaction index {index} out of range ({count} candidates)")]
    CandidateOutOfRange { index: usize, count: usize },

    /// Function signature could not be parsed
    #[error("Invalid function signature: {0:?}")]
    InvalidSignature(String),

    /// Network name not in the known network table
    #[error("Unknown network: {0:?}")]
    UnknownNetwork(String),

    /// An external data source failed
    #[error("Data source error: {0}")]
    Source(String),
}

impl Error {
    /// Returns true if this error means there is nothing to verify.
    pub fn is_unsupported_version(&self) -> bool {
        matches!(self, Error::UnsupportedVersion(_))
    }
}
