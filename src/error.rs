// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Error types for key-exchange operations.

use thiserror::Error;

/// Result type alias for key-exchange operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Key-exchange errors.
///
/// None of these are retried inside the crate. A failed handshake attempt is
/// the protocol engine's to retry, for example by proposing another group.
#[derive(Debug, Error)]
pub enum Error {
    /// The group id is not in the catalog.
    #[error("unknown key-exchange group {0}")]
    UnknownGroup(u32),

    /// The backend for a known group could not be initialized.
    #[error("failed to initialize key-exchange group {id}: {source}")]
    InitFailed {
        /// Group id that was requested.
        id: u32,
        /// Underlying backend failure.
        source: Box<Error>,
    },

    /// Randomness, arithmetic, or validation of our own key pair failed.
    #[error("key generation failed: {0}")]
    KeyGenFailed(String),

    /// The peer's exchange value was unparseable or failed validation.
    #[error("invalid peer exchange value: {0}")]
    InvalidPeerValue(String),

    /// A curve point could not be decoded from its octet string.
    #[error("malformed curve point: {0}")]
    MalformedPoint(String),

    /// A buffer did not have the width the wire format requires.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// Custom domain parameters were rejected.
    #[error("invalid domain parameters: {0}")]
    InvalidParameters(String),
}

impl Error {
    /// Reports this error as a rejected peer value, keeping the reason.
    pub(crate) fn into_peer_error(self) -> Error {
        match self {
            Error::InvalidPeerValue(_) => self,
            other => Error::InvalidPeerValue(other.to_string()),
        }
    }
}
