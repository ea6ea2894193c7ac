//! Error types for attestation building.

use thiserror::Error;

/// Result type for attestation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while building or encoding an attestation.
#[derive(Debug, Error)]
pub enum Error {
    /// A subject was offered without any digest. The attestation is left
    /// unchanged.
    #[error("subject {name} has no digests")]
    Validation { name: String },

    /// The attestation could not be encoded or written to its sink.
    #[error("encoding attestation: {0}")]
    Encoding(#[source] serde_json::Error),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Encoding(serde_json::Error::io(err))
    }
}
