//! Crate-level error type.

use thiserror::Error;

use crate::codec::CodecError;
use crate::validation::ValidationError;

/// Core error type for semantic domain errors.
///
/// Adapters should map this to their own error types (CLI exit codes,
/// HTTP status codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Document could not be decoded or encoded.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Document decoded but breaks a preset invariant.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Reading or writing a document failed.
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
