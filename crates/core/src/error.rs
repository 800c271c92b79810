//! SDK error model.

use thiserror::Error;

/// Result type used across the SDK type layer.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while converting between domain objects and their JSON form.
///
/// Transport concerns (HTTP status, connection failures) live in the client and
/// server crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The document isn't valid JSON or doesn't have the expected shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The `kind` attribute of the document doesn't match the expected type.
    #[error("expected kind '{expected}' but got '{found}'")]
    UnexpectedKind { expected: String, found: String },

    /// A query parameter is repeated or can't be parsed.
    #[error("{0}")]
    InvalidParameter(String),

    /// Reading or writing the underlying stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn unexpected_kind(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnexpectedKind {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}
