//! Errors of the client.

use ocm_core::ApiError;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The connection can't be built with the given settings.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The request breaks one of the rules checked before sending it.
    #[error("invalid request: {0}")]
    Request(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// No usable token could be obtained.
    #[error("can't get access token: {0}")]
    Token(String),

    #[error(
        "expected JSON content type but received '{content_type}', status code is {status} \
         and body is '{summary}'"
    )]
    ContentType {
        status: u16,
        content_type: String,
        summary: String,
    },

    /// The server answered with an error document.
    #[error("status {status}: {error}")]
    Api { status: u16, error: ApiError },

    #[error(transparent)]
    Wire(#[from] ocm_core::Error),

    /// The connection was closed with [`crate::Connection::close`].
    #[error("connection is closed")]
    Closed,
}

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    pub(crate) fn token(msg: impl Into<String>) -> Self {
        Self::Token(msg.into())
    }

    /// HTTP status of an error answered by the server.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::ContentType { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Wire(ocm_core::Error::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_expose_status_and_envelope() {
        let err = Error::Api {
            status: 404,
            error: ApiError::not_found("/api/clusters_mgmt/v1/clusters/123"),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.api_error().and_then(ApiError::status), Some(404));
        assert_eq!(
            err.to_string(),
            "status 404: Can't find resource for path '/api/clusters_mgmt/v1/clusters/123'"
        );
    }

    #[test]
    fn local_errors_have_no_status() {
        assert_eq!(Error::request("path is mandatory").status(), None);
        assert!(Error::config("bad url").api_error().is_none());
    }
}
