//! Error types for the request helper.
//!
//! # Design
//! Only URL resolution, method parsing, body encoding and the transport can
//! fail. A response body that claims to be JSON but does not parse is not an
//! error: the decoder falls back to the raw text. The transport's own error
//! value is kept intact inside `Transport` so callers can downcast it.

use thiserror::Error;

/// Boxed error produced by a `Transport` implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by `HttpClient`.
#[derive(Debug, Error)]
pub enum Error {
    /// The URL cannot be resolved to an absolute http(s) URL.
    #[error("invalid url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The method name is not one of GET, POST, PUT, DELETE or HEAD.
    #[error("unsupported http method: {0}")]
    InvalidMethod(String),

    /// The request payload could not be encoded for the negotiated content type.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The transport failed before a response was received.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),
}

impl Error {
    pub(crate) fn invalid_url(url: &str, reason: impl ToString) -> Self {
        Error::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
