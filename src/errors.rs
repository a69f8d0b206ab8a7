//! Error types for the ntfy-api client
//!
//! Everything fallible in this crate funnels into [`Error`]. Transport
//! failures from the underlying HTTP client are passed through unchanged;
//! an HTTP error status on a publish is deliberately *not* an error here
//! (the response is handed back for the caller to inspect).

use thiserror::Error;

/// Convenience type alias for Results using this crate's [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// All error conditions surfaced by publishers and subscribers
#[derive(Error, Debug)]
pub enum Error {
    /// The base server URL could not be parsed
    #[error("Invalid ntfy server URL: {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Basic credentials were supplied in an unusable form
    #[error("Invalid basic credentials: {reason}")]
    InvalidCredentials { reason: String },

    /// The payload handed to `publish_json` could not be serialized
    #[error("Failed to serialize JSON payload")]
    Serialization(#[source] serde_json::Error),

    /// The client handle was already released with `close()`
    #[error("Client is closed")]
    Closed,

    /// A subscriber filter value cannot be sent as an HTTP header
    #[error("Invalid filter value for '{header}' header")]
    InvalidFilter { header: &'static str },

    /// The server rejected a subscribe/poll stream
    #[error("Unexpected HTTP status {status} from ntfy server")]
    UnexpectedStatus { status: reqwest::StatusCode },

    /// Transport-level failure (connection, DNS, timeout), unchanged
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl Error {
    pub(crate) fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            source,
        }
    }

    pub(crate) fn invalid_credentials(reason: impl Into<String>) -> Self {
        Self::InvalidCredentials {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_credentials("expected 1 or 2 parts, got 3");
        assert_eq!(
            err.to_string(),
            "Invalid basic credentials: expected 1 or 2 parts, got 3"
        );

        assert_eq!(Error::Closed.to_string(), "Client is closed");
    }

    #[test]
    fn test_invalid_url_keeps_source() {
        let source = url::Url::parse("not a url").unwrap_err();
        let err = Error::invalid_url("not a url", source);
        assert!(err.to_string().contains("not a url"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
