//! Typed error model for the transport layer.
//!
//! # Design Decisions
//! - One enum with an explicit kind discriminant instead of a hierarchy of
//!   error types; the underlying library's TLS error is translated exactly
//!   once, at the transport boundary.
//! - Non-2xx HTTP statuses are NOT errors here. They come back as ordinary
//!   response tuples; only `json_get` in strict mode turns them into
//!   `BadResponse`.

use thiserror::Error;

/// Errors surfaced by the HTTP transport layer.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration (malformed proxy string, bad URL, unreadable
    /// trust material). Detected before any network I/O; never retried.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// TLS handshake or certificate validation failure. Kept distinct from
    /// `Connection` so callers can tell "bad cert" from "network down".
    #[error("TLS failure: {0}")]
    Ssl(String),

    /// Any other transport-level I/O failure (DNS, connection refused,
    /// socket timeout).
    #[error("connection failed: {0}")]
    Connection(String),

    /// The response body was not valid JSON when JSON decoding was requested.
    #[error("invalid JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Strict-mode status check failed. Carries the raw status and body for
    /// debugging.
    #[error("bad response status {status}: {body}")]
    BadResponse { status: u16, body: String },
}

/// Coarse classification of an [`Error`], for callers that match on category
/// rather than on the carried detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Ssl,
    Connection,
    Parse,
    BadResponse,
}

impl Error {
    /// The kind discriminant of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::Ssl(_) => ErrorKind::Ssl,
            Error::Connection(_) => ErrorKind::Connection,
            Error::Parse(_) => ErrorKind::Parse,
            Error::BadResponse { .. } => ErrorKind::BadResponse,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Error::Config("x".into()).kind(), ErrorKind::Config);
        assert_eq!(Error::Ssl("x".into()).kind(), ErrorKind::Ssl);
        assert_eq!(Error::Connection("x".into()).kind(), ErrorKind::Connection);
        let parse = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert_eq!(Error::from(parse).kind(), ErrorKind::Parse);
        assert_eq!(
            Error::BadResponse { status: 500, body: String::new() }.kind(),
            ErrorKind::BadResponse
        );
    }

    #[test]
    fn display_carries_status_and_body() {
        let err = Error::BadResponse { status: 404, body: "missing".into() };
        assert_eq!(err.to_string(), "bad response status 404: missing");
    }
}
