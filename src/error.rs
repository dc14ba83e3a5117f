//! Error types for the Amara client
//!
//! Four failure kinds flow out of the request pipeline: transport failures
//! (connection/timeout), HTTP status errors, fail-fast rejections from the
//! rate-limit cooldown guard, and `Retry-After` parse failures. Everything
//! else is construction/decoding glue.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail with an Amara client error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Amara client.
#[derive(Debug, Error)]
pub enum Error {
    /// The API answered with a non-success status code.
    ///
    /// The raw response body is preserved verbatim so callers can inspect
    /// the server's error payload. Never retried automatically.
    #[error("API error (status {status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body text
        body: String,
    },

    /// The rate-limit cooldown guard is active; the request was rejected
    /// before any network I/O took place.
    #[error("rate limited: cooldown active for another {resume_in:?}")]
    RateLimited {
        /// Time remaining until the cooldown window elapses
        resume_in: Duration,
    },

    /// A 429 response carried a `Retry-After` header that parses as neither
    /// an integer second count nor an RFC 1123 HTTP-date, or one that points
    /// into the past. The guard state is left untouched when this surfaces.
    #[error("malformed Retry-After header: {0}")]
    RetryAfterFormat(String),

    /// Network or connection failure (connection refused, DNS, TLS).
    #[error("connection error: {0}")]
    Connection(String),

    /// The request exceeded the per-call timeout.
    #[error("request timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid request parameters supplied by the caller.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid URL provided or constructed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP client configuration or initialization error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Failed to decode an API response body.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Missing required configuration.
    #[error("missing required configuration: {0}")]
    MissingConfig(String),
}

impl Error {
    /// Whether the network retrier may transparently retry this failure.
    ///
    /// Only transport-level failures qualify. HTTP status errors (including
    /// 429) are surfaced to the caller untouched; retry-after-cooldown is
    /// the caller's decision.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Connection(_) | Error::Timeout(_))
    }

    /// The HTTP status code, if this is an API status error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
