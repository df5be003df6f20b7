//! Error types for inferdoc-http

use thiserror::Error;

/// HTTP wrapper error type
#[derive(Debug, Error)]
pub enum Error {
    /// DNS, connection or I/O failure
    #[error("network error: {0}")]
    Network(String),

    /// Timeout
    #[error("timeout after {0}ms")]
    Timeout(u64),

    /// Non-2xx response the caller chose to treat as an error
    #[error("http error: status {status}")]
    Http {
        /// Response status code
        status: u16,
        /// Response body (possibly truncated)
        body: String,
    },

    /// Circuit breaker rejected the request
    #[error("circuit breaker open: {0}")]
    CircuitOpen(String),

    /// Request could not be built
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Response body could not be decoded
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl Error {
    /// Whether the error is a network-level failure eligible for retry.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }

    /// Whether the error was caused by a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// HTTP status code carried by the error, if any.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // reqwest does not expose the configured duration on the error
            Self::Timeout(0)
        } else if err.is_builder() {
            Self::InvalidRequest(err.to_string())
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
