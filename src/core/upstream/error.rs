//! Upstream call error types.

use std::time::Duration;

use thiserror::Error;

/// Result type for upstream calls.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Failures of a single outbound HTTP call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// The call could not be completed (timeout, DNS, connection, unreadable body).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The request could not be built; nothing was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The upstream answered with a non-2xx status.
    #[error("HTTP {status}")]
    Status {
        status: u16,
        /// Raw, unparsed response body.
        body: String,
    },
}

impl UpstreamError {
    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Translate a reqwest failure into a transport error.
    pub fn from_reqwest(err: &reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::transport(format!("Request timed out after {}s", timeout.as_secs_f32()))
        } else if err.is_connect() {
            Self::transport(format!("Connection failed: {}", err))
        } else {
            Self::transport(err.to_string())
        }
    }
}
