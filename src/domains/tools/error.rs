//! Tool-specific error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::upstream::UpstreamError;
use crate::domains::rules::RuleError;

/// Errors that can occur during tool operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// The requested tool, or the entity it looked up, does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArgument(String),

    /// The upstream call could not be completed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The upstream answered with a non-2xx status.
    #[error("Upstream returned HTTP {status}")]
    UpstreamStatus { status: u16, body: String },

    /// A tool with this name is already registered.
    #[error("Tool already registered: {0}")]
    AlreadyRegistered(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type returned by tool handlers.
pub type ToolResult<T> = Result<T, ToolError>;

/// Error kinds exposed to clients in the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Rejected by the credential gate. Never carried in an envelope.
    AuthRejected,
    NotFound,
    InvalidArgument,
    TransportError,
    UpstreamStatusError,
    InternalError,
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid argument" error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// The client-facing kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Transport(_) => ErrorKind::TransportError,
            Self::UpstreamStatus { .. } => ErrorKind::UpstreamStatusError,
            Self::AlreadyRegistered(_) | Self::Internal(_) => ErrorKind::InternalError,
        }
    }
}

impl From<UpstreamError> for ToolError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Transport(msg) => Self::Transport(msg),
            UpstreamError::InvalidRequest(msg) => Self::Internal(msg),
            UpstreamError::Status { status, body } => Self::UpstreamStatus { status, body },
        }
    }
}

impl From<RuleError> for ToolError {
    fn from(err: RuleError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}
