//! Error types and handling for the gateway.
//!
//! [`Error`] is the startup and wiring error: bad configuration, a tool
//! catalog that fails to build, a transport that cannot bind. Errors raised
//! while serving a tool call never reach it; they are folded into the
//! call's envelope by the tool registry.

use thiserror::Error;

use super::transport::TransportError;
use super::upstream::UpstreamError;
use crate::domains::tools::ToolError;

/// A specialized Result type for gateway operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the gateway.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    /// The shared upstream client could not be created.
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// The HTTP listener failed.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
