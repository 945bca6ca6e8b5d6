//! HTTP transport configuration.

use crate::core::config::parse_flag;
use crate::core::error::{Error, Result};

/// HTTP transport configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    pub host: String,

    /// Path for the JSON-RPC endpoint.
    pub rpc_path: String,

    /// Unauthenticated liveness path.
    pub health_path: String,

    /// Enable CORS for browser clients.
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_rpc_path() -> String {
    "/mcp".to_string()
}

fn default_health_path() -> String {
    "/".to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: default_host(),
            rpc_path: default_rpc_path(),
            health_path: default_health_path(),
            enable_cors: true,
        }
    }
}

impl HttpConfig {
    /// Load transport config from environment variables.
    pub fn from_env() -> Self {
        let port = std::env::var("MCP_HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let host = std::env::var("MCP_HTTP_HOST").unwrap_or_else(|_| default_host());
        let rpc_path = std::env::var("MCP_HTTP_PATH").unwrap_or_else(|_| default_rpc_path());
        let health_path =
            std::env::var("MCP_HEALTH_PATH").unwrap_or_else(|_| default_health_path());
        let enable_cors = std::env::var("MCP_HTTP_CORS")
            .map(|v| parse_flag(&v, true))
            .unwrap_or(true);

        Self {
            port,
            host,
            rpc_path,
            health_path,
            enable_cors,
        }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        format!("HTTP on {}:{}{}", self.host, self.port, self.rpc_path)
    }

    /// Check the mount points.
    pub fn validate(&self) -> Result<()> {
        if !self.rpc_path.starts_with('/') || !self.health_path.starts_with('/') {
            return Err(Error::config("HTTP paths must start with '/'"));
        }
        if self.rpc_path == self.health_path {
            return Err(Error::config(
                "health path must differ from the JSON-RPC path, or tool calls would bypass authentication",
            ));
        }
        Ok(())
    }
}
