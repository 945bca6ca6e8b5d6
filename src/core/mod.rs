//! Core module containing shared infrastructure components.
//!
//! Configuration, error handling, the credential gate, outbound upstream
//! calls, the server facade and the HTTP transport.

pub mod config;
pub mod error;
pub mod security;
pub mod server;
pub mod transport;
pub mod upstream;

pub use config::Config;
pub use error::{Error, Result};
pub use security::BasicAuthGate;
pub use server::McpServer;
pub use transport::{HttpConfig, HttpTransport};
pub use upstream::UpstreamClient;
