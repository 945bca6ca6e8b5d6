//! SIREN MCP Gateway Library
//!
//! An MCP server that exposes company-identification tools (French business
//! registry, web search, scrapers, RDAP, Supabase) over JSON-RPC on HTTP,
//! behind HTTP Basic authentication.
//!
//! # Architecture
//!
//! - **core**: configuration, errors, the credential gate, the upstream
//!   client, the server facade and the HTTP transport
//! - **domains**: business logic
//!   - **rules**: pure identification rules (VAT key, legal name extraction)
//!   - **tools**: tool definitions, registry and result envelope
//!
//! # Example
//!
//! ```rust,no_run
//! use siren_mcp_gateway::core::{Config, HttpTransport, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let transport = HttpTransport::new(config.transport.clone(), &config.auth)?;
//!     let server = McpServer::new(config)?;
//!     transport.run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
