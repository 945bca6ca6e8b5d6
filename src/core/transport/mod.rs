//! Transport layer for the gateway.
//!
//! A single HTTP listener: JSON-RPC over POST on the RPC path, an
//! unauthenticated liveness probe on the health path, and the credential
//! gate in front of both.

mod config;
mod error;
pub mod http;

pub use config::HttpConfig;
pub use error::{TransportError, TransportResult};
pub use http::HttpTransport;
