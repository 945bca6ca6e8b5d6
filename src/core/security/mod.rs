//! Security module for request authentication.
//!
//! Provides the HTTP Basic credential gate placed in front of the
//! JSON-RPC endpoint.

pub mod basic_auth;

pub use basic_auth::{AuthRejection, BasicAuthGate, require_basic_auth};
