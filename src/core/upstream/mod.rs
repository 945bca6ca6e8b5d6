//! Upstream call adapter.
//!
//! Every tool that needs an external API goes through [`UpstreamClient::send`]:
//! one call, one explicit timeout, no retries. Outcomes are either decoded
//! JSON or an [`UpstreamError`] telling transport failures apart from
//! non-2xx answers.

mod client;
mod error;
mod request;

pub use client::UpstreamClient;
pub use error::{UpstreamError, UpstreamResult};
pub use request::{UpstreamAuth, UpstreamRequest};
