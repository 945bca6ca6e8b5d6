//! Domains module containing business logic organized by bounded contexts.
//!
//! - **rules**: pure company-identification rules (VAT key, legal name extraction)
//! - **tools**: the MCP tools, their registry and result envelope

pub mod rules;
pub mod tools;
