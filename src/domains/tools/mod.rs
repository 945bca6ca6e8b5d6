//! Tools domain module.
//!
//! Tools are the operations MCP clients invoke through `tools/call`.
//!
//! ## Architecture
//!
//! - `definitions/` - Tool implementations, grouped by upstream service
//! - `catalog.rs` - The fixed tool set bound to configured endpoints
//! - `registry.rs` - Name lookup and isolated dispatch
//! - `handlers.rs` - The [`ToolHandler`] trait and argument resolution
//! - `envelope.rs` - The uniform success/error result shape
//! - `error.rs` - Tool error types and client-facing error kinds
//!
//! ## Adding a New Tool
//!
//! 1. Implement [`ToolHandler`] in `definitions/` (params, output, `call`)
//! 2. Export it from the group's `mod.rs`
//! 3. Register it in `catalog.rs`

pub mod catalog;
pub mod definitions;
mod envelope;
mod error;
mod handlers;
mod registry;

pub use catalog::build_tool_registry;
pub use envelope::{Envelope, EnvelopeError};
pub use error::{ErrorKind, ToolError, ToolResult};
pub use handlers::{DynTool, NoParams, ToolHandler, resolve_params};
pub use registry::ToolRegistry;
