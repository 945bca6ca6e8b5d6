//! Gateway server: configuration plus the tool registry.
//!
//! The transport owns the wire protocol; this type answers the two questions
//! it asks: which tools exist, and what a given call produces.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument};

use super::config::Config;
use super::error::Result;
use super::upstream::UpstreamClient;
use crate::domains::tools::{Envelope, ToolRegistry, build_tool_registry};

/// Usage hint returned to clients on `initialize`.
const INSTRUCTIONS: &str = "Identify French companies (SIREN/SIRET). Typical workflow: \
    linkedin_profile -> linkedin_company (website, postal code) -> siret_extractor on the website; \
    if that fails, annuaire_recherche with name + postal code; if the commercial name finds \
    nothing, serp_pappers to recover the legal name. Use check_holding to detect holdings \
    without employees and calcul_tva for the VAT number.";

/// The gateway server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registered tools, shared by every request.
    tools: Arc<ToolRegistry>,
}

impl McpServer {
    /// Validate the configuration and build the tool catalog.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let client = UpstreamClient::new()?;
        let tools = build_tool_registry(&config, &client)?;
        info!("Registered {} tools", tools.len());

        Ok(Self {
            config: Arc::new(config),
            tools: Arc::new(tools),
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    /// Tool metadata in `tools/list` shape.
    pub fn list_tools(&self) -> Vec<Value> {
        self.tools
            .get_all_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Dispatch one tool call. Never fails: every outcome is an envelope.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Envelope {
        self.tools.invoke(name, arguments).await
    }
}
