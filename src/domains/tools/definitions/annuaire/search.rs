//! Business registry search tool.
//!
//! Searches the public French company registry by name, SIREN, SIRET or
//! address and returns the head office details of each match.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::config::EndpointConfig;
use crate::core::upstream::UpstreamClient;
use crate::domains::tools::definitions::common::{clamp_limit, require_text};
use crate::domains::tools::{ToolHandler, ToolResult};

use super::common::{CompanySummary, MAX_PER_PAGE, search_registry};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for registry search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AnnuaireSearchParams {
    /// Search query (name, SIREN, SIRET, address...).
    #[schemars(description = "Search query: legal name, SIREN, SIRET, or name + postal code")]
    pub query: String,

    /// Number of results (default: 5, max: 25).
    #[schemars(description = "Number of results (default: 5, max: 25)")]
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_per_page() -> u32 {
    5
}

// ============================================================================
// Structured Output
// ============================================================================

/// Structured output for registry search.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct AnnuaireSearchResult {
    pub query: String,
    pub total: u64,
    pub results: Vec<CompanySummary>,
}

// ============================================================================
// Tool Implementation
// ============================================================================

/// Business registry search tool.
#[derive(Debug, Clone)]
pub struct AnnuaireSearchTool {
    client: UpstreamClient,
    endpoint: EndpointConfig,
}

impl AnnuaireSearchTool {
    pub fn new(client: UpstreamClient, endpoint: EndpointConfig) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait::async_trait]
impl ToolHandler for AnnuaireSearchTool {
    const NAME: &'static str = "annuaire_recherche";

    const DESCRIPTION: &'static str = "Search the French business registry (free public API). \
         Returns SIREN, head office SIRET, address, main activity, headcount band and directors. \
         The commercial name often differs from the legal name: if nothing is found, use \
         serp_pappers to recover the legal name. Examples: 'Microsoft 92130', '919561266', 'VLOUM Paris'.";

    type Params = AnnuaireSearchParams;
    type Output = AnnuaireSearchResult;

    async fn call(&self, params: AnnuaireSearchParams) -> ToolResult<AnnuaireSearchResult> {
        let query = require_text("query", &params.query)?;
        let per_page = clamp_limit(params.per_page, 1, MAX_PER_PAGE);

        let response = search_registry(&self.client, &self.endpoint, query, per_page).await?;

        Ok(AnnuaireSearchResult {
            query: query.to_string(),
            total: response.total_results,
            results: response.results.into_iter().map(Into::into).collect(),
        })
    }
}
