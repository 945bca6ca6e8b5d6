//! General web search.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::config::EndpointConfig;
use crate::core::upstream::UpstreamClient;
use crate::domains::tools::definitions::common::require_text;
use crate::domains::tools::{ToolHandler, ToolResult};

use super::common::serp_query;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SerpSearchParams {
    #[schemars(description = "Free-form search query")]
    pub query: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SerpSearchResult {
    pub query: String,
    pub total: usize,
    pub results: Vec<Value>,
}

#[derive(Debug, Clone)]
pub struct SerpSearchTool {
    client: UpstreamClient,
    endpoint: EndpointConfig,
}

impl SerpSearchTool {
    pub fn new(client: UpstreamClient, endpoint: EndpointConfig) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait::async_trait]
impl ToolHandler for SerpSearchTool {
    const NAME: &'static str = "serp_search";

    const DESCRIPTION: &'static str = "General Google search returning title, URL and snippet per result. \
         Prefer serp_pappers or serp_societe_com to find a SIREN. Useful queries: \
         '<name> SIRET France', 'site:<website> mentions légales', '<name> infogreffe'.";

    type Params = SerpSearchParams;
    type Output = SerpSearchResult;

    async fn call(&self, params: SerpSearchParams) -> ToolResult<SerpSearchResult> {
        let query = require_text("query", &params.query)?;
        let results = serp_query(&self.client, &self.endpoint, query).await?;

        Ok(SerpSearchResult {
            query: query.to_string(),
            total: results.len(),
            results,
        })
    }
}
