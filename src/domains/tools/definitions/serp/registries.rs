//! Searches targeting the French company registry websites.
//!
//! Pappers addresses company pages as `pappers.fr/entreprise/<legal-name>-<SIREN>`,
//! which makes it the most reliable way to turn a commercial name into a
//! legal name and SIREN. Societe.com results are returned as-is.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::core::config::EndpointConfig;
use crate::core::upstream::UpstreamClient;
use crate::domains::rules::{LegalNameMatch, extract_legal_names};
use crate::domains::tools::definitions::common::require_text;
use crate::domains::tools::{ToolHandler, ToolResult};

use super::common::{filter_by_url, serp_query, to_hits};

const PAPPERS_COMPANY_PATH: &str = "pappers.fr/entreprise/";
const SOCIETE_COM_HOST: &str = "societe.com";

/// Parameters shared by the registry searches.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CompanyNameParams {
    #[schemars(description = "Commercial company name (e.g. 'Icypeas')")]
    pub company_name: String,
}

// ============================================================================
// Pappers
// ============================================================================

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SerpPappersResult {
    pub query: String,
    pub pappers_results: Vec<LegalNameMatch>,
    pub all_results: Vec<Value>,
}

#[derive(Debug, Clone)]
pub struct SerpPappersTool {
    client: UpstreamClient,
    endpoint: EndpointConfig,
}

impl SerpPappersTool {
    pub fn new(client: UpstreamClient, endpoint: EndpointConfig) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait::async_trait]
impl ToolHandler for SerpPappersTool {
    const NAME: &'static str = "serp_pappers";

    const DESCRIPTION: &'static str = "Search Pappers and extract the legal name and SIREN from company \
         page URLs. Use when annuaire_recherche finds nothing for a commercial name, then search \
         the registry again with the extracted legal name.";

    type Params = CompanyNameParams;
    type Output = SerpPappersResult;

    async fn call(&self, params: CompanyNameParams) -> ToolResult<SerpPappersResult> {
        let name = require_text("company_name", &params.company_name)?;
        let query = format!("{} pappers", name);
        let results = serp_query(&self.client, &self.endpoint, &query).await?;

        let hits = to_hits(&filter_by_url(&results, PAPPERS_COMPANY_PATH));
        let pappers_results = extract_legal_names(&hits);
        info!("Extracted {} legal names for '{}'", pappers_results.len(), name);

        Ok(SerpPappersResult {
            query,
            pappers_results,
            all_results: results,
        })
    }
}

// ============================================================================
// Societe.com
// ============================================================================

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SerpSocieteComResult {
    pub query: String,
    pub societe_results: Vec<Value>,
    pub all_results: Vec<Value>,
}

#[derive(Debug, Clone)]
pub struct SerpSocieteComTool {
    client: UpstreamClient,
    endpoint: EndpointConfig,
}

impl SerpSocieteComTool {
    pub fn new(client: UpstreamClient, endpoint: EndpointConfig) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait::async_trait]
impl ToolHandler for SerpSocieteComTool {
    const NAME: &'static str = "serp_societe_com";

    const DESCRIPTION: &'static str = "Search Societe.com for a company. Alternative to serp_pappers; \
         SIREN extraction is not automatic here, so prefer serp_pappers.";

    type Params = CompanyNameParams;
    type Output = SerpSocieteComResult;

    async fn call(&self, params: CompanyNameParams) -> ToolResult<SerpSocieteComResult> {
        let name = require_text("company_name", &params.company_name)?;
        let query = format!("{} societe.com", name);
        let results = serp_query(&self.client, &self.endpoint, &query).await?;

        Ok(SerpSocieteComResult {
            query,
            societe_results: filter_by_url(&results, SOCIETE_COM_HOST),
            all_results: results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::ToolError;
    use crate::domains::tools::definitions::test_support::spawn_stub;
    use axum::{
        Json, Router,
        http::{HeaderMap, StatusCode},
        routing::post,
    };
    use serde_json::json;

    async fn stub() -> String {
        let app = Router::new().route(
            "/query",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                if headers.get("x-api-key").and_then(|v| v.to_str().ok()) != Some("key") {
                    return Err(StatusCode::FORBIDDEN);
                }
                Ok(Json(json!({
                    "q": body["q"],
                    "results": [
                        { "url": "https://www.pappers.fr/entreprise/vloum-919561266", "title": "VLOUM" },
                        { "url": "https://www.pappers.fr/recherche?q=icypeas", "title": "search" },
                        { "url": "https://www.societe.com/societe/vloum-919561266.html", "title": "Societe" },
                        { "url": "https://icypeas.com", "title": "Icypeas" }
                    ]
                })))
            }),
        );
        format!("{}/query", spawn_stub(app).await)
    }

    fn endpoint(base: String, key: Option<&str>) -> EndpointConfig {
        EndpointConfig {
            api_key: key.map(str::to_string),
            ..EndpointConfig::new(base)
        }
    }

    fn params(name: &str) -> CompanyNameParams {
        CompanyNameParams {
            company_name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_pappers_extracts_legal_name() {
        let tool = SerpPappersTool::new(
            UpstreamClient::new().unwrap(),
            endpoint(stub().await, Some("key")),
        );
        let result = tool.call(params("Icypeas")).await.unwrap();

        assert_eq!(result.query, "Icypeas pappers");
        assert_eq!(result.all_results.len(), 4);
        assert_eq!(result.pappers_results.len(), 1);
        assert_eq!(result.pappers_results[0].legal_name, "VLOUM");
        assert_eq!(result.pappers_results[0].siren, "919561266");
    }

    #[tokio::test]
    async fn test_societe_com_filters_host() {
        let tool = SerpSocieteComTool::new(
            UpstreamClient::new().unwrap(),
            endpoint(stub().await, Some("key")),
        );
        let result = tool.call(params("Icypeas")).await.unwrap();

        assert_eq!(result.query, "Icypeas societe.com");
        assert_eq!(result.societe_results.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_api_key_surfaces_status() {
        let tool = SerpPappersTool::new(UpstreamClient::new().unwrap(), endpoint(stub().await, None));
        let err = tool.call(params("Icypeas")).await.unwrap_err();
        assert!(matches!(err, ToolError::UpstreamStatus { status: 403, .. }));
    }
}
