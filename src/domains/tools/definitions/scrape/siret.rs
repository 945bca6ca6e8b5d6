//! SIRET extraction from a website's legal notice pages.

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use crate::core::config::EndpointConfig;
use crate::core::upstream::{UpstreamClient, UpstreamRequest};
use crate::domains::tools::definitions::common::{basic_auth, require_text, text_field};
use crate::domains::tools::{ToolHandler, ToolResult};

const EXTRACT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SiretExtractorParams {
    #[schemars(description = "Website URL to analyze (e.g. https://icypeas.com)")]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SiretExtractorResult {
    pub found: bool,
    pub siret: Option<String>,
    pub siren: Option<String>,
    pub tva: Option<String>,
    pub source_page: Option<String>,
    pub raw: Value,
}

impl From<Value> for SiretExtractorResult {
    fn from(data: Value) -> Self {
        Self {
            found: data.get("found").and_then(Value::as_bool).unwrap_or(false),
            siret: text_field(&data, "siret"),
            siren: text_field(&data, "siren"),
            tva: text_field(&data, "tva"),
            source_page: text_field(&data, "source_page"),
            raw: data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SiretExtractorTool {
    client: UpstreamClient,
    endpoint: EndpointConfig,
}

impl SiretExtractorTool {
    pub fn new(client: UpstreamClient, endpoint: EndpointConfig) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait::async_trait]
impl ToolHandler for SiretExtractorTool {
    const NAME: &'static str = "siret_extractor";

    const DESCRIPTION: &'static str = "Extract the SIRET published in a website's legal notice. \
         About a third of French sites publish it; when found it is the most reliable source. \
         When not found, fall back to annuaire_recherche with name and postal code.";

    type Params = SiretExtractorParams;
    type Output = SiretExtractorResult;

    async fn call(&self, params: SiretExtractorParams) -> ToolResult<SiretExtractorResult> {
        let url = require_text("url", &params.url)?;
        info!("Extracting SIRET from: {}", url);

        let request = UpstreamRequest::post(self.endpoint.url("/api/extract"), EXTRACT_TIMEOUT)
            .auth(basic_auth(&self.endpoint))
            .json(json!({ "url": url }));

        Ok(self.client.send(request).await?.into())
    }
}
