//! LinkedIn company page discovery through web search.

use schemars::JsonSchema;
use serde::Serialize;

use crate::core::config::EndpointConfig;
use crate::core::upstream::UpstreamClient;
use crate::domains::tools::definitions::common::require_text;
use crate::domains::tools::{ToolHandler, ToolResult};

use super::common::{result_url, serp_query};
use super::registries::CompanyNameParams;

const LINKEDIN_COMPANY_PATH: &str = "linkedin.com/company/";

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SerpLinkedinCompanyResult {
    pub query: String,
    pub linkedin_company_url: Option<String>,
    pub all_linkedin_urls: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SerpLinkedinCompanyTool {
    client: UpstreamClient,
    endpoint: EndpointConfig,
}

impl SerpLinkedinCompanyTool {
    pub fn new(client: UpstreamClient, endpoint: EndpointConfig) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait::async_trait]
impl ToolHandler for SerpLinkedinCompanyTool {
    const NAME: &'static str = "serp_linkedin_company";

    const DESCRIPTION: &'static str = "Find a company's LinkedIn page through web search. \
         Follow with linkedin_company to get the website and postal code.";

    type Params = CompanyNameParams;
    type Output = SerpLinkedinCompanyResult;

    async fn call(&self, params: CompanyNameParams) -> ToolResult<SerpLinkedinCompanyResult> {
        let name = require_text("company_name", &params.company_name)?;
        let query = format!("site:linkedin.com/company {}", name);
        let results = serp_query(&self.client, &self.endpoint, &query).await?;

        let all_linkedin_urls: Vec<String> = results
            .iter()
            .map(result_url)
            .filter(|url| url.contains(LINKEDIN_COMPANY_PATH))
            .collect();

        Ok(SerpLinkedinCompanyResult {
            query,
            linkedin_company_url: all_linkedin_urls.first().cloned(),
            all_linkedin_urls,
        })
    }
}
