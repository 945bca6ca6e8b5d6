//! LinkedIn profile and company page scrapers.
//!
//! Both tools proxy a scraping service. Profiles may be stale: the person can
//! have changed employer without updating the page, so results should be
//! cross-checked against other sources.

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::core::config::EndpointConfig;
use crate::core::upstream::{UpstreamClient, UpstreamRequest};
use crate::domains::tools::definitions::common::{array_field, basic_auth, require_text, text_field};
use crate::domains::tools::{ToolHandler, ToolResult};

const PROFILE_TIMEOUT: Duration = Duration::from_secs(30);

/// Extra time granted on top of the scraper's own page timeout.
const COMPANY_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

const MAX_SCRAPE_TIMEOUT_SECS: u64 = 120;

// ============================================================================
// Profile
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct LinkedinProfileParams {
    #[schemars(description = "LinkedIn profile URL (e.g. linkedin.com/in/john-doe)")]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct LinkedinProfileResult {
    pub name: Option<String>,
    pub company: Option<String>,
    pub company_url: Option<String>,
    pub location: Option<String>,
    pub headline: Option<String>,
    pub raw: Value,
}

impl From<Value> for LinkedinProfileResult {
    fn from(profile: Value) -> Self {
        Self {
            name: text_field(&profile, "name"),
            company: text_field(&profile, "company"),
            company_url: text_field(&profile, "company_url"),
            location: text_field(&profile, "location"),
            headline: text_field(&profile, "headline"),
            raw: profile,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LinkedinProfileTool {
    client: UpstreamClient,
    endpoint: EndpointConfig,
}

impl LinkedinProfileTool {
    pub fn new(client: UpstreamClient, endpoint: EndpointConfig) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait::async_trait]
impl ToolHandler for LinkedinProfileTool {
    const NAME: &'static str = "linkedin_profile";

    const DESCRIPTION: &'static str = "Extract a LinkedIn profile: name, current company, company page URL, \
         location, headline. The profile may be outdated; cross-check with the email domain. \
         Typical next step: linkedin_company(company_url).";

    type Params = LinkedinProfileParams;
    type Output = LinkedinProfileResult;

    async fn call(&self, params: LinkedinProfileParams) -> ToolResult<LinkedinProfileResult> {
        let url = require_text("url", &params.url)?;
        info!("Scraping LinkedIn profile: {}", url);

        let request = UpstreamRequest::get(self.endpoint.url("/api/extract"), PROFILE_TIMEOUT)
            .query(&[("url", url), ("method", "combined")])
            .auth(basic_auth(&self.endpoint));
        let data = self.client.send(request).await?;

        let profile = data
            .get("profile")
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default()));
        Ok(profile.into())
    }
}

// ============================================================================
// Company
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct LinkedinCompanyParams {
    #[schemars(description = "LinkedIn company page URL")]
    pub url: String,

    #[schemars(description = "Scraper page timeout in seconds (default: 25)")]
    #[serde(default = "default_scrape_timeout")]
    pub timeout: u64,
}

fn default_scrape_timeout() -> u64 {
    25
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct LinkedinCompanyResult {
    /// Commercial name, which may differ from the legal name.
    pub company_name: Option<String>,
    pub website: Option<String>,
    pub postal_code: Option<String>,
    pub headquarters: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub locations_secondary: Vec<Value>,
    pub raw: Value,
}

impl From<Value> for LinkedinCompanyResult {
    fn from(data: Value) -> Self {
        Self {
            company_name: text_field(&data, "company_name"),
            website: text_field(&data, "website"),
            postal_code: text_field(&data, "postal_code"),
            headquarters: text_field(&data, "headquarters"),
            industry: text_field(&data, "industry"),
            company_size: text_field(&data, "company_size"),
            locations_secondary: array_field(&data, "locations_secondary"),
            raw: data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LinkedinCompanyTool {
    client: UpstreamClient,
    endpoint: EndpointConfig,
}

impl LinkedinCompanyTool {
    pub fn new(client: UpstreamClient, endpoint: EndpointConfig) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait::async_trait]
impl ToolHandler for LinkedinCompanyTool {
    const NAME: &'static str = "linkedin_company";

    const DESCRIPTION: &'static str = "Extract a LinkedIn company page: commercial name, website, \
         head office postal code and address, industry, size. The name is commercial, not legal: \
         use the postal code to refine annuaire_recherche.";

    type Params = LinkedinCompanyParams;
    type Output = LinkedinCompanyResult;

    async fn call(&self, params: LinkedinCompanyParams) -> ToolResult<LinkedinCompanyResult> {
        let url = require_text("url", &params.url)?;
        let scrape_timeout = params.timeout.clamp(1, MAX_SCRAPE_TIMEOUT_SECS);
        info!("Scraping LinkedIn company: {} (timeout {}s)", url, scrape_timeout);

        let request = UpstreamRequest::post(
            self.endpoint.url("/api/scrape"),
            Duration::from_secs(scrape_timeout) + COMPANY_TIMEOUT_MARGIN,
        )
        .auth(basic_auth(&self.endpoint))
        .json(serde_json::json!({ "url": url, "timeout": scrape_timeout }));

        Ok(self.client.send(request).await?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::BasicCredentials;
    use crate::domains::tools::ToolError;
    use crate::domains::tools::definitions::test_support::spawn_stub;
    use axum::{
        Json, Router,
        extract::Query,
        http::{HeaderMap, StatusCode},
        routing::{get, post},
    };
    use serde_json::json;
    use std::collections::HashMap;

    fn endpoint(base: String) -> EndpointConfig {
        EndpointConfig {
            basic_auth: Some(BasicCredentials {
                username: "scraper".to_string(),
                password: "secret".to_string(),
            }),
            ..EndpointConfig::new(base)
        }
    }

    async fn stub() -> String {
        let app = Router::new()
            .route(
                "/api/extract",
                get(
                    |headers: HeaderMap, Query(params): Query<HashMap<String, String>>| async move {
                        if !headers.contains_key("authorization") {
                            return Err(StatusCode::UNAUTHORIZED);
                        }
                        Ok(Json(json!({
                            "profile": {
                                "name": "Pierre Dupont",
                                "company": "Icypeas",
                                "company_url": "https://linkedin.com/company/icypeas",
                                "location": params.get("method").cloned(),
                                "followers": 120
                            }
                        })))
                    },
                ),
            )
            .route(
                "/api/scrape",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({
                        "company_name": "Icypeas",
                        "website": "icypeas.com",
                        "postal_code": 75009,
                        "echo_timeout": body["timeout"],
                        "locations_secondary": ["Lyon"]
                    }))
                }),
            );
        spawn_stub(app).await
    }

    #[tokio::test]
    async fn test_profile_fields() {
        let tool = LinkedinProfileTool::new(UpstreamClient::new().unwrap(), endpoint(stub().await));
        let result = tool
            .call(LinkedinProfileParams {
                url: "https://linkedin.com/in/pierre-dupont".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.name.as_deref(), Some("Pierre Dupont"));
        assert_eq!(result.company.as_deref(), Some("Icypeas"));
        assert_eq!(result.location.as_deref(), Some("combined"));
        assert_eq!(result.headline, None);
        assert_eq!(result.raw["followers"], 120);
    }

    #[tokio::test]
    async fn test_profile_without_credentials_is_rejected_upstream() {
        let tool = LinkedinProfileTool::new(
            UpstreamClient::new().unwrap(),
            EndpointConfig::new(stub().await),
        );
        let err = tool
            .call(LinkedinProfileParams {
                url: "https://linkedin.com/in/x".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::UpstreamStatus { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_company_fields_and_timeout_forwarded() {
        let tool = LinkedinCompanyTool::new(UpstreamClient::new().unwrap(), endpoint(stub().await));
        let params: LinkedinCompanyParams =
            serde_json::from_value(json!({ "url": "https://linkedin.com/company/icypeas" })).unwrap();
        assert_eq!(params.timeout, 25);

        let result = tool.call(params).await.unwrap();
        assert_eq!(result.website.as_deref(), Some("icypeas.com"));
        assert_eq!(result.postal_code.as_deref(), Some("75009"));
        assert_eq!(result.locations_secondary, vec![json!("Lyon")]);
        assert_eq!(result.raw["echo_timeout"], 25);
    }
}
