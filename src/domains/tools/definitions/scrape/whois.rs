//! RDAP / WHOIS domain registration lookup.
//!
//! Only reliable for `.fr` domains; generic TLDs usually hide the registrant.

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::core::config::EndpointConfig;
use crate::core::upstream::{UpstreamClient, UpstreamRequest};
use crate::domains::tools::definitions::common::{basic_auth, require_text, text_field};
use crate::domains::tools::{ToolHandler, ToolResult};

const WHOIS_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RdapWhoisParams {
    #[schemars(description = "Domain name to query (e.g. example.fr)")]
    pub domain: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct RdapWhoisResult {
    /// Often the legal name of the owning company.
    pub registrant_organization: Option<String>,
    pub registrant_name: Option<String>,
    pub registrant_address: Option<String>,
    pub registrant_email: Option<String>,
    pub registrar: Option<String>,
    pub creation_date: Option<String>,
    pub expiration_date: Option<String>,
    pub raw: Value,
}

impl From<Value> for RdapWhoisResult {
    fn from(data: Value) -> Self {
        Self {
            registrant_organization: text_field(&data, "registrant_organization"),
            registrant_name: text_field(&data, "registrant_name"),
            registrant_address: text_field(&data, "registrant_address"),
            registrant_email: text_field(&data, "registrant_email"),
            registrar: text_field(&data, "registrar"),
            creation_date: text_field(&data, "creation_date"),
            expiration_date: text_field(&data, "expiration_date"),
            raw: data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RdapWhoisTool {
    client: UpstreamClient,
    endpoint: EndpointConfig,
}

impl RdapWhoisTool {
    pub fn new(client: UpstreamClient, endpoint: EndpointConfig) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait::async_trait]
impl ToolHandler for RdapWhoisTool {
    const NAME: &'static str = "rdap_whois";

    const DESCRIPTION: &'static str = "Query RDAP/WHOIS registration data for a domain. \
         registrant_organization may give the legal company name. Reliable for .fr domains only; \
         .com/.net registrants are usually masked.";

    type Params = RdapWhoisParams;
    type Output = RdapWhoisResult;

    async fn call(&self, params: RdapWhoisParams) -> ToolResult<RdapWhoisResult> {
        let domain = require_text("domain", &params.domain)?;
        info!("RDAP lookup for: {}", domain);

        let request = UpstreamRequest::get(self.endpoint.url("/api/whois"), WHOIS_TIMEOUT)
            .query(&[("domain", domain)])
            .auth(basic_auth(&self.endpoint));

        Ok(self.client.send(request).await?.into())
    }
}
