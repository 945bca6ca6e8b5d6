//! Shared search engine query.

use std::time::Duration;

use serde_json::{Value, json};
use tracing::{debug, info};

use crate::core::config::EndpointConfig;
use crate::core::upstream::{UpstreamClient, UpstreamRequest};
use crate::domains::rules::SearchHit;
use crate::domains::tools::ToolResult;
use crate::domains::tools::definitions::common::{array_field, text_field};

pub const SERP_TIMEOUT: Duration = Duration::from_secs(15);

const API_KEY_HEADER: &str = "X-API-KEY";

/// Run a query and return the raw result list.
pub async fn serp_query(
    client: &UpstreamClient,
    endpoint: &EndpointConfig,
    query: &str,
) -> ToolResult<Vec<Value>> {
    info!("SERP query: {}", query);

    let mut request = UpstreamRequest::post(endpoint.url(""), SERP_TIMEOUT).json(json!({ "q": query }));
    if let Some(key) = &endpoint.api_key {
        request = request.header(API_KEY_HEADER, key.clone());
    }

    let results = array_field(&client.send(request).await?, "results");
    debug!("SERP returned {} results", results.len());
    Ok(results)
}

/// URL of a raw result, empty when absent.
pub fn result_url(result: &Value) -> String {
    text_field(result, "url").unwrap_or_default()
}

/// Results whose URL contains `needle`, in their original order.
pub fn filter_by_url(results: &[Value], needle: &str) -> Vec<Value> {
    results
        .iter()
        .filter(|r| result_url(r).contains(needle))
        .cloned()
        .collect()
}

/// Reduce raw results to typed hits for the extraction rules.
pub fn to_hits(results: &[Value]) -> Vec<SearchHit> {
    results
        .iter()
        .map(|r| SearchHit {
            url: result_url(r),
            title: text_field(r, "title"),
        })
        .collect()
}
