//! Authenticated access to a self-hosted Supabase instance.

use std::time::Duration;

use reqwest::Method;
use serde_json::{Value, json};
use tracing::debug;

use crate::core::config::SupabaseConfig;
use crate::core::upstream::{UpstreamAuth, UpstreamClient, UpstreamRequest};
use crate::domains::tools::ToolResult;

pub const SUPABASE_TIMEOUT: Duration = Duration::from_secs(30);

/// Supabase REST, auth-admin and storage APIs behind one set of keys.
#[derive(Debug, Clone)]
pub struct SupabaseApi {
    client: UpstreamClient,
    config: SupabaseConfig,
}

impl SupabaseApi {
    pub fn new(client: UpstreamClient, config: SupabaseConfig) -> Self {
        Self { client, config }
    }

    /// Request carrying `apikey: <anon>` and `Authorization: Bearer <service>`.
    pub fn request(&self, method: Method, path: &str) -> UpstreamRequest {
        UpstreamRequest::new(method, self.config.url(path), SUPABASE_TIMEOUT)
            .header("apikey", self.config.anon_key.clone())
            .auth(Some(UpstreamAuth::Bearer(self.config.service_key.clone())))
    }

    pub async fn send(&self, request: UpstreamRequest) -> ToolResult<Value> {
        Ok(self.client.send(request).await?)
    }

    /// Run SQL through the `execute_sql` RPC function.
    pub async fn execute_sql(&self, query: &str, read_only: bool) -> ToolResult<Value> {
        debug!(read_only, "Executing SQL: {}", query.trim());
        let request = self
            .request(Method::POST, "/rest/v1/rpc/execute_sql")
            .json(json!({ "query": query, "read_only": read_only }));
        self.send(request).await
    }
}
