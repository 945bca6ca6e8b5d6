//! Supabase Storage tools.

use reqwest::Method;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domains::rules::identifier::path_segment;
use crate::domains::tools::definitions::common::{clamp_limit, text_field};
use crate::domains::tools::{NoParams, ToolError, ToolHandler, ToolResult};

use super::common::SupabaseApi;

const MAX_FILES: u32 = 1000;

fn expect_array(value: Value) -> ToolResult<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(Vec::new()),
        _ => Err(ToolError::Transport(
            "Unexpected upstream response shape: expected an array".to_string(),
        )),
    }
}

// ============================================================================
// list_buckets
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct BucketSummary {
    pub id: Option<String>,
    pub name: Option<String>,
    pub public: Option<bool>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ListBucketsResult {
    pub count: usize,
    pub buckets: Vec<BucketSummary>,
}

#[derive(Debug, Clone)]
pub struct ListBucketsTool {
    api: SupabaseApi,
}

impl ListBucketsTool {
    pub fn new(api: SupabaseApi) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl ToolHandler for ListBucketsTool {
    const NAME: &'static str = "list_buckets";
    const DESCRIPTION: &'static str = "List Supabase Storage buckets.";

    type Params = NoParams;
    type Output = ListBucketsResult;

    async fn call(&self, _params: NoParams) -> ToolResult<ListBucketsResult> {
        let data = self
            .api
            .send(self.api.request(Method::GET, "/storage/v1/bucket"))
            .await?;

        let buckets: Vec<BucketSummary> = expect_array(data)?
            .iter()
            .map(|bucket| BucketSummary {
                id: text_field(bucket, "id"),
                name: text_field(bucket, "name"),
                public: bucket.get("public").and_then(Value::as_bool),
                created_at: text_field(bucket, "created_at"),
            })
            .collect();

        Ok(ListBucketsResult {
            count: buckets.len(),
            buckets,
        })
    }
}

// ============================================================================
// list_files
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListFilesParams {
    #[schemars(description = "Bucket id")]
    pub bucket_id: String,

    #[schemars(description = "Path prefix to list (default: bucket root)")]
    #[serde(default)]
    pub path: String,

    #[schemars(description = "Maximum number of entries (default: 100)")]
    #[serde(default = "default_file_limit")]
    pub limit: u32,
}

fn default_file_limit() -> u32 {
    100
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ListFilesResult {
    pub count: usize,
    pub files: Vec<Value>,
}

#[derive(Debug, Clone)]
pub struct ListFilesTool {
    api: SupabaseApi,
}

impl ListFilesTool {
    pub fn new(api: SupabaseApi) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl ToolHandler for ListFilesTool {
    const NAME: &'static str = "list_files";
    const DESCRIPTION: &'static str = "List files in a Supabase Storage bucket, optionally under a path prefix.";

    type Params = ListFilesParams;
    type Output = ListFilesResult;

    async fn call(&self, params: ListFilesParams) -> ToolResult<ListFilesResult> {
        let bucket = path_segment(params.bucket_id.trim())?;
        let limit = clamp_limit(params.limit, 1, MAX_FILES);

        let request = self
            .api
            .request(Method::POST, &format!("/storage/v1/object/list/{}", bucket))
            .json(json!({ "prefix": params.path, "limit": limit }));
        let files = expect_array(self.api.send(request).await?)?;

        Ok(ListFilesResult {
            count: files.len(),
            files,
        })
    }
}
