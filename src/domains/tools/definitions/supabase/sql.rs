//! SQL tools: raw execution and canned catalog queries.
//!
//! Catalog helpers splice schema and table names into SQL text, so those
//! names must be plain identifiers. Anything else is rejected before a query
//! is built.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domains::rules::identifier::sql_identifier;
use crate::domains::tools::definitions::common::require_text;
use crate::domains::tools::{NoParams, ToolHandler, ToolResult};

use super::common::SupabaseApi;

// ============================================================================
// Shared Types
// ============================================================================

/// Rows returned by a SQL call.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SqlResult {
    pub data: Value,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SchemaParams {
    #[schemars(description = "Schema name (default: public)")]
    #[serde(default = "default_schema")]
    pub schema: String,
}

fn default_schema() -> String {
    "public".to_string()
}

fn default_read_only() -> bool {
    true
}

async fn run_sql(api: &SupabaseApi, query: &str, read_only: bool) -> ToolResult<SqlResult> {
    Ok(SqlResult {
        data: api.execute_sql(query, read_only).await?,
    })
}

pub fn list_tables_query(schema: &str) -> ToolResult<String> {
    let schema = sql_identifier(schema)?;
    Ok(format!(
        "SELECT table_name, table_type FROM information_schema.tables \
         WHERE table_schema = '{schema}' ORDER BY table_name"
    ))
}

pub fn describe_table_query(schema: &str, table: &str) -> ToolResult<String> {
    let schema = sql_identifier(schema)?;
    let table = sql_identifier(table)?;
    Ok(format!(
        "SELECT column_name, data_type, is_nullable, column_default, character_maximum_length \
         FROM information_schema.columns \
         WHERE table_schema = '{schema}' AND table_name = '{table}' ORDER BY ordinal_position"
    ))
}

pub fn row_counts_query(schema: &str) -> ToolResult<String> {
    let schema = sql_identifier(schema)?;
    Ok(format!(
        "SELECT schemaname, relname AS table_name, n_live_tup AS row_count \
         FROM pg_stat_user_tables WHERE schemaname = '{schema}' ORDER BY n_live_tup DESC"
    ))
}

const DATABASE_STATS_QUERY: &str = "SELECT pg_database.datname AS database, \
     pg_size_pretty(pg_database_size(pg_database.datname)) AS size, \
     numbackends AS active_connections \
     FROM pg_stat_database JOIN pg_database ON pg_database.oid = pg_stat_database.datid \
     WHERE pg_database.datname = current_database()";

// ============================================================================
// execute_sql
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExecuteSqlParams {
    #[schemars(description = "SQL query to execute")]
    pub query: String,

    #[schemars(description = "Set to false for DDL/DML statements (default: true)")]
    #[serde(default = "default_read_only")]
    pub read_only: bool,
}

#[derive(Debug, Clone)]
pub struct ExecuteSqlTool {
    api: SupabaseApi,
}

impl ExecuteSqlTool {
    pub fn new(api: SupabaseApi) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl ToolHandler for ExecuteSqlTool {
    const NAME: &'static str = "execute_sql";

    const DESCRIPTION: &'static str = "Execute SQL on the Supabase database through RPC. SELECT runs \
         read-only by default; set read_only=false for DDL (CREATE/ALTER/DROP) or DML (INSERT/UPDATE/DELETE).";

    type Params = ExecuteSqlParams;
    type Output = SqlResult;

    async fn call(&self, params: ExecuteSqlParams) -> ToolResult<SqlResult> {
        let query = require_text("query", &params.query)?;
        run_sql(&self.api, query, params.read_only).await
    }
}

// ============================================================================
// Catalog helpers
// ============================================================================

#[derive(Debug, Clone)]
pub struct ListTablesTool {
    api: SupabaseApi,
}

impl ListTablesTool {
    pub fn new(api: SupabaseApi) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl ToolHandler for ListTablesTool {
    const NAME: &'static str = "list_tables";
    const DESCRIPTION: &'static str = "List the tables of a schema.";

    type Params = SchemaParams;
    type Output = SqlResult;

    async fn call(&self, params: SchemaParams) -> ToolResult<SqlResult> {
        run_sql(&self.api, &list_tables_query(&params.schema)?, true).await
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DescribeTableParams {
    #[schemars(description = "Table name")]
    pub table_name: String,

    #[schemars(description = "Schema name (default: public)")]
    #[serde(default = "default_schema")]
    pub schema: String,
}

#[derive(Debug, Clone)]
pub struct DescribeTableTool {
    api: SupabaseApi,
}

impl DescribeTableTool {
    pub fn new(api: SupabaseApi) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl ToolHandler for DescribeTableTool {
    const NAME: &'static str = "describe_table";
    const DESCRIPTION: &'static str =
        "Describe a table: column names, types, nullability, defaults and maximum lengths.";

    type Params = DescribeTableParams;
    type Output = SqlResult;

    async fn call(&self, params: DescribeTableParams) -> ToolResult<SqlResult> {
        let query = describe_table_query(&params.schema, &params.table_name)?;
        run_sql(&self.api, &query, true).await
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseStatsTool {
    api: SupabaseApi,
}

impl DatabaseStatsTool {
    pub fn new(api: SupabaseApi) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl ToolHandler for DatabaseStatsTool {
    const NAME: &'static str = "get_database_stats";
    const DESCRIPTION: &'static str = "Database size and active connection count.";

    type Params = NoParams;
    type Output = SqlResult;

    async fn call(&self, _params: NoParams) -> ToolResult<SqlResult> {
        run_sql(&self.api, DATABASE_STATS_QUERY, true).await
    }
}

#[derive(Debug, Clone)]
pub struct TableRowCountsTool {
    api: SupabaseApi,
}

impl TableRowCountsTool {
    pub fn new(api: SupabaseApi) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl ToolHandler for TableRowCountsTool {
    const NAME: &'static str = "get_table_row_counts";
    const DESCRIPTION: &'static str = "Live row counts for every table of a schema, largest first.";

    type Params = SchemaParams;
    type Output = SqlResult;

    async fn call(&self, params: SchemaParams) -> ToolResult<SqlResult> {
        run_sql(&self.api, &row_counts_query(&params.schema)?, true).await
    }
}
