//! Self-hosted Supabase tools: SQL, auth administration and storage.

mod auth;
mod common;
mod sql;
mod storage;

pub use auth::{CreateUserTool, DeleteUserTool, ListUsersTool, UserSummary};
pub use common::SupabaseApi;
pub use sql::{
    DatabaseStatsTool, DescribeTableTool, ExecuteSqlTool, ListTablesTool, SqlResult,
    TableRowCountsTool,
};
pub use storage::{ListBucketsTool, ListFilesTool};
