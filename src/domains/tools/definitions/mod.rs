//! Tool definitions module.
//!
//! Tools are grouped by the upstream service they talk to. Each group
//! exports its tool structs; [`catalog`](super::catalog) wires them to the
//! configured endpoints.

pub mod annuaire;
mod common;
pub mod scrape;
pub mod serp;
pub mod supabase;

pub use annuaire::{AnnuaireSearchTool, CheckHoldingTool, VatTool};
pub use scrape::{LinkedinCompanyTool, LinkedinProfileTool, RdapWhoisTool, SiretExtractorTool};
pub use serp::{SerpLinkedinCompanyTool, SerpPappersTool, SerpSearchTool, SerpSocieteComTool};
pub use supabase::{
    CreateUserTool, DatabaseStatsTool, DeleteUserTool, DescribeTableTool, ExecuteSqlTool,
    ListBucketsTool, ListFilesTool, ListTablesTool, ListUsersTool, SupabaseApi, TableRowCountsTool,
};
