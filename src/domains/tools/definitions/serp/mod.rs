//! Web search tools backed by the SERP proxy.

mod common;
mod linkedin;
mod registries;
mod search;

pub use linkedin::{SerpLinkedinCompanyResult, SerpLinkedinCompanyTool};
pub use registries::{
    CompanyNameParams, SerpPappersResult, SerpPappersTool, SerpSocieteComResult, SerpSocieteComTool,
};
pub use search::{SerpSearchParams, SerpSearchResult, SerpSearchTool};
