//! Legal name extraction from company registry URLs.
//!
//! Registry pages are addressed as `/entreprise/<legal-name-slug>-<SIREN>`,
//! so a search hit pointing at such a page carries both the legal name and
//! the SIREN of the company, even when the commercial name differs.

use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

static REGISTRY_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/entreprise/([a-z0-9-]+)-(\d{9})(?:/|$)").expect("registry URL pattern")
});

/// A search engine hit reduced to what the extraction needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchHit {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// A legal name and SIREN recovered from a registry URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LegalNameMatch {
    pub url: String,
    pub title: Option<String>,
    pub legal_name: String,
    pub siren: String,
}

/// Extract legal names from the hits whose URL matches the registry shape.
///
/// Hits that do not match are dropped; no match at all yields an empty list.
pub fn extract_legal_names<'a, I>(hits: I) -> Vec<LegalNameMatch>
where
    I: IntoIterator<Item = &'a SearchHit>,
{
    hits.into_iter()
        .filter_map(|hit| {
            let captures = REGISTRY_URL.captures(&hit.url)?;
            Some(LegalNameMatch {
                url: hit.url.clone(),
                title: hit.title.clone(),
                legal_name: captures[1].replace('-', " ").to_uppercase(),
                siren: captures[2].to_string(),
            })
        })
        .collect()
}
