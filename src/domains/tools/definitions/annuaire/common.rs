//! Shared client for the business registry search API.

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::core::config::EndpointConfig;
use crate::core::upstream::{UpstreamClient, UpstreamRequest};
use crate::domains::tools::ToolResult;
use crate::domains::tools::definitions::common::decode_upstream;

/// Registry calls time out after 10 seconds.
pub const REGISTRY_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest page size the registry accepts.
pub const MAX_PER_PAGE: u32 = 25;

/// Raw search response.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<RegistryCompany>,
    #[serde(default)]
    pub total_results: u64,
}

/// A company as returned by the registry.
#[derive(Debug, Deserialize)]
pub struct RegistryCompany {
    pub siren: Option<String>,
    pub nom_complet: Option<String>,
    pub nom_raison_sociale: Option<String>,
    pub activite_principale: Option<String>,
    pub tranche_effectif_salarie: Option<String>,
    pub siege: Option<RegistryEstablishment>,
    pub dirigeants: Option<Vec<Value>>,
}

/// Head office establishment.
#[derive(Debug, Default, Deserialize)]
pub struct RegistryEstablishment {
    pub siret: Option<String>,
    pub adresse: Option<String>,
    pub code_postal: Option<String>,
    pub libelle_commune: Option<String>,
}

/// Normalized company summary.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct CompanySummary {
    pub siren: Option<String>,
    pub siret: Option<String>,
    pub nom_complet: Option<String>,
    pub nom_raison_sociale: Option<String>,
    pub adresse: Option<String>,
    pub code_postal: Option<String>,
    pub libelle_commune: Option<String>,
    pub activite_principale: Option<String>,
    pub tranche_effectif_salarie: Option<String>,
    pub dirigeants: Vec<Value>,
}

impl From<RegistryCompany> for CompanySummary {
    fn from(company: RegistryCompany) -> Self {
        let siege = company.siege.unwrap_or_default();
        Self {
            siren: company.siren,
            siret: siege.siret,
            nom_complet: company.nom_complet,
            nom_raison_sociale: company.nom_raison_sociale,
            adresse: siege.adresse,
            code_postal: siege.code_postal,
            libelle_commune: siege.libelle_commune,
            activite_principale: company.activite_principale,
            tranche_effectif_salarie: company.tranche_effectif_salarie,
            dirigeants: company.dirigeants.unwrap_or_default(),
        }
    }
}

/// Run one registry search.
pub async fn search_registry(
    client: &UpstreamClient,
    endpoint: &EndpointConfig,
    query: &str,
    per_page: u32,
) -> ToolResult<SearchResponse> {
    info!("Searching business registry for: {}", query);

    let request = UpstreamRequest::get(endpoint.url("/search"), REGISTRY_TIMEOUT).query(&[
        ("q", query.to_string()),
        ("per_page", per_page.to_string()),
    ]);

    decode_upstream(client.send(request).await?)
}
