//! Holding company check.
//!
//! Looks a SIREN up in the business registry and reports whether its main
//! activity is holding management (NAF 64.20Z) and whether it declares
//! employees.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::config::EndpointConfig;
use crate::core::upstream::UpstreamClient;
use crate::domains::rules::parse_siren;
use crate::domains::tools::{ToolError, ToolHandler, ToolResult};

use super::common::search_registry;

/// NAF code for holding company activity.
pub const HOLDING_ACTIVITY_CODE: &str = "64.20Z";

/// Headcount bands meaning "no employees" ("NN" undeclared, "00" zero).
const NO_EMPLOYEE_BANDS: [&str; 2] = ["NN", "00"];

// ============================================================================
// Tool Parameters
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CheckHoldingParams {
    /// 9-digit SIREN to check.
    #[schemars(description = "9-digit SIREN of the company to check")]
    pub siren: String,
}

// ============================================================================
// Structured Output
// ============================================================================

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct CheckHoldingResult {
    pub siren: String,
    pub nom: Option<String>,
    pub activite_principale: Option<String>,
    pub is_holding: bool,
    pub has_employees: bool,
    pub tranche_effectif_salarie: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Whether a headcount band means the company has staff.
pub fn declares_employees(band: Option<&str>) -> bool {
    match band.map(str::trim) {
        None | Some("") => false,
        Some(band) => !NO_EMPLOYEE_BANDS.contains(&band),
    }
}

// ============================================================================
// Tool Implementation
// ============================================================================

#[derive(Debug, Clone)]
pub struct CheckHoldingTool {
    client: UpstreamClient,
    endpoint: EndpointConfig,
}

impl CheckHoldingTool {
    pub fn new(client: UpstreamClient, endpoint: EndpointConfig) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait::async_trait]
impl ToolHandler for CheckHoldingTool {
    const NAME: &'static str = "check_holding";

    const DESCRIPTION: &'static str = "Check whether a company (by SIREN) is a holding: main activity \
         64.20Z and whether it declares employees. A holding without employees is usually not the \
         operating company; look for its subsidiaries instead.";

    type Params = CheckHoldingParams;
    type Output = CheckHoldingResult;

    async fn call(&self, params: CheckHoldingParams) -> ToolResult<CheckHoldingResult> {
        let siren = params.siren.trim();
        parse_siren(siren)?;

        let response = search_registry(&self.client, &self.endpoint, siren, 1).await?;
        let company = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ToolError::not_found(format!("No company found for SIREN {}", siren)))?;

        let is_holding = company.activite_principale.as_deref() == Some(HOLDING_ACTIVITY_CODE);
        let has_employees = declares_employees(company.tranche_effectif_salarie.as_deref());
        info!(siren, is_holding, has_employees, "Holding check complete");

        let warning = (is_holding && !has_employees).then(|| {
            "Holding without employees: the operating company is probably a subsidiary".to_string()
        });

        Ok(CheckHoldingResult {
            siren: siren.to_string(),
            nom: company.nom_complet.or(company.nom_raison_sociale),
            activite_principale: company.activite_principale,
            is_holding,
            has_employees,
            tranche_effectif_salarie: company.tranche_effectif_salarie,
            warning,
        })
    }
}
