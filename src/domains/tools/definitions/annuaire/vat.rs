//! French intra-community VAT number tool. Pure computation, no upstream.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domains::rules::vat_number;
use crate::domains::tools::{ToolHandler, ToolResult};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct VatParams {
    #[schemars(description = "9-digit SIREN")]
    pub siren: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct VatResult {
    pub siren: String,
    pub tva: String,
}

#[derive(Debug, Clone, Default)]
pub struct VatTool;

impl VatTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl ToolHandler for VatTool {
    const NAME: &'static str = "calcul_tva";

    const DESCRIPTION: &'static str =
        "Compute the French intra-community VAT number from a SIREN. Format: FR + 2-digit key + SIREN.";

    type Params = VatParams;
    type Output = VatResult;

    async fn call(&self, params: VatParams) -> ToolResult<VatResult> {
        let siren = params.siren.trim();
        let tva = vat_number(siren)?;
        Ok(VatResult {
            siren: siren.to_string(),
            tva,
        })
    }
}
