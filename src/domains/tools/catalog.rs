//! Tool catalog - the fixed set of tools exposed by the gateway.
//!
//! Every tool is registered exactly once, bound to the endpoint it talks to.
//! Adding a tool means writing it under `definitions/` and adding one line here.

use crate::core::config::Config;
use crate::core::upstream::UpstreamClient;

use super::definitions::{
    AnnuaireSearchTool, CheckHoldingTool, CreateUserTool, DatabaseStatsTool, DeleteUserTool,
    DescribeTableTool, ExecuteSqlTool, LinkedinCompanyTool, LinkedinProfileTool, ListBucketsTool,
    ListFilesTool, ListTablesTool, ListUsersTool, RdapWhoisTool, SerpLinkedinCompanyTool,
    SerpPappersTool, SerpSearchTool, SerpSocieteComTool, SiretExtractorTool, SupabaseApi,
    TableRowCountsTool, VatTool,
};
use super::error::ToolResult;
use super::registry::ToolRegistry;

/// Build the registry with every tool bound to its configured upstream.
pub fn build_tool_registry(config: &Config, client: &UpstreamClient) -> ToolResult<ToolRegistry> {
    let upstreams = &config.upstreams;
    let supabase = SupabaseApi::new(client.clone(), upstreams.supabase.clone());

    ToolRegistry::new()
        // Business registry
        .with(AnnuaireSearchTool::new(client.clone(), upstreams.annuaire.clone()))?
        .with(CheckHoldingTool::new(client.clone(), upstreams.annuaire.clone()))?
        .with(VatTool::new())?
        // Scrapers
        .with(LinkedinProfileTool::new(client.clone(), upstreams.linkedin_profile.clone()))?
        .with(LinkedinCompanyTool::new(client.clone(), upstreams.linkedin_company.clone()))?
        .with(SiretExtractorTool::new(client.clone(), upstreams.siret_extractor.clone()))?
        .with(RdapWhoisTool::new(client.clone(), upstreams.rdap.clone()))?
        // Search
        .with(SerpSearchTool::new(client.clone(), upstreams.serp.clone()))?
        .with(SerpPappersTool::new(client.clone(), upstreams.serp.clone()))?
        .with(SerpSocieteComTool::new(client.clone(), upstreams.serp.clone()))?
        .with(SerpLinkedinCompanyTool::new(client.clone(), upstreams.serp.clone()))?
        // Supabase
        .with(ExecuteSqlTool::new(supabase.clone()))?
        .with(ListTablesTool::new(supabase.clone()))?
        .with(DescribeTableTool::new(supabase.clone()))?
        .with(DatabaseStatsTool::new(supabase.clone()))?
        .with(TableRowCountsTool::new(supabase.clone()))?
        .with(ListUsersTool::new(supabase.clone()))?
        .with(CreateUserTool::new(supabase.clone()))?
        .with(DeleteUserTool::new(supabase.clone()))?
        .with(ListBucketsTool::new(supabase.clone()))?
        .with(ListFilesTool::new(supabase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> ToolRegistry {
        build_tool_registry(&Config::default(), &UpstreamClient::new().unwrap()).unwrap()
    }

    #[test]
    fn test_catalog_is_complete() {
        let registry = registry();
        assert_eq!(registry.len(), 21);

        for name in [
            "annuaire_recherche",
            "check_holding",
            "calcul_tva",
            "linkedin_profile",
            "linkedin_company",
            "siret_extractor",
            "rdap_whois",
            "serp_search",
            "serp_pappers",
            "serp_societe_com",
            "serp_linkedin_company",
            "execute_sql",
            "list_tables",
            "describe_table",
            "get_database_stats",
            "get_table_row_counts",
            "list_users",
            "create_user",
            "delete_user",
            "list_buckets",
            "list_files",
        ] {
            assert!(registry.contains(name), "missing tool {name}");
        }
    }

    #[test]
    fn test_every_tool_has_object_schema() {
        for tool in registry().get_all_tools() {
            assert!(tool.description.is_some(), "{} has no description", tool.name);
            assert_eq!(
                tool.input_schema.get("type"),
                Some(&json!("object")),
                "{} schema is not an object",
                tool.name
            );
        }
    }

    #[tokio::test]
    async fn test_vat_through_registry() {
        let envelope = registry()
            .invoke("calcul_tva", json!({ "siren": "884706672" }))
            .await;
        assert!(!envelope.is_error());
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "success": { "siren": "884706672", "tva": "FR14884706672" } })
        );
    }
}
