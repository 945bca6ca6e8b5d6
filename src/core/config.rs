//! Configuration management for the MCP gateway.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (optionally via a `.env` file) or defaults. It is
//! built once at startup and handed to the gate, the server and the tools.

use super::error::{Error, Result};
use super::transport::HttpConfig;
use tracing::{info, warn};

/// Development-only gateway credentials. Deployments must override them.
const DEV_AUTH_USERNAME: &str = "mcp";
const DEV_AUTH_PASSWORD: &str = "mcp-dev-password";

/// Main configuration structure for the MCP gateway.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// HTTP transport configuration.
    pub transport: HttpConfig,

    /// Inbound credential pair checked by the gate.
    pub auth: AuthConfig,

    /// Upstream API endpoints and keys, one section per integration.
    pub upstreams: UpstreamsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// A username/password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Inbound authentication configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// The single credential pair accepted by the gate.
    pub credentials: BasicCredentials,

    /// Realm announced in the `WWW-Authenticate` challenge.
    pub realm: String,
}

/// Per-integration upstream configuration.
#[derive(Debug, Clone)]
pub struct UpstreamsConfig {
    /// French business registry search API.
    pub annuaire: EndpointConfig,

    /// LinkedIn profile scraper.
    pub linkedin_profile: EndpointConfig,

    /// LinkedIn company page scraper.
    pub linkedin_company: EndpointConfig,

    /// Legal notice SIRET extractor.
    pub siret_extractor: EndpointConfig,

    /// RDAP/WHOIS lookup service.
    pub rdap: EndpointConfig,

    /// Search engine proxy.
    pub serp: EndpointConfig,

    /// Self-hosted Supabase instance.
    pub supabase: SupabaseConfig,
}

/// An upstream base URL with its optional credentials.
#[derive(Clone)]
pub struct EndpointConfig {
    pub base_url: String,

    /// Outbound basic auth, sent when set.
    pub basic_auth: Option<BasicCredentials>,

    /// API key, sent in a service-specific header when set.
    pub api_key: Option<String>,
}

impl std::fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("base_url", &self.base_url)
            .field("basic_auth", &self.basic_auth)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl EndpointConfig {
    /// Endpoint without credentials.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            basic_auth: None,
            api_key: None,
        }
    }

    /// Join a path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

/// Supabase instance configuration.
#[derive(Clone)]
pub struct SupabaseConfig {
    pub base_url: String,
    pub anon_key: String,
    pub service_key: String,
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("base_url", &self.base_url)
            .field("anon_key", &"[REDACTED]")
            .field("service_key", &"[REDACTED]")
            .finish()
    }
}

impl SupabaseConfig {
    /// Join a path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    match (base.ends_with('/'), path.starts_with('/')) {
        (true, true) => format!("{}{}", base, &path[1..]),
        (false, false) if !path.is_empty() => format!("{}/{}", base, path),
        _ => format!("{}{}", base, path),
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            credentials: BasicCredentials {
                username: DEV_AUTH_USERNAME.to_string(),
                password: DEV_AUTH_PASSWORD.to_string(),
            },
            realm: "MCP Server".to_string(),
        }
    }
}

impl Default for UpstreamsConfig {
    fn default() -> Self {
        Self {
            annuaire: EndpointConfig::new("https://recherche-entreprises.api.gouv.fr"),
            linkedin_profile: EndpointConfig::new("https://scrap-lk-profile.lasupermachine.fr"),
            linkedin_company: EndpointConfig::new("https://scrap-lk-company.lasupermachine.fr"),
            siret_extractor: EndpointConfig::new("https://siretextractor.lasupermachine.fr"),
            rdap: EndpointConfig::new("https://rdap.lasupermachine.fr"),
            serp: EndpointConfig::new("http://127.0.0.1:8000/query"),
            supabase: SupabaseConfig {
                base_url: "https://supabase.lasupermachine.fr".to_string(),
                anon_key: String::new(),
                service_key: String::new(),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "siren-mcp-gateway".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig::default(),
            transport: HttpConfig::default(),
            auth: AuthConfig::default(),
            upstreams: UpstreamsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    ///
    /// The gateway credential pair is all or nothing: setting only one of
    /// `MCP_AUTH_USERNAME` and `MCP_AUTH_PASSWORD` is an error.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env();
        config.transport = HttpConfig::from_env();

        match (
            std::env::var("MCP_AUTH_USERNAME"),
            std::env::var("MCP_AUTH_PASSWORD"),
        ) {
            (Ok(username), Ok(password)) => {
                config.auth.credentials = BasicCredentials { username, password };
                info!("Gateway credentials loaded from environment");
            }
            (Err(_), Err(_)) => {
                warn!(
                    "MCP_AUTH_USERNAME/MCP_AUTH_PASSWORD not set - using development \
                     credentials. Never deploy with these defaults."
                );
            }
            _ => {
                return Err(Error::config(
                    "MCP_AUTH_USERNAME and MCP_AUTH_PASSWORD must be set together",
                ));
            }
        }

        if let Ok(realm) = std::env::var("MCP_AUTH_REALM") {
            config.auth.realm = realm;
        }

        config.upstreams = UpstreamsConfig::from_env();

        Ok(config)
    }

    /// Reject configurations the gateway must not start with.
    pub fn validate(&self) -> Result<()> {
        let credentials = &self.auth.credentials;
        if credentials.username.is_empty() || credentials.password.is_empty() {
            return Err(Error::config("gateway username and password must not be empty"));
        }

        if credentials.username.contains(':') {
            return Err(Error::config("gateway username must not contain ':'"));
        }

        if self.auth.realm.contains('"') {
            return Err(Error::config("auth realm must not contain '\"'"));
        }

        self.transport.validate()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
        }
    }
}

impl LoggingConfig {
    /// Read `MCP_LOG_LEVEL` and `MCP_LOG_TIMESTAMPS`.
    ///
    /// Separate from [`Config::from_env`] so logging can be set up before the
    /// rest of the configuration emits its warnings.
    pub fn from_env() -> Self {
        let mut logging = Self::default();
        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            logging.level = level;
        }
        if let Ok(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS") {
            logging.with_timestamps = parse_flag(&timestamps, true);
        }
        logging
    }
}

impl UpstreamsConfig {
    /// Load upstream endpoints from environment variables.
    pub fn from_env() -> Self {
        let mut upstreams = Self::default();

        override_url(&mut upstreams.annuaire, "MCP_ANNUAIRE_URL");
        override_url(&mut upstreams.linkedin_profile, "MCP_LINKEDIN_PROFILE_URL");
        override_url(&mut upstreams.linkedin_company, "MCP_LINKEDIN_COMPANY_URL");
        override_url(&mut upstreams.siret_extractor, "MCP_SIRET_EXTRACTOR_URL");
        override_url(&mut upstreams.rdap, "MCP_RDAP_URL");
        override_url(&mut upstreams.serp, "MCP_SERP_URL");

        // The scraping services share one set of credentials.
        if let (Ok(username), Ok(password)) = (
            std::env::var("MCP_SCRAPER_USERNAME"),
            std::env::var("MCP_SCRAPER_PASSWORD"),
        ) {
            let credentials = Some(BasicCredentials { username, password });
            upstreams.linkedin_profile.basic_auth = credentials.clone();
            upstreams.linkedin_company.basic_auth = credentials.clone();
            upstreams.siret_extractor.basic_auth = credentials.clone();
            upstreams.rdap.basic_auth = credentials;
        } else {
            warn!("MCP_SCRAPER_USERNAME/MCP_SCRAPER_PASSWORD not set - scraper calls are unauthenticated");
        }

        match std::env::var("MCP_SERP_API_KEY") {
            Ok(key) => upstreams.serp.api_key = Some(key),
            Err(_) => warn!("MCP_SERP_API_KEY not set - search calls will likely be rejected"),
        }

        if let Ok(url) = std::env::var("MCP_SUPABASE_URL") {
            upstreams.supabase.base_url = url;
        }
        if let Ok(key) = std::env::var("MCP_SUPABASE_ANON_KEY") {
            upstreams.supabase.anon_key = key;
        }
        if let Ok(key) = std::env::var("MCP_SUPABASE_SERVICE_KEY") {
            upstreams.supabase.service_key = key;
        }
        if upstreams.supabase.service_key.is_empty() {
            warn!("MCP_SUPABASE_SERVICE_KEY not set - Supabase tools will be rejected upstream");
        }

        upstreams
    }
}

fn override_url(endpoint: &mut EndpointConfig, var: &str) {
    if let Ok(url) = std::env::var(var) {
        endpoint.base_url = url;
    }
}

/// Parse a boolean-ish environment value.
pub(crate) fn parse_flag(value: &str, default: bool) -> bool {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}
