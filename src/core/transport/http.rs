//! HTTP transport implementation.
//!
//! JSON-RPC 2.0 over POST on the RPC path, plus a liveness probe. Every
//! request passes the credential gate first; only the health path skips it.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, instrument, warn};

use super::{HttpConfig, TransportError, TransportResult};
use crate::core::McpServer;
use crate::core::config::AuthConfig;
use crate::core::error::Result;
use crate::core::security::{BasicAuthGate, require_basic_auth};

/// MCP protocol revision announced on `initialize`.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
    gate: Arc<BasicAuthGate>,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }

    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::error(None, -32700, msg)
    }

    pub fn invalid_request(id: Option<Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    pub fn method_not_found(id: Option<Value>) -> Self {
        Self::error(id, -32601, "Method not found")
    }

    pub fn invalid_params(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }
}

impl HttpTransport {
    /// Create a transport guarded by the given credentials.
    pub fn new(config: HttpConfig, auth: &AuthConfig) -> Result<Self> {
        let gate = BasicAuthGate::new(auth, config.health_path.clone())?;
        Ok(Self {
            config,
            gate: Arc::new(gate),
        })
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Build the application router.
    pub fn router(&self, server: McpServer) -> Router {
        let mut app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route(&self.config.health_path, get(health_check))
            .with_state(server)
            .layer(middleware::from_fn_with_state(
                self.gate.clone(),
                require_basic_auth,
            ));

        // Outside the gate so browser preflights are answered without credentials.
        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        app.layer(TraceLayer::new_for_http())
    }

    /// Run until Ctrl-C.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {}", self.config.description());
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!("  → Health:   GET {}", self.config.health_path);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("HTTP listener stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!("Failed to listen for shutdown signal: {}", e),
    }
}

/// Liveness probe.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Handle JSON-RPC requests.
///
/// The body is parsed here rather than by the `Json` extractor so that a
/// malformed body still gets a JSON-RPC parse error with HTTP 200.
/// Notifications get no JSON-RPC reply, only `202 Accepted`.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(State(server): State<McpServer>, body: Bytes) -> Response {
    let response = match serde_json::from_slice::<Value>(&body) {
        Err(e) => {
            warn!("Malformed JSON-RPC body: {}", e);
            Some(JsonRpcResponse::parse_error(format!("Parse error: {}", e)))
        }
        Ok(value) => {
            let id = value.get("id").cloned();
            match serde_json::from_value::<JsonRpcRequest>(value) {
                Ok(request) => {
                    tracing::Span::current().record("method", request.method.as_str());
                    info!("Received JSON-RPC request: {}", request.method);
                    process_request(&server, request).await
                }
                Err(e) => {
                    warn!("Invalid JSON-RPC request: {}", e);
                    Some(JsonRpcResponse::invalid_request(id))
                }
            }
        }
    };

    match response {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Process a JSON-RPC request. Notifications yield no response.
async fn process_request(server: &McpServer, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    if request.jsonrpc != "2.0" {
        return Some(JsonRpcResponse::invalid_request(request.id));
    }

    let response = match request.method.as_str() {
        "initialize" => handle_initialize(server, request),
        "ping" => JsonRpcResponse::success(request.id, serde_json::json!({})),
        "tools/list" => handle_tools_list(server, request),
        "tools/call" => handle_tools_call(server, request).await,

        method if method.starts_with("notifications/") => {
            debug!("Received notification: {}", method);
            return None;
        }

        _ => {
            warn!("Unknown method: {}", request.method);
            JsonRpcResponse::method_not_found(request.id)
        }
    };

    Some(response)
}

fn handle_initialize(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    let result = serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": server.name(),
            "version": server.version()
        },
        "instructions": server.instructions()
    });

    JsonRpcResponse::success(request.id, result)
}

fn handle_tools_list(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    let result = serde_json::json!({
        "tools": server.list_tools()
    });

    JsonRpcResponse::success(request.id, result)
}

/// Tool failures are reported in the result (`isError`), never as JSON-RPC errors.
async fn handle_tools_call(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    let params = request.params.unwrap_or(Value::Null);

    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return JsonRpcResponse::invalid_params(request.id, "Missing tool name");
    };

    let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);
    let envelope = server.call_tool(name, arguments).await;

    JsonRpcResponse::success(request.id, envelope.to_call_result())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use axum::{
        body::Body,
        http::{Request, header},
    };
    use base64::{Engine, engine::general_purpose::STANDARD};
    use serde_json::json;
    use tower::ServiceExt;

    fn app() -> Router {
        let config = Config::default();
        let transport = HttpTransport::new(config.transport.clone(), &config.auth).unwrap();
        transport.router(McpServer::new(config).unwrap())
    }

    fn credentials() -> String {
        let auth = Config::default().auth.credentials;
        format!(
            "Basic {}",
            STANDARD.encode(format!("{}:{}", auth.username, auth.password))
        )
    }

    async fn post_rpc(body: impl Into<Body>, authorized: bool) -> (StatusCode, Bytes) {
        let mut request = Request::builder()
            .method("POST")
            .uri("/mcp")
            .header(header::CONTENT_TYPE, "application/json");
        if authorized {
            request = request.header(header::AUTHORIZATION, credentials());
        }

        let response = app()
            .oneshot(request.body(body.into()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes)
    }

    async fn rpc(body: impl Into<Body>, authorized: bool) -> (StatusCode, Value) {
        let (status, bytes) = post_rpc(body, authorized).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn call(name: &str, arguments: Value) -> String {
        json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_health_needs_no_credentials() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(
            serde_json::from_slice::<Value>(&bytes).unwrap(),
            json!({ "status": "ok" })
        );
    }

    #[tokio::test]
    async fn test_rpc_requires_credentials() {
        let (status, body) = rpc(call("calcul_tva", json!({ "siren": "919561266" })), false).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Unauthorized" }));
    }

    #[tokio::test]
    async fn test_tools_call_success() {
        let (status, body) = rpc(call("calcul_tva", json!({ "siren": "919561266" })), true).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 7);

        let result = &body["result"];
        assert_eq!(result["isError"], false);
        assert_eq!(result["structuredContent"]["success"]["tva"], "FR27919561266");

        let text = result["content"][0]["text"].as_str().unwrap();
        let envelope: Value = serde_json::from_str(text).unwrap();
        assert_eq!(envelope, result["structuredContent"]);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_an_envelope_error() {
        let (status, body) = rpc(call("no_such_tool", json!({})), true).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.get("error").is_none());
        assert_eq!(body["result"]["isError"], true);
        assert_eq!(body["result"]["structuredContent"]["error"]["kind"], "not_found");
    }

    #[tokio::test]
    async fn test_invalid_arguments_are_an_envelope_error() {
        let (_, body) = rpc(call("calcul_tva", json!({ "siren": "12" })), true).await;
        assert_eq!(
            body["result"]["structuredContent"]["error"]["kind"],
            "invalid_argument"
        );
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let (status, body) = rpc("{not json", true).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"]["code"], -32700);

        let missing_name = json!({
            "jsonrpc": "2.0", "id": 1, "method": "tools/call", "params": { "arguments": {} }
        });
        let (_, body) = rpc(missing_name.to_string(), true).await;
        assert_eq!(body["error"]["code"], -32602);

        let unknown = json!({ "jsonrpc": "2.0", "id": 2, "method": "resources/list" });
        let (_, body) = rpc(unknown.to_string(), true).await;
        assert_eq!(body["error"]["code"], -32601);
        assert_eq!(body["id"], 2);

        let no_method = json!({ "jsonrpc": "2.0", "id": 3 });
        let (_, body) = rpc(no_method.to_string(), true).await;
        assert_eq!(body["error"]["code"], -32600);
        assert_eq!(body["id"], 3);
    }

    #[tokio::test]
    async fn test_notifications_get_no_reply() {
        let initialized = json!({ "jsonrpc": "2.0", "method": "notifications/initialized" });
        let (status, body) = post_rpc(initialized.to_string(), true).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_initialize_and_list() {
        let init = json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {} });
        let (_, body) = rpc(init.to_string(), true).await;
        assert_eq!(body["result"]["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(body["result"]["serverInfo"]["name"], "siren-mcp-gateway");

        let list = json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" });
        let (_, body) = rpc(list.to_string(), true).await;
        assert_eq!(body["result"]["tools"].as_array().unwrap().len(), 21);

        let ping = json!({ "jsonrpc": "2.0", "id": 3, "method": "ping" });
        let (_, body) = rpc(ping.to_string(), true).await;
        assert_eq!(body["result"], json!({}));
    }
}
