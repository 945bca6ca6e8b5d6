//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - Registration of tools by unique name (duplicates are rejected)
//! - Dispatch of tool calls, turning every outcome into an [`Envelope`]
//! - Tool metadata for listing

use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use rmcp::model::Tool;
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use super::envelope::Envelope;
use super::error::{ToolError, ToolResult};
use super::handlers::{DynTool, ToolHandler};

/// Tool registry - maps tool names to handlers.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<&'static str, Arc<dyn DynTool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Fails if a tool with the same name already exists.
    pub fn register<T: ToolHandler>(&mut self, tool: T) -> ToolResult<()> {
        if self.tools.contains_key(T::NAME) {
            return Err(ToolError::AlreadyRegistered(T::NAME.to_string()));
        }
        self.tools.insert(T::NAME, Arc::new(tool));
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<T: ToolHandler>(mut self, tool: T) -> ToolResult<Self> {
        self.register(tool)?;
        Ok(self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools(&self) -> Vec<Tool> {
        self.tools.values().map(|t| t.to_tool()).collect()
    }

    /// Invoke a tool by name.
    ///
    /// Always yields exactly one envelope: unknown names, argument errors,
    /// handler errors and handler panics all end up as envelope errors.
    #[instrument(skip(self, arguments))]
    pub async fn invoke(&self, name: &str, arguments: Value) -> Envelope {
        let Some(tool) = self.tools.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return Envelope::failure(ToolError::not_found(format!("unknown tool '{}'", name)));
        };

        let started = Instant::now();
        let outcome = AssertUnwindSafe(tool.invoke(arguments))
            .catch_unwind()
            .await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(Ok(payload)) => {
                info!(elapsed_ms, "Tool {} succeeded", name);
                Envelope::success(payload)
            }
            Ok(Err(err)) => {
                warn!(elapsed_ms, kind = ?err.kind(), "Tool {} failed: {}", name, err);
                Envelope::failure(err)
            }
            Err(panic) => {
                let reason = panic_message(panic.as_ref());
                error!(elapsed_ms, "Tool {} panicked: {}", name, reason);
                Envelope::failure(ToolError::internal(format!("tool '{}' panicked", name)))
            }
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::upstream::{UpstreamClient, UpstreamRequest};
    use crate::domains::tools::error::ErrorKind;
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio_test::assert_ok;

    #[derive(Debug, Deserialize, JsonSchema)]
    struct EchoParams {
        text: String,
        #[serde(default = "default_times")]
        times: u32,
    }

    fn default_times() -> u32 {
        1
    }

    #[derive(Debug, Serialize)]
    struct EchoOutput {
        text: String,
    }

    #[derive(Default)]
    struct EchoTool {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl ToolHandler for EchoTool {
        const NAME: &'static str = "echo";
        const DESCRIPTION: &'static str = "Repeat text";
        type Params = EchoParams;
        type Output = EchoOutput;

        async fn call(&self, params: EchoParams) -> ToolResult<EchoOutput> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(EchoOutput {
                text: params.text.repeat(params.times as usize),
            })
        }
    }

    struct PanicTool;

    #[async_trait::async_trait]
    impl ToolHandler for PanicTool {
        const NAME: &'static str = "panic";
        const DESCRIPTION: &'static str = "Always panics";
        type Params = super::super::handlers::NoParams;
        type Output = Value;

        async fn call(&self, _params: Self::Params) -> ToolResult<Value> {
            panic!("handler bug");
        }
    }

    #[derive(Debug, Deserialize, JsonSchema)]
    struct FetchParams {
        url: String,
        timeout_ms: u64,
    }

    struct FetchTool {
        client: UpstreamClient,
    }

    #[async_trait::async_trait]
    impl ToolHandler for FetchTool {
        const NAME: &'static str = "fetch";
        const DESCRIPTION: &'static str = "Fetch a URL";
        type Params = FetchParams;
        type Output = Value;

        async fn call(&self, params: FetchParams) -> ToolResult<Value> {
            let request =
                UpstreamRequest::get(params.url, Duration::from_millis(params.timeout_ms));
            Ok(self.client.send(request).await?)
        }
    }

    async fn spawn_stub() -> String {
        use axum::{Json, Router, http::StatusCode, routing::get};

        let app = Router::new()
            .route("/fast", get(|| async { Json(json!({ "fast": true })) }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Json(json!({}))
                }),
            )
            .route(
                "/error",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert_ok!(registry.register(EchoTool::default()));
        let err = registry.register(EchoTool::default()).unwrap_err();
        assert_eq!(err, ToolError::AlreadyRegistered("echo".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_tool_metadata() {
        let registry = ToolRegistry::new().with(EchoTool::default()).unwrap();
        let tools = registry.get_all_tools();

        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "echo");
        assert!(tools[0].input_schema.contains_key("properties"));
    }

    #[tokio::test]
    async fn test_invoke_success() {
        let registry = ToolRegistry::new().with(EchoTool::default()).unwrap();
        let envelope = registry
            .invoke("echo", json!({ "text": "ab", "times": 2 }))
            .await;
        assert_eq!(envelope, Envelope::success(json!({ "text": "abab" })));
    }

    #[tokio::test]
    async fn test_invoke_unknown_tool() {
        let registry = ToolRegistry::new();
        let envelope = registry.invoke("missing", json!({})).await;
        assert_eq!(envelope.error_kind(), Some(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_invalid_arguments_skip_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registry = ToolRegistry::new()
            .with(EchoTool {
                calls: calls.clone(),
            })
            .unwrap();

        let missing = registry.invoke("echo", json!({ "times": 2 })).await;
        let wrong_type = registry
            .invoke("echo", json!({ "text": "a", "times": "two" }))
            .await;

        assert_eq!(missing.error_kind(), Some(ErrorKind::InvalidArgument));
        assert_eq!(wrong_type.error_kind(), Some(ErrorKind::InvalidArgument));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_argument_makes_no_upstream_call() {
        let registry = ToolRegistry::new()
            .with(FetchTool {
                client: UpstreamClient::new().unwrap(),
            })
            .unwrap();
        // A call would fail with a transport error; argument resolution must fail first.
        let envelope = registry
            .invoke("fetch", json!({ "url": "http://127.0.0.1:9/" }))
            .await;
        assert_eq!(envelope.error_kind(), Some(ErrorKind::InvalidArgument));
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_error() {
        let registry = ToolRegistry::new()
            .with(PanicTool)
            .unwrap()
            .with(EchoTool::default())
            .unwrap();

        let envelope = registry.invoke("panic", Value::Null).await;
        assert_eq!(envelope.error_kind(), Some(ErrorKind::InternalError));

        // The registry keeps serving after a panic.
        let envelope = registry.invoke("echo", json!({ "text": "ok" })).await;
        assert!(!envelope.is_error());
    }

    #[tokio::test]
    async fn test_upstream_failures_in_envelope() {
        let base = spawn_stub().await;
        let registry = ToolRegistry::new()
            .with(FetchTool {
                client: UpstreamClient::new().unwrap(),
            })
            .unwrap();

        let envelope = registry
            .invoke("fetch", json!({ "url": format!("{base}/error"), "timeout_ms": 2000 }))
            .await;
        match envelope {
            Envelope::Error(err) => {
                assert_eq!(err.status, Some(500));
                assert_eq!(err.body.as_deref(), Some("upstream exploded"));
            }
            other => panic!("expected error envelope, got {other:?}"),
        }

        let envelope = registry
            .invoke("fetch", json!({ "url": format!("{base}/slow"), "timeout_ms": 100 }))
            .await;
        assert_eq!(envelope.error_kind(), Some(ErrorKind::TransportError));
    }

    #[tokio::test]
    async fn test_concurrent_invocations_are_isolated() {
        let base = spawn_stub().await;
        let registry = Arc::new(
            ToolRegistry::new()
                .with(FetchTool {
                    client: UpstreamClient::new().unwrap(),
                })
                .unwrap()
                .with(EchoTool::default())
                .unwrap(),
        );

        let slow = {
            let registry = registry.clone();
            let url = format!("{base}/slow");
            tokio::spawn(async move {
                registry
                    .invoke("fetch", json!({ "url": url, "timeout_ms": 1500 }))
                    .await
            })
        };

        // Give the slow call a head start so it is in flight.
        tokio::time::sleep(Duration::from_millis(50)).await;

        let started = Instant::now();
        let fast_url = format!("{base}/fast");
        let (fast, echo, bad) = tokio::join!(
            registry.invoke("fetch", json!({ "url": fast_url, "timeout_ms": 2000 })),
            registry.invoke("echo", json!({ "text": "hi" })),
            registry.invoke("echo", json!({})),
        );
        let fast_elapsed = started.elapsed();

        assert_eq!(fast, Envelope::success(json!({ "fast": true })));
        assert_eq!(echo, Envelope::success(json!({ "text": "hi" })));
        assert_eq!(bad.error_kind(), Some(ErrorKind::InvalidArgument));
        assert!(fast_elapsed < Duration::from_millis(1000));

        let slow = slow.await.unwrap();
        assert_eq!(slow.error_kind(), Some(ErrorKind::TransportError));
    }
}
