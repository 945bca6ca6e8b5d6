//! Common utilities shared across tool definitions.
//!
//! Response decoding, field extraction from loosely typed upstream JSON,
//! and argument clamping.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::core::config::EndpointConfig;
use crate::core::upstream::UpstreamAuth;
use crate::domains::tools::{ToolError, ToolResult};

/// Decode an upstream JSON payload into its expected shape.
///
/// A payload that does not fit is reported as a transport error: the call
/// completed but produced nothing usable.
pub fn decode_upstream<T: DeserializeOwned>(value: Value) -> ToolResult<T> {
    serde_json::from_value(value).map_err(|e| {
        warn!("Unexpected upstream response shape: {}", e);
        ToolError::Transport(format!("Unexpected upstream response shape: {}", e))
    })
}

/// Read a scalar field as text. Numbers and booleans are stringified.
pub fn text_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read an array field, defaulting to empty.
pub fn array_field(value: &Value, key: &str) -> Vec<Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Outbound basic auth for an endpoint, if configured.
pub fn basic_auth(endpoint: &EndpointConfig) -> Option<UpstreamAuth> {
    endpoint
        .basic_auth
        .as_ref()
        .map(|creds| UpstreamAuth::Basic {
            username: creds.username.clone(),
            password: creds.password.clone(),
        })
}

/// Reject empty or whitespace-only text arguments.
pub fn require_text<'a>(name: &str, value: &'a str) -> ToolResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ToolError::invalid_argument(format!("'{}' must not be empty", name)));
    }
    Ok(trimmed)
}

/// Clamp a numeric argument to an allowed range.
pub fn clamp_limit(value: u32, min: u32, max: u32) -> u32 {
    value.clamp(min, max)
}
