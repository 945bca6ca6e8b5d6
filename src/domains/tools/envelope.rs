//! Uniform result envelope for tool invocations.
//!
//! Serialized as either `{"success": <payload>}` or
//! `{"error": {"kind": ..., "message": ..., "status"?: ..., "body"?: ...}}`.
//! The enum makes it impossible to populate both sides or neither.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{ErrorKind, ToolError};

/// Outcome of one tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Envelope {
    Success(Value),
    Error(EnvelopeError),
}

/// Error side of the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeError {
    pub kind: ErrorKind,
    pub message: String,

    /// Upstream HTTP status, for upstream status errors only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// Raw upstream response body, for upstream status errors only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Envelope {
    pub fn success(payload: Value) -> Self {
        Self::Success(payload)
    }

    pub fn failure(err: ToolError) -> Self {
        let (status, body) = match &err {
            ToolError::UpstreamStatus { status, body } => (Some(*status), Some(body.clone())),
            _ => (None, None),
        };

        Self::Error(EnvelopeError {
            kind: err.kind(),
            message: err.to_string(),
            status,
            body,
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The error kind, if this is a failure.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success(_) => None,
            Self::Error(err) => Some(err.kind),
        }
    }

    /// Render as an MCP `tools/call` result.
    pub fn to_call_result(&self) -> Value {
        let structured = serde_json::to_value(self).unwrap_or(Value::Null);
        serde_json::json!({
            "content": [{ "type": "text", "text": structured.to_string() }],
            "structuredContent": structured,
            "isError": self.is_error()
        })
    }
}
