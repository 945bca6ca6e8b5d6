//! Tool handler trait.
//!
//! Each tool is a struct implementing [`ToolHandler`]: a typed parameter
//! struct (its JSON schema is what clients see in `tools/list`, its serde
//! defaults are the parameter defaults), a typed output, and an async
//! `call`. The registry stores tools behind the object-safe [`DynTool`],
//! which resolves raw JSON arguments before the handler ever runs.

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::{handler::server::tool::cached_schema_for_type, model::Tool};
use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use super::error::{ToolError, ToolResult};

/// A named, remotely invocable operation.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Parameters, deserialized from the call arguments.
    type Params: DeserializeOwned + JsonSchema + Send + 'static;

    /// Normalized result, serialized verbatim into the success envelope.
    type Output: Serialize + Send;

    /// Execute the tool with resolved parameters.
    async fn call(&self, params: Self::Params) -> ToolResult<Self::Output>;
}

/// Object-safe view of a [`ToolHandler`] used by the registry.
pub trait DynTool: Send + Sync {
    /// Tool metadata for `tools/list`.
    fn to_tool(&self) -> Tool;

    /// Resolve `arguments` into parameters and run the handler.
    fn invoke(&self, arguments: Value) -> BoxFuture<'_, ToolResult<Value>>;
}

impl<T: ToolHandler> DynTool for T {
    fn to_tool(&self) -> Tool {
        Tool {
            name: T::NAME.into(),
            description: Some(T::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<T::Params>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    fn invoke(&self, arguments: Value) -> BoxFuture<'_, ToolResult<Value>> {
        async move {
            let params = resolve_params::<T::Params>(arguments)?;
            let output = self.call(params).await?;
            serde_json::to_value(output)
                .map_err(|e| ToolError::internal(format!("Failed to serialize tool output: {}", e)))
        }
        .boxed()
    }
}

/// Resolve raw call arguments into a parameter struct.
///
/// Absent arguments (`null`) count as an empty object so that tools whose
/// parameters are all optional can be called without any.
pub fn resolve_params<P: DeserializeOwned>(arguments: Value) -> ToolResult<P> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        Value::Object(map) => Value::Object(map),
        other => {
            return Err(ToolError::invalid_argument(format!(
                "Arguments must be a JSON object, got {}",
                json_type_name(&other)
            )));
        }
    };

    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_argument(e.to_string()))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parameters of tools that take no arguments.
#[derive(Debug, Clone, Default, serde::Deserialize, JsonSchema)]
pub struct NoParams {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, JsonSchema)]
    struct SampleParams {
        query: String,
        #[serde(default = "default_per_page")]
        per_page: u32,
    }

    fn default_per_page() -> u32 {
        5
    }

    #[test]
    fn test_resolve_applies_defaults() {
        let params: SampleParams = resolve_params(json!({ "query": "vloum" })).unwrap();
        assert_eq!(params.query, "vloum");
        assert_eq!(params.per_page, 5);
    }

    #[test]
    fn test_resolve_missing_required() {
        let err = resolve_params::<SampleParams>(json!({ "per_page": 3 })).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument(ref msg) if msg.contains("query")));
    }

    #[test]
    fn test_resolve_wrong_shape() {
        let err = resolve_params::<SampleParams>(json!({ "query": "x", "per_page": "five" }))
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument(_)));
    }

    #[test]
    fn test_resolve_null_as_empty_object() {
        assert!(resolve_params::<NoParams>(Value::Null).is_ok());
        assert!(resolve_params::<SampleParams>(Value::Null).is_err());
    }

    #[test]
    fn test_resolve_rejects_non_object() {
        let err = resolve_params::<NoParams>(json!([1, 2])).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument(ref msg) if msg.contains("array")));
    }
}
