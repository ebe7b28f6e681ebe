//! MCP protocol type definitions
//!
//! JSON-RPC 2.0 envelopes and the MCP payloads carried inside them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::RegistryError;
use crate::tools::{ToolDescriptor, ToolOutput};

/// JSON-RPC version
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol version
pub const MCP_VERSION: &str = "2024-11-05";

/// Standard JSON-RPC error codes
pub mod error_codes {
    /// Invalid JSON was received
    pub const PARSE_ERROR: i32 = -32700;
    /// The JSON sent is not a valid Request object
    pub const INVALID_REQUEST: i32 = -32600;
    /// The method (or tool) does not exist
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid method parameters
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal JSON-RPC error
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// Request ID (can be string or number)
///
/// Numbers are kept as parsed, so any JSON integer (including ones past
/// `i64::MAX`) is echoed back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RequestId {
    String(String),
    Number(Number),
}

impl RequestId {
    /// Read an id from its JSON form. Only integers and strings qualify.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(RequestId::String(s.clone())),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(RequestId::Number(n.clone())),
            _ => None,
        }
    }
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        RequestId::Number(n.into())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestId::String(s) => write!(f, "{s:?}"),
            RequestId::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Validated JSON-RPC request
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRpcRequest {
    /// `None` when the id member was absent or `null`
    pub id: Option<RequestId>,

    /// True when the id member was absent altogether
    pub notification: bool,

    pub method: Method,

    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn is_notification(&self) -> bool {
        self.notification
    }
}

/// JSON-RPC response.
///
/// Carries exactly one of `result` and `error`; the constructors are the only
/// way to build one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: &'static str,

    /// `null` when the request id could not be read
    id: Option<RequestId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Create a success response
    pub fn success(id: Option<RequestId>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Option<RequestId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(error),
        }
    }

    pub fn id(&self) -> Option<&RequestId> {
        self.id.as_ref()
    }

    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    pub fn error_object(&self) -> Option<&JsonRpcError> {
        self.error.as_ref()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// JSON-RPC error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code
    pub code: i32,

    /// Error message
    pub message: String,

    /// Additional data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Parse error (-32700)
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(error_codes::PARSE_ERROR, message)
    }

    /// Invalid request (-32600)
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(error_codes::INVALID_REQUEST, message)
    }

    /// Method not found (-32601)
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::new(
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", method.into()),
        )
    }

    /// Invalid params (-32602)
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(error_codes::INVALID_PARAMS, message)
    }

    /// Internal error (-32603)
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(error_codes::INTERNAL_ERROR, message)
    }

    /// Attach structured data
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl From<RegistryError> for JsonRpcError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound { name } => Self::new(
                error_codes::METHOD_NOT_FOUND,
                format!("Tool not found: {name}"),
            )
            .with_data(serde_json::json!({ "tool": name })),
            RegistryError::MissingArgument { ref tool, .. } => {
                let tool = tool.clone();
                Self::invalid_params(err.to_string())
                    .with_data(serde_json::json!({ "tool": tool }))
            }
            RegistryError::Execution { ref tool, .. } => {
                let tool = tool.clone();
                Self::internal_error(err.to_string())
                    .with_data(serde_json::json!({ "tool": tool }))
            }
            RegistryError::FeatureNotFound { name } => Self::new(
                error_codes::METHOD_NOT_FOUND,
                format!("Feature not found: {name}"),
            )
            .with_data(serde_json::json!({ "feature": name })),
            RegistryError::FeatureFailed { ref feature, .. } => {
                let feature = feature.clone();
                Self::internal_error(err.to_string())
                    .with_data(serde_json::json!({ "feature": feature }))
            }
            RegistryError::DuplicateName { .. } => Self::internal_error(err.to_string()),
        }
    }
}

/// Supported RPC methods
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Initialize,
    Initialized,
    Ping,
    ListTools,
    CallTool,
    ListFeatures,
    CallFeature,
    Unknown(String),
}

impl Method {
    pub fn as_str(&self) -> &str {
        match self {
            Method::Initialize => methods::INITIALIZE,
            Method::Initialized => methods::INITIALIZED,
            Method::Ping => methods::PING,
            Method::ListTools => methods::LIST_TOOLS,
            Method::CallTool => methods::CALL_TOOL,
            Method::ListFeatures => methods::LIST_FEATURES,
            Method::CallFeature => methods::CALL_FEATURE,
            Method::Unknown(name) => name,
        }
    }
}

impl From<&str> for Method {
    fn from(name: &str) -> Self {
        match name {
            methods::INITIALIZE => Method::Initialize,
            methods::INITIALIZED => Method::Initialized,
            methods::PING => Method::Ping,
            methods::LIST_TOOLS => Method::ListTools,
            methods::CALL_TOOL => Method::CallTool,
            methods::LIST_FEATURES => Method::ListFeatures,
            methods::CALL_FEATURE => Method::CallFeature,
            other => Method::Unknown(other.to_string()),
        }
    }
}

/// MCP server info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server name
    pub name: String,

    /// Server version
    pub version: String,
}

/// MCP server capabilities
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerCapabilities {
    /// Tool capabilities
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

/// Tools capability marker
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolsCapability {}

/// Initialize result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    /// Protocol version
    pub protocol_version: String,

    /// Server info
    pub server_info: ServerInfo,

    /// Server capabilities
    pub capabilities: ServerCapabilities,
}

/// List tools result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToolsResult {
    /// Available tools
    pub tools: Vec<ToolDescriptor>,
}

/// List features result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFeaturesResult {
    /// Available features
    pub features: Vec<ToolDescriptor>,
}

/// Call params for `tools/call` and `features/call`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolParams {
    /// Tool or feature name
    pub name: String,

    /// Tool arguments
    pub arguments: Map<String, Value>,
}

/// Tool result content item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolResultContent {
    /// Text content
    #[serde(rename = "text")]
    Text { text: String },
}

/// Call tool result: the tool's own output plus MCP `content`
#[derive(Debug, Clone)]
pub struct CallToolResult {
    output: ToolOutput,
}

impl CallToolResult {
    pub fn new(output: ToolOutput) -> Self {
        Self { output }
    }

    /// Render as the `result` member of the response.
    ///
    /// The output keys stay at the top level. A `content` array holding the
    /// output as JSON text is added unless the tool produced its own.
    pub fn into_value(self) -> Value {
        let mut output = self.output;
        if !output.contains_key("content") {
            let text = Value::Object(output.clone()).to_string();
            let content = vec![ToolResultContent::Text { text }];
            if let Ok(content) = serde_json::to_value(content) {
                output.insert("content".to_string(), content);
            }
        }
        Value::Object(output)
    }
}

/// MCP methods
pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const INITIALIZED: &str = "notifications/initialized";
    pub const LIST_TOOLS: &str = "tools/list";
    pub const CALL_TOOL: &str = "tools/call";
    pub const PING: &str = "ping";
    pub const LIST_FEATURES: &str = "features/list";
    pub const CALL_FEATURE: &str = "features/call";
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ToolError;

    #[test]
    fn test_request_id_from_value() {
        assert_eq!(RequestId::from_value(&json!(1)), Some(RequestId::from(1)));
        assert_eq!(
            RequestId::from_value(&json!("abc")),
            Some(RequestId::String("abc".to_string()))
        );
        assert_eq!(RequestId::from_value(&json!(1.5)), None);
        assert_eq!(RequestId::from_value(&json!({"x": 1})), None);
    }

    #[test]
    fn test_request_id_beyond_i64() {
        let id = RequestId::from_value(&json!(u64::MAX)).expect("integer id");
        assert_eq!(id.to_string(), "18446744073709551615");
        assert_eq!(serde_json::to_value(&id).unwrap(), json!(u64::MAX));

        let id = RequestId::from_value(&json!(i64::MIN)).expect("integer id");
        assert_eq!(serde_json::to_value(&id).unwrap(), json!(i64::MIN));
    }

    #[test]
    fn test_response_serialize() {
        let resp = JsonRpcResponse::success(Some(RequestId::from(1)), json!({"test": true}));
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"result\""));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_error_response_null_id() {
        let resp = JsonRpcResponse::error(None, JsonRpcError::parse_error("Parse error"));
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            value,
            json!({"jsonrpc": "2.0", "id": null, "error": {"code": -32700, "message": "Parse error"}})
        );
    }

    #[test]
    fn test_method_round_trip() {
        for name in [
            "initialize",
            "tools/list",
            "tools/call",
            "features/list",
            "features/call",
            "ping",
        ] {
            assert_eq!(Method::from(name).as_str(), name);
        }
        assert_eq!(
            Method::from("resources/list"),
            Method::Unknown("resources/list".to_string())
        );
    }

    #[test]
    fn test_registry_error_codes() {
        let not_found: JsonRpcError = RegistryError::NotFound {
            name: "mul".to_string(),
        }
        .into();
        assert_eq!(not_found.code, error_codes::METHOD_NOT_FOUND);
        assert!(not_found.message.contains("mul"));

        let missing: JsonRpcError = RegistryError::MissingArgument {
            tool: "add".to_string(),
            field: "b".to_string(),
        }
        .into();
        assert_eq!(missing.code, error_codes::INVALID_PARAMS);

        let failed: JsonRpcError = RegistryError::Execution {
            tool: "add".to_string(),
            source: ToolError::failed("overflow"),
        }
        .into();
        assert_eq!(failed.code, error_codes::INTERNAL_ERROR);
        assert_eq!(failed.message, "Tool 'add' failed: overflow");

        let feature: JsonRpcError = RegistryError::FeatureNotFound {
            name: "Nope".to_string(),
        }
        .into();
        assert_eq!(feature.code, error_codes::METHOD_NOT_FOUND);
        assert_eq!(feature.data, Some(json!({"feature": "Nope"})));
    }

    #[test]
    fn test_call_tool_result_content() {
        let mut output = ToolOutput::new();
        output.insert("result".to_string(), json!(3.0));
        let value = CallToolResult::new(output).into_value();

        assert_eq!(value["result"], json!(3.0));
        assert_eq!(value["content"][0]["type"], "text");
        assert_eq!(value["content"][0]["text"], r#"{"result":3.0}"#);
    }

    #[test]
    fn test_call_tool_result_keeps_own_content() {
        let mut output = ToolOutput::new();
        output.insert("content".to_string(), json!([]));
        let value = CallToolResult::new(output).into_value();
        assert_eq!(value["content"], json!([]));
    }
}
