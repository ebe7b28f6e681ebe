//! MCP Server implementation
//!
//! JSON-RPC 2.0 dispatcher. Turns one raw request body into at most one
//! response; every failure becomes a JSON-RPC error object.

use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::config;
use crate::features::FeatureRegistry;
use crate::mcp::types::*;
use crate::tools::ToolRegistry;

/// MCP Server: validates envelopes and routes them to method handlers.
///
/// Holds no per-session state; the registries are shared read-only.
#[derive(Debug, Clone)]
pub struct McpServer {
    registry: Arc<ToolRegistry>,
    features: Arc<FeatureRegistry>,
    info: ServerInfo,
}

impl McpServer {
    /// Create a new MCP server over an already populated registry
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            features: Arc::new(FeatureRegistry::new()),
            info: ServerInfo {
                name: config::server::NAME.to_string(),
                version: config::server::VERSION.to_string(),
            },
        }
    }

    /// Serve `features/list` and `features/call` from `features`
    pub fn with_features(mut self, features: Arc<FeatureRegistry>) -> Self {
        self.features = features;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn features(&self) -> &FeatureRegistry {
        &self.features
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Handle a raw JSON-RPC message.
    ///
    /// Returns `None` for notifications, which are never answered.
    pub fn handle_message(&self, message: &str) -> Option<JsonRpcResponse> {
        self.handle_bytes(message.as_bytes())
    }

    /// Handle a raw request body. Bytes that are not UTF-8 JSON are a parse
    /// error like any other malformed body.
    pub fn handle_bytes(&self, body: &[u8]) -> Option<JsonRpcResponse> {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => self.handle_value(value),
            Err(e) => {
                tracing::warn!(error = %e, "Rejected unparsable JSON-RPC body");
                Some(JsonRpcResponse::error(
                    None,
                    JsonRpcError::parse_error("Parse error").with_data(json!(e.to_string())),
                ))
            }
        }
    }

    /// Handle an already decoded JSON-RPC message
    pub fn handle_value(&self, value: Value) -> Option<JsonRpcResponse> {
        let request = match parse_request(value) {
            Ok(request) => request,
            Err((id, error)) => return Some(JsonRpcResponse::error(id, error)),
        };

        self.handle_request(request)
    }

    /// Route a validated request
    pub fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        tracing::info!(
            method = request.method.as_str(),
            id = ?request.id,
            "JSON-RPC request"
        );

        let outcome = self.route(&request.method, request.params.as_ref());

        if request.is_notification() {
            if let Err(e) = outcome {
                tracing::debug!(
                    method = request.method.as_str(),
                    code = e.code,
                    "Notification failed: {}",
                    e.message
                );
            }
            return None;
        }

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(request.id, result),
            Err(error) => {
                tracing::warn!(id = ?request.id, code = error.code, "{}", error.message);
                JsonRpcResponse::error(request.id, error)
            }
        })
    }

    fn route(&self, method: &Method, params: Option<&Value>) -> Result<Value, JsonRpcError> {
        match method {
            Method::Initialize => self.handle_initialize(),
            Method::Initialized | Method::Ping => Ok(json!({})),
            Method::ListTools => self.handle_list_tools(),
            Method::CallTool => self.handle_call_tool(params),
            Method::ListFeatures => self.handle_list_features(),
            Method::CallFeature => self.handle_call_feature(params),
            Method::Unknown(name) => Err(JsonRpcError::method_not_found(name.as_str())),
        }
    }

    /// Handle initialize request
    fn handle_initialize(&self) -> Result<Value, JsonRpcError> {
        tracing::info!("Client initializing connection");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            server_info: self.info.clone(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {}),
            },
        };

        to_result(&result)
    }

    /// Handle list tools request
    fn handle_list_tools(&self) -> Result<Value, JsonRpcError> {
        let result = ListToolsResult {
            tools: self.registry.list(),
        };
        tracing::info!(count = result.tools.len(), "Listed available tools");

        to_result(&result)
    }

    /// Handle call tool request
    fn handle_call_tool(&self, params: Option<&Value>) -> Result<Value, JsonRpcError> {
        let params = parse_call_params(params, true)?;

        tracing::info!(tool = %params.name, "Calling tool");

        let output = self.registry.invoke(&params.name, &params.arguments)?;
        Ok(CallToolResult::new(output).into_value())
    }

    fn handle_list_features(&self) -> Result<Value, JsonRpcError> {
        let result = ListFeaturesResult {
            features: self.features.list(),
        };
        tracing::info!(count = result.features.len(), "Listed available features");

        to_result(&result)
    }

    /// Handle call feature request. `arguments` may be omitted.
    fn handle_call_feature(&self, params: Option<&Value>) -> Result<Value, JsonRpcError> {
        let params = parse_call_params(params, false)?;
        let output = self.features.invoke(&params.name, &params.arguments)?;
        Ok(CallToolResult::new(output).into_value())
    }
}

fn to_result<T: serde::Serialize>(value: &T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}

/// Validate the JSON-RPC envelope.
///
/// On failure returns the id to answer with (when it was readable) and the
/// error object.
fn parse_request(value: Value) -> Result<JsonRpcRequest, (Option<RequestId>, JsonRpcError)> {
    let Value::Object(mut object) = value else {
        return Err((
            None,
            JsonRpcError::invalid_request("Invalid Request - expected a JSON object"),
        ));
    };

    let notification = !object.contains_key("id");
    let id = match object.remove("id") {
        None | Some(Value::Null) => None,
        Some(raw) => match RequestId::from_value(&raw) {
            Some(id) => Some(id),
            None => {
                return Err((
                    None,
                    JsonRpcError::invalid_request(
                        "Invalid Request - id must be a string or an integer",
                    ),
                ))
            }
        },
    };

    let invalid = |message: &str| (id.clone(), JsonRpcError::invalid_request(message));

    if object.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
        return Err(invalid("Invalid Request - jsonrpc must be '2.0'"));
    }

    let method = match object.get("method") {
        Some(Value::String(method)) => Method::from(method.as_str()),
        Some(_) => return Err(invalid("Invalid Request - method must be a string")),
        None => return Err(invalid("Invalid Request - missing method")),
    };

    let params = match object.remove("params") {
        None | Some(Value::Null) => None,
        Some(params @ (Value::Object(_) | Value::Array(_))) => Some(params),
        Some(_) => return Err(invalid("Invalid Request - params must be an object or array")),
    };

    Ok(JsonRpcRequest {
        id,
        notification,
        method,
        params,
    })
}

fn parse_call_params(
    params: Option<&Value>,
    arguments_required: bool,
) -> Result<CallToolParams, JsonRpcError> {
    let Some(Value::Object(params)) = params else {
        return Err(JsonRpcError::invalid_params(
            "Invalid params - expected an object with 'name' and 'arguments'",
        ));
    };

    let name = match params.get("name") {
        Some(Value::String(name)) if !name.is_empty() => name.clone(),
        Some(_) => {
            return Err(JsonRpcError::invalid_params(
                "Invalid params - 'name' must be a non-empty string",
            ))
        }
        None => return Err(JsonRpcError::invalid_params("Invalid params - missing 'name'")),
    };

    let arguments = match params.get("arguments") {
        Some(Value::Object(arguments)) => arguments.clone(),
        Some(_) => {
            return Err(JsonRpcError::invalid_params(
                "Invalid params - 'arguments' must be an object",
            ))
        }
        None if !arguments_required => Map::new(),
        None => {
            return Err(JsonRpcError::invalid_params(
                "Invalid params - missing 'arguments'",
            ))
        }
    };

    Ok(CallToolParams { name, arguments })
}
