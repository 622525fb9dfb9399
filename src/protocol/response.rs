use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::request::{RpcId, JSONRPC_VERSION};

/// Reply to a single JSON-RPC request. Exactly one of `result` and `error`
/// is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RpcId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<RpcId>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<RpcId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;

/// Protocol-level failure. Tool failures never use this; they travel inside
/// a successful response as an `isError` [`ToolResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    fn with_code(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn parse_error() -> Self {
        Self::with_code(PARSE_ERROR, "Parse error")
    }

    pub fn invalid_request() -> Self {
        Self::with_code(INVALID_REQUEST, "Invalid Request")
    }

    pub fn invalid_request_with(detail: impl Into<String>) -> Self {
        Self::with_code(INVALID_REQUEST, detail)
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::with_code(METHOD_NOT_FOUND, format!("Method not found: {method}"))
    }

    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self::with_code(INVALID_PARAMS, detail)
    }

    pub fn internal_error(detail: impl Into<String>) -> Self {
        Self::with_code(INTERNAL_ERROR, detail)
    }
}

/// Payload of a `tools/call` result: one text block, flagged when the tool
/// failed.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResult {
    pub content: Vec<ToolResultContent>,
    #[serde(rename = "isError", skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolResultContent {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub text: String,
}

impl ToolResult {
    fn single(text: String, is_error: bool) -> Self {
        Self {
            content: vec![ToolResultContent {
                kind: ContentKind::Text,
                text,
            }],
            is_error,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::single(text.into(), false)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::single(text.into(), true)
    }

    pub fn first_text(&self) -> &str {
        self.content.first().map_or("", |block| block.text.as_str())
    }
}

/// Machine-readable category of a tool failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum McpErrorCode {
    ConfigurationError,
    TransportError,
    ProviderError,
    ValidationError,
    InvalidArguments,
    NotFound,
    UnknownTool,
    InternalError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpError {
    pub code: McpErrorCode,
    pub message: String,
}

/// `{"error": {"code", "message"}}`, the text body of every failed tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpErrorResponse {
    pub error: McpError,
}

impl McpErrorResponse {
    pub fn new(code: McpErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            error: McpError { code, message },
        }
    }
}

impl From<McpErrorResponse> for ToolResult {
    fn from(response: McpErrorResponse) -> Self {
        let text = serde_json::to_string(&response)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .unwrap_or(response.error.message);
        Self::error(text)
    }
}
