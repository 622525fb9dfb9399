pub mod driving;
pub mod geocode;
pub mod regeocode;
pub mod text_search;
pub mod weather;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::amap::{AmapClient, Endpoint};
use crate::error::{ToolError, ToolOutcome};
use crate::protocol::{
    InitializeParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpErrorResponse,
    ToolCallParams, ToolResult,
};
use crate::schema;
use crate::tools::{self, ToolKind};

/// MCP protocol revision this server speaks.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for every notification, whatever its method: a message
/// without an id is never answered and never runs a tool.
pub async fn dispatch(req: &JsonRpcRequest, client: &AmapClient) -> Option<JsonRpcResponse> {
    if req.is_notification() {
        debug!(method = %req.method, "notification");
        return None;
    }

    match req.method.as_str() {
        "initialize" => {
            if let Some(init) = req
                .params
                .clone()
                .and_then(|v| serde_json::from_value::<InitializeParams>(v).ok())
            {
                let client_info = init.client_info.as_ref();
                info!(
                    client = client_info.and_then(|c| c.name.as_deref()).unwrap_or("unknown"),
                    client_version = client_info.and_then(|c| c.version.as_deref()).unwrap_or("unknown"),
                    protocol = init.protocol_version.as_deref().unwrap_or("unspecified"),
                    "client initializing"
                );
            }
            let result = serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "mcp-amap-server",
                    "version": env!("CARGO_PKG_VERSION")
                }
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "ping" => Some(JsonRpcResponse::success(req.id.clone(), serde_json::json!({}))),

        "tools/list" => Some(JsonRpcResponse::success(req.id.clone(), tools::manifest())),

        "tools/call" => {
            let params: ToolCallParams = match &req.params {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(
                            req.id.clone(),
                            JsonRpcError::invalid_params(format!(
                                "Invalid tools/call params: {e}"
                            )),
                        ));
                    }
                },
                None => {
                    return Some(JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::invalid_params("Missing params for tools/call"),
                    ));
                }
            };

            let tool_result = dispatch_tool_call(&params, client).await;
            let response = match serde_json::to_value(&tool_result) {
                Ok(result_json) => JsonRpcResponse::success(req.id.clone(), result_json),
                Err(e) => JsonRpcResponse::error(
                    req.id.clone(),
                    JsonRpcError::internal_error(format!("Failed to serialize tool result: {e}")),
                ),
            };
            Some(response)
        }

        _ => Some(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::method_not_found(&req.method),
        )),
    }
}

/// Run one tool call to completion. Never fails: every error path ends up
/// as an `isError` result.
pub async fn dispatch_tool_call(params: &ToolCallParams, client: &AmapClient) -> ToolResult {
    let Some(tool) = tools::find(&params.name) else {
        return into_tool_result(Err(ToolError::UnknownTool(params.name.clone())));
    };

    let arguments = params
        .arguments
        .clone()
        .unwrap_or_else(|| Value::Object(Default::default()));

    if let Err(e) = schema::validate(&tool.input_schema, &arguments) {
        return into_tool_result(Err(ToolError::InvalidArguments {
            tool: tool.name.to_string(),
            detail: e.to_string(),
        }));
    }

    info!(tool = tool.name, "tool call");

    // A panicking handler surfaces as a JoinError instead of taking the
    // transport down with it.
    let client = client.clone();
    let (name, kind) = (tool.name, tool.kind);
    let task = tokio::spawn(async move { run_tool(kind, name, arguments, &client).await });

    let outcome = match task.await {
        Ok(outcome) => outcome,
        Err(join_err) => Err(ToolError::Unexpected(format!("tool task failed: {join_err}"))),
    };

    into_tool_result(outcome)
}

async fn run_tool(
    kind: ToolKind,
    name: &'static str,
    arguments: Value,
    client: &AmapClient,
) -> ToolOutcome<String> {
    match kind {
        ToolKind::Geo => invoke::<geocode::Geocode>(name, arguments, client).await,
        ToolKind::Regeocode => invoke::<regeocode::ReverseGeocode>(name, arguments, client).await,
        ToolKind::TextSearch => invoke::<text_search::TextSearch>(name, arguments, client).await,
        ToolKind::DirectionDriving => invoke::<driving::Driving>(name, arguments, client).await,
        ToolKind::Weather => {
            let params = parse_arguments(name, arguments)?;
            let report = weather::handle(params, client).await?;
            render(&report)
        }
    }
}

/// Single-endpoint tool: parse arguments, call, normalize, render.
async fn invoke<E>(name: &str, arguments: Value, client: &AmapClient) -> ToolOutcome<String>
where
    E: Endpoint,
    E::Params: DeserializeOwned,
{
    let params: E::Params = parse_arguments(name, arguments)?;
    let output = client.call::<E>(&params).await?;
    render(&output)
}

fn parse_arguments<T: DeserializeOwned>(tool: &str, arguments: Value) -> ToolOutcome<T> {
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments {
        tool: tool.to_string(),
        detail: e.to_string(),
    })
}

/// Serialize a normalized output to the text block handed to the client.
pub fn render<T: Serialize>(output: &T) -> ToolOutcome<String> {
    serde_json::to_string_pretty(output)
        .map_err(|e| ToolError::Unexpected(format!("failed to serialize result: {e}")))
}

/// The single mapping from handler outcome to MCP tool result.
pub fn into_tool_result(outcome: ToolOutcome<String>) -> ToolResult {
    match outcome {
        Ok(text) => ToolResult::text(text),
        Err(err) => {
            match &err {
                ToolError::Transport { .. } | ToolError::Validation { .. } | ToolError::Unexpected(_) => {
                    error!(error = %err, "tool call failed")
                }
                _ => warn!(error = %err, "tool call rejected"),
            }
            McpErrorResponse::from(err).into()
        }
    }
}
