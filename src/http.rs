//! HTTP entry point.
//!
//! `/mcp` and its `/sse` alias serve the tool manifest on GET and accept a
//! JSON-RPC request on any other method. Every other path is a plain 404.

use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::any;
use axum::Router;
use tracing::{debug, info, warn};

use crate::amap::AmapClient;
use crate::handlers;
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::server::MAX_MESSAGE_BYTES;
use crate::tools;

/// Build the router. Exposed separately from [`serve`] so it can be mounted
/// on a listener chosen by the caller.
pub fn router(client: AmapClient) -> Router {
    Router::new()
        .route("/mcp", any(mcp_endpoint))
        .route("/sse", any(mcp_endpoint))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_MESSAGE_BYTES))
        .with_state(client)
}

/// Bind `addr` and serve until the listener fails.
pub async fn serve(addr: SocketAddr, client: AmapClient) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "serving MCP over HTTP");
    axum::serve(listener, router(client)).await
}

async fn mcp_endpoint(State(client): State<AmapClient>, method: Method, body: Bytes) -> Response {
    if method == Method::GET {
        return Json(tools::manifest()).into_response();
    }

    let req: JsonRpcRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "parse error");
            return (
                StatusCode::BAD_REQUEST,
                Json(JsonRpcResponse::error(None, JsonRpcError::parse_error())),
            )
                .into_response();
        }
    };

    if !req.is_v2() {
        return Json(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::invalid_request(),
        ))
        .into_response();
    }

    debug!(method = %req.method, "json-rpc request");

    match handlers::dispatch(&req, &client).await {
        Some(resp) => Json(resp).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}
