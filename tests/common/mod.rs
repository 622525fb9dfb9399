//! Shared test support: an in-process stand-in for the provider API.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};

use mcp_amap_server::amap::AmapClient;
use mcp_amap_server::config::ServerConfig;
use mcp_amap_server::protocol::{ToolCallParams, ToolResult};

pub const TEST_KEY: &str = "test-key";

pub const GEO_PATH: &str = "/v3/geocode/geo";
pub const REGEO_PATH: &str = "/v3/geocode/regeo";
pub const PLACE_TEXT_PATH: &str = "/v3/place/text";
pub const DRIVING_PATH: &str = "/v3/direction/driving";
pub const WEATHER_PATH: &str = "/v3/weather/weatherInfo";

#[derive(Clone, Default)]
struct MockState {
    routes: Arc<HashMap<String, (StatusCode, Value)>>,
    hits: Arc<Mutex<Vec<(String, HashMap<String, String>)>>>,
}

/// Provider mock bound to an ephemeral local port. Records every request.
pub struct MockProvider {
    pub base: String,
    state: MockState,
}

impl MockProvider {
    /// Serve each `(path, body)` with 200.
    pub async fn start(routes: Vec<(&str, Value)>) -> Self {
        Self::start_with_status(
            routes
                .into_iter()
                .map(|(path, body)| (path, StatusCode::OK, body))
                .collect(),
        )
        .await
    }

    pub async fn start_with_status(routes: Vec<(&str, StatusCode, Value)>) -> Self {
        let routes = routes
            .into_iter()
            .map(|(path, status, body)| (path.to_string(), (status, body)))
            .collect();
        let state = MockState {
            routes: Arc::new(routes),
            hits: Arc::default(),
        };

        let app = Router::new().fallback(respond).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{addr}"),
            state,
        }
    }

    /// Every path answers with the same failure envelope.
    pub async fn failing_everywhere(info: &str, infocode: &str) -> Self {
        Self::failing_everywhere_with_status(json!("0"), info, infocode).await
    }

    /// Every path answers with `status` set to the given (non-success) value.
    pub async fn failing_everywhere_with_status(status: Value, info: &str, infocode: &str) -> Self {
        let body = json!({ "status": status, "info": info, "infocode": infocode });
        Self::start(
            [GEO_PATH, REGEO_PATH, PLACE_TEXT_PATH, DRIVING_PATH, WEATHER_PATH]
                .into_iter()
                .map(|p| (p, body.clone()))
                .collect(),
        )
        .await
    }

    pub fn hits(&self, path: &str) -> usize {
        self.state
            .hits
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .count()
    }

    pub fn total_hits(&self) -> usize {
        self.state.hits.lock().unwrap().len()
    }

    pub fn last_query(&self, path: &str) -> Option<HashMap<String, String>> {
        self.state
            .hits
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, q)| q.clone())
    }

    pub fn client(&self) -> AmapClient {
        AmapClient::new(ServerConfig::with_api_base(&self.base, Some(TEST_KEY.into()))).unwrap()
    }

    pub fn client_without_key(&self) -> AmapClient {
        AmapClient::new(ServerConfig::with_api_base(&self.base, None)).unwrap()
    }
}

async fn respond(
    State(state): State<MockState>,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let path = uri.path().to_string();
    state.hits.lock().unwrap().push((path.clone(), query));
    match state.routes.get(&path) {
        Some((status, body)) => (*status, Json(body.clone())).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/golden/fixtures")
}

/// Load `tests/golden/fixtures/<name>.json`.
pub fn fixture(name: &str) -> Value {
    let path = fixtures_root().join(format!("{name}.json"));
    let raw = std::fs::read_to_string(&path).expect("fixture missing");
    serde_json::from_str(&raw).expect("fixture is not JSON")
}

pub fn call(name: &str, arguments: Value) -> ToolCallParams {
    ToolCallParams {
        name: name.to_string(),
        arguments: Some(arguments),
    }
}

/// Parse the `{"error": {...}}` text of a failed tool result.
pub fn error_of(result: &ToolResult) -> (String, String) {
    assert!(result.is_error, "expected an error result, got: {}", result.first_text());
    let value: Value = serde_json::from_str(result.first_text()).unwrap();
    (
        value["error"]["code"].as_str().unwrap().to_string(),
        value["error"]["message"].as_str().unwrap().to_string(),
    )
}

/// Valid arguments for every registered tool.
pub fn sample_calls() -> Vec<ToolCallParams> {
    vec![
        call("maps_geo", json!({ "address": "北京市朝阳区阜通东大街6号" })),
        call("maps_regeocode", json!({ "longitude": 116.481488, "latitude": 39.990464 })),
        call("maps_text_search", json!({ "keywords": "咖啡", "city": "北京" })),
        call(
            "maps_direction_driving",
            json!({ "origin": "116.481028,39.989643", "destination": "116.434446,39.90816" }),
        ),
        call("maps_weather", json!({ "city": "北京市" })),
    ]
}
