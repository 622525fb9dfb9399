use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request ID: a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(i64),
    Str(String),
}

/// One inbound JSON-RPC message. A missing `id` makes it a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RpcId>,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn new(id: i64, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(RpcId::Number(id)),
            method: method.into(),
            params,
        }
    }

    pub fn notification(method: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: None,
            method: method.into(),
            params: None,
        }
    }

    pub fn is_v2(&self) -> bool {
        self.jsonrpc == JSONRPC_VERSION
    }

    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InitializeParams {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: Option<String>,
    #[serde(rename = "clientInfo")]
    pub client_info: Option<ClientInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientInfo {
    pub name: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Arguments for `maps_geo`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoParams {
    pub address: String,
    #[serde(default)]
    pub city: Option<String>,
}

/// Arguments for `maps_regeocode`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegeocodeParams {
    pub longitude: f64,
    pub latitude: f64,
}

/// Arguments for `maps_text_search`.
#[derive(Debug, Clone, Deserialize)]
pub struct TextSearchParams {
    pub keywords: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub types: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_offset")]
    pub offset: u32,
}

fn default_page() -> u32 {
    1
}

fn default_offset() -> u32 {
    20
}

/// Arguments for `maps_direction_driving`.
///
/// `strategy` is one of "0".."10"; the manifest schema enforces the set.
#[derive(Debug, Clone, Deserialize)]
pub struct DrivingParams {
    pub origin: String,
    pub destination: String,
    #[serde(default = "default_strategy")]
    pub strategy: String,
}

fn default_strategy() -> String {
    "1".to_string()
}

/// Arguments for `maps_weather`.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherParams {
    pub city: String,
    #[serde(default)]
    pub extensions: WeatherExtensions,
}

/// `base` returns live conditions, `all` returns the forecast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherExtensions {
    #[default]
    Base,
    All,
}

impl WeatherExtensions {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::All => "all",
        }
    }
}
