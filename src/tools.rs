//! Tool registry: the static manifest served by `tools/list` and `GET /mcp`.

use std::sync::OnceLock;

use serde::Serialize;
use serde_json::{json, Value};

pub const GEO: &str = "maps_geo";
pub const REGEOCODE: &str = "maps_regeocode";
pub const TEXT_SEARCH: &str = "maps_text_search";
pub const DIRECTION_DRIVING: &str = "maps_direction_driving";
pub const WEATHER: &str = "maps_weather";

/// `"longitude,latitude"` in decimal degrees.
const COORDINATE_PATTERN: &str = r"^-?\d+(\.\d+)?,-?\d+(\.\d+)?$";

/// Selects the handler a tool call is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Geo,
    Regeocode,
    TextSearch,
    DirectionDriving,
    Weather,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
    #[serde(skip)]
    pub kind: ToolKind,
}

static REGISTRY: OnceLock<Vec<ToolDefinition>> = OnceLock::new();

/// All registered tools, in manifest order.
pub fn registry() -> &'static [ToolDefinition] {
    REGISTRY.get_or_init(build_registry)
}

pub fn find(name: &str) -> Option<&'static ToolDefinition> {
    registry().iter().find(|tool| tool.name == name)
}

/// The `{"tools": [...]}` document.
pub fn manifest() -> Value {
    json!({ "tools": registry() })
}

fn build_registry() -> Vec<ToolDefinition> {
    let strategies: Vec<String> = (0..=10).map(|n| n.to_string()).collect();

    vec![
        ToolDefinition {
            name: GEO,
            description: "Convert a structured address into coordinates, returning the best match's formatted address, location and administrative division",
            input_schema: json!({
                "type": "object",
                "required": ["address"],
                "properties": {
                    "address": {
                        "type": "string",
                        "minLength": 1,
                        "description": "Structured address, e.g. 北京市朝阳区阜通东大街6号"
                    },
                    "city": {
                        "type": "string",
                        "description": "City name, citycode or adcode to narrow the search"
                    }
                }
            }),
            kind: ToolKind::Geo,
        },
        ToolDefinition {
            name: REGEOCODE,
            description: "Convert a longitude/latitude pair into an address and the nearest points of interest",
            input_schema: json!({
                "type": "object",
                "required": ["longitude", "latitude"],
                "properties": {
                    "longitude": {
                        "type": "number",
                        "minimum": -180,
                        "maximum": 180,
                        "description": "Longitude in GCJ-02"
                    },
                    "latitude": {
                        "type": "number",
                        "minimum": -90,
                        "maximum": 90,
                        "description": "Latitude in GCJ-02"
                    }
                }
            }),
            kind: ToolKind::Regeocode,
        },
        ToolDefinition {
            name: TEXT_SEARCH,
            description: "Search points of interest by keyword, optionally restricted to a city and POI types",
            input_schema: json!({
                "type": "object",
                "required": ["keywords"],
                "properties": {
                    "keywords": {
                        "type": "string",
                        "minLength": 1,
                        "description": "Search keywords"
                    },
                    "city": {
                        "type": "string",
                        "description": "City name, citycode or adcode"
                    },
                    "types": {
                        "type": "string",
                        "description": "POI type codes or names, separated by |"
                    },
                    "page": {
                        "type": "integer",
                        "minimum": 1,
                        "default": 1,
                        "description": "Page number"
                    },
                    "offset": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": 25,
                        "default": 20,
                        "description": "Results per page"
                    }
                }
            }),
            kind: ToolKind::TextSearch,
        },
        ToolDefinition {
            name: DIRECTION_DRIVING,
            description: "Plan a driving route between two coordinates and return the best path with turn-by-turn steps",
            input_schema: json!({
                "type": "object",
                "required": ["origin", "destination"],
                "properties": {
                    "origin": {
                        "type": "string",
                        "pattern": COORDINATE_PATTERN,
                        "description": "Origin as \"longitude,latitude\""
                    },
                    "destination": {
                        "type": "string",
                        "pattern": COORDINATE_PATTERN,
                        "description": "Destination as \"longitude,latitude\""
                    },
                    "strategy": {
                        "type": "string",
                        "enum": strategies,
                        "default": "1",
                        "description": "Route strategy: 0 fastest, 1 cheapest, 2 shortest, 3 avoid expressways, 4 avoid congestion, 5-10 combined preferences"
                    }
                }
            }),
            kind: ToolKind::DirectionDriving,
        },
        ToolDefinition {
            name: WEATHER,
            description: "Look up live weather conditions or the forecast for a city",
            input_schema: json!({
                "type": "object",
                "required": ["city"],
                "properties": {
                    "city": {
                        "type": "string",
                        "minLength": 1,
                        "description": "City name, e.g. 北京市"
                    },
                    "extensions": {
                        "type": "string",
                        "enum": ["base", "all"],
                        "default": "base",
                        "description": "base: live conditions, all: forecast"
                    }
                }
            }),
            kind: ToolKind::Weather,
        },
    ]
}
