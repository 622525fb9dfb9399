//! Golden snapshots of normalized tool output.
//!
//! Fixtures under `fixtures/` are recorded provider responses; `expected/`
//! holds the exact text each tool must produce from them.

#[path = "../common/mod.rs"]
mod common;

use std::fs;
use std::path::PathBuf;

use serde_json::json;

use common::*;
use mcp_amap_server::handlers;
use mcp_amap_server::protocol::ToolCallParams;

fn expected_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden/expected")
        .join(name)
}

fn read_expected(name: &str) -> String {
    fs::read_to_string(expected_path(name))
        .expect("expected file missing")
        .trim_end()
        .to_string()
}

async fn run(mock: &MockProvider, params: ToolCallParams) -> String {
    let result = handlers::dispatch_tool_call(&params, &mock.client()).await;
    assert!(!result.is_error, "{}", result.first_text());
    result.first_text().trim_end().to_string()
}

#[tokio::test]
async fn golden_geocode() {
    let mock = MockProvider::start(vec![(GEO_PATH, fixture("geocode"))]).await;
    let actual = run(
        &mock,
        call("maps_geo", json!({ "address": "北京市朝阳区阜通东大街6号" })),
    )
    .await;
    assert_eq!(actual, read_expected("maps_geo.txt"), "maps_geo snapshot mismatch");
}

#[tokio::test]
async fn golden_direction_driving() {
    let mock = MockProvider::start(vec![(DRIVING_PATH, fixture("driving"))]).await;
    let actual = run(
        &mock,
        call(
            "maps_direction_driving",
            json!({ "origin": "116.481028,39.989643", "destination": "116.434446,39.90816" }),
        ),
    )
    .await;
    assert_eq!(
        actual,
        read_expected("maps_direction_driving.txt"),
        "maps_direction_driving snapshot mismatch"
    );
}

#[tokio::test]
async fn golden_weather_live() {
    let mock = MockProvider::start(vec![
        (GEO_PATH, fixture("geocode_city")),
        (WEATHER_PATH, fixture("weather_live")),
    ])
    .await;
    let actual = run(&mock, call("maps_weather", json!({ "city": "北京市" }))).await;
    assert_eq!(
        actual,
        read_expected("maps_weather_live.txt"),
        "maps_weather snapshot mismatch"
    );
}

#[test]
fn fixtures_are_well_formed_envelopes() {
    for entry in fs::read_dir(fixtures_root()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_stem().unwrap().to_string_lossy().to_string();
        let value = fixture(&name);
        assert_eq!(value["status"], "1", "fixture {name} should be a success envelope");
        assert!(value["info"].is_string(), "fixture {name} lacks info");
    }
}
