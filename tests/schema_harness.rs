use serde_json::json;

use mcp_amap_server::schema::validate;
use mcp_amap_server::tools;

#[test]
fn every_manifest_schema_compiles() {
    for tool in tools::registry() {
        // An empty object either passes or fails validation; a schema that
        // does not compile surfaces as SchemaCompile.
        match validate(&tool.input_schema, &json!({})) {
            Ok(()) | Err(mcp_amap_server::schema::SchemaValidationError::Invalid(_)) => {}
            Err(e) => panic!("schema for {} does not compile: {e}", tool.name),
        }
    }
}

#[test]
fn sample_arguments_satisfy_their_schemas() {
    let samples = [
        ("maps_geo", json!({ "address": "北京市朝阳区阜通东大街6号", "city": "北京" })),
        ("maps_regeocode", json!({ "longitude": 116.481488, "latitude": 39.990464 })),
        ("maps_text_search", json!({ "keywords": "咖啡", "page": 1, "offset": 25 })),
        (
            "maps_direction_driving",
            json!({ "origin": "116.48,39.98", "destination": "116.43,39.90", "strategy": "10" }),
        ),
        ("maps_weather", json!({ "city": "北京市", "extensions": "all" })),
    ];

    for (name, args) in samples {
        let tool = tools::find(name).unwrap();
        validate(&tool.input_schema, &args)
            .unwrap_or_else(|e| panic!("{name} rejected valid arguments: {e}"));
    }
}

#[test]
fn enumerated_fields_reject_values_outside_the_set() {
    let driving = tools::find("maps_direction_driving").unwrap();
    let err = validate(
        &driving.input_schema,
        &json!({ "origin": "1,1", "destination": "2,2", "strategy": "11" }),
    )
    .unwrap_err();
    assert!(err.to_string().contains("11"), "got: {err}");

    let weather = tools::find("maps_weather").unwrap();
    assert!(validate(
        &weather.input_schema,
        &json!({ "city": "北京市", "extensions": "hourly" })
    )
    .is_err());
}

#[test]
fn empty_required_strings_are_rejected() {
    let geo = tools::find("maps_geo").unwrap();
    assert!(validate(&geo.input_schema, &json!({ "address": "" })).is_err());
}
