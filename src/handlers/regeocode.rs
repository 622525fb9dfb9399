use serde::{Deserialize, Serialize};

use crate::amap::envelope::{text, Poi};
use crate::amap::Endpoint;
use crate::error::ToolOutcome;
use crate::protocol::RegeocodeParams;

/// Nearby POIs kept in the normalized output.
pub const NEARBY_POI_LIMIT: usize = 3;

/// Search radius for nearby POIs, in metres.
const POI_RADIUS_METRES: u32 = 1000;

/// `GET /v3/geocode/regeo`: coordinates → address and nearby POIs.
#[derive(Debug)]
pub struct ReverseGeocode;

#[derive(Debug, Deserialize)]
pub struct RegeocodePayload {
    pub regeocode: Regeocode,
}

#[derive(Debug, Deserialize)]
pub struct Regeocode {
    #[serde(default, deserialize_with = "text")]
    pub formatted_address: String,
    #[serde(rename = "addressComponent")]
    pub address_component: AddressComponent,
    #[serde(default)]
    pub pois: Vec<Poi>,
}

#[derive(Debug, Deserialize)]
pub struct AddressComponent {
    #[serde(default, deserialize_with = "text")]
    pub country: String,
    #[serde(default, deserialize_with = "text")]
    pub province: String,
    #[serde(default, deserialize_with = "text")]
    pub city: String,
    #[serde(default, deserialize_with = "text")]
    pub district: String,
    #[serde(default, deserialize_with = "text")]
    pub township: String,
}

#[derive(Debug, Serialize)]
pub struct RegeocodeSummary {
    pub formatted_address: String,
    pub country: String,
    pub province: String,
    pub city: String,
    pub district: String,
    pub township: String,
    pub pois: Vec<NearbyPoi>,
}

#[derive(Debug, Serialize)]
pub struct NearbyPoi {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub address: String,
    pub location: String,
    pub distance: String,
}

impl From<Poi> for NearbyPoi {
    fn from(poi: Poi) -> Self {
        Self {
            name: poi.name,
            kind: poi.kind,
            address: poi.address,
            location: poi.location,
            distance: poi.distance,
        }
    }
}

/// Provider expects `longitude,latitude`.
pub fn format_location(longitude: f64, latitude: f64) -> String {
    format!("{longitude},{latitude}")
}

impl Endpoint for ReverseGeocode {
    const PATH: &'static str = "/v3/geocode/regeo";
    const LABEL: &'static str = "Reverse geocoding";

    type Params = RegeocodeParams;
    type Payload = RegeocodePayload;
    type Output = RegeocodeSummary;

    fn query(params: &RegeocodeParams) -> Vec<(&'static str, String)> {
        vec![
            ("location", format_location(params.longitude, params.latitude)),
            ("extensions", "all".to_string()),
            ("radius", POI_RADIUS_METRES.to_string()),
        ]
    }

    fn extract(_: &RegeocodeParams, payload: RegeocodePayload) -> ToolOutcome<RegeocodeSummary> {
        let Regeocode {
            formatted_address,
            address_component: component,
            pois,
        } = payload.regeocode;

        Ok(RegeocodeSummary {
            formatted_address,
            country: component.country,
            province: component.province,
            city: component.city,
            district: component.district,
            township: component.township,
            pois: pois
                .into_iter()
                .take(NEARBY_POI_LIMIT)
                .map(NearbyPoi::from)
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn location_is_longitude_first() {
        assert_eq!(format_location(116.481488, 39.990464), "116.481488,39.990464");
    }

    #[test]
    fn missing_address_component_fails_validation() {
        let parsed = serde_json::from_value::<RegeocodePayload>(json!({
            "regeocode": { "formatted_address": "x" }
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn pois_are_capped() {
        let pois: Vec<_> = (0..5)
            .map(|i| json!({ "name": format!("poi-{i}"), "distance": "10" }))
            .collect();
        let payload: RegeocodePayload = serde_json::from_value(json!({
            "regeocode": {
                "formatted_address": "北京市朝阳区望京街道",
                "addressComponent": { "province": "北京市", "city": [], "township": "望京街道" },
                "pois": pois
            }
        }))
        .unwrap();

        let params = RegeocodeParams {
            longitude: 116.48,
            latitude: 39.99,
        };
        let summary = ReverseGeocode::extract(&params, payload).unwrap();
        assert_eq!(summary.pois.len(), NEARBY_POI_LIMIT);
        assert_eq!(summary.pois[2].name, "poi-2");
        assert_eq!(summary.city, "");
    }
}
