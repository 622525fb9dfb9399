use serde::{Deserialize, Serialize};

use crate::amap::envelope::text;
use crate::amap::Endpoint;
use crate::error::{ToolError, ToolOutcome};
use crate::protocol::GeoParams;

/// `GET /v3/geocode/geo`: structured address → coordinates.
#[derive(Debug)]
pub struct Geocode;

#[derive(Debug, Deserialize)]
pub struct GeocodePayload {
    #[serde(default)]
    pub geocodes: Vec<GeocodeMatch>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeMatch {
    #[serde(default, deserialize_with = "text")]
    pub formatted_address: String,
    #[serde(default, deserialize_with = "text")]
    pub location: String,
    #[serde(default, deserialize_with = "text")]
    pub level: String,
    #[serde(default, deserialize_with = "text")]
    pub province: String,
    #[serde(default, deserialize_with = "text")]
    pub city: String,
    #[serde(default, deserialize_with = "text")]
    pub district: String,
    #[serde(default, deserialize_with = "text")]
    pub adcode: String,
}

/// Normalized first match.
#[derive(Debug, Serialize)]
pub struct GeocodeSummary {
    pub formatted_address: String,
    pub location: String,
    pub level: String,
    pub province: String,
    pub city: String,
    pub district: String,
    pub adcode: String,
}

impl From<GeocodeMatch> for GeocodeSummary {
    fn from(m: GeocodeMatch) -> Self {
        Self {
            formatted_address: m.formatted_address,
            location: m.location,
            level: m.level,
            province: m.province,
            city: m.city,
            district: m.district,
            adcode: m.adcode,
        }
    }
}

impl Endpoint for Geocode {
    const PATH: &'static str = "/v3/geocode/geo";
    const LABEL: &'static str = "Geocoding";

    type Params = GeoParams;
    type Payload = GeocodePayload;
    type Output = GeocodeSummary;

    fn query(params: &GeoParams) -> Vec<(&'static str, String)> {
        let mut query = vec![("address", params.address.clone())];
        if let Some(city) = params.city.as_deref().filter(|c| !c.is_empty()) {
            query.push(("city", city.to_string()));
        }
        query
    }

    fn extract(params: &GeoParams, payload: GeocodePayload) -> ToolOutcome<GeocodeSummary> {
        payload
            .geocodes
            .into_iter()
            .next()
            .map(GeocodeSummary::from)
            .ok_or_else(|| {
                ToolError::NotFound(format!("No geocoding match for address: {}", params.address))
            })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn params(address: &str, city: Option<&str>) -> GeoParams {
        GeoParams {
            address: address.into(),
            city: city.map(Into::into),
        }
    }

    #[test]
    fn empty_city_is_not_sent() {
        let query = Geocode::query(&params("阜通东大街6号", Some("")));
        assert_eq!(query, vec![("address", "阜通东大街6号".to_string())]);
    }

    #[test]
    fn first_match_wins() {
        let payload: GeocodePayload = serde_json::from_value(json!({
            "geocodes": [
                { "formatted_address": "first", "location": "1,1", "city": [] },
                { "formatted_address": "second", "location": "2,2" }
            ]
        }))
        .unwrap();
        let summary = Geocode::extract(&params("x", None), payload).unwrap();
        assert_eq!(summary.formatted_address, "first");
        assert_eq!(summary.city, "");
    }

    #[test]
    fn no_match_is_not_found() {
        let payload: GeocodePayload = serde_json::from_value(json!({ "geocodes": [] })).unwrap();
        let err = Geocode::extract(&params("nowhere", None), payload).unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }
}
