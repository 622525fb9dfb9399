use serde::{Deserialize, Serialize};

use crate::amap::envelope::{text, Poi};
use crate::amap::Endpoint;
use crate::error::ToolOutcome;
use crate::protocol::TextSearchParams;

/// `GET /v3/place/text`: keyword POI search.
#[derive(Debug)]
pub struct TextSearch;

#[derive(Debug, Deserialize)]
pub struct TextSearchPayload {
    #[serde(default, deserialize_with = "text")]
    pub count: String,
    #[serde(default)]
    pub suggestion: Suggestion,
    #[serde(default)]
    pub pois: Vec<Poi>,
}

/// Provider hint for refining a search that matched poorly.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Suggestion {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub cities: Vec<SuggestedCity>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SuggestedCity {
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub num: String,
    #[serde(default, deserialize_with = "text")]
    pub adcode: String,
}

#[derive(Debug, Serialize)]
pub struct TextSearchSummary {
    pub count: String,
    pub suggestion: Suggestion,
    pub pois: Vec<PoiSummary>,
}

#[derive(Debug, Serialize)]
pub struct PoiSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub address: String,
    pub location: String,
    pub tel: String,
    pub distance: String,
    pub business_area: String,
}

impl From<Poi> for PoiSummary {
    fn from(poi: Poi) -> Self {
        Self {
            name: poi.name,
            kind: poi.kind,
            address: poi.address,
            location: poi.location,
            tel: poi.tel,
            distance: poi.distance,
            business_area: poi.business_area,
        }
    }
}

impl Endpoint for TextSearch {
    const PATH: &'static str = "/v3/place/text";
    const LABEL: &'static str = "Place search";

    type Params = TextSearchParams;
    type Payload = TextSearchPayload;
    type Output = TextSearchSummary;

    fn query(params: &TextSearchParams) -> Vec<(&'static str, String)> {
        let mut query = vec![("keywords", params.keywords.clone())];
        if let Some(city) = params.city.as_deref().filter(|c| !c.is_empty()) {
            query.push(("city", city.to_string()));
        }
        if let Some(types) = params.types.as_deref().filter(|t| !t.is_empty()) {
            query.push(("types", types.to_string()));
        }
        query.push(("page", params.page.to_string()));
        query.push(("offset", params.offset.to_string()));
        query.push(("extensions", "all".to_string()));
        query
    }

    fn extract(_: &TextSearchParams, payload: TextSearchPayload) -> ToolOutcome<TextSearchSummary> {
        Ok(TextSearchSummary {
            count: payload.count,
            suggestion: payload.suggestion,
            pois: payload.pois.into_iter().map(PoiSummary::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn optional_filters_are_only_sent_when_present() {
        let params: TextSearchParams =
            serde_json::from_value(json!({ "keywords": "咖啡" })).unwrap();
        let keys: Vec<&str> = TextSearch::query(&params).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["keywords", "page", "offset", "extensions"]);
    }

    #[test]
    fn pagination_defaults_apply() {
        let params: TextSearchParams =
            serde_json::from_value(json!({ "keywords": "咖啡", "city": "北京" })).unwrap();
        let query = TextSearch::query(&params);
        assert!(query.contains(&("page", "1".to_string())));
        assert!(query.contains(&("offset", "20".to_string())));
        assert!(query.contains(&("city", "北京".to_string())));
    }

    #[test]
    fn full_poi_list_is_kept() {
        let pois: Vec<_> = (0..7).map(|i| json!({ "name": format!("shop-{i}"), "tel": [] })).collect();
        let payload: TextSearchPayload = serde_json::from_value(json!({
            "count": "7",
            "suggestion": { "keywords": [], "cities": [] },
            "pois": pois
        }))
        .unwrap();
        let params: TextSearchParams = serde_json::from_value(json!({ "keywords": "shop" })).unwrap();
        let summary = TextSearch::extract(&params, payload).unwrap();
        assert_eq!(summary.count, "7");
        assert_eq!(summary.pois.len(), 7);
        assert_eq!(summary.pois[0].tel, "");
    }
}
