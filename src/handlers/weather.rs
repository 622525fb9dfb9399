//! `maps_weather`: the one tool that needs two provider calls.
//!
//! The weather endpoint only accepts an adcode, so the city name is first
//! geocoded. The second call depends on the first and is never issued when
//! the city cannot be resolved.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::geocode::Geocode;
use crate::amap::envelope::text;
use crate::amap::{AmapClient, Endpoint};
use crate::error::{ToolError, ToolOutcome};
use crate::protocol::{GeoParams, WeatherExtensions, WeatherParams};

/// `GET /v3/weather/weatherInfo`.
#[derive(Debug)]
pub struct WeatherInfo;

#[derive(Debug, Clone)]
pub struct WeatherQuery {
    pub adcode: String,
    pub extensions: WeatherExtensions,
}

#[derive(Debug, Deserialize)]
pub struct WeatherPayload {
    #[serde(default)]
    pub lives: Vec<LiveRecord>,
    #[serde(default)]
    pub forecasts: Vec<ForecastRecord>,
}

#[derive(Debug, Deserialize)]
pub struct LiveRecord {
    #[serde(default, deserialize_with = "text")]
    pub province: String,
    #[serde(default, deserialize_with = "text")]
    pub city: String,
    #[serde(default, deserialize_with = "text")]
    pub adcode: String,
    #[serde(default, deserialize_with = "text")]
    pub weather: String,
    #[serde(default, deserialize_with = "text")]
    pub temperature: String,
    #[serde(default, deserialize_with = "text")]
    pub winddirection: String,
    #[serde(default, deserialize_with = "text")]
    pub windpower: String,
    #[serde(default, deserialize_with = "text")]
    pub humidity: String,
    #[serde(default, deserialize_with = "text")]
    pub reporttime: String,
}

#[derive(Debug, Deserialize)]
pub struct ForecastRecord {
    #[serde(default, deserialize_with = "text")]
    pub province: String,
    #[serde(default, deserialize_with = "text")]
    pub city: String,
    #[serde(default, deserialize_with = "text")]
    pub adcode: String,
    #[serde(default, deserialize_with = "text")]
    pub reporttime: String,
    #[serde(default)]
    pub casts: Vec<Cast>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Cast {
    #[serde(default, deserialize_with = "text")]
    pub date: String,
    #[serde(default, deserialize_with = "text")]
    pub week: String,
    #[serde(default, deserialize_with = "text")]
    pub dayweather: String,
    #[serde(default, deserialize_with = "text")]
    pub nightweather: String,
    #[serde(default, deserialize_with = "text")]
    pub daytemp: String,
    #[serde(default, deserialize_with = "text")]
    pub nighttemp: String,
    #[serde(default, deserialize_with = "text")]
    pub daywind: String,
    #[serde(default, deserialize_with = "text")]
    pub nightwind: String,
    #[serde(default, deserialize_with = "text")]
    pub daypower: String,
    #[serde(default, deserialize_with = "text")]
    pub nightpower: String,
}

/// Either the live record or the forecast, depending on `extensions`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WeatherReport {
    Live(LiveWeather),
    Forecast(ForecastWeather),
}

#[derive(Debug, Serialize)]
pub struct LiveWeather {
    pub province: String,
    pub city: String,
    pub adcode: String,
    pub weather: String,
    pub temperature: String,
    pub wind_direction: String,
    pub wind_power: String,
    pub humidity: String,
    pub report_time: String,
}

#[derive(Debug, Serialize)]
pub struct ForecastWeather {
    pub province: String,
    pub city: String,
    pub adcode: String,
    pub report_time: String,
    pub casts: Vec<Cast>,
}

impl From<LiveRecord> for LiveWeather {
    fn from(r: LiveRecord) -> Self {
        Self {
            province: r.province,
            city: r.city,
            adcode: r.adcode,
            weather: r.weather,
            temperature: r.temperature,
            wind_direction: r.winddirection,
            wind_power: r.windpower,
            humidity: r.humidity,
            report_time: r.reporttime,
        }
    }
}

impl From<ForecastRecord> for ForecastWeather {
    fn from(r: ForecastRecord) -> Self {
        Self {
            province: r.province,
            city: r.city,
            adcode: r.adcode,
            report_time: r.reporttime,
            casts: r.casts,
        }
    }
}

impl Endpoint for WeatherInfo {
    const PATH: &'static str = "/v3/weather/weatherInfo";
    const LABEL: &'static str = "Weather";

    type Params = WeatherQuery;
    type Payload = WeatherPayload;
    type Output = WeatherReport;

    fn query(params: &WeatherQuery) -> Vec<(&'static str, String)> {
        vec![
            ("city", params.adcode.clone()),
            ("extensions", params.extensions.as_str().to_string()),
        ]
    }

    fn extract(params: &WeatherQuery, payload: WeatherPayload) -> ToolOutcome<WeatherReport> {
        let report = match params.extensions {
            WeatherExtensions::Base => payload
                .lives
                .into_iter()
                .next()
                .map(|r| WeatherReport::Live(r.into())),
            WeatherExtensions::All => payload
                .forecasts
                .into_iter()
                .next()
                .map(|r| WeatherReport::Forecast(r.into())),
        };
        report.ok_or_else(|| {
            ToolError::NotFound(format!("No weather data for adcode {}", params.adcode))
        })
    }
}

/// Resolve the city to an adcode, then query the weather endpoint.
pub async fn handle(params: WeatherParams, client: &AmapClient) -> ToolOutcome<WeatherReport> {
    let located = client
        .fetch::<Geocode>(&GeoParams {
            address: params.city.clone(),
            city: None,
        })
        .await?;

    let adcode = located
        .geocodes
        .into_iter()
        .next()
        .map(|m| m.adcode)
        .filter(|code| !code.is_empty())
        .ok_or_else(|| ToolError::NotFound(format!("City not found: {}", params.city)))?;

    debug!(city = %params.city, %adcode, "resolved weather adcode");

    client
        .call::<WeatherInfo>(&WeatherQuery {
            adcode,
            extensions: params.extensions,
        })
        .await
}
