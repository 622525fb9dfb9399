use serde::{Deserialize, Serialize};

use crate::amap::envelope::text;
use crate::amap::Endpoint;
use crate::error::{ToolError, ToolOutcome};
use crate::protocol::DrivingParams;

/// `GET /v3/direction/driving`: route planning between two coordinates.
#[derive(Debug)]
pub struct Driving;

#[derive(Debug, Deserialize)]
pub struct DrivingPayload {
    pub route: Route,
}

#[derive(Debug, Deserialize)]
pub struct Route {
    #[serde(default, deserialize_with = "text")]
    pub origin: String,
    #[serde(default, deserialize_with = "text")]
    pub destination: String,
    #[serde(default)]
    pub paths: Vec<Path>,
}

#[derive(Debug, Deserialize)]
pub struct Path {
    #[serde(deserialize_with = "text")]
    pub distance: String,
    #[serde(deserialize_with = "text")]
    pub duration: String,
    #[serde(default, deserialize_with = "text")]
    pub tolls: String,
    #[serde(default, deserialize_with = "text")]
    pub toll_distance: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
pub struct Step {
    #[serde(default, deserialize_with = "text")]
    pub instruction: String,
    #[serde(default, deserialize_with = "text")]
    pub road: String,
    #[serde(default, deserialize_with = "text")]
    pub distance: String,
    #[serde(default, deserialize_with = "text")]
    pub duration: String,
    #[serde(default, deserialize_with = "text")]
    pub action: String,
}

#[derive(Debug, Serialize)]
pub struct DrivingSummary {
    pub origin: String,
    pub destination: String,
    pub distance: String,
    pub duration: String,
    pub tolls: String,
    pub toll_distance: String,
    pub steps: Vec<RouteStep>,
}

#[derive(Debug, Serialize)]
pub struct RouteStep {
    pub instruction: String,
    pub road: String,
    pub distance: String,
    pub duration: String,
    pub action: String,
}

impl From<Step> for RouteStep {
    fn from(step: Step) -> Self {
        Self {
            instruction: step.instruction,
            road: step.road,
            distance: step.distance,
            duration: step.duration,
            action: step.action,
        }
    }
}

impl Endpoint for Driving {
    const PATH: &'static str = "/v3/direction/driving";
    const LABEL: &'static str = "Driving route";

    type Params = DrivingParams;
    type Payload = DrivingPayload;
    type Output = DrivingSummary;

    fn query(params: &DrivingParams) -> Vec<(&'static str, String)> {
        vec![
            ("origin", params.origin.clone()),
            ("destination", params.destination.clone()),
            ("strategy", params.strategy.clone()),
            ("extensions", "base".to_string()),
        ]
    }

    /// Paths come back ranked; the first one is the recommendation.
    fn extract(params: &DrivingParams, payload: DrivingPayload) -> ToolOutcome<DrivingSummary> {
        let Route {
            origin,
            destination,
            paths,
        } = payload.route;

        let best = paths.into_iter().next().ok_or_else(|| {
            ToolError::NotFound(format!(
                "No driving route from {} to {}",
                params.origin, params.destination
            ))
        })?;

        Ok(DrivingSummary {
            origin,
            destination,
            distance: best.distance,
            duration: best.duration,
            tolls: best.tolls,
            toll_distance: best.toll_distance,
            steps: best.steps.into_iter().map(RouteStep::from).collect(),
        })
    }
}
