use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ToolOutcome;

/// One provider REST endpoint.
///
/// An endpoint is fully described by where it lives, how its query string
/// is built from typed parameters, and how the validated payload is reduced
/// to the normalized output. [`super::AmapClient`] does the rest.
pub trait Endpoint {
    /// Path on the provider host, e.g. `/v3/geocode/geo`.
    const PATH: &'static str;

    /// Human-readable name used in error messages and logs.
    const LABEL: &'static str;

    type Params: Send + Sync;

    /// Expected payload shape. Unknown fields are ignored.
    type Payload: DeserializeOwned;

    type Output: Serialize;

    /// Endpoint-specific query pairs. The credential and output format are
    /// added by the client.
    fn query(params: &Self::Params) -> Vec<(&'static str, String)>;

    fn extract(params: &Self::Params, payload: Self::Payload) -> ToolOutcome<Self::Output>;
}
