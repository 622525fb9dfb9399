use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::endpoint::Endpoint;
use super::envelope::Status;
use crate::config::ServerConfig;
use crate::error::{ToolError, ToolOutcome};

/// Request adapter for the provider's REST API.
///
/// Cheap to clone; the connection pool and configuration are shared.
#[derive(Clone)]
pub struct AmapClient {
    http: reqwest::Client,
    config: Arc<ServerConfig>,
}

impl std::fmt::Debug for AmapClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmapClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AmapClient {
    pub fn new(config: ServerConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("mcp-amap-server/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Issue one GET against `E::PATH` and return the validated payload.
    ///
    /// No request is sent when the credential is missing.
    pub async fn fetch<E: Endpoint>(&self, params: &E::Params) -> ToolOutcome<E::Payload> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ToolError::MissingCredential)?;

        let url = format!("{}{}", self.config.api_base, E::PATH);
        let mut query = vec![("key", key.to_string()), ("output", "JSON".to_string())];
        query.extend(E::query(params));

        debug!(endpoint = E::LABEL, path = E::PATH, "calling provider");

        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| transport::<E>(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(transport::<E>(format!("HTTP status {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| transport::<E>(e.without_url().to_string()))?;

        let value: Value = serde_json::from_slice(&body).map_err(validation::<E>)?;
        let envelope = Status::deserialize(&value).map_err(validation::<E>)?;
        if !envelope.is_ok() {
            warn!(
                endpoint = E::LABEL,
                info = %envelope.info,
                infocode = %envelope.infocode,
                "provider reported failure"
            );
            return Err(ToolError::Provider {
                endpoint: E::LABEL,
                info: envelope.info,
                infocode: envelope.infocode,
            });
        }

        serde_json::from_value::<E::Payload>(value).map_err(validation::<E>)
    }

    /// [`fetch`](Self::fetch) followed by the endpoint's extractor.
    pub async fn call<E: Endpoint>(&self, params: &E::Params) -> ToolOutcome<E::Output> {
        let payload = self.fetch::<E>(params).await?;
        E::extract(params, payload)
    }
}

fn transport<E: Endpoint>(detail: String) -> ToolError {
    ToolError::Transport {
        endpoint: E::LABEL,
        detail,
    }
}

fn validation<E: Endpoint>(err: serde_json::Error) -> ToolError {
    ToolError::Validation {
        endpoint: E::LABEL,
        detail: err.to_string(),
    }
}
