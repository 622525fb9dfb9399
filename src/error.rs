//! Tool-level error taxonomy.
//!
//! Every failure a tool handler can hit is a [`ToolError`]. None of them
//! escape as protocol faults: they are mapped to an `isError` tool result
//! by [`crate::handlers::into_tool_result`].

use thiserror::Error;

use crate::protocol::{McpErrorCode, McpErrorResponse};

pub type ToolOutcome<T> = Result<T, ToolError>;

#[derive(Debug, Error)]
pub enum ToolError {
    /// Provider credential is not configured.
    #[error("AMAP_MAPS_API_KEY is not configured")]
    MissingCredential,

    /// Network failure or non-2xx HTTP status from the provider.
    #[error("{endpoint} request failed: {detail}")]
    Transport { endpoint: &'static str, detail: String },

    /// Envelope `status` was not "1"; `info` is the provider's own message.
    #[error("{endpoint} failed: {info} (infocode {infocode})")]
    Provider {
        endpoint: &'static str,
        info: String,
        infocode: String,
    },

    /// Envelope did not match the expected shape.
    #[error("failed to parse {endpoint} response: {detail}")]
    Validation { endpoint: &'static str, detail: String },

    /// Arguments rejected by the tool's input schema.
    #[error("invalid arguments for {tool}: {detail}")]
    InvalidArguments { tool: String, detail: String },

    /// Provider answered successfully but had nothing for the query.
    #[error("{0}")]
    NotFound(String),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl ToolError {
    pub fn code(&self) -> McpErrorCode {
        match self {
            Self::MissingCredential => McpErrorCode::ConfigurationError,
            Self::Transport { .. } => McpErrorCode::TransportError,
            Self::Provider { .. } => McpErrorCode::ProviderError,
            Self::Validation { .. } => McpErrorCode::ValidationError,
            Self::InvalidArguments { .. } => McpErrorCode::InvalidArguments,
            Self::NotFound(_) => McpErrorCode::NotFound,
            Self::UnknownTool(_) => McpErrorCode::UnknownTool,
            Self::Unexpected(_) => McpErrorCode::InternalError,
        }
    }
}

impl From<ToolError> for McpErrorResponse {
    fn from(err: ToolError) -> Self {
        McpErrorResponse::new(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_keeps_provider_message() {
        let err = ToolError::Provider {
            endpoint: "geocode",
            info: "INVALID_USER_KEY".into(),
            infocode: "10001".into(),
        };
        let response = McpErrorResponse::from(err);
        assert_eq!(response.error.code, McpErrorCode::ProviderError);
        assert!(response.error.message.contains("INVALID_USER_KEY"));
        assert!(response.error.message.contains("10001"));
    }

    #[test]
    fn missing_credential_is_configuration_error() {
        assert_eq!(
            ToolError::MissingCredential.code(),
            McpErrorCode::ConfigurationError
        );
    }
}
