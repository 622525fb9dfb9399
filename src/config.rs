use std::net::SocketAddr;

/// Default provider host.
pub const DEFAULT_API_BASE: &str = "https://restapi.amap.com";

/// Default bind address for the HTTP transport.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("AMAP_MCP_BIND must be a socket address, got {0:?}")]
    InvalidBindAddr(String),
    #[error("AMAP_MCP_TRANSPORT must be `http` or `stdio`, got {0:?}")]
    InvalidTransport(String),
    #[error("AMAP_API_BASE must be an http(s) URL, got {0:?}")]
    InvalidApiBase(String),
}

/// Which surface the binary serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Http,
    Stdio,
}

/// Server configuration loaded from environment variables.
///
/// Read once at startup and shared read-only with every tool invocation.
#[derive(Clone)]
pub struct ServerConfig {
    /// Provider credential. Absence is reported per tool call, not at startup.
    pub api_key: Option<String>,
    pub api_base: String,
    pub bind_addr: SocketAddr,
    pub transport: Transport,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("bind_addr", &self.bind_addr)
            .field("transport", &self.transport)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment.
    ///
    /// - `AMAP_MAPS_API_KEY` (optional, provider credential)
    /// - `AMAP_API_BASE` (optional, default `https://restapi.amap.com`)
    /// - `AMAP_MCP_BIND` (optional, default `127.0.0.1:8787`)
    /// - `AMAP_MCP_TRANSPORT` (optional, `http` or `stdio`, default `http`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("AMAP_MAPS_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let api_base = match std::env::var("AMAP_API_BASE") {
            Ok(val) => parse_api_base(&val)?,
            Err(_) => DEFAULT_API_BASE.to_string(),
        };

        let bind_raw =
            std::env::var("AMAP_MCP_BIND").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_raw.clone()))?;

        let transport = match std::env::var("AMAP_MCP_TRANSPORT") {
            Ok(val) => parse_transport(&val)?,
            Err(_) => Transport::Http,
        };

        Ok(Self {
            api_key,
            api_base,
            bind_addr,
            transport,
        })
    }

    /// Configuration pointing at an arbitrary provider host, used by embedders and tests.
    pub fn with_api_base(api_base: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            api_key,
            api_base: api_base.into(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            transport: Transport::Http,
        }
    }
}

fn parse_api_base(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidApiBase(raw.to_string()))
    }
}

fn parse_transport(raw: &str) -> Result<Transport, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "http" => Ok(Transport::Http),
        "stdio" => Ok(Transport::Stdio),
        _ => Err(ConfigError::InvalidTransport(raw.to_string())),
    }
}
