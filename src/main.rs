use mcp_amap_server::amap::AmapClient;
use mcp_amap_server::config::{ServerConfig, Transport};
use mcp_amap_server::http;
use mcp_amap_server::observability::init_tracing;
use mcp_amap_server::server::McpServer;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    if config.api_key.is_none() {
        tracing::warn!("AMAP_MAPS_API_KEY is not set; every tool call will report a configuration error");
    }

    let transport = config.transport;
    let bind_addr = config.bind_addr;
    let client = match AmapClient::new(config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("failed to build HTTP client: {e}");
            std::process::exit(1);
        }
    };

    let result = match transport {
        Transport::Http => http::serve(bind_addr, client).await,
        Transport::Stdio => McpServer::new(client).run().await,
    };

    if let Err(e) = result {
        tracing::error!(transport = ?transport, "server stopped: {e}");
        std::process::exit(1);
    }
}
