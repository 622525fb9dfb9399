//! stdio transport: one JSON-RPC message per line in, one response per line
//! out. Logging stays on stderr so stdout carries protocol traffic only.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::amap::AmapClient;
use crate::handlers;
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// Largest accepted message, on either transport.
pub const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

#[derive(Debug)]
pub struct McpServer {
    client: AmapClient,
    initialized: bool,
}

impl McpServer {
    pub fn new(client: AmapClient) -> Self {
        Self {
            client,
            initialized: false,
        }
    }

    pub async fn run(&mut self) -> std::io::Result<()> {
        info!("serving MCP over stdio");
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Process `input` until EOF.
    ///
    /// At most `MAX_MESSAGE_BYTES + 1` bytes of a line are buffered; the rest
    /// of an oversized line is skipped and answered with a parse error.
    pub async fn serve<R, W>(&mut self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut reader = BufReader::new(input);
        let mut line = Vec::new();

        loop {
            line.clear();
            let n = (&mut reader)
                .take(MAX_MESSAGE_BYTES as u64 + 1)
                .read_until(b'\n', &mut line)
                .await?;
            if n == 0 {
                return Ok(());
            }

            let response = if line.len() > MAX_MESSAGE_BYTES {
                if line.last() != Some(&b'\n') {
                    skip_rest_of_line(&mut reader).await?;
                }
                warn!(limit = MAX_MESSAGE_BYTES, "message too large");
                Some(JsonRpcResponse::error(None, JsonRpcError::parse_error()))
            } else {
                self.handle_line(&line).await
            };

            if let Some(response) = response {
                write_line(&mut output, &response).await?;
            }
        }
    }

    async fn handle_line(&mut self, line: &[u8]) -> Option<JsonRpcResponse> {
        let Ok(text) = std::str::from_utf8(line) else {
            warn!("message is not utf-8");
            return Some(JsonRpcResponse::error(None, JsonRpcError::parse_error()));
        };
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let req: JsonRpcRequest = match serde_json::from_str(text) {
            Ok(req) => req,
            Err(e) => {
                warn!(error = %e, "parse error");
                return Some(JsonRpcResponse::error(None, JsonRpcError::parse_error()));
            }
        };

        if !req.is_v2() {
            return Some(JsonRpcResponse::error(req.id, JsonRpcError::invalid_request()));
        }

        let is_initialize = req.method == "initialize";
        if !self.initialized && !is_initialize {
            debug!(method = %req.method, "rejected before initialize");
            if req.is_notification() {
                return None;
            }
            return Some(JsonRpcResponse::error(
                req.id,
                JsonRpcError::invalid_request_with("Server not initialized"),
            ));
        }

        let response = handlers::dispatch(&req, &self.client).await;
        if is_initialize && response.is_some() {
            self.initialized = true;
        }
        response
    }
}

/// Consume bytes up to and including the next newline, or to EOF.
async fn skip_rest_of_line<R>(reader: &mut R) -> std::io::Result<()>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    loop {
        let buf = reader.fill_buf().await?;
        if buf.is_empty() {
            return Ok(());
        }
        match buf.iter().position(|&b| b == b'\n') {
            Some(end) => {
                reader.consume(end + 1);
                return Ok(());
            }
            None => {
                let len = buf.len();
                reader.consume(len);
            }
        }
    }
}

async fn write_line<W: AsyncWrite + Unpin>(
    output: &mut W,
    response: &JsonRpcResponse,
) -> std::io::Result<()> {
    let mut bytes = serde_json::to_vec(response)?;
    bytes.push(b'\n');
    output.write_all(&bytes).await?;
    output.flush().await
}
