//! Stdio transport — reads JSON-RPC from stdin, writes to stdout.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::protocol::ProtocolHandler;
use crate::types::{internal_server_error, McpError, McpResult};

use super::framing;

/// Stdio transport for desktop MCP clients.
pub struct StdioTransport {
    handler: ProtocolHandler,
}

impl StdioTransport {
    pub fn new(handler: ProtocolHandler) -> Self {
        Self { handler }
    }

    /// Run the transport loop until stdin closes.
    pub async fn run(&self) -> McpResult<()> {
        tracing::info!("Stdio transport started");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Answer newline-delimited messages from `reader` on `writer` until EOF.
    ///
    /// Lines are read as raw bytes: invalid UTF-8 is a decode failure for
    /// that line, not an I/O error for the loop.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> McpResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = Vec::new();

        loop {
            line.clear();
            let bytes_read = reader
                .read_until(b'\n', &mut line)
                .await
                .map_err(McpError::Io)?;

            if bytes_read == 0 {
                tracing::info!("EOF on stdin, shutting down");
                break;
            }

            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let response = match framing::decode_message(&line) {
                Ok(msg) => self.handler.handle_message(msg).await,
                Err(e) => {
                    tracing::error!("Failed to decode message: {e}");
                    Some(serde_json::to_value(internal_server_error())?)
                }
            };

            if let Some(response) = response {
                let framed = framing::frame_message(&response)?;
                writer
                    .write_all(framed.as_bytes())
                    .await
                    .map_err(McpError::Io)?;
                writer.flush().await.map_err(McpError::Io)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolRegistry;
    use serde_json::Value;
    use std::sync::Arc;

    fn transport() -> StdioTransport {
        let backend = Arc::new(library_docs::PlaceholderBackend::new());
        let registry = ToolRegistry::with_builtin_tools(backend).unwrap();
        StdioTransport::new(ProtocolHandler::new(registry))
    }

    async fn exchange(input: &[u8]) -> Vec<Value> {
        let mut output = Vec::new();
        transport().serve(input, &mut output).await.unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_request_and_notification() {
        let input = b"{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n\
                      \n\
                      {\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n";
        let responses = exchange(input).await;
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[0]["result"], serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_keeps_serving() {
        let input = b"\xff\xfe{\"jsonrpc\"}\n{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n";
        let responses = exchange(input).await;
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["error"]["code"], -32603);
        assert_eq!(responses[0]["error"]["message"], "Internal server error");
        assert!(responses[0]["id"].is_null());
        assert_eq!(responses[1]["id"], 2);
    }

    #[tokio::test]
    async fn test_last_line_without_newline() {
        let responses = exchange(b"{\"jsonrpc\":\"2.0\",\"id\":3,\"method\":\"ping\"}").await;
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["id"], 3);
    }
}
