//! Decoding inbound JSON-RPC bodies and framing newline-delimited output.

use crate::types::{JsonRpcMessage, McpError, McpResult};

/// Decode one JSON-RPC message from raw bytes.
pub fn decode_message(bytes: &[u8]) -> McpResult<JsonRpcMessage> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(McpError::ParseError("Empty message".to_string()));
    }

    serde_json::from_slice(bytes).map_err(|e| McpError::ParseError(e.to_string()))
}

/// Serialize a value to a JSON line (with trailing newline).
pub fn frame_message(value: &serde_json::Value) -> McpResult<String> {
    let mut json = serde_json::to_string(value).map_err(McpError::Json)?;
    json.push('\n');
    Ok(json)
}
