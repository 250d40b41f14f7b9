//! MCP version negotiation during initialization.
//!
//! The server keeps no per-client state: the client's capabilities are
//! logged and then dropped.

use crate::types::{InitializeParams, InitializeResult, MCP_VERSION};

pub fn negotiate(params: &InitializeParams) -> InitializeResult {
    if params.protocol_version != MCP_VERSION {
        tracing::warn!(
            "Client requested protocol version {}, server supports {}. Proceeding with server version.",
            params.protocol_version,
            MCP_VERSION
        );
    }

    tracing::info!(
        "Initialized with client: {} v{}",
        params.client_info.name,
        params.client_info.version
    );
    tracing::debug!("Client capabilities: {:?}", params.capabilities);

    InitializeResult::default_result()
}
