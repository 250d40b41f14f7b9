//! Main request dispatcher — receives JSON-RPC messages, routes to handlers.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::tools::ToolRegistry;
use crate::types::*;

use super::negotiation::negotiate;
use super::validator::validate_request;

/// Dispatches incoming JSON-RPC messages to the tool registry.
///
/// Holds no per-client state; one handler serves every connection.
pub struct ProtocolHandler {
    registry: Arc<ToolRegistry>,
}

impl ProtocolHandler {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one message. Returns `None` when no response is due.
    pub async fn handle_message(&self, msg: JsonRpcMessage) -> Option<Value> {
        match msg {
            JsonRpcMessage::Request(req) => Some(self.handle_request(req).await),
            JsonRpcMessage::Notification(notif) => {
                self.handle_notification(notif);
                None
            }
            other => {
                tracing::warn!("Ignoring {} sent by client", other.kind());
                None
            }
        }
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> Value {
        let id = request.id.clone();

        let result = match validate_request(&request) {
            Ok(()) => self.dispatch_request(request).await,
            Err(e) => Err(e),
        };

        let envelope = match result {
            Ok(value) => serde_json::to_value(JsonRpcResponse::new(id, value)),
            Err(e) => {
                if e.code() == error_codes::INTERNAL_ERROR {
                    tracing::error!("Request {id} failed: {e}");
                } else {
                    tracing::debug!("Request {id} rejected: {e}");
                }
                serde_json::to_value(e.to_json_rpc_error(id))
            }
        };

        envelope.unwrap_or_else(|e| {
            tracing::error!("Failed to encode response: {e}");
            serde_json::to_value(internal_server_error()).unwrap_or_default()
        })
    }

    async fn dispatch_request(&self, request: JsonRpcRequest) -> McpResult<Value> {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request.params),
            "ping" => Ok(Value::Object(serde_json::Map::new())),

            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(request.params).await,

            _ => Err(McpError::MethodNotFound(request.method)),
        }
    }

    fn handle_notification(&self, notification: JsonRpcNotification) {
        match notification.method.as_str() {
            "notifications/initialized" | "initialized" => {
                tracing::info!("MCP handshake complete");
            }
            "notifications/cancelled" => {
                match notification
                    .params
                    .map(serde_json::from_value::<CancelledParams>)
                {
                    Some(Ok(p)) => tracing::info!(
                        "Client cancelled request {} ({})",
                        p.request_id,
                        p.reason.as_deref().unwrap_or("no reason given")
                    ),
                    _ => tracing::info!("Received cancellation notification"),
                }
            }
            _ => {
                tracing::debug!("Unknown notification: {}", notification.method);
            }
        }
    }

    fn handle_initialize(&self, params: Option<Value>) -> McpResult<Value> {
        let init_params: InitializeParams = required_params(params, "Initialize")?;
        to_result(negotiate(&init_params))
    }

    fn handle_tools_list(&self) -> McpResult<Value> {
        to_result(ToolListResult {
            tools: self.registry.list_tools(),
            next_cursor: None,
        })
    }

    async fn handle_tools_call(&self, params: Option<Value>) -> McpResult<Value> {
        let call_params: ToolCallParams = required_params(params, "Tool call")?;
        tracing::debug!("Calling tool {}", call_params.name);

        let result = self
            .registry
            .call(&call_params.name, call_params.arguments)
            .await?;

        to_result(result)
    }
}

fn required_params<T: DeserializeOwned>(params: Option<Value>, what: &str) -> McpResult<T> {
    params
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| McpError::InvalidParams(e.to_string()))?
        .ok_or_else(|| McpError::InvalidParams(format!("{what} params required")))
}

fn to_result(value: impl serde::Serialize) -> McpResult<Value> {
    serde_json::to_value(value).map_err(|e| McpError::InternalError(e.to_string()))
}
