//! JSON-RPC 2.0 envelope types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC 2.0 protocol version.
pub const JSONRPC_VERSION: &str = "2.0";

/// Request identifier. JSON-RPC allows strings, integers and null; any other
/// `id` makes the whole envelope undecodable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    String(String),
    Number(i64),
    Null,
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestId::String(s) => write!(f, "{s:?}"),
            RequestId::Number(n) => write!(f, "{n}"),
            RequestId::Null => f.write_str("null"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: RequestId,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: RequestId,
    pub result: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub jsonrpc: String,
    pub id: RequestId,
    pub error: JsonRpcErrorObject,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcErrorObject {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// A message that expects no reply.
///
/// Unknown fields are rejected so that a request with an unusable `id`
/// cannot be mistaken for a notification and go unanswered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonRpcNotification {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// Any JSON-RPC message a peer may send.
///
/// Tried in declaration order: `id` + `method` is a request, `id` + `result`
/// or `error` is a reply, and `method` alone is a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonRpcMessage {
    Request(JsonRpcRequest),
    Response(JsonRpcResponse),
    Error(JsonRpcError),
    Notification(JsonRpcNotification),
}

impl JsonRpcMessage {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            JsonRpcMessage::Request(_) => "request",
            JsonRpcMessage::Response(_) => "response",
            JsonRpcMessage::Error(_) => "error response",
            JsonRpcMessage::Notification(_) => "notification",
        }
    }
}

impl JsonRpcResponse {
    pub fn new(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result,
        }
    }
}

impl JsonRpcError {
    pub fn new(id: RequestId, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            error: JsonRpcErrorObject {
                code,
                message: message.into(),
                data: None,
            },
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.error.data = Some(data);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> Result<JsonRpcMessage, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_message_kinds() {
        let cases = [
            (json!({ "jsonrpc": "2.0", "id": 1, "method": "ping" }), "request"),
            (json!({ "jsonrpc": "2.0", "id": null, "method": "ping" }), "request"),
            (json!({ "jsonrpc": "2.0", "id": 1, "result": {} }), "response"),
            (
                json!({ "jsonrpc": "2.0", "id": 1, "error": { "code": -1, "message": "x" } }),
                "error response",
            ),
            (json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }), "notification"),
        ];
        for (value, kind) in cases {
            assert_eq!(decode(value).unwrap().kind(), kind);
        }
    }

    #[test]
    fn test_unusable_id_is_not_a_notification() {
        for id in [json!(1.5), json!(true), json!({ "n": 1 }), json!([1])] {
            let msg = json!({ "jsonrpc": "2.0", "id": id, "method": "ping" });
            assert!(decode(msg).is_err(), "id {id} should not decode");
        }
    }

    #[test]
    fn test_request_id_display() {
        assert_eq!(RequestId::Number(7).to_string(), "7");
        assert_eq!(RequestId::String("abc".into()).to_string(), "\"abc\"");
        assert_eq!(RequestId::Null.to_string(), "null");
    }
}
