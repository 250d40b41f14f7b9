//! Error types and JSON-RPC error codes for the MCP server.

use serde_json::json;

use super::message::{JsonRpcError, RequestId};

/// Standard JSON-RPC 2.0 error codes.
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// Server-defined error codes.
pub mod mcp_error_codes {
    /// Transport: HTTP method other than POST on the MCP endpoint.
    pub const METHOD_NOT_ALLOWED: i32 = -32000;
    pub const TOOL_NOT_FOUND: i32 = -32803;
    pub const LIBRARY_NOT_FOUND: i32 = -32850;
    pub const BACKEND_ERROR: i32 = -32851;
}

/// Message of the envelope sent for decode failures and handler faults.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";

/// Message of the envelope sent for rejected HTTP methods.
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed.";

/// All errors that can occur in the MCP server.
#[derive(thiserror::Error, Debug)]
pub enum McpError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// A tool argument failed schema validation.
    #[error("Invalid params: {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    #[error("Method not allowed.")]
    MethodNotAllowed,

    #[error("Library not found: {0}")]
    LibraryNotFound(String),

    #[error("Docs backend error: {0}")]
    Backend(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        McpError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> i32 {
        use error_codes::*;
        use mcp_error_codes::*;
        match self {
            McpError::ParseError(_) | McpError::Json(_) => PARSE_ERROR,
            McpError::InvalidRequest(_) => INVALID_REQUEST,
            McpError::MethodNotFound(_) => METHOD_NOT_FOUND,
            McpError::InvalidParams(_) | McpError::Validation { .. } => INVALID_PARAMS,
            McpError::ToolNotFound(_) => TOOL_NOT_FOUND,
            McpError::MethodNotAllowed => METHOD_NOT_ALLOWED,
            McpError::LibraryNotFound(_) => LIBRARY_NOT_FOUND,
            McpError::Backend(_) => BACKEND_ERROR,
            McpError::InternalError(_)
            | McpError::DuplicateTool(_)
            | McpError::Config(_)
            | McpError::Transport(_)
            | McpError::Io(_) => INTERNAL_ERROR,
        }
    }

    pub fn to_json_rpc_error(&self, id: RequestId) -> JsonRpcError {
        let error = JsonRpcError::new(id, self.code(), self.to_string());
        match self {
            McpError::Validation { field, reason } => error.with_data(json!({
                "field": field,
                "reason": reason,
            })),
            _ => error,
        }
    }
}

impl From<library_docs::DocsError> for McpError {
    fn from(e: library_docs::DocsError) -> Self {
        match e {
            library_docs::DocsError::LibraryNotFound(name) => McpError::LibraryNotFound(name),
            library_docs::DocsError::InvalidInput(reason) => McpError::InvalidParams(reason),
            other => McpError::Backend(other.to_string()),
        }
    }
}

/// The generic envelope for faults the caller cannot act on.
///
/// The details are logged server-side, never sent.
pub fn internal_server_error() -> JsonRpcError {
    JsonRpcError::new(
        RequestId::Null,
        error_codes::INTERNAL_ERROR,
        INTERNAL_SERVER_ERROR_MESSAGE,
    )
}

pub type McpResult<T> = Result<T, McpError>;
