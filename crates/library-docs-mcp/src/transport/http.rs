//! HTTP transport — one JSON-RPC endpoint plus /health.
//!
//! `POST /mcp` is the only accepted way to submit a request. Every other
//! method on that path gets a 405 without the body being read. The server
//! is stateless: no session id is issued or expected.

use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json as AxumJson, Response},
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::protocol::ProtocolHandler;
use crate::types::{internal_server_error, McpError, McpResult, RequestId};

use super::framing;

/// Path of the JSON-RPC endpoint.
pub const MCP_PATH: &str = "/mcp";

/// Largest request body accepted on the JSON-RPC endpoint.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// HTTP transport for networked MCP clients.
pub struct HttpTransport {
    handler: Arc<ProtocolHandler>,
}

impl HttpTransport {
    pub fn new(handler: ProtocolHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    pub fn router(&self) -> Router {
        router(self.handler.clone())
    }

    /// Bind `addr` and serve until Ctrl-C or SIGTERM.
    pub async fn run(&self, addr: SocketAddr) -> McpResult<()> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(McpError::Io)?;

        tracing::info!("HTTP transport listening on {addr}");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| McpError::Transport(e.to_string()))?;

        tracing::info!("HTTP transport stopped");
        Ok(())
    }
}

/// Build the axum router around a shared protocol handler.
pub fn router(handler: Arc<ProtocolHandler>) -> Router {
    Router::new()
        .route(
            MCP_PATH,
            post(handle_request)
                .get(method_not_allowed)
                .delete(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route("/health", get(handle_health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(handler)
}

async fn handle_request(
    State(handler): State<Arc<ProtocolHandler>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    // Oversized or unreadable bodies get the same envelope as malformed ones.
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            tracing::error!("Failed to read request body: {e}");
            return internal_error_response();
        }
    };

    let msg = match framing::decode_message(&body) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::error!("Failed to decode request body: {e}");
            return internal_error_response();
        }
    };

    match handler.handle_message(msg).await {
        Some(response) => (StatusCode::OK, AxumJson(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        AxumJson(McpError::MethodNotAllowed.to_json_rpc_error(RequestId::Null)),
    )
        .into_response()
}

async fn handle_health(State(handler): State<Arc<ProtocolHandler>>) -> AxumJson<serde_json::Value> {
    AxumJson(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "tools": handler.registry().len(),
    }))
}

fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        AxumJson(internal_server_error()),
    )
        .into_response()
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Request handler panicked: {detail}");
    internal_error_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
