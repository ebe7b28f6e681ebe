//! HTTP transport
//!
//! Routes: `POST /` (JSON-RPC), `GET /` (server info), `GET /health`
//! (liveness).

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::{self, Config};
use crate::error::{Result, TransportError};
use crate::mcp::server::McpServer;

/// Shared state threaded through all handlers
#[derive(Clone)]
pub struct AppState {
    pub server: Arc<McpServer>,
}

/// Build the router with all routes
pub fn build_router(server: Arc<McpServer>) -> Router {
    Router::new()
        .route("/", get(handle_root).post(handle_jsonrpc))
        .route("/health", get(handle_health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { server })
}

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(config: &Config, server: Arc<McpServer>) -> Result<()> {
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| TransportError::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!(
        addr = %addr,
        tools = ?server.registry().names(),
        features = ?server.features().names(),
        "MCP server ready at {}",
        config.base_url()
    );

    axum::serve(listener, build_router(server))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TransportError::Serve {
            message: e.to_string(),
        })?;

    tracing::info!("MCP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

async fn handle_jsonrpc(State(state): State<AppState>, body: Bytes) -> Response {
    match state.server.handle_bytes(&body) {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    let info = state.server.info();
    let registry = state.server.registry();
    let features = state.server.features();

    Json(json!({
        "status": "healthy",
        "version": info.version,
        "server": info.name,
        "protocol": config::server::PROTOCOL,
        "tools_count": registry.len(),
        "tools": registry.names(),
        "features_count": features.len(),
        "features": features.names(),
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

async fn handle_root(State(state): State<AppState>) -> impl IntoResponse {
    let info = state.server.info();

    Json(json!({
        "name": info.name,
        "version": info.version,
        "protocol": format!("{} over HTTP", config::server::PROTOCOL),
        "description": "MCP tool server",
        "endpoints": {
            "jsonrpc": "POST /",
            "health": "GET /health",
        },
        "tools": state.server.registry().names(),
        "features": state.server.features().names(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::features::FeatureRegistry;
    use crate::tools::ToolRegistry;

    fn router() -> Router {
        let registry = ToolRegistry::with_builtin_tools().unwrap();
        let features = FeatureRegistry::with_builtin_features().unwrap();
        let server = McpServer::new(Arc::new(registry)).with_features(Arc::new(features));
        build_router(Arc::new(server))
    }

    #[tokio::test]
    async fn test_root_lists_tools() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let resp = router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(resp.into_body(), 8192).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body["tools"],
            json!(["add", "find_component", "fetch_root_path"])
        );
        assert_eq!(body["features"], json!(["FailsafeDocGen", "TestReportReviewer"]));
        assert_eq!(body["endpoints"]["jsonrpc"], "POST /");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let req = Request::builder().uri("/nope").body(Body::empty()).unwrap();
        let resp = router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
