//! HTTP surface for shard and coordinator nodes.
//!
//! # Endpoints
//!
//! Both node kinds expose the same two routes:
//!
//! - `POST /insert` - `{"id": string, "vector": [float, ...]}`
//! - `POST /search` - `{"vector": [float, ...], "top_k": int}`
//!
//! Any other method on these routes is answered with 405.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::application::insert::InsertAck;
use crate::domain::entities::search_result::SearchResult;
use crate::domain::entities::vector::Vector;
use crate::domain::error::DomainError;
use crate::domain::values::query::Query;
use crate::{CoordinatorNode, ShardNode};

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl DomainError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DomainError::BadRequest(_) => StatusCode::BAD_REQUEST,
            DomainError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            DomainError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            DomainError::ShardTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            DomainError::Internal(_) | DomainError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(error = %self, "request failed");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

async fn method_not_allowed() -> DomainError {
    DomainError::MethodNotAllowed
}

/// POST /insert on a shard
async fn shard_insert(
    State(node): State<Arc<ShardNode>>,
    body: Bytes,
) -> Result<Json<InsertAck>, DomainError> {
    let vector: Vector = serde_json::from_slice(&body)?;
    Ok(Json(node.insert(vector)?))
}

/// POST /search on a shard
async fn shard_search(
    State(node): State<Arc<ShardNode>>,
    body: Bytes,
) -> Result<Json<Vec<SearchResult>>, DomainError> {
    let query: Query = serde_json::from_slice(&body)?;
    Ok(Json(node.search(&query)?))
}

/// POST /insert on the coordinator. The owning shard's status and body are
/// relayed as-is.
async fn coordinator_insert(
    State(node): State<Arc<CoordinatorNode>>,
    body: Bytes,
) -> Result<Response, DomainError> {
    let reply = node.insert(body.to_vec()).await?;
    let status = StatusCode::from_u16(reply.status)
        .map_err(|e| DomainError::Internal(format!("Bad shard status: {e}")))?;
    Ok((
        status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
        .into_response())
}

/// POST /search on the coordinator
async fn coordinator_search(
    State(node): State<Arc<CoordinatorNode>>,
    body: Bytes,
) -> Result<Json<Vec<SearchResult>>, DomainError> {
    let query: Query = serde_json::from_slice(&body)?;
    Ok(Json(node.search(&query).await?))
}

pub fn shard_router(node: Arc<ShardNode>) -> Router {
    Router::new()
        .route("/insert", post(shard_insert).fallback(method_not_allowed))
        .route("/search", post(shard_search).fallback(method_not_allowed))
        .layer(TraceLayer::new_for_http())
        .with_state(node)
}

pub fn coordinator_router(node: Arc<CoordinatorNode>) -> Router {
    Router::new()
        .route("/insert", post(coordinator_insert).fallback(method_not_allowed))
        .route("/search", post(coordinator_search).fallback(method_not_allowed))
        .layer(TraceLayer::new_for_http())
        .with_state(node)
}

/// Binds `addr` and serves `router` until Ctrl-C.
pub async fn serve(router: Router, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
