//! System endpoints: health check and channel status.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::broadcast::ChannelStatus;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
    /// Number of shops currently registered.
    shops: usize,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, current timestamp and shop count.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            shops: state.shop_service.shop_count().await,
        }),
    )
}

/// `GET /channels` — Registration and liveness of each broadcast channel.
#[utoipa::path(
    get,
    path = "/channels",
    tag = "System",
    summary = "Broadcast channel status",
    description = "Lists every role with its registered adapter, if any, and whether it is live.",
    responses(
        (status = 200, description = "Channel status", body = Vec<ChannelStatus>),
    )
)]
pub async fn channels_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.hub.status())
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/channels", get(channels_handler))
}
