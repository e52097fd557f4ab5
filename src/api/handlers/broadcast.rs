//! Manual broadcast endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::BroadcastRequest;
use crate::app_state::AppState;
use crate::broadcast::BroadcastReport;

/// `POST /broadcast` — Send a bare topic to every registered channel.
///
/// Always answers `202 Accepted`; per-channel failures only show up in the
/// returned report.
#[utoipa::path(
    post,
    path = "/api/v1/broadcast",
    tag = "Broadcast",
    summary = "Broadcast a topic",
    request_body = BroadcastRequest,
    responses(
        (status = 202, description = "Broadcast attempted", body = BroadcastReport),
    )
)]
pub async fn broadcast_topic(
    State(state): State<AppState>,
    Json(req): Json<BroadcastRequest>,
) -> impl IntoResponse {
    let report = state.shop_service.announce(req.topic).await;
    (StatusCode::ACCEPTED, Json(report))
}

/// Broadcast routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/broadcast", post(broadcast_topic))
}
