//! Shop handlers: register, list, get, approve, reject.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{CreateShopRequest, ShopListQuery, ShopListResponse};
use crate::app_state::AppState;
use crate::domain::{Shop, ShopId};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /shops` — Register a new shop awaiting review.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] if the name is blank.
#[utoipa::path(
    post,
    path = "/api/v1/shops",
    tag = "Shops",
    summary = "Register a shop",
    description = "Creates a shop in `pending` status and broadcasts the status change.",
    request_body = CreateShopRequest,
    responses(
        (status = 201, description = "Shop registered", body = Shop),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    )
)]
pub async fn create_shop(
    State(state): State<AppState>,
    Json(req): Json<CreateShopRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let shop = state
        .shop_service
        .register_shop(req.owner_id, &req.name)
        .await?;
    Ok((StatusCode::CREATED, Json(shop)))
}

/// `GET /shops` — List shops, optionally filtered by status.
#[utoipa::path(
    get,
    path = "/api/v1/shops",
    tag = "Shops",
    summary = "List shops",
    params(ShopListQuery),
    responses(
        (status = 200, description = "Shop list", body = ShopListResponse),
    )
)]
pub async fn list_shops(
    State(state): State<AppState>,
    Query(query): Query<ShopListQuery>,
) -> impl IntoResponse {
    let shops = state.shop_service.list_shops(query.status).await;
    Json(ShopListResponse::from(shops))
}

/// `GET /shops/{id}` — Get a single shop.
///
/// # Errors
///
/// Returns [`GatewayError::ShopNotFound`] if the shop does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/shops/{id}",
    tag = "Shops",
    summary = "Get shop",
    params(
        ("id" = i64, Path, description = "Shop id"),
    ),
    responses(
        (status = 200, description = "Shop details", body = Shop),
        (status = 404, description = "Shop not found", body = ErrorResponse),
    )
)]
pub async fn get_shop(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, GatewayError> {
    let shop = state.shop_service.get_shop(ShopId::new(id)).await?;
    Ok(Json(shop))
}

/// `POST /shops/{id}/approve` — Approve a shop.
///
/// # Errors
///
/// Returns [`GatewayError::ShopNotFound`] or
/// [`GatewayError::InvalidTransition`].
#[utoipa::path(
    post,
    path = "/api/v1/shops/{id}/approve",
    tag = "Shops",
    summary = "Approve shop",
    description = "Moves the shop to `approved` and broadcasts the status change to every channel.",
    params(
        ("id" = i64, Path, description = "Shop id"),
    ),
    responses(
        (status = 200, description = "Shop approved", body = Shop),
        (status = 404, description = "Shop not found", body = ErrorResponse),
        (status = 409, description = "Shop already approved", body = ErrorResponse),
    )
)]
pub async fn approve_shop(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, GatewayError> {
    let shop = state.shop_service.approve(ShopId::new(id)).await?;
    Ok(Json(shop))
}

/// `POST /shops/{id}/reject` — Reject a shop.
///
/// # Errors
///
/// Returns [`GatewayError::ShopNotFound`] or
/// [`GatewayError::InvalidTransition`].
#[utoipa::path(
    post,
    path = "/api/v1/shops/{id}/reject",
    tag = "Shops",
    summary = "Reject shop",
    description = "Moves the shop to `rejected` and broadcasts the status change to every channel.",
    params(
        ("id" = i64, Path, description = "Shop id"),
    ),
    responses(
        (status = 200, description = "Shop rejected", body = Shop),
        (status = 404, description = "Shop not found", body = ErrorResponse),
        (status = 409, description = "Shop already rejected", body = ErrorResponse),
    )
)]
pub async fn reject_shop(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, GatewayError> {
    let shop = state.shop_service.reject(ShopId::new(id)).await?;
    Ok(Json(shop))
}

/// Shop routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shops", post(create_shop).get(list_shops))
        .route("/shops/{id}", get(get_shop))
        .route("/shops/{id}/approve", post(approve_shop))
        .route("/shops/{id}/reject", post(reject_shop))
}
