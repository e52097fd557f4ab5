//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Resource endpoints are mounted under `/api/v1`; health, channel status
//! and the WebSocket upgrades live at the root.

pub mod dto;
pub mod handlers;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::transport::message_channel::{seller_ws_handler, user_ws_handler};

/// OpenAPI document covering every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "canteen-gateway", description = "Campus food-ordering gateway"),
    paths(
        handlers::shop::create_shop,
        handlers::shop::list_shops,
        handlers::shop::get_shop,
        handlers::shop::approve_shop,
        handlers::shop::reject_shop,
        handlers::broadcast::broadcast_topic,
        handlers::system::health_handler,
        handlers::system::channels_handler,
    ),
    components(schemas(
        dto::CreateShopRequest,
        dto::ShopListResponse,
        dto::BroadcastRequest,
        crate::domain::Shop,
        crate::domain::ShopId,
        crate::domain::ShopStatus,
        crate::broadcast::Role,
        crate::broadcast::BroadcastReport,
        crate::broadcast::ChannelStatus,
        crate::error::ErrorResponse,
        crate::error::ErrorBody,
        handlers::system::HealthResponse,
    )),
    tags(
        (name = "Shops", description = "Shop registration and review"),
        (name = "Broadcast", description = "Manual realtime announcements"),
        (name = "System", description = "Health and channel status"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}

/// Builds the full application: REST, WebSocket channels, API docs and
/// tower middleware, bound to `state`.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(build_router())
        .merge(docs_router())
        .route("/ws/seller", get(seller_ws_handler))
        .route("/ws/user", get(user_ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(feature = "swagger-ui")]
fn docs_router() -> Router<AppState> {
    Router::new().merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
}

#[cfg(not(feature = "swagger-ui"))]
fn docs_router() -> Router<AppState> {
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { axum::Json(ApiDoc::openapi()) }),
    )
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::broadcast::{BroadcastHub, Role};
    use crate::domain::ShopRegistry;
    use crate::service::ShopService;
    use crate::transport::MessageChannel;

    fn app() -> Router {
        let hub = Arc::new(BroadcastHub::new(Duration::from_millis(200)));
        let seller_channel = Arc::new(MessageChannel::new(Role::Seller, 16));
        let user_channel = Arc::new(MessageChannel::new(Role::User, 16));
        hub.register_seller(&seller_channel);
        let shop_service = Arc::new(ShopService::new(
            Arc::new(ShopRegistry::new()),
            Arc::clone(&hub),
        ));
        build_app(AppState {
            shop_service,
            hub,
            seller_channel,
            user_channel,
        })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body read failed");
        };
        serde_json::from_slice(&bytes).unwrap_or_default()
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        let Ok(request) = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
        else {
            panic!("invalid request");
        };
        request
    }

    #[tokio::test]
    async fn health_is_ok() {
        let Ok(request) = Request::builder().uri("/health").body(Body::empty()) else {
            panic!("invalid request");
        };
        let Ok(response) = app().oneshot(request).await else {
            panic!("request failed");
        };
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["shops"], 0);
    }

    #[tokio::test]
    async fn health_counts_registered_shops() {
        let app = app();
        let body = r#"{"owner_id":3,"name":"Tacos"}"#;
        let Ok(created) = app
            .clone()
            .oneshot(json_request("POST", "/api/v1/shops", body))
            .await
        else {
            panic!("request failed");
        };
        assert_eq!(created.status(), StatusCode::CREATED);

        let Ok(request) = Request::builder().uri("/health").body(Body::empty()) else {
            panic!("invalid request");
        };
        let Ok(response) = app.oneshot(request).await else {
            panic!("request failed");
        };
        assert_eq!(body_json(response).await["shops"], 1);
    }

    #[tokio::test]
    async fn channels_lists_three_roles() {
        let Ok(request) = Request::builder().uri("/channels").body(Body::empty()) else {
            panic!("invalid request");
        };
        let Ok(response) = app().oneshot(request).await else {
            panic!("request failed");
        };
        let json = body_json(response).await;
        let Some(entries) = json.as_array() else {
            panic!("expected array");
        };
        assert_eq!(entries.len(), 3);
        let seller = entries.iter().find(|e| e["role"] == "seller");
        assert_eq!(seller.map(|e| e["registered"] == true), Some(true));
    }

    #[tokio::test]
    async fn create_and_approve_shop() {
        let app = app();
        let Ok(response) = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/shops",
                r#"{"owner_id":7,"name":"Noodle Bar"}"#,
            ))
            .await
        else {
            panic!("request failed");
        };
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["status"], "pending");
        let id = created["id"].as_i64().unwrap_or_default();

        let uri = format!("/api/v1/shops/{id}/approve");
        let Ok(response) = app.clone().oneshot(json_request("POST", &uri, "")).await else {
            panic!("request failed");
        };
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "approved");

        let Ok(response) = app.oneshot(json_request("POST", &uri, "")).await else {
            panic!("request failed");
        };
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn unknown_shop_is_404() {
        let Ok(response) = app()
            .oneshot(json_request("POST", "/api/v1/shops/999/reject", ""))
            .await
        else {
            panic!("request failed");
        };
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], 2001);
    }

    #[tokio::test]
    async fn broadcast_with_null_topic_is_accepted() {
        let Ok(response) = app()
            .oneshot(json_request("POST", "/api/v1/broadcast", r#"{"topic":null}"#))
            .await
        else {
            panic!("request failed");
        };
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        // Seller channel is registered but has no clients.
        let report = body_json(response).await;
        assert_eq!(report["failed"], serde_json::json!(["seller"]));
    }
}
