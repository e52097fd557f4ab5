//! Gateway error types.
//!
//! [`GatewayError`] is the central error type for the HTTP surface. Each
//! variant maps to a specific HTTP status code and structured JSON error
//! response.
//!
//! [`DeliveryError`] classifies a failed send to one channel adapter. It is
//! recovered inside the broadcast fan-out and never reaches a caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{ShopId, ShopStatus};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "shop not found: 42",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                  |
/// |-----------|-----------------|------------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request              |
/// | 2000–2999 | State/Not Found | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server          | 500 Internal Server Error    |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Shop with the given ID was not found.
    #[error("shop not found: {0}")]
    ShopNotFound(ShopId),

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The shop already has the requested status.
    #[error("shop {shop_id} is already {status}")]
    InvalidTransition {
        /// Shop whose status was being changed.
        shop_id: ShopId,
        /// Status the shop currently has.
        status: ShopStatus,
    },

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::ShopNotFound(_) => 2001,
            Self::InvalidTransition { .. } => 2002,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::ShopNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidTransition { .. } => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

/// A failed delivery attempt to a single channel adapter.
///
/// The broadcast hub catches every one of these, logs it with the role it
/// belongs to, and moves on. No variant is ever fatal.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The transport has no connected clients to deliver to.
    #[error("no connected clients")]
    NoClients,

    /// The transport has been shut down.
    #[error("transport closed")]
    Closed,

    /// The payload could not be encoded for the channel's wire format.
    #[error("encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// The adapter did not finish within the delivery timeout.
    #[error("delivery timed out after {0} ms")]
    Timeout(u64),

    /// The registered adapter has been dropped by its owner.
    #[error("adapter dropped by its owner")]
    AdapterDropped,

    /// The delivery task panicked or was cancelled.
    #[error("delivery task failed: {0}")]
    TaskFailed(String),

    /// Any other transport-specific failure.
    #[error("transport error: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = GatewayError::ShopNotFound(ShopId::new(7));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), 2001);
        assert_eq!(err.to_string(), "shop not found: 7");
    }

    #[test]
    fn transition_conflict_message() {
        let err = GatewayError::InvalidTransition {
            shop_id: ShopId::new(3),
            status: ShopStatus::Approved,
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "shop 3 is already approved");
    }

    #[test]
    fn delivery_timeout_display() {
        assert_eq!(
            DeliveryError::Timeout(250).to_string(),
            "delivery timed out after 250 ms"
        );
    }
}
