//! Shop-related DTOs for registration, lookup and listing.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Shop, ShopStatus};

/// Request body for `POST /shops`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateShopRequest {
    /// User id of the seller registering the shop.
    pub owner_id: i64,
    /// Display name (must not be blank).
    pub name: String,
}

/// Query parameters for `GET /shops`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ShopListQuery {
    /// Only return shops with this status.
    #[serde(default)]
    pub status: Option<ShopStatus>,
}

/// Response body for `GET /shops`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ShopListResponse {
    /// Matching shops, ordered by id.
    pub data: Vec<Shop>,
    /// Number of matching shops.
    pub total: usize,
}

impl From<Vec<Shop>> for ShopListResponse {
    fn from(data: Vec<Shop>) -> Self {
        Self {
            total: data.len(),
            data,
        }
    }
}
