//! Shop records and their review status.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ShopId;

/// Review status of a shop.
///
/// New shops start as [`ShopStatus::Pending`] until an administrator
/// approves or rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ShopStatus {
    /// Shop is visible to users and may take orders.
    Approved,
    /// Shop is waiting for review.
    Pending,
    /// Shop was turned down by an administrator.
    Rejected,
}

impl ShopStatus {
    /// Returns the wire name of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ShopStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shop as stored in the [`super::ShopRegistry`].
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Shop {
    /// Registry-assigned identifier.
    pub id: ShopId,
    /// User id of the seller who owns the shop.
    pub owner_id: i64,
    /// Display name.
    pub name: String,
    /// Current review status.
    pub status: ShopStatus,
    /// When the shop was registered.
    pub created_at: DateTime<Utc>,
    /// When the status last changed.
    pub updated_at: DateTime<Utc>,
}

impl Shop {
    /// Creates a pending shop with both timestamps set to now.
    #[must_use]
    pub fn new(id: ShopId, owner_id: i64, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_id,
            name,
            status: ShopStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_shop_is_pending() {
        let shop = Shop::new(ShopId::new(1), 10, "Noodle Bar".to_string());
        assert_eq!(shop.status, ShopStatus::Pending);
        assert_eq!(shop.created_at, shop.updated_at);
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&ShopStatus::Rejected).unwrap_or_default();
        assert_eq!(json, "\"rejected\"");
        assert_eq!(ShopStatus::Approved.to_string(), "approved");
    }
}
