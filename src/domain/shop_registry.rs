//! In-memory shop storage.
//!
//! [`ShopRegistry`] keeps every shop in a `HashMap` behind a single
//! [`tokio::sync::RwLock`] and hands out monotonically increasing ids.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;

use super::{Shop, ShopId, ShopStatus};
use crate::error::GatewayError;

/// Central store for all registered shops.
///
/// # Concurrency
///
/// - Any number of readers may list or fetch shops concurrently.
/// - Inserts and status updates are serialized by the write lock.
#[derive(Debug)]
pub struct ShopRegistry {
    shops: RwLock<HashMap<ShopId, Shop>>,
    next_id: AtomicI64,
}

impl ShopRegistry {
    /// Creates an empty registry. The first shop receives id `1`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shops: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Registers a new pending shop and returns a copy of it.
    pub async fn insert(&self, owner_id: i64, name: String) -> Shop {
        let id = ShopId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let shop = Shop::new(id, owner_id, name);
        self.shops.write().await.insert(id, shop.clone());
        shop
    }

    /// Returns a copy of the shop with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ShopNotFound`] if no shop with the given ID
    /// exists.
    pub async fn get(&self, id: ShopId) -> Result<Shop, GatewayError> {
        self.shops
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(GatewayError::ShopNotFound(id))
    }

    /// Returns all shops ordered by id, optionally filtered by status.
    pub async fn list(&self, status_filter: Option<ShopStatus>) -> Vec<Shop> {
        let map = self.shops.read().await;
        let mut shops: Vec<Shop> = map
            .values()
            .filter(|shop| status_filter.is_none_or(|status| shop.status == status))
            .cloned()
            .collect();
        shops.sort_by_key(|shop| shop.id);
        shops
    }

    /// Moves a shop to `status` and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ShopNotFound`] for an unknown id and
    /// [`GatewayError::InvalidTransition`] if the shop already has `status`.
    pub async fn set_status(&self, id: ShopId, status: ShopStatus) -> Result<Shop, GatewayError> {
        let mut map = self.shops.write().await;
        let shop = map.get_mut(&id).ok_or(GatewayError::ShopNotFound(id))?;
        if shop.status == status {
            return Err(GatewayError::InvalidTransition {
                shop_id: id,
                status,
            });
        }
        shop.status = status;
        shop.updated_at = Utc::now();
        Ok(shop.clone())
    }

    /// Returns the number of shops in the registry.
    pub async fn count(&self) -> usize {
        self.shops.read().await.len()
    }
}

impl Default for ShopRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let registry = ShopRegistry::new();
        let a = registry.insert(1, "Dumplings".to_string()).await;
        let b = registry.insert(2, "Tacos".to_string()).await;
        assert_eq!(a.id, ShopId::new(1));
        assert_eq!(b.id, ShopId::new(2));
        assert_eq!(registry.count().await, 2);
    }

    #[tokio::test]
    async fn get_nonexistent_returns_error() {
        let registry = ShopRegistry::new();
        let result = registry.get(ShopId::new(99)).await;
        assert!(matches!(result, Err(GatewayError::ShopNotFound(_))));
    }

    #[tokio::test]
    async fn set_status_updates_record() {
        let registry = ShopRegistry::new();
        let shop = registry.insert(1, "Dumplings".to_string()).await;

        let Ok(updated) = registry.set_status(shop.id, ShopStatus::Approved).await else {
            panic!("status change should succeed");
        };
        assert_eq!(updated.status, ShopStatus::Approved);

        let Ok(fetched) = registry.get(shop.id).await else {
            panic!("shop should exist");
        };
        assert_eq!(fetched.status, ShopStatus::Approved);
    }

    #[tokio::test]
    async fn set_same_status_is_rejected() {
        let registry = ShopRegistry::new();
        let shop = registry.insert(1, "Dumplings".to_string()).await;
        let result = registry.set_status(shop.id, ShopStatus::Pending).await;
        assert!(matches!(
            result,
            Err(GatewayError::InvalidTransition { .. })
        ));
    }

    #[tokio::test]
    async fn list_filters_by_status() {
        let registry = ShopRegistry::new();
        let a = registry.insert(1, "Dumplings".to_string()).await;
        let _ = registry.insert(2, "Tacos".to_string()).await;
        let _ = registry.set_status(a.id, ShopStatus::Approved).await;

        assert_eq!(registry.list(None).await.len(), 2);
        let approved = registry.list(Some(ShopStatus::Approved)).await;
        assert_eq!(approved.len(), 1);
        assert!(registry.list(Some(ShopStatus::Rejected)).await.is_empty());
    }

    #[tokio::test]
    async fn count_tracks_inserts() {
        let registry = ShopRegistry::new();
        assert_eq!(registry.count().await, 0);
        let _ = registry.insert(1, "Dumplings".to_string()).await;
        assert_eq!(registry.count().await, 1);
    }
}
