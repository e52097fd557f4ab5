//! Shop service: the review workflow that emits status broadcasts.

use std::sync::Arc;

use crate::broadcast::{BroadcastHub, BroadcastReport, StatusChange};
use crate::domain::{Shop, ShopId, ShopRegistry, ShopStatus};
use crate::error::GatewayError;

/// Orchestration layer for shop registration and review.
///
/// Every status change follows the same pattern: update the registry,
/// broadcast a [`StatusChange`] through the hub, return the updated shop.
/// Broadcast outcome never affects the result.
#[derive(Debug, Clone)]
pub struct ShopService {
    registry: Arc<ShopRegistry>,
    hub: Arc<BroadcastHub>,
}

impl ShopService {
    /// Creates a new `ShopService`.
    #[must_use]
    pub fn new(registry: Arc<ShopRegistry>, hub: Arc<BroadcastHub>) -> Self {
        Self { registry, hub }
    }

    /// Registers a new shop awaiting review and announces it.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if `name` is blank.
    pub async fn register_shop(&self, owner_id: i64, name: &str) -> Result<Shop, GatewayError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GatewayError::InvalidRequest(
                "shop name must not be empty".to_string(),
            ));
        }
        let shop = self.registry.insert(owner_id, name.to_string()).await;
        tracing::info!(shop_id = %shop.id, owner_id, "shop registered");
        self.hub.broadcast(StatusChange::from(&shop)).await;
        Ok(shop)
    }

    /// Approves a shop.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ShopNotFound`] or
    /// [`GatewayError::InvalidTransition`].
    pub async fn approve(&self, id: ShopId) -> Result<Shop, GatewayError> {
        self.change_status(id, ShopStatus::Approved).await
    }

    /// Rejects a shop.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ShopNotFound`] or
    /// [`GatewayError::InvalidTransition`].
    pub async fn reject(&self, id: ShopId) -> Result<Shop, GatewayError> {
        self.change_status(id, ShopStatus::Rejected).await
    }

    async fn change_status(&self, id: ShopId, status: ShopStatus) -> Result<Shop, GatewayError> {
        let shop = self.registry.set_status(id, status).await?;
        tracing::info!(shop_id = %id, %status, "shop status changed");
        self.hub.broadcast(StatusChange::from(&shop)).await;
        Ok(shop)
    }

    /// Broadcasts a bare topic to every channel. `None` sends an empty topic.
    pub async fn announce(&self, topic: Option<String>) -> BroadcastReport {
        self.hub.broadcast(topic).await
    }

    /// Returns a shop by id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ShopNotFound`] for an unknown id.
    pub async fn get_shop(&self, id: ShopId) -> Result<Shop, GatewayError> {
        self.registry.get(id).await
    }

    /// Lists shops, optionally filtered by status.
    pub async fn list_shops(&self, status: Option<ShopStatus>) -> Vec<Shop> {
        self.registry.list(status).await
    }

    /// Number of registered shops.
    pub async fn shop_count(&self) -> usize {
        self.registry.count().await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::broadcast::ChannelAdapter;
    use crate::error::DeliveryError;

    #[derive(Debug, Default)]
    struct Recorder {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChannelAdapter for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        async fn send(&self, payload: &str) -> Result<(), DeliveryError> {
            if let Ok(mut sent) = self.sent.lock() {
                sent.push(payload.to_owned());
            }
            Ok(())
        }
    }

    fn service() -> (ShopService, Arc<Recorder>) {
        let hub = Arc::new(BroadcastHub::new(Duration::from_millis(200)));
        let admin = Arc::new(Recorder::default());
        hub.register_admin(&admin);
        let service = ShopService::new(Arc::new(ShopRegistry::new()), hub);
        (service, admin)
    }

    fn sent(recorder: &Recorder) -> Vec<String> {
        recorder.sent.lock().map(|v| v.clone()).unwrap_or_default()
    }

    #[tokio::test]
    async fn approve_broadcasts_status_change() {
        let (service, admin) = service();
        let Ok(shop) = service.register_shop(7, "Noodle Bar").await else {
            panic!("registration should succeed");
        };
        let Ok(approved) = service.approve(shop.id).await else {
            panic!("approval should succeed");
        };

        assert_eq!(approved.status, ShopStatus::Approved);
        assert_eq!(
            sent(&admin),
            vec![
                format!("shop_status_change {} pending", shop.id),
                format!("shop_status_change {} approved", shop.id),
            ]
        );
    }

    #[tokio::test]
    async fn blank_name_is_rejected_without_broadcast() {
        let (service, admin) = service();
        let result = service.register_shop(7, "   ").await;
        assert!(matches!(result, Err(GatewayError::InvalidRequest(_))));
        assert!(sent(&admin).is_empty());
    }

    #[tokio::test]
    async fn failed_transition_does_not_broadcast() {
        let (service, admin) = service();
        let Ok(shop) = service.register_shop(7, "Grill").await else {
            panic!("registration should succeed");
        };
        let _ = service.reject(shop.id).await;
        let again = service.reject(shop.id).await;

        assert!(matches!(again, Err(GatewayError::InvalidTransition { .. })));
        assert_eq!(sent(&admin).len(), 2);
    }

    #[tokio::test]
    async fn unknown_shop_is_not_found() {
        let (service, _admin) = service();
        let result = service.approve(ShopId::new(404)).await;
        assert!(matches!(result, Err(GatewayError::ShopNotFound(_))));
    }

    #[tokio::test]
    async fn announce_without_topic_sends_empty_line() {
        let (service, admin) = service();
        let report = service.announce(None).await;
        assert_eq!(report.delivered.len(), 1);
        assert_eq!(sent(&admin), vec![String::new()]);
    }
}
