//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::broadcast::BroadcastHub;
use crate::service::ShopService;
use crate::transport::MessageChannel;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Shop review workflow.
    pub shop_service: Arc<ShopService>,
    /// Broadcast hub, for bare-topic announcements and channel status.
    pub hub: Arc<BroadcastHub>,
    /// Seller WebSocket channel.
    pub seller_channel: Arc<MessageChannel>,
    /// User WebSocket channel.
    pub user_channel: Arc<MessageChannel>,
}
