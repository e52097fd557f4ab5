//! The capability every transport channel exposes to the hub.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::DeliveryError;

/// A transport the [`super::BroadcastHub`] can deliver payloads to.
///
/// Implementations own their framing, handshakes and client bookkeeping.
/// The hub only ever calls [`ChannelAdapter::send`] with a payload already
/// encoded for the role the adapter is registered under.
#[async_trait]
pub trait ChannelAdapter: Send + Sync + Debug {
    /// Short name used in logs and status reports.
    fn name(&self) -> &str;

    /// Delivers one payload to every client currently attached.
    ///
    /// # Errors
    ///
    /// Returns a [`DeliveryError`] when the payload could not be handed to
    /// any client (no clients connected, transport closed, ...).
    async fn send(&self, payload: &str) -> Result<(), DeliveryError>;

    /// Whether the transport is still running.
    fn is_live(&self) -> bool {
        true
    }
}
