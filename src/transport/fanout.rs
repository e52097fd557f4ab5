//! Client fan-out shared by every transport.
//!
//! [`Fanout`] wraps a [`tokio::sync::broadcast`] channel carrying encoded
//! payloads plus a [`tokio::sync::watch`] shutdown flag. Each connected
//! client holds one receiver of each.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};

use crate::error::DeliveryError;

/// Payload fan-out to every connected client of one transport.
///
/// When the ring buffer is full, the oldest payloads are dropped for
/// lagging clients.
#[derive(Debug)]
pub struct Fanout {
    sender: broadcast::Sender<Arc<str>>,
    shutdown: watch::Sender<bool>,
}

impl Fanout {
    /// Creates a fan-out buffering up to `capacity` payloads per client.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        let (shutdown, _) = watch::channel(false);
        Self { sender, shutdown }
    }

    /// Attaches a new client, returning its payload and shutdown receivers.
    #[must_use]
    pub fn subscribe(&self) -> (broadcast::Receiver<Arc<str>>, watch::Receiver<bool>) {
        (self.sender.subscribe(), self.shutdown.subscribe())
    }

    /// Returns a receiver that observes [`Fanout::close`].
    #[must_use]
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }

    /// Hands `payload` to every attached client.
    ///
    /// Returns the number of clients the payload was queued for.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Closed`] after [`Fanout::close`] and
    /// [`DeliveryError::NoClients`] when nobody is attached.
    pub fn publish(&self, payload: &str) -> Result<usize, DeliveryError> {
        if self.is_closed() {
            return Err(DeliveryError::Closed);
        }
        self.sender
            .send(Arc::from(payload))
            .map_err(|_| DeliveryError::NoClients)
    }

    /// Number of attached clients.
    #[must_use]
    pub fn client_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Signals every client task to stop. Idempotent.
    pub fn close(&self) {
        self.shutdown.send_replace(true);
    }

    /// Whether [`Fanout::close`] has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        *self.shutdown.borrow()
    }
}

/// Resolves once the fan-out behind `signal` has been closed or dropped.
pub async fn closed(signal: &mut watch::Receiver<bool>) {
    loop {
        let is_closed = *signal.borrow_and_update();
        if is_closed || signal.changed().await.is_err() {
            return;
        }
    }
}
