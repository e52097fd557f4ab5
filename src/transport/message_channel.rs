//! WebSocket message channels for sellers and users.
//!
//! A [`MessageChannel`] serves one [`Role`]. Clients connect through
//! `GET /ws/seller` or `GET /ws/user`; every JSON envelope sent to the
//! channel is forwarded to each of them as a text frame.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{broadcast, watch};

use super::fanout::{self, Fanout};
use crate::app_state::AppState;
use crate::broadcast::{ChannelAdapter, Role};
use crate::error::DeliveryError;

/// Structured-message broadcast to every WebSocket client of one role.
#[derive(Debug)]
pub struct MessageChannel {
    role: Role,
    name: String,
    fanout: Fanout,
}

impl MessageChannel {
    /// Creates a channel for `role` buffering up to `capacity` envelopes
    /// per client.
    #[must_use]
    pub fn new(role: Role, capacity: usize) -> Self {
        Self {
            role,
            name: format!("{role}-channel"),
            fanout: Fanout::new(capacity),
        }
    }

    /// The role this channel serves.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Number of connected WebSocket clients.
    #[must_use]
    pub fn client_count(&self) -> usize {
        self.fanout.client_count()
    }

    /// Disconnects every client and rejects further sends.
    pub fn shutdown(&self) {
        self.fanout.close();
        tracing::info!(role = %self.role, "message channel shut down");
    }

    /// Drives one upgraded WebSocket until either side closes.
    pub async fn serve(self: Arc<Self>, socket: WebSocket) {
        let (envelopes, shutdown) = self.fanout.subscribe();
        run_connection(socket, self.role, envelopes, shutdown).await;
    }
}

#[async_trait]
impl ChannelAdapter for MessageChannel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, payload: &str) -> Result<(), DeliveryError> {
        let clients = self.fanout.publish(payload)?;
        tracing::trace!(role = %self.role, clients, "envelope queued");
        Ok(())
    }

    fn is_live(&self) -> bool {
        !self.fanout.is_closed()
    }
}

/// Forwards envelopes to the client until it disconnects, the channel
/// shuts down, or a write fails.
async fn run_connection(
    socket: WebSocket,
    role: Role,
    mut envelopes: broadcast::Receiver<Arc<str>>,
    mut shutdown: watch::Receiver<bool>,
) {
    let connection_id = uuid::Uuid::new_v4();
    let (mut ws_tx, mut ws_rx) = socket.split();
    tracing::debug!(%role, %connection_id, "ws client connected");

    loop {
        tokio::select! {
            // Incoming frame from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                    _ => {}
                }
            }
            // Envelope from the hub
            envelope = envelopes.recv() => {
                match envelope {
                    Ok(envelope) => {
                        if ws_tx.send(Message::text(String::from(&*envelope))).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(%role, %connection_id, lagged = n, "ws client lagged behind channel");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            () = fanout::closed(&mut shutdown) => {
                let _ = ws_tx.send(Message::Close(None)).await;
                break;
            }
        }
    }

    tracing::debug!(%role, %connection_id, "ws connection closed");
}

/// `GET /ws/seller` — Upgrade to the seller notification channel.
pub async fn seller_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let channel = Arc::clone(&state.seller_channel);
    ws.on_upgrade(move |socket| channel.serve(socket))
}

/// `GET /ws/user` — Upgrade to the user notification channel.
pub async fn user_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let channel = Arc::clone(&state.user_channel);
    ws.on_upgrade(move |socket| channel.serve(socket))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_without_clients_fails() {
        let channel = MessageChannel::new(Role::Seller, 16);
        let result = channel.send(r#"{"type":"topic","topic":"x"}"#).await;
        assert!(matches!(result, Err(DeliveryError::NoClients)));
    }

    #[tokio::test]
    async fn shutdown_marks_channel_dead() {
        let channel = MessageChannel::new(Role::User, 16);
        assert!(channel.is_live());
        channel.shutdown();
        assert!(!channel.is_live());
        assert!(matches!(
            channel.send("{}").await,
            Err(DeliveryError::Closed)
        ));
    }

    #[test]
    fn name_includes_role() {
        let channel = MessageChannel::new(Role::Seller, 16);
        assert_eq!(channel.name(), "seller-channel");
        assert_eq!(channel.role(), Role::Seller);
    }
}
