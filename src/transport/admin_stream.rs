//! Admin notification stream over raw TCP.
//!
//! Every connected admin client receives each payload as one
//! newline-terminated line. Line breaks inside a payload are folded into
//! spaces so a payload never spans more than one line. Input from clients
//! is read only to notice disconnects and is otherwise ignored.

use std::borrow::Cow;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{broadcast, watch};

use super::fanout::{self, Fanout};
use crate::broadcast::ChannelAdapter;
use crate::error::DeliveryError;

/// Line-oriented TCP broadcast to all connected admin clients.
#[derive(Debug)]
pub struct AdminStream {
    fanout: Arc<Fanout>,
    local_addr: SocketAddr,
    accepting: Arc<AtomicBool>,
}

impl AdminStream {
    /// Binds `addr` and starts accepting admin clients in the background.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the address cannot be bound.
    pub async fn bind(addr: SocketAddr, capacity: usize) -> std::io::Result<Arc<Self>> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        let fanout = Arc::new(Fanout::new(capacity));
        let accepting = Arc::new(AtomicBool::new(true));

        tokio::spawn(accept_loop(
            listener,
            Arc::clone(&fanout),
            Arc::clone(&accepting),
        ));
        tracing::info!(addr = %local_addr, "admin stream listening");

        Ok(Arc::new(Self {
            fanout,
            local_addr,
            accepting,
        }))
    }

    /// Address the listener is bound to.
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Number of connected admin clients.
    #[must_use]
    pub fn client_count(&self) -> usize {
        self.fanout.client_count()
    }

    /// Stops accepting and disconnects every client.
    pub fn shutdown(&self) {
        self.fanout.close();
        tracing::info!(addr = %self.local_addr, "admin stream shut down");
    }
}

#[async_trait]
impl ChannelAdapter for AdminStream {
    fn name(&self) -> &str {
        "admin-stream"
    }

    async fn send(&self, payload: &str) -> Result<(), DeliveryError> {
        let clients = self.fanout.publish(&single_line(payload))?;
        tracing::trace!(clients, "admin line queued");
        Ok(())
    }

    fn is_live(&self) -> bool {
        self.accepting.load(Ordering::Acquire) && !self.fanout.is_closed()
    }
}

impl Drop for AdminStream {
    fn drop(&mut self) {
        if !self.fanout.is_closed() {
            self.fanout.close();
            tracing::info!(addr = %self.local_addr, "admin stream dropped");
        }
    }
}

/// Replaces every `\r\n`, `\r` or `\n` in `payload` with a single space.
fn single_line(payload: &str) -> Cow<'_, str> {
    if payload.contains(['\r', '\n']) {
        Cow::Owned(payload.replace("\r\n", " ").replace(['\r', '\n'], " "))
    } else {
        Cow::Borrowed(payload)
    }
}

async fn accept_loop(listener: TcpListener, fanout: Arc<Fanout>, accepting: Arc<AtomicBool>) {
    let mut shutdown = fanout.shutdown_signal();
    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((socket, peer)) => {
                    let (lines, client_shutdown) = fanout.subscribe();
                    tracing::debug!(%peer, "admin client connected");
                    tokio::spawn(serve_client(socket, peer, lines, client_shutdown));
                }
                Err(err) => tracing::warn!(error = %err, "admin stream accept failed"),
            },
            () = fanout::closed(&mut shutdown) => break,
        }
    }
    accepting.store(false, Ordering::Release);
}

async fn serve_client(
    socket: TcpStream,
    peer: SocketAddr,
    mut lines: broadcast::Receiver<Arc<str>>,
    mut shutdown: watch::Receiver<bool>,
) {
    let (mut reader, mut writer) = socket.into_split();
    let mut discard = [0u8; 256];

    loop {
        tokio::select! {
            line = lines.recv() => match line {
                Ok(line) => {
                    if writer.write_all(line.as_bytes()).await.is_err()
                        || writer.write_all(b"\n").await.is_err()
                    {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(%peer, lagged = n, "admin client lagged behind stream");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            read = reader.read(&mut discard) => {
                if matches!(read, Ok(0) | Err(_)) {
                    break;
                }
            }
            () = fanout::closed(&mut shutdown) => break,
        }
    }

    let _ = writer.shutdown().await;
    tracing::debug!(%peer, "admin client disconnected");
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::time::Duration;

    use super::*;

    async fn bind_loopback() -> Arc<AdminStream> {
        let Ok(admin) = AdminStream::bind(([127, 0, 0, 1], 0).into(), 8).await else {
            panic!("bind failed");
        };
        admin
    }

    #[test]
    fn single_line_folds_line_breaks() {
        assert_eq!(single_line("shop approved"), "shop approved");
        assert!(matches!(single_line("plain"), Cow::Borrowed(_)));
        assert_eq!(single_line("a\nb"), "a b");
        assert_eq!(single_line("a\r\nb\rc\n"), "a b c ");
    }

    #[tokio::test]
    async fn send_without_clients_fails() {
        let admin = bind_loopback().await;
        assert!(admin.is_live());
        assert!(matches!(admin.send("x").await, Err(DeliveryError::NoClients)));
    }

    #[tokio::test]
    async fn shutdown_stops_accepting() {
        let admin = bind_loopback().await;
        admin.shutdown();
        assert!(!admin.is_live());
        assert!(matches!(admin.send("x").await, Err(DeliveryError::Closed)));
    }

    #[tokio::test]
    async fn dropping_releases_listener() {
        let admin = bind_loopback().await;
        let addr = admin.local_addr();
        drop(admin);

        for _ in 0..100 {
            if TcpStream::connect(addr).await.is_err() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("admin listener still accepting after drop");
    }
}
