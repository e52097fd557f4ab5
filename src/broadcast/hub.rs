//! Fan-out coordinator for realtime notifications.
//!
//! [`BroadcastHub`] holds at most one adapter registration per [`Role`] and
//! delivers every notice to each registered role independently. Each slot is
//! an [`ArcSwapOption`], so a broadcast reads either the previous or the
//! complete new registration without taking a lock.
//!
//! Every delivery runs in its own spawned task bounded by the configured
//! timeout. A failing, hanging or dropped adapter is logged and skipped;
//! it never affects sibling roles or the caller.

use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use serde::Serialize;
use utoipa::ToSchema;

use super::adapter::ChannelAdapter;
use super::codec;
use super::notice::Notice;
use super::role::Role;
use crate::error::DeliveryError;

/// A back-reference from the hub to an adapter owned by its transport.
///
/// The hub never keeps an adapter alive; lifecycle belongs to the owner.
#[derive(Debug)]
struct Registration {
    adapter: Weak<dyn ChannelAdapter>,
    name: String,
    registered_at: DateTime<Utc>,
}

/// Outcome of one [`BroadcastHub::broadcast`] call.
///
/// Purely informational; failures have already been logged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct BroadcastReport {
    /// Roles whose adapter accepted the payload.
    pub delivered: Vec<Role>,
    /// Roles whose delivery failed for any reason.
    pub failed: Vec<Role>,
}

impl BroadcastReport {
    /// Number of roles a delivery was attempted for.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.delivered.len() + self.failed.len()
    }
}

/// Registration state of one role, as reported by `GET /channels`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChannelStatus {
    /// The role this entry describes.
    pub role: Role,
    /// Whether an adapter is registered for the role.
    pub registered: bool,
    /// Whether the registered adapter is still alive and running.
    pub live: bool,
    /// Name of the registered adapter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adapter: Option<String>,
    /// When the current registration was made.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<DateTime<Utc>>,
}

/// Delivers notices to the admin, seller and user channels.
///
/// Constructed once at startup and shared as `Arc<BroadcastHub>`.
/// Transports register themselves when they start and clear their
/// registration on shutdown; any subset of roles may be registered.
///
/// # Concurrency
///
/// - `broadcast` may be called from any number of tasks at once.
/// - `register`/`unregister` may race freely; the last write wins.
/// - Broadcasts are neither queued nor serialized by the hub.
pub struct BroadcastHub {
    admin: ArcSwapOption<Registration>,
    seller: ArcSwapOption<Registration>,
    user: ArcSwapOption<Registration>,
    delivery_timeout: Duration,
}

impl BroadcastHub {
    /// Creates a hub with no registrations.
    ///
    /// `delivery_timeout` bounds how long a single adapter's `send` may take
    /// before it is abandoned and counted as failed.
    #[must_use]
    pub fn new(delivery_timeout: Duration) -> Self {
        Self {
            admin: ArcSwapOption::empty(),
            seller: ArcSwapOption::empty(),
            user: ArcSwapOption::empty(),
            delivery_timeout,
        }
    }

    fn slot(&self, role: Role) -> &ArcSwapOption<Registration> {
        match role {
            Role::Admin => &self.admin,
            Role::Seller => &self.seller,
            Role::User => &self.user,
        }
    }

    /// Routes subsequent broadcasts for `role` to `adapter`.
    ///
    /// Replaces any previous registration without closing the old adapter.
    /// The adapter may not have started yet.
    pub fn register<A: ChannelAdapter + 'static>(&self, role: Role, adapter: &Arc<A>) {
        let weak: Weak<A> = Arc::downgrade(adapter);
        let registration = Registration {
            adapter: weak as Weak<dyn ChannelAdapter>,
            name: adapter.name().to_owned(),
            registered_at: Utc::now(),
        };
        let previous = self.slot(role).swap(Some(Arc::new(registration)));
        match previous {
            Some(old) => tracing::info!(
                %role,
                adapter = adapter.name(),
                replaced = %old.name,
                "channel re-registered"
            ),
            None => tracing::info!(%role, adapter = adapter.name(), "channel registered"),
        }
    }

    /// Stops routing broadcasts for `role`. No-op if nothing is registered.
    pub fn unregister(&self, role: Role) {
        if let Some(old) = self.slot(role).swap(None) {
            tracing::info!(%role, adapter = %old.name, "channel unregistered");
        }
    }

    /// Registers the admin stream adapter.
    pub fn register_admin<A: ChannelAdapter + 'static>(&self, adapter: &Arc<A>) {
        self.register(Role::Admin, adapter);
    }

    /// Clears the admin registration.
    pub fn clear_admin(&self) {
        self.unregister(Role::Admin);
    }

    /// Registers the seller channel adapter.
    pub fn register_seller<A: ChannelAdapter + 'static>(&self, adapter: &Arc<A>) {
        self.register(Role::Seller, adapter);
    }

    /// Clears the seller registration.
    pub fn clear_seller(&self) {
        self.unregister(Role::Seller);
    }

    /// Registers the user channel adapter.
    pub fn register_user<A: ChannelAdapter + 'static>(&self, adapter: &Arc<A>) {
        self.register(Role::User, adapter);
    }

    /// Clears the user registration.
    pub fn clear_user(&self) {
        self.unregister(Role::User);
    }

    /// Clears every registration.
    pub fn clear_all(&self) {
        for role in Role::ALL {
            self.unregister(role);
        }
    }

    /// Returns `true` if an adapter is registered for `role`.
    #[must_use]
    pub fn is_registered(&self, role: Role) -> bool {
        self.slot(role).load().is_some()
    }

    /// Snapshot of every role's registration.
    #[must_use]
    pub fn status(&self) -> Vec<ChannelStatus> {
        Role::ALL
            .into_iter()
            .map(|role| match self.slot(role).load_full() {
                Some(registration) => ChannelStatus {
                    role,
                    registered: true,
                    live: registration
                        .adapter
                        .upgrade()
                        .is_some_and(|adapter| adapter.is_live()),
                    adapter: Some(registration.name.clone()),
                    registered_at: Some(registration.registered_at),
                },
                None => ChannelStatus {
                    role,
                    registered: false,
                    live: false,
                    adapter: None,
                    registered_at: None,
                },
            })
            .collect()
    }

    /// Delivers `notice` to every currently registered role.
    ///
    /// Each role is encoded for its own wire format and sent from its own
    /// task. Failures are logged with the role and cause and reported in the
    /// returned [`BroadcastReport`]; they are never propagated. With no
    /// registrations this returns immediately.
    pub async fn broadcast(&self, notice: impl Into<Notice>) -> BroadcastReport {
        let notice = Arc::new(notice.into());
        let timeout = self.delivery_timeout;

        let deliveries = Role::ALL.into_iter().filter_map(|role| {
            let registration = self.slot(role).load_full()?;
            let notice = Arc::clone(&notice);
            let handle = tokio::spawn(async move {
                deliver(role, &registration, &notice, timeout).await
            });
            Some(async move {
                let result = handle
                    .await
                    .unwrap_or_else(|err| Err(DeliveryError::TaskFailed(err.to_string())));
                (role, result)
            })
        });

        let mut report = BroadcastReport::default();
        for (role, result) in join_all(deliveries).await {
            match result {
                Ok(()) => report.delivered.push(role),
                Err(err) => {
                    tracing::warn!(%role, error = %err, "broadcast delivery failed");
                    report.failed.push(role);
                }
            }
        }
        tracing::debug!(
            delivered = report.delivered.len(),
            failed = report.failed.len(),
            "broadcast complete"
        );
        report
    }
}

async fn deliver(
    role: Role,
    registration: &Registration,
    notice: &Notice,
    timeout: Duration,
) -> Result<(), DeliveryError> {
    let adapter = registration
        .adapter
        .upgrade()
        .ok_or(DeliveryError::AdapterDropped)?;
    let payload = codec::encode(role.wire_format(), notice)?;
    match tokio::time::timeout(timeout, adapter.send(&payload)).await {
        Ok(result) => result,
        Err(_) => Err(DeliveryError::Timeout(
            u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        )),
    }
}

impl fmt::Debug for BroadcastHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BroadcastHub")
            .field("admin", &self.is_registered(Role::Admin))
            .field("seller", &self.is_registered(Role::Seller))
            .field("user", &self.is_registered(Role::User))
            .field("delivery_timeout", &self.delivery_timeout)
            .finish()
    }
}
