//! What gets broadcast: bare topics and structured status changes.

use crate::domain::{Shop, ShopStatus};

/// Action tag carried by every shop status change.
pub const SHOP_STATUS_ACTION: &str = "shop_status_change";

/// A status change of some entity, produced by business logic.
///
/// Immutable once constructed; the codec is its only consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    entity_id: i64,
    owner_id: i64,
    entity_name: String,
    status: ShopStatus,
    action: &'static str,
}

impl StatusChange {
    /// Builds a shop status change tagged with [`SHOP_STATUS_ACTION`].
    #[must_use]
    pub fn shop(
        entity_id: i64,
        owner_id: i64,
        entity_name: impl Into<String>,
        status: ShopStatus,
    ) -> Self {
        Self {
            entity_id,
            owner_id,
            entity_name: entity_name.into(),
            status,
            action: SHOP_STATUS_ACTION,
        }
    }

    /// Id of the entity whose status changed.
    #[must_use]
    pub const fn entity_id(&self) -> i64 {
        self.entity_id
    }

    /// Id of the user owning the entity.
    #[must_use]
    pub const fn owner_id(&self) -> i64 {
        self.owner_id
    }

    /// Display name of the entity.
    #[must_use]
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// The new status.
    #[must_use]
    pub const fn status(&self) -> ShopStatus {
        self.status
    }

    /// Constant tag naming the kind of change.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        self.action
    }

    /// One-line human summary, e.g. `shop_status_change 42 approved`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} {} {}", self.action, self.entity_id, self.status)
    }
}

impl From<&Shop> for StatusChange {
    fn from(shop: &Shop) -> Self {
        Self::shop(shop.id.get(), shop.owner_id, shop.name.clone(), shop.status)
    }
}

/// Input to a single broadcast call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// An opaque topic string. May be empty.
    Topic(String),
    /// A structured status change.
    Event(StatusChange),
}

impl Notice {
    /// Text form of the notice: the topic itself, or the event summary.
    #[must_use]
    pub fn topic(&self) -> String {
        match self {
            Self::Topic(topic) => topic.clone(),
            Self::Event(event) => event.summary(),
        }
    }
}

impl From<&str> for Notice {
    fn from(topic: &str) -> Self {
        Self::Topic(topic.to_owned())
    }
}

impl From<String> for Notice {
    fn from(topic: String) -> Self {
        Self::Topic(topic)
    }
}

/// An absent topic is broadcast as the empty string.
impl From<Option<String>> for Notice {
    fn from(topic: Option<String>) -> Self {
        Self::Topic(topic.unwrap_or_default())
    }
}

/// An absent topic is broadcast as the empty string.
impl From<Option<&str>> for Notice {
    fn from(topic: Option<&str>) -> Self {
        Self::Topic(topic.map(str::to_owned).unwrap_or_default())
    }
}

impl From<StatusChange> for Notice {
    fn from(event: StatusChange) -> Self {
        Self::Event(event)
    }
}

/// An absent event is broadcast as the empty topic.
impl From<Option<StatusChange>> for Notice {
    fn from(event: Option<StatusChange>) -> Self {
        event.map_or_else(|| Self::Topic(String::new()), Self::Event)
    }
}
