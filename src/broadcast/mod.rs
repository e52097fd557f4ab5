//! Realtime broadcast core: roles, notices, codec, adapters and the hub.
//!
//! Producers call [`BroadcastHub::broadcast`] with a topic or a
//! [`StatusChange`]; the hub encodes it per [`Role`] and hands it to whatever
//! [`ChannelAdapter`] is registered for that role.

pub mod adapter;
pub mod codec;
pub mod hub;
pub mod notice;
pub mod role;

pub use adapter::ChannelAdapter;
pub use hub::{BroadcastHub, BroadcastReport, ChannelStatus};
pub use notice::{Notice, SHOP_STATUS_ACTION, StatusChange};
pub use role::{Role, WireFormat};
