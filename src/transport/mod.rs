//! Concrete channel adapters.
//!
//! - [`AdminStream`]: newline-delimited TCP stream for administrators.
//! - [`MessageChannel`]: WebSocket JSON channel, one per seller/user role.
//!
//! Each transport owns its accept loop and client bookkeeping and exposes
//! itself to the hub only through [`crate::broadcast::ChannelAdapter`].

pub mod admin_stream;
pub mod fanout;
pub mod message_channel;

pub use admin_stream::AdminStream;
pub use message_channel::MessageChannel;
