//! # canteen-gateway
//!
//! Backend gateway for a campus food-ordering platform, centred on a
//! realtime broadcast hub.
//!
//! Shop status changes (and ad-hoc announcements) are fanned out to three
//! independently running transports: a newline-delimited TCP stream for
//! administrators and WebSocket channels for sellers and users. The hub
//! isolates them from each other: a dead or slow channel never delays or
//! fails delivery to the others, and never surfaces to the caller.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket, TCP)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS / TCP transports (transport/)
//!     │
//!     ├── ShopService (service/)
//!     ├── BroadcastHub + codec (broadcast/)
//!     │
//!     └── ShopRegistry (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod broadcast;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod transport;
