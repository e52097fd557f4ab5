//! Service layer: business logic orchestration.
//!
//! [`ShopService`] drives the shop review workflow and publishes every
//! status change through the [`crate::broadcast::BroadcastHub`].

pub mod shop_service;

pub use shop_service::ShopService;
