//! Domain layer: shop model and in-memory shop registry.
//!
//! Shops are the entities whose status changes drive realtime broadcasts.
//! Storage is process-local; durable persistence lives outside this crate.

pub mod shop;
pub mod shop_id;
pub mod shop_registry;

pub use shop::{Shop, ShopStatus};
pub use shop_id::ShopId;
pub use shop_registry::ShopRegistry;
