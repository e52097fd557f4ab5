//! Data Transfer Objects for REST request/response serialization.

pub mod broadcast_dto;
pub mod shop_dto;

pub use broadcast_dto::*;
pub use shop_dto::*;
