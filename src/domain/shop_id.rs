//! Type-safe shop identifier.
//!
//! [`ShopId`] is a newtype wrapper around the integer key the shop registry
//! assigns, so that shop identifiers cannot be confused with owner ids.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier for a registered shop.
///
/// Assigned once by [`super::ShopRegistry`] when the shop is inserted and
/// immutable thereafter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct ShopId(i64);

impl ShopId {
    /// Wraps a raw integer id.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ShopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ShopId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}
