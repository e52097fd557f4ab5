//! Broadcast request DTO.

use serde::Deserialize;
use utoipa::ToSchema;

/// Request body for `POST /broadcast`.
///
/// A missing or `null` topic is broadcast as the empty string.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BroadcastRequest {
    /// Topic text delivered to every registered channel.
    #[serde(default)]
    pub topic: Option<String>,
}
