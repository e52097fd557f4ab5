//! Per-channel payload encoding.
//!
//! Pure functions from a [`Notice`] to the string a transport sends. No
//! timestamps or generated ids are added, so the same notice always encodes
//! to the same payload and encoding is safe from any number of fan-out tasks.
//!
//! Envelope shapes:
//!
//! ```json
//! {"type":"topic","topic":"menu updated"}
//! {"type":"event","topic":"shop_status_change 42 approved","entityId":42,
//!  "ownerId":7,"entityName":"Noodle Bar","status":"approved","action":"shop_status_change"}
//! ```

use serde::Serialize;

use super::notice::Notice;
use super::role::WireFormat;
use crate::domain::ShopStatus;
use crate::error::DeliveryError;

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Envelope<'a> {
    Topic {
        topic: &'a str,
    },
    #[serde(rename_all = "camelCase")]
    Event {
        topic: String,
        entity_id: i64,
        owner_id: i64,
        entity_name: &'a str,
        status: ShopStatus,
        action: &'a str,
    },
}

/// Encodes `notice` for a transport consuming `format`.
///
/// # Errors
///
/// Returns [`DeliveryError::Encode`] if the envelope cannot be serialized.
pub fn encode(format: WireFormat, notice: &Notice) -> Result<String, DeliveryError> {
    match format {
        WireFormat::PlainText => Ok(plain_text(notice)),
        WireFormat::Envelope => envelope(notice),
    }
}

/// Plain-text form for the admin stream, without a trailing newline.
#[must_use]
pub fn plain_text(notice: &Notice) -> String {
    notice.topic()
}

/// JSON envelope for the message channels.
///
/// Quotes and backslashes inside the topic are escaped by the JSON
/// serializer, so any topic string survives a decode unchanged.
///
/// # Errors
///
/// Returns [`DeliveryError::Encode`] if serialization fails.
pub fn envelope(notice: &Notice) -> Result<String, DeliveryError> {
    let envelope = match notice {
        Notice::Topic(topic) => Envelope::Topic {
            topic: topic.as_str(),
        },
        Notice::Event(event) => Envelope::Event {
            topic: event.summary(),
            entity_id: event.entity_id(),
            owner_id: event.owner_id(),
            entity_name: event.entity_name(),
            status: event.status(),
            action: event.action(),
        },
    };
    Ok(serde_json::to_string(&envelope)?)
}
