//! Channel roles and their wire formats.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Audience a transport channel serves.
///
/// The hub holds at most one adapter registration per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Administrators, served over a newline-delimited TCP stream.
    Admin,
    /// Shop owners, served over the seller WebSocket channel.
    Seller,
    /// Customers, served over the user WebSocket channel.
    User,
}

/// Payload shape a role's transport expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    /// Unterminated plain text; the transport appends the line break.
    PlainText,
    /// JSON envelope with `type` and `topic` fields.
    Envelope,
}

impl Role {
    /// Every role, in a fixed order.
    pub const ALL: [Self; 3] = [Self::Admin, Self::Seller, Self::User];

    /// Returns the wire format this role's transport consumes.
    #[must_use]
    pub const fn wire_format(self) -> WireFormat {
        match self {
            Self::Admin => WireFormat::PlainText,
            Self::Seller | Self::User => WireFormat::Envelope,
        }
    }

    /// Returns the lowercase role name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Seller => "seller",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_is_plain_text() {
        assert_eq!(Role::Admin.wire_format(), WireFormat::PlainText);
        assert_eq!(Role::Seller.wire_format(), WireFormat::Envelope);
        assert_eq!(Role::User.wire_format(), WireFormat::Envelope);
    }

    #[test]
    fn display_matches_serde_name() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap_or_default();
            assert_eq!(json, format!("\"{role}\""));
        }
    }
}
