//! Serializable field values used to populate a document.

use reservation_shared::{ErrorCode, ErrorEnvelope, Result};
use serde::{Deserialize, Serialize};

/// Field values keyed by the host field names.
///
/// Absent keys leave the corresponding field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormInput {
    /// Hotel select value.
    #[serde(rename = "lis_hotel", skip_serializing_if = "Option::is_none")]
    pub hotel: Option<String>,
    /// Room-count text.
    #[serde(rename = "txt_nbrChambre", skip_serializing_if = "Option::is_none")]
    pub room_count: Option<String>,
    /// Checked room-type radio value.
    #[serde(rename = "opt_type_chambre", skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    /// Checked option values in document order.
    #[serde(rename = "chk_options[]", skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FormInput {
    /// Parse a JSON form input document.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("document", "invalid_form_json"),
                format!("invalid form input JSON: {error}"),
            )
        })
    }

    /// Returns a copy where every value present in `other` wins.
    #[must_use]
    pub fn overlay(self, other: Self) -> Self {
        Self {
            hotel: other.hotel.or(self.hotel),
            room_count: other.room_count.or(self.room_count),
            room_type: other.room_type.or(self.room_type),
            options: other.options.or(self.options),
        }
    }

    /// Returns true when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.hotel.is_none()
            && self.room_count.is_none()
            && self.room_type.is_none()
            && self.options.is_none()
    }
}
