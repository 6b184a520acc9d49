//! Form field snapshots and room-count parsing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hotel select value meaning "no hotel chosen".
pub const HOTEL_NOT_SELECTED: &str = "0";

/// Room count as read from the text field.
///
/// The text is parsed leniently: leading whitespace and an optional sign are
/// accepted, a `0x` prefix switches to hexadecimal, and parsing stops at the
/// first character that is not a digit. Text without any leading digit is
/// [`RoomCountInput::NotANumber`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoomCountInput {
    /// Parsed integer, saturated to the `i64` range.
    Number(i64),
    /// The text did not start with an integer.
    NotANumber,
}

impl RoomCountInput {
    /// Parse the raw text of the room-count field.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let rest = text.trim_start_matches(is_leading_space);
        let (negative, rest) = match rest.as_bytes().first() {
            Some(b'-') => (true, rest.get(1..).unwrap_or_default()),
            Some(b'+') => (false, rest.get(1..).unwrap_or_default()),
            _ => (false, rest),
        };
        let (radix, digits) = match rest.get(..2) {
            Some("0x" | "0X") => (16, rest.get(2..).unwrap_or_default()),
            _ => (10, rest),
        };

        let mut magnitude: i64 = 0;
        let mut consumed = false;
        for digit in digits.chars().map_while(|ch| ch.to_digit(radix)) {
            consumed = true;
            magnitude = magnitude
                .saturating_mul(i64::from(radix))
                .saturating_add(i64::from(digit));
        }

        if !consumed {
            return Self::NotANumber;
        }
        Self::Number(if negative { magnitude.saturating_neg() } else { magnitude })
    }

    /// Returns the parsed integer, if any.
    #[must_use]
    pub const fn as_number(self) -> Option<i64> {
        match self {
            Self::Number(value) => Some(value),
            Self::NotANumber => None,
        }
    }
}

impl fmt::Display for RoomCountInput {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(formatter, "{value}"),
            Self::NotANumber => formatter.write_str("NaN"),
        }
    }
}

// Host whitespace: Unicode `White_Space` minus NEL, plus the byte-order mark.
fn is_leading_space(ch: char) -> bool {
    (ch.is_whitespace() && ch != '\u{85}') || ch == '\u{feff}'
}

/// Immutable capture of every reservation field at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSnapshot {
    /// Selected hotel identifier, or [`HOTEL_NOT_SELECTED`].
    pub hotel: String,
    /// Parsed room count.
    pub room_count: RoomCountInput,
    /// Checked room type, empty when none is checked.
    pub room_type: String,
    /// Checked options in document order.
    pub options: Vec<String>,
}

impl FieldSnapshot {
    /// Build a snapshot from raw field values, parsing the room-count text.
    #[must_use]
    pub fn capture(
        hotel: impl Into<String>,
        room_count_text: &str,
        room_type: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        Self {
            hotel: hotel.into(),
            room_count: RoomCountInput::parse(room_count_text),
            room_type: room_type.into(),
            options,
        }
    }

    /// Returns true when a hotel other than the sentinel is selected.
    #[must_use]
    pub fn has_hotel(&self) -> bool {
        self.hotel != HOTEL_NOT_SELECTED
    }

    /// Returns true when a room type is checked.
    #[must_use]
    pub fn has_room_type(&self) -> bool {
        !self.room_type.is_empty()
    }
}
