//! Presence and range rules applied to a field snapshot.

use crate::fields::FieldSnapshot;
use reservation_shared::BoundedU32;
use serde::{Serialize, Serializer};
use std::fmt;

/// Room count accepted by the form: between 1 and 12 rooms inclusive.
pub type RoomCount = BoundedU32<1, 12>;

/// Message shown when no hotel is selected.
pub const MESSAGE_HOTEL_REQUIRED: &str = "Choisir un hôtel";
/// Message shown when the room count is missing or out of range.
pub const MESSAGE_ROOM_COUNT_RANGE: &str = "Entrer un nombre de chambre, maximum 12";
/// Message shown when no room type is checked.
pub const MESSAGE_ROOM_TYPE_REQUIRED: &str = "Choisir un type de chambre";

/// One validation rule, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValidationRule {
    /// Hotel must not be the sentinel.
    HotelSelected,
    /// Room count must be an integer in `1..=12`.
    RoomCountInRange,
    /// A room type must be checked.
    RoomTypeSelected,
}

impl ValidationRule {
    /// All rules in evaluation order.
    pub const ALL: [Self; 3] = [
        Self::HotelSelected,
        Self::RoomCountInRange,
        Self::RoomTypeSelected,
    ];

    /// Stable identifier used in logs and JSON output.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::HotelSelected => "hotel_selected",
            Self::RoomCountInRange => "room_count_in_range",
            Self::RoomTypeSelected => "room_type_selected",
        }
    }

    /// Message displayed to the user when the rule fails.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::HotelSelected => MESSAGE_HOTEL_REQUIRED,
            Self::RoomCountInRange => MESSAGE_ROOM_COUNT_RANGE,
            Self::RoomTypeSelected => MESSAGE_ROOM_TYPE_REQUIRED,
        }
    }

    /// Returns true when the snapshot satisfies the rule.
    #[must_use]
    pub fn is_satisfied_by(self, snapshot: &FieldSnapshot) -> bool {
        match self {
            Self::HotelSelected => snapshot.has_hotel(),
            Self::RoomCountInRange => room_count_in_range(snapshot).is_some(),
            Self::RoomTypeSelected => snapshot.has_room_type(),
        }
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.id())
    }
}

impl Serialize for ValidationRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

/// Returns the room count when it parses and lies within `1..=12`.
#[must_use]
pub fn room_count_in_range(snapshot: &FieldSnapshot) -> Option<RoomCount> {
    snapshot
        .room_count
        .as_number()
        .and_then(|value| RoomCount::try_from_i64(value).ok())
}

/// Outcome of one validation pass. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    failed: Vec<ValidationRule>,
}

impl ValidationResult {
    /// Run every rule against the snapshot, keeping failures in rule order.
    #[must_use]
    pub fn evaluate(snapshot: &FieldSnapshot) -> Self {
        let failed = ValidationRule::ALL
            .into_iter()
            .filter(|rule| !rule.is_satisfied_by(snapshot))
            .collect();
        Self { failed }
    }

    /// Returns true when no rule failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failed.is_empty()
    }

    /// Failed rules in evaluation order.
    #[must_use]
    pub fn failed_rules(&self) -> &[ValidationRule] {
        &self.failed
    }

    /// Messages of the failed rules in evaluation order.
    #[must_use]
    pub fn messages(&self) -> Vec<&'static str> {
        self.failed.iter().map(|rule| rule.message()).collect()
    }

    /// Number of failed rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.failed.len()
    }

    /// Same as [`ValidationResult::is_valid`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failed.is_empty()
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ValidationResult", 3)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("rules", &self.failed)?;
        state.serialize_field("messages", &self.messages())?;
        state.end()
    }
}
