//! Reservation form field boundary contract.

use reservation_domain::{FieldSnapshot, RoomCountInput};
use reservation_shared::Result;

/// Read access to the reservation form fields.
///
/// Every accessor reads the live host state; nothing is cached between calls.
pub trait ReservationFormPort: Send + Sync {
    /// Selected hotel identifier, or the `"0"` sentinel.
    fn hotel(&self) -> Result<String>;

    /// Raw text of the room-count field.
    fn room_count_text(&self) -> Result<String>;

    /// Value of the checked room-type radio, or an empty string.
    fn room_type(&self) -> Result<String>;

    /// Values of the checked option checkboxes in document order.
    fn options(&self) -> Result<Vec<String>>;

    /// Room count parsed from the text field.
    fn room_count(&self) -> Result<RoomCountInput> {
        Ok(RoomCountInput::parse(&self.room_count_text()?))
    }

    /// Capture all fields together.
    fn read_fields(&self) -> Result<FieldSnapshot> {
        Ok(FieldSnapshot {
            hotel: self.hotel()?,
            room_count: self.room_count()?,
            room_type: self.room_type()?,
            options: self.options()?,
        })
    }
}
