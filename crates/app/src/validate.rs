//! Pure validation step.

use reservation_domain::{FieldSnapshot, ValidationResult};
use reservation_ports::ReservationFormPort;
use reservation_shared::Result;

/// Validate a snapshot. Reads nothing and writes nothing.
#[must_use]
pub fn validate(snapshot: &FieldSnapshot) -> ValidationResult {
    ValidationResult::evaluate(snapshot)
}

/// Capture the current fields and validate them.
pub fn validate_form(form: &dyn ReservationFormPort) -> Result<(FieldSnapshot, ValidationResult)> {
    let snapshot = form.read_fields()?;
    let result = validate(&snapshot);
    Ok((snapshot, result))
}
