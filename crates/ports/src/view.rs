//! Reservation display boundary contract.

use reservation_domain::{ConfirmationViewModel, ValidationResult};
use reservation_shared::Result;

/// Write access to the message and confirmation containers.
pub trait ReservationViewPort: Send + Sync {
    /// Remove any rendered messages from the message container.
    fn clear_errors(&self) -> Result<()>;

    /// Hide the message container, keeping its content.
    fn hide_errors(&self) -> Result<()>;

    /// Render the failed rules as a list and show the message container.
    fn render_errors(&self, result: &ValidationResult) -> Result<()>;

    /// Fill the confirmation panel from scratch and show it.
    fn render_confirmation(&self, view: &ConfirmationViewModel) -> Result<()>;

    /// Hide the confirmation panel.
    fn hide_confirmation(&self) -> Result<()>;
}
