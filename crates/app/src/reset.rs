//! Reset handler.

use crate::form_controller::ReservationFormDeps;
use reservation_ports::FormEvent;
use reservation_shared::Result;

/// Handle a form reset by hiding both output containers.
///
/// Message content is left in place. Field values are restored by the host's
/// native reset, which runs after this handler.
pub fn on_reset(deps: &ReservationFormDeps, _event: &dyn FormEvent) -> Result<()> {
    deps.view.hide_errors()?;
    deps.view.hide_confirmation()?;

    if let Some(logger) = deps.logger.as_ref() {
        logger.info(
            "reservation.reset.completed",
            "Reservation form reset",
            None,
        );
    }
    Ok(())
}
