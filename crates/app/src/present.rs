//! Render a validation decision into the view.

use reservation_domain::{
    ConfirmationViewModel, FieldSnapshot, PhotoPathPolicy, ValidationResult, ValidationRule,
};
use reservation_ports::ReservationViewPort;
use reservation_shared::Result;

/// What a submit attempt decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one rule failed; messages are in rule order.
    Rejected {
        /// Failed rules in evaluation order.
        rules: Vec<ValidationRule>,
        /// Messages rendered into the message container.
        messages: Vec<&'static str>,
    },
    /// Every rule passed and the confirmation panel is shown.
    Confirmed {
        /// View model rendered into the confirmation panel.
        view: ConfirmationViewModel,
    },
}

impl SubmitOutcome {
    /// Returns true when the confirmation panel was rendered.
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }
}

/// Apply a validation result to the view.
///
/// A failed result renders the messages and hides the confirmation. A
/// passing result renders the confirmation built from `snapshot`; if that
/// snapshot no longer passes, its own failures are rendered instead.
pub fn present(
    view: &dyn ReservationViewPort,
    photos: &PhotoPathPolicy,
    result: &ValidationResult,
    snapshot: &FieldSnapshot,
) -> Result<SubmitOutcome> {
    if !result.is_valid() {
        return reject(view, result);
    }

    match ConfirmationViewModel::from_snapshot(snapshot, photos) {
        Ok(model) => {
            view.render_confirmation(&model)?;
            Ok(SubmitOutcome::Confirmed { view: model })
        },
        Err(stale) => reject(view, &stale),
    }
}

fn reject(view: &dyn ReservationViewPort, result: &ValidationResult) -> Result<SubmitOutcome> {
    view.render_errors(result)?;
    view.hide_confirmation()?;
    Ok(SubmitOutcome::Rejected {
        rules: result.failed_rules().to_vec(),
        messages: result.messages(),
    })
}
