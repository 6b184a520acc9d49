//! # reservation-app
//!
//! Application use cases for the reservation form: validate, present,
//! submit and reset handlers, and binding them to a form.
//! This crate depends on `ports`, `domain`, and `shared`.

pub mod form_controller;
pub mod present;
pub mod reset;
pub mod submit;
pub mod validate;

pub use form_controller::{ReservationFormDeps, ReservationFormValidator, bind_reservation_form};
pub use present::{SubmitOutcome, present};
pub use reset::on_reset;
pub use submit::on_submit;
pub use validate::{validate, validate_form};

/// Returns the app crate version.
#[must_use]
pub const fn app_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
