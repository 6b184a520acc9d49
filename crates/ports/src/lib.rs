//! # reservation-ports
//!
//! Port traits for the hotel reservation hexagonal architecture.
//!
//! This crate defines the interfaces between the form logic and the host
//! document. It depends only on `domain` and `shared`.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod event;
pub mod form;
pub mod logger;
pub mod view;

pub use event::*;
pub use form::*;
pub use logger::*;
pub use view::*;

// Re-export selected domain types used in port signatures, so adapter crates
// can implement ports without directly depending on `reservation-domain`.
pub use reservation_domain::{
    ConfirmationViewModel, FieldSnapshot, RoomCountInput, ValidationResult, ValidationRule,
};
