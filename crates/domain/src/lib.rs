//! # reservation-domain
//!
//! Domain model for the hotel reservation form.
//!
//! This crate contains the form logic with no infrastructure dependencies:
//!
//! - **Fields** - `FieldSnapshot`, `RoomCountInput`, the hotel sentinel
//! - **Validation** - `ValidationRule`, `ValidationResult`, `RoomCount`
//! - **Confirmation** - `ConfirmationViewModel`, `PhotoPathPolicy`
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - No infrastructure or adapter dependencies
//! - Pure domain logic with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

// Re-export shared types for convenience
pub use reservation_shared::shared_crate_version;

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod confirmation;
pub mod fields;
pub mod validation;

pub use confirmation::{
    ConfirmationViewModel, DEFAULT_IMAGE_DIR, DEFAULT_IMAGE_EXTENSION, PhotoPathError,
    PhotoPathPolicy,
};
pub use fields::{FieldSnapshot, HOTEL_NOT_SELECTED, RoomCountInput};
pub use validation::{
    MESSAGE_HOTEL_REQUIRED, MESSAGE_ROOM_COUNT_RANGE, MESSAGE_ROOM_TYPE_REQUIRED, RoomCount,
    ValidationResult, ValidationRule, room_count_in_range,
};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
