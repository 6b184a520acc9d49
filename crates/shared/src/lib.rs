//! # reservation-shared
//!
//! Shared result types, error handling, and invariant helpers for the
//! hotel reservation workspace.
//!
//! This crate provides foundational types that are used across all other crates:
//!
//! - Result and error envelope types
//! - Bounded integers that carry range invariants in the type
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Serde-compatible** - Public error types support serialization

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod invariants;
pub mod result;

pub use errors::{ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata};
pub use invariants::{BoundedU32, BoundsError};
pub use result::Result;

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::errors::{ErrorCode, ErrorEnvelope, ErrorKind};
    use super::result::Result;

    #[test]
    fn shared_error_types_are_available() {
        let error = ErrorEnvelope::expected(ErrorCode::invalid_input(), "invalid");
        assert_eq!(error.kind, ErrorKind::Expected);
    }

    #[test]
    fn shared_result_type_is_available() {
        let value: Result<i32> = Ok(5);
        assert!(matches!(value.map(|value| value + 1), Ok(6)));
    }
}
