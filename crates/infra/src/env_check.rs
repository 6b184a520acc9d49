//! Process environment access for CLI surfaces.

use reservation_config::collect_reservation_env;
use reservation_shared::ErrorEnvelope;
use std::collections::BTreeMap;

/// Infra-level error type (shared error envelope).
pub type InfraError = ErrorEnvelope;

/// Infra-level result type.
pub type InfraResult<T> = Result<T, InfraError>;

/// Read the reservation variables from the process environment.
///
/// Unrelated variables are never decoded, so a non-UTF-8 value elsewhere in
/// the environment does not fail.
pub fn reservation_process_env() -> InfraResult<BTreeMap<String, String>> {
    collect_reservation_env(std::env::vars_os()).map_err(ErrorEnvelope::from)
}
