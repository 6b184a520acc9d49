//! # reservation-adapters
//!
//! Adapter implementations for the reservation ports (in-memory host
//! document, HTML rendering, tracing logger).
//! This crate depends on `ports`, `domain`, and `shared`.

pub mod document;
pub mod form_input;
pub mod html;
pub mod logger;

pub use document::{
    DispatchOutcome, DocumentError, DocumentSnapshot, FieldValues, InMemoryDocument,
    MessageSnapshot, ReservationSnapshot,
};
pub use form_input::FormInput;
pub use logger::TracingLogger;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use reservation_ports::ports_crate_version;
    use reservation_shared::shared_crate_version;

    fn workspace_deps() -> Vec<String> {
        let cargo_toml = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
        let mut deps = Vec::new();
        let mut in_deps = false;

        for raw_line in cargo_toml.lines() {
            let line = raw_line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('[') {
                in_deps = line == "[dependencies]" || line == "[dev-dependencies]";
                continue;
            }
            if in_deps && line.starts_with("reservation-") {
                let key = line.split('=').next().unwrap_or("").trim();
                let name = key.split('.').next().unwrap_or("").trim();
                deps.push(name.to_string());
            }
        }

        deps
    }

    #[test]
    fn adapters_do_not_depend_on_app_or_infra() {
        let deps = workspace_deps();
        let forbidden = ["reservation-app", "reservation-infra"];

        for dep in &deps {
            assert!(
                !forbidden.contains(&dep.as_str()),
                "forbidden dependency found: {dep}"
            );
        }
    }

    #[test]
    fn adapters_crate_compiles() {
        let version = adapters_crate_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn adapters_can_use_ports_shared() {
        assert!(!ports_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }
}
