//! # reservation-infra
//!
//! Infrastructure wiring and runtime composition.
//! This crate depends on `app`, `adapters`, `config`, and `shared`.

/// Local CLI orchestration helpers.
pub mod cli_local;
/// Config loading helpers used by CLI surfaces.
pub mod config_check;
/// Process environment access used by CLI surfaces.
pub mod env_check;

pub use cli_local::{
    LocalSession, ReplayReport, ReplayStep, SubmitReport, ValidateReport, command_logger,
    run_replay_local, run_submit_local, run_validate_local,
};
pub use config_check::{
    load_effective_config, load_effective_config_json, load_effective_config_toml,
};
pub use env_check::{InfraError, InfraResult, reservation_process_env};

pub use reservation_adapters::{DocumentSnapshot, FormInput};
pub use reservation_app::SubmitOutcome;
pub use reservation_config::{LogFormat, LogLevelSetting, ValidatedReservationConfig};
pub use reservation_ports::FormEventKind;

/// Returns the infra crate version.
#[must_use]
pub const fn infra_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
