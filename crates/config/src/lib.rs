//! # reservation-config
//!
//! Configuration schema, validation, and normalization logic for the CLI.
//! This crate depends on `domain` and `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (env + file + overrides).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use schema::{
    CURRENT_CONFIG_VERSION, ConfigSchemaError, LogFormat, LogLevelSetting, LoggingConfig,
    PresentationConfig, ReservationConfig, ValidatedReservationConfig,
    parse_reservation_config_json, parse_reservation_config_toml,
};

pub use env::{
    ENV_IMAGE_DIR, ENV_IMAGE_EXTENSION, ENV_LOG_FORMAT, ENV_LOG_LEVEL, EnvParseError,
    ReservationEnv, apply_env_overrides, collect_reservation_env,
};
pub use load::{
    load_reservation_config_from_path, load_reservation_config_from_sources, to_pretty_json,
    to_pretty_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
