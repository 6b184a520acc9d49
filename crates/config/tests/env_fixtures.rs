//! Integration tests for env parsing and env-to-config merging.

use reservation_config::{
    EnvParseError, LogFormat, LogLevelSetting, ReservationConfig, ReservationEnv,
    apply_env_overrides, load_reservation_config_from_path,
};
use reservation_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

fn fixture_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

fn read_env_map(relative: &str) -> Result<BTreeMap<String, String>, Box<dyn Error>> {
    let contents = fs::read_to_string(fixture_path(relative))?;
    Ok(serde_json::from_str(&contents)?)
}

#[test]
fn env_fixtures_merge_into_effective_config() -> Result<(), Box<dyn Error>> {
    let env_map = read_env_map("env/reservation-env.valid.json")?;
    let env = ReservationEnv::from_map(&env_map)?;

    let config = apply_env_overrides(ReservationConfig::default(), &env)?;

    assert_eq!(config.presentation.image_dir, "cdn/photos/");
    assert_eq!(config.presentation.image_extension, ".webp");
    assert_eq!(config.logging.level, LogLevelSetting::Warn);
    assert_eq!(config.logging.format, LogFormat::Json);
    Ok(())
}

#[test]
fn env_beats_config_file() -> Result<(), Box<dyn Error>> {
    let env_map = read_env_map("env/reservation-env.valid.json")?;
    let env = ReservationEnv::from_map(&env_map)?;
    let path = fixture_path("config/reservation-config.default.toml");

    let config = load_reservation_config_from_path(
        Some(&path),
        Some(r#"{"presentation": {"imageDir": "overrides/"}}"#),
        &env,
    )?;
    assert_eq!(config.presentation.image_dir, "cdn/photos/");
    assert_eq!(config.logging.level, LogLevelSetting::Warn);
    Ok(())
}

#[test]
fn invalid_env_fixture_maps_to_config_code() -> Result<(), Box<dyn Error>> {
    let env_map = read_env_map("env/reservation-env.invalid.json")?;
    let error = ReservationEnv::from_map(&env_map)
        .err()
        .ok_or_else(|| std::io::Error::other("expected env error"))?;
    assert!(matches!(error, EnvParseError::InvalidEnum { .. }));

    let envelope: ErrorEnvelope = error.into();
    assert_eq!(envelope.code, ErrorCode::new("config", "invalid_env_enum"));
    assert_eq!(
        envelope.metadata.get("value").map(String::as_str),
        Some("verbose")
    );
    Ok(())
}
