//! Config loading helpers (env + file + overrides).
//!
//! The loader is responsible for deterministic merge order and surfacing
//! user-facing errors as typed `ErrorEnvelope`s.

use crate::{
    LogFormat, LogLevelSetting, ReservationConfig, ReservationEnv, ValidatedReservationConfig,
    apply_env_overrides,
};
use reservation_shared::{ErrorCode, ErrorEnvelope};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

/// Load the reservation config from sources using a deterministic precedence order.
///
/// Precedence (highest wins):
/// - env overrides (`ReservationEnv`)
/// - overrides JSON (partial config)
/// - config JSON (file content)
/// - defaults (`ReservationConfig::default()`)
pub fn load_reservation_config_from_sources(
    config_json: Option<&str>,
    overrides_json: Option<&str>,
    env: &ReservationEnv,
) -> Result<ValidatedReservationConfig, ErrorEnvelope> {
    let config = match config_json {
        None => ReservationConfig::default(),
        Some(input) => parse_config_unvalidated(input, ConfigFormat::Json)?,
    };

    merge_and_validate(config, overrides_json, env)
}

/// Load the reservation config from an optional file path.
pub fn load_reservation_config_from_path(
    config_path: Option<&Path>,
    overrides_json: Option<&str>,
    env: &ReservationEnv,
) -> Result<ValidatedReservationConfig, ErrorEnvelope> {
    let config = match config_path {
        None => ReservationConfig::default(),
        Some(path) => {
            let config_text = read_config_file(path)?;
            let format = detect_config_format(path)?;
            parse_config_unvalidated(&config_text, format)?
        },
    };

    merge_and_validate(config, overrides_json, env)
}

/// Serialize the config as deterministic pretty JSON (with trailing newline).
pub fn to_pretty_json(config: &ReservationConfig) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::internal(),
            format!("failed to serialize config: {error}"),
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize the config as deterministic pretty TOML (with trailing newline).
pub fn to_pretty_toml(config: &ReservationConfig) -> Result<String, ErrorEnvelope> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize config TOML: {error}"),
        )
    })?;
    output.push('\n');
    Ok(output)
}

fn merge_and_validate(
    mut config: ReservationConfig,
    overrides_json: Option<&str>,
    env: &ReservationEnv,
) -> Result<ValidatedReservationConfig, ErrorEnvelope> {
    if let Some(input) = overrides_json {
        let overrides = parse_overrides_json(input)?;
        apply_overrides(&mut config, overrides);
    }

    // env is applied last and also validates/normalizes the resulting config.
    apply_env_overrides(config, env)
}

fn parse_config_unvalidated(
    input: &str,
    format: ConfigFormat,
) -> Result<ReservationConfig, ErrorEnvelope> {
    match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid config JSON: {error}"),
            )
            .with_metadata("source", "config")
        }),
        ConfigFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid config TOML: {error}"),
            )
            .with_metadata("source", "config")
        }),
    }
}

fn parse_overrides_json(input: &str) -> Result<ReservationConfigOverrides, ErrorEnvelope> {
    serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid overrides JSON: {error}"),
        )
        .with_metadata("source", "overrides")
    })
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "config_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "config_file_permission_denied")
            },
            _ => ErrorCode::new("config", "config_file_io"),
        };

        ErrorEnvelope::expected(code, format!("failed to read config file: {error}"))
            .with_metadata("path", path.to_string_lossy().to_string())
    })
}

fn detect_config_format(path: &Path) -> Result<ConfigFormat, ErrorEnvelope> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        None | Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported config format; use .json or .toml",
        )
        .with_metadata("extension", other.to_string())),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
struct ReservationConfigOverrides {
    version: Option<u32>,
    presentation: PresentationOverrides,
    logging: LoggingOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
struct PresentationOverrides {
    image_dir: Option<String>,
    image_extension: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
struct LoggingOverrides {
    level: Option<LogLevelSetting>,
    format: Option<LogFormat>,
}

fn apply_overrides(config: &mut ReservationConfig, overrides: ReservationConfigOverrides) {
    if let Some(version) = overrides.version {
        config.version = version;
    }
    if let Some(image_dir) = overrides.presentation.image_dir {
        config.presentation.image_dir = image_dir;
    }
    if let Some(image_extension) = overrides.presentation.image_extension {
        config.presentation.image_extension = image_extension;
    }
    if let Some(level) = overrides.logging.level {
        config.logging.level = level;
    }
    if let Some(format) = overrides.logging.format {
        config.logging.format = format;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_precedence_is_deterministic() -> Result<(), Box<dyn std::error::Error>> {
        let config_json = r#"{
          "version": 1,
          "presentation": { "imageDir": "from-file/" }
        }"#;

        let overrides_json = r#"{
          "presentation": { "imageDir": "from-overrides/", "imageExtension": ".png" }
        }"#;

        let env = ReservationEnv {
            image_dir: Some("from-env".into()),
            ..ReservationEnv::default()
        };

        let config =
            load_reservation_config_from_sources(Some(config_json), Some(overrides_json), &env)?;
        assert_eq!(config.presentation.image_dir, "from-env/");
        assert_eq!(config.presentation.image_extension, ".png");
        Ok(())
    }

    #[test]
    fn overrides_beat_file_values() -> Result<(), Box<dyn std::error::Error>> {
        let config_json = r#"{ "logging": { "level": "warn", "format": "json" } }"#;
        let overrides_json = r#"{ "logging": { "level": "debug" } }"#;

        let config = load_reservation_config_from_sources(
            Some(config_json),
            Some(overrides_json),
            &ReservationEnv::default(),
        )?;
        assert_eq!(config.logging.level, LogLevelSetting::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
        Ok(())
    }

    #[test]
    fn serialization_is_deterministic() -> Result<(), Box<dyn std::error::Error>> {
        let env = ReservationEnv::default();
        let config = load_reservation_config_from_sources(None, None, &env)?;
        let first = to_pretty_json(&config)?;
        let second = to_pretty_json(&config)?;
        assert_eq!(first, second);
        assert!(first.ends_with('\n'));

        let toml = to_pretty_toml(&config)?;
        assert!(toml.contains("imageDir = \"images/\""));
        Ok(())
    }

    #[test]
    fn invalid_config_value_overridden_by_valid_env_succeeds()
    -> Result<(), Box<dyn std::error::Error>> {
        // The file extension is over the length limit; env replaces it before validation.
        let config_json = r#"{ "presentation": { "imageExtension": ".jpeg20000" } }"#;
        let env = ReservationEnv {
            image_extension: Some(".png".into()),
            ..ReservationEnv::default()
        };

        let config = load_reservation_config_from_sources(Some(config_json), None, &env)?;
        assert_eq!(config.presentation.image_extension, ".png");
        Ok(())
    }

    #[test]
    fn valid_config_with_invalid_overrides_fails() -> Result<(), Box<dyn std::error::Error>> {
        let overrides_json = r#"{ "presentation": { "imageDir": }"#;

        let result = load_reservation_config_from_sources(
            None,
            Some(overrides_json),
            &ReservationEnv::default(),
        );
        let error = result
            .err()
            .ok_or_else(|| std::io::Error::other("expected overrides error"))?;
        assert_eq!(error.code, ErrorCode::new("config", "invalid_json"));
        assert_eq!(
            error.metadata.get("source").map(String::as_str),
            Some("overrides")
        );
        Ok(())
    }

    #[test]
    fn unsupported_extension_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let error = load_reservation_config_from_path(
            Some(Path::new("reservation.yaml")),
            None,
            &ReservationEnv::default(),
        )
        .err()
        .ok_or_else(|| std::io::Error::other("expected read error"))?;
        // The file does not exist, so the read fails before format detection.
        assert_eq!(error.code, ErrorCode::new("config", "config_file_not_found"));

        let format_error = detect_config_format(Path::new("reservation.yaml"))
            .err()
            .ok_or_else(|| std::io::Error::other("expected format error"))?;
        assert_eq!(
            format_error.code,
            ErrorCode::new("config", "unsupported_format")
        );
        Ok(())
    }
}
