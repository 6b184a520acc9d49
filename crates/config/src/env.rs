//! Environment variable parsing and env-to-config merging.
//!
//! Env parsing is strict: a variable that is present must carry a usable
//! value, otherwise loading fails instead of silently falling back.

use crate::schema::{LogFormat, LogLevelSetting, ReservationConfig, ValidatedReservationConfig};
use reservation_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fmt;

/// Env var: photo directory prefix.
pub const ENV_IMAGE_DIR: &str = "RESERVATION_IMAGE_DIR";
/// Env var: photo file extension.
pub const ENV_IMAGE_EXTENSION: &str = "RESERVATION_IMAGE_EXTENSION";
/// Env var: log level (`trace` | `debug` | `info` | `warn` | `error`).
pub const ENV_LOG_LEVEL: &str = "RESERVATION_LOG_LEVEL";
/// Env var: log format (`text` | `json`).
pub const ENV_LOG_FORMAT: &str = "RESERVATION_LOG_FORMAT";

const ALL_ENV_VARS: [&str; 4] = [ENV_IMAGE_DIR, ENV_IMAGE_EXTENSION, ENV_LOG_LEVEL, ENV_LOG_FORMAT];

/// Parsed env overrides. `None` means the variable was not set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationEnv {
    /// Override for `presentation.imageDir`.
    pub image_dir: Option<Box<str>>,
    /// Override for `presentation.imageExtension`.
    pub image_extension: Option<Box<str>>,
    /// Override for `logging.level`.
    pub log_level: Option<LogLevelSetting>,
    /// Override for `logging.format`.
    pub log_format: Option<LogFormat>,
}

impl ReservationEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            image_dir: parse_optional_trimmed_string(map, ENV_IMAGE_DIR)?,
            image_extension: parse_optional_trimmed_string(map, ENV_IMAGE_EXTENSION)?,
            log_level: parse_optional_enum(map, ENV_LOG_LEVEL, LogLevelSetting::parse)?,
            log_format: parse_optional_enum(map, ENV_LOG_FORMAT, LogFormat::parse)?,
        })
    }

    /// Returns true when no override is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.image_dir.is_none()
            && self.image_extension.is_none()
            && self.log_level.is_none()
            && self.log_format.is_none()
    }
}

/// Pick the reservation variables out of raw `(key, value)` pairs such as
/// [`std::env::vars_os`].
///
/// Keys that are not UTF-8 or not recognized are skipped. A recognized key
/// whose value is not UTF-8 fails.
pub fn collect_reservation_env<I>(vars: I) -> Result<BTreeMap<String, String>, EnvParseError>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut map = BTreeMap::new();
    for (key, value) in vars {
        let Some(var) = key
            .to_str()
            .and_then(|key| ALL_ENV_VARS.into_iter().find(|name| *name == key))
        else {
            continue;
        };
        let value = value
            .into_string()
            .map_err(|_| EnvParseError::NotUnicode { var })?;
        map.insert(var.to_owned(), value);
    }
    Ok(map)
}

/// Apply env overrides to a base config (env wins over file/default values).
pub fn apply_env_overrides(
    base: ReservationConfig,
    env: &ReservationEnv,
) -> Result<ValidatedReservationConfig, ErrorEnvelope> {
    let mut config = base;
    if let Some(image_dir) = env.image_dir.as_deref() {
        image_dir.clone_into(&mut config.presentation.image_dir);
    }
    if let Some(image_extension) = env.image_extension.as_deref() {
        image_extension.clone_into(&mut config.presentation.image_extension);
    }
    if let Some(level) = env.log_level {
        config.logging.level = level;
    }
    if let Some(format) = env.log_format {
        config.logging.format = format;
    }

    config.validate_and_normalize().map_err(Into::into)
}

/// Validation failures when parsing env variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Enum env var had an invalid value.
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// An env var value was not valid UTF-8.
    NotUnicode {
        /// Env var name.
        var: &'static str,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
            Self::NotUnicode { .. } => ErrorCode::new("config", "invalid_env_encoding"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidEnum { var, .. } => write!(formatter, "{var} has an unsupported value"),
            Self::NotUnicode { var } => write!(formatter, "{var} is not valid UTF-8"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } | EnvParseError::NotUnicode { var } => {
                envelope.with_metadata("env_var", var)
            },
            EnvParseError::InvalidEnum { var, value } => envelope
                .with_metadata("env_var", var)
                .with_metadata("value", value),
        }
    }
}

fn parse_optional_trimmed_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Box<str>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    Ok(Some(trimmed.to_owned().into_boxed_str()))
}

fn parse_optional_enum<T>(
    map: &BTreeMap<String, String>,
    var: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, EnvParseError> {
    let Some(raw) = parse_optional_trimmed_string(map, var)? else {
        return Ok(None);
    };

    parse(&raw).map(Some).ok_or_else(|| EnvParseError::InvalidEnum {
        var,
        value: raw.into_string(),
    })
}
