//! Reservation configuration schema, defaults, validation, and normalization.
//!
//! - Deserialization uses `serde` (JSON or TOML).
//! - Validation is manual and returns typed errors mapped to `ErrorEnvelope`.
//! - Normalization rewrites the presentation paths into their canonical form.

use reservation_domain::{
    DEFAULT_IMAGE_DIR, DEFAULT_IMAGE_EXTENSION, PhotoPathError, PhotoPathPolicy,
};
use reservation_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current supported configuration schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Top-level reservation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ReservationConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Confirmation rendering settings.
    pub presentation: PresentationConfig,
    /// Structured logging settings.
    pub logging: LoggingConfig,
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            presentation: PresentationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ReservationConfig {
    /// Validate and normalize the config.
    pub fn validate_and_normalize(
        mut self,
    ) -> Result<ValidatedReservationConfig, ConfigSchemaError> {
        self.validate_version()?;

        let photos = self.presentation.to_policy()?;
        self.presentation.image_dir = photos.image_dir().to_owned();
        self.presentation.image_extension = photos.image_extension().to_owned();

        Ok(ValidatedReservationConfig { raw: self, photos })
    }

    const fn validate_version(&self) -> Result<(), ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }
        Ok(())
    }
}

/// Validated config wrapper carrying the derived photo path policy.
#[derive(Debug, Clone)]
pub struct ValidatedReservationConfig {
    raw: ReservationConfig,
    photos: PhotoPathPolicy,
}

impl ValidatedReservationConfig {
    /// Photo path policy built from the presentation section.
    #[must_use]
    pub const fn photo_policy(&self) -> &PhotoPathPolicy {
        &self.photos
    }

    /// Borrow the raw config.
    #[must_use]
    pub const fn as_ref(&self) -> &ReservationConfig {
        &self.raw
    }

    /// Consume the wrapper and return the raw config.
    #[must_use]
    pub fn into_inner(self) -> ReservationConfig {
        self.raw
    }
}

impl AsRef<ReservationConfig> for ValidatedReservationConfig {
    fn as_ref(&self) -> &ReservationConfig {
        &self.raw
    }
}

impl std::ops::Deref for ValidatedReservationConfig {
    type Target = ReservationConfig;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

/// Parse a reservation config from a JSON string, applying validation and normalization.
pub fn parse_reservation_config_json(
    input: &str,
) -> Result<ValidatedReservationConfig, ErrorEnvelope> {
    let config: ReservationConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Parse a reservation config from a TOML string, applying validation and normalization.
pub fn parse_reservation_config_toml(
    input: &str,
) -> Result<ValidatedReservationConfig, ErrorEnvelope> {
    let config: ReservationConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Confirmation rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct PresentationConfig {
    /// Directory prefix for hotel photos.
    pub image_dir: String,
    /// Photo file extension, including the dot.
    pub image_extension: String,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            image_dir: DEFAULT_IMAGE_DIR.to_owned(),
            image_extension: DEFAULT_IMAGE_EXTENSION.to_owned(),
        }
    }
}

impl PresentationConfig {
    fn to_policy(&self) -> Result<PhotoPathPolicy, ConfigSchemaError> {
        PhotoPathPolicy::new(&self.image_dir, &self.image_extension).map_err(Into::into)
    }
}

/// Minimum log level emitted by the CLI subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevelSetting {
    /// Everything.
    Trace,
    /// Debug and above.
    Debug,
    /// Info and above.
    #[default]
    Info,
    /// Warnings and errors.
    Warn,
    /// Errors only.
    Error,
}

impl LogLevelSetting {
    /// Directive understood by `tracing` env filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Parse a case-insensitive level name.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parse a case-insensitive format name.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Structured logging configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Minimum level.
    pub level: LogLevelSetting,
    /// Output format.
    pub format: LogFormat,
}

/// Typed validation errors for the configuration schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this binary.
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// `presentation.imageDir` is empty or escapes its root.
    InvalidImageDir {
        /// Value provided.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// `presentation.imageExtension` is malformed.
    InvalidImageExtension {
        /// Value provided.
        value: String,
    },
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
            Self::InvalidImageDir { .. } => ErrorCode::new("config", "invalid_image_dir"),
            Self::InvalidImageExtension { .. } => {
                ErrorCode::new("config", "invalid_image_extension")
            },
        }
    }
}

impl From<PhotoPathError> for ConfigSchemaError {
    fn from(error: PhotoPathError) -> Self {
        match error {
            PhotoPathError::EmptyImageDir => Self::InvalidImageDir {
                value: String::new(),
                reason: "must be non-empty",
            },
            PhotoPathError::ParentSegment { image_dir } => Self::InvalidImageDir {
                value: image_dir,
                reason: "must not contain `..` segments",
            },
            PhotoPathError::InvalidExtension { extension } => {
                Self::InvalidImageExtension { value: extension }
            },
        }
    }
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, supported } => write!(
                formatter,
                "unsupported config version {found} (supported: {supported})"
            ),
            Self::InvalidImageDir { reason, .. } => {
                write!(formatter, "presentation.imageDir {reason}")
            },
            Self::InvalidImageExtension { .. } => formatter.write_str(
                "presentation.imageExtension must be a dot followed by 1-8 ASCII letters or digits",
            ),
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => envelope
                .with_metadata("found", found.to_string())
                .with_metadata("supported", supported.to_string()),
            ConfigSchemaError::InvalidImageDir { value, .. } => envelope
                .with_metadata("section", "presentation")
                .with_metadata("field", "imageDir")
                .with_metadata("value", value),
            ConfigSchemaError::InvalidImageExtension { value } => envelope
                .with_metadata("section", "presentation")
                .with_metadata("field", "imageExtension")
                .with_metadata("value", value),
        }
    }
}
