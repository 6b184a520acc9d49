//! Confirmation view model and photo path policy.

use crate::fields::FieldSnapshot;
use crate::validation::{RoomCount, ValidationResult, room_count_in_range};
use reservation_shared::{ErrorCode, ErrorEnvelope};
use serde::Serialize;
use std::fmt;

/// Default directory prefix for hotel photos.
pub const DEFAULT_IMAGE_DIR: &str = "images/";
/// Default file extension for hotel photos.
pub const DEFAULT_IMAGE_EXTENSION: &str = ".jpg";
/// Maximum number of characters after the extension dot.
pub const MAX_EXTENSION_CHARS: usize = 8;

/// Validation failures for photo path settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoPathError {
    /// Image directory is empty after trimming.
    EmptyImageDir,
    /// Image directory contains a `..` segment.
    ParentSegment {
        /// Trimmed directory that failed validation.
        image_dir: String,
    },
    /// Extension does not match `.[A-Za-z0-9]{1,8}`.
    InvalidExtension {
        /// Raw extension that failed validation.
        extension: String,
    },
}

impl fmt::Display for PhotoPathError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyImageDir => formatter.write_str("image directory must be non-empty"),
            Self::ParentSegment { .. } => {
                formatter.write_str("image directory must not contain `..` segments")
            },
            Self::InvalidExtension { .. } => write!(
                formatter,
                "image extension must be a dot followed by 1-{MAX_EXTENSION_CHARS} ASCII letters or digits"
            ),
        }
    }
}

impl std::error::Error for PhotoPathError {}

impl From<PhotoPathError> for ErrorEnvelope {
    fn from(error: PhotoPathError) -> Self {
        let envelope = Self::expected(
            ErrorCode::new("domain", "invalid_photo_path"),
            error.to_string(),
        );
        match error {
            PhotoPathError::EmptyImageDir => envelope,
            PhotoPathError::ParentSegment { image_dir } => {
                envelope.with_metadata("image_dir", image_dir)
            },
            PhotoPathError::InvalidExtension { extension } => {
                envelope.with_metadata("extension", extension)
            },
        }
    }
}

/// How a hotel name maps to its photo source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoPathPolicy {
    image_dir: Box<str>,
    image_extension: Box<str>,
}

impl PhotoPathPolicy {
    /// Validate and normalize a directory prefix and extension.
    ///
    /// The directory gains a trailing `/` when missing and the extension is
    /// lowercased.
    pub fn new(image_dir: &str, image_extension: &str) -> Result<Self, PhotoPathError> {
        let trimmed = image_dir.trim();
        if trimmed.is_empty() {
            return Err(PhotoPathError::EmptyImageDir);
        }
        if trimmed.split(['/', '\\']).any(|segment| segment == "..") {
            return Err(PhotoPathError::ParentSegment {
                image_dir: trimmed.to_owned(),
            });
        }

        let extension = image_extension.trim();
        let valid_extension = extension.strip_prefix('.').is_some_and(|rest| {
            (1..=MAX_EXTENSION_CHARS).contains(&rest.len())
                && rest.bytes().all(|byte| byte.is_ascii_alphanumeric())
        });
        if !valid_extension {
            return Err(PhotoPathError::InvalidExtension {
                extension: image_extension.to_owned(),
            });
        }

        let mut dir = trimmed.to_owned();
        if !dir.ends_with('/') {
            dir.push('/');
        }

        Ok(Self {
            image_dir: dir.into_boxed_str(),
            image_extension: extension.to_ascii_lowercase().into_boxed_str(),
        })
    }

    /// Directory prefix, always ending with `/`.
    #[must_use]
    pub fn image_dir(&self) -> &str {
        &self.image_dir
    }

    /// Lowercased extension including the leading dot.
    #[must_use]
    pub fn image_extension(&self) -> &str {
        &self.image_extension
    }

    /// Photo source for a hotel: prefix, lowercased name, extension.
    #[must_use]
    pub fn photo_src(&self, hotel: &str) -> String {
        format!(
            "{}{}{}",
            self.image_dir,
            hotel.to_lowercase(),
            self.image_extension
        )
    }
}

impl Default for PhotoPathPolicy {
    fn default() -> Self {
        Self {
            image_dir: DEFAULT_IMAGE_DIR.into(),
            image_extension: DEFAULT_IMAGE_EXTENSION.into(),
        }
    }
}

/// Data rendered into the confirmation panel.
///
/// Only obtainable from a snapshot that passes every validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationViewModel {
    hotel: String,
    room_count: RoomCount,
    room_type: String,
    options: Vec<String>,
    photo_src: String,
}

impl ConfirmationViewModel {
    /// Build the view model, or return the failed validation result.
    pub fn from_snapshot(
        snapshot: &FieldSnapshot,
        photos: &PhotoPathPolicy,
    ) -> Result<Self, ValidationResult> {
        let result = ValidationResult::evaluate(snapshot);
        match room_count_in_range(snapshot) {
            Some(room_count) if result.is_valid() => Ok(Self {
                hotel: snapshot.hotel.clone(),
                room_count,
                room_type: snapshot.room_type.clone(),
                options: snapshot.options.clone(),
                photo_src: photos.photo_src(&snapshot.hotel),
            }),
            _ => Err(result),
        }
    }

    /// Hotel name, case unchanged.
    #[must_use]
    pub fn hotel(&self) -> &str {
        &self.hotel
    }

    /// Validated room count.
    #[must_use]
    pub const fn room_count(&self) -> RoomCount {
        self.room_count
    }

    /// Checked room type.
    #[must_use]
    pub fn room_type(&self) -> &str {
        &self.room_type
    }

    /// Checked options in document order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Photo source derived from the hotel name.
    #[must_use]
    pub fn photo_src(&self) -> &str {
        &self.photo_src
    }
}
