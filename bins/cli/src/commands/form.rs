//! Form field flags shared by commands.

use clap::Args;
use reservation_infra::{FormInput, InfraError, InfraResult};
use reservation_shared::ErrorCode;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Reservation form field values.
#[derive(Debug, Default, Args)]
pub struct FormArgs {
    /// Hotel select value (`0` means no hotel selected).
    #[arg(long)]
    pub hotel: Option<String>,
    /// Room-count text as typed into the form.
    #[arg(long, allow_hyphen_values = true)]
    pub rooms: Option<String>,
    /// Checked room type.
    #[arg(long)]
    pub room_type: Option<String>,
    /// Checked option; repeat for several, order is kept.
    #[arg(long = "option")]
    pub options: Vec<String>,
    /// JSON form input file keyed by field name, or `-` for stdin.
    #[arg(long)]
    pub form_json: Option<PathBuf>,
}

impl FormArgs {
    /// Field values given as flags.
    #[must_use]
    pub fn flags(&self) -> FormInput {
        FormInput {
            hotel: self.hotel.clone(),
            room_count: self.rooms.clone(),
            room_type: self.room_type.clone(),
            options: (!self.options.is_empty()).then(|| self.options.clone()),
        }
    }

    /// Resolve the form input: JSON document first, then flags on top.
    pub fn load(&self) -> InfraResult<FormInput> {
        let base = match self.form_json.as_deref() {
            None => FormInput::default(),
            Some(path) => FormInput::from_json(&read_form_json(path)?)?,
        };
        Ok(base.overlay(self.flags()))
    }
}

fn read_form_json(path: &Path) -> InfraResult<String> {
    let read = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer).map(|_| buffer)
    } else {
        std::fs::read_to_string(path)
    };
    read.map_err(|error| {
        InfraError::unexpected(
            ErrorCode::io(),
            format!("failed to read form input: {error}"),
        )
        .with_metadata("path", path.to_string_lossy())
    })
}
