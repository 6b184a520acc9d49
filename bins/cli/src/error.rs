//! Process exit codes and failures that bypass a command's own error output.
//!
//! Domain and config failures are rendered by `format_error_output`; a
//! `CliError` only covers writing or encoding the response itself.

use thiserror::Error;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded (form valid, reservation confirmed).
    Ok = 0,
    /// Bug or broken host document.
    Internal = 1,
    /// Rejected form, bad config or bad form input.
    InvalidInput = 2,
    /// Unreadable input file or stream.
    Io = 3,
}

impl ExitCode {
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode JSON output: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Io(_) => ExitCode::Io,
            Self::Serialization(_) => ExitCode::Internal,
        }
    }
}
