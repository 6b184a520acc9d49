//! Form event boundary contract.

use reservation_shared::{ErrorCode, ErrorEnvelope, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Events dispatched by the reservation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormEventKind {
    /// Form submission.
    Submit,
    /// Form reset.
    Reset,
}

impl FormEventKind {
    /// Host event name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Reset => "reset",
        }
    }
}

impl fmt::Display for FormEventKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for FormEventKind {
    type Err = ErrorEnvelope;

    fn from_str(input: &str) -> Result<Self> {
        match input.trim() {
            "submit" => Ok(Self::Submit),
            "reset" => Ok(Self::Reset),
            other => Err(ErrorEnvelope::expected(
                ErrorCode::invalid_input(),
                "unknown form event",
            )
            .with_metadata("event", other)),
        }
    }
}

/// Event handed to listeners.
pub trait FormEvent {
    /// Which event fired.
    fn kind(&self) -> FormEventKind;

    /// Suppress the host's native default action.
    fn prevent_default(&self);

    /// Returns true once a listener has suppressed the default action.
    fn default_prevented(&self) -> bool;
}

/// Listener callback registered on a form.
pub type FormEventHandler = Arc<dyn Fn(&dyn FormEvent) -> Result<()> + Send + Sync>;

/// Boundary contract for registering form listeners.
pub trait FormEventTargetPort: Send + Sync {
    /// Register a listener; listeners run in registration order.
    fn add_event_listener(&self, kind: FormEventKind, handler: FormEventHandler) -> Result<()>;
}
