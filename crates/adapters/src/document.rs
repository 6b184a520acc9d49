//! In-process reservation form document.
//!
//! `InMemoryDocument` implements the form, view and event-target ports over
//! one shared model, so a single instance can be bound the way a browser
//! page would be. Element identifiers match the host markup.

use crate::form_input::FormInput;
use crate::html::render_message_list;
use reservation_ports::{
    ConfirmationViewModel, FormEvent, FormEventHandler, FormEventKind, FormEventTargetPort,
    ReservationFormPort, ReservationViewPort, ValidationResult,
};
use reservation_shared::{ErrorCode, ErrorEnvelope, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Hotel select.
pub const ID_HOTEL: &str = "lis_hotel";
/// Room-count text field.
pub const ID_ROOM_COUNT: &str = "txt_nbrChambre";
/// Room-type radio group.
pub const ID_ROOM_TYPE: &str = "opt_type_chambre";
/// Option checkbox group.
pub const ID_OPTIONS: &str = "chk_options[]";
/// Message container.
pub const ID_MESSAGE: &str = "message";
/// Confirmation container.
pub const ID_RESERVATION: &str = "reservation";
/// Hotel photo inside the confirmation.
pub const ID_PHOTO: &str = "photo";
/// Heading inside the confirmation.
pub const SELECTOR_HEADING: &str = "#reservation h2";
/// Room-count text target.
pub const ID_ROOM_COUNT_TEXT: &str = "chambre_nombre";
/// Room-type text target.
pub const ID_ROOM_TYPE_TEXT: &str = "chambre_type";
/// Confirmation option list.
pub const ID_OPTION_LIST: &str = "options";

/// Every element the document models.
pub const ELEMENT_IDS: [&str; 11] = [
    ID_HOTEL,
    ID_ROOM_COUNT,
    ID_ROOM_TYPE,
    ID_OPTIONS,
    ID_MESSAGE,
    ID_RESERVATION,
    ID_PHOTO,
    SELECTOR_HEADING,
    ID_ROOM_COUNT_TEXT,
    ID_ROOM_TYPE_TEXT,
    ID_OPTION_LIST,
];

/// Host document faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// The element was removed from the document.
    #[error("element `{id}` is missing from the document")]
    MissingElement {
        /// Element identifier.
        id: String,
    },
    /// The identifier names no reservation form element.
    #[error("`{id}` is not a reservation form element")]
    UnknownElement {
        /// Element identifier.
        id: String,
    },
    /// A previous holder of the state lock panicked.
    #[error("document state lock poisoned")]
    LockPoisoned,
}

impl From<DocumentError> for ErrorEnvelope {
    fn from(error: DocumentError) -> Self {
        let message = error.to_string();
        match error {
            DocumentError::MissingElement { id } => {
                Self::invariant(ErrorCode::new("document", "missing_element"), message)
                    .with_metadata("element_id", id)
            },
            DocumentError::UnknownElement { id } => {
                Self::expected(ErrorCode::new("document", "unknown_element"), message)
                    .with_metadata("element_id", id)
            },
            DocumentError::LockPoisoned => {
                Self::unexpected(ErrorCode::new("document", "lock_poisoned"), message)
            },
        }
    }
}

/// Serializable view of the whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    /// Current field values.
    pub fields: FieldValues,
    /// Message container.
    pub message: MessageSnapshot,
    /// Confirmation container.
    pub reservation: ReservationSnapshot,
    /// Native submissions that were not prevented.
    pub native_submissions: u64,
}

/// Field values keyed by host field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValues {
    /// Hotel select value.
    #[serde(rename = "lis_hotel")]
    pub hotel: String,
    /// Room-count text.
    #[serde(rename = "txt_nbrChambre")]
    pub room_count: String,
    /// Checked room-type radio value, or empty.
    #[serde(rename = "opt_type_chambre")]
    pub room_type: String,
    /// Checked option values.
    #[serde(rename = "chk_options[]")]
    pub options: Vec<String>,
}

impl Default for FieldValues {
    fn default() -> Self {
        Self {
            hotel: reservation_domain::HOTEL_NOT_SELECTED.to_owned(),
            room_count: String::new(),
            room_type: String::new(),
            options: Vec::new(),
        }
    }
}

/// Message container state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSnapshot {
    /// Whether the container is displayed.
    pub visible: bool,
    /// Rendered inner HTML.
    pub inner_html: String,
}

/// Confirmation container state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationSnapshot {
    /// Whether the container is displayed.
    pub visible: bool,
    /// Photo source.
    pub photo: String,
    /// Heading text.
    pub heading: String,
    /// Room-count text.
    #[serde(rename = "chambre_nombre")]
    pub room_count: String,
    /// Room-type text.
    #[serde(rename = "chambre_type")]
    pub room_type: String,
    /// Option list items as plain text.
    pub options: Vec<String>,
}

/// What happened during one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Dispatched event.
    pub kind: FormEventKind,
    /// Listeners invoked.
    pub listeners: usize,
    /// Whether a listener suppressed the native action.
    pub default_prevented: bool,
}

struct DocumentEvent {
    kind: FormEventKind,
    prevented: AtomicBool,
}

impl FormEvent for DocumentEvent {
    fn kind(&self) -> FormEventKind {
        self.kind
    }

    fn prevent_default(&self) {
        self.prevented.store(true, Ordering::SeqCst);
    }

    fn default_prevented(&self) -> bool {
        self.prevented.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
struct DocumentState {
    defaults: FieldValues,
    fields: FieldValues,
    message: MessageSnapshot,
    reservation: ReservationSnapshot,
    native_submissions: u64,
    removed: BTreeSet<&'static str>,
    listeners: Vec<(FormEventKind, FormEventHandler)>,
}

impl DocumentState {
    fn require(&self, id: &'static str) -> std::result::Result<(), DocumentError> {
        if self.removed.contains(id) {
            return Err(DocumentError::MissingElement { id: id.to_owned() });
        }
        Ok(())
    }
}

/// In-memory reservation form document.
#[derive(Default)]
pub struct InMemoryDocument {
    state: Mutex<DocumentState>,
}

impl InMemoryDocument {
    /// Document with the markup defaults: no hotel, empty fields, both
    /// containers hidden.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Document whose markup defaults are the given values.
    #[must_use]
    pub fn with_defaults(defaults: FieldValues) -> Self {
        Self {
            state: Mutex::new(DocumentState {
                fields: defaults.clone(),
                defaults,
                ..DocumentState::default()
            }),
        }
    }

    fn lock(&self) -> std::result::Result<MutexGuard<'_, DocumentState>, DocumentError> {
        self.state.lock().map_err(|_| DocumentError::LockPoisoned)
    }

    /// Apply user input to the fields. Absent values are left untouched.
    pub fn fill(&self, input: &FormInput) -> Result<()> {
        let mut state = self.lock()?;
        if let Some(hotel) = &input.hotel {
            state.require(ID_HOTEL)?;
            state.fields.hotel.clone_from(hotel);
        }
        if let Some(room_count) = &input.room_count {
            state.require(ID_ROOM_COUNT)?;
            state.fields.room_count.clone_from(room_count);
        }
        if let Some(room_type) = &input.room_type {
            state.require(ID_ROOM_TYPE)?;
            state.fields.room_type.clone_from(room_type);
        }
        if let Some(options) = &input.options {
            state.require(ID_OPTIONS)?;
            state.fields.options.clone_from(options);
        }
        Ok(())
    }

    /// Remove an element, so later reads or writes of it fail.
    pub fn remove_element(&self, id: &str) -> Result<()> {
        let known = ELEMENT_IDS
            .into_iter()
            .find(|known| *known == id)
            .ok_or_else(|| DocumentError::UnknownElement { id: id.to_owned() })?;
        self.lock()?.removed.insert(known);
        Ok(())
    }

    /// Dispatch a form event.
    ///
    /// Listeners run in registration order without the state lock held. The
    /// native action runs afterwards unless a listener prevented it, even
    /// when a listener failed; the first listener error is then returned.
    pub fn dispatch(&self, kind: FormEventKind) -> Result<DispatchOutcome> {
        let handlers: Vec<FormEventHandler> = self
            .lock()?
            .listeners
            .iter()
            .filter(|(registered, _)| *registered == kind)
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        let event = DocumentEvent {
            kind,
            prevented: AtomicBool::new(false),
        };
        let dispatched: &dyn FormEvent = &event;
        let mut first_error = None;
        for handler in &handlers {
            if let Err(error) = handler(dispatched) {
                first_error = first_error.or(Some(error));
            }
        }

        let default_prevented = event.default_prevented();
        if !default_prevented {
            let mut state = self.lock()?;
            match kind {
                FormEventKind::Submit => {
                    state.native_submissions = state.native_submissions.saturating_add(1);
                },
                FormEventKind::Reset => {
                    let defaults = state.defaults.clone();
                    state.fields = defaults;
                },
            }
        }

        match first_error {
            Some(error) => Err(error),
            None => Ok(DispatchOutcome {
                kind,
                listeners: handlers.len(),
                default_prevented,
            }),
        }
    }

    /// Dispatch `submit`.
    pub fn dispatch_submit(&self) -> Result<DispatchOutcome> {
        self.dispatch(FormEventKind::Submit)
    }

    /// Dispatch `reset`.
    pub fn dispatch_reset(&self) -> Result<DispatchOutcome> {
        self.dispatch(FormEventKind::Reset)
    }

    /// Native submissions that were not prevented.
    pub fn native_submissions(&self) -> Result<u64> {
        Ok(self.lock()?.native_submissions)
    }

    /// Capture the whole document.
    pub fn snapshot(&self) -> Result<DocumentSnapshot> {
        let state = self.lock()?;
        Ok(DocumentSnapshot {
            fields: state.fields.clone(),
            message: state.message.clone(),
            reservation: state.reservation.clone(),
            native_submissions: state.native_submissions,
        })
    }
}

impl ReservationFormPort for InMemoryDocument {
    fn hotel(&self) -> Result<String> {
        let state = self.lock()?;
        state.require(ID_HOTEL)?;
        Ok(state.fields.hotel.clone())
    }

    fn room_count_text(&self) -> Result<String> {
        let state = self.lock()?;
        state.require(ID_ROOM_COUNT)?;
        Ok(state.fields.room_count.clone())
    }

    fn room_type(&self) -> Result<String> {
        let state = self.lock()?;
        state.require(ID_ROOM_TYPE)?;
        Ok(state.fields.room_type.clone())
    }

    fn options(&self) -> Result<Vec<String>> {
        let state = self.lock()?;
        state.require(ID_OPTIONS)?;
        Ok(state.fields.options.clone())
    }
}

impl ReservationViewPort for InMemoryDocument {
    fn clear_errors(&self) -> Result<()> {
        let mut state = self.lock()?;
        state.require(ID_MESSAGE)?;
        state.message.inner_html.clear();
        Ok(())
    }

    fn hide_errors(&self) -> Result<()> {
        let mut state = self.lock()?;
        state.require(ID_MESSAGE)?;
        state.message.visible = false;
        Ok(())
    }

    fn render_errors(&self, result: &ValidationResult) -> Result<()> {
        if result.is_valid() {
            return Ok(());
        }
        let mut state = self.lock()?;
        state.require(ID_MESSAGE)?;
        state.message.inner_html = render_message_list(&result.messages());
        state.message.visible = true;
        Ok(())
    }

    fn render_confirmation(&self, view: &ConfirmationViewModel) -> Result<()> {
        let mut state = self.lock()?;
        for id in [
            ID_RESERVATION,
            ID_PHOTO,
            SELECTOR_HEADING,
            ID_ROOM_COUNT_TEXT,
            ID_ROOM_TYPE_TEXT,
            ID_OPTION_LIST,
        ] {
            state.require(id)?;
        }
        state.reservation = ReservationSnapshot {
            visible: true,
            photo: view.photo_src().to_owned(),
            heading: view.hotel().to_owned(),
            room_count: view.room_count().to_string(),
            room_type: view.room_type().to_owned(),
            options: view.options().to_vec(),
        };
        Ok(())
    }

    fn hide_confirmation(&self) -> Result<()> {
        let mut state = self.lock()?;
        state.require(ID_RESERVATION)?;
        state.reservation.visible = false;
        Ok(())
    }
}

impl FormEventTargetPort for InMemoryDocument {
    fn add_event_listener(&self, kind: FormEventKind, handler: FormEventHandler) -> Result<()> {
        self.lock()?.listeners.push((kind, handler));
        Ok(())
    }
}
