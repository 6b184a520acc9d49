//! Local CLI orchestration helpers.

use crate::InfraResult;
use reservation_adapters::{DocumentSnapshot, FormInput, InMemoryDocument, TracingLogger};
use reservation_app::{
    ReservationFormDeps, ReservationFormValidator, SubmitOutcome, bind_reservation_form,
    validate_form,
};
use reservation_config::ValidatedReservationConfig;
use reservation_domain::{FieldSnapshot, ValidationResult};
use reservation_ports::{FormEventKind, LogFields, LoggerPort};
use reservation_shared::{ErrorCode, ErrorEnvelope};
use serde_json::Value;
use std::sync::Arc;

/// Result of validating form input without rendering.
#[derive(Debug, Clone)]
pub struct ValidateReport {
    /// Captured field values.
    pub snapshot: FieldSnapshot,
    /// Validation decision.
    pub result: ValidationResult,
}

/// Result of one dispatched event.
#[derive(Debug, Clone)]
pub struct ReplayStep {
    /// Dispatched event.
    pub event: FormEventKind,
    /// Whether the native action was suppressed.
    pub default_prevented: bool,
    /// Submit decision, for submit events.
    pub outcome: Option<SubmitOutcome>,
}

/// Result of a local submit run.
#[derive(Debug, Clone)]
pub struct SubmitReport {
    /// Submit decision.
    pub outcome: SubmitOutcome,
    /// Document state after the submit.
    pub document: DocumentSnapshot,
}

/// Result of a local replay run.
#[derive(Debug, Clone)]
pub struct ReplayReport {
    /// One entry per dispatched event, in order.
    pub steps: Vec<ReplayStep>,
    /// Document state after the last event.
    pub document: DocumentSnapshot,
}

/// A document bound to the reservation form handlers.
pub struct LocalSession {
    document: Arc<InMemoryDocument>,
    validator: Arc<ReservationFormValidator>,
}

impl LocalSession {
    /// Build a bound document, then apply `input` as user entry.
    pub fn new(
        config: &ValidatedReservationConfig,
        input: &FormInput,
        logger: Option<Arc<dyn LoggerPort>>,
    ) -> InfraResult<Self> {
        let document = Arc::new(InMemoryDocument::new());
        let deps = ReservationFormDeps {
            form: document.clone(),
            view: document.clone(),
            photos: config.photo_policy().clone(),
            logger,
        };
        let validator = Arc::new(ReservationFormValidator::new(deps));
        bind_reservation_form(document.as_ref(), &validator)?;
        document.fill(input)?;
        Ok(Self {
            document,
            validator,
        })
    }

    /// Dispatch one event and report what happened.
    pub fn dispatch(&self, event: FormEventKind) -> InfraResult<ReplayStep> {
        let dispatch = self.document.dispatch(event)?;
        let outcome = match event {
            FormEventKind::Submit => Some(self.validator.last_outcome().ok_or_else(|| {
                ErrorEnvelope::invariant(ErrorCode::internal(), "submit produced no outcome")
            })?),
            FormEventKind::Reset => None,
        };
        Ok(ReplayStep {
            event,
            default_prevented: dispatch.default_prevented,
            outcome,
        })
    }

    /// Capture the document.
    pub fn document(&self) -> InfraResult<DocumentSnapshot> {
        self.document.snapshot()
    }
}

/// Logger scoped to one CLI command.
#[must_use]
pub fn command_logger(command: &str) -> Arc<dyn LoggerPort> {
    let mut fields = LogFields::new();
    fields.insert(
        "command".to_owned().into_boxed_str(),
        Value::String(command.to_owned()),
    );
    Arc::new(TracingLogger::new().with_base_fields(fields))
}

/// Validate form input without rendering anything.
pub fn run_validate_local(input: &FormInput) -> InfraResult<ValidateReport> {
    let document = InMemoryDocument::new();
    document.fill(input)?;
    let (snapshot, result) = validate_form(&document)?;
    Ok(ValidateReport { snapshot, result })
}

/// Submit form input through a bound document.
pub fn run_submit_local(
    config: &ValidatedReservationConfig,
    input: &FormInput,
) -> InfraResult<SubmitReport> {
    let session = LocalSession::new(config, input, Some(command_logger("submit")))?;
    let step = session.dispatch(FormEventKind::Submit)?;
    let outcome = step.outcome.ok_or_else(|| {
        ErrorEnvelope::invariant(ErrorCode::internal(), "submit produced no outcome")
    })?;
    Ok(SubmitReport {
        outcome,
        document: session.document()?,
    })
}

/// Dispatch a sequence of events against one bound document.
pub fn run_replay_local(
    config: &ValidatedReservationConfig,
    input: &FormInput,
    events: &[FormEventKind],
) -> InfraResult<ReplayReport> {
    let session = LocalSession::new(config, input, Some(command_logger("replay")))?;
    let steps = events
        .iter()
        .map(|event| session.dispatch(*event))
        .collect::<InfraResult<Vec<_>>>()?;
    Ok(ReplayReport {
        steps,
        document: session.document()?,
    })
}
