//! Reservation form controller and event binding.

use crate::present::SubmitOutcome;
use crate::reset::on_reset;
use crate::submit::on_submit;
use crate::validate::validate_form;
use reservation_domain::{FieldSnapshot, PhotoPathPolicy, ValidationResult};
use reservation_ports::{
    FormEvent, FormEventKind, FormEventTargetPort, LoggerPort, ReservationFormPort,
    ReservationViewPort,
};
use reservation_shared::Result;
use std::sync::{Arc, Mutex};

/// Dependencies required by the reservation form handlers.
#[derive(Clone)]
pub struct ReservationFormDeps {
    /// Field reader.
    pub form: Arc<dyn ReservationFormPort>,
    /// Message and confirmation writer.
    pub view: Arc<dyn ReservationViewPort>,
    /// Photo source policy for the confirmation panel.
    pub photos: PhotoPathPolicy,
    /// Optional logger.
    pub logger: Option<Arc<dyn LoggerPort>>,
}

/// Validates the reservation form and renders the outcome.
pub struct ReservationFormValidator {
    deps: ReservationFormDeps,
    last_outcome: Mutex<Option<SubmitOutcome>>,
}

impl ReservationFormValidator {
    /// Create a validator over the given ports.
    #[must_use]
    pub const fn new(deps: ReservationFormDeps) -> Self {
        Self {
            deps,
            last_outcome: Mutex::new(None),
        }
    }

    /// Borrow the dependencies.
    #[must_use]
    pub const fn deps(&self) -> &ReservationFormDeps {
        &self.deps
    }

    /// Capture the current field values.
    pub fn read_fields(&self) -> Result<FieldSnapshot> {
        self.deps.form.read_fields()
    }

    /// Validate the current field values without touching the view.
    pub fn validate(&self) -> Result<ValidationResult> {
        validate_form(self.deps.form.as_ref()).map(|(_, result)| result)
    }

    /// Handle a submit event and remember its outcome.
    pub fn on_submit(&self, event: &dyn FormEvent) -> Result<SubmitOutcome> {
        let outcome = on_submit(&self.deps, event)?;
        if let Ok(mut last) = self.last_outcome.lock() {
            *last = Some(outcome.clone());
        }
        Ok(outcome)
    }

    /// Handle a reset event.
    pub fn on_reset(&self, event: &dyn FormEvent) -> Result<()> {
        on_reset(&self.deps, event)
    }

    /// Outcome of the most recent successful submit, if any.
    #[must_use]
    pub fn last_outcome(&self) -> Option<SubmitOutcome> {
        self.last_outcome
            .lock()
            .ok()
            .and_then(|last| last.clone())
    }
}

/// Register the submit and reset handlers on a form.
///
/// Handlers hold the validator weakly: the target usually sits inside the
/// validator's own deps. Once the caller drops its last `Arc`, the handlers
/// do nothing and the host's native actions run unhindered.
pub fn bind_reservation_form(
    target: &dyn FormEventTargetPort,
    validator: &Arc<ReservationFormValidator>,
) -> Result<()> {
    let submit = Arc::downgrade(validator);
    target.add_event_listener(
        FormEventKind::Submit,
        Arc::new(move |event: &dyn FormEvent| {
            submit
                .upgrade()
                .map_or(Ok(()), |validator| validator.on_submit(event).map(|_| ()))
        }),
    )?;
    let reset = Arc::downgrade(validator);
    target.add_event_listener(
        FormEventKind::Reset,
        Arc::new(move |event: &dyn FormEvent| {
            reset
                .upgrade()
                .map_or(Ok(()), |validator| validator.on_reset(event))
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeForm, RecordingView, TestEvent, deps};
    use reservation_ports::FormEventHandler;

    #[derive(Default)]
    struct ListenerList {
        handlers: Mutex<Vec<(FormEventKind, FormEventHandler)>>,
    }

    impl FormEventTargetPort for ListenerList {
        fn add_event_listener(&self, kind: FormEventKind, handler: FormEventHandler) -> Result<()> {
            if let Ok(mut handlers) = self.handlers.lock() {
                handlers.push((kind, handler));
            }
            Ok(())
        }
    }

    impl ListenerList {
        fn fire(&self, event: &TestEvent) -> Result<()> {
            let handlers: Vec<FormEventHandler> = self
                .handlers
                .lock()
                .map(|handlers| {
                    handlers
                        .iter()
                        .filter(|(kind, _)| *kind == event.kind())
                        .map(|(_, handler)| Arc::clone(handler))
                        .collect()
                })
                .unwrap_or_default();
            let event: &dyn FormEvent = event;
            for handler in handlers {
                handler(event)?;
            }
            Ok(())
        }
    }

    #[test]
    fn binding_registers_submit_then_reset() -> Result<()> {
        let form = Arc::new(FakeForm::new("Ritz", "2", "Double", &[]));
        let view = Arc::new(RecordingView::default());
        let validator = Arc::new(ReservationFormValidator::new(deps(&form, &view, None)));
        let target = ListenerList::default();

        bind_reservation_form(&target, &validator)?;
        let kinds: Vec<FormEventKind> = target
            .handlers
            .lock()
            .map(|handlers| handlers.iter().map(|(kind, _)| *kind).collect())
            .unwrap_or_default();
        assert_eq!(kinds, [FormEventKind::Submit, FormEventKind::Reset]);

        let submit = TestEvent::new(FormEventKind::Submit);
        target.fire(&submit)?;
        assert!(submit.default_prevented());
        assert!(validator.last_outcome().is_some_and(|outcome| outcome.is_confirmed()));
        Ok(())
    }

    #[test]
    fn handlers_go_inert_once_validator_is_dropped() -> Result<()> {
        let form = Arc::new(FakeForm::new("Ritz", "2", "Double", &[]));
        let view = Arc::new(RecordingView::default());
        let validator = Arc::new(ReservationFormValidator::new(deps(&form, &view, None)));
        let target = ListenerList::default();
        bind_reservation_form(&target, &validator)?;

        let weak = Arc::downgrade(&validator);
        drop(validator);
        assert!(weak.upgrade().is_none());

        let submit = TestEvent::new(FormEventKind::Submit);
        target.fire(&submit)?;
        assert!(!submit.default_prevented());
        assert!(view.calls().is_empty());
        Ok(())
    }

    #[test]
    fn validate_does_not_touch_view() -> Result<()> {
        let form = Arc::new(FakeForm::new("0", "", "", &[]));
        let view = Arc::new(RecordingView::default());
        let validator = ReservationFormValidator::new(deps(&form, &view, None));

        let first = validator.validate()?;
        let second = validator.validate()?;
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert!(view.calls().is_empty());
        assert!(validator.last_outcome().is_none());
        Ok(())
    }
}
