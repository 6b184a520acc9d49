//! Submit handler: suppress native submission, validate, render.

use crate::form_controller::ReservationFormDeps;
use crate::present::{SubmitOutcome, present};
use crate::validate::validate_form;
use reservation_domain::ValidationRule;
use reservation_ports::{FormEvent, LogFields};
use reservation_shared::{ErrorEnvelope, Result};
use serde_json::Value;
use std::time::Instant;

/// Handle a form submission.
///
/// Native submission is always suppressed, even when reading or rendering
/// fails afterwards.
pub fn on_submit(deps: &ReservationFormDeps, event: &dyn FormEvent) -> Result<SubmitOutcome> {
    event.prevent_default();
    let started_at = Instant::now();

    if let Some(logger) = deps.logger.as_ref() {
        logger.debug("reservation.submit.start", "Reservation submit started", None);
    }

    let result = run_submit(deps);

    if let Some(logger) = deps.logger.as_ref() {
        match &result {
            Ok(SubmitOutcome::Rejected { rules, .. }) => logger.info(
                "reservation.submit.rejected",
                "Reservation rejected by validation",
                Some(log_fields_rejected(rules, started_at)),
            ),
            Ok(SubmitOutcome::Confirmed { view }) => logger.info(
                "reservation.submit.confirmed",
                "Reservation confirmed",
                Some(log_fields_confirmed(view.options().len(), started_at)),
            ),
            Err(error) => logger.error(
                "reservation.submit.failed",
                "Reservation submit failed",
                Some(log_fields_error(error, started_at)),
            ),
        }
    }

    result
}

fn run_submit(deps: &ReservationFormDeps) -> Result<SubmitOutcome> {
    deps.view.clear_errors()?;
    deps.view.hide_errors()?;

    let (snapshot, result) = validate_form(deps.form.as_ref())?;
    if !result.is_valid() {
        return present(deps.view.as_ref(), &deps.photos, &result, &snapshot);
    }

    let fresh = deps.form.read_fields()?;
    present(deps.view.as_ref(), &deps.photos, &result, &fresh)
}

fn duration_ms(started_at: Instant) -> u64 {
    u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn log_fields_base(started_at: Instant) -> LogFields {
    let mut fields = LogFields::new();
    fields.insert(
        "durationMs".to_owned().into_boxed_str(),
        Value::from(duration_ms(started_at)),
    );
    fields
}

fn log_fields_rejected(rules: &[ValidationRule], started_at: Instant) -> LogFields {
    let mut fields = log_fields_base(started_at);
    fields.insert(
        "failedRules".to_owned().into_boxed_str(),
        Value::Array(rules.iter().map(|rule| Value::from(rule.id())).collect()),
    );
    fields.insert(
        "failedCount".to_owned().into_boxed_str(),
        Value::from(rules.len()),
    );
    fields
}

fn log_fields_confirmed(option_count: usize, started_at: Instant) -> LogFields {
    let mut fields = log_fields_base(started_at);
    fields.insert(
        "optionCount".to_owned().into_boxed_str(),
        Value::from(option_count),
    );
    fields
}

fn log_fields_error(error: &ErrorEnvelope, started_at: Instant) -> LogFields {
    let mut fields = log_fields_base(started_at);
    fields.insert(
        "errorCode".to_owned().into_boxed_str(),
        Value::String(error.code.to_string()),
    );
    fields.insert(
        "error".to_owned().into_boxed_str(),
        Value::String(error.message.clone()),
    );
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeForm, RecordingLogger, RecordingView, TestEvent, ViewCall, deps};
    use reservation_domain::{HOTEL_NOT_SELECTED, MESSAGE_ROOM_COUNT_RANGE};
    use reservation_ports::FormEventKind;
    use std::sync::Arc;

    #[test]
    fn submit_prevents_default_and_clears_before_validating() -> Result<()> {
        let form = Arc::new(FakeForm::new("Ritz", "13", "Suite", &[]));
        let view = Arc::new(RecordingView::default());
        let deps = deps(&form, &view, None);
        let event = TestEvent::new(FormEventKind::Submit);

        let outcome = on_submit(&deps, &event)?;
        assert!(event.default_prevented());
        assert!(matches!(
            outcome,
            SubmitOutcome::Rejected { ref messages, .. } if messages == &[MESSAGE_ROOM_COUNT_RANGE]
        ));
        assert_eq!(
            view.calls(),
            [
                ViewCall::ClearErrors,
                ViewCall::HideErrors,
                ViewCall::RenderErrors(vec![MESSAGE_ROOM_COUNT_RANGE]),
                ViewCall::HideConfirmation,
            ]
        );
        Ok(())
    }

    #[test]
    fn confirmed_submit_logs_counts_only() -> Result<()> {
        let form = Arc::new(FakeForm::new("Ritz", "5", "Suite", &["WiFi", "Breakfast"]));
        let view = Arc::new(RecordingView::default());
        let logger = Arc::new(RecordingLogger::default());
        let deps = deps(&form, &view, Some(&logger));

        let outcome = on_submit(&deps, &TestEvent::new(FormEventKind::Submit))?;
        assert!(outcome.is_confirmed());

        let events = logger.events();
        let names: Vec<&str> = events.iter().map(|event| event.event.as_ref()).collect();
        assert_eq!(names, ["reservation.submit.start", "reservation.submit.confirmed"]);
        let fields = events
            .last()
            .and_then(|event| event.fields.clone())
            .unwrap_or_default();
        assert_eq!(fields.get("optionCount"), Some(&Value::from(2)));
        assert!(!fields.values().any(|value| value == "Ritz"));
        Ok(())
    }

    #[test]
    fn rejected_submit_logs_rule_ids() -> Result<()> {
        let form = Arc::new(FakeForm::new(HOTEL_NOT_SELECTED, "abc", "", &[]));
        let view = Arc::new(RecordingView::default());
        let logger = Arc::new(RecordingLogger::default());
        let deps = deps(&form, &view, Some(&logger));

        on_submit(&deps, &TestEvent::new(FormEventKind::Submit))?;

        let fields = logger
            .events()
            .last()
            .and_then(|event| event.fields.clone())
            .unwrap_or_default();
        assert_eq!(
            fields.get("failedRules"),
            Some(&serde_json::json!([
                "hotel_selected",
                "room_count_in_range",
                "room_type_selected"
            ]))
        );
        assert_eq!(fields.get("failedCount"), Some(&Value::from(3)));
        Ok(())
    }

    #[test]
    fn read_failure_is_logged_and_propagated() {
        let form = Arc::new(FakeForm::new("Ritz", "5", "Suite", &[]));
        form.fail_reads();
        let view = Arc::new(RecordingView::default());
        let logger = Arc::new(RecordingLogger::default());
        let deps = deps(&form, &view, Some(&logger));
        let event = TestEvent::new(FormEventKind::Submit);

        let result = on_submit(&deps, &event);
        assert!(result.is_err());
        assert!(event.default_prevented());
        assert_eq!(
            logger.events().last().map(|event| event.event.to_string()),
            Some("reservation.submit.failed".to_owned())
        );
    }
}
