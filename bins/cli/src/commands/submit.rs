//! Submit command handler.

use super::form::FormArgs;
use super::{outcome_json, push_message_lines};
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, to_pretty_json_line};
use crate::{CliOutput, format_error_output, infra_exit_code};
use reservation_infra::{SubmitOutcome, SubmitReport, ValidatedReservationConfig, run_submit_local};

/// Run the submit command.
pub fn run_submit(
    mode: OutputMode,
    config: &ValidatedReservationConfig,
    form: &FormArgs,
) -> Result<CliOutput, CliError> {
    match form.load().and_then(|input| run_submit_local(config, &input)) {
        Ok(report) => format_submit_output(mode, &report),
        Err(error) => Ok(format_error_output(mode, &error, infra_exit_code(&error))),
    }
}

fn format_submit_output(mode: OutputMode, report: &SubmitReport) -> Result<CliOutput, CliError> {
    let confirmed = report.outcome.is_confirmed();
    let stdout = if mode.is_json() {
        to_pretty_json_line(&serde_json::json!({
            "status": if confirmed { "confirmed" } else { "rejected" },
            "outcome": outcome_json(&report.outcome),
            "document": report.document,
        }))?
    } else {
        format_submit_text(&report.outcome)
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: if confirmed {
            ExitCode::Ok
        } else {
            ExitCode::InvalidInput
        },
    })
}

fn format_submit_text(outcome: &SubmitOutcome) -> String {
    match outcome {
        SubmitOutcome::Rejected { messages, .. } => {
            let mut out = String::from("status: rejected\n");
            push_message_lines(&mut out, messages);
            out
        },
        SubmitOutcome::Confirmed { view } => {
            let options = if view.options().is_empty() {
                "none".to_owned()
            } else {
                view.options().join(", ")
            };
            format!(
                "status: confirmed\nhotel: {}\nrooms: {}\nroomType: {}\noptions: {}\nphoto: {}\n",
                view.hotel(),
                view.room_count(),
                view.room_type(),
                options,
                view.photo_src()
            )
        },
    }
}
