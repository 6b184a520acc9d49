//! Replay command handler.

use super::form::FormArgs;
use super::outcome_json;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, to_pretty_json_line};
use crate::{CliOutput, format_error_output, infra_exit_code};
use clap::ValueEnum;
use reservation_infra::{
    FormEventKind, ReplayReport, ValidatedReservationConfig, run_replay_local,
};
use std::fmt::Write;

/// Events accepted by `replay --event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EventArg {
    /// Form submission.
    Submit,
    /// Form reset.
    Reset,
}

impl From<EventArg> for FormEventKind {
    fn from(value: EventArg) -> Self {
        match value {
            EventArg::Submit => Self::Submit,
            EventArg::Reset => Self::Reset,
        }
    }
}

/// Run the replay command.
pub fn run_replay(
    mode: OutputMode,
    config: &ValidatedReservationConfig,
    form: &FormArgs,
    events: &[EventArg],
) -> Result<CliOutput, CliError> {
    let events: Vec<FormEventKind> = events.iter().copied().map(FormEventKind::from).collect();
    match form
        .load()
        .and_then(|input| run_replay_local(config, &input, &events))
    {
        Ok(report) => format_replay_output(mode, &report),
        Err(error) => Ok(format_error_output(mode, &error, infra_exit_code(&error))),
    }
}

fn format_replay_output(mode: OutputMode, report: &ReplayReport) -> Result<CliOutput, CliError> {
    let stdout = if mode.is_json() {
        let steps: Vec<serde_json::Value> = report
            .steps
            .iter()
            .map(|step| {
                serde_json::json!({
                    "event": step.event.as_str(),
                    "defaultPrevented": step.default_prevented,
                    "outcome": step.outcome.as_ref().map(outcome_json),
                })
            })
            .collect();
        to_pretty_json_line(&serde_json::json!({
            "status": "ok",
            "steps": steps,
            "document": report.document,
        }))?
    } else {
        format_replay_text(report)
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

fn format_replay_text(report: &ReplayReport) -> String {
    let mut out = String::from("status: ok\n");
    for (index, step) in report.steps.iter().enumerate() {
        let decision = match &step.outcome {
            Some(outcome) if outcome.is_confirmed() => " confirmed",
            Some(_) => " rejected",
            None => "",
        };
        let _ = writeln!(out, "step {}: {}{decision}", index + 1, step.event);
    }
    let document = &report.document;
    let _ = write!(
        out,
        "message: {}\nreservation: {}\nnativeSubmissions: {}\n",
        visibility(document.message.visible),
        visibility(document.reservation.visible),
        document.native_submissions
    );
    out
}

const fn visibility(visible: bool) -> &'static str {
    if visible { "visible" } else { "hidden" }
}
