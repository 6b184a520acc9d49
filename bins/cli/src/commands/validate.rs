//! Validate command handler.

use super::form::FormArgs;
use super::push_message_lines;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, to_pretty_json_line};
use crate::{CliOutput, format_error_output, infra_exit_code};
use reservation_infra::{ValidateReport, run_validate_local};

/// Run the validate command.
pub fn run_validate(mode: OutputMode, form: &FormArgs) -> Result<CliOutput, CliError> {
    match form.load().and_then(|input| run_validate_local(&input)) {
        Ok(report) => format_validate_output(mode, &report),
        Err(error) => Ok(format_error_output(mode, &error, infra_exit_code(&error))),
    }
}

fn format_validate_output(mode: OutputMode, report: &ValidateReport) -> Result<CliOutput, CliError> {
    let valid = report.result.is_valid();
    let status = if valid { "ok" } else { "rejected" };
    let stdout = if mode.is_json() {
        to_pretty_json_line(&serde_json::json!({
            "status": status,
            "fields": report.snapshot,
            "validation": report.result,
        }))?
    } else {
        let mut out = format!("status: {status}\nvalid: {valid}\n");
        if !valid {
            push_message_lines(&mut out, &report.result.messages());
        }
        out
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: if valid {
            ExitCode::Ok
        } else {
            ExitCode::InvalidInput
        },
    })
}
