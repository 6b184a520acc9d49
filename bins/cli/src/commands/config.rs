//! Config command handlers.

use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, to_pretty_json_line};
use crate::{CliOutput, format_error_output, infra_exit_code};
use clap::ValueEnum;
use reservation_infra::{load_effective_config_json, load_effective_config_toml};
use std::collections::BTreeMap;
use std::path::Path;

/// Serialization used by `config show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// Pretty JSON.
    Json,
    /// Pretty TOML.
    Toml,
}

/// Print the effective config.
pub fn run_config_show(
    mode: OutputMode,
    env: &BTreeMap<String, String>,
    path: Option<&Path>,
    overrides_json: Option<&str>,
    format: ConfigFormat,
) -> Result<CliOutput, CliError> {
    let rendered = match format {
        ConfigFormat::Json => load_effective_config_json(env, path, overrides_json),
        ConfigFormat::Toml => load_effective_config_toml(env, path, overrides_json),
    };
    let rendered = match rendered {
        Ok(rendered) => rendered,
        Err(error) => return Ok(format_error_output(mode, &error, infra_exit_code(&error))),
    };

    let stdout = if mode.is_json() {
        let config_value: serde_json::Value = match format {
            ConfigFormat::Json => serde_json::from_str(rendered.trim())?,
            ConfigFormat::Toml => serde_json::Value::String(rendered),
        };
        to_pretty_json_line(&serde_json::json!({
            "status": "ok",
            "configPath": path.map(|value| value.to_string_lossy().to_string()),
            "effectiveConfig": config_value,
        }))?
    } else {
        let mut out = String::from("status: ok\nconfig:\n");
        out.push_str(&rendered);
        out
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

/// Validate config sources.
pub fn run_config_check(
    mode: OutputMode,
    env: &BTreeMap<String, String>,
    path: Option<&Path>,
    overrides_json: Option<&str>,
) -> Result<CliOutput, CliError> {
    if let Err(error) = load_effective_config_json(env, path, overrides_json) {
        return Ok(format_error_output(mode, &error, infra_exit_code(&error)));
    }

    let stdout = if mode.is_json() {
        to_pretty_json_line(&serde_json::json!({
            "status": "ok",
            "configPath": path.map(|value| value.to_string_lossy().to_string()),
        }))?
    } else {
        path.map_or_else(
            || "status: ok\nconfig: ok\n".to_string(),
            |path| format!("status: ok\nconfig: ok\npath: {}\n", path.to_string_lossy()),
        )
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}
