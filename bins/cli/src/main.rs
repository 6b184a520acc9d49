//! CLI binary entrypoint.

mod commands;
mod error;
mod format;
mod logging;

use clap::{Args, Parser, Subcommand};
use commands::{
    ConfigFormat, EventArg, FormArgs, run_config_check, run_config_show, run_replay, run_submit,
    run_validate,
};
use error::{CliError, ExitCode};
use format::{OutputArgs, OutputMode, to_pretty_json_line};
use logging::init_logging;
use reservation_infra::{InfraError, load_effective_config, reservation_process_env};
use reservation_shared::{ErrorCode, ErrorKind};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "hotel-reservation",
    version,
    about = "Hotel reservation form validation and confirmation",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    sources: ConfigSourceArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct ConfigSourceArgs {
    /// Optional config file path (JSON/TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Partial config JSON applied over the file.
    #[arg(long, global = true)]
    overrides_json: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate form fields and print the messages.
    Validate {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Submit the form and print the resulting document state.
    Submit {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Dispatch form events in order and print the final document state.
    Replay {
        #[command(flatten)]
        form: FormArgs,
        /// Event to dispatch; repeat for a sequence.
        #[arg(long = "event", value_enum, required = true)]
        events: Vec<EventArg>,
    },
    /// Config-related commands.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Validate { .. } => "validate",
            Self::Submit { .. } => "submit",
            Self::Replay { .. } => "replay",
            Self::Config { .. } => "config",
        }
    }
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Print the effective config.
    Show {
        /// Serialization of the printed config.
        #[arg(long, value_enum, default_value_t = ConfigFormat::Json)]
        format: ConfigFormat,
    },
    /// Validate config sources.
    Check,
}

pub(crate) struct CliOutput {
    stdout: String,
    stderr: String,
    exit_code: ExitCode,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let mode = OutputMode::from_args(&cli.output);
    let result = match reservation_process_env() {
        Ok(env) => run(&cli, mode, &env),
        Err(error) => Ok(format_error_output(mode, &error, infra_exit_code(&error))),
    };

    match result {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(cli: &Cli, mode: OutputMode, env: &BTreeMap<String, String>) -> Result<CliOutput, CliError> {
    let path = cli.sources.config.as_deref();
    let overrides_json = cli.sources.overrides_json.as_deref();
    let config = match load_effective_config(env, path, overrides_json) {
        Ok(config) => config,
        Err(error) => return Ok(format_error_output(mode, &error, infra_exit_code(&error))),
    };
    init_logging(&config, mode.quiet);
    tracing::debug!(command = cli.command.name(), "dispatching command");

    match &cli.command {
        Commands::Validate { form } => run_validate(mode, form),
        Commands::Submit { form } => run_submit(mode, &config, form),
        Commands::Replay { form, events } => run_replay(mode, &config, form, events),
        Commands::Config { command } => match command {
            ConfigCommands::Show { format } => {
                run_config_show(mode, env, path, overrides_json, *format)
            },
            ConfigCommands::Check => run_config_check(mode, env, path, overrides_json),
        },
    }
}

pub(crate) fn format_error_output(
    mode: OutputMode,
    error: &InfraError,
    exit_code: ExitCode,
) -> CliOutput {
    let stdout = if mode.is_json() {
        let payload = serde_json::json!({
            "status": "error",
            "error": {
                "kind": error.kind.to_string(),
                "code": error.code.to_string(),
                "message": error.message,
                "metadata": error.metadata,
            },
        });
        to_pretty_json_line(&payload).unwrap_or_else(|_| {
            "{\"status\":\"error\",\"error\":{\"code\":\"core:internal\",\"message\":\"internal error\"}}\n"
                .to_string()
        })
    } else {
        format_error_text(error)
    };

    CliOutput {
        stdout,
        stderr: String::new(),
        exit_code,
    }
}

fn format_error_text(error: &InfraError) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "status: error\nkind: {}\ncode: {}\nmessage: {}\n",
        error.kind, error.code, error.message
    );
    for (key, value) in &error.metadata {
        let _ = writeln!(out, "meta.{key}: {value}");
    }
    out
}

pub(crate) fn infra_exit_code(error: &InfraError) -> ExitCode {
    let io_codes = [
        ErrorCode::io(),
        ErrorCode::new("config", "config_file_io"),
        ErrorCode::new("config", "config_file_permission_denied"),
    ];
    if io_codes.contains(&error.code) {
        return ExitCode::Io;
    }
    match error.kind {
        ErrorKind::Expected => ExitCode::InvalidInput,
        ErrorKind::Invariant | ErrorKind::Unexpected => ExitCode::Internal,
    }
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;

    if !output.stderr.is_empty() {
        let mut stderr = io::stderr();
        stderr.write_all(output.stderr.as_bytes())?;
        stderr.flush()?;
    }

    Ok(())
}
