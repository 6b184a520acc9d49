//! Tracing subscriber setup.

use reservation_infra::{LogFormat, ValidatedReservationConfig};
use std::io::{IsTerminal, Write};
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber unless logging is suppressed.
///
/// `RUST_LOG` wins over the configured level.
pub fn init_logging(config: &ValidatedReservationConfig, quiet: bool) {
    if quiet {
        return;
    }

    let filter = filter_for(config, std::env::var("RUST_LOG").ok().as_deref());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match config.logging.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder
            .with_ansi(std::io::stderr().is_terminal())
            .try_init(),
    };
    if let Err(error) = installed {
        let _ = writeln!(std::io::stderr(), "logging setup failed: {error}");
    }
}

fn filter_for(config: &ValidatedReservationConfig, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(config.logging.level.as_str()))
}
