//! Log output for the `motohub` binary.
//!
//! The console shows the level picked on the command line (or `RUST_LOG`),
//! and `logs/motohub-last-run.log` keeps everything from the latest run.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::Result;

const LOG_FILE_NAME: &str = "motohub-last-run.log";

/// Installs the global subscriber with a console layer and a trace-level file layer.
///
/// `logs_dir` defaults to `./logs`. The log file is truncated on every run.
///
/// # Errors
///
/// - `MotohubError::Io` - If the logs directory or log file cannot be created
pub fn init_tracing(console_level: Level, logs_dir: Option<&Path>) -> Result<()> {
    let logs_dir = logs_dir.unwrap_or(Path::new("logs"));
    std::fs::create_dir_all(logs_dir)?;
    let log_path = logs_dir.join(LOG_FILE_NAME);
    let log_file = File::create(&log_path)?;

    let console = fmt::layer()
        .with_target(false)
        .with_filter(console_filter(console_level));

    let file = fmt::layer()
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(Mutex::new(log_file))
        .with_filter(EnvFilter::new("trace"));

    tracing_subscriber::registry().with(console).with(file).init();

    tracing::debug!(log_file = %log_path.display(), "Tracing initialized");
    Ok(())
}

// RUST_LOG wins over the command-line level when set
fn console_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// `--log-level` values accepted by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for Level {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_level_maps_to_tracing_level() {
        assert_eq!(Level::from(CliLogLevel::Error), Level::ERROR);
        assert_eq!(Level::from(CliLogLevel::Info), Level::INFO);
        assert_eq!(Level::from(CliLogLevel::Trace), Level::TRACE);
    }
}
