//! Tracing setup for Marquee
//!
//! Console logs follow the user's chosen level; a full trace of the run is
//! written to disk so failed catalog or trend store calls can be diagnosed
//! after the fact.

use std::fs::{File, create_dir_all};
use std::path::{Path, PathBuf};

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::MarqueeError;

/// File name of the per-run debug log, overwritten on every start.
pub const LAST_RUN_LOG: &str = "marquee-last-run.log";

/// Installs the console and debug-file subscribers.
///
/// The console shows `console_level` and above unless `RUST_LOG` is set.
/// The file under `logs_dir` (default `logs`) records every event of the
/// run; its path is returned.
///
/// # Errors
///
/// - `MarqueeError::Io` - Logs directory cannot be created or the log file cannot be opened
/// - `MarqueeError::Configuration` - A global subscriber is already installed
pub fn init_tracing(
    console_level: Level,
    logs_dir: Option<&Path>,
) -> Result<PathBuf, MarqueeError> {
    let log_file_path = prepare_log_file(logs_dir)?;
    let log_file = File::create(&log_file_path)?;

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_level.to_string()));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_filter(console_filter);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(log_file)
        .with_filter(EnvFilter::new("trace"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| MarqueeError::Configuration {
            reason: format!("tracing already initialized: {e}"),
        })?;

    tracing::info!(
        "Tracing initialized: console={}, debug_file={}",
        console_level,
        log_file_path.display()
    );

    Ok(log_file_path)
}

/// Creates the logs directory and returns the debug log path inside it.
fn prepare_log_file(logs_dir: Option<&Path>) -> Result<PathBuf, MarqueeError> {
    let logs_path = logs_dir.unwrap_or_else(|| Path::new("logs"));
    create_dir_all(logs_path)?;
    Ok(logs_path.join(LAST_RUN_LOG))
}

/// Console verbosity chosen with `--log-level`.
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
    fn test_prepare_log_file_creates_directory() {
        let temp = tempfile::tempdir().unwrap();
        let logs = temp.path().join("nested").join("logs");

        let path = prepare_log_file(Some(&logs)).unwrap();

        assert!(logs.is_dir());
        assert_eq!(path, logs.join(LAST_RUN_LOG));
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(Level::from(CliLogLevel::Error), Level::ERROR);
        assert_eq!(Level::from(CliLogLevel::Trace), Level::TRACE);
    }
}
