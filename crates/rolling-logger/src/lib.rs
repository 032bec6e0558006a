//! Rolling Logger
//!
//! Installs a `tracing` subscriber that writes to stderr and, optionally, to
//! a daily rotated log file (`{app}.{YYYY-MM-DD}.log`). Only the newest
//! [`KEEP_FILES`] files are kept.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Number of daily log files retained
pub const KEEP_FILES: usize = 7;

const DEFAULT_FILTER: &str = "info";
const FILE_SUFFIX: &str = "log";

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("failed to prepare log directory: {0}")]
    Io(#[from] io::Error),

    #[error("failed to open log file: {0}")]
    Appender(#[from] InitError),

    #[error("a global logger is already installed: {0}")]
    AlreadyInstalled(#[from] tracing_subscriber::util::TryInitError),
}

/// Daily appender for `app_name` in `dir`, keeping the newest [`KEEP_FILES`]
pub fn file_appender(dir: &Path, app_name: &str) -> Result<RollingFileAppender, LoggerError> {
    fs::create_dir_all(dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(app_name)
        .filename_suffix(FILE_SUFFIX)
        .max_log_files(KEEP_FILES)
        .build(dir)?;
    Ok(appender)
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the default `info` filter. With `log_dir` set, every
/// event is also written (without ANSI colors) to the rotating file through a
/// background writer; keep the returned guard alive so it is flushed on exit.
pub fn init_logger(log_dir: Option<PathBuf>, app_name: &str) -> Result<Option<WorkerGuard>, LoggerError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let (writer, guard) = tracing_appender::non_blocking(file_appender(&dir, app_name)?);
            (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
