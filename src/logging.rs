//! Logging setup.
//!
//! The terminal belongs to the TUI, so log output goes to a file through a
//! non-blocking writer. The filter comes from `RUST_LOG` and defaults to
//! `info`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The log file path has no file name component.
    #[error("Invalid log file path: {0}")]
    InvalidPath(PathBuf),
    /// Failed to create the directory that holds the log file.
    #[error("Failed to prepare log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to set the global tracing subscriber.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install the global subscriber writing to `log_file`.
///
/// The returned guard flushes buffered output when dropped; keep it alive
/// for the lifetime of the program.
pub fn init(log_file: &Path) -> Result<WorkerGuard, LoggingError> {
    let (dir, file_name) = split_log_path(log_file)?;
    fs::create_dir_all(&dir).map_err(|source| LoggingError::CreateDir {
        path: dir.clone(),
        source,
    })?;

    let appender = tracing_appender::rolling::never(&dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer().with_ansi(false).with_writer(writer);
    let subscriber = Registry::default().with(build_env_filter()).with(file_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!("logging to {}", log_file.display());
    Ok(guard)
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn split_log_path(log_file: &Path) -> Result<(PathBuf, PathBuf), LoggingError> {
    let file_name = log_file
        .file_name()
        .ok_or_else(|| LoggingError::InvalidPath(log_file.to_path_buf()))?;
    let dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, PathBuf::from(file_name)))
}
