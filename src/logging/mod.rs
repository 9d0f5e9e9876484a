//! Tracing subscriber initialization.
//!
//! The viewer owns the terminal, so logs go to a file. Follow them with
//! `tail -f` in another terminal.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV_VAR: &str = "WINLIST_LOG";

/// Directive used when neither environment variable is set.
pub const DEFAULT_DIRECTIVE: &str = "winlist=info";

/// Reasons the log file subscriber could not be installed.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log directory could not be created.
    #[error("cannot create log directory {path:?}: {source}")]
    DirectoryCreation {
        /// Directory that was being created.
        path: PathBuf,
        /// Cause.
        #[source]
        source: std::io::Error,
    },

    /// The path has no usable file name.
    #[error("log path {0:?} does not name a file")]
    InvalidPath(PathBuf),

    /// Another global subscriber is installed.
    #[error("a global tracing subscriber is already set")]
    SubscriberAlreadySet,
}

/// Split a log path into its directory and file name.
///
/// A bare file name logs into the current directory.
fn split_log_path(log_path: &Path) -> Result<(PathBuf, String), LoggingError> {
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok((directory, file_name.to_string()))
}

/// Build the event filter: `WINLIST_LOG`, then `RUST_LOG`, then
/// [`DEFAULT_DIRECTIVE`]. Unparseable directives fall through.
pub fn build_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Initialize the tracing subscriber with file-based logging.
///
/// Creates the log directory if it doesn't exist. The file is appended to,
/// never rotated.
///
/// # Errors
///
/// Returns `LoggingError` if the path has no file name, the directory
/// cannot be created, or a global subscriber is already installed.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    let (directory, file_name) = split_log_path(log_path)?;

    std::fs::create_dir_all(&directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.clone(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(&directory, &file_name);

    tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(file_appender)
        .with_target(true)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}
