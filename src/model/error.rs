//! Error types for the winlist viewer.
//!
//! The virtualizer core has no fatal errors of its own: a missing container
//! skips resolution and a failed observation keeps the estimate. The errors
//! here belong to the host shell around it.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error wrapping all host failures
//!   - [`InputError`] - File/stdin reading failures
//!   - [`ConfigError`](crate::config::ConfigError) - Config file read/parse failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Log sink setup failures
//!   - [`TuiError`](crate::view::TuiError) - Terminal session failures

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// Domain-specific errors convert via `From`, so `?` composes across
/// layers.
///
/// # Examples
///
/// ```no_run
/// use winlist::model::error::{AppError, InputError};
///
/// fn run_app() -> Result<(), AppError> {
///     let _input = read_items()?;
///     Ok(())
/// }
/// # fn read_items() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read input items from file or stdin. Fatal.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// Configuration file exists but could not be read or parsed. Fatal.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Log sink could not be initialized. Fatal.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// The viewer failed while running. Fatal; the terminal is restored
    /// before this is returned.
    #[error("Viewer error: {0}")]
    Tui(#[from] crate::view::TuiError),
}

/// Errors encountered when reading list items from files or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified input file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use winlist::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.txt")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.txt"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// No input source: no file, stdin is a terminal, and no `--generate`.
    ///
    /// ```
    /// use winlist::model::error::InputError;
    ///
    /// let msg = InputError::NoInput.to_string();
    /// assert!(msg.contains("--generate"));
    /// ```
    #[error("No input source: provide a file path, pipe data to stdin, or use --generate")]
    NoInput,

    /// Generic I/O error reading from the input source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_error_converts_to_app_error() {
        fn fails() -> Result<(), AppError> {
            Err(InputError::NoInput)?
        }
        let err = fails().unwrap_err();
        assert!(matches!(err, AppError::InputRead(InputError::NoInput)));
    }

    #[test]
    fn io_error_converts_to_input_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: InputError = io.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn viewer_error_converts_to_app_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = AppError::from(crate::view::TuiError::from(io));
        assert!(matches!(err, AppError::Tui(_)));
        assert_eq!(err.to_string(), "Viewer error: Terminal IO error: pipe closed");
    }
}
