//! Stdin item source for piped input.

use super::split_entries;
use crate::model::error::InputError;
use crate::model::Entry;
use std::io::{IsTerminal, Read};

/// Items read from piped stdin until EOF.
///
/// Generic over the reader so tests can feed bytes directly.
#[derive(Debug)]
pub struct StdinSource<R: Read> {
    reader: R,
}

impl StdinSource<std::io::Stdin> {
    /// Create a source over the process stdin.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoInput` if stdin is an interactive terminal,
    /// so the viewer never blocks waiting for typed input.
    pub fn new() -> Result<Self, InputError> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(InputError::NoInput);
        }
        Ok(Self { reader: stdin })
    }
}

impl<R: Read> StdinSource<R> {
    /// Create a source from any reader.
    pub fn from_reader(reader: R) -> Self {
        Self { reader }
    }

    /// Read to EOF and split into entries.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for read failures.
    pub fn load(mut self) -> Result<Vec<Entry>, InputError> {
        let mut bytes = Vec::new();
        self.reader.read_to_end(&mut bytes)?;
        let entries = split_entries(&String::from_utf8_lossy(&bytes));
        tracing::info!(count = entries.len(), "loaded stdin");
        Ok(entries)
    }
}
