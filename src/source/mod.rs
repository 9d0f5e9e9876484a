//! Item sources.
//!
//! - File loading for a path argument
//! - Stdin for piped input
//! - Synthetic items for `--generate`
//!
//! Text input is split into entries at blank lines.

use crate::model::error::InputError;
use crate::model::{Entry, EntryId};
use std::path::PathBuf;

pub mod file;
pub mod generate;
pub mod stdin;

pub use file::FileSource;
pub use generate::generate_entries;
pub use stdin::StdinSource;

/// Seed for `--generate` content.
pub const GENERATE_SEED: u64 = 0x5EED;

/// Where the list items come from. Exactly one variant applies.
#[derive(Debug)]
pub enum InputSource {
    /// Read a text file.
    File(FileSource),
    /// Read piped stdin.
    Stdin(StdinSource<std::io::Stdin>),
    /// Synthesize this many items.
    Generated(usize),
}

impl InputSource {
    /// Load every entry from the source.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for read failures.
    pub fn load(self) -> Result<Vec<Entry>, InputError> {
        match self {
            InputSource::File(f) => f.load(),
            InputSource::Stdin(s) => s.load(),
            InputSource::Generated(count) => Ok(generate_entries(count, GENERATE_SEED)),
        }
    }
}

/// Detect and create the appropriate input source.
///
/// `--generate` wins over a file path, which wins over stdin.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` for a missing file and
/// `InputError::NoInput` if stdin is a terminal and nothing else was given.
pub fn detect_input_source(
    file: Option<PathBuf>,
    generate: Option<usize>,
) -> Result<InputSource, InputError> {
    if let Some(count) = generate {
        return Ok(InputSource::Generated(count));
    }
    match file {
        Some(path) => Ok(InputSource::File(FileSource::new(path)?)),
        None => Ok(InputSource::Stdin(StdinSource::new()?)),
    }
}

/// Split text into entries separated by one or more blank lines.
///
/// Lines containing only whitespace count as blank. Entries are numbered
/// from zero in input order.
pub fn split_entries(text: &str) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                push_entry(&mut entries, &current);
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        push_entry(&mut entries, &current);
    }

    entries
}

fn push_entry(entries: &mut Vec<Entry>, lines: &[&str]) {
    let id = EntryId::new(entries.len() as u64);
    entries.push(Entry::new(id, lines.join("\n")));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_entries_on_blank_lines() {
        let entries = split_entries("a\nb\n\nc\n\n\n\nd");
        let texts: Vec<&str> = entries.iter().map(|e| e.text()).collect();
        assert_eq!(texts, vec!["a\nb", "c", "d"]);
    }

    #[test]
    fn whitespace_only_lines_separate_entries() {
        let entries = split_entries("a\n   \t\nb");
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn leading_and_trailing_blank_lines_ignored() {
        let entries = split_entries("\n\n  \nonly\n\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text(), "only");
    }

    #[test]
    fn empty_text_has_no_entries() {
        assert!(split_entries("").is_empty());
        assert!(split_entries("\n\n").is_empty());
    }

    #[test]
    fn ids_follow_input_order() {
        let entries = split_entries("x\n\ny\n\nz");
        let ids: Vec<u64> = entries.iter().map(|e| e.id().get()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn crlf_input_splits_like_lf() {
        let entries = split_entries("a\r\nb\r\n\r\nc\r\n");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text(), "a\nb");
    }

    #[test]
    fn generate_takes_precedence_over_file() {
        let source = detect_input_source(Some(PathBuf::from("/nonexistent")), Some(3)).unwrap();
        assert!(matches!(source, InputSource::Generated(3)));
        assert_eq!(source.load().unwrap().len(), 3);
    }

    #[test]
    fn missing_file_is_reported() {
        let result = detect_input_source(Some(PathBuf::from("/nonexistent/items.txt")), None);
        assert!(matches!(result, Err(InputError::FileNotFound { .. })));
    }
}
