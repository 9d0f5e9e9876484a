//! File-backed item source.

use super::split_entries;
use crate::model::error::InputError;
use crate::model::Entry;
use std::path::{Path, PathBuf};

/// Items read once from a text file.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the given path.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// The file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file and split it into entries.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` if the file cannot be read.
    pub fn load(&self) -> Result<Vec<Entry>, InputError> {
        let bytes = std::fs::read(&self.path)?;
        let entries = split_entries(&String::from_utf8_lossy(&bytes));
        tracing::info!(path = %self.path.display(), count = entries.len(), "loaded file");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn new_rejects_missing_file() {
        let result = FileSource::new("/nonexistent/winlist/items.txt");
        assert!(matches!(result, Err(InputError::FileNotFound { .. })));
    }

    #[test]
    fn load_splits_paragraphs() {
        let path = std::env::temp_dir().join("winlist_file_source_load.txt");
        fs::write(&path, "first\nstill first\n\nsecond\n").unwrap();

        let entries = FileSource::new(&path).unwrap().load().unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text(), "first\nstill first");
        assert_eq!(entries[1].text(), "second");
    }

    #[test]
    fn load_tolerates_invalid_utf8() {
        let path = std::env::temp_dir().join("winlist_file_source_lossy.txt");
        fs::write(&path, b"ok\xff\n").unwrap();

        let entries = FileSource::new(&path).unwrap().load().unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(entries.len(), 1);
        assert!(entries[0].text().starts_with("ok"));
    }
}
