//! List entry displayed by the viewer.

/// Stable identifier of an entry, used as its virtualizer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl EntryId {
    /// Create a new EntryId from a raw value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One item of the list: an identifier and free-form multi-line text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    id: EntryId,
    text: String,
}

impl Entry {
    /// Create an entry. Trailing whitespace is dropped.
    pub fn new(id: EntryId, text: impl Into<String>) -> Self {
        let mut text = text.into();
        text.truncate(text.trim_end().len());
        Self { id, text }
    }

    /// The entry's identifier.
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// The entry's full text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// First line of the text, or an empty string.
    pub fn title(&self) -> &str {
        self.text.lines().next().unwrap_or("")
    }

    /// Lines after the first.
    pub fn body(&self) -> impl Iterator<Item = &str> {
        self.text.lines().skip(1)
    }
}
