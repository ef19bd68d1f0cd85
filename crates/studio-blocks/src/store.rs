//! Host content store boundary

/// Read/write access to the host's edited content.
///
/// The host owns the document; the field engine only ever sees the current
/// content string and hands a complete replacement back.
pub trait ContentStore {
    /// Current serialized content
    fn edited_content(&self) -> String;

    /// Replace the serialized content
    fn set_edited_content(&mut self, content: String);
}

/// In-memory content store for tests and headless hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    content: String,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding existing content.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            writes: 0,
        }
    }

    /// Number of times content has been replaced.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ContentStore for MemoryStore {
    fn edited_content(&self) -> String {
        self.content.clone()
    }

    fn set_edited_content(&mut self, content: String) {
        self.content = content;
        self.writes += 1;
    }
}

impl<S: ContentStore + ?Sized> ContentStore for &mut S {
    fn edited_content(&self) -> String {
        (**self).edited_content()
    }

    fn set_edited_content(&mut self, content: String) {
        (**self).set_edited_content(content)
    }
}
