//! [`TestDocument`]: an editing session over in-memory content.

use std::ops::{Deref, DerefMut};

use studio_blocks::location::locations_used;
use studio_blocks::order::is_dense;
use studio_blocks::{Block, FieldEngine, FieldRef, FieldSession, MemoryStore, fields_in, write_block};
use studio_meta::{ControlRegistry, EditorConfig};

/// A [`FieldSession`] over a [`MemoryStore`] with assertion helpers.
///
/// Dereferences to the session, so every engine operation is available
/// directly.
///
/// # Example
///
/// ```rust
/// use studio_meta::Location;
/// use studio_test_utils::TestDocument;
///
/// let mut doc = TestDocument::new();
/// doc.add_new_field(&Location::editor(), None).unwrap();
/// doc.assert_field_exists("new-field");
/// doc.assert_orders_dense();
/// ```
pub struct TestDocument {
    session: FieldSession<MemoryStore>,
}

impl Default for TestDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDocument {
    /// Empty content, default configuration, built-in controls.
    pub fn new() -> Self {
        Self::from_content("")
    }

    /// Start from raw content.
    pub fn from_content(content: &str) -> Self {
        Self::with_engine(content, FieldEngine::with_builtins())
    }

    /// Start from a block, serialized the way the host stores it.
    pub fn from_block(block: &Block) -> Self {
        let content = write_block(block).expect("TestDocument::from_block: block has no name");
        Self::from_content(&content)
    }

    /// Start from raw content with an explicit configuration.
    pub fn with_config(content: &str, config: EditorConfig) -> Self {
        Self::with_engine(content, FieldEngine::new(config, ControlRegistry::with_builtins()))
    }

    pub fn with_engine(content: &str, engine: FieldEngine) -> Self {
        Self {
            session: FieldSession::new(MemoryStore::with_content(content), engine),
        }
    }

    /// Raw stored content.
    pub fn content(&self) -> String {
        use studio_blocks::ContentStore;
        self.session.store().edited_content()
    }

    /// Number of writes to the store so far.
    pub fn writes(&self) -> usize {
        self.session.store().writes()
    }

    /// The stored block.
    ///
    /// # Panics
    /// Panics if the store holds no readable block.
    pub fn current(&self) -> Block {
        self.session
            .block()
            .expect("TestDocument::current: no readable block in content")
    }

    /// Assert that a top-level field is stored under `key`.
    ///
    /// # Panics
    /// Panics with the stored keys if it is not.
    pub fn assert_field_exists(&self, key: &str) {
        let block = self.current();
        assert!(
            block.fields.contains_key(key),
            "Expected field '{}' to exist. Stored keys: {:?}",
            key,
            block.fields.keys().collect::<Vec<_>>()
        );
    }

    /// Assert that no top-level field is stored under `key`.
    pub fn assert_field_not_exists(&self, key: &str) {
        let block = self.current();
        assert!(
            !block.fields.contains_key(key),
            "Expected field '{}' NOT to exist",
            key
        );
    }

    /// Assert that a field nested under `parent` is stored under `key`.
    pub fn assert_sub_field_exists(&self, parent: &str, key: &str) {
        assert!(
            self.session.get_field(&FieldRef::nested(key, parent)).is_some(),
            "Expected field '{}' under '{}' to exist",
            key,
            parent
        );
    }

    /// Assert that the field stored under `key` has `order`.
    pub fn assert_order(&self, key: &str, order: usize) {
        let field = self
            .session
            .get_field(&FieldRef::new(key))
            .unwrap_or_else(|| panic!("No field '{}'", key));
        assert_eq!(field.order, order, "Unexpected order for field '{}'", key);
    }

    /// Assert that every (parent, location) group is ordered `0..len`.
    pub fn assert_orders_dense(&self) {
        let block = self.current();
        let config = self.session.engine().config();
        let default_location = config.default_location();

        let locations = locations_used(&block.fields, default_location);

        for location in &locations {
            let group = fields_in(&block.fields, location, default_location);
            assert!(
                is_dense(&group),
                "Orders in '{}' are not dense: {:?}",
                location,
                group.iter().map(|f| (f.name.as_str(), f.order)).collect::<Vec<_>>()
            );
        }

        for (key, field) in &block.fields {
            if let Some(sub_fields) = &field.sub_fields {
                assert!(
                    is_dense(sub_fields.values()),
                    "Orders under '{}' are not dense",
                    key
                );
            }
        }
    }
}

impl Deref for TestDocument {
    type Target = FieldSession<MemoryStore>;

    fn deref(&self) -> &Self::Target {
        &self.session
    }
}

impl DerefMut for TestDocument {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.session
    }
}
