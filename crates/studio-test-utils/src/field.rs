//! [`FieldBuilder`] for field fixtures.

use serde_json::Value;
use studio_blocks::{Block, Field, FieldCollection, to_mapping};
use studio_meta::{Location, ValueType};

/// Builder for a [`Field`] with sensible test defaults.
///
/// # Example
///
/// ```rust
/// use studio_test_utils::FieldBuilder;
///
/// let field = FieldBuilder::new("title")
///     .control("text")
///     .location("inspector")
///     .order(2)
///     .build();
/// assert_eq!(field.order, 2);
/// ```
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    field: Field,
}

impl FieldBuilder {
    /// Start a `text` field named `name`.
    pub fn new(name: &str) -> Self {
        Self {
            field: Field {
                label: name.to_string(),
                control: "text".to_string(),
                value_type: ValueType::String,
                ..Field::new(name)
            },
        }
    }

    pub fn unique_id(mut self, unique_id: &str) -> Self {
        self.field.unique_id = Some(unique_id.to_string());
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.field.label = label.to_string();
        self
    }

    pub fn control(mut self, control: &str) -> Self {
        self.field.control = control.to_string();
        self
    }

    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.field.value_type = value_type;
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.field.location = Some(Location::from(location));
        self
    }

    pub fn order(mut self, order: usize) -> Self {
        self.field.order = order;
        self
    }

    pub fn setting(mut self, key: &str, value: Value) -> Self {
        self.field.settings.insert(key.to_string(), value);
        self
    }

    /// Make this a repeater holding `sub_fields`, pointing each at this
    /// field's key.
    pub fn repeater(mut self, sub_fields: Vec<FieldBuilder>) -> Self {
        let parent = self
            .field
            .unique_id
            .clone()
            .unwrap_or_else(|| self.field.name.clone());
        self.field.control = "repeater".to_string();
        self.field.value_type = ValueType::Object;
        self.field.sub_fields = Some(
            sub_fields
                .into_iter()
                .map(|sub_field| {
                    let mut field = sub_field.build();
                    field.parent = Some(parent.clone());
                    field.location = None;
                    field
                })
                .collect::<FieldCollection>(),
        );
        self
    }

    pub fn build(self) -> Field {
        self.field
    }
}

/// Build a named block out of field builders.
pub fn block_of(name: &str, fields: Vec<FieldBuilder>) -> Block {
    Block {
        name: name.to_string(),
        fields: to_mapping(fields.into_iter().map(FieldBuilder::build)),
        ..Block::default()
    }
}
