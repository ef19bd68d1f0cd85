//! Control registry and settings-defaults resolver
//!
//! The registry is injected into the field engine and is read-only from its
//! point of view. It decides which control names are valid, which value type
//! a field of each control stores, and which settings a new field starts with.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::schema::{ControlDefinition, ValueType};

/// Registry mapping control identifiers to their definitions.
///
/// # Example
///
/// ```
/// use studio_meta::{ControlDefinition, ControlRegistry, ValueType};
///
/// let mut registry = ControlRegistry::new();
/// registry.register(ControlDefinition::new("toggle", ValueType::Boolean).with_default("default", false));
/// assert_eq!(registry.value_type("toggle"), Some(ValueType::Boolean));
/// assert!(registry.defaults_for("missing").is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ControlRegistry {
    controls: HashMap<String, ControlDefinition>,
}

impl ControlRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            controls: HashMap::new(),
        }
    }

    /// Create a registry with the built-in controls registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        for (name, label, value_type) in [
            ("text", "Text", ValueType::String),
            ("url", "URL", ValueType::String),
            ("email", "Email", ValueType::String),
            ("color", "Color", ValueType::String),
        ] {
            registry.register(
                ControlDefinition::new(name, value_type)
                    .with_label(label)
                    .with_default("help", "")
                    .with_default("default", "")
                    .with_default("placeholder", ""),
            );
        }

        registry.register(
            ControlDefinition::new("textarea", ValueType::Textarea)
                .with_label("Textarea")
                .with_default("help", "")
                .with_default("default", "")
                .with_default("placeholder", "")
                .with_default("maxlength", Value::Null)
                .with_default("number_rows", 4)
                .with_default("new_lines", "autop"),
        );
        registry.register(
            ControlDefinition::new("number", ValueType::Integer)
                .with_label("Number")
                .with_default("help", "")
                .with_default("default", Value::Null)
                .with_default("placeholder", ""),
        );
        registry.register(
            ControlDefinition::new("range", ValueType::Integer)
                .with_label("Range")
                .with_default("help", "")
                .with_default("min", 0)
                .with_default("max", 100)
                .with_default("step", 1)
                .with_default("default", Value::Null),
        );
        for (name, label) in [("checkbox", "Checkbox"), ("toggle", "Toggle")] {
            registry.register(
                ControlDefinition::new(name, ValueType::Boolean)
                    .with_label(label)
                    .with_default("help", "")
                    .with_default("default", false),
            );
        }
        for (name, label) in [("select", "Select"), ("radio", "Radio")] {
            registry.register(
                ControlDefinition::new(name, ValueType::String)
                    .with_label(label)
                    .with_default("help", "")
                    .with_default("options", Value::Array(Vec::new()))
                    .with_default("default", ""),
            );
        }
        registry.register(
            ControlDefinition::new("multiselect", ValueType::Array)
                .with_label("Multi-Select")
                .with_default("help", "")
                .with_default("options", Value::Array(Vec::new()))
                .with_default("default", Value::Array(Vec::new())),
        );
        for (name, label) in [("image", "Image"), ("file", "File")] {
            registry.register(
                ControlDefinition::new(name, ValueType::Integer)
                    .with_label(label)
                    .with_default("help", ""),
            );
        }
        for (name, label) in [("rich-text", "Rich Text"), ("classic-text", "Classic Text")] {
            registry.register(
                ControlDefinition::new(name, ValueType::String)
                    .with_label(label)
                    .with_default("help", "")
                    .with_default("default", ""),
            );
        }
        for (name, label) in [("post", "Post"), ("taxonomy", "Taxonomy"), ("user", "User")] {
            registry.register(
                ControlDefinition::new(name, ValueType::Object)
                    .with_label(label)
                    .with_default("help", ""),
            );
        }
        registry.register(
            ControlDefinition::new("inner-blocks", ValueType::String)
                .with_label("Inner Blocks")
                .with_default("help", ""),
        );
        registry.register(
            ControlDefinition::new("repeater", ValueType::Object)
                .with_label("Repeater")
                .with_default("help", "")
                .with_default("min", Value::Null)
                .with_default("max", Value::Null)
                .nested(),
        );

        registry
    }

    /// Parse a registry from a `[controls.<name>]` TOML table.
    ///
    /// The `name` key inside each table is optional and defaults to the
    /// table key.
    pub fn from_toml(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content).map_err(|e| Error::config(e.to_string()))?;
        let mut registry = Self::new();

        let Some(controls) = table.get("controls") else {
            return Ok(registry);
        };
        let Some(controls) = controls.as_table() else {
            return Err(Error::config("`controls` must be a table"));
        };

        for (key, value) in controls {
            let mut value = value.clone();
            if let Some(entry) = value.as_table_mut() {
                entry
                    .entry("name")
                    .or_insert_with(|| toml::Value::String(key.clone()));
            }
            let definition: ControlDefinition = value
                .try_into()
                .map_err(|e: toml::de::Error| Error::config(format!("control '{key}': {e}")))?;
            registry.register(definition);
        }

        Ok(registry)
    }

    /// Register a control definition, replacing any existing definition
    /// with the same name.
    pub fn register(&mut self, definition: ControlDefinition) {
        self.controls.insert(definition.name.clone(), definition);
    }

    /// Get the definition for a control name.
    pub fn get(&self, name: &str) -> Option<&ControlDefinition> {
        self.controls.get(name)
    }

    /// Get the definition for a control name, or an error if unregistered.
    pub fn require(&self, name: &str) -> Result<&ControlDefinition> {
        self.get(name).ok_or_else(|| Error::ControlNotFound {
            name: name.to_string(),
        })
    }

    /// Check if a control is registered.
    pub fn has_control(&self, name: &str) -> bool {
        self.controls.contains_key(name)
    }

    /// The value type a control stores.
    pub fn value_type(&self, name: &str) -> Option<ValueType> {
        self.get(name).map(|c| c.value_type.clone())
    }

    /// Whether fields of this control own `sub_fields`.
    pub fn is_nested(&self, name: &str) -> bool {
        self.get(name).is_some_and(|c| c.nested)
    }

    /// Default settings for a new field of the given control.
    ///
    /// Unknown controls are not an error; they have no defaults.
    pub fn defaults_for(&self, name: &str) -> Map<String, Value> {
        self.get(name)
            .map(|c| c.default_settings.clone())
            .unwrap_or_default()
    }

    /// List all registered control names, sorted.
    pub fn list_controls(&self) -> Vec<String> {
        let mut names: Vec<String> = self.controls.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}
