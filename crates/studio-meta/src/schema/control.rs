//! Control definition schema
//!
//! A control is the input widget backing a field. The registry only needs to
//! know its identifier, the type of value it stores, whether it holds nested
//! fields, and the settings a new field of that control starts with.
//!
//! # Example TOML
//!
//! ```toml
//! name = "number"
//! label = "Number"
//! type = "integer"
//!
//! [default_settings]
//! help = ""
//! placeholder = ""
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Stored-value type of a field
///
/// Types this crate does not know are kept verbatim in [`ValueType::Other`]
/// so host-defined controls and content written by newer hosts round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ValueType {
    #[default]
    String,
    Textarea,
    Boolean,
    Integer,
    Number,
    Array,
    Object,
    Other(String),
}

impl ValueType {
    pub fn as_str(&self) -> &str {
        match self {
            ValueType::String => "string",
            ValueType::Textarea => "textarea",
            ValueType::Boolean => "boolean",
            ValueType::Integer => "integer",
            ValueType::Number => "number",
            ValueType::Array => "array",
            ValueType::Object => "object",
            ValueType::Other(name) => name,
        }
    }

    /// Whether this is one of the built-in types.
    pub fn is_builtin(&self) -> bool {
        !matches!(self, ValueType::Other(_))
    }
}

impl From<&str> for ValueType {
    fn from(s: &str) -> Self {
        match s {
            "string" => ValueType::String,
            "textarea" => ValueType::Textarea,
            "boolean" => ValueType::Boolean,
            "integer" => ValueType::Integer,
            "number" => ValueType::Number,
            "array" => ValueType::Array,
            "object" => ValueType::Object,
            other => ValueType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ValueType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ValueType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(ValueType::from(name.as_str()))
    }
}

/// Descriptor for a registered control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlDefinition {
    /// Control identifier stored on fields (e.g. "text", "image")
    pub name: String,
    /// Human-readable name
    #[serde(default)]
    pub label: Option<String>,
    /// Value type written to a field's `type` attribute
    #[serde(rename = "type", default)]
    pub value_type: ValueType,
    /// Whether fields of this control own `sub_fields`
    #[serde(default)]
    pub nested: bool,
    #[serde(default)]
    pub default_settings: Map<String, Value>,
}

impl ControlDefinition {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            label: None,
            value_type,
            nested: false,
            default_settings: Map::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.default_settings.insert(key.into(), value.into());
        self
    }

    pub fn nested(mut self) -> Self {
        self.nested = true;
        self
    }
}
