//! Field model and selected-field references

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use studio_meta::{Location, ValueType};

use crate::collection::FieldCollection;

/// A named unit of content-entry schema.
///
/// Well-known attributes are typed; everything else a control stores (help
/// text, placeholder, default value, min/max, ...) lives in `settings` and is
/// written back verbatim, so keys this crate does not interpret survive a
/// round-trip.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Field {
    /// Slug, unique among siblings
    #[serde(default)]
    pub name: String,
    /// Storage key; differs from `name` when a suffix was needed
    #[serde(rename = "uniqueId", default, skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
    #[serde(default)]
    pub label: String,
    /// Control identifier (e.g. "text", "image")
    #[serde(default)]
    pub control: String,
    /// Stored-value type
    #[serde(rename = "type", default)]
    pub value_type: ValueType,
    /// Placement bucket; `None` means the default location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Rank within the (parent, location) group
    #[serde(default)]
    pub order: usize,
    /// Identifier of the enclosing repeater, for nested fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_fields: Option<FieldCollection>,
    /// Control-specific settings
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Storage key: `uniqueId`, falling back to `name`.
    ///
    /// Returns `None` for a field with neither.
    pub fn key(&self) -> Option<&str> {
        self.unique_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or(Some(self.name.as_str()).filter(|name| !name.is_empty()))
    }

    /// The location this field is displayed in, resolving an absent
    /// location to `default`.
    pub fn location_or<'a>(&'a self, default: &'a Location) -> &'a Location {
        self.location.as_ref().unwrap_or(default)
    }

    /// Check whether this field belongs to `location`.
    pub fn is_in(&self, location: &Location, default: &Location) -> bool {
        match &self.location {
            Some(own) => own == location,
            None => location == default,
        }
    }

    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    /// Whether this field owns nested fields.
    pub fn has_sub_fields(&self) -> bool {
        self.sub_fields.as_ref().is_some_and(|subs| !subs.is_empty())
    }
}

/// Lightweight locator for the field a user action targets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldRef {
    #[serde(rename = "uniqueId", default)]
    pub unique_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl FieldRef {
    /// Reference a top-level field whose name and identifier match.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            unique_id: name.clone(),
            name,
            parent: None,
        }
    }

    /// Reference a field nested under `parent`.
    pub fn nested(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            parent: Some(parent.into()),
            ..Self::new(name)
        }
    }

    /// Reference an existing field.
    pub fn from_field(field: &Field) -> Self {
        Self {
            unique_id: field.key().unwrap_or_default().to_string(),
            name: field.name.clone(),
            parent: field.parent.clone(),
        }
    }

    /// Collection key this reference points at.
    pub fn key(&self) -> &str {
        if self.unique_id.is_empty() {
            &self.name
        } else {
            &self.unique_id
        }
    }
}
