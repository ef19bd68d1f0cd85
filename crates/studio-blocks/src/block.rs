//! Block model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::collection::FieldCollection;
use crate::error::{Error, Result};
use crate::field::{Field, FieldRef};

/// A named, reusable content component composed of fields.
///
/// Block-level metadata (icon, category, title, keywords, ...) is carried in
/// `meta` untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    /// Namespaced identifier (e.g. `block-studio/hero`)
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: FieldCollection,
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

impl Block {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The collection a field with the given parent lives in.
    ///
    /// `None` for a parent that does not exist. A parent that exists but
    /// has never held sub-fields yields `None` as well; see
    /// [`Block::siblings_mut`] for the coercing variant.
    pub fn siblings(&self, parent: Option<&str>) -> Option<&FieldCollection> {
        match parent {
            None => Some(&self.fields),
            Some(parent) => self.fields.get(parent)?.sub_fields.as_ref(),
        }
    }

    /// Mutable access to the collection a field with the given parent lives
    /// in, creating an empty `sub_fields` mapping on the parent if needed.
    pub fn siblings_mut(&mut self, parent: Option<&str>) -> Option<&mut FieldCollection> {
        match parent {
            None => Some(&mut self.fields),
            Some(parent) => Some(
                self.fields
                    .get_mut(parent)?
                    .sub_fields
                    .get_or_insert_with(FieldCollection::new),
            ),
        }
    }

    /// Look up the field a reference points at.
    pub fn field(&self, reference: &FieldRef) -> Option<&Field> {
        self.siblings(reference.parent.as_deref())?
            .get(reference.key())
    }

    /// Check the structural contract of the field tree.
    ///
    /// Violations are caller bugs, not recoverable states:
    /// - a field whose `parent` names its own key
    /// - a nested field whose `parent` names a different field than the one
    ///   holding it
    /// - sub-fields nested more than one level deep
    pub fn validate(&self) -> Result<()> {
        for (key, field) in &self.fields {
            if field.parent.as_deref() == Some(key.as_str()) {
                return Err(Error::contract(key, "parent points to the field itself"));
            }
            let Some(sub_fields) = &field.sub_fields else {
                continue;
            };
            for (sub_key, sub_field) in sub_fields {
                if sub_field.parent.as_deref() == Some(sub_key.as_str()) {
                    return Err(Error::contract(sub_key, "parent points to the field itself"));
                }
                if let Some(parent) = sub_field.parent.as_deref() {
                    if parent != key {
                        return Err(Error::contract(
                            sub_key,
                            format!("nested under '{key}' but parent is '{parent}'"),
                        ));
                    }
                }
                if sub_field.has_sub_fields() {
                    return Err(Error::contract(
                        sub_key,
                        "sub-fields are nested more than one level deep",
                    ));
                }
            }
        }
        Ok(())
    }
}
