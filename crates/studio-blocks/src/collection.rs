//! Field collection and the mapping/sequence codec
//!
//! A block stores its fields as a mapping keyed by identifier, which is what
//! lookups and edits want. Display wants an ordered list. The two are
//! converted explicitly with [`to_sequence`] and [`to_mapping`]; nothing
//! mutates one representation while assuming the other stays in sync.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::field::Field;

/// Mapping from storage key to field.
///
/// Deserializes from either a JSON object (current representation) or a
/// JSON array (legacy representation, including the empty `[]` older
/// content used for "no fields"). `null` is read as an empty collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct FieldCollection(BTreeMap<String, Field>);

impl FieldCollection {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Field> {
        self.0.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, field: Field) -> Option<Field> {
        self.0.insert(key.into(), field)
    }

    pub fn remove(&mut self, key: &str) -> Option<Field> {
        self.0.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Field> {
        self.0.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Field> {
        self.0.values_mut()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Field> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Write a sequence back into the collection, keyed per [`to_mapping`].
    ///
    /// Fields already present under the same key are replaced; other
    /// entries are left untouched.
    pub fn merge(&mut self, fields: impl IntoIterator<Item = Field>) {
        for field in fields {
            if let Some(key) = field.key().map(str::to_string) {
                self.0.insert(key, field);
            }
        }
    }
}

impl<'de> Deserialize<'de> for FieldCollection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entry = |key: &str, value: Value| {
            serde_json::from_value::<Field>(value)
                .map_err(|e| D::Error::custom(format!("field '{key}': {e}")))
        };

        match Value::deserialize(deserializer)? {
            Value::Object(entries) => {
                let mut collection = Self::new();
                for (key, value) in entries {
                    if key.is_empty() {
                        continue;
                    }
                    let mut field = entry(key.as_str(), value)?;
                    // Keep the stored key authoritative even when the field's
                    // own identifier attributes disagree with it.
                    if field.key() != Some(key.as_str()) {
                        field.unique_id = Some(key.clone());
                    }
                    collection.0.insert(key, field);
                }
                Ok(collection)
            }
            Value::Array(items) => {
                let fields = items
                    .into_iter()
                    .enumerate()
                    .map(|(index, value)| entry(format!("#{index}").as_str(), value))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(to_mapping(fields))
            }
            Value::Null => Ok(Self::new()),
            other => Err(D::Error::custom(format!(
                "expected a field mapping or list, got {other}"
            ))),
        }
    }
}

impl FromIterator<Field> for FieldCollection {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        to_mapping(iter)
    }
}

impl IntoIterator for FieldCollection {
    type Item = (String, Field);
    type IntoIter = btree_map::IntoIter<String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldCollection {
    type Item = (&'a String, &'a Field);
    type IntoIter = btree_map::Iter<'a, String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Flatten a collection into a sequence ordered by each field's `order`.
///
/// Ties are broken by key so the result is deterministic; mapping iteration
/// order plays no part.
pub fn to_sequence(collection: &FieldCollection) -> Vec<Field> {
    let mut entries: Vec<(&String, &Field)> = collection.iter().collect();
    entries.sort_by(|(ka, a), (kb, b)| a.order.cmp(&b.order).then_with(|| ka.cmp(kb)));
    entries.into_iter().map(|(_, field)| field.clone()).collect()
}

/// Key a sequence of fields by `uniqueId`, falling back to `name`.
///
/// Fields with neither are dropped. A later field with the same key
/// replaces an earlier one.
pub fn to_mapping(fields: impl IntoIterator<Item = Field>) -> FieldCollection {
    let mut collection = FieldCollection::new();
    collection.merge(fields);
    collection
}
