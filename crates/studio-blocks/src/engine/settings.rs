use serde_json::{Map, Value};
use studio_meta::Location;

use super::{FieldEngine, Outcome, STRUCTURAL_KEYS, SkipReason, locate, reparent};
use crate::block::Block;
use crate::collection::FieldCollection;
use crate::error::Result;
use crate::field::{Field, FieldRef};
use crate::ident::allocate_identifier;
use crate::location::fields_in;
use crate::order::normalize;
use crate::settings::ControlSettings;

impl FieldEngine {
    /// Shallow-merge `settings` onto a field; keys in `settings` win.
    ///
    /// A changed `location` moves the field before the merge, since the
    /// move renumbers both the old and the new location. A changed `name`
    /// renames the field after the merge. `location` is ignored for nested
    /// fields, which follow their parent, and must otherwise name one of
    /// the configured locations. `uniqueId`, `parent` and `sub_fields` are
    /// never merged.
    pub fn change_field_settings(
        &self,
        block: &Block,
        reference: &FieldRef,
        settings: &Map<String, Value>,
    ) -> Result<Outcome> {
        let mut working = self.working_copy(block)?;
        let parent = reference.parent.clone();
        let key = match locate(&mut working, reference) {
            Ok((_, key)) => key,
            Err(reason) => return Ok(Outcome::Skipped(reason)),
        };

        let mut settings = settings.clone();
        for structural in STRUCTURAL_KEYS {
            if settings.remove(*structural).is_some() {
                tracing::debug!(field = %key, key = structural, "Ignoring structural key in settings");
            }
        }

        if let Some(value) = settings.get("location").cloned() {
            if parent.is_some() {
                tracing::debug!(field = %key, "Ignoring location for nested field");
                settings.remove("location");
            } else {
                let location = match self.parse_location(&value) {
                    Ok(location) => location,
                    Err(message) => {
                        return Ok(Outcome::Skipped(SkipReason::InvalidSettings { message }));
                    }
                };
                settings.insert("location".to_string(), Value::from(location.as_str()));
                let current = working
                    .fields
                    .get(&key)
                    .map(|f| f.location_or(self.default_location()).clone());
                if current.as_ref() != Some(&location) {
                    self.move_location(&mut working.fields, &key, &location);
                }
            }
        }

        let new_name = match settings.get("name") {
            None => None,
            Some(Value::String(name)) if !name.trim().is_empty() => Some(name.clone()),
            Some(other) => {
                return Ok(Outcome::Skipped(SkipReason::InvalidSettings {
                    message: format!("name must be a non-empty string, got {other}"),
                }));
            }
        };

        let siblings = match working.siblings_mut(parent.as_deref()) {
            Some(siblings) => siblings,
            None => {
                return Ok(Outcome::Skipped(SkipReason::UnknownParent {
                    parent: parent.unwrap_or_default(),
                }));
            }
        };
        let Some(current) = siblings.get(&key) else {
            return Ok(Outcome::Skipped(SkipReason::UnknownField { unique_id: key }));
        };
        let previous_name = current.name.clone();

        let merged = match merge_settings(current, &settings) {
            Ok(merged) => merged,
            Err(message) => return Ok(Outcome::Skipped(SkipReason::InvalidSettings { message })),
        };
        // Stored values that already fail validation do not block edits to
        // other keys; only a merge that introduces a new failure is skipped.
        if let Some(message) = settings_error(&merged) {
            if settings_error(current).as_ref() != Some(&message) {
                return Ok(Outcome::Skipped(SkipReason::InvalidSettings { message }));
            }
            tracing::debug!(field = %key, "Keeping stored settings that fail validation: {}", message);
        }
        siblings.insert(key.clone(), merged);

        if let Some(new_name) = new_name.filter(|name| *name != previous_name) {
            rename_in(siblings, &key, &new_name);
        }

        tracing::debug!(field = %key, keys = settings.len(), "Changed field settings");
        Ok(Outcome::applied(working, ()))
    }

    /// Rename a field, moving it to a key derived from `new_name`.
    ///
    /// The new key is `new_name`, suffixed if a sibling already uses it.
    /// Sub-fields of the renamed field are pointed at the new key. Returns
    /// the new key.
    pub fn rename_field(
        &self,
        block: &Block,
        reference: &FieldRef,
        new_name: &str,
    ) -> Result<Outcome<String>> {
        if new_name.trim().is_empty() {
            return Ok(Outcome::Skipped(SkipReason::InvalidSettings {
                message: "name must not be empty".to_string(),
            }));
        }

        let mut working = self.working_copy(block)?;
        let (siblings, key) = match locate(&mut working, reference) {
            Ok(found) => found,
            Err(reason) => return Ok(Outcome::Skipped(reason)),
        };

        let new_key = rename_in(siblings, &key, new_name);
        match new_key {
            Some(new_key) => Ok(Outcome::applied(working, new_key)),
            None => Ok(Outcome::Skipped(SkipReason::UnknownField { unique_id: key })),
        }
    }

    /// Read a `location` setting; it must name one of the configured pair.
    fn parse_location(&self, value: &Value) -> std::result::Result<Location, String> {
        let Some(raw) = value.as_str() else {
            return Err(format!("location must be a string, got {value}"));
        };
        let location: Location = raw.parse().map_err(|e| format!("location: {e}"))?;
        if !self.config.locations.contains(&location) {
            return Err(format!("location '{location}' is not configured"));
        }
        Ok(location)
    }

    /// Move a top-level field to another location.
    ///
    /// The field leaves its old location, which is renumbered, and is
    /// appended to the new one, which is renumbered as well.
    fn move_location(&self, fields: &mut FieldCollection, key: &str, to: &Location) {
        let default_location = self.default_location().clone();
        let Some(mut field) = fields.remove(key) else {
            return;
        };
        let from = field.location_or(&default_location).clone();

        let remaining = normalize(fields_in(fields, &from, &default_location));
        fields.merge(remaining);

        let mut target = fields_in(fields, to, &default_location);
        field.location = Some(to.clone());
        target.push(field);
        fields.merge(normalize(target));

        tracing::debug!(field = key, %from, %to, "Moved field");
    }
}

/// Rename the field stored under `key`, returning its new key.
fn rename_in(siblings: &mut FieldCollection, key: &str, new_name: &str) -> Option<String> {
    let mut field = siblings.remove(key)?;
    let new_key = allocate_identifier(siblings, Some(new_name));

    field.name = new_name.to_string();
    field.unique_id = Some(new_key.clone());
    reparent(field.sub_fields.as_mut(), &new_key);

    tracing::debug!(from = key, to = %new_key, "Renamed field");
    siblings.insert(new_key.clone(), field);
    Some(new_key)
}

/// Validation failure of a field's settings, without the field name.
fn settings_error(field: &Field) -> Option<String> {
    match ControlSettings::from_field(field) {
        Ok(_) => None,
        Err(crate::error::Error::InvalidSettings { message, .. }) => Some(message),
        Err(e) => Some(e.to_string()),
    }
}

/// Shallow merge through the JSON representation so typed attributes and
/// the open settings map follow one rule.
fn merge_settings(field: &Field, settings: &Map<String, Value>) -> std::result::Result<Field, String> {
    let mut value = serde_json::to_value(field).map_err(|e| e.to_string())?;
    let Some(object) = value.as_object_mut() else {
        return Err("field did not serialize to an object".to_string());
    };
    for (key, setting) in settings {
        object.insert(key.clone(), setting.clone());
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}
