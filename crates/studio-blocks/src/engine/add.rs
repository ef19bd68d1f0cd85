use studio_meta::Location;

use super::{FieldEngine, Outcome, SkipReason};
use crate::block::Block;
use crate::collection::FieldCollection;
use crate::error::Result;
use crate::field::Field;
use crate::ident::{compose_identifier, next_identifier};
use crate::location::fields_in;

impl FieldEngine {
    /// Add a field of the default control to `location`, or nested under
    /// `parent`.
    ///
    /// The identifier is allocated within the sibling collection, so a
    /// nested `new-field` does not collide with a top-level one. The new
    /// field is ranked last in its group. Returns the new identifier.
    pub fn add_new_field(
        &self,
        block: &Block,
        location: &Location,
        parent: Option<&str>,
    ) -> Result<Outcome<String>> {
        let mut working = self.working_copy(block)?;
        let default_location = self.default_location().clone();

        let Some(siblings) = working.siblings_mut(parent) else {
            tracing::debug!(?parent, "Skipping add: unknown parent");
            return Ok(Outcome::Skipped(SkipReason::UnknownParent {
                parent: parent.unwrap_or_default().to_string(),
            }));
        };

        let base = self.config.new_field_base.as_str();
        let number = next_identifier(siblings, Some(base));
        let key = compose_identifier(base, number);
        let label = match number {
            Some(n) => format!("{} {n}", self.config.new_field_label),
            None => self.config.new_field_label.clone(),
        };

        let order = match parent {
            Some(_) => siblings.len(),
            None => fields_in(siblings, location, &default_location).len(),
        };

        let control = self.config.default_control.as_str();
        let field = Field {
            name: key.clone(),
            unique_id: Some(key.clone()),
            label,
            control: control.to_string(),
            value_type: self.controls.value_type(control).unwrap_or_default(),
            location: parent.is_none().then(|| location.clone()),
            order,
            parent: parent.map(str::to_string),
            sub_fields: self
                .controls
                .is_nested(control)
                .then(FieldCollection::new),
            settings: self.controls.defaults_for(control),
        };

        siblings.insert(key.clone(), field);
        tracing::debug!(field = %key, %location, ?parent, order, "Added field");

        Ok(Outcome::applied(working, key))
    }
}
