use super::{FieldEngine, Outcome, SkipReason, locate};
use crate::block::Block;
use crate::collection::FieldCollection;
use crate::error::Result;
use crate::field::{Field, FieldRef};

impl FieldEngine {
    /// Switch a field to another control.
    ///
    /// The field keeps its identity and placement (`name`, `uniqueId`,
    /// `label`, `location`, `order`, `parent`). Every control-specific
    /// setting is reset to the new control's defaults and `type` follows
    /// the new control. Sub-fields survive only if the new control holds
    /// nested fields.
    pub fn change_control(
        &self,
        block: &Block,
        reference: &FieldRef,
        control: &str,
    ) -> Result<Outcome> {
        if reference.name.is_empty() {
            return Ok(Outcome::Skipped(SkipReason::MissingName));
        }
        let Some(definition) = self.controls.get(control) else {
            tracing::debug!(control, "Skipping control change: unknown control");
            return Ok(Outcome::Skipped(SkipReason::UnknownControl {
                control: control.to_string(),
            }));
        };

        let mut working = self.working_copy(block)?;
        let (siblings, key) = match locate(&mut working, reference) {
            Ok(found) => found,
            Err(reason) => return Ok(Outcome::Skipped(reason)),
        };
        let Some(previous) = siblings.remove(&key) else {
            return Ok(Outcome::Skipped(SkipReason::UnknownField { unique_id: key }));
        };

        let sub_fields = if definition.nested {
            Some(previous.sub_fields.unwrap_or_else(FieldCollection::new))
        } else {
            None
        };

        let replacement = Field {
            name: previous.name,
            unique_id: previous.unique_id,
            label: previous.label,
            control: definition.name.clone(),
            value_type: definition.value_type.clone(),
            location: previous.location,
            order: previous.order,
            parent: previous.parent,
            sub_fields,
            settings: definition.default_settings.clone(),
        };

        tracing::debug!(field = %key, control, "Changed field control");
        siblings.insert(key, replacement);

        Ok(Outcome::applied(working, ()))
    }
}
