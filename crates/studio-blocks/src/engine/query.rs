use studio_meta::Location;

use super::FieldEngine;
use crate::block::Block;
use crate::collection::to_sequence;
use crate::field::{Field, FieldRef};
use crate::location::fields_in;

impl FieldEngine {
    /// Look up a single field, top-level or nested.
    pub fn get_field(&self, block: &Block, reference: &FieldRef) -> Option<Field> {
        block.field(reference).cloned()
    }

    /// Ordered fields shown in `location`, or the ordered sub-fields of
    /// `parent`.
    ///
    /// Returns `None` when `parent` names no top-level field. A parent
    /// without sub-fields yields an empty list.
    pub fn get_fields_for_location(
        &self,
        block: &Block,
        location: &Location,
        parent: Option<&str>,
    ) -> Option<Vec<Field>> {
        match parent {
            None => Some(fields_in(&block.fields, location, self.default_location())),
            Some(parent) => {
                let field = block.fields.get(parent)?;
                Some(field.sub_fields.as_ref().map(to_sequence).unwrap_or_default())
            }
        }
    }
}
