use super::{FieldEngine, Outcome, SkipReason, locate, reparent};
use crate::block::Block;
use crate::error::Result;
use crate::field::FieldRef;
use crate::ident::allocate_identifier;

impl FieldEngine {
    /// Remove a field from its parent's sub-fields, or from the top level.
    ///
    /// Remaining siblings are not renumbered; follow with
    /// [`FieldEngine::normalize_orders`] when dense ordering is needed.
    pub fn delete_field(&self, block: &Block, reference: &FieldRef) -> Result<Outcome> {
        let mut working = self.working_copy(block)?;
        let (siblings, key) = match locate(&mut working, reference) {
            Ok(found) => found,
            Err(reason) => return Ok(Outcome::Skipped(reason)),
        };

        if siblings.remove(&key).is_none() {
            return Ok(Outcome::Skipped(SkipReason::UnknownField { unique_id: key }));
        }

        tracing::debug!(field = %key, parent = ?reference.parent, "Deleted field");
        Ok(Outcome::applied(working, ()))
    }

    /// Copy a field under a new identifier derived from its name.
    ///
    /// The copy is ranked after every sibling in the parent scope
    /// (`order` = sibling count), which may leave a gap in its location
    /// until the next normalize. It keeps the original's `parent`; its own
    /// sub-fields point at the copy. Returns the new identifier.
    pub fn duplicate_field(&self, block: &Block, reference: &FieldRef) -> Result<Outcome<String>> {
        let mut working = self.working_copy(block)?;
        let (siblings, key) = match locate(&mut working, reference) {
            Ok(found) => found,
            Err(reason) => return Ok(Outcome::Skipped(reason)),
        };
        let Some(original) = siblings.get(&key) else {
            return Ok(Outcome::Skipped(SkipReason::UnknownField { unique_id: key }));
        };

        let base = if original.name.is_empty() {
            key.as_str()
        } else {
            original.name.as_str()
        };
        let new_key = allocate_identifier(siblings, Some(base));

        let mut copy = original.clone();
        copy.name = new_key.clone();
        copy.unique_id = Some(new_key.clone());
        copy.order = siblings.len();
        reparent(copy.sub_fields.as_mut(), &new_key);

        siblings.insert(new_key.clone(), copy);
        tracing::debug!(from = %key, to = %new_key, "Duplicated field");

        Ok(Outcome::applied(working, new_key))
    }
}
