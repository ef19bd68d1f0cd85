use studio_meta::Location;

use super::{FieldEngine, Outcome, SkipReason};
use crate::block::Block;
use crate::collection::to_sequence;
use crate::error::Result;
use crate::location::{fields_in, locations_used};
use crate::order::normalize;

impl FieldEngine {
    /// Swap the fields at positions `from` and `to` of a group, then
    /// renumber the group.
    ///
    /// This is a pairwise swap, not a move: reordering `[a, b, c]` with
    /// `from = 0, to = 2` gives `[c, b, a]`. At the top level the group is
    /// `location`; fields in any other location keep their order. With a
    /// `parent` the group is that parent's sub-fields and `location` is
    /// not consulted.
    pub fn reorder_fields(
        &self,
        block: &Block,
        from: usize,
        to: usize,
        location: &Location,
        parent: Option<&str>,
    ) -> Result<Outcome> {
        let mut working = self.working_copy(block)?;
        let default_location = self.default_location().clone();

        let Some(siblings) = working.siblings_mut(parent) else {
            return Ok(Outcome::Skipped(SkipReason::UnknownParent {
                parent: parent.unwrap_or_default().to_string(),
            }));
        };

        let mut group = match parent {
            None => fields_in(siblings, location, &default_location),
            Some(_) => to_sequence(siblings),
        };

        let len = group.len();
        for index in [from, to] {
            if index >= len {
                return Ok(Outcome::Skipped(SkipReason::IndexOutOfRange { index, len }));
            }
        }

        group.swap(from, to);
        siblings.merge(normalize(group));

        tracing::debug!(from, to, %location, ?parent, "Reordered fields");
        Ok(Outcome::applied(working, ()))
    }

    /// Renumber every (parent, location) group so its orders are exactly
    /// `0..len`, keeping the current relative order.
    ///
    /// Sub-fields form one group per parent regardless of location.
    pub fn normalize_orders(&self, block: &Block) -> Block {
        let mut normalized = block.clone();
        let default_location = self.default_location().clone();

        for location in locations_used(&block.fields, &default_location) {
            let group = fields_in(&normalized.fields, &location, &default_location);
            normalized.fields.merge(normalize(group));
        }

        for field in normalized.fields.values_mut() {
            if let Some(sub_fields) = field.sub_fields.as_mut() {
                let group = to_sequence(sub_fields);
                sub_fields.merge(normalize(group));
            }
        }

        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::is_dense;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn block(value: serde_json::Value) -> Block {
        serde_json::from_value(value).unwrap()
    }

    fn order_of(block: &Block, key: &str) -> usize {
        block.fields.get(key).unwrap().order
    }

    #[test]
    fn test_reorder_swaps_two_fields() {
        let existing = block(json!({"fields": {
            "a": {"name": "a", "order": 0},
            "b": {"name": "b", "order": 1}
        }}));
        let engine = FieldEngine::with_builtins();
        let block = engine
            .reorder_fields(&existing, 0, 1, &Location::editor(), None)
            .unwrap()
            .into_block()
            .unwrap();

        assert_eq!(order_of(&block, "a"), 1);
        assert_eq!(order_of(&block, "b"), 0);
        assert_eq!(block.fields.get("a").unwrap().name, "a");
    }

    #[test]
    fn test_reorder_is_a_swap_not_a_shift() {
        let existing = block(json!({"fields": {
            "a": {"name": "a", "location": "editor", "order": 0},
            "b": {"name": "b", "location": "editor", "order": 1},
            "c": {"name": "c", "location": "editor", "order": 2}
        }}));
        let engine = FieldEngine::with_builtins();
        let block = engine
            .reorder_fields(&existing, 0, 2, &Location::editor(), None)
            .unwrap()
            .into_block()
            .unwrap();

        assert_eq!(order_of(&block, "c"), 0);
        assert_eq!(order_of(&block, "b"), 1);
        assert_eq!(order_of(&block, "a"), 2);
    }

    #[test]
    fn test_reorder_leaves_other_location_alone() {
        let existing = block(json!({"fields": {
            "a": {"name": "a", "location": "editor", "order": 0},
            "b": {"name": "b", "location": "editor", "order": 1},
            "s": {"name": "s", "location": "inspector", "order": 4}
        }}));
        let engine = FieldEngine::with_builtins();
        let block = engine
            .reorder_fields(&existing, 1, 0, &Location::editor(), None)
            .unwrap()
            .into_block()
            .unwrap();

        assert_eq!(order_of(&block, "a"), 1);
        assert_eq!(block.fields.get("s").unwrap(), existing.fields.get("s").unwrap());
    }

    #[test]
    fn test_reorder_sub_fields() {
        let existing = block(json!({"fields": {
            "items": {"name": "items", "control": "repeater", "sub_fields": {
                "row": {"name": "row", "parent": "items", "order": 0},
                "cell": {"name": "cell", "parent": "items", "order": 1}
            }}
        }}));
        let engine = FieldEngine::with_builtins();
        let block = engine
            .reorder_fields(&existing, 0, 1, &Location::editor(), Some("items"))
            .unwrap()
            .into_block()
            .unwrap();

        let subs = block.fields.get("items").unwrap().sub_fields.as_ref().unwrap();
        assert_eq!(subs.get("row").unwrap().order, 1);
        assert_eq!(subs.get("cell").unwrap().order, 0);
    }

    #[test]
    fn test_reorder_out_of_range_is_skipped() {
        let existing = block(json!({"fields": {"a": {"name": "a", "order": 0}}}));
        let engine = FieldEngine::with_builtins();
        let outcome = engine
            .reorder_fields(&existing, 0, 3, &Location::editor(), None)
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Skipped(SkipReason::IndexOutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn test_reorder_unknown_parent_is_skipped() {
        let engine = FieldEngine::with_builtins();
        let outcome = engine
            .reorder_fields(&Block::default(), 0, 0, &Location::editor(), Some("ghost"))
            .unwrap();
        assert!(!outcome.is_applied());
    }

    #[test]
    fn test_normalize_orders_repairs_every_group() {
        let existing = block(json!({"fields": {
            "a": {"name": "a", "order": 3},
            "b": {"name": "b", "location": "editor", "order": 7},
            "s": {"name": "s", "location": "inspector", "order": 2},
            "t": {"name": "t", "location": "inspector", "order": 2},
            "items": {"name": "items", "location": "inspector", "order": 9, "sub_fields": {
                "row": {"name": "row", "parent": "items", "order": 5}
            }}
        }}));
        let engine = FieldEngine::with_builtins();
        let block = engine.normalize_orders(&existing);

        let editor = Location::editor();
        let inspector = Location::inspector();
        assert!(is_dense(&fields_in(&block.fields, &editor, &editor)));
        assert!(is_dense(&fields_in(&block.fields, &inspector, &editor)));
        assert_eq!(order_of(&block, "a"), 0);
        assert_eq!(order_of(&block, "b"), 1);
        assert_eq!(order_of(&block, "items"), 2);

        let subs = block.fields.get("items").unwrap().sub_fields.as_ref().unwrap();
        assert_eq!(subs.get("row").unwrap().order, 0);
    }
}
