//! Field mutation engine
//!
//! [`FieldEngine`] holds the explicit editor configuration and control
//! registry. Its operations are pure: each takes the current [`Block`],
//! validates it, edits a working copy, and returns an [`Outcome`]. An
//! operation either yields a complete new block or reports why it was
//! skipped; a partially edited block never escapes.
//!
//! Operations are split by concern:
//!
//! - `add`: new fields
//! - `control`: control-type changes
//! - `settings`: settings merges, location moves, renames
//! - `structure`: delete and duplicate
//! - `reorder`: swaps and order repair
//! - `query`: read accessors

mod add;
mod control;
mod query;
mod reorder;
mod settings;
mod structure;

use studio_meta::{ControlRegistry, EditorConfig, Location};

use crate::block::Block;
use crate::collection::FieldCollection;
use crate::error::Result;
use crate::field::FieldRef;

/// Result of an engine operation
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T = ()> {
    /// The edit succeeded; `block` is the complete new block.
    Applied { block: Block, value: T },
    /// Nothing changed.
    Skipped(SkipReason),
}

impl<T> Outcome<T> {
    pub(crate) fn applied(block: Block, value: T) -> Self {
        Self::Applied { block, value }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    pub fn block(&self) -> Option<&Block> {
        match self {
            Self::Applied { block, .. } => Some(block),
            Self::Skipped(_) => None,
        }
    }

    pub fn into_block(self) -> Option<Block> {
        match self {
            Self::Applied { block, .. } => Some(block),
            Self::Skipped(_) => None,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Applied { value, .. } => Some(value),
            Self::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            Self::Applied { .. } => None,
            Self::Skipped(reason) => Some(reason),
        }
    }

    /// Replace the block of an applied outcome.
    pub fn map_block(self, f: impl FnOnce(Block) -> Block) -> Self {
        match self {
            Self::Applied { block, value } => Self::Applied {
                block: f(block),
                value,
            },
            skipped => skipped,
        }
    }
}

/// Why an operation left the block unchanged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No field under the referenced identifier
    UnknownField { unique_id: String },
    /// No top-level field under the referenced parent identifier
    UnknownParent { parent: String },
    /// Control name absent from the registry
    UnknownControl { control: String },
    /// The field reference carries no name
    MissingName,
    /// A reorder index past the end of the group
    IndexOutOfRange { index: usize, len: usize },
    /// Settings that fail validation for the field's control
    InvalidSettings { message: String },
}

/// Keys a settings merge may not touch; they change only through the
/// structural operations that keep references consistent.
const STRUCTURAL_KEYS: &[&str] = &["uniqueId", "parent", "sub_fields"];

/// Stateless field mutation engine.
#[derive(Debug, Clone, Default)]
pub struct FieldEngine {
    config: EditorConfig,
    controls: ControlRegistry,
}

impl FieldEngine {
    pub fn new(config: EditorConfig, controls: ControlRegistry) -> Self {
        Self { config, controls }
    }

    /// Engine with default configuration and the built-in controls.
    pub fn with_builtins() -> Self {
        Self::new(EditorConfig::default(), ControlRegistry::with_builtins())
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn controls(&self) -> &ControlRegistry {
        &self.controls
    }

    fn default_location(&self) -> &Location {
        self.config.default_location()
    }

    /// Validate the input block and take a working copy of it.
    fn working_copy(&self, block: &Block) -> Result<Block> {
        block.validate()?;
        Ok(block.clone())
    }
}

/// Locate the sibling collection and key a reference points at, reporting
/// the matching skip reason when either is missing.
fn locate<'a>(
    block: &'a mut Block,
    reference: &FieldRef,
) -> std::result::Result<(&'a mut FieldCollection, String), SkipReason> {
    let key = reference.key().to_string();
    let parent = reference.parent.as_deref();

    if let Some(parent) = parent {
        if !block.fields.contains_key(parent) {
            return Err(SkipReason::UnknownParent {
                parent: parent.to_string(),
            });
        }
    }

    let siblings = block
        .siblings_mut(parent)
        .ok_or_else(|| SkipReason::UnknownParent {
            parent: parent.unwrap_or_default().to_string(),
        })?;

    if !siblings.contains_key(&key) {
        return Err(SkipReason::UnknownField { unique_id: key });
    }

    Ok((siblings, key))
}

/// Point every field in `sub_fields` at `parent`.
fn reparent(sub_fields: Option<&mut FieldCollection>, parent: &str) {
    if let Some(sub_fields) = sub_fields {
        for sub_field in sub_fields.values_mut() {
            sub_field.parent = Some(parent.to_string());
        }
    }
}
