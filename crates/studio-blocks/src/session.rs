//! Editing session over a host content store

use serde_json::{Map, Value};
use studio_meta::Location;

use crate::block::Block;
use crate::content::{read_block, write_block};
use crate::engine::{FieldEngine, Outcome};
use crate::error::Result;
use crate::field::{Field, FieldRef};
use crate::store::ContentStore;

/// Binds a [`FieldEngine`] to a [`ContentStore`].
///
/// Every mutation re-reads the store, applies the engine operation, and
/// writes the complete new block back. Skipped operations leave the store
/// untouched. When `normalize_on_write` is set, orders are repaired before
/// each write.
#[derive(Debug)]
pub struct FieldSession<S: ContentStore> {
    store: S,
    engine: FieldEngine,
}

impl<S: ContentStore> FieldSession<S> {
    pub fn new(store: S, engine: FieldEngine) -> Self {
        Self { store, engine }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn engine(&self) -> &FieldEngine {
        &self.engine
    }

    /// The stored block, or `None` when there is none or it cannot be read.
    pub fn block(&self) -> Option<Block> {
        match read_block(&self.store.edited_content()) {
            Ok(block) => block,
            Err(e) => {
                tracing::warn!("Cannot read block content: {}", e);
                None
            }
        }
    }

    fn current_block(&self) -> Result<Block> {
        Ok(read_block(&self.store.edited_content())?.unwrap_or_default())
    }

    /// Persist an applied outcome, returning it with the block as written.
    fn commit<T>(&mut self, outcome: Outcome<T>) -> Result<Outcome<T>> {
        let outcome = outcome.map_block(|block| self.prepare(block));
        let Some(block) = outcome.block() else {
            tracing::debug!(reason = ?outcome.skip_reason(), "Operation skipped; content unchanged");
            return Ok(outcome);
        };

        let content = write_block(block)?;
        self.store.set_edited_content(content);
        tracing::debug!(block = %block.name, fields = block.fields.len(), "Wrote block");

        Ok(outcome)
    }

    /// Repair orders if configured and make sure the block has a name.
    fn prepare(&self, block: Block) -> Block {
        let mut block = if self.engine.config().normalize_on_write {
            self.engine.normalize_orders(&block)
        } else {
            block
        };
        if block.name.is_empty() {
            block.name = self.engine.config().fallback_block_key();
        }
        block
    }

    pub fn add_new_field(
        &mut self,
        location: &Location,
        parent: Option<&str>,
    ) -> Result<Outcome<String>> {
        let block = self.current_block()?;
        let outcome = self.engine.add_new_field(&block, location, parent)?;
        self.commit(outcome)
    }

    pub fn change_control(&mut self, reference: &FieldRef, control: &str) -> Result<Outcome> {
        let block = self.current_block()?;
        let outcome = self.engine.change_control(&block, reference, control)?;
        self.commit(outcome)
    }

    pub fn change_field_settings(
        &mut self,
        reference: &FieldRef,
        settings: &Map<String, Value>,
    ) -> Result<Outcome> {
        let block = self.current_block()?;
        let outcome = self.engine.change_field_settings(&block, reference, settings)?;
        self.commit(outcome)
    }

    pub fn rename_field(&mut self, reference: &FieldRef, new_name: &str) -> Result<Outcome<String>> {
        let block = self.current_block()?;
        let outcome = self.engine.rename_field(&block, reference, new_name)?;
        self.commit(outcome)
    }

    pub fn delete_field(&mut self, reference: &FieldRef) -> Result<Outcome> {
        let block = self.current_block()?;
        let outcome = self.engine.delete_field(&block, reference)?;
        self.commit(outcome)
    }

    pub fn duplicate_field(&mut self, reference: &FieldRef) -> Result<Outcome<String>> {
        let block = self.current_block()?;
        let outcome = self.engine.duplicate_field(&block, reference)?;
        self.commit(outcome)
    }

    pub fn reorder_fields(
        &mut self,
        from: usize,
        to: usize,
        location: &Location,
        parent: Option<&str>,
    ) -> Result<Outcome> {
        let block = self.current_block()?;
        let outcome = self
            .engine
            .reorder_fields(&block, from, to, location, parent)?;
        self.commit(outcome)
    }

    pub fn get_field(&self, reference: &FieldRef) -> Option<Field> {
        self.engine.get_field(&self.block()?, reference)
    }

    pub fn get_fields_for_location(
        &self,
        location: &Location,
        parent: Option<&str>,
    ) -> Option<Vec<Field>> {
        self.engine
            .get_fields_for_location(&self.block()?, location, parent)
    }
}
