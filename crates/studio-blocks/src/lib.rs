//! Field and block state management for Block Studio.
//!
//! A block is a reusable content component composed of fields. This crate
//! keeps the nested, order-sensitive, location-partitioned field collection
//! of a block consistent across structural edits, and moves blocks in and
//! out of the host's serialized content document.
//!
//! # Layers
//!
//! - [`collection`], [`order`], [`ident`], [`location`]: pure helpers over a
//!   [`FieldCollection`] (mapping/sequence codec, dense ordering, identifier
//!   allocation, location partitioning).
//! - [`content`]: reads the single block out of a content string and writes
//!   it back.
//! - [`engine`]: [`FieldEngine`], the mutation engine. Every operation takes
//!   the current [`Block`] and returns an [`Outcome`] holding a new block, or
//!   a reason the edit was skipped.
//! - [`session`]: [`FieldSession`] binds an engine to a [`ContentStore`],
//!   re-reading content before and writing it after every edit.

pub mod block;
pub mod collection;
pub mod content;
pub mod engine;
pub mod error;
pub mod field;
pub mod ident;
pub mod location;
pub mod logging;
pub mod order;
pub mod session;
pub mod settings;
pub mod store;

pub use block::Block;
pub use collection::{FieldCollection, to_mapping, to_sequence};
pub use content::{read_block, read_block_or_default, write_block};
pub use engine::{FieldEngine, Outcome, SkipReason};
pub use error::{Error, Result};
pub use field::{Field, FieldRef};
pub use ident::{allocate_identifier, next_identifier};
pub use location::fields_in;
pub use order::normalize;
pub use session::FieldSession;
pub use settings::{ChoiceOption, ControlSettings};
pub use store::{ContentStore, MemoryStore};
pub use studio_meta::{ControlRegistry, EditorConfig, Location};
