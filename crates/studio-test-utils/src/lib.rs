//! Shared test utilities for the Block Studio workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`field`]: [`FieldBuilder`] for terse field fixtures
//! - [`document`]: [`TestDocument`], a session over an in-memory store with
//!   assertion helpers
//! - [`controls`]: [`ControlsDir`], a temporary directory of control
//!   definition files

pub mod controls;
pub mod document;
pub mod field;

pub use controls::ControlsDir;
pub use document::TestDocument;
pub use field::FieldBuilder;
