//! Editor configuration and control metadata for Block Studio.
//!
//! This crate provides the explicit configuration value handed to the field
//! engine (locations, default control, naming) and the control registry that
//! acts as the source of truth for valid control names, their stored value
//! types, and the default settings new fields start with.

pub mod config;
pub mod error;
pub mod loader;
pub mod registry;
pub mod schema;

pub use config::{EditorConfig, Location, LocationConfig};
pub use error::{Error, Result};
pub use loader::ControlLoader;
pub use registry::ControlRegistry;
pub use schema::{ControlDefinition, ValueType};
