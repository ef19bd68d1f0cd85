//! Schema definitions for controls
//!
//! Control definitions can be built in code, parsed from a `[controls]`
//! TOML table, or loaded one per file from a definitions directory.

pub mod control;

pub use control::{ControlDefinition, ValueType};
