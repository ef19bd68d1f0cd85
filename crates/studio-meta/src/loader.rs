//! Loader for control definitions stored one per file
//!
//! ```text
//! controls/
//!   text.toml
//!   range.toml
//!   repeater.toml
//! ```

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::registry::ControlRegistry;
use crate::schema::ControlDefinition;

/// Loads control definitions from a directory of TOML files
#[derive(Debug, Default)]
pub struct ControlLoader;

impl ControlLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load every `*.toml` control definition in `dir` into a new registry.
    ///
    /// A missing directory yields an empty registry. Files that fail to
    /// parse are skipped with a warning.
    pub fn load_controls(&self, dir: &Path) -> Result<ControlRegistry> {
        let mut registry = ControlRegistry::new();
        self.load_into(dir, &mut registry)?;
        Ok(registry)
    }

    /// Load definitions from `dir` on top of an existing registry.
    ///
    /// Definitions in the directory replace registered controls of the same
    /// name, so a host can override the built-ins.
    pub fn load_into(&self, dir: &Path, registry: &mut ControlRegistry) -> Result<usize> {
        if !dir.exists() {
            return Ok(0);
        }

        let entries = fs::read_dir(dir).map_err(|source| Error::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut loaded = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "toml") {
                continue;
            }
            match self.load_definition(&path) {
                Ok(definition) => {
                    tracing::debug!(control = %definition.name, ?path, "Loaded control definition");
                    registry.register(definition);
                    loaded += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to load {:?}: {}", path, e);
                }
            }
        }

        Ok(loaded)
    }

    fn load_definition(&self, path: &Path) -> Result<ControlDefinition> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| Error::config(format!("{}: {e}", path.display())))
    }
}
