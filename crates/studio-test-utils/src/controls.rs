//! [`ControlsDir`]: a temporary directory of control definitions.

use std::fs;
use std::path::Path;

use studio_meta::{ControlLoader, ControlRegistry};
use tempfile::TempDir;

/// Temporary `controls/` directory for loader and registry tests.
pub struct ControlsDir {
    temp_dir: TempDir,
}

impl Default for ControlsDir {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlsDir {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `<file_name>` with raw TOML content.
    pub fn write(&self, file_name: &str, content: &str) -> &Self {
        fs::write(self.path().join(file_name), content).unwrap();
        self
    }

    /// Built-in controls with this directory's definitions layered on top.
    pub fn registry(&self) -> ControlRegistry {
        let mut registry = ControlRegistry::with_builtins();
        ControlLoader::new()
            .load_into(self.path(), &mut registry)
            .expect("ControlsDir::registry: failed to read controls directory");
        registry
    }
}
