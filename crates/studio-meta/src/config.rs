//! Editor configuration for Block Studio
//!
//! The field engine never reads ambient editor state. Everything it needs to
//! know about the surrounding editor (which placement buckets exist, which
//! control a new field starts with, how new fields are named) is carried by
//! an [`EditorConfig`] value.
//!
//! # Example TOML
//!
//! ```toml
//! block_namespace = "block-studio"
//! default_control = "text"
//! new_field_base = "new-field"
//! new_field_label = "New Field"
//! normalize_on_write = true
//!
//! [locations]
//! primary = "editor"
//! secondary = "inspector"
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Symbolic placement bucket for a field's UI.
///
/// Locations are plain slugs so that content written by a host with a
/// different location pair still round-trips.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
    pub const EDITOR: &'static str = "editor";
    pub const INSPECTOR: &'static str = "inspector";

    /// The main editing canvas.
    pub fn editor() -> Self {
        Self(Self::EDITOR.to_string())
    }

    /// The secondary settings panel.
    pub fn inspector() -> Self {
        Self(Self::INSPECTOR.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let slug = s.trim();
        if slug.is_empty() || slug.chars().any(char::is_whitespace) {
            return Err(Error::InvalidLocation {
                location: s.to_string(),
            });
        }
        Ok(Self(slug.to_string()))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Location {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The two-location system: a primary surface and its complement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Default bucket; fields without a location live here
    #[serde(default = "Location::editor")]
    pub primary: Location,
    #[serde(default = "Location::inspector")]
    pub secondary: Location,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            primary: Location::editor(),
            secondary: Location::inspector(),
        }
    }
}

impl LocationConfig {
    /// The complementary location, or `None` for a location outside the
    /// configured pair.
    pub fn other(&self, location: &Location) -> Option<Location> {
        if *location == self.primary {
            Some(self.secondary.clone())
        } else if *location == self.secondary {
            Some(self.primary.clone())
        } else {
            None
        }
    }

    /// Check whether a location belongs to the configured pair.
    pub fn contains(&self, location: &Location) -> bool {
        *location == self.primary || *location == self.secondary
    }
}

/// Explicit configuration passed to the field engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Namespace prefix for block names (e.g. `block-studio/hero`)
    #[serde(default = "default_namespace")]
    pub block_namespace: String,
    /// Control new fields start with
    #[serde(default = "default_control")]
    pub default_control: String,
    /// Base slug for new field identifiers
    #[serde(default = "default_field_base")]
    pub new_field_base: String,
    /// Base label for new fields; suffixed with the allocated number
    #[serde(default = "default_field_label")]
    pub new_field_label: String,
    #[serde(default)]
    pub locations: LocationConfig,
    /// Repair field ordering before content is persisted
    #[serde(default = "default_true")]
    pub normalize_on_write: bool,
}

fn default_namespace() -> String {
    "block-studio".to_string()
}

fn default_control() -> String {
    "text".to_string()
}

fn default_field_base() -> String {
    "new-field".to_string()
}

fn default_field_label() -> String {
    "New Field".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            block_namespace: default_namespace(),
            default_control: default_control(),
            new_field_base: default_field_base(),
            new_field_label: default_field_label(),
            locations: LocationConfig::default(),
            normalize_on_write: true,
        }
    }
}

impl EditorConfig {
    /// Parse configuration from TOML. Every key is optional.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// The location that fields without an explicit location belong to.
    pub fn default_location(&self) -> &Location {
        &self.locations.primary
    }

    /// Complementary location within the configured pair.
    pub fn other_location(&self, location: &Location) -> Option<Location> {
        self.locations.other(location)
    }

    /// Namespaced key used for a block written without a name.
    pub fn fallback_block_key(&self) -> String {
        format!("{}/block", self.block_namespace)
    }

    fn validate(&self) -> Result<()> {
        if self.locations.primary == self.locations.secondary {
            return Err(Error::config(format!(
                "locations.primary and locations.secondary are both '{}'",
                self.locations.primary
            )));
        }
        for location in [&self.locations.primary, &self.locations.secondary] {
            location.as_str().parse::<Location>()?;
        }
        if self.new_field_base.trim().is_empty() {
            return Err(Error::config("new_field_base must not be empty"));
        }
        if self.default_control.trim().is_empty() {
            return Err(Error::config("default_control must not be empty"));
        }
        Ok(())
    }
}
