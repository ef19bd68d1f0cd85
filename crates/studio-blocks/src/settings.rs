//! Typed view over control-specific settings
//!
//! Fields keep their settings as an open JSON map so unknown keys survive a
//! round-trip. [`ControlSettings`] interprets the keys the built-in control
//! families understand and rejects values of the wrong shape; it is applied
//! whenever settings enter the engine from outside.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::field::Field;

/// One entry of a choice control's option list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

/// Settings of a field, interpreted per control family
#[derive(Debug, Clone, PartialEq)]
pub enum ControlSettings {
    /// text, textarea, url, email, color, rich-text, classic-text
    Text {
        default: Option<String>,
        placeholder: Option<String>,
        max_length: Option<u64>,
    },
    /// number, range
    Number {
        default: Option<f64>,
        min: Option<f64>,
        max: Option<f64>,
        step: Option<f64>,
    },
    /// checkbox, toggle
    Toggle { default: bool },
    /// select, radio, multiselect
    Choice {
        options: Vec<ChoiceOption>,
        default: Option<Value>,
    },
    /// repeater
    Repeater { min: Option<u64>, max: Option<u64> },
    /// Any other control; settings are kept but not interpreted
    Other,
}

impl ControlSettings {
    /// Interpret and validate the settings of `field` for its control.
    pub fn from_field(field: &Field) -> Result<Self> {
        let name = field.key().unwrap_or_default();
        let settings = &field.settings;
        let invalid = |message: String| Error::settings(name, message);

        let parsed = match field.control.as_str() {
            "text" | "textarea" | "url" | "email" | "color" | "rich-text" | "classic-text" => {
                Self::Text {
                    default: opt_string(settings, "default").map_err(invalid)?,
                    placeholder: opt_string(settings, "placeholder").map_err(invalid)?,
                    max_length: opt_u64(settings, "maxlength").map_err(invalid)?,
                }
            }
            "number" | "range" => {
                let min = opt_f64(settings, "min").map_err(invalid)?;
                let max = opt_f64(settings, "max").map_err(invalid)?;
                if let (Some(min), Some(max)) = (min, max) {
                    if min > max {
                        return Err(invalid(format!("min {min} is greater than max {max}")));
                    }
                }
                let step = opt_f64(settings, "step").map_err(invalid)?;
                if step.is_some_and(|s| s <= 0.0) {
                    return Err(invalid("step must be positive".to_string()));
                }
                Self::Number {
                    default: opt_f64(settings, "default").map_err(invalid)?,
                    min,
                    max,
                    step,
                }
            }
            "checkbox" | "toggle" => Self::Toggle {
                default: opt_bool(settings, "default").map_err(invalid)?,
            },
            "select" | "radio" | "multiselect" => Self::Choice {
                options: options(settings).map_err(invalid)?,
                default: settings.get("default").filter(|v| !v.is_null()).cloned(),
            },
            "repeater" => {
                let min = opt_u64(settings, "min").map_err(invalid)?;
                let max = opt_u64(settings, "max").map_err(invalid)?;
                if let (Some(min), Some(max)) = (min, max) {
                    if min > max {
                        return Err(invalid(format!("min {min} is greater than max {max}")));
                    }
                }
                Self::Repeater { min, max }
            }
            _ => Self::Other,
        };

        Ok(parsed)
    }
}

fn opt_string(settings: &Map<String, Value>, key: &str) -> std::result::Result<Option<String>, String> {
    match settings.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(format!("'{key}' must be a string, got {other}")),
    }
}

fn opt_f64(settings: &Map<String, Value>, key: &str) -> std::result::Result<Option<f64>, String> {
    match settings.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        // Number inputs hand back strings; an empty one means "unset".
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| format!("'{key}' must be a number, got \"{s}\"")),
        Some(other) => Err(format!("'{key}' must be a number, got {other}")),
    }
}

fn opt_u64(settings: &Map<String, Value>, key: &str) -> std::result::Result<Option<u64>, String> {
    match opt_f64(settings, key)? {
        None => Ok(None),
        Some(n) if n >= 0.0 && n.fract() == 0.0 => Ok(Some(n as u64)),
        Some(n) => Err(format!("'{key}' must be a non-negative integer, got {n}")),
    }
}

fn opt_bool(settings: &Map<String, Value>, key: &str) -> std::result::Result<bool, String> {
    match settings.get(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(format!("'{key}' must be a boolean, got {other}")),
    }
}

fn options(settings: &Map<String, Value>) -> std::result::Result<Vec<ChoiceOption>, String> {
    let items = match settings.get("options") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => return Err(format!("'options' must be a list, got {other}")),
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(ChoiceOption {
                value: s.clone(),
                label: s.clone(),
            }),
            Value::Object(entry) => {
                let value = match entry.get("value") {
                    Some(Value::String(v)) => v.clone(),
                    Some(Value::Number(n)) => n.to_string(),
                    _ => return Err(format!("option {item} has no value")),
                };
                let label = entry
                    .get("label")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| value.clone());
                Ok(ChoiceOption { value, label })
            }
            other => Err(format!("option {other} must be a string or an object")),
        })
        .collect()
}
