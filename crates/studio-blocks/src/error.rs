//! Error types for studio-blocks

/// Result type for studio-blocks operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in studio-blocks operations
///
/// Unknown fields, parents, and controls are not errors; the engine reports
/// those as a skipped [`Outcome`](crate::Outcome).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed content: {message}")]
    MalformedContent { message: String },

    #[error("Invalid block '{name}': {message}")]
    InvalidBlock { name: String, message: String },

    #[error("Contract violation on field '{field}': {message}")]
    ContractViolation { field: String, message: String },

    #[error("Invalid settings for field '{field}': {message}")]
    InvalidSettings { field: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedContent {
            message: message.into(),
        }
    }

    pub fn contract(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ContractViolation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn settings(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSettings {
            field: field.into(),
            message: message.into(),
        }
    }
}
