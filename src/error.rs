//! Error types
//!
//! Every rejected operation leaves state untouched. Apart from `EmptyName`, the
//! matching notification has already been sent by the time the error is returned.

use thiserror::Error;

/// Why a form operation was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferenceError {
    /// Blank name on add (silent)
    #[error("Name cannot be empty")]
    EmptyName,

    /// Name collides with an existing item under the list's duplicate key
    #[error("\"{name}\" is already in your {scope}")]
    Duplicate { name: String, scope: String },

    /// Save attempted with nothing recorded
    #[error("Please add at least one preference or instruction before saving.")]
    NothingToSave,

    /// A category or severity string that is not one of the configured choices
    #[error("\"{value}\" is not a valid {field}")]
    UnknownOption { field: &'static str, value: String },

    /// Save or cancel issued with no item in edit mode
    #[error("No item is being edited")]
    NotEditing,

    #[error("Failed to save meal preferences: {0}")]
    Persist(String),
}

/// Result type for form operations
pub type PreferenceResult<T> = Result<T, PreferenceError>;

/// Persistence collaborator failure
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Persistence unavailable: {0}")]
    Unavailable(String),
}

/// Configuration loading failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
