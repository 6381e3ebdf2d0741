//! Error types for the Aura showroom.

use thiserror::Error;

/// A shared error type for the showroom crates.
///
/// None of these are allowed to reach the top of the event loop; every caller
/// has a local recovery (fallback text, procedural shape, ignored command).
#[derive(Error, Debug, Clone)]
pub enum AuraError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// External model could not be fetched or decoded
    #[error("Model load failed for '{url}': {message}")]
    ModelLoad { url: String, message: String },
}

impl AuraError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a ModelLoad error
    pub fn model_load(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ModelLoad {
            url: url.into(),
            message: message.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a model load error
    pub fn is_model_load(&self) -> bool {
        matches!(self, Self::ModelLoad { .. })
    }
}

/// A type alias for `Result<T, AuraError>`.
pub type Result<T> = std::result::Result<T, AuraError>;
