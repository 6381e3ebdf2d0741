//! Secret management service trait.
//!
//! Defines the interface for loading the insight service credential.

use crate::config::SecretConfig;

/// Service for managing secret configuration.
///
/// # Security Note
///
/// Implementations must never log secret values or put them into error
/// messages.
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the secret configuration.
    ///
    /// # Returns
    ///
    /// - `Ok(SecretConfig)`: Successfully loaded (possibly without a Gemini entry)
    /// - `Err(String)`: Failed to load (error message must not contain secrets)
    async fn load_secrets(&self) -> Result<SecretConfig, String>;
}
