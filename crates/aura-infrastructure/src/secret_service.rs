//! Secret service implementation.
//!
//! Resolves the Gemini credential from the process environment first and falls
//! back to `secret.json` in the aura configuration directory.

use aura_core::config::{GeminiConfig, SecretConfig};
use aura_core::secret::SecretService;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::paths::AuraPaths;

/// Environment variables checked for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];
/// Environment variable overriding the generation model.
pub const MODEL_VAR: &str = "AURA_GEMINI_MODEL";

type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Service for loading secret configuration.
///
/// The resolved config is cached after the first successful load.
///
/// # Example
///
/// ```ignore
/// use aura_infrastructure::SecretServiceImpl;
/// use aura_core::secret::SecretService;
///
/// let service = SecretServiceImpl::new(None);
/// let secrets = service.load_secrets().await?;
/// ```
#[derive(Clone)]
pub struct SecretServiceImpl {
    secret_file: Option<PathBuf>,
    env: EnvLookup,
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    /// Creates a service reading the process environment.
    ///
    /// `secret_file` overrides the default `~/.config/aura/secret.json`.
    pub fn new(secret_file: Option<&Path>) -> Self {
        let secret_file = secret_file
            .map(Path::to_path_buf)
            .or_else(|| AuraPaths::secret_file().ok());

        Self {
            secret_file,
            env: Arc::new(|key| std::env::var(key).ok()),
            secrets: Arc::new(RwLock::new(None)),
        }
    }

    /// Replaces the environment lookup (used by tests and embedders).
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Arc::new(lookup);
        self
    }

    fn env_value(&self, key: &str) -> Option<String> {
        (self.env)(key).filter(|value| !value.trim().is_empty())
    }

    fn load_from_file(&self) -> Result<SecretConfig, String> {
        let Some(path) = self.secret_file.as_ref() else {
            return Ok(SecretConfig::default());
        };

        if !path.exists() {
            tracing::debug!("[SecretService] No secret file at {}", path.display());
            return Ok(SecretConfig::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

        // serde_json errors carry positions only, never the offending text
        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
    }

    fn resolve(&self) -> Result<SecretConfig, String> {
        let mut config = match API_KEY_VARS.iter().find_map(|var| self.env_value(var)) {
            Some(api_key) => {
                tracing::debug!("[SecretService] Using API key from environment");
                SecretConfig {
                    gemini: Some(GeminiConfig {
                        api_key,
                        model_name: None,
                    }),
                }
            }
            None => self.load_from_file()?,
        };

        if let (Some(gemini), Some(model)) = (config.gemini.as_mut(), self.env_value(MODEL_VAR)) {
            gemini.model_name = Some(model);
        }

        Ok(config)
    }

    fn load_secrets_internal(&self) -> Result<SecretConfig, String> {
        {
            let read_lock = self
                .secrets
                .read()
                .map_err(|_| "Secret cache lock poisoned".to_string())?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.resolve()?;

        let mut write_lock = self
            .secrets
            .write()
            .map_err(|_| "Secret cache lock poisoned".to_string())?;
        *write_lock = Some(loaded.clone());

        Ok(loaded)
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig, String> {
        self.load_secrets_internal()
    }
}
