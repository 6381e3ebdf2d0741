//! Path management for showroom configuration files.
//!
//! ```text
//! ~/.config/aura/
//! └── secret.json     # API keys
//! ```

use std::path::PathBuf;

use aura_core::{AuraError, Result};

const APP_DIR: &str = "aura";

/// Resolves platform configuration locations.
pub struct AuraPaths;

impl AuraPaths {
    /// Returns the aura configuration directory (e.g. `~/.config/aura/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| AuraError::config("Cannot find configuration directory"))
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Keep this file user-readable only (600 on Unix).
    pub fn secret_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("secret.json"))
    }
}
