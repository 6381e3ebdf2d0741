//! Configuration models.

use serde::{Deserialize, Serialize};

/// Root of `secret.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// Fixed parameters of insight generation.
///
/// Sampling values are held constant for every call of a session. The model
/// name belongs to the agent, not to the request.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub timeout_secs: u64,
}

impl InsightConfig {
    pub const DEFAULT_MODEL: &'static str = "gemini-3-flash-preview";
    pub const TEMPERATURE: f32 = 0.7;
    pub const TOP_P: f32 = 0.95;
    pub const TIMEOUT_SECS: u64 = 30;
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            temperature: Self::TEMPERATURE,
            top_p: Self::TOP_P,
            timeout_secs: Self::TIMEOUT_SECS,
        }
    }
}
