//! Text-generation agents used for product insights.
//!
//! The application layer only sees the [`Agent`] trait; the Gemini REST client
//! and the disabled stand-in are interchangeable behind it.

pub mod disabled_agent;
pub mod gemini_api_agent;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub use disabled_agent::DisabledAgent;
pub use gemini_api_agent::GeminiApiAgent;

/// One generation call: prompt plus sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub temperature: f32,
    pub top_p: f32,
}

/// Failures an agent can report.
#[derive(Error, Debug, Clone)]
pub enum AgentError {
    #[error("Agent execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Process error (status {status_code:?}): {message}")]
    ProcessError {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
        retry_after: Option<Duration>,
    },

    #[error("Agent configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    Other(String),
}

impl AgentError {
    /// Whether the upstream considered the failure transient.
    ///
    /// Informational only; callers fall back instead of retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AgentError::ProcessError {
                is_retryable: true,
                ..
            }
        )
    }
}

/// A text generator.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Short description used in logs.
    fn expertise(&self) -> &str;

    async fn execute(&self, request: GenerationRequest) -> Result<String, AgentError>;
}
