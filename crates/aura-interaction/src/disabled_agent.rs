//! Stand-in agent installed when no credential is configured.

use async_trait::async_trait;

use crate::{Agent, AgentError, GenerationRequest};

/// Agent that fails every call with a fixed configuration error.
///
/// Lets the showroom run without an API key: insights take the failure
/// fallback path instead of crashing.
#[derive(Debug, Clone)]
pub struct DisabledAgent {
    reason: String,
}

impl DisabledAgent {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Agent for DisabledAgent {
    fn expertise(&self) -> &str {
        "Disabled insight agent"
    }

    async fn execute(&self, _request: GenerationRequest) -> Result<String, AgentError> {
        Err(AgentError::Configuration(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_fails_with_reason() {
        let agent = DisabledAgent::new("GEMINI_API_KEY is not set");
        let result = agent
            .execute(GenerationRequest {
                prompt: "hello".to_string(),
                temperature: 0.7,
                top_p: 0.95,
            })
            .await;

        match result {
            Err(AgentError::Configuration(reason)) => {
                assert_eq!(reason, "GEMINI_API_KEY is not set")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
