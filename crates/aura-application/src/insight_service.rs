//! Insight Service
//!
//! Produces the short sales pitch shown in the product detail panel. The call
//! never fails from the caller's point of view: an empty answer and every kind
//! of error each map to a fixed sentence.

use anyhow::{Result, anyhow};
use aura_core::Product;
use aura_core::config::InsightConfig;
use aura_interaction::{Agent, GenerationRequest};
use minijinja::{Environment, context};
use std::sync::Arc;
use std::time::Duration;

/// Shown when the service answers with no text.
pub const FALLBACK_EMPTY: &str = "Elevate your space with this exquisite piece from Aura Home.";

/// Shown when the call fails for any reason.
pub const FALLBACK_FAILURE: &str =
    "This piece is crafted for those who appreciate fine details and timeless design.";

const PROMPT_TEMPLATE: &str = r#"Provide a luxurious, 2-sentence sales pitch for a home decor item named "{{ name }}" in the "{{ category }}" category. The description is: {{ description }}."#;

/// Wraps a text agent with the showroom's prompt and fallback policy.
pub struct InsightService {
    agent: Arc<dyn Agent>,
    config: InsightConfig,
    templates: Environment<'static>,
}

impl InsightService {
    pub fn new(agent: Arc<dyn Agent>, config: InsightConfig) -> Self {
        Self {
            agent,
            config,
            templates: Environment::new(),
        }
    }

    /// Renders the prompt for `product`.
    pub fn build_prompt(&self, product: &Product) -> Result<String> {
        self.templates
            .render_str(
                PROMPT_TEMPLATE,
                context! {
                    name => product.name,
                    category => product.category,
                    description => product.description,
                },
            )
            .map_err(|e| anyhow!("Failed to render insight prompt: {e}"))
    }

    /// Returns the insight text for `product`, or one of the fallback sentences.
    pub async fn get_insight(&self, product: &Product) -> String {
        match self.generate(product).await {
            Ok(text) if text.is_empty() => {
                tracing::info!(
                    "[InsightService] Empty answer for '{}', using default copy",
                    product.id
                );
                FALLBACK_EMPTY.to_string()
            }
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("[InsightService] Insight for '{}' failed: {:#}", product.id, err);
                FALLBACK_FAILURE.to_string()
            }
        }
    }

    async fn generate(&self, product: &Product) -> Result<String> {
        let request = GenerationRequest {
            prompt: self.build_prompt(product)?,
            temperature: self.config.temperature,
            top_p: self.config.top_p,
        };

        tracing::info!(
            "[InsightService] Requesting insight for '{}' via {}",
            product.id,
            self.agent.expertise()
        );

        let timeout = Duration::from_secs(self.config.timeout_secs);
        let result = tokio::time::timeout(timeout, self.agent.execute(request))
            .await
            .map_err(|_| anyhow!("insight request timed out after {}s", timeout.as_secs()))??;

        let trimmed = result.trim().to_string();
        tracing::debug!(
            "[InsightService] Received {} characters for '{}'",
            trimmed.len(),
            product.id
        );
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use aura_core::{ProductType, Vec3};
    use aura_interaction::{AgentError, DisabledAgent};
    use std::sync::Mutex;

    struct ScriptedAgent {
        reply: std::result::Result<String, AgentError>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl ScriptedAgent {
        fn replying(reply: std::result::Result<String, AgentError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Agent for ScriptedAgent {
        fn expertise(&self) -> &str {
            "scripted"
        }

        async fn execute(&self, request: GenerationRequest) -> std::result::Result<String, AgentError> {
            self.seen.lock().unwrap().push(request);
            self.reply.clone()
        }
    }

    fn sofa() -> Product {
        Product {
            id: "h1".to_string(),
            name: "Verdant Bay Sofa".to_string(),
            category: "Seating".to_string(),
            price: 3200,
            description: "A custom low-profile sofa.".to_string(),
            position: Vec3::ZERO,
            scale: None,
            rotation: None,
            color: "#6B8E23".to_string(),
            product_type: ProductType::Sofa,
            model_url: None,
        }
    }

    #[test]
    fn test_prompt_mentions_name_category_and_description() {
        let service = InsightService::new(
            Arc::new(DisabledAgent::new("test")),
            InsightConfig::default(),
        );
        let prompt = service.build_prompt(&sofa()).unwrap();
        assert_eq!(
            prompt,
            "Provide a luxurious, 2-sentence sales pitch for a home decor item named \
             \"Verdant Bay Sofa\" in the \"Seating\" category. The description is: \
             A custom low-profile sofa.."
        );
    }

    #[tokio::test]
    async fn test_success_is_trimmed_and_uses_fixed_sampling() {
        let agent = ScriptedAgent::replying(Ok("  Pure velvet calm.\n".to_string()));
        let service = InsightService::new(agent.clone(), InsightConfig::default());

        assert_eq!(service.get_insight(&sofa()).await, "Pure velvet calm.");
        assert_eq!(service.get_insight(&sofa()).await, "Pure velvet calm.");

        let seen = agent.seen.lock().unwrap();
        assert_eq!(seen.len(), 2, "calls are not cached");
        assert!(seen.iter().all(|r| r.temperature == 0.7 && r.top_p == 0.95));
    }

    #[tokio::test]
    async fn test_empty_answer_uses_default_copy() {
        let agent = ScriptedAgent::replying(Ok("   ".to_string()));
        let service = InsightService::new(agent, InsightConfig::default());
        assert_eq!(service.get_insight(&sofa()).await, FALLBACK_EMPTY);
    }

    #[tokio::test]
    async fn test_failure_uses_failure_copy() {
        let agent = ScriptedAgent::replying(Err(AgentError::ProcessError {
            status_code: Some(403),
            message: "PERMISSION_DENIED".to_string(),
            is_retryable: false,
            retry_after: None,
        }));
        let service = InsightService::new(agent, InsightConfig::default());
        assert_eq!(service.get_insight(&sofa()).await, FALLBACK_FAILURE);
    }

    #[tokio::test]
    async fn test_missing_credential_uses_failure_copy() {
        let service = InsightService::new(
            Arc::new(DisabledAgent::new("no key")),
            InsightConfig::default(),
        );
        assert_eq!(service.get_insight(&sofa()).await, FALLBACK_FAILURE);
    }

    struct StalledAgent;

    #[async_trait]
    impl Agent for StalledAgent {
        fn expertise(&self) -> &str {
            "stalled"
        }

        async fn execute(&self, _request: GenerationRequest) -> std::result::Result<String, AgentError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_uses_failure_copy() {
        let service = InsightService::new(Arc::new(StalledAgent), InsightConfig::default());
        assert_eq!(service.get_insight(&sofa()).await, FALLBACK_FAILURE);
    }
}
