//! GeminiApiAgent - Direct REST API implementation for Gemini.
//!
//! Sends a single-turn `generateContent` request with fixed sampling
//! parameters and returns the concatenated text of the first candidate.

use async_trait::async_trait;
use aura_core::config::InsightConfig;
use aura_core::secret::SecretService;
use aura_infrastructure::SecretServiceImpl;
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{Agent, AgentError, GenerationRequest};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Agent implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_timeout(api_key, model, Duration::from_secs(InsightConfig::TIMEOUT_SECS))
    }

    /// Creates an agent whose requests give up after `timeout`.
    pub fn with_timeout(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!("[GeminiApiAgent] Falling back to default HTTP client: {}", err);
                Client::new()
            });

        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Resolves the credential through [`SecretServiceImpl`].
    ///
    /// The model comes from `secret.json`/`AURA_GEMINI_MODEL` when present,
    /// otherwise [`InsightConfig::DEFAULT_MODEL`].
    pub async fn try_from_env() -> Result<Self, AgentError> {
        let service = SecretServiceImpl::new(None);
        Self::try_from_service(&service).await
    }

    /// Builds the agent from any secret source.
    pub async fn try_from_service(service: &dyn SecretService) -> Result<Self, AgentError> {
        let secret_config = service
            .load_secrets()
            .await
            .map_err(|e| AgentError::Configuration(format!("Failed to load secrets: {}", e)))?;

        let gemini_config = secret_config.gemini.ok_or_else(|| {
            AgentError::Configuration("Gemini API key is not configured".to_string())
        })?;

        if gemini_config.api_key.trim().is_empty() {
            return Err(AgentError::Configuration(
                "Gemini API key is empty".to_string(),
            ));
        }

        let model = gemini_config
            .model_name
            .unwrap_or_else(|| InsightConfig::DEFAULT_MODEL.to_string());

        Ok(Self::new(gemini_config.api_key, model))
    }

    /// Points the agent at a different endpoint root (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String, AgentError> {
        let url = format!(
            "{}/{model}:generateContent",
            self.base_url.trim_end_matches('/'),
            model = self.model,
        );

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| AgentError::ProcessError {
                status_code: None,
                message: format!("Gemini API request failed: {err}"),
                is_retryable: err.is_connect() || err.is_timeout(),
                retry_after: None,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| AgentError::Other(format!("Failed to parse Gemini response: {err}")))?;

        Ok(extract_text_response(parsed))
    }
}

#[async_trait]
impl Agent for GeminiApiAgent {
    fn expertise(&self) -> &str {
        "Gemini API agent for product copywriting"
    }

    async fn execute(&self, request: GenerationRequest) -> Result<String, AgentError> {
        if request.prompt.trim().is_empty() {
            return Err(AgentError::ExecutionFailed(
                "Gemini payload must include text".into(),
            ));
        }

        let body = GenerateContentRequest::from(request);
        self.send_request(&body).await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl From<GenerationRequest> for GenerateContentRequest {
    fn from(request: GenerationRequest) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                top_p: request.top_p,
            },
        }
    }
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<i32>,
    message: Option<String>,
    status: Option<String>,
}

/// Joins the text parts of the first candidate. No text yields an empty string.
fn extract_text_response(response: GenerateContentResponse) -> String {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default()
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> AgentError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    AgentError::ProcessError {
        status_code: Some(status.as_u16()),
        message,
        is_retryable,
        retry_after,
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    // HTTP-date form is not handled
    value.parse::<u64>().ok().map(Duration::from_secs)
}
