//! HTTP client for OpenAI-compatible chat services (vLLM, OpenAI, etc.)

use crate::config::PredictorConfig;
use crate::error::{FactRootError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Sampling temperature for estimates; the same question should get the same answer
const TEMPERATURE: f32 = 0.1;
const MAX_TOKENS: u32 = 512;

/// Trait for chat model clients
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Send the conversation and return the first reply
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String>;

    fn model_name(&self) -> &str;
}

/// Chat message for completion requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: ChatMessage,
}

/// Client for `/v1/chat/completions` endpoints
pub struct VLLMClient {
    http_client: reqwest::Client,
    endpoint: String,
    config: PredictorConfig,
}

impl VLLMClient {
    pub fn new(config: PredictorConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let endpoint = format!("{}/v1/chat/completions", config.url.trim_end_matches('/'));

        Ok(Self {
            http_client,
            endpoint,
            config,
        })
    }

    /// Create from `FACTROOT_PREDICTOR_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(PredictorConfig::default())
    }
}

#[async_trait]
impl LLMClient for VLLMClient {
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let start = Instant::now();
        let request = CompletionRequest {
            model: &self.config.model,
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let mut req = self.http_client.post(&self.endpoint).json(&request);
        if let Some(ref api_key) = self.config.api_key {
            req = req.bearer_auth(api_key);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FactRootError::ExternalError(format!(
                "Prediction service {} returned HTTP {}: {}",
                self.endpoint, status, body
            )));
        }

        let completion: CompletionResponse = response.json().await?;
        let reply = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                FactRootError::ExternalError(format!(
                    "Prediction service {} returned no choices",
                    self.endpoint
                ))
            })?;

        tracing::debug!(
            "{} replied in {} ms",
            self.config.model,
            start.elapsed().as_millis()
        );
        Ok(reply)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
