//! Chat-completions API client.
//!
//! Single-attempt HTTP client for an OpenAI-compatible chat-completions
//! endpoint. There is deliberately no retry loop here: the only retry in
//! the whole system is the orchestrator's one regeneration of a rejected
//! draft.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::types::{ChatMessage, ChatRequest, ChatResponse};
use super::DraftGenerator;
use crate::config::SecretString;
use crate::error::GeneratorError;

/// Default base URL for the chat-completions API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Client configuration for the chat-completions API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Model identifier sent with every request.
    pub model: String,
}

impl ClientConfig {
    /// Create a new client configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            model: crate::config::DEFAULT_MODEL.to_string(),
        }
    }
}

/// Chat-completions API client.
#[derive(Debug)]
pub struct OpenAiClient {
    client: Client,
    api_key: SecretString,
    config: ClientConfig,
}

impl OpenAiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Network`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(api_key: SecretString, config: ClientConfig) -> Result<Self, GeneratorError> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeneratorError::Network {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Execute a single completion request.
    async fn execute_once(&self, prompt: &str) -> Result<String, GeneratorError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let request = ChatRequest::new(&self.config.model, vec![ChatMessage::user(prompt)]);
        let start = std::time::Instant::now();

        tracing::debug!(
            url = %url,
            model = %request.model,
            prompt_chars = prompt.len(),
            "Starting draft generation request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeneratorError::Timeout {
                        timeout_ms: self.config.timeout_ms,
                    }
                } else {
                    GeneratorError::Network {
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        tracing::debug!(
            status = %status,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Draft generation response received"
        );

        if status.as_u16() == 401 {
            return Err(GeneratorError::AuthenticationFailed);
        }

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);
            return Err(GeneratorError::RateLimited {
                retry_after_seconds: retry_after,
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeneratorError::UnexpectedResponse {
                message: format!("Status {status}: {body}"),
            });
        }

        let body: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| GeneratorError::UnexpectedResponse {
                    message: format!("Failed to parse response: {e}"),
                })?;

        let text = body
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .unwrap_or_default();

        Ok(text)
    }
}

#[async_trait]
impl DraftGenerator for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, GeneratorError> {
        self.execute_once(prompt).await
    }
}
