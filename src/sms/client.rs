//! TNZ SMS gateway client.
//!
//! Sends a single outbound SMS through the TNZ `send/sms` endpoint. There
//! is no retry or delivery-status tracking; a non-2xx response surfaces as
//! an error carrying the gateway's status and body.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::normalize_phone;
use crate::config::SecretString;
use crate::error::SmsError;

/// Default base URL for the TNZ REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.tnz.co.nz/api/v2.04";

/// Outbound SMS payload, in the gateway's wire shape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendSmsPayload {
    message_data: MessageData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct MessageData {
    message: String,
    destinations: Vec<Destination>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Destination {
    recipient: String,
}

/// Result of a successful gateway send.
#[derive(Debug, Clone)]
pub struct SmsSendOutcome {
    /// The normalized recipient the message went to.
    pub to: String,
    /// Gateway response, parsed as JSON when possible, else the raw body
    /// as a JSON string.
    pub response: Value,
}

/// TNZ gateway client configuration.
#[derive(Debug, Clone)]
pub struct SmsClientConfig {
    /// Base URL for the gateway API.
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Country calling code for phone normalization.
    pub country_code: String,
}

impl SmsClientConfig {
    /// Create a new configuration with defaults.
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

    /// Set the country calling code.
    #[must_use]
    pub fn with_country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = country_code.into();
        self
    }
}

impl Default for SmsClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: 30_000,
            country_code: crate::config::DEFAULT_COUNTRY_CODE.to_string(),
        }
    }
}

/// TNZ SMS gateway client.
#[derive(Debug, Clone)]
pub struct TnzClient {
    client: reqwest::Client,
    auth_token: SecretString,
    config: SmsClientConfig,
}

impl TnzClient {
    /// Create a new gateway client.
    ///
    /// # Errors
    ///
    /// Returns [`SmsError::Network`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(auth_token: SecretString, config: SmsClientConfig) -> Result<Self, SmsError> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SmsError::Network {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            auth_token,
            config,
        })
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Authorization header value: the stored token, prefixed with
    /// `Basic ` unless it already carries the scheme.
    fn auth_header(&self) -> String {
        let raw = self.auth_token.expose().trim();
        if raw.to_lowercase().starts_with("basic ") {
            raw.to_string()
        } else {
            format!("Basic {raw}")
        }
    }

    /// Send one SMS.
    ///
    /// The recipient is normalized first (see
    /// [`normalize_phone`]). The send is blocked before any
    /// network call when the normalized number is not `+`-prefixed or the
    /// trimmed message is empty.
    ///
    /// # Errors
    ///
    /// Returns [`SmsError::BadPhoneFormat`], [`SmsError::MissingMessage`],
    /// [`SmsError::GatewayRejected`] on a non-2xx gateway response, or
    /// [`SmsError::Network`].
    pub async fn send_sms(&self, to: &str, message: &str) -> Result<SmsSendOutcome, SmsError> {
        let cleaned_to = normalize_phone(to, &self.config.country_code);
        let cleaned_msg = message.trim();

        if cleaned_msg.is_empty() {
            return Err(SmsError::MissingMessage);
        }
        if !cleaned_to.starts_with('+') {
            return Err(SmsError::BadPhoneFormat {
                phone: to.to_string(),
            });
        }

        let url = format!("{}/send/sms", self.config.base_url);
        let payload = SendSmsPayload {
            message_data: MessageData {
                message: cleaned_msg.to_string(),
                destinations: vec![Destination {
                    recipient: cleaned_to.clone(),
                }],
            },
        };

        tracing::debug!(to = %cleaned_to, chars = cleaned_msg.len(), "Sending SMS");

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&payload)
            .send()
            .await
            .map_err(|e| SmsError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(SmsError::GatewayRejected {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed = serde_json::from_str(&text).unwrap_or(Value::String(text));

        Ok(SmsSendOutcome {
            to: cleaned_to,
            response: parsed,
        })
    }
}
