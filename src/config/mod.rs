//! Configuration management.
//!
//! This module handles:
//! - Environment variable loading
//! - Configuration validation
//! - Default value handling
//! - Secure credential storage via [`SecretString`]
//!
//! Length budgets and the suffix text live here rather than as process-wide
//! globals so the composer and validator can be exercised with different
//! budgets in tests.

mod secret;
mod validation;

pub use secret::SecretString;
pub use validation::{validate_config, MAX_SMS_MAX, MAX_TIMEOUT_MS, MIN_SMS_MAX, MIN_TIMEOUT_MS};

use crate::error::ConfigError;
use crate::policy::MessagePolicy;

/// Default bind address for the HTTP server.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Default audit-log database path.
pub const DEFAULT_DATABASE_PATH: &str = "./data/demo_sends.db";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default request timeout in milliseconds for outbound API calls.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Default language model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default review link placed in the message suffix.
pub const DEFAULT_REVIEW_LINK: &str = "https://bit.ly/4jcuCf0";

/// Default opt-out instruction placed in the message suffix.
pub const DEFAULT_OPT_OUT_TEXT: &str = "Reply STOP to opt out";

/// Default hard cap on total SMS length, in characters.
pub const DEFAULT_SMS_MAX: usize = 320;

/// Default country calling code for phone normalization (New Zealand).
pub const DEFAULT_COUNTRY_CODE: &str = "64";

/// Application configuration.
///
/// Use [`Config::from_env`] to load configuration from environment
/// variables. Credential fields use [`SecretString`] to prevent accidental
/// logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Shared demo password (protected from logging).
    pub demo_pass: SecretString,
    /// Language-model API key (protected from logging).
    pub openai_api_key: SecretString,
    /// SMS gateway auth token (protected from logging).
    pub tnz_auth_token: SecretString,
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Audit-log database path.
    pub database_path: String,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: String,
    /// Timeout for outbound API calls in milliseconds.
    pub request_timeout_ms: u64,
    /// Language model to use for drafts.
    pub model: String,
    /// Review link placed in the message suffix.
    pub review_link: String,
    /// Opt-out instruction placed in the message suffix.
    pub opt_out_text: String,
    /// Hard cap on total SMS length, in characters.
    pub sms_max: usize,
    /// Country calling code used when normalizing local phone numbers.
    pub country_code: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `DEMO_PASS`: shared demo password
    /// - `OPENAI_API_KEY`: language-model API key
    /// - `TNZ_AUTH_TOKEN`: SMS gateway auth token
    ///
    /// Optional environment variables (with defaults):
    /// - `BIND_ADDR` (default: `127.0.0.1:8080`)
    /// - `DATABASE_PATH` (default: `./data/demo_sends.db`)
    /// - `LOG_LEVEL` (default: `info`)
    /// - `REQUEST_TIMEOUT_MS` (default: `30000`)
    /// - `OPENAI_MODEL` (default: `gpt-4o-mini`)
    /// - `REVIEW_LINK` (default: `https://bit.ly/4jcuCf0`)
    /// - `OPT_OUT_TEXT` (default: `Reply STOP to opt out`)
    /// - `SMS_MAX` (default: `320`)
    /// - `SMS_COUNTRY_CODE` (default: `64`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing, a numeric
    /// variable does not parse, or any value fails validation (see
    /// [`validate_config`]).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let demo_pass = require_env("DEMO_PASS")?;
        let openai_api_key = require_env("OPENAI_API_KEY")?;
        let tnz_auth_token = require_env("TNZ_AUTH_TOKEN")?;

        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());
        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DATABASE_PATH.into());
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into());
        let request_timeout_ms = parse_env_u64("REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS)?;
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        let review_link =
            std::env::var("REVIEW_LINK").unwrap_or_else(|_| DEFAULT_REVIEW_LINK.into());
        let opt_out_text =
            std::env::var("OPT_OUT_TEXT").unwrap_or_else(|_| DEFAULT_OPT_OUT_TEXT.into());
        let sms_max = parse_env_usize("SMS_MAX", DEFAULT_SMS_MAX)?;
        let country_code =
            std::env::var("SMS_COUNTRY_CODE").unwrap_or_else(|_| DEFAULT_COUNTRY_CODE.into());

        let config = Self {
            demo_pass: SecretString::new(demo_pass),
            openai_api_key: SecretString::new(openai_api_key),
            tnz_auth_token: SecretString::new(tnz_auth_token),
            bind_addr,
            database_path,
            log_level,
            request_timeout_ms,
            model,
            review_link,
            opt_out_text,
            sms_max,
            country_code,
        };

        validate_config(&config)?;
        Ok(config)
    }

    /// Build the message policy derived from this configuration.
    #[must_use]
    pub fn message_policy(&self) -> MessagePolicy {
        MessagePolicy::new(self.sms_max, &self.review_link, &self.opt_out_text)
    }
}

/// Read a required environment variable.
fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingRequired { var: name.into() })
}

/// Parse an environment variable as u64, using a default if not set.
fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        val.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a positive integer".into(),
        })
    })
}

/// Parse an environment variable as usize, using a default if not set.
fn parse_env_usize(name: &str, default: usize) -> Result<usize, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        val.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a positive integer".into(),
        })
    })
}
