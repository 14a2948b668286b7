//! Language-model draft generation.
//!
//! This module provides:
//! - [`DraftGenerator`]: trait abstraction over the model API for
//!   dependency injection and mocking
//! - [`OpenAiClient`]: HTTP client for an OpenAI-compatible
//!   chat-completions endpoint
//! - [`draft_prompt`]: prompt construction for review-request drafts

mod client;
mod prompt;
mod types;

pub use client::{ClientConfig, OpenAiClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
pub use prompt::draft_prompt;
pub use types::{ChatMessage, ChatRequest, ChatResponse};

use async_trait::async_trait;

use crate::error::GeneratorError;

/// Draft generator abstraction.
///
/// Produces one raw candidate draft from a free-text prompt. The candidate
/// is treated as unreliable and is always sanitized and validated before
/// use.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DraftGenerator: Send + Sync {
    /// Request a single completion for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError`] if the API call fails.
    async fn complete(&self, prompt: &str) -> Result<String, GeneratorError>;
}
