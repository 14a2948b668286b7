//! HTTP server for the demo endpoints.
//!
//! Three POST routes, all gated by a shared demo password:
//! - `/generateDemo` drafts a message without sending
//! - `/sendDemoSms` sends a caller-supplied message as-is
//! - `/sendDemo` drafts, sends, and records an audit row
//!
//! Any other method on these paths gets `405 Method Not Allowed`.

mod handlers;
mod types;

pub use handlers::ApiError;
pub use types::{GenerateDemoRequest, GeneratedReply, SendSmsReply, SendSmsRequest};

use std::sync::Arc;

use axum::routing::post;
use axum::Router;

use crate::config::SecretString;
use crate::generator::DraftGenerator;
use crate::policy::MessagePolicy;
use crate::sms::TnzClient;
use crate::storage::SqliteStorage;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Draft generator (the model client, or a mock in tests).
    pub generator: Arc<dyn DraftGenerator>,
    /// Outbound SMS gateway client.
    pub sms: TnzClient,
    /// Audit-log storage.
    pub storage: SqliteStorage,
    /// Length budgets and suffix text for composition.
    pub policy: MessagePolicy,
    /// Shared demo password.
    pub demo_pass: SecretString,
}

/// Build the application router.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/generateDemo", post(handlers::generate_demo))
        .route("/sendDemoSms", post(handlers::send_demo_sms))
        .route("/sendDemo", post(handlers::send_demo))
        .with_state(state)
}
