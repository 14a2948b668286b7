//! Review SMS demo service binary entry point.
//!
//! Loads configuration from the environment, opens the audit-log database,
//! builds the model and gateway clients, and serves the demo endpoints
//! until interrupted.

use std::sync::Arc;

use review_sms::config::Config;
use review_sms::generator::{ClientConfig, OpenAiClient};
use review_sms::server::{router, AppState};
use review_sms::sms::{SmsClientConfig, TnzClient};
use review_sms::storage::SqliteStorage;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "info".to_string())
                .parse()
                .unwrap_or_else(|_| tracing_subscriber::filter::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("review-sms starting...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Configuration loaded: database={}, bind={}, timeout={}ms",
        config.database_path,
        config.bind_addr,
        config.request_timeout_ms
    );

    let storage = match SqliteStorage::new(&config.database_path).await {
        Ok(storage) => storage,
        Err(e) => {
            tracing::error!("Storage error: {e}");
            std::process::exit(1);
        }
    };

    let generator = OpenAiClient::new(
        config.openai_api_key.clone(),
        ClientConfig::new()
            .with_timeout_ms(config.request_timeout_ms)
            .with_model(&config.model),
    );
    let generator = match generator {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("Generator client error: {e}");
            std::process::exit(1);
        }
    };

    let sms = TnzClient::new(
        config.tnz_auth_token.clone(),
        SmsClientConfig::new()
            .with_timeout_ms(config.request_timeout_ms)
            .with_country_code(&config.country_code),
    );
    let sms = match sms {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("SMS client error: {e}");
            std::process::exit(1);
        }
    };

    let state = AppState {
        generator,
        sms,
        storage,
        policy: config.message_policy(),
        demo_pass: config.demo_pass.clone(),
    };

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {e}", config.bind_addr);
            std::process::exit(1);
        }
    };

    tracing::info!("listening on {}", config.bind_addr);

    if let Err(e) = axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    tracing::info!("review-sms shutdown complete");
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("failed to install interrupt handler");
    }
}
