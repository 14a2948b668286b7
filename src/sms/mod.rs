//! SMS gateway integration.
//!
//! - [`normalize_phone`]: local-to-E.164-like phone normalization
//! - [`TnzClient`]: outbound HTTP client for the TNZ gateway

mod client;
mod normalize;

pub use client::{SmsClientConfig, SmsSendOutcome, TnzClient, DEFAULT_BASE_URL};
pub use normalize::normalize_phone;
