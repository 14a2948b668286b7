//! HTTP request and response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::draft::DraftRequest;

/// Body for `POST /generateDemo` and `POST /sendDemo`.
///
/// Every field defaults to empty so a sparse JSON object is accepted; the
/// handlers enforce which fields must be non-blank.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDemoRequest {
    /// Shared demo password.
    #[serde(default)]
    pub demo_pass: String,
    /// Draft inputs.
    #[serde(flatten)]
    pub draft: DraftRequest,
}

/// Body for `POST /sendDemoSms`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendSmsRequest {
    /// Shared demo password.
    #[serde(default)]
    pub demo_pass: String,
    /// Destination phone number.
    #[serde(default)]
    pub phone: String,
    /// Message body to send.
    #[serde(default)]
    pub msg: String,
}

/// Response for the generation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedReply {
    /// The composed message.
    pub msg: String,
    /// Character count of `msg`.
    pub chars: usize,
}

/// Response for `POST /sendDemoSms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendSmsReply {
    /// Always true on success.
    pub ok: bool,
    /// Normalized recipient the message went to.
    pub to: String,
    /// Raw gateway response.
    pub tnz: Value,
}
