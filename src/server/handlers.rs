//! Request handlers and the HTTP error mapping.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::types::{GenerateDemoRequest, GeneratedReply, SendSmsReply, SendSmsRequest};
use super::AppState;
use crate::draft::generate_message;
use crate::error::{AppError, GeneratorError, SmsError, StorageError};
use crate::storage::SendRecord;

/// Errors surfaced at the HTTP boundary.
///
/// Clients get one of three plain-text bodies. Everything that is not a
/// password or field problem collapses to `Server error`; the detail goes
/// to the log, never to the caller.
#[derive(Debug)]
pub enum ApiError {
    /// Demo password did not match.
    BadPassword,
    /// A required request field was blank.
    MissingFields,
    /// Any downstream failure.
    Internal(AppError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadPassword => (StatusCode::UNAUTHORIZED, "Bad password").into_response(),
            Self::MissingFields => (StatusCode::BAD_REQUEST, "Missing fields").into_response(),
            Self::Internal(err) => {
                tracing::error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
            }
        }
    }
}

impl From<GeneratorError> for ApiError {
    fn from(err: GeneratorError) -> Self {
        Self::Internal(err.into())
    }
}

impl From<SmsError> for ApiError {
    fn from(err: SmsError) -> Self {
        Self::Internal(err.into())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        Self::Internal(err.into())
    }
}

fn check_password(state: &AppState, supplied: &str) -> Result<(), ApiError> {
    if supplied == state.demo_pass.expose() {
        Ok(())
    } else {
        Err(ApiError::BadPassword)
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// `POST /generateDemo`: draft a message without sending it.
pub async fn generate_demo(
    State(state): State<AppState>,
    Json(req): Json<GenerateDemoRequest>,
) -> Result<Json<GeneratedReply>, ApiError> {
    check_password(&state, &req.demo_pass)?;
    if is_blank(&req.draft.company_name) || is_blank(&req.draft.phone) {
        return Err(ApiError::MissingFields);
    }

    let generated = generate_message(state.generator.as_ref(), &state.policy, &req.draft).await?;

    Ok(Json(GeneratedReply {
        msg: generated.msg,
        chars: generated.chars,
    }))
}

/// `POST /sendDemoSms`: send a caller-supplied message as-is.
pub async fn send_demo_sms(
    State(state): State<AppState>,
    Json(req): Json<SendSmsRequest>,
) -> Result<Json<SendSmsReply>, ApiError> {
    check_password(&state, &req.demo_pass)?;
    if is_blank(&req.phone) || is_blank(&req.msg) {
        return Err(ApiError::MissingFields);
    }

    let outcome = state.sms.send_sms(&req.phone, &req.msg).await?;

    Ok(Json(SendSmsReply {
        ok: true,
        to: outcome.to,
        tnz: outcome.response,
    }))
}

/// `POST /sendDemo`: draft, send, and record in one call.
///
/// The audit row is written only after the gateway accepts the send, so a
/// failed send leaves no record.
pub async fn send_demo(
    State(state): State<AppState>,
    Json(req): Json<GenerateDemoRequest>,
) -> Result<Json<GeneratedReply>, ApiError> {
    check_password(&state, &req.demo_pass)?;
    if is_blank(&req.draft.company_name) || is_blank(&req.draft.phone) {
        return Err(ApiError::MissingFields);
    }

    let generated = generate_message(state.generator.as_ref(), &state.policy, &req.draft).await?;

    let outcome = state.sms.send_sms(&req.draft.phone, &generated.msg).await?;

    let record = SendRecord {
        customer_name: req.draft.customer_name.clone(),
        rep_name: req.draft.rep_name.clone(),
        company_name: req.draft.company_name.clone(),
        items: req.draft.items.clone(),
        phone: req.draft.phone.clone(),
        flavor: req.draft.flavor.clone(),
        msg: generated.msg.clone(),
        prefix_raw: generated.prefix_raw.clone(),
    };
    let id = state.storage.record_send(&record).await?;

    tracing::info!(id = %id, to = %outcome.to, chars = generated.chars, "demo send recorded");

    Ok(Json(GeneratedReply {
        msg: generated.msg,
        chars: generated.chars,
    }))
}
