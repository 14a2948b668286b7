//! Draft generation flow.
//!
//! Sequences generate -> validate -> (at most one regeneration) -> compose.
//! The single-retry cap bounds latency and cost: a model that fails twice
//! is assumed to need human intervention, so the flow ships a best-effort
//! result instead of looping.

use serde::Deserialize;

use crate::error::GeneratorError;
use crate::generator::{draft_prompt, DraftGenerator};
use crate::policy::{compose, looks_bad, MessagePolicy};

/// Caller-supplied inputs for one draft request.
///
/// All fields are free-form text. `company_name` and `phone` are required
/// by the HTTP handlers; the rest may be empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    /// Customer first name to address in the message.
    #[serde(default)]
    pub customer_name: String,
    /// Optional staff member name to credit.
    #[serde(default)]
    pub rep_name: String,
    /// Business name the review is for.
    #[serde(default)]
    pub company_name: String,
    /// Optional product or service description.
    #[serde(default)]
    pub items: String,
    /// Destination phone number.
    #[serde(default)]
    pub phone: String,
    /// Optional tone hint for the model.
    #[serde(default)]
    pub flavor: String,
}

/// A composed, policy-compliant outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMessage {
    /// Final SMS body, suffix attached, within the length budget.
    pub msg: String,
    /// Character count of `msg`.
    pub chars: usize,
    /// The raw draft the message was composed from, kept for the audit
    /// record.
    pub prefix_raw: String,
}

/// Run the generation flow for one request.
///
/// Requests one candidate from the generator; if [`looks_bad`] flags it,
/// requests exactly one more with the item description annotated for
/// concision. The second candidate is used unconditionally - it is not
/// re-validated. Whatever candidate was produced last is composed into the
/// final message.
///
/// # Errors
///
/// Returns [`GeneratorError`] if a model call fails outright.
pub async fn generate_message<G>(
    generator: &G,
    policy: &MessagePolicy,
    request: &DraftRequest,
) -> Result<GeneratedMessage, GeneratorError>
where
    G: DraftGenerator + ?Sized,
{
    let prompt = draft_prompt(request, policy.prefix_target(), false);
    let mut raw_prefix = generator.complete(&prompt).await?;

    if looks_bad(&raw_prefix) {
        tracing::info!("first draft failed validation, regenerating once");
        let retry_prompt = draft_prompt(request, policy.prefix_target(), true);
        raw_prefix = generator.complete(&retry_prompt).await?;
    }

    let msg = compose(policy, &raw_prefix);
    let chars = msg.chars().count();

    tracing::debug!(chars, "draft composed");

    Ok(GeneratedMessage {
        msg,
        chars,
        prefix_raw: raw_prefix,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::generator::MockDraftGenerator;
    use pretty_assertions::assert_eq;

    const GOOD_DRAFT: &str =
        "Hi Sam, Alex here from Acme Decks. Mind leaving us a Google review for your new deck?";
    const BAD_DRAFT: &str = "short";

    fn policy() -> MessagePolicy {
        MessagePolicy::new(320, "https://bit.ly/4jcuCf0", "Reply STOP to opt out")
    }

    fn request() -> DraftRequest {
        DraftRequest {
            customer_name: "Sam".to_string(),
            rep_name: "Alex".to_string(),
            company_name: "Acme Decks".to_string(),
            items: "a new cedar deck".to_string(),
            phone: "0212769799".to_string(),
            flavor: String::new(),
        }
    }

    #[tokio::test]
    async fn good_first_draft_generates_once() {
        let mut generator = MockDraftGenerator::new();
        generator
            .expect_complete()
            .times(1)
            .returning(|_| Ok(GOOD_DRAFT.to_string()));

        let result = generate_message(&generator, &policy(), &request())
            .await
            .unwrap();

        assert!(result.msg.starts_with("Hi Sam"));
        assert!(result.msg.ends_with("Reply STOP to opt out"));
        assert_eq!(result.chars, result.msg.chars().count());
        assert_eq!(result.prefix_raw, GOOD_DRAFT);
    }

    #[tokio::test]
    async fn bad_first_draft_regenerates_exactly_once() {
        let mut generator = MockDraftGenerator::new();
        let mut calls = 0;
        generator.expect_complete().times(2).returning(move |prompt| {
            calls += 1;
            if calls == 1 {
                Ok(BAD_DRAFT.to_string())
            } else {
                // Retry prompt carries the concision annotation
                assert!(prompt.contains("(be concise)"));
                Ok(GOOD_DRAFT.to_string())
            }
        });

        let result = generate_message(&generator, &policy(), &request())
            .await
            .unwrap();

        assert_eq!(result.prefix_raw, GOOD_DRAFT);
    }

    #[tokio::test]
    async fn second_draft_ships_even_when_still_bad() {
        let mut generator = MockDraftGenerator::new();
        generator
            .expect_complete()
            .times(2)
            .returning(|_| Ok(BAD_DRAFT.to_string()));

        let result = generate_message(&generator, &policy(), &request())
            .await
            .unwrap();

        // The second draft is not re-validated; it is composed as-is
        assert_eq!(result.prefix_raw, BAD_DRAFT);
        assert_eq!(
            result.msg,
            format!("{BAD_DRAFT} https://bit.ly/4jcuCf0 Reply STOP to opt out")
        );
    }

    #[tokio::test]
    async fn generator_error_propagates() {
        let mut generator = MockDraftGenerator::new();
        generator
            .expect_complete()
            .times(1)
            .returning(|_| Err(GeneratorError::AuthenticationFailed));

        let err = generate_message(&generator, &policy(), &request())
            .await
            .unwrap_err();
        assert!(matches!(err, GeneratorError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn error_on_retry_propagates() {
        let mut generator = MockDraftGenerator::new();
        let mut calls = 0;
        generator.expect_complete().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(BAD_DRAFT.to_string())
            } else {
                Err(GeneratorError::Network {
                    message: "connection reset".to_string(),
                })
            }
        });

        let err = generate_message(&generator, &policy(), &request())
            .await
            .unwrap_err();
        assert!(matches!(err, GeneratorError::Network { .. }));
    }

    #[tokio::test]
    async fn composed_message_respects_budget() {
        let long_draft = format!("Hi Sam, {}", "really great work ".repeat(30));
        let mut generator = MockDraftGenerator::new();
        generator
            .expect_complete()
            .returning(move |_| Ok(long_draft.clone()));

        let result = generate_message(&generator, &policy(), &request())
            .await
            .unwrap();
        assert!(result.chars <= 320);
    }

    #[test]
    fn draft_request_deserializes_camel_case() {
        let req: DraftRequest = serde_json::from_str(
            r#"{"customerName":"Sam","companyName":"Acme","phone":"021","flavor":"warm"}"#,
        )
        .unwrap();
        assert_eq!(req.customer_name, "Sam");
        assert_eq!(req.company_name, "Acme");
        assert_eq!(req.rep_name, "");
        assert_eq!(req.flavor, "warm");
    }
}
