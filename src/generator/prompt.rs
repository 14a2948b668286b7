//! Draft prompt construction.
//!
//! Builds the single free-text prompt sent to the language model. The hard
//! rules mirror what the sanitizer and validator enforce downstream, so a
//! compliant completion passes the gate on the first attempt.

use crate::draft::DraftRequest;

/// Build the review-request prompt for a draft request.
///
/// `prefix_target` is quoted to the model as a literal character budget.
/// When `concise` is set (the single regeneration attempt), the item
/// description is annotated to push the model toward a shorter draft.
#[must_use]
pub fn draft_prompt(request: &DraftRequest, prefix_target: usize, concise: bool) -> String {
    let items = if request.items.is_empty() {
        "your recent service".to_string()
    } else {
        request.items.clone()
    };
    let items = if concise {
        format!("{items} (be concise)")
    } else {
        items
    };

    let tone_line = if request.flavor.is_empty() {
        String::new()
    } else {
        format!("Tone: {}", request.flavor)
    };

    format!(
        r#"Write a short SMS review request that sounds human, not corporate.

HARD RULES (no exceptions)
- Must ask for a Google review using the words "Google review"
- Must include the customer's first name: {customer}
- Must include the business name: {company}
- Must reference the product or service: {items}
- If a staff name exists, it MUST be included: {rep}
- 1 or 2 sentences max
- No emojis, no links, no opt-out language
- No corporate fluff ("thank you for choosing", "we appreciate", "valued customer")
- Plain ASCII only
- Max {prefix_target} characters

Style
Friendly, confident, specific.
Sound like a real person who actually did the work.
{tone_line}
Return ONLY the message text. No quotes."#,
        customer = request.customer_name,
        company = request.company_name,
        items = items,
        rep = request.rep_name,
        prefix_target = prefix_target,
        tone_line = tone_line,
    )
    .trim()
    .to_string()
}
