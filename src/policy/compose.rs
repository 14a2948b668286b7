//! Final message composition.
//!
//! Combines a sanitized draft with the fixed review-link + opt-out suffix
//! under a hard total-length budget.

use super::{sanitize, truncate_to_word_boundary};

/// Hard cap on the draft portion regardless of how much room the suffix
/// leaves. Keeps drafts readable even under a generous SMS budget.
pub const PREFIX_TARGET_CAP: usize = 270;

/// Length budgets and the mandatory suffix for outgoing messages.
///
/// The suffix (review link + opt-out instruction) is caller-uncontrolled
/// and never subject to sanitization; it starts with a space so it can be
/// appended directly to a draft.
#[derive(Debug, Clone)]
pub struct MessagePolicy {
    /// Hard cap on the total message length, in characters.
    pub sms_max: usize,
    /// Fixed suffix appended to every outgoing message.
    pub suffix: String,
}

impl MessagePolicy {
    /// Create a policy from a total budget and the suffix components.
    #[must_use]
    pub fn new(sms_max: usize, review_link: &str, opt_out_text: &str) -> Self {
        Self {
            sms_max,
            suffix: format!(" {review_link} {opt_out_text}"),
        }
    }

    /// Most characters the draft may occupy once the suffix is reserved.
    #[must_use]
    pub fn prefix_max(&self) -> usize {
        self.sms_max.saturating_sub(self.suffix.chars().count()).max(1)
    }

    /// Target draft length: the suffix-reserved allowance, capped at
    /// [`PREFIX_TARGET_CAP`].
    #[must_use]
    pub fn prefix_target(&self) -> usize {
        self.prefix_max().min(PREFIX_TARGET_CAP)
    }
}

/// Build the final outgoing message from a raw model draft.
///
/// Sanitizes, clamps to the prefix target, then appends the suffix. If the
/// combined message still exceeds `sms_max` a single corrective re-clamp to
/// `prefix_max` runs; with the default constants that pass never fires, but
/// the check is a safety net, not dead code.
///
/// Guarantee: the result is never longer than `policy.sms_max` characters.
#[must_use]
pub fn compose(policy: &MessagePolicy, raw_prefix: &str) -> String {
    let clean = sanitize(raw_prefix);
    let safe_prefix = truncate_to_word_boundary(&clean, policy.prefix_target());
    let mut final_msg = format!("{safe_prefix}{}", policy.suffix).trim().to_string();

    if final_msg.chars().count() > policy.sms_max {
        let trimmed = truncate_to_word_boundary(&safe_prefix, policy.prefix_max());
        final_msg = format!("{trimmed}{}", policy.suffix).trim().to_string();
    }

    final_msg
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn default_policy() -> MessagePolicy {
        MessagePolicy::new(320, "https://bit.ly/4jcuCf0", "Reply STOP to opt out")
    }

    #[test]
    fn suffix_starts_with_space() {
        let policy = default_policy();
        assert!(policy.suffix.starts_with(' '));
        assert_eq!(policy.suffix, " https://bit.ly/4jcuCf0 Reply STOP to opt out");
    }

    #[test]
    fn prefix_budgets_derive_from_suffix() {
        let policy = default_policy();
        let suffix_len = policy.suffix.chars().count();
        assert_eq!(policy.prefix_max(), 320 - suffix_len);
        assert_eq!(policy.prefix_target(), PREFIX_TARGET_CAP.min(320 - suffix_len));
    }

    #[test]
    fn prefix_max_never_below_one() {
        let policy = MessagePolicy::new(10, "https://bit.ly/4jcuCf0", "Reply STOP to opt out");
        assert_eq!(policy.prefix_max(), 1);
        assert_eq!(policy.prefix_target(), 1);
    }

    #[test]
    fn empty_draft_yields_trimmed_suffix() {
        let policy = default_policy();
        assert_eq!(compose(&policy, ""), policy.suffix.trim());
    }

    #[test]
    fn short_draft_passes_through_with_suffix() {
        let policy = default_policy();
        let out = compose(&policy, "Hi Sam, thanks for choosing us!");
        assert_eq!(out, format!("Hi Sam, thanks for choosing us!{}", policy.suffix));
    }

    #[test]
    fn long_draft_is_clamped_under_budget() {
        let policy = default_policy();
        let long = "word ".repeat(120);
        let out = compose(&policy, &long);
        assert!(out.chars().count() <= policy.sms_max);
        assert!(out.ends_with(policy.suffix.trim_start()));
    }

    #[test]
    fn draft_with_url_loses_the_url() {
        let policy = default_policy();
        let out = compose(&policy, "Loved it! See http://other.example/review please");
        // Only the policy's own review link survives
        assert_eq!(out.matches("http").count(), 1);
        assert!(out.contains("bit.ly"));
    }

    #[test]
    fn generous_budget_still_caps_prefix() {
        // With a large SMS budget the prefix target stays at the cap
        let policy = MessagePolicy::new(1000, "https://bit.ly/4jcuCf0", "Reply STOP to opt out");
        assert_eq!(policy.prefix_target(), PREFIX_TARGET_CAP);
        let long = "word ".repeat(200);
        let out = compose(&policy, &long);
        let prefix_len = out.chars().count() - policy.suffix.chars().count();
        assert!(prefix_len <= PREFIX_TARGET_CAP);
    }

    proptest! {
        #[test]
        fn composed_length_never_exceeds_budget(raw in ".{0,600}") {
            let policy = default_policy();
            let out = compose(&policy, &raw);
            prop_assert!(out.chars().count() <= policy.sms_max);
        }

        #[test]
        fn composed_message_always_ends_with_opt_out(raw in ".{0,600}") {
            let policy = default_policy();
            let out = compose(&policy, &raw);
            prop_assert!(out.ends_with("Reply STOP to opt out"));
        }
    }
}
