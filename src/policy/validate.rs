//! Draft acceptance gate.
//!
//! Decides whether a generated draft is acceptable before it is shown to a
//! human. Runs on the sanitized form, so a rejection means either the model
//! produced something out of policy or the sanitizer could not fully clean
//! the text.

use std::sync::LazyLock;

use regex::Regex;

/// Shortest draft considered credible, in characters.
pub const MIN_DRAFT_CHARS: usize = 20;

/// Longest draft considered trustworthy, in characters.
pub const MAX_DRAFT_CHARS: usize = 240;

/// Matches a leftover whole-word "stop" or "opt out" phrase.
#[allow(clippy::unwrap_used)]
static OPT_OUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(stop|opt out)\b").unwrap());

/// Matches a leftover URL scheme.
#[allow(clippy::unwrap_used)]
static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://").unwrap());

/// Return true when a raw draft fails content/format policy.
///
/// The draft is sanitized first, then rejected if any of the following
/// hold: empty; shorter than [`MIN_DRAFT_CHARS`]; longer than
/// [`MAX_DRAFT_CHARS`]; still contains a bare `http(s)://`; still contains
/// whole-word "stop" or "opt out"; contains any non-ASCII character.
#[must_use]
pub fn looks_bad(raw_prefix: &str) -> bool {
    let p = super::sanitize(raw_prefix);
    if p.is_empty() {
        return true;
    }
    if p.chars().count() < MIN_DRAFT_CHARS {
        return true;
    }
    if SCHEME_RE.is_match(&p) {
        return true;
    }
    if OPT_OUT_RE.is_match(&p) {
        return true;
    }
    if !p.is_ascii() {
        return true;
    }
    p.chars().count() > MAX_DRAFT_CHARS
}
