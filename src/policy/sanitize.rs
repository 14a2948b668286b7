//! Draft sanitization.
//!
//! Pure string transforms applied to every model draft before it is
//! validated or composed. Total function, never fails, may return an
//! empty string.

use std::sync::LazyLock;

use regex::Regex;

/// Matches an absolute HTTP/HTTPS URL up to the next whitespace.
#[allow(clippy::unwrap_used)]
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+").unwrap());

/// Matches the whole word "stop", optionally preceded by "reply".
#[allow(clippy::unwrap_used)]
static STOP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:reply\s+)?stop\b").unwrap());

/// Quote characters stripped from the ends of a draft (straight and curly).
const QUOTE_CHARS: [char; 4] = ['"', '\'', '\u{201C}', '\u{201D}'];

/// Clean a raw model draft into a plain-ASCII, link-free SMS prefix.
///
/// Steps run in this exact order; later steps assume earlier cleanup:
/// 1. trim and strip surrounding quote characters
/// 2. remove absolute HTTP/HTTPS URLs, trim
/// 3. remove whole-word "stop" (optionally "reply stop"), case-insensitive,
///    trim
/// 4. drop every non-ASCII character
/// 5. collapse whitespace runs to single spaces, trim
#[must_use]
pub fn sanitize(input: &str) -> String {
    let out = input.trim().trim_matches(QUOTE_CHARS.as_slice());
    let out = URL_RE.replace_all(out, "");
    let out = out.trim();
    let out = STOP_RE.replace_all(out, "");
    let out: String = out.trim().chars().filter(char::is_ascii).collect();
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
