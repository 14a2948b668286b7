//! Word-boundary-safe length clamp.

/// Sentence-ending punctuation accepted at the end of a truncated draft.
const SENTENCE_END: [char; 3] = ['.', '!', '?'];

/// Clamp `s` to at most `max_len` characters without cutting inside a word.
///
/// Strings within the limit pass through unchanged. Otherwise the text is
/// cut at `max_len` characters, backed up to the last space strictly before
/// the cut (when one exists past position zero), and trimmed. A truncated
/// non-empty result that does not already end in `.`, `!` or `?` gets a
/// single `.` appended so it reads as a complete sentence.
#[must_use]
pub fn truncate_to_word_boundary(s: &str, max_len: usize) -> String {
    let Some((cut_byte, _)) = s.char_indices().nth(max_len) else {
        return s.to_string();
    };

    let mut cut = &s[..cut_byte];
    if let Some(last_space) = cut.rfind(' ') {
        if last_space > 0 {
            cut = &cut[..last_space];
        }
    }

    let mut out = cut.trim().to_string();
    if !out.is_empty() && !out.ends_with(SENTENCE_END) {
        out.push('.');
    }
    out
}
