//! Phone number normalization.
//!
//! Puts locally formatted numbers into `+`-prefixed E.164-like form for
//! the configured country before they reach the gateway.

/// Normalize a phone number for the given country calling code.
///
/// Whitespace and hyphens are stripped first. Then:
/// - empty input stays empty
/// - a leading `+` is kept as-is
/// - a leading `0` is replaced with `+<country_code>`
/// - a number already starting with the country code gains a `+`
/// - anything else passes through unchanged
///
/// With country code `64`: `0212769799` and `64212769799` both become
/// `+64212769799`.
#[must_use]
pub fn normalize_phone(raw: &str, country_code: &str) -> String {
    let s: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if s.is_empty() {
        return s;
    }

    if s.starts_with('+') {
        return s;
    }

    if let Some(rest) = s.strip_prefix('0') {
        return format!("+{country_code}{rest}");
    }

    if s.starts_with(country_code) {
        return format!("+{s}");
    }

    s
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("0212769799", "+64212769799"; "leading zero")]
    #[test_case("64212769799", "+64212769799"; "bare country code")]
    #[test_case("+64212769799", "+64212769799"; "already plus prefixed")]
    #[test_case("021 276 9799", "+64212769799"; "spaces stripped")]
    #[test_case("021-276-9799", "+64212769799"; "hyphens stripped")]
    #[test_case("  0212769799  ", "+64212769799"; "surrounding whitespace")]
    #[test_case("", ""; "empty input")]
    #[test_case("12125551234", "12125551234"; "foreign number passes through")]
    fn normalizes_nz_numbers(input: &str, expected: &str) {
        assert_eq!(normalize_phone(input, "64"), expected);
    }

    #[test]
    fn respects_other_country_codes() {
        assert_eq!(normalize_phone("0412345678", "61"), "+61412345678");
        assert_eq!(normalize_phone("61412345678", "61"), "+61412345678");
    }

    #[test]
    fn whitespace_only_input_becomes_empty() {
        assert_eq!(normalize_phone("   ", "64"), "");
    }
}
