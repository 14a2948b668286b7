//! Configuration validation.
//!
//! Range checks for configuration values before the service starts.

use super::Config;
use crate::error::ConfigError;

/// Minimum allowed timeout in milliseconds (1 second).
pub const MIN_TIMEOUT_MS: u64 = 1000;

/// Maximum allowed timeout in milliseconds (5 minutes).
pub const MAX_TIMEOUT_MS: u64 = 300_000;

/// Minimum allowed SMS budget. Anything lower cannot hold the suffix plus
/// a readable draft.
pub const MIN_SMS_MAX: usize = 60;

/// Maximum allowed SMS budget (10 concatenated GSM segments).
pub const MAX_SMS_MAX: usize = 1600;

/// Validate configuration values.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if any value is out of range:
/// - secrets (`DEMO_PASS`, `OPENAI_API_KEY`, `TNZ_AUTH_TOKEN`) must not be
///   empty
/// - `REQUEST_TIMEOUT_MS` must be between 1000 and 300000
/// - `SMS_MAX` must be between 60 and 1600, and large enough to hold the
///   suffix built from `REVIEW_LINK` and `OPT_OUT_TEXT` plus one draft
///   character
/// - `SMS_COUNTRY_CODE` must be all digits
#[must_use = "validation result should be checked"]
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.demo_pass.is_empty() {
        return Err(ConfigError::InvalidValue {
            var: "DEMO_PASS".into(),
            reason: "must not be empty".into(),
        });
    }

    if config.openai_api_key.is_empty() {
        return Err(ConfigError::InvalidValue {
            var: "OPENAI_API_KEY".into(),
            reason: "must not be empty".into(),
        });
    }

    if config.tnz_auth_token.is_empty() {
        return Err(ConfigError::InvalidValue {
            var: "TNZ_AUTH_TOKEN".into(),
            reason: "must not be empty".into(),
        });
    }

    if config.request_timeout_ms < MIN_TIMEOUT_MS || config.request_timeout_ms > MAX_TIMEOUT_MS {
        return Err(ConfigError::InvalidValue {
            var: "REQUEST_TIMEOUT_MS".into(),
            reason: format!("must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS} ms"),
        });
    }

    if config.sms_max < MIN_SMS_MAX || config.sms_max > MAX_SMS_MAX {
        return Err(ConfigError::InvalidValue {
            var: "SMS_MAX".into(),
            reason: format!("must be between {MIN_SMS_MAX} and {MAX_SMS_MAX}"),
        });
    }

    // The suffix is mandatory, so the budget must hold it plus at least
    // one draft character or the composer cannot meet its length bound.
    let suffix_chars = config.review_link.chars().count() + config.opt_out_text.chars().count() + 2;
    if suffix_chars + 1 > config.sms_max {
        return Err(ConfigError::InvalidValue {
            var: "SMS_MAX".into(),
            reason: format!(
                "must leave room for the message suffix ({suffix_chars} chars) plus one draft character"
            ),
        });
    }

    if config.country_code.is_empty() || !config.country_code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::InvalidValue {
            var: "SMS_COUNTRY_CODE".into(),
            reason: "must be a numeric country calling code".into(),
        });
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::SecretString;

    fn create_valid_config() -> Config {
        Config {
            demo_pass: SecretString::new("letmein"),
            openai_api_key: SecretString::new("sk-test-key"),
            tnz_auth_token: SecretString::new("dG9rZW4="),
            bind_addr: "127.0.0.1:8080".to_string(),
            database_path: "./data/demo_sends.db".to_string(),
            log_level: "info".to_string(),
            request_timeout_ms: 30_000,
            model: "gpt-4o-mini".to_string(),
            review_link: "https://bit.ly/4jcuCf0".to_string(),
            opt_out_text: "Reply STOP to opt out".to_string(),
            sms_max: 320,
            country_code: "64".to_string(),
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(validate_config(&create_valid_config()).is_ok());
    }

    #[test]
    fn empty_demo_pass_rejected() {
        let mut config = create_valid_config();
        config.demo_pass = SecretString::new("");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var, .. } if var == "DEMO_PASS"));
    }

    #[test]
    fn empty_api_key_rejected() {
        let mut config = create_valid_config();
        config.openai_api_key = SecretString::new("");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var, .. } if var == "OPENAI_API_KEY"));
    }

    #[test]
    fn empty_auth_token_rejected() {
        let mut config = create_valid_config();
        config.tnz_auth_token = SecretString::new("");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var, .. } if var == "TNZ_AUTH_TOKEN"));
    }

    #[test]
    fn timeout_too_low_rejected() {
        let mut config = create_valid_config();
        config.request_timeout_ms = 999;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var, .. } if var == "REQUEST_TIMEOUT_MS"));
    }

    #[test]
    fn timeout_too_high_rejected() {
        let mut config = create_valid_config();
        config.request_timeout_ms = 300_001;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var, .. } if var == "REQUEST_TIMEOUT_MS"));
    }

    #[test]
    fn sms_max_out_of_range_rejected() {
        let mut config = create_valid_config();
        config.sms_max = 10;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var, .. } if var == "SMS_MAX"));

        config.sms_max = 2000;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var, .. } if var == "SMS_MAX"));
    }

    #[test]
    fn boundary_values_accepted() {
        let mut config = create_valid_config();
        config.request_timeout_ms = MIN_TIMEOUT_MS;
        config.sms_max = MIN_SMS_MAX;
        assert!(validate_config(&config).is_ok());

        config.request_timeout_ms = MAX_TIMEOUT_MS;
        config.sms_max = MAX_SMS_MAX;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn suffix_exceeding_budget_rejected() {
        let mut config = create_valid_config();
        config.sms_max = 60;
        config.review_link = format!("https://example.com/{}", "r".repeat(80));
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var, .. } if var == "SMS_MAX"));
    }

    #[test]
    fn suffix_exactly_filling_budget_minus_one_accepted() {
        let mut config = create_valid_config();
        // Suffix is " <link> <opt-out>": 45 chars; one draft char fits at 46
        config.sms_max = 60;
        assert!(validate_config(&config).is_ok());

        config.sms_max = 1600;
        config.review_link = "r".repeat(1590);
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var, .. } if var == "SMS_MAX"));
    }

    #[test]
    fn accepted_config_composes_within_budget() {
        let mut config = create_valid_config();
        config.sms_max = 60;
        assert!(validate_config(&config).is_ok());

        let policy = config.message_policy();
        let out = crate::policy::compose(&policy, "hello there friend of ours");
        assert!(out.chars().count() <= config.sms_max);
    }

    #[test]
    fn non_numeric_country_code_rejected() {
        let mut config = create_valid_config();
        config.country_code = "+64".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var, .. } if var == "SMS_COUNTRY_CODE"));
    }
}
