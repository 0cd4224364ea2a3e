//! Run configuration: defaults and settings for the external surfaces.
//!
//! Everything the workflow needs from the outside — record path, condition
//! term, service credential, endpoints — arrives through command-line flags
//! or the environment. Nothing is hardcoded at call sites.

use std::env;

/// Condition term searched when none is given on the command line.
pub const DEFAULT_CONDITION: &str = "cancer";

/// Chat-completion model used for explanations and the history summary.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

/// Base URL of the chat-completion service.
pub const DEFAULT_CHAT_BASE_URL: &str = "https://api.openai.com";

/// Results page of the public trial registry.
pub const DEFAULT_REGISTRY_URL: &str = "https://clinicaltrials.gov/ct2/results";

/// Environment variable holding the chat-service credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Seconds to poll for the listing table before snapshotting the page anyway.
pub const DEFAULT_ROWS_TIMEOUT_SECS: u64 = 30;

/// Seconds before a chat-completion round trip is abandoned.
pub const DEFAULT_CHAT_TIMEOUT_SECS: u64 = 120;

/// Default log filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    "info,trialscout=debug".to_string()
}

/// Chat-service credential from the environment, if one is set.
pub fn api_key_from_env() -> Option<String> {
    env::var(API_KEY_VAR)
        .ok()
        .filter(|key| !key.trim().is_empty())
}

/// Settings for the chat-completion service.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    /// Service base URL; the completions path is appended to it.
    pub base_url: String,
    /// Caller-supplied credential, sent as a bearer token.
    pub api_key: String,
    /// Model identifier passed with every request.
    pub model: String,
    /// Round-trip timeout in seconds.
    pub timeout_secs: u64,
}

/// Settings for the registry browser session.
#[derive(Debug, Clone)]
pub struct BrowserSettings {
    /// Run Chrome without a window. Disable to watch the scrape.
    pub headless: bool,
    /// Results page the condition query is appended to.
    pub registry_url: String,
    /// How long to poll for table rows before snapshotting anyway.
    pub rows_timeout_secs: u64,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            rows_timeout_secs: DEFAULT_ROWS_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_browser_settings_are_headless() {
        let settings = BrowserSettings::default();
        assert!(settings.headless);
        assert_eq!(settings.registry_url, DEFAULT_REGISTRY_URL);
        assert_eq!(settings.rows_timeout_secs, DEFAULT_ROWS_TIMEOUT_SECS);
    }

    #[test]
    fn log_filter_enables_crate_debug() {
        let filter = default_log_filter();
        assert!(filter.contains("trialscout=debug"));
    }

    #[test]
    fn default_condition_is_cancer() {
        assert_eq!(DEFAULT_CONDITION, "cancer");
    }

    #[test]
    fn registry_default_filters_to_recruiting_page() {
        assert!(DEFAULT_REGISTRY_URL.starts_with("https://clinicaltrials.gov"));
    }
}
