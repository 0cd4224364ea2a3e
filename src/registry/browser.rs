//! Live trial retrieval through a Chrome session.

use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions};

use super::listing::{parse_listing, search_url, ROW_SELECTOR};
use super::types::{TrialRecord, TrialSource};
use super::RegistryError;
use crate::config::BrowserSettings;

/// Fetches the recruiting-trials listing by driving a real Chrome session.
///
/// One session per fetch: the browser process is launched inside
/// `fetch_recruiting` and killed when it drops, on success and failure alike.
pub struct ChromeTrialSource {
    settings: BrowserSettings,
}

impl ChromeTrialSource {
    pub fn new(settings: BrowserSettings) -> Self {
        Self { settings }
    }
}

impl TrialSource for ChromeTrialSource {
    /// First results page only. No retry, no pagination.
    fn fetch_recruiting(&self, condition: &str) -> Result<Vec<TrialRecord>, RegistryError> {
        let url = search_url(&self.settings.registry_url, condition)?;
        tracing::info!(url = %url, "Fetching recruiting trials");

        let options = LaunchOptions::default_builder()
            .headless(self.settings.headless)
            .build()
            .map_err(|e| RegistryError::Browser(e.to_string()))?;
        let browser = Browser::new(options).map_err(|e| RegistryError::Browser(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| RegistryError::Browser(e.to_string()))?;
        tab.navigate_to(url.as_str())
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| RegistryError::Browser(e.to_string()))?;

        // The results table is rendered client-side after navigation
        // completes. Poll for the first row instead of sleeping a fixed
        // delay; a page that never renders rows still yields a snapshot,
        // which parses to an empty (or truncated) listing.
        let timeout = Duration::from_secs(self.settings.rows_timeout_secs);
        if tab
            .wait_for_element_with_custom_timeout(ROW_SELECTOR, timeout)
            .is_err()
        {
            tracing::warn!(
                timeout_secs = self.settings.rows_timeout_secs,
                "No listing rows appeared before the timeout"
            );
        }

        let html = tab
            .get_content()
            .map_err(|e| RegistryError::Browser(e.to_string()))?;
        let trials = parse_listing(&html)?;
        tracing::info!(count = trials.len(), "Parsed trial listing");
        Ok(trials)
    }
}
