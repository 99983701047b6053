use serde::Deserialize;
use std::time::Duration;

/// Configuration for the profile scraper
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,

    /// Navigation timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// How long to look for the cookie consent button in milliseconds (default: 10000)
    pub cookie_timeout_ms: u64,

    /// Pause before clicking the cookie consent button in milliseconds (default: 1000)
    pub cookie_delay_ms: u64,

    /// How long to wait for book entries on a listing page in milliseconds (default: 5000)
    pub entry_timeout_ms: u64,

    /// How long to wait for detail page sections in milliseconds (default: 5000)
    pub detail_timeout_ms: u64,

    /// Pause after moving to the next listing page in milliseconds (default: 1000)
    pub page_delay_ms: u64,

    /// Extra waits on a page without entries before treating it as the end (default: 0)
    ///
    /// Each retry doubles the entry timeout.
    pub empty_page_retries: u32,

    /// Stop after this many listing pages (default: unlimited)
    pub max_pages: Option<usize>,

    /// User agent string to use
    pub user_agent: Option<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            headless: true,
            timeout_secs: 30,
            cookie_timeout_ms: 10_000,
            cookie_delay_ms: 1000,
            entry_timeout_ms: 5000,
            detail_timeout_ms: 5000,
            page_delay_ms: 1000,
            empty_page_retries: 0,
            max_pages: None,
            user_agent: Some(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                    .to_string(),
            ),
        }
    }
}

impl ScraperConfig {
    /// Get the navigation timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cookie_timeout(&self) -> Duration {
        Duration::from_millis(self.cookie_timeout_ms)
    }

    pub fn cookie_delay(&self) -> Duration {
        Duration::from_millis(self.cookie_delay_ms)
    }

    pub fn entry_timeout(&self) -> Duration {
        Duration::from_millis(self.entry_timeout_ms)
    }

    pub fn detail_timeout(&self) -> Duration {
        Duration::from_millis(self.detail_timeout_ms)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }
}
