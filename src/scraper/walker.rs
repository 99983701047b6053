use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};
use url::Url;

use crate::app::Result;
use crate::domain::Record;
use crate::scraper::config::ScraperConfig;
use crate::scraper::extractor::FieldExtractor;
use crate::scraper::selectors::{
    COOKIE_ACCEPT_TEXT, COOKIE_BUTTON, DISABLED_CLASS, ENTRY, NEXT_PAGE,
};
use crate::scraper::{poll_pause, Node, Session};

/// Walks a paginated library listing and extracts every entry.
pub struct PageWalker {
    config: ScraperConfig,
    extractor: FieldExtractor,
}

impl PageWalker {
    pub fn new(config: ScraperConfig) -> Self {
        Self {
            config,
            extractor: FieldExtractor::new(),
        }
    }

    /// Collect records from `start_url` and every following page.
    ///
    /// Only the initial navigation can fail. A page that never shows entries,
    /// a missing or disabled next control, or a failed click all end the walk
    /// with whatever was collected so far.
    pub async fn walk<S: Session>(&self, session: &S, start_url: &str) -> Result<Vec<Record>> {
        session.navigate(start_url).await?;
        self.dismiss_cookie_banner(session).await;

        let mut records = Vec::new();
        let mut pages = 0usize;

        loop {
            if self.page_limit_reached(pages) {
                break;
            }

            if !self.wait_for_entries(session).await {
                info!("No entries on page {}, stopping", pages + 1);
                break;
            }

            let base = page_url(session).await;
            let entries = session.find_all(ENTRY).await.unwrap_or_default();
            for entry in &entries {
                records.push(self.extractor.extract(entry, base.as_ref()).await);
            }
            pages += 1;
            debug!("Page {}: {} entries", pages, entries.len());

            if self.page_limit_reached(pages) {
                break;
            }

            if !self.advance(session).await {
                break;
            }
            sleep(self.config.page_delay()).await;
        }

        info!("Collected {} records from {} pages", records.len(), pages);
        Ok(records)
    }

    fn page_limit_reached(&self, pages: usize) -> bool {
        match self.config.max_pages {
            Some(max) if pages >= max => {
                warn!("Stopped after {} pages (max_pages)", max);
                true
            }
            _ => false,
        }
    }

    /// Click the consent button if one shows up. Absence is not an error.
    async fn dismiss_cookie_banner<S: Session>(&self, session: &S) {
        let deadline = Instant::now().checked_add(self.config.cookie_timeout());

        loop {
            for button in session.find_all(COOKIE_BUTTON).await.unwrap_or_default() {
                let is_accept = button
                    .text()
                    .await
                    .map(|t| t.contains(COOKIE_ACCEPT_TEXT))
                    .unwrap_or(false);
                if !is_accept {
                    continue;
                }

                sleep(self.config.cookie_delay()).await;
                match button.click().await {
                    Ok(()) => debug!("Accepted cookie consent"),
                    Err(e) => debug!("Cookie consent click failed: {}", e),
                }
                return;
            }

            let Some(pause) = poll_pause(deadline) else {
                debug!("No cookie consent button found");
                return;
            };
            sleep(pause).await;
        }
    }

    /// Wait for at least one entry, re-waiting `empty_page_retries` times with
    /// a doubled timeout before giving up.
    async fn wait_for_entries<S: Session>(&self, session: &S) -> bool {
        let mut timeout = self.config.entry_timeout();

        for attempt in 0..=self.config.empty_page_retries {
            if let Ok(Some(_)) = session.wait_for(ENTRY, timeout).await {
                return true;
            }
            if attempt < self.config.empty_page_retries {
                timeout = doubled(timeout);
                debug!(
                    "No entries yet, retrying ({}/{}) with {:?} timeout",
                    attempt + 1,
                    self.config.empty_page_retries,
                    timeout
                );
            }
        }

        false
    }

    /// Activate the next-page control. Returns false when there is no next page.
    async fn advance<S: Session>(&self, session: &S) -> bool {
        let next = match session.find(NEXT_PAGE).await {
            Ok(Some(next)) => next,
            _ => {
                debug!("No next-page control");
                return false;
            }
        };

        match next.attribute("class").await {
            Ok(Some(class)) if !class.contains(DISABLED_CLASS) => {}
            _ => {
                debug!("Next-page control disabled");
                return false;
            }
        }

        if let Err(e) = next.click().await {
            warn!("Failed to open next page: {}", e);
            return false;
        }
        true
    }
}

/// Parsed URL of the current page, used as the base for relative links.
async fn page_url<S: Session>(session: &S) -> Option<Url> {
    let url = session.current_url().await.ok()??;
    Url::parse(&url).ok()
}

fn doubled(timeout: Duration) -> Duration {
    timeout.saturating_mul(2)
}
