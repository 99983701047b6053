//! Browser-driven scraping of a lubimyczytac.pl profile library.
//!
//! # Architecture
//!
//! ```text
//! profile list URL → PageWalker → FieldExtractor (per entry) → Vec<Record>
//! Vec<Record> → DetailEnricher (per detail page) → Vec<Record> (isbn, original title)
//! ```
//!
//! The walker and the enricher only talk to the page through the [`Session`]
//! and [`Node`] traits. [`ChromeSession`] drives a real Chrome instance;
//! tests use an in-memory document.
//!
//! # Usage
//!
//! ```rust,ignore
//! use shelfport::scraper::{ChromeSession, DetailEnricher, PageWalker, ScraperConfig};
//!
//! let config = ScraperConfig::default();
//! let session = ChromeSession::launch(&config).await?;
//!
//! let mut records = PageWalker::new(config.clone()).walk(&session, &list_url).await?;
//! let summary = DetailEnricher::new(config).enrich(&session, &mut records).await;
//!
//! session.close().await;
//! ```

mod chrome;
mod config;
mod enricher;
mod extractor;
pub mod selectors;
mod walker;

#[cfg(test)]
pub(crate) mod testing;

pub use chrome::ChromeSession;
pub use config::ScraperConfig;
pub use enricher::{parse_original_title, DetailEnricher, EnrichOutcome, EnrichSummary};
pub use extractor::FieldExtractor;
pub use walker::PageWalker;

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::app::Result;

/// Delay between two lookups while waiting for an element to appear.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A DOM element handle.
///
/// Every operation is fallible; callers decide whether a failure matters.
#[async_trait]
pub trait Node: Send + Sync + Sized {
    /// Rendered text of the element.
    async fn text(&self) -> Result<String>;

    async fn attribute(&self, name: &str) -> Result<Option<String>>;

    async fn inner_html(&self) -> Result<String>;

    async fn click(&self) -> Result<()>;

    /// First descendant matching a CSS selector.
    async fn find(&self, selector: &str) -> Result<Option<Self>>;

    /// All descendants matching a CSS selector, in document order.
    async fn find_all(&self, selector: &str) -> Result<Vec<Self>>;
}

/// A single browser tab the scraper drives.
#[async_trait]
pub trait Session: Send + Sync {
    type Node: Node;

    async fn navigate(&self, url: &str) -> Result<()>;

    /// URL of the page currently loaded, if any.
    async fn current_url(&self) -> Result<Option<String>>;

    async fn find(&self, selector: &str) -> Result<Option<Self::Node>>;

    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Node>>;

    /// Poll for an element until it appears or `timeout` elapses.
    ///
    /// Returns `Ok(None)` on timeout. Lookup errors count as "not there yet".
    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<Option<Self::Node>> {
        let deadline = Instant::now().checked_add(timeout);
        loop {
            if let Ok(Some(node)) = self.find(selector).await {
                return Ok(Some(node));
            }

            let Some(pause) = poll_pause(deadline) else {
                return Ok(None);
            };
            tokio::time::sleep(pause).await;
        }
    }
}

/// Time to sleep before the next lookup, or `None` once `deadline` has passed.
///
/// A `None` deadline never expires.
pub(crate) fn poll_pause(deadline: Option<Instant>) -> Option<Duration> {
    match deadline {
        Some(deadline) => {
            let now = Instant::now();
            (now < deadline).then(|| POLL_INTERVAL.min(deadline - now))
        }
        None => Some(POLL_INTERVAL),
    }
}
