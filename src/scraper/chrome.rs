use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::app::{Result, ShelfportError};
use crate::scraper::config::ScraperConfig;
use crate::scraper::{Node, Session};

/// A Chrome tab driven through chromiumoxide.
///
/// The browser process lives as long as the session. [`ChromeSession::close`]
/// shuts it down gracefully; dropping the session without closing still stops
/// the event handler and lets chromiumoxide kill the child process.
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    timeout: Duration,
}

impl ChromeSession {
    /// Launch a browser and open a blank tab
    pub async fn launch(config: &ScraperConfig) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-software-rasterizer")
            .request_timeout(config.timeout());

        if !config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(|e| ShelfportError::Browser(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            ShelfportError::Browser(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        let handler = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ShelfportError::Browser(format!("Failed to create page: {}", e)))?;

        if let Some(ref ua) = config.user_agent {
            page.set_user_agent(ua)
                .await
                .map_err(|e| ShelfportError::Browser(format!("Failed to set user agent: {}", e)))?;
        }

        debug!(headless = config.headless, "Browser session started");

        Ok(Self {
            browser,
            page,
            handler,
            timeout: config.timeout(),
        })
    }

    /// Close the browser and wait for the process to exit
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }
        debug!("Browser session closed");
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

#[async_trait]
impl Session for ChromeSession {
    type Node = ChromeNode;

    async fn navigate(&self, url: &str) -> Result<()> {
        match tokio::time::timeout(self.timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(ShelfportError::Browser(format!(
                "Navigation to {} failed: {}",
                url, e
            ))),
            Err(_) => Err(ShelfportError::Browser(format!(
                "Navigation to {} timed out after {}s",
                url,
                self.timeout.as_secs()
            ))),
        }
    }

    async fn current_url(&self) -> Result<Option<String>> {
        self.page
            .url()
            .await
            .map_err(|e| ShelfportError::Browser(format!("Failed to read page URL: {}", e)))
    }

    async fn find(&self, selector: &str) -> Result<Option<ChromeNode>> {
        Ok(self.find_all(selector).await?.into_iter().next())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<ChromeNode>> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|e| ShelfportError::Browser(format!("Lookup of {} failed: {}", selector, e)))?;
        Ok(elements.into_iter().map(ChromeNode).collect())
    }
}

/// An element on a [`ChromeSession`] page.
pub struct ChromeNode(Element);

#[async_trait]
impl Node for ChromeNode {
    async fn text(&self) -> Result<String> {
        self.0
            .inner_text()
            .await
            .map(Option::unwrap_or_default)
            .map_err(|e| ShelfportError::Browser(format!("Failed to read text: {}", e)))
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.0
            .attribute(name)
            .await
            .map_err(|e| ShelfportError::Browser(format!("Failed to read attribute {}: {}", name, e)))
    }

    async fn inner_html(&self) -> Result<String> {
        self.0
            .inner_html()
            .await
            .map(Option::unwrap_or_default)
            .map_err(|e| ShelfportError::Browser(format!("Failed to read HTML: {}", e)))
    }

    async fn click(&self) -> Result<()> {
        self.0
            .click()
            .await
            .map(|_| ())
            .map_err(|e| ShelfportError::Browser(format!("Click failed: {}", e)))
    }

    async fn find(&self, selector: &str) -> Result<Option<Self>> {
        Ok(self.find_all(selector).await?.into_iter().next())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Self>> {
        let elements = self
            .0
            .find_elements(selector)
            .await
            .map_err(|e| ShelfportError::Browser(format!("Lookup of {} failed: {}", selector, e)))?;
        Ok(elements.into_iter().map(ChromeNode).collect())
    }
}
