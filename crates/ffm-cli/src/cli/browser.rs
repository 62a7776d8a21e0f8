//! Browser attach and folder-tab discovery (Chrome DevTools Protocol).
//!
//! The thin boundary between the control surface and the page: everything
//! past here happens inside the browser. File bytes are never touched by
//! this tool; downloads land wherever the browser profile puts them.

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

use ffm_core::config::FfmConfig;

/// A connected browser plus the spawned CDP event loop.
pub struct BrowserSession {
    browser: Browser,
    _events: JoinHandle<()>,
}

impl BrowserSession {
    /// Connect to the configured DevTools endpoint, or launch a headful
    /// Chrome when none is configured. Headful, because the user may need
    /// the session cookies of an already signed-in profile.
    pub async fn attach(cfg: &FfmConfig) -> Result<Self> {
        let (browser, mut handler) = match cfg.cdp_url.as_deref() {
            Some(endpoint) => Browser::connect(endpoint)
                .await
                .with_context(|| format!("connecting to {endpoint}"))?,
            None => {
                let config = BrowserConfig::builder()
                    .with_head()
                    .build()
                    .map_err(anyhow::Error::msg)?;
                Browser::launch(config).await.context("launching Chrome")?
            }
        };

        // The handler stream must be pumped for any CDP call to complete.
        let events = tokio::spawn(async move { while handler.next().await.is_some() {} });

        Ok(Self {
            browser,
            _events: events,
        })
    }

    /// Reuse a tab already showing `url`, or open a new one and wait for
    /// the navigation to finish.
    pub async fn folder_page(&self, url: &str) -> Result<Page> {
        for page in self.browser.pages().await? {
            if let Ok(Some(current)) = page.url().await {
                if current == url {
                    tracing::debug!("reusing open tab for {url}");
                    return Ok(page);
                }
            }
        }

        let page = self.browser.new_page(url).await?;
        page.wait_for_navigation().await?;
        Ok(page)
    }
}
