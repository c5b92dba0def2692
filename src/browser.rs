//! Headless Chrome page loading via chromiumoxide
//!
//! Stands in for the browser an article is normally read in: one tab,
//! one navigation, rendered HTML back.

use crate::error::{NavigationFailure, PageError};
use crate::page::LoadedPage;
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// A running headless Chrome
pub struct PageLoader {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl PageLoader {
    /// Launch Chrome
    pub async fn launch() -> Result<Self, PageError> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-setuid-sandbox")
            .arg("--no-first-run")
            .arg("--headless=new")
            .build()
            .map_err(PageError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| PageError::Launch(e.to_string()))?;

        // CDP events must be drained for the browser to make progress
        let handler = tokio::spawn(async move { while handler.next().await.is_some() {} });

        debug!("Chrome launched");
        Ok(Self { browser, handler })
    }

    /// Navigate a fresh tab to `url` and return the rendered page
    ///
    /// The returned page URL is the final one, after redirects.
    pub async fn load(&self, url: &Url, timeout_ms: u64) -> Result<LoadedPage, PageError> {
        let page = self.browser.new_page("about:blank").await?;
        page.execute(SetUserAgentOverrideParams::new(USER_AGENT))
            .await?;

        let nav = tokio::time::timeout(
            Duration::from_millis(timeout_ms),
            page.goto(url.as_str()),
        )
        .await;

        let result = match nav {
            Ok(Ok(_)) => match page.content().await {
                Ok(html) => {
                    let final_url = page
                        .url()
                        .await
                        .ok()
                        .flatten()
                        .and_then(|u| Url::parse(&u).ok())
                        .unwrap_or_else(|| url.clone());
                    debug!(url = %final_url, bytes = html.len(), "Page loaded");
                    Ok(LoadedPage::new(html, Some(final_url)))
                }
                Err(e) => Err(PageError::Browser(e)),
            },
            Ok(Err(e)) => {
                let detail = e.to_string();
                Err(PageError::Navigation {
                    url: url.to_string(),
                    kind: NavigationFailure::classify(&detail),
                    detail,
                })
            }
            Err(_) => Err(PageError::Timeout {
                url: url.to_string(),
                timeout_ms,
            }),
        };

        if let Err(e) = page.close().await {
            warn!(error = %e, "Failed to close tab");
        }

        result
    }

    /// Close the browser
    pub async fn close(mut self) -> Result<(), PageError> {
        self.browser.close().await?;
        let _ = self.browser.wait().await;
        self.handler.abort();
        Ok(())
    }
}
