//! Tier 2: a headless Chromium session that scrolls the page until every
//! lazy-loaded section has rendered, then captures the DOM.

use std::future::Future;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

use super::scroll::{scroll_until_stable, ScrollSettings, ScrollSurface, TokioPause};
use super::{FetchOutcome, PageFetcher};
use crate::error::ScraperError;
use crate::identity::{Identity, IdentityPool};

const SCROLL_HEIGHT_JS: &str = "document.body.scrollHeight";
const SCROLL_TO_BOTTOM_JS: &str = "window.scrollTo(0, document.body.scrollHeight); true";

/// Starts one browser session per fetch attempt.
pub trait BrowserLauncher: Send + Sync {
    type Session: RenderSession;

    fn launch(
        &self,
        identity: &Identity,
    ) -> impl Future<Output = Result<Self::Session, ScraperError>> + Send;
}

/// A live browser session. `close` must be awaited once the session is done
/// with, whatever `render` returned.
pub trait RenderSession: Send + Sync {
    fn render(
        &self,
        url: &str,
        settings: &ScrollSettings,
    ) -> impl Future<Output = Result<String, ScraperError>> + Send;

    fn close(self) -> impl Future<Output = ()> + Send;
}

#[derive(Debug, Clone)]
pub struct BrowserFetcher<L = ChromiumLauncher> {
    launcher: L,
    pool: IdentityPool,
    scroll: ScrollSettings,
    timeout: Duration,
}

impl BrowserFetcher {
    #[must_use]
    pub fn new(pool: IdentityPool, scroll: ScrollSettings, timeout_secs: u64) -> Self {
        Self {
            launcher: ChromiumLauncher,
            pool,
            scroll,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl<L: BrowserLauncher> BrowserFetcher<L> {
    /// Launches a browser, renders `url`, and always closes the browser
    /// before returning.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Browser`]: launch, navigation, or script evaluation failed.
    /// - [`ScraperError::BrowserTimeout`]: rendering exceeded the configured timeout.
    pub async fn fetch_once(&self, url: &str) -> Result<String, ScraperError> {
        let identity = self.pool.draw_random();
        let session = self.launcher.launch(&identity).await?;

        let rendered = tokio::time::timeout(self.timeout, session.render(url, &self.scroll)).await;
        session.close().await;

        rendered.unwrap_or(Err(ScraperError::BrowserTimeout {
            secs: self.timeout.as_secs(),
        }))
    }
}

impl<L: BrowserLauncher> PageFetcher for BrowserFetcher<L> {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        FetchOutcome::from(self.fetch_once(url).await)
    }
}

/// Launches a local Chromium through the DevTools protocol.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromiumLauncher;

impl BrowserLauncher for ChromiumLauncher {
    type Session = ChromiumSession;

    async fn launch(&self, identity: &Identity) -> Result<ChromiumSession, ScraperError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg(format!("--user-agent={}", identity.user_agent));
        if let Some(proxy) = &identity.proxy {
            builder = builder.arg(format!("--proxy-server=http://{}", proxy.server()));
        }
        let config = builder.build().map_err(ScraperError::Browser)?;

        let (browser, mut handler) = Browser::launch(config).await?;
        let handler = tokio::spawn(async move { while handler.next().await.is_some() {} });

        Ok(ChromiumSession { browser, handler })
    }
}

/// Owns the browser process and the task pumping its CDP event stream.
pub struct ChromiumSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl RenderSession for ChromiumSession {
    async fn render(&self, url: &str, settings: &ScrollSettings) -> Result<String, ScraperError> {
        let page = self.browser.new_page(url).await?;
        page.wait_for_navigation().await?;

        let mut surface = PageSurface { page: &page };
        let report = scroll_until_stable(&mut surface, &TokioPause, settings).await?;
        tracing::debug!(
            url,
            rounds = report.rounds,
            height = report.final_height,
            converged = report.converged,
            "page scrolled"
        );

        Ok(page.content().await?)
    }

    async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::warn!(error = %e, "browser close failed");
        }
        if let Err(e) = self.browser.wait().await {
            tracing::debug!(error = %e, "browser wait failed");
        }
        self.handler.abort();
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

struct PageSurface<'a> {
    page: &'a Page,
}

impl ScrollSurface for PageSurface<'_> {
    async fn scroll_height(&mut self) -> Result<i64, ScraperError> {
        self.page
            .evaluate(SCROLL_HEIGHT_JS)
            .await?
            .into_value::<i64>()
            .map_err(|e| ScraperError::Browser(format!("scrollHeight is not a number: {e}")))
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), ScraperError> {
        self.page.evaluate(SCROLL_TO_BOTTOM_JS).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "browser_test.rs"]
mod tests;
