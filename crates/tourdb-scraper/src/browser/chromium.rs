//! Chromium-based renderer using chromiumoxide.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

use super::{parse_anchor_payload, RawAnchor, Renderer, ANCHOR_SCRIPT};
use crate::error::ScraperError;

/// Find a Chromium binary: the configured path if it exists, then `PATH`,
/// then the usual macOS install location.
#[must_use]
pub fn find_chromium(configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = configured {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        tracing::warn!(path = %path.display(), "configured Chromium path does not exist");
    }

    for name in ["google-chrome", "chromium", "chromium-browser"] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    if cfg!(target_os = "macos") {
        let common = PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if common.exists() {
            return Some(common);
        }
    }

    None
}

/// Headless Chromium with a single page reused for every listing URL.
pub struct ChromiumRenderer {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    navigation_timeout: Duration,
    settle: Duration,
}

impl ChromiumRenderer {
    /// Launches headless Chromium and opens one blank page.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Browser`] if no binary is found or the browser
    /// fails to start.
    pub async fn launch(
        chromium_path: Option<&Path>,
        navigation_timeout: Duration,
        settle: Duration,
    ) -> Result<Self, ScraperError> {
        let chrome_path = find_chromium(chromium_path).ok_or_else(|| {
            ScraperError::Browser("Chromium not found; set TOURDB_CHROMIUM_PATH".to_string())
        })?;

        let config = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .build()
            .map_err(|e| ScraperError::Browser(format!("failed to build browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScraperError::Browser(format!("failed to launch Chromium: {e}")))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScraperError::Browser(format!("failed to open page: {e}")))?;

        Ok(Self {
            browser,
            page,
            handler,
            navigation_timeout,
            settle,
        })
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn collect_anchors(&mut self, url: &str) -> Result<Vec<RawAnchor>, ScraperError> {
        let timeout_ms = u64::try_from(self.navigation_timeout.as_millis()).unwrap_or(u64::MAX);

        match tokio::time::timeout(self.navigation_timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                return Err(ScraperError::Browser(format!("navigation to {url} failed: {e}")));
            }
            Err(_) => {
                return Err(ScraperError::NavigationTimeout {
                    url: url.to_owned(),
                    timeout_ms,
                });
            }
        }

        // Grids filled by XHR after load need a moment before anchors exist.
        tokio::time::sleep(self.settle).await;

        let payload: String = self
            .page
            .evaluate(ANCHOR_SCRIPT)
            .await
            .map_err(|e| ScraperError::Browser(format!("anchor script failed on {url}: {e}")))?
            .into_value()
            .map_err(|source| ScraperError::Deserialize {
                context: format!("anchor script result from {url}"),
                source,
            })?;

        parse_anchor_payload(url, &payload)
    }

    async fn shutdown(self: Box<Self>) -> Result<(), ScraperError> {
        let Self {
            mut browser,
            page,
            handler,
            ..
        } = *self;

        if let Err(e) = page.close().await {
            tracing::debug!(error = %e, "failed to close renderer page");
        }
        let closed = browser.close().await;
        let _ = browser.wait().await;
        handler.abort();

        closed
            .map(|_| ())
            .map_err(|e| ScraperError::Browser(format!("failed to close Chromium: {e}")))
    }
}
