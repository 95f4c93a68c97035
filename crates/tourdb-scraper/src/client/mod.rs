//! HTTP client for fetching listing and tour pages as HTML.

mod origin;

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

pub use origin::{extract_origin, is_absolute_http, resolve_url};

/// Bodies shorter than this (after trimming) are treated as unusable.
pub(crate) const MIN_USABLE_HTML_BYTES: usize = 256;

/// Which header set a request is sent with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderProfile {
    /// Browser-like headers with compressed transfer and the primary timeout.
    Primary,
    /// Identity encoding, no keep-alive and the longer retry timeout. Used
    /// once after a primary fetch fails.
    Alternate,
}

/// Fetches HTML with browser-like headers.
///
/// Non-2xx responses are returned as typed errors. Bodies are returned as-is;
/// callers decide whether a body is usable with [`is_usable_html`].
pub struct PageClient {
    client: Client,
    user_agent: String,
    request_timeout: Duration,
    retry_timeout: Duration,
}

impl PageClient {
    /// Creates a `PageClient` with the primary and retry timeouts and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        request_timeout_secs: u64,
        retry_timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            user_agent: user_agent.to_owned(),
            request_timeout: Duration::from_secs(request_timeout_secs),
            retry_timeout: Duration::from_secs(retry_timeout_secs),
        })
    }

    /// Fetches `url` with the primary header profile.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::NotFound`] on HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`ScraperError::Http`] on network, TLS or timeout failures.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ScraperError> {
        self.fetch_with_profile(url, HeaderProfile::Primary).await
    }

    /// Fetches `url` with the given header profile.
    ///
    /// # Errors
    ///
    /// Same as [`PageClient::fetch_html`].
    pub async fn fetch_with_profile(
        &self,
        url: &str,
        profile: HeaderProfile,
    ) -> Result<String, ScraperError> {
        let origin = extract_origin(url);
        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(reqwest::header::REFERER, format!("{origin}/"))
            .header(reqwest::header::CACHE_CONTROL, "no-cache");

        request = match profile {
            HeaderProfile::Primary => request.timeout(self.request_timeout),
            HeaderProfile::Alternate => request
                .timeout(self.retry_timeout)
                .header(reqwest::header::ACCEPT_ENCODING, "identity")
                .header(reqwest::header::CONNECTION, "close"),
        };

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound {
                url: url.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}

/// `true` when `body` looks like a real page rather than an empty shell or a
/// bot challenge.
#[must_use]
pub fn is_usable_html(body: &str) -> bool {
    let trimmed = body.trim();
    if trimmed.len() < MIN_USABLE_HTML_BYTES {
        return false;
    }
    !looks_like_bot_challenge(trimmed)
}

fn looks_like_bot_challenge(body: &str) -> bool {
    let lowered = body.to_ascii_lowercase();
    lowered.contains("attention required! | cloudflare")
        || lowered.contains("/cdn-cgi/challenge-platform/")
        || (lowered.contains("just a moment...") && lowered.contains("cf-"))
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
