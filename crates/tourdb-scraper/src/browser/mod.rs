//! Renderer abstraction for rendered-DOM link discovery.
//!
//! Listing pages on the target site build their tour grids client-side, so
//! the first discovery tier loads them in a real browser and reads anchors
//! from the rendered DOM. [`Renderer`] hides the engine; [`chromium`]
//! implements it over `chromiumoxide`.

pub mod chromium;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::ScraperError;

pub use chromium::ChromiumRenderer;

/// An anchor as seen on a page: resolved (or raw) href, visible text, and
/// whether it wraps an image.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawAnchor {
    pub href: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, rename = "hasImage")]
    pub has_image: bool,
}

/// Collects every anchor on a page after the browser has rendered it.
pub(crate) const ANCHOR_SCRIPT: &str = r"JSON.stringify(Array.from(document.querySelectorAll('a[href]')).map(a => ({
  href: a.href,
  text: (a.innerText || a.textContent || '').trim(),
  hasImage: a.querySelector('img') !== null
})))";

/// A browser engine holding one page that can be pointed at listing URLs.
#[async_trait]
pub trait Renderer: Send {
    /// Navigate to `url`, wait for it to settle, and return its anchors.
    async fn collect_anchors(&mut self, url: &str) -> Result<Vec<RawAnchor>, ScraperError>;

    /// Close the page and the browser process.
    async fn shutdown(self: Box<Self>) -> Result<(), ScraperError>;
}

/// Parses the JSON produced by [`ANCHOR_SCRIPT`].
pub(crate) fn parse_anchor_payload(url: &str, payload: &str) -> Result<Vec<RawAnchor>, ScraperError> {
    serde_json::from_str::<Vec<RawAnchor>>(payload).map_err(|source| ScraperError::Deserialize {
        context: format!("rendered anchors from {url}"),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_anchor_payload_reads_script_output() {
        let payload = r#"[{"href":"https://example.com/tour/a","text":"Tour A","hasImage":true},{"href":"/b"}]"#;
        let anchors = parse_anchor_payload("https://example.com/tours", payload).unwrap();
        assert_eq!(anchors.len(), 2);
        assert!(anchors[0].has_image);
        assert_eq!(anchors[1].text, "");
        assert!(!anchors[1].has_image);
    }

    #[test]
    fn parse_anchor_payload_rejects_garbage() {
        let err = parse_anchor_payload("https://example.com/tours", "undefined").unwrap_err();
        assert!(matches!(err, ScraperError::Deserialize { .. }));
    }
}
