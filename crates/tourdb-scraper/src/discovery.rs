//! Tour URL discovery over the configured listing pages.
//!
//! Two tiers run for every listing page and their results are unioned in a
//! [`ScrapeSession`]:
//!
//! 1. **Rendered**: anchors read from the DOM after a browser has run the
//!    page's scripts. Skipped when no [`Renderer`] is available.
//! 2. **Static**: anchors parsed from the plain HTTP response. Anchors that
//!    wrap an image count as candidates on their own here, since tour grids
//!    are usually image cards.
//!
//! A failing listing page is logged and skipped; discovery never errors.

use tourdb_core::SiteConfig;

use crate::browser::{RawAnchor, Renderer};
use crate::client::{resolve_url, PageClient};
use crate::session::{DiscoveryTier, ScrapeSession};
use crate::strategy::{element_text, select_within, Page};

/// Path fragments that mark an individual tour page.
pub const TOUR_PATH_SEGMENTS: [&str; 7] = [
    "/tour/",
    "/package/",
    "/trip/",
    "/destination/",
    "/holiday/",
    "/trek/",
    "/adventure/",
];

/// Link-text stems that mark a tour link.
pub const LINK_KEYWORDS: [&str; 6] = ["day", "tour", "trek", "package", "trip", "adventure"];

/// Decides which anchors point at tour pages.
#[derive(Debug, Clone)]
pub struct LinkClassifier {
    base: String,
    keywords: Vec<String>,
}

impl LinkClassifier {
    #[must_use]
    pub fn new(site: &SiteConfig) -> Self {
        let keywords = LINK_KEYWORDS
            .iter()
            .map(|k| (*k).to_owned())
            .chain(
                site.destinations
                    .iter()
                    .map(|d| d.trim().to_lowercase())
                    .filter(|d| !d.is_empty()),
            )
            .collect();
        Self {
            base: site.base().to_owned(),
            keywords,
        }
    }

    /// The resolved URL when `anchor` looks like a tour link, else `None`.
    ///
    /// Links with a fragment or pointing at a PDF are never candidates.
    #[must_use]
    pub fn classify(&self, anchor: &RawAnchor, tier: DiscoveryTier) -> Option<String> {
        let url = resolve_url(&self.base, &anchor.href)?;
        if url.contains('#') || url.to_ascii_lowercase().ends_with(".pdf") {
            return None;
        }

        let lower_url = url.to_ascii_lowercase();
        let path_match = TOUR_PATH_SEGMENTS.iter().any(|seg| lower_url.contains(seg));
        let text = anchor.text.to_lowercase();
        let keyword_match = self.keywords.iter().any(|k| text.contains(k.as_str()));
        let image_match = tier == DiscoveryTier::Static && anchor.has_image;

        (path_match || keyword_match || image_match).then_some(url)
    }
}

/// Runs both discovery tiers over every listing page and records candidates
/// in `session`. The renderer, if any, is shut down before returning.
///
/// Returns the number of distinct candidates in the session afterwards.
pub async fn discover(
    site: &SiteConfig,
    client: &PageClient,
    renderer: Option<Box<dyn Renderer>>,
    session: &mut ScrapeSession,
) -> usize {
    let classifier = LinkClassifier::new(site);
    let listing_urls = site.listing_urls();

    if let Some(mut renderer) = renderer {
        let added = discover_rendered(renderer.as_mut(), &listing_urls, &classifier, session).await;
        tracing::info!(added, "rendered discovery finished");
        if let Err(e) = renderer.shutdown().await {
            tracing::warn!(error = %e, "failed to shut down renderer cleanly");
        }
    } else {
        tracing::info!("no renderer available; skipping rendered discovery");
    }

    let added = discover_static(client, &listing_urls, &classifier, session).await;
    tracing::info!(added, "static discovery finished");

    let total = session.candidates().len();
    if total == 0 {
        tracing::warn!("discovery found no tour candidates");
    }
    total
}

/// Tier A: anchors from the rendered DOM. Returns how many new candidates
/// were added.
pub async fn discover_rendered(
    renderer: &mut dyn Renderer,
    listing_urls: &[String],
    classifier: &LinkClassifier,
    session: &mut ScrapeSession,
) -> usize {
    let mut added = 0;
    for listing_url in listing_urls {
        let anchors = match renderer.collect_anchors(listing_url).await {
            Ok(anchors) => anchors,
            Err(e) => {
                tracing::warn!(url = %listing_url, error = %e, "rendered listing page failed; skipping");
                continue;
            }
        };
        added += record(&anchors, DiscoveryTier::Rendered, classifier, session);
    }
    added
}

/// Tier B: anchors from the static HTML. Returns how many new candidates
/// were added.
pub async fn discover_static(
    client: &PageClient,
    listing_urls: &[String],
    classifier: &LinkClassifier,
    session: &mut ScrapeSession,
) -> usize {
    let mut added = 0;
    for listing_url in listing_urls {
        let html = match client.fetch_html(listing_url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(url = %listing_url, error = %e, "static listing page failed; skipping");
                continue;
            }
        };
        let anchors = anchors_from_html(&html);
        added += record(&anchors, DiscoveryTier::Static, classifier, session);
    }
    added
}

/// Every `<a href>` in a static document.
#[must_use]
pub fn anchors_from_html(html: &str) -> Vec<RawAnchor> {
    let page = Page::parse(html);
    page.select_all("a[href]")
        .into_iter()
        .filter_map(|a| {
            let href = a.value().attr("href")?.trim().to_owned();
            Some(RawAnchor {
                href,
                text: element_text(a),
                has_image: !select_within(a, "img").is_empty(),
            })
        })
        .collect()
}

fn record(
    anchors: &[RawAnchor],
    tier: DiscoveryTier,
    classifier: &LinkClassifier,
    session: &mut ScrapeSession,
) -> usize {
    anchors
        .iter()
        .filter_map(|anchor| classifier.classify(anchor, tier))
        .filter(|url| session.add_candidate(url.clone(), tier))
        .count()
}
