//! Per-page fetch with one retry, and the sequential batch over all
//! discovered candidates.

use std::time::Duration;

use tourdb_core::{CleanedTour, ExtractedTour, SiteConfig};

use crate::browser::Renderer;
use crate::clean::clean_tours;
use crate::client::{is_usable_html, HeaderProfile, PageClient};
use crate::discovery::discover;
use crate::error::ScraperError;
use crate::extract::{extract_tour, recovery_record};
use crate::session::ScrapeSession;
use crate::throttle::Throttle;

/// Result of one fetch attempt: a usable body, or the reason it was not
/// usable together with whatever body came back.
enum Attempt {
    Usable(String),
    Failed {
        reason: String,
        partial: Option<String>,
    },
}

async fn attempt(client: &PageClient, url: &str, profile: HeaderProfile) -> Attempt {
    match client.fetch_with_profile(url, profile).await {
        Ok(body) if is_usable_html(&body) => Attempt::Usable(body),
        Ok(body) => Attempt::Failed {
            reason: ScraperError::SparseHtml {
                url: url.to_owned(),
                len: body.trim().len(),
            }
            .to_string(),
            partial: Some(body),
        },
        Err(e) => Attempt::Failed {
            reason: e.to_string(),
            partial: None,
        },
    }
}

/// Fetches and extracts one tour page. Never fails: a page whose primary
/// fetch and single retry both fail comes back as an error record.
pub async fn scrape_tour(client: &PageClient, url: &str, site: &SiteConfig) -> ExtractedTour {
    let primary_partial = match attempt(client, url, HeaderProfile::Primary).await {
        Attempt::Usable(html) => return extract_tour(&html, url, site),
        Attempt::Failed { reason, partial } => {
            tracing::warn!(url, error = %reason, "primary fetch failed; retrying with alternate headers");
            partial
        }
    };

    match attempt(client, url, HeaderProfile::Alternate).await {
        Attempt::Usable(html) => {
            tracing::info!(url, "retry succeeded");
            extract_tour(&html, url, site)
        }
        Attempt::Failed { reason, partial } => {
            tracing::error!(url, error = %reason, "retry failed; recording error");
            let partial = longest(partial, primary_partial);
            recovery_record(url, partial.as_deref(), site, reason)
        }
    }
}

fn longest(a: Option<String>, b: Option<String>) -> Option<String> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if b.trim().len() > a.trim().len() { b } else { a }),
        (a, b) => a.or(b),
    }
}

/// Extracts every candidate in `session`, strictly one page at a time, with
/// `delay` between requests. Records are pushed onto the session in
/// candidate order.
pub async fn extract_all(
    client: &PageClient,
    session: &mut ScrapeSession,
    site: &SiteConfig,
    delay: Duration,
    limit: Option<usize>,
) {
    let urls = session.candidate_urls();
    let total = limit.map_or(urls.len(), |n| n.min(urls.len()));
    let mut throttle = Throttle::new(delay);

    for (index, url) in urls.into_iter().take(total).enumerate() {
        throttle.pace().await;
        tracing::info!(url = %url, page = index + 1, total, "extracting tour page");
        let tour = scrape_tour(client, &url, site).await;
        session.push_result(tour);
    }
}

/// Knobs for [`run_batch`].
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub inter_request_delay: Duration,
    /// Cap on pages extracted; `None` extracts every candidate.
    pub limit: Option<usize>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            inter_request_delay: Duration::from_millis(1000),
            limit: None,
        }
    }
}

/// Counts logged at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub candidates: usize,
    pub extracted: usize,
    pub failed: usize,
    pub kept: usize,
}

/// Everything a run produced.
#[derive(Debug)]
pub struct BatchReport {
    /// Every record in extraction order, error records included.
    pub raw: Vec<ExtractedTour>,
    /// Cleaned records with errors dropped.
    pub cleaned: Vec<CleanedTour>,
    pub summary: BatchSummary,
}

/// Discovery, sequential extraction and cleaning for one site.
pub async fn run_batch(
    site: &SiteConfig,
    client: &PageClient,
    renderer: Option<Box<dyn Renderer>>,
    options: &BatchOptions,
) -> BatchReport {
    let mut session = ScrapeSession::new();
    let candidates = discover(site, client, renderer, &mut session).await;

    extract_all(
        client,
        &mut session,
        site,
        options.inter_request_delay,
        options.limit,
    )
    .await;

    let raw = session.into_results();
    let failed = raw.iter().filter(|t| t.is_error()).count();
    let cleaned = clean_tours(raw.clone(), site);
    let summary = BatchSummary {
        candidates,
        extracted: raw.len(),
        failed,
        kept: cleaned.len(),
    };

    tracing::info!(
        candidates = summary.candidates,
        extracted = summary.extracted,
        failed = summary.failed,
        kept = summary.kept,
        "batch finished"
    );

    BatchReport {
        raw,
        cleaned,
        summary,
    }
}
