//! State carried through one scrape run.

use std::collections::HashSet;

use tourdb_core::ExtractedTour;

use crate::client::is_absolute_http;

/// Which discovery tier found a candidate URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryTier {
    /// Anchors read from the browser-rendered DOM.
    Rendered,
    /// Anchors parsed from the raw HTTP response.
    Static,
}

/// A URL judged likely to be an individual tour page, with provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourCandidateUrl {
    pub url: String,
    pub tier: DiscoveryTier,
}

/// Dedup set, discovered candidates and accumulated records for one run.
#[derive(Debug, Default)]
pub struct ScrapeSession {
    seen: HashSet<String>,
    candidates: Vec<TourCandidateUrl>,
    results: Vec<ExtractedTour>,
}

impl ScrapeSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a candidate unless the exact string was already seen or it is
    /// not an absolute `http(s)` URL. Returns `true` when it was added.
    pub fn add_candidate(&mut self, url: String, tier: DiscoveryTier) -> bool {
        if !is_absolute_http(&url) || self.seen.contains(&url) {
            return false;
        }
        self.seen.insert(url.clone());
        self.candidates.push(TourCandidateUrl { url, tier });
        true
    }

    #[must_use]
    pub fn candidates(&self) -> &[TourCandidateUrl] {
        &self.candidates
    }

    /// Candidate URLs in discovery order.
    #[must_use]
    pub fn candidate_urls(&self) -> Vec<String> {
        self.candidates.iter().map(|c| c.url.clone()).collect()
    }

    pub fn push_result(&mut self, tour: ExtractedTour) {
        self.results.push(tour);
    }

    #[must_use]
    pub fn into_results(self) -> Vec<ExtractedTour> {
        self.results
    }
}
