//! Tour discovery, extraction and cleaning for a single operator website.

pub mod browser;
pub mod clean;
pub mod client;
pub mod discovery;
pub mod error;
pub mod extract;
pub(crate) mod parse;
pub mod pipeline;
pub mod session;
pub(crate) mod strategy;
pub(crate) mod throttle;

pub use browser::{ChromiumRenderer, RawAnchor, Renderer};
pub use clean::{clean_tours, display_price, infer_category};
pub use client::{HeaderProfile, PageClient};
pub use discovery::{discover, LinkClassifier};
pub use error::ScraperError;
pub use extract::{extract_tour, recovery_record};
pub use pipeline::{
    extract_all, run_batch, scrape_tour, BatchOptions, BatchReport, BatchSummary,
};
pub use session::{DiscoveryTier, ScrapeSession, TourCandidateUrl};
