use std::path::PathBuf;

/// Runtime settings for a scrape run, read from `TOURDB_*` environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub site_path: PathBuf,
    pub output_path: PathBuf,
    pub scraper_request_timeout_secs: u64,
    /// Timeout for the single alternate-header retry of a tour page.
    pub scraper_retry_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub scraper_inter_request_delay_ms: u64,
    pub browser_enabled: bool,
    /// Pause after navigation so client-side rendering can finish.
    pub browser_settle_ms: u64,
    pub chromium_path: Option<PathBuf>,
}
