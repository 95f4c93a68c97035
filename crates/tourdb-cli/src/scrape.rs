//! Handler for `tourdb-cli scrape`.
//!
//! Config and output-write failures are fatal. Anything that goes wrong
//! per page or per listing is handled inside the scraper and only shows up
//! in the logs and the summary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Serialize;
use tourdb_core::AppConfig;
use tourdb_scraper::{BatchOptions, ChromiumRenderer, PageClient, Renderer, ScrapeSession};

#[derive(Debug, Clone, Default)]
pub(crate) struct ScrapeArgs {
    pub(crate) site: Option<PathBuf>,
    pub(crate) output: Option<PathBuf>,
    pub(crate) no_browser: bool,
    pub(crate) limit: Option<usize>,
    pub(crate) dry_run: bool,
    pub(crate) raw_output: Option<PathBuf>,
}

/// Run discovery and, unless `dry_run`, extraction, cleaning and output.
///
/// # Errors
///
/// Returns an error if the site config cannot be loaded, the HTTP client
/// cannot be built, or an output file cannot be written.
pub(crate) async fn run_scrape(config: &AppConfig, args: ScrapeArgs) -> anyhow::Result<()> {
    let site_path = args.site.unwrap_or_else(|| config.site_path.clone());
    let site = tourdb_core::load_site_config(&site_path)
        .with_context(|| format!("failed to load site config from {}", site_path.display()))?;

    let client = PageClient::new(
        config.scraper_request_timeout_secs,
        config.scraper_retry_timeout_secs,
        &config.scraper_user_agent,
    )
    .context("failed to build HTTP client")?;

    let renderer = if config.browser_enabled && !args.no_browser {
        launch_renderer(config).await
    } else {
        tracing::info!("browser disabled; rendered discovery tier will be skipped");
        None
    };

    if args.dry_run {
        let mut session = ScrapeSession::new();
        let total = tourdb_scraper::discover(&site, &client, renderer, &mut session).await;
        println!("dry-run: discovered {total} tour candidates");
        for candidate in session.candidates() {
            println!("  {} ({:?})", candidate.url, candidate.tier);
        }
        return Ok(());
    }

    let options = BatchOptions {
        inter_request_delay: Duration::from_millis(config.scraper_inter_request_delay_ms),
        limit: args.limit,
    };
    let report = tourdb_scraper::run_batch(&site, &client, renderer, &options).await;

    let output = args.output.unwrap_or_else(|| config.output_path.clone());
    write_json(&output, &report.cleaned)?;
    tracing::info!(path = %output.display(), tours = report.cleaned.len(), "wrote cleaned tours");

    if let Some(raw_path) = args.raw_output {
        write_json(&raw_path, &report.raw)?;
        tracing::info!(path = %raw_path.display(), records = report.raw.len(), "wrote raw records");
    }

    let summary = report.summary;
    println!(
        "scrape complete: {} candidates, {} extracted, {} failed, {} written to {}",
        summary.candidates,
        summary.extracted,
        summary.failed,
        summary.kept,
        output.display()
    );
    Ok(())
}

/// A launched browser, or `None` after logging why it could not start.
async fn launch_renderer(config: &AppConfig) -> Option<Box<dyn Renderer>> {
    match ChromiumRenderer::launch(
        config.chromium_path.as_deref(),
        Duration::from_secs(config.scraper_request_timeout_secs),
        Duration::from_millis(config.browser_settle_ms),
    )
    .await
    {
        Ok(renderer) => Some(Box::new(renderer)),
        Err(e) => {
            tracing::warn!(error = %e, "browser unavailable; rendered discovery tier will be skipped");
            None
        }
    }
}

/// Pretty JSON to `path`, creating parent directories as needed.
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
