use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::ConfigError;

/// Describes the site being scraped: where to start and how to label what is found.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Origin all relative links and assets are resolved against.
    pub base_url: String,
    /// Listing pages that seed discovery, relative to `base_url` or absolute.
    pub listing_paths: Vec<String>,
    /// Brand names stripped from the end of `<title>` / `og:title` values.
    #[serde(default)]
    pub site_name_suffixes: Vec<String>,
    /// Destination names, used both as discovery link keywords and as the
    /// title keyword fallback for a tour's destination.
    #[serde(default)]
    pub destinations: Vec<String>,
    pub default_destination: String,
    /// Day count given to cleaned tours whose duration text has none.
    #[serde(default = "default_duration_days")]
    pub default_duration_days: u32,
}

fn default_duration_days() -> u32 {
    1
}

impl SiteConfig {
    /// Base URL without a trailing slash; links and listing paths resolve
    /// against it.
    #[must_use]
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Absolute listing-page URLs, joined to the origin with a single `/`.
    #[must_use]
    pub fn listing_urls(&self) -> Vec<String> {
        self.listing_paths
            .iter()
            .map(|path| {
                if path.starts_with("http://") || path.starts_with("https://") {
                    path.clone()
                } else {
                    format!("{}/{}", self.base(), path.trim_start_matches('/'))
                }
            })
            .collect()
    }
}

/// Load and validate the site configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_site_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SiteFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let site: SiteConfig = serde_yaml::from_str(&content)?;
    validate_site(&site)?;

    Ok(site)
}

fn validate_site(site: &SiteConfig) -> Result<(), ConfigError> {
    let invalid_base = |reason: &str| {
        ConfigError::Validation(format!(
            "base_url '{}' must be an absolute http(s) URL: {reason}",
            site.base_url
        ))
    };
    let base = Url::parse(site.base_url.trim()).map_err(|e| invalid_base(&e.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid_base("unsupported scheme"));
    }
    if base.host_str().is_none_or(str::is_empty) {
        return Err(invalid_base("missing host"));
    }

    if site.listing_paths.is_empty() {
        return Err(ConfigError::Validation(
            "at least one listing path is required".to_string(),
        ));
    }

    if site.default_destination.trim().is_empty() {
        return Err(ConfigError::Validation(
            "default_destination must be non-empty".to_string(),
        ));
    }

    if site.default_duration_days == 0 {
        return Err(ConfigError::Validation(
            "default_duration_days must be at least 1".to_string(),
        ));
    }

    Ok(())
}
