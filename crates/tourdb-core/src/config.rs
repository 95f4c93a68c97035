use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Desktop Chrome UA; the target site serves reduced markup to unknown agents.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so parsing can be tested with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match lookup(var) {
            Err(_) => Ok(default),
            Ok(raw) => parse_flag(&raw).ok_or_else(|| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected true/false, got \"{raw}\""),
            }),
        }
    };

    let log_level = or_default("TOURDB_LOG_LEVEL", "info");
    let site_path = PathBuf::from(or_default("TOURDB_SITE_PATH", "./config/site.yaml"));
    let output_path = PathBuf::from(or_default(
        "TOURDB_OUTPUT_PATH",
        "./data/scraped-tours.json",
    ));

    let scraper_request_timeout_secs = parse_u64("TOURDB_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    let scraper_retry_timeout_secs = parse_u64("TOURDB_SCRAPER_RETRY_TIMEOUT_SECS", "45")?;
    let scraper_user_agent = or_default("TOURDB_SCRAPER_USER_AGENT", DEFAULT_USER_AGENT);
    let scraper_inter_request_delay_ms =
        parse_u64("TOURDB_SCRAPER_INTER_REQUEST_DELAY_MS", "1000")?;

    let browser_enabled = parse_bool("TOURDB_BROWSER_ENABLED", true)?;
    let browser_settle_ms = parse_u64("TOURDB_BROWSER_SETTLE_MS", "1500")?;
    let chromium_path = lookup("TOURDB_CHROMIUM_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        log_level,
        site_path,
        output_path,
        scraper_request_timeout_secs,
        scraper_retry_timeout_secs,
        scraper_user_agent,
        scraper_inter_request_delay_ms,
        browser_enabled,
        browser_settle_ms,
        chromium_path,
    })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
