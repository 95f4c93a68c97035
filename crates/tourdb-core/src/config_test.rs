use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.site_path, PathBuf::from("./config/site.yaml"));
    assert_eq!(cfg.output_path, PathBuf::from("./data/scraped-tours.json"));
    assert_eq!(cfg.scraper_request_timeout_secs, 30);
    assert_eq!(cfg.scraper_retry_timeout_secs, 45);
    assert_eq!(cfg.scraper_user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.scraper_inter_request_delay_ms, 1000);
    assert!(cfg.browser_enabled);
    assert_eq!(cfg.browser_settle_ms, 1500);
    assert!(cfg.chromium_path.is_none());
}

#[test]
fn scraper_request_timeout_secs_override() {
    let mut map = HashMap::new();
    map.insert("TOURDB_SCRAPER_REQUEST_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper_request_timeout_secs, 60);
}

#[test]
fn scraper_request_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("TOURDB_SCRAPER_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TOURDB_SCRAPER_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(TOURDB_SCRAPER_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn inter_request_delay_override() {
    let mut map = HashMap::new();
    map.insert("TOURDB_SCRAPER_INTER_REQUEST_DELAY_MS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper_inter_request_delay_ms, 0);
}

#[test]
fn browser_enabled_accepts_common_spellings() {
    for (raw, expected) in [("false", false), ("0", false), ("YES", true), ("on", true)] {
        let mut map = HashMap::new();
        map.insert("TOURDB_BROWSER_ENABLED", raw);
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.browser_enabled, expected, "raw value {raw}");
    }
}

#[test]
fn browser_enabled_rejects_garbage() {
    let mut map = HashMap::new();
    map.insert("TOURDB_BROWSER_ENABLED", "maybe");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TOURDB_BROWSER_ENABLED"),
        "got: {result:?}"
    );
}

#[test]
fn blank_chromium_path_is_ignored() {
    let mut map = HashMap::new();
    map.insert("TOURDB_CHROMIUM_PATH", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.chromium_path.is_none());

    map.insert("TOURDB_CHROMIUM_PATH", "/opt/chrome/chrome");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.chromium_path, Some(PathBuf::from("/opt/chrome/chrome")));
}
