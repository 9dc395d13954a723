use crate::domain::MapMetric;
use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_LOG_FILE: &str = "logs/taxi_dashboard.log";
pub const DEFAULT_TICK_MS: u64 = 50;

/// Runtime settings, resolved from `.env`, the environment and CLI overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub api_url: String,
    pub log_file: PathBuf,
    pub tick: Duration,
    pub initial_metric: MapMetric,
    pub debug: bool,
}

/// Loads `.env` (if present) and reads the `DASHBOARD_*` variables.
pub fn init_app_config() -> Result<DashboardConfig> {
    dotenv().ok();
    config_from(|key| env::var(key).ok())
}

/// Builds the config from any variable lookup; missing keys fall back to
/// their defaults.
pub fn config_from(lookup: impl Fn(&str) -> Option<String>) -> Result<DashboardConfig> {
    let api_url = lookup("DASHBOARD_API_URL")
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let api_url = validate_api_url(&api_url)?;

    let log_file = lookup("DASHBOARD_LOG_FILE")
        .filter(|value| !value.trim().is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from);

    let tick_ms = match lookup("DASHBOARD_TICK_MS") {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|ms| *ms > 0)
            .ok_or_else(|| eyre!("DASHBOARD_TICK_MS must be a positive integer, got {value:?}"))?,
        None => DEFAULT_TICK_MS,
    };

    let initial_metric = match lookup("DASHBOARD_MAP_METRIC") {
        Some(value) => MapMetric::parse(&value)
            .ok_or_else(|| eyre!("unknown DASHBOARD_MAP_METRIC {value:?}"))?,
        None => MapMetric::default(),
    };

    let debug = lookup("DEBUG").is_some_and(|value| matches!(value.as_str(), "1" | "true"));

    Ok(DashboardConfig {
        api_url,
        log_file,
        tick: Duration::from_millis(tick_ms),
        initial_metric,
        debug,
    })
}

/// Accepts http(s) URLs and strips any trailing slash.
pub fn validate_api_url(url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');
    let host = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .ok_or_else(|| eyre!("API URL must start with http:// or https://, got {url:?}"))?;
    if host.is_empty() {
        return Err(eyre!("API URL has no host: {url:?}"));
    }
    Ok(url.to_string())
}
