#[allow(clippy::module_inception)]
mod config;

pub use config::{
    config_from, init_app_config, validate_api_url, DashboardConfig, DEFAULT_API_URL,
    DEFAULT_LOG_FILE, DEFAULT_TICK_MS,
};
