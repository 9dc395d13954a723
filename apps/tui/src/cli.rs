use crate::domain::MapMetric;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "taxi_dashboard", version, about = "NYC taxi trip dashboard")]
pub struct CliArgs {
    /// Load once, print a report and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the statistics API base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the log file path
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,

    /// Initial map metric
    #[arg(long, value_enum, value_name = "METRIC")]
    pub metric: Option<MapMetric>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var("DASHBOARD_API_URL", url);
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("DASHBOARD_LOG_FILE", path);
        }
        if let Some(metric) = self.metric {
            std::env::set_var("DASHBOARD_MAP_METRIC", metric.as_str());
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    /// Headless when asked for, or when a JSON report is requested.
    pub const fn wants_headless(&self) -> bool {
        self.headless || self.json
    }
}
