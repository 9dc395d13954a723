use crate::config::DashboardConfig;
use color_eyre::eyre::{eyre, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "taxi_dashboard=debug,info"
    } else {
        "taxi_dashboard=info,warn"
    }
}

/// JSON logs go to a daily-rolling file so they never draw over the TUI.
/// Headless runs also mirror warnings to stderr.
pub fn init_logging(config: &DashboardConfig, headless: bool) -> Result<WorkerGuard> {
    let path = config.log_file.as_path();
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| eyre!("log file path has no file name: {}", path.display()))?;

    std::fs::create_dir_all(directory)?;
    let appender = tracing_appender::rolling::daily(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(config.debug)));

    let file_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_writer(writer);

    let stderr_layer = headless.then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr.with_max_level(tracing::Level::WARN))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| eyre!("failed to install tracing subscriber: {e}"))?;

    Ok(guard)
}
