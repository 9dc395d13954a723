use clap::Parser;
use color_eyre::Result;
use taxi_dashboard::api::ApiClient;
use taxi_dashboard::app::App;
use taxi_dashboard::cli::CliArgs;
use taxi_dashboard::config::init_app_config;
use taxi_dashboard::logging::init_logging;
use taxi_dashboard::{event, terminal};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = init_app_config()?;
    let headless = args.wants_headless() || !is_terminal();
    let _log_guard = init_logging(&config, headless)?;
    info!(api = %config.api_url, headless, "starting taxi dashboard");

    let client = ApiClient::new(config.api_url.clone());
    let mut app = App::new(config.api_url.clone(), config.initial_metric);

    if headless {
        return event::run_headless(&mut app, &client, args.json).await;
    }

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app, client, config.tick).await;
    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
