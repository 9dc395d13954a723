use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use serde::Serialize;
use std::io::Stdout;
use std::time::Duration;
use tokio::sync::oneshot::error::TryRecvError;
use tracing::{error, info};

use crate::api::ApiClient;
use crate::app::loader::{apply_chart_defaults, complete_load, load_dashboard, spawn_load};
use crate::app::{handle_input, handle_mouse, App, DashboardState, LoadFailure};
use crate::ui;
use crate::ui::screens::loading::failure_hint;
use crate::view::ChartSlot;

/// Run the dashboard without a terminal UI: load once, print a report, exit.
pub async fn run_headless(app: &mut App, client: &ApiClient, json: bool) -> Result<()> {
    load_dashboard(app, client).await;

    if let Some(failure) = app.loading.failure() {
        return Err(eyre!("{}\n{}", failure_hint(failure), failure.message));
    }

    let report = HeadlessReport::from_state(&app.store, &app.api_url);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &HeadlessReport) {
    println!("\nNYC Taxi Trip Dashboard");
    println!("=======================");
    println!("API: {}", report.api_url);

    if let Some(kpis) = &report.kpis {
        println!("\nSummary:");
        for (title, value) in kpis {
            println!("- {title}: {value}");
        }
    }

    for chart in &report.charts {
        println!("\n{}:", chart.title);
        for (label, value) in &chart.items {
            println!("- {label}: {value}");
        }
    }

    if let Some(map) = &report.map {
        println!("\nMap ({}): {} zones", map.metric, map.zones);
        println!("Legend: {}", map.legend.join(" | "));
    }

    if !report.top_routes.is_empty() {
        println!("\nTop Routes:");
        for route in &report.top_routes {
            println!(
                "{:>2}. {} -> {} | {} trips",
                route.rank, route.pickup_zone, route.dropoff_zone, route.trips
            );
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HeadlessReport {
    pub api_url: String,
    pub kpis: Option<Vec<(String, String)>>,
    pub charts: Vec<HeadlessChart>,
    pub map: Option<HeadlessMap>,
    pub top_routes: Vec<HeadlessRoute>,
}

#[derive(Debug, Serialize)]
pub struct HeadlessChart {
    pub title: String,
    pub items: Vec<(String, String)>,
}

#[derive(Debug, Serialize)]
pub struct HeadlessMap {
    pub metric: String,
    pub zones: usize,
    pub max_value: f64,
    pub legend: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HeadlessRoute {
    pub rank: usize,
    pub pickup_zone: String,
    pub dropoff_zone: String,
    pub trips: String,
}

impl HeadlessReport {
    pub fn from_state(state: &DashboardState, api_url: &str) -> Self {
        let kpis = state.kpis.as_ref().map(|kpis| {
            kpis.cards()
                .iter()
                .map(|(title, value)| ((*title).to_string(), (*value).to_string()))
                .collect()
        });

        let charts = ChartSlot::ALL
            .iter()
            .filter_map(|slot| state.charts.get(*slot))
            .map(|view| HeadlessChart {
                title: view.slot.title().to_string(),
                items: (0..view.len())
                    .filter_map(|index| Some((view.label_at(index)?, view.tooltip_at(index)?)))
                    .collect(),
            })
            .collect();

        let map = state.map.as_ref().and_then(|map| {
            let layer = map.zone_layer.as_ref()?;
            Some(HeadlessMap {
                metric: layer.metric.option_label().to_string(),
                zones: layer.zones.len(),
                max_value: layer.max_value,
                legend: map
                    .legend
                    .iter()
                    .flat_map(|legend| legend.entries.iter().map(|entry| entry.label.clone()))
                    .collect(),
            })
        });

        let top_routes = state
            .routes
            .iter()
            .flat_map(|table| table.rows.iter())
            .map(|row| HeadlessRoute {
                rank: row.rank,
                pickup_zone: row.pickup_zone.clone(),
                dropoff_zone: row.dropoff_zone.clone(),
                trips: row.trips.clone(),
            })
            .collect();

        Self {
            api_url: api_url.to_string(),
            kpis,
            charts,
            map,
            top_routes,
        }
    }
}

/// Run the main application event loop
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    client: ApiClient,
    tick: Duration,
) -> Result<()> {
    apply_chart_defaults(&mut app.store);
    info!(api = %client.base_url(), "loading dashboard data");
    let mut pending = Some(spawn_load(client));

    while app.running {
        if let Some(receiver) = pending.as_mut() {
            match receiver.try_recv() {
                Ok(result) => {
                    complete_load(app, result);
                    pending = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Closed) => {
                    error!("load task ended without a result");
                    app.loading.fail(LoadFailure {
                        endpoint: None,
                        message: "data load stopped unexpectedly".to_string(),
                        api_url: app.api_url.clone(),
                    });
                    pending = None;
                }
            }
        }

        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(eyre!("Terminal draw error: {e}"));
        }

        if !event::poll(tick)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_input(app, key.code),
            Event::Mouse(mouse) => {
                let size = terminal.size()?;
                handle_mouse(app, mouse, Rect::new(0, 0, size.width, size.height));
            }
            // resize redraws on the next iteration
            _ => {}
        }
    }

    info!("dashboard closed");
    Ok(())
}
