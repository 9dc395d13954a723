mod support;

use std::time::{Duration, Instant};
use support::{closed_port_url, dashboard_routes, serve, serve_with_delays, Delays};
use taxi_dashboard::api::ApiClient;
use taxi_dashboard::app::loader::{load_dashboard, on_map_metric_change};
use taxi_dashboard::app::App;
use taxi_dashboard::event::run_headless;
use taxi_dashboard::view::{render_all, ChartSlot};
use taxi_dashboard::{Endpoint, MapMetric};

#[tokio::test]
async fn failed_summary_shows_only_the_error() -> Result<(), Box<dyn std::error::Error>> {
    let mut routes = dashboard_routes();
    routes.insert(
        "/api/summary".to_string(),
        (500, r#"{"error": "database is locked"}"#.to_string()),
    );
    let stub = serve(routes).await?;
    let client = ApiClient::new(&stub.base_url);
    let mut app = App::new(stub.base_url.clone(), MapMetric::Count);

    load_dashboard(&mut app, &client).await;

    assert!(!app.loading.reveals_dashboard());
    assert!(!app.store.has_rendered());
    assert!(app.store.map.is_none());
    assert_eq!(app.store.charts.live_count(), 0);

    let failure = app.loading.failure().ok_or("expected the error panel")?;
    assert_eq!(failure.endpoint, Some(Endpoint::Summary));
    assert!(failure.message.contains("/api/summary"));
    assert_eq!(failure.api_url, stub.base_url);
    Ok(())
}

#[tokio::test]
async fn first_failure_does_not_wait_for_slow_endpoints() -> Result<(), Box<dyn std::error::Error>> {
    let mut routes = dashboard_routes();
    routes.insert("/api/summary".to_string(), (500, "{}".to_string()));
    let delays = Delays::from([("/api/geojson".to_string(), Duration::from_secs(60))]);
    let stub = serve_with_delays(routes, delays).await?;
    let client = ApiClient::new(&stub.base_url);
    let mut app = App::new(stub.base_url.clone(), MapMetric::Count);

    let started = Instant::now();
    tokio::time::timeout(Duration::from_secs(10), load_dashboard(&mut app, &client)).await?;

    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(!app.store.has_rendered());
    let failure = app.loading.failure().ok_or("expected the error panel")?;
    assert_eq!(failure.endpoint, Some(Endpoint::Summary));
    Ok(())
}

#[tokio::test]
async fn null_series_skips_only_its_own_view() -> Result<(), Box<dyn std::error::Error>> {
    let mut routes = dashboard_routes();
    routes.insert("/api/summary".to_string(), (200, "null".to_string()));
    routes.insert("/api/top-routes".to_string(), (200, "null".to_string()));
    let stub = serve(routes).await?;
    let client = ApiClient::new(&stub.base_url);
    let mut app = App::new(stub.base_url.clone(), MapMetric::Count);

    load_dashboard(&mut app, &client).await;

    assert!(app.loading.failure().is_none());
    assert!(app.loading.reveals_dashboard());
    assert!(app.store.summary.is_none());
    assert!(app.store.kpis.is_none());
    assert!(app.store.routes.is_none());
    assert_eq!(app.store.charts.live_count(), ChartSlot::ALL.len());
    assert!(app.store.map.is_some());
    Ok(())
}

#[tokio::test]
async fn render_all_twice_keeps_one_view_each() -> Result<(), Box<dyn std::error::Error>> {
    let stub = serve(dashboard_routes()).await?;
    let client = ApiClient::new(&stub.base_url);
    let mut app = App::new(stub.base_url.clone(), MapMetric::Count);
    load_dashboard(&mut app, &client).await;

    let map = app.store.map.as_ref().ok_or("map missing")?;
    let first_layer = map.zone_layer.as_ref().ok_or("layer missing")?.id;
    let legend_id = map.legend.as_ref().ok_or("legend missing")?.id;

    render_all(&mut app.store);
    render_all(&mut app.store);

    assert_eq!(app.store.charts.live_count(), ChartSlot::ALL.len());
    let map = app.store.map.as_ref().ok_or("map missing")?;
    let layer = map.zone_layer.as_ref().ok_or("layer missing")?;
    assert_ne!(layer.id, first_layer);
    assert_eq!(layer.zones.len(), 2);
    assert_eq!(map.legend.as_ref().ok_or("legend missing")?.id, legend_id);
    assert_eq!(app.store.routes.as_ref().ok_or("routes missing")?.rows.len(), 2);
    Ok(())
}

#[tokio::test]
async fn successful_load_reveals_every_view() -> Result<(), Box<dyn std::error::Error>> {
    let stub = serve(dashboard_routes()).await?;
    let client = ApiClient::new(&stub.base_url);
    let mut app = App::new(stub.base_url.clone(), MapMetric::Count);

    load_dashboard(&mut app, &client).await;

    assert!(app.loading.reveals_dashboard());
    assert!(app.store.theme.is_some());
    assert!(app.store.metric_selector_bound);

    let kpis = app.store.kpis.as_ref().ok_or("kpis missing")?;
    assert_eq!(kpis.total_trips, "2,964,624");
    assert_eq!(kpis.avg_fare, "$18.17");
    assert_eq!(kpis.avg_distance, "3.65 mi");
    assert_eq!(kpis.avg_duration, "15.6 min");

    assert_eq!(app.store.charts.live_count(), ChartSlot::ALL.len());
    let routes = app.store.routes.as_ref().ok_or("routes missing")?;
    assert_eq!(routes.rows[0].bar_percent, 100);
    assert_eq!(routes.rows[1].bar_percent, 33);
    Ok(())
}

#[tokio::test]
async fn metric_changes_keep_one_layer_and_one_legend() -> Result<(), Box<dyn std::error::Error>> {
    let stub = serve(dashboard_routes()).await?;
    let client = ApiClient::new(&stub.base_url);
    let mut app = App::new(stub.base_url.clone(), MapMetric::Count);
    load_dashboard(&mut app, &client).await;

    let first = app.store.map.as_ref().ok_or("map missing")?;
    let first_layer = first.zone_layer.as_ref().ok_or("layer missing")?.id;
    let legend_id = first.legend.as_ref().ok_or("legend missing")?.id;

    assert!(on_map_metric_change(&mut app.store, MapMetric::Fare));
    assert!(on_map_metric_change(&mut app.store, MapMetric::Fare));

    let map = app.store.map.as_ref().ok_or("map missing")?;
    let layer = map.zone_layer.as_ref().ok_or("layer missing")?;
    let legend = map.legend.as_ref().ok_or("legend missing")?;
    assert_ne!(layer.id, first_layer);
    assert_eq!(legend.id, legend_id);
    assert_eq!(legend.title, "Avg Fare ($)");
    assert_eq!(legend.entries.len(), 5);
    assert_eq!(legend.entries[4].label, "$30");
    assert_eq!(layer.zones.len(), 2);
    Ok(())
}

#[tokio::test]
async fn headless_run_fails_when_the_api_is_down() -> Result<(), Box<dyn std::error::Error>> {
    let api_url = closed_port_url().await?;
    let client = ApiClient::new(&api_url);
    let mut app = App::new(api_url.clone(), MapMetric::Count);

    let error = run_headless(&mut app, &client, true)
        .await
        .err()
        .ok_or("expected the headless run to fail")?;

    let text = error.to_string();
    assert!(text.contains("Error loading data."));
    assert!(text.contains(&api_url));
    Ok(())
}

#[tokio::test]
async fn headless_run_succeeds_against_a_live_api() -> Result<(), Box<dyn std::error::Error>> {
    let stub = serve(dashboard_routes()).await?;
    let client = ApiClient::new(&stub.base_url);
    let mut app = App::new(stub.base_url.clone(), MapMetric::Distance);

    run_headless(&mut app, &client, true).await?;

    assert!(app.store.map.is_some());
    Ok(())
}
