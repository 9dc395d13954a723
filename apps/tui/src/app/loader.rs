use crate::api::models::{
    BoroughFare, DailyCount, FarePoint, HourlyCount, RouteRank, Summary, ZoneRank,
};
use crate::api::{ApiClient, ApiError};
use crate::app::state::{App, LoadFailure};
use crate::app::store::{DashboardData, DashboardState};
use crate::domain::{Endpoint, MapMetric};
use crate::view::color::ChartTheme;
use crate::view::{render_all, render_map};
use geojson::FeatureCollection;
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

pub type LoadResult = Result<DashboardData, ApiError>;

/// Sets the shared chart colors. Later calls keep the first theme.
pub fn apply_chart_defaults(state: &mut DashboardState) {
    if state.theme.is_none() {
        state.theme = Some(ChartTheme::default());
        debug!("chart defaults applied");
    }
}

/// Fetches all eight series concurrently. The first failure wins and the
/// requests still in flight are dropped with the join.
#[tracing::instrument(skip(client), fields(api = %client.base_url()))]
pub async fn fetch_dashboard(client: &ApiClient) -> LoadResult {
    let (
        summary,
        trips_by_hour,
        trips_by_day,
        fare_by_borough,
        fare_vs_distance,
        top_pickup_zones,
        top_routes,
        geojson,
    ) = tokio::try_join!(
        client.fetch_json::<Option<Summary>>(Endpoint::Summary),
        client.fetch_json::<Option<Vec<HourlyCount>>>(Endpoint::TripsByHour),
        client.fetch_json::<Option<Vec<DailyCount>>>(Endpoint::TripsByDay),
        client.fetch_json::<Option<Vec<BoroughFare>>>(Endpoint::FareByBorough),
        client.fetch_json::<Option<Vec<FarePoint>>>(Endpoint::FareVsDistance),
        client.fetch_json::<Option<Vec<ZoneRank>>>(Endpoint::TopPickupZones),
        client.fetch_json::<Option<Vec<RouteRank>>>(Endpoint::TopRoutes),
        client.fetch_json::<Option<FeatureCollection>>(Endpoint::GeoJson),
    )?;

    info!(
        zones = geojson.as_ref().map_or(0, |geo| geo.features.len()),
        routes = top_routes.as_ref().map_or(0, Vec::len),
        "API data loaded"
    );

    Ok(DashboardData {
        summary,
        trips_by_hour,
        trips_by_day,
        fare_by_borough,
        fare_vs_distance,
        top_pickup_zones,
        top_routes,
        geojson,
    })
}

/// Enables the map metric selector.
pub fn bind_map_events(state: &mut DashboardState) {
    state.metric_selector_bound = true;
}

/// Metric selector change handler. Ignored until the selector is bound.
pub fn on_map_metric_change(state: &mut DashboardState, metric: MapMetric) -> bool {
    if !state.metric_selector_bound {
        return false;
    }
    state.map_metric = metric;
    render_map(state);
    true
}

/// Finishes a load pass: either reveal the whole dashboard or none of it.
pub fn complete_load(app: &mut App, result: LoadResult) {
    match result {
        Ok(data) => {
            app.store.apply(data);
            bind_map_events(&mut app.store);
            render_all(&mut app.store);
            app.loading.hide();
        }
        Err(err) => {
            error!(endpoint = %err.endpoint(), error = %err, "failed to load data");
            app.loading.fail(LoadFailure::from_error(&err, &app.api_url));
        }
    }
}

/// Startup sequence for callers that can wait on the fetch in place.
pub async fn load_dashboard(app: &mut App, client: &ApiClient) {
    apply_chart_defaults(&mut app.store);
    let result = fetch_dashboard(client).await;
    complete_load(app, result);
}

/// Runs the fetch on its own task so the event loop can keep drawing.
pub fn spawn_load(client: ApiClient) -> oneshot::Receiver<LoadResult> {
    let (sender, receiver) = oneshot::channel();
    tokio::spawn(async move {
        let result = fetch_dashboard(&client).await;
        if sender.send(result).is_err() {
            warn!("dashboard closed before data arrived");
        }
    });
    receiver
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::fixtures::sample_data;
    use crate::view::ChartSlot;

    #[test]
    fn chart_defaults_are_applied_once() {
        let mut state = DashboardState::default();
        apply_chart_defaults(&mut state);
        let theme = state.theme;
        apply_chart_defaults(&mut state);
        assert_eq!(state.theme, theme);
        assert!(state.theme.is_some());
    }

    #[test]
    fn successful_load_renders_everything_with_data() {
        let mut app = App::new("http://localhost:5000", MapMetric::Count);
        complete_load(&mut app, Ok(sample_data()));

        assert!(app.store.metric_selector_bound);
        assert_eq!(app.store.kpis.as_ref().unwrap().total_trips, "1,234,567");
        assert_eq!(app.store.charts.live_count(), ChartSlot::ALL.len());
        assert!(app.store.map.is_some());
        assert!(app.store.routes.is_some());
        assert!(app.loading.reveals_dashboard());
    }

    #[test]
    fn empty_series_stay_unrendered() {
        let mut app = App::new("http://localhost:5000", MapMetric::Count);
        let mut data = sample_data();
        data.fare_by_borough = Some(Vec::new());
        data.top_routes = Some(Vec::new());

        complete_load(&mut app, Ok(data));

        assert!(app.store.charts.get(ChartSlot::FareBorough).is_none());
        assert!(app.store.routes.is_none());
        assert!(app.store.charts.get(ChartSlot::Hour).is_some());
    }

    #[test]
    fn absent_series_skip_only_their_renderer() {
        let mut app = App::new("http://localhost:5000", MapMetric::Count);
        let data = DashboardData {
            summary: None,
            geojson: None,
            ..sample_data()
        };

        complete_load(&mut app, Ok(data));

        assert!(app.loading.reveals_dashboard());
        assert!(app.store.kpis.is_none());
        assert!(app.store.map.is_none());
        assert_eq!(app.store.charts.live_count(), ChartSlot::ALL.len());
        assert!(app.store.routes.is_some());
    }

    #[test]
    fn failed_load_renders_nothing() {
        let mut app = App::new("http://localhost:5000", MapMetric::Count);
        let err = ApiError::Request {
            endpoint: Endpoint::TopRoutes,
            status: reqwest::StatusCode::NOT_FOUND,
        };

        complete_load(&mut app, Err(err));

        assert!(!app.store.has_rendered());
        assert!(!app.store.metric_selector_bound);
        assert!(!app.loading.reveals_dashboard());
        let failure = app.loading.failure().unwrap();
        assert_eq!(failure.endpoint, Some(Endpoint::TopRoutes));
        assert!(failure.message.contains("/api/top-routes"));
    }

    #[test]
    fn metric_changes_wait_for_binding() {
        let mut state = DashboardState::default();
        assert!(!on_map_metric_change(&mut state, MapMetric::Fare));
        assert_eq!(state.map_metric, MapMetric::Count);

        bind_map_events(&mut state);
        assert!(on_map_metric_change(&mut state, MapMetric::Fare));
        assert_eq!(state.map_metric, MapMetric::Fare);
    }
}
