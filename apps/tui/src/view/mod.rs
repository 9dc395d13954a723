// View module for taxi_dashboard
// Renderers turn store series into retained view objects

pub mod charts;
pub mod color;
pub mod format;
pub mod kpi;
pub mod map;
pub mod routes;

use crate::app::store::DashboardState;

pub use charts::{
    render_fare_by_borough, render_scatter, render_top_zones, render_trips_by_day,
    render_trips_by_hour, ChartSlot, ChartView,
};
pub use kpi::{render_kpis, KpiCards};
pub use map::{render_map, BaseMap};
pub use routes::{render_top_routes, RouteTable};

/// Runs every renderer in display order. Each one is a no-op for a series
/// that hasn't been loaded, so this is safe to call at any time.
pub fn render_all(state: &mut DashboardState) {
    render_kpis(state);
    render_trips_by_hour(state);
    render_trips_by_day(state);
    render_map(state);
    render_fare_by_borough(state);
    render_scatter(state);
    render_top_routes(state);
    render_top_zones(state);
}
