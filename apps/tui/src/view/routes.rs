use crate::app::store::DashboardState;
use crate::view::format::group_thousands;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRow {
    pub rank: usize,
    pub pickup_zone: String,
    pub dropoff_zone: String,
    pub trip_count: u64,
    pub trips: String,
    /// Bar width as a percentage of the busiest route.
    pub bar_percent: u16,
}

/// Top pickup → dropoff routes, in the order the API ranked them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    pub rows: Vec<RouteRow>,
    pub selected: usize,
}

/// `round(count / max * 100)`; a zero ceiling yields empty bars.
pub fn bar_percent(count: u64, max_count: u64) -> u16 {
    if max_count == 0 {
        return 0;
    }
    (count as f64 / max_count as f64 * 100.0).round() as u16
}

pub fn render_top_routes(state: &mut DashboardState) {
    let Some(routes) = state.top_routes.as_deref().filter(|rows| !rows.is_empty()) else {
        return;
    };

    // The server sorts descending, so the first row is the ceiling.
    let max_count = routes[0].trip_count.unwrap_or(0);

    let rows = routes
        .iter()
        .enumerate()
        .map(|(index, route)| {
            let trip_count = route.trip_count.unwrap_or(0);
            RouteRow {
                rank: index + 1,
                pickup_zone: route.pickup_zone.clone().unwrap_or_default(),
                dropoff_zone: route.dropoff_zone.clone().unwrap_or_default(),
                trip_count,
                trips: group_thousands(trip_count),
                bar_percent: bar_percent(trip_count, max_count),
            }
        })
        .collect();

    state.routes = Some(RouteTable { rows, selected: 0 });
}
