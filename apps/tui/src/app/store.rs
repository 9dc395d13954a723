use crate::api::models::{
    BoroughFare, DailyCount, FarePoint, HourlyCount, RouteRank, Summary, ZoneRank,
};
use crate::domain::MapMetric;
use crate::view::charts::{ChartSlot, ChartView};
use crate::view::color::ChartTheme;
use crate::view::{BaseMap, KpiCards, RouteTable};
use geojson::FeatureCollection;

/// Every series from one successful load pass. A `null` body leaves its
/// series absent.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub summary: Option<Summary>,
    pub trips_by_hour: Option<Vec<HourlyCount>>,
    pub trips_by_day: Option<Vec<DailyCount>>,
    pub fare_by_borough: Option<Vec<BoroughFare>>,
    pub fare_vs_distance: Option<Vec<FarePoint>>,
    pub top_pickup_zones: Option<Vec<ZoneRank>>,
    pub top_routes: Option<Vec<RouteRank>>,
    pub geojson: Option<FeatureCollection>,
}

/// One live chart per slot. Replacing or taking a view drops the old one.
#[derive(Debug, Default)]
pub struct ChartSlots {
    pub hour: Option<ChartView>,
    pub day: Option<ChartView>,
    pub fare_borough: Option<ChartView>,
    pub scatter: Option<ChartView>,
    pub top_zones: Option<ChartView>,
}

impl ChartSlots {
    pub const fn get(&self, slot: ChartSlot) -> Option<&ChartView> {
        match slot {
            ChartSlot::Hour => self.hour.as_ref(),
            ChartSlot::Day => self.day.as_ref(),
            ChartSlot::FareBorough => self.fare_borough.as_ref(),
            ChartSlot::Scatter => self.scatter.as_ref(),
            ChartSlot::TopZones => self.top_zones.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, slot: ChartSlot) -> &mut Option<ChartView> {
        match slot {
            ChartSlot::Hour => &mut self.hour,
            ChartSlot::Day => &mut self.day,
            ChartSlot::FareBorough => &mut self.fare_borough,
            ChartSlot::Scatter => &mut self.scatter,
            ChartSlot::TopZones => &mut self.top_zones,
        }
    }

    /// Drops the chart in `slot`. Returns whether there was one.
    pub fn destroy(&mut self, slot: ChartSlot) -> bool {
        self.slot_mut(slot).take().is_some()
    }

    pub fn live_count(&self) -> usize {
        ChartSlot::ALL
            .iter()
            .filter(|slot| self.get(**slot).is_some())
            .count()
    }
}

/// Application state shared by the renderers.
///
/// Series fields are `None` until a load pass succeeds; view fields are `None`
/// until their renderer has run with data.
#[derive(Debug, Default)]
pub struct DashboardState {
    pub theme: Option<ChartTheme>,

    pub summary: Option<Summary>,
    pub trips_by_hour: Option<Vec<HourlyCount>>,
    pub trips_by_day: Option<Vec<DailyCount>>,
    pub fare_by_borough: Option<Vec<BoroughFare>>,
    pub fare_vs_distance: Option<Vec<FarePoint>>,
    pub top_pickup_zones: Option<Vec<ZoneRank>>,
    pub top_routes: Option<Vec<RouteRank>>,
    pub geojson: Option<FeatureCollection>,

    pub map_metric: MapMetric,
    pub metric_selector_bound: bool,

    pub kpis: Option<KpiCards>,
    pub charts: ChartSlots,
    pub map: Option<BaseMap>,
    pub routes: Option<RouteTable>,
}

impl DashboardState {
    pub fn new(map_metric: MapMetric) -> Self {
        Self {
            map_metric,
            ..Self::default()
        }
    }

    /// Stores every series of a load pass at once.
    pub fn apply(&mut self, data: DashboardData) {
        self.summary = data.summary;
        self.trips_by_hour = data.trips_by_hour;
        self.trips_by_day = data.trips_by_day;
        self.fare_by_borough = data.fare_by_borough;
        self.fare_vs_distance = data.fare_vs_distance;
        self.top_pickup_zones = data.top_pickup_zones;
        self.top_routes = data.top_routes;
        self.geojson = data.geojson;
    }

    pub fn theme(&self) -> ChartTheme {
        self.theme.unwrap_or_default()
    }

    /// True once any renderer has produced output.
    pub fn has_rendered(&self) -> bool {
        self.kpis.is_some()
            || self.charts.live_count() > 0
            || self.map.is_some()
            || self.routes.is_some()
    }
}
