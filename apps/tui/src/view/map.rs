use std::collections::HashMap;

use crate::api::models::ZoneProperties;
use crate::app::store::DashboardState;
use crate::domain::MapMetric;
use crate::view::color::{interpolate, Rgb};
use crate::view::format::{currency, fixed, group_rounded};
use geo::{Contains, MultiPolygon, Point};
use geojson::{Feature, FeatureCollection};
use ratatui::layout::Rect;
use ratatui::widgets::canvas::MapResolution;
use tracing::{debug, info};

/// Map center over Manhattan, as (lat, lon)
pub const MAP_CENTER: (f64, f64) = (40.735, -73.94);
pub const DEFAULT_ZOOM: u8 = 11;
pub const MIN_ZOOM: u8 = 8;
pub const MAX_ZOOM: u8 = 18;
/// Number of 256px tiles the viewport spans horizontally.
const VIEWPORT_TILES: f64 = 4.0;
const LEGEND_STEPS: usize = 5;

const ZONE_OUTLINE: Rgb = Rgb(0x2e, 0x33, 0x45);
const HOVER_OUTLINE: Rgb = Rgb(0x6c, 0x63, 0xff);
const COASTLINE: Rgb = Rgb(0x47, 0x55, 0x69);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneStyle {
    pub fill: Rgb,
    pub fill_opacity: f64,
    pub outline: Rgb,
    pub weight: u8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: (f64, f64),
    pub zoom: u8,
}

impl Viewport {
    pub fn lon_span(&self) -> f64 {
        360.0 / 2_f64.powi(i32::from(self.zoom)) * VIEWPORT_TILES
    }

    /// Canvas bounds `(x, y)` = `([lon_min, lon_max], [lat_min, lat_max])` for
    /// an area of `width` x `height` terminal cells. Cells are about twice as
    /// tall as they are wide.
    pub fn bounds(&self, width: u16, height: u16) -> ([f64; 2], [f64; 2]) {
        let (lat, lon) = self.center;
        let lon_span = self.lon_span();
        let aspect = if width == 0 {
            1.0
        } else {
            f64::from(height) * 2.0 / f64::from(width)
        };
        let lat_span = lon_span * lat.to_radians().cos() * aspect;

        (
            [lon - lon_span / 2.0, lon + lon_span / 2.0],
            [lat - lat_span / 2.0, lat + lat_span / 2.0],
        )
    }

    /// Geographic position under a terminal cell of `area`.
    pub fn to_geo(&self, area: Rect, column: u16, row: u16) -> Option<(f64, f64)> {
        if area.width == 0
            || area.height == 0
            || column < area.x
            || row < area.y
            || column >= area.x + area.width
            || row >= area.y + area.height
        {
            return None;
        }

        let ([lon_min, lon_max], [lat_min, lat_max]) = self.bounds(area.width, area.height);
        let fx = (f64::from(column - area.x) + 0.5) / f64::from(area.width);
        let fy = (f64::from(row - area.y) + 0.5) / f64::from(area.height);

        Some((
            fx.mul_add(lon_max - lon_min, lon_min),
            fy.mul_add(-(lat_max - lat_min), lat_max),
        ))
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1).max(MIN_ZOOM);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: MAP_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Coastline backdrop drawn under the zones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayer {
    pub resolution: MapResolution,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub properties: ZoneProperties,
    pub value: f64,
    /// Outline in (lon, lat); empty when the feature has no polygon geometry
    pub shape: MultiPolygon<f64>,
    pub style: ZoneStyle,
}

impl Zone {
    fn from_feature(feature: &Feature, values: &HashMap<String, f64>) -> Self {
        let properties = ZoneProperties::from_feature(feature);
        let value = properties
            .zone_id
            .as_ref()
            .and_then(|id| values.get(id))
            .copied()
            .unwrap_or(0.0);

        Self {
            properties,
            value,
            shape: feature_shape(feature),
            style: base_style(Rgb(0, 0, 0)),
        }
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.shape.contains(&Point::new(lon, lat))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneTooltip {
    pub title: String,
    pub lines: Vec<(&'static str, String)>,
}

/// Fill-colored zone polygons for one metric. Rebuilt on every map render.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneLayer {
    pub id: u64,
    pub metric: MapMetric,
    pub max_value: f64,
    pub zones: Vec<Zone>,
    pub hovered: Option<usize>,
}

impl ZoneLayer {
    fn new(id: u64, metric: MapMetric, max_value: f64, zones: Vec<Zone>) -> Self {
        let mut layer = Self {
            id,
            metric,
            max_value,
            zones,
            hovered: None,
        };
        for index in 0..layer.zones.len() {
            layer.reset_style(index);
        }
        layer
    }

    /// Style derived from the zone's value under the active metric.
    pub fn computed_style(&self, index: usize) -> Option<ZoneStyle> {
        self.zones
            .get(index)
            .map(|zone| base_style(interpolate(zone.value, self.max_value)))
    }

    pub fn reset_style(&mut self, index: usize) {
        if let Some(style) = self.computed_style(index) {
            self.zones[index].style = style;
        }
    }

    pub fn on_pointer_enter(&mut self, index: usize) {
        if index >= self.zones.len() || self.hovered == Some(index) {
            return;
        }
        if let Some(previous) = self.hovered {
            self.on_pointer_leave(previous);
        }

        let zone = &mut self.zones[index];
        zone.style = ZoneStyle {
            outline: HOVER_OUTLINE,
            weight: 2,
            fill_opacity: 0.9,
            ..zone.style
        };
        self.hovered = Some(index);
    }

    pub fn on_pointer_leave(&mut self, index: usize) {
        self.reset_style(index);
        if self.hovered == Some(index) {
            self.hovered = None;
        }
    }

    /// Topmost zone under a point; later features draw over earlier ones.
    pub fn zone_at(&self, lon: f64, lat: f64) -> Option<usize> {
        self.zones.iter().rposition(|zone| zone.contains(lon, lat))
    }

    /// Pointer moved to `point` (or left the map when `None`).
    pub fn hover_at(&mut self, point: Option<(f64, f64)>) {
        let target = point.and_then(|(lon, lat)| self.zone_at(lon, lat));
        match (self.hovered, target) {
            (_, Some(index)) => self.on_pointer_enter(index),
            (Some(previous), None) => self.on_pointer_leave(previous),
            (None, None) => {}
        }
    }

    /// Keyboard stand-in for pointer movement: hover the next/previous zone.
    pub fn step_hover(&mut self, forward: bool) {
        let len = self.zones.len();
        if len == 0 {
            return;
        }
        let next = match (self.hovered, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(index), true) => (index + 1) % len,
            (Some(index), false) => (index + len - 1) % len,
        };
        self.on_pointer_enter(next);
    }

    pub fn tooltip(&self, index: usize) -> Option<ZoneTooltip> {
        let props = &self.zones.get(index)?.properties;
        Some(ZoneTooltip {
            title: props.display_name().to_string(),
            lines: vec![
                ("Borough", props.display_borough().to_string()),
                ("Pickups", group_rounded(props.pickup_count)),
                ("Avg Fare", currency(props.avg_fare)),
                ("Avg Distance", format!("{} mi", fixed(props.avg_distance, 2))),
            ],
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub color: Rgb,
    pub label: String,
}

/// Legend control. Created once per map; its entries follow the metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Legend {
    pub id: u64,
    pub title: &'static str,
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    const fn new(id: u64) -> Self {
        Self {
            id,
            title: "",
            entries: Vec::new(),
        }
    }

    fn rebuild(&mut self, metric: MapMetric, max_value: f64) {
        self.title = metric.legend_label();
        self.entries = (0..LEGEND_STEPS)
            .map(|step| {
                let value = max_value / (LEGEND_STEPS - 1) as f64 * step as f64;
                LegendEntry {
                    color: interpolate(value, max_value),
                    label: legend_label(metric, value),
                }
            })
            .collect();
    }
}

fn legend_label(metric: MapMetric, value: f64) -> String {
    match metric {
        MapMetric::Fare => format!("${}", fixed(value, 0)),
        MapMetric::Distance => format!("{} mi", fixed(value, 1)),
        MapMetric::Count => fixed(value, 0),
    }
}

/// The map panel: viewport and tile layer live as long as the map, the zone
/// layer and legend content are replaced on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseMap {
    pub viewport: Viewport,
    pub tile_layer: TileLayer,
    pub zone_layer: Option<ZoneLayer>,
    pub legend: Option<Legend>,
    next_id: u64,
}

impl BaseMap {
    pub fn new() -> Self {
        Self {
            viewport: Viewport::default(),
            tile_layer: TileLayer {
                resolution: MapResolution::High,
                color: COASTLINE,
            },
            zone_layer: None,
            legend: None,
            next_id: 1,
        }
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn remove_zone_layer(&mut self) -> Option<ZoneLayer> {
        self.zone_layer.take()
    }
}

impl Default for BaseMap {
    fn default() -> Self {
        Self::new()
    }
}

const fn base_style(fill: Rgb) -> ZoneStyle {
    ZoneStyle {
        fill,
        fill_opacity: 0.75,
        outline: ZONE_OUTLINE,
        weight: 1,
    }
}

pub fn metric_value(properties: &ZoneProperties, metric: MapMetric) -> f64 {
    match metric {
        MapMetric::Count => properties.pickup_count,
        MapMetric::Fare => properties.avg_fare,
        MapMetric::Distance => properties.avg_distance,
    }
}

/// Metric value per zone id. Features without an id are skipped; a repeated
/// id keeps the last value seen.
pub fn metric_values(collection: &FeatureCollection, metric: MapMetric) -> HashMap<String, f64> {
    collection
        .features
        .iter()
        .filter_map(|feature| {
            let properties = ZoneProperties::from_feature(feature);
            let value = metric_value(&properties, metric);
            properties.zone_id.map(|id| (id, value))
        })
        .collect()
}

/// Largest positive value, or 1 when there is none.
pub fn normalization_ceiling(values: impl IntoIterator<Item = f64>) -> f64 {
    values
        .into_iter()
        .filter(|value| *value > 0.0)
        .fold(None, |max: Option<f64>, value| {
            Some(max.map_or(value, |max| max.max(value)))
        })
        .unwrap_or(1.0)
}

/// Polygon and MultiPolygon features become a `MultiPolygon`; any other
/// geometry leaves the zone without a shape.
fn feature_shape(feature: &Feature) -> MultiPolygon<f64> {
    let Some(geometry) = feature.geometry.clone() else {
        return MultiPolygon(Vec::new());
    };

    match geo::Geometry::<f64>::try_from(geometry) {
        Ok(geo::Geometry::MultiPolygon(shape)) => shape,
        Ok(geo::Geometry::Polygon(polygon)) => MultiPolygon(vec![polygon]),
        Ok(_) => MultiPolygon(Vec::new()),
        Err(err) => {
            debug!(error = %err, "skipping zone geometry");
            MultiPolygon(Vec::new())
        }
    }
}

pub fn render_map(state: &mut DashboardState) {
    let metric = state.map_metric;
    let Some(geo) = state.geojson.as_ref() else {
        return;
    };

    let values = metric_values(geo, metric);
    let max_value = normalization_ceiling(values.values().copied());

    let base = state.map.get_or_insert_with(|| {
        info!("creating base map");
        BaseMap::new()
    });

    if let Some(previous) = base.remove_zone_layer() {
        debug!(layer = previous.id, metric = %previous.metric, "removed zone layer");
    }

    let zones = geo
        .features
        .iter()
        .map(|feature| Zone::from_feature(feature, &values))
        .collect();
    let layer_id = base.next_id();
    base.zone_layer = Some(ZoneLayer::new(layer_id, metric, max_value, zones));

    if base.legend.is_none() {
        let legend_id = base.next_id();
        base.legend = Some(Legend::new(legend_id));
    }
    if let Some(legend) = base.legend.as_mut() {
        legend.rebuild(metric, max_value);
    }

    debug!(layer = layer_id, %metric, max_value, "zone layer rendered");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::color::RAMP_STOPS;
    use serde_json::json;

    fn square(id: u32, name: &str, x: f64, y: f64, pickups: u64, fare: f64) -> serde_json::Value {
        json!({
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[x, y], [x + 1.0, y], [x + 1.0, y + 1.0], [x, y + 1.0], [x, y]]]
            },
            "properties": {
                "zone_id": id,
                "zone_name": name,
                "borough": "Manhattan",
                "pickup_count": pickups,
                "avg_fare": fare,
                "avg_distance": 2.5
            }
        })
    }

    fn collection(features: Vec<serde_json::Value>) -> FeatureCollection {
        serde_json::from_value(json!({ "type": "FeatureCollection", "features": features }))
            .unwrap()
    }

    fn state_with_zones() -> DashboardState {
        let mut state = DashboardState::default();
        state.geojson = Some(collection(vec![
            square(1, "Alphabet City", 0.0, 0.0, 100, 30.0),
            square(2, "Battery Park", 1.0, 0.0, 400, 10.0),
            square(3, "Chinatown", 2.0, 0.0, 0, 0.0),
        ]));
        state
    }

    fn layer(state: &DashboardState) -> &ZoneLayer {
        state.map.as_ref().unwrap().zone_layer.as_ref().unwrap()
    }

    #[test]
    fn colors_zones_relative_to_the_busiest() {
        let mut state = state_with_zones();
        render_map(&mut state);

        let layer = layer(&state);
        assert!((layer.max_value - 400.0).abs() < f64::EPSILON);
        assert_eq!(layer.zones[1].style.fill, RAMP_STOPS[4]);
        assert_eq!(layer.zones[0].style.fill, RAMP_STOPS[1]);
        assert_eq!(layer.zones[2].style.fill, RAMP_STOPS[0]);
    }

    #[test]
    fn ceiling_defaults_to_one_without_positive_values() {
        assert!((normalization_ceiling([0.0, -3.0]) - 1.0).abs() < f64::EPSILON);
        assert!((normalization_ceiling(Vec::new()) - 1.0).abs() < f64::EPSILON);
        assert!((normalization_ceiling([2.0, 9.5, 0.0]) - 9.5).abs() < f64::EPSILON);
    }

    #[test]
    fn second_render_replaces_layer_and_reuses_legend() {
        let mut state = state_with_zones();
        render_map(&mut state);
        let first_layer = layer(&state).id;
        let legend_id = state.map.as_ref().unwrap().legend.as_ref().unwrap().id;

        state.map_metric = MapMetric::Fare;
        render_map(&mut state);

        let map = state.map.as_ref().unwrap();
        let zone_layer = map.zone_layer.as_ref().unwrap();
        let legend = map.legend.as_ref().unwrap();
        assert_ne!(zone_layer.id, first_layer);
        assert_eq!(zone_layer.metric, MapMetric::Fare);
        assert_eq!(legend.id, legend_id);
        assert_eq!(legend.title, "Avg Fare ($)");
        assert_eq!(legend.entries.len(), 5);
        assert_eq!(legend.entries[4].label, "$30");
        assert_eq!(zone_layer.zones[0].style.fill, RAMP_STOPS[4]);
    }

    #[test]
    fn legend_spans_zero_to_ceiling() {
        let mut state = state_with_zones();
        render_map(&mut state);

        let legend = state.map.as_ref().unwrap().legend.as_ref().unwrap();
        let labels: Vec<&str> = legend.entries.iter().map(|entry| entry.label.as_str()).collect();
        assert_eq!(labels, ["0", "100", "200", "300", "400"]);
        let colors: Vec<Rgb> = legend.entries.iter().map(|entry| entry.color).collect();
        assert_eq!(colors, RAMP_STOPS);
    }

    #[test]
    fn viewport_survives_rerender() {
        let mut state = state_with_zones();
        render_map(&mut state);
        state.map.as_mut().unwrap().viewport.zoom_in();

        render_map(&mut state);

        assert_eq!(state.map.as_ref().unwrap().viewport.zoom, DEFAULT_ZOOM + 1);
    }

    #[test]
    fn pointer_leave_restores_active_metric_style() {
        let mut state = state_with_zones();
        state.map_metric = MapMetric::Fare;
        render_map(&mut state);
        let layer = state.map.as_mut().unwrap().zone_layer.as_mut().unwrap();
        let computed = layer.computed_style(1).unwrap();

        layer.on_pointer_enter(1);
        assert_eq!(layer.zones[1].style.outline, HOVER_OUTLINE);
        assert_eq!(layer.zones[1].style.weight, 2);
        assert_eq!(layer.zones[1].style.fill, computed.fill);

        layer.on_pointer_leave(1);
        assert_eq!(layer.zones[1].style, computed);
        assert_eq!(layer.hovered, None);
    }

    #[test]
    fn hover_follows_the_pointer() {
        let mut state = state_with_zones();
        render_map(&mut state);
        let layer = state.map.as_mut().unwrap().zone_layer.as_mut().unwrap();

        layer.hover_at(Some((0.5, 0.5)));
        assert_eq!(layer.hovered, Some(0));
        layer.hover_at(Some((1.5, 0.5)));
        assert_eq!(layer.hovered, Some(1));
        assert_eq!(layer.zones[0].style, layer.computed_style(0).unwrap());
        layer.hover_at(Some((10.0, 10.0)));
        assert_eq!(layer.hovered, None);
        assert_eq!(layer.zones[1].style, layer.computed_style(1).unwrap());
    }

    #[test]
    fn tooltip_defaults_missing_fields() {
        let mut state = DashboardState::default();
        state.geojson = Some(collection(vec![json!({
            "type": "Feature",
            "geometry": null,
            "properties": { "LocationID": 9 }
        })]));
        render_map(&mut state);

        let tooltip = layer(&state).tooltip(0).unwrap();
        assert_eq!(tooltip.title, "Unknown Zone");
        assert_eq!(
            tooltip.lines,
            [
                ("Borough", "-".to_string()),
                ("Pickups", "0".to_string()),
                ("Avg Fare", "$0.00".to_string()),
                ("Avg Distance", "0.00 mi".to_string()),
            ]
        );
    }

    #[test]
    fn holes_are_not_part_of_the_zone() {
        let mut state = DashboardState::default();
        state.geojson = Some(collection(vec![json!({
            "type": "Feature",
            "geometry": {
                "type": "MultiPolygon",
                "coordinates": [
                    [
                        [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]],
                        [[1.0, 1.0], [3.0, 1.0], [3.0, 3.0], [1.0, 3.0], [1.0, 1.0]]
                    ],
                    [[[10.0, 0.0], [11.0, 0.0], [11.0, 1.0], [10.0, 1.0], [10.0, 0.0]]]
                ]
            },
            "properties": { "zone_id": 4, "zone_name": "Central Park" }
        })]));
        render_map(&mut state);

        let zone = &layer(&state).zones[0];
        assert!(zone.contains(0.5, 0.5));
        assert!(zone.contains(10.5, 0.5));
        assert!(!zone.contains(2.0, 2.0));
        assert!(!zone.contains(5.0, 2.0));
    }

    #[test]
    fn zones_without_polygons_are_never_hit() {
        let mut state = DashboardState::default();
        state.geojson = Some(collection(vec![json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [0.5, 0.5] },
            "properties": { "zone_id": 5 }
        })]));
        render_map(&mut state);

        let layer = layer(&state);
        assert!(layer.zones[0].shape.0.is_empty());
        assert_eq!(layer.zone_at(0.5, 0.5), None);
    }

    #[test]
    fn viewport_maps_cells_to_coordinates() {
        let viewport = Viewport::default();
        let area = Rect::new(10, 5, 40, 20);
        let (lon, lat) = viewport.to_geo(area, 30, 15).unwrap();
        let ([lon_min, lon_max], [lat_min, lat_max]) = viewport.bounds(40, 20);
        assert!(lon > lon_min && lon < lon_max);
        assert!(lat > lat_min && lat < lat_max);
        assert!((lon - MAP_CENTER.1).abs() < viewport.lon_span() / 20.0);
        assert_eq!(viewport.to_geo(area, 9, 15), None);
        assert_eq!(viewport.to_geo(area, 50, 15), None);
    }
}
