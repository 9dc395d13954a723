use geojson::{Feature, JsonValue};
use serde::Deserialize;

// Every field is optional: rows arrive exactly as the API aggregated them and
// renderers apply their own defaults.

/// Represents the `/api/summary` singleton
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Summary {
    pub total_trips: Option<u64>,
    pub avg_fare: Option<f64>,
    pub avg_distance: Option<f64>,
    pub avg_duration_min: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HourlyCount {
    pub hour: Option<u32>,
    pub trip_count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DailyCount {
    pub day: Option<String>,
    pub trip_count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoroughFare {
    pub borough: Option<String>,
    pub avg_fare: Option<f64>,
}

/// One sampled trip for the fare/distance scatter
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FarePoint {
    pub trip_distance: Option<f64>,
    pub fare_amount: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ZoneRank {
    pub zone_name: Option<String>,
    pub pickup_count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouteRank {
    pub pickup_zone: Option<String>,
    pub dropoff_zone: Option<String>,
    pub trip_count: Option<u64>,
}

/// Per-zone statistics embedded in a GeoJSON feature's properties.
///
/// The API has shipped two naming schemes for the same fields, so lookups try
/// each known key in order and skip empty values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneProperties {
    pub zone_id: Option<String>,
    pub zone_name: Option<String>,
    pub borough: Option<String>,
    pub pickup_count: f64,
    pub avg_fare: f64,
    pub avg_distance: f64,
}

impl ZoneProperties {
    pub fn from_feature(feature: &Feature) -> Self {
        Self {
            zone_id: first_present(feature, &["zone_id", "LocationID"]).and_then(id_text),
            zone_name: first_present(feature, &["zone_name", "zone", "Zone"]).and_then(text),
            borough: first_present(feature, &["borough", "Borough"]).and_then(text),
            pickup_count: number(feature, "pickup_count"),
            avg_fare: number(feature, "avg_fare"),
            avg_distance: number(feature, "avg_distance"),
        }
    }

    pub fn display_name(&self) -> &str {
        self.zone_name.as_deref().unwrap_or("Unknown Zone")
    }

    pub fn display_borough(&self) -> &str {
        self.borough.as_deref().unwrap_or("-")
    }
}

fn first_present<'a>(feature: &'a Feature, keys: &[&str]) -> Option<&'a JsonValue> {
    keys.iter()
        .filter_map(|key| feature.property(key))
        .find(|value| is_present(value))
}

fn is_present(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(flag) => *flag,
        JsonValue::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        JsonValue::String(text) => !text.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

fn id_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Number(number) => Some(number.to_string()),
        JsonValue::String(text) => Some(text.clone()),
        _ => None,
    }
}

fn text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(text) => Some(text.clone()),
        JsonValue::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn number(feature: &Feature, key: &str) -> f64 {
    feature
        .property(key)
        .and_then(JsonValue::as_f64)
        .unwrap_or(0.0)
}
