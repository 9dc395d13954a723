use crate::api::models::{
    BoroughFare, DailyCount, FarePoint, HourlyCount, RouteRank, Summary, ZoneRank,
};
use crate::app::store::DashboardData;
use geojson::FeatureCollection;
use serde_json::json;

/// Two square zones side by side around the default map center.
pub fn zone_collection() -> FeatureCollection {
    serde_json::from_value(json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {
                    "zone_id": 1,
                    "zone_name": "West Village",
                    "borough": "Manhattan",
                    "pickup_count": 1200,
                    "avg_fare": 14.5,
                    "avg_distance": 2.1
                },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [-73.96, 40.72], [-73.94, 40.72], [-73.94, 40.75],
                        [-73.96, 40.75], [-73.96, 40.72]
                    ]]
                }
            },
            {
                "type": "Feature",
                "properties": {
                    "LocationID": 2,
                    "Zone": "Long Island City",
                    "Borough": "Queens",
                    "pickup_count": 300,
                    "avg_fare": 22.0,
                    "avg_distance": 4.4
                },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [-73.94, 40.72], [-73.92, 40.72], [-73.92, 40.75],
                        [-73.94, 40.75], [-73.94, 40.72]
                    ]]
                }
            }
        ]
    }))
    .unwrap()
}

pub fn sample_data() -> DashboardData {
    DashboardData {
        summary: Some(Summary {
            total_trips: Some(1_234_567),
            avg_fare: Some(12.35),
            avg_distance: Some(3.21),
            avg_duration_min: Some(14.66),
        }),
        trips_by_hour: Some(
            (0..24)
                .map(|hour| HourlyCount {
                    hour: Some(hour),
                    trip_count: Some(u64::from(hour) * 100 + 50),
                })
                .collect(),
        ),
        trips_by_day: Some(
            ["Monday", "Saturday", "Sunday"]
                .iter()
                .map(|day| DailyCount {
                    day: Some((*day).to_string()),
                    trip_count: Some(4000),
                })
                .collect(),
        ),
        fare_by_borough: Some(vec![
            BoroughFare {
                borough: Some("Manhattan".to_string()),
                avg_fare: Some(13.2),
            },
            BoroughFare {
                borough: Some("Queens".to_string()),
                avg_fare: Some(24.9),
            },
        ]),
        fare_vs_distance: Some(vec![
            FarePoint {
                trip_distance: Some(1.2),
                fare_amount: Some(8.0),
            },
            FarePoint {
                trip_distance: Some(80.0),
                fare_amount: Some(300.0),
            },
        ]),
        top_pickup_zones: Some(vec![ZoneRank {
            zone_name: Some("Midtown Center".to_string()),
            pickup_count: Some(9000),
        }]),
        top_routes: Some(vec![
            RouteRank {
                pickup_zone: Some("Upper East Side South".to_string()),
                dropoff_zone: Some("Upper East Side North".to_string()),
                trip_count: Some(3000),
            },
            RouteRank {
                pickup_zone: Some("Midtown Center".to_string()),
                dropoff_zone: Some("Times Sq/Theatre District".to_string()),
                trip_count: Some(1500),
            },
        ]),
        geojson: Some(zone_collection()),
    }
}
