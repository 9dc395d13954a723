#![allow(dead_code)]

use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Canned status and JSON body per request path.
pub type Routes = HashMap<String, (u16, String)>;

/// How long to stall before answering a path.
pub type Delays = HashMap<String, Duration>;

/// Minimal HTTP/1.1 server answering GETs from a route table.
pub struct StubApi {
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl Drop for StubApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn serve(routes: Routes) -> std::io::Result<StubApi> {
    serve_with_delays(routes, Delays::new()).await
}

pub async fn serve_with_delays(routes: Routes, delays: Delays) -> std::io::Result<StubApi> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);
    let routes = Arc::new(routes);
    let delays = Arc::new(delays);

    let handle = tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let routes = Arc::clone(&routes);
            let delays = Arc::clone(&delays);
            tokio::spawn(async move {
                let _ = respond(stream, &routes, &delays).await;
            });
        }
    });

    Ok(StubApi { base_url, handle })
}

async fn respond(mut stream: TcpStream, routes: &Routes, delays: &Delays) -> std::io::Result<()> {
    let mut request = Vec::new();
    let mut chunk = [0_u8; 1024];
    while !request.windows(4).any(|window| window == b"\r\n\r\n") {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        request.extend_from_slice(&chunk[..read]);
    }

    let request = String::from_utf8_lossy(&request);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");

    if let Some(delay) = delays.get(path) {
        tokio::time::sleep(*delay).await;
    }

    let (status, body) = routes
        .get(path)
        .cloned()
        .unwrap_or_else(|| (404, json!({ "error": "not found" }).to_string()));
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    };

    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

fn ok(value: &Value) -> (u16, String) {
    (200, value.to_string())
}

/// Every endpoint answering with a small but complete data set.
pub fn dashboard_routes() -> Routes {
    let zone = |id: u64, name: &str, lon: f64, count: u64, fare: f64| {
        json!({
            "type": "Feature",
            "properties": {
                "zone_id": id,
                "zone_name": name,
                "borough": "Manhattan",
                "pickup_count": count,
                "avg_fare": fare,
                "avg_distance": 2.5
            },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [lon, 40.72], [lon + 0.02, 40.72], [lon + 0.02, 40.75],
                    [lon, 40.75], [lon, 40.72]
                ]]
            }
        })
    };

    [
        (
            "/api/summary",
            json!({
                "total_trips": 2_964_624,
                "avg_fare": 18.17,
                "avg_distance": 3.65,
                "avg_duration_min": 15.6
            }),
        ),
        (
            "/api/trips-by-hour",
            json!([
                { "hour": 7, "trip_count": 90_000 },
                { "hour": 12, "trip_count": 120_000 },
                { "hour": 18, "trip_count": 210_000 }
            ]),
        ),
        (
            "/api/trips-by-day",
            json!([
                { "day": "Monday", "trip_count": 400_000 },
                { "day": "Saturday", "trip_count": 450_000 }
            ]),
        ),
        (
            "/api/avg-fare-by-borough",
            json!([
                { "borough": "Manhattan", "avg_fare": 16.2 },
                { "borough": "Queens", "avg_fare": 38.4 }
            ]),
        ),
        (
            "/api/fare-vs-distance",
            json!([
                { "trip_distance": 1.1, "fare_amount": 7.5 },
                { "trip_distance": 9.8, "fare_amount": 41.0 }
            ]),
        ),
        (
            "/api/top-pickup-zones",
            json!([
                { "zone_name": "JFK Airport", "pickup_count": 150_000 },
                { "zone_name": "Midtown Center", "pickup_count": 140_000 }
            ]),
        ),
        (
            "/api/top-routes",
            json!([
                {
                    "pickup_zone": "Upper East Side South",
                    "dropoff_zone": "Upper East Side North",
                    "trip_count": 21_000
                },
                {
                    "pickup_zone": "Midtown Center",
                    "dropoff_zone": "Upper East Side South",
                    "trip_count": 7_000
                }
            ]),
        ),
        (
            "/api/geojson",
            json!({
                "type": "FeatureCollection",
                "features": [
                    zone(1, "West Village", -73.96, 1000, 15.0),
                    zone(2, "East Village", -73.94, 250, 30.0)
                ]
            }),
        ),
    ]
    .into_iter()
    .map(|(path, body)| (path.to_string(), ok(&body)))
    .collect()
}

/// Address nothing is listening on.
pub async fn closed_port_url() -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{address}"))
}
