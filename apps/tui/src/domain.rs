use std::fmt;

/// The eight series served by the statistics API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Summary,
    TripsByHour,
    TripsByDay,
    FareByBorough,
    FareVsDistance,
    TopPickupZones,
    TopRoutes,
    GeoJson,
}

impl Endpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Summary => "/api/summary",
            Self::TripsByHour => "/api/trips-by-hour",
            Self::TripsByDay => "/api/trips-by-day",
            Self::FareByBorough => "/api/avg-fare-by-borough",
            Self::FareVsDistance => "/api/fare-vs-distance",
            Self::TopPickupZones => "/api/top-pickup-zones",
            Self::TopRoutes => "/api/top-routes",
            Self::GeoJson => "/api/geojson",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Metric shown by the choropleth map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MapMetric {
    #[default]
    Count,
    Fare,
    Distance,
}

impl MapMetric {

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Fare => "fare",
            Self::Distance => "distance",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "count" | "pickups" => Some(Self::Count),
            "fare" => Some(Self::Fare),
            "distance" => Some(Self::Distance),
            _ => None,
        }
    }

    /// Option text in the metric selector.
    pub const fn option_label(self) -> &'static str {
        match self {
            Self::Count => "Pickup Count",
            Self::Fare => "Average Fare",
            Self::Distance => "Average Distance",
        }
    }

    /// Heading of the map legend.
    pub const fn legend_label(self) -> &'static str {
        match self {
            Self::Count => "Pickup Count",
            Self::Fare => "Avg Fare ($)",
            Self::Distance => "Avg Distance (mi)",
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Count => Self::Fare,
            Self::Fare => Self::Distance,
            Self::Distance => Self::Count,
        }
    }
}

impl fmt::Display for MapMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
