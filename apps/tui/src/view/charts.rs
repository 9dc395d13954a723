use crate::app::store::{ChartSlots, DashboardState};
use crate::view::color::{
    palette_color, Rgb, DAY_BASE, DAY_WEEKEND, HOUR_BASE, HOUR_RUSH, SCATTER_POINT,
};
use crate::view::format::{abbreviate_count, currency, dollar_tick, fixed, group_rounded};
use tracing::debug;

/// The five chart regions of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartSlot {
    Hour,
    Day,
    FareBorough,
    Scatter,
    TopZones,
}

impl ChartSlot {
    pub const ALL: [Self; 5] = [
        Self::Hour,
        Self::Day,
        Self::FareBorough,
        Self::Scatter,
        Self::TopZones,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Hour => "Trips by Hour of Day",
            Self::Day => "Trips by Day of Week",
            Self::FareBorough => "Average Fare by Borough",
            Self::Scatter => "Fare vs Distance",
            Self::TopZones => "Top 10 Pickup Zones",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarOrientation {
    Vertical,
    Horizontal,
}

/// How a bar value reads in its tooltip and on the value axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    Trips,
    Pickups,
    Fare,
}

impl ValueFormat {
    pub fn tooltip(self, value: f64) -> String {
        match self {
            Self::Trips => format!("{} trips", group_rounded(value)),
            Self::Pickups => format!("{} pickups", group_rounded(value)),
            Self::Fare => currency(value),
        }
    }

    pub fn tick(self, value: f64) -> String {
        match self {
            Self::Trips | Self::Pickups => abbreviate_count(value),
            Self::Fare => dollar_tick(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSpec {
    pub label: String,
    pub value: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    Bars {
        orientation: BarOrientation,
        bars: Vec<BarSpec>,
        format: ValueFormat,
        max_thickness: u16,
    },
    Scatter {
        points: Vec<(f64, f64)>,
        color: Rgb,
        x_title: &'static str,
        y_title: &'static str,
    },
}

/// A live chart bound to one slot of the dashboard.
///
/// Views are owned by [`ChartSlots`]; dropping one is how a chart is destroyed.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub slot: ChartSlot,
    pub dataset_label: &'static str,
    pub body: ChartBody,
    pub cursor: usize,
}

impl ChartView {
    fn bars(
        slot: ChartSlot,
        dataset_label: &'static str,
        orientation: BarOrientation,
        bars: Vec<BarSpec>,
        format: ValueFormat,
        max_thickness: u16,
    ) -> Self {
        Self {
            slot,
            dataset_label,
            body: ChartBody::Bars {
                orientation,
                bars,
                format,
                max_thickness,
            },
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        match &self.body {
            ChartBody::Bars { bars, .. } => bars.len(),
            ChartBody::Scatter { points, .. } => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn label_at(&self, index: usize) -> Option<String> {
        match &self.body {
            ChartBody::Bars { bars, .. } => bars.get(index).map(|bar| bar.label.clone()),
            ChartBody::Scatter { points, .. } => {
                points.get(index).map(|_| format!("{} #{}", self.dataset_label, index + 1))
            }
        }
    }

    pub fn tooltip_at(&self, index: usize) -> Option<String> {
        match &self.body {
            ChartBody::Bars { bars, format, .. } => {
                bars.get(index).map(|bar| format.tooltip(bar.value))
            }
            ChartBody::Scatter { points, .. } => points.get(index).map(|(distance, fare)| {
                format!("{} mi - {}", fixed(*distance, 1), currency(*fare))
            }),
        }
    }

    pub fn move_cursor(&mut self, forward: bool) {
        let len = self.len();
        if len == 0 {
            self.cursor = 0;
        } else if forward {
            self.cursor = (self.cursor + 1).min(len - 1);
        } else {
            self.cursor = self.cursor.saturating_sub(1);
        }
    }
}

pub const fn is_rush_hour(hour: u32) -> bool {
    matches!(hour, 7..=10 | 17..=20)
}

pub fn is_weekend(day: &str) -> bool {
    matches!(day, "Saturday" | "Sunday")
}

/// Long-tail trips are dropped so they don't stretch the axes.
pub fn keep_scatter_point(distance: f64, fare: f64) -> bool {
    distance > 0.0 && fare > 0.0 && distance < 50.0 && fare < 200.0
}

pub fn destroy_chart(charts: &mut ChartSlots, slot: ChartSlot) {
    if charts.destroy(slot) {
        debug!(?slot, "destroyed previous chart");
    }
}

fn mount(charts: &mut ChartSlots, view: ChartView) {
    let slot = view.slot;
    destroy_chart(charts, slot);
    debug!(?slot, items = view.len(), "chart created");
    *charts.slot_mut(slot) = Some(view);
}

pub fn render_trips_by_hour(state: &mut DashboardState) {
    let Some(rows) = state.trips_by_hour.as_deref().filter(|rows| !rows.is_empty()) else {
        return;
    };

    let bars = rows
        .iter()
        .map(|row| {
            let hour = row.hour.unwrap_or(0);
            BarSpec {
                label: format!("{hour}:00"),
                value: row.trip_count.unwrap_or(0) as f64,
                color: if is_rush_hour(hour) { HOUR_RUSH } else { HOUR_BASE },
            }
        })
        .collect();

    let view = ChartView::bars(
        ChartSlot::Hour,
        "Trips",
        BarOrientation::Vertical,
        bars,
        ValueFormat::Trips,
        32,
    );
    mount(&mut state.charts, view);
}

pub fn render_trips_by_day(state: &mut DashboardState) {
    let Some(rows) = state.trips_by_day.as_deref().filter(|rows| !rows.is_empty()) else {
        return;
    };

    let bars = rows
        .iter()
        .map(|row| {
            let day = row.day.as_deref().unwrap_or_default();
            BarSpec {
                label: day.chars().take(3).collect(),
                value: row.trip_count.unwrap_or(0) as f64,
                color: if is_weekend(day) { DAY_WEEKEND } else { DAY_BASE },
            }
        })
        .collect();

    let view = ChartView::bars(
        ChartSlot::Day,
        "Trips",
        BarOrientation::Vertical,
        bars,
        ValueFormat::Trips,
        48,
    );
    mount(&mut state.charts, view);
}

pub fn render_fare_by_borough(state: &mut DashboardState) {
    let Some(rows) = state.fare_by_borough.as_deref().filter(|rows| !rows.is_empty()) else {
        return;
    };

    let bars = rows
        .iter()
        .enumerate()
        .map(|(index, row)| BarSpec {
            label: row.borough.clone().unwrap_or_default(),
            value: row.avg_fare.unwrap_or(0.0),
            color: palette_color(index),
        })
        .collect();

    let view = ChartView::bars(
        ChartSlot::FareBorough,
        "Avg Fare ($)",
        BarOrientation::Horizontal,
        bars,
        ValueFormat::Fare,
        64,
    );
    mount(&mut state.charts, view);
}

pub fn render_scatter(state: &mut DashboardState) {
    let Some(rows) = state.fare_vs_distance.as_deref().filter(|rows| !rows.is_empty()) else {
        return;
    };

    let points = rows
        .iter()
        .map(|row| (row.trip_distance.unwrap_or(0.0), row.fare_amount.unwrap_or(0.0)))
        .filter(|(distance, fare)| keep_scatter_point(*distance, *fare))
        .collect();

    let view = ChartView {
        slot: ChartSlot::Scatter,
        dataset_label: "Trip",
        body: ChartBody::Scatter {
            points,
            color: SCATTER_POINT,
            x_title: "Distance (mi)",
            y_title: "Total Fare ($)",
        },
        cursor: 0,
    };
    mount(&mut state.charts, view);
}

pub fn render_top_zones(state: &mut DashboardState) {
    let Some(rows) = state.top_pickup_zones.as_deref().filter(|rows| !rows.is_empty()) else {
        return;
    };

    let bars = rows
        .iter()
        .enumerate()
        .map(|(index, row)| BarSpec {
            label: row.zone_name.clone().unwrap_or_default(),
            value: row.pickup_count.unwrap_or(0) as f64,
            color: palette_color(index),
        })
        .collect();

    let view = ChartView::bars(
        ChartSlot::TopZones,
        "Pickups",
        BarOrientation::Horizontal,
        bars,
        ValueFormat::Pickups,
        40,
    );
    mount(&mut state.charts, view);
}
