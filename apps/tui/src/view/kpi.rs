use crate::api::models::Summary;
use crate::app::store::DashboardState;
use crate::view::format::{currency, fixed, group_thousands};

/// Display text of the four summary cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiCards {
    pub total_trips: String,
    pub avg_fare: String,
    pub avg_distance: String,
    pub avg_duration: String,
}

impl KpiCards {
    pub fn from_summary(summary: &Summary) -> Self {
        Self {
            total_trips: group_thousands(summary.total_trips.unwrap_or(0)),
            avg_fare: currency(summary.avg_fare.unwrap_or(0.0)),
            avg_distance: format!("{} mi", fixed(summary.avg_distance.unwrap_or(0.0), 2)),
            avg_duration: format!("{} min", fixed(summary.avg_duration_min.unwrap_or(0.0), 1)),
        }
    }

    /// `(title, value)` pairs in display order.
    pub fn cards(&self) -> [(&'static str, &str); 4] {
        [
            ("Total Trips", self.total_trips.as_str()),
            ("Avg Fare", self.avg_fare.as_str()),
            ("Avg Distance", self.avg_distance.as_str()),
            ("Avg Duration", self.avg_duration.as_str()),
        ]
    }
}

pub fn render_kpis(state: &mut DashboardState) {
    let Some(summary) = state.summary.as_ref() else {
        return;
    };
    state.kpis = Some(KpiCards::from_summary(summary));
}
