use crate::api::ApiError;
use crate::domain::{Endpoint, MapMetric};
use crate::app::store::DashboardState;
use crate::view::charts::ChartSlot;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tachyonfx::{fx, Effect, EffectTimer, Interpolation};
use throbber_widgets_tui::ThrobberState;

/// How long the loading overlay takes to fade once data is in.
pub const DISMISS_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Trips,
    Fares,
    Map,
    Rankings,
}

impl Page {
    pub const ALL: [Self; 4] = [Self::Trips, Self::Fares, Self::Map, Self::Rankings];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Trips),
            1 => Some(Self::Fares),
            2 => Some(Self::Map),
            3 => Some(Self::Rankings),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Trips => 0,
            Self::Fares => 1,
            Self::Map => 2,
            Self::Rankings => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Trips => "Trips",
            Self::Fares => "Fares",
            Self::Map => "Map",
            Self::Rankings => "Rankings",
        }
    }

    /// Panels shown on the page, in focus order.
    pub const fn panels(self) -> &'static [Panel] {
        match self {
            Self::Trips => &[Panel::Chart(ChartSlot::Hour), Panel::Chart(ChartSlot::Day)],
            Self::Fares => &[
                Panel::Chart(ChartSlot::FareBorough),
                Panel::Chart(ChartSlot::Scatter),
            ],
            Self::Map => &[Panel::Map],
            Self::Rankings => &[Panel::Chart(ChartSlot::TopZones), Panel::Routes],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Chart(ChartSlot),
    Map,
    Routes,
}

/// Why the initial load failed, as shown in the error panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub endpoint: Option<Endpoint>,
    pub message: String,
    pub api_url: String,
}

impl LoadFailure {
    pub fn from_error(error: &ApiError, api_url: &str) -> Self {
        Self {
            endpoint: Some(error.endpoint()),
            message: error.to_string(),
            api_url: api_url.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Dismissing(Instant),
    Hidden,
    Failed(LoadFailure),
}

/// Covers the dashboard until every series has arrived.
pub struct LoadingOverlay {
    pub phase: LoadPhase,
    pub throbber: ThrobberState,
    pub dismiss_fx: Mutex<Option<Effect>>,
}

impl LoadingOverlay {
    pub fn new() -> Self {
        Self {
            phase: LoadPhase::Loading,
            throbber: ThrobberState::default(),
            dismiss_fx: Mutex::new(None),
        }
    }

    /// Starts the fade-out: the overlay is dropped and the dashboard coalesces in.
    pub fn hide(&mut self) {
        if !matches!(self.phase, LoadPhase::Loading) {
            return;
        }
        self.phase = LoadPhase::Dismissing(Instant::now());
        if let Ok(effect) = self.dismiss_fx.get_mut() {
            *effect = Some(fx::coalesce(EffectTimer::from_ms(
                DISMISS_DURATION.as_millis() as u32,
                Interpolation::QuadOut,
            )));
        }
    }

    /// Replaces the spinner with the error panel. The overlay stays up.
    pub fn fail(&mut self, failure: LoadFailure) {
        self.phase = LoadPhase::Failed(failure);
    }

    pub fn tick(&mut self, now: Instant) {
        match self.phase {
            LoadPhase::Loading => self.throbber.calc_next(),
            LoadPhase::Dismissing(since) if now.duration_since(since) >= DISMISS_DURATION => {
                self.phase = LoadPhase::Hidden;
                if let Ok(effect) = self.dismiss_fx.get_mut() {
                    *effect = None;
                }
            }
            LoadPhase::Dismissing(_) | LoadPhase::Hidden | LoadPhase::Failed(_) => {}
        }
    }

    pub const fn is_hidden(&self) -> bool {
        matches!(self.phase, LoadPhase::Hidden)
    }

    /// The dashboard is drawn once data is in, including while the overlay fades.
    pub const fn reveals_dashboard(&self) -> bool {
        matches!(self.phase, LoadPhase::Dismissing(_) | LoadPhase::Hidden)
    }

    pub const fn failure(&self) -> Option<&LoadFailure> {
        match &self.phase {
            LoadPhase::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

impl Default for LoadingOverlay {
    fn default() -> Self {
        Self::new()
    }
}

pub struct App {
    pub running: bool,
    pub store: DashboardState,
    pub loading: LoadingOverlay,
    pub page: Page,
    pub focus: usize,
    pub show_help: bool,
    pub status_message: String,
    pub api_url: String,
    pub last_frame: Instant,
    pub last_tick: Duration,
}

impl App {
    pub fn new(api_url: impl Into<String>, map_metric: MapMetric) -> Self {
        Self {
            running: true,
            store: DashboardState::new(map_metric),
            loading: LoadingOverlay::new(),
            page: Page::Trips,
            focus: 0,
            show_help: false,
            status_message: String::new(),
            api_url: api_url.into(),
            last_frame: Instant::now(),
            last_tick: Duration::ZERO,
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        self.last_tick = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.loading.tick(now);
    }

    pub fn select_page(&mut self, page: Page) {
        self.page = page;
        self.focus = 0;
    }

    pub fn focused_panel(&self) -> Panel {
        let panels = self.page.panels();
        panels[self.focus.min(panels.len() - 1)]
    }

    pub fn focus_next_panel(&mut self) {
        self.focus = (self.focus + 1) % self.page.panels().len();
    }
}
