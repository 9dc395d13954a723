// UI module for taxi_dashboard
// Draws the dashboard and the loading overlay from application state

pub mod layout;
pub mod screens;
pub mod widgets;

use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    // The dashboard only shows once every series is in.
    if app.loading.reveals_dashboard() {
        screens::dashboard::render_dashboard(app, f);
    }
    screens::loading::render_loading(app, f);
}
