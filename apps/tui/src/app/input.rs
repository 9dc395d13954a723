mod helpers;

use crate::app::loader::on_map_metric_change;
use crate::app::state::{App, Page, Panel};
use crate::domain::MapMetric;
use crate::ui::layout::map_canvas_area;
use crossterm::event::{KeyCode, MouseEvent, MouseEventKind};
use helpers::{wrap_decrement, wrap_increment};
use ratatui::layout::Rect;

pub fn handle_input(app: &mut App, key: KeyCode) {
    // A status message lasts until the next key press.
    app.status_message.clear();

    if handle_help_toggle(app, key) {
        return;
    }

    if matches!(key, KeyCode::Char('q') | KeyCode::Esc) {
        app.running = false;
        return;
    }

    // Nothing to navigate while the overlay covers the dashboard.
    if !app.loading.reveals_dashboard() {
        return;
    }

    match key {
        KeyCode::Left => {
            let index = wrap_decrement(app.page.index(), Page::ALL.len());
            app.select_page(Page::ALL[index]);
        }
        KeyCode::Right => {
            let index = wrap_increment(app.page.index(), Page::ALL.len());
            app.select_page(Page::ALL[index]);
        }
        KeyCode::Char(digit @ '1'..='4') => {
            if let Some(page) = digit
                .to_digit(10)
                .and_then(|number| Page::from_index(number as usize - 1))
            {
                app.select_page(page);
            }
        }
        KeyCode::Tab => app.focus_next_panel(),
        KeyCode::Up => move_selection(app, false),
        KeyCode::Down => move_selection(app, true),
        KeyCode::Char('m') => change_metric(app, app.store.map_metric.next()),
        KeyCode::Char('c') => change_metric(app, MapMetric::Count),
        KeyCode::Char('f') => change_metric(app, MapMetric::Fare),
        KeyCode::Char('d') => change_metric(app, MapMetric::Distance),
        KeyCode::Char('+' | '=') => zoom(app, true),
        KeyCode::Char('-') => zoom(app, false),
        _ => {}
    }
}

fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if key == KeyCode::F(1) {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}

fn move_selection(app: &mut App, forward: bool) {
    match app.focused_panel() {
        Panel::Chart(slot) => {
            if let Some(view) = app.store.charts.slot_mut(slot).as_mut() {
                view.move_cursor(forward);
            }
        }
        Panel::Map => {
            if let Some(layer) = app
                .store
                .map
                .as_mut()
                .and_then(|map| map.zone_layer.as_mut())
            {
                layer.step_hover(forward);
            }
        }
        Panel::Routes => {
            if let Some(table) = app.store.routes.as_mut() {
                let len = table.rows.len();
                table.selected = if forward {
                    wrap_increment(table.selected, len)
                } else {
                    wrap_decrement(table.selected, len)
                };
            }
        }
    }
}

fn change_metric(app: &mut App, metric: MapMetric) {
    if on_map_metric_change(&mut app.store, metric) {
        app.status_message = format!("Map colored by {}", metric.option_label());
    }
}

fn zoom(app: &mut App, zoom_in: bool) {
    if app.page != Page::Map {
        return;
    }
    if let Some(map) = app.store.map.as_mut() {
        if zoom_in {
            map.viewport.zoom_in();
        } else {
            map.viewport.zoom_out();
        }
    }
}

/// Pointer events over the map canvas. `area` is the full terminal area the
/// dashboard was last drawn into.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent, area: Rect) {
    if !app.loading.reveals_dashboard() || app.show_help || app.page != Page::Map {
        return;
    }
    let Some(map) = app.store.map.as_mut() else {
        return;
    };

    let point = map
        .viewport
        .to_geo(map_canvas_area(area), mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            if let Some(layer) = map.zone_layer.as_mut() {
                layer.hover_at(point);
            }
        }
        MouseEventKind::ScrollUp if point.is_some() => map.viewport.zoom_in(),
        MouseEventKind::ScrollDown if point.is_some() => map.viewport.zoom_out(),
        _ => {}
    }
}
