use crate::view::color::ChartTheme;
use crate::view::routes::RouteTable;
use crate::ui::widgets::panel_block;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Cell, Row, Table};
use ratatui::Frame;

/// Cells used by a full-width (100%) route bar.
const BAR_CELLS: usize = 20;
const ROUTE_BAR: Color = Color::Rgb(0x6c, 0x63, 0xff);

pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows {
        return 0;
    }

    if selected_index >= max_visible_rows {
        return selected_index.saturating_sub(max_visible_rows) + 1;
    }

    0
}

/// Bar cells for a route at `percent` of the busiest one. Non-zero
/// percentages always show at least one cell.
pub fn bar_cells(percent: u16) -> usize {
    if percent == 0 {
        return 0;
    }
    ((usize::from(percent) * BAR_CELLS + 50) / 100).max(1)
}

pub fn render_routes_panel(
    table: Option<&RouteTable>,
    focused: bool,
    theme: ChartTheme,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let title = table.map_or_else(
        || "Top Routes".to_string(),
        |table| format!("Top Routes ({} of {})", table.selected + 1, table.rows.len()),
    );
    let block = panel_block(title, focused, theme);

    let Some(table) = table else {
        f.render_widget(block, area);
        return;
    };

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Pickup"),
        Cell::from("Dropoff"),
        Cell::from("Trips"),
        Cell::from(""),
    ])
    .style(
        Style::default()
            .fg(Color::from(theme.text))
            .add_modifier(Modifier::BOLD),
    );

    // borders and header
    let max_visible_rows = area.height.saturating_sub(3) as usize;
    let offset = scroll_offset(table.rows.len(), max_visible_rows, table.selected);

    let rows = table
        .rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, route)| {
            let style = if focused && index == table.selected {
                Style::default()
                    .bg(Color::Rgb(0, 0, 238))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(route.rank.to_string()),
                Cell::from(route.pickup_zone.clone()),
                Cell::from(route.dropoff_zone.clone()),
                Cell::from(route.trips.clone()),
                Cell::from("█".repeat(bar_cells(route.bar_percent)))
                    .style(Style::default().fg(ROUTE_BAR)),
            ])
            .style(style)
        });

    let widths = [
        Constraint::Length(3),
        Constraint::Percentage(30),
        Constraint::Percentage(30),
        Constraint::Length(9),
        Constraint::Min(BAR_CELLS as u16),
    ];

    let widget = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);

    f.render_widget(widget, area);
}
