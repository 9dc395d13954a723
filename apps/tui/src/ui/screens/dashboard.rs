use crate::app::state::{App, Page, Panel};
use crate::ui::layout::{dashboard_layout, kpi_areas, panel_areas};
use crate::ui::widgets::charts::render_chart_panel;
use crate::ui::widgets::map::render_map_panel;
use crate::ui::widgets::panel_block;
use crate::ui::widgets::popup::centered_rect;
use crate::ui::widgets::tables::render_routes_panel;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};
use ratatui::Frame;

const ACCENT: Color = Color::Rgb(0x6c, 0x63, 0xff);

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let area = f.area();
    let layout = dashboard_layout(area);

    render_kpi_cards(app, f, layout.kpis);
    render_page_tabs(app, f, layout.tabs);
    render_page(app, f, layout.body);
    render_footer(app, f, layout.footer);

    if app.show_help {
        render_help_popup(f, area);
    }
}

fn render_kpi_cards(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(kpis) = app.store.kpis.as_ref() else {
        return;
    };
    let theme = app.store.theme();

    for ((title, value), card) in kpis.cards().into_iter().zip(kpi_areas(area)) {
        let paragraph = Paragraph::new(Span::styled(
            value.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(panel_block(title, false, theme));
        f.render_widget(paragraph, card);
    }
}

fn render_page_tabs(app: &App, f: &mut Frame<'_>, area: Rect) {
    let titles = Page::ALL
        .iter()
        .enumerate()
        .map(|(index, page)| TextLine::from(format!("{} {}", index + 1, page.label())))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .select(app.page.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

fn render_page(app: &App, f: &mut Frame<'_>, area: Rect) {
    let theme = app.store.theme();
    let focused = app.focused_panel();

    for (panel, panel_area) in app.page.panels().iter().zip(panel_areas(app.page, area)) {
        let is_focused = *panel == focused;
        match panel {
            Panel::Chart(slot) => render_chart_panel(
                app.store.charts.get(*slot),
                *slot,
                is_focused,
                theme,
                f,
                panel_area,
            ),
            Panel::Map => render_map_panel(
                app.store.map.as_ref(),
                app.store.map_metric,
                is_focused,
                theme,
                f,
                panel_area,
            ),
            Panel::Routes => {
                render_routes_panel(app.store.routes.as_ref(), is_focused, theme, f, panel_area);
            }
        }
    }
}

fn render_footer(app: &App, f: &mut Frame<'_>, area: Rect) {
    let line = if app.status_message.is_empty() {
        shortcuts_line()
    } else {
        TextLine::from(Span::styled(
            app.status_message.clone(),
            Style::default().fg(Color::Green),
        ))
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn key_hint(key: &'static str, action: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(
            key,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(action, Style::default().fg(Color::Gray)),
    ]
}

fn shortcuts_line() -> TextLine<'static> {
    TextLine::from(
        [
            key_hint("←/→", ": Page | "),
            key_hint("Tab", ": Focus | "),
            key_hint("↑/↓", ": Select | "),
            key_hint("m", ": Map metric | "),
            key_hint("+/-", ": Zoom | "),
            key_hint("F1", ": Help | "),
            key_hint("q", ": Quit"),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>(),
    )
}

fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    f.render_widget(Clear, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let bindings = [
        ("Left/Right", "Previous / next page"),
        ("1-4", "Jump to a page"),
        ("Tab", "Focus the next panel on the page"),
        ("Up/Down", "Move the chart cursor, map hover or route selection"),
        ("m", "Cycle the map metric"),
        ("c / f / d", "Color the map by pickups, fare or distance"),
        ("+ / -", "Zoom the map"),
        ("Mouse", "Hover zones on the map, scroll to zoom"),
        ("F1", "Toggle this help"),
        ("q / Esc", "Quit"),
    ];

    let mut lines = vec![
        TextLine::from(Span::styled(
            "NYC Taxi Trip Dashboard",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
    ];
    lines.extend(bindings.iter().map(|(key, action)| {
        TextLine::from(vec![
            Span::styled(
                format!("  {key:<11}"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(*action),
        ])
    }));
    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled(
        "Press F1 or Esc to close",
        Style::default().fg(Color::Gray),
    )));

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(help_block)
            .wrap(Wrap { trim: false }),
        popup_area,
    );
}
