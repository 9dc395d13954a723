use crate::app::state::{App, LoadFailure, LoadPhase};
use crate::ui::widgets::popup::centered_box;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use tachyonfx::EffectRenderer;
use throbber_widgets_tui::{Throbber, WhichUse, BRAILLE_SIX};

const DATABASE_PATH: &str = "database/taxi_data.db";

/// First line of the error panel.
pub fn failure_hint(failure: &LoadFailure) -> String {
    format!(
        "Error loading data. Make sure the API server is running on {} and the database {DATABASE_PATH} exists.",
        failure.api_url
    )
}

/// Draws whatever the loading overlay needs for the current phase. Runs after
/// the dashboard so the overlay stays on top.
pub fn render_loading(app: &App, f: &mut Frame<'_>) {
    let area = f.area();
    match &app.loading.phase {
        LoadPhase::Loading => render_spinner(app, f, area),
        LoadPhase::Failed(failure) => render_error_panel(failure, f, area),
        LoadPhase::Dismissing(_) => {
            if let Ok(mut effect) = app.loading.dismiss_fx.lock() {
                if let Some(effect) = effect.as_mut() {
                    f.buffer_mut().render_effect(effect, area, app.last_tick);
                }
            }
        }
        LoadPhase::Hidden => {}
    }
}

fn render_spinner(app: &App, f: &mut Frame<'_>, area: Rect) {
    f.render_widget(Clear, area);

    let throbber = Throbber::default()
        .label("Loading taxi trip data...")
        .style(Style::default().fg(Color::Gray))
        .throbber_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .throbber_set(BRAILLE_SIX)
        .use_type(WhichUse::Spin);

    let panel = centered_box(40, 3, area);
    let paragraph = Paragraph::new(throbber.to_line(&app.loading.throbber))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(paragraph, panel);
}

fn render_error_panel(failure: &LoadFailure, f: &mut Frame<'_>, area: Rect) {
    f.render_widget(Clear, area);

    let lines = vec![
        TextLine::from(Span::styled(
            failure_hint(failure),
            Style::default().fg(Color::White),
        )),
        TextLine::from(""),
        TextLine::from(Span::styled(
            failure.message.clone(),
            Style::default().fg(Color::Red),
        )),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Press q to quit",
            Style::default().fg(Color::Gray),
        )),
    ];

    let panel = centered_box(72, 10, area);
    let paragraph = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Error ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(paragraph, panel);
}
