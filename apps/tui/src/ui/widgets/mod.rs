pub mod charts;
pub mod map;
pub mod popup;
pub mod tables;

use crate::view::color::ChartTheme;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line as TextLine;
use ratatui::widgets::{Block, Borders};

/// Bordered panel frame. The focused panel gets the accent border.
pub fn panel_block<'a>(
    title: impl Into<TextLine<'a>>,
    focused: bool,
    theme: ChartTheme,
) -> Block<'a> {
    let border = if focused {
        Color::Cyan
    } else {
        Color::from(theme.border)
    };

    Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::from(theme.text))
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}
