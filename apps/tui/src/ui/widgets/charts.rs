use crate::ui::widgets::panel_block;
use crate::view::charts::{BarOrientation, BarSpec, ChartBody, ChartSlot, ChartView, ValueFormat};
use crate::view::color::{ChartTheme, Rgb};
use crate::view::format::trim_float;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Axis, Bar, BarChart, BarGroup, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

/// Bar values are fixed point so fares keep their cents.
const BAR_SCALE: f64 = 100.0;
const CURSOR_POINT: Color = Color::Yellow;

pub fn render_chart_panel(
    view: Option<&ChartView>,
    slot: ChartSlot,
    focused: bool,
    theme: ChartTheme,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let block = panel_block(slot.title(), focused, theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(view) = view else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    match &view.body {
        ChartBody::Bars {
            orientation,
            bars,
            format,
            max_thickness,
        } => render_bars(
            bars,
            *orientation,
            *format,
            *max_thickness,
            view.cursor,
            focused,
            theme,
            f,
            chunks[0],
        ),
        ChartBody::Scatter {
            points,
            color,
            x_title,
            y_title,
        } => render_scatter(
            points,
            *color,
            (*x_title, *y_title),
            view.cursor,
            focused,
            theme,
            f,
            chunks[0],
        ),
    }

    render_tooltip(view, theme, f, chunks[1]);
}

/// Bar thickness that fits `count` bars into `extent` cells with a one-cell
/// gap, capped at `max_thickness`.
pub fn bar_thickness(extent: u16, count: usize, max_thickness: u16) -> u16 {
    if count == 0 {
        return 1;
    }
    let per_bar = extent as usize / count;
    (per_bar.saturating_sub(1) as u16).clamp(1, max_thickness.max(1))
}

fn scaled(value: f64) -> u64 {
    (value.max(0.0) * BAR_SCALE).round() as u64
}

fn render_bars(
    specs: &[BarSpec],
    orientation: BarOrientation,
    format: ValueFormat,
    max_thickness: u16,
    cursor: usize,
    focused: bool,
    theme: ChartTheme,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let bars: Vec<Bar<'_>> = specs
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            let mut style = Style::default().fg(Color::from(spec.color));
            if focused && index == cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Bar::default()
                .value(scaled(spec.value))
                .text_value(format.tick(spec.value))
                .label(TextLine::from(spec.label.clone()))
                .style(style)
                .value_style(
                    Style::default()
                        .fg(Color::from(theme.background))
                        .bg(Color::from(spec.color)),
                )
        })
        .collect();

    let max_value = specs
        .iter()
        .map(|spec| scaled(spec.value))
        .max()
        .unwrap_or(0)
        .max(1);

    let (direction, extent) = match orientation {
        BarOrientation::Vertical => (Direction::Vertical, area.width),
        BarOrientation::Horizontal => (Direction::Horizontal, area.height),
    };

    let chart = BarChart::default()
        .direction(direction)
        .data(BarGroup::default().bars(&bars))
        .max(max_value)
        .bar_gap(1)
        .bar_width(bar_thickness(extent, specs.len(), max_thickness))
        .label_style(Style::default().fg(Color::from(theme.text)));

    f.render_widget(chart, area);
}

/// `[0, max]` padded by a twentieth so the outermost points stay inside.
fn axis_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let max = values.fold(0.0_f64, f64::max);
    [0.0, if max > 0.0 { max * 1.05 } else { 1.0 }]
}

fn axis_labels(bounds: [f64; 2], prefix: &str) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|value| Span::raw(format!("{prefix}{}", trim_float(value.round()))))
        .collect()
}

fn render_scatter(
    points: &[(f64, f64)],
    color: Rgb,
    titles: (&str, &str),
    cursor: usize,
    focused: bool,
    theme: ChartTheme,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let highlight: Vec<(f64, f64)> = if focused {
        points.get(cursor).copied().into_iter().collect()
    } else {
        Vec::new()
    };

    let datasets = vec![
        Dataset::default()
            .name("Trips")
            .marker(Marker::Braille)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::from(color)))
            .data(points),
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(CURSOR_POINT).add_modifier(Modifier::BOLD))
            .data(&highlight),
    ];

    let x_bounds = axis_bounds(points.iter().map(|(distance, _)| *distance));
    let y_bounds = axis_bounds(points.iter().map(|(_, fare)| *fare));
    let axis_style = Style::default().fg(Color::from(theme.text));

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title(titles.0.to_string())
                .style(axis_style)
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds, "")),
        )
        .y_axis(
            Axis::default()
                .title(titles.1.to_string())
                .style(axis_style)
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds, "$")),
        );

    f.render_widget(chart, area);
}

fn render_tooltip(view: &ChartView, theme: ChartTheme, f: &mut Frame<'_>, area: Rect) {
    let (Some(label), Some(value)) = (view.label_at(view.cursor), view.tooltip_at(view.cursor))
    else {
        return;
    };

    let line = TextLine::from(vec![
        Span::styled(
            format!("{label}: "),
            Style::default()
                .fg(Color::from(theme.text))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(value, Style::default().fg(Color::White)),
    ]);

    f.render_widget(Paragraph::new(line), area);
}
