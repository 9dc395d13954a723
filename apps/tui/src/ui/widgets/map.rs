use crate::domain::MapMetric;
use crate::ui::layout::map_layout;
use crate::ui::widgets::panel_block;
use crate::view::color::{ChartTheme, Rgb};
use crate::view::map::{BaseMap, Legend, Zone, ZoneLayer};
use geo::{BoundingRect, LineString};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine, Map as CanvasMap, Painter, Shape};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

/// Pixel grid of the canvas in geographic coordinates.
#[derive(Debug, Clone, Copy)]
struct FillGrid {
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    columns: usize,
    rows: usize,
}

impl FillGrid {
    /// Half-block canvases have two pixels per cell vertically.
    fn for_area(area: Rect, x_bounds: [f64; 2], y_bounds: [f64; 2]) -> Self {
        Self {
            x_bounds,
            y_bounds,
            columns: usize::from(area.width),
            rows: usize::from(area.height) * 2,
        }
    }

    fn step(&self) -> (f64, f64) {
        (
            (self.x_bounds[1] - self.x_bounds[0]) / self.columns.max(1) as f64,
            (self.y_bounds[1] - self.y_bounds[0]) / self.rows.max(1) as f64,
        )
    }

    /// Pixel indices whose centers fall within `[min, max]` on one axis.
    fn span(min: f64, max: f64, origin: f64, step: f64, count: usize) -> std::ops::Range<usize> {
        if step <= 0.0 || count == 0 {
            return 0..0;
        }
        let first = ((min - origin) / step - 0.5).ceil().max(0.0) as usize;
        let last = ((max - origin) / step - 0.5).floor();
        if last < 0.0 {
            return 0..0;
        }
        first.min(count)..(last as usize + 1).min(count)
    }
}

/// Scanline fill of every zone. Later zones paint over earlier ones.
struct ZoneFill<'a> {
    zones: &'a [Zone],
    background: Rgb,
    grid: FillGrid,
}

impl Shape for ZoneFill<'_> {
    fn draw(&self, painter: &mut Painter<'_, '_>) {
        let (dx, dy) = self.grid.step();
        for zone in self.zones {
            let Some((lon_min, lon_max, lat_min, lat_max)) = zone_bbox(zone) else {
                continue;
            };
            let color = Color::from(zone.style.fill.over(self.background, zone.style.fill_opacity));
            let columns = FillGrid::span(lon_min, lon_max, self.grid.x_bounds[0], dx, self.grid.columns);
            let rows = FillGrid::span(lat_min, lat_max, self.grid.y_bounds[0], dy, self.grid.rows);

            for row in rows {
                let lat = (row as f64 + 0.5).mul_add(dy, self.grid.y_bounds[0]);
                for column in columns.clone() {
                    let lon = (column as f64 + 0.5).mul_add(dx, self.grid.x_bounds[0]);
                    if !zone.contains(lon, lat) {
                        continue;
                    }
                    if let Some((x, y)) = painter.get_point(lon, lat) {
                        painter.paint(x, y, color);
                    }
                }
            }
        }
    }
}

fn zone_bbox(zone: &Zone) -> Option<(f64, f64, f64, f64)> {
    zone.shape
        .bounding_rect()
        .map(|rect| (rect.min().x, rect.max().x, rect.min().y, rect.max().y))
}

fn draw_outline(ctx: &mut Context<'_>, zone: &Zone, grid: FillGrid) {
    let color = Color::from(zone.style.outline);
    let (dx, _) = grid.step();
    for pass in 0..zone.style.weight.max(1) {
        let offset = f64::from(pass) * dx;
        let rings = zone
            .shape
            .iter()
            .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()));
        for segment in rings.flat_map(LineString::lines) {
            ctx.draw(&CanvasLine {
                x1: segment.start.x + offset,
                y1: segment.start.y,
                x2: segment.end.x + offset,
                y2: segment.end.y,
                color,
            });
        }
    }
}

pub fn render_map_panel(
    map: Option<&BaseMap>,
    metric: MapMetric,
    focused: bool,
    theme: ChartTheme,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let title = format!("Pickup Zones: {}", metric.option_label());
    f.render_widget(panel_block(title, focused, theme), area);

    let Some(map) = map else {
        return;
    };

    let layout = map_layout(area);
    render_canvas(map, theme, f, layout.canvas);
    if let Some(legend) = map.legend.as_ref() {
        render_legend(legend, theme, f, layout.legend);
    }
    render_zone_tooltip(map.zone_layer.as_ref(), map.viewport.zoom, theme, f, layout.tooltip);
}

fn render_canvas(map: &BaseMap, theme: ChartTheme, f: &mut Frame<'_>, area: Rect) {
    let (x_bounds, y_bounds) = map.viewport.bounds(area.width, area.height);
    let grid = FillGrid::for_area(area, x_bounds, y_bounds);
    let background = theme.background;

    let canvas = Canvas::default()
        .marker(Marker::HalfBlock)
        .background_color(Color::from(background))
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            ctx.draw(&CanvasMap {
                resolution: map.tile_layer.resolution,
                color: Color::from(map.tile_layer.color),
            });

            let Some(layer) = map.zone_layer.as_ref() else {
                return;
            };
            ctx.draw(&ZoneFill {
                zones: &layer.zones,
                background,
                grid,
            });
            for (index, zone) in layer.zones.iter().enumerate() {
                if layer.hovered != Some(index) {
                    draw_outline(ctx, zone, grid);
                }
            }
            if let Some(zone) = layer.hovered.and_then(|index| layer.zones.get(index)) {
                draw_outline(ctx, zone, grid);
            }
        });

    f.render_widget(canvas, area);
}

fn render_legend(legend: &Legend, theme: ChartTheme, f: &mut Frame<'_>, area: Rect) {
    let lines: Vec<TextLine<'_>> = legend
        .entries
        .iter()
        .map(|entry| {
            TextLine::from(vec![
                Span::styled("██ ", Style::default().fg(Color::from(entry.color))),
                Span::styled(entry.label.clone(), Style::default().fg(Color::White)),
            ])
        })
        .collect();

    let block = Block::default()
        .title(legend.title)
        .title_style(Style::default().fg(Color::from(theme.text)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::from(theme.border)));

    f.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

fn render_zone_tooltip(
    layer: Option<&ZoneLayer>,
    zoom: u8,
    theme: ChartTheme,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let label_style = Style::default().fg(Color::from(theme.text));
    let tooltip = layer.and_then(|layer| layer.hovered.and_then(|index| layer.tooltip(index)));

    let lines = tooltip.map_or_else(
        || {
            vec![
                TextLine::from(Span::styled("Hover a zone", label_style)),
                TextLine::from(Span::styled(format!("Zoom {zoom}"), label_style)),
            ]
        },
        |tooltip| {
            let mut lines = vec![TextLine::from(Span::styled(
                tooltip.title,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ))];
            lines.extend(tooltip.lines.into_iter().map(|(label, value)| {
                TextLine::from(vec![
                    Span::styled(format!("{label}: "), label_style),
                    Span::styled(value, Style::default().fg(Color::Yellow)),
                ])
            }));
            lines
        },
    );

    f.render_widget(
        Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true }),
        area,
    );
}
