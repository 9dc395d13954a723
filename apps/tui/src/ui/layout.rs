use crate::app::state::Page;
use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

/// Width of the legend and tooltip column beside the map canvas.
const MAP_SIDEBAR_WIDTH: u16 = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    pub kpis: Rect,
    pub tabs: Rect,
    pub body: Rect,
    pub footer: Rect,
}

/// Splits the terminal into the KPI row, page tabs, page body and footer.
pub fn dashboard_layout(area: Rect) -> DashboardLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // KPI cards
            Constraint::Length(1), // Page tabs
            Constraint::Min(5),    // Page panels
            Constraint::Length(1), // Shortcuts / status
        ])
        .split(area.inner(Margin::new(1, 0)));

    DashboardLayout {
        kpis: chunks[0],
        tabs: chunks[1],
        body: chunks[2],
        footer: chunks[3],
    }
}

pub fn kpi_areas(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area)
        .to_vec()
}

/// One rect per entry of [`Page::panels`], in the same order.
pub fn panel_areas(page: Page, body: Rect) -> Vec<Rect> {
    match page.panels().len() {
        1 => vec![body],
        count => Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, count as u32); count])
            .split(body)
            .to_vec(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapLayout {
    pub canvas: Rect,
    pub legend: Rect,
    pub tooltip: Rect,
}

/// Areas inside the bordered map panel.
pub fn map_layout(panel: Rect) -> MapLayout {
    let inner = panel.inner(Margin::new(1, 1));
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(MAP_SIDEBAR_WIDTH)])
        .split(inner);
    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(columns[1]);

    MapLayout {
        canvas: columns[0],
        legend: sidebar[0],
        tooltip: sidebar[1],
    }
}

/// Where the map canvas lands for a terminal of `area`, used to translate
/// mouse positions.
pub fn map_canvas_area(area: Rect) -> Rect {
    let body = dashboard_layout(area).body;
    map_layout(panel_areas(Page::Map, body)[0]).canvas
}
