//! Top-level UI layout: 2×2 panel grid with a status bar.

pub mod controls;
pub mod overlays;
pub mod scene_view;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use stockdash_core::PanelKind;

use crate::app::{App, Overlay};
use crate::theme::{self, Theme};
use controls::ControlRow;
use scene_view::SceneView;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    for (panel, area) in PanelKind::ALL.into_iter().zip(grid(main_area)) {
        draw_panel(f, area, app, panel);
    }

    status_bar::render(f, status_area, app);

    if app.overlay == Overlay::Help {
        overlays::render_help(f, main_area);
    }
}

/// Overview, Detail on top; Model, Scatter below.
fn grid(area: Rect) -> [Rect; 4] {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let halves = |r: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(r)
    };
    let top = halves(rows[0]);
    let bottom = halves(rows[1]);
    [top[0], top[1], bottom[0], bottom[1]]
}

fn draw_panel(f: &mut Frame, area: Rect, app: &App, panel: PanelKind) {
    let focused = app.focus == panel;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(focused));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let dashboard = &app.dashboard;
    f.render_widget(
        ControlRow::new(dashboard.controls().group(panel), dashboard.domain()),
        parts[0],
    );

    let theme = Theme::default();
    let brush = if panel == PanelKind::Overview {
        app.brush.map(|b| (b.start, b.end))
    } else {
        None
    };
    f.render_widget(
        SceneView::new(&dashboard.view(panel).scene, &theme).brush(brush),
        parts[1],
    );
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
