//! Help overlay.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::theme;
use crate::ui::centered_rect;

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Keys (any key closes) ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global");
    key(&mut lines, "1-4", "Focus panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle focus forward / back");
    key(&mut lines, "a / i / n", "Toggle AMD / INTEL / NVIDIA on the focused panel");
    key(&mut lines, "Enter", "Apply the focused panel's checkboxes");
    key(&mut lines, "?", "This help");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Overview");
    key(&mut lines, "b", "Start a brush (or re-apply the current one)");
    key(&mut lines, "h / l, ← / →", "Move the brush");
    key(&mut lines, "H / L, Shift+← / →", "Shrink / grow the brush");
    key(&mut lines, "x", "Clear the brush");
    key(&mut lines, "r", "Reset to the full date range");
    lines.push(Line::from(""));

    section(&mut lines, "Selections");
    key(&mut lines, "Overview", "At least one stock; Detail follows it");
    key(&mut lines, "Model", "At least one stock");
    key(&mut lines, "Scatter", "Exactly two stocks; a third check is undone");

    f.render_widget(Paragraph::new(lines).block(block), popup);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {keys:>20}  "), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
