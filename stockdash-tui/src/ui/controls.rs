//! Checkbox row shown above each panel's chart.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use stockdash_core::controller::CheckboxGroup;
use stockdash_core::TimeDomain;

use crate::theme;

/// `[x] AMD  [ ] INTEL  [x] NVIDIA  ⏎ apply` plus the inline warning.
pub struct ControlRow<'a> {
    group: Option<&'a CheckboxGroup>,
    domain: Option<TimeDomain>,
}

impl<'a> ControlRow<'a> {
    pub fn new(group: Option<&'a CheckboxGroup>, domain: Option<TimeDomain>) -> Self {
        Self { group, domain }
    }

    fn line(&self) -> Line<'static> {
        let Some(group) = self.group else {
            // Detail has no checkboxes; show the window it is following.
            let text = match self.domain {
                Some(d) => format!("{} → {}", d.start(), d.end()),
                None => "no date range".to_string(),
            };
            return Line::from(Span::styled(text, theme::muted()));
        };

        let mut spans = Vec::new();
        for &ticker in group.available() {
            let mark = if group.is_checked(ticker) { "[x] " } else { "[ ] " };
            spans.push(Span::styled(mark, theme::text()));
            spans.push(Span::styled(format!("{ticker}  "), theme::ticker(ticker)));
        }
        spans.push(Span::styled("⏎ apply", theme::muted()));
        if let Some(warning) = group.warning() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(warning, theme::warning()));
        }
        Line::from(spans)
    }
}

impl<'a> Widget for ControlRow<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line()).render(area, buf);
    }
}
