//! Application state: single-owner, main-thread only.
//!
//! The `Dashboard` owns everything that gets rendered; this layer adds
//! focus, the keyboard brush cursor, overlays and the status line.

use stockdash_core::controller::Toggle;
use stockdash_core::{Dashboard, Event, PanelKind, RedrawSet, Ticker};

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Modal drawn over the panel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    /// Key reference; any key closes it
    Help,
}

/// Keyboard-driven brush over the overview plot, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushCursor {
    /// Left edge
    pub start: f64,
    /// Right edge, always greater than `start`
    pub end: f64,
}

/// Brush steps are this fraction of the plot width.
const BRUSH_STEP: f64 = 1.0 / 40.0;
/// A new brush covers this fraction of the plot, centered.
const BRUSH_INITIAL: f64 = 0.25;

/// Everything the event loop reads and the key handler mutates.
pub struct App {
    /// Data, controls and the rendered panels
    pub dashboard: Dashboard,
    /// Panel that receives checkbox and refresh keys
    pub focus: PanelKind,
    /// Active modal, if any
    pub overlay: Overlay,
    /// Brush as last committed by the controller; `None` when cleared
    pub brush: Option<BrushCursor>,
    /// Status bar text and its severity
    pub status_message: Option<(String, StatusLevel)>,
    /// Cleared by the quit key to end the loop
    pub running: bool,
}

impl App {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard,
            focus: PanelKind::Overview,
            overlay: Overlay::None,
            brush: None,
            status_message: None,
            running: true,
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }

    fn plot_span(&self) -> (f64, f64) {
        self.dashboard.config().layout.x_range()
    }

    /// Start a centered brush, or re-send the current one.
    pub fn begin_brush(&mut self) {
        let (left, right) = self.plot_span();
        let cursor = self.brush.unwrap_or_else(|| {
            let mid = (left + right) / 2.0;
            let half = (right - left) * BRUSH_INITIAL / 2.0;
            BrushCursor {
                start: mid - half,
                end: mid + half,
            }
        });
        self.apply_brush(cursor);
    }

    /// Shift the brush by `steps` without changing its width.
    pub fn move_brush(&mut self, steps: f64) {
        let Some(cursor) = self.brush else {
            self.set_warning("Press b to start a brush");
            return;
        };
        let (left, right) = self.plot_span();
        let width = cursor.end - cursor.start;
        let delta = (right - left) * BRUSH_STEP * steps;
        let start = (cursor.start + delta).min(right - width).max(left);
        self.apply_brush(BrushCursor {
            start,
            end: start + width,
        });
    }

    /// Grow (positive) or shrink the brush from its right edge.
    pub fn resize_brush(&mut self, steps: f64) {
        let Some(cursor) = self.brush else {
            self.set_warning("Press b to start a brush");
            return;
        };
        let (left, right) = self.plot_span();
        let step = (right - left) * BRUSH_STEP;
        let end = (cursor.end + step * steps).min(right).max(cursor.start + step);
        self.apply_brush(BrushCursor {
            start: cursor.start,
            end,
        });
    }

    pub fn clear_brush(&mut self) {
        self.brush = None;
        self.dispatch(Event::Brush { selection: None });
        self.set_status("Brush cleared");
    }

    pub fn reset_domain(&mut self) {
        self.brush = None;
        self.dispatch(Event::ResetDomain);
        self.set_status("Showing full date range");
    }

    fn apply_brush(&mut self, cursor: BrushCursor) {
        self.dispatch(Event::Brush {
            selection: Some((cursor.start, cursor.end)),
        });
        // keep whatever the controller clamped to
        self.brush = self
            .dashboard
            .state()
            .brush
            .map(|(start, end)| BrushCursor { start, end });
        if let Some(domain) = self.dashboard.domain() {
            self.set_status(format!("Range {} to {}", domain.start(), domain.end()));
        }
    }

    /// Toggle a checkbox on the focused panel.
    pub fn toggle(&mut self, ticker: Ticker) {
        let panel = self.focus;
        match self.dashboard.toggle(panel, ticker) {
            None => self.set_warning(format!("{panel} follows the overview selection")),
            Some(Toggle::Reverted) => {
                self.set_warning(format!("{ticker} not checked: pair is full"))
            }
            Some(Toggle::NoSuchControl) => {
                self.set_warning(format!("{panel} has no {ticker} checkbox"))
            }
            Some(Toggle::Checked | Toggle::Unchecked) => {
                self.set_status(format!("{panel}: press Enter to apply"))
            }
        }
    }

    /// Commit the focused panel's pending selection.
    pub fn refresh(&mut self) {
        let panel = self.focus;
        let redraw = self.dispatch(Event::Refresh(panel));
        if redraw.is_empty() {
            let warning = self
                .dashboard
                .controls()
                .group(panel)
                .and_then(|g| g.warning())
                .unwrap_or("Nothing to refresh");
            self.set_warning(warning);
        } else {
            self.set_status(format!("{panel} refreshed"));
        }
    }

    pub fn dispatch(&mut self, event: Event) -> RedrawSet {
        self.dashboard.handle(event)
    }
}
