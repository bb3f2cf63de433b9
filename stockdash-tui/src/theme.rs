//! Color tokens for the dashboard TUI.
//!
//! Dark background with a cyan accent; series keep the fixed per-ticker
//! colors so the terminal matches every other rendering of a scene.

use ratatui::style::{Color, Modifier, Style};

use stockdash_core::scene;
use stockdash_core::Ticker;

/// Terminal palette for panel chrome and scene text.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Canvas and box fill
    pub background: Color,
    /// Focus, highlights, brush
    pub accent: Color,
    /// Rejected toggles and refreshes
    pub warning: Color,
    /// Load failures
    pub error: Color,
    /// Secondary text, unfocused borders
    pub muted: Color,
    /// Titles, labels, scene text
    pub text_primary: Color,
    /// Tick labels and placeholder messages
    pub text_secondary: Color,
    /// Axis lines and tick labels
    pub axis: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            warning: Color::Rgb(255, 140, 0),
            error: Color::Rgb(255, 20, 147),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
            axis: Color::Rgb(120, 120, 130),
        }
    }

    /// Scene colors are drawn for a light page; the near-black text and
    /// white box colors are swapped for readable terminal equivalents.
    pub fn scene_color(&self, color: scene::Color) -> Color {
        match color {
            scene::Color::TEXT => self.text_primary,
            scene::Color::BOX => self.background,
            scene::Color { r, g, b } => Color::Rgb(r, g, b),
        }
    }

    pub fn ticker_color(&self, ticker: Ticker) -> Color {
        self.scene_color(ticker.color())
    }
}

// Style shortcuts for the default theme.

pub fn accent() -> Style {
    Style::default().fg(Theme::default().accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn warning() -> Style {
    Style::default().fg(Theme::default().warning)
}

pub fn error() -> Style {
    Style::default().fg(Theme::default().error)
}

pub fn muted() -> Style {
    Style::default().fg(Theme::default().muted)
}

pub fn text() -> Style {
    Style::default().fg(Theme::default().text_primary)
}

pub fn ticker(t: Ticker) -> Style {
    Style::default().fg(Theme::default().ticker_color(t))
}

pub fn panel_border(focused: bool) -> Style {
    if focused {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(focused: bool) -> Style {
    if focused {
        accent_bold()
    } else {
        Style::default().fg(Theme::default().text_secondary)
    }
}
