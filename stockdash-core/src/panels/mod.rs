//! Panel renderers: pure functions from (dataset, domain, selection) to a
//! fresh `Scene` plus a machine-readable `Outcome`.
//!
//! Panels:
//! - Overview: full-extent close price, volume, split markers; hosts the brush
//! - Detail: the brushed window, re-scaled to fit the visible subset
//! - Model: actual vs. fitted per ticker with an R² box
//! - Scatter: date-joined pair with correlation and OLS fit line

pub mod chrome;
pub mod detail;
pub mod model;
pub mod overview;
pub mod scatter;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::PriceField;
use crate::domain::{Ticker, TickerPair};
use crate::scene::Scene;
use crate::stats::Regression;

pub const NO_DATA_LOADED: &str = "No data loaded.";
pub const OVERVIEW_EMPTY: &str = "No data for the selected stocks.";
pub const DETAIL_EMPTY: &str = "No data in this selected range.";
pub const MODEL_EMPTY: &str = "No data to display. Check selection or date range.";
pub const SCATTER_EMPTY: &str = "Not enough data in selection for scatter plot.";

/// The four dashboard panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelKind {
    Overview,
    Detail,
    Model,
    Scatter,
}

impl PanelKind {
    pub const ALL: [PanelKind; 4] = [
        PanelKind::Overview,
        PanelKind::Detail,
        PanelKind::Model,
        PanelKind::Scatter,
    ];

    pub fn index(self) -> usize {
        match self {
            PanelKind::Overview => 0,
            PanelKind::Detail => 1,
            PanelKind::Model => 2,
            PanelKind::Scatter => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        PanelKind::ALL.get(i).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            PanelKind::Overview => "Overview",
            PanelKind::Detail => "Detail",
            PanelKind::Model => "Model",
            PanelKind::Scatter => "Scatter",
        }
    }

    pub fn next(self) -> PanelKind {
        PanelKind::ALL[(self.index() + 1) % PanelKind::ALL.len()]
    }

    pub fn prev(self) -> PanelKind {
        PanelKind::ALL[(self.index() + PanelKind::ALL.len() - 1) % PanelKind::ALL.len()]
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Correlation and fit computed by the scatter panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterStats {
    pub pair: TickerPair,
    pub field: PriceField,
    pub points: usize,
    pub correlation: f64,
    pub fit: Regression,
}

/// What a render produced, independent of the drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Outcome {
    Placeholder(String),
    /// Overview / Detail: number of line series and points drawn.
    Series { series: usize, points: usize },
    /// R² for every selected ticker, in checkbox order (NaN when undefined).
    Model {
        points: usize,
        r_squared: Vec<(Ticker, f64)>,
    },
    Scatter(ScatterStats),
}

impl Outcome {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Outcome::Placeholder(_))
    }

    pub fn placeholder(&self) -> Option<&str> {
        match self {
            Outcome::Placeholder(msg) => Some(msg),
            _ => None,
        }
    }
}

/// A complete rendering of one panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub kind: PanelKind,
    pub scene: Scene,
    pub outcome: Outcome,
}

impl PanelView {
    pub(crate) fn placeholder(kind: PanelKind, mut scene: Scene, message: &str, at: (f64, f64)) -> Self {
        scene.set_placeholder(message, at);
        Self {
            kind,
            scene,
            outcome: Outcome::Placeholder(message.to_string()),
        }
    }
}
