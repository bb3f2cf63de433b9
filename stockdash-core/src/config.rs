//! Serializable dashboard configuration.
//!
//! Loaded from TOML; every field has a default so an empty file (or no file)
//! yields the canonical dashboard. Dates are quoted ISO strings
//! (`model_era_start = "2016-01-01"`).

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Ticker;
use crate::panels::PanelKind;

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("{panel} panel is missing a required control: {control}")]
    MissingControl { panel: PanelKind, control: String },

    #[error("invalid initial selection for {panel} panel: {reason}")]
    InvalidSelection { panel: PanelKind, reason: String },
}

/// Which downstream panels follow the overview brush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrushFanOut {
    /// Detail, Model and Scatter all follow the brushed domain.
    #[default]
    AllPanels,
    /// Only Detail follows; Model and Scatter keep fixed domains.
    DetailOnly,
}

/// Which price column the scatter panel correlates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceField {
    Close,
    #[default]
    AdjustedClose,
}

impl PriceField {
    pub fn label(self) -> &'static str {
        match self {
            PriceField::Close => "Close",
            PriceField::AdjustedClose => "Adjusted Close",
        }
    }
}

/// Optional CSV inputs. When both are absent the demo dataset is used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub prices: Option<PathBuf>,
    pub model: Option<PathBuf>,
}

/// Margin convention shared by all panels, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 26.0,
            right: 20.0,
            bottom: 46.0,
            left: 60.0,
        }
    }
}

/// Logical drawing-surface sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub width: f64,
    pub overview_height: f64,
    pub detail_height: f64,
    pub model_height: f64,
    pub scatter_height: f64,
    pub margin: Margin,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 900.0,
            overview_height: 250.0,
            detail_height: 250.0,
            model_height: 360.0,
            scatter_height: 320.0,
            margin: Margin::default(),
        }
    }
}

impl Layout {
    pub fn height(&self, panel: PanelKind) -> f64 {
        match panel {
            PanelKind::Overview => self.overview_height,
            PanelKind::Detail => self.detail_height,
            PanelKind::Model => self.model_height,
            PanelKind::Scatter => self.scatter_height,
        }
    }

    /// Horizontal plot range `[left, width - right]`.
    pub fn x_range(&self) -> (f64, f64) {
        (self.margin.left, self.width - self.margin.right)
    }

    /// Vertical plot range for a panel, bottom first (y grows downward).
    pub fn y_range(&self, panel: PanelKind) -> (f64, f64) {
        (self.height(panel) - self.margin.bottom, self.margin.top)
    }
}

/// Which checkboxes a panel offers and which start checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelControlConfig {
    #[serde(default = "all_tickers")]
    pub tickers: Vec<Ticker>,
    pub checked: Vec<Ticker>,
}

fn all_tickers() -> Vec<Ticker> {
    Ticker::ALL.to_vec()
}

/// Per-panel control declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub overview: PanelControlConfig,
    pub model: PanelControlConfig,
    pub scatter: PanelControlConfig,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            overview: PanelControlConfig {
                tickers: all_tickers(),
                checked: vec![Ticker::Nvidia],
            },
            model: PanelControlConfig {
                tickers: all_tickers(),
                checked: all_tickers(),
            },
            scatter: PanelControlConfig {
                tickers: all_tickers(),
                checked: vec![Ticker::Amd, Ticker::Nvidia],
            },
        }
    }
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data: DataPaths,
    pub layout: Layout,
    /// Start of the period where actual-vs-fitted comparison is meaningful.
    pub model_era_start: NaiveDate,
    /// NVIDIA split dates drawn as dashed markers.
    pub split_dates: Vec<NaiveDate>,
    pub brush_fan_out: BrushFanOut,
    pub scatter_price_field: PriceField,
    pub min_scatter_points: usize,
    pub show_volume: bool,
    pub controls: ControlsConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data: DataPaths::default(),
            layout: Layout::default(),
            model_era_start: ymd(2016, 1, 1),
            split_dates: vec![ymd(2002, 7, 31), ymd(2004, 8, 6), ymd(2008, 7, 3)],
            brush_fan_out: BrushFanOut::default(),
            scatter_price_field: PriceField::default(),
            min_scatter_points: 5,
            show_volume: true,
            controls: ControlsConfig::default(),
        }
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

impl DashboardConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// The file at `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Command-line values win over file values.
    pub fn with_overrides(
        mut self,
        prices: Option<PathBuf>,
        model: Option<PathBuf>,
        fan_out: Option<BrushFanOut>,
    ) -> Self {
        if prices.is_some() {
            self.data.prices = prices;
        }
        if model.is_some() {
            self.data.model = model;
        }
        if let Some(fan_out) = fan_out {
            self.brush_fan_out = fan_out;
        }
        self
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Geometry sanity: the plot area of every panel must be non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let l = &self.layout;
        let m = &l.margin;
        if !(l.width > m.left + m.right) {
            return Err(ConfigError::InvalidValue {
                field: "layout.width",
                reason: format!("{} leaves no room inside margins", l.width),
            });
        }
        for panel in PanelKind::ALL {
            if !(l.height(panel) > m.top + m.bottom) {
                return Err(ConfigError::InvalidValue {
                    field: "layout height",
                    reason: format!("{panel} height {} leaves no room", l.height(panel)),
                });
            }
        }
        if self.min_scatter_points < 2 {
            return Err(ConfigError::InvalidValue {
                field: "min_scatter_points",
                reason: "correlation needs at least 2 points".into(),
            });
        }
        Ok(())
    }
}
