//! Stockdash Core: statistics, ingestion and view synchronization for the
//! four-panel stock dashboard.
//!
//! This crate contains everything that is not terminal plumbing:
//! - Domain types (tickers, price/model points, time domains, selections)
//! - Statistics core (Pearson correlation, OLS fit, R²)
//! - CSV ingestion with row-level validity filtering, plus a demo dataset
//! - Scales and a display-list `Scene` in logical pixel coordinates
//! - Overview / Detail / Model / Scatter panel renderers
//! - Dashboard controller: brush + checkbox events, redraw fan-out

pub mod config;
pub mod controller;
pub mod data;
pub mod domain;
pub mod panels;
pub mod scale;
pub mod scene;
pub mod stats;

pub use config::{BrushFanOut, DashboardConfig, PriceField};
pub use controller::{Dashboard, Event, RedrawSet};
pub use data::Dataset;
pub use domain::{ModelPoint, PricePoint, Ticker, TickerPair, TickerSelection, TimeDomain};
pub use panels::{Outcome, PanelKind, PanelView};
