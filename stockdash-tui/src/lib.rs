//! Stockdash TUI: four-panel terminal dashboard.
//!
//! Panels:
//! 1. Overview: full-range close price and volume, hosts the brush
//! 2. Detail: the brushed window
//! 3. Model: actual vs. fitted prices with R²
//! 4. Scatter: two-stock correlation with OLS fit

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;

pub use app::App;
pub use input::handle_key;
pub use theme::Theme;
