//! Data ingestion and the loaded dataset

pub mod dataset;
pub mod ingest;
pub mod sample;

pub use dataset::{Dataset, DatasetSummary};
pub use ingest::{LoadError, LoadReport};

use crate::config::DashboardConfig;

/// Seed used for the demo dataset.
pub const DEMO_SEED: u64 = 42;

/// Load the configured CSV files, or the demo dataset when `demo` is set
/// or no file is configured at all.
pub fn load_configured(config: &DashboardConfig, demo: bool) -> Result<Dataset, LoadError> {
    let paths = &config.data;
    if demo || (paths.prices.is_none() && paths.model.is_none()) {
        tracing::info!(seed = DEMO_SEED, "using demo dataset");
        return Ok(sample::demo_dataset(
            DEMO_SEED,
            &config.split_dates,
            config.model_era_start,
        ));
    }
    Dataset::load(paths)
}
