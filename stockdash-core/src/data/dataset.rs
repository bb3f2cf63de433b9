//! Dataset: the immutable, in-memory result of ingestion.

use std::collections::BTreeMap;

use serde::Serialize;

use super::ingest::{load_model, load_prices, LoadError, LoadReport};
use crate::config::DataPaths;
use crate::domain::{ModelPoint, PricePoint, Ticker, TimeDomain};

/// Loaded price and model series plus derived groupings.
///
/// Built once; never mutated afterwards. Both collections are sorted by
/// `(date, ticker)` and each per-ticker series is sorted by date.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    prices: Vec<PricePoint>,
    model: Vec<ModelPoint>,
    prices_by_ticker: BTreeMap<Ticker, Vec<PricePoint>>,
    extent: Option<TimeDomain>,
    model_extent: Option<TimeDomain>,
    pub price_report: LoadReport,
    pub model_report: LoadReport,
}

/// Serializable overview of a dataset, for the CLI `check` command.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub price_rows: usize,
    pub model_rows: usize,
    pub price_extent: Option<TimeDomain>,
    pub model_extent: Option<TimeDomain>,
    pub rows_per_ticker: BTreeMap<Ticker, usize>,
    pub price_report: LoadReport,
    pub model_report: LoadReport,
}

impl Dataset {
    pub fn new(mut prices: Vec<PricePoint>, mut model: Vec<ModelPoint>) -> Self {
        prices.sort_by_key(|p| (p.date, p.ticker));
        model.sort_by_key(|m| (m.date, m.ticker));

        let mut prices_by_ticker: BTreeMap<Ticker, Vec<PricePoint>> = BTreeMap::new();
        for p in &prices {
            prices_by_ticker.entry(p.ticker).or_default().push(p.clone());
        }

        let extent = TimeDomain::extent(prices.iter().map(|p| p.date));
        let model_extent = TimeDomain::extent(model.iter().map(|m| m.date));

        Self {
            prices,
            model,
            prices_by_ticker,
            extent,
            model_extent,
            price_report: LoadReport::default(),
            model_report: LoadReport::default(),
        }
    }

    /// Attach ingestion reports.
    pub fn with_reports(mut self, price_report: LoadReport, model_report: LoadReport) -> Self {
        self.price_report = price_report;
        self.model_report = model_report;
        self
    }

    /// Load whichever files are configured. A missing path yields an empty
    /// collection; panels then show their placeholders.
    pub fn load(paths: &DataPaths) -> Result<Self, LoadError> {
        let (prices, price_report) = match &paths.prices {
            Some(path) => load_prices(path)?,
            None => (Vec::new(), LoadReport::default()),
        };
        let (model, model_report) = match &paths.model {
            Some(path) => load_model(path)?,
            None => (Vec::new(), LoadReport::default()),
        };
        Ok(Self::new(prices, model).with_reports(price_report, model_report))
    }

    pub fn prices(&self) -> &[PricePoint] {
        &self.prices
    }

    pub fn model(&self) -> &[ModelPoint] {
        &self.model
    }

    /// Date-sorted series for one ticker (empty if absent).
    pub fn series(&self, ticker: Ticker) -> &[PricePoint] {
        self.prices_by_ticker
            .get(&ticker)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Full extent of price dates.
    pub fn extent(&self) -> Option<TimeDomain> {
        self.extent
    }

    pub fn model_extent(&self) -> Option<TimeDomain> {
        self.model_extent
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty() && self.model.is_empty()
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            price_rows: self.prices.len(),
            model_rows: self.model.len(),
            price_extent: self.extent,
            model_extent: self.model_extent,
            rows_per_ticker: self
                .prices_by_ticker
                .iter()
                .map(|(t, s)| (*t, s.len()))
                .collect(),
            price_report: self.price_report.clone(),
            model_report: self.model_report.clone(),
        }
    }
}
