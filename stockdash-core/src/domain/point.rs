//! PricePoint / ModelPoint: immutable rows produced by ingestion.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Ticker;
use crate::config::PriceField;

/// One daily price observation for a single ticker.
///
/// `close` and `adj_close` are always finite; `volume` is optional because
/// the source column may be blank for some rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub ticker: Ticker,
    pub close: f64,
    pub adj_close: f64,
    pub volume: Option<u64>,
}

impl PricePoint {
    /// Value of the requested price column.
    pub fn price(&self, field: PriceField) -> f64 {
        match field {
            PriceField::Close => self.close,
            PriceField::AdjustedClose => self.adj_close,
        }
    }
}

/// One actual-vs-fitted observation from the regression model output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPoint {
    pub date: NaiveDate,
    pub ticker: Ticker,
    pub actual: f64,
    pub fitted: f64,
}
