//! CSV ingestion: parse, coerce and filter raw rows into typed points.
//!
//! File-level problems (unreadable file, missing required column) are
//! errors. Row-level problems never are: an invalid row is counted in the
//! `LoadReport` and dropped.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ModelPoint, PricePoint, Ticker};

/// Errors from the ingestion layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{file} is missing required column '{column}'")]
    MissingColumn { file: &'static str, column: &'static str },
}

/// Why a row was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Record could not be decoded or is missing fields.
    Malformed,
    Date,
    Ticker,
    Number,
}

/// Row accounting for one input file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub malformed: usize,
    pub bad_date: usize,
    pub bad_ticker: usize,
    pub bad_number: usize,
}

impl LoadReport {
    pub fn rows_dropped(&self) -> usize {
        self.rows_read - self.rows_kept
    }

    fn record(&mut self, outcome: Result<(), DropReason>) {
        self.rows_read += 1;
        match outcome {
            Ok(()) => self.rows_kept += 1,
            Err(DropReason::Malformed) => self.malformed += 1,
            Err(DropReason::Date) => self.bad_date += 1,
            Err(DropReason::Ticker) => self.bad_ticker += 1,
            Err(DropReason::Number) => self.bad_number += 1,
        }
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} rows kept ({} malformed, {} bad date, {} bad ticker, {} bad number)",
            self.rows_kept,
            self.rows_read,
            self.malformed,
            self.bad_date,
            self.bad_ticker,
            self.bad_number
        )
    }
}

/// Parse an ISO-8601 date or timestamp down to its calendar date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

/// Parse a finite number. Blank, unparseable and non-finite text is `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Volume is optional: anything that is not a finite, non-negative number is `None`.
pub fn parse_volume(raw: &str) -> Option<u64> {
    parse_number(raw)
        .filter(|v| *v >= 0.0)
        .map(|v| v.round() as u64)
}

/// Header positions, matched case-insensitively.
struct Columns<'h> {
    headers: &'h StringRecord,
    file: &'static str,
}

impl<'h> Columns<'h> {
    fn find(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    }

    fn require(&self, name: &'static str) -> Result<usize, LoadError> {
        self.find(name).ok_or(LoadError::MissingColumn {
            file: self.file,
            column: name,
        })
    }
}

fn field(record: &StringRecord, idx: usize) -> Result<&str, DropReason> {
    record.get(idx).ok_or(DropReason::Malformed)
}

fn reader<R: Read>(rdr: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(rdr)
}

/// Read price rows (`date,ticker,close,adj_close,volume`).
///
/// `volume` may be absent as a column; every other column is required.
pub fn read_prices<R: Read>(rdr: R) -> Result<(Vec<PricePoint>, LoadReport), LoadError> {
    let mut csv = reader(rdr);
    let headers = csv.headers()?.clone();
    let cols = Columns {
        headers: &headers,
        file: "price data",
    };
    let date_idx = cols.require("date")?;
    let ticker_idx = cols.require("ticker")?;
    let close_idx = cols.require("close")?;
    let adj_idx = cols.require("adj_close")?;
    let volume_idx = cols.find("volume");

    let mut points = Vec::new();
    let mut report = LoadReport::default();

    for result in csv.records() {
        let parsed = result.map_err(|_| DropReason::Malformed).and_then(|record| {
            let date = parse_date(field(&record, date_idx)?).ok_or(DropReason::Date)?;
            let ticker: Ticker = field(&record, ticker_idx)?
                .parse()
                .map_err(|_| DropReason::Ticker)?;
            let close = parse_number(field(&record, close_idx)?).ok_or(DropReason::Number)?;
            let adj_close = parse_number(field(&record, adj_idx)?).ok_or(DropReason::Number)?;
            let volume = volume_idx
                .and_then(|idx| record.get(idx))
                .and_then(parse_volume);
            Ok(PricePoint {
                date,
                ticker,
                close,
                adj_close,
                volume,
            })
        });
        match parsed {
            Ok(point) => {
                points.push(point);
                report.record(Ok(()));
            }
            Err(reason) => {
                tracing::debug!(row = report.rows_read + 1, ?reason, "dropping price row");
                report.record(Err(reason));
            }
        }
    }

    Ok((points, report))
}

/// Read model rows (`date,ticker,actual_price,fitted_price`).
pub fn read_model<R: Read>(rdr: R) -> Result<(Vec<ModelPoint>, LoadReport), LoadError> {
    let mut csv = reader(rdr);
    let headers = csv.headers()?.clone();
    let cols = Columns {
        headers: &headers,
        file: "model data",
    };
    let date_idx = cols.require("date")?;
    let ticker_idx = cols.require("ticker")?;
    let actual_idx = cols.require("actual_price")?;
    let fitted_idx = cols.require("fitted_price")?;

    let mut points = Vec::new();
    let mut report = LoadReport::default();

    for result in csv.records() {
        let parsed = result.map_err(|_| DropReason::Malformed).and_then(|record| {
            let date = parse_date(field(&record, date_idx)?).ok_or(DropReason::Date)?;
            let ticker: Ticker = field(&record, ticker_idx)?
                .parse()
                .map_err(|_| DropReason::Ticker)?;
            let actual = parse_number(field(&record, actual_idx)?).ok_or(DropReason::Number)?;
            let fitted = parse_number(field(&record, fitted_idx)?).ok_or(DropReason::Number)?;
            Ok(ModelPoint {
                date,
                ticker,
                actual,
                fitted,
            })
        });
        match parsed {
            Ok(point) => {
                points.push(point);
                report.record(Ok(()));
            }
            Err(reason) => {
                tracing::debug!(row = report.rows_read + 1, ?reason, "dropping model row");
                report.record(Err(reason));
            }
        }
    }

    Ok((points, report))
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and filter a price CSV file.
pub fn load_prices(path: &Path) -> Result<(Vec<PricePoint>, LoadReport), LoadError> {
    let (points, report) = read_prices(open(path)?)?;
    tracing::info!(
        path = %path.display(),
        kept = report.rows_kept,
        dropped = report.rows_dropped(),
        "loaded price rows"
    );
    Ok((points, report))
}

/// Load and filter a model CSV file.
pub fn load_model(path: &Path) -> Result<(Vec<ModelPoint>, LoadReport), LoadError> {
    let (points, report) = read_model(open(path)?)?;
    tracing::info!(
        path = %path.display(),
        kept = report.rows_kept,
        dropped = report.rows_dropped(),
        "loaded model rows"
    );
    Ok((points, report))
}
