//! Demo dataset generator.
//!
//! Produces a deterministic, plausible-looking dataset so the dashboard can
//! run without input files:
//! - Correlated geometric random walks (shared market factor + noise)
//! - NVIDIA raw closes that step down 2:1 at each split date
//! - Adjusted closes with a slowly converging dividend factor
//! - Model rows whose fitted price is a trailing moving average

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Dataset;
use crate::domain::{ModelPoint, PricePoint, Ticker};

/// Window of the trailing average used as the "fitted" model price.
const FIT_WINDOW: usize = 20;

struct WalkParams {
    ticker: Ticker,
    start_price: f64,
    beta: f64,
    idio_vol: f64,
    drift: f64,
    base_volume: f64,
}

const WALKS: [WalkParams; 3] = [
    WalkParams {
        ticker: Ticker::Amd,
        start_price: 18.0,
        beta: 1.3,
        idio_vol: 0.018,
        drift: 0.0003,
        base_volume: 40_000_000.0,
    },
    WalkParams {
        ticker: Ticker::Intel,
        start_price: 45.0,
        beta: 0.9,
        idio_vol: 0.010,
        drift: 0.0001,
        base_volume: 35_000_000.0,
    },
    WalkParams {
        ticker: Ticker::Nvidia,
        start_price: 2.5,
        beta: 1.5,
        idio_vol: 0.020,
        drift: 0.0008,
        base_volume: 60_000_000.0,
    },
];

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn trading_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        if !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            days.push(current);
        }
        current += Duration::days(1);
    }
    days
}

/// Demo dataset from 2000-01-03 through 2024-12-31.
pub fn demo_dataset(seed: u64, split_dates: &[NaiveDate], model_start: NaiveDate) -> Dataset {
    generate(
        seed,
        ymd(2000, 1, 3),
        ymd(2024, 12, 31),
        split_dates,
        model_start,
    )
}

/// Generate a dataset over an arbitrary date range.
pub fn generate(
    seed: u64,
    start: NaiveDate,
    end: NaiveDate,
    split_dates: &[NaiveDate],
    model_start: NaiveDate,
) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let days = trading_days(start, end);

    // Shared market factor drives the cross-ticker correlation.
    let market: Vec<f64> = days.iter().map(|_| rng.gen_range(-0.012..0.012)).collect();

    let mut prices = Vec::with_capacity(days.len() * WALKS.len());
    let mut model = Vec::new();

    for walk in &WALKS {
        let mut adj = walk.start_price;
        let mut history: Vec<f64> = Vec::with_capacity(days.len());

        for (i, date) in days.iter().enumerate() {
            let noise: f64 = rng.gen_range(-walk.idio_vol..walk.idio_vol);
            adj *= 1.0 + walk.drift + walk.beta * market[i] + noise;
            adj = adj.max(0.01);
            history.push(adj);

            // Dividend factor: older adjusted prices sit slightly below close.
            let progress = i as f64 / days.len().max(1) as f64;
            let dividend_factor = 0.92 + 0.08 * progress;
            let mut close = adj / dividend_factor;
            if walk.ticker == Ticker::Nvidia {
                let pending_splits = split_dates.iter().filter(|s| **s > *date).count();
                close *= 2f64.powi(pending_splits as i32);
            }

            let volume_jitter: f64 = rng.gen_range(0.5..1.5);
            let volume = if rng.gen_bool(0.995) {
                Some((walk.base_volume * volume_jitter) as u64)
            } else {
                None
            };

            prices.push(PricePoint {
                date: *date,
                ticker: walk.ticker,
                close,
                adj_close: adj,
                volume,
            });

            if *date >= model_start && history.len() >= FIT_WINDOW {
                let window = &history[history.len() - FIT_WINDOW..];
                let fitted = window.iter().sum::<f64>() / FIT_WINDOW as f64;
                model.push(ModelPoint {
                    date: *date,
                    ticker: walk.ticker,
                    actual: adj,
                    fitted,
                });
            }
        }
    }

    tracing::debug!(
        seed,
        prices = prices.len(),
        model = model.len(),
        "generated demo dataset"
    );
    Dataset::new(prices, model)
}
