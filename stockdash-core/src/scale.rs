//! Scales: map data values to logical pixels and back.
//!
//! `LinearScale` follows the familiar nice-number rules (steps of 1, 2 or 5
//! times a power of ten). `TimeScale` works on calendar dates and produces
//! calendar-aligned ticks.

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::TimeDomain;

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Min/max of the finite values, or `None` if there are none.
pub fn extent<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Step size that splits `[start, stop]` into roughly `count` nice intervals.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let span = (stop - start).abs();
    if span == 0.0 || count == 0 || !span.is_finite() {
        return 0.0;
    }
    let raw = span / count as f64;
    let power = raw.log10().floor();
    let error = raw / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    factor * 10f64.powf(power)
}

/// Multiply `i` by `step` while avoiding binary noise for fractional steps.
fn scaled(i: f64, step: f64) -> f64 {
    if step < 1.0 {
        let inv = (1.0 / step).round();
        i / inv
    } else {
        i * step
    }
}

/// Continuous linear mapping between a numeric domain and a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Scale over the extent of `values`; `None` when no finite value exists.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I, range: (f64, f64)) -> Option<Self> {
        extent(values).map(|domain| Self::new(domain, range))
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Degenerate domains map every value to the range midpoint.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        d0 + (pixel - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Extend the domain outward to round tick values.
    pub fn nice(self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }
        let mut previous = 0.0;
        for _ in 0..10 {
            let step = tick_step(start, stop, count);
            if step == 0.0 || step == previous {
                break;
            }
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
            previous = step;
        }
        let domain = if reversed { (stop, start) } else { (start, stop) };
        Self { domain, ..self }
    }

    /// Round tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (a, b) = self.domain;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if lo == hi {
            return vec![lo];
        }
        let step = tick_step(lo, hi, count);
        if step == 0.0 {
            return Vec::new();
        }
        let first = (lo / step).ceil();
        let last = (hi / step).floor();
        let mut out = Vec::new();
        let mut i = first;
        while i <= last {
            out.push(scaled(i, step));
            i += 1.0;
        }
        out
    }
}

/// Format a tick value with just enough decimals for its step.
pub fn format_tick(value: f64, step: f64) -> String {
    if step >= 1.0 || step == 0.0 {
        format!("{value:.0}")
    } else {
        let decimals = (-step.log10().floor()) as usize;
        format!("{value:.decimals$}")
    }
}

/// Two-significant-digit SI label: 200M, 1.5B, 12k.
pub fn format_si(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }
    const PREFIXES: [&str; 5] = ["", "k", "M", "B", "T"];
    let magnitude = value.abs().log10().floor() as i32;
    let group = (magnitude.div_euclid(3)).clamp(0, PREFIXES.len() as i32 - 1);
    let mut scaled = value / 10f64.powi(group * 3);
    let mut group = group as usize;
    // Rounding can carry into the next group (999.6k -> 1.0M).
    if scaled.abs().round() >= 1000.0 && group + 1 < PREFIXES.len() {
        scaled /= 1000.0;
        group += 1;
    }
    let digits = if scaled.abs() >= 10.0 {
        format!("{scaled:.0}")
    } else {
        format!("{scaled:.1}")
    };
    format!("{digits}{}", PREFIXES[group])
}

/// Calendar-date scale over a `TimeDomain`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: TimeDomain,
    range: (f64, f64),
}

/// Calendar interval between time ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickInterval {
    Days(i64),
    Months(u32),
    Years(i32),
}

impl TickInterval {
    fn approx_days(self) -> f64 {
        match self {
            TickInterval::Days(n) => n as f64,
            TickInterval::Months(n) => n as f64 * 30.44,
            TickInterval::Years(n) => n as f64 * 365.25,
        }
    }
}

const TIME_INTERVALS: [TickInterval; 14] = [
    TickInterval::Days(1),
    TickInterval::Days(2),
    TickInterval::Days(7),
    TickInterval::Days(14),
    TickInterval::Months(1),
    TickInterval::Months(3),
    TickInterval::Months(6),
    TickInterval::Years(1),
    TickInterval::Years(2),
    TickInterval::Years(5),
    TickInterval::Years(10),
    TickInterval::Years(20),
    TickInterval::Years(50),
    TickInterval::Years(100),
];

impl TimeScale {
    pub fn new(domain: TimeDomain, range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> TimeDomain {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    fn offset_days(&self, date: NaiveDate) -> f64 {
        (date - self.domain.start()).num_days() as f64
    }

    pub fn map(&self, date: NaiveDate) -> f64 {
        let (r0, r1) = self.range;
        let span = self.domain.span_days() as f64;
        if span == 0.0 {
            return (r0 + r1) / 2.0;
        }
        r0 + self.offset_days(date) / span * (r1 - r0)
    }

    /// Pixel to date, rounded to the nearest day and clamped to the domain.
    pub fn invert(&self, pixel: f64) -> NaiveDate {
        let (r0, r1) = self.range;
        let span = self.domain.span_days() as f64;
        if r1 == r0 || span == 0.0 {
            return self.domain.start();
        }
        let days = ((pixel - r0) / (r1 - r0) * span).round().clamp(0.0, span);
        self.domain.start() + Duration::days(days as i64)
    }

    /// Calendar-aligned ticks with labels.
    pub fn ticks(&self, count: usize) -> Vec<(NaiveDate, String)> {
        let span = self.domain.span_days() as f64;
        if span == 0.0 {
            let d = self.domain.start();
            return vec![(d, d.format("%b %d").to_string())];
        }
        let target = span / count.max(1) as f64;
        let interval = TIME_INTERVALS
            .iter()
            .copied()
            .find(|i| i.approx_days() >= target)
            .unwrap_or(TickInterval::Years(100));

        let (start, end) = (self.domain.start(), self.domain.end());
        let mut out = Vec::new();
        match interval {
            TickInterval::Days(n) => {
                let mut d = start;
                while d <= end {
                    out.push((d, d.format("%b %d").to_string()));
                    d += Duration::days(n);
                }
            }
            TickInterval::Months(n) => {
                let mut year = start.year();
                let mut month = start.month0();
                // Align to a multiple of n months.
                month = month.div_ceil(n) * n;
                loop {
                    year += (month / 12) as i32;
                    month %= 12;
                    let Some(d) = NaiveDate::from_ymd_opt(year, month + 1, 1) else {
                        break;
                    };
                    if d > end {
                        break;
                    }
                    if d >= start {
                        let label = if month == 0 {
                            d.format("%Y").to_string()
                        } else {
                            d.format("%b").to_string()
                        };
                        out.push((d, label));
                    }
                    month += n;
                }
            }
            TickInterval::Years(n) => {
                let mut year = start.year();
                year = year.div_euclid(n) * n;
                if NaiveDate::from_ymd_opt(year, 1, 1).is_some_and(|d| d < start) {
                    year += n;
                }
                while let Some(d) = NaiveDate::from_ymd_opt(year, 1, 1) {
                    if d > end {
                        break;
                    }
                    out.push((d, year.to_string()));
                    year += n;
                }
            }
        }
        out
    }
}
