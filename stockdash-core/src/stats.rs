//! Statistics core: pure functions over paired numeric sequences.
//!
//! Every function takes equal-length slices and returns a scalar (or a
//! slope/intercept pair). Degenerate input is not an error: zero variance,
//! empty input, or mismatched lengths propagate as NaN and callers display
//! the value as "n/a".

use serde::{Deserialize, Serialize};

/// Slope/intercept of an ordinary least-squares line `y = slope·x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
}

impl Regression {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Both coefficients are finite.
    pub fn is_finite(&self) -> bool {
        self.slope.is_finite() && self.intercept.is_finite()
    }
}

/// Arithmetic mean; NaN for an empty slice.
///
/// A slice of identical values returns that value exactly, so deviations from
/// the mean are exactly zero and zero-variance input reaches the 0/0 paths.
pub fn mean(values: &[f64]) -> f64 {
    match values.split_first() {
        Some((first, rest)) if rest.iter().all(|v| v == first) => *first,
        _ => values.iter().sum::<f64>() / values.len() as f64,
    }
}

/// Pearson correlation coefficient `Σ(dx·dy) / sqrt(Σdx²·Σdy²)`.
///
/// Not guarded: when either sequence has zero variance the division is 0/0
/// and the result is NaN.
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() != ys.len() {
        return f64::NAN;
    }
    let mean_x = mean(xs);
    let mean_y = mean(ys);

    let mut num = 0.0;
    let mut den_x = 0.0;
    let mut den_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        num += dx * dy;
        den_x += dx * dx;
        den_y += dy * dy;
    }
    num / (den_x * den_y).sqrt()
}

/// Ordinary least squares via the covariance/variance ratio.
///
/// `slope = Σ(dx·dy) / Σdx²`, `intercept = mean_y − slope·mean_x`. Identical
/// x values make the slope 0/0 = NaN (and the intercept with it); this is
/// reproduced rather than special-cased.
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> Regression {
    if xs.len() != ys.len() {
        return Regression {
            slope: f64::NAN,
            intercept: f64::NAN,
        };
    }
    let mean_x = mean(xs);
    let mean_y = mean(ys);

    let mut num = 0.0;
    let mut den = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        num += dx * (y - mean_y);
        den += dx * dx;
    }
    let slope = num / den;
    Regression {
        slope,
        intercept: mean_y - slope * mean_x,
    }
}

/// Coefficient of determination `1 − SS_res / SS_tot`.
///
/// Explicitly NaN when `SS_tot == 0` (all actuals identical).
pub fn r_squared(actuals: &[f64], fits: &[f64]) -> f64 {
    if actuals.len() != fits.len() {
        return f64::NAN;
    }
    let mean_a = mean(actuals);
    let ss_tot: f64 = actuals.iter().map(|a| (a - mean_a).powi(2)).sum();
    if ss_tot == 0.0 {
        return f64::NAN;
    }
    let ss_res: f64 = actuals
        .iter()
        .zip(fits)
        .map(|(a, f)| (a - f).powi(2))
        .sum();
    1.0 - ss_res / ss_tot
}

/// Format a statistic with three decimals, or `None` when it is not finite.
pub fn format_stat(value: f64) -> Option<String> {
    value.is_finite().then(|| format!("{value:.3}"))
}
