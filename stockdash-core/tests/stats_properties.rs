//! Property tests for the statistics core.
//!
//! Uses proptest to verify:
//! 1. Correlation range: Pearson r stays within [-1, 1]
//! 2. Symmetry: r(xs, ys) == r(ys, xs)
//! 3. Linear data: r is ±1 for ys = a·xs + b
//! 4. Line recovery: OLS on exact line points returns the line
//! 5. R² edge cases: exactly 1 for perfect fits, NaN for constant actuals

use proptest::prelude::*;
use stockdash_core::stats::{linear_fit, pearson_correlation, r_squared};

const TOL: f64 = 1e-9;

// ── Strategies ───────────────────────────────────────────────────────

/// Pairs of equal-length vectors with some spread in both.
fn arb_pairs() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (2usize..40).prop_flat_map(|n| {
        (
            prop::collection::vec(-1000.0..1000.0_f64, n),
            prop::collection::vec(-1000.0..1000.0_f64, n),
        )
    })
    .prop_filter("both sides need variance", |(xs, ys)| {
        spread(xs) > 1e-3 && spread(ys) > 1e-3
    })
}

/// Strictly increasing x values so the variance is never zero.
fn arb_xs() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.5..10.0_f64, 2..40).prop_map(|steps| {
        let mut acc = 0.0;
        steps
            .into_iter()
            .map(|s| {
                acc += s;
                acc
            })
            .collect()
    })
}

fn spread(v: &[f64]) -> f64 {
    let lo = v.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = v.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    hi - lo
}

// ── 1. Range ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn correlation_within_unit_interval((xs, ys) in arb_pairs()) {
        let r = pearson_correlation(&xs, &ys);
        prop_assert!(r.is_finite());
        prop_assert!((-1.0 - TOL..=1.0 + TOL).contains(&r), "r = {}", r);
    }
}

// ── 2. Symmetry ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn correlation_is_symmetric((xs, ys) in arb_pairs()) {
        let a = pearson_correlation(&xs, &ys);
        let b = pearson_correlation(&ys, &xs);
        prop_assert!((a - b).abs() < TOL);
    }
}

// ── 3. Linear data ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn positive_slope_gives_plus_one(xs in arb_xs(), a in 0.1..50.0_f64, b in -100.0..100.0_f64) {
        let ys: Vec<f64> = xs.iter().map(|x| a * x + b).collect();
        prop_assert!((pearson_correlation(&xs, &ys) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn negative_slope_gives_minus_one(xs in arb_xs(), a in -50.0..-0.1_f64, b in -100.0..100.0_f64) {
        let ys: Vec<f64> = xs.iter().map(|x| a * x + b).collect();
        prop_assert!((pearson_correlation(&xs, &ys) + 1.0).abs() < 1e-6);
    }
}

// ── 4. Line recovery ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn fit_recovers_exact_line(xs in arb_xs(), m in -20.0..20.0_f64, c in -100.0..100.0_f64) {
        let ys: Vec<f64> = xs.iter().map(|x| m * x + c).collect();
        let fit = linear_fit(&xs, &ys);
        prop_assert!((fit.slope - m).abs() < 1e-6, "slope {} vs {}", fit.slope, m);
        prop_assert!((fit.intercept - c).abs() < 1e-4, "intercept {} vs {}", fit.intercept, c);
    }
}

// ── 5. R² edge cases ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn perfect_fit_is_exactly_one(xs in arb_xs()) {
        prop_assert_eq!(r_squared(&xs, &xs), 1.0);
    }

    #[test]
    fn constant_actuals_are_nan(v in -1.0e6..1.0e6_f64, n in 1usize..30, fits in prop::collection::vec(-10.0..10.0_f64, 30)) {
        let actuals = vec![v; n];
        prop_assert!(r_squared(&actuals, &fits[..n]).is_nan());
    }

    #[test]
    fn zero_variance_correlation_is_nan(v in -1.0e6..1.0e6_f64, ys in prop::collection::vec(-10.0..10.0_f64, 2..20)) {
        let xs = vec![v; ys.len()];
        prop_assert!(pearson_correlation(&xs, &ys).is_nan());
        prop_assert!(!linear_fit(&xs, &ys).is_finite());
    }
}
