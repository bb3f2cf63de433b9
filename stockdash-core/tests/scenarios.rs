//! End-to-end dashboard scenarios driven through `Dashboard::handle`.

use chrono::{Duration, NaiveDate};
use stockdash_core::controller::controls::SELECT_EXACTLY_TWO;
use stockdash_core::controller::Toggle;
use stockdash_core::panels::{self, Outcome, ScatterStats};
use stockdash_core::scene::Shape;
use stockdash_core::{
    BrushFanOut, Dashboard, DashboardConfig, Dataset, Event, ModelPoint, PanelKind, PricePoint,
    RedrawSet, Ticker, TickerPair, TimeDomain,
};

fn day(n: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(n)
}

fn price(date: NaiveDate, ticker: Ticker, close: f64) -> PricePoint {
    PricePoint {
        date,
        ticker,
        close,
        adj_close: close,
        volume: Some(1_000),
    }
}

/// AMD and NVIDIA for 10 consecutive days with NVIDIA = 2 × AMD + 5.
fn linked_prices() -> Vec<PricePoint> {
    (0..10)
        .flat_map(|i| {
            let amd = 10.0 + i as f64 * 1.5;
            [
                price(day(i), Ticker::Amd, amd),
                price(day(i), Ticker::Nvidia, 2.0 * amd + 5.0),
            ]
        })
        .collect()
}

fn scatter_stats(d: &Dashboard) -> ScatterStats {
    match &d.view(PanelKind::Scatter).outcome {
        Outcome::Scatter(stats) => *stats,
        other => panic!("expected scatter outcome, got {other:?}"),
    }
}

// ── Statistics through the scatter panel ─────────────────────────────

#[test]
fn perfectly_linked_pair_reports_unit_correlation_and_line() {
    let d = Dashboard::new(DashboardConfig::default(), Dataset::new(linked_prices(), Vec::new()))
        .unwrap();
    let stats = scatter_stats(&d);
    assert_eq!(stats.pair, TickerPair::new(Ticker::Amd, Ticker::Nvidia).unwrap());
    assert_eq!(stats.points, 10);
    assert!((stats.correlation - 1.0).abs() < 1e-9);
    assert!((stats.fit.slope - 2.0).abs() < 1e-9);
    assert!((stats.fit.intercept - 5.0).abs() < 1e-9);
    assert!(d
        .view(PanelKind::Scatter)
        .scene
        .texts()
        .any(|t| t == "Correlation = 1.000"));
}

#[test]
fn date_present_for_one_ticker_adds_no_point() {
    let mut prices = linked_prices();
    prices.push(price(day(20), Ticker::Amd, 99.0));
    prices.push(price(day(21), Ticker::Nvidia, 1.0));
    let d = Dashboard::new(DashboardConfig::default(), Dataset::new(prices, Vec::new())).unwrap();
    assert_eq!(scatter_stats(&d).points, 10);
}

// ── Domain filtering ─────────────────────────────────────────────────

#[test]
fn brush_endpoints_are_included_in_detail() {
    let mut d = Dashboard::new(DashboardConfig::default(), Dataset::new(linked_prices(), Vec::new()))
        .unwrap();
    let scale = d.overview_scale().unwrap();
    let (a, b) = (scale.map(day(2)), scale.map(day(5)));
    d.handle(Event::Brush {
        selection: Some((a, b)),
    });
    assert_eq!(d.domain(), Some(TimeDomain::new(day(2), day(5))));
    // overview shows NVIDIA only by default
    assert_eq!(
        d.view(PanelKind::Detail).outcome,
        Outcome::Series { series: 1, points: 4 }
    );
}

#[test]
fn brushing_a_gap_shows_detail_placeholder() {
    let mut prices = linked_prices();
    prices.push(price(day(200), Ticker::Nvidia, 50.0));
    let mut d = Dashboard::new(DashboardConfig::default(), Dataset::new(prices, Vec::new())).unwrap();
    let scale = d.overview_scale().unwrap();
    d.handle(Event::Brush {
        selection: Some((scale.map(day(50)), scale.map(day(150)))),
    });
    let detail = d.view(PanelKind::Detail);
    assert_eq!(detail.outcome.placeholder(), Some(panels::DETAIL_EMPTY));
    assert_eq!(detail.scene.axes().count(), 0);
    assert_eq!(detail.scene.polylines().count(), 0);
    assert!(detail
        .scene
        .texts()
        .any(|t| t == "No data in this selected range."));
}

// ── Model panel ──────────────────────────────────────────────────────

#[test]
fn model_without_matching_rows_draws_nothing_but_placeholder() {
    let model = vec![ModelPoint {
        date: NaiveDate::from_ymd_opt(2017, 3, 1).unwrap(),
        ticker: Ticker::Amd,
        actual: 10.0,
        fitted: 10.5,
    }];
    let mut config = DashboardConfig::default();
    config.controls.model.checked = vec![Ticker::Intel];
    let d = Dashboard::new(config, Dataset::new(linked_prices(), model)).unwrap();
    let view = d.view(PanelKind::Model);
    assert_eq!(view.outcome.placeholder(), Some(panels::MODEL_EMPTY));
    assert_eq!(view.scene.axes().count(), 0);
    assert_eq!(view.scene.polylines().count(), 0);
    assert!(view
        .scene
        .texts()
        .any(|t| t == "No data to display. Check selection or date range."));
}

// ── Selection controls ───────────────────────────────────────────────

#[test]
fn third_scatter_checkbox_is_reverted_and_pair_kept() {
    let mut d = Dashboard::new(DashboardConfig::default(), Dataset::new(linked_prices(), Vec::new()))
        .unwrap();
    let generation = d.generation(PanelKind::Scatter);
    let redraw = d.handle(Event::Toggle {
        panel: PanelKind::Scatter,
        ticker: Ticker::Intel,
    });
    assert!(redraw.is_empty());
    assert!(!d.controls().scatter.is_checked(Ticker::Intel));
    assert_eq!(d.pair(), TickerPair::new(Ticker::Amd, Ticker::Nvidia).unwrap());
    assert_eq!(d.generation(PanelKind::Scatter), generation);

    // a refresh afterwards still sees the original two
    let redraw = d.handle(Event::Refresh(PanelKind::Scatter));
    assert_eq!(redraw, RedrawSet::of(&[PanelKind::Scatter]));
    assert_eq!(d.pair(), TickerPair::new(Ticker::Amd, Ticker::Nvidia).unwrap());
}

#[test]
fn scatter_refresh_with_one_box_is_rejected() {
    let mut d = Dashboard::new(DashboardConfig::default(), Dataset::new(linked_prices(), Vec::new()))
        .unwrap();
    let mut controls = d.controls().scatter.clone();
    assert_eq!(controls.toggle(Ticker::Nvidia), Toggle::Unchecked);

    d.handle(Event::Toggle {
        panel: PanelKind::Scatter,
        ticker: Ticker::Nvidia,
    });
    let redraw = d.handle(Event::Refresh(PanelKind::Scatter));
    assert!(redraw.is_empty());
    assert_eq!(d.controls().scatter.warning(), Some(SELECT_EXACTLY_TWO));
    assert_eq!(d.pair(), TickerPair::new(Ticker::Amd, Ticker::Nvidia).unwrap());
}

// ── Fan-out policy ───────────────────────────────────────────────────

#[test]
fn canonical_policy_propagates_brush_to_model_and_scatter() {
    let mut d = Dashboard::new(DashboardConfig::default(), Dataset::new(linked_prices(), Vec::new()))
        .unwrap();
    let scale = d.overview_scale().unwrap();
    let redraw = d.handle(Event::Brush {
        selection: Some((scale.map(day(0)), scale.map(day(3)))),
    });
    assert!(redraw.contains(PanelKind::Model));
    assert!(redraw.contains(PanelKind::Scatter));
    assert!(!redraw.contains(PanelKind::Overview));
    // four joined days are under the five-point minimum
    assert_eq!(
        d.view(PanelKind::Scatter).outcome.placeholder(),
        Some(panels::SCATTER_EMPTY)
    );
}

#[test]
fn detail_only_policy_leaves_scatter_on_full_extent() {
    let config = DashboardConfig {
        brush_fan_out: BrushFanOut::DetailOnly,
        ..DashboardConfig::default()
    };
    let mut d = Dashboard::new(config, Dataset::new(linked_prices(), Vec::new())).unwrap();
    let scale = d.overview_scale().unwrap();
    let redraw = d.handle(Event::Brush {
        selection: Some((scale.map(day(0)), scale.map(day(3)))),
    });
    assert_eq!(redraw, RedrawSet::of(&[PanelKind::Detail]));
    assert_eq!(scatter_stats(&d).points, 10);
}

// ── Full redraw ──────────────────────────────────────────────────────

#[test]
fn every_redraw_replaces_the_previous_scene() {
    let mut d = Dashboard::new(DashboardConfig::default(), Dataset::new(linked_prices(), Vec::new()))
        .unwrap();
    let scale = d.overview_scale().unwrap();
    for _ in 0..3 {
        d.handle(Event::Brush {
            selection: Some((scale.map(day(1)), scale.map(day(8)))),
        });
    }
    let detail = &d.view(PanelKind::Detail).scene;
    assert_eq!(detail.polylines().count(), 1);
    assert_eq!(
        detail.count(|s| matches!(s, Shape::Axis { .. })),
        3,
        "bottom, left and volume axes exactly once"
    );
    assert_eq!(d.generation(PanelKind::Detail), 4);
}
