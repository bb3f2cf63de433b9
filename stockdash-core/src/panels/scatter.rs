//! Scatter panel: one ticker's price against another's on shared dates.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::chrome::{self, Plot};
use super::{Outcome, PanelKind, PanelView, ScatterStats, NO_DATA_LOADED, SCATTER_EMPTY};
use crate::config::{DashboardConfig, PriceField};
use crate::data::Dataset;
use crate::domain::{TickerPair, TimeDomain};
use crate::scale::LinearScale;
use crate::scene::{Anchor, AxisSide, Color, Shape};
use crate::stats::{format_stat, linear_fit, pearson_correlation};

/// Join the pair's prices by exact date inside `domain`. The first row
/// per (date, ticker) wins; points come back in date order.
pub fn join_pair(
    dataset: &Dataset,
    pair: TickerPair,
    field: PriceField,
    domain: TimeDomain,
) -> Vec<(NaiveDate, f64, f64)> {
    let mut xs: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for p in dataset.series(pair.x()).iter().filter(|p| domain.contains(p.date)) {
        xs.entry(p.date).or_insert_with(|| p.price(field));
    }
    let mut ys: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for p in dataset.series(pair.y()).iter().filter(|p| domain.contains(p.date)) {
        ys.entry(p.date).or_insert_with(|| p.price(field));
    }
    xs.into_iter()
        .filter_map(|(date, x)| ys.get(&date).map(|y| (date, x, *y)))
        .filter(|(_, x, y)| x.is_finite() && y.is_finite())
        .collect()
}

/// Correlation caption: `Correlation = 0.998` or `Correlation: n/a`.
pub fn correlation_label(value: f64) -> String {
    match format_stat(value) {
        Some(v) => format!("Correlation = {v}"),
        None => "Correlation: n/a".to_string(),
    }
}

/// Render `pair` over `domain` (`None` means the full price extent).
pub fn render(
    dataset: &Dataset,
    config: &DashboardConfig,
    domain: Option<TimeDomain>,
    pair: TickerPair,
) -> PanelView {
    let plot = Plot::new(&config.layout, PanelKind::Scatter);
    let mut scene = plot.scene();
    let at = plot.message_at(20.0);

    let Some(domain) = domain.or_else(|| dataset.extent()) else {
        return PanelView::placeholder(PanelKind::Scatter, scene, NO_DATA_LOADED, at);
    };

    let field = config.scatter_price_field;
    let joined = join_pair(dataset, pair, field, domain);
    if joined.len() < config.min_scatter_points {
        return PanelView::placeholder(PanelKind::Scatter, scene, SCATTER_EMPTY, at);
    }

    let xs: Vec<f64> = joined.iter().map(|(_, x, _)| *x).collect();
    let ys: Vec<f64> = joined.iter().map(|(_, _, y)| *y).collect();
    let correlation = pearson_correlation(&xs, &ys);
    let fit = linear_fit(&xs, &ys);

    let (Some(x), Some(y)) = (
        LinearScale::from_values(xs.iter().copied(), plot.x_range()),
        LinearScale::from_values(ys.iter().copied(), plot.y_range()),
    ) else {
        return PanelView::placeholder(PanelKind::Scatter, scene, SCATTER_EMPTY, at);
    };
    let (x, y) = (x.nice(10), y.nice(10));

    chrome::value_axis(&mut scene, AxisSide::Bottom, plot.bottom, &x, 10);
    chrome::value_axis(&mut scene, AxisSide::Left, plot.left, &y, 6);

    for (_, px, py) in &joined {
        scene.push(Shape::Circle {
            center: (x.map(*px), y.map(*py)),
            radius: 3.0,
            fill: Color::POINT,
            opacity: 0.6,
        });
    }

    if fit.is_finite() {
        let lo = xs.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        scene.push(Shape::Line {
            from: (x.map(lo), y.map(fit.predict(lo))),
            to: (x.map(hi), y.map(fit.predict(hi))),
            color: Color::FIT,
            width: 3.0,
            dashed: false,
            opacity: 1.0,
        });
    }

    chrome::x_title(&mut scene, &plot, format!("{} {} (USD)", pair.x(), field.label()));
    chrome::y_title(&mut scene, &plot, format!("{} {} (USD)", pair.y(), field.label()));

    scene.push(Shape::Rect {
        x: plot.left + 6.0,
        y: plot.top + 2.0,
        width: 200.0,
        height: 22.0,
        fill: Color::BOX,
        opacity: 0.85,
    });
    scene.label(
        (plot.left + 12.0, plot.top + 18.0),
        correlation_label(correlation),
        Anchor::Start,
        16.0,
    );

    PanelView {
        kind: PanelKind::Scatter,
        scene,
        outcome: Outcome::Scatter(ScatterStats {
            pair,
            field,
            points: joined.len(),
            correlation,
            fit,
        }),
    }
}
