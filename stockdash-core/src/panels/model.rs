//! Model panel: actual vs. fitted price per ticker, with an R² box.

use std::collections::BTreeMap;

use super::chrome::{self, Plot};
use super::{Outcome, PanelKind, PanelView, MODEL_EMPTY, NO_DATA_LOADED};
use crate::config::DashboardConfig;
use crate::data::Dataset;
use crate::domain::{ModelPoint, Ticker, TickerSelection, TimeDomain};
use crate::scale::{LinearScale, TimeScale};
use crate::scene::{Anchor, AxisSide, Color, Shape};
use crate::stats::{format_stat, r_squared};

pub const TITLE: &str = "Stock Price Regression: Actual Prices vs. Model Fits";

/// One line of the R² box: `AMD: R² = 0.987` or `AMD: R²: n/a`.
pub fn r_squared_line(ticker: Ticker, value: f64) -> String {
    match format_stat(value) {
        Some(v) => format!("{ticker}: R² = {v}"),
        None => format!("{ticker}: R²: n/a"),
    }
}

/// Render `selection` over `[max(domain.start, era start), domain.end]`.
/// `None` means the model series' own extent.
pub fn render(
    dataset: &Dataset,
    config: &DashboardConfig,
    domain: Option<TimeDomain>,
    selection: &TickerSelection,
) -> PanelView {
    let plot = Plot::new(&config.layout, PanelKind::Model);
    let mut scene = plot.scene();
    scene.title(TITLE);
    let at = plot.message_at(20.0);

    if dataset.is_empty() {
        return PanelView::placeholder(PanelKind::Model, scene, NO_DATA_LOADED, at);
    }

    let Some(window) = domain
        .or_else(|| dataset.model_extent())
        .and_then(|d| d.clip_start(config.model_era_start))
    else {
        return PanelView::placeholder(PanelKind::Model, scene, MODEL_EMPTY, at);
    };

    let mut by_ticker: BTreeMap<Ticker, Vec<&ModelPoint>> = BTreeMap::new();
    for row in dataset
        .model()
        .iter()
        .filter(|m| selection.contains(m.ticker) && window.contains(m.date))
    {
        by_ticker.entry(row.ticker).or_default().push(row);
    }

    let Some(y) = LinearScale::from_values(
        by_ticker
            .values()
            .flatten()
            .flat_map(|m| [m.actual, m.fitted]),
        plot.y_range(),
    ) else {
        return PanelView::placeholder(PanelKind::Model, scene, MODEL_EMPTY, at);
    };
    let y = y.nice(10);
    let x = TimeScale::new(window, plot.x_range());

    chrome::time_axis(&mut scene, &plot, &x);
    chrome::value_axis(&mut scene, AxisSide::Left, plot.left, &y, 8);
    chrome::x_title(&mut scene, &plot, "Year");
    chrome::y_title(&mut scene, &plot, "Close Price (USD)");

    let scores: Vec<(Ticker, f64)> = selection
        .iter()
        .map(|t| {
            let score = by_ticker.get(&t).map_or(f64::NAN, |rows| {
                let actual: Vec<f64> = rows.iter().map(|m| m.actual).collect();
                let fitted: Vec<f64> = rows.iter().map(|m| m.fitted).collect();
                r_squared(&actual, &fitted)
            });
            (t, score)
        })
        .collect();
    r_squared_box(&mut scene, &plot, &scores);

    let mut points = 0;
    for (ticker, rows) in &by_ticker {
        let color = ticker.color();
        scene.push(Shape::Polyline {
            points: rows.iter().map(|m| (x.map(m.date), y.map(m.actual))).collect(),
            color,
            width: 1.2,
            opacity: 0.35,
        });
        scene.push(Shape::Polyline {
            points: rows.iter().map(|m| (x.map(m.date), y.map(m.fitted))).collect(),
            color,
            width: 2.4,
            opacity: 0.95,
        });
        points += rows.len();
    }

    let legend: Vec<Ticker> = selection.iter().collect();
    chrome::legend(&mut scene, &legend, (plot.width - 150.0, plot.top + 8.0));

    PanelView {
        kind: PanelKind::Model,
        scene,
        outcome: Outcome::Model {
            points,
            r_squared: scores,
        },
    }
}

fn r_squared_box(scene: &mut crate::scene::Scene, plot: &Plot, scores: &[(Ticker, f64)]) {
    let (bx, by) = (plot.left + 15.0, plot.top + 32.0);
    scene.push(Shape::Rect {
        x: bx - 5.0,
        y: by - 14.0,
        width: 140.0,
        height: 16.0 * scores.len() as f64 + 6.0,
        fill: Color::BOX,
        opacity: 0.95,
    });
    for (i, (ticker, value)) in scores.iter().enumerate() {
        scene.label(
            (bx, by + i as f64 * 16.0),
            r_squared_line(*ticker, *value),
            Anchor::Start,
            12.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn row(date: NaiveDate, ticker: Ticker, actual: f64, fitted: f64) -> ModelPoint {
        ModelPoint {
            date,
            ticker,
            actual,
            fitted,
        }
    }

    fn dataset() -> Dataset {
        let model = vec![
            row(d(2015, 6, 1), Ticker::Amd, 1.0, 1.0),
            row(d(2016, 1, 1), Ticker::Amd, 10.0, 10.0),
            row(d(2016, 1, 2), Ticker::Amd, 11.0, 11.0),
            row(d(2016, 1, 3), Ticker::Amd, 12.0, 12.0),
            row(d(2016, 1, 1), Ticker::Intel, 12.34, 11.0),
            row(d(2016, 1, 2), Ticker::Intel, 12.34, 13.34),
            row(d(2016, 1, 3), Ticker::Intel, 12.34, 14.34),
        ];
        Dataset::new(Vec::new(), model)
    }

    #[test]
    fn r_squared_lines_format() {
        assert_eq!(r_squared_line(Ticker::Amd, 0.98712), "AMD: R² = 0.987");
        assert_eq!(r_squared_line(Ticker::Intel, f64::NAN), "INTEL: R²: n/a");
    }

    #[test]
    fn window_is_clipped_to_model_era_inclusive() {
        let view = render(
            &dataset(),
            &DashboardConfig::default(),
            Some(TimeDomain::new(d(2015, 1, 1), d(2016, 1, 3))),
            &TickerSelection::new([Ticker::Amd]),
        );
        match view.outcome {
            Outcome::Model { points, r_squared } => {
                assert_eq!(points, 3);
                assert_eq!(r_squared, vec![(Ticker::Amd, 1.0)]);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(view.scene.polylines().count(), 2);
    }

    #[test]
    fn constant_actuals_report_not_available() {
        let view = render(
            &dataset(),
            &DashboardConfig::default(),
            None,
            &TickerSelection::new([Ticker::Amd, Ticker::Intel, Ticker::Nvidia]),
        );
        let texts: Vec<&str> = view.scene.texts().collect();
        assert!(texts.contains(&"AMD: R² = 1.000"));
        assert!(texts.contains(&"INTEL: R²: n/a"));
        assert!(texts.contains(&"NVIDIA: R²: n/a"));
    }

    #[test]
    fn no_matching_rows_shows_placeholder() {
        let view = render(
            &dataset(),
            &DashboardConfig::default(),
            None,
            &TickerSelection::new([Ticker::Nvidia]),
        );
        assert_eq!(view.outcome.placeholder(), Some(MODEL_EMPTY));
        assert_eq!(view.scene.axes().count(), 0);
        assert_eq!(view.scene.polylines().count(), 0);
    }

    #[test]
    fn domain_before_era_is_empty() {
        let view = render(
            &dataset(),
            &DashboardConfig::default(),
            Some(TimeDomain::new(d(2014, 1, 1), d(2015, 12, 31))),
            &TickerSelection::new([Ticker::Amd]),
        );
        assert_eq!(view.outcome.placeholder(), Some(MODEL_EMPTY));
    }
}
