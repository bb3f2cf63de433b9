//! Detail panel: the brushed window, zoomed to fit what is inside it.

use super::chrome::{self, Plot};
use super::{Outcome, PanelKind, PanelView, DETAIL_EMPTY, NO_DATA_LOADED};
use crate::config::DashboardConfig;
use crate::data::Dataset;
use crate::domain::{PricePoint, Ticker, TickerSelection, TimeDomain};
use crate::scale::{LinearScale, TimeScale};
use crate::scene::AxisSide;

/// Render `visible` tickers over `domain` (inclusive). `None` means the
/// full price extent.
pub fn render(
    dataset: &Dataset,
    config: &DashboardConfig,
    domain: Option<TimeDomain>,
    visible: &TickerSelection,
) -> PanelView {
    let plot = Plot::new(&config.layout, PanelKind::Detail);
    let mut scene = plot.scene();
    scene.title(format!("{} Detailed View", visible.label()));

    let Some(domain) = domain.or_else(|| dataset.extent()) else {
        return PanelView::placeholder(PanelKind::Detail, scene, NO_DATA_LOADED, plot.message_at(30.0));
    };

    let series: Vec<(Ticker, Vec<&PricePoint>)> = visible
        .iter()
        .map(|t| {
            let inside = dataset
                .series(t)
                .iter()
                .filter(|p| domain.contains(p.date))
                .collect::<Vec<_>>();
            (t, inside)
        })
        .filter(|(_, s)| !s.is_empty())
        .collect();

    // y extent comes from the filtered subset only
    let Some(y) = LinearScale::from_values(
        series.iter().flat_map(|(_, s)| s.iter().map(|p| p.close)),
        plot.y_range(),
    ) else {
        return PanelView::placeholder(PanelKind::Detail, scene, DETAIL_EMPTY, plot.message_at(30.0));
    };
    let y = y.nice(10);
    let x = TimeScale::new(domain, plot.x_range());

    chrome::time_axis(&mut scene, &plot, &x);
    chrome::value_axis(&mut scene, AxisSide::Left, plot.left, &y, 6);
    chrome::x_title(&mut scene, &plot, "Year");
    chrome::y_title(&mut scene, &plot, "Close Price (USD)");

    if let [(_, only)] = series.as_slice() {
        if config.show_volume {
            if let Some(vy) = chrome::volume_scale(only, &plot) {
                chrome::volume_axis(&mut scene, &plot, &vy, 2);
                chrome::volume_title(&mut scene, &plot);
                chrome::volume_bars(&mut scene, &plot, only, &x, &vy, 0.9);
            }
        }
    }

    if visible.contains(Ticker::Nvidia) {
        chrome::split_markers(&mut scene, &plot, &x, &config.split_dates, 0.35);
    }

    let mut points = 0;
    for (ticker, s) in &series {
        chrome::price_line(&mut scene, s, &x, &y, *ticker, 0.95);
        points += s.len();
    }

    PanelView {
        kind: PanelKind::Detail,
        scene,
        outcome: Outcome::Series {
            series: series.len(),
            points,
        },
    }
}
