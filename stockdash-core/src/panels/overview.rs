//! Overview panel: full-extent close price, volume and split markers.

use super::chrome::{self, Plot};
use super::{Outcome, PanelKind, PanelView, NO_DATA_LOADED, OVERVIEW_EMPTY};
use crate::config::DashboardConfig;
use crate::data::Dataset;
use crate::domain::{PricePoint, Ticker, TickerSelection};
use crate::scale::{LinearScale, TimeScale};
use crate::scene::AxisSide;

/// The overview's time scale, used to turn brush pixels into dates.
pub fn time_scale(dataset: &Dataset, config: &DashboardConfig) -> Option<TimeScale> {
    dataset
        .extent()
        .map(|extent| TimeScale::new(extent, config.layout.x_range()))
}

pub fn render(dataset: &Dataset, config: &DashboardConfig, visible: &TickerSelection) -> PanelView {
    let plot = Plot::new(&config.layout, PanelKind::Overview);
    let mut scene = plot.scene();
    scene.title(format!("{} Close Price & Volume", visible.label()));

    let Some(x) = time_scale(dataset, config) else {
        return PanelView::placeholder(PanelKind::Overview, scene, NO_DATA_LOADED, plot.message_at(20.0));
    };

    let series: Vec<(Ticker, Vec<&PricePoint>)> = visible
        .iter()
        .map(|t| (t, dataset.series(t).iter().collect::<Vec<_>>()))
        .filter(|(_, s)| !s.is_empty())
        .collect();

    let Some(y) = LinearScale::from_values(
        series.iter().flat_map(|(_, s)| s.iter().map(|p| p.close)),
        plot.y_range(),
    ) else {
        return PanelView::placeholder(PanelKind::Overview, scene, OVERVIEW_EMPTY, plot.message_at(20.0));
    };
    let y = y.nice(10);

    chrome::time_axis(&mut scene, &plot, &x);
    chrome::value_axis(&mut scene, AxisSide::Left, plot.left, &y, 6);
    chrome::x_title(&mut scene, &plot, "Year");
    chrome::y_title(&mut scene, &plot, "Close Price (USD)");

    if let [(_, only)] = series.as_slice() {
        if config.show_volume {
            if let Some(vy) = chrome::volume_scale(only, &plot) {
                chrome::volume_axis(&mut scene, &plot, &vy, 3);
                chrome::volume_title(&mut scene, &plot);
                chrome::volume_bars(&mut scene, &plot, only, &x, &vy, 0.55);
            }
        }
    }

    let mut points = 0;
    for (ticker, s) in &series {
        chrome::price_line(&mut scene, s, &x, &y, *ticker, 1.0);
        points += s.len();
    }

    if visible.contains(Ticker::Nvidia) {
        chrome::split_markers(&mut scene, &plot, &x, &config.split_dates, 0.7);
    }

    let drawn: Vec<Ticker> = series.iter().map(|(t, _)| *t).collect();
    if drawn.len() > 1 {
        chrome::legend(&mut scene, &drawn, (plot.width - 150.0, plot.top + 8.0));
    }

    PanelView {
        kind: PanelKind::Overview,
        scene,
        outcome: Outcome::Series {
            series: series.len(),
            points,
        },
    }
}
