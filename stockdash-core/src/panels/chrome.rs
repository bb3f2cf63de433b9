//! Shared chart furniture: plot geometry, axes, legend, markers, volume bars.

use chrono::NaiveDate;

use super::PanelKind;
use crate::config::Layout;
use crate::domain::{PricePoint, Ticker};
use crate::scale::{format_si, format_tick, tick_step, LinearScale, TimeScale};
use crate::scene::{Anchor, AxisSide, Color, Scene, Shape, Tick};

/// Plot geometry for one panel surface.
#[derive(Debug, Clone, Copy)]
pub struct Plot {
    pub kind: PanelKind,
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Plot {
    pub fn new(layout: &Layout, kind: PanelKind) -> Self {
        let height = layout.height(kind);
        let (left, right) = layout.x_range();
        let (bottom, top) = layout.y_range(kind);
        Self {
            kind,
            width: layout.width,
            height,
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn scene(&self) -> Scene {
        Scene::new(self.width, self.height)
    }

    pub fn x_range(&self) -> (f64, f64) {
        (self.left, self.right)
    }

    pub fn y_range(&self) -> (f64, f64) {
        (self.bottom, self.top)
    }

    /// Secondary range used by volume bars: bottom half of the surface.
    pub fn volume_range(&self) -> (f64, f64) {
        (self.bottom, self.height / 2.0)
    }

    /// Where placeholder messages go, `dy` below the top margin.
    pub fn message_at(&self, dy: f64) -> (f64, f64) {
        (self.left, self.top + dy)
    }
}

pub fn time_axis(scene: &mut Scene, plot: &Plot, x: &TimeScale) {
    let count = ((plot.right - plot.left) / 80.0).round().max(2.0) as usize;
    let ticks = x
        .ticks(count)
        .into_iter()
        .map(|(date, label)| Tick {
            position: x.map(date),
            label,
        })
        .collect();
    scene.push(Shape::Axis {
        side: AxisSide::Bottom,
        offset: plot.bottom,
        span: plot.x_range(),
        ticks,
    });
}

pub fn value_axis(scene: &mut Scene, side: AxisSide, offset: f64, y: &LinearScale, count: usize) {
    let (d0, d1) = y.domain();
    let step = tick_step(d0, d1, count);
    let ticks = y
        .ticks(count)
        .into_iter()
        .map(|v| Tick {
            position: y.map(v),
            label: format_tick(v, step),
        })
        .collect();
    let (r0, r1) = y.range();
    scene.push(Shape::Axis {
        side,
        offset,
        span: (r0.min(r1), r0.max(r1)),
        ticks,
    });
}

pub fn volume_axis(scene: &mut Scene, plot: &Plot, y: &LinearScale, count: usize) {
    let ticks = y
        .ticks(count)
        .into_iter()
        .map(|v| Tick {
            position: y.map(v),
            label: format_si(v),
        })
        .collect();
    let (r0, r1) = y.range();
    scene.push(Shape::Axis {
        side: AxisSide::Right,
        offset: plot.right,
        span: (r0.min(r1), r0.max(r1)),
        ticks,
    });
}

pub fn x_title(scene: &mut Scene, plot: &Plot, text: impl Into<String>) {
    scene.label((plot.width / 2.0, plot.height - 8.0), text, Anchor::Middle, 11.0);
}

pub fn y_title(scene: &mut Scene, plot: &Plot, text: impl Into<String>) {
    scene.vertical_label((15.0, plot.height / 2.0), text);
}

pub fn volume_title(scene: &mut Scene, plot: &Plot) {
    scene.vertical_label((plot.width - 6.0, plot.height / 2.0), "Volume");
}

/// Color swatch + name per ticker, stacked 18px apart.
pub fn legend(scene: &mut Scene, tickers: &[Ticker], at: (f64, f64)) {
    for (i, t) in tickers.iter().enumerate() {
        let y = at.1 + i as f64 * 18.0;
        scene.push(Shape::Rect {
            x: at.0,
            y,
            width: 10.0,
            height: 10.0,
            fill: t.color(),
            opacity: 1.0,
        });
        scene.label((at.0 + 16.0, y + 9.0), t.symbol(), Anchor::Start, 11.0);
    }
}

/// Dashed vertical markers for split dates inside the scale's domain.
pub fn split_markers(scene: &mut Scene, plot: &Plot, x: &TimeScale, splits: &[NaiveDate], opacity: f64) {
    let domain = x.domain();
    for date in splits.iter().filter(|d| domain.contains(**d)) {
        let px = x.map(*date);
        scene.push(Shape::Line {
            from: (px, plot.top),
            to: (px, plot.bottom),
            color: Color::SPLIT,
            width: 1.5,
            dashed: true,
            opacity,
        });
    }
}

/// Volume scale over the points that carry a volume, if any do.
pub fn volume_scale(points: &[&PricePoint], plot: &Plot) -> Option<LinearScale> {
    LinearScale::from_values(
        points.iter().filter_map(|p| p.volume).map(|v| v as f64),
        plot.volume_range(),
    )
    .map(|s| s.nice(10))
}

/// One bar per point with a volume; width from the first two points' spacing.
pub fn volume_bars(
    scene: &mut Scene,
    plot: &Plot,
    points: &[&PricePoint],
    x: &TimeScale,
    y: &LinearScale,
    opacity: f64,
) {
    let bar_width = match points {
        [a, b, ..] => ((x.map(b.date) - x.map(a.date)) * 0.9).max(1.0),
        _ => 1.0,
    };
    for p in points {
        let Some(volume) = p.volume else { continue };
        let top = y.map(volume as f64);
        scene.push(Shape::Rect {
            x: x.map(p.date) - bar_width / 2.0,
            y: top,
            width: bar_width,
            height: plot.bottom - top,
            fill: Color::VOLUME,
            opacity,
        });
    }
}

/// Price line for one ticker.
pub fn price_line(
    scene: &mut Scene,
    points: &[&PricePoint],
    x: &TimeScale,
    y: &LinearScale,
    ticker: Ticker,
    opacity: f64,
) {
    scene.push(Shape::Polyline {
        points: points
            .iter()
            .map(|p| (x.map(p.date), y.map(p.close)))
            .collect(),
        color: ticker.color(),
        width: 2.0,
        opacity,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimeDomain;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn plot_geometry_follows_layout() {
        let plot = Plot::new(&Layout::default(), PanelKind::Scatter);
        assert_eq!(plot.height, 320.0);
        assert_eq!(plot.x_range(), (60.0, 880.0));
        assert_eq!(plot.y_range(), (274.0, 26.0));
        assert_eq!(plot.volume_range(), (274.0, 160.0));
    }

    #[test]
    fn split_markers_only_inside_domain() {
        let plot = Plot::new(&Layout::default(), PanelKind::Overview);
        let x = TimeScale::new(TimeDomain::new(d(2003, 1, 1), d(2010, 1, 1)), plot.x_range());
        let mut scene = plot.scene();
        split_markers(&mut scene, &plot, &x, &[d(2002, 7, 31), d(2004, 8, 6), d(2008, 7, 3)], 0.7);
        assert_eq!(scene.count(|s| matches!(s, Shape::Line { dashed: true, .. })), 2);
    }

    #[test]
    fn legend_has_swatch_and_label_per_ticker() {
        let mut scene = Scene::new(900.0, 360.0);
        legend(&mut scene, &[Ticker::Amd, Ticker::Intel], (750.0, 34.0));
        assert_eq!(scene.count(|s| matches!(s, Shape::Rect { .. })), 2);
        let texts: Vec<&str> = scene.texts().collect();
        assert_eq!(texts, vec!["AMD", "INTEL"]);
    }
}
