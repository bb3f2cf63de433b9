//! Dashboard controller.
//!
//! Owns the dataset, the resolved control surface, the committed view state
//! and the last rendering of every panel. `handle` applies one event,
//! re-renders the affected panels synchronously, and reports which ones
//! changed. Nothing else mutates view state.

pub mod controls;
pub mod state;

use tracing::{debug, info, warn};

use crate::config::{BrushFanOut, ConfigError, DashboardConfig};
use crate::data::Dataset;
use crate::domain::{Ticker, TickerPair, TimeDomain};
use crate::panels::{detail, model, overview, scatter, PanelKind, PanelView};
use crate::scale::TimeScale;

pub use controls::{Cardinality, CheckboxGroup, ControlSurface, Toggle};
pub use state::ViewState;

/// User input the dashboard understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Brush end over the overview, in logical pixels. `None` is a cleared brush.
    Brush { selection: Option<(f64, f64)> },
    /// Back to the full extent.
    ResetDomain,
    /// Checkbox click; only edits pending state.
    Toggle { panel: PanelKind, ticker: Ticker },
    /// Apply the panel's pending checkboxes and redraw it.
    Refresh(PanelKind),
}

/// Panels re-rendered by one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedrawSet([bool; 4]);

impl RedrawSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn of(panels: &[PanelKind]) -> Self {
        let mut set = Self::default();
        for p in panels {
            set.insert(*p);
        }
        set
    }

    pub fn insert(&mut self, panel: PanelKind) {
        self.0[panel.index()] = true;
    }

    pub fn contains(&self, panel: PanelKind) -> bool {
        self.0[panel.index()]
    }

    pub fn is_empty(&self) -> bool {
        !self.0.iter().any(|b| *b)
    }

    pub fn iter(&self) -> impl Iterator<Item = PanelKind> + '_ {
        PanelKind::ALL.into_iter().filter(|p| self.contains(*p))
    }
}

/// Application state for the four-panel dashboard.
#[derive(Debug, Clone)]
pub struct Dashboard {
    config: DashboardConfig,
    dataset: Dataset,
    controls: ControlSurface,
    state: ViewState,
    views: [PanelView; 4],
    generations: [u64; 4],
}

impl Dashboard {
    /// Resolve controls, then render every panel once.
    pub fn new(config: DashboardConfig, dataset: Dataset) -> Result<Self, ConfigError> {
        config.validate()?;
        let controls = ControlSurface::resolve(&config.controls)?;
        let pair = controls.initial_pair().ok_or_else(|| ConfigError::InvalidSelection {
            panel: PanelKind::Scatter,
            reason: controls::SELECT_EXACTLY_TWO.to_string(),
        })?;
        let state = ViewState::new(
            &dataset,
            controls.initial_selection(PanelKind::Overview),
            controls.initial_selection(PanelKind::Model),
            pair,
        );
        let views = PanelKind::ALL.map(|p| render_panel(p, &dataset, &config, &state));
        info!(
            prices = dataset.prices().len(),
            model = dataset.model().len(),
            fan_out = ?config.brush_fan_out,
            "dashboard ready"
        );
        Ok(Self {
            config,
            dataset,
            controls,
            state,
            views,
            generations: [1; 4],
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn controls(&self) -> &ControlSurface {
        &self.controls
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn view(&self, panel: PanelKind) -> &PanelView {
        &self.views[panel.index()]
    }

    /// Number of times a panel has been rendered.
    pub fn generation(&self, panel: PanelKind) -> u64 {
        self.generations[panel.index()]
    }

    pub fn domain(&self) -> Option<TimeDomain> {
        self.state.domain
    }

    pub fn pair(&self) -> TickerPair {
        self.state.pair
    }

    /// Scale that maps brush pixels to dates.
    pub fn overview_scale(&self) -> Option<TimeScale> {
        overview::time_scale(&self.dataset, &self.config)
    }

    /// Panels that follow the shared domain.
    fn fan_out(&self) -> RedrawSet {
        match self.config.brush_fan_out {
            BrushFanOut::AllPanels => {
                RedrawSet::of(&[PanelKind::Detail, PanelKind::Model, PanelKind::Scatter])
            }
            BrushFanOut::DetailOnly => RedrawSet::of(&[PanelKind::Detail]),
        }
    }

    /// Apply one event and re-render what it affects.
    pub fn handle(&mut self, event: Event) -> RedrawSet {
        let redraw = match event {
            Event::Brush { selection: None } => {
                self.state.brush = None;
                RedrawSet::empty()
            }
            Event::Brush {
                selection: Some((a, b)),
            } => self.brush(a, b),
            Event::ResetDomain => {
                self.state.reset_domain();
                debug!("domain reset to full extent");
                self.fan_out()
            }
            Event::Toggle { panel, ticker } => {
                self.toggle(panel, ticker);
                RedrawSet::empty()
            }
            Event::Refresh(panel) => self.refresh(panel),
        };
        for panel in redraw.iter() {
            self.views[panel.index()] =
                render_panel(panel, &self.dataset, &self.config, &self.state);
            self.generations[panel.index()] += 1;
        }
        redraw
    }

    /// Click a checkbox. Edits pending state only, so nothing is redrawn.
    /// `None` when the panel has no checkbox row of its own.
    pub fn toggle(&mut self, panel: PanelKind, ticker: Ticker) -> Option<Toggle> {
        let result = self.controls.group_mut(panel).map(|g| g.toggle(ticker));
        debug!(%panel, %ticker, ?result, "checkbox toggled");
        result
    }

    fn brush(&mut self, a: f64, b: f64) -> RedrawSet {
        let Some(scale) = self.overview_scale() else {
            return RedrawSet::empty();
        };
        let (r0, r1) = scale.range();
        let lo = a.min(b).clamp(r0, r1);
        let hi = a.max(b).clamp(r0, r1);
        let domain = TimeDomain::new(scale.invert(lo), scale.invert(hi));
        debug!(start = %domain.start(), end = %domain.end(), "brushed");
        self.state.brush = Some((lo, hi));
        self.state.domain = Some(domain);
        self.fan_out()
    }

    fn refresh(&mut self, panel: PanelKind) -> RedrawSet {
        let Some(group) = self.controls.group_mut(panel) else {
            return RedrawSet::of(&[panel]);
        };
        let selection = match group.commit() {
            Ok(selection) => selection,
            Err(warning) => {
                warn!(%panel, warning, "refresh rejected");
                return RedrawSet::empty();
            }
        };
        match panel {
            PanelKind::Overview | PanelKind::Detail => {
                self.state.visible = selection;
                RedrawSet::of(&[PanelKind::Overview, PanelKind::Detail])
            }
            PanelKind::Model => {
                self.state.model_selection = selection;
                RedrawSet::of(&[PanelKind::Model])
            }
            PanelKind::Scatter => {
                let checked: Vec<Ticker> = selection.iter().collect();
                match TickerPair::from_checked(&checked) {
                    Some(pair) => {
                        self.state.pair = pair;
                        RedrawSet::of(&[PanelKind::Scatter])
                    }
                    None => RedrawSet::empty(),
                }
            }
        }
    }
}

fn render_panel(
    panel: PanelKind,
    dataset: &Dataset,
    config: &DashboardConfig,
    state: &ViewState,
) -> PanelView {
    let policy = config.brush_fan_out;
    match panel {
        PanelKind::Overview => overview::render(dataset, config, &state.visible),
        PanelKind::Detail => detail::render(dataset, config, state.domain, &state.visible),
        PanelKind::Model => model::render(
            dataset,
            config,
            state.model_domain(policy, dataset),
            &state.model_selection,
        ),
        PanelKind::Scatter => {
            scatter::render(dataset, config, state.scatter_domain(policy), state.pair)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample::demo_dataset;
    use crate::panels::Outcome;

    fn dashboard(policy: BrushFanOut) -> Dashboard {
        let config = DashboardConfig {
            brush_fan_out: policy,
            ..DashboardConfig::default()
        };
        let ds = demo_dataset(11, &config.split_dates, config.model_era_start);
        Dashboard::new(config, ds).unwrap()
    }

    #[test]
    fn initial_render_covers_all_panels() {
        let d = dashboard(BrushFanOut::AllPanels);
        for p in PanelKind::ALL {
            assert_eq!(d.generation(p), 1);
            assert!(!d.view(p).outcome.is_placeholder(), "{p} rendered a placeholder");
        }
        assert_eq!(d.domain(), d.dataset().extent());
    }

    #[test]
    fn brush_fans_out_to_all_downstream_panels() {
        let mut d = dashboard(BrushFanOut::AllPanels);
        let redraw = d.handle(Event::Brush {
            selection: Some((700.0, 500.0)),
        });
        assert_eq!(
            redraw,
            RedrawSet::of(&[PanelKind::Detail, PanelKind::Model, PanelKind::Scatter])
        );
        assert_eq!(d.generation(PanelKind::Overview), 1);
        assert_eq!(d.generation(PanelKind::Model), 2);
        assert_eq!(d.state().brush, Some((500.0, 700.0)));
        let domain = d.domain().unwrap();
        assert!(domain.start() < domain.end());
    }

    #[test]
    fn detail_only_policy_keeps_fixed_domains() {
        let mut d = dashboard(BrushFanOut::DetailOnly);
        let before = d.view(PanelKind::Scatter).clone();
        let redraw = d.handle(Event::Brush {
            selection: Some((100.0, 200.0)),
        });
        assert_eq!(redraw, RedrawSet::of(&[PanelKind::Detail]));
        assert_eq!(d.view(PanelKind::Scatter), &before);
        assert_eq!(d.generation(PanelKind::Scatter), 1);
    }

    #[test]
    fn cleared_brush_is_a_no_op() {
        let mut d = dashboard(BrushFanOut::AllPanels);
        d.handle(Event::Brush {
            selection: Some((300.0, 400.0)),
        });
        let domain = d.domain();
        let redraw = d.handle(Event::Brush { selection: None });
        assert!(redraw.is_empty());
        assert_eq!(d.domain(), domain);
        assert_eq!(d.state().brush, None);
    }

    #[test]
    fn brush_is_clamped_to_plot() {
        let mut d = dashboard(BrushFanOut::AllPanels);
        d.handle(Event::Brush {
            selection: Some((-50.0, 5000.0)),
        });
        assert_eq!(d.state().brush, Some((60.0, 880.0)));
        assert_eq!(d.domain(), d.dataset().extent());
    }

    #[test]
    fn reset_restores_full_extent() {
        let mut d = dashboard(BrushFanOut::AllPanels);
        d.handle(Event::Brush {
            selection: Some((300.0, 400.0)),
        });
        let redraw = d.handle(Event::ResetDomain);
        assert!(redraw.contains(PanelKind::Detail));
        assert_eq!(d.domain(), d.dataset().extent());
        assert_eq!(d.state().brush, None);
    }

    #[test]
    fn toggles_do_not_redraw_until_refresh() {
        let mut d = dashboard(BrushFanOut::AllPanels);
        let redraw = d.handle(Event::Toggle {
            panel: PanelKind::Model,
            ticker: Ticker::Intel,
        });
        assert!(redraw.is_empty());
        assert_eq!(d.state().model_selection.len(), 3);

        let redraw = d.handle(Event::Refresh(PanelKind::Model));
        assert_eq!(redraw, RedrawSet::of(&[PanelKind::Model]));
        assert_eq!(d.state().model_selection.len(), 2);
        match &d.view(PanelKind::Model).outcome {
            Outcome::Model { r_squared, .. } => assert_eq!(r_squared.len(), 2),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn rejected_refresh_keeps_selection_and_warns() {
        let mut d = dashboard(BrushFanOut::AllPanels);
        d.handle(Event::Toggle {
            panel: PanelKind::Overview,
            ticker: Ticker::Nvidia,
        });
        let redraw = d.handle(Event::Refresh(PanelKind::Overview));
        assert!(redraw.is_empty());
        assert!(d.state().visible.contains(Ticker::Nvidia));
        assert_eq!(
            d.controls().overview.warning(),
            Some(controls::SELECT_AT_LEAST_ONE)
        );
    }

    #[test]
    fn scatter_refresh_commits_new_pair() {
        let mut d = dashboard(BrushFanOut::AllPanels);
        d.handle(Event::Toggle {
            panel: PanelKind::Scatter,
            ticker: Ticker::Amd,
        });
        d.handle(Event::Toggle {
            panel: PanelKind::Scatter,
            ticker: Ticker::Intel,
        });
        assert_eq!(d.pair(), TickerPair::default());
        let redraw = d.handle(Event::Refresh(PanelKind::Scatter));
        assert_eq!(redraw, RedrawSet::of(&[PanelKind::Scatter]));
        assert_eq!(d.pair(), TickerPair::new(Ticker::Intel, Ticker::Nvidia).unwrap());
    }

    #[test]
    fn toggle_reports_each_outcome() {
        let mut d = dashboard(BrushFanOut::AllPanels);
        assert_eq!(d.toggle(PanelKind::Scatter, Ticker::Intel), Some(Toggle::Reverted));
        assert_eq!(d.toggle(PanelKind::Scatter, Ticker::Amd), Some(Toggle::Unchecked));
        assert_eq!(d.toggle(PanelKind::Scatter, Ticker::Intel), Some(Toggle::Checked));
        assert_eq!(d.toggle(PanelKind::Detail, Ticker::Amd), None);
        assert_eq!(d.generation(PanelKind::Scatter), 1);
    }

    #[test]
    fn empty_dataset_renders_placeholders() {
        let d = Dashboard::new(DashboardConfig::default(), Dataset::default()).unwrap();
        for p in PanelKind::ALL {
            assert_eq!(
                d.view(p).outcome.placeholder(),
                Some(crate::panels::NO_DATA_LOADED)
            );
        }
        assert!(d.overview_scale().is_none());
    }

    #[test]
    fn brush_without_prices_does_nothing() {
        let mut d = Dashboard::new(DashboardConfig::default(), Dataset::default()).unwrap();
        let redraw = d.handle(Event::Brush {
            selection: Some((100.0, 200.0)),
        });
        assert!(redraw.is_empty());
    }
}
