//! Checkbox groups: per-panel pending ticker state and its validation.
//!
//! Toggling only edits the pending set. Nothing reaches the committed
//! selection until `commit` validates the cardinality rule.

use std::collections::BTreeSet;

use crate::config::{ConfigError, ControlsConfig, PanelControlConfig};
use crate::domain::{Ticker, TickerPair, TickerSelection};
use crate::panels::PanelKind;

pub const SELECT_AT_LEAST_ONE: &str = "Select at least one stock.";
pub const SELECT_EXACTLY_TWO: &str = "Please select exactly 2 stocks.";

/// How many tickers a group must have checked to commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    AtLeastOne,
    ExactlyTwo,
}

impl Cardinality {
    fn accepts(self, n: usize) -> bool {
        match self {
            Cardinality::AtLeastOne => n >= 1,
            Cardinality::ExactlyTwo => n == 2,
        }
    }

    fn warning(self) -> &'static str {
        match self {
            Cardinality::AtLeastOne => SELECT_AT_LEAST_ONE,
            Cardinality::ExactlyTwo => SELECT_EXACTLY_TWO,
        }
    }
}

/// Result of a single checkbox click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Checked,
    Unchecked,
    /// The check would have exceeded the group's limit and was undone.
    Reverted,
    /// The panel has no checkbox for that ticker.
    NoSuchControl,
}

/// One panel's row of ticker checkboxes.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckboxGroup {
    panel: PanelKind,
    available: Vec<Ticker>,
    checked: BTreeSet<Ticker>,
    rule: Cardinality,
    warning: Option<&'static str>,
}

impl CheckboxGroup {
    fn resolve(
        panel: PanelKind,
        config: &PanelControlConfig,
        rule: Cardinality,
    ) -> Result<Self, ConfigError> {
        let available: Vec<Ticker> = Ticker::ALL
            .into_iter()
            .filter(|t| config.tickers.contains(t))
            .collect();
        let needed = match rule {
            Cardinality::AtLeastOne => 1,
            Cardinality::ExactlyTwo => 2,
        };
        if available.len() < needed {
            return Err(ConfigError::MissingControl {
                panel,
                control: format!("at least {needed} ticker checkbox(es)"),
            });
        }
        if let Some(t) = config.checked.iter().find(|t| !available.contains(t)) {
            return Err(ConfigError::MissingControl {
                panel,
                control: format!("{t} checkbox"),
            });
        }
        let checked: BTreeSet<Ticker> = config.checked.iter().copied().collect();
        if !rule.accepts(checked.len()) {
            return Err(ConfigError::InvalidSelection {
                panel,
                reason: format!("{} ({} checked)", rule.warning(), checked.len()),
            });
        }
        Ok(Self {
            panel,
            available,
            checked,
            rule,
            warning: None,
        })
    }

    pub fn panel(&self) -> PanelKind {
        self.panel
    }

    /// Checkboxes in display order.
    pub fn available(&self) -> &[Ticker] {
        &self.available
    }

    pub fn is_checked(&self, ticker: Ticker) -> bool {
        self.checked.contains(&ticker)
    }

    pub fn warning(&self) -> Option<&'static str> {
        self.warning
    }

    /// Flip one checkbox. A third scatter check is reverted on the spot.
    pub fn toggle(&mut self, ticker: Ticker) -> Toggle {
        if !self.available.contains(&ticker) {
            return Toggle::NoSuchControl;
        }
        let outcome = if self.checked.remove(&ticker) {
            Toggle::Unchecked
        } else if self.rule == Cardinality::ExactlyTwo && self.checked.len() >= 2 {
            Toggle::Reverted
        } else {
            self.checked.insert(ticker);
            Toggle::Checked
        };
        if self.rule == Cardinality::ExactlyTwo {
            self.warning = (!self.rule.accepts(self.checked.len())).then_some(SELECT_EXACTLY_TWO);
        }
        outcome
    }

    /// Validate the pending state. On failure the warning is set and the
    /// committed selection must stay as it was.
    pub fn commit(&mut self) -> Result<TickerSelection, &'static str> {
        if self.rule.accepts(self.checked.len()) {
            self.warning = None;
            Ok(self.checked.iter().copied().collect())
        } else {
            let warning = self.rule.warning();
            self.warning = Some(warning);
            Err(warning)
        }
    }

    /// Pending tickers in checkbox order.
    pub fn pending(&self) -> Vec<Ticker> {
        self.checked.iter().copied().collect()
    }
}

/// Which controls exist on which panel, resolved once from config.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSurface {
    pub overview: CheckboxGroup,
    pub model: CheckboxGroup,
    pub scatter: CheckboxGroup,
}

impl ControlSurface {
    pub fn resolve(config: &ControlsConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            overview: CheckboxGroup::resolve(PanelKind::Overview, &config.overview, Cardinality::AtLeastOne)?,
            model: CheckboxGroup::resolve(PanelKind::Model, &config.model, Cardinality::AtLeastOne)?,
            scatter: CheckboxGroup::resolve(PanelKind::Scatter, &config.scatter, Cardinality::ExactlyTwo)?,
        })
    }

    /// Detail has no checkboxes of its own; it follows the overview.
    pub fn group(&self, panel: PanelKind) -> Option<&CheckboxGroup> {
        match panel {
            PanelKind::Overview => Some(&self.overview),
            PanelKind::Detail => None,
            PanelKind::Model => Some(&self.model),
            PanelKind::Scatter => Some(&self.scatter),
        }
    }

    pub fn group_mut(&mut self, panel: PanelKind) -> Option<&mut CheckboxGroup> {
        match panel {
            PanelKind::Overview => Some(&mut self.overview),
            PanelKind::Detail => None,
            PanelKind::Model => Some(&mut self.model),
            PanelKind::Scatter => Some(&mut self.scatter),
        }
    }

    /// Initial committed selections, as declared.
    pub fn initial_selection(&self, panel: PanelKind) -> TickerSelection {
        self.group(panel)
            .map(|g| g.checked.iter().copied().collect())
            .unwrap_or_else(|| self.initial_selection(PanelKind::Overview))
    }

    pub fn initial_pair(&self) -> Option<TickerPair> {
        TickerPair::from_checked(&self.scatter.pending())
    }
}
