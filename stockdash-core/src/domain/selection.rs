//! Committed ticker selections: a set for overview/detail and model, an
//! ordered pair for the scatter panel.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Ticker;

/// An ordered set of tickers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TickerSelection(BTreeSet<Ticker>);

impl TickerSelection {
    pub fn new<I: IntoIterator<Item = Ticker>>(tickers: I) -> Self {
        Self(tickers.into_iter().collect())
    }

    pub fn contains(&self, ticker: Ticker) -> bool {
        self.0.contains(&ticker)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tickers in checkbox order.
    pub fn iter(&self) -> impl Iterator<Item = Ticker> + '_ {
        self.0.iter().copied()
    }

    /// "AMD, NVIDIA" style label.
    pub fn label(&self) -> String {
        self.iter().map(Ticker::symbol).collect::<Vec<_>>().join(", ")
    }
}

impl FromIterator<Ticker> for TickerSelection {
    fn from_iter<I: IntoIterator<Item = Ticker>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Exactly two distinct tickers: `x` on the horizontal axis, `y` vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerPair {
    x: Ticker,
    y: Ticker,
}

impl TickerPair {
    /// `None` when both sides name the same ticker.
    pub fn new(x: Ticker, y: Ticker) -> Option<Self> {
        (x != y).then_some(Self { x, y })
    }

    /// Build from a checked list; only a list of exactly two tickers forms a pair.
    pub fn from_checked(checked: &[Ticker]) -> Option<Self> {
        match checked {
            [x, y] => Self::new(*x, *y),
            _ => None,
        }
    }

    pub fn x(&self) -> Ticker {
        self.x
    }

    pub fn y(&self) -> Ticker {
        self.y
    }
}

impl Default for TickerPair {
    fn default() -> Self {
        Self {
            x: Ticker::Amd,
            y: Ticker::Nvidia,
        }
    }
}
