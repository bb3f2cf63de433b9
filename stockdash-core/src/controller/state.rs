//! Committed view state: the active time domain, the brush, and the
//! selections each panel renders with.

use crate::config::BrushFanOut;
use crate::data::Dataset;
use crate::domain::{TickerPair, TickerSelection, TimeDomain};

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Price extent (model extent when no prices were loaded).
    pub full_extent: Option<TimeDomain>,
    /// Active domain; starts as `full_extent`.
    pub domain: Option<TimeDomain>,
    /// Brush in overview pixels, ordered and clamped to the plot.
    pub brush: Option<(f64, f64)>,
    /// Tickers shown by Overview and Detail.
    pub visible: TickerSelection,
    pub model_selection: TickerSelection,
    pub pair: TickerPair,
}

impl ViewState {
    pub fn new(
        dataset: &Dataset,
        visible: TickerSelection,
        model_selection: TickerSelection,
        pair: TickerPair,
    ) -> Self {
        let full_extent = dataset.extent().or_else(|| dataset.model_extent());
        Self {
            full_extent,
            domain: full_extent,
            brush: None,
            visible,
            model_selection,
            pair,
        }
    }

    pub fn reset_domain(&mut self) {
        self.domain = self.full_extent;
        self.brush = None;
    }

    /// Domain the Model panel renders over. The renderer clips its start
    /// to the model era.
    pub fn model_domain(&self, policy: BrushFanOut, dataset: &Dataset) -> Option<TimeDomain> {
        match policy {
            BrushFanOut::AllPanels => self.domain,
            BrushFanOut::DetailOnly => dataset.model_extent(),
        }
    }

    pub fn scatter_domain(&self, policy: BrushFanOut) -> Option<TimeDomain> {
        match policy {
            BrushFanOut::AllPanels => self.domain,
            BrushFanOut::DetailOnly => self.full_extent,
        }
    }
}
