//! Domain types: the vocabulary shared by ingestion, panels and controller.

pub mod point;
pub mod selection;
pub mod ticker;
pub mod time_domain;

pub use point::{ModelPoint, PricePoint};
pub use selection::{TickerPair, TickerSelection};
pub use ticker::Ticker;
pub use time_domain::TimeDomain;
