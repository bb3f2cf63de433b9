//! Ticker: one of the three tracked instruments.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::scene::Color;

/// A tracked stock symbol.
///
/// Ordering follows checkbox order (AMD, INTEL, NVIDIA); scatter pairs are
/// built in this order so the first checked ticker is always the X axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Ticker {
    Amd,
    Intel,
    Nvidia,
}

impl Ticker {
    pub const ALL: [Ticker; 3] = [Ticker::Amd, Ticker::Intel, Ticker::Nvidia];

    pub fn symbol(self) -> &'static str {
        match self {
            Ticker::Amd => "AMD",
            Ticker::Intel => "INTEL",
            Ticker::Nvidia => "NVIDIA",
        }
    }

    /// Fixed display color.
    pub fn color(self) -> Color {
        match self {
            Ticker::Amd => Color::rgb(0x00, 0x9E, 0x73),
            Ticker::Intel => Color::rgb(0x00, 0x72, 0xB2),
            Ticker::Nvidia => Color::rgb(0xD5, 0x5E, 0x00),
        }
    }

    /// Index into `ALL`.
    pub fn index(self) -> usize {
        match self {
            Ticker::Amd => 0,
            Ticker::Intel => 1,
            Ticker::Nvidia => 2,
        }
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.symbol())
    }
}

/// Error returned when a ticker column holds an unknown or empty symbol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ticker: {0:?}")]
pub struct UnknownTicker(pub String);

impl FromStr for Ticker {
    type Err = UnknownTicker;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ticker::ALL
            .into_iter()
            .find(|t| t.symbol().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownTicker(trimmed.to_string()))
    }
}
