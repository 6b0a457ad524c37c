use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How a post is drawn from the filtered view
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Uniform over every post, dated or not
    All,
    /// Uniform over the newest 10% of dated posts
    Recent,
    /// Uniform year, then uniform post within it
    Year,
    /// Uniform year-month, then uniform post within it
    Month,
    /// Uniform chronological bucket (10 equal-count spans), then uniform post within it
    #[default]
    Balanced,
}

impl Strategy {
    pub const VARIANTS: [Strategy; 5] =
        [Strategy::All, Strategy::Recent, Strategy::Year, Strategy::Month, Strategy::Balanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::All => "all",
            Strategy::Recent => "recent",
            Strategy::Year => "year",
            Strategy::Month => "month",
            Strategy::Balanced => "balanced",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Strategy::All => "All Time (Random)",
            Strategy::Recent => "Recent (Last 10%)",
            Strategy::Year => "Random Year",
            Strategy::Month => "Random Month",
            Strategy::Balanced => "Balanced Timeline",
        }
    }

    /// Whether the strategy draws only from posts with a parsed timestamp
    pub fn requires_timestamp(&self) -> bool {
        !matches!(self, Strategy::All)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy {0:?} (expected all, recent, year, month or balanced)")]
pub struct ParseStrategyError(String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Strategy::VARIANTS
            .into_iter()
            .find(|strategy| strategy.as_str() == wanted)
            .ok_or_else(|| ParseStrategyError(s.to_string()))
    }
}
