// In crates/strategies/src/types.rs

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The named market regimes (or business goals) a run can be priced under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketCondition {
    Balanced,
    Bull,
    Bear,
    Lateral,
    Penetration,
    Competitor,
}

impl MarketCondition {
    pub const ALL: [MarketCondition; 6] = [
        MarketCondition::Balanced,
        MarketCondition::Bull,
        MarketCondition::Bear,
        MarketCondition::Lateral,
        MarketCondition::Penetration,
        MarketCondition::Competitor,
    ];

    /// The canonical identifier used in configuration and output.
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketCondition::Balanced => "balanced",
            MarketCondition::Bull => "bull",
            MarketCondition::Bear => "bear",
            MarketCondition::Lateral => "lateral",
            MarketCondition::Penetration => "penetration",
            MarketCondition::Competitor => "competitor",
        }
    }

    /// Alternative identifiers accepted when parsing.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            MarketCondition::Balanced => &["default", "volatility_aware"],
            MarketCondition::Bull => &[],
            MarketCondition::Bear => &["bearish"],
            MarketCondition::Lateral => &["sideways"],
            MarketCondition::Penetration => &["market_penetration"],
            MarketCondition::Competitor => &["competitor_match"],
        }
    }
}

impl fmt::Display for MarketCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketCondition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        MarketCondition::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized || c.aliases().contains(&normalized.as_str()))
            .ok_or_else(|| Error::UnknownMarketCondition(s.to_string()))
    }
}

// --- Strategy coefficient settings ---
//
// Every field has a default, so a configuration file only needs to name the
// coefficients it wants to override.

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct BalancedSettings {
    /// Markup removed when volatility reaches the product's ceiling.
    pub risk_aversion: f64,
}

impl Default for BalancedSettings {
    fn default() -> Self {
        Self { risk_aversion: 1.0 }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct BullSettings {
    /// Extra share of elasticity-scaled momentum added on the way up.
    pub upside_weight: f64,
}

impl Default for BullSettings {
    fn default() -> Self {
        Self { upside_weight: 0.4 }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct BearSettings {
    /// Volatility penalty used while momentum is not negative.
    pub risk_aversion: f64,
    /// Share of |momentum| added back as a defensive markup on the way down.
    pub downside_weight: f64,
    /// Added to elasticity so inelastic products still get some protection.
    pub elasticity_offset: f64,
}

impl Default for BearSettings {
    fn default() -> Self {
        Self {
            risk_aversion: 1.6,
            downside_weight: 0.5,
            elasticity_offset: 0.1,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct LateralSettings {
    /// |momentum| and volatility must both sit below this for compression to apply.
    pub low_activity_threshold: f64,
}

impl Default for LateralSettings {
    fn default() -> Self {
        Self {
            low_activity_threshold: 0.02,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PenetrationSettings {
    /// Fixed amount taken off the target margin.
    pub discount: f64,
}

impl Default for PenetrationSettings {
    fn default() -> Self {
        Self { discount: 0.05 }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct CompetitorSettings {
    /// How far below the competitor's implied markup to settle.
    pub undercut: f64,
}

impl Default for CompetitorSettings {
    fn default() -> Self {
        Self { undercut: 0.0 }
    }
}

// Define the container for all strategy settings
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct StrategySettings {
    pub balanced: BalancedSettings,
    pub bull: BullSettings,
    pub bear: BearSettings,
    pub lateral: LateralSettings,
    pub penetration: PenetrationSettings,
    pub competitor: CompetitorSettings,
}
