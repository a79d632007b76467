// In crates/core-types/src/product.rs

use serde::{Deserialize, Serialize};

/// The business rules for a single product in the catalog.
///
/// Built once by the configuration layer (which also validates the
/// guardrail band) and never mutated during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductConfig {
    pub name: String,
    /// The series key used to fetch prices. `None` means the run's default asset.
    #[serde(default)]
    pub asset: Option<String>,
    /// Baseline additive markup, e.g. 0.05 for 5%.
    pub target_margin: f64,
    /// How strongly momentum moves the markup.
    pub elasticity: f64,
    #[serde(default)]
    pub competitor_name: Option<String>,
    /// A static competitor reference, used when no `competitor_name` is declared.
    #[serde(default)]
    pub competitor_price_usd: Option<f64>,
    /// The list price the markup is applied to. `None` quotes from the latest market price.
    #[serde(default)]
    pub base_price_usd: Option<f64>,

    // Guardrails
    pub min_markup: f64,
    pub max_markup: f64,
    pub volatility_floor: f64,
    pub volatility_ceiling: f64,
}

impl ProductConfig {
    /// The asset this product is priced against.
    pub fn asset_or<'a>(&'a self, default_asset: &'a str) -> &'a str {
        self.asset.as_deref().unwrap_or(default_asset)
    }

    /// The price the final markup is applied to.
    pub fn base_price_or(&self, latest_price: f64) -> f64 {
        self.base_price_usd.unwrap_or(latest_price)
    }
}
