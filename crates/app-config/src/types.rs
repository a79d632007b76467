// In crates/app-config/src/types.rs

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use core_types::ProductConfig;
use strategies::{MarketCondition, StrategySettings};

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub pricing: PricingSettings,
    #[serde(default)]
    pub data_source: DataSourceSettings,
    #[serde(default)]
    pub competitors: CompetitorSettings,
    /// Guardrail values inherited by every product that leaves them out.
    #[serde(default)]
    pub guardrails: GuardrailDefaults,
    #[serde(default)]
    pub strategies: StrategySettings,
    #[serde(default)]
    pub products: Vec<ProductEntry>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct PricingSettings {
    #[serde(default = "default_smoothing_window")]
    pub smoothing_window_hours: usize,
    /// Kept as text so an unknown identifier is reported by validation.
    #[serde(default = "default_market_condition")]
    pub market_condition: String,
    /// Series key for products without their own `asset`. Falls back to `data_source.asset`.
    #[serde(default)]
    pub default_asset: Option<String>,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            smoothing_window_hours: default_smoothing_window(),
            market_condition: default_market_condition(),
            default_asset: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataProvider {
    Csv,
    #[default]
    CoinMarketCap,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DataSourceSettings {
    #[serde(default)]
    pub provider: DataProvider,
    #[serde(default = "default_asset")]
    pub asset: String,
    #[serde(default = "default_vs_currency")]
    pub vs_currency: String,
    #[serde(default = "default_lookback_hours")]
    pub lookback_hours: u32,
    #[serde(default)]
    pub api_url: Option<String>,
    /// When absent the `COINMARKETCAP_API_KEY` environment variable is used.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub csv_path: Option<PathBuf>,
}

impl Default for DataSourceSettings {
    fn default() -> Self {
        Self {
            provider: DataProvider::default(),
            asset: default_asset(),
            vs_currency: default_vs_currency(),
            lookback_hours: default_lookback_hours(),
            api_url: None,
            api_key: None,
            csv_path: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CompetitorProvider {
    #[default]
    Stub,
    CoinMarketCap,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct CompetitorSettings {
    #[serde(default)]
    pub provider: CompetitorProvider,
    /// Static quotes for the stub provider, keyed by exchange name.
    #[serde(default)]
    pub prices: BTreeMap<String, f64>,
    /// Ticker symbol looked up in the market-pairs listing (e.g. "BTC").
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    /// When absent the data source key, then `COINMARKETCAP_API_KEY`, is used.
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct GuardrailDefaults {
    pub min_markup: Option<f64>,
    pub max_markup: Option<f64>,
    pub volatility_floor: Option<f64>,
    pub volatility_ceiling: Option<f64>,
}

/// A `[[products]]` entry as written in the file. Guardrail fields may be
/// inherited from `[guardrails]`, so everything except the name is optional
/// here and checked during validation.
#[derive(Deserialize, Debug, Clone)]
pub struct ProductEntry {
    pub name: String,
    pub asset: Option<String>,
    pub target_margin: Option<f64>,
    pub elasticity: Option<f64>,
    pub competitor_name: Option<String>,
    pub competitor_price_usd: Option<f64>,
    pub base_price_usd: Option<f64>,
    pub min_markup: Option<f64>,
    pub max_markup: Option<f64>,
    pub volatility_floor: Option<f64>,
    pub volatility_ceiling: Option<f64>,
}

/// Everything the engine and the CLI need, after validation.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub market_condition: MarketCondition,
    pub smoothing_window_hours: usize,
    pub default_asset: String,
    pub strategies: StrategySettings,
    pub catalog: Vec<ProductConfig>,
    pub data_source: DataSourceSettings,
    pub competitors: CompetitorSettings,
}

/// Helper functions for serde defaults
fn default_log_level() -> String { "info".to_string() }
fn default_smoothing_window() -> usize { 12 }
fn default_market_condition() -> String { MarketCondition::Balanced.as_str().to_string() }
fn default_asset() -> String { "bitcoin".to_string() }
fn default_vs_currency() -> String { "usd".to_string() }
fn default_lookback_hours() -> u32 { 72 }
