// In crates/app-config/src/lib.rs

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use std::collections::HashSet;
use std::path::Path;

use core_types::ProductConfig;
use risk::BandGuardrail;
use strategies::MarketCondition;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{
    AppSettings, CompetitorProvider, CompetitorSettings, DataProvider, DataSourceSettings,
    EngineConfig, GuardrailDefaults, PricingSettings, ProductEntry, Settings,
};

/// Prefix for environment overrides, e.g. `PRICER_PRICING__MARKET_CONDITION=bull`.
pub const ENV_PREFIX: &str = "PRICER";

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads the TOML file at `path`.
/// 2. Merges settings from environment variables prefixed with `PRICER_`,
///    using `__` to separate nested keys.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let builder = Config::builder()
        .add_source(File::from(path))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
    build(builder)
}

/// Parses settings from TOML text alone, without environment overrides.
pub fn settings_from_toml(content: &str) -> Result<Settings> {
    build(Config::builder().add_source(File::from_str(content, FileFormat::Toml)))
}

fn build(builder: ConfigBuilder<DefaultState>) -> Result<Settings> {
    let settings: Settings = builder.build()?.try_deserialize()?;
    Ok(settings)
}

/// Checks loaded settings and resolves them into an [`EngineConfig`].
///
/// `condition_override` (typically from the command line) takes precedence
/// over `pricing.market_condition`. Problems are reported in a fixed order:
/// market condition, numeric settings, strategy coefficients, per-product
/// fields and guardrails, then catalog-wide checks.
pub fn validate(settings: &Settings, condition_override: Option<&str>) -> Result<EngineConfig> {
    let condition_id = condition_override.unwrap_or(&settings.pricing.market_condition);
    let market_condition: MarketCondition = condition_id.parse()?;

    if settings.pricing.smoothing_window_hours == 0 {
        return Err(Error::invalid(
            "pricing.smoothing_window_hours",
            "must be at least 1",
        ));
    }
    if settings.data_source.lookback_hours == 0 {
        return Err(Error::invalid("data_source.lookback_hours", "must be at least 1"));
    }
    let (balanced, bear) = (
        settings.strategies.balanced.risk_aversion,
        settings.strategies.bear.risk_aversion,
    );
    if bear <= balanced {
        return Err(Error::invalid(
            "strategies.bear.risk_aversion",
            format!("must be greater than strategies.balanced.risk_aversion ({balanced})"),
        ));
    }

    let catalog = settings
        .products
        .iter()
        .map(|entry| resolve_product(entry, &settings.guardrails))
        .collect::<Result<Vec<_>>>()?;

    if catalog.is_empty() {
        return Err(Error::EmptyCatalog);
    }

    let mut seen = HashSet::new();
    if let Some(duplicate) = catalog.iter().find(|p| !seen.insert(p.name.as_str())) {
        return Err(Error::DuplicateProduct(duplicate.name.clone()));
    }

    let default_asset = settings
        .pricing
        .default_asset
        .clone()
        .unwrap_or_else(|| settings.data_source.asset.clone());

    Ok(EngineConfig {
        market_condition,
        smoothing_window_hours: settings.pricing.smoothing_window_hours,
        default_asset,
        strategies: settings.strategies,
        catalog,
        data_source: settings.data_source.clone(),
        competitors: settings.competitors.clone(),
    })
}

fn resolve_product(entry: &ProductEntry, defaults: &GuardrailDefaults) -> Result<ProductConfig> {
    let require = |value: Option<f64>, field: &'static str| {
        value.ok_or_else(|| Error::MissingField {
            product: entry.name.clone(),
            field,
        })
    };

    let target_margin = require(entry.target_margin, "target_margin")?;
    let elasticity = require(entry.elasticity, "elasticity")?;
    let product = ProductConfig {
        name: entry.name.clone(),
        asset: entry.asset.clone(),
        target_margin,
        elasticity,
        competitor_name: entry.competitor_name.clone(),
        competitor_price_usd: entry.competitor_price_usd,
        base_price_usd: entry.base_price_usd,
        min_markup: require(entry.min_markup.or(defaults.min_markup), "min_markup")?,
        max_markup: require(entry.max_markup.or(defaults.max_markup), "max_markup")?,
        volatility_floor: require(
            entry.volatility_floor.or(defaults.volatility_floor),
            "volatility_floor",
        )?,
        volatility_ceiling: require(
            entry.volatility_ceiling.or(defaults.volatility_ceiling),
            "volatility_ceiling",
        )?,
    };

    if !target_margin.is_finite() || !elasticity.is_finite() {
        return Err(Error::invalid(
            format!("products.{}", entry.name),
            "target_margin and elasticity must be finite",
        ));
    }
    if let Some(base) = entry.base_price_usd {
        if !(base.is_finite() && base > 0.0) {
            return Err(Error::invalid(
                format!("products.{}.base_price_usd", entry.name),
                "must be a positive number",
            ));
        }
    }
    BandGuardrail::validate(&product)?;

    Ok(product)
}
