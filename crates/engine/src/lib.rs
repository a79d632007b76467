// In crates/engine/src/lib.rs

pub mod record;
pub mod types;

use rayon::prelude::*;
use rust_decimal::Decimal;

use core_types::{CompetitorPriceProvider, Error, ProductConfig, SeriesProvider};
use risk::{BandGuardrail, Guardrail};
use signals::SignalGenerator;
use strategies::{MarketCondition, Strategy, StrategySettings, create_strategy};

pub use record::{PricingRecord, to_records};
pub use types::{PricingOutcome, PricingResult, PricingWarning};

/// Series key used for products that do not name their own asset.
pub const DEFAULT_ASSET: &str = "bitcoin";

/// Warning source for a product's configured `competitor_price_usd`.
pub const STATIC_COMPETITOR_SOURCE: &str = "competitor_price_usd";

/// Runs signals, strategy and guardrails over a product catalog.
///
/// The engine is immutable once built, so a run can be repeated or executed
/// across threads and always yields the same outcomes for the same inputs.
pub struct PriceEngine {
    market_condition: MarketCondition,
    strategy: Box<dyn Strategy + Send + Sync>,
    guardrail: BandGuardrail,
    generator: SignalGenerator,
    default_asset: String,
}

impl PriceEngine {
    pub fn new(
        market_condition: MarketCondition,
        settings: &StrategySettings,
        smoothing_window_hours: usize,
    ) -> Self {
        Self {
            market_condition,
            strategy: create_strategy(market_condition, settings),
            guardrail: BandGuardrail::new(),
            generator: SignalGenerator::new(smoothing_window_hours),
            default_asset: DEFAULT_ASSET.to_string(),
        }
    }

    pub fn with_default_asset(mut self, asset: impl Into<String>) -> Self {
        self.default_asset = asset.into();
        self
    }

    pub fn market_condition(&self) -> MarketCondition {
        self.market_condition
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn default_asset(&self) -> &str {
        &self.default_asset
    }

    /// Prices every product in catalog order.
    ///
    /// A product whose data cannot be fetched becomes a
    /// [`PricingOutcome::Failed`]; the rest of the batch still runs.
    pub fn run<S, C>(&self, catalog: &[ProductConfig], series: &S, competitors: &C) -> Vec<PricingOutcome>
    where
        S: SeriesProvider + ?Sized,
        C: CompetitorPriceProvider + ?Sized,
    {
        self.log_start(catalog.len());
        let outcomes: Vec<PricingOutcome> = catalog
            .iter()
            .map(|product| self.price_product(product, series, competitors))
            .collect();
        log_finish(&outcomes);
        outcomes
    }

    /// Same as [`PriceEngine::run`], with products priced on the rayon pool.
    pub fn run_parallel<S, C>(
        &self,
        catalog: &[ProductConfig],
        series: &S,
        competitors: &C,
    ) -> Vec<PricingOutcome>
    where
        S: SeriesProvider + Sync + ?Sized,
        C: CompetitorPriceProvider + Sync + ?Sized,
    {
        self.log_start(catalog.len());
        let outcomes: Vec<PricingOutcome> = catalog
            .par_iter()
            .map(|product| self.price_product(product, series, competitors))
            .collect();
        log_finish(&outcomes);
        outcomes
    }

    /// The full signals -> strategy -> guardrail pipeline for one product.
    pub fn price_product<S, C>(&self, product: &ProductConfig, series: &S, competitors: &C) -> PricingOutcome
    where
        S: SeriesProvider + ?Sized,
        C: CompetitorPriceProvider + ?Sized,
    {
        let asset = product.asset_or(&self.default_asset);

        let fetched = match series.fetch_series(asset) {
            Ok(s) => s,
            Err(e) => return failed(product, asset, e),
        };
        let Some(latest) = fetched.latest() else {
            return failed(product, asset, Error::data_unavailable(asset, "price series is empty"));
        };
        let latest_price = latest.price;

        let signals = self.generator.compute(&fetched);
        tracing::debug!(
            product = %product.name,
            asset,
            points = fetched.len(),
            volatility = signals.volatility,
            momentum = signals.momentum,
            moving_average = signals.moving_average,
            spread_risk = signals.spread_risk,
            "Computed signals."
        );

        let mut warnings = Vec::new();
        let (source, competitor_price) = match &product.competitor_name {
            Some(name) => match competitors.fetch_competitor_price(name) {
                Ok(price) => (name.as_str(), Some(price)),
                Err(e) => {
                    let reason = match e {
                        Error::UnknownCompetitor { reason, .. } => reason,
                        other => other.to_string(),
                    };
                    tracing::warn!(product = %product.name, competitor = %name, %reason, "Competitor price unavailable.");
                    warnings.push(PricingWarning::UnknownCompetitor {
                        name: name.clone(),
                        reason,
                    });
                    (name.as_str(), None)
                }
            },
            None => (STATIC_COMPETITOR_SOURCE, product.competitor_price_usd),
        };
        let competitor_price = match competitor_price {
            Some(price) if !(price.is_finite() && price > 0.0) => {
                tracing::warn!(product = %product.name, source, price, "Ignoring unusable competitor price.");
                warnings.push(PricingWarning::UnusableCompetitorPrice {
                    source: source.to_string(),
                    price,
                });
                None
            }
            other => other,
        };

        let raw_markup = self
            .strategy
            .propose(product, &signals, latest_price, competitor_price);
        let final_markup = self.guardrail.apply(raw_markup, product, &signals);
        let volatility_index = self.guardrail.volatility_index(product, &signals);
        let base_price = product.base_price_or(latest_price);

        tracing::debug!(
            product = %product.name,
            strategy = self.strategy.name(),
            guardrail = self.guardrail.name(),
            raw_markup,
            final_markup,
            "Markup proposed."
        );

        PricingOutcome::Priced(PricingResult {
            product_name: product.name.clone(),
            asset: asset.to_string(),
            market_condition: self.market_condition,
            latest_price,
            raw_markup,
            final_markup,
            volatility_index,
            base_price,
            quoted_price: quote(base_price, final_markup),
            signals,
            warnings,
        })
    }

    fn log_start(&self, products: usize) {
        tracing::info!(
            condition = %self.market_condition,
            strategy = self.strategy.name(),
            products,
            "Starting pricing run."
        );
    }
}

fn log_finish(outcomes: &[PricingOutcome]) {
    let priced = outcomes.iter().filter(|o| o.is_priced()).count();
    tracing::info!(priced, failed = outcomes.len() - priced, "Pricing run finished.");
}

fn failed(product: &ProductConfig, asset: &str, error: Error) -> PricingOutcome {
    let error = match error {
        e @ Error::DataUnavailable { .. } => e,
        other => Error::data_unavailable(asset, other.to_string()),
    };
    tracing::warn!(product = %product.name, %error, "Product could not be priced.");
    PricingOutcome::Failed {
        product_name: product.name.clone(),
        error,
    }
}

/// `base_price * (1 + markup)` in decimal, rounded to 2 places.
pub fn quote(base_price: f64, markup: f64) -> Decimal {
    let quoted = Decimal::from_f64_retain(base_price)
        .zip(Decimal::from_f64_retain(markup))
        .and_then(|(price, markup)| price.checked_mul(Decimal::ONE + markup));

    match quoted {
        Some(value) => value.round_dp(2),
        None => {
            tracing::warn!(base_price, markup, "Quoted price is outside the decimal range.");
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn quote_rounds_to_cents() {
        assert_eq!(quote(120.0, 0.1), dec!(132.00));
        assert_eq!(quote(30250.0, 0.0), dec!(30250.00));
        assert_eq!(quote(99.99, 0.05), dec!(104.99));
    }

    #[test]
    fn quote_out_of_range_is_zero() {
        assert_eq!(quote(f64::MAX, 0.1), Decimal::ZERO);
    }
}
