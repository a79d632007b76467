// In crates/strategies/src/lib.rs

use core_types::ProductConfig;
use signals::SignalSet;

pub mod balanced;
pub mod bear;
pub mod bull;
pub mod competitor;
pub mod error;
pub mod factory;
pub mod lateral;
pub mod penetration;
pub mod types;

pub use error::{Error, Result};
pub use factory::{create_strategy, create_strategy_by_name};
pub use types::{MarketCondition, StrategySettings};

/// The universal interface for a pricing strategy.
///
/// A strategy turns market signals and a product's business rules into a raw
/// markup proposal. Every strategy starts from the product's `target_margin`
/// and adjusts it according to its market-condition policy. The result is
/// deliberately unbounded; guardrails clamp it afterwards.
///
/// Strategies are stateless: the same inputs always produce the same proposal.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    /// The market condition this strategy implements.
    fn condition(&self) -> MarketCondition;

    /// Proposes a raw markup for `product`.
    ///
    /// # Arguments
    ///
    /// * `product`: The product's business rules.
    /// * `signals`: Signals derived from the product's price series.
    /// * `latest_price`: The newest observed market price.
    /// * `competitor_price`: A resolved competitor reference price, if any.
    fn propose(
        &self,
        product: &ProductConfig,
        signals: &SignalSet,
        latest_price: f64,
        competitor_price: Option<f64>,
    ) -> f64;
}
