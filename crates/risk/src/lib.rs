// In crates/risk/src/lib.rs

use core_types::ProductConfig;
use signals::SignalSet;

pub mod band;
pub mod error;

// Re-export public types
pub use band::BandGuardrail;
pub use error::{Error, Result};

/// The universal interface for a markup guardrail.
///
/// A `Guardrail` bounds a strategy's raw proposal into the product's safe
/// band and normalizes risk signals for reporting. It never feeds anything
/// back into the strategy.
pub trait Guardrail {
    /// The name of the guardrail.
    fn name(&self) -> &'static str;

    /// Bounds a raw markup proposal.
    ///
    /// # Arguments
    ///
    /// * `raw_markup`: The unbounded proposal produced by a strategy.
    /// * `product`: The product whose band applies.
    /// * `signals`: The signals the proposal was derived from.
    ///
    /// # Returns
    ///
    /// The final markup, always inside `[product.min_markup, product.max_markup]`
    /// when the band is well formed.
    fn apply(&self, raw_markup: f64, product: &ProductConfig, signals: &SignalSet) -> f64;

    /// Volatility rescaled into `[0, 1]` between the product's floor and ceiling.
    fn volatility_index(&self, product: &ProductConfig, signals: &SignalSet) -> f64;
}
