// In crates/engine/src/types.rs

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use core_types::Error;
use signals::SignalSet;
use strategies::MarketCondition;

/// A non-fatal problem noticed while pricing a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricingWarning {
    /// The declared competitor could not be resolved, so no competitor price was used.
    UnknownCompetitor { name: String, reason: String },
    /// A competitor price was found but is not a positive finite number, so it was ignored.
    UnusableCompetitorPrice { source: String, price: f64 },
}

impl fmt::Display for PricingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingWarning::UnknownCompetitor { name, reason } => {
                write!(f, "unknown competitor '{name}': {reason}")
            }
            PricingWarning::UnusableCompetitorPrice { source, price } => {
                write!(f, "unusable competitor price {price} from '{source}'")
            }
        }
    }
}

/// The recommendation for one product in one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingResult {
    pub product_name: String,
    pub asset: String,
    pub market_condition: MarketCondition,
    /// The newest observed market price.
    pub latest_price: f64,
    /// The strategy's unbounded proposal.
    pub raw_markup: f64,
    /// The proposal after guardrails, inside the product's band.
    pub final_markup: f64,
    /// Volatility rescaled into `[0, 1]` between the product's floor and ceiling.
    pub volatility_index: f64,
    /// The product's `base_price_usd`, or `latest_price` when none is configured.
    pub base_price: f64,
    /// `base_price * (1 + final_markup)`, rounded to cents.
    pub quoted_price: Decimal,
    pub signals: SignalSet,
    pub warnings: Vec<PricingWarning>,
}

/// What happened to one product.
#[derive(Debug, Clone, PartialEq)]
pub enum PricingOutcome {
    Priced(PricingResult),
    Failed { product_name: String, error: Error },
}

impl PricingOutcome {
    pub fn product_name(&self) -> &str {
        match self {
            PricingOutcome::Priced(result) => &result.product_name,
            PricingOutcome::Failed { product_name, .. } => product_name,
        }
    }

    pub fn is_priced(&self) -> bool {
        matches!(self, PricingOutcome::Priced(_))
    }

    pub fn result(&self) -> Option<&PricingResult> {
        match self {
            PricingOutcome::Priced(result) => Some(result),
            PricingOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            PricingOutcome::Priced(_) => None,
            PricingOutcome::Failed { error, .. } => Some(error),
        }
    }
}
