// In crates/engine/src/record.rs

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::PricingOutcome;

/// A flat, serializable view of one outcome, as used by JSON output and dashboards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingRecord {
    pub product_name: String,
    /// `"priced"` or the failing error's kind.
    pub status: &'static str,
    pub market_condition: Option<String>,
    pub latest_price: Option<f64>,
    pub raw_markup: Option<f64>,
    pub final_markup: Option<f64>,
    pub base_price: Option<f64>,
    pub quoted_price: Option<Decimal>,
    pub volatility: Option<f64>,
    pub momentum: Option<f64>,
    pub moving_average: Option<f64>,
    pub spread_risk: Option<f64>,
    pub volatility_index: Option<f64>,
    pub warnings: Vec<String>,
    pub error: Option<String>,
}

impl From<&PricingOutcome> for PricingRecord {
    fn from(outcome: &PricingOutcome) -> Self {
        match outcome {
            PricingOutcome::Priced(r) => Self {
                product_name: r.product_name.clone(),
                status: "priced",
                market_condition: Some(r.market_condition.to_string()),
                latest_price: Some(r.latest_price),
                raw_markup: Some(r.raw_markup),
                final_markup: Some(r.final_markup),
                base_price: Some(r.base_price),
                quoted_price: Some(r.quoted_price),
                volatility: Some(r.signals.volatility),
                momentum: Some(r.signals.momentum),
                moving_average: Some(r.signals.moving_average),
                spread_risk: Some(r.signals.spread_risk),
                volatility_index: Some(r.volatility_index),
                warnings: r.warnings.iter().map(ToString::to_string).collect(),
                error: None,
            },
            PricingOutcome::Failed { product_name, error } => Self {
                product_name: product_name.clone(),
                status: error.kind(),
                market_condition: None,
                latest_price: None,
                raw_markup: None,
                final_markup: None,
                base_price: None,
                quoted_price: None,
                volatility: None,
                momentum: None,
                moving_average: None,
                spread_risk: None,
                volatility_index: None,
                warnings: Vec::new(),
                error: Some(error.to_string()),
            },
        }
    }
}

/// Flattens a run's outcomes, keeping catalog order.
pub fn to_records(outcomes: &[PricingOutcome]) -> Vec<PricingRecord> {
    outcomes.iter().map(PricingRecord::from).collect()
}
