// In crates/strategies/src/lateral.rs

use crate::balanced::Balanced;
use crate::types::{BalancedSettings, LateralSettings};
use crate::{MarketCondition, Strategy};
use core_types::ProductConfig;
use signals::SignalSet;

/// Keeps pricing tight during sideways consolidation.
///
/// When both |momentum| and volatility are under `low_activity_threshold`,
/// the balanced adjustment is scaled by the market's activity level:
///
/// ```text
/// activity = max(|momentum|, volatility) / low_activity_threshold
/// markup   = target_margin + (balanced - target_margin) * activity
/// ```
///
/// A dead-flat market prices exactly at `target_margin`, and the curve meets
/// the balanced markup at the threshold. Active markets are priced as balanced.
#[derive(Debug, Clone, Copy)]
pub struct Lateral {
    base: Balanced,
    settings: LateralSettings,
}

impl Lateral {
    pub fn new(base: BalancedSettings, settings: LateralSettings) -> Self {
        Self {
            base: Balanced::new(base),
            settings,
        }
    }

    /// The market's activity in `[0, 1)` when it is quiet, `None` otherwise.
    fn quiet_activity(&self, signals: &SignalSet) -> Option<f64> {
        let threshold = self.settings.low_activity_threshold;
        if threshold <= 0.0 {
            return None;
        }
        let momentum = signals.momentum.abs();
        if momentum < threshold && signals.volatility < threshold {
            Some(momentum.max(signals.volatility) / threshold)
        } else {
            None
        }
    }
}

impl Strategy for Lateral {
    fn name(&self) -> &'static str {
        "LateralMarket"
    }

    fn condition(&self) -> MarketCondition {
        MarketCondition::Lateral
    }

    fn propose(
        &self,
        product: &ProductConfig,
        signals: &SignalSet,
        latest_price: f64,
        competitor_price: Option<f64>,
    ) -> f64 {
        let balanced = self
            .base
            .propose(product, signals, latest_price, competitor_price);

        match self.quiet_activity(signals) {
            Some(activity) => {
                product.target_margin + (balanced - product.target_margin) * activity
            }
            None => balanced,
        }
    }
}
