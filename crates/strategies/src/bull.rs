// In crates/strategies/src/bull.rs

use crate::balanced::Balanced;
use crate::types::{BalancedSettings, BullSettings};
use crate::{MarketCondition, Strategy};
use core_types::ProductConfig;
use signals::SignalSet;

/// Amplifies upside capture when prices trend upward.
///
/// With positive momentum it adds `upside_weight * elasticity * momentum` on
/// top of the balanced markup. Otherwise it is the balanced strategy.
#[derive(Debug, Clone, Copy)]
pub struct Bull {
    base: Balanced,
    settings: BullSettings,
}

impl Bull {
    pub fn new(base: BalancedSettings, settings: BullSettings) -> Self {
        Self {
            base: Balanced::new(base),
            settings,
        }
    }
}

impl Strategy for Bull {
    fn name(&self) -> &'static str {
        "BullMarket"
    }

    fn condition(&self) -> MarketCondition {
        MarketCondition::Bull
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

        if signals.momentum > 0.0 {
            balanced + self.settings.upside_weight * product.elasticity * signals.momentum
        } else {
            balanced
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{product, signals};

    #[test]
    fn rising_market_earns_a_bonus() {
        let bull = Bull::new(BalancedSettings::default(), BullSettings::default());
        let balanced = Balanced::new(BalancedSettings::default());
        let (p, s) = (product(), signals(0.10, 0.0));

        let bonus = bull.propose(&p, &s, 100.0, None) - balanced.propose(&p, &s, 100.0, None);
        assert!((bonus - 0.4 * 0.5 * 0.10).abs() < 1e-12);
    }

    #[test]
    fn falling_market_is_plain_balanced() {
        let bull = Bull::new(BalancedSettings::default(), BullSettings::default());
        let balanced = Balanced::new(BalancedSettings::default());
        let (p, s) = (product(), signals(-0.10, 0.2));

        assert_eq!(bull.propose(&p, &s, 100.0, None), balanced.propose(&p, &s, 100.0, None));
    }
}
