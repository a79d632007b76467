// In crates/strategies/src/penetration.rs

use crate::balanced::Balanced;
use crate::types::{BalancedSettings, PenetrationSettings};
use crate::{MarketCondition, Strategy};
use core_types::ProductConfig;
use signals::SignalSet;

/// Undercuts deliberately to win market share.
///
/// The balanced formula runs from `target_margin - discount`, so momentum
/// (through elasticity) and volatility still move the markup.
#[derive(Debug, Clone, Copy)]
pub struct Penetration {
    base: Balanced,
    settings: PenetrationSettings,
}

impl Penetration {
    pub fn new(base: BalancedSettings, settings: PenetrationSettings) -> Self {
        Self {
            base: Balanced::new(base),
            settings,
        }
    }
}

impl Strategy for Penetration {
    fn name(&self) -> &'static str {
        "MarketPenetration"
    }

    fn condition(&self) -> MarketCondition {
        MarketCondition::Penetration
    }

    fn propose(
        &self,
        product: &ProductConfig,
        signals: &SignalSet,
        _latest_price: f64,
        _competitor_price: Option<f64>,
    ) -> f64 {
        Balanced::markup(
            product.target_margin - self.settings.discount,
            product,
            signals,
            self.base.risk_aversion(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{product, signals};

    #[test]
    fn discount_is_taken_off_the_balanced_markup() {
        let penetration = Penetration::new(BalancedSettings::default(), PenetrationSettings::default());
        let balanced = Balanced::new(BalancedSettings::default());
        let p = product();

        for s in [signals(0.0, 0.0), signals(0.2, 0.1), signals(-0.3, 0.5)] {
            let gap = balanced.propose(&p, &s, 100.0, None) - penetration.propose(&p, &s, 100.0, None);
            assert!((gap - 0.05).abs() < 1e-12);
        }
    }
}
