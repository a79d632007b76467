// In crates/strategies/src/balanced.rs

use crate::types::BalancedSettings;
use crate::{MarketCondition, Strategy};
use core_types::ProductConfig;
use signals::{SignalSet, normalize};

/// The volatility-aware baseline every other strategy builds on.
///
/// ```text
/// markup = target_margin + elasticity * momentum - volatility_penalty
/// ```
///
/// The penalty is zero up to the product's `volatility_floor` and grows
/// linearly to `risk_aversion` at the `volatility_ceiling`.
#[derive(Debug, Clone, Copy)]
pub struct Balanced {
    settings: BalancedSettings,
}

impl Balanced {
    pub fn new(settings: BalancedSettings) -> Self {
        Self { settings }
    }

    pub fn risk_aversion(&self) -> f64 {
        self.settings.risk_aversion
    }

    /// The balanced formula with an explicit baseline and risk aversion, so
    /// variants can reuse it with their own coefficients.
    pub(crate) fn markup(
        target_margin: f64,
        product: &ProductConfig,
        signals: &SignalSet,
        risk_aversion: f64,
    ) -> f64 {
        target_margin + product.elasticity * signals.momentum
            - volatility_penalty(product, signals, risk_aversion)
    }
}

/// Markup removed for volatility above the product's floor.
pub fn volatility_penalty(product: &ProductConfig, signals: &SignalSet, risk_aversion: f64) -> f64 {
    if signals.volatility <= product.volatility_floor {
        return 0.0;
    }
    risk_aversion * normalize(signals.volatility, product.volatility_floor, product.volatility_ceiling)
}

impl Strategy for Balanced {
    fn name(&self) -> &'static str {
        "VolatilityAwareBalanced"
    }

    fn condition(&self) -> MarketCondition {
        MarketCondition::Balanced
    }

    fn propose(
        &self,
        product: &ProductConfig,
        signals: &SignalSet,
        _latest_price: f64,
        _competitor_price: Option<f64>,
    ) -> f64 {
        Self::markup(product.target_margin, product, signals, self.settings.risk_aversion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{product, signals};

    #[test]
    fn calm_market_is_target_plus_momentum() {
        let balanced = Balanced::new(BalancedSettings::default());
        let raw = balanced.propose(&product(), &signals(0.20, 0.005), 120.0, None);
        assert!((raw - (0.05 + 0.5 * 0.20)).abs() < 1e-12);
    }

    #[test]
    fn volatility_above_floor_reduces_markup() {
        let balanced = Balanced::new(BalancedSettings::default());
        let p = product();

        let calm = balanced.propose(&p, &signals(0.0, 0.01), 100.0, None);
        let noisy = balanced.propose(&p, &signals(0.0, 0.155), 100.0, None);
        let wild = balanced.propose(&p, &signals(0.0, 5.0), 100.0, None);

        assert!((calm - 0.05).abs() < 1e-12);
        assert!((noisy - (0.05 - 0.5)).abs() < 1e-9);
        // The penalty saturates at the ceiling.
        assert!((wild - (0.05 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn reference_window_scenario() {
        // [100, 110, 105, 120] gives momentum 0.20 and volatility ~0.0806.
        let balanced = Balanced::new(BalancedSettings::default());
        let p = product();
        let s = signals(0.20, 0.080592);

        let penalty = volatility_penalty(&p, &s, 1.0);
        let raw = balanced.propose(&p, &s, 120.0, None);

        assert!(penalty > 0.0);
        assert!((raw - (0.05 + 0.5 * 0.20 - penalty)).abs() < 1e-12);
    }
}
