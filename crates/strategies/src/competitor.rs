// In crates/strategies/src/competitor.rs

use crate::balanced::Balanced;
use crate::types::{BalancedSettings, CompetitorSettings};
use crate::{MarketCondition, Strategy};
use core_types::ProductConfig;
use signals::SignalSet;

/// Matches a known competitor reference price.
///
/// Ignores momentum and volatility and solves
/// `latest_price * (1 + markup) = competitor_price`, minus the configured
/// undercut. Without a usable competitor price it falls back to balanced.
#[derive(Debug, Clone, Copy)]
pub struct Competitor {
    base: Balanced,
    settings: CompetitorSettings,
}

impl Competitor {
    pub fn new(base: BalancedSettings, settings: CompetitorSettings) -> Self {
        Self {
            base: Balanced::new(base),
            settings,
        }
    }

    /// The markup implied by the competitor's price, if both prices are usable.
    pub fn implied_markup(latest_price: f64, competitor_price: Option<f64>) -> Option<f64> {
        let competitor_price = competitor_price?;
        let usable = |p: f64| p.is_finite() && p > 0.0;
        if usable(latest_price) && usable(competitor_price) {
            Some(competitor_price / latest_price - 1.0)
        } else {
            None
        }
    }
}

impl Strategy for Competitor {
    fn name(&self) -> &'static str {
        "CompetitorPriceMatch"
    }

    fn condition(&self) -> MarketCondition {
        MarketCondition::Competitor
    }

    fn propose(
        &self,
        product: &ProductConfig,
        signals: &SignalSet,
        latest_price: f64,
        competitor_price: Option<f64>,
    ) -> f64 {
        match Self::implied_markup(latest_price, competitor_price) {
            Some(markup) => markup - self.settings.undercut,
            None => self
                .base
                .propose(product, signals, latest_price, competitor_price),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{product, signals};

    fn competitor() -> Competitor {
        Competitor::new(BalancedSettings::default(), CompetitorSettings::default())
    }

    #[test]
    fn tracks_the_competitor_price() {
        let raw = competitor().propose(&product(), &signals(0.3, 0.9), 100.0, Some(95.0));
        assert!((raw - (-0.05)).abs() < 1e-12);
    }

    #[test]
    fn undercut_is_subtracted() {
        let strategy = Competitor::new(
            BalancedSettings::default(),
            CompetitorSettings { undercut: 0.01 },
        );
        let raw = strategy.propose(&product(), &signals(0.0, 0.0), 100.0, Some(110.0));
        assert!((raw - 0.09).abs() < 1e-12);
    }

    #[test]
    fn missing_or_unusable_price_falls_back_to_balanced() {
        let p = product();
        let s = signals(0.1, 0.02);
        let balanced = Balanced::new(BalancedSettings::default()).propose(&p, &s, 100.0, None);

        assert_eq!(competitor().propose(&p, &s, 100.0, None), balanced);
        assert_eq!(competitor().propose(&p, &s, 100.0, Some(0.0)), balanced);
        assert_eq!(competitor().propose(&p, &s, 0.0, Some(95.0)), balanced);
    }
}
