// In crates/strategies/src/bear.rs

use crate::balanced::Balanced;
use crate::types::{BalancedSettings, BearSettings};
use crate::{MarketCondition, Strategy};
use core_types::ProductConfig;
use signals::SignalSet;

/// Protects margin when the market sells off.
///
/// Negative momentum adds a defensive markup of
/// `downside_weight * (elasticity + elasticity_offset) * |momentum|` on top of
/// the balanced markup. Without a sell-off the balanced formula is used with
/// the stronger bear `risk_aversion`.
#[derive(Debug, Clone, Copy)]
pub struct Bear {
    base: Balanced,
    settings: BearSettings,
}

impl Bear {
    pub fn new(base: BalancedSettings, settings: BearSettings) -> Self {
        Self {
            base: Balanced::new(base),
            settings,
        }
    }

    fn defensive_markup(&self, product: &ProductConfig, momentum: f64) -> f64 {
        self.settings.downside_weight
            * (product.elasticity + self.settings.elasticity_offset)
            * momentum.abs()
    }
}

impl Strategy for Bear {
    fn name(&self) -> &'static str {
        "BearMarket"
    }

    fn condition(&self) -> MarketCondition {
        MarketCondition::Bear
    }

    fn propose(
        &self,
        product: &ProductConfig,
        signals: &SignalSet,
        latest_price: f64,
        competitor_price: Option<f64>,
    ) -> f64 {
        if signals.momentum < 0.0 {
            self.base
                .propose(product, signals, latest_price, competitor_price)
                + self.defensive_markup(product, signals.momentum)
        } else {
            Balanced::markup(
                product.target_margin,
                product,
                signals,
                self.settings.risk_aversion,
            )
        }
    }
}
