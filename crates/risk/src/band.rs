// In crates/risk/src/band.rs

use crate::{Error, Guardrail, Result};
use core_types::ProductConfig;
use signals::{SignalSet, normalize};

/// Clamps markups into each product's `[min_markup, max_markup]` band.
///
/// The clamp is total: a NaN proposal lands on a bound, and an inverted band
/// (which validation rejects) resolves to `min_markup` instead of panicking.
#[derive(Debug, Default, Clone, Copy)]
pub struct BandGuardrail;

impl BandGuardrail {
    pub fn new() -> Self {
        Self
    }

    /// Checks the guardrail fields of a product before any pricing runs.
    pub fn validate(product: &ProductConfig) -> Result<()> {
        let bounds = [
            ("min_markup", product.min_markup),
            ("max_markup", product.max_markup),
            ("volatility_floor", product.volatility_floor),
            ("volatility_ceiling", product.volatility_ceiling),
        ];
        if let Some((field, value)) = bounds.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::InvalidParameters {
                product: product.name.clone(),
                reason: format!("{field} must be finite, got {value}"),
            });
        }

        if product.min_markup > product.max_markup {
            return Err(Error::InvalidBand {
                product: product.name.clone(),
                min: product.min_markup,
                max: product.max_markup,
            });
        }

        if product.volatility_floor < 0.0 || product.volatility_ceiling < 0.0 {
            return Err(Error::InvalidParameters {
                product: product.name.clone(),
                reason: "volatility bounds must not be negative".to_string(),
            });
        }

        Ok(())
    }
}

impl Guardrail for BandGuardrail {
    fn name(&self) -> &'static str {
        "MarkupBand"
    }

    fn apply(&self, raw_markup: f64, product: &ProductConfig, _signals: &SignalSet) -> f64 {
        let final_markup = product.min_markup.max(product.max_markup.min(raw_markup));
        if final_markup != raw_markup {
            tracing::debug!(
                product = %product.name,
                raw_markup,
                final_markup,
                "Markup clamped by guardrail."
            );
        }
        final_markup
    }

    fn volatility_index(&self, product: &ProductConfig, signals: &SignalSet) -> f64 {
        normalize(
            signals.volatility,
            product.volatility_floor,
            product.volatility_ceiling,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(min_markup: f64, max_markup: f64) -> ProductConfig {
        ProductConfig {
            name: "Widget".to_string(),
            asset: None,
            target_margin: 0.05,
            elasticity: 0.5,
            competitor_name: None,
            competitor_price_usd: None,
            base_price_usd: None,
            min_markup,
            max_markup,
            volatility_floor: 0.01,
            volatility_ceiling: 0.3,
        }
    }

    fn with_volatility(volatility: f64) -> SignalSet {
        SignalSet {
            volatility,
            ..SignalSet::neutral()
        }
    }

    #[test]
    fn clamps_into_band() {
        let guardrail = BandGuardrail::new();
        let p = product(0.0, 0.2);
        let s = SignalSet::neutral();

        assert_eq!(guardrail.apply(0.1, &p, &s), 0.1);
        assert_eq!(guardrail.apply(0.5, &p, &s), 0.2);
        assert_eq!(guardrail.apply(-0.05, &p, &s), 0.0);
    }

    #[test]
    fn competitor_undercut_is_clamped_to_min() {
        let guardrail = BandGuardrail::new();
        let p = product(0.0, 0.2);
        assert_eq!(guardrail.apply(95.0 / 100.0 - 1.0, &p, &SignalSet::neutral()), 0.0);

        // A band that allows discounts keeps the undercut.
        let discounting = product(-0.1, 0.2);
        let kept = guardrail.apply(95.0 / 100.0 - 1.0, &discounting, &SignalSet::neutral());
        assert!((kept + 0.05).abs() < 1e-12);
    }

    #[test]
    fn clamp_is_total_for_bad_inputs() {
        let guardrail = BandGuardrail::new();
        let s = SignalSet::neutral();

        let nan = guardrail.apply(f64::NAN, &product(0.0, 0.2), &s);
        assert!((0.0..=0.2).contains(&nan));
        assert_eq!(guardrail.apply(f64::INFINITY, &product(0.0, 0.2), &s), 0.2);
        assert_eq!(guardrail.apply(f64::NEG_INFINITY, &product(0.0, 0.2), &s), 0.0);

        // Inverted band resolves to min_markup.
        assert_eq!(guardrail.apply(0.1, &product(0.3, 0.2), &s), 0.3);
    }

    #[test]
    fn volatility_index_is_normalized() {
        let guardrail = BandGuardrail::new();
        let p = product(0.0, 0.2);

        assert_eq!(guardrail.volatility_index(&p, &with_volatility(0.0)), 0.0);
        assert_eq!(guardrail.volatility_index(&p, &with_volatility(0.9)), 1.0);
        let mid = guardrail.volatility_index(&p, &with_volatility(0.155));
        assert!((mid - 0.5).abs() < 1e-9);
    }

    #[test]
    fn validate_rejects_inverted_band() {
        let err = BandGuardrail::validate(&product(0.3, 0.2)).unwrap_err();
        assert!(matches!(err, Error::InvalidBand { .. }));
        assert!(BandGuardrail::validate(&product(0.2, 0.2)).is_ok());
    }

    #[test]
    fn validate_rejects_non_finite_and_negative_bounds() {
        let mut p = product(0.0, f64::INFINITY);
        assert!(matches!(
            BandGuardrail::validate(&p),
            Err(Error::InvalidParameters { .. })
        ));

        p = product(0.0, 0.2);
        p.volatility_floor = -0.1;
        assert!(matches!(
            BandGuardrail::validate(&p),
            Err(Error::InvalidParameters { .. })
        ));
    }
}
