// In crates/api-client/src/stub.rs

use std::collections::HashMap;

use core_types::{CompetitorPriceProvider, Error, Result};

/// Quotes used when no price map is configured.
pub const DEFAULT_COMPETITOR_PRICES: [(&str, f64); 3] = [
    ("binance", 30500.0),
    ("kraken", 30250.0),
    ("coinbase", 30320.0),
];

/// A fixed, case-insensitive map of competitor quotes.
#[derive(Debug, Clone)]
pub struct StubCompetitorPrices {
    prices: HashMap<String, f64>,
}

impl StubCompetitorPrices {
    /// Builds the map. An empty input falls back to [`DEFAULT_COMPETITOR_PRICES`].
    pub fn new<'a>(prices: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let mut map: HashMap<String, f64> = prices
            .into_iter()
            .map(|(name, price)| (name.trim().to_lowercase(), price))
            .collect();
        if map.is_empty() {
            map = DEFAULT_COMPETITOR_PRICES
                .iter()
                .map(|(name, price)| (name.to_string(), *price))
                .collect();
        }
        Self { prices: map }
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl Default for StubCompetitorPrices {
    fn default() -> Self {
        let none: [(&str, f64); 0] = [];
        Self::new(none)
    }
}

impl CompetitorPriceProvider for StubCompetitorPrices {
    fn fetch_competitor_price(&self, name: &str) -> Result<f64> {
        let key = name.trim().to_lowercase();
        if key.is_empty() {
            return Err(Error::unknown_competitor(name, "competitor name is required"));
        }
        self.prices
            .get(&key)
            .copied()
            .ok_or_else(|| Error::unknown_competitor(name, "not in the configured price map"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_map_uses_defaults() {
        let stub = StubCompetitorPrices::default();
        assert_eq!(stub.len(), 3);
        assert_eq!(stub.fetch_competitor_price("Binance"), Ok(30500.0));
        assert_eq!(stub.fetch_competitor_price(" kraken "), Ok(30250.0));
    }

    #[test]
    fn configured_map_replaces_defaults() {
        let stub = StubCompetitorPrices::new([("Bitstamp", 29999.0)]);
        assert_eq!(stub.fetch_competitor_price("bitstamp"), Ok(29999.0));
        assert_eq!(
            stub.fetch_competitor_price("binance").unwrap_err().kind(),
            "unknown_competitor"
        );
    }

    #[test]
    fn blank_name_is_unknown() {
        let err = StubCompetitorPrices::default().fetch_competitor_price("  ").unwrap_err();
        assert!(matches!(err, Error::UnknownCompetitor { .. }));
    }
}
