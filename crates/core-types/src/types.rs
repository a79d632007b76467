// In crates/core-types/src/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single time-stamped price for an asset/currency pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl PriceObservation {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// An ordered window of observations for one asset/currency pair.
///
/// Observations are always sorted ascending by timestamp with no duplicate
/// timestamps and only finite prices. The only way to build one is through
/// [`PriceSeries::new`], which enforces this.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    asset: String,
    vs_currency: String,
    observations: Vec<PriceObservation>,
}

impl PriceSeries {
    /// Builds a series from raw observations in any order.
    ///
    /// Non-finite prices are dropped. When two observations share a timestamp
    /// the one that came later in the input wins.
    pub fn new(
        asset: impl Into<String>,
        vs_currency: impl Into<String>,
        observations: impl IntoIterator<Item = PriceObservation>,
    ) -> Self {
        let mut observations: Vec<PriceObservation> = observations
            .into_iter()
            .filter(|o| o.price.is_finite())
            .collect();

        // Stable sort keeps input order among equal timestamps.
        observations.sort_by_key(|o| o.timestamp);

        let mut deduped: Vec<PriceObservation> = Vec::with_capacity(observations.len());
        for obs in observations {
            match deduped.last_mut() {
                Some(last) if last.timestamp == obs.timestamp => *last = obs,
                _ => deduped.push(obs),
            }
        }

        Self {
            asset: asset.into(),
            vs_currency: vs_currency.into(),
            observations: deduped,
        }
    }

    pub fn asset(&self) -> &str {
        &self.asset
    }

    pub fn vs_currency(&self) -> &str {
        &self.vs_currency
    }

    pub fn observations(&self) -> &[PriceObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// The newest observation, if any.
    pub fn latest(&self) -> Option<&PriceObservation> {
        self.observations.last()
    }

    /// All prices in chronological order.
    pub fn prices(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.price).collect()
    }

    /// The last `n` observations, or the whole series when it is shorter.
    pub fn tail(&self, n: usize) -> &[PriceObservation] {
        let start = self.observations.len().saturating_sub(n);
        &self.observations[start..]
    }
}
