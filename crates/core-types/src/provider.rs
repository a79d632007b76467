// In crates/core-types/src/provider.rs

use crate::{Error, PriceSeries, Result};

/// The capability to supply a price series for an asset.
///
/// Implementations are configured with the quote currency and lookback
/// window. They must be pure reads from the engine's point of view; any
/// network or file access happens before the engine runs.
pub trait SeriesProvider {
    /// Returns the series for `asset`, or `Error::DataUnavailable`.
    fn fetch_series(&self, asset: &str) -> Result<PriceSeries>;
}

impl<F> SeriesProvider for F
where
    F: Fn(&str) -> Result<PriceSeries>,
{
    fn fetch_series(&self, asset: &str) -> Result<PriceSeries> {
        self(asset)
    }
}

/// The capability to resolve a competitor's reference price by name.
pub trait CompetitorPriceProvider {
    /// Returns the competitor's price, or `Error::UnknownCompetitor`.
    fn fetch_competitor_price(&self, name: &str) -> Result<f64>;
}

impl<F> CompetitorPriceProvider for F
where
    F: Fn(&str) -> Result<f64>,
{
    fn fetch_competitor_price(&self, name: &str) -> Result<f64> {
        self(name)
    }
}

/// A provider that knows no competitors.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCompetitors;

impl CompetitorPriceProvider for NoCompetitors {
    fn fetch_competitor_price(&self, name: &str) -> Result<f64> {
        Err(Error::unknown_competitor(name, "no competitor source configured"))
    }
}
