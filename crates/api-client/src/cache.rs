// In crates/api-client/src/cache.rs

use std::collections::HashMap;

use core_types::{CompetitorPriceProvider, Error, PriceSeries, Result, SeriesProvider};

/// Series fetched ahead of a run, served synchronously to the engine.
///
/// Failed fetches are remembered too, so the engine sees the original reason.
/// Keys are case-insensitive.
#[derive(Debug, Default, Clone)]
pub struct SeriesCache {
    entries: HashMap<String, Result<PriceSeries>>,
}

impl SeriesCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, asset: &str, series: Result<PriceSeries>) {
        self.entries.insert(asset.to_lowercase(), series);
    }

    pub fn contains(&self, asset: &str) -> bool {
        self.entries.contains_key(&asset.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SeriesProvider for SeriesCache {
    fn fetch_series(&self, asset: &str) -> Result<PriceSeries> {
        match self.entries.get(&asset.to_lowercase()) {
            Some(entry) => entry.clone(),
            None => Err(Error::data_unavailable(asset, "series was not prefetched")),
        }
    }
}

/// Competitor quotes fetched ahead of a run.
#[derive(Debug, Default, Clone)]
pub struct CompetitorQuotes {
    entries: HashMap<String, Result<f64>>,
}

impl CompetitorQuotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, price: Result<f64>) {
        self.entries.insert(name.trim().to_lowercase(), price);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CompetitorPriceProvider for CompetitorQuotes {
    fn fetch_competitor_price(&self, name: &str) -> Result<f64> {
        match self.entries.get(&name.trim().to_lowercase()) {
            Some(entry) => entry.clone(),
            None => Err(Error::unknown_competitor(name, "quote was not prefetched")),
        }
    }
}
