// In app/src/sources.rs

use anyhow::{Context, Result};
use itertools::Itertools;
use std::path::Path;

use api_client::{
    CoinMarketCapClient, CompetitorQuotes, CsvSeriesSource, SeriesCache, StubCompetitorPrices,
    resolve_api_key,
};
use app_config::{CompetitorProvider, DataProvider, EngineConfig};
use core_types::{CompetitorPriceProvider, PriceSeries, SeriesProvider};

/// Ticker looked up in market-pairs listings when none is configured.
const DEFAULT_COMPETITOR_SYMBOL: &str = "BTC";

/// Where the engine reads price series from during a run.
pub enum SeriesSource {
    Csv(CsvSeriesSource),
    Prefetched(SeriesCache),
}

impl SeriesProvider for SeriesSource {
    fn fetch_series(&self, asset: &str) -> core_types::Result<PriceSeries> {
        match self {
            SeriesSource::Csv(source) => source.fetch_series(asset),
            SeriesSource::Prefetched(cache) => cache.fetch_series(asset),
        }
    }
}

/// Where the engine resolves competitor names during a run.
pub enum CompetitorSource {
    Stub(StubCompetitorPrices),
    Prefetched(CompetitorQuotes),
}

impl CompetitorPriceProvider for CompetitorSource {
    fn fetch_competitor_price(&self, name: &str) -> core_types::Result<f64> {
        match self {
            CompetitorSource::Stub(stub) => stub.fetch_competitor_price(name),
            CompetitorSource::Prefetched(quotes) => quotes.fetch_competitor_price(name),
        }
    }
}

/// The distinct series keys the catalog will ask for.
fn catalog_assets(config: &EngineConfig) -> Vec<String> {
    config
        .catalog
        .iter()
        .map(|p| p.asset_or(&config.default_asset).to_lowercase())
        .unique()
        .collect()
}

/// Builds the series provider. A `--data` file always wins over the configured provider.
pub async fn build_series_source(
    config: &EngineConfig,
    data_override: Option<&Path>,
) -> Result<SeriesSource> {
    let ds = &config.data_source;
    let csv_path = data_override.or(ds.csv_path.as_deref());

    if data_override.is_some() || ds.provider == DataProvider::Csv {
        let path = csv_path
            .context("data_source.provider is \"csv\" but no csv_path or --data file was given")?;
        anyhow::ensure!(path.exists(), "CSV data file not found: {}", path.display());
        let source = CsvSeriesSource::new(
            path,
            config.default_asset.clone(),
            ds.vs_currency.clone(),
            ds.lookback_hours,
        );
        tracing::info!(path = %source.path().display(), asset = source.asset(), "Using CSV price history.");
        return Ok(SeriesSource::Csv(source));
    }

    let client = CoinMarketCapClient::from_settings(ds)?;
    let mut cache = SeriesCache::new();
    for asset in catalog_assets(config) {
        tracing::info!(asset = %asset, "Fetching price history from CoinMarketCap.");
        let series = client.fetch_series(&asset).await.map_err(|e| {
            tracing::warn!(asset = %asset, error = %e, "Price history unavailable.");
            core_types::Error::data_unavailable(asset.clone(), e.to_string())
        });
        cache.insert(&asset, series);
    }
    Ok(SeriesSource::Prefetched(cache))
}

/// Builds the competitor provider, prefetching live quotes when configured.
pub async fn build_competitor_source(config: &EngineConfig) -> Result<CompetitorSource> {
    let settings = &config.competitors;
    match settings.provider {
        CompetitorProvider::Stub => Ok(CompetitorSource::Stub(StubCompetitorPrices::new(
            settings.prices.iter().map(|(name, price)| (name.as_str(), *price)),
        ))),
        CompetitorProvider::CoinMarketCap => {
            let names: Vec<String> = config
                .catalog
                .iter()
                .filter_map(|p| p.competitor_name.as_deref())
                .map(|n| n.trim().to_lowercase())
                .unique()
                .collect();

            let mut quotes = CompetitorQuotes::new();
            if names.is_empty() {
                return Ok(CompetitorSource::Prefetched(quotes));
            }

            let api_key = resolve_api_key(
                settings
                    .api_key
                    .as_deref()
                    .or(config.data_source.api_key.as_deref()),
            )
            .context("CoinMarketCap competitor pricing requires an API key")?;
            let mut client = CoinMarketCapClient::new(
                api_key,
                config.data_source.vs_currency.clone(),
                config.data_source.lookback_hours,
            )?;
            if let Some(url) = &settings.api_url {
                client = client.with_market_pairs_url(url.clone());
            }
            let symbol = settings.symbol.as_deref().unwrap_or(DEFAULT_COMPETITOR_SYMBOL);

            for name in names {
                let price = client.fetch_competitor_price(symbol, &name).await.map_err(|e| {
                    core_types::Error::unknown_competitor(name.clone(), e.to_string())
                });
                quotes.insert(&name, price);
            }
            Ok(CompetitorSource::Prefetched(quotes))
        }
    }
}
