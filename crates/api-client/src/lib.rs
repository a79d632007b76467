// In crates/api-client/src/lib.rs

pub mod cache;
pub mod coinmarketcap;
pub mod csv;
pub mod error;
pub mod stub;
pub mod types;

// Re-export public types
pub use cache::{CompetitorQuotes, SeriesCache};
pub use coinmarketcap::{CoinMarketCapClient, resolve_api_key};
pub use csv::{CsvSeriesSource, parse_series};
pub use error::{Error, Result};
pub use stub::{DEFAULT_COMPETITOR_PRICES, StubCompetitorPrices};
