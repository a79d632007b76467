// In crates/api-client/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build the API client: {0}")]
    ClientBuildError(String),
    #[error("CoinMarketCap API key missing. Set the api_key setting or COINMARKETCAP_API_KEY.")]
    MissingApiKey,
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(#[from] serde_json::Error),
    #[error("API error: code {code}, msg: {msg}")]
    ApiError { code: i64, msg: String },
    #[error("Unable to resolve CoinMarketCap asset id for '{0}'")]
    AssetNotFound(String),
    #[error("Unsupported vs_currency for CoinMarketCap: {0}")]
    UnsupportedCurrency(String),
    #[error("No price points returned for '{0}' in the requested window")]
    NoPricePoints(String),
    #[error("No market pair found for competitor '{competitor}' and {symbol}/{vs_currency}")]
    MarketPairNotFound {
        competitor: String,
        symbol: String,
        vs_currency: String,
    },
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV line {line}: {reason}")]
    Csv { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
