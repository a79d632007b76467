// In crates/api-client/src/coinmarketcap.rs

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use app_config::DataSourceSettings;
use core_types::{PriceObservation, PriceSeries};

use crate::types::{CmcResponse, CryptoMapEntry, FiatMapEntry, HistoricalData};
use crate::{Error, Result};

pub const HISTORICAL_URL: &str = "https://api.coinmarketcap.com/data-api/v3/cryptocurrency/historical";
pub const CRYPTO_MAP_URL: &str = "https://pro-api.coinmarketcap.com/v1/cryptocurrency/map";
pub const FIAT_MAP_URL: &str = "https://pro-api.coinmarketcap.com/v1/fiat/map";
pub const MARKET_PAIRS_URL: &str =
    "https://pro-api.coinmarketcap.com/v1/cryptocurrency/market-pairs/latest";

/// Environment variable consulted when no key is configured.
pub const API_KEY_ENV: &str = "COINMARKETCAP_API_KEY";
const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// The client for CoinMarketCap's historical candles and market-pairs listings.
#[derive(Debug, Clone)]
pub struct CoinMarketCapClient {
    http_client: Client,
    api_key: String,
    historical_url: String,
    market_pairs_url: String,
    vs_currency: String,
    lookback_hours: u32,
}

impl CoinMarketCapClient {
    /// Constructs a new client. An empty key is rejected.
    pub fn new(
        api_key: impl Into<String>,
        vs_currency: impl Into<String>,
        lookback_hours: u32,
    ) -> Result<Self> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(Error::MissingApiKey);
        }

        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            historical_url: HISTORICAL_URL.to_string(),
            market_pairs_url: MARKET_PAIRS_URL.to_string(),
            vs_currency: vs_currency.into(),
            lookback_hours,
        })
    }

    /// Constructs a client from the `[data_source]` settings.
    pub fn from_settings(settings: &DataSourceSettings) -> Result<Self> {
        let api_key = resolve_api_key(settings.api_key.as_deref())?;
        let client = Self::new(api_key, settings.vs_currency.clone(), settings.lookback_hours)?;
        Ok(match &settings.api_url {
            Some(url) => client.with_historical_url(url.clone()),
            None => client,
        })
    }

    pub fn with_historical_url(mut self, url: impl Into<String>) -> Self {
        self.historical_url = url.into();
        self
    }

    pub fn with_market_pairs_url(mut self, url: impl Into<String>) -> Self {
        self.market_pairs_url = url.into();
        self
    }

    pub fn vs_currency(&self) -> &str {
        &self.vs_currency
    }

    /// Sends a GET request and unwraps the CoinMarketCap envelope.
    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        authenticated: bool,
    ) -> Result<Option<T>> {
        let mut request = self.http_client.get(url).query(query);
        if authenticated {
            request = request.header(API_KEY_HEADER, &self.api_key);
        }

        let response = request.send().await.map_err(Error::RequestFailed)?;
        let http_status = response.status();
        let text = response.text().await.map_err(Error::RequestFailed)?;

        let value: Value = serde_json::from_str(&text).map_err(|e| {
            if http_status.is_success() {
                Error::DeserializationFailed(e)
            } else {
                Error::ApiError {
                    code: i64::from(http_status.as_u16()),
                    msg: text.chars().take(200).collect(),
                }
            }
        })?;
        check_status(&value)?;

        let envelope: CmcResponse<T> =
            serde_json::from_value(value).map_err(Error::DeserializationFailed)?;
        Ok(envelope.data)
    }

    /// Resolves an asset identifier into a CoinMarketCap id.
    ///
    /// Numeric identifiers are used as-is. Otherwise the first active entry
    /// for the upper-cased symbol wins, then the first active entry whose
    /// slug matches the lower-cased identifier.
    ///
    /// This corresponds to the `GET /v1/cryptocurrency/map` endpoint.
    pub async fn resolve_asset_id(&self, asset: &str) -> Result<u64> {
        let asset = asset.trim();
        if let Ok(id) = asset.parse::<u64>() {
            return Ok(id);
        }

        let by_symbol: Vec<CryptoMapEntry> = self
            .get(CRYPTO_MAP_URL, &[("symbol", asset.to_uppercase())], true)
            .await?
            .unwrap_or_default();
        if let Some(id) = first_active(&by_symbol) {
            return Ok(id);
        }

        let listing: Vec<CryptoMapEntry> =
            self.get(CRYPTO_MAP_URL, &[], true).await?.unwrap_or_default();
        match_slug(&listing, asset).ok_or_else(|| Error::AssetNotFound(asset.to_string()))
    }

    /// Resolves the configured quote currency into a CoinMarketCap fiat id.
    ///
    /// This corresponds to the `GET /v1/fiat/map` endpoint.
    pub async fn resolve_convert_id(&self) -> Result<u64> {
        let fiats: Vec<FiatMapEntry> = self.get(FIAT_MAP_URL, &[], true).await?.unwrap_or_default();
        fiat_id(&fiats, &self.vs_currency)
            .ok_or_else(|| Error::UnsupportedCurrency(self.vs_currency.clone()))
    }

    /// Fetches hourly closes over the last `lookback_hours`.
    pub async fn fetch_series(&self, asset: &str) -> Result<PriceSeries> {
        let asset_id = self.resolve_asset_id(asset).await?;
        let convert_id = self.resolve_convert_id().await?;

        let end = Utc::now();
        let start = end - Duration::hours(i64::from(self.lookback_hours.max(1)));
        let query = [
            ("id", asset_id.to_string()),
            ("convertId", convert_id.to_string()),
            ("timeStart", start.timestamp().to_string()),
            ("timeEnd", end.timestamp().to_string()),
            ("interval", "1h".to_string()),
        ];

        tracing::debug!(asset, asset_id, convert_id, "Fetching historical candles.");
        let data: HistoricalData = self
            .get(&self.historical_url, &query, false)
            .await?
            .unwrap_or_default();

        parse_quotes(asset, &self.vs_currency, data)
    }

    /// Fetches the latest price `competitor` lists for `symbol`.
    ///
    /// This corresponds to the `GET /v1/cryptocurrency/market-pairs/latest` endpoint.
    pub async fn fetch_competitor_price(&self, symbol: &str, competitor: &str) -> Result<f64> {
        let symbol = symbol.trim().to_uppercase();
        let vs_currency = self.vs_currency.to_uppercase();
        let query = [
            ("symbol", symbol.clone()),
            ("convert", vs_currency.clone()),
            ("limit", "500".to_string()),
        ];

        let data: Value = self
            .get(&self.market_pairs_url, &query, true)
            .await?
            .unwrap_or(Value::Null);

        find_market_pair_price(&data, &symbol, &vs_currency, competitor).ok_or_else(|| {
            Error::MarketPairNotFound {
                competitor: competitor.to_string(),
                symbol,
                vs_currency,
            }
        })
    }
}

/// Returns the explicit key if non-empty, otherwise `COINMARKETCAP_API_KEY`.
pub fn resolve_api_key(explicit: Option<&str>) -> Result<String> {
    explicit
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .or_else(|| {
            std::env::var(API_KEY_ENV)
                .ok()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
        })
        .ok_or(Error::MissingApiKey)
}

fn check_status(value: &Value) -> Result<()> {
    let Some(status) = value.get("status") else {
        return Ok(());
    };
    let status: crate::types::CmcStatus =
        serde_json::from_value(status.clone()).map_err(Error::DeserializationFailed)?;
    match status.code() {
        0 => Ok(()),
        code => Err(Error::ApiError {
            code,
            msg: status.error_message.unwrap_or_else(|| "Unknown error".to_string()),
        }),
    }
}

fn first_active(entries: &[CryptoMapEntry]) -> Option<u64> {
    entries.iter().find(|e| e.is_active()).map(|e| e.id)
}

fn match_slug(entries: &[CryptoMapEntry], asset: &str) -> Option<u64> {
    let slug = asset.to_lowercase();
    entries
        .iter()
        .find(|e| e.slug == slug && e.is_active())
        .map(|e| e.id)
}

fn fiat_id(entries: &[FiatMapEntry], vs_currency: &str) -> Option<u64> {
    entries
        .iter()
        .find(|e| e.symbol.eq_ignore_ascii_case(vs_currency))
        .map(|e| e.id)
}

/// Converts candles into a series. Candles without a close or a parseable
/// timestamp are skipped.
pub fn parse_quotes(asset: &str, vs_currency: &str, data: HistoricalData) -> Result<PriceSeries> {
    let observations: Vec<PriceObservation> = data
        .quotes
        .into_iter()
        .filter_map(|entry| {
            let quote = entry.quote?;
            let price = quote.close?;
            let raw_ts = quote.timestamp.or(entry.time_close)?;
            let timestamp = DateTime::parse_from_rfc3339(&raw_ts).ok()?.with_timezone(&Utc);
            Some(PriceObservation::new(timestamp, price))
        })
        .collect();

    if observations.is_empty() {
        return Err(Error::NoPricePoints(asset.to_string()));
    }
    Ok(PriceSeries::new(asset, vs_currency, observations))
}

/// Finds `competitor`'s price for `symbol` in a market-pairs payload.
///
/// The exchange is matched on `exchange_name`, `exchangeName`,
/// `exchange_slug` or `exchangeSlug`, case-insensitively. The price comes
/// from `quote[VS].price`, then `quote[VS].exchange_reported.price`, then
/// the pair's own `price`.
pub fn find_market_pair_price(
    data: &Value,
    symbol: &str,
    vs_currency: &str,
    competitor: &str,
) -> Option<f64> {
    let competitor = competitor.trim().to_lowercase();
    let entries: Vec<&Value> = match data {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![data],
        _ => Vec::new(),
    };

    entries
        .into_iter()
        .filter(|entry| {
            entry
                .get("symbol")
                .and_then(Value::as_str)
                .is_some_and(|s| s.eq_ignore_ascii_case(symbol))
        })
        .filter_map(|entry| entry.get("market_pairs").and_then(Value::as_array))
        .flatten()
        .filter(|pair| {
            ["exchange_name", "exchangeName", "exchange_slug", "exchangeSlug"]
                .iter()
                .find_map(|key| pair.get(*key).and_then(Value::as_str).filter(|s| !s.is_empty()))
                .is_some_and(|name| name.trim().to_lowercase() == competitor)
        })
        .find_map(|pair| pair_price(pair, vs_currency))
}

fn pair_price(pair: &Value, vs_currency: &str) -> Option<f64> {
    let quote = pair.get("quote").and_then(|q| {
        q.get(vs_currency.to_uppercase())
            .or_else(|| q.get(vs_currency.to_lowercase()))
    });

    quote
        .and_then(|q| q.get("price").and_then(as_number))
        .or_else(|| {
            quote
                .and_then(|q| q.get("exchange_reported"))
                .and_then(|r| r.get("price"))
                .and_then(as_number)
        })
        .or_else(|| pair.get("price").and_then(as_number))
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
