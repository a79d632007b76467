// In crates/api-client/src/types.rs

use serde::Deserialize;
use serde_json::Value;

/// The envelope every CoinMarketCap endpoint wraps its payload in.
#[derive(Debug, Deserialize)]
pub struct CmcResponse<T> {
    pub status: Option<CmcStatus>,
    pub data: Option<T>,
}

/// Request status. A non-zero `error_code` means the call failed.
#[derive(Debug, Deserialize, Clone)]
pub struct CmcStatus {
    #[serde(default)]
    pub error_code: Value,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl CmcStatus {
    /// The error code as a number. The public data API sends it as a string.
    pub fn code(&self) -> i64 {
        match &self.error_code {
            Value::Number(n) => n.as_i64().unwrap_or(-1),
            Value::String(s) => s.parse().unwrap_or(-1),
            _ => 0,
        }
    }
}

/// One entry of `/v1/cryptocurrency/map`.
#[derive(Debug, Deserialize, Clone)]
pub struct CryptoMapEntry {
    pub id: u64,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub is_active: Value,
}

impl CryptoMapEntry {
    /// CoinMarketCap reports `is_active` as 0/1.
    pub fn is_active(&self) -> bool {
        match &self.is_active {
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_i64().is_some_and(|v| v != 0),
            _ => false,
        }
    }
}

/// One entry of `/v1/fiat/map`.
#[derive(Debug, Deserialize, Clone)]
pub struct FiatMapEntry {
    pub id: u64,
    pub symbol: String,
}

/// The historical endpoint's `data` object.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct HistoricalData {
    #[serde(default)]
    pub quotes: Vec<HistoricalQuote>,
}

/// One hourly candle.
#[derive(Debug, Deserialize, Clone)]
pub struct HistoricalQuote {
    #[serde(default)]
    pub quote: Option<CandleQuote>,
    #[serde(rename = "timeClose", default)]
    pub time_close: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CandleQuote {
    #[serde(default)]
    pub close: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_without_data_deserializes() {
        let payload = json!({ "status": { "error_code": 0, "error_message": null } });
        let envelope: CmcResponse<Vec<FiatMapEntry>> = serde_json::from_value(payload).unwrap();

        assert!(envelope.data.is_none());
        assert_eq!(envelope.status.map(|s| s.code()), Some(0));
    }

    #[test]
    fn envelope_with_fiat_map_deserializes() {
        let payload = json!({
            "status": { "error_code": "0" },
            "data": [{ "id": 2781, "symbol": "USD", "name": "United States Dollar" }]
        });
        let envelope: CmcResponse<Vec<FiatMapEntry>> = serde_json::from_value(payload).unwrap();

        let data = envelope.data.unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!((data[0].id, data[0].symbol.as_str()), (2781, "USD"));
    }
}
