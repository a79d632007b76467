//! Flat-file price history.
//!
//! Reads `timestamp,price` files (extra columns are ignored) with a required
//! header row. Timestamps may be RFC 3339 or `YYYY-MM-DD HH:MM:SS` in UTC.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use core_types::{PriceObservation, PriceSeries, SeriesProvider};

use crate::{Error, Result};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Serves one asset's history from a CSV file.
#[derive(Debug, Clone)]
pub struct CsvSeriesSource {
    path: PathBuf,
    asset: String,
    vs_currency: String,
    lookback_hours: u32,
}

impl CsvSeriesSource {
    pub fn new(
        path: impl Into<PathBuf>,
        asset: impl Into<String>,
        vs_currency: impl Into<String>,
        lookback_hours: u32,
    ) -> Self {
        Self {
            path: path.into(),
            asset: asset.into(),
            vs_currency: vs_currency.into(),
            lookback_hours,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn asset(&self) -> &str {
        &self.asset
    }

    /// Reads and parses the whole file.
    pub fn load(&self) -> Result<PriceSeries> {
        let file = File::open(&self.path)?;
        parse_series(
            BufReader::new(file),
            &self.asset,
            &self.vs_currency,
            self.lookback_hours,
        )
    }
}

impl SeriesProvider for CsvSeriesSource {
    fn fetch_series(&self, asset: &str) -> core_types::Result<PriceSeries> {
        if !asset.eq_ignore_ascii_case(&self.asset) {
            return Err(core_types::Error::data_unavailable(
                asset,
                format!("{} only holds data for '{}'", self.path.display(), self.asset),
            ));
        }
        self.load()
            .map_err(|e| core_types::Error::data_unavailable(asset, e.to_string()))
    }
}

/// Parses CSV text into a series, keeping observations no older than
/// `lookback_hours` before the newest one.
pub fn parse_series<R: BufRead>(
    reader: R,
    asset: &str,
    vs_currency: &str,
    lookback_hours: u32,
) -> Result<PriceSeries> {
    let mut lines = reader.lines().enumerate();

    let header = loop {
        match lines.next() {
            Some((_, line)) => {
                let line = line?;
                if !line.trim().is_empty() {
                    break line;
                }
            }
            None => {
                return Err(Error::Csv {
                    line: 1,
                    reason: "missing header row".to_string(),
                });
            }
        }
    };
    let (ts_col, price_col) = locate_columns(&header)?;
    let width = ts_col.max(price_col) + 1;

    let mut observations = Vec::new();
    for (index, line) in lines {
        let line = line?;
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(clean).collect();
        if fields.len() < width {
            return Err(Error::Csv {
                line: line_no,
                reason: format!("expected at least {width} fields, got {}", fields.len()),
            });
        }

        let timestamp = parse_timestamp(fields[ts_col]).ok_or_else(|| Error::Csv {
            line: line_no,
            reason: format!("invalid timestamp '{}'", fields[ts_col]),
        })?;
        let price: f64 = fields[price_col].parse().map_err(|_| Error::Csv {
            line: line_no,
            reason: format!("invalid price '{}'", fields[price_col]),
        })?;

        observations.push(PriceObservation::new(timestamp, price));
    }

    if let Some(newest) = observations.iter().map(|o| o.timestamp).max() {
        let cutoff = newest - Duration::hours(i64::from(lookback_hours.max(1)));
        observations.retain(|o| o.timestamp >= cutoff);
    }

    tracing::debug!(asset, points = observations.len(), "Parsed CSV price history.");
    Ok(PriceSeries::new(asset, vs_currency, observations))
}

fn locate_columns(header: &str) -> Result<(usize, usize)> {
    let names: Vec<String> = header.split(',').map(|h| clean(h).to_lowercase()).collect();
    let find = |name: &str| {
        names.iter().position(|h| h == name).ok_or_else(|| Error::Csv {
            line: 1,
            reason: format!("header needs a '{name}' column"),
        })
    };
    Ok((find("timestamp")?, find("price")?))
}

fn clean(field: &str) -> &str {
    field.trim().trim_matches('"')
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
