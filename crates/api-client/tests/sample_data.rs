use std::path::Path;

use api_client::CsvSeriesSource;
use core_types::SeriesProvider;

fn sample() -> CsvSeriesSource {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/sample_btc.csv");
    CsvSeriesSource::new(path, "bitcoin", "usd", 72)
}

#[test]
fn bundled_history_parses() {
    let series = sample().load().unwrap();

    assert_eq!(series.len(), 36);
    assert_eq!(series.prices()[0], 30000.0);
    assert!(series.prices().iter().all(|p| *p > 29000.0 && *p < 31500.0));
}

#[test]
fn provider_serves_the_configured_asset() {
    let source = sample();
    assert_eq!(source.fetch_series("BITCOIN").unwrap().len(), 36);
    assert!(source.fetch_series("ethereum").is_err());
}
