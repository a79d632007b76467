use chrono::{Duration, TimeZone, Utc};
use core_types::{
    CompetitorPriceProvider, Error, NoCompetitors, PriceObservation, PriceSeries, ProductConfig,
    Result,
};
use engine::{PriceEngine, PricingOutcome, PricingRecord, PricingWarning, to_records};
use proptest::prelude::*;
use rust_decimal_macros::dec;
use strategies::{MarketCondition, StrategySettings};

fn hourly(asset: &str, prices: &[f64]) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    PriceSeries::new(
        asset,
        "usd",
        prices
            .iter()
            .enumerate()
            .map(|(i, p)| PriceObservation::new(start + Duration::hours(i as i64), *p)),
    )
}

fn product(name: &str) -> ProductConfig {
    ProductConfig {
        name: name.to_string(),
        asset: None,
        target_margin: 0.05,
        elasticity: 0.5,
        competitor_name: None,
        competitor_price_usd: None,
        base_price_usd: None,
        min_markup: 0.0,
        max_markup: 0.2,
        volatility_floor: 0.01,
        volatility_ceiling: 0.3,
    }
}

fn engine_for(condition: MarketCondition, window: usize) -> PriceEngine {
    PriceEngine::new(condition, &StrategySettings::default(), window)
}

/// Serves a fixed series per asset; "empty" gets no observations, anything else is unknown.
fn market(asset: &str) -> Result<PriceSeries> {
    match asset {
        "bitcoin" => Ok(hourly(asset, &[100.0, 110.0, 105.0, 120.0])),
        "ethereum" => Ok(hourly(asset, &[2000.0, 2010.0, 2005.0, 2012.0, 2011.0])),
        "flat" => Ok(hourly(asset, &[100.0, 100.0, 100.0, 100.0])),
        "empty" => Ok(hourly(asset, &[])),
        _ => Err(Error::data_unavailable(asset, "unknown asset")),
    }
}

fn catalog() -> Vec<ProductConfig> {
    let mut eth = product("Mining rig");
    eth.asset = Some("ethereum".to_string());
    let mut empty = product("Ledger stand");
    empty.asset = Some("empty".to_string());
    vec![product("Hardware wallet"), empty, eth]
}

#[test]
fn empty_series_fails_only_that_product() {
    let outcomes = engine_for(MarketCondition::Balanced, 12).run(&catalog(), &market, &NoCompetitors);

    assert_eq!(outcomes.len(), 3);
    let names: Vec<&str> = outcomes.iter().map(|o| o.product_name()).collect();
    assert_eq!(names, vec!["Hardware wallet", "Ledger stand", "Mining rig"]);

    assert!(outcomes[0].is_priced());
    assert!(outcomes[2].is_priced());
    match &outcomes[1] {
        PricingOutcome::Failed { product_name, error } => {
            assert_eq!(product_name, "Ledger stand");
            assert!(matches!(error, Error::DataUnavailable { asset, .. } if asset == "empty"));
        }
        other => panic!("expected a failure, got {other:?}"),
    }
}

#[test]
fn provider_errors_become_data_unavailable() {
    let mut lost = product("Lost");
    lost.asset = Some("dogecoin".to_string());
    let misconfigured = |_: &str| -> Result<PriceSeries> {
        Err(Error::Configuration("bad credentials".to_string()))
    };

    let engine = engine_for(MarketCondition::Balanced, 12);
    let outcomes = engine.run(&[lost.clone()], &market, &NoCompetitors);
    assert!(matches!(
        outcomes[0].error(),
        Some(Error::DataUnavailable { reason, .. }) if reason == "unknown asset"
    ));

    let outcomes = engine.run(&[lost], &misconfigured, &NoCompetitors);
    assert_eq!(outcomes[0].error().map(Error::kind), Some("data_unavailable"));
}

#[test]
fn reference_scenario_is_balanced_and_bounded() {
    let engine = engine_for(MarketCondition::Balanced, 4);
    let outcomes = engine.run(&[product("Hardware wallet")], &market, &NoCompetitors);
    let result = outcomes[0].result().expect("priced");

    assert_eq!(result.asset, "bitcoin");
    assert_eq!(result.latest_price, 120.0);
    assert!((result.signals.momentum - 0.20).abs() < 1e-12);
    assert!((result.signals.moving_average - 108.75).abs() < 1e-12);

    let normalized = (result.signals.volatility - 0.01) / (0.3 - 0.01);
    let expected_raw = 0.05 + 0.5 * 0.20 - normalized;
    assert!((result.raw_markup - expected_raw).abs() < 1e-12);
    assert!((result.volatility_index - normalized).abs() < 1e-12);

    assert!((0.0..=0.2).contains(&result.final_markup));
    assert_eq!(result.final_markup, expected_raw.clamp(0.0, 0.2));
    assert!(result.warnings.is_empty());
}

#[test]
fn competitor_below_market_is_clamped_to_min_markup() {
    let mut p = product("Matched");
    p.asset = Some("flat".to_string());
    p.competitor_price_usd = Some(95.0);

    let outcomes = engine_for(MarketCondition::Competitor, 12).run(&[p], &market, &NoCompetitors);
    let result = outcomes[0].result().expect("priced");

    assert!((result.raw_markup + 0.05).abs() < 1e-12);
    assert_eq!(result.final_markup, 0.0);
    assert_eq!(result.quoted_price, dec!(100.00));
}

#[test]
fn named_competitor_is_resolved_through_the_provider() {
    let mut p = product("Matched");
    p.asset = Some("flat".to_string());
    p.competitor_name = Some("kraken".to_string());
    p.competitor_price_usd = Some(1.0);
    let quotes = |name: &str| -> Result<f64> {
        match name {
            "kraken" => Ok(110.0),
            _ => Err(Error::unknown_competitor(name, "not listed")),
        }
    };

    let outcomes = engine_for(MarketCondition::Competitor, 12).run(&[p], &market, &quotes);
    let result = outcomes[0].result().expect("priced");

    assert!((result.raw_markup - 0.10).abs() < 1e-12);
    assert!((result.final_markup - 0.10).abs() < 1e-12);
    assert_eq!(result.quoted_price, dec!(110.00));
}

#[test]
fn base_price_is_quoted_while_strategy_tracks_the_market() {
    let mut listed = product("Hardware wallet");
    listed.asset = Some("flat".to_string());
    listed.competitor_price_usd = Some(110.0);
    listed.base_price_usd = Some(149.0);

    let outcomes = engine_for(MarketCondition::Competitor, 12).run(&[listed], &market, &NoCompetitors);
    let result = outcomes[0].result().expect("priced");

    // The competitor markup is still measured against the market price.
    assert!((result.final_markup - 0.10).abs() < 1e-12);
    assert_eq!(result.latest_price, 100.0);
    assert_eq!(result.base_price, 149.0);
    assert_eq!(result.quoted_price, dec!(163.90));

    let records = to_records(&outcomes);
    assert_eq!(records[0].base_price, Some(149.0));
}

#[test]
fn unusable_competitor_quotes_warn_and_fall_back_to_balanced() {
    let mut named = product("Matched");
    named.competitor_name = Some("rival".to_string());
    let mut listed = product("Listed");
    listed.competitor_price_usd = Some(0.0);

    let engine = engine_for(MarketCondition::Competitor, 4);
    let baseline = engine_for(MarketCondition::Balanced, 4).run(&[product("Matched")], &market, &NoCompetitors);
    let baseline = baseline[0].result().expect("priced");

    for price in [f64::NAN, -5.0, 0.0] {
        let outcomes = engine.run(std::slice::from_ref(&named), &market, &Fixed(price));
        let result = outcomes[0].result().expect("priced");
        assert_eq!(result.raw_markup, baseline.raw_markup);
        assert!(matches!(
            result.warnings.as_slice(),
            [PricingWarning::UnusableCompetitorPrice { source, .. }] if source == "rival"
        ));
    }

    let outcomes = engine.run(&[listed], &market, &NoCompetitors);
    let result = outcomes[0].result().expect("priced");
    assert_eq!(result.raw_markup, baseline.raw_markup);
    assert_eq!(
        result.warnings,
        vec![PricingWarning::UnusableCompetitorPrice {
            source: engine::STATIC_COMPETITOR_SOURCE.to_string(),
            price: 0.0,
        }]
    );
    assert!(result.warnings[0].to_string().contains("unusable competitor price"));
}

#[test]
fn unknown_competitor_warns_and_falls_back_to_balanced() {
    let mut p = product("Matched");
    p.competitor_name = Some("nowhere".to_string());

    let competitor = engine_for(MarketCondition::Competitor, 4).run(&[p.clone()], &market, &NoCompetitors);
    let balanced = engine_for(MarketCondition::Balanced, 4).run(&[product("Matched")], &market, &NoCompetitors);

    let matched = competitor[0].result().expect("priced");
    let baseline = balanced[0].result().expect("priced");
    assert_eq!(matched.raw_markup, baseline.raw_markup);
    assert_eq!(matched.final_markup, baseline.final_markup);
    assert_eq!(
        matched.warnings,
        vec![PricingWarning::UnknownCompetitor {
            name: "nowhere".to_string(),
            reason: "no competitor source configured".to_string(),
        }]
    );

    // Outside competitor mode the warning is still reported.
    let other = engine_for(MarketCondition::Bull, 4).run(&[p], &market, &NoCompetitors);
    assert_eq!(other[0].result().expect("priced").warnings.len(), 1);
}

#[test]
fn runs_are_idempotent_and_parallel_matches_sequential() {
    let catalog = catalog();
    for condition in MarketCondition::ALL {
        let engine = engine_for(condition, 3);
        let first = engine.run(&catalog, &market, &NoCompetitors);
        let second = engine.run(&catalog, &market, &NoCompetitors);
        let parallel = engine.run_parallel(&catalog, &market, &NoCompetitors);

        assert_eq!(first, second, "{condition} is not idempotent");
        assert_eq!(first, parallel, "{condition} differs in parallel");
    }
}

#[test]
fn window_larger_than_series_uses_all_of_it() {
    let p = [product("Hardware wallet")];
    let wide = engine_for(MarketCondition::Balanced, 500).run(&p, &market, &NoCompetitors);
    let exact = engine_for(MarketCondition::Balanced, 4).run(&p, &market, &NoCompetitors);
    assert_eq!(wide, exact);
}

#[test]
fn default_asset_can_be_changed() {
    let engine = engine_for(MarketCondition::Balanced, 4).with_default_asset("ethereum");
    let outcomes = engine.run(&[product("Hardware wallet")], &market, &NoCompetitors);
    let result = outcomes[0].result().expect("priced");
    assert_eq!(result.asset, "ethereum");
    assert_eq!(result.latest_price, 2011.0);
}

#[test]
fn records_flatten_priced_and_failed_outcomes() {
    let outcomes = engine_for(MarketCondition::Bear, 12).run(&catalog(), &market, &NoCompetitors);
    let records = to_records(&outcomes);

    assert_eq!(records[0].status, "priced");
    assert_eq!(records[0].market_condition.as_deref(), Some("bear"));
    assert!(records[0].quoted_price.is_some());
    assert_eq!(records[0].base_price, records[0].latest_price);
    assert_eq!(records[1].status, "data_unavailable");
    assert!(records[1].final_markup.is_none());
    assert!(records[1].error.as_deref().is_some_and(|e| e.contains("empty")));

    let json = serde_json::to_value(&records).unwrap();
    assert_eq!(json[0]["product_name"], "Hardware wallet");
    assert_eq!(json[1]["status"], "data_unavailable");
    assert!(json[1]["final_markup"].is_null());

    let record = PricingRecord::from(&outcomes[2]);
    assert_eq!(record.product_name, "Mining rig");
}

struct Fixed(f64);

impl CompetitorPriceProvider for Fixed {
    fn fetch_competitor_price(&self, _name: &str) -> Result<f64> {
        Ok(self.0)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn final_markup_stays_in_band_for_every_strategy(
        prices in prop::collection::vec(0.0f64..1_000_000.0, 1..48),
        window in 0usize..64,
        target_margin in -2.0f64..2.0,
        elasticity in -5.0f64..5.0,
        min_markup in -0.5f64..0.5,
        width in 0.0f64..1.0,
        competitor in -100.0f64..2_000_000.0,
    ) {
        let series = hourly("bitcoin", &prices);
        let provider = |_: &str| -> Result<PriceSeries> { Ok(series.clone()) };
        let mut p = product("Any");
        p.target_margin = target_margin;
        p.elasticity = elasticity;
        p.min_markup = min_markup;
        p.max_markup = min_markup + width;
        p.competitor_name = Some("rival".to_string());

        for condition in MarketCondition::ALL {
            let outcomes = engine_for(condition, window).run(std::slice::from_ref(&p), &provider, &Fixed(competitor));
            let result = outcomes[0].result().expect("non-empty series is always priced");
            prop_assert!(result.final_markup >= p.min_markup && result.final_markup <= p.max_markup,
                "{} gave {} outside [{}, {}]", condition, result.final_markup, p.min_markup, p.max_markup);
            prop_assert!((0.0..=1.0).contains(&result.volatility_index));
        }
    }
}
