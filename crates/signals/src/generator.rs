use crate::types::SignalSet;
use core_types::PriceSeries;

/// The engine responsible for deriving market signals from a price series.
///
/// It holds no state besides the configured window, so the same series
/// always yields the same `SignalSet`.
#[derive(Debug, Clone, Copy)]
pub struct SignalGenerator {
    smoothing_window_hours: usize,
}

impl SignalGenerator {
    /// Creates a generator for the given smoothing window. A zero window is treated as one.
    pub fn new(smoothing_window_hours: usize) -> Self {
        Self {
            smoothing_window_hours: smoothing_window_hours.max(1),
        }
    }

    pub fn smoothing_window_hours(&self) -> usize {
        self.smoothing_window_hours
    }

    /// Computes all signals over the last `smoothing_window_hours` observations.
    pub fn compute(&self, series: &PriceSeries) -> SignalSet {
        let window: Vec<f64> = series
            .tail(self.smoothing_window_hours)
            .iter()
            .map(|o| o.price)
            .collect();

        if window.is_empty() {
            return SignalSet::neutral();
        }

        SignalSet {
            volatility: volatility(&window),
            momentum: momentum(&window),
            moving_average: moving_average(&window),
            spread_risk: spread_risk(&window),
        }
    }
}

/// Arithmetic mean of `prices`, 0 for an empty slice.
pub fn moving_average(prices: &[f64]) -> f64 {
    if prices.is_empty() {
        return 0.0;
    }
    let mean = prices.iter().sum::<f64>() / prices.len() as f64;

    // Rounding can push the mean an ulp past the extremes of a flat window.
    let (min, max) = min_max(prices);
    if min <= max { mean.clamp(min, max) } else { mean }
}

/// `(latest - earliest) / earliest`, 0 with fewer than 2 points or a zero base.
pub fn momentum(prices: &[f64]) -> f64 {
    match (prices.first(), prices.last()) {
        (Some(&earliest), Some(&latest)) if prices.len() >= 2 && earliest != 0.0 => {
            (latest - earliest) / earliest
        }
        _ => 0.0,
    }
}

/// Period-over-period percentage returns. Periods starting at a zero price are skipped.
pub fn percentage_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| w[1] / w[0] - 1.0)
        .collect()
}

/// Population standard deviation of the percentage returns, 0 with fewer than 2 returns.
pub fn volatility(prices: &[f64]) -> f64 {
    let returns = percentage_returns(prices);
    if returns.len() < 2 {
        return 0.0;
    }

    let mean_return = returns.iter().sum::<f64>() / returns.len() as f64;
    let variance = returns
        .iter()
        .map(|r| (r - mean_return).powi(2))
        .sum::<f64>()
        / returns.len() as f64;

    variance.max(0.0).sqrt()
}

/// `(max - min) / mean` over the window, 0 when the mean is 0.
pub fn spread_risk(prices: &[f64]) -> f64 {
    let mean = moving_average(prices);
    if mean == 0.0 {
        return 0.0;
    }
    let (min, max) = min_max(prices);
    (max - min) / mean
}

/// Linearly rescales `value` from `[floor, ceiling]` into `[0, 1]`, clamped at both ends.
///
/// A degenerate band (`ceiling <= floor`) acts as a step at `floor`.
pub fn normalize(value: f64, floor: f64, ceiling: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    if ceiling <= floor {
        return if value > floor { 1.0 } else { 0.0 };
    }
    ((value - floor) / (ceiling - floor)).clamp(0.0, 1.0)
}

fn min_max(prices: &[f64]) -> (f64, f64) {
    prices
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
            (lo.min(p), hi.max(p))
        })
}
