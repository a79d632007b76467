// In crates/signals/src/types.rs

use serde::{Deserialize, Serialize};

/// The market indicators derived from one smoothing window of a price series.
///
/// Every field is a plain fraction (0.05 = 5%), except `moving_average`
/// which is in the series' quote currency. A neutral set is all zeros.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SignalSet {
    /// Population standard deviation of period-over-period returns.
    pub volatility: f64,
    /// Relative change from the oldest to the newest price in the window.
    pub momentum: f64,
    /// Arithmetic mean of the window's prices.
    pub moving_average: f64,
    /// Price dispersion in the window, `(max - min) / mean`.
    pub spread_risk: f64,
}

impl SignalSet {
    /// The all-zero set returned for an empty window.
    pub fn neutral() -> Self {
        Self::default()
    }
}
